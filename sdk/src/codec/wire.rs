//! The [`WireFormat`] trait, its primitive impls, and the two declarative
//! macros that generate codecs for fixed layouts and discriminant enums.

use super::{CatReader, CatWriter, CodecError};
use crate::crypto::{PublicKey, Signature};
use crate::UInt64;

/// A value with a canonical catbuffer encoding.
///
/// `encoded_len` must equal the number of bytes `write_to` appends; size
/// prefixes are computed from it, never stored.
pub trait WireFormat: Sized {
    fn encoded_len(&self) -> usize;

    fn write_to(&self, writer: &mut CatWriter);

    fn read_from(reader: &mut CatReader<'_>) -> Result<Self, CodecError>;

    fn to_bytes(&self) -> Vec<u8> {
        let mut writer = CatWriter::with_capacity(self.encoded_len());
        self.write_to(&mut writer);
        writer.into_bytes()
    }

    /// Decodes a value that must span `bytes` exactly.
    fn from_bytes(bytes: &[u8]) -> Result<Self, CodecError> {
        let mut reader = CatReader::new(bytes);
        let value = Self::read_from(&mut reader)?;
        reader.finish()?;
        Ok(value)
    }
}

macro_rules! impl_wire_int {
    ($($ty:ty => $write:ident, $read:ident;)+) => {
        $(
            impl WireFormat for $ty {
                fn encoded_len(&self) -> usize {
                    std::mem::size_of::<$ty>()
                }

                fn write_to(&self, writer: &mut CatWriter) {
                    writer.$write(*self);
                }

                fn read_from(reader: &mut CatReader<'_>) -> Result<Self, CodecError> {
                    reader.$read()
                }
            }
        )+
    };
}

impl_wire_int! {
    u8 => write_u8, read_u8;
    i8 => write_i8, read_i8;
    u16 => write_u16, read_u16;
    i16 => write_i16, read_i16;
    u32 => write_u32, read_u32;
    u64 => write_u64, read_u64;
}

impl<const N: usize> WireFormat for [u8; N] {
    fn encoded_len(&self) -> usize {
        N
    }

    fn write_to(&self, writer: &mut CatWriter) {
        writer.write_bytes(self);
    }

    fn read_from(reader: &mut CatReader<'_>) -> Result<Self, CodecError> {
        reader.read_array()
    }
}

impl WireFormat for UInt64 {
    fn encoded_len(&self) -> usize {
        8
    }

    fn write_to(&self, writer: &mut CatWriter) {
        writer.write_u64(self.to_u64());
    }

    fn read_from(reader: &mut CatReader<'_>) -> Result<Self, CodecError> {
        reader.read_u64().map(UInt64::from_u64)
    }
}

impl WireFormat for PublicKey {
    fn encoded_len(&self) -> usize {
        crate::config::PUBLIC_KEY_SIZE
    }

    fn write_to(&self, writer: &mut CatWriter) {
        writer.write_bytes(self.as_bytes());
    }

    fn read_from(reader: &mut CatReader<'_>) -> Result<Self, CodecError> {
        reader.read_array().map(PublicKey::from_bytes)
    }
}

impl WireFormat for Signature {
    fn encoded_len(&self) -> usize {
        crate::config::SIGNATURE_SIZE
    }

    fn write_to(&self, writer: &mut CatWriter) {
        writer.write_bytes(self.as_bytes());
    }

    fn read_from(reader: &mut CatReader<'_>) -> Result<Self, CodecError> {
        reader.read_array().map(Signature::from_bytes)
    }
}

/// Declares a struct whose wire layout is its fields, in order, with no
/// variable sections. Every field type must implement `WireFormat`.
macro_rules! fixed_layout {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $( $(#[$fmeta:meta])* $fvis:vis $field:ident : $ty:ty ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $( $(#[$fmeta])* $fvis $field: $ty ),*
        }

        impl $crate::codec::WireFormat for $name {
            fn encoded_len(&self) -> usize {
                0 $( + $crate::codec::WireFormat::encoded_len(&self.$field) )*
            }

            fn write_to(&self, writer: &mut $crate::codec::CatWriter) {
                $( $crate::codec::WireFormat::write_to(&self.$field, writer); )*
            }

            fn read_from(
                reader: &mut $crate::codec::CatReader<'_>,
            ) -> Result<Self, $crate::codec::CodecError> {
                // Struct expressions evaluate fields in source order.
                Ok(Self {
                    $( $field: <$ty as $crate::codec::WireFormat>::read_from(reader)?, )*
                })
            }
        }
    };
}

/// Declares a fieldless enum encoded as a fixed-width discriminant.
/// Unknown discriminants decode to `MalformedInput`.
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident : $repr:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $value:expr ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ::serde::Serialize, ::serde::Deserialize)]
        #[repr($repr)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant = $value ),+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The wire discriminant.
            pub const fn value(self) -> $repr {
                self as $repr
            }
        }

        impl TryFrom<$repr> for $name {
            type Error = $crate::codec::CodecError;

            fn try_from(value: $repr) -> Result<Self, Self::Error> {
                match value {
                    $( v if v == $name::$variant as $repr => Ok($name::$variant), )+
                    other => Err($crate::codec::CodecError::MalformedInput(format!(
                        concat!("unknown ", stringify!($name), " discriminant {:#x}"),
                        other
                    ))),
                }
            }
        }

        impl $crate::codec::WireFormat for $name {
            fn encoded_len(&self) -> usize {
                std::mem::size_of::<$repr>()
            }

            fn write_to(&self, writer: &mut $crate::codec::CatWriter) {
                $crate::codec::WireFormat::write_to(&(*self as $repr), writer);
            }

            fn read_from(
                reader: &mut $crate::codec::CatReader<'_>,
            ) -> Result<Self, $crate::codec::CodecError> {
                Self::try_from(<$repr as $crate::codec::WireFormat>::read_from(reader)?)
            }
        }
    };
}

pub(crate) use fixed_layout;
pub(crate) use wire_enum;
