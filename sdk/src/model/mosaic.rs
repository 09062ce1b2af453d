//! Mosaic identifiers, nonces, flags and amounts.

use std::fmt;
use std::str::FromStr;

use rand::RngCore;
use serde::{Deserialize, Serialize};

use super::NamespaceId;
use crate::codec::{fixed_layout, wire_enum, CatReader, CatWriter, CodecError, WireFormat};
use crate::config::NAMESPACE_FLAG;
use crate::id::IdError;

// ---------------------------------------------------------------------------
// MosaicId
// ---------------------------------------------------------------------------

/// A resolved 64-bit mosaic identifier. The top bit is always clear.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct MosaicId(u64);

impl MosaicId {
    /// Wraps a raw id, rejecting values with the namespace bit set.
    pub fn new(id: u64) -> Result<Self, IdError> {
        if id & NAMESPACE_FLAG != 0 {
            return Err(IdError::InvalidId {
                id,
                reason: "mosaic ids must have the top bit clear",
            });
        }
        Ok(Self(id))
    }

    pub(crate) const fn from_raw_unchecked(id: u64) -> Self {
        Self(id)
    }

    pub fn from_hex(hex: &str) -> Result<Self, IdError> {
        let value = crate::UInt64::from_hex(hex).map_err(|_| IdError::InvalidHex(hex.to_string()))?;
        Self::new(value.to_u64())
    }

    pub const fn id(self) -> u64 {
        self.0
    }

    pub fn to_hex(self) -> String {
        format!("{:016X}", self.0)
    }
}

impl TryFrom<u64> for MosaicId {
    type Error = IdError;

    fn try_from(id: u64) -> Result<Self, Self::Error> {
        Self::new(id)
    }
}

impl From<MosaicId> for u64 {
    fn from(id: MosaicId) -> Self {
        id.0
    }
}

impl FromStr for MosaicId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl fmt::Display for MosaicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for MosaicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MosaicId({})", self.to_hex())
    }
}

impl WireFormat for MosaicId {
    fn encoded_len(&self) -> usize {
        8
    }

    fn write_to(&self, writer: &mut CatWriter) {
        writer.write_u64(self.0);
    }

    fn read_from(reader: &mut CatReader<'_>) -> Result<Self, CodecError> {
        let raw = reader.read_u64()?;
        Self::new(raw).map_err(|e| CodecError::malformed(e.to_string()))
    }
}

// ---------------------------------------------------------------------------
// UnresolvedMosaicId
// ---------------------------------------------------------------------------

/// A mosaic reference that may be a real mosaic id or a namespace alias
/// (top bit set) the network resolves at execution time.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "u64", into = "u64")]
pub struct UnresolvedMosaicId(u64);

impl UnresolvedMosaicId {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub const fn id(self) -> u64 {
        self.0
    }

    /// True when this references a namespace alias rather than a mosaic.
    pub const fn is_alias(self) -> bool {
        self.0 & NAMESPACE_FLAG != 0
    }

    pub fn to_hex(self) -> String {
        format!("{:016X}", self.0)
    }
}

impl From<u64> for UnresolvedMosaicId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<UnresolvedMosaicId> for u64 {
    fn from(id: UnresolvedMosaicId) -> Self {
        id.0
    }
}

impl From<MosaicId> for UnresolvedMosaicId {
    fn from(id: MosaicId) -> Self {
        Self(id.id())
    }
}

impl From<NamespaceId> for UnresolvedMosaicId {
    fn from(id: NamespaceId) -> Self {
        Self(id.id())
    }
}

impl fmt::Display for UnresolvedMosaicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for UnresolvedMosaicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UnresolvedMosaicId({})", self.to_hex())
    }
}

impl WireFormat for UnresolvedMosaicId {
    fn encoded_len(&self) -> usize {
        8
    }

    fn write_to(&self, writer: &mut CatWriter) {
        writer.write_u64(self.0);
    }

    fn read_from(reader: &mut CatReader<'_>) -> Result<Self, CodecError> {
        reader.read_u64().map(Self)
    }
}

// ---------------------------------------------------------------------------
// Mosaic
// ---------------------------------------------------------------------------

fixed_layout! {
    /// An amount of a mosaic, in its smallest (atomic) units.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct Mosaic {
        pub id: UnresolvedMosaicId,
        pub amount: u64,
    }
}

impl Mosaic {
    pub fn new(id: impl Into<UnresolvedMosaicId>, amount: u64) -> Self {
        Self {
            id: id.into(),
            amount,
        }
    }
}

// ---------------------------------------------------------------------------
// MosaicNonce
// ---------------------------------------------------------------------------

/// The 4-byte nonce that, with the owner's key, determines a mosaic id.
///
/// Held as the `u32` the network writes little-endian. Hex and byte forms
/// use the big-endian order the value is printed in.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MosaicNonce(u32);

impl MosaicNonce {
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Draws a fresh nonce from the OS RNG.
    pub fn random() -> Self {
        Self(rand::rngs::OsRng.next_u32())
    }

    /// Bytes in printed (big-endian) order.
    pub const fn from_be_bytes(bytes: [u8; 4]) -> Self {
        Self(u32::from_be_bytes(bytes))
    }

    pub fn from_hex(hex: &str) -> Result<Self, IdError> {
        let bytes = hex::decode(hex).map_err(|_| IdError::InvalidHex(hex.to_string()))?;
        let bytes: [u8; 4] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| IdError::InvalidHex(hex.to_string()))?;
        Ok(Self::from_be_bytes(bytes))
    }

    pub const fn value(self) -> u32 {
        self.0
    }

    pub const fn to_be_bytes(self) -> [u8; 4] {
        self.0.to_be_bytes()
    }

    /// Wire order, which is also the order id generation hashes.
    pub const fn to_le_bytes(self) -> [u8; 4] {
        self.0.to_le_bytes()
    }

    pub fn to_hex(self) -> String {
        format!("{:08X}", self.0)
    }
}

impl fmt::Debug for MosaicNonce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MosaicNonce({})", self.to_hex())
    }
}

impl WireFormat for MosaicNonce {
    fn encoded_len(&self) -> usize {
        4
    }

    fn write_to(&self, writer: &mut CatWriter) {
        writer.write_u32(self.0);
    }

    fn read_from(reader: &mut CatReader<'_>) -> Result<Self, CodecError> {
        reader.read_u32().map(Self)
    }
}

// ---------------------------------------------------------------------------
// Flags & actions
// ---------------------------------------------------------------------------

/// Mosaic properties, packed into one byte on the wire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MosaicFlags {
    pub supply_mutable: bool,
    pub transferable: bool,
    pub restrictable: bool,
}

impl MosaicFlags {
    pub const NONE: u8 = 0x00;
    pub const SUPPLY_MUTABLE: u8 = 0x01;
    pub const TRANSFERABLE: u8 = 0x02;
    pub const RESTRICTABLE: u8 = 0x04;

    pub const fn new(supply_mutable: bool, transferable: bool, restrictable: bool) -> Self {
        Self {
            supply_mutable,
            transferable,
            restrictable,
        }
    }

    pub const fn bits(self) -> u8 {
        let mut bits = Self::NONE;
        if self.supply_mutable {
            bits |= Self::SUPPLY_MUTABLE;
        }
        if self.transferable {
            bits |= Self::TRANSFERABLE;
        }
        if self.restrictable {
            bits |= Self::RESTRICTABLE;
        }
        bits
    }

    pub fn from_bits(bits: u8) -> Result<Self, CodecError> {
        let known = Self::SUPPLY_MUTABLE | Self::TRANSFERABLE | Self::RESTRICTABLE;
        if bits & !known != 0 {
            return Err(CodecError::malformed(format!("unknown mosaic flag bits {bits:#04x}")));
        }
        Ok(Self {
            supply_mutable: bits & Self::SUPPLY_MUTABLE != 0,
            transferable: bits & Self::TRANSFERABLE != 0,
            restrictable: bits & Self::RESTRICTABLE != 0,
        })
    }
}

impl WireFormat for MosaicFlags {
    fn encoded_len(&self) -> usize {
        1
    }

    fn write_to(&self, writer: &mut CatWriter) {
        writer.write_u8(self.bits());
    }

    fn read_from(reader: &mut CatReader<'_>) -> Result<Self, CodecError> {
        Self::from_bits(reader.read_u8()?)
    }
}

wire_enum! {
    /// Direction of a supply change.
    pub enum MosaicSupplyChangeAction: u8 {
        Decrease = 0,
        Increase = 1,
    }
}
