//! Addresses, resolved and unresolved.
//!
//! A decoded address is 25 bytes: the network byte, the RIPEMD-160 of the
//! SHA3-256 of the account's public key, and a 4-byte SHA3-256 checksum of
//! those first 21 bytes. Humans see it as 40 characters of RFC 4648 base32
//! (`SB3KUBHATFCPV7UZQLWAQ2EUR6SIHBSBEOEDDDF3`), optionally dashed into
//! groups of six.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use super::{NamespaceId, NetworkType};
use crate::codec::{CatReader, CatWriter, CodecError, WireFormat};
use crate::config::ADDRESS_SIZE;
use crate::crypto::{ripemd160, sha3_256, PublicKey};

const CHECKSUM_SIZE: usize = 4;
const PLAIN_ADDRESS_LEN: usize = 40;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    #[error("address must be 40 base32 characters, got {0}")]
    InvalidLength(usize),

    #[error("address is not valid base32")]
    InvalidEncoding,

    #[error("unknown network byte {0:#04x}")]
    UnknownNetwork(u8),

    #[error("address checksum mismatch")]
    ChecksumMismatch,

    #[error("address belongs to {actual}, expected {expected}")]
    NetworkMismatch {
        expected: NetworkType,
        actual: NetworkType,
    },
}

// ---------------------------------------------------------------------------
// Address
// ---------------------------------------------------------------------------

/// A resolved 25-byte account address.
///
/// The network is kept beside the bytes; every constructor derives it from
/// the first byte and rejects bytes that name no network.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address {
    network_type: NetworkType,
    bytes: [u8; ADDRESS_SIZE],
}

impl Address {
    fn checked(bytes: [u8; ADDRESS_SIZE]) -> Result<Self, CodecError> {
        let network_type = NetworkType::try_from(bytes[0])?;
        Ok(Self { network_type, bytes })
    }

    /// Derives the address of `public_key` on `network`.
    pub fn from_public_key(public_key: &PublicKey, network: NetworkType) -> Self {
        let mut raw = [0u8; ADDRESS_SIZE];
        raw[0] = network.value();
        raw[1..21].copy_from_slice(&ripemd160(&sha3_256(public_key.as_bytes())));
        let checksum = sha3_256(&raw[..21]);
        raw[21..].copy_from_slice(&checksum[..CHECKSUM_SIZE]);
        Self {
            network_type: network,
            bytes: raw,
        }
    }

    /// Wraps decoded bytes after checking the network byte and checksum.
    pub fn from_decoded(bytes: [u8; ADDRESS_SIZE]) -> Result<Self, AddressError> {
        let address = Self::checked(bytes).map_err(|_| AddressError::UnknownNetwork(bytes[0]))?;
        if !address.has_valid_checksum() {
            return Err(AddressError::ChecksumMismatch);
        }
        Ok(address)
    }

    /// Parses the base32 form. Dashes, surrounding whitespace and lowercase
    /// are tolerated.
    pub fn from_plain(text: &str) -> Result<Self, AddressError> {
        let cleaned: String = text
            .trim()
            .chars()
            .filter(|c| *c != '-')
            .map(|c| c.to_ascii_uppercase())
            .collect();
        if cleaned.len() != PLAIN_ADDRESS_LEN {
            return Err(AddressError::InvalidLength(cleaned.len()));
        }
        let decoded = base32::decode(cleaned.as_bytes()).ok_or(AddressError::InvalidEncoding)?;
        Self::from_decoded(decoded)
    }

    /// Like [`from_plain`](Self::from_plain), but also pins the network.
    pub fn from_plain_on(text: &str, network: NetworkType) -> Result<Self, AddressError> {
        let address = Self::from_plain(text)?;
        let actual = address.network_type();
        if actual != network {
            return Err(AddressError::NetworkMismatch {
                expected: network,
                actual,
            });
        }
        Ok(address)
    }

    /// Parses the 50-character hex form used by REST payloads.
    pub fn from_encoded(hex_str: &str) -> Result<Self, AddressError> {
        let bytes = hex::decode(hex_str).map_err(|_| AddressError::InvalidEncoding)?;
        let bytes: [u8; ADDRESS_SIZE] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| AddressError::InvalidEncoding)?;
        Self::from_decoded(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; ADDRESS_SIZE] {
        &self.bytes
    }

    /// Network this address belongs to.
    pub fn network_type(&self) -> NetworkType {
        self.network_type
    }

    pub fn has_valid_checksum(&self) -> bool {
        sha3_256(&self.bytes[..21])[..CHECKSUM_SIZE] == self.bytes[21..]
    }

    /// `SB3KUBHATFCPV7UZQLWAQ2EUR6SIHBSBEOEDDDF3`
    pub fn plain(&self) -> String {
        base32::encode(&self.bytes)
    }

    /// `SB3KUB-HATFCP-V7UZQL-WAQ2EU-R6SIHB-SBEOED-DDF3`
    pub fn pretty(&self) -> String {
        let plain = self.plain();
        plain
            .as_bytes()
            .chunks(6)
            .map(|c| String::from_utf8_lossy(c).into_owned())
            .collect::<Vec<_>>()
            .join("-")
    }

    /// Uppercase hex of the 25 decoded bytes.
    pub fn encoded(&self) -> String {
        hex::encode_upper(self.bytes)
    }
}

impl PartialOrd for Address {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Address {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.bytes.cmp(&other.bytes)
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_plain(s)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.plain())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.plain())
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.plain())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_plain(&s).map_err(serde::de::Error::custom)
    }
}

impl WireFormat for Address {
    fn encoded_len(&self) -> usize {
        ADDRESS_SIZE
    }

    fn write_to(&self, writer: &mut CatWriter) {
        writer.write_bytes(&self.bytes);
    }

    fn read_from(reader: &mut CatReader<'_>) -> Result<Self, CodecError> {
        Self::checked(reader.read_array()?)
    }
}

// ---------------------------------------------------------------------------
// UnresolvedAddress
// ---------------------------------------------------------------------------

/// A recipient that is either a real address or a namespace alias the network
/// resolves when the transaction executes.
///
/// On the wire both take 25 bytes. An alias is written as
/// `network | 0x01`, the namespace id little-endian, then zero padding; the
/// low bit of the first byte is what tells the two apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnresolvedAddress {
    Address(Address),
    Alias {
        namespace_id: NamespaceId,
        network_type: NetworkType,
    },
}

impl UnresolvedAddress {
    const ALIAS_FLAG: u8 = 0x01;

    pub fn alias(namespace_id: NamespaceId, network_type: NetworkType) -> Self {
        UnresolvedAddress::Alias {
            namespace_id,
            network_type,
        }
    }

    pub fn network_type(&self) -> NetworkType {
        match self {
            UnresolvedAddress::Address(address) => address.network_type(),
            UnresolvedAddress::Alias { network_type, .. } => *network_type,
        }
    }

    pub fn is_alias(&self) -> bool {
        matches!(self, UnresolvedAddress::Alias { .. })
    }

    /// The 25 wire bytes.
    pub fn encoded_bytes(&self) -> [u8; ADDRESS_SIZE] {
        match self {
            UnresolvedAddress::Address(address) => *address.as_bytes(),
            UnresolvedAddress::Alias {
                namespace_id,
                network_type,
            } => {
                let mut raw = [0u8; ADDRESS_SIZE];
                raw[0] = network_type.value() | Self::ALIAS_FLAG;
                raw[1..9].copy_from_slice(&namespace_id.id().to_le_bytes());
                raw
            }
        }
    }

    pub fn encoded(&self) -> String {
        hex::encode_upper(self.encoded_bytes())
    }
}

impl From<Address> for UnresolvedAddress {
    fn from(address: Address) -> Self {
        UnresolvedAddress::Address(address)
    }
}

impl WireFormat for UnresolvedAddress {
    fn encoded_len(&self) -> usize {
        ADDRESS_SIZE
    }

    fn write_to(&self, writer: &mut CatWriter) {
        writer.write_bytes(&self.encoded_bytes());
    }

    fn read_from(reader: &mut CatReader<'_>) -> Result<Self, CodecError> {
        let bytes: [u8; ADDRESS_SIZE] = reader.read_array()?;
        if bytes[0] & Self::ALIAS_FLAG == 0 {
            return Address::checked(bytes).map(UnresolvedAddress::Address);
        }

        let network_type = NetworkType::try_from(bytes[0] & !Self::ALIAS_FLAG)?;
        if bytes[9..].iter().any(|b| *b != 0) {
            return Err(CodecError::malformed("namespace alias padding must be zero"));
        }
        let mut id = [0u8; 8];
        id.copy_from_slice(&bytes[1..9]);
        let namespace_id = NamespaceId::new(u64::from_le_bytes(id))
            .map_err(|e| CodecError::malformed(e.to_string()))?;
        Ok(UnresolvedAddress::Alias {
            namespace_id,
            network_type,
        })
    }
}

// ---------------------------------------------------------------------------
// Base32 (RFC 4648, no padding: 25 bytes are exactly 40 characters)
// ---------------------------------------------------------------------------

mod base32 {
    use super::ADDRESS_SIZE;

    const ALPHABET: &[u8; 32] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";

    pub fn encode(bytes: &[u8; ADDRESS_SIZE]) -> String {
        let mut out = String::with_capacity(super::PLAIN_ADDRESS_LEN);
        for chunk in bytes.chunks(5) {
            let mut block = [0u8; 8];
            block[3..].copy_from_slice(chunk);
            let bits = u64::from_be_bytes(block);
            for i in (0..8).rev() {
                out.push(ALPHABET[((bits >> (i * 5)) & 0x1F) as usize] as char);
            }
        }
        out
    }

    pub fn decode(text: &[u8]) -> Option<[u8; ADDRESS_SIZE]> {
        let mut out = [0u8; ADDRESS_SIZE];
        for (chunk, dst) in text.chunks(8).zip(out.chunks_mut(5)) {
            let mut bits = 0u64;
            for c in chunk {
                let value = ALPHABET.iter().position(|a| a == c)? as u64;
                bits = (bits << 5) | value;
            }
            dst.copy_from_slice(&bits.to_be_bytes()[3..]);
        }
        Some(out)
    }
}
