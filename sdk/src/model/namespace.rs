//! Namespace identifiers and the enums namespace transactions carry.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::codec::{wire_enum, CatReader, CatWriter, CodecError, WireFormat};
use crate::config::NAMESPACE_FLAG;
use crate::id::{self, IdError};

/// A 64-bit namespace identifier. The top bit is always set.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct NamespaceId(u64);

impl NamespaceId {
    pub fn new(id: u64) -> Result<Self, IdError> {
        if id & NAMESPACE_FLAG == 0 {
            return Err(IdError::InvalidId {
                id,
                reason: "namespace ids must have the top bit set",
            });
        }
        Ok(Self(id))
    }

    pub(crate) const fn from_raw_unchecked(id: u64) -> Self {
        Self(id)
    }

    /// Id of the last level of a dotted path, e.g. `cat.currency`.
    pub fn from_name(path: &str) -> Result<Self, IdError> {
        id::generate_namespace_path(path)?
            .last()
            .copied()
            .ok_or_else(|| IdError::InvalidName(path.to_string()))
    }

    pub fn from_hex(hex: &str) -> Result<Self, IdError> {
        let value =
            crate::UInt64::from_hex(hex).map_err(|_| IdError::InvalidHex(hex.to_string()))?;
        Self::new(value.to_u64())
    }

    pub const fn id(self) -> u64 {
        self.0
    }

    pub fn to_hex(self) -> String {
        format!("{:016X}", self.0)
    }
}

impl TryFrom<u64> for NamespaceId {
    type Error = IdError;

    fn try_from(id: u64) -> Result<Self, Self::Error> {
        Self::new(id)
    }
}

impl From<NamespaceId> for u64 {
    fn from(id: NamespaceId) -> Self {
        id.0
    }
}

impl FromStr for NamespaceId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl fmt::Display for NamespaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for NamespaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NamespaceId({})", self.to_hex())
    }
}

impl WireFormat for NamespaceId {
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

wire_enum! {
    /// Whether a registration creates a root or a child namespace.
    pub enum NamespaceRegistrationType: u8 {
        RootNamespace = 0,
        SubNamespace = 1,
    }
}

wire_enum! {
    /// Link or unlink an alias or a remote account.
    pub enum LinkAction: u8 {
        Unlink = 0,
        Link = 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_name_matches_known_ids() {
        assert_eq!(
            NamespaceId::from_name("nem").unwrap().id(),
            9_562_080_086_528_621_131
        );
        assert_eq!(NamespaceId::from_name("nem.owner").unwrap().to_hex(), "D85742D268617751");
        assert_eq!(NamespaceId::from_name("testaccount2").unwrap().to_hex(), "E7CA7E22727DDD88");
    }

    #[test]
    fn rejects_cleared_top_bit() {
        assert!(NamespaceId::new(1).is_err());
        assert!(matches!(
            NamespaceId::from_bytes(&1u64.to_le_bytes()),
            Err(CodecError::MalformedInput(_))
        ));
    }

    #[test]
    fn hex_roundtrip() {
        let id = NamespaceId::from_hex("D85742D268617751").unwrap();
        assert_eq!(id.to_string().parse::<NamespaceId>().unwrap(), id);
    }

    #[test]
    fn enum_discriminants() {
        assert_eq!(NamespaceRegistrationType::SubNamespace.value(), 1);
        assert_eq!(LinkAction::try_from(1).unwrap(), LinkAction::Link);
        assert!(LinkAction::try_from(2).is_err());
    }
}
