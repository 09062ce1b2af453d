//! Metadata targets and value-update arithmetic.
//!
//! Metadata values are never sent whole when updating. The network stores
//! `old XOR new` and a signed size delta, so an update transaction carries
//! the XOR of the two values (padded to the longer one) and
//! `new.len() - old.len()`.

use serde::{Deserialize, Serialize};

use super::{NamespaceId, UnresolvedMosaicId};
use crate::crypto::PublicKey;

/// What a metadata entry is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MetadataTarget {
    /// The target account itself.
    Account,
    Mosaic(UnresolvedMosaicId),
    Namespace(NamespaceId),
}

/// Coordinates of one metadata entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MetadataKey {
    /// Account that owns the target.
    pub target_key: PublicKey,
    /// Caller-chosen 64-bit key, usually a hash of a name.
    pub scoped_key: u64,
    pub target: MetadataTarget,
}

/// The `(value_size_delta, value)` pair that turns `old` into `new`.
///
/// Returns `None` when the delta does not fit in an `i16`.
pub fn metadata_update(old: &[u8], new: &[u8]) -> Option<(i16, Vec<u8>)> {
    let delta = i16::try_from(new.len() as i64 - old.len() as i64).ok()?;
    let len = old.len().max(new.len());
    let value = (0..len)
        .map(|i| old.get(i).copied().unwrap_or(0) ^ new.get(i).copied().unwrap_or(0))
        .collect();
    Some((delta, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_write_is_the_value_itself() {
        let (delta, value) = metadata_update(b"", b"hello").unwrap();
        assert_eq!(delta, 5);
        assert_eq!(value, b"hello");
    }

    #[test]
    fn shrinking_update_xors_and_pads() {
        let (delta, value) = metadata_update(b"abcd", b"ab").unwrap();
        assert_eq!(delta, -2);
        assert_eq!(value, vec![0, 0, b'c', b'd']);
    }

    #[test]
    fn applying_update_twice_restores_old() {
        let old = b"value one";
        let (_, xor) = metadata_update(old, b"value two!").unwrap();
        let restored: Vec<u8> = xor
            .iter()
            .zip(b"value two!".iter())
            .map(|(a, b)| a ^ b)
            .collect();
        assert_eq!(&restored[..old.len()], old);
    }

    #[test]
    fn oversized_delta_is_rejected() {
        let big = vec![0u8; 40_000];
        assert!(metadata_update(b"", &big).is_none());
    }
}
