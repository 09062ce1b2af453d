//! # Identifier Generation
//!
//! Mosaic and namespace ids are not assigned by the network; they are
//! derived, deterministically, from data the creator already has. That lets
//! a client know the id of a mosaic before the definition is even announced,
//! and lets anyone compute `cat.currency` without asking a node.
//!
//! Both derivations take the first 8 bytes of a SHA3-256 digest as a
//! little-endian `u64`, then force the top bit: clear for mosaics, set for
//! namespaces. The top bit is what lets an [`UnresolvedMosaicId`] carry
//! either kind in the same 8 bytes.
//!
//! [`UnresolvedMosaicId`]: crate::model::UnresolvedMosaicId

use thiserror::Error;

use crate::config::{MAX_NAMESPACE_DEPTH, MAX_NAMESPACE_NAME_LENGTH, NAMESPACE_FLAG};
use crate::crypto::hash::sha3_256_parts;
use crate::crypto::PublicKey;
use crate::model::{MosaicId, MosaicNonce, NamespaceId};

/// Errors raised while deriving or validating ids.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdError {
    #[error("invalid namespace name {0:?}")]
    InvalidName(String),

    #[error("namespace path has {parts} parts, at most {max} allowed")]
    TooManyParts { parts: usize, max: usize },

    #[error("invalid id {id:#018x}: {reason}")]
    InvalidId { id: u64, reason: &'static str },

    #[error("invalid hex id {0:?}")]
    InvalidHex(String),
}

fn digest_prefix(parts: &[&[u8]]) -> u64 {
    let digest = sha3_256_parts(parts);
    let mut prefix = [0u8; 8];
    prefix.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(prefix)
}

// ---------------------------------------------------------------------------
// Mosaics
// ---------------------------------------------------------------------------

/// Derives the id of the mosaic `owner` defines with `nonce`.
///
/// `SHA3-256(nonce_le || owner)`, first 8 bytes little-endian, top bit clear.
///
/// ```
/// use catapult_sdk::crypto::PublicKey;
/// use catapult_sdk::id::generate_mosaic_id;
/// use catapult_sdk::model::MosaicNonce;
///
/// let owner = PublicKey::from_hex(
///     "4AFF7B4BA8C1C26A7917575993346627CB6C80DE62CD92F7F9AEDB7064A3DE62",
/// ).unwrap();
/// let nonce = MosaicNonce::from_hex("B76FE378").unwrap();
/// assert_eq!(generate_mosaic_id(nonce, &owner).to_hex(), "3AD842A8C0AFC518");
/// ```
pub fn generate_mosaic_id(nonce: MosaicNonce, owner: &PublicKey) -> MosaicId {
    let raw = digest_prefix(&[&nonce.to_le_bytes(), owner.as_bytes()]);
    MosaicId::from_raw_unchecked(raw & !NAMESPACE_FLAG)
}

// ---------------------------------------------------------------------------
// Namespaces
// ---------------------------------------------------------------------------

/// Checks one namespace level against `^[a-z0-9][a-z0-9_-]*$`.
pub fn validate_namespace_name(name: &str) -> Result<(), IdError> {
    let bytes = name.as_bytes();
    let valid = match bytes.split_first() {
        None => false,
        Some((first, rest)) => {
            bytes.len() <= MAX_NAMESPACE_NAME_LENGTH
                && (first.is_ascii_lowercase() || first.is_ascii_digit())
                && rest
                    .iter()
                    .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || *b == b'-' || *b == b'_')
        }
    };
    if valid {
        Ok(())
    } else {
        Err(IdError::InvalidName(name.to_string()))
    }
}

/// Derives the id of `name` under `parent`. Roots pass `None`, which hashes
/// as a zero parent.
pub fn generate_namespace_id(name: &str, parent: Option<NamespaceId>) -> Result<NamespaceId, IdError> {
    validate_namespace_name(name)?;
    let parent_raw = parent.map_or(0, NamespaceId::id);
    let raw = digest_prefix(&[&parent_raw.to_le_bytes(), name.as_bytes()]);
    Ok(NamespaceId::from_raw_unchecked(raw | NAMESPACE_FLAG))
}

/// Ids of every level of a dotted path, root first.
///
/// `"cat.currency"` yields `[id("cat"), id("currency" under "cat")]`.
pub fn generate_namespace_path(path: &str) -> Result<Vec<NamespaceId>, IdError> {
    let parts: Vec<&str> = path.split('.').collect();
    if parts.len() > MAX_NAMESPACE_DEPTH {
        return Err(IdError::TooManyParts {
            parts: parts.len(),
            max: MAX_NAMESPACE_DEPTH,
        });
    }

    let mut ids = Vec::with_capacity(parts.len());
    let mut parent = None;
    for part in parts {
        if part.is_empty() {
            return Err(IdError::InvalidName(path.to_string()));
        }
        let id = generate_namespace_id(part, parent)?;
        ids.push(id);
        parent = Some(id);
    }
    Ok(ids)
}

/// Derives `name` as a child of the namespace at `parent_path`.
pub fn generate_namespace_id_in(name: &str, parent_path: &str) -> Result<NamespaceId, IdError> {
    let parents = generate_namespace_path(parent_path)?;
    if parents.len() + 1 > MAX_NAMESPACE_DEPTH {
        return Err(IdError::TooManyParts {
            parts: parents.len() + 1,
            max: MAX_NAMESPACE_DEPTH,
        });
    }
    generate_namespace_id(name, parents.last().copied())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(hex: &str) -> PublicKey {
        PublicKey::from_hex(hex).unwrap()
    }

    #[test]
    fn mosaic_id_vectors() {
        let cases = [
            ("4AFF7B4BA8C1C26A7917575993346627CB6C80DE62CD92F7F9AEDB7064A3DE62", "B76FE378", "3AD842A8C0AFC518"),
            ("3811EDF245F1D30171FF1474B24C4366FECA365A8457AAFA084F3DE4AEA0BA60", "21832A2A", "24C54740A9F3893F"),
            ("3104D468D20491EC12C988C50CAD9282256052907415359201C46CBD7A0BCD75", "2ADBB332", "43908F2DEEA04245"),
            ("6648E16513F351E9907B0EA34377E25F579BE640D4698B28E06585A21E94CFE2", "B9175E0F", "183172772BD29E78"),
            ("1C05C40D38463FE725CF0584A3A69E3B0D6B780196A88C50624E49B921EE1404", "F6077DDD", "423DB0B12F787422"),
        ];
        for (owner, nonce, expected) in cases {
            let nonce = MosaicNonce::from_hex(nonce).unwrap();
            assert_eq!(generate_mosaic_id(nonce, &key(owner)).to_hex(), expected);
        }
    }

    #[test]
    fn mosaic_id_top_bit_is_clear_and_deterministic() {
        let owner = key("4AFF7B4BA8C1C26A7917575993346627CB6C80DE62CD92F7F9AEDB7064A3DE62");
        for n in 0..64u32 {
            let a = generate_mosaic_id(MosaicNonce::new(n), &owner);
            let b = generate_mosaic_id(MosaicNonce::new(n), &owner);
            assert_eq!(a, b);
            assert_eq!(a.id() & NAMESPACE_FLAG, 0);
        }
    }

    #[test]
    fn root_namespace_vector() {
        assert_eq!(
            generate_namespace_id("nem", None).unwrap().id(),
            9_562_080_086_528_621_131
        );
    }

    #[test]
    fn child_namespace_vector() {
        let ids = generate_namespace_path("nem.subnem").unwrap();
        assert_eq!(ids.len(), 2);
        assert_eq!(ids[0].id(), 9_562_080_086_528_621_131);
        assert_eq!(ids[1].id(), 16_440_672_666_685_223_858);
    }

    #[test]
    fn path_levels_fold_left_to_right() {
        let ids = generate_namespace_path("foo.bar").unwrap();
        let foo = generate_namespace_id("foo", None).unwrap();
        assert_eq!(ids[1], generate_namespace_id("bar", Some(foo)).unwrap());
        assert_eq!(generate_namespace_id_in("bar", "foo").unwrap(), ids[1]);
    }

    #[test]
    fn namespace_ids_have_top_bit_set() {
        for name in ["a", "cat", "currency", "0x", "with-dash", "under_score"] {
            let id = generate_namespace_id(name, None).unwrap();
            assert_ne!(id.id() & NAMESPACE_FLAG, 0, "{name}");
        }
    }

    #[test]
    fn name_grammar() {
        assert!(validate_namespace_name("valid-name_1").is_ok());
        assert!(validate_namespace_name("0start").is_ok());
        for bad in ["Invalid_Name!", "", "-lead", "_lead", "UPPER", "a.b", "sp ace", "bet@"] {
            assert_eq!(
                validate_namespace_name(bad),
                Err(IdError::InvalidName(bad.to_string())),
                "{bad}"
            );
        }
    }

    #[test]
    fn invalid_paths() {
        for path in ["", "alpha.bet@.zeta", ".", "..", ".a", "a..a", "a."] {
            assert!(
                matches!(generate_namespace_path(path), Err(IdError::InvalidName(_))),
                "{path}"
            );
        }
    }

    #[test]
    fn too_many_parts() {
        assert_eq!(
            generate_namespace_path("a.b.c.d"),
            Err(IdError::TooManyParts { parts: 4, max: 3 })
        );
        assert!(generate_namespace_path("a.b.c").is_ok());
        assert_eq!(
            generate_namespace_id_in("d", "a.b.c"),
            Err(IdError::TooManyParts { parts: 4, max: 3 })
        );
    }

    #[test]
    fn names_longer_than_a_byte_rejected() {
        let long = "a".repeat(MAX_NAMESPACE_NAME_LENGTH + 1);
        assert!(generate_namespace_id(&long, None).is_err());
    }
}
