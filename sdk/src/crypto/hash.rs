//! # Hashing
//!
//! SHA3-256 is the network's hash: mosaic and namespace ids, transaction
//! hashes, address derivation. The other digests exist for secret locks,
//! where the lock's `LockHashAlgorithm` names which one produced the secret.
//!
//! All functions return fixed-size arrays; callers that need hex call
//! `hex::encode_upper` themselves.

use ripemd::Ripemd160;
use sha2::Sha256;
use sha3::{Digest, Keccak256, Sha3_256};

/// SHA3-256 (FIPS 202) of `data`.
///
/// ```
/// use catapult_sdk::crypto::sha3_256;
///
/// let digest = sha3_256(b"");
/// assert_eq!(digest[0], 0xA7);
/// ```
pub fn sha3_256(data: &[u8]) -> [u8; 32] {
    Sha3_256::digest(data).into()
}

/// SHA3-256 over several slices without concatenating them first.
pub fn sha3_256_parts(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Sha3_256::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize().into()
}

/// Original Keccak-256 (pre-FIPS padding), as used by Ethereum.
pub fn keccak_256(data: &[u8]) -> [u8; 32] {
    Keccak256::digest(data).into()
}

/// RIPEMD-160 of `data`.
pub fn ripemd160(data: &[u8]) -> [u8; 20] {
    Ripemd160::digest(data).into()
}

/// Bitcoin-style `RIPEMD-160(SHA-256(data))`.
pub fn hash160(data: &[u8]) -> [u8; 20] {
    ripemd160(&Sha256::digest(data))
}

/// Double SHA-256: `SHA-256(SHA-256(data))`.
pub fn hash256(data: &[u8]) -> [u8; 32] {
    Sha256::digest(Sha256::digest(data)).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sha3_256_empty_vector() {
        assert_eq!(
            hex::encode(sha3_256(b"")),
            "a7ffc6f8bf1ed76651c14756a061d662f580ff4de43b49fa82d80a4b80f8434a"
        );
    }

    #[test]
    fn keccak_differs_from_sha3() {
        assert_eq!(
            hex::encode(keccak_256(b"")),
            "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
        assert_ne!(keccak_256(b"abc"), sha3_256(b"abc"));
    }

    #[test]
    fn ripemd160_empty_vector() {
        assert_eq!(
            hex::encode(ripemd160(b"")),
            "9c1185a5c5e9fc54612808977ee8f548b2258d31"
        );
    }

    #[test]
    fn hash256_is_sha256_twice() {
        // SHA-256(SHA-256("")), the well-known Bitcoin constant.
        assert_eq!(
            hex::encode(hash256(b"")),
            "5df6e0e2761359d30a8275058e299fcc0381534545f55cf43e41983f5d4c9456"
        );
    }

    #[test]
    fn parts_match_concatenation() {
        let joined = sha3_256(b"catapult");
        let split = sha3_256_parts(&[b"cata", b"", b"pult"]);
        assert_eq!(joined, split);
    }

    #[test]
    fn hash160_chains_sha256_then_ripemd() {
        assert_eq!(hash160(b"abc"), ripemd160(&Sha256::digest(b"abc")));
    }
}
