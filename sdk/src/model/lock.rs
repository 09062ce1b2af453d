//! Hash and secret lock vocabulary.

use crate::codec::wire_enum;
use crate::crypto::{hash160, hash256, keccak_256, sha3_256};

wire_enum! {
    /// Hash function a secret lock's secret was produced with.
    pub enum LockHashAlgorithm: u8 {
        /// SHA3-256.
        Sha3_256 = 0,
        /// Keccak-256, for swaps with Ethereum-family chains.
        Keccak256 = 1,
        /// RIPEMD-160(SHA-256), for Bitcoin-family chains.
        Hash160 = 2,
        /// SHA-256(SHA-256), for Bitcoin-family chains.
        Hash256 = 3,
    }
}

impl LockHashAlgorithm {
    /// Computes the 32-byte lock secret for `proof`.
    ///
    /// The 20-byte Hash160 digest is right-padded with zeros, matching how the
    /// network stores it.
    pub fn secret_for(self, proof: &[u8]) -> [u8; 32] {
        match self {
            LockHashAlgorithm::Sha3_256 => sha3_256(proof),
            LockHashAlgorithm::Keccak256 => keccak_256(proof),
            LockHashAlgorithm::Hash256 => hash256(proof),
            LockHashAlgorithm::Hash160 => {
                let mut secret = [0u8; 32];
                secret[..20].copy_from_slice(&hash160(proof));
                secret
            }
        }
    }

    /// True when `secret` is what this algorithm produces for `proof`.
    pub fn verify(self, secret: &[u8; 32], proof: &[u8]) -> bool {
        &self.secret_for(proof) == secret
    }
}
