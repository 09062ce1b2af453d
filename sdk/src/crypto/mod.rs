//! # Cryptographic Primitives
//!
//! Everything the transaction layer needs from cryptography, and nothing more:
//!
//! - **SHA3-256** for ids, transaction hashes and address derivation.
//! - **Ed25519** for transaction signatures and cosignatures.
//! - **Keccak-256 / Hash160 / double SHA-256** for secret-lock proofs, because
//!   cross-chain swaps have to speak the other chain's hash.
//!
//! Every function is a thin typed wrapper around an audited implementation.
//! The [`Signer`] trait is the seam the signing pipeline depends on, so a
//! hardware wallet or remote signer can stand in for an in-memory [`KeyPair`].

pub mod hash;
pub mod keys;
pub mod signatures;

pub use hash::{hash160, hash256, keccak_256, ripemd160, sha3_256};
pub use keys::{KeyError, KeyPair, PublicKey, Signature};
pub use signatures::{verify, verify_raw, SignatureError, Signer};
