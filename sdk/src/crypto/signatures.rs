//! # Digital Signatures
//!
//! The [`Signer`] trait is the only thing the signing pipeline knows about
//! key material. It is synchronous and may block (a hardware device asking
//! the user to press a button is a perfectly good signer).
//!
//! Verification uses ed25519-dalek's strict mode: small-order keys and
//! non-canonical signatures are rejected.

use ed25519_dalek::{Signature as DalekSignature, VerifyingKey};
use thiserror::Error;

use super::keys::{KeyPair, PublicKey, Signature};

/// Errors during signature verification.
///
/// Vague on purpose. "It didn't verify" is all a caller needs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureError {
    #[error("signature verification failed")]
    VerificationFailed,

    #[error("invalid public key")]
    InvalidPublicKey,
}

/// Something that can produce Ed25519 signatures for one account.
pub trait Signer {
    /// Signs `message` and returns the 64-byte signature.
    fn sign(&self, message: &[u8]) -> Signature;

    /// The public key signatures verify against.
    fn public_key(&self) -> PublicKey;
}

impl Signer for KeyPair {
    fn sign(&self, message: &[u8]) -> Signature {
        KeyPair::sign(self, message)
    }

    fn public_key(&self) -> PublicKey {
        KeyPair::public_key(self)
    }
}

impl<S: Signer + ?Sized> Signer for &S {
    fn sign(&self, message: &[u8]) -> Signature {
        (**self).sign(message)
    }

    fn public_key(&self) -> PublicKey {
        (**self).public_key()
    }
}

/// Verifies `signature` over `message` for `public_key`.
pub fn verify(public_key: &PublicKey, message: &[u8], signature: &Signature) -> bool {
    public_key.verify(message, signature)
}

/// Verifies raw key and signature bytes, reporting which part was bad.
pub fn verify_raw(
    public_key_bytes: &[u8; 32],
    message: &[u8],
    signature_bytes: &[u8; 64],
) -> Result<(), SignatureError> {
    let verifying_key =
        VerifyingKey::from_bytes(public_key_bytes).map_err(|_| SignatureError::InvalidPublicKey)?;
    let signature = DalekSignature::from_bytes(signature_bytes);
    verifying_key
        .verify_strict(message, &signature)
        .map_err(|_| SignatureError::VerificationFailed)
}
