//! # Key Management
//!
//! Ed25519 key pairs, public keys and signatures as they appear in
//! transactions.
//!
//! A [`KeyPair`] is the in-memory [`Signer`](super::Signer) used by tests, the
//! CLI and anyone who keeps keys in process. Account management (wallets,
//! encrypted storage, derivation paths) is somebody else's problem; this
//! module stops at "here are 32 secret bytes, sign this".
//!
//! ## Security considerations
//!
//! - Secret keys are zeroized on drop (ed25519-dalek does this for us).
//! - Fresh keys come from `OsRng`.
//! - Key bytes are never logged, and `Debug` on a key pair prints only the
//!   public half.
//!
//! Public keys and signatures render as uppercase hex, the convention every
//! network tool and REST endpoint uses.

use std::fmt;
use std::str::FromStr;

use ed25519_dalek::{Signer as _, SigningKey, VerifyingKey, SECRET_KEY_LENGTH};
use rand::rngs::OsRng;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::config::{PUBLIC_KEY_SIZE, SIGNATURE_SIZE};

/// Errors that can occur while parsing key material.
///
/// Deliberately silent about *which* byte was wrong.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    #[error("invalid secret key: expected 32 hex-encoded bytes")]
    InvalidSecretKey,

    #[error("invalid public key: expected 32 hex-encoded bytes")]
    InvalidPublicKey,

    #[error("invalid signature: expected 64 hex-encoded bytes")]
    InvalidSignature,
}

// ---------------------------------------------------------------------------
// KeyPair
// ---------------------------------------------------------------------------

/// An Ed25519 key pair.
///
/// Intentionally does NOT implement `Serialize`. Exporting a secret key
/// should be a visible call to [`KeyPair::secret_key_hex`], not a side effect
/// of dumping a struct to JSON.
///
/// ```
/// use catapult_sdk::crypto::{KeyPair, Signer};
///
/// let kp = KeyPair::from_seed(&[1u8; 32]);
/// let sig = kp.sign(b"transfer 10 cat.currency");
/// assert!(kp.public_key().verify(b"transfer 10 cat.currency", &sig));
/// ```
pub struct KeyPair {
    signing_key: SigningKey,
}

impl KeyPair {
    /// Generates a fresh key pair from the OS RNG.
    pub fn generate() -> Self {
        Self {
            signing_key: SigningKey::generate(&mut OsRng),
        }
    }

    /// Builds a key pair from a 32-byte secret seed.
    pub fn from_seed(seed: &[u8; SECRET_KEY_LENGTH]) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(seed),
        }
    }

    /// Parses a hex-encoded 32-byte secret key (either case).
    pub fn from_hex(hex_str: &str) -> Result<Self, KeyError> {
        let bytes = hex::decode(hex_str).map_err(|_| KeyError::InvalidSecretKey)?;
        let seed: [u8; SECRET_KEY_LENGTH] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| KeyError::InvalidSecretKey)?;
        Ok(Self::from_seed(&seed))
    }

    pub fn public_key(&self) -> PublicKey {
        PublicKey(self.signing_key.verifying_key().to_bytes())
    }

    /// Signs `message` and returns the 64-byte signature.
    ///
    /// Deterministic per RFC 8032: the same key and message always produce
    /// the same signature, which is what makes signed payloads reproducible.
    pub fn sign(&self, message: &[u8]) -> Signature {
        Signature(self.signing_key.sign(message).to_bytes())
    }

    /// Exports the secret key as uppercase hex. Handle with care.
    pub fn secret_key_hex(&self) -> String {
        hex::encode_upper(self.signing_key.to_bytes())
    }
}

impl Clone for KeyPair {
    fn clone(&self) -> Self {
        Self::from_seed(&self.signing_key.to_bytes())
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Public half only.
        write!(f, "KeyPair(pub={})", self.public_key())
    }
}

impl PartialEq for KeyPair {
    fn eq(&self, other: &Self) -> bool {
        self.public_key() == other.public_key()
    }
}

impl Eq for KeyPair {}

// ---------------------------------------------------------------------------
// PublicKey
// ---------------------------------------------------------------------------

/// A 32-byte Ed25519 public key, as carried in transaction headers.
///
/// Construction does not check that the bytes are a valid curve point: the
/// wire format allows any 32 bytes (the all-zero placeholder included), and
/// verification simply fails for a bad key.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PublicKey([u8; PUBLIC_KEY_SIZE]);

impl PublicKey {
    /// The all-zero key used as a placeholder in unsigned payloads.
    pub const ZERO: PublicKey = PublicKey([0u8; PUBLIC_KEY_SIZE]);

    pub const fn from_bytes(bytes: [u8; PUBLIC_KEY_SIZE]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_SIZE] {
        &self.0
    }

    pub fn from_hex(s: &str) -> Result<Self, KeyError> {
        let bytes = hex::decode(s).map_err(|_| KeyError::InvalidPublicKey)?;
        bytes
            .as_slice()
            .try_into()
            .map(Self)
            .map_err(|_| KeyError::InvalidPublicKey)
    }

    pub fn to_hex(&self) -> String {
        hex::encode_upper(self.0)
    }

    /// Returns `true` when `signature` is a valid Ed25519 signature of
    /// `message` under this key. Invalid points simply fail.
    pub fn verify(&self, message: &[u8], signature: &Signature) -> bool {
        super::signatures::verify_raw(&self.0, message, signature.as_bytes()).is_ok()
    }

    /// Checks that the bytes decode to a curve point.
    pub fn is_valid_point(&self) -> bool {
        VerifyingKey::from_bytes(&self.0).is_ok()
    }
}

impl FromStr for PublicKey {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", &self.to_hex()[..16])
    }
}

impl Serialize for PublicKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Signature
// ---------------------------------------------------------------------------

/// A 64-byte Ed25519 signature.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Signature([u8; SIGNATURE_SIZE]);

impl Signature {
    /// The all-zero placeholder written before a payload is signed.
    pub const ZERO: Signature = Signature([0u8; SIGNATURE_SIZE]);

    pub const fn from_bytes(bytes: [u8; SIGNATURE_SIZE]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; SIGNATURE_SIZE] {
        &self.0
    }

    pub fn from_hex(s: &str) -> Result<Self, KeyError> {
        let bytes = hex::decode(s).map_err(|_| KeyError::InvalidSignature)?;
        bytes
            .as_slice()
            .try_into()
            .map(Self)
            .map_err(|_| KeyError::InvalidSignature)
    }

    pub fn to_hex(&self) -> String {
        hex::encode_upper(self.0)
    }
}

impl Default for Signature {
    fn default() -> Self {
        Self::ZERO
    }
}

impl FromStr for Signature {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hex_str = self.to_hex();
        write!(f, "Signature({}...{})", &hex_str[..8], &hex_str[120..])
    }
}

impl Serialize for Signature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Signature {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}
