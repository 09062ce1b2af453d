//! # Protocol Configuration & Constants
//!
//! Every wire constant the SDK depends on lives here. These values are not
//! ours to choose: they mirror the reference node's entity layout, and a
//! single wrong byte count produces payloads no node will accept.
//!
//! Runtime parameters that do vary per deployment (which network, which
//! generation hash, default fee and deadline) are grouped in
//! [`NetworkConfig`], which can be loaded from JSON.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::NetworkType;

// ---------------------------------------------------------------------------
// Primitive Sizes
// ---------------------------------------------------------------------------

/// Ed25519 public key length in bytes.
pub const PUBLIC_KEY_SIZE: usize = 32;

/// Ed25519 signature length in bytes.
pub const SIGNATURE_SIZE: usize = 64;

/// SHA3-256 digest length in bytes.
pub const HASH256_SIZE: usize = 32;

/// Decoded address length: network byte + RIPEMD-160 + 4-byte checksum.
pub const ADDRESS_SIZE: usize = 25;

/// Mosaic nonce length in bytes.
pub const MOSAIC_NONCE_SIZE: usize = 4;

/// Generation hash length in bytes.
pub const GENERATION_HASH_SIZE: usize = 32;

// ---------------------------------------------------------------------------
// Entity Layout
// ---------------------------------------------------------------------------

/// Standalone header: size(4) + signature(64) + signer(32) + version(2) +
/// type(2) + max_fee(8) + deadline(8).
pub const TRANSACTION_HEADER_SIZE: usize = 4 + SIGNATURE_SIZE + PUBLIC_KEY_SIZE + 2 + 2 + 8 + 8;

/// Embedded header: size(4) + signer(32) + version(2) + type(2).
pub const EMBEDDED_HEADER_SIZE: usize = 4 + PUBLIC_KEY_SIZE + 2 + 2;

/// Byte offset of the signature slot inside a standalone payload.
pub const SIGNATURE_OFFSET: usize = 4;

/// Byte offset of the signer key slot inside a standalone payload.
pub const SIGNER_OFFSET: usize = SIGNATURE_OFFSET + SIGNATURE_SIZE;

/// Leading bytes excluded from the signed message (size, signature, signer).
///
/// Pinned against the reference network vectors exercised in
/// `tests/golden_vectors.rs`. Do not re-derive it from the header layout.
pub const SIGNABLE_OFFSET: usize = 100;

/// Size of one serialized cosignature: signer(32) + signature(64).
pub const COSIGNATURE_SIZE: usize = PUBLIC_KEY_SIZE + SIGNATURE_SIZE;

/// Size of the aggregate `payload_size` prefix.
pub const AGGREGATE_PAYLOAD_SIZE_PREFIX: usize = 4;

// ---------------------------------------------------------------------------
// Namespaces
// ---------------------------------------------------------------------------

/// Deepest namespace path the network accepts (`root.child.grandchild`).
pub const MAX_NAMESPACE_DEPTH: usize = 3;

/// Namespace names are length-prefixed by a single byte.
pub const MAX_NAMESPACE_NAME_LENGTH: usize = u8::MAX as usize;

/// Bit that separates namespace ids (set) from mosaic ids (cleared).
pub const NAMESPACE_FLAG: u64 = 1 << 63;

// ---------------------------------------------------------------------------
// Time
// ---------------------------------------------------------------------------

/// Network epoch: 2016-04-01T00:00:00Z, in Unix milliseconds. Deadlines and
/// timestamps on the wire are offsets from this instant.
pub const NEMESIS_EPOCH_MILLIS: i64 = 1_459_468_800_000;

/// Deadline applied by builders when the caller does not set one.
pub const DEFAULT_DEADLINE: Duration = Duration::from_secs(2 * 60 * 60);

/// Upper bound the network places on how far ahead a deadline may be.
pub const MAX_DEADLINE: Duration = Duration::from_secs(24 * 60 * 60);

// ---------------------------------------------------------------------------
// NetworkConfig
// ---------------------------------------------------------------------------

/// Errors raised while loading a [`NetworkConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("generation hash must be {expected} hex-encoded bytes, got {actual}")]
    InvalidGenerationHash { expected: usize, actual: usize },
}

/// Per-deployment parameters consumed by builders and the signing pipeline.
///
/// ```json
/// {
///   "network_type": "MijinTest",
///   "generation_hash": "57F7DA205008026C776CB6AED843393F04CD458E0AA2D9F1D5F31A402072B2D6",
///   "default_deadline_secs": 7200,
///   "default_max_fee": 0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub network_type: NetworkType,
    /// Hex-encoded generation hash of the target network.
    pub generation_hash: String,
    #[serde(default = "default_deadline_secs")]
    pub default_deadline_secs: u64,
    #[serde(default)]
    pub default_max_fee: u64,
}

fn default_deadline_secs() -> u64 {
    DEFAULT_DEADLINE.as_secs()
}

impl NetworkConfig {
    /// Builds a config with default deadline and zero fee.
    pub fn new(network_type: NetworkType, generation_hash: impl Into<String>) -> Self {
        Self {
            network_type,
            generation_hash: generation_hash.into(),
            default_deadline_secs: default_deadline_secs(),
            default_max_fee: 0,
        }
    }

    /// Parses a JSON document and validates the generation hash.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.generation_hash_bytes()?;
        Ok(config)
    }

    /// Reads and parses a JSON config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    /// Decodes the hex generation hash into its 32 raw bytes.
    pub fn generation_hash_bytes(&self) -> Result<[u8; GENERATION_HASH_SIZE], ConfigError> {
        let bytes = hex::decode(&self.generation_hash).map_err(|_| {
            ConfigError::InvalidGenerationHash {
                expected: GENERATION_HASH_SIZE,
                actual: self.generation_hash.len() / 2,
            }
        })?;
        bytes
            .as_slice()
            .try_into()
            .map_err(|_| ConfigError::InvalidGenerationHash {
                expected: GENERATION_HASH_SIZE,
                actual: bytes.len(),
            })
    }

    /// The default deadline offset as a [`Duration`].
    pub fn default_deadline(&self) -> Duration {
        Duration::from_secs(self.default_deadline_secs)
    }
}
