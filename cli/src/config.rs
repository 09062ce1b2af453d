//! Resolves the effective [`NetworkConfig`] from file, environment and flags.

use anyhow::{Context, Result};

use catapult_sdk::config::NetworkConfig;
use catapult_sdk::model::NetworkType;

use crate::cli::NetworkArgs;

/// Generation hash used when neither file nor flag provides one: the
/// well-known hash of the public Mijin test network.
pub const DEFAULT_GENERATION_HASH: &str =
    "57F7DA205008026C776CB6AED843393F04CD458E0AA2D9F1D5F31A402072B2D6";

/// Starts from the config file (or Mijin test defaults), then applies each
/// flag that was given.
pub fn resolve(args: &NetworkArgs) -> Result<NetworkConfig> {
    let mut config = match &args.config {
        Some(path) => NetworkConfig::load(path)
            .with_context(|| format!("failed to load network config {}", path.display()))?,
        None => NetworkConfig::new(NetworkType::MijinTest, DEFAULT_GENERATION_HASH),
    };

    if let Some(network) = &args.network {
        config.network_type = parse_network(network)?;
    }
    if let Some(hash) = &args.generation_hash {
        config.generation_hash = hash.clone();
    }
    if let Some(fee) = args.max_fee {
        config.default_max_fee = fee;
    }
    config
        .generation_hash_bytes()
        .context("invalid generation hash")?;

    tracing::debug!(
        network = %config.network_type,
        max_fee = config.default_max_fee,
        deadline_secs = config.default_deadline_secs,
        "resolved network config"
    );
    Ok(config)
}

pub fn parse_network(value: &str) -> Result<NetworkType> {
    value
        .parse()
        .with_context(|| format!("unknown network {value:?}"))
}

/// Applies a `--deadline-secs` override.
pub fn with_deadline(mut config: NetworkConfig, deadline_secs: Option<u64>) -> NetworkConfig {
    if let Some(secs) = deadline_secs {
        config.default_deadline_secs = secs;
    }
    config
}
