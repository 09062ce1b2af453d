//! # CLI Interface
//!
//! Command-line structure for `catapult-tx`, using `clap` derive. Network
//! parameters come from a JSON config file, environment variables or flags,
//! in increasing order of precedence.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::logging::LogFormat;

/// Offline transaction tool for Catapult networks.
///
/// Derives ids, generates keys, builds and signs transfers, and decodes
/// signed payloads. Nothing is sent to a node; output is JSON on stdout.
#[derive(Parser, Debug)]
#[command(
    name = "catapult-tx",
    about = "Build, sign and decode Catapult transactions offline",
    version,
    propagate_version = true
)]
pub struct CatapultCli {
    /// Log output format on stderr.
    #[arg(long, global = true, env = "CATAPULT_LOG_FORMAT", value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,

    /// Raise log verbosity. Repeat for trace output.
    #[arg(long, short = 'v', global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Derive a mosaic id from an owner key and nonce.
    MosaicId(MosaicIdArgs),
    /// Derive the ids of every level of a namespace path.
    NamespaceId(NamespaceIdArgs),
    /// Build and sign a transfer; prints the signed transaction.
    Transfer(TransferArgs),
    /// Decode a hex payload into a JSON description.
    Decode(DecodeArgs),
    /// Generate a fresh key pair and its address.
    Keygen(KeygenArgs),
    /// Print version information and exit.
    Version,
}

/// Network selection shared by commands that need one.
#[derive(Args, Debug, Clone, Default)]
pub struct NetworkArgs {
    /// JSON network config (`network_type`, `generation_hash`, ...).
    #[arg(long, short = 'c', env = "CATAPULT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Network type: mainnet, testnet, mijin or mijintest.
    #[arg(long, env = "CATAPULT_NETWORK")]
    pub network: Option<String>,

    /// Hex generation hash of the target network.
    #[arg(long, env = "CATAPULT_GENERATION_HASH")]
    pub generation_hash: Option<String>,

    /// Max fee in absolute units. Overrides the config's default.
    #[arg(long, env = "CATAPULT_MAX_FEE")]
    pub max_fee: Option<u64>,
}

#[derive(Args, Debug)]
pub struct MosaicIdArgs {
    /// Owner public key, hex.
    #[arg(long)]
    pub owner: String,

    /// Nonce as 8 hex digits. Random when omitted.
    #[arg(long)]
    pub nonce: Option<String>,
}

#[derive(Args, Debug)]
pub struct NamespaceIdArgs {
    /// Dotted path, e.g. `cat.currency`.
    pub path: String,
}

#[derive(Args, Debug)]
pub struct TransferArgs {
    #[command(flatten)]
    pub network: NetworkArgs,

    /// Signer secret key, hex.
    ///
    /// Prefer the environment variable over the flag so the key stays out of
    /// shell history.
    #[arg(long, env = "CATAPULT_PRIVATE_KEY", hide_env_values = true)]
    pub private_key: String,

    /// Recipient address, or a namespace alias prefixed with `@`.
    #[arg(long)]
    pub recipient: String,

    /// Mosaic as `HEX_ID:AMOUNT`. Repeatable.
    #[arg(long = "mosaic")]
    pub mosaics: Vec<String>,

    /// Plain text message.
    #[arg(long)]
    pub message: Option<String>,

    /// Deadline in seconds from now. Overrides the config's default.
    #[arg(long)]
    pub deadline_secs: Option<u64>,
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Hex payload of a standalone transaction.
    pub payload: String,

    /// Treat the payload as an embedded (inner) transaction.
    #[arg(long)]
    pub embedded: bool,

    /// Generation hash; when given, the transaction hash is included.
    #[arg(long, env = "CATAPULT_GENERATION_HASH")]
    pub generation_hash: Option<String>,
}

#[derive(Args, Debug)]
pub struct KeygenArgs {
    /// Network type used to derive the address.
    #[arg(long, env = "CATAPULT_NETWORK", default_value = "mijintest")]
    pub network: String,
}
