//! Network identifiers.

use std::fmt;
use std::str::FromStr;

use crate::codec::{wire_enum, CodecError};

wire_enum! {
    /// The network a transaction or address belongs to.
    ///
    /// The discriminant is the first byte of every address and the high byte
    /// of every transaction's version field.
    pub enum NetworkType: u8 {
        MainNet = 0x68,
        TestNet = 0x98,
        Mijin = 0x60,
        MijinTest = 0x90,
    }
}

impl NetworkType {
    /// First character of a base32 address on this network.
    pub fn address_prefix(self) -> char {
        match self {
            NetworkType::MainNet => 'N',
            NetworkType::TestNet => 'T',
            NetworkType::Mijin => 'M',
            NetworkType::MijinTest => 'S',
        }
    }

    /// Inverse of [`address_prefix`](Self::address_prefix).
    pub fn from_address_prefix(c: char) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|n| n.address_prefix() == c.to_ascii_uppercase())
    }
}

impl fmt::Display for NetworkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NetworkType::MainNet => "MAIN_NET",
            NetworkType::TestNet => "TEST_NET",
            NetworkType::Mijin => "MIJIN",
            NetworkType::MijinTest => "MIJIN_TEST",
        };
        f.write_str(name)
    }
}

/// Accepts `MAIN_NET`, `main-net`, `MainNet`, `mainnet` and friends, or the
/// raw discriminant as decimal.
impl FromStr for NetworkType {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(raw) = s.parse::<u8>() {
            return Self::try_from(raw);
        }
        let normalized: String = s
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "mainnet" => Ok(NetworkType::MainNet),
            "testnet" => Ok(NetworkType::TestNet),
            "mijin" => Ok(NetworkType::Mijin),
            "mijintest" => Ok(NetworkType::MijinTest),
            _ => Err(CodecError::malformed(format!("unknown network type {s:?}"))),
        }
    }
}
