//! The `(low, high)` word-pair bridge for unsigned 64-bit quantities.
//!
//! REST payloads and several client platforms cannot carry an unsigned 64-bit
//! integer losslessly, so amounts, heights and ids travel as two 32-bit words.
//! [`UInt64`] converts between that pair, native `u64`, wider integers,
//! decimal strings and the fixed 16-digit hex form ids are usually shown in.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from [`UInt64`] conversions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UInt64Error {
    #[error("value {0} does not fit in 64 bits")]
    OutOfRange(String),

    #[error("hex value must be 1 to 16 hex digits, got {0:?}")]
    InvalidHex(String),

    #[error("invalid decimal value {0:?}")]
    InvalidDecimal(String),
}

/// A 64-bit unsigned value held as two little-endian 32-bit words.
///
/// Serializes to JSON as `[low, high]`, the DTO shape used by the network.
///
/// ```
/// use catapult_sdk::UInt64;
///
/// let value = UInt64::from_u64(0x85BB_EA6C_C462_B244);
/// assert_eq!(value.low(), 0xC462_B244);
/// assert_eq!(value.high(), 0x85BB_EA6C);
/// assert_eq!(value.to_hex(), "85BBEA6CC462B244");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "[u32; 2]", into = "[u32; 2]")]
pub struct UInt64 {
    // Field order gives `Ord` the numeric ordering.
    high: u32,
    low: u32,
}

impl UInt64 {
    pub const ZERO: UInt64 = UInt64 { high: 0, low: 0 };

    /// Builds a value from its two words.
    pub const fn new(low: u32, high: u32) -> Self {
        Self { high, low }
    }

    pub const fn from_u64(value: u64) -> Self {
        Self {
            high: (value >> 32) as u32,
            low: value as u32,
        }
    }

    pub const fn to_u64(self) -> u64 {
        ((self.high as u64) << 32) | self.low as u64
    }

    pub const fn low(self) -> u32 {
        self.low
    }

    pub const fn high(self) -> u32 {
        self.high
    }

    /// Returns the DTO word pair `[low, high]`.
    pub const fn to_dto(self) -> [u32; 2] {
        [self.low, self.high]
    }

    pub const fn from_dto(words: [u32; 2]) -> Self {
        Self::new(words[0], words[1])
    }

    /// Parses up to 16 hex digits (an optional `0x` prefix is accepted).
    pub fn from_hex(hex: &str) -> Result<Self, UInt64Error> {
        let digits = hex
            .strip_prefix("0x")
            .or_else(|| hex.strip_prefix("0X"))
            .unwrap_or(hex);
        if digits.is_empty() || digits.len() > 16 {
            return Err(UInt64Error::InvalidHex(hex.to_string()));
        }
        u64::from_str_radix(digits, 16)
            .map(Self::from_u64)
            .map_err(|_| UInt64Error::InvalidHex(hex.to_string()))
    }

    /// Fixed-width, zero-padded, uppercase hex (16 characters).
    pub fn to_hex(self) -> String {
        format!("{:016X}", self.to_u64())
    }

    /// Little-endian wire bytes, low word first.
    pub fn to_le_bytes(self) -> [u8; 8] {
        self.to_u64().to_le_bytes()
    }

    pub fn from_le_bytes(bytes: [u8; 8]) -> Self {
        Self::from_u64(u64::from_le_bytes(bytes))
    }

    pub fn is_zero(self) -> bool {
        self.low == 0 && self.high == 0
    }
}

impl From<u64> for UInt64 {
    fn from(value: u64) -> Self {
        Self::from_u64(value)
    }
}

impl From<UInt64> for u64 {
    fn from(value: UInt64) -> Self {
        value.to_u64()
    }
}

impl From<UInt64> for u128 {
    fn from(value: UInt64) -> Self {
        value.to_u64() as u128
    }
}

impl TryFrom<u128> for UInt64 {
    type Error = UInt64Error;

    fn try_from(value: u128) -> Result<Self, Self::Error> {
        u64::try_from(value)
            .map(Self::from_u64)
            .map_err(|_| UInt64Error::OutOfRange(value.to_string()))
    }
}

impl TryFrom<i128> for UInt64 {
    type Error = UInt64Error;

    fn try_from(value: i128) -> Result<Self, Self::Error> {
        u64::try_from(value)
            .map(Self::from_u64)
            .map_err(|_| UInt64Error::OutOfRange(value.to_string()))
    }
}

impl From<[u32; 2]> for UInt64 {
    fn from(words: [u32; 2]) -> Self {
        Self::from_dto(words)
    }
}

impl From<UInt64> for [u32; 2] {
    fn from(value: UInt64) -> Self {
        value.to_dto()
    }
}

/// Parses a base-10 string. Values above `u64::MAX` are out of range.
impl FromStr for UInt64 {
    type Err = UInt64Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(UInt64Error::InvalidDecimal(s.to_string()));
        }
        match s.parse::<u64>() {
            Ok(v) => Ok(Self::from_u64(v)),
            Err(_) => Err(UInt64Error::OutOfRange(s.to_string())),
        }
    }
}

impl fmt::Display for UInt64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_u64())
    }
}
