//! Transaction deadlines.
//!
//! On the wire a deadline is a `u64` count of milliseconds since the network
//! epoch (2016-04-01T00:00:00Z), not since the Unix epoch.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::codec::{CatReader, CatWriter, CodecError, WireFormat};
use crate::config::{DEFAULT_DEADLINE, NEMESIS_EPOCH_MILLIS};

/// Latest instant a transaction may be included in a block.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Deadline(u64);

impl Deadline {
    /// `now + offset`.
    pub fn in_duration(offset: Duration) -> Self {
        Self::at(Utc::now()) + offset
    }

    /// `now + 2h`, what builders use when no deadline is given.
    pub fn default_from_now() -> Self {
        Self::in_duration(DEFAULT_DEADLINE)
    }

    /// Milliseconds since the network epoch.
    pub const fn from_epoch_millis(millis: u64) -> Self {
        Self(millis)
    }

    /// Converts a wall-clock instant. Instants before the network epoch
    /// saturate to zero.
    pub fn at(instant: DateTime<Utc>) -> Self {
        let millis = instant.timestamp_millis() - NEMESIS_EPOCH_MILLIS;
        Self(u64::try_from(millis).unwrap_or(0))
    }

    pub const fn epoch_millis(self) -> u64 {
        self.0
    }

    /// Wall-clock instant, or `None` past chrono's representable range.
    pub fn to_datetime(self) -> Option<DateTime<Utc>> {
        let unix_millis = i64::try_from(self.0).ok()?.checked_add(NEMESIS_EPOCH_MILLIS)?;
        Utc.timestamp_millis_opt(unix_millis).single()
    }

    /// True when the deadline lies in the past.
    pub fn is_expired(self) -> bool {
        self < Self::at(Utc::now())
    }
}

impl std::ops::Add<Duration> for Deadline {
    type Output = Deadline;

    fn add(self, rhs: Duration) -> Deadline {
        let millis = u64::try_from(rhs.as_millis()).unwrap_or(u64::MAX);
        Deadline(self.0.saturating_add(millis))
    }
}

impl fmt::Display for Deadline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_datetime() {
            Some(dt) => write!(f, "{}", dt.to_rfc3339()),
            None => write!(f, "+{}ms", self.0),
        }
    }
}

impl fmt::Debug for Deadline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Deadline({})", self.0)
    }
}

impl WireFormat for Deadline {
    fn encoded_len(&self) -> usize {
        8
    }

    fn write_to(&self, writer: &mut CatWriter) {
        writer.write_u64(self.0);
    }

    fn read_from(reader: &mut CatReader<'_>) -> Result<Self, CodecError> {
        reader.read_u64().map(Self)
    }
}
