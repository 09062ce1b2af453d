//! Transfer messages.

use serde::{Deserialize, Serialize};

use crate::codec::wire_enum;

wire_enum! {
    /// How a message payload is to be interpreted.
    pub enum MessageType: u8 {
        Plain = 0x00,
        Secure = 0x01,
        PersistentHarvestingDelegation = 0xFE,
    }
}

/// A message attached to a transfer: one type byte plus an opaque payload.
///
/// Encryption of secure messages happens outside this crate; the payload is
/// carried as given.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Message {
    pub message_type: MessageType,
    pub payload: Vec<u8>,
}

impl Message {
    pub fn new(message_type: MessageType, payload: impl Into<Vec<u8>>) -> Self {
        Self {
            message_type,
            payload: payload.into(),
        }
    }

    /// A UTF-8 plain message.
    pub fn plain(text: &str) -> Self {
        Self::new(MessageType::Plain, text.as_bytes())
    }

    /// A plain message with no payload: one byte on the wire.
    pub fn empty() -> Self {
        Self::new(MessageType::Plain, Vec::new())
    }

    /// Type byte plus payload.
    pub fn encoded_len(&self) -> usize {
        1 + self.payload.len()
    }

    /// The payload as text, when it is valid UTF-8.
    pub fn text(&self) -> Option<&str> {
        std::str::from_utf8(&self.payload).ok()
    }
}

impl Default for Message {
    fn default() -> Self {
        Self::empty()
    }
}
