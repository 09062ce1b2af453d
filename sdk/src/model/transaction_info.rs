//! Confirmation metadata attached to transactions read back from a node.

use serde::{Deserialize, Serialize};

/// Where and how a transaction was included, as reported by the network.
///
/// For unconfirmed transactions `height` is zero. A transaction whose `hash`
/// equals its `merkle_component_hash` carries every signature it needs; an
/// aggregate still waiting for cosignatures has a merkle hash that differs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionInfo {
    pub height: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merkle_component_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregate_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregate_id: Option<String>,
}

impl TransactionInfo {
    /// Info for a top-level transaction.
    pub fn new(height: u64, hash: impl Into<String>, merkle_component_hash: impl Into<String>) -> Self {
        Self {
            height,
            hash: Some(hash.into()),
            merkle_component_hash: Some(merkle_component_hash.into()),
            ..Self::default()
        }
    }

    /// Info for a transaction embedded in an aggregate.
    pub fn embedded(height: u64, index: u32, aggregate_hash: impl Into<String>, aggregate_id: impl Into<String>) -> Self {
        Self {
            height,
            index: Some(index),
            aggregate_hash: Some(aggregate_hash.into()),
            aggregate_id: Some(aggregate_id.into()),
            ..Self::default()
        }
    }

    pub fn is_confirmed(&self) -> bool {
        self.height > 0
    }

    pub fn is_unconfirmed(&self) -> bool {
        self.height == 0 && self.hash.is_some() && self.hash == self.merkle_component_hash
    }

    pub fn has_missing_signatures(&self) -> bool {
        self.height == 0 && self.hash != self.merkle_component_hash
    }

    pub fn is_embedded(&self) -> bool {
        self.aggregate_hash.is_some()
    }
}
