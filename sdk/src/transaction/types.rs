//! The transaction value and the results of signing it.

use serde::{Deserialize, Serialize};

use super::aggregate::check_embeddable;
use super::body::TransactionBody;
use super::error::TransactionError;
use crate::crypto::{PublicKey, Signature};
use crate::model::{Deadline, NetworkType, TransactionInfo, TransactionType};

// ---------------------------------------------------------------------------
// Transaction
// ---------------------------------------------------------------------------

/// A transaction: shared header fields plus a type-specific body.
///
/// Values are immutable once built. The `with_*` methods and
/// [`to_aggregate`](Self::to_aggregate) return updated copies.
///
/// `signature` and `signer` are set only on transactions decoded from a
/// signed payload and on inner transactions of an aggregate (signer only).
/// Signing itself does not touch the value; it produces a
/// [`SignedTransaction`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    network_type: NetworkType,
    version: u8,
    deadline: Deadline,
    max_fee: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    signature: Option<Signature>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    signer: Option<PublicKey>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    transaction_info: Option<TransactionInfo>,
    body: TransactionBody,
}

impl Transaction {
    /// An unsigned transaction with the body's default schema version, no fee
    /// and the default deadline from now.
    pub fn new(network_type: NetworkType, body: TransactionBody) -> Self {
        Self {
            network_type,
            version: body.transaction_type().default_version(),
            deadline: Deadline::default_from_now(),
            max_fee: 0,
            signature: None,
            signer: None,
            transaction_info: None,
            body,
        }
    }

    pub(crate) fn from_wire(
        network_type: NetworkType,
        version: u8,
        deadline: Deadline,
        max_fee: u64,
        signature: Option<Signature>,
        signer: Option<PublicKey>,
        body: TransactionBody,
    ) -> Self {
        Self {
            network_type,
            version,
            deadline,
            max_fee,
            signature,
            signer,
            transaction_info: None,
            body,
        }
    }

    pub fn with_deadline(mut self, deadline: Deadline) -> Self {
        self.deadline = deadline;
        self
    }

    pub fn with_max_fee(mut self, max_fee: u64) -> Self {
        self.max_fee = max_fee;
        self
    }

    pub fn with_version(mut self, version: u8) -> Self {
        self.version = version;
        self
    }

    pub fn with_transaction_info(mut self, info: TransactionInfo) -> Self {
        self.transaction_info = Some(info);
        self
    }

    /// A copy of this transaction ready to embed in an aggregate, signed by
    /// `signer`. Aggregates themselves cannot be embedded.
    pub fn to_aggregate(&self, signer: PublicKey) -> Result<Transaction, TransactionError> {
        let embedded = Transaction {
            signature: None,
            signer: Some(signer),
            ..self.clone()
        };
        check_embeddable(&embedded)?;
        Ok(embedded)
    }

    pub fn transaction_type(&self) -> TransactionType {
        self.body.transaction_type()
    }

    pub fn network_type(&self) -> NetworkType {
        self.network_type
    }

    pub fn version(&self) -> u8 {
        self.version
    }

    /// The header's `u16` version: network byte high, schema version low.
    pub fn entity_version(&self) -> u16 {
        (u16::from(self.network_type.value()) << 8) | u16::from(self.version)
    }

    pub fn deadline(&self) -> Deadline {
        self.deadline
    }

    pub fn max_fee(&self) -> u64 {
        self.max_fee
    }

    pub fn signature(&self) -> Option<&Signature> {
        self.signature.as_ref()
    }

    pub fn signer(&self) -> Option<&PublicKey> {
        self.signer.as_ref()
    }

    pub fn transaction_info(&self) -> Option<&TransactionInfo> {
        self.transaction_info.as_ref()
    }

    pub fn body(&self) -> &TransactionBody {
        &self.body
    }

    pub fn into_body(self) -> TransactionBody {
        self.body
    }

    pub fn is_signed(&self) -> bool {
        self.signature.is_some()
    }

    // Network status, as reported through `transaction_info`.

    pub fn is_unannounced(&self) -> bool {
        self.transaction_info.is_none()
    }

    pub fn is_unconfirmed(&self) -> bool {
        self.transaction_info
            .as_ref()
            .is_some_and(TransactionInfo::is_unconfirmed)
    }

    pub fn is_confirmed(&self) -> bool {
        self.transaction_info
            .as_ref()
            .is_some_and(TransactionInfo::is_confirmed)
    }

    pub fn has_missing_signatures(&self) -> bool {
        self.transaction_info
            .as_ref()
            .is_some_and(TransactionInfo::has_missing_signatures)
    }
}

// ---------------------------------------------------------------------------
// Signing results
// ---------------------------------------------------------------------------

/// A signed, ready-to-announce transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedTransaction {
    /// Full entity bytes, uppercase hex.
    pub payload: String,
    /// Transaction hash, uppercase hex.
    pub hash: String,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub signer: PublicKey,
    pub network_type: NetworkType,
}

impl SignedTransaction {
    pub fn payload_bytes(&self) -> Result<Vec<u8>, TransactionError> {
        hex::decode(&self.payload)
            .map_err(|e| TransactionError::invalid("payload", e.to_string()))
    }

    pub fn hash_bytes(&self) -> Result<[u8; 32], TransactionError> {
        decode_hash(&self.hash)
    }
}

/// A cosignature produced for an aggregate that is already announced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CosignatureSignedTransaction {
    /// Hash of the aggregate being cosigned, uppercase hex.
    pub parent_hash: String,
    pub signature: Signature,
    pub signer: PublicKey,
}

pub(crate) fn decode_hash(hex_str: &str) -> Result<[u8; 32], TransactionError> {
    let bytes =
        hex::decode(hex_str).map_err(|e| TransactionError::invalid("hash", e.to_string()))?;
    bytes
        .as_slice()
        .try_into()
        .map_err(|_| TransactionError::invalid("hash", format!("{} bytes, expected 32", bytes.len())))
}
