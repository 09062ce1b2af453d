//! Aggregate container: embedded transactions plus cosignatures.
//!
//! ```text
//! payload_size:u32 | embedded tx 1 | ... | embedded tx n | cosignature 1 | ... | cosignature m
//! ```
//!
//! `payload_size` covers only the embedded transactions. The cosignature
//! count is implicit: whatever the entity has left, in 96-byte steps.

use serde::{Deserialize, Serialize};

use super::body::read_counted;
use super::error::TransactionError;
use super::serializer::{embedded_size, read_embedded, write_embedded};
use super::types::Transaction;
use crate::codec::{fixed_layout, CatReader, CatWriter, CodecError, WireFormat};
use crate::config::{AGGREGATE_PAYLOAD_SIZE_PREFIX, COSIGNATURE_SIZE};
use crate::crypto::{PublicKey, Signature};

fixed_layout! {
    /// A cosigner's signature over an aggregate's hash.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct Cosignature {
        pub signer: PublicKey,
        pub signature: Signature,
    }
}

/// Body shared by aggregate complete and aggregate bonded transactions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateBody {
    /// Inner transactions in execution order. Each carries its own signer.
    pub transactions: Vec<Transaction>,
    pub cosignatures: Vec<Cosignature>,
}

impl AggregateBody {
    pub fn new(transactions: Vec<Transaction>) -> Self {
        Self {
            transactions,
            cosignatures: Vec::new(),
        }
    }

    /// Byte length of the embedded-transaction section.
    pub fn payload_size(&self) -> usize {
        self.transactions.iter().map(embedded_size).sum()
    }

    pub fn encoded_len(&self) -> usize {
        AGGREGATE_PAYLOAD_SIZE_PREFIX
            + self.payload_size()
            + self.cosignatures.len() * COSIGNATURE_SIZE
    }

    /// Every inner transaction must be embeddable: not an aggregate itself,
    /// signer attached, body valid.
    pub(crate) fn validate(&self) -> Result<(), TransactionError> {
        for transaction in &self.transactions {
            check_embeddable(transaction)?;
        }
        if self.payload_size() > u32::MAX as usize {
            return Err(TransactionError::invalid(
                "transactions",
                "embedded payload exceeds u32::MAX bytes",
            ));
        }
        Ok(())
    }

    pub(crate) fn write_to(&self, writer: &mut CatWriter) {
        writer.write_u32(self.payload_size() as u32);
        for transaction in &self.transactions {
            write_embedded(transaction, writer);
        }
        for cosignature in &self.cosignatures {
            cosignature.write_to(writer);
        }
    }

    /// `reader` must be scoped to the aggregate entity, since everything
    /// after the embedded section is read as cosignatures.
    pub(crate) fn read_from(reader: &mut CatReader<'_>) -> Result<Self, CodecError> {
        let payload_size = reader.read_u32()? as usize;
        let mut inner = reader.sub_reader(payload_size)?;
        let mut transactions = Vec::new();
        while !inner.is_empty() {
            transactions.push(read_embedded(&mut inner)?);
        }

        let remaining = reader.remaining();
        if remaining % COSIGNATURE_SIZE != 0 {
            return Err(CodecError::malformed(format!(
                "{remaining} bytes of cosignatures is not a multiple of {COSIGNATURE_SIZE}"
            )));
        }
        let cosignatures = read_counted(reader, remaining / COSIGNATURE_SIZE)?;

        tracing::trace!(
            inner = transactions.len(),
            cosignatures = cosignatures.len(),
            "decoded aggregate body"
        );
        Ok(Self {
            transactions,
            cosignatures,
        })
    }

    /// True when `key` has already cosigned.
    pub fn has_cosignature_from(&self, key: &PublicKey) -> bool {
        self.cosignatures.iter().any(|c| &c.signer == key)
    }
}

/// Checks that `transaction` may sit inside an aggregate.
pub(crate) fn check_embeddable(transaction: &Transaction) -> Result<(), TransactionError> {
    let transaction_type = transaction.transaction_type();
    if transaction_type.is_aggregate() {
        return Err(TransactionError::InvalidTransactionKind {
            transaction_type,
            reason: "an aggregate cannot be embedded in another aggregate",
        });
    }
    if transaction.signer().is_none() {
        return Err(TransactionError::UnresolvedRequiredField("signer"));
    }
    transaction.body().validate()
}

impl Transaction {
    /// True when `key` is the signer or one of the aggregate's cosigners.
    pub fn signed_by_account(&self, key: &PublicKey) -> bool {
        if self.signer() == Some(key) {
            return true;
        }
        self.body()
            .as_aggregate()
            .is_some_and(|body| body.has_cosignature_from(key))
    }
}
