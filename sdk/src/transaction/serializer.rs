//! Header codecs and the [`BinarySerializer`].
//!
//! ```text
//! standalone: size:u32 | signature:64 | signer:32 | version:u16 | type:u16 | max_fee:u64 | deadline:u64 | body
//! embedded:   size:u32 | signer:32 | version:u16 | type:u16 | body
//! ```
//!
//! `size` is written from the computed length on every encode. On decode it
//! bounds the entity: the body must end exactly where `size` says.

use super::aggregate::check_embeddable;
use super::body::TransactionBody;
use super::error::TransactionError;
use super::types::Transaction;
use crate::codec::{CatReader, CatWriter, CodecError, WireFormat};
use crate::config::{EMBEDDED_HEADER_SIZE, TRANSACTION_HEADER_SIZE};
use crate::crypto::{PublicKey, Signature};
use crate::model::{Deadline, NetworkType, TransactionType};

/// Entity length of `transaction` in standalone form.
pub(crate) fn standalone_size(transaction: &Transaction) -> usize {
    TRANSACTION_HEADER_SIZE + transaction.body().encoded_len()
}

/// Entity length of `transaction` in embedded form.
pub(crate) fn embedded_size(transaction: &Transaction) -> usize {
    EMBEDDED_HEADER_SIZE + transaction.body().encoded_len()
}

fn write_standalone(transaction: &Transaction, writer: &mut CatWriter) {
    writer.write_u32(standalone_size(transaction) as u32);
    transaction
        .signature()
        .copied()
        .unwrap_or(Signature::ZERO)
        .write_to(writer);
    transaction
        .signer()
        .copied()
        .unwrap_or(PublicKey::ZERO)
        .write_to(writer);
    writer.write_u16(transaction.entity_version());
    transaction.transaction_type().write_to(writer);
    writer.write_u64(transaction.max_fee());
    transaction.deadline().write_to(writer);
    transaction.body().write_to(writer);
}

/// Writes `transaction` in embedded form. Callers must have run
/// `check_embeddable`, which guarantees the signer is present.
pub(crate) fn write_embedded(transaction: &Transaction, writer: &mut CatWriter) {
    writer.write_u32(embedded_size(transaction) as u32);
    transaction
        .signer()
        .copied()
        .unwrap_or(PublicKey::ZERO)
        .write_to(writer);
    writer.write_u16(transaction.entity_version());
    transaction.transaction_type().write_to(writer);
    transaction.body().write_to(writer);
}

/// Reads the `size` prefix and returns a reader over the rest of the entity.
fn entity_reader<'a>(
    reader: &mut CatReader<'a>,
    header_size: usize,
) -> Result<CatReader<'a>, CodecError> {
    let size = reader.read_u32()? as usize;
    if size < header_size {
        return Err(CodecError::malformed(format!(
            "entity size {size} is smaller than its {header_size}-byte header"
        )));
    }
    reader.sub_reader(size - 4)
}

fn split_version(raw: u16) -> Result<(NetworkType, u8), CodecError> {
    let network_type = NetworkType::try_from((raw >> 8) as u8)?;
    Ok((network_type, (raw & 0xFF) as u8))
}

fn finish_entity(entity: &CatReader<'_>, transaction_type: TransactionType) -> Result<(), CodecError> {
    if !entity.is_empty() {
        return Err(CodecError::malformed(format!(
            "{transaction_type} body ended {} bytes before the declared entity size",
            entity.remaining()
        )));
    }
    Ok(())
}

fn non_zero<T: PartialEq>(value: T, zero: T) -> Option<T> {
    (value != zero).then_some(value)
}

fn read_standalone(reader: &mut CatReader<'_>) -> Result<Transaction, CodecError> {
    let mut entity = entity_reader(reader, TRANSACTION_HEADER_SIZE)?;
    let signature = Signature::read_from(&mut entity)?;
    let signer = PublicKey::read_from(&mut entity)?;
    let (network_type, version) = split_version(entity.read_u16()?)?;
    let transaction_type = TransactionType::read_from(&mut entity)?;
    let max_fee = entity.read_u64()?;
    let deadline = Deadline::read_from(&mut entity)?;
    let body = TransactionBody::read_for(transaction_type, &mut entity)?;
    finish_entity(&entity, transaction_type)?;

    Ok(Transaction::from_wire(
        network_type,
        version,
        deadline,
        max_fee,
        non_zero(signature, Signature::ZERO),
        non_zero(signer, PublicKey::ZERO),
        body,
    ))
}

pub(crate) fn read_embedded(reader: &mut CatReader<'_>) -> Result<Transaction, CodecError> {
    let mut entity = entity_reader(reader, EMBEDDED_HEADER_SIZE)?;
    let signer = PublicKey::read_from(&mut entity)?;
    let (network_type, version) = split_version(entity.read_u16()?)?;
    let transaction_type = TransactionType::read_from(&mut entity)?;
    if transaction_type.is_aggregate() {
        return Err(CodecError::malformed(format!(
            "{transaction_type} cannot be embedded"
        )));
    }
    let body = TransactionBody::read_for(transaction_type, &mut entity)?;
    finish_entity(&entity, transaction_type)?;

    Ok(Transaction::from_wire(
        network_type,
        version,
        Deadline::default(),
        0,
        None,
        Some(signer),
        body,
    ))
}

/// Encodes and decodes transactions.
///
/// Holds no state; it exists as a value so callers pass it explicitly
/// rather than reaching for a process-wide instance.
#[derive(Debug, Clone, Copy, Default)]
pub struct BinarySerializer;

impl BinarySerializer {
    pub fn new() -> Self {
        Self
    }

    /// Standalone bytes. Signature and signer slots are zero unless the
    /// transaction carries them.
    pub fn serialize(&self, transaction: &Transaction) -> Result<Vec<u8>, TransactionError> {
        transaction.body().validate()?;
        let mut writer = CatWriter::with_capacity(standalone_size(transaction));
        write_standalone(transaction, &mut writer);
        Ok(writer.into_bytes())
    }

    /// Embedded bytes, as they appear inside an aggregate.
    pub fn serialize_embedded(&self, transaction: &Transaction) -> Result<Vec<u8>, TransactionError> {
        check_embeddable(transaction)?;
        let mut writer = CatWriter::with_capacity(embedded_size(transaction));
        write_embedded(transaction, &mut writer);
        Ok(writer.into_bytes())
    }

    /// Decodes one standalone entity spanning all of `bytes`.
    ///
    /// All-zero signature and signer slots decode as absent.
    pub fn deserialize(&self, bytes: &[u8]) -> Result<Transaction, TransactionError> {
        let mut reader = CatReader::new(bytes);
        let transaction = read_standalone(&mut reader)?;
        reader.finish()?;
        Ok(transaction)
    }

    /// Decodes one embedded entity spanning all of `bytes`.
    pub fn deserialize_embedded(&self, bytes: &[u8]) -> Result<Transaction, TransactionError> {
        let mut reader = CatReader::new(bytes);
        let transaction = read_embedded(&mut reader)?;
        reader.finish()?;
        Ok(transaction)
    }

    /// Length of [`serialize`](Self::serialize)'s output.
    pub fn size(&self, transaction: &Transaction) -> usize {
        standalone_size(transaction)
    }

    /// Length of [`serialize_embedded`](Self::serialize_embedded)'s output.
    pub fn embedded_size(&self, transaction: &Transaction) -> usize {
        embedded_size(transaction)
    }
}
