//! The signing pipeline.
//!
//! 1. Serialize the transaction with zeroed signature and signer slots.
//! 2. Sign `generation_hash || payload[SIGNABLE_OFFSET..]`.
//! 3. Splice the signature into `[4..68]` and the signer key into `[68..100]`.
//! 4. Hash `signature[..32] || signer || generation_hash || payload[100..]`.
//!
//! Cosigners sign the 32 hash bytes, never the payload. Appending their
//! cosignatures grows the payload and its size prefix but leaves the hash
//! alone: the hash identifies the aggregate, not who has signed it so far.

use super::error::TransactionError;
use super::serializer::BinarySerializer;
use super::types::{decode_hash, CosignatureSignedTransaction, SignedTransaction, Transaction};
use crate::config::{
    COSIGNATURE_SIZE, GENERATION_HASH_SIZE, SIGNABLE_OFFSET, SIGNATURE_OFFSET, SIGNATURE_SIZE,
    SIGNER_OFFSET,
};
use crate::crypto::hash::sha3_256_parts;
use crate::crypto::{PublicKey, Signer};
use crate::model::TransactionType;

/// The bytes a transaction signature commits to.
pub fn signing_bytes(payload: &[u8], generation_hash: &[u8; GENERATION_HASH_SIZE]) -> Vec<u8> {
    let body = payload.get(SIGNABLE_OFFSET..).unwrap_or_default();
    let mut bytes = Vec::with_capacity(GENERATION_HASH_SIZE + body.len());
    bytes.extend_from_slice(generation_hash);
    bytes.extend_from_slice(body);
    bytes
}

/// Hash of a signed standalone payload, before any cosignatures are appended.
///
/// Returns `None` when `payload` is shorter than the header prefix it reads.
/// For payloads that may already carry cosignatures use
/// [`signed_payload_hash`].
pub fn transaction_hash(
    payload: &[u8],
    generation_hash: &[u8; GENERATION_HASH_SIZE],
) -> Option<[u8; 32]> {
    let signature = payload.get(SIGNATURE_OFFSET..SIGNATURE_OFFSET + SIGNATURE_SIZE / 2)?;
    let signer = payload.get(SIGNER_OFFSET..SIGNABLE_OFFSET)?;
    let body = payload.get(SIGNABLE_OFFSET..)?;
    Some(sha3_256_parts(&[signature, signer, generation_hash, body]))
}

/// Length of the part of `payload` the initiator signed: everything but the
/// cosignatures `transaction` was decoded with.
fn initiator_signed_len(payload: &[u8], transaction: &Transaction) -> usize {
    let cosignatures = transaction
        .body()
        .as_aggregate()
        .map_or(0, |body| body.cosignatures.len());
    payload.len() - cosignatures * COSIGNATURE_SIZE
}

/// Hash of any signed standalone payload, including aggregates that already
/// carry cosignatures. Agrees with [`SignedTransaction::hash`].
pub fn signed_payload_hash(
    payload: &[u8],
    generation_hash: &[u8; GENERATION_HASH_SIZE],
) -> Result<[u8; 32], TransactionError> {
    let transaction = BinarySerializer::new().deserialize(payload)?;
    let core = &payload[..initiator_signed_len(payload, &transaction)];
    transaction_hash(core, generation_hash)
        .ok_or_else(|| TransactionError::invalid("payload", "shorter than the transaction header"))
}

struct SignedPayload {
    payload: Vec<u8>,
    hash: [u8; 32],
    signer: PublicKey,
}

fn sign_payload<S: Signer + ?Sized>(
    serializer: &BinarySerializer,
    transaction: &Transaction,
    signer: &S,
    generation_hash: &[u8; GENERATION_HASH_SIZE],
) -> Result<SignedPayload, TransactionError> {
    let mut payload = serializer.serialize(transaction)?;
    payload[SIGNATURE_OFFSET..SIGNABLE_OFFSET].fill(0);

    let signature = signer.sign(&signing_bytes(&payload, generation_hash));
    let public_key = signer.public_key();
    payload[SIGNATURE_OFFSET..SIGNER_OFFSET].copy_from_slice(signature.as_bytes());
    payload[SIGNER_OFFSET..SIGNABLE_OFFSET].copy_from_slice(public_key.as_bytes());

    let hash = transaction_hash(&payload, generation_hash).ok_or_else(|| {
        TransactionError::invalid("payload", "shorter than the transaction header")
    })?;
    Ok(SignedPayload {
        payload,
        hash,
        signer: public_key,
    })
}

fn finish(transaction: &Transaction, signed: SignedPayload) -> SignedTransaction {
    SignedTransaction {
        payload: hex::encode_upper(&signed.payload),
        hash: hex::encode_upper(signed.hash),
        transaction_type: transaction.transaction_type(),
        signer: signed.signer,
        network_type: transaction.network_type(),
    }
}

fn rewrite_size(payload: &mut [u8]) {
    let size = payload.len() as u32;
    payload[..4].copy_from_slice(&size.to_le_bytes());
}

fn require_aggregate(transaction: &Transaction) -> Result<(), TransactionError> {
    let transaction_type = transaction.transaction_type();
    if !transaction_type.is_aggregate() {
        return Err(TransactionError::InvalidTransactionKind {
            transaction_type,
            reason: "only aggregates carry cosignatures",
        });
    }
    Ok(())
}

/// Signs `transaction` for the network identified by `generation_hash`.
pub fn sign<S: Signer + ?Sized>(
    transaction: &Transaction,
    signer: &S,
    generation_hash: &[u8; GENERATION_HASH_SIZE],
) -> Result<SignedTransaction, TransactionError> {
    sign_with(&BinarySerializer::new(), transaction, signer, generation_hash)
}

/// [`sign`] with an explicit serializer.
pub fn sign_with<S: Signer + ?Sized>(
    serializer: &BinarySerializer,
    transaction: &Transaction,
    signer: &S,
    generation_hash: &[u8; GENERATION_HASH_SIZE],
) -> Result<SignedTransaction, TransactionError> {
    let signed = sign_payload(serializer, transaction, signer, generation_hash)?;
    tracing::debug!(
        transaction_type = %transaction.transaction_type(),
        size = signed.payload.len(),
        hash = %hex::encode_upper(signed.hash),
        "signed transaction"
    );
    Ok(finish(transaction, signed))
}

/// Signs an aggregate with `initiator`, then has every cosigner sign its
/// hash, appending each `(key, signature)` pair to the payload.
pub fn sign_with_cosigners<S, C>(
    transaction: &Transaction,
    initiator: &S,
    cosigners: &[C],
    generation_hash: &[u8; GENERATION_HASH_SIZE],
) -> Result<SignedTransaction, TransactionError>
where
    S: Signer + ?Sized,
    C: Signer,
{
    require_aggregate(transaction)?;
    let mut signed = sign_payload(&BinarySerializer::new(), transaction, initiator, generation_hash)?;

    for cosigner in cosigners {
        let signature = cosigner.sign(&signed.hash);
        signed.payload.extend_from_slice(cosigner.public_key().as_bytes());
        signed.payload.extend_from_slice(signature.as_bytes());
    }
    rewrite_size(&mut signed.payload);

    tracing::debug!(
        transaction_type = %transaction.transaction_type(),
        cosignatures = cosigners.len(),
        size = signed.payload.len(),
        hash = %hex::encode_upper(signed.hash),
        "signed aggregate with cosigners"
    );
    Ok(finish(transaction, signed))
}

/// Cosigns an announced aggregate, identified by its hash.
pub fn cosign_aggregate_hash<S: Signer + ?Sized>(
    parent_hash: &str,
    signer: &S,
) -> Result<CosignatureSignedTransaction, TransactionError> {
    let hash = decode_hash(parent_hash)?;
    let signature = signer.sign(&hash);
    tracing::trace!(parent_hash, "cosigned aggregate hash");
    Ok(CosignatureSignedTransaction {
        parent_hash: hex::encode_upper(hash),
        signature,
        signer: signer.public_key(),
    })
}

/// Cosigns an aggregate read back from the network. The hash comes from its
/// `transaction_info`.
pub fn cosign_transaction<S: Signer + ?Sized>(
    transaction: &Transaction,
    signer: &S,
) -> Result<CosignatureSignedTransaction, TransactionError> {
    require_aggregate(transaction)?;
    let hash = transaction
        .transaction_info()
        .and_then(|info| info.hash.as_deref())
        .ok_or(TransactionError::MissingField("transaction_info.hash"))?;
    cosign_aggregate_hash(hash, signer)
}

/// Appends cosignatures collected after the aggregate was signed.
///
/// Every cosignature must reference `signed`'s hash.
pub fn add_cosignatures(
    signed: &SignedTransaction,
    cosignatures: &[CosignatureSignedTransaction],
) -> Result<SignedTransaction, TransactionError> {
    if !signed.transaction_type.is_aggregate() {
        return Err(TransactionError::InvalidTransactionKind {
            transaction_type: signed.transaction_type,
            reason: "only aggregates carry cosignatures",
        });
    }
    let hash = signed.hash_bytes()?;
    let mut payload = signed.payload_bytes()?;
    for cosignature in cosignatures {
        if decode_hash(&cosignature.parent_hash)? != hash {
            return Err(TransactionError::invalid(
                "parent_hash",
                format!("{} does not match {}", cosignature.parent_hash, signed.hash),
            ));
        }
        payload.extend_from_slice(cosignature.signer.as_bytes());
        payload.extend_from_slice(cosignature.signature.as_bytes());
    }
    rewrite_size(&mut payload);

    Ok(SignedTransaction {
        payload: hex::encode_upper(payload),
        ..signed.clone()
    })
}

/// Checks the initiator's signature, every cosignature and the hash of a
/// signed payload.
///
/// Returns `Ok(false)` when any signature or the hash does not match, and an
/// error when the payload cannot be decoded at all.
pub fn verify_signed_transaction(
    signed: &SignedTransaction,
    generation_hash: &[u8; GENERATION_HASH_SIZE],
) -> Result<bool, TransactionError> {
    let payload = signed.payload_bytes()?;
    let transaction = BinarySerializer::new().deserialize(&payload)?;

    let cosignatures = transaction
        .body()
        .as_aggregate()
        .map(|body| body.cosignatures.as_slice())
        .unwrap_or_default();
    let mut core = payload[..initiator_signed_len(&payload, &transaction)].to_vec();

    let (Some(signature), Some(signer)) = (transaction.signature(), transaction.signer()) else {
        return Ok(false);
    };
    if *signer != signed.signer {
        return Ok(false);
    }

    let Some(hash) = transaction_hash(&core, generation_hash) else {
        return Ok(false);
    };
    if hex::encode_upper(hash) != signed.hash.to_uppercase() {
        return Ok(false);
    }

    core[SIGNATURE_OFFSET..SIGNABLE_OFFSET].fill(0);
    if !signer.verify(&signing_bytes(&core, generation_hash), signature) {
        return Ok(false);
    }

    Ok(cosignatures
        .iter()
        .all(|c| c.signer.verify(&hash, &c.signature)))
}

/// Checks a detached cosignature against its parent hash.
pub fn verify_cosignature(cosignature: &CosignatureSignedTransaction) -> Result<bool, TransactionError> {
    let hash = decode_hash(&cosignature.parent_hash)?;
    Ok(cosignature.signer.verify(&hash, &cosignature.signature))
}

impl SignedTransaction {
    /// True for aggregate bonded payloads, the only kind a hash lock accepts.
    pub fn is_aggregate_bonded(&self) -> bool {
        self.transaction_type == TransactionType::AggregateBonded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::KeyPair;
    use crate::model::{Deadline, LinkAction, NetworkType, TransactionInfo};
    use crate::transaction::aggregate::AggregateBody;
    use crate::transaction::body::{AccountLinkBody, TransactionBody};

    const GENERATION_HASH: [u8; 32] = [0x57; 32];

    fn link(remote: u8) -> Transaction {
        Transaction::new(
            NetworkType::MijinTest,
            TransactionBody::AccountLink(AccountLinkBody {
                remote_key: PublicKey::from_bytes([remote; 32]),
                action: LinkAction::Link,
            }),
        )
        .with_deadline(Deadline::from_epoch_millis(10_000))
    }

    fn bonded(initiator: &KeyPair, cosigner: &KeyPair) -> Transaction {
        Transaction::new(
            NetworkType::MijinTest,
            TransactionBody::AggregateBonded(AggregateBody::new(vec![
                link(1).to_aggregate(initiator.public_key()).unwrap(),
                link(2).to_aggregate(cosigner.public_key()).unwrap(),
            ])),
        )
        .with_deadline(Deadline::from_epoch_millis(10_000))
    }

    #[test]
    fn signing_is_deterministic() {
        let key = KeyPair::from_seed(&[1; 32]);
        let a = sign(&link(9), &key, &GENERATION_HASH).unwrap();
        let b = sign(&link(9), &key, &GENERATION_HASH).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.hash.len(), 64);
        assert_eq!(a.signer, key.public_key());
        assert_eq!(a.transaction_type, TransactionType::AccountLink);
    }

    #[test]
    fn generation_hash_changes_signature_and_hash() {
        let key = KeyPair::from_seed(&[1; 32]);
        let a = sign(&link(9), &key, &GENERATION_HASH).unwrap();
        let b = sign(&link(9), &key, &[0x58; 32]).unwrap();
        assert_ne!(a.payload, b.payload);
        assert_ne!(a.hash, b.hash);
    }

    #[test]
    fn signed_payload_verifies() {
        let key = KeyPair::from_seed(&[1; 32]);
        let signed = sign(&link(9), &key, &GENERATION_HASH).unwrap();
        assert!(verify_signed_transaction(&signed, &GENERATION_HASH).unwrap());
        assert!(!verify_signed_transaction(&signed, &[0; 32]).unwrap());

        let mut tampered = signed.clone();
        tampered.payload.replace_range(240..242, "FF");
        assert!(!verify_signed_transaction(&tampered, &GENERATION_HASH).unwrap());
    }

    #[test]
    fn cosigners_extend_payload_not_hash() {
        let initiator = KeyPair::from_seed(&[1; 32]);
        let cosigner = KeyPair::from_seed(&[2; 32]);
        let tx = bonded(&initiator, &cosigner);

        let alone = sign(&tx, &initiator, &GENERATION_HASH).unwrap();
        let cosigned = sign_with_cosigners(&tx, &initiator, &[&cosigner], &GENERATION_HASH).unwrap();

        assert_eq!(alone.hash, cosigned.hash);
        assert_eq!(cosigned.payload.len(), alone.payload.len() + 2 * 96);
        let bytes = cosigned.payload_bytes().unwrap();
        assert_eq!(&bytes[..4], &(bytes.len() as u32).to_le_bytes());
        assert!(verify_signed_transaction(&cosigned, &GENERATION_HASH).unwrap());
    }

    #[test]
    fn payload_hash_ignores_cosignature_tail() {
        let initiator = KeyPair::from_seed(&[1; 32]);
        let cosigner = KeyPair::from_seed(&[2; 32]);
        let cosigned =
            sign_with_cosigners(&bonded(&initiator, &cosigner), &initiator, &[&cosigner], &GENERATION_HASH)
                .unwrap();
        let bytes = cosigned.payload_bytes().unwrap();

        let hash = signed_payload_hash(&bytes, &GENERATION_HASH).unwrap();
        assert_eq!(hex::encode_upper(hash), cosigned.hash);
        // The raw hash over the whole payload covers the cosignatures too.
        assert_ne!(transaction_hash(&bytes, &GENERATION_HASH), Some(hash));

        let single = sign(&link(9), &initiator, &GENERATION_HASH).unwrap();
        let hash = signed_payload_hash(&single.payload_bytes().unwrap(), &GENERATION_HASH).unwrap();
        assert_eq!(hex::encode_upper(hash), single.hash);
    }

    #[test]
    fn cosigners_require_an_aggregate() {
        let key = KeyPair::from_seed(&[1; 32]);
        assert!(matches!(
            sign_with_cosigners(&link(1), &key, &[&key], &GENERATION_HASH),
            Err(TransactionError::InvalidTransactionKind { .. })
        ));
    }

    #[test]
    fn detached_cosignatures_match_inline_ones() {
        let initiator = KeyPair::from_seed(&[1; 32]);
        let cosigner = KeyPair::from_seed(&[2; 32]);
        let tx = bonded(&initiator, &cosigner);

        let signed = sign(&tx, &initiator, &GENERATION_HASH).unwrap();
        let cosignature = cosign_aggregate_hash(&signed.hash, &cosigner).unwrap();
        assert!(verify_cosignature(&cosignature).unwrap());

        let collected = add_cosignatures(&signed, &[cosignature]).unwrap();
        let inline = sign_with_cosigners(&tx, &initiator, &[&cosigner], &GENERATION_HASH).unwrap();
        assert_eq!(collected, inline);
    }

    #[test]
    fn foreign_cosignature_rejected() {
        let initiator = KeyPair::from_seed(&[1; 32]);
        let cosigner = KeyPair::from_seed(&[2; 32]);
        let signed = sign(&bonded(&initiator, &cosigner), &initiator, &GENERATION_HASH).unwrap();
        let other = cosign_aggregate_hash(&"00".repeat(32), &cosigner).unwrap();
        assert!(matches!(
            add_cosignatures(&signed, &[other]),
            Err(TransactionError::InvalidValue { field: "parent_hash", .. })
        ));
    }

    #[test]
    fn cosign_transaction_reads_info_hash() {
        let initiator = KeyPair::from_seed(&[1; 32]);
        let cosigner = KeyPair::from_seed(&[2; 32]);
        let tx = bonded(&initiator, &cosigner);
        assert_eq!(
            cosign_transaction(&tx, &cosigner),
            Err(TransactionError::MissingField("transaction_info.hash"))
        );

        let hash = "AB".repeat(32);
        let announced = tx.with_transaction_info(TransactionInfo::new(0, hash.clone(), "CD".repeat(32)));
        let cosignature = cosign_transaction(&announced, &cosigner).unwrap();
        assert_eq!(cosignature.parent_hash, hash);
        assert_eq!(cosignature.signer, cosigner.public_key());
    }
}
