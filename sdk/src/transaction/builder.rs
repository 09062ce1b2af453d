//! Validating builders, one per transaction type.
//!
//! Setters never fail. Every required-field and cross-field check runs in
//! `build()`, which returns the first problem it finds. Fields not set fall
//! back to the shared defaults: the type's schema version, zero max fee and a
//! deadline two hours from the moment `build()` runs.
//!
//! [`TransactionFactory`] hands out builders pre-filled with a network's
//! defaults, so callers do not repeat network type and fee on every call.

use std::collections::BTreeSet;
use std::time::Duration;

use super::aggregate::{check_embeddable, AggregateBody, Cosignature};
use super::body::{
    AccountLinkBody, AccountRestrictionBody, AddressAliasBody, HashLockBody, MetadataBody,
    MosaicAddressRestrictionBody, MosaicAliasBody, MosaicDefinitionBody,
    MosaicGlobalRestrictionBody, MosaicSupplyChangeBody, MultisigAccountModificationBody,
    NamespaceRegistration, NamespaceRegistrationBody, RestrictionModification, SecretLockBody,
    SecretProofBody, TransactionBody, TransferBody,
};
use super::error::TransactionError;
use super::types::{decode_hash, SignedTransaction, Transaction};
use crate::config::{ConfigError, NetworkConfig, MAX_DEADLINE};
use crate::crypto::PublicKey;
use crate::id;
use crate::model::{
    metadata_update, AccountRestrictionType, Address, AddressRestrictionModification,
    CosignatoryModification, Deadline, LinkAction, LockHashAlgorithm, Message, MetadataKey,
    MetadataTarget,
    Mosaic, MosaicFlags, MosaicId, MosaicNonce, MosaicRestrictionModification,
    MosaicRestrictionType, MosaicSupplyChangeAction, NamespaceId, NetworkType,
    OperationRestrictionModification, UnresolvedAddress, UnresolvedMosaicId,
};

// ---------------------------------------------------------------------------
// Shared header fields
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
struct Common {
    network_type: NetworkType,
    deadline: Option<Deadline>,
    deadline_offset: Option<Duration>,
    max_fee: u64,
    version: Option<u8>,
}

impl Common {
    fn new(network_type: NetworkType) -> Self {
        Self {
            network_type,
            deadline: None,
            deadline_offset: None,
            max_fee: 0,
            version: None,
        }
    }

    fn finish(self, body: TransactionBody) -> Result<Transaction, TransactionError> {
        body.validate()?;
        let deadline = match (self.deadline, self.deadline_offset) {
            (Some(deadline), _) => deadline,
            (None, Some(offset)) if offset > MAX_DEADLINE => {
                return Err(TransactionError::invalid(
                    "deadline",
                    format!(
                        "{}s ahead, the network accepts at most {}s",
                        offset.as_secs(),
                        MAX_DEADLINE.as_secs()
                    ),
                ));
            }
            (None, Some(offset)) => Deadline::in_duration(offset),
            (None, None) => Deadline::default_from_now(),
        };
        let mut transaction = Transaction::new(self.network_type, body)
            .with_deadline(deadline)
            .with_max_fee(self.max_fee);
        if let Some(version) = self.version {
            transaction = transaction.with_version(version);
        }
        Ok(transaction)
    }
}

/// Setters every builder shares.
macro_rules! common_setters {
    () => {
        pub fn deadline(mut self, deadline: Deadline) -> Self {
            self.common.deadline = Some(deadline);
            self
        }

        /// Deadline `offset` after the moment `build()` runs.
        pub fn deadline_in(mut self, offset: Duration) -> Self {
            self.common.deadline_offset = Some(offset);
            self
        }

        pub fn max_fee(mut self, max_fee: u64) -> Self {
            self.common.max_fee = max_fee;
            self
        }

        /// Overrides the schema version. Only needed to target older nodes.
        pub fn version(mut self, version: u8) -> Self {
            self.common.version = Some(version);
            self
        }
    };
}

fn required<T>(value: Option<T>, field: &'static str) -> Result<T, TransactionError> {
    value.ok_or(TransactionError::MissingField(field))
}

fn check_recipient_network(
    field: &'static str,
    address: &UnresolvedAddress,
    network_type: NetworkType,
) -> Result<(), TransactionError> {
    if address.network_type() != network_type {
        return Err(TransactionError::invalid(
            field,
            format!(
                "belongs to {} but the transaction targets {}",
                address.network_type(),
                network_type
            ),
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Transfer
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct TransferBuilder {
    common: Common,
    recipient: Option<UnresolvedAddress>,
    message: Option<Message>,
    mosaics: Vec<Mosaic>,
}

impl TransferBuilder {
    pub fn new(network_type: NetworkType) -> Self {
        Self {
            common: Common::new(network_type),
            recipient: None,
            message: Some(Message::empty()),
            mosaics: Vec::new(),
        }
    }

    common_setters!();

    /// A resolved address or a namespace alias.
    pub fn recipient(mut self, recipient: impl Into<UnresolvedAddress>) -> Self {
        self.recipient = Some(recipient.into());
        self
    }

    pub fn mosaic(mut self, mosaic: Mosaic) -> Self {
        self.mosaics.push(mosaic);
        self
    }

    pub fn mosaics(mut self, mosaics: impl IntoIterator<Item = Mosaic>) -> Self {
        self.mosaics.extend(mosaics);
        self
    }

    pub fn message(mut self, message: Message) -> Self {
        self.message = Some(message);
        self
    }

    /// Drops the default empty message so no message bytes are written.
    pub fn no_message(mut self) -> Self {
        self.message = None;
        self
    }

    /// Mosaics are written sorted by id; the same id twice is rejected.
    pub fn build(self) -> Result<Transaction, TransactionError> {
        let recipient = self
            .recipient
            .ok_or(TransactionError::UnresolvedRequiredField("recipient"))?;
        check_recipient_network("recipient", &recipient, self.common.network_type)?;

        let mut mosaics = self.mosaics;
        mosaics.sort_by_key(|m| m.id);
        if let Some(pair) = mosaics.windows(2).find(|w| w[0].id == w[1].id) {
            return Err(TransactionError::invalid(
                "mosaics",
                format!("mosaic {} listed more than once", pair[0].id),
            ));
        }

        self.common.finish(TransactionBody::Transfer(TransferBody {
            recipient,
            message: self.message,
            mosaics,
        }))
    }
}

// ---------------------------------------------------------------------------
// Mosaics
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct MosaicDefinitionBuilder {
    common: Common,
    nonce: Option<MosaicNonce>,
    owner: Option<PublicKey>,
    mosaic_id: Option<MosaicId>,
    flags: MosaicFlags,
    divisibility: u8,
    duration: u64,
}

impl MosaicDefinitionBuilder {
    pub fn new(network_type: NetworkType) -> Self {
        Self {
            common: Common::new(network_type),
            nonce: None,
            owner: None,
            mosaic_id: None,
            flags: MosaicFlags::default(),
            divisibility: 0,
            duration: 0,
        }
    }

    common_setters!();

    pub fn nonce(mut self, nonce: MosaicNonce) -> Self {
        self.nonce = Some(nonce);
        self
    }

    /// Derives the mosaic id from the nonce and this key at build time.
    pub fn owner(mut self, owner: PublicKey) -> Self {
        self.owner = Some(owner);
        self
    }

    pub fn mosaic_id(mut self, mosaic_id: MosaicId) -> Self {
        self.mosaic_id = Some(mosaic_id);
        self
    }

    pub fn flags(mut self, flags: MosaicFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn divisibility(mut self, divisibility: u8) -> Self {
        self.divisibility = divisibility;
        self
    }

    /// Zero, the default, never expires.
    pub fn duration(mut self, duration: u64) -> Self {
        self.duration = duration;
        self
    }

    pub fn build(self) -> Result<Transaction, TransactionError> {
        let nonce = required(self.nonce, "nonce")?;
        let derived = self.owner.map(|owner| id::generate_mosaic_id(nonce, &owner));
        let mosaic_id = match (self.mosaic_id, derived) {
            (Some(given), Some(derived)) if given != derived => {
                return Err(TransactionError::invalid(
                    "mosaic_id",
                    format!("{given} is not the id of nonce {} for this owner ({derived})", nonce.to_hex()),
                ));
            }
            (Some(id), _) | (None, Some(id)) => id,
            (None, None) => return Err(TransactionError::MissingField("mosaic_id")),
        };

        self.common
            .finish(TransactionBody::MosaicDefinition(MosaicDefinitionBody {
                nonce,
                mosaic_id,
                flags: self.flags,
                divisibility: self.divisibility,
                duration: self.duration,
            }))
    }
}

#[derive(Debug, Clone)]
pub struct MosaicSupplyChangeBuilder {
    common: Common,
    mosaic_id: Option<UnresolvedMosaicId>,
    action: Option<MosaicSupplyChangeAction>,
    delta: Option<u64>,
}

impl MosaicSupplyChangeBuilder {
    pub fn new(network_type: NetworkType) -> Self {
        Self {
            common: Common::new(network_type),
            mosaic_id: None,
            action: None,
            delta: None,
        }
    }

    common_setters!();

    pub fn mosaic_id(mut self, mosaic_id: impl Into<UnresolvedMosaicId>) -> Self {
        self.mosaic_id = Some(mosaic_id.into());
        self
    }

    pub fn action(mut self, action: MosaicSupplyChangeAction) -> Self {
        self.action = Some(action);
        self
    }

    pub fn delta(mut self, delta: u64) -> Self {
        self.delta = Some(delta);
        self
    }

    pub fn build(self) -> Result<Transaction, TransactionError> {
        let body = MosaicSupplyChangeBody {
            mosaic_id: required(self.mosaic_id, "mosaic_id")?,
            action: required(self.action, "action")?,
            delta: required(self.delta, "delta")?,
        };
        self.common.finish(TransactionBody::MosaicSupplyChange(body))
    }
}

// ---------------------------------------------------------------------------
// Namespaces
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
enum ParentRef {
    Id(NamespaceId),
    Path(String),
}

/// Registers a root namespace (set a duration) or a child (set a parent).
#[derive(Debug, Clone)]
pub struct NamespaceRegistrationBuilder {
    common: Common,
    name: Option<String>,
    duration: Option<u64>,
    parent: Option<ParentRef>,
}

impl NamespaceRegistrationBuilder {
    pub fn new(network_type: NetworkType) -> Self {
        Self {
            common: Common::new(network_type),
            name: None,
            duration: None,
            parent: None,
        }
    }

    common_setters!();

    /// The single level being registered, without dots.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Rental duration in blocks. Only root namespaces take one.
    pub fn duration(mut self, duration: u64) -> Self {
        self.duration = Some(duration);
        self
    }

    pub fn parent_id(mut self, parent_id: NamespaceId) -> Self {
        self.parent = Some(ParentRef::Id(parent_id));
        self
    }

    /// Parent given as a dotted path, e.g. `"cat"` for `cat.currency`.
    pub fn parent_name(mut self, path: impl Into<String>) -> Self {
        self.parent = Some(ParentRef::Path(path.into()));
        self
    }

    pub fn build(self) -> Result<Transaction, TransactionError> {
        let name = required(self.name, "name")?;
        let (registration, namespace_id) = match self.parent {
            None => {
                let duration = required(self.duration, "duration")?;
                (
                    NamespaceRegistration::Root { duration },
                    id::generate_namespace_id(&name, None)?,
                )
            }
            Some(parent) => {
                if self.duration.is_some() {
                    return Err(TransactionError::invalid(
                        "duration",
                        "child namespaces inherit their parent's duration",
                    ));
                }
                let (parent_id, namespace_id) = match parent {
                    ParentRef::Id(parent_id) => {
                        (parent_id, id::generate_namespace_id(&name, Some(parent_id))?)
                    }
                    ParentRef::Path(path) => {
                        let parent_id = NamespaceId::from_name(&path)?;
                        (parent_id, id::generate_namespace_id_in(&name, &path)?)
                    }
                };
                (NamespaceRegistration::Child { parent_id }, namespace_id)
            }
        };

        self.common
            .finish(TransactionBody::NamespaceRegistration(NamespaceRegistrationBody {
                registration,
                namespace_id,
                name,
            }))
    }
}

#[derive(Debug, Clone)]
pub struct AddressAliasBuilder {
    common: Common,
    action: LinkAction,
    namespace_id: Option<NamespaceId>,
    address: Option<Address>,
}

impl AddressAliasBuilder {
    pub fn new(network_type: NetworkType) -> Self {
        Self {
            common: Common::new(network_type),
            action: LinkAction::Link,
            namespace_id: None,
            address: None,
        }
    }

    common_setters!();

    /// Defaults to [`LinkAction::Link`].
    pub fn action(mut self, action: LinkAction) -> Self {
        self.action = action;
        self
    }

    pub fn namespace_id(mut self, namespace_id: NamespaceId) -> Self {
        self.namespace_id = Some(namespace_id);
        self
    }

    pub fn address(mut self, address: Address) -> Self {
        self.address = Some(address);
        self
    }

    pub fn build(self) -> Result<Transaction, TransactionError> {
        let address = self
            .address
            .ok_or(TransactionError::UnresolvedRequiredField("address"))?;
        check_recipient_network("address", &address.into(), self.common.network_type)?;
        let body = AddressAliasBody {
            action: self.action,
            namespace_id: required(self.namespace_id, "namespace_id")?,
            address,
        };
        self.common.finish(TransactionBody::AddressAlias(body))
    }
}

#[derive(Debug, Clone)]
pub struct MosaicAliasBuilder {
    common: Common,
    action: LinkAction,
    namespace_id: Option<NamespaceId>,
    mosaic_id: Option<MosaicId>,
}

impl MosaicAliasBuilder {
    pub fn new(network_type: NetworkType) -> Self {
        Self {
            common: Common::new(network_type),
            action: LinkAction::Link,
            namespace_id: None,
            mosaic_id: None,
        }
    }

    common_setters!();

    pub fn action(mut self, action: LinkAction) -> Self {
        self.action = action;
        self
    }

    pub fn namespace_id(mut self, namespace_id: NamespaceId) -> Self {
        self.namespace_id = Some(namespace_id);
        self
    }

    pub fn mosaic_id(mut self, mosaic_id: MosaicId) -> Self {
        self.mosaic_id = Some(mosaic_id);
        self
    }

    pub fn build(self) -> Result<Transaction, TransactionError> {
        let body = MosaicAliasBody {
            action: self.action,
            namespace_id: required(self.namespace_id, "namespace_id")?,
            mosaic_id: required(self.mosaic_id, "mosaic_id")?,
        };
        self.common.finish(TransactionBody::MosaicAlias(body))
    }
}

// ---------------------------------------------------------------------------
// Account restrictions
// ---------------------------------------------------------------------------

/// Builds any of the three account restriction transactions. The
/// modification type picks which one.
#[derive(Debug, Clone)]
pub struct AccountRestrictionBuilder<M> {
    common: Common,
    restriction_type: Option<AccountRestrictionType>,
    modifications: Vec<M>,
}

pub type AccountAddressRestrictionBuilder = AccountRestrictionBuilder<AddressRestrictionModification>;
pub type AccountMosaicRestrictionBuilder = AccountRestrictionBuilder<MosaicRestrictionModification>;
pub type AccountOperationRestrictionBuilder =
    AccountRestrictionBuilder<OperationRestrictionModification>;

impl<M: RestrictionModification> AccountRestrictionBuilder<M> {
    pub fn new(network_type: NetworkType) -> Self {
        Self {
            common: Common::new(network_type),
            restriction_type: None,
            modifications: Vec::new(),
        }
    }

    common_setters!();

    pub fn restriction_type(mut self, restriction_type: AccountRestrictionType) -> Self {
        self.restriction_type = Some(restriction_type);
        self
    }

    pub fn modification(mut self, modification: M) -> Self {
        self.modifications.push(modification);
        self
    }

    pub fn modifications(mut self, modifications: impl IntoIterator<Item = M>) -> Self {
        self.modifications.extend(modifications);
        self
    }

    pub fn build(self) -> Result<Transaction, TransactionError> {
        if self.modifications.is_empty() {
            return Err(TransactionError::MissingField("modifications"));
        }
        let body = AccountRestrictionBody {
            restriction_type: required(self.restriction_type, "restriction_type")?,
            modifications: self.modifications,
        };
        self.common.finish(M::into_body(body))
    }
}

// ---------------------------------------------------------------------------
// Metadata
// ---------------------------------------------------------------------------

/// Builds account, mosaic or namespace metadata, depending on the target.
#[derive(Debug, Clone)]
pub struct MetadataBuilder {
    common: Common,
    target: MetadataTarget,
    target_key: Option<PublicKey>,
    scoped_key: Option<u64>,
    value: Option<Result<(i16, Vec<u8>), TransactionError>>,
}

impl MetadataBuilder {
    /// Metadata attached to the target account itself.
    pub fn account(network_type: NetworkType) -> Self {
        Self::with_target(network_type, MetadataTarget::Account)
    }

    pub fn mosaic(network_type: NetworkType, mosaic_id: impl Into<UnresolvedMosaicId>) -> Self {
        Self::with_target(network_type, MetadataTarget::Mosaic(mosaic_id.into()))
    }

    pub fn namespace(network_type: NetworkType, namespace_id: NamespaceId) -> Self {
        Self::with_target(network_type, MetadataTarget::Namespace(namespace_id))
    }

    /// Targets the entry at `key`: owner, scoped key and target in one go.
    pub fn for_key(network_type: NetworkType, key: MetadataKey) -> Self {
        Self::with_target(network_type, key.target)
            .target_key(key.target_key)
            .scoped_key(key.scoped_key)
    }

    fn with_target(network_type: NetworkType, target: MetadataTarget) -> Self {
        Self {
            common: Common::new(network_type),
            target,
            target_key: None,
            scoped_key: None,
            value: None,
        }
    }

    common_setters!();

    /// Owner of the account, mosaic or namespace.
    pub fn target_key(mut self, target_key: PublicKey) -> Self {
        self.target_key = Some(target_key);
        self
    }

    pub fn scoped_key(mut self, scoped_key: u64) -> Self {
        self.scoped_key = Some(scoped_key);
        self
    }

    /// First write of a value: the delta is its full length.
    pub fn value(self, value: impl Into<Vec<u8>>) -> Self {
        self.update(&[], &value.into())
    }

    /// Replaces `old` with `new`. Writes the XOR of both and the size delta.
    pub fn update(mut self, old: &[u8], new: &[u8]) -> Self {
        let update = metadata_update(old, new).ok_or_else(|| {
            TransactionError::invalid(
                "value_size_delta",
                format!(
                    "size change from {} to {} bytes does not fit in i16",
                    old.len(),
                    new.len()
                ),
            )
        });
        self.value = Some(update);
        self
    }

    /// Sets delta and value verbatim.
    pub fn raw_value(mut self, value_size_delta: i16, value: impl Into<Vec<u8>>) -> Self {
        self.value = Some(Ok((value_size_delta, value.into())));
        self
    }

    pub fn build(self) -> Result<Transaction, TransactionError> {
        let (value_size_delta, value) = required(self.value, "value")??;
        if value.len() > u16::MAX as usize {
            return Err(TransactionError::invalid(
                "value",
                format!("{} bytes, at most {} allowed", value.len(), u16::MAX),
            ));
        }
        let body = MetadataBody {
            target_key: required(self.target_key, "target_key")?,
            scoped_key: required(self.scoped_key, "scoped_key")?,
            target: self.target,
            value_size_delta,
            value,
        };
        self.common.finish(TransactionBody::Metadata(body))
    }
}

// ---------------------------------------------------------------------------
// Multisig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct MultisigAccountModificationBuilder {
    common: Common,
    min_removal_delta: i8,
    min_approval_delta: i8,
    modifications: Vec<CosignatoryModification>,
}

impl MultisigAccountModificationBuilder {
    pub fn new(network_type: NetworkType) -> Self {
        Self {
            common: Common::new(network_type),
            min_removal_delta: 0,
            min_approval_delta: 0,
            modifications: Vec::new(),
        }
    }

    common_setters!();

    pub fn min_removal_delta(mut self, delta: i8) -> Self {
        self.min_removal_delta = delta;
        self
    }

    pub fn min_approval_delta(mut self, delta: i8) -> Self {
        self.min_approval_delta = delta;
        self
    }

    pub fn add_cosignatory(mut self, cosignatory: PublicKey) -> Self {
        self.modifications.push(CosignatoryModification::add(cosignatory));
        self
    }

    pub fn remove_cosignatory(mut self, cosignatory: PublicKey) -> Self {
        self.modifications.push(CosignatoryModification::remove(cosignatory));
        self
    }

    /// A key may appear in at most one modification.
    pub fn build(self) -> Result<Transaction, TransactionError> {
        let mut seen = BTreeSet::new();
        for modification in &self.modifications {
            if !seen.insert(modification.cosignatory) {
                return Err(TransactionError::invalid(
                    "modifications",
                    format!("cosignatory {} modified twice", modification.cosignatory),
                ));
            }
        }
        let body = MultisigAccountModificationBody {
            min_removal_delta: self.min_removal_delta,
            min_approval_delta: self.min_approval_delta,
            modifications: self.modifications,
        };
        self.common
            .finish(TransactionBody::MultisigAccountModification(body))
    }
}

// ---------------------------------------------------------------------------
// Locks
// ---------------------------------------------------------------------------

/// Locks funds for an aggregate bonded transaction.
#[derive(Debug, Clone)]
pub struct HashLockBuilder {
    common: Common,
    mosaic: Option<Mosaic>,
    duration: Option<u64>,
    signed_transaction: Option<SignedTransaction>,
}

impl HashLockBuilder {
    pub fn new(network_type: NetworkType) -> Self {
        Self {
            common: Common::new(network_type),
            mosaic: None,
            duration: None,
            signed_transaction: None,
        }
    }

    common_setters!();

    pub fn mosaic(mut self, mosaic: Mosaic) -> Self {
        self.mosaic = Some(mosaic);
        self
    }

    pub fn duration(mut self, duration: u64) -> Self {
        self.duration = Some(duration);
        self
    }

    /// The aggregate bonded transaction being locked for.
    pub fn signed_transaction(mut self, signed: &SignedTransaction) -> Self {
        self.signed_transaction = Some(signed.clone());
        self
    }

    pub fn build(self) -> Result<Transaction, TransactionError> {
        let signed = required(self.signed_transaction, "signed_transaction")?;
        if !signed.is_aggregate_bonded() {
            return Err(TransactionError::InvalidTransactionKind {
                transaction_type: signed.transaction_type,
                reason: "hash locks only secure aggregate bonded transactions",
            });
        }
        let body = HashLockBody {
            mosaic: required(self.mosaic, "mosaic")?,
            duration: required(self.duration, "duration")?,
            hash: decode_hash(&signed.hash)?,
        };
        self.common.finish(TransactionBody::HashLock(body))
    }
}

#[derive(Debug, Clone)]
pub struct SecretLockBuilder {
    common: Common,
    mosaic: Option<Mosaic>,
    duration: Option<u64>,
    hash_algorithm: LockHashAlgorithm,
    secret: Option<[u8; 32]>,
    recipient: Option<UnresolvedAddress>,
}

impl SecretLockBuilder {
    pub fn new(network_type: NetworkType) -> Self {
        Self {
            common: Common::new(network_type),
            mosaic: None,
            duration: None,
            hash_algorithm: LockHashAlgorithm::Sha3_256,
            secret: None,
            recipient: None,
        }
    }

    common_setters!();

    pub fn mosaic(mut self, mosaic: Mosaic) -> Self {
        self.mosaic = Some(mosaic);
        self
    }

    pub fn duration(mut self, duration: u64) -> Self {
        self.duration = Some(duration);
        self
    }

    /// Defaults to SHA3-256.
    pub fn hash_algorithm(mut self, hash_algorithm: LockHashAlgorithm) -> Self {
        self.hash_algorithm = hash_algorithm;
        self
    }

    pub fn secret(mut self, secret: [u8; 32]) -> Self {
        self.secret = Some(secret);
        self
    }

    /// Sets the secret to the hash of `proof` under the chosen algorithm.
    pub fn secret_from_proof(mut self, proof: &[u8]) -> Self {
        self.secret = Some(self.hash_algorithm.secret_for(proof));
        self
    }

    pub fn recipient(mut self, recipient: impl Into<UnresolvedAddress>) -> Self {
        self.recipient = Some(recipient.into());
        self
    }

    pub fn build(self) -> Result<Transaction, TransactionError> {
        let recipient = self
            .recipient
            .ok_or(TransactionError::UnresolvedRequiredField("recipient"))?;
        check_recipient_network("recipient", &recipient, self.common.network_type)?;
        let body = SecretLockBody {
            mosaic: required(self.mosaic, "mosaic")?,
            duration: required(self.duration, "duration")?,
            hash_algorithm: self.hash_algorithm,
            secret: required(self.secret, "secret")?,
            recipient,
        };
        self.common.finish(TransactionBody::SecretLock(body))
    }
}

#[derive(Debug, Clone)]
pub struct SecretProofBuilder {
    common: Common,
    hash_algorithm: LockHashAlgorithm,
    secret: Option<[u8; 32]>,
    recipient: Option<UnresolvedAddress>,
    proof: Option<Vec<u8>>,
}

impl SecretProofBuilder {
    pub fn new(network_type: NetworkType) -> Self {
        Self {
            common: Common::new(network_type),
            hash_algorithm: LockHashAlgorithm::Sha3_256,
            secret: None,
            recipient: None,
            proof: None,
        }
    }

    common_setters!();

    pub fn hash_algorithm(mut self, hash_algorithm: LockHashAlgorithm) -> Self {
        self.hash_algorithm = hash_algorithm;
        self
    }

    /// Optional; derived from the proof when not set.
    pub fn secret(mut self, secret: [u8; 32]) -> Self {
        self.secret = Some(secret);
        self
    }

    pub fn recipient(mut self, recipient: impl Into<UnresolvedAddress>) -> Self {
        self.recipient = Some(recipient.into());
        self
    }

    pub fn proof(mut self, proof: impl Into<Vec<u8>>) -> Self {
        self.proof = Some(proof.into());
        self
    }

    pub fn build(self) -> Result<Transaction, TransactionError> {
        let proof = required(self.proof, "proof")?;
        let recipient = self
            .recipient
            .ok_or(TransactionError::UnresolvedRequiredField("recipient"))?;
        let secret = match self.secret {
            Some(secret) if !self.hash_algorithm.verify(&secret, &proof) => {
                return Err(TransactionError::invalid(
                    "proof",
                    format!("does not hash to the secret under {:?}", self.hash_algorithm),
                ));
            }
            Some(secret) => secret,
            None => self.hash_algorithm.secret_for(&proof),
        };
        let body = SecretProofBody {
            hash_algorithm: self.hash_algorithm,
            secret,
            recipient,
            proof,
        };
        self.common.finish(TransactionBody::SecretProof(body))
    }
}

// ---------------------------------------------------------------------------
// Account link & mosaic restrictions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct AccountLinkBuilder {
    common: Common,
    remote_key: Option<PublicKey>,
    action: LinkAction,
}

impl AccountLinkBuilder {
    pub fn new(network_type: NetworkType) -> Self {
        Self {
            common: Common::new(network_type),
            remote_key: None,
            action: LinkAction::Link,
        }
    }

    common_setters!();

    pub fn remote_key(mut self, remote_key: PublicKey) -> Self {
        self.remote_key = Some(remote_key);
        self
    }

    pub fn action(mut self, action: LinkAction) -> Self {
        self.action = action;
        self
    }

    pub fn build(self) -> Result<Transaction, TransactionError> {
        let body = AccountLinkBody {
            remote_key: self
                .remote_key
                .ok_or(TransactionError::UnresolvedRequiredField("remote_key"))?,
            action: self.action,
        };
        self.common.finish(TransactionBody::AccountLink(body))
    }
}

#[derive(Debug, Clone)]
pub struct MosaicGlobalRestrictionBuilder {
    common: Common,
    mosaic_id: Option<UnresolvedMosaicId>,
    reference_mosaic_id: UnresolvedMosaicId,
    restriction_key: Option<u64>,
    previous_value: u64,
    previous_type: MosaicRestrictionType,
    new_value: Option<u64>,
    new_type: Option<MosaicRestrictionType>,
}

impl MosaicGlobalRestrictionBuilder {
    pub fn new(network_type: NetworkType) -> Self {
        Self {
            common: Common::new(network_type),
            mosaic_id: None,
            reference_mosaic_id: UnresolvedMosaicId::new(0),
            restriction_key: None,
            previous_value: 0,
            previous_type: MosaicRestrictionType::NoRestriction,
            new_value: None,
            new_type: None,
        }
    }

    common_setters!();

    pub fn mosaic_id(mut self, mosaic_id: impl Into<UnresolvedMosaicId>) -> Self {
        self.mosaic_id = Some(mosaic_id.into());
        self
    }

    pub fn reference_mosaic_id(mut self, mosaic_id: impl Into<UnresolvedMosaicId>) -> Self {
        self.reference_mosaic_id = mosaic_id.into();
        self
    }

    pub fn restriction_key(mut self, key: u64) -> Self {
        self.restriction_key = Some(key);
        self
    }

    pub fn previous(mut self, value: u64, restriction_type: MosaicRestrictionType) -> Self {
        self.previous_value = value;
        self.previous_type = restriction_type;
        self
    }

    pub fn new_restriction(mut self, value: u64, restriction_type: MosaicRestrictionType) -> Self {
        self.new_value = Some(value);
        self.new_type = Some(restriction_type);
        self
    }

    pub fn build(self) -> Result<Transaction, TransactionError> {
        let body = MosaicGlobalRestrictionBody {
            mosaic_id: required(self.mosaic_id, "mosaic_id")?,
            reference_mosaic_id: self.reference_mosaic_id,
            restriction_key: required(self.restriction_key, "restriction_key")?,
            previous_value: self.previous_value,
            previous_type: self.previous_type,
            new_value: required(self.new_value, "new_value")?,
            new_type: required(self.new_type, "new_type")?,
        };
        self.common
            .finish(TransactionBody::MosaicGlobalRestriction(body))
    }
}

/// Sets an address's restriction value for a mosaic.
#[derive(Debug, Clone)]
pub struct MosaicAddressRestrictionBuilder {
    common: Common,
    mosaic_id: Option<UnresolvedMosaicId>,
    restriction_key: Option<u64>,
    target_address: Option<UnresolvedAddress>,
    previous_value: u64,
    new_value: Option<u64>,
}

impl MosaicAddressRestrictionBuilder {
    /// Previous value used when the address had none.
    pub const NO_PREVIOUS_VALUE: u64 = u64::MAX;

    pub fn new(network_type: NetworkType) -> Self {
        Self {
            common: Common::new(network_type),
            mosaic_id: None,
            restriction_key: None,
            target_address: None,
            previous_value: Self::NO_PREVIOUS_VALUE,
            new_value: None,
        }
    }

    common_setters!();

    pub fn mosaic_id(mut self, mosaic_id: impl Into<UnresolvedMosaicId>) -> Self {
        self.mosaic_id = Some(mosaic_id.into());
        self
    }

    pub fn restriction_key(mut self, key: u64) -> Self {
        self.restriction_key = Some(key);
        self
    }

    pub fn target_address(mut self, address: impl Into<UnresolvedAddress>) -> Self {
        self.target_address = Some(address.into());
        self
    }

    pub fn previous_value(mut self, value: u64) -> Self {
        self.previous_value = value;
        self
    }

    pub fn new_value(mut self, value: u64) -> Self {
        self.new_value = Some(value);
        self
    }

    pub fn build(self) -> Result<Transaction, TransactionError> {
        let target_address = self
            .target_address
            .ok_or(TransactionError::UnresolvedRequiredField("target_address"))?;
        let body = MosaicAddressRestrictionBody {
            mosaic_id: required(self.mosaic_id, "mosaic_id")?,
            restriction_key: required(self.restriction_key, "restriction_key")?,
            target_address,
            previous_value: self.previous_value,
            new_value: required(self.new_value, "new_value")?,
        };
        self.common
            .finish(TransactionBody::MosaicAddressRestriction(body))
    }
}

// ---------------------------------------------------------------------------
// Aggregates
// ---------------------------------------------------------------------------

/// Builds aggregate complete or bonded transactions.
///
/// Inner transactions must already carry their signer, see
/// [`Transaction::to_aggregate`], or be added with
/// [`inner_with_signer`](Self::inner_with_signer).
#[derive(Debug, Clone)]
pub struct AggregateBuilder {
    common: Common,
    bonded: bool,
    transactions: Vec<Transaction>,
    cosignatures: Vec<Cosignature>,
}

impl AggregateBuilder {
    /// All cosignatures are attached before announcing.
    pub fn complete(network_type: NetworkType) -> Self {
        Self::with_kind(network_type, false)
    }

    /// Cosignatures are collected on the network; needs a hash lock first.
    pub fn bonded(network_type: NetworkType) -> Self {
        Self::with_kind(network_type, true)
    }

    fn with_kind(network_type: NetworkType, bonded: bool) -> Self {
        Self {
            common: Common::new(network_type),
            bonded,
            transactions: Vec::new(),
            cosignatures: Vec::new(),
        }
    }

    common_setters!();

    pub fn inner(mut self, transaction: Transaction) -> Self {
        self.transactions.push(transaction);
        self
    }

    pub fn inner_transactions(mut self, transactions: impl IntoIterator<Item = Transaction>) -> Self {
        self.transactions.extend(transactions);
        self
    }

    /// Attaches `signer` to `transaction` and adds it.
    ///
    /// An aggregate passed here is kept as-is so `build()` reports it.
    pub fn inner_with_signer(self, transaction: Transaction, signer: PublicKey) -> Self {
        let embedded = transaction.to_aggregate(signer).unwrap_or(transaction);
        self.inner(embedded)
    }

    pub fn cosignature(mut self, cosignature: Cosignature) -> Self {
        self.cosignatures.push(cosignature);
        self
    }

    pub fn build(self) -> Result<Transaction, TransactionError> {
        if self.transactions.is_empty() {
            return Err(TransactionError::MissingField("transactions"));
        }
        for transaction in &self.transactions {
            check_embeddable(transaction)?;
        }
        let body = AggregateBody {
            transactions: self.transactions,
            cosignatures: self.cosignatures,
        };
        tracing::trace!(
            bonded = self.bonded,
            inner = body.transactions.len(),
            payload_size = body.payload_size(),
            "assembled aggregate"
        );
        let body = if self.bonded {
            TransactionBody::AggregateBonded(body)
        } else {
            TransactionBody::AggregateComplete(body)
        };
        self.common.finish(body)
    }
}

// ---------------------------------------------------------------------------
// TransactionFactory
// ---------------------------------------------------------------------------

/// Hands out builders pre-filled with one network's defaults.
#[derive(Debug, Clone)]
pub struct TransactionFactory {
    network_type: NetworkType,
    max_fee: u64,
    deadline_offset: Option<Duration>,
}

impl TransactionFactory {
    pub fn new(network_type: NetworkType) -> Self {
        Self {
            network_type,
            max_fee: 0,
            deadline_offset: None,
        }
    }

    /// Network type, default fee and default deadline from a config.
    pub fn from_config(config: &NetworkConfig) -> Result<Self, ConfigError> {
        config.generation_hash_bytes()?;
        Ok(Self {
            network_type: config.network_type,
            max_fee: config.default_max_fee,
            deadline_offset: Some(config.default_deadline()),
        })
    }

    pub fn with_max_fee(mut self, max_fee: u64) -> Self {
        self.max_fee = max_fee;
        self
    }

    pub fn with_deadline_offset(mut self, offset: Duration) -> Self {
        self.deadline_offset = Some(offset);
        self
    }

    pub fn network_type(&self) -> NetworkType {
        self.network_type
    }

    fn common(&self) -> Common {
        Common {
            max_fee: self.max_fee,
            deadline_offset: self.deadline_offset,
            ..Common::new(self.network_type)
        }
    }

    pub fn transfer(&self) -> TransferBuilder {
        TransferBuilder {
            common: self.common(),
            ..TransferBuilder::new(self.network_type)
        }
    }

    pub fn mosaic_definition(&self) -> MosaicDefinitionBuilder {
        MosaicDefinitionBuilder {
            common: self.common(),
            ..MosaicDefinitionBuilder::new(self.network_type)
        }
    }

    pub fn mosaic_supply_change(&self) -> MosaicSupplyChangeBuilder {
        MosaicSupplyChangeBuilder {
            common: self.common(),
            ..MosaicSupplyChangeBuilder::new(self.network_type)
        }
    }

    pub fn namespace_registration(&self) -> NamespaceRegistrationBuilder {
        NamespaceRegistrationBuilder {
            common: self.common(),
            ..NamespaceRegistrationBuilder::new(self.network_type)
        }
    }

    pub fn address_alias(&self) -> AddressAliasBuilder {
        AddressAliasBuilder {
            common: self.common(),
            ..AddressAliasBuilder::new(self.network_type)
        }
    }

    pub fn mosaic_alias(&self) -> MosaicAliasBuilder {
        MosaicAliasBuilder {
            common: self.common(),
            ..MosaicAliasBuilder::new(self.network_type)
        }
    }

    pub fn account_restriction<M: RestrictionModification>(&self) -> AccountRestrictionBuilder<M> {
        AccountRestrictionBuilder {
            common: self.common(),
            ..AccountRestrictionBuilder::new(self.network_type)
        }
    }

    pub fn account_metadata(&self) -> MetadataBuilder {
        MetadataBuilder {
            common: self.common(),
            ..MetadataBuilder::account(self.network_type)
        }
    }

    pub fn mosaic_metadata(&self, mosaic_id: impl Into<UnresolvedMosaicId>) -> MetadataBuilder {
        MetadataBuilder {
            common: self.common(),
            ..MetadataBuilder::mosaic(self.network_type, mosaic_id)
        }
    }

    pub fn namespace_metadata(&self, namespace_id: NamespaceId) -> MetadataBuilder {
        MetadataBuilder {
            common: self.common(),
            ..MetadataBuilder::namespace(self.network_type, namespace_id)
        }
    }

    pub fn multisig_account_modification(&self) -> MultisigAccountModificationBuilder {
        MultisigAccountModificationBuilder {
            common: self.common(),
            ..MultisigAccountModificationBuilder::new(self.network_type)
        }
    }

    pub fn hash_lock(&self) -> HashLockBuilder {
        HashLockBuilder {
            common: self.common(),
            ..HashLockBuilder::new(self.network_type)
        }
    }

    pub fn secret_lock(&self) -> SecretLockBuilder {
        SecretLockBuilder {
            common: self.common(),
            ..SecretLockBuilder::new(self.network_type)
        }
    }

    pub fn secret_proof(&self) -> SecretProofBuilder {
        SecretProofBuilder {
            common: self.common(),
            ..SecretProofBuilder::new(self.network_type)
        }
    }

    pub fn account_link(&self) -> AccountLinkBuilder {
        AccountLinkBuilder {
            common: self.common(),
            ..AccountLinkBuilder::new(self.network_type)
        }
    }

    pub fn mosaic_global_restriction(&self) -> MosaicGlobalRestrictionBuilder {
        MosaicGlobalRestrictionBuilder {
            common: self.common(),
            ..MosaicGlobalRestrictionBuilder::new(self.network_type)
        }
    }

    pub fn mosaic_address_restriction(&self) -> MosaicAddressRestrictionBuilder {
        MosaicAddressRestrictionBuilder {
            common: self.common(),
            ..MosaicAddressRestrictionBuilder::new(self.network_type)
        }
    }

    pub fn aggregate_complete(&self) -> AggregateBuilder {
        AggregateBuilder {
            common: self.common(),
            ..AggregateBuilder::complete(self.network_type)
        }
    }

    pub fn aggregate_bonded(&self) -> AggregateBuilder {
        AggregateBuilder {
            common: self.common(),
            ..AggregateBuilder::bonded(self.network_type)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::{KeyPair, Signature};
    use crate::model::{RestrictionModificationAction, TransactionType};
    use crate::transaction::sign;

    const NETWORK: NetworkType = NetworkType::MijinTest;

    fn address() -> Address {
        Address::from_plain("SDUP5PLHDXKBX3UU5Q52LAY4WYEKGEWC6IB3VBFM").unwrap()
    }

    fn mosaic_id(raw: u64) -> MosaicId {
        MosaicId::new(raw).unwrap()
    }

    #[test]
    fn transfer_requires_recipient() {
        assert_eq!(
            TransferBuilder::new(NETWORK).build(),
            Err(TransactionError::UnresolvedRequiredField("recipient"))
        );
    }

    #[test]
    fn transfer_accepts_alias_recipient() {
        let alias = UnresolvedAddress::alias(NamespaceId::from_name("nem.owner").unwrap(), NETWORK);
        let tx = TransferBuilder::new(NETWORK).recipient(alias).build().unwrap();
        match tx.body() {
            TransactionBody::Transfer(body) => assert!(body.recipient.is_alias()),
            other => panic!("unexpected body {other:?}"),
        }
    }

    #[test]
    fn transfer_rejects_foreign_network_recipient() {
        let err = TransferBuilder::new(NetworkType::MainNet)
            .recipient(address())
            .build()
            .unwrap_err();
        assert!(matches!(err, TransactionError::InvalidValue { field: "recipient", .. }));
    }

    #[test]
    fn transfer_sorts_mosaics_and_rejects_duplicates() {
        let tx = TransferBuilder::new(NETWORK)
            .recipient(address())
            .mosaic(Mosaic::new(mosaic_id(9), 1))
            .mosaic(Mosaic::new(mosaic_id(3), 2))
            .build()
            .unwrap();
        let TransactionBody::Transfer(body) = tx.body() else {
            panic!("not a transfer");
        };
        let ids: Vec<u64> = body.mosaics.iter().map(|m| m.id.id()).collect();
        assert_eq!(ids, vec![3, 9]);

        let err = TransferBuilder::new(NETWORK)
            .recipient(address())
            .mosaics([Mosaic::new(mosaic_id(3), 1), Mosaic::new(mosaic_id(3), 2)])
            .build()
            .unwrap_err();
        assert!(matches!(err, TransactionError::InvalidValue { field: "mosaics", .. }));
    }

    #[test]
    fn transfer_defaults() {
        let tx = TransferBuilder::new(NETWORK).recipient(address()).build().unwrap();
        assert_eq!(tx.version(), 1);
        assert_eq!(tx.max_fee(), 0);
        assert!(!tx.deadline().is_expired());
        let TransactionBody::Transfer(body) = tx.body() else {
            panic!("not a transfer");
        };
        assert_eq!(body.message, Some(Message::empty()));

        let tx = TransferBuilder::new(NETWORK)
            .recipient(address())
            .no_message()
            .build()
            .unwrap();
        let TransactionBody::Transfer(body) = tx.body() else {
            panic!("not a transfer");
        };
        assert_eq!(body.message, None);
    }

    #[test]
    fn mosaic_definition_derives_id_from_owner() {
        let owner = PublicKey::from_hex(
            "4AFF7B4BA8C1C26A7917575993346627CB6C80DE62CD92F7F9AEDB7064A3DE62",
        )
        .unwrap();
        let nonce = MosaicNonce::from_hex("B76FE378").unwrap();
        let tx = MosaicDefinitionBuilder::new(NETWORK)
            .nonce(nonce)
            .owner(owner)
            .flags(MosaicFlags::new(true, true, false))
            .divisibility(3)
            .build()
            .unwrap();
        let TransactionBody::MosaicDefinition(body) = tx.body() else {
            panic!("not a mosaic definition");
        };
        assert_eq!(body.mosaic_id.to_hex(), "3AD842A8C0AFC518");

        let err = MosaicDefinitionBuilder::new(NETWORK)
            .nonce(nonce)
            .owner(owner)
            .mosaic_id(mosaic_id(1))
            .build()
            .unwrap_err();
        assert!(matches!(err, TransactionError::InvalidValue { field: "mosaic_id", .. }));
    }

    #[test]
    fn mosaic_definition_requires_nonce_and_id() {
        assert_eq!(
            MosaicDefinitionBuilder::new(NETWORK).build(),
            Err(TransactionError::MissingField("nonce"))
        );
        assert_eq!(
            MosaicDefinitionBuilder::new(NETWORK)
                .nonce(MosaicNonce::new(1))
                .build(),
            Err(TransactionError::MissingField("mosaic_id"))
        );
    }

    #[test]
    fn supply_change_reports_first_missing_field() {
        assert_eq!(
            MosaicSupplyChangeBuilder::new(NETWORK)
                .mosaic_id(mosaic_id(5))
                .delta(1)
                .build(),
            Err(TransactionError::MissingField("action"))
        );
    }

    #[test]
    fn namespace_root_and_child() {
        let root = NamespaceRegistrationBuilder::new(NETWORK)
            .name("nem")
            .duration(1000)
            .build()
            .unwrap();
        let TransactionBody::NamespaceRegistration(body) = root.body() else {
            panic!("not a namespace registration");
        };
        assert_eq!(body.namespace_id.id(), 9_562_080_086_528_621_131);

        let child = NamespaceRegistrationBuilder::new(NETWORK)
            .name("subnem")
            .parent_name("nem")
            .build()
            .unwrap();
        let TransactionBody::NamespaceRegistration(body) = child.body() else {
            panic!("not a namespace registration");
        };
        assert_eq!(body.namespace_id.id(), 16_440_672_666_685_223_858);
        assert_eq!(body.registration.parent_id(), NamespaceId::from_name("nem").ok());
    }

    #[test]
    fn namespace_rules() {
        assert_eq!(
            NamespaceRegistrationBuilder::new(NETWORK).name("nem").build(),
            Err(TransactionError::MissingField("duration"))
        );
        assert!(matches!(
            NamespaceRegistrationBuilder::new(NETWORK)
                .name("Invalid_Name!")
                .duration(1)
                .build(),
            Err(TransactionError::Id(id::IdError::InvalidName(_)))
        ));
        assert!(matches!(
            NamespaceRegistrationBuilder::new(NETWORK)
                .name("d")
                .parent_name("a.b.c")
                .build(),
            Err(TransactionError::Id(id::IdError::TooManyParts { .. }))
        ));
        assert!(matches!(
            NamespaceRegistrationBuilder::new(NETWORK)
                .name("child")
                .parent_name("nem")
                .duration(5)
                .build(),
            Err(TransactionError::InvalidValue { field: "duration", .. })
        ));
    }

    #[test]
    fn restriction_builder_picks_variant() {
        let tx = AccountOperationRestrictionBuilder::new(NETWORK)
            .restriction_type(AccountRestrictionType::AllowOutgoingTransactionType)
            .modification(OperationRestrictionModification {
                action: RestrictionModificationAction::Add,
                value: TransactionType::Transfer,
            })
            .build()
            .unwrap();
        assert_eq!(tx.transaction_type(), TransactionType::AccountOperationRestriction);

        let err = AccountAddressRestrictionBuilder::new(NETWORK)
            .restriction_type(AccountRestrictionType::BlockIncomingMosaic)
            .modification(AddressRestrictionModification {
                action: RestrictionModificationAction::Add,
                value: address().into(),
            })
            .build()
            .unwrap_err();
        assert!(matches!(err, TransactionError::InvalidValue { field: "restriction_type", .. }));
    }

    #[test]
    fn metadata_update_sets_xor_and_delta() {
        let tx = MetadataBuilder::mosaic(NETWORK, mosaic_id(5))
            .target_key(PublicKey::from_bytes([1; 32]))
            .scoped_key(42)
            .update(b"abc", b"abd!")
            .build()
            .unwrap();
        assert_eq!(tx.transaction_type(), TransactionType::MosaicMetadata);
        let TransactionBody::Metadata(body) = tx.body() else {
            panic!("not metadata");
        };
        assert_eq!(body.value_size_delta, 1);
        assert_eq!(body.value, vec![0, 0, b'c' ^ b'd', b'!']);
    }

    #[test]
    fn metadata_for_key_matches_entry() {
        let key = MetadataKey {
            target_key: PublicKey::from_bytes([6; 32]),
            scoped_key: 77,
            target: MetadataTarget::Namespace(NamespaceId::from_name("nem").unwrap()),
        };
        let tx = MetadataBuilder::for_key(NETWORK, key)
            .value(b"v".to_vec())
            .build()
            .unwrap();
        assert_eq!(tx.transaction_type(), TransactionType::NamespaceMetadata);
        let TransactionBody::Metadata(body) = tx.body() else {
            panic!("not metadata");
        };
        assert_eq!(body.key(), key);
    }

    #[test]
    fn metadata_delta_outside_i16_is_rejected() {
        let err = MetadataBuilder::account(NETWORK)
            .target_key(PublicKey::from_bytes([1; 32]))
            .scoped_key(1)
            .value(vec![1u8; 40_000])
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            TransactionError::InvalidValue { field: "value_size_delta", .. }
        ));

        let tx = MetadataBuilder::account(NETWORK)
            .target_key(PublicKey::from_bytes([1; 32]))
            .scoped_key(1)
            .value(vec![1u8; i16::MAX as usize])
            .build()
            .unwrap();
        let TransactionBody::Metadata(body) = tx.body() else {
            panic!("not metadata");
        };
        assert_eq!(body.value_size_delta, i16::MAX);
    }

    #[test]
    fn multisig_rejects_repeated_key() {
        let key = PublicKey::from_bytes([3; 32]);
        let err = MultisigAccountModificationBuilder::new(NETWORK)
            .min_approval_delta(1)
            .add_cosignatory(key)
            .remove_cosignatory(key)
            .build()
            .unwrap_err();
        assert!(matches!(err, TransactionError::InvalidValue { field: "modifications", .. }));
    }

    #[test]
    fn hash_lock_requires_aggregate_bonded() {
        let key = KeyPair::from_seed(&[1; 32]);
        let transfer = TransferBuilder::new(NETWORK).recipient(address()).build().unwrap();
        let signed_transfer = sign(&transfer, &key, &[0; 32]).unwrap();

        let err = HashLockBuilder::new(NETWORK)
            .mosaic(Mosaic::new(mosaic_id(5), 10_000_000))
            .duration(480)
            .signed_transaction(&signed_transfer)
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            TransactionError::InvalidTransactionKind {
                transaction_type: TransactionType::Transfer,
                ..
            }
        ));

        let bonded = AggregateBuilder::bonded(NETWORK)
            .inner_with_signer(transfer, key.public_key())
            .build()
            .unwrap();
        let signed_bonded = sign(&bonded, &key, &[0; 32]).unwrap();
        let lock = HashLockBuilder::new(NETWORK)
            .mosaic(Mosaic::new(mosaic_id(5), 10_000_000))
            .duration(480)
            .signed_transaction(&signed_bonded)
            .build()
            .unwrap();
        let TransactionBody::HashLock(body) = lock.body() else {
            panic!("not a hash lock");
        };
        assert_eq!(hex::encode_upper(body.hash), signed_bonded.hash);
    }

    #[test]
    fn secret_proof_checks_proof_against_secret() {
        let proof = b"correct horse".to_vec();
        let tx = SecretProofBuilder::new(NETWORK)
            .hash_algorithm(LockHashAlgorithm::Hash256)
            .recipient(address())
            .proof(proof.clone())
            .build()
            .unwrap();
        let TransactionBody::SecretProof(body) = tx.body() else {
            panic!("not a secret proof");
        };
        assert_eq!(body.secret, LockHashAlgorithm::Hash256.secret_for(&proof));

        let err = SecretProofBuilder::new(NETWORK)
            .secret([0; 32])
            .recipient(address())
            .proof(proof)
            .build()
            .unwrap_err();
        assert!(matches!(err, TransactionError::InvalidValue { field: "proof", .. }));
    }

    #[test]
    fn secret_lock_from_proof() {
        let tx = SecretLockBuilder::new(NETWORK)
            .mosaic(Mosaic::new(mosaic_id(5), 1))
            .duration(100)
            .secret_from_proof(b"p")
            .recipient(address())
            .build()
            .unwrap();
        assert_eq!(tx.transaction_type(), TransactionType::SecretLock);
    }

    #[test]
    fn account_link_is_version_two() {
        let tx = AccountLinkBuilder::new(NETWORK)
            .remote_key(PublicKey::from_bytes([9; 32]))
            .build()
            .unwrap();
        assert_eq!(tx.version(), 2);
    }

    #[test]
    fn mosaic_restrictions_defaults() {
        let tx = MosaicAddressRestrictionBuilder::new(NETWORK)
            .mosaic_id(mosaic_id(5))
            .restriction_key(1)
            .target_address(address())
            .new_value(8)
            .build()
            .unwrap();
        let TransactionBody::MosaicAddressRestriction(body) = tx.body() else {
            panic!("not a mosaic address restriction");
        };
        assert_eq!(body.previous_value, u64::MAX);

        let tx = MosaicGlobalRestrictionBuilder::new(NETWORK)
            .mosaic_id(mosaic_id(5))
            .restriction_key(1)
            .new_restriction(1, MosaicRestrictionType::Equal)
            .build()
            .unwrap();
        let TransactionBody::MosaicGlobalRestriction(body) = tx.body() else {
            panic!("not a mosaic global restriction");
        };
        assert_eq!(body.previous_type, MosaicRestrictionType::NoRestriction);
        assert_eq!(body.reference_mosaic_id.id(), 0);
    }

    #[test]
    fn aggregate_rejects_nested_aggregate_and_unsigned_inner() {
        let key = PublicKey::from_bytes([1; 32]);
        let transfer = TransferBuilder::new(NETWORK).recipient(address()).build().unwrap();

        assert_eq!(
            AggregateBuilder::complete(NETWORK).inner(transfer.clone()).build(),
            Err(TransactionError::UnresolvedRequiredField("signer"))
        );

        let inner = AggregateBuilder::complete(NETWORK)
            .inner_with_signer(transfer, key)
            .build()
            .unwrap();
        let err = AggregateBuilder::complete(NETWORK)
            .inner_with_signer(inner, key)
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            TransactionError::InvalidTransactionKind {
                transaction_type: TransactionType::AggregateComplete,
                ..
            }
        ));
    }

    #[test]
    fn aggregate_keeps_cosignatures() {
        let key = PublicKey::from_bytes([1; 32]);
        let transfer = TransferBuilder::new(NETWORK).recipient(address()).build().unwrap();
        let tx = AggregateBuilder::complete(NETWORK)
            .inner_with_signer(transfer, key)
            .cosignature(Cosignature {
                signer: PublicKey::from_bytes([2; 32]),
                signature: Signature::ZERO,
            })
            .build()
            .unwrap();
        let body = tx.body().as_aggregate().unwrap();
        assert_eq!(body.cosignatures.len(), 1);
    }

    #[test]
    fn factory_applies_network_defaults() {
        let config = NetworkConfig {
            default_max_fee: 250,
            ..NetworkConfig::new(
                NETWORK,
                "57F7DA205008026C776CB6AED843393F04CD458E0AA2D9F1D5F31A402072B2D6",
            )
        };
        let factory = TransactionFactory::from_config(&config).unwrap();
        let tx = factory.transfer().recipient(address()).build().unwrap();
        assert_eq!(tx.max_fee(), 250);
        assert_eq!(tx.network_type(), NETWORK);

        let tx = factory
            .account_link()
            .max_fee(1)
            .remote_key(PublicKey::from_bytes([9; 32]))
            .build()
            .unwrap();
        assert_eq!(tx.max_fee(), 1);
    }

    #[test]
    fn deadline_offset_capped_at_one_day() {
        let err = TransactionFactory::new(NETWORK)
            .with_deadline_offset(MAX_DEADLINE + Duration::from_secs(1))
            .transfer()
            .recipient(address())
            .build()
            .unwrap_err();
        assert!(matches!(err, TransactionError::InvalidValue { field: "deadline", .. }));

        let err = TransferBuilder::new(NETWORK)
            .recipient(address())
            .deadline_in(Duration::from_secs(48 * 60 * 60))
            .build()
            .unwrap_err();
        assert!(matches!(err, TransactionError::InvalidValue { field: "deadline", .. }));

        assert!(TransferBuilder::new(NETWORK)
            .recipient(address())
            .deadline_in(MAX_DEADLINE)
            .build()
            .is_ok());
    }

    #[test]
    fn explicit_deadline_wins() {
        let tx = TransactionFactory::new(NETWORK)
            .with_deadline_offset(Duration::from_secs(60))
            .transfer()
            .recipient(address())
            .deadline(Deadline::from_epoch_millis(5))
            .build()
            .unwrap();
        assert_eq!(tx.deadline().epoch_millis(), 5);
    }
}
