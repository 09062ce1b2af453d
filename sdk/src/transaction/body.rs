//! Per-type transaction bodies.
//!
//! Bodies with only fixed-width fields are declared through `fixed_layout!`.
//! The rest write every count or byte length before the section it sizes, and
//! decode by reading that count first. Counts are narrow (`u8`/`u16`) on the
//! wire, so [`TransactionBody::validate`] must pass before a body is written;
//! the serializer and every builder run it.

use serde::{Deserialize, Serialize};

use super::aggregate::AggregateBody;
use super::error::TransactionError;
use crate::codec::{fixed_layout, CatReader, CatWriter, CodecError, WireFormat};
use crate::crypto::PublicKey;
use crate::id;
use crate::model::{
    AccountRestrictionType, Address, AddressRestrictionModification, CosignatoryModification,
    LinkAction, LockHashAlgorithm, Message, MessageType, MetadataKey, MetadataTarget, Mosaic,
    MosaicFlags,
    MosaicId, MosaicNonce, MosaicRestrictionModification, MosaicRestrictionType,
    MosaicSupplyChangeAction, NamespaceId, NamespaceRegistrationType,
    OperationRestrictionModification, RestrictionTarget, TransactionType, UnresolvedAddress,
    UnresolvedMosaicId,
};

/// Largest divisibility the network accepts for a mosaic.
pub const MAX_DIVISIBILITY: u8 = 6;

pub(crate) fn read_counted<T: WireFormat>(
    reader: &mut CatReader<'_>,
    count: usize,
) -> Result<Vec<T>, CodecError> {
    let mut items = Vec::with_capacity(count);
    for _ in 0..count {
        items.push(T::read_from(reader)?);
    }
    Ok(items)
}

fn check_count(field: &'static str, len: usize, max: usize) -> Result<(), TransactionError> {
    if len > max {
        return Err(TransactionError::invalid(
            field,
            format!("{len} entries, at most {max} fit on the wire"),
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Transfer
// ---------------------------------------------------------------------------

/// Moves mosaics and/or a message to a recipient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferBody {
    pub recipient: UnresolvedAddress,
    /// `None` writes a zero message size and no message bytes at all.
    pub message: Option<Message>,
    pub mosaics: Vec<Mosaic>,
}

impl TransferBody {
    fn message_len(&self) -> usize {
        self.message.as_ref().map_or(0, Message::encoded_len)
    }
}

impl WireFormat for TransferBody {
    fn encoded_len(&self) -> usize {
        self.recipient.encoded_len() + 2 + 1 + self.message_len() + self.mosaics.len() * 16
    }

    fn write_to(&self, writer: &mut CatWriter) {
        self.recipient.write_to(writer);
        writer.write_u16(self.message_len() as u16);
        writer.write_u8(self.mosaics.len() as u8);
        if let Some(message) = &self.message {
            message.message_type.write_to(writer);
            writer.write_bytes(&message.payload);
        }
        for mosaic in &self.mosaics {
            mosaic.write_to(writer);
        }
    }

    fn read_from(reader: &mut CatReader<'_>) -> Result<Self, CodecError> {
        let recipient = UnresolvedAddress::read_from(reader)?;
        let message_size = reader.read_u16()? as usize;
        let mosaics_count = reader.read_u8()? as usize;
        let message = if message_size == 0 {
            None
        } else {
            let mut section = reader.sub_reader(message_size)?;
            let message_type = MessageType::read_from(&mut section)?;
            Some(Message::new(message_type, section.read_rest()))
        };
        let mosaics = read_counted(reader, mosaics_count)?;
        Ok(Self {
            recipient,
            message,
            mosaics,
        })
    }
}

// ---------------------------------------------------------------------------
// Mosaics
// ---------------------------------------------------------------------------

fixed_layout! {
    /// Defines a new mosaic. The id must be the one derived from the nonce
    /// and the signer's key, or the network rejects it.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    pub struct MosaicDefinitionBody {
        pub nonce: MosaicNonce,
        pub mosaic_id: MosaicId,
        pub flags: MosaicFlags,
        pub divisibility: u8,
        /// Blocks until expiry; zero means the mosaic never expires.
        pub duration: u64,
    }
}

fixed_layout! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    pub struct MosaicSupplyChangeBody {
        pub mosaic_id: UnresolvedMosaicId,
        pub action: MosaicSupplyChangeAction,
        pub delta: u64,
    }
}

// ---------------------------------------------------------------------------
// Namespaces
// ---------------------------------------------------------------------------

/// Root registrations rent for a duration; children inherit their parent's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NamespaceRegistration {
    Root { duration: u64 },
    Child { parent_id: NamespaceId },
}

impl NamespaceRegistration {
    pub fn registration_type(&self) -> NamespaceRegistrationType {
        match self {
            NamespaceRegistration::Root { .. } => NamespaceRegistrationType::RootNamespace,
            NamespaceRegistration::Child { .. } => NamespaceRegistrationType::SubNamespace,
        }
    }

    pub fn parent_id(&self) -> Option<NamespaceId> {
        match self {
            NamespaceRegistration::Root { .. } => None,
            NamespaceRegistration::Child { parent_id } => Some(*parent_id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamespaceRegistrationBody {
    pub registration: NamespaceRegistration,
    pub namespace_id: NamespaceId,
    pub name: String,
}

impl WireFormat for NamespaceRegistrationBody {
    fn encoded_len(&self) -> usize {
        1 + 8 + 8 + 1 + self.name.len()
    }

    fn write_to(&self, writer: &mut CatWriter) {
        self.registration.registration_type().write_to(writer);
        match self.registration {
            NamespaceRegistration::Root { duration } => writer.write_u64(duration),
            NamespaceRegistration::Child { parent_id } => parent_id.write_to(writer),
        }
        self.namespace_id.write_to(writer);
        writer.write_u8(self.name.len() as u8);
        writer.write_bytes(self.name.as_bytes());
    }

    fn read_from(reader: &mut CatReader<'_>) -> Result<Self, CodecError> {
        let registration = match NamespaceRegistrationType::read_from(reader)? {
            NamespaceRegistrationType::RootNamespace => NamespaceRegistration::Root {
                duration: reader.read_u64()?,
            },
            NamespaceRegistrationType::SubNamespace => NamespaceRegistration::Child {
                parent_id: NamespaceId::read_from(reader)?,
            },
        };
        let namespace_id = NamespaceId::read_from(reader)?;
        let name_size = reader.read_u8()? as usize;
        let name = std::str::from_utf8(reader.read_bytes(name_size)?)
            .map_err(|_| CodecError::malformed("namespace name is not UTF-8"))?
            .to_string();
        Ok(Self {
            registration,
            namespace_id,
            name,
        })
    }
}

fixed_layout! {
    /// Points a namespace at an account address.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    pub struct AddressAliasBody {
        pub action: LinkAction,
        pub namespace_id: NamespaceId,
        pub address: Address,
    }
}

fixed_layout! {
    /// Points a namespace at a mosaic.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    pub struct MosaicAliasBody {
        pub action: LinkAction,
        pub namespace_id: NamespaceId,
        pub mosaic_id: MosaicId,
    }
}

// ---------------------------------------------------------------------------
// Account restrictions
// ---------------------------------------------------------------------------

/// Filter modifications of one kind (addresses, mosaics or transaction types).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRestrictionBody<M> {
    pub restriction_type: AccountRestrictionType,
    pub modifications: Vec<M>,
}

impl<M: WireFormat> WireFormat for AccountRestrictionBody<M> {
    fn encoded_len(&self) -> usize {
        1 + 1 + self.modifications.iter().map(WireFormat::encoded_len).sum::<usize>()
    }

    fn write_to(&self, writer: &mut CatWriter) {
        self.restriction_type.write_to(writer);
        writer.write_u8(self.modifications.len() as u8);
        for modification in &self.modifications {
            modification.write_to(writer);
        }
    }

    fn read_from(reader: &mut CatReader<'_>) -> Result<Self, CodecError> {
        let restriction_type = AccountRestrictionType::read_from(reader)?;
        let count = reader.read_u8()? as usize;
        Ok(Self {
            restriction_type,
            modifications: read_counted(reader, count)?,
        })
    }
}

/// A restriction modification kind and the body variant that carries it.
pub trait RestrictionModification: WireFormat + Clone {
    const TARGET: RestrictionTarget;

    fn into_body(body: AccountRestrictionBody<Self>) -> TransactionBody;
}

impl RestrictionModification for AddressRestrictionModification {
    const TARGET: RestrictionTarget = RestrictionTarget::Address;

    fn into_body(body: AccountRestrictionBody<Self>) -> TransactionBody {
        TransactionBody::AccountAddressRestriction(body)
    }
}

impl RestrictionModification for MosaicRestrictionModification {
    const TARGET: RestrictionTarget = RestrictionTarget::Mosaic;

    fn into_body(body: AccountRestrictionBody<Self>) -> TransactionBody {
        TransactionBody::AccountMosaicRestriction(body)
    }
}

impl RestrictionModification for OperationRestrictionModification {
    const TARGET: RestrictionTarget = RestrictionTarget::TransactionType;

    fn into_body(body: AccountRestrictionBody<Self>) -> TransactionBody {
        TransactionBody::AccountOperationRestriction(body)
    }
}

impl<M: RestrictionModification> AccountRestrictionBody<M> {
    fn validate(&self) -> Result<(), TransactionError> {
        if self.restriction_type.target() != M::TARGET {
            return Err(TransactionError::invalid(
                "restriction_type",
                format!(
                    "{:?} does not filter {:?} values",
                    self.restriction_type,
                    M::TARGET
                ),
            ));
        }
        check_count("modifications", self.modifications.len(), u8::MAX as usize)
    }

    fn read_checked(reader: &mut CatReader<'_>) -> Result<Self, CodecError> {
        let body = Self::read_from(reader)?;
        if body.restriction_type.target() != M::TARGET {
            return Err(CodecError::malformed(format!(
                "restriction type {:?} does not match transaction type",
                body.restriction_type
            )));
        }
        Ok(body)
    }
}

pub type AccountAddressRestrictionBody = AccountRestrictionBody<AddressRestrictionModification>;
pub type AccountMosaicRestrictionBody = AccountRestrictionBody<MosaicRestrictionModification>;
pub type AccountOperationRestrictionBody = AccountRestrictionBody<OperationRestrictionModification>;

// ---------------------------------------------------------------------------
// Metadata
// ---------------------------------------------------------------------------

/// Attaches or updates a metadata value.
///
/// One body serves all three metadata transaction types; `target` decides
/// which, and whether a target id follows the scoped key on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataBody {
    pub target_key: PublicKey,
    pub scoped_key: u64,
    pub target: MetadataTarget,
    pub value_size_delta: i16,
    pub value: Vec<u8>,
}

impl MetadataBody {
    /// The entry this body writes to.
    pub fn key(&self) -> MetadataKey {
        MetadataKey {
            target_key: self.target_key,
            scoped_key: self.scoped_key,
            target: self.target,
        }
    }

    pub fn transaction_type(&self) -> TransactionType {
        match self.target {
            MetadataTarget::Account => TransactionType::AccountMetadata,
            MetadataTarget::Mosaic(_) => TransactionType::MosaicMetadata,
            MetadataTarget::Namespace(_) => TransactionType::NamespaceMetadata,
        }
    }

    fn encoded_len(&self) -> usize {
        let target_id = match self.target {
            MetadataTarget::Account => 0,
            _ => 8,
        };
        32 + 8 + target_id + 2 + 2 + self.value.len()
    }

    fn write_to(&self, writer: &mut CatWriter) {
        self.target_key.write_to(writer);
        writer.write_u64(self.scoped_key);
        match self.target {
            MetadataTarget::Account => {}
            MetadataTarget::Mosaic(id) => id.write_to(writer),
            MetadataTarget::Namespace(id) => id.write_to(writer),
        }
        writer.write_i16(self.value_size_delta);
        writer.write_u16(self.value.len() as u16);
        writer.write_bytes(&self.value);
    }

    fn read_for(
        transaction_type: TransactionType,
        reader: &mut CatReader<'_>,
    ) -> Result<Self, CodecError> {
        let target_key = PublicKey::read_from(reader)?;
        let scoped_key = reader.read_u64()?;
        let target = match transaction_type {
            TransactionType::MosaicMetadata => {
                MetadataTarget::Mosaic(UnresolvedMosaicId::read_from(reader)?)
            }
            TransactionType::NamespaceMetadata => {
                MetadataTarget::Namespace(NamespaceId::read_from(reader)?)
            }
            _ => MetadataTarget::Account,
        };
        let value_size_delta = reader.read_i16()?;
        let value_size = reader.read_u16()? as usize;
        let value = reader.read_bytes(value_size)?.to_vec();
        Ok(Self {
            target_key,
            scoped_key,
            target,
            value_size_delta,
            value,
        })
    }
}

// ---------------------------------------------------------------------------
// Multisig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultisigAccountModificationBody {
    pub min_removal_delta: i8,
    pub min_approval_delta: i8,
    pub modifications: Vec<CosignatoryModification>,
}

impl WireFormat for MultisigAccountModificationBody {
    fn encoded_len(&self) -> usize {
        1 + 1 + 1 + self.modifications.len() * 33
    }

    fn write_to(&self, writer: &mut CatWriter) {
        writer.write_i8(self.min_removal_delta);
        writer.write_i8(self.min_approval_delta);
        writer.write_u8(self.modifications.len() as u8);
        for modification in &self.modifications {
            modification.write_to(writer);
        }
    }

    fn read_from(reader: &mut CatReader<'_>) -> Result<Self, CodecError> {
        let min_removal_delta = reader.read_i8()?;
        let min_approval_delta = reader.read_i8()?;
        let count = reader.read_u8()? as usize;
        Ok(Self {
            min_removal_delta,
            min_approval_delta,
            modifications: read_counted(reader, count)?,
        })
    }
}

// ---------------------------------------------------------------------------
// Locks
// ---------------------------------------------------------------------------

fixed_layout! {
    /// Locks funds against the hash of an aggregate bonded transaction
    /// until its cosignatures arrive.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    pub struct HashLockBody {
        pub mosaic: Mosaic,
        pub duration: u64,
        pub hash: [u8; 32],
    }
}

fixed_layout! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    pub struct SecretLockBody {
        pub mosaic: Mosaic,
        pub duration: u64,
        pub hash_algorithm: LockHashAlgorithm,
        pub secret: [u8; 32],
        pub recipient: UnresolvedAddress,
    }
}

/// Reveals the proof that unlocks a secret lock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretProofBody {
    pub hash_algorithm: LockHashAlgorithm,
    pub secret: [u8; 32],
    pub recipient: UnresolvedAddress,
    pub proof: Vec<u8>,
}

impl WireFormat for SecretProofBody {
    fn encoded_len(&self) -> usize {
        1 + 32 + self.recipient.encoded_len() + 2 + self.proof.len()
    }

    fn write_to(&self, writer: &mut CatWriter) {
        self.hash_algorithm.write_to(writer);
        writer.write_bytes(&self.secret);
        self.recipient.write_to(writer);
        writer.write_u16(self.proof.len() as u16);
        writer.write_bytes(&self.proof);
    }

    fn read_from(reader: &mut CatReader<'_>) -> Result<Self, CodecError> {
        let hash_algorithm = LockHashAlgorithm::read_from(reader)?;
        let secret = reader.read_array()?;
        let recipient = UnresolvedAddress::read_from(reader)?;
        let proof_size = reader.read_u16()? as usize;
        let proof = reader.read_bytes(proof_size)?.to_vec();
        Ok(Self {
            hash_algorithm,
            secret,
            recipient,
            proof,
        })
    }
}

// ---------------------------------------------------------------------------
// Account link & mosaic restrictions
// ---------------------------------------------------------------------------

fixed_layout! {
    /// Delegates harvesting to a remote key.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    pub struct AccountLinkBody {
        pub remote_key: PublicKey,
        pub action: LinkAction,
    }
}

fixed_layout! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    pub struct MosaicGlobalRestrictionBody {
        pub mosaic_id: UnresolvedMosaicId,
        /// Mosaic whose restriction values are compared; zero means `mosaic_id`.
        pub reference_mosaic_id: UnresolvedMosaicId,
        pub restriction_key: u64,
        pub previous_value: u64,
        pub previous_type: MosaicRestrictionType,
        pub new_value: u64,
        pub new_type: MosaicRestrictionType,
    }
}

fixed_layout! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    pub struct MosaicAddressRestrictionBody {
        pub mosaic_id: UnresolvedMosaicId,
        pub restriction_key: u64,
        pub target_address: UnresolvedAddress,
        pub previous_value: u64,
        pub new_value: u64,
    }
}

// ---------------------------------------------------------------------------
// TransactionBody
// ---------------------------------------------------------------------------

/// The type-specific part of a transaction. The variant determines the
/// transaction type written in the header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionBody {
    Transfer(TransferBody),
    MosaicDefinition(MosaicDefinitionBody),
    MosaicSupplyChange(MosaicSupplyChangeBody),
    NamespaceRegistration(NamespaceRegistrationBody),
    AddressAlias(AddressAliasBody),
    MosaicAlias(MosaicAliasBody),
    AccountAddressRestriction(AccountAddressRestrictionBody),
    AccountMosaicRestriction(AccountMosaicRestrictionBody),
    AccountOperationRestriction(AccountOperationRestrictionBody),
    AccountLink(AccountLinkBody),
    Metadata(MetadataBody),
    MultisigAccountModification(MultisigAccountModificationBody),
    HashLock(HashLockBody),
    SecretLock(SecretLockBody),
    SecretProof(SecretProofBody),
    MosaicGlobalRestriction(MosaicGlobalRestrictionBody),
    MosaicAddressRestriction(MosaicAddressRestrictionBody),
    AggregateComplete(AggregateBody),
    AggregateBonded(AggregateBody),
}

/// Expands `$body` once per non-aggregate variant with `$b` bound to the
/// inner value, so dispatch stays in one place.
macro_rules! each_simple_body {
    ($self:expr, $b:ident => $body:expr, aggregate $a:ident => $agg:expr) => {
        match $self {
            TransactionBody::Transfer($b) => $body,
            TransactionBody::MosaicDefinition($b) => $body,
            TransactionBody::MosaicSupplyChange($b) => $body,
            TransactionBody::NamespaceRegistration($b) => $body,
            TransactionBody::AddressAlias($b) => $body,
            TransactionBody::MosaicAlias($b) => $body,
            TransactionBody::AccountAddressRestriction($b) => $body,
            TransactionBody::AccountMosaicRestriction($b) => $body,
            TransactionBody::AccountOperationRestriction($b) => $body,
            TransactionBody::AccountLink($b) => $body,
            TransactionBody::MultisigAccountModification($b) => $body,
            TransactionBody::HashLock($b) => $body,
            TransactionBody::SecretLock($b) => $body,
            TransactionBody::SecretProof($b) => $body,
            TransactionBody::MosaicGlobalRestriction($b) => $body,
            TransactionBody::MosaicAddressRestriction($b) => $body,
            TransactionBody::Metadata($b) => $body,
            TransactionBody::AggregateComplete($a) | TransactionBody::AggregateBonded($a) => $agg,
        }
    };
}

impl TransactionBody {
    pub fn transaction_type(&self) -> TransactionType {
        match self {
            TransactionBody::Transfer(_) => TransactionType::Transfer,
            TransactionBody::MosaicDefinition(_) => TransactionType::MosaicDefinition,
            TransactionBody::MosaicSupplyChange(_) => TransactionType::MosaicSupplyChange,
            TransactionBody::NamespaceRegistration(_) => TransactionType::NamespaceRegistration,
            TransactionBody::AddressAlias(_) => TransactionType::AddressAlias,
            TransactionBody::MosaicAlias(_) => TransactionType::MosaicAlias,
            TransactionBody::AccountAddressRestriction(_) => {
                TransactionType::AccountAddressRestriction
            }
            TransactionBody::AccountMosaicRestriction(_) => TransactionType::AccountMosaicRestriction,
            TransactionBody::AccountOperationRestriction(_) => {
                TransactionType::AccountOperationRestriction
            }
            TransactionBody::AccountLink(_) => TransactionType::AccountLink,
            TransactionBody::Metadata(body) => body.transaction_type(),
            TransactionBody::MultisigAccountModification(_) => {
                TransactionType::MultisigAccountModification
            }
            TransactionBody::HashLock(_) => TransactionType::HashLock,
            TransactionBody::SecretLock(_) => TransactionType::SecretLock,
            TransactionBody::SecretProof(_) => TransactionType::SecretProof,
            TransactionBody::MosaicGlobalRestriction(_) => TransactionType::MosaicGlobalRestriction,
            TransactionBody::MosaicAddressRestriction(_) => TransactionType::MosaicAddressRestriction,
            TransactionBody::AggregateComplete(_) => TransactionType::AggregateComplete,
            TransactionBody::AggregateBonded(_) => TransactionType::AggregateBonded,
        }
    }

    pub fn is_aggregate(&self) -> bool {
        self.transaction_type().is_aggregate()
    }

    /// The aggregate payload, for either aggregate variant.
    pub fn as_aggregate(&self) -> Option<&AggregateBody> {
        match self {
            TransactionBody::AggregateComplete(body) | TransactionBody::AggregateBonded(body) => {
                Some(body)
            }
            _ => None,
        }
    }

    /// Encoded body length, excluding the header.
    pub fn encoded_len(&self) -> usize {
        each_simple_body!(self, b => b.encoded_len(), aggregate a => a.encoded_len())
    }

    /// Checks every constraint that encoding relies on: counts and lengths
    /// that must fit their size prefixes, and cross-field rules.
    pub fn validate(&self) -> Result<(), TransactionError> {
        match self {
            TransactionBody::Transfer(body) => {
                check_count("mosaics", body.mosaics.len(), u8::MAX as usize)?;
                check_count("message", body.message_len(), u16::MAX as usize)
            }
            TransactionBody::MosaicDefinition(body) => {
                if body.divisibility > MAX_DIVISIBILITY {
                    return Err(TransactionError::invalid(
                        "divisibility",
                        format!("{} exceeds {MAX_DIVISIBILITY}", body.divisibility),
                    ));
                }
                Ok(())
            }
            TransactionBody::NamespaceRegistration(body) => {
                id::validate_namespace_name(&body.name)?;
                Ok(())
            }
            TransactionBody::AccountAddressRestriction(body) => body.validate(),
            TransactionBody::AccountMosaicRestriction(body) => body.validate(),
            TransactionBody::AccountOperationRestriction(body) => body.validate(),
            TransactionBody::Metadata(body) => {
                check_count("value", body.value.len(), u16::MAX as usize)
            }
            TransactionBody::MultisigAccountModification(body) => {
                check_count("modifications", body.modifications.len(), u8::MAX as usize)
            }
            TransactionBody::SecretProof(body) => {
                check_count("proof", body.proof.len(), u16::MAX as usize)
            }
            TransactionBody::AggregateComplete(body) | TransactionBody::AggregateBonded(body) => {
                body.validate()
            }
            TransactionBody::MosaicSupplyChange(_)
            | TransactionBody::AddressAlias(_)
            | TransactionBody::MosaicAlias(_)
            | TransactionBody::AccountLink(_)
            | TransactionBody::HashLock(_)
            | TransactionBody::SecretLock(_)
            | TransactionBody::MosaicGlobalRestriction(_)
            | TransactionBody::MosaicAddressRestriction(_) => Ok(()),
        }
    }

    /// Writes the body. Callers must have run [`validate`](Self::validate).
    pub(crate) fn write_to(&self, writer: &mut CatWriter) {
        each_simple_body!(self, b => b.write_to(writer), aggregate a => a.write_to(writer))
    }

    /// Decodes the body that follows a header of `transaction_type`.
    pub(crate) fn read_for(
        transaction_type: TransactionType,
        reader: &mut CatReader<'_>,
    ) -> Result<Self, CodecError> {
        use TransactionType as T;

        Ok(match transaction_type {
            T::Transfer => TransactionBody::Transfer(WireFormat::read_from(reader)?),
            T::MosaicDefinition => TransactionBody::MosaicDefinition(WireFormat::read_from(reader)?),
            T::MosaicSupplyChange => {
                TransactionBody::MosaicSupplyChange(WireFormat::read_from(reader)?)
            }
            T::NamespaceRegistration => {
                TransactionBody::NamespaceRegistration(WireFormat::read_from(reader)?)
            }
            T::AddressAlias => TransactionBody::AddressAlias(WireFormat::read_from(reader)?),
            T::MosaicAlias => TransactionBody::MosaicAlias(WireFormat::read_from(reader)?),
            T::AccountAddressRestriction => {
                TransactionBody::AccountAddressRestriction(AccountRestrictionBody::read_checked(reader)?)
            }
            T::AccountMosaicRestriction => {
                TransactionBody::AccountMosaicRestriction(AccountRestrictionBody::read_checked(reader)?)
            }
            T::AccountOperationRestriction => TransactionBody::AccountOperationRestriction(
                AccountRestrictionBody::read_checked(reader)?,
            ),
            T::AccountLink => TransactionBody::AccountLink(WireFormat::read_from(reader)?),
            T::AccountMetadata | T::MosaicMetadata | T::NamespaceMetadata => {
                TransactionBody::Metadata(MetadataBody::read_for(transaction_type, reader)?)
            }
            T::MultisigAccountModification => {
                TransactionBody::MultisigAccountModification(WireFormat::read_from(reader)?)
            }
            T::HashLock => TransactionBody::HashLock(WireFormat::read_from(reader)?),
            T::SecretLock => TransactionBody::SecretLock(WireFormat::read_from(reader)?),
            T::SecretProof => TransactionBody::SecretProof(WireFormat::read_from(reader)?),
            T::MosaicGlobalRestriction => {
                TransactionBody::MosaicGlobalRestriction(WireFormat::read_from(reader)?)
            }
            T::MosaicAddressRestriction => {
                TransactionBody::MosaicAddressRestriction(WireFormat::read_from(reader)?)
            }
            T::AggregateComplete => TransactionBody::AggregateComplete(AggregateBody::read_from(reader)?),
            T::AggregateBonded => TransactionBody::AggregateBonded(AggregateBody::read_from(reader)?),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{NetworkType, RestrictionModificationAction};

    fn recipient() -> UnresolvedAddress {
        Address::from_plain("SDUP5PLHDXKBX3UU5Q52LAY4WYEKGEWC6IB3VBFM")
            .unwrap()
            .into()
    }

    fn roundtrip(body: &TransactionBody) -> TransactionBody {
        body.validate().unwrap();
        let mut writer = CatWriter::new();
        body.write_to(&mut writer);
        assert_eq!(writer.len(), body.encoded_len());
        let bytes = writer.into_bytes();
        let mut reader = CatReader::new(&bytes);
        let decoded = TransactionBody::read_for(body.transaction_type(), &mut reader).unwrap();
        reader.finish().unwrap();
        decoded
    }

    #[test]
    fn transfer_layout() {
        let body = TransferBody {
            recipient: recipient(),
            message: Some(Message::plain("hi")),
            mosaics: vec![Mosaic::new(95_442_763_262_823u64, 100)],
        };
        let bytes = body.to_bytes();
        assert_eq!(bytes.len(), 25 + 2 + 1 + 3 + 16);
        assert_eq!(&bytes[25..28], &[3, 0, 1]);
        assert_eq!(&bytes[28..31], &[0, b'h', b'i']);
        assert_eq!(hex::encode(&bytes[31..]), "672b0000ce5600006400000000000000");
    }

    #[test]
    fn transfer_without_message_writes_zero_size() {
        let body = TransferBody {
            recipient: recipient(),
            message: None,
            mosaics: vec![],
        };
        let bytes = body.to_bytes();
        assert_eq!(bytes.len(), 28);
        assert_eq!(&bytes[25..], &[0, 0, 0]);
        assert_eq!(TransferBody::from_bytes(&bytes).unwrap(), body);
    }

    #[test]
    fn transfer_count_past_buffer_is_truncated() {
        let mut bytes = TransferBody {
            recipient: recipient(),
            message: None,
            mosaics: vec![Mosaic::new(1u64, 1)],
        }
        .to_bytes();
        bytes[27] = 9;
        assert!(matches!(
            TransferBody::from_bytes(&bytes),
            Err(CodecError::TruncatedInput { .. })
        ));
    }

    #[test]
    fn oversized_sections_fail_validation() {
        let body = TransactionBody::Transfer(TransferBody {
            recipient: recipient(),
            message: None,
            mosaics: vec![Mosaic::new(1u64, 1); 256],
        });
        assert!(matches!(
            body.validate(),
            Err(TransactionError::InvalidValue { field: "mosaics", .. })
        ));
    }

    #[test]
    fn namespace_registration_roundtrips() {
        let root = TransactionBody::NamespaceRegistration(NamespaceRegistrationBody {
            registration: NamespaceRegistration::Root { duration: 1000 },
            namespace_id: NamespaceId::from_name("nem").unwrap(),
            name: "nem".into(),
        });
        assert_eq!(root.encoded_len(), 1 + 8 + 8 + 1 + 3);
        assert_eq!(roundtrip(&root), root);

        let child = TransactionBody::NamespaceRegistration(NamespaceRegistrationBody {
            registration: NamespaceRegistration::Child {
                parent_id: NamespaceId::from_name("nem").unwrap(),
            },
            namespace_id: NamespaceId::from_name("nem.subnem").unwrap(),
            name: "subnem".into(),
        });
        assert_eq!(roundtrip(&child), child);
    }

    #[test]
    fn namespace_registration_validates_name() {
        let body = TransactionBody::NamespaceRegistration(NamespaceRegistrationBody {
            registration: NamespaceRegistration::Root { duration: 1 },
            namespace_id: NamespaceId::from_name("nem").unwrap(),
            name: "Bad Name".into(),
        });
        assert!(matches!(body.validate(), Err(TransactionError::Id(_))));
    }

    #[test]
    fn restriction_type_must_match_variant() {
        let body = TransactionBody::AccountMosaicRestriction(AccountRestrictionBody {
            restriction_type: AccountRestrictionType::AllowIncomingAddress,
            modifications: vec![MosaicRestrictionModification {
                action: RestrictionModificationAction::Add,
                value: UnresolvedMosaicId::new(7),
            }],
        });
        assert!(matches!(
            body.validate(),
            Err(TransactionError::InvalidValue { field: "restriction_type", .. })
        ));

        let mut writer = CatWriter::new();
        body.write_to(&mut writer);
        let bytes = writer.into_bytes();
        assert!(matches!(
            TransactionBody::read_for(TransactionType::AccountMosaicRestriction, &mut CatReader::new(&bytes)),
            Err(CodecError::MalformedInput(_))
        ));
    }

    #[test]
    fn metadata_target_id_only_when_needed() {
        let mut body = MetadataBody {
            target_key: PublicKey::from_bytes([1; 32]),
            scoped_key: 10,
            target: MetadataTarget::Account,
            value_size_delta: 3,
            value: b"abc".to_vec(),
        };
        assert_eq!(body.encoded_len(), 32 + 8 + 2 + 2 + 3);
        let account = TransactionBody::Metadata(body.clone());
        assert_eq!(account.transaction_type(), TransactionType::AccountMetadata);
        assert_eq!(roundtrip(&account), account);

        body.target = MetadataTarget::Namespace(NamespaceId::from_name("nem").unwrap());
        assert_eq!(body.encoded_len(), 32 + 8 + 8 + 2 + 2 + 3);
        let namespace = TransactionBody::Metadata(body);
        assert_eq!(namespace.transaction_type(), TransactionType::NamespaceMetadata);
        assert_eq!(roundtrip(&namespace), namespace);
    }

    #[test]
    fn fixed_bodies_have_fixed_sizes() {
        let supply = MosaicSupplyChangeBody {
            mosaic_id: UnresolvedMosaicId::new(5),
            action: MosaicSupplyChangeAction::Increase,
            delta: 10,
        };
        assert_eq!(supply.encoded_len(), 17);

        let definition = MosaicDefinitionBody {
            nonce: MosaicNonce::new(1),
            mosaic_id: MosaicId::new(2).unwrap(),
            flags: MosaicFlags::new(true, true, false),
            divisibility: 4,
            duration: 0,
        };
        let bytes = definition.to_bytes();
        assert_eq!(bytes.len(), 4 + 8 + 1 + 1 + 8);
        assert_eq!(bytes[12], 0x03);

        let lock = SecretLockBody {
            mosaic: Mosaic::new(1u64, 2),
            duration: 3,
            hash_algorithm: LockHashAlgorithm::Sha3_256,
            secret: [0xAA; 32],
            recipient: recipient(),
        };
        assert_eq!(lock.encoded_len(), 16 + 8 + 1 + 32 + 25);

        let restriction = MosaicAddressRestrictionBody {
            mosaic_id: UnresolvedMosaicId::new(1),
            restriction_key: 2,
            target_address: recipient(),
            previous_value: u64::MAX,
            new_value: 4,
        };
        assert_eq!(restriction.encoded_len(), 8 + 8 + 25 + 8 + 8);
    }

    #[test]
    fn divisibility_above_six_rejected() {
        let body = TransactionBody::MosaicDefinition(MosaicDefinitionBody {
            nonce: MosaicNonce::new(1),
            mosaic_id: MosaicId::new(2).unwrap(),
            flags: MosaicFlags::default(),
            divisibility: 7,
            duration: 0,
        });
        assert!(body.validate().is_err());
    }

    #[test]
    fn secret_proof_and_multisig_roundtrip() {
        let proof = TransactionBody::SecretProof(SecretProofBody {
            hash_algorithm: LockHashAlgorithm::Hash160,
            secret: LockHashAlgorithm::Hash160.secret_for(b"open sesame"),
            recipient: UnresolvedAddress::alias(
                NamespaceId::from_name("nem.owner").unwrap(),
                NetworkType::MijinTest,
            ),
            proof: b"open sesame".to_vec(),
        });
        assert_eq!(roundtrip(&proof), proof);

        let multisig = TransactionBody::MultisigAccountModification(MultisigAccountModificationBody {
            min_removal_delta: -1,
            min_approval_delta: 2,
            modifications: vec![
                CosignatoryModification::add(PublicKey::from_bytes([2; 32])),
                CosignatoryModification::remove(PublicKey::from_bytes([3; 32])),
            ],
        });
        assert_eq!(multisig.encoded_len(), 3 + 2 * 33);
        assert_eq!(roundtrip(&multisig), multisig);
    }
}
