//! # Transaction Module
//!
//! Construction, encoding, signing and cosigning of transactions. Every
//! operation the network accepts is a [`Transaction`]: a shared header plus
//! one [`TransactionBody`] variant.
//!
//! ## Architecture
//!
//! ```text
//! types.rs      Transaction, SignedTransaction, CosignatureSignedTransaction
//! body.rs       One body per transaction type, with its catbuffer layout
//! aggregate.rs  Aggregate bodies: embedded transactions plus cosignatures
//! builder.rs    Validating builders and the per-network TransactionFactory
//! serializer.rs Standalone and embedded entity encoding (BinarySerializer)
//! signing.rs    Signing, hashing, cosigning and verification
//! error.rs      TransactionError
//! ```
//!
//! ## Transaction Lifecycle
//!
//! 1. **Build**: use a builder, or [`TransactionFactory`] for network defaults.
//! 2. **Sign**: [`sign`] produces a [`SignedTransaction`] with payload and hash.
//! 3. **Lock**: aggregate bonded transactions need a [`HashLockBuilder`] lock.
//! 4. **Cosign**: cosigners call [`cosign_aggregate_hash`] on the hash, or
//!    everyone signs up front with [`sign_with_cosigners`].
//! 5. **Verify**: [`verify_signed_transaction`] rechecks the payload offline.
//!
//! ## Design Decisions
//!
//! - Transactions are immutable values. Signing never mutates them; it
//!   returns a new [`SignedTransaction`].
//! - Size fields are derived on encode and checked on decode, never stored.
//! - The signed region starts at byte 100 of the entity. The hash covers the
//!   first half of the signature, the signer, the generation hash and that
//!   region.
//! - Inner transactions use the 40-byte embedded header: no signature, fee
//!   or deadline.

pub mod aggregate;
pub mod body;
pub mod builder;
pub mod error;
pub mod serializer;
pub mod signing;
pub mod types;

pub use aggregate::{AggregateBody, Cosignature};
pub use body::{
    AccountAddressRestrictionBody, AccountLinkBody, AccountMosaicRestrictionBody,
    AccountOperationRestrictionBody, AccountRestrictionBody, AddressAliasBody, HashLockBody,
    MetadataBody, MosaicAddressRestrictionBody, MosaicAliasBody, MosaicDefinitionBody,
    MosaicGlobalRestrictionBody, MosaicSupplyChangeBody, MultisigAccountModificationBody,
    NamespaceRegistration, NamespaceRegistrationBody, RestrictionModification, SecretLockBody,
    SecretProofBody, TransactionBody, TransferBody, MAX_DIVISIBILITY,
};
pub use builder::{
    AccountAddressRestrictionBuilder, AccountLinkBuilder, AccountMosaicRestrictionBuilder,
    AccountOperationRestrictionBuilder, AccountRestrictionBuilder, AddressAliasBuilder,
    AggregateBuilder, HashLockBuilder, MetadataBuilder, MosaicAddressRestrictionBuilder,
    MosaicAliasBuilder, MosaicDefinitionBuilder, MosaicGlobalRestrictionBuilder,
    MosaicSupplyChangeBuilder, MultisigAccountModificationBuilder, NamespaceRegistrationBuilder,
    SecretLockBuilder, SecretProofBuilder, TransactionFactory, TransferBuilder,
};
pub use error::TransactionError;
pub use serializer::BinarySerializer;
pub use signing::{
    add_cosignatures, cosign_aggregate_hash, cosign_transaction, sign, sign_with,
    sign_with_cosigners, signed_payload_hash, signing_bytes, transaction_hash, verify_cosignature,
    verify_signed_transaction,
};
pub use types::{CosignatureSignedTransaction, SignedTransaction, Transaction};
