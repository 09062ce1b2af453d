//! Value types shared by transaction bodies.
//!
//! Everything in here is a small, `Copy`-where-possible value with a
//! [`WireFormat`](crate::codec::WireFormat) impl where it appears on the wire.

pub mod address;
pub mod deadline;
pub mod lock;
pub mod message;
pub mod metadata;
pub mod mosaic;
pub mod multisig;
pub mod namespace;
pub mod network;
pub mod restriction;
pub mod transaction_info;
pub mod transaction_type;

pub use address::{Address, AddressError, UnresolvedAddress};
pub use deadline::Deadline;
pub use lock::LockHashAlgorithm;
pub use message::{Message, MessageType};
pub use metadata::{metadata_update, MetadataKey, MetadataTarget};
pub use mosaic::{Mosaic, MosaicFlags, MosaicId, MosaicNonce, MosaicSupplyChangeAction, UnresolvedMosaicId};
pub use multisig::{CosignatoryModification, CosignatoryModificationAction};
pub use namespace::{LinkAction, NamespaceId, NamespaceRegistrationType};
pub use network::NetworkType;
pub use restriction::{
    AccountRestrictionType, AddressRestrictionModification, MosaicRestrictionModification,
    MosaicRestrictionType, OperationRestrictionModification, RestrictionModificationAction,
    RestrictionTarget,
};
pub use transaction_info::TransactionInfo;
pub use transaction_type::TransactionType;
