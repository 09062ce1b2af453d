//! Multisig cosignatory modifications.

use serde::{Deserialize, Serialize};

use crate::codec::{fixed_layout, wire_enum};
use crate::crypto::PublicKey;

wire_enum! {
    /// Whether a cosignatory joins or leaves the multisig account.
    pub enum CosignatoryModificationAction: u8 {
        Remove = 0,
        Add = 1,
    }
}

fixed_layout! {
    /// One cosignatory added to or removed from a multisig account.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    pub struct CosignatoryModification {
        pub action: CosignatoryModificationAction,
        pub cosignatory: PublicKey,
    }
}

impl CosignatoryModification {
    pub fn add(cosignatory: PublicKey) -> Self {
        Self {
            action: CosignatoryModificationAction::Add,
            cosignatory,
        }
    }

    pub fn remove(cosignatory: PublicKey) -> Self {
        Self {
            action: CosignatoryModificationAction::Remove,
            cosignatory,
        }
    }
}
