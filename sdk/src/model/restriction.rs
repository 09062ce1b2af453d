//! Account and mosaic restriction vocabulary.

use serde::{Deserialize, Serialize};

use super::{TransactionType, UnresolvedAddress, UnresolvedMosaicId};
use crate::codec::{fixed_layout, wire_enum};

wire_enum! {
    /// What an account restriction filters, and in which direction.
    ///
    /// Bit layout: `0x01` address, `0x02` mosaic, `0x04` transaction type,
    /// `0x40` outgoing, `0x80` block (otherwise allow).
    pub enum AccountRestrictionType: u8 {
        AllowIncomingAddress = 0x01,
        AllowIncomingMosaic = 0x02,
        AllowOutgoingAddress = 0x41,
        AllowOutgoingTransactionType = 0x44,
        BlockIncomingAddress = 0x81,
        BlockIncomingMosaic = 0x82,
        BlockOutgoingAddress = 0xC1,
        BlockOutgoingTransactionType = 0xC4,
    }
}

/// The kind of value an [`AccountRestrictionType`] applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestrictionTarget {
    Address,
    Mosaic,
    TransactionType,
}

impl AccountRestrictionType {
    const ADDRESS_BIT: u8 = 0x01;
    const MOSAIC_BIT: u8 = 0x02;

    pub fn target(self) -> RestrictionTarget {
        let bits = self.value();
        if bits & Self::ADDRESS_BIT != 0 {
            RestrictionTarget::Address
        } else if bits & Self::MOSAIC_BIT != 0 {
            RestrictionTarget::Mosaic
        } else {
            RestrictionTarget::TransactionType
        }
    }
}

wire_enum! {
    /// Whether a restriction modification adds or removes a value.
    pub enum RestrictionModificationAction: u8 {
        Remove = 0,
        Add = 1,
    }
}

fixed_layout! {
    /// Add or remove an address filter.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    pub struct AddressRestrictionModification {
        pub action: RestrictionModificationAction,
        pub value: UnresolvedAddress,
    }
}

fixed_layout! {
    /// Add or remove a mosaic filter.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    pub struct MosaicRestrictionModification {
        pub action: RestrictionModificationAction,
        pub value: UnresolvedMosaicId,
    }
}

fixed_layout! {
    /// Add or remove a transaction type filter.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    pub struct OperationRestrictionModification {
        pub action: RestrictionModificationAction,
        pub value: TransactionType,
    }
}

wire_enum! {
    /// Comparison applied by a mosaic global restriction.
    pub enum MosaicRestrictionType: u8 {
        NoRestriction = 0,
        Equal = 1,
        NotEqual = 2,
        LessThan = 3,
        LessOrEqual = 4,
        GreaterThan = 5,
        GreaterOrEqual = 6,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{CodecError, WireFormat};
    use crate::model::{Address, NetworkType};

    #[test]
    fn targets_follow_bits() {
        use AccountRestrictionType::*;
        for t in [AllowIncomingAddress, AllowOutgoingAddress, BlockIncomingAddress, BlockOutgoingAddress] {
            assert_eq!(t.target(), RestrictionTarget::Address);
        }
        assert_eq!(BlockIncomingMosaic.target(), RestrictionTarget::Mosaic);
        assert_eq!(AllowOutgoingTransactionType.target(), RestrictionTarget::TransactionType);
    }

    #[test]
    fn sentinel_and_unknown_types_rejected() {
        assert!(matches!(
            AccountRestrictionType::try_from(0x05),
            Err(CodecError::MalformedInput(_))
        ));
    }

    #[test]
    fn modification_layouts() {
        let m = OperationRestrictionModification {
            action: RestrictionModificationAction::Add,
            value: TransactionType::Transfer,
        };
        assert_eq!(m.to_bytes(), vec![0x01, 0x54, 0x41]);

        let address = Address::from_plain("SDUP5PLHDXKBX3UU5Q52LAY4WYEKGEWC6IB3VBFM").unwrap();
        let m = AddressRestrictionModification {
            action: RestrictionModificationAction::Remove,
            value: address.into(),
        };
        let bytes = m.to_bytes();
        assert_eq!(bytes.len(), 26);
        assert_eq!(bytes[1], NetworkType::MijinTest.value());
        assert_eq!(AddressRestrictionModification::from_bytes(&bytes).unwrap(), m);
    }
}
