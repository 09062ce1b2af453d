//! Transaction type discriminants and their current schema versions.

use std::fmt;

use crate::codec::wire_enum;

wire_enum! {
    /// Entity type of a transaction, as written in the header.
    pub enum TransactionType: u16 {
        Transfer = 0x4154,
        MosaicDefinition = 0x414D,
        MosaicSupplyChange = 0x424D,
        NamespaceRegistration = 0x414E,
        AddressAlias = 0x424E,
        MosaicAlias = 0x434E,
        AccountAddressRestriction = 0x4150,
        AccountMosaicRestriction = 0x4250,
        AccountOperationRestriction = 0x4350,
        AccountLink = 0x414C,
        AccountMetadata = 0x4144,
        MosaicMetadata = 0x4244,
        NamespaceMetadata = 0x4344,
        MultisigAccountModification = 0x4155,
        HashLock = 0x4148,
        SecretLock = 0x4152,
        SecretProof = 0x4252,
        MosaicGlobalRestriction = 0x4151,
        MosaicAddressRestriction = 0x4251,
        AggregateComplete = 0x4141,
        AggregateBonded = 0x4241,
    }
}

impl TransactionType {
    /// Schema version builders stamp into new transactions.
    pub const fn default_version(self) -> u8 {
        match self {
            TransactionType::AccountLink => 2,
            _ => 1,
        }
    }

    pub const fn is_aggregate(self) -> bool {
        matches!(
            self,
            TransactionType::AggregateComplete | TransactionType::AggregateBonded
        )
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} (0x{:04X})", self, self.value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::WireFormat;

    #[test]
    fn transfer_is_0x4154_little_endian() {
        assert_eq!(TransactionType::Transfer.to_bytes(), vec![0x54, 0x41]);
        assert_eq!(
            TransactionType::from_bytes(&[0x41, 0x42]).unwrap(),
            TransactionType::AggregateBonded
        );
    }

    #[test]
    fn discriminants_are_unique() {
        let mut values: Vec<u16> = TransactionType::ALL.iter().map(|t| t.value()).collect();
        values.sort_unstable();
        values.dedup();
        assert_eq!(values.len(), TransactionType::ALL.len());
    }

    #[test]
    fn only_account_link_is_v2() {
        for t in TransactionType::ALL {
            let expected = if *t == TransactionType::AccountLink { 2 } else { 1 };
            assert_eq!(t.default_version(), expected);
        }
    }

    #[test]
    fn aggregates() {
        assert!(TransactionType::AggregateComplete.is_aggregate());
        assert!(TransactionType::AggregateBonded.is_aggregate());
        assert!(!TransactionType::HashLock.is_aggregate());
    }

    #[test]
    fn display_includes_hex() {
        assert_eq!(TransactionType::HashLock.to_string(), "HashLock (0x4148)");
    }
}
