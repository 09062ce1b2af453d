//! Errors raised while building, encoding or signing transactions.

use thiserror::Error;

use crate::codec::CodecError;
use crate::id::IdError;
use crate::model::TransactionType;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransactionError {
    /// The operation does not accept this kind of transaction, e.g. an
    /// aggregate nested in another aggregate.
    #[error("{transaction_type} not allowed here: {reason}")]
    InvalidTransactionKind {
        transaction_type: TransactionType,
        reason: &'static str,
    },

    /// A field that must reference a concrete account or alias was never set.
    #[error("{0} must be set to an address, key or alias")]
    UnresolvedRequiredField(&'static str),

    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Id(#[from] IdError),
}

impl TransactionError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        TransactionError::InvalidValue {
            field,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_problem() {
        let err = TransactionError::InvalidTransactionKind {
            transaction_type: TransactionType::AggregateBonded,
            reason: "aggregates cannot be embedded",
        };
        assert_eq!(
            err.to_string(),
            "AggregateBonded (0x4241) not allowed here: aggregates cannot be embedded"
        );
        assert_eq!(
            TransactionError::MissingField("mosaic").to_string(),
            "missing required field: mosaic"
        );
    }

    #[test]
    fn codec_errors_convert() {
        let err: TransactionError = CodecError::TrailingBytes(3).into();
        assert!(matches!(err, TransactionError::Codec(CodecError::TrailingBytes(3))));
    }
}
