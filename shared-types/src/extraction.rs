use serde::{Deserialize, Serialize};

/// The four fields a bank transaction notification is searched for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransactionField {
    CardSuffix,
    Merchant,
    TransactionDate,
    Amount,
}

impl TransactionField {
    pub const ALL: [TransactionField; 4] = [
        TransactionField::CardSuffix,
        TransactionField::Merchant,
        TransactionField::TransactionDate,
        TransactionField::Amount,
    ];
}

/// Extraction error types
#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("Invalid rule for {field:?}: {reason}")]
    InvalidRule {
        field: TransactionField,
        reason: String,
    },

    #[error("Pattern error: {0}")]
    Pattern(String),
}
