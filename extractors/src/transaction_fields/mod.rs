mod extractor;

pub use extractor::{extract_transaction_fields, TransactionFieldExtractor};

use regex::Regex;
use shared_types::{ExtractionError, TransactionField};

/// How the value after a label's colon is captured
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureRule {
    /// Exactly this many decimal digits
    Digits(usize),
    /// Everything up to the first `<br>`, `</p>`, `&nbsp;`, newline or end of input
    UntilBreak,
}

/// One row of the label table: a field, the label phrases that announce it and
/// how its value is captured.
#[derive(Debug, Clone)]
pub struct FieldRule {
    pub field: TransactionField,
    pub labels: Vec<String>,
    pub capture: CaptureRule,
}

impl FieldRule {
    pub fn new(field: TransactionField, labels: &[&str], capture: CaptureRule) -> Self {
        Self {
            field,
            labels: labels.iter().map(|l| l.to_string()).collect(),
            capture,
        }
    }

    /// Compiles the rule into a case-insensitive regex whose group 1 is the raw value.
    ///
    /// Label words may be separated by any run of whitespace. After the colon only
    /// spaces and tabs are skipped, then one optional `&nbsp;`, so a blank value
    /// never reaches into the next line.
    pub fn compile(&self) -> Result<Regex, ExtractionError> {
        if self.labels.is_empty() {
            return Err(ExtractionError::InvalidRule {
                field: self.field,
                reason: "at least one label is required".to_string(),
            });
        }

        let mut alternatives = Vec::with_capacity(self.labels.len());
        for label in &self.labels {
            let words: Vec<String> = label.split_whitespace().map(regex::escape).collect();
            if words.is_empty() {
                return Err(ExtractionError::InvalidRule {
                    field: self.field,
                    reason: "labels must not be blank".to_string(),
                });
            }
            alternatives.push(words.join(r"\s+"));
        }

        let value = match self.capture {
            CaptureRule::Digits(count) => format!(r"(\d{{{count}}})"),
            CaptureRule::UntilBreak => r"(.*?)(?:<br\s*/?>|</p>|&nbsp;|\n|$)".to_string(),
        };

        let pattern = format!(
            r"(?i)(?:{})\s*:[ \t]*(?:&nbsp;)?{}",
            alternatives.join("|"),
            value
        );

        Regex::new(&pattern).map_err(|e| ExtractionError::Pattern(e.to_string()))
    }
}

/// The built-in label table for Indonesian bank card notifications, in field order.
pub fn default_field_rules() -> Vec<FieldRule> {
    vec![
        FieldRule::new(
            TransactionField::CardSuffix,
            &["4 digit Akhir Kartu"],
            CaptureRule::Digits(4),
        ),
        FieldRule::new(
            TransactionField::Merchant,
            &["Merchant/ATM"],
            CaptureRule::UntilBreak,
        ),
        FieldRule::new(
            TransactionField::TransactionDate,
            &["Tanggal Transaksi"],
            CaptureRule::UntilBreak,
        ),
        FieldRule::new(
            TransactionField::Amount,
            &["Nominal"],
            CaptureRule::UntilBreak,
        ),
    ]
}
