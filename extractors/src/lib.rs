//! Extractors Crate
//!
//! Pulls structured data out of decoded bank-notification email bodies.
//!
//! # Available Extractors
//!
//! - [`extract_forwarded_header`]: original sender, subject and date from a
//!   forwarded-message block (English and Indonesian labels)
//! - [`TransactionFieldExtractor`]: card suffix, merchant, transaction date and
//!   amount from a semi-structured HTML or text notification
//!
//! Both are pure and never fail: a label that is not found leaves the field
//! unset (forwarded header) or at its `"N/A"` sentinel (transaction fields).
//!
//! # Example
//!
//! ```rust
//! use extractors::{extract_forwarded_header, extract_transaction_fields};
//!
//! let header = extract_forwarded_header("From: Jane Doe <jane@example.com>");
//! assert_eq!(header.from.as_deref(), Some("jane@example.com"));
//!
//! let fields = extract_transaction_fields("Nominal: Rp 50.000");
//! assert_eq!(fields.nominal, "Rp 50.000");
//! assert_eq!(fields.merchant, "N/A");
//! ```

pub mod forwarded_header;
pub mod text_cleaner;
pub mod transaction_fields;

// Re-export commonly used items
pub use forwarded_header::extract_forwarded_header;
pub use text_cleaner::clean;
pub use transaction_fields::{
    default_field_rules, extract_transaction_fields, CaptureRule, FieldRule,
    TransactionFieldExtractor,
};

// Re-export the record types from shared-types for convenience
pub use shared_types::{ForwardedHeader, TransactionField, TransactionFields};
