use serde::{Deserialize, Serialize};

pub mod email;
pub mod extraction;
pub mod forwarded;
pub mod relay;
pub mod transaction;

pub use email::{DecodedEmail, EmailAddress};
pub use extraction::{ExtractionError, TransactionField};
pub use forwarded::ForwardedHeader;
pub use relay::{RelayResponse, RelaySummary};
pub use transaction::{TransactionFields, NOT_AVAILABLE};

/// Error response for API endpoints
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
