use serde::{Deserialize, Serialize};

use crate::TransactionFields;

/// Everything the outbound message is rendered from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelaySummary {
    pub from: String,
    pub subject: String,
    pub date: Option<String>,
    pub transaction: TransactionFields,
}

/// Response body of the inbound email endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct RelayResponse {
    pub relay_id: String,
    pub delivered: bool,
    pub summary: RelaySummary,
}
