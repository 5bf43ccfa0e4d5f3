use crate::error::RelayError;
use crate::handlers::InboundAppState;
use actix_web::{web, HttpResponse};
use shared_types::{RelaySummary, TransactionFields};

/// Sends a fixed sample summary so the Telegram setup can be checked end to end.
pub async fn send_test_message(
    state: web::Data<InboundAppState>,
) -> Result<HttpResponse, RelayError> {
    let summary = RelaySummary {
        from: "txn-relay".to_string(),
        subject: "Pesan uji".to_string(),
        date: None,
        transaction: TransactionFields::default(),
    };

    state
        .pipeline
        .deliver(&summary)
        .await
        .inspect_err(|e| tracing::warn!("Test message not delivered: {}", e))?;

    tracing::info!("Test message delivered to Telegram");

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "delivered": true
    })))
}
