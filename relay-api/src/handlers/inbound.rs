use crate::error::RelayError;
use crate::jobs::relay_pipeline::RelayPipeline;
use actix_web::{web, HttpRequest, HttpResponse};
use shared_types::RelayResponse;
use std::sync::Arc;
use tracing::Instrument;
use uuid::Uuid;

pub const TOKEN_HEADER: &str = "X-Relay-Token";

#[derive(Clone)]
pub struct InboundAppState {
    pub pipeline: Arc<RelayPipeline>,
    pub token: Option<String>,
}

fn authorize(state: &InboundAppState, req: &HttpRequest) -> Result<(), RelayError> {
    let Some(expected) = state.token.as_deref() else {
        return Ok(());
    };

    let provided = req
        .headers()
        .get(TOKEN_HEADER)
        .and_then(|v| v.to_str().ok());

    if provided == Some(expected) {
        Ok(())
    } else {
        Err(RelayError::Unauthorized)
    }
}

/// Accepts one raw RFC 822 message and relays its summary.
pub async fn receive_email(
    state: web::Data<InboundAppState>,
    req: HttpRequest,
    body: web::Bytes,
) -> Result<HttpResponse, RelayError> {
    authorize(&state, &req)?;

    let relay_id = Uuid::new_v4().to_string();
    let span = tracing::info_span!("relay", relay_id = %relay_id, bytes = body.len());

    let outcome = state
        .pipeline
        .relay(&body)
        .instrument(span)
        .await
        .inspect_err(|e| tracing::warn!(relay_id = %relay_id, "Rejected inbound email: {}", e))?;

    Ok(HttpResponse::Ok().json(RelayResponse {
        relay_id,
        delivered: outcome.delivered,
        summary: outcome.summary,
    }))
}
