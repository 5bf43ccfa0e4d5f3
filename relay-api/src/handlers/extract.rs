use crate::handlers::InboundAppState;
use actix_web::{web, HttpResponse};
use extractors::extract_forwarded_header;

/// Runs the transaction field extractor over a text or HTML body.
pub async fn extract_transaction(state: web::Data<InboundAppState>, body: String) -> HttpResponse {
    HttpResponse::Ok().json(state.pipeline.extractor().extract(&body))
}

/// Runs the forwarded header extractor over a text or HTML body.
pub async fn extract_forwarded(body: String) -> HttpResponse {
    HttpResponse::Ok().json(extract_forwarded_header(&body))
}
