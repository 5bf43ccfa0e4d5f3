use actix_web::{get, web, HttpResponse, Responder};

use crate::handlers::InboundAppState;

#[get("/")]
pub async fn hello() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "service": "txn-relay",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

#[get("/health")]
pub async fn health(state: web::Data<InboundAppState>) -> impl Responder {
    let telegram = if state.pipeline.notifier_configured() {
        "configured"
    } else {
        "not-configured"
    };

    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "telegram": telegram
    }))
}
