pub mod extract;
pub mod inbound;
pub mod notify;
pub mod status;

use actix_web::web;

pub use inbound::InboundAppState;

/// Registers every route. Expects `web::Data<InboundAppState>` in app data.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(status::hello)
        .service(status::health)
        .route("/api/inbound", web::post().to(inbound::receive_email))
        .route(
            "/api/extract/transaction",
            web::post().to(extract::extract_transaction),
        )
        .route(
            "/api/extract/forwarded",
            web::post().to(extract::extract_forwarded),
        )
        .route("/api/notify/test", web::post().to(notify::send_test_message));
}
