//! Reservation API module

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/reservas", post(handler::create).get(handler::list))
        .route("/api/reservas/dia", get(handler::dia))
        .route(
            "/api/reservas/disponibilidad",
            get(handler::disponibilidad),
        )
        .route("/api/reservas/migrate", post(handler::migrate))
        .route("/api/reservas/public/{id}", get(handler::get_public))
        .route(
            "/api/reservas/{id}",
            get(handler::get_by_id).patch(handler::update_estado_pago),
        )
}
