//! Exchange quote route

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::core::ServerState;

/// Public route: the booking form shows the quote before login
pub fn router() -> Router<ServerState> {
    Router::new().route("/api/dolar", get(cotizacion))
}

#[derive(Serialize)]
pub struct CotizacionResponse {
    cotizacion: f64,
}

/// GET /api/dolar - current sell rate (cached, falls back on feed errors)
async fn cotizacion(State(state): State<ServerState>) -> Json<CotizacionResponse> {
    Json(CotizacionResponse {
        cotizacion: state.dolar.cotizacion().await,
    })
}
