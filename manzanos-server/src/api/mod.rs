//! API route modules
//!
//! - [`health`] - health check
//! - [`auth`] - operator login
//! - [`dolar`] - current exchange quote
//! - [`reservas`] - reservation CRUD, availability and occupancy queries

pub mod auth;
pub mod dolar;
pub mod health;
pub mod reservas;

use axum::Router;

use crate::core::ServerState;

/// Build the Axum router (without state)
pub fn build_app() -> Router<ServerState> {
    Router::<ServerState>::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(dolar::router())
        .merge(reservas::router())
}
