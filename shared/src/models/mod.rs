//! Data models
//!
//! The reservation entity and its request/response DTOs.

pub mod reserva;
pub mod serde_helpers;

pub use reserva::{
    CABANAS, EstadoPago, EstadoPagoUpdate, ORIGENES, Reserva, ReservaCreate, ReservaPublic,
    TipoCosto,
};
