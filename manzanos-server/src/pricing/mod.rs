//! Pricing
//!
//! Pure derived-field computation for reservations.

pub mod calculator;

pub use calculator::{CostoBase, Totales, computar_totales, saldo};
