//! Reservation domain
//!
//! - [`validator`] - structural and cross-field validation (collect-all)
//! - [`availability`] - date-overlap and day-occupancy queries
//! - [`service`] - creation/amendment lifecycle orchestration

pub mod availability;
pub mod service;
pub mod validator;

pub use availability::{AvailabilityChecker, Disponibilidad};
pub use service::ReservaService;
pub use validator::{ReservaValidada, validar};
