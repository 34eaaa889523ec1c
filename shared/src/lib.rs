//! Shared types for the Manzanos reservation system
//!
//! Wire-level types used by the server and by any client:
//! the `Reserva` entity and its DTOs, response envelopes and
//! field-scoped validation errors.

pub mod error;
pub mod models;
pub mod response;

// Re-exports
pub use error::FieldError;
pub use response::{ApiResponse, PaginatedResponse, Pagination};
pub use serde::{Deserialize, Serialize};
