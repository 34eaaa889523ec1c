//! Authentication
//!
//! Single-operator gate: a password checked at login, a JWT for the rest
//! of the session. Management routes go through [`require_auth`].

pub mod jwt;
pub mod middleware;

pub use jwt::{Claims, JwtConfig, JwtError, JwtService};
pub use middleware::require_auth;
