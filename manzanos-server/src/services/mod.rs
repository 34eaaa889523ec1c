//! External collaborators
//!
//! - [`dolar`] - currency quote feed with cache and fallback
//! - [`notifier`] - fire-and-forget webhook notification

pub mod dolar;
pub mod notifier;

pub use dolar::DolarService;
pub use notifier::NotifierService;
