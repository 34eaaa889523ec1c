//! Manzanos Reservation Server
//!
//! Small lodging-reservation backend for two cabañas: records stays,
//! prices them (pesos + USD equivalent at the captured quote), tracks
//! payment state and answers availability/occupancy queries.
//!
//! # Module structure
//!
//! ```text
//! manzanos-server/src/
//! ├── core/          # Config, state, HTTP server
//! ├── auth/          # JWT gate for the management API
//! ├── db/            # Embedded SurrealDB + repositories
//! ├── pricing/       # Pure pricing calculator
//! ├── reservas/      # Validation, availability, lifecycle service
//! ├── services/      # Currency quote feed, webhook notifier
//! ├── api/           # HTTP routes and handlers
//! └── utils/         # Errors, logging, date helpers
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod pricing;
pub mod reservas;
pub mod services;
pub mod utils;

// Re-export public types
pub use auth::JwtService;
pub use core::{Config, Server, ServerState};
pub use reservas::ReservaService;
pub use utils::{AppError, AppResult};

pub fn print_banner() {
    println!(
        r#"
    __  ___
   /  |/  /___ _____  ____  ____ _____  ____  _____
  / /|_/ / __ `/ __ \/_  / / __ `/ __ \/ __ \/ ___/
 / /  / / /_/ / / / / / /_/ /_/ / / / / /_/ (__  )
/_/  /_/\__,_/_/ /_/ /___/\__,_/_/ /_/\____/____/
    "#
    );
}

/// Load .env and initialize logging. Must run before anything else.
pub fn setup_environment() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    utils::logger::init_logger_with_file(log_level.as_deref(), log_dir.as_deref());

    Ok(())
}
