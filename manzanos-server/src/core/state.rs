use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::auth::JwtService;
use crate::core::Config;
use crate::db::DbService;
use crate::reservas::ReservaService;
use crate::services::{DolarService, NotifierService};
use crate::utils::{AppError, AppResult};

/// Server state - shared references to every service
///
/// Cloning is cheap: the database handle and services are internally
/// reference-counted.
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub db: Surreal<Db>,
    pub jwt_service: Arc<JwtService>,
    pub dolar: DolarService,
    pub reservas: ReservaService,
}

impl ServerState {
    /// Initialize state with the on-disk database
    pub async fn initialize(config: &Config) -> AppResult<Self> {
        let db_dir = config.database_dir();
        std::fs::create_dir_all(&db_dir)
            .map_err(|e| AppError::internal(format!("Failed to create {}: {e}", db_dir.display())))?;

        let db_service = DbService::new(&db_dir.join("manzanos.db")).await?;
        Ok(Self::with_db(config, db_service.db))
    }

    /// Initialize state with an in-memory database (tests)
    pub async fn initialize_memory(config: &Config) -> AppResult<Self> {
        let db_service = DbService::new_memory().await?;
        Ok(Self::with_db(config, db_service.db))
    }

    fn with_db(config: &Config, db: Surreal<Db>) -> Self {
        let jwt_service = Arc::new(JwtService::new(config.jwt.clone()));
        let dolar = DolarService::new(config.dolar_api_url.clone(), config.dolar_fallback);
        let notifier = NotifierService::new(config.webhook_url.clone());
        let reservas = ReservaService::new(db.clone(), dolar.clone(), notifier);

        Self {
            config: config.clone(),
            db,
            jwt_service,
            dolar,
            reservas,
        }
    }
}
