//! Availability queries
//!
//! Two stay ranges on the same unit overlap iff
//! `existing.inicio < fin && existing.fin > inicio` (half-open intervals:
//! a checkout on day D does not conflict with a check-in on day D).

use chrono::NaiveDate;
use serde::Serialize;
use surrealdb::RecordId;

use crate::db::repository::{RepoResult, ReservaRepository};
use crate::utils::time::day_bounds;
use shared::models::Reserva;

/// Availability verdict for a unit and date range
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Disponibilidad {
    pub disponible: bool,
    /// Count of conflicting reservations
    pub reservas_existentes: usize,
}

/// Read-only overlap checks against the reservation store.
///
/// Store failures propagate: an error means "availability unknown",
/// never "available".
#[derive(Clone)]
pub struct AvailabilityChecker {
    repo: ReservaRepository,
}

impl AvailabilityChecker {
    pub fn new(repo: ReservaRepository) -> Self {
        Self { repo }
    }

    /// Is `cabana` free over `[inicio, fin)`? `exclude` skips the
    /// reservation being amended.
    pub async fn is_available(
        &self,
        cabana: &str,
        inicio: i64,
        fin: i64,
        exclude: Option<&RecordId>,
    ) -> RepoResult<Disponibilidad> {
        let conflictos = self
            .repo
            .find_overlapping(cabana, inicio, fin, exclude)
            .await?;
        Ok(Disponibilidad {
            disponible: conflictos.is_empty(),
            reservas_existentes: conflictos.len(),
        })
    }

    /// Every reservation whose `[inicio, fin)` interval includes the given
    /// calendar day, for the daily-occupancy view. Same overlap predicate
    /// with one endpoint fixed to a single day.
    pub async fn reservas_del_dia(&self, fecha: NaiveDate) -> RepoResult<Vec<Reserva>> {
        let (inicio, fin) = day_bounds(fecha);
        self.repo.find_touching_day(inicio, fin).await
    }
}
