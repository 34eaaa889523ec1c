//! Reservation repository
//!
//! Records are stored with their wire field names (camelCase Spanish),
//! so queries reference `fechaInicio`, `numeroCabana`, etc.

use serde::Deserialize;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

use super::{BaseRepository, RepoError, RepoResult, parse_record_id};
use shared::models::Reserva;

pub const TABLE: &str = "reserva";

#[derive(Debug, Deserialize)]
struct CountRow {
    total: u64,
}

#[derive(Clone)]
pub struct ReservaRepository {
    base: BaseRepository,
}

impl ReservaRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Persist a fully-derived reservation. The record is written as a
    /// whole document, so readers never observe it partially written.
    pub async fn create(&self, reserva: Reserva) -> RepoResult<Reserva> {
        let created: Option<Reserva> = self.base.db().create(TABLE).content(reserva).await?;
        created.ok_or_else(|| RepoError::Database("create returned no record".to_string()))
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Reserva>> {
        let rid = parse_record_id(TABLE, id)?;
        let reserva: Option<Reserva> = self.base.db().select(rid).await?;
        Ok(reserva)
    }

    /// One page of reservations, newest first, plus the total count
    pub async fn find_page(&self, page: u32, limit: u32) -> RepoResult<(Vec<Reserva>, u64)> {
        let start = (page.saturating_sub(1) as i64) * (limit as i64);
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM reserva ORDER BY createdAt DESC LIMIT $limit START $start")
            .query("SELECT count() AS total FROM reserva GROUP ALL")
            .bind(("limit", limit as i64))
            .bind(("start", start))
            .await?;

        let reservas: Vec<Reserva> = result.take(0)?;
        let counts: Vec<CountRow> = result.take(1)?;
        let total = counts.first().map(|c| c.total).unwrap_or(0);

        Ok((reservas, total))
    }

    /// Every stored reservation (maintenance recompute pass)
    pub async fn find_all(&self) -> RepoResult<Vec<Reserva>> {
        let reservas: Vec<Reserva> = self
            .base
            .db()
            .query("SELECT * FROM reserva ORDER BY createdAt DESC")
            .await?
            .take(0)?;
        Ok(reservas)
    }

    /// Reservations for `cabana` whose `[inicio, fin)` range overlaps the
    /// given one: `existing.inicio < fin AND existing.fin > inicio`.
    /// Half-open, so a checkout on day D never conflicts with a check-in
    /// on day D.
    pub async fn find_overlapping(
        &self,
        cabana: &str,
        inicio: i64,
        fin: i64,
        exclude: Option<&RecordId>,
    ) -> RepoResult<Vec<Reserva>> {
        let mut sql = String::from(
            "SELECT * FROM reserva \
             WHERE numeroCabana = $cabana AND fechaInicio < $fin AND fechaFin > $inicio",
        );
        if exclude.is_some() {
            sql.push_str(" AND id != $exclude");
        }

        let mut query = self
            .base
            .db()
            .query(sql)
            .bind(("cabana", cabana.to_string()))
            .bind(("inicio", inicio))
            .bind(("fin", fin));
        if let Some(rid) = exclude {
            query = query.bind(("exclude", rid.clone()));
        }

        let reservas: Vec<Reserva> = query.await?.take(0)?;
        Ok(reservas)
    }

    /// Reservations (any unit) whose stay interval covers the day
    /// `[day_start, day_end)`, ordered by check-in.
    pub async fn find_touching_day(&self, day_start: i64, day_end: i64) -> RepoResult<Vec<Reserva>> {
        let reservas: Vec<Reserva> = self
            .base
            .db()
            .query(
                "SELECT * FROM reserva \
                 WHERE fechaInicio < $fin AND fechaFin > $inicio \
                 ORDER BY fechaInicio ASC",
            )
            .bind(("inicio", day_start))
            .bind(("fin", day_end))
            .await?
            .take(0)?;
        Ok(reservas)
    }

    /// Replace a record as a whole document
    pub async fn update(&self, id: &RecordId, mut reserva: Reserva) -> RepoResult<Reserva> {
        // id lives in the record key, not the document body
        reserva.id = None;
        let updated: Option<Reserva> = self.base.db().update(id.clone()).content(reserva).await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Reserva {}", id)))
    }
}
