//! Reservation lifecycle service
//!
//! Creation: validate -> quote -> price -> availability pre-check ->
//! persist -> best-effort webhook notification. Amendment re-runs the
//! derived-field recomputation so saved documents always stay internally
//! consistent.
//!
//! The availability pre-check takes no lock: two near-simultaneous
//! creations for the same unit and range can both pass it. Acceptable at
//! this domain's human-paced write rate; documented, not fixed.

use chrono::{NaiveDate, Utc};
use surrealdb::engine::local::Db;
use surrealdb::Surreal;

use crate::db::repository::{RepoError, ReservaRepository};
use crate::pricing::{self, CostoBase, computar_totales};
use crate::reservas::availability::{AvailabilityChecker, Disponibilidad};
use crate::reservas::validator;
use crate::services::{DolarService, NotifierService};
use crate::utils::time::cantidad_dias;
use crate::utils::{AppError, AppResult};
use shared::models::{EstadoPago, EstadoPagoUpdate, Reserva, ReservaCreate};

#[derive(Clone)]
pub struct ReservaService {
    repo: ReservaRepository,
    availability: AvailabilityChecker,
    dolar: DolarService,
    notifier: NotifierService,
}

impl ReservaService {
    pub fn new(db: Surreal<Db>, dolar: DolarService, notifier: NotifierService) -> Self {
        let repo = ReservaRepository::new(db);
        let availability = AvailabilityChecker::new(repo.clone());
        Self {
            repo,
            availability,
            dolar,
            notifier,
        }
    }

    pub fn availability(&self) -> &AvailabilityChecker {
        &self.availability
    }

    /// Create a reservation with all derived fields populated.
    pub async fn crear(&self, input: ReservaCreate) -> AppResult<Reserva> {
        let v = validator::validar(&input).map_err(AppError::Validation)?;

        // Quote is captured now, not live-linked; the feed falls back to a
        // fixed value so pricing never blocks on it.
        let cotizacion = self.dolar.cotizacion().await;

        let totales = computar_totales(
            v.costo,
            v.cantidad_dias,
            v.porcentaje_descuento,
            v.sena,
            cotizacion,
        );

        let disponibilidad = self
            .availability
            .is_available(&v.numero_cabana, v.fecha_inicio, v.fecha_fin, None)
            .await?;
        if !disponibilidad.disponible {
            return Err(AppError::conflict(format!(
                "La cabaña {} ya tiene {} reserva(s) en esas fechas",
                v.numero_cabana, disponibilidad.reservas_existentes
            )));
        }

        let now = Utc::now().timestamp_millis();
        let estado_pago = if totales.saldo_pendiente == 0.0 {
            EstadoPago::Pagado
        } else {
            EstadoPago::Pendiente
        };
        let costo_por_dia = match v.costo {
            CostoBase::PorDia { tarifa } => Some(tarifa),
            CostoBase::Total { .. } => None,
        };

        let reserva = Reserva {
            id: None,
            nombre_completo: v.nombre_completo,
            telefono: v.telefono,
            numero_cabana: v.numero_cabana,
            origen_reserva: v.origen_reserva,
            fecha_inicio: v.fecha_inicio,
            fecha_fin: v.fecha_fin,
            cantidad_dias: v.cantidad_dias,
            costo_por_dia,
            porcentaje_descuento: v.porcentaje_descuento,
            costo_total: totales.costo_total,
            costo_total_usd: totales.costo_total_usd,
            cotizacion_dolar: cotizacion,
            sena: v.sena,
            saldo_pendiente: totales.saldo_pendiente,
            estado_pago,
            estado_pago_manual: false,
            created_at: now,
            updated_at: now,
        };

        let creada = self.repo.create(reserva).await?;

        tracing::info!(
            cabana = %creada.numero_cabana,
            dias = creada.cantidad_dias,
            total = creada.costo_total,
            "Reserva creada"
        );

        // The record is already durable; a failed notification is logged
        // and swallowed, never rolled back.
        self.notifier.notificar_creacion(&creada).await;

        Ok(creada)
    }

    /// Amend the payment state. Marks the state as operator-set, so the
    /// automatic saldo == 0 rule stops touching it on later saves.
    pub async fn actualizar_estado_pago(
        &self,
        id: &str,
        update: EstadoPagoUpdate,
    ) -> AppResult<Reserva> {
        let mut reserva = self.cargar(id).await?;

        reserva.estado_pago = update.estado_pago;
        reserva.estado_pago_manual = true;

        self.guardar_recomputada(reserva).await
    }

    pub async fn obtener(&self, id: &str) -> AppResult<Reserva> {
        self.cargar(id).await
    }

    /// One page of reservations, newest first, plus total count
    pub async fn listar(&self, page: u32, limit: u32) -> AppResult<(Vec<Reserva>, u64)> {
        Ok(self.repo.find_page(page, limit).await?)
    }

    pub async fn reservas_del_dia(&self, fecha: NaiveDate) -> AppResult<Vec<Reserva>> {
        Ok(self.availability.reservas_del_dia(fecha).await?)
    }

    pub async fn disponibilidad(
        &self,
        cabana: &str,
        inicio: i64,
        fin: i64,
    ) -> AppResult<Disponibilidad> {
        Ok(self
            .availability
            .is_available(cabana, inicio, fin, None)
            .await?)
    }

    /// Maintenance pass: re-derive days, balance and the automatic payment
    /// state for every stored record. Returns how many were rewritten.
    pub async fn recomputar_todas(&self) -> AppResult<usize> {
        let reservas = self.repo.find_all().await?;
        let mut actualizadas = 0;
        for reserva in reservas {
            self.guardar_recomputada(reserva).await?;
            actualizadas += 1;
        }
        tracing::info!(actualizadas, "Recomputed derived fields");
        Ok(actualizadas)
    }

    /// Load by id; a malformed or unknown id is a not-found.
    async fn cargar(&self, id: &str) -> AppResult<Reserva> {
        match self.repo.find_by_id(id).await {
            Ok(Some(reserva)) => Ok(reserva),
            Ok(None) | Err(RepoError::Validation(_)) => {
                Err(AppError::not_found(format!("Reserva {}", id)))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Re-run the derived-field rule and persist. `cantidad_dias` and
    /// `saldo_pendiente` are always refreshed; `estado_pago` only while the
    /// operator has not overridden it.
    async fn guardar_recomputada(&self, mut reserva: Reserva) -> AppResult<Reserva> {
        let rid = reserva
            .id
            .clone()
            .ok_or_else(|| AppError::internal("stored record without id"))?;

        reserva.cantidad_dias = cantidad_dias(reserva.fecha_inicio, reserva.fecha_fin);
        reserva.saldo_pendiente = pricing::saldo(reserva.costo_total, reserva.sena);
        if !reserva.estado_pago_manual {
            reserva.estado_pago = if reserva.saldo_pendiente == 0.0 {
                EstadoPago::Pagado
            } else {
                EstadoPago::Pendiente
            };
        }
        reserva.updated_at = Utc::now().timestamp_millis();

        Ok(self.repo.update(&rid, reserva).await?)
    }
}
