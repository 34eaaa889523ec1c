//! Reservation API handlers
//!
//! Date strings from the query/body are converted to millis here, before
//! anything reaches the service layer.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::ServerState;
use crate::reservas::Disponibilidad;
use crate::utils::time::parse_fecha;
use crate::utils::{AppError, AppResult};
use shared::models::{CABANAS, EstadoPagoUpdate, Reserva, ReservaCreate, ReservaPublic};
use shared::{ApiResponse, PaginatedResponse};

const DEFAULT_LIMIT: u32 = 50;
const MAX_LIMIT: u32 = 100;

#[derive(Deserialize)]
pub struct ListQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

#[derive(Deserialize)]
pub struct DiaQuery {
    pub fecha: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisponibilidadQuery {
    pub numero_cabana: String,
    pub fecha_inicio: String,
    pub fecha_fin: String,
}

#[derive(Serialize)]
pub struct MigrateResult {
    pub actualizadas: usize,
}

/// POST /api/reservas - create a reservation
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ReservaCreate>,
) -> AppResult<(StatusCode, Json<ApiResponse<Reserva>>)> {
    let reserva = state.reservas.crear(payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok_with_message(
            reserva,
            "Reserva creada exitosamente",
        )),
    ))
}

/// GET /api/reservas - paginated list, newest first
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<PaginatedResponse<Reserva>>> {
    let page = query.page.unwrap_or(1).max(1);
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);

    let (reservas, total) = state.reservas.listar(page, limit).await?;
    Ok(Json(PaginatedResponse::new(reservas, total, page, limit)))
}

/// GET /api/reservas/{id} - single reservation
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Reserva>>> {
    let reserva = state.reservas.obtener(&id).await?;
    Ok(Json(ApiResponse::ok(reserva)))
}

/// GET /api/reservas/public/{id} - guest-visible view, no auth
pub async fn get_public(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<ReservaPublic>>> {
    let reserva = state.reservas.obtener(&id).await?;
    Ok(Json(ApiResponse::ok(ReservaPublic::from(&reserva))))
}

/// PATCH /api/reservas/{id} - amend the payment state
pub async fn update_estado_pago(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<EstadoPagoUpdate>,
) -> AppResult<Json<ApiResponse<Reserva>>> {
    let reserva = state.reservas.actualizar_estado_pago(&id, payload).await?;
    Ok(Json(ApiResponse::ok_with_message(
        reserva,
        "Estado de pago actualizado",
    )))
}

/// GET /api/reservas/dia?fecha=YYYY-MM-DD - reservations covering a day
pub async fn dia(
    State(state): State<ServerState>,
    Query(query): Query<DiaQuery>,
) -> AppResult<Json<ApiResponse<Vec<Reserva>>>> {
    let fecha = NaiveDate::parse_from_str(&query.fecha, "%Y-%m-%d")
        .map_err(|_| AppError::invalid(format!("Fecha inválida: {}", query.fecha)))?;

    let reservas = state.reservas.reservas_del_dia(fecha).await?;
    Ok(Json(ApiResponse::ok(reservas)))
}

/// GET /api/reservas/disponibilidad - availability for unit + range
pub async fn disponibilidad(
    State(state): State<ServerState>,
    Query(query): Query<DisponibilidadQuery>,
) -> AppResult<Json<ApiResponse<Disponibilidad>>> {
    if !CABANAS.contains(&query.numero_cabana.as_str()) {
        return Err(AppError::invalid(format!(
            "Cabaña desconocida: {}",
            query.numero_cabana
        )));
    }
    let inicio = parse_fecha(&query.fecha_inicio)
        .ok_or_else(|| AppError::invalid(format!("Fecha inválida: {}", query.fecha_inicio)))?;
    let fin = parse_fecha(&query.fecha_fin)
        .ok_or_else(|| AppError::invalid(format!("Fecha inválida: {}", query.fecha_fin)))?;
    if fin <= inicio {
        return Err(AppError::invalid(
            "La fecha de fin debe ser posterior a la fecha de inicio",
        ));
    }

    let disponibilidad = state
        .reservas
        .disponibilidad(&query.numero_cabana, inicio, fin)
        .await?;
    Ok(Json(ApiResponse::ok(disponibilidad)))
}

/// POST /api/reservas/migrate - recompute derived fields on every record
pub async fn migrate(
    State(state): State<ServerState>,
) -> AppResult<Json<ApiResponse<MigrateResult>>> {
    let actualizadas = state.reservas.recomputar_todas().await?;
    Ok(Json(ApiResponse::ok(MigrateResult { actualizadas })))
}
