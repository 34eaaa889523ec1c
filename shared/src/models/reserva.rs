//! Reservation entity and DTOs
//!
//! Wire field names keep the Spanish names the system has always used
//! (`nombreCompleto`, `numeroCabana`, ...). Stay-range endpoints and audit
//! timestamps are Unix millis; date strings are converted once at the API
//! handler boundary.

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Closed set of rentable units.
pub const CABANAS: [&str; 2] = ["1", "2"];

/// Closed set of reservation channels. "Otro" requires free text.
pub const ORIGENES: [&str; 4] = ["Booking", "Airbnb", "Particular", "Otro"];

/// Payment state of a reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EstadoPago {
    Pendiente,
    Pagado,
}

impl Default for EstadoPago {
    fn default() -> Self {
        Self::Pendiente
    }
}

/// Which pricing input the caller is providing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TipoCosto {
    PorDia,
    Total,
}

/// Reservation entity, as persisted and as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reserva {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<RecordId>,
    pub nombre_completo: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telefono: Option<String>,
    pub numero_cabana: String,
    /// Resolved channel: one of [`ORIGENES`] or the free text given for "Otro"
    pub origen_reserva: String,
    /// Start of stay (inclusive), Unix millis
    pub fecha_inicio: i64,
    /// End of stay (exclusive), Unix millis
    pub fecha_fin: i64,
    /// Derived: ceil((fecha_fin - fecha_inicio) / ms-per-day)
    pub cantidad_dias: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub costo_por_dia: Option<f64>,
    #[serde(default)]
    pub porcentaje_descuento: f64,
    /// Derived final total in pesos, rounded to the whole unit
    pub costo_total: f64,
    /// Derived USD equivalent, 2 decimal places
    #[serde(rename = "costoTotalUSD")]
    pub costo_total_usd: f64,
    /// Exchange rate captured at creation time
    pub cotizacion_dolar: f64,
    /// Deposit received
    #[serde(default)]
    pub sena: f64,
    /// Derived: costo_total - sena
    pub saldo_pendiente: f64,
    #[serde(default)]
    pub estado_pago: EstadoPago,
    /// True once an operator has set `estado_pago` explicitly; the
    /// automatic saldo == 0 rule no longer touches the field after that.
    #[serde(default)]
    pub estado_pago_manual: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create payload. Dates come in as `YYYY-MM-DD` (or RFC 3339) strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservaCreate {
    pub nombre_completo: String,
    #[serde(default)]
    pub telefono: Option<String>,
    pub numero_cabana: String,
    pub origen_reserva: String,
    #[serde(default)]
    pub origen_reserva_otro: Option<String>,
    pub fecha_inicio: String,
    pub fecha_fin: String,
    #[serde(default)]
    pub costo_total: Option<f64>,
    #[serde(default)]
    pub costo_por_dia: Option<f64>,
    /// Disambiguates when both pricing inputs are present
    #[serde(default)]
    pub tipo_costo: Option<TipoCosto>,
    #[serde(default)]
    pub porcentaje_descuento: Option<f64>,
    #[serde(default)]
    pub sena: Option<f64>,
}

/// Amend payload: payment-state change only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstadoPagoUpdate {
    pub estado_pago: EstadoPago,
}

/// Guest-visible view of a reservation (no pricing internals).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservaPublic {
    pub nombre_completo: String,
    pub numero_cabana: String,
    pub fecha_inicio: i64,
    pub fecha_fin: i64,
    pub cantidad_dias: i64,
    pub saldo_pendiente: f64,
    pub estado_pago: EstadoPago,
}

impl From<&Reserva> for ReservaPublic {
    fn from(r: &Reserva) -> Self {
        Self {
            nombre_completo: r.nombre_completo.clone(),
            numero_cabana: r.numero_cabana.clone(),
            fecha_inicio: r.fecha_inicio,
            fecha_fin: r.fecha_fin,
            cantidad_dias: r.cantidad_dias,
            saldo_pendiente: r.saldo_pendiente,
            estado_pago: r.estado_pago,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn estado_pago_wire_values() {
        assert_eq!(
            serde_json::to_string(&EstadoPago::Pendiente).unwrap(),
            "\"pendiente\""
        );
        assert_eq!(
            serde_json::to_string(&EstadoPago::Pagado).unwrap(),
            "\"pagado\""
        );
    }

    #[test]
    fn reserva_serializes_with_spanish_wire_names() {
        let r = Reserva {
            id: None,
            nombre_completo: "Ana Pérez".into(),
            telefono: None,
            numero_cabana: "1".into(),
            origen_reserva: "Booking".into(),
            fecha_inicio: 0,
            fecha_fin: 86_400_000,
            cantidad_dias: 1,
            costo_por_dia: None,
            porcentaje_descuento: 0.0,
            costo_total: 150_000.0,
            costo_total_usd: 125.0,
            cotizacion_dolar: 1200.0,
            sena: 0.0,
            saldo_pendiente: 150_000.0,
            estado_pago: EstadoPago::Pendiente,
            estado_pago_manual: false,
            created_at: 0,
            updated_at: 0,
        };
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["nombreCompleto"], "Ana Pérez");
        assert_eq!(json["costoTotalUSD"], 125.0);
        assert_eq!(json["estadoPago"], "pendiente");
    }

    #[test]
    fn create_payload_accepts_minimal_fields() {
        let json = r#"{
            "nombreCompleto": "Juan",
            "numeroCabana": "2",
            "origenReserva": "Airbnb",
            "fechaInicio": "2024-01-10",
            "fechaFin": "2024-01-14",
            "costoTotal": 600000
        }"#;
        let dto: ReservaCreate = serde_json::from_str(json).unwrap();
        assert_eq!(dto.costo_total, Some(600_000.0));
        assert!(dto.tipo_costo.is_none());
        assert!(dto.sena.is_none());
    }
}
