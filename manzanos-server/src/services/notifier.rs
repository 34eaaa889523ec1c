//! Webhook notifier
//!
//! Posts created reservations to an n8n-style webhook. Best effort with a
//! bounded timeout: the reservation is already durable when this runs, so
//! any failure here is logged and swallowed, never propagated.

use std::time::Duration;

use chrono::DateTime;
use serde_json::json;

use shared::models::Reserva;

const NOTIFY_TIMEOUT: Duration = Duration::from_secs(8);

#[derive(Clone)]
pub struct NotifierService {
    client: reqwest::Client,
    webhook_url: Option<String>,
}

impl NotifierService {
    pub fn new(webhook_url: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            webhook_url,
        }
    }

    /// A notifier that never sends anything (tests, unconfigured setups)
    pub fn disabled() -> Self {
        Self::new(None)
    }

    /// Notify the webhook about a new reservation. First of "responded"
    /// or "8 s elapsed" wins; on timeout the attempt is abandoned.
    pub async fn notificar_creacion(&self, reserva: &Reserva) {
        let Some(url) = &self.webhook_url else {
            tracing::debug!("Webhook not configured, skipping notification");
            return;
        };

        let payload = json!({
            "nombreCompleto": reserva.nombre_completo,
            "numeroCabana": reserva.numero_cabana,
            "origenReserva": reserva.origen_reserva,
            "fechaInicio": fecha_iso(reserva.fecha_inicio),
            "fechaFin": fecha_iso(reserva.fecha_fin),
            "cantidadDias": reserva.cantidad_dias,
            "costoTotal": reserva.costo_total,
            "costoTotalUSD": reserva.costo_total_usd,
            "cotizacionDolar": reserva.cotizacion_dolar,
            "sena": reserva.sena,
            "saldoPendiente": reserva.saldo_pendiente,
            "estadoPago": reserva.estado_pago,
        });

        let send = self.client.post(url).json(&payload).send();
        match tokio::time::timeout(NOTIFY_TIMEOUT, send).await {
            Ok(Ok(resp)) if resp.status().is_success() => {
                tracing::info!("Webhook notified");
            }
            Ok(Ok(resp)) => {
                tracing::warn!(status = %resp.status(), "Webhook answered with an error");
            }
            Ok(Err(e)) => {
                tracing::warn!("Webhook notification failed: {e}");
            }
            Err(_) => {
                tracing::warn!("Webhook notification timed out (> 8s)");
            }
        }
    }
}

/// Millis -> `YYYY-MM-DD` for the webhook payload
fn fecha_iso(millis: i64) -> String {
    DateTime::from_timestamp_millis(millis)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}
