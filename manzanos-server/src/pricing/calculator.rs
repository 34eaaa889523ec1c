//! Pricing calculator
//!
//! Turns raw pricing inputs (per-day rate or explicit total, discount %,
//! deposit, exchange quote) into the derived monetary fields of a
//! reservation. Uses rust_decimal for the arithmetic, stores as f64.
//!
//! Pure functions: same inputs, same outputs, no side effects. Callers
//! guarantee non-negative operands and deposit <= total via the validator;
//! nothing is clamped here.

use rust_decimal::prelude::*;

/// Pesos totals round to the whole unit, USD to cents. Balances keep two
/// places: deposits may carry cents even when totals are whole pesos.
const PESO_PLACES: u32 = 0;
const USD_PLACES: u32 = 2;
const SALDO_PLACES: u32 = 2;

#[inline]
fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

#[inline]
fn round_to(value: Decimal, places: u32) -> f64 {
    value
        .round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Pricing basis, resolved once at the API boundary.
///
/// The two input modes are mutually exclusive; the validator rejects a
/// payload that supplies both without a mode flag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CostoBase {
    /// Per-day rate, multiplied by the stay length
    PorDia { tarifa: f64 },
    /// Total given directly by the operator
    Total { monto: f64 },
}

/// Derived monetary fields
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Totales {
    /// Total before discount
    pub costo_base: f64,
    /// Discount amount in pesos
    pub descuento: f64,
    /// Final total in pesos, whole units
    pub costo_total: f64,
    /// Final total expressed in USD at the given quote
    pub costo_total_usd: f64,
    /// costo_total - sena
    pub saldo_pendiente: f64,
}

/// Balance due after the deposit. No floor at zero: a deposit above the
/// total is rejected by the validator, not clamped here.
pub fn saldo(costo_total: f64, sena: f64) -> f64 {
    round_to(to_decimal(costo_total) - to_decimal(sena), SALDO_PLACES)
}

/// Compute all derived monetary fields for a reservation.
pub fn computar_totales(
    base: CostoBase,
    dias: i64,
    porcentaje_descuento: f64,
    sena: f64,
    cotizacion: f64,
) -> Totales {
    let costo_base = match base {
        CostoBase::PorDia { tarifa } => to_decimal(tarifa) * Decimal::from(dias),
        CostoBase::Total { monto } => to_decimal(monto),
    };

    let descuento = (costo_base * to_decimal(porcentaje_descuento) / Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(PESO_PLACES, RoundingStrategy::MidpointAwayFromZero);
    let costo_total = (costo_base - descuento)
        .round_dp_with_strategy(PESO_PLACES, RoundingStrategy::MidpointAwayFromZero);

    let costo_total_usd = if cotizacion > 0.0 {
        round_to(costo_total / to_decimal(cotizacion), USD_PLACES)
    } else {
        0.0
    };

    let costo_total = costo_total.to_f64().unwrap_or_default();

    Totales {
        costo_base: round_to(costo_base, PESO_PLACES),
        descuento: descuento.to_f64().unwrap_or_default(),
        costo_total,
        costo_total_usd,
        saldo_pendiente: saldo(costo_total, sena),
    }
}
