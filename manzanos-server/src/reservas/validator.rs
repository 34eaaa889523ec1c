//! Reservation validation
//!
//! All rules run independently and every violation is collected, so the
//! caller can show the full list at once. A clean pass also resolves the
//! ambiguous input fields into [`ReservaValidada`]: dates become millis,
//! the channel becomes its final text and the pricing inputs collapse
//! into the [`CostoBase`] tagged union.

use shared::FieldError;
use shared::models::{CABANAS, ORIGENES, ReservaCreate};

use crate::pricing::CostoBase;
use crate::utils::time::{cantidad_dias, parse_fecha};

/// A create payload after validation: dates in millis, pricing basis
/// resolved, channel text final.
#[derive(Debug, Clone)]
pub struct ReservaValidada {
    pub nombre_completo: String,
    pub telefono: Option<String>,
    pub numero_cabana: String,
    pub origen_reserva: String,
    pub fecha_inicio: i64,
    pub fecha_fin: i64,
    pub cantidad_dias: i64,
    pub costo: CostoBase,
    pub porcentaje_descuento: f64,
    pub sena: f64,
}

/// Validate a create payload. Empty error list = valid.
pub fn validar(input: &ReservaCreate) -> Result<ReservaValidada, Vec<FieldError>> {
    let mut errores: Vec<FieldError> = Vec::new();

    // 1. Guest name
    let nombre = input.nombre_completo.trim();
    if nombre.chars().count() < 3 {
        errores.push(FieldError::new(
            "nombreCompleto",
            "El nombre debe tener al menos 3 caracteres",
        ));
    }

    // 2. Unit id
    if !CABANAS.contains(&input.numero_cabana.as_str()) {
        errores.push(FieldError::new(
            "numeroCabana",
            "Por favor, seleccioná el número de cabaña",
        ));
    }

    // 3. Channel; "Otro" requires the free text
    let origen_final = if !ORIGENES.contains(&input.origen_reserva.as_str()) {
        errores.push(FieldError::new(
            "origenReserva",
            "Por favor, seleccioná el origen de la reserva",
        ));
        None
    } else if input.origen_reserva == "Otro" {
        match input
            .origen_reserva_otro
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            Some(otro) => Some(otro.to_string()),
            None => {
                errores.push(FieldError::new(
                    "origenReservaOtro",
                    "Debe especificar el origen cuando selecciona \"Otro\"",
                ));
                None
            }
        }
    } else {
        Some(input.origen_reserva.clone())
    };

    // 4. Stay range; same-day stays are invalid
    let inicio = parse_fecha(&input.fecha_inicio);
    if inicio.is_none() {
        errores.push(FieldError::new(
            "fechaInicio",
            "Por favor, seleccioná la fecha de entrada",
        ));
    }
    let fin = parse_fecha(&input.fecha_fin);
    if fin.is_none() {
        errores.push(FieldError::new(
            "fechaFin",
            "Por favor, seleccioná la fecha de salida",
        ));
    }
    if let (Some(i), Some(f)) = (inicio, fin)
        && f <= i
    {
        errores.push(FieldError::new(
            "fechaFin",
            "La fecha de fin debe ser posterior a la fecha de inicio",
        ));
    }

    // 5. Pricing basis: exactly one resolvable mode
    let costo = resolver_costo(input, &mut errores);

    // 6. Discount percentage
    let porcentaje_descuento = input.porcentaje_descuento.unwrap_or(0.0);
    if !(0.0..=100.0).contains(&porcentaje_descuento) {
        errores.push(FieldError::new(
            "porcentajeDescuento",
            "El descuento debe estar entre 0 y 100",
        ));
    }

    // 7. Deposit
    let sena = input.sena.unwrap_or(0.0);
    if sena < 0.0 {
        errores.push(FieldError::new("sena", "La seña no puede ser negativa"));
    } else if sena > 0.0
        && let Some(total) = input.costo_total
        && sena > total
    {
        errores.push(FieldError::new(
            "sena",
            "La seña no puede ser mayor al costo total",
        ));
    }

    match (inicio, fin, origen_final, costo) {
        (Some(fecha_inicio), Some(fecha_fin), Some(origen_reserva), Some(costo))
            if errores.is_empty() =>
        {
            Ok(ReservaValidada {
                nombre_completo: nombre.to_string(),
                telefono: input
                    .telefono
                    .as_deref()
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from),
                numero_cabana: input.numero_cabana.clone(),
                origen_reserva,
                fecha_inicio,
                fecha_fin,
                cantidad_dias: cantidad_dias(fecha_inicio, fecha_fin),
                costo,
                porcentaje_descuento,
                sena,
            })
        }
        _ => Err(errores),
    }
}

/// Resolve the pricing inputs into a single basis.
///
/// An explicit `tipoCosto` flag picks the mode; without it exactly one of
/// the two inputs must be present. Both present without a flag is rejected
/// rather than guessing which wins.
fn resolver_costo(input: &ReservaCreate, errores: &mut Vec<FieldError>) -> Option<CostoBase> {
    use shared::models::TipoCosto;

    if let Some(total) = input.costo_total
        && total < 0.0
    {
        errores.push(FieldError::new(
            "costoTotal",
            "El costo total no puede ser negativo",
        ));
        return None;
    }
    if let Some(tarifa) = input.costo_por_dia
        && tarifa < 0.0
    {
        errores.push(FieldError::new(
            "costoPorDia",
            "El costo por día no puede ser negativo",
        ));
        return None;
    }

    match input.tipo_costo {
        Some(TipoCosto::Total) => match input.costo_total {
            Some(monto) => Some(CostoBase::Total { monto }),
            None => {
                errores.push(FieldError::new(
                    "costoTotal",
                    "Debe ingresar el costo total",
                ));
                None
            }
        },
        Some(TipoCosto::PorDia) => match input.costo_por_dia {
            Some(tarifa) => Some(CostoBase::PorDia { tarifa }),
            None => {
                errores.push(FieldError::new(
                    "costoPorDia",
                    "Debe ingresar el costo por día",
                ));
                None
            }
        },
        None => match (input.costo_total, input.costo_por_dia) {
            (Some(monto), None) => Some(CostoBase::Total { monto }),
            (None, Some(tarifa)) => Some(CostoBase::PorDia { tarifa }),
            (None, None) => {
                errores.push(FieldError::new(
                    "costoTotal",
                    "Debe ingresar el costo total o el costo por día",
                ));
                None
            }
            (Some(_), Some(_)) => {
                errores.push(FieldError::new(
                    "costoTotal",
                    "Indique tipoCosto: se recibieron costo total y costo por día a la vez",
                ));
                None
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::TipoCosto;

    fn base_input() -> ReservaCreate {
        ReservaCreate {
            nombre_completo: "Ana Pérez".into(),
            telefono: None,
            numero_cabana: "1".into(),
            origen_reserva: "Booking".into(),
            origen_reserva_otro: None,
            fecha_inicio: "2024-01-10".into(),
            fecha_fin: "2024-01-14".into(),
            costo_total: Some(600_000.0),
            costo_por_dia: None,
            tipo_costo: None,
            porcentaje_descuento: None,
            sena: None,
        }
    }

    fn campos(errs: &[FieldError]) -> Vec<&str> {
        errs.iter().map(|e| e.campo.as_str()).collect()
    }

    #[test]
    fn valid_input_resolves() {
        let v = validar(&base_input()).unwrap();
        assert_eq!(v.cantidad_dias, 4);
        assert_eq!(v.costo, CostoBase::Total { monto: 600_000.0 });
        assert_eq!(v.origen_reserva, "Booking");
    }

    #[test]
    fn short_name_rejected() {
        let mut input = base_input();
        input.nombre_completo = "  Al ".into();
        let errs = validar(&input).unwrap_err();
        assert_eq!(campos(&errs), vec!["nombreCompleto"]);
    }

    #[test]
    fn unknown_cabana_rejected() {
        let mut input = base_input();
        input.numero_cabana = "3".into();
        let errs = validar(&input).unwrap_err();
        assert_eq!(campos(&errs), vec!["numeroCabana"]);
    }

    #[test]
    fn otro_requires_free_text() {
        let mut input = base_input();
        input.origen_reserva = "Otro".into();
        input.origen_reserva_otro = Some("   ".into());
        let errs = validar(&input).unwrap_err();
        assert_eq!(campos(&errs), vec!["origenReservaOtro"]);
    }

    #[test]
    fn otro_free_text_becomes_the_channel() {
        let mut input = base_input();
        input.origen_reserva = "Otro".into();
        input.origen_reserva_otro = Some(" Instagram ".into());
        let v = validar(&input).unwrap();
        assert_eq!(v.origen_reserva, "Instagram");
    }

    #[test]
    fn same_day_stay_rejected() {
        let mut input = base_input();
        input.fecha_fin = input.fecha_inicio.clone();
        let errs = validar(&input).unwrap_err();
        assert_eq!(campos(&errs), vec!["fechaFin"]);
    }

    #[test]
    fn unparseable_dates_rejected() {
        let mut input = base_input();
        input.fecha_inicio = "pronto".into();
        let errs = validar(&input).unwrap_err();
        assert_eq!(campos(&errs), vec!["fechaInicio"]);
    }

    #[test]
    fn missing_both_pricing_inputs_rejected() {
        let mut input = base_input();
        input.costo_total = None;
        let errs = validar(&input).unwrap_err();
        assert_eq!(campos(&errs), vec!["costoTotal"]);
    }

    #[test]
    fn both_pricing_inputs_without_mode_rejected() {
        let mut input = base_input();
        input.costo_por_dia = Some(150_000.0);
        let errs = validar(&input).unwrap_err();
        assert_eq!(campos(&errs), vec!["costoTotal"]);
    }

    #[test]
    fn mode_flag_disambiguates_both_inputs() {
        let mut input = base_input();
        input.costo_por_dia = Some(150_000.0);
        input.tipo_costo = Some(TipoCosto::PorDia);
        let v = validar(&input).unwrap();
        assert_eq!(v.costo, CostoBase::PorDia { tarifa: 150_000.0 });
    }

    #[test]
    fn mode_flag_without_its_field_rejected() {
        let mut input = base_input();
        input.costo_total = None;
        input.costo_por_dia = Some(150_000.0);
        input.tipo_costo = Some(TipoCosto::Total);
        let errs = validar(&input).unwrap_err();
        assert_eq!(campos(&errs), vec!["costoTotal"]);
    }

    #[test]
    fn discount_out_of_range_rejected() {
        let mut input = base_input();
        input.porcentaje_descuento = Some(101.0);
        let errs = validar(&input).unwrap_err();
        assert_eq!(campos(&errs), vec!["porcentajeDescuento"]);
    }

    #[test]
    fn deposit_above_total_rejected() {
        let mut input = base_input();
        input.sena = Some(700_000.0);
        let errs = validar(&input).unwrap_err();
        assert_eq!(campos(&errs), vec!["sena"]);
    }

    #[test]
    fn all_violations_are_collected_at_once() {
        let input = ReservaCreate {
            nombre_completo: "X".into(),
            telefono: None,
            numero_cabana: "9".into(),
            origen_reserva: "Fax".into(),
            origen_reserva_otro: None,
            fecha_inicio: "2024-01-14".into(),
            fecha_fin: "2024-01-10".into(),
            costo_total: None,
            costo_por_dia: None,
            tipo_costo: None,
            porcentaje_descuento: Some(-5.0),
            sena: Some(-1.0),
        };
        let errs = validar(&input).unwrap_err();
        let c = campos(&errs);
        for campo in [
            "nombreCompleto",
            "numeroCabana",
            "origenReserva",
            "fechaFin",
            "costoTotal",
            "porcentajeDescuento",
            "sena",
        ] {
            assert!(c.contains(&campo), "missing error for {campo}: {c:?}");
        }
    }
}
