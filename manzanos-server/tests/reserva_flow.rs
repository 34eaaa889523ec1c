//! End-to-end lifecycle tests against an in-memory database.

use manzanos_server::db::DbService;
use manzanos_server::db::repository::ReservaRepository;
use manzanos_server::reservas::{AvailabilityChecker, ReservaService};
use manzanos_server::services::{DolarService, NotifierService};
use manzanos_server::utils::AppError;
use manzanos_server::utils::time::parse_fecha;
use shared::models::{EstadoPago, EstadoPagoUpdate, ReservaCreate};

async fn setup() -> (ReservaService, ReservaRepository) {
    let db = DbService::new_memory().await.expect("in-memory db");
    let service = ReservaService::new(
        db.db.clone(),
        DolarService::fixed(1200.0),
        NotifierService::disabled(),
    );
    (service, ReservaRepository::new(db.db))
}

fn input(cabana: &str, inicio: &str, fin: &str) -> ReservaCreate {
    ReservaCreate {
        nombre_completo: "Ana Pérez".into(),
        telefono: Some("+54 9 11 5555-0000".into()),
        numero_cabana: cabana.into(),
        origen_reserva: "Booking".into(),
        origen_reserva_otro: None,
        fecha_inicio: inicio.into(),
        fecha_fin: fin.into(),
        costo_total: Some(600_000.0),
        costo_por_dia: None,
        tipo_costo: None,
        porcentaje_descuento: None,
        sena: None,
    }
}

fn millis(fecha: &str) -> i64 {
    parse_fecha(fecha).expect("valid date literal")
}

#[tokio::test]
async fn create_populates_all_derived_fields() {
    let (service, _) = setup().await;

    let mut payload = input("1", "2024-01-10", "2024-01-14");
    payload.costo_total = None;
    payload.costo_por_dia = Some(150_000.0);
    payload.porcentaje_descuento = Some(10.0);
    payload.sena = Some(100_000.0);

    let reserva = service.crear(payload).await.unwrap();

    assert!(reserva.id.is_some());
    assert_eq!(reserva.cantidad_dias, 4);
    assert_eq!(reserva.costo_total, 540_000.0);
    assert_eq!(reserva.costo_total_usd, 450.0);
    assert_eq!(reserva.cotizacion_dolar, 1200.0);
    assert_eq!(reserva.saldo_pendiente, 440_000.0);
    assert_eq!(reserva.estado_pago, EstadoPago::Pendiente);
    assert!(!reserva.estado_pago_manual);
    assert!(reserva.created_at > 0);
    assert_eq!(reserva.created_at, reserva.updated_at);
}

#[tokio::test]
async fn deposit_covering_the_total_creates_paid() {
    let (service, _) = setup().await;

    let mut payload = input("1", "2024-03-01", "2024-03-03");
    payload.sena = Some(600_000.0);

    let reserva = service.crear(payload).await.unwrap();
    assert_eq!(reserva.saldo_pendiente, 0.0);
    assert_eq!(reserva.estado_pago, EstadoPago::Pagado);
}

#[tokio::test]
async fn invalid_payload_reports_every_violation() {
    let (service, _) = setup().await;

    let mut payload = input("7", "2024-01-14", "2024-01-10");
    payload.nombre_completo = "X".into();
    payload.costo_total = None;

    let err = service.crear(payload).await.unwrap_err();
    match err {
        AppError::Validation(errors) => {
            let campos: Vec<&str> = errors.iter().map(|e| e.campo.as_str()).collect();
            assert!(campos.contains(&"nombreCompleto"));
            assert!(campos.contains(&"numeroCabana"));
            assert!(campos.contains(&"fechaFin"));
            assert!(campos.contains(&"costoTotal"));
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn back_to_back_stays_do_not_conflict() {
    let (service, _) = setup().await;

    service
        .crear(input("1", "2024-02-01", "2024-02-05"))
        .await
        .unwrap();

    // Boundary touch: checkout day == check-in day
    let disp = service
        .disponibilidad("1", millis("2024-02-05"), millis("2024-02-08"))
        .await
        .unwrap();
    assert!(disp.disponible);
    assert_eq!(disp.reservas_existentes, 0);

    let touching = service
        .crear(input("1", "2024-02-05", "2024-02-08"))
        .await
        .unwrap();
    assert_eq!(touching.cantidad_dias, 3);
}

#[tokio::test]
async fn overlapping_stay_on_same_unit_conflicts() {
    let (service, _) = setup().await;

    service
        .crear(input("1", "2024-02-01", "2024-02-05"))
        .await
        .unwrap();

    let disp = service
        .disponibilidad("1", millis("2024-02-04"), millis("2024-02-08"))
        .await
        .unwrap();
    assert!(!disp.disponible);
    assert_eq!(disp.reservas_existentes, 1);

    let err = service
        .crear(input("1", "2024-02-04", "2024-02-08"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn other_unit_is_unaffected() {
    let (service, _) = setup().await;

    service
        .crear(input("1", "2024-02-01", "2024-02-05"))
        .await
        .unwrap();

    let disp = service
        .disponibilidad("2", millis("2024-02-01"), millis("2024-02-05"))
        .await
        .unwrap();
    assert!(disp.disponible);

    service
        .crear(input("2", "2024-02-01", "2024-02-05"))
        .await
        .unwrap();
}

#[tokio::test]
async fn third_range_overlapping_either_stay_is_unavailable() {
    let (service, _) = setup().await;

    service
        .crear(input("1", "2024-02-01", "2024-02-05"))
        .await
        .unwrap();
    service
        .crear(input("1", "2024-02-10", "2024-02-14"))
        .await
        .unwrap();

    // Spans the gap and clips both stays
    let disp = service
        .disponibilidad("1", millis("2024-02-04"), millis("2024-02-11"))
        .await
        .unwrap();
    assert!(!disp.disponible);
    assert_eq!(disp.reservas_existentes, 2);
}

#[tokio::test]
async fn a_stay_does_not_conflict_with_itself_when_excluded() {
    let (service, repo) = setup().await;

    let creada = service
        .crear(input("1", "2024-02-01", "2024-02-05"))
        .await
        .unwrap();
    let rid = creada.id.expect("stored id");

    let inicio = millis("2024-02-02");
    let fin = millis("2024-02-06");

    let sin_excluir = repo
        .find_overlapping("1", inicio, fin, None)
        .await
        .unwrap();
    assert_eq!(sin_excluir.len(), 1);

    let excluyendo = repo
        .find_overlapping("1", inicio, fin, Some(&rid))
        .await
        .unwrap();
    assert!(excluyendo.is_empty());

    let checker = AvailabilityChecker::new(repo);
    let disp = checker
        .is_available("1", inicio, fin, Some(&rid))
        .await
        .unwrap();
    assert!(disp.disponible);
    assert_eq!(disp.reservas_existentes, 0);
}

#[tokio::test]
async fn day_occupancy_uses_half_open_intervals() {
    let (service, _) = setup().await;

    service
        .crear(input("1", "2024-02-01", "2024-02-05"))
        .await
        .unwrap();

    let day = |s: &str| chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap();

    // Check-in day and every night of the stay count
    assert_eq!(service.reservas_del_dia(day("2024-02-01")).await.unwrap().len(), 1);
    assert_eq!(service.reservas_del_dia(day("2024-02-04")).await.unwrap().len(), 1);
    // Checkout day and the day before arrival do not
    assert_eq!(service.reservas_del_dia(day("2024-02-05")).await.unwrap().len(), 0);
    assert_eq!(service.reservas_del_dia(day("2024-01-31")).await.unwrap().len(), 0);
}

#[tokio::test]
async fn manual_paid_state_survives_later_recomputation() {
    let (service, _) = setup().await;

    let mut payload = input("1", "2024-02-01", "2024-02-05");
    payload.sena = Some(100_000.0);
    let reserva = service.crear(payload).await.unwrap();
    assert_eq!(reserva.estado_pago, EstadoPago::Pendiente);

    let id = reserva.id.unwrap().to_string();
    let amended = service
        .actualizar_estado_pago(
            &id,
            EstadoPagoUpdate {
                estado_pago: EstadoPago::Pagado,
            },
        )
        .await
        .unwrap();
    // Still unbalanced, but the operator's word wins
    assert_eq!(amended.estado_pago, EstadoPago::Pagado);
    assert!(amended.estado_pago_manual);
    assert_eq!(amended.saldo_pendiente, 500_000.0);
    assert!(amended.updated_at >= amended.created_at);

    // An unrelated maintenance recompute must not revert it
    service.recomputar_todas().await.unwrap();
    let reloaded = service.obtener(&id).await.unwrap();
    assert_eq!(reloaded.estado_pago, EstadoPago::Pagado);
}

#[tokio::test]
async fn unknown_and_malformed_ids_are_not_found() {
    let (service, _) = setup().await;

    let err = service.obtener("reserva:inexistente").await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let err = service.obtener("producto:ajeno").await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let err = service
        .actualizar_estado_pago(
            "   ",
            EstadoPagoUpdate {
                estado_pago: EstadoPago::Pagado,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn list_is_paginated_newest_first() {
    let (service, _) = setup().await;

    for (cabana, inicio, fin) in [
        ("1", "2024-05-01", "2024-05-03"),
        ("2", "2024-05-01", "2024-05-03"),
        ("1", "2024-05-10", "2024-05-12"),
    ] {
        service.crear(input(cabana, inicio, fin)).await.unwrap();
        // created_at has millisecond resolution
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }

    let (page1, total) = service.listar(1, 2).await.unwrap();
    assert_eq!(total, 3);
    assert_eq!(page1.len(), 2);
    assert!(page1[0].created_at >= page1[1].created_at);

    let (page2, _) = service.listar(2, 2).await.unwrap();
    assert_eq!(page2.len(), 1);
    assert!(page1[1].created_at >= page2[0].created_at);
}

#[tokio::test]
async fn on_disk_database_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("manzanos.db");

    let created_id = {
        let db = DbService::new(&db_path).await.unwrap();
        let service = ReservaService::new(
            db.db,
            DolarService::fixed(1200.0),
            NotifierService::disabled(),
        );
        let reserva = service
            .crear(input("1", "2024-02-01", "2024-02-05"))
            .await
            .unwrap();
        reserva.id.unwrap().to_string()
    };

    let db = DbService::new(&db_path).await.unwrap();
    let service = ReservaService::new(
        db.db,
        DolarService::fixed(1200.0),
        NotifierService::disabled(),
    );
    let reloaded = service.obtener(&created_id).await.unwrap();
    assert_eq!(reloaded.numero_cabana, "1");
    assert_eq!(reloaded.cantidad_dias, 4);
}

#[tokio::test]
async fn migrate_repairs_inconsistent_derived_fields() {
    let (service, repo) = setup().await;

    let reserva = service
        .crear(input("1", "2024-02-01", "2024-02-05"))
        .await
        .unwrap();
    let rid = reserva.id.clone().unwrap();

    // Simulate a record written by an older version with stale derived fields
    let mut stale = reserva.clone();
    stale.cantidad_dias = 0;
    stale.saldo_pendiente = -1.0;
    repo.update(&rid, stale).await.unwrap();

    let actualizadas = service.recomputar_todas().await.unwrap();
    assert_eq!(actualizadas, 1);

    let reloaded = service.obtener(&rid.to_string()).await.unwrap();
    assert_eq!(reloaded.cantidad_dias, 4);
    assert_eq!(reloaded.saldo_pendiente, 600_000.0);
}
