use ce_backend::AppError;
use ce_backend::db::Store;
use ce_backend::db::models::NewProjectCycle;
use ce_backend::derive_cycle;
use ce_backend::services::CyclesService;
use ce_backend::validation::cycle::validate_create_cycle;
use chrono::Weekday;

use super::{d, setup};

#[test]
fn calculate_project_dates() {
    let dates = derive_cycle(d(2024, 10, 14), 52).unwrap();
    assert_eq!(dates.end_date, d(2025, 10, 10));
    assert_eq!(dates.next_start, d(2025, 10, 13));
    assert_eq!(dates.next_end, d(2026, 10, 9));
}

#[test]
fn validate_create_cycle_rules() {
    let ok = NewProjectCycle {
        sequence_number: 20,
        start_date: d(2025, 1, 6),
        end_date: None,
    };
    assert!(validate_create_cycle(&ok, Weekday::Mon).is_ok());

    let not_monday = NewProjectCycle {
        start_date: d(2025, 1, 7),
        ..ok.clone()
    };
    assert!(matches!(
        validate_create_cycle(&not_monday, Weekday::Mon),
        Err(AppError::InvalidCycleStart { .. })
    ));

    let backwards = NewProjectCycle {
        end_date: Some(d(2025, 1, 3)),
        ..ok.clone()
    };
    assert!(validate_create_cycle(&backwards, Weekday::Mon).is_err());

    let unnumbered = NewProjectCycle {
        sequence_number: 0,
        ..ok
    };
    assert!(validate_create_cycle(&unnumbered, Weekday::Mon).is_err());
}

#[test]
fn create_backfills_end_date() {
    let (store, _ctx, cycle) = setup();
    assert_eq!(cycle.end_date, d(2025, 10, 10));
    assert_eq!(store.get_cycle(cycle.id).unwrap(), Some(cycle));
}

#[test]
fn create_keeps_supplied_end_date() {
    let (mut store, ctx, _) = setup();
    let cycle = CyclesService::create(
        &mut store,
        &ctx,
        &NewProjectCycle {
            sequence_number: 20,
            start_date: d(2023, 10, 16),
            end_date: Some(d(2024, 10, 11)),
        },
    )
    .unwrap();
    assert_eq!(cycle.end_date, d(2024, 10, 11));
}

#[test]
fn invalid_start_creates_nothing() {
    let (mut store, ctx, _) = setup();
    let err = CyclesService::create(
        &mut store,
        &ctx,
        &NewProjectCycle {
            sequence_number: 22,
            start_date: d(2025, 10, 14),
            end_date: None,
        },
    )
    .unwrap_err();
    assert!(matches!(err, AppError::InvalidCycleStart { .. }));
    assert_eq!(CyclesService::list(&store, &ctx).unwrap().len(), 1);
}

#[test]
fn sequence_number_is_unique_per_scheme() {
    let (mut store, ctx, _) = setup();
    let err = CyclesService::create(
        &mut store,
        &ctx,
        &NewProjectCycle {
            sequence_number: 21,
            start_date: d(2025, 10, 13),
            end_date: None,
        },
    )
    .unwrap_err();
    assert_eq!(err.code(), "CYCLE_EXISTS");
}

#[test]
fn roll_over_starts_next_cycle() {
    let (mut store, ctx, cycle) = setup();
    let next = CyclesService::roll_over(&mut store, &ctx, cycle.id).unwrap();
    assert_eq!(next.sequence_number, 22);
    assert_eq!(next.start_date, d(2025, 10, 13));
    assert_eq!(next.end_date, d(2026, 10, 9));

    let numbers: Vec<i32> = CyclesService::list(&store, &ctx)
        .unwrap()
        .iter()
        .map(|c| c.sequence_number)
        .collect();
    assert_eq!(numbers, vec![21, 22]);
}

#[test]
fn current_cycle_tracks_scheme() {
    let (mut store, ctx, cycle) = setup();
    assert_eq!(CyclesService::current(&store, &ctx).unwrap().map(|c| c.id), Some(cycle.id));

    CyclesService::delete(&mut store, &ctx, cycle.id).unwrap();
    assert_eq!(CyclesService::current(&store, &ctx).unwrap(), None);
}
