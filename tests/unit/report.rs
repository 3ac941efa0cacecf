use ce_backend::AppError;
use ce_backend::db::enums::LedgerKind;
use ce_backend::db::models::NewLedgerEvent;
use ce_backend::services::reports_service::ReportFilter;
use ce_backend::services::{
    CyclesService, DepartmentsService, LedgerService, ParticipantsService, ReportsService,
};
use rust_decimal_macros::dec;

use super::{d, named_participant_request, setup};

#[test]
fn filters_by_department_and_name() {
    let (mut store, ctx, cycle) = setup();
    let departments = DepartmentsService::list(&store, &ctx).unwrap();
    let (office, outdoor) = (departments[0].clone(), departments[1].clone());
    assert_eq!(office.name, "Office");

    let start = d(2024, 10, 14);
    let mut mary = named_participant_request("1111111A", "Mary", "Murphy", start, None);
    mary.department_id = Some(office.id);
    let mut sean = named_participant_request("2222222B", "Sean", "Walsh", start, None);
    sean.department_id = Some(outdoor.id);
    let aoife = named_participant_request("3333333C", "Aoife", "Murray", start, None);
    let mary_id = ParticipantsService::create(&mut store, &ctx, &mary)
        .unwrap()
        .participant
        .id;
    ParticipantsService::create(&mut store, &ctx, &sean).unwrap();
    ParticipantsService::create(&mut store, &ctx, &aoife).unwrap();

    LedgerService::record(
        &mut store,
        &ctx,
        &NewLedgerEvent {
            participant_id: mary_id,
            cycle_id: cycle.id,
            date: d(2024, 12, 23),
            hours: dec!(-7.5),
            kind: LedgerKind::TakeHours,
            note: "Christmas".into(),
        },
    )
    .unwrap();

    let all = ReportsService::holiday_report(&store, &ctx, &ReportFilter::default()).unwrap();
    assert_eq!(all.cycle.id, cycle.id);
    assert_eq!(all.rows.len(), 3);

    let office_only = ReportsService::holiday_report(
        &store,
        &ctx,
        &ReportFilter {
            department_id: Some(office.id),
            ..ReportFilter::default()
        },
    )
    .unwrap();
    assert_eq!(office_only.rows.len(), 1);
    let row = &office_only.rows[0];
    assert_eq!(row.name, "Mary Murphy");
    assert_eq!(row.department.as_deref(), Some("Office"));
    assert_eq!(row.ledger.take_hours, dec!(-7.5));
    assert_eq!(row.remaining_holiday, Some(dec!(73.62)));

    let search = ReportsService::holiday_report(
        &store,
        &ctx,
        &ReportFilter {
            search: Some(" MUR ".into()),
            ..ReportFilter::default()
        },
    )
    .unwrap();
    let names: Vec<&str> = search.rows.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Mary Murphy", "Aoife Murray"]);
}

#[test]
fn rows_without_summary_have_no_balances() {
    let (mut store, ctx, cycle) = setup();
    ParticipantsService::create(
        &mut store,
        &ctx,
        &named_participant_request("1111111A", "Mary", "Murphy", d(2024, 10, 14), None),
    )
    .unwrap();
    let next = CyclesService::roll_over(&mut store, &ctx, cycle.id).unwrap();

    let report = ReportsService::holiday_report(
        &store,
        &ctx,
        &ReportFilter {
            cycle_id: Some(next.id),
            ..ReportFilter::default()
        },
    )
    .unwrap();
    assert_eq!(report.rows.len(), 1);
    assert!(report.rows[0].summary.is_none());
    assert_eq!(report.rows[0].remaining_holiday, None);
}

#[test]
fn needs_a_cycle() {
    let (mut store, ctx, cycle) = setup();
    CyclesService::delete(&mut store, &ctx, cycle.id).unwrap();
    let err = ReportsService::holiday_report(&store, &ctx, &ReportFilter::default()).unwrap_err();
    assert!(matches!(err, AppError::Validation { .. }));

    let err = ReportsService::holiday_report(
        &store,
        &ctx,
        &ReportFilter {
            cycle_id: Some(cycle.id),
            ..ReportFilter::default()
        },
    )
    .unwrap_err();
    assert_eq!(err, AppError::MissingCycle { id: cycle.id });
}
