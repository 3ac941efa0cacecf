mod cycle;
mod department;
mod properties;
mod rollback;
mod report;

use ce_backend::db::InMemoryStore;
use ce_backend::db::enums::County;
use ce_backend::db::models::{
    CreateParticipantRequest, CreateSchemeRequest, NewProjectCycle, ProjectCycle,
};
use ce_backend::services::{CyclesService, Policies, RequestContext, SchemesService};
use chrono::NaiveDate;
use uuid::Uuid;

pub fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

pub fn scheme_request(gov_code: &str, departments: &[&str]) -> CreateSchemeRequest {
    CreateSchemeRequest {
        name: "Test CE Scheme".into(),
        gov_code: gov_code.into(),
        county: County::Kerry,
        address: "Main St, Killarney".into(),
        departments_disabled: false,
        new_departments: departments.iter().map(|s| s.to_string()).collect(),
    }
}

/// A Kerry scheme with project 21 (starting 2024-10-14) as its current cycle.
pub fn setup() -> (InMemoryStore, RequestContext, ProjectCycle) {
    let mut store = InMemoryStore::new();
    let created = SchemesService::create(&mut store, &scheme_request("DSP123", &["Office", "Outdoor"]))
        .unwrap();
    let ctx = RequestContext::new(created.scheme.id, Policies::default())
        .with_user(Uuid::new_v4())
        .on(d(2025, 1, 6));

    let cycle = CyclesService::create(
        &mut store,
        &ctx,
        &NewProjectCycle {
            sequence_number: 21,
            start_date: d(2024, 10, 14),
            end_date: None,
        },
    )
    .unwrap();
    CyclesService::set_current(&mut store, &ctx, cycle.id).unwrap();

    (store, ctx, cycle)
}

pub fn participant_request(
    ppsn: &str,
    active_start: NaiveDate,
    active_end: Option<NaiveDate>,
) -> CreateParticipantRequest {
    named_participant_request(ppsn, "John", "Doe", active_start, active_end)
}

/// Email and IBAN are derived from the PPS number so each request is unique.
pub fn named_participant_request(
    ppsn: &str,
    first_name: &str,
    last_name: &str,
    active_start: NaiveDate,
    active_end: Option<NaiveDate>,
) -> CreateParticipantRequest {
    CreateParticipantRequest {
        ppsn: ppsn.into(),
        first_name: first_name.into(),
        last_name: last_name.into(),
        department_id: None,
        birth_date: d(1990, 1, 1),
        address: "123 Main St".into(),
        phone: Some("012345678".into()),
        email: format!("{}@example.com", ppsn.to_lowercase()),
        emerg_phone: Some("0876543210".into()),
        bank_iban: format!("IE29 AIBK 9311 521{}", &ppsn[..7]),
        active_start,
        active_end,
        manual_handling_date: None,
    }
}
