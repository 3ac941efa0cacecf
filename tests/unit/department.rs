use ce_backend::AppError;
use ce_backend::db::InMemoryStore;
use ce_backend::services::{
    DepartmentsService, ParticipantsService, Policies, RequestContext, SchemesService,
};

use super::{d, participant_request, scheme_request, setup};

#[test]
fn create_rename_delete() {
    let (mut store, ctx, _) = setup();
    let stores = DepartmentsService::create(&mut store, &ctx, "Stores").unwrap();
    assert_eq!(DepartmentsService::list(&store, &ctx).unwrap().len(), 3);

    let renamed = DepartmentsService::rename(&mut store, &ctx, stores.id, " Workshop ").unwrap();
    assert_eq!(renamed.name, "Workshop");

    DepartmentsService::delete(&mut store, &ctx, stores.id).unwrap();
    let names: Vec<String> = DepartmentsService::list(&store, &ctx)
        .unwrap()
        .into_iter()
        .map(|d| d.name)
        .collect();
    assert_eq!(names, vec!["Office", "Outdoor"]);
}

#[test]
fn names_unique_ignoring_case() {
    let (mut store, ctx, _) = setup();
    let err = DepartmentsService::create(&mut store, &ctx, "OFFICE").unwrap_err();
    assert_eq!(err.code(), "DEPARTMENT_EXISTS");
    assert!(DepartmentsService::create(&mut store, &ctx, "  ").is_err());
}

#[test]
fn disabled_scheme_has_no_departments() {
    let mut store = InMemoryStore::new();
    let mut req = scheme_request("DSP777", &[]);
    req.departments_disabled = true;
    let scheme = SchemesService::create(&mut store, &req).unwrap();
    let ctx = RequestContext::new(scheme.scheme.id, Policies::default());

    let err = DepartmentsService::create(&mut store, &ctx, "Office").unwrap_err();
    assert!(matches!(err, AppError::Validation { .. }));
}

#[test]
fn delete_detaches_participants() {
    let (mut store, ctx, _) = setup();
    let office = DepartmentsService::list(&store, &ctx).unwrap()[0].clone();
    let mut req = participant_request("1234567A", d(2024, 10, 14), None);
    req.department_id = Some(office.id);
    let pid = ParticipantsService::create(&mut store, &ctx, &req)
        .unwrap()
        .participant
        .id;

    DepartmentsService::delete(&mut store, &ctx, office.id).unwrap();
    let participant = ParticipantsService::get_by_id(&store, &ctx, pid).unwrap();
    assert_eq!(participant.department_id, None);
}
