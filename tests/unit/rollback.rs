use ce_backend::db::enums::LedgerKind;
use ce_backend::db::models::{
    Department, EntitlementSummary, LedgerEvent, NewLedgerEvent, Participant, ProjectCycle,
    Scheme, UpdateParticipantDatesRequest,
};
use ce_backend::db::{InMemoryStore, Store};
use ce_backend::services::{CyclesService, LedgerService, ParticipantsService};
use ce_backend::{AppError, AppResult};
use rust_decimal_macros::dec;
use uuid::Uuid;

use super::{d, participant_request, setup};

/// Delegates to an `InMemoryStore`. Once `summary_writes_left` reaches zero
/// the next summary write fails, then writes succeed again.
struct FailingSummaries {
    inner: InMemoryStore,
    summary_writes_left: Option<usize>,
}

impl FailingSummaries {
    fn new(inner: InMemoryStore) -> Self {
        Self {
            inner,
            summary_writes_left: None,
        }
    }

    fn fail_after(&mut self, writes: usize) {
        self.summary_writes_left = Some(writes);
    }
}

impl Store for FailingSummaries {
    fn get_scheme(&self, id: Uuid) -> AppResult<Option<Scheme>> {
        self.inner.get_scheme(id)
    }
    fn put_scheme(&mut self, scheme: Scheme) -> AppResult<Scheme> {
        self.inner.put_scheme(scheme)
    }
    fn count_schemes_with_app_code_prefix(&self, prefix: &str) -> AppResult<usize> {
        self.inner.count_schemes_with_app_code_prefix(prefix)
    }
    fn get_department(&self, id: Uuid) -> AppResult<Option<Department>> {
        self.inner.get_department(id)
    }
    fn list_departments(&self, scheme_id: Uuid) -> AppResult<Vec<Department>> {
        self.inner.list_departments(scheme_id)
    }
    fn put_department(&mut self, department: Department) -> AppResult<Department> {
        self.inner.put_department(department)
    }
    fn delete_department(&mut self, id: Uuid) -> AppResult<()> {
        self.inner.delete_department(id)
    }
    fn get_participant(&self, id: Uuid) -> AppResult<Option<Participant>> {
        self.inner.get_participant(id)
    }
    fn list_participants(&self, scheme_id: Uuid) -> AppResult<Vec<Participant>> {
        self.inner.list_participants(scheme_id)
    }
    fn put_participant(&mut self, participant: Participant) -> AppResult<Participant> {
        self.inner.put_participant(participant)
    }
    fn delete_participant(&mut self, id: Uuid) -> AppResult<()> {
        self.inner.delete_participant(id)
    }
    fn get_cycle(&self, id: Uuid) -> AppResult<Option<ProjectCycle>> {
        self.inner.get_cycle(id)
    }
    fn find_cycle_by_number(
        &self,
        scheme_id: Uuid,
        sequence_number: i32,
    ) -> AppResult<Option<ProjectCycle>> {
        self.inner.find_cycle_by_number(scheme_id, sequence_number)
    }
    fn list_cycles(&self, scheme_id: Uuid) -> AppResult<Vec<ProjectCycle>> {
        self.inner.list_cycles(scheme_id)
    }
    fn put_cycle(&mut self, cycle: ProjectCycle) -> AppResult<ProjectCycle> {
        self.inner.put_cycle(cycle)
    }
    fn delete_cycle(&mut self, id: Uuid) -> AppResult<()> {
        self.inner.delete_cycle(id)
    }
    fn get_summary(
        &self,
        participant_id: Uuid,
        cycle_id: Uuid,
    ) -> AppResult<Option<EntitlementSummary>> {
        self.inner.get_summary(participant_id, cycle_id)
    }
    fn put_summary(&mut self, summary: EntitlementSummary) -> AppResult<EntitlementSummary> {
        match self.summary_writes_left {
            Some(0) => {
                self.summary_writes_left = None;
                Err(AppError::Store("down".into()))
            }
            Some(left) => {
                self.summary_writes_left = Some(left - 1);
                self.inner.put_summary(summary)
            }
            None => self.inner.put_summary(summary),
        }
    }
    fn list_summaries_for_participant(
        &self,
        participant_id: Uuid,
    ) -> AppResult<Vec<EntitlementSummary>> {
        self.inner.list_summaries_for_participant(participant_id)
    }
    fn delete_summary(&mut self, participant_id: Uuid, cycle_id: Uuid) -> AppResult<()> {
        self.inner.delete_summary(participant_id, cycle_id)
    }
    fn list_events(&self, participant_id: Uuid, cycle_id: Uuid) -> AppResult<Vec<LedgerEvent>> {
        self.inner.list_events(participant_id, cycle_id)
    }
    fn put_event(&mut self, event: LedgerEvent) -> AppResult<LedgerEvent> {
        self.inner.put_event(event)
    }
    fn delete_event(&mut self, id: Uuid) -> AppResult<()> {
        self.inner.delete_event(id)
    }
}

#[test]
fn failed_record_keeps_no_event() {
    let (store, ctx, cycle) = setup();
    let mut store = FailingSummaries::new(store);
    let created = ParticipantsService::create(
        &mut store,
        &ctx,
        &participant_request("1234567A", d(2024, 10, 14), None),
    )
    .unwrap();
    let pid = created.participant.id;

    store.fail_after(0);
    let err = LedgerService::record(
        &mut store,
        &ctx,
        &NewLedgerEvent {
            participant_id: pid,
            cycle_id: cycle.id,
            date: d(2024, 11, 4),
            hours: dec!(-8),
            kind: LedgerKind::TakeHours,
            note: String::new(),
        },
    )
    .unwrap_err();

    assert_eq!(err, AppError::Store("down".into()));
    assert_eq!(store.inner.event_count(), 0);
    assert_eq!(store.get_summary(pid, cycle.id).unwrap(), created.summary);
}

#[test]
fn failed_create_keeps_no_participant() {
    let (store, ctx, _) = setup();
    let mut store = FailingSummaries::new(store);
    store.fail_after(0);

    let err = ParticipantsService::create(
        &mut store,
        &ctx,
        &participant_request("1234567A", d(2024, 10, 14), None),
    )
    .unwrap_err();

    assert_eq!(err, AppError::Store("down".into()));
    assert!(ParticipantsService::list(&store, &ctx).unwrap().is_empty());
    assert_eq!(store.inner.summary_count(), 0);
}

#[test]
fn failed_date_change_restores_everything() {
    let (store, ctx, cycle) = setup();
    let mut store = FailingSummaries::new(store);
    let created = ParticipantsService::create(
        &mut store,
        &ctx,
        &participant_request("1234567A", d(2024, 10, 14), Some(d(2024, 12, 16))),
    )
    .unwrap();
    let pid = created.participant.id;
    let next = CyclesService::roll_over(&mut store, &ctx, cycle.id).unwrap();
    CyclesService::set_current(&mut store, &ctx, next.id).unwrap();

    // the first cycle's summary is rewritten, the second write fails
    store.fail_after(1);
    let err = ParticipantsService::update_dates(
        &mut store,
        &ctx,
        pid,
        &UpdateParticipantDatesRequest {
            active_start: d(2024, 10, 14),
            active_end: None,
            manual_handling_date: Some(d(2024, 11, 1)),
        },
    )
    .unwrap_err();

    assert_eq!(err, AppError::Store("down".into()));
    assert_eq!(store.get_participant(pid).unwrap(), Some(created.participant));
    assert_eq!(store.get_summary(pid, cycle.id).unwrap(), created.summary);
    assert!(store.get_summary(pid, next.id).unwrap().is_none());
}
