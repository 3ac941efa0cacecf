use rust_decimal::Decimal;
use tracing::{debug, info};
use uuid::Uuid;

use crate::{
    db::Store,
    db::enums::{LedgerKind, SickKind},
    db::models::{EntitlementSummary, LedgerEvent, Participant, ProjectCycle},
    error::{AppError, AppResult},
    services::{
        context::RequestContext,
        entitlement_service::{Entitlement, EntitlementPolicy},
        ledger_service::{LedgerTotals, aggregate},
        load_cycle, load_participant,
    },
    utils::zero_hours,
};

/// `(entitled + in lieu) - taken`. Negative when over-drawn.
pub fn remaining_holiday(summary: &EntitlementSummary) -> AppResult<Decimal> {
    summary
        .holiday_hours_entitled
        .checked_add(summary.holiday_hours_in_lieu)
        .and_then(|available| available.checked_sub(summary.holiday_hours_taken))
        .ok_or_else(|| AppError::internal("Remaining holiday hours overflowed"))
}

/// `entitled - taken` for one sick-leave kind. Negative when over-drawn.
pub fn remaining_sick(summary: &EntitlementSummary, kind: SickKind) -> AppResult<Decimal> {
    let (entitled, taken) = match kind {
        SickKind::Certified => (summary.sick_cert_hours_entitled, summary.sick_cert_hours_taken),
        SickKind::Uncertified => (
            summary.sick_uncert_hours_entitled,
            summary.sick_uncert_hours_taken,
        ),
    };
    entitled
        .checked_sub(taken)
        .ok_or_else(|| AppError::internal(format!("Remaining {} hours overflowed", kind.ledger_kind())))
}

fn new_summary(participant_id: Uuid, cycle_id: Uuid, entitlement: &Entitlement) -> EntitlementSummary {
    EntitlementSummary {
        participant_id,
        cycle_id,
        weeks_active: entitlement.weeks_active,
        holiday_hours_entitled: entitlement.holiday_hours,
        holiday_hours_taken: zero_hours(),
        holiday_hours_in_lieu: zero_hours(),
        sick_cert_hours_entitled: entitlement.sick_cert_hours,
        sick_cert_hours_taken: zero_hours(),
        sick_uncert_hours_entitled: entitlement.sick_uncert_hours,
        sick_uncert_hours_taken: zero_hours(),
        updated_at: chrono::Utc::now(),
    }
}

/// Overwrites the derived fields only.
fn apply_entitlement(summary: &mut EntitlementSummary, entitlement: &Entitlement) {
    summary.weeks_active = entitlement.weeks_active;
    summary.holiday_hours_entitled = entitlement.holiday_hours;
    summary.sick_cert_hours_entitled = entitlement.sick_cert_hours;
    summary.sick_uncert_hours_entitled = entitlement.sick_uncert_hours;
    summary.updated_at = chrono::Utc::now();
}

/// Overwrites the ledger-mirrored fields only.
fn apply_ledger(summary: &mut EntitlementSummary, totals: &LedgerTotals) {
    summary.holiday_hours_taken = totals.consumed(LedgerKind::TakeHours);
    summary.holiday_hours_in_lieu = totals.credited(LedgerKind::AddHours);
    summary.sick_cert_hours_taken = totals.consumed(LedgerKind::SickCert);
    summary.sick_uncert_hours_taken = totals.consumed(LedgerKind::SickUncert);
    summary.updated_at = chrono::Utc::now();
}

pub struct SummariesService;

impl SummariesService {
    pub fn get<S: Store>(
        store: &S,
        ctx: &RequestContext,
        participant_id: Uuid,
        cycle_id: Uuid,
    ) -> AppResult<Option<EntitlementSummary>> {
        let participant = load_participant(store, ctx, participant_id)?;
        let cycle = load_cycle(store, ctx, cycle_id)?;
        store.get_summary(participant.id, cycle.id)
    }

    /// Recomputes the entitlement of a participant for a cycle and persists
    /// it, creating the summary on first use. Ledger fields are left as they
    /// are. Fails with `MissingParticipant` / `MissingCycle` before any write.
    pub fn reconcile<S: Store>(
        store: &mut S,
        ctx: &RequestContext,
        participant_id: Uuid,
        cycle_id: Uuid,
    ) -> AppResult<EntitlementSummary> {
        let participant = load_participant(store, ctx, participant_id)?;
        let cycle = load_cycle(store, ctx, cycle_id)?;
        Self::reconcile_with(store, &ctx.policies.entitlement, &participant, &cycle)
    }

    /// Entitlement-only refresh for already loaded entities. One write.
    pub fn reconcile_with<S: Store>(
        store: &mut S,
        policy: &EntitlementPolicy,
        participant: &Participant,
        cycle: &ProjectCycle,
    ) -> AppResult<EntitlementSummary> {
        let (summary, created) = Self::reconciled(store, policy, participant, cycle)?;
        let saved = store.put_summary(summary)?;

        info!(
            participant_id = %participant.id,
            cycle_id = %cycle.id,
            weeks_active = saved.weeks_active,
            holiday_hours = %saved.holiday_hours_entitled,
            sick_cert_hours = %saved.sick_cert_hours_entitled,
            sick_uncert_hours = %saved.sick_uncert_hours_entitled,
            created,
            "Entitlement reconciled"
        );
        Ok(saved)
    }

    /// The summary `reconcile_with` would write, and whether it is new.
    pub(crate) fn reconciled<S: Store>(
        store: &S,
        policy: &EntitlementPolicy,
        participant: &Participant,
        cycle: &ProjectCycle,
    ) -> AppResult<(EntitlementSummary, bool)> {
        let entitlement = policy.compute(participant, cycle);
        Ok(match store.get_summary(participant.id, cycle.id)? {
            Some(mut existing) => {
                apply_entitlement(&mut existing, &entitlement);
                (existing, false)
            }
            None => (new_summary(participant.id, cycle.id, &entitlement), true),
        })
    }

    /// Re-aggregates the ledger of a participant for a cycle into the
    /// summary's taken / in-lieu fields. Entitled fields are left as they are;
    /// a missing summary is created with freshly computed entitlement.
    pub fn refresh_ledger<S: Store>(
        store: &mut S,
        ctx: &RequestContext,
        participant_id: Uuid,
        cycle_id: Uuid,
    ) -> AppResult<EntitlementSummary> {
        let participant = load_participant(store, ctx, participant_id)?;
        let cycle = load_cycle(store, ctx, cycle_id)?;
        Self::refresh_ledger_with(store, &ctx.policies.entitlement, &participant, &cycle)
    }

    pub fn refresh_ledger_with<S: Store>(
        store: &mut S,
        policy: &EntitlementPolicy,
        participant: &Participant,
        cycle: &ProjectCycle,
    ) -> AppResult<EntitlementSummary> {
        let events = store.list_events(participant.id, cycle.id)?;
        let summary = Self::with_ledger(store, policy, participant, cycle, &events)?;
        let saved = store.put_summary(summary)?;

        debug!(
            participant_id = %participant.id,
            cycle_id = %cycle.id,
            events = events.len(),
            holiday_hours_taken = %saved.holiday_hours_taken,
            holiday_hours_in_lieu = %saved.holiday_hours_in_lieu,
            "Ledger totals refreshed"
        );
        Ok(saved)
    }

    /// The stored summary with its ledger fields taken from `events`. Nothing
    /// is written.
    pub(crate) fn with_ledger<S: Store>(
        store: &S,
        policy: &EntitlementPolicy,
        participant: &Participant,
        cycle: &ProjectCycle,
        events: &[LedgerEvent],
    ) -> AppResult<EntitlementSummary> {
        let totals = aggregate(events, participant.id, cycle.id)?;
        let mut summary = match store.get_summary(participant.id, cycle.id)? {
            Some(existing) => existing,
            None => new_summary(participant.id, cycle.id, &policy.compute(participant, cycle)),
        };
        apply_ledger(&mut summary, &totals);
        Ok(summary)
    }
}
