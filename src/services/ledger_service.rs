use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::{
    db::Store,
    db::enums::LedgerKind,
    db::models::{EntitlementSummary, LedgerEvent, NewLedgerEvent},
    error::{AppError, AppResult},
    services::{
        context::RequestContext, load_cycle, load_participant,
        summaries_service::SummariesService,
    },
    utils::zero_hours,
    validation::ledger::{validate_event_hours, validate_new_event},
};

/// Signed hour totals per ledger kind for one participant and cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerTotals {
    pub take_hours: Decimal,
    pub add_hours: Decimal,
    pub sick_cert: Decimal,
    pub sick_uncert: Decimal,
    pub other: Decimal,
}

impl Default for LedgerTotals {
    fn default() -> Self {
        Self {
            take_hours: zero_hours(),
            add_hours: zero_hours(),
            sick_cert: zero_hours(),
            sick_uncert: zero_hours(),
            other: zero_hours(),
        }
    }
}

impl LedgerTotals {
    pub fn get(&self, kind: LedgerKind) -> Decimal {
        match kind {
            LedgerKind::TakeHours => self.take_hours,
            LedgerKind::AddHours => self.add_hours,
            LedgerKind::SickCert => self.sick_cert,
            LedgerKind::SickUncert => self.sick_uncert,
            LedgerKind::Other => self.other,
        }
    }

    fn bucket_mut(&mut self, kind: LedgerKind) -> &mut Decimal {
        match kind {
            LedgerKind::TakeHours => &mut self.take_hours,
            LedgerKind::AddHours => &mut self.add_hours,
            LedgerKind::SickCert => &mut self.sick_cert,
            LedgerKind::SickUncert => &mut self.sick_uncert,
            LedgerKind::Other => &mut self.other,
        }
    }

    /// Fails with `Internal` rather than panicking when a bucket overflows.
    pub fn add(&mut self, kind: LedgerKind, hours: Decimal) -> AppResult<()> {
        let bucket = self.bucket_mut(kind);
        *bucket = bucket
            .checked_add(hours)
            .ok_or_else(|| AppError::internal(format!("{} ledger total overflowed", kind)))?;
        Ok(())
    }

    /// Hours used from a consumption bucket. Consumption is recorded
    /// negative; a net credit (over-correction) counts as nothing used.
    pub fn consumed(&self, kind: LedgerKind) -> Decimal {
        (-self.get(kind)).max(zero_hours())
    }

    /// Hours credited to a credit bucket, never below zero.
    pub fn credited(&self, kind: LedgerKind) -> Decimal {
        self.get(kind).max(zero_hours())
    }

    pub fn to_map(&self) -> BTreeMap<LedgerKind, Decimal> {
        LedgerKind::ALL
            .iter()
            .map(|kind| (*kind, self.get(*kind)))
            .collect()
    }
}

/// Sums the hours of the events belonging to `participant_id` and
/// `cycle_id`, grouped by kind. Events for other pairs are ignored.
pub fn aggregate<'a, I>(events: I, participant_id: Uuid, cycle_id: Uuid) -> AppResult<LedgerTotals>
where
    I: IntoIterator<Item = &'a LedgerEvent>,
{
    let mut totals = LedgerTotals::default();
    for e in events
        .into_iter()
        .filter(|e| e.participant_id == participant_id && e.cycle_id == cycle_id)
    {
        totals.add(e.kind, e.hours)?;
    }
    Ok(totals)
}

pub fn aggregate_ledger(
    events: &[LedgerEvent],
    participant_id: Uuid,
    cycle_id: Uuid,
) -> AppResult<BTreeMap<LedgerKind, Decimal>> {
    Ok(aggregate(events, participant_id, cycle_id)?.to_map())
}

/// `aggregate` for events that did not come through `LedgerService::record`,
/// such as an imported file. Each matching event must pass the same hour
/// rules as a newly recorded one.
pub fn aggregate_checked(
    events: &[LedgerEvent],
    participant_id: Uuid,
    cycle_id: Uuid,
) -> AppResult<LedgerTotals> {
    for e in events
        .iter()
        .filter(|e| e.participant_id == participant_id && e.cycle_id == cycle_id)
    {
        validate_event_hours(e.hours)?;
    }
    aggregate(events, participant_id, cycle_id)
}

#[derive(Debug, Clone, Serialize)]
pub struct RecordedEvent {
    pub event: LedgerEvent,
    pub summary: EntitlementSummary,
}

pub struct LedgerService;

impl LedgerService {
    /// Validates and stores one event, then refreshes the ledger side of the
    /// participant's summary for that cycle.
    pub fn record<S: Store>(
        store: &mut S,
        ctx: &RequestContext,
        req: &NewLedgerEvent,
    ) -> AppResult<RecordedEvent> {
        validate_new_event(req)?;
        let participant = load_participant(store, ctx, req.participant_id)?;
        let cycle = load_cycle(store, ctx, req.cycle_id)?;

        if !cycle.interval().contains(req.date) {
            warn!(
                participant_id = %participant.id,
                cycle_id = %cycle.id,
                date = %req.date,
                "Ledger event dated outside its project cycle"
            );
        }

        let event = LedgerEvent {
            id: Uuid::new_v4(),
            participant_id: participant.id,
            cycle_id: cycle.id,
            date: req.date,
            hours: req.hours,
            kind: req.kind,
            note: req.note.trim().to_string(),
            created_at: chrono::Utc::now(),
        };

        // The summary is computed against the ledger as it will be, before
        // anything is written.
        let mut events = store.list_events(participant.id, cycle.id)?;
        events.push(event.clone());
        let summary = SummariesService::with_ledger(
            store,
            &ctx.policies.entitlement,
            &participant,
            &cycle,
            &events,
        )?;

        let event = store.put_event(event)?;
        let summary = match store.put_summary(summary) {
            Ok(summary) => summary,
            Err(e) => {
                if let Err(undo) = store.delete_event(event.id) {
                    error!(event_id = %event.id, error = %undo, "Failed to undo ledger event");
                }
                return Err(e);
            }
        };

        info!(
            event_id = %event.id,
            participant_id = %participant.id,
            cycle_id = %cycle.id,
            user_id = ?ctx.user_id,
            kind = %event.kind,
            hours = %event.hours,
            "Ledger event recorded"
        );
        Ok(RecordedEvent { event, summary })
    }

    pub fn list<S: Store>(
        store: &S,
        ctx: &RequestContext,
        participant_id: Uuid,
        cycle_id: Uuid,
    ) -> AppResult<Vec<LedgerEvent>> {
        let participant = load_participant(store, ctx, participant_id)?;
        let cycle = load_cycle(store, ctx, cycle_id)?;
        let mut events = store.list_events(participant.id, cycle.id)?;
        events.sort_by(|a, b| (a.date, a.created_at).cmp(&(b.date, b.created_at)));
        Ok(events)
    }

    pub fn totals<S: Store>(
        store: &S,
        ctx: &RequestContext,
        participant_id: Uuid,
        cycle_id: Uuid,
    ) -> AppResult<LedgerTotals> {
        let events = Self::list(store, ctx, participant_id, cycle_id)?;
        aggregate(&events, participant_id, cycle_id)
    }
}
