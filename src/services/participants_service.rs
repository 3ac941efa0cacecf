use tracing::{error, info, warn};
use uuid::Uuid;

use crate::{
    db::Store,
    db::models::{
        CreateParticipantRequest, EntitlementSummary, Participant, UpdateParticipantDatesRequest,
    },
    error::{AppError, AppResult},
    services::{
        context::RequestContext, cycles_service::CyclesService, load_cycle, load_department,
        load_participant, load_scheme, summaries_service::SummariesService,
    },
    validation::participant::{
        StartPlacement, validate_active_dates, validate_create_participant,
        validate_participant_start,
    },
    validation::rules::normalize_iban,
};

#[derive(Debug, Clone)]
pub struct CreatedParticipant {
    pub participant: Participant,
    /// `None` when the scheme has no current cycle.
    pub placement: Option<StartPlacement>,
    pub summary: Option<EntitlementSummary>,
}

pub struct ParticipantsService;

impl ParticipantsService {
    pub fn list<S: Store>(store: &S, ctx: &RequestContext) -> AppResult<Vec<Participant>> {
        store.list_participants(ctx.scheme_id)
    }

    pub fn get_by_id<S: Store>(
        store: &S,
        ctx: &RequestContext,
        participant_id: Uuid,
    ) -> AppResult<Participant> {
        load_participant(store, ctx, participant_id)
    }

    /// Validates and stores a participant, then reconciles their entitlement
    /// for the scheme's current cycle.
    pub fn create<S: Store>(
        store: &mut S,
        ctx: &RequestContext,
        req: &CreateParticipantRequest,
    ) -> AppResult<CreatedParticipant> {
        validate_create_participant(req, ctx.today)?;
        let scheme = load_scheme(store, ctx)?;

        if let Some(department_id) = req.department_id {
            if scheme.departments_disabled {
                return Err(AppError::validation("Departments are disabled for this scheme"));
            }
            load_department(store, ctx, department_id)?;
        }

        let current_cycle = CyclesService::current(store, ctx)?;
        let placement = match &current_cycle {
            Some(cycle) => Some(validate_participant_start(
                req.active_start,
                cycle,
                &ctx.policies.cycle,
            )?),
            None => None,
        };

        let participant = Participant {
            id: Uuid::new_v4(),
            scheme_id: scheme.id,
            department_id: req.department_id,
            ppsn: req.ppsn.trim().to_string(),
            first_name: req.first_name.trim().to_string(),
            last_name: req.last_name.trim().to_string(),
            birth_date: req.birth_date,
            address: req.address.trim().to_string(),
            phone: non_empty(&req.phone),
            email: req.email.trim().to_string(),
            emerg_phone: non_empty(&req.emerg_phone),
            bank_iban: normalize_iban(&req.bank_iban),
            active_start: req.active_start,
            active_end: req.active_end,
            manual_handling_date: req.manual_handling_date,
            created_at: chrono::Utc::now(),
        };
        let summary = match &current_cycle {
            Some(cycle) => Some(
                SummariesService::reconciled(store, &ctx.policies.entitlement, &participant, cycle)?.0,
            ),
            None => None,
        };

        let participant = store.put_participant(participant)?;
        let summary = match summary.map(|s| store.put_summary(s)).transpose() {
            Ok(summary) => summary,
            Err(e) => {
                if let Err(undo) = store.delete_participant(participant.id) {
                    error!(participant_id = %participant.id, error = %undo, "Failed to undo participant");
                }
                return Err(e);
            }
        };

        if placement == Some(StartPlacement::NextCycle) {
            warn!(
                participant_id = %participant.id,
                active_start = %participant.active_start,
                "Participant starts in the next project cycle"
            );
        }
        info!(
            scheme_id = %scheme.id,
            participant_id = %participant.id,
            user_id = ?ctx.user_id,
            weeks_active = summary.as_ref().map(|s| s.weeks_active),
            "Participant created"
        );

        Ok(CreatedParticipant {
            participant,
            placement,
            summary,
        })
    }

    /// Stores new scheme dates and recomputes entitlement for every cycle the
    /// participant already has a summary for, plus the current cycle. On a
    /// failed write the participant row and every summary already written are
    /// put back.
    pub fn update_dates<S: Store>(
        store: &mut S,
        ctx: &RequestContext,
        participant_id: Uuid,
        req: &UpdateParticipantDatesRequest,
    ) -> AppResult<Vec<EntitlementSummary>> {
        validate_active_dates(req.active_start, req.active_end)?;
        let previous = load_participant(store, ctx, participant_id)?;

        let mut cycle_ids: Vec<Uuid> = store
            .list_summaries_for_participant(previous.id)?
            .into_iter()
            .map(|s| s.cycle_id)
            .collect();
        if let Some(current) = CyclesService::current(store, ctx)? {
            if !cycle_ids.contains(&current.id) {
                cycle_ids.push(current.id);
            }
        }
        let mut cycles = cycle_ids
            .into_iter()
            .map(|id| load_cycle(store, ctx, id))
            .collect::<AppResult<Vec<_>>>()?;
        cycles.sort_by_key(|c| c.sequence_number);

        let mut participant = previous.clone();
        participant.active_start = req.active_start;
        participant.active_end = req.active_end;
        participant.manual_handling_date = req.manual_handling_date;

        let mut pending = Vec::with_capacity(cycles.len());
        for cycle in &cycles {
            let prior = store.get_summary(participant.id, cycle.id)?;
            let (summary, _) =
                SummariesService::reconciled(store, &ctx.policies.entitlement, &participant, cycle)?;
            pending.push((prior, summary));
        }

        let participant = store.put_participant(participant)?;
        let mut summaries = Vec::with_capacity(pending.len());
        for (written, (_, summary)) in pending.iter().enumerate() {
            match store.put_summary(summary.clone()) {
                Ok(saved) => summaries.push(saved),
                Err(e) => {
                    Self::restore(store, &previous, &pending[..written]);
                    return Err(e);
                }
            }
        }

        info!(
            participant_id = %participant.id,
            user_id = ?ctx.user_id,
            active_start = %participant.active_start,
            active_end = ?participant.active_end,
            cycles = cycles.len(),
            "Participant dates updated"
        );
        Ok(summaries)
    }

    fn restore<S: Store>(
        store: &mut S,
        previous: &Participant,
        written: &[(Option<EntitlementSummary>, EntitlementSummary)],
    ) {
        let mut failures = Vec::new();
        if let Err(e) = store.put_participant(previous.clone()) {
            failures.push(e);
        }
        for (prior, summary) in written {
            let undone = match prior {
                Some(prior) => store.put_summary(prior.clone()).map(|_| ()),
                None => store.delete_summary(summary.participant_id, summary.cycle_id),
            };
            if let Err(e) = undone {
                failures.push(e);
            }
        }
        for e in failures {
            error!(participant_id = %previous.id, error = %e, "Failed to restore participant dates");
        }
    }

    pub fn assign_department<S: Store>(
        store: &mut S,
        ctx: &RequestContext,
        participant_id: Uuid,
        department_id: Option<Uuid>,
    ) -> AppResult<Participant> {
        let mut participant = load_participant(store, ctx, participant_id)?;
        if let Some(department_id) = department_id {
            load_department(store, ctx, department_id)?;
        }
        participant.department_id = department_id;
        store.put_participant(participant)
    }

    /// Removes the participant with their summaries and ledger events.
    pub fn delete<S: Store>(
        store: &mut S,
        ctx: &RequestContext,
        participant_id: Uuid,
    ) -> AppResult<()> {
        let _existing = load_participant(store, ctx, participant_id)?;
        store.delete_participant(participant_id)?;
        info!(scheme_id = %ctx.scheme_id, participant_id = %participant_id, user_id = ?ctx.user_id, "Participant deleted");
        Ok(())
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
