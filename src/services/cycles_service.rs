use chrono::{Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::{
    db::Store,
    db::models::{NewProjectCycle, ProjectCycle, Scheme},
    error::{AppError, AppResult},
    services::{context::RequestContext, load_cycle, load_scheme},
    validation::cycle::{validate_create_cycle, validate_cycle_start},
};

pub const DEFAULT_CYCLE_WEEKS: u32 = 52;
/// A cycle stops on the Friday before its final Monday.
pub const CYCLE_TAIL_DAYS: u64 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CyclePolicy {
    pub weeks: u32,
    pub start_weekday: Weekday,
}

impl Default for CyclePolicy {
    fn default() -> Self {
        Self {
            weeks: DEFAULT_CYCLE_WEEKS,
            start_weekday: Weekday::Mon,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleDates {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub next_start: NaiveDate,
    pub next_end: NaiveDate,
}

impl CyclePolicy {
    /// `start + weeks * 7 days - 3 days`, without the weekday check.
    pub fn end_date(&self, start_date: NaiveDate) -> AppResult<NaiveDate> {
        if self.weeks == 0 {
            return Err(AppError::validation("A project cycle must last at least one week"));
        }
        start_date
            .checked_add_days(Days::new(u64::from(self.weeks) * 7))
            .and_then(|d| d.checked_sub_days(Days::new(CYCLE_TAIL_DAYS)))
            .ok_or_else(|| AppError::validation(format!("Project dates out of range from {}", start_date)))
    }

    pub fn derive(&self, start_date: NaiveDate) -> AppResult<CycleDates> {
        validate_cycle_start(start_date, self.start_weekday)?;

        let end_date = self.end_date(start_date)?;
        let next_start = end_date
            .checked_add_days(Days::new(CYCLE_TAIL_DAYS))
            .ok_or_else(|| AppError::validation("Next project start out of range"))?;
        let next_end = self.end_date(next_start)?;

        Ok(CycleDates {
            start_date,
            end_date,
            next_start,
            next_end,
        })
    }
}

/// Monday-anchored cycle dates for a cycle of `cycle_weeks` weeks.
pub fn derive_cycle(start_date: NaiveDate, cycle_weeks: u32) -> AppResult<CycleDates> {
    CyclePolicy {
        weeks: cycle_weeks,
        start_weekday: Weekday::Mon,
    }
    .derive(start_date)
}

pub struct CyclesService;

impl CyclesService {
    pub fn list<S: Store>(store: &S, ctx: &RequestContext) -> AppResult<Vec<ProjectCycle>> {
        store.list_cycles(ctx.scheme_id)
    }

    pub fn get_by_id<S: Store>(
        store: &S,
        ctx: &RequestContext,
        cycle_id: Uuid,
    ) -> AppResult<ProjectCycle> {
        load_cycle(store, ctx, cycle_id)
    }

    pub fn create<S: Store>(
        store: &mut S,
        ctx: &RequestContext,
        req: &NewProjectCycle,
    ) -> AppResult<ProjectCycle> {
        let policy = &ctx.policies.cycle;
        validate_create_cycle(req, policy.start_weekday)?;
        load_scheme(store, ctx)?;

        if store
            .find_cycle_by_number(ctx.scheme_id, req.sequence_number)?
            .is_some()
        {
            return Err(AppError::conflict_with_code(
                format!("Project {} already exists for this scheme", req.sequence_number),
                Some("sequence_number".into()),
                "CYCLE_EXISTS",
            ));
        }

        let end_date = match req.end_date {
            Some(end_date) => end_date,
            None => policy.derive(req.start_date)?.end_date,
        };

        let cycle = ProjectCycle {
            id: Uuid::new_v4(),
            scheme_id: ctx.scheme_id,
            sequence_number: req.sequence_number,
            start_date: req.start_date,
            end_date,
            created_at: chrono::Utc::now(),
        };
        let created = store.put_cycle(cycle)?;

        info!(
            scheme_id = %ctx.scheme_id,
            cycle_id = %created.id,
            user_id = ?ctx.user_id,
            sequence_number = created.sequence_number,
            start_date = %created.start_date,
            end_date = %created.end_date,
            derived_end = req.end_date.is_none(),
            "Project cycle created"
        );
        Ok(created)
    }

    /// Creates the cycle that follows `cycle_id`, numbered one higher and
    /// starting on the derived next start date.
    pub fn roll_over<S: Store>(
        store: &mut S,
        ctx: &RequestContext,
        cycle_id: Uuid,
    ) -> AppResult<ProjectCycle> {
        let current = load_cycle(store, ctx, cycle_id)?;
        let dates = ctx.policies.cycle.derive(current.start_date)?;

        Self::create(
            store,
            ctx,
            &NewProjectCycle {
                sequence_number: current.sequence_number + 1,
                start_date: dates.next_start,
                end_date: Some(dates.next_end),
            },
        )
    }

    pub fn set_current<S: Store>(
        store: &mut S,
        ctx: &RequestContext,
        cycle_id: Uuid,
    ) -> AppResult<Scheme> {
        let cycle = load_cycle(store, ctx, cycle_id)?;
        let mut scheme = load_scheme(store, ctx)?;
        scheme.current_cycle_id = Some(cycle.id);
        let updated = store.put_scheme(scheme)?;

        info!(scheme_id = %ctx.scheme_id, cycle_id = %cycle.id, user_id = ?ctx.user_id, "Current project cycle changed");
        Ok(updated)
    }

    /// The scheme's current cycle, `None` when no cycle has been selected yet.
    pub fn current<S: Store>(store: &S, ctx: &RequestContext) -> AppResult<Option<ProjectCycle>> {
        let scheme = load_scheme(store, ctx)?;
        match scheme.current_cycle_id {
            Some(cycle_id) => load_cycle(store, ctx, cycle_id).map(Some),
            None => Ok(None),
        }
    }

    pub fn delete<S: Store>(store: &mut S, ctx: &RequestContext, cycle_id: Uuid) -> AppResult<()> {
        let _existing = load_cycle(store, ctx, cycle_id)?;
        store.delete_cycle(cycle_id)?;
        info!(scheme_id = %ctx.scheme_id, cycle_id = %cycle_id, user_id = ?ctx.user_id, "Project cycle deleted");
        Ok(())
    }
}
