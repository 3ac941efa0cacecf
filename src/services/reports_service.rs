use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::{
    db::Store,
    db::enums::SickKind,
    db::models::{EntitlementSummary, ProjectCycle},
    error::{AppError, AppResult},
    services::{
        context::RequestContext,
        cycles_service::CyclesService,
        ledger_service::{LedgerTotals, aggregate},
        load_cycle, load_department,
        summaries_service::{remaining_holiday, remaining_sick},
    },
};

#[derive(Debug, Clone, Default)]
pub struct ReportFilter {
    /// Defaults to the scheme's current cycle.
    pub cycle_id: Option<Uuid>,
    pub department_id: Option<Uuid>,
    /// Case-insensitive match on first or last name.
    pub search: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HolidayReportRow {
    pub participant_id: Uuid,
    pub name: String,
    pub department: Option<String>,
    pub summary: Option<EntitlementSummary>,
    pub ledger: LedgerTotals,
    pub remaining_holiday: Option<Decimal>,
    pub remaining_sick_cert: Option<Decimal>,
    pub remaining_sick_uncert: Option<Decimal>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HolidayReport {
    pub cycle: ProjectCycle,
    pub rows: Vec<HolidayReportRow>,
}

pub struct ReportsService;

impl ReportsService {
    pub fn holiday_report<S: Store>(
        store: &S,
        ctx: &RequestContext,
        filter: &ReportFilter,
    ) -> AppResult<HolidayReport> {
        let cycle = match filter.cycle_id {
            Some(cycle_id) => load_cycle(store, ctx, cycle_id)?,
            None => CyclesService::current(store, ctx)?.ok_or_else(|| {
                AppError::validation("No current project cycle is set for this scheme")
            })?,
        };
        if let Some(department_id) = filter.department_id {
            load_department(store, ctx, department_id)?;
        }

        let departments = store.list_departments(ctx.scheme_id)?;
        let search = filter
            .search
            .as_deref()
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty());

        let mut rows = Vec::new();
        for participant in store.list_participants(ctx.scheme_id)? {
            if filter.department_id.is_some() && participant.department_id != filter.department_id {
                continue;
            }
            if let Some(term) = &search {
                let matches = participant.first_name.to_lowercase().contains(term)
                    || participant.last_name.to_lowercase().contains(term);
                if !matches {
                    continue;
                }
            }

            let events = store.list_events(participant.id, cycle.id)?;
            let summary = store.get_summary(participant.id, cycle.id)?;
            rows.push(HolidayReportRow {
                participant_id: participant.id,
                name: participant.full_name(),
                department: participant.department_id.and_then(|id| {
                    departments
                        .iter()
                        .find(|d| d.id == id)
                        .map(|d| d.name.clone())
                }),
                ledger: aggregate(&events, participant.id, cycle.id)?,
                remaining_holiday: summary.as_ref().map(remaining_holiday).transpose()?,
                remaining_sick_cert: summary
                    .as_ref()
                    .map(|s| remaining_sick(s, SickKind::Certified))
                    .transpose()?,
                remaining_sick_uncert: summary
                    .as_ref()
                    .map(|s| remaining_sick(s, SickKind::Uncertified))
                    .transpose()?,
                summary,
            });
        }

        Ok(HolidayReport { cycle, rows })
    }
}
