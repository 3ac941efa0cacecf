pub mod context;
pub mod cycles_service;
pub mod departments_service;
pub mod entitlement_service;
pub mod ledger_service;
pub mod participants_service;
pub mod reports_service;
pub mod schemes_service;
pub mod summaries_service;

pub use context::{Policies, RequestContext};
pub use cycles_service::CyclesService;
pub use departments_service::DepartmentsService;
pub use ledger_service::LedgerService;
pub use participants_service::ParticipantsService;
pub use reports_service::ReportsService;
pub use schemes_service::SchemesService;
pub use summaries_service::SummariesService;

use uuid::Uuid;

use crate::db::Store;
use crate::db::models::{Department, Participant, ProjectCycle, Scheme};
use crate::error::{AppError, AppResult};

// Scoped loads: an entity owned by another scheme is reported as absent.

pub(crate) fn load_scheme<S: Store>(store: &S, ctx: &RequestContext) -> AppResult<Scheme> {
    store
        .get_scheme(ctx.scheme_id)?
        .ok_or_else(|| AppError::not_found("scheme"))
}

pub(crate) fn load_participant<S: Store>(
    store: &S,
    ctx: &RequestContext,
    participant_id: Uuid,
) -> AppResult<Participant> {
    store
        .get_participant(participant_id)?
        .filter(|p| p.scheme_id == ctx.scheme_id)
        .ok_or(AppError::MissingParticipant { id: participant_id })
}

pub(crate) fn load_cycle<S: Store>(
    store: &S,
    ctx: &RequestContext,
    cycle_id: Uuid,
) -> AppResult<ProjectCycle> {
    store
        .get_cycle(cycle_id)?
        .filter(|c| c.scheme_id == ctx.scheme_id)
        .ok_or(AppError::MissingCycle { id: cycle_id })
}

pub(crate) fn load_department<S: Store>(
    store: &S,
    ctx: &RequestContext,
    department_id: Uuid,
) -> AppResult<Department> {
    store
        .get_department(department_id)?
        .filter(|d| d.scheme_id == ctx.scheme_id)
        .ok_or_else(|| AppError::not_found("department"))
}
