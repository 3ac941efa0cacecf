pub mod memory;

pub use memory::InMemoryStore;

use uuid::Uuid;

use crate::db::models::{
    Department, EntitlementSummary, LedgerEvent, Participant, ProjectCycle, Scheme,
};
use crate::error::AppResult;

/// Persistence boundary for every service.
///
/// Writes take `&mut self`: one store handle applies writes in the order its
/// caller issues them. Implementations must keep `(participant_id, cycle_id)`
/// unique for summaries and `(scheme_id, sequence_number)` unique for cycles,
/// and must cascade participant / cycle deletion to their summaries and events.
/// Services that write more than once undo their earlier writes when a later
/// one fails, so a failed call leaves the store as it found it.
pub trait Store {
    // Schemes
    fn get_scheme(&self, id: Uuid) -> AppResult<Option<Scheme>>;
    fn put_scheme(&mut self, scheme: Scheme) -> AppResult<Scheme>;
    fn count_schemes_with_app_code_prefix(&self, prefix: &str) -> AppResult<usize>;

    // Departments
    fn get_department(&self, id: Uuid) -> AppResult<Option<Department>>;
    fn list_departments(&self, scheme_id: Uuid) -> AppResult<Vec<Department>>;
    fn put_department(&mut self, department: Department) -> AppResult<Department>;
    /// Participants of the department are detached, not removed.
    fn delete_department(&mut self, id: Uuid) -> AppResult<()>;

    // Participants
    fn get_participant(&self, id: Uuid) -> AppResult<Option<Participant>>;
    fn list_participants(&self, scheme_id: Uuid) -> AppResult<Vec<Participant>>;
    fn put_participant(&mut self, participant: Participant) -> AppResult<Participant>;
    fn delete_participant(&mut self, id: Uuid) -> AppResult<()>;

    // Project cycles
    fn get_cycle(&self, id: Uuid) -> AppResult<Option<ProjectCycle>>;
    fn find_cycle_by_number(&self, scheme_id: Uuid, sequence_number: i32)
    -> AppResult<Option<ProjectCycle>>;
    fn list_cycles(&self, scheme_id: Uuid) -> AppResult<Vec<ProjectCycle>>;
    fn put_cycle(&mut self, cycle: ProjectCycle) -> AppResult<ProjectCycle>;
    fn delete_cycle(&mut self, id: Uuid) -> AppResult<()>;

    // Entitlement summaries
    fn get_summary(&self, participant_id: Uuid, cycle_id: Uuid)
    -> AppResult<Option<EntitlementSummary>>;
    fn put_summary(&mut self, summary: EntitlementSummary) -> AppResult<EntitlementSummary>;
    fn list_summaries_for_participant(&self, participant_id: Uuid)
    -> AppResult<Vec<EntitlementSummary>>;
    fn delete_summary(&mut self, participant_id: Uuid, cycle_id: Uuid) -> AppResult<()>;

    // Ledger
    fn list_events(&self, participant_id: Uuid, cycle_id: Uuid) -> AppResult<Vec<LedgerEvent>>;
    fn put_event(&mut self, event: LedgerEvent) -> AppResult<LedgerEvent>;
    /// Only used to undo an event whose summary write failed.
    fn delete_event(&mut self, id: Uuid) -> AppResult<()>;
}
