use std::collections::HashMap;

use uuid::Uuid;

use super::Store;
use crate::db::models::{
    Department, EntitlementSummary, LedgerEvent, Participant, ProjectCycle, Scheme,
};
use crate::error::{AppError, AppResult};

/// Process-local store. Enforces the same uniqueness and cascade rules a
/// database-backed store would.
#[derive(Debug, Default, Clone)]
pub struct InMemoryStore {
    schemes: HashMap<Uuid, Scheme>,
    departments: HashMap<Uuid, Department>,
    participants: HashMap<Uuid, Participant>,
    cycles: HashMap<Uuid, ProjectCycle>,
    summaries: HashMap<(Uuid, Uuid), EntitlementSummary>,
    events: Vec<LedgerEvent>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn summary_count(&self) -> usize {
        self.summaries.len()
    }

    pub fn event_count(&self) -> usize {
        self.events.len()
    }
}

impl Store for InMemoryStore {
    fn get_scheme(&self, id: Uuid) -> AppResult<Option<Scheme>> {
        Ok(self.schemes.get(&id).cloned())
    }

    fn put_scheme(&mut self, scheme: Scheme) -> AppResult<Scheme> {
        let duplicate = self
            .schemes
            .values()
            .any(|s| s.id != scheme.id && (s.gov_code == scheme.gov_code || s.app_code == scheme.app_code));
        if duplicate {
            return Err(AppError::conflict_with_code(
                "A scheme with this DSP code or app code already exists",
                Some("gov_code".into()),
                "SCHEME_EXISTS",
            ));
        }
        self.schemes.insert(scheme.id, scheme.clone());
        Ok(scheme)
    }

    fn count_schemes_with_app_code_prefix(&self, prefix: &str) -> AppResult<usize> {
        Ok(self
            .schemes
            .values()
            .filter(|s| s.app_code.starts_with(prefix))
            .count())
    }

    fn get_department(&self, id: Uuid) -> AppResult<Option<Department>> {
        Ok(self.departments.get(&id).cloned())
    }

    fn list_departments(&self, scheme_id: Uuid) -> AppResult<Vec<Department>> {
        let mut list: Vec<Department> = self
            .departments
            .values()
            .filter(|d| d.scheme_id == scheme_id)
            .cloned()
            .collect();
        list.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(list)
    }

    fn put_department(&mut self, department: Department) -> AppResult<Department> {
        let duplicate = self.departments.values().any(|d| {
            d.id != department.id
                && d.scheme_id == department.scheme_id
                && d.name.eq_ignore_ascii_case(&department.name)
        });
        if duplicate {
            return Err(AppError::conflict_with_code(
                "Department name already exists in this scheme",
                Some("name".into()),
                "DEPARTMENT_EXISTS",
            ));
        }
        self.departments.insert(department.id, department.clone());
        Ok(department)
    }

    fn delete_department(&mut self, id: Uuid) -> AppResult<()> {
        if self.departments.remove(&id).is_none() {
            return Err(AppError::not_found("department"));
        }
        for participant in self.participants.values_mut() {
            if participant.department_id == Some(id) {
                participant.department_id = None;
            }
        }
        Ok(())
    }

    fn get_participant(&self, id: Uuid) -> AppResult<Option<Participant>> {
        Ok(self.participants.get(&id).cloned())
    }

    fn list_participants(&self, scheme_id: Uuid) -> AppResult<Vec<Participant>> {
        let mut list: Vec<Participant> = self
            .participants
            .values()
            .filter(|p| p.scheme_id == scheme_id)
            .cloned()
            .collect();
        list.sort_by(|a, b| {
            (&a.last_name, &a.first_name, a.id).cmp(&(&b.last_name, &b.first_name, b.id))
        });
        Ok(list)
    }

    fn put_participant(&mut self, participant: Participant) -> AppResult<Participant> {
        for other in self.participants.values().filter(|p| p.id != participant.id) {
            if other.ppsn == participant.ppsn {
                return Err(AppError::conflict_with_code(
                    "PPS Number already registered",
                    Some("ppsn".into()),
                    "PPSN_EXISTS",
                ));
            }
            if other.bank_iban == participant.bank_iban {
                return Err(AppError::conflict_with_code(
                    "Bank IBAN already registered",
                    Some("bank_iban".into()),
                    "IBAN_EXISTS",
                ));
            }
            if other.email.eq_ignore_ascii_case(&participant.email) {
                return Err(AppError::conflict_with_code(
                    "Email already registered",
                    Some("email".into()),
                    "EMAIL_EXISTS",
                ));
            }
        }
        self.participants.insert(participant.id, participant.clone());
        Ok(participant)
    }

    fn delete_participant(&mut self, id: Uuid) -> AppResult<()> {
        if self.participants.remove(&id).is_none() {
            return Err(AppError::MissingParticipant { id });
        }
        self.summaries.retain(|(participant_id, _), _| *participant_id != id);
        self.events.retain(|e| e.participant_id != id);
        Ok(())
    }

    fn get_cycle(&self, id: Uuid) -> AppResult<Option<ProjectCycle>> {
        Ok(self.cycles.get(&id).cloned())
    }

    fn find_cycle_by_number(
        &self,
        scheme_id: Uuid,
        sequence_number: i32,
    ) -> AppResult<Option<ProjectCycle>> {
        Ok(self
            .cycles
            .values()
            .find(|c| c.scheme_id == scheme_id && c.sequence_number == sequence_number)
            .cloned())
    }

    fn list_cycles(&self, scheme_id: Uuid) -> AppResult<Vec<ProjectCycle>> {
        let mut list: Vec<ProjectCycle> = self
            .cycles
            .values()
            .filter(|c| c.scheme_id == scheme_id)
            .cloned()
            .collect();
        list.sort_by_key(|c| c.sequence_number);
        Ok(list)
    }

    fn put_cycle(&mut self, cycle: ProjectCycle) -> AppResult<ProjectCycle> {
        let duplicate = self.cycles.values().any(|c| {
            c.id != cycle.id
                && c.scheme_id == cycle.scheme_id
                && c.sequence_number == cycle.sequence_number
        });
        if duplicate {
            return Err(AppError::conflict_with_code(
                format!("Project {} already exists for this scheme", cycle.sequence_number),
                Some("sequence_number".into()),
                "CYCLE_EXISTS",
            ));
        }
        self.cycles.insert(cycle.id, cycle.clone());
        Ok(cycle)
    }

    fn delete_cycle(&mut self, id: Uuid) -> AppResult<()> {
        if self.cycles.remove(&id).is_none() {
            return Err(AppError::MissingCycle { id });
        }
        self.summaries.retain(|(_, cycle_id), _| *cycle_id != id);
        self.events.retain(|e| e.cycle_id != id);
        for scheme in self.schemes.values_mut() {
            if scheme.current_cycle_id == Some(id) {
                scheme.current_cycle_id = None;
            }
        }
        Ok(())
    }

    fn get_summary(
        &self,
        participant_id: Uuid,
        cycle_id: Uuid,
    ) -> AppResult<Option<EntitlementSummary>> {
        Ok(self.summaries.get(&(participant_id, cycle_id)).cloned())
    }

    fn put_summary(&mut self, summary: EntitlementSummary) -> AppResult<EntitlementSummary> {
        self.summaries.insert(summary.key(), summary.clone());
        Ok(summary)
    }

    fn list_summaries_for_participant(
        &self,
        participant_id: Uuid,
    ) -> AppResult<Vec<EntitlementSummary>> {
        Ok(self
            .summaries
            .values()
            .filter(|s| s.participant_id == participant_id)
            .cloned()
            .collect())
    }

    fn delete_summary(&mut self, participant_id: Uuid, cycle_id: Uuid) -> AppResult<()> {
        self.summaries.remove(&(participant_id, cycle_id));
        Ok(())
    }

    fn list_events(&self, participant_id: Uuid, cycle_id: Uuid) -> AppResult<Vec<LedgerEvent>> {
        Ok(self
            .events
            .iter()
            .filter(|e| e.participant_id == participant_id && e.cycle_id == cycle_id)
            .cloned()
            .collect())
    }

    fn put_event(&mut self, event: LedgerEvent) -> AppResult<LedgerEvent> {
        if self.events.iter().any(|e| e.id == event.id) {
            return Err(AppError::conflict_with_code(
                "Ledger events are immutable once recorded",
                Some("id".into()),
                "EVENT_EXISTS",
            ));
        }
        self.events.push(event.clone());
        Ok(event)
    }

    fn delete_event(&mut self, id: Uuid) -> AppResult<()> {
        let before = self.events.len();
        self.events.retain(|e| e.id != id);
        if self.events.len() == before {
            return Err(AppError::not_found("ledger event"));
        }
        Ok(())
    }
}
