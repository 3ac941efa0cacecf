use tracing::info;
use uuid::Uuid;

use crate::{
    db::Store,
    db::models::Department,
    error::{AppError, AppResult},
    services::{context::RequestContext, load_department, load_scheme},
    validation::scheme::validate_department_name,
};

pub struct DepartmentsService;

impl DepartmentsService {
    pub fn list<S: Store>(store: &S, ctx: &RequestContext) -> AppResult<Vec<Department>> {
        store.list_departments(ctx.scheme_id)
    }

    pub fn create<S: Store>(
        store: &mut S,
        ctx: &RequestContext,
        name: &str,
    ) -> AppResult<Department> {
        validate_department_name(name)?;
        let scheme = load_scheme(store, ctx)?;
        if scheme.departments_disabled {
            return Err(AppError::validation("Departments are disabled for this scheme"));
        }

        let created = store.put_department(Department {
            id: Uuid::new_v4(),
            scheme_id: scheme.id,
            name: name.trim().to_string(),
        })?;

        info!(scheme_id = %scheme.id, department_id = %created.id, name = %created.name, "Department created");
        Ok(created)
    }

    pub fn rename<S: Store>(
        store: &mut S,
        ctx: &RequestContext,
        department_id: Uuid,
        name: &str,
    ) -> AppResult<Department> {
        validate_department_name(name)?;
        let mut department = load_department(store, ctx, department_id)?;
        department.name = name.trim().to_string();
        store.put_department(department)
    }

    /// Participants in the department stay on the scheme without one.
    pub fn delete<S: Store>(
        store: &mut S,
        ctx: &RequestContext,
        department_id: Uuid,
    ) -> AppResult<()> {
        let _existing = load_department(store, ctx, department_id)?;
        store.delete_department(department_id)?;
        info!(scheme_id = %ctx.scheme_id, department_id = %department_id, "Department deleted");
        Ok(())
    }
}
