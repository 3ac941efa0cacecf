use tracing::info;
use uuid::Uuid;

use crate::{
    db::Store,
    db::enums::County,
    db::models::{CreateSchemeRequest, Department, Scheme},
    error::AppResult,
    services::{context::RequestContext, load_scheme},
    validation::scheme::validate_create_scheme,
};

/// County prefix followed by a three-digit sequence starting at 001, so the
/// fifth scheme registered in Kerry is `KY005`.
pub fn generate_app_code(county: County, existing_with_prefix: usize) -> String {
    format!("{}{:03}", county.prefix(), existing_with_prefix + 1)
}

#[derive(Debug, Clone)]
pub struct CreatedScheme {
    pub scheme: Scheme,
    pub departments: Vec<Department>,
}

pub struct SchemesService;

impl SchemesService {
    /// Registers a scheme together with its departments. Runs before any
    /// scheme context exists.
    pub fn create<S: Store>(store: &mut S, req: &CreateSchemeRequest) -> AppResult<CreatedScheme> {
        validate_create_scheme(req)?;

        let prefix = req.county.prefix();
        let app_code = generate_app_code(req.county, store.count_schemes_with_app_code_prefix(prefix)?);

        let scheme = store.put_scheme(Scheme {
            id: Uuid::new_v4(),
            name: req.name.trim().to_string(),
            app_code,
            gov_code: req.gov_code.trim().to_string(),
            county: req.county,
            address: req.address.trim().to_string(),
            current_cycle_id: None,
            departments_disabled: req.departments_disabled,
            created_at: chrono::Utc::now(),
        })?;

        let mut departments = Vec::with_capacity(req.new_departments.len());
        for name in &req.new_departments {
            departments.push(store.put_department(Department {
                id: Uuid::new_v4(),
                scheme_id: scheme.id,
                name: name.trim().to_string(),
            })?);
        }

        info!(
            scheme_id = %scheme.id,
            app_code = %scheme.app_code,
            departments = departments.len(),
            "Scheme created"
        );
        Ok(CreatedScheme { scheme, departments })
    }

    pub fn get<S: Store>(store: &S, ctx: &RequestContext) -> AppResult<Scheme> {
        load_scheme(store, ctx)
    }
}
