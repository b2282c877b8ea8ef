use shared::{
    domain::EmployeeId,
    error::{ApiError, ApiException},
    protocol::{EmployeeDraft, EmployeeListResponse, EmployeeRecord},
};
use storage::Storage;
use tracing::{error, info};

#[derive(Clone)]
pub struct ApiContext {
    pub storage: Storage,
}

pub async fn list_employees(ctx: &ApiContext) -> Result<EmployeeListResponse, ApiError> {
    let employees = ctx.storage.list_employees().await.map_err(internal)?;
    Ok(EmployeeListResponse::new(employees))
}

pub async fn get_employee(ctx: &ApiContext, id: &EmployeeId) -> Result<EmployeeRecord, ApiError> {
    ctx.storage
        .get_employee(id)
        .await
        .map_err(internal)?
        .ok_or_else(|| ApiException::not_found(format!("employee {id} not found")).into())
}

pub async fn create_employee(
    ctx: &ApiContext,
    draft: EmployeeDraft,
) -> Result<EmployeeRecord, ApiError> {
    validate_draft(&draft)?;
    let created = ctx.storage.create_employee(&draft).await.map_err(internal)?;
    info!(employee_id = %created.id, "employee created");
    Ok(created)
}

pub async fn delete_employee(ctx: &ApiContext, id: &EmployeeId) -> Result<(), ApiError> {
    if !ctx.storage.delete_employee(id).await.map_err(internal)? {
        return Err(ApiException::not_found(format!("employee {id} not found")).into());
    }
    info!(employee_id = %id, "employee deleted");
    Ok(())
}

pub(crate) fn validate_draft(draft: &EmployeeDraft) -> Result<(), ApiError> {
    if draft.name.trim().is_empty() {
        return Err(ApiException::validation("name is required").into());
    }
    if !draft.email.contains('@') {
        return Err(ApiException::validation("email must contain '@'").into());
    }
    Ok(())
}

fn internal(e: anyhow::Error) -> ApiError {
    error!(error = %e, "employee storage failure");
    ApiException::internal(e.to_string()).into()
}

#[cfg(test)]
#[path = "tests/mod_tests.rs"]
mod tests;
