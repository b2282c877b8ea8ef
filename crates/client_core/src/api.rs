//! Transport seam between the list controller and the employee REST backend.

use async_trait::async_trait;
use reqwest::{Client, Response};
use shared::{
    domain::EmployeeId,
    protocol::{EmployeeDraft, EmployeeListResponse, EmployeeRecord, EmployeeResponse},
};
use tracing::debug;
use url::Url;

use crate::error::ClientError;

const LIST_OPERATION: &str = "list employees";
const CREATE_OPERATION: &str = "create employee";
const DELETE_OPERATION: &str = "delete employee";

#[async_trait]
pub trait EmployeeApi: Send + Sync {
    async fn list_employees(&self) -> Result<EmployeeListResponse, ClientError>;
    async fn create_employee(&self, draft: &EmployeeDraft) -> Result<EmployeeRecord, ClientError>;
    async fn delete_employee(&self, id: &EmployeeId) -> Result<(), ClientError>;
}

pub struct HttpEmployeeApi {
    http: Client,
    base_url: Url,
}

impl HttpEmployeeApi {
    pub fn new(server_url: &str) -> Result<Self, ClientError> {
        Self::with_client(Client::new(), server_url)
    }

    pub fn with_client(http: Client, server_url: &str) -> Result<Self, ClientError> {
        let base_url = Url::parse(server_url.trim()).map_err(|source| {
            ClientError::InvalidServerUrl {
                url: server_url.to_string(),
                source,
            }
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::CannotBeBase(server_url.to_string()));
        }
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `{base}/api/employees[/{id}]`, keeping any path prefix of the base url.
    pub fn employees_url(&self, id: Option<&EmployeeId>) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| ClientError::CannotBeBase(self.base_url.to_string()))?;
            segments.pop_if_empty().extend(["api", "employees"]);
            if let Some(id) = id {
                segments.push(id.as_str());
            }
        }
        Ok(url)
    }
}

fn ensure_success(operation: &'static str, response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(ClientError::Status { operation, status })
    }
}

fn transport(operation: &'static str) -> impl FnOnce(reqwest::Error) -> ClientError {
    move |source| ClientError::Transport { operation, source }
}

fn decode(operation: &'static str) -> impl FnOnce(reqwest::Error) -> ClientError {
    move |source| ClientError::Decode { operation, source }
}

#[async_trait]
impl EmployeeApi for HttpEmployeeApi {
    async fn list_employees(&self) -> Result<EmployeeListResponse, ClientError> {
        let url = self.employees_url(None)?;
        debug!(%url, "requesting employee list");
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(transport(LIST_OPERATION))?;
        ensure_success(LIST_OPERATION, response)?
            .json::<EmployeeListResponse>()
            .await
            .map_err(decode(LIST_OPERATION))
    }

    async fn create_employee(&self, draft: &EmployeeDraft) -> Result<EmployeeRecord, ClientError> {
        let url = self.employees_url(None)?;
        debug!(%url, name = %draft.name, "posting employee draft");
        let response = self
            .http
            .post(url)
            .json(draft)
            .send()
            .await
            .map_err(transport(CREATE_OPERATION))?;
        let body: EmployeeResponse = ensure_success(CREATE_OPERATION, response)?
            .json()
            .await
            .map_err(decode(CREATE_OPERATION))?;
        Ok(body.employee)
    }

    async fn delete_employee(&self, id: &EmployeeId) -> Result<(), ClientError> {
        let url = self.employees_url(Some(id))?;
        debug!(%url, "deleting employee");
        let response = self
            .http
            .delete(url)
            .send()
            .await
            .map_err(transport(DELETE_OPERATION))?;
        ensure_success(DELETE_OPERATION, response)?;
        Ok(())
    }
}
