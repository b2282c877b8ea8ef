//! Backend commands queued from UI to backend worker.

use shared::{domain::EmployeeId, protocol::EmployeeDraft};

#[derive(Debug, Clone)]
pub enum BackendCommand {
    /// Points the worker at a backend and loads the list (the mount load).
    Connect { server_url: String },
    Load,
    Create(EmployeeDraft),
    Delete(EmployeeId),
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::Connect { .. } => "connect",
            BackendCommand::Load => "load",
            BackendCommand::Create(_) => "create",
            BackendCommand::Delete(_) => "delete",
        }
    }
}
