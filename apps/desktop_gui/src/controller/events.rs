//! Events flowing from the backend worker to the UI thread.

use client_core::{EmployeeCollection, ListEvent, Operation};
use shared::domain::EmployeeId;

#[derive(Debug, Clone)]
pub enum UiEvent {
    /// A fresh snapshot from a load; rows remount.
    EmployeesLoaded(EmployeeCollection),
    /// A create landed; rows keep their dialog state.
    EmployeeAppended(EmployeeCollection),
    EmployeeDeleted(EmployeeId),
    Info(String),
    /// Diagnostic only. The list view does not change.
    OperationFailed { operation: Operation, message: String },
}

impl From<ListEvent> for UiEvent {
    fn from(event: ListEvent) -> Self {
        match event {
            ListEvent::Loaded(employees) => UiEvent::EmployeesLoaded(employees),
            ListEvent::Appended { employees, .. } => UiEvent::EmployeeAppended(employees),
            ListEvent::Deleted(id) => UiEvent::EmployeeDeleted(id),
            ListEvent::Failed { operation, message } => {
                UiEvent::OperationFailed { operation, message }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_events_map_to_ui_events() {
        let employees = EmployeeCollection::default();
        let event = UiEvent::from(ListEvent::Loaded(employees.clone()));
        assert!(matches!(event, UiEvent::EmployeesLoaded(loaded) if loaded.ptr_eq(&employees)));

        let event = UiEvent::from(ListEvent::Failed {
            operation: Operation::Delete,
            message: "404".to_string(),
        });
        assert!(matches!(
            event,
            UiEvent::OperationFailed {
                operation: Operation::Delete,
                ..
            }
        ));
    }
}
