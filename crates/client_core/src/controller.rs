//! The list controller owns the authoritative employee collection and keeps it
//! in step with the backend: load on mount, append on create, full reload after
//! a delete. Failures are logged and never change state.

use std::{ops::Deref, sync::Arc};

use shared::{
    domain::EmployeeId,
    protocol::{EmployeeDraft, EmployeeRecord},
};
use tokio::{
    sync::{broadcast, RwLock},
    task::JoinHandle,
};
use tracing::{error, info};

use crate::{api::EmployeeApi, error::ClientError};

const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Immutable snapshot of the employee list in server order. Every change
/// produces a new snapshot; holders of an older one never see it move.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeCollection(Arc<Vec<EmployeeRecord>>);

impl EmployeeCollection {
    pub fn new(records: Vec<EmployeeRecord>) -> Self {
        Self(Arc::new(records))
    }

    pub fn appended(&self, record: EmployeeRecord) -> Self {
        let mut records = Vec::with_capacity(self.0.len() + 1);
        records.extend_from_slice(&self.0);
        records.push(record);
        Self::new(records)
    }

    pub fn find(&self, id: &EmployeeId) -> Option<&EmployeeRecord> {
        self.0.iter().find(|record| &record.id == id)
    }

    pub fn contains(&self, id: &EmployeeId) -> bool {
        self.find(id).is_some()
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Deref for EmployeeCollection {
    type Target = [EmployeeRecord];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Load,
    Create,
    Delete,
}

impl Operation {
    pub fn label(self) -> &'static str {
        match self {
            Operation::Load => "load",
            Operation::Create => "create",
            Operation::Delete => "delete",
        }
    }
}

/// Notifications for dependent views. `Failed` is diagnostic only.
#[derive(Debug, Clone)]
pub enum ListEvent {
    Loaded(EmployeeCollection),
    Appended {
        employee: EmployeeRecord,
        employees: EmployeeCollection,
    },
    Deleted(EmployeeId),
    Failed {
        operation: Operation,
        message: String,
    },
}

pub struct ListController {
    api: Arc<dyn EmployeeApi>,
    employees: RwLock<EmployeeCollection>,
    events: broadcast::Sender<ListEvent>,
}

impl ListController {
    pub fn new(api: Arc<dyn EmployeeApi>) -> Arc<Self> {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Arc::new(Self {
            api,
            employees: RwLock::new(EmployeeCollection::default()),
            events,
        })
    }

    pub async fn employees(&self) -> EmployeeCollection {
        self.employees.read().await.clone()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ListEvent> {
        self.events.subscribe()
    }

    /// Replaces the whole collection with the backend's list.
    pub async fn load(&self) {
        match self.api.list_employees().await {
            Ok(response) => {
                info!(count = response.count, "total count of employees");
                let loaded = EmployeeCollection::new(response.employees);
                *self.employees.write().await = loaded.clone();
                self.publish(ListEvent::Loaded(loaded));
            }
            Err(err) => self.report(Operation::Load, &err),
        }
    }

    /// Appends the backend-assigned record to whatever the collection holds when
    /// the response arrives.
    pub async fn create(&self, draft: EmployeeDraft) {
        match self.api.create_employee(&draft).await {
            Ok(employee) => {
                let employees = {
                    let mut guard = self.employees.write().await;
                    let next = guard.appended(employee.clone());
                    *guard = next.clone();
                    next
                };
                info!(
                    employee_id = %employee.id,
                    count = employees.len(),
                    "total count of employees"
                );
                self.publish(ListEvent::Appended {
                    employee,
                    employees,
                });
            }
            Err(err) => self.report(Operation::Create, &err),
        }
    }

    /// On success reloads from the backend; the deleted row stays visible until
    /// that reload lands. On failure nothing else happens.
    pub async fn delete(&self, id: &EmployeeId) {
        match self.api.delete_employee(id).await {
            Ok(()) => {
                info!(employee_id = %id, "employee deleted; reloading");
                self.publish(ListEvent::Deleted(id.clone()));
                self.load().await;
            }
            Err(err) if err.is_rejection() => {
                error!(employee_id = %id, error = %err, "failed to delete employee");
                self.publish(ListEvent::Failed {
                    operation: Operation::Delete,
                    message: err.to_string(),
                });
            }
            Err(err) => self.report(Operation::Delete, &err),
        }
    }

    pub fn spawn_load(self: &Arc<Self>) -> JoinHandle<()> {
        let controller = Arc::clone(self);
        tokio::spawn(async move { controller.load().await })
    }

    pub fn spawn_create(self: &Arc<Self>, draft: EmployeeDraft) -> JoinHandle<()> {
        let controller = Arc::clone(self);
        tokio::spawn(async move { controller.create(draft).await })
    }

    pub fn spawn_delete(self: &Arc<Self>, id: EmployeeId) -> JoinHandle<()> {
        let controller = Arc::clone(self);
        tokio::spawn(async move { controller.delete(&id).await })
    }

    fn report(&self, operation: Operation, err: &ClientError) {
        error!(operation = operation.label(), error = %err, "employee sync failed");
        self.publish(ListEvent::Failed {
            operation,
            message: err.to_string(),
        });
    }

    fn publish(&self, event: ListEvent) {
        // No subscribers is fine; the collection is still readable.
        let _ = self.events.send(event);
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
