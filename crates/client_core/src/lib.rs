//! Client-side synchronisation between an employee list view and the REST
//! backend, plus the toolkit-independent pieces of the table view.

pub mod api;
pub mod controller;
pub mod error;
pub mod navigation;
pub mod view;

pub use api::{EmployeeApi, HttpEmployeeApi};
pub use controller::{EmployeeCollection, ListController, ListEvent, Operation};
pub use error::ClientError;
pub use navigation::{ListQuery, Route};
pub use view::{filter_employees, table_rows, DeleteDialog, EmployeeRowView, RowDialogs};

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
