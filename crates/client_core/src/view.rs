//! Table derivation and per-row delete confirmation, independent of any widget
//! toolkit.

use std::collections::{HashMap, HashSet};

use shared::{
    domain::{hire_date, EmployeeId},
    protocol::EmployeeRecord,
};

use crate::navigation::Route;

pub const TABLE_HEADERS: [&str; 8] = [
    "Action",
    "Name",
    "Extension",
    "Email",
    "Title",
    "Date Hired",
    "Currently Employed?",
    "",
];

/// Text comparison against the boolean's string form, so only `"true"` and
/// `"false"` ever match.
pub fn employed_matches(record: &EmployeeRecord, employed: &str) -> bool {
    record.currently_employed.to_string() == employed
}

/// Rows to render for the given `employed` filter, in collection order. An
/// absent or empty filter keeps everything.
pub fn filter_employees<'a>(
    employees: &'a [EmployeeRecord],
    employed: Option<&str>,
) -> Vec<&'a EmployeeRecord> {
    match employed.filter(|value| !value.is_empty()) {
        Some(value) => employees
            .iter()
            .filter(|record| employed_matches(record, value))
            .collect(),
        None => employees.iter().collect(),
    }
}

/// Display strings for one table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeRowView {
    pub id: EmployeeId,
    pub edit_path: String,
    pub name: String,
    pub extension: String,
    pub email: String,
    pub title: String,
    pub date_hired: String,
    pub currently_employed: &'static str,
}

impl EmployeeRowView {
    pub fn from_record(record: &EmployeeRecord) -> Self {
        Self {
            id: record.id.clone(),
            edit_path: Route::Edit(record.id.clone()).to_path(),
            name: record.name.clone(),
            extension: record.extension.clone(),
            email: record.email.clone(),
            title: record.title.clone(),
            date_hired: hire_date::display(record.date_hired),
            currently_employed: if record.currently_employed {
                "Yes"
            } else {
                "No"
            },
        }
    }
}

pub fn table_rows(employees: &[EmployeeRecord], employed: Option<&str>) -> Vec<EmployeeRowView> {
    filter_employees(employees, employed)
        .into_iter()
        .map(EmployeeRowView::from_record)
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeleteDialog {
    #[default]
    Hidden,
    Shown,
}

impl DeleteDialog {
    pub fn is_shown(self) -> bool {
        self == DeleteDialog::Shown
    }

    pub fn request_delete(&mut self) {
        *self = DeleteDialog::Shown;
    }

    pub fn cancel(&mut self) {
        *self = DeleteDialog::Hidden;
    }

    /// Returns true when a deletion should be dispatched. The dialog closes
    /// regardless of how that deletion turns out.
    pub fn confirm(&mut self) -> bool {
        let dispatch = self.is_shown();
        *self = DeleteDialog::Hidden;
        dispatch
    }
}

/// Dialog state for every mounted row, keyed by record id.
#[derive(Debug, Default)]
pub struct RowDialogs {
    dialogs: HashMap<EmployeeId, DeleteDialog>,
}

impl RowDialogs {
    pub fn dialog(&self, id: &EmployeeId) -> DeleteDialog {
        self.dialogs.get(id).copied().unwrap_or_default()
    }

    /// Opens the row's dialog. At most one dialog is shown at a time.
    pub fn request_delete(&mut self, id: &EmployeeId) {
        self.dialogs.retain(|open, _| open == id);
        self.dialogs.entry(id.clone()).or_default().request_delete();
    }

    pub fn cancel(&mut self, id: &EmployeeId) {
        self.dialogs.remove(id);
    }

    /// Returns the id to delete when the row's dialog was open.
    pub fn confirm(&mut self, id: &EmployeeId) -> Option<EmployeeId> {
        let mut dialog = self.dialogs.remove(id)?;
        dialog.confirm().then(|| id.clone())
    }

    pub fn open_dialog(&self) -> Option<&EmployeeId> {
        self.dialogs
            .iter()
            .find(|(_, dialog)| dialog.is_shown())
            .map(|(id, _)| id)
    }

    /// Drops dialog state for rows that are no longer mounted.
    pub fn unmount_except<'a>(&mut self, mounted: impl IntoIterator<Item = &'a EmployeeId>) {
        let mounted: HashSet<&EmployeeId> = mounted.into_iter().collect();
        self.dialogs.retain(|id, _| mounted.contains(id));
    }

    /// A reload remounts every row.
    pub fn remount(&mut self) {
        self.dialogs.clear();
    }
}

#[cfg(test)]
#[path = "tests/view_tests.rs"]
mod tests;
