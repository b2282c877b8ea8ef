//! The add-employee form. It only builds drafts; the backend validates fields.

use chrono::NaiveDate;
use shared::protocol::EmployeeDraft;

pub const DATE_INPUT_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEmployeeForm {
    pub name: String,
    pub extension: String,
    pub email: String,
    pub title: String,
    pub date_hired: String,
    pub currently_employed: bool,
}

impl Default for NewEmployeeForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            extension: String::new(),
            email: String::new(),
            title: String::new(),
            date_hired: String::new(),
            currently_employed: true,
        }
    }
}

impl NewEmployeeForm {
    pub fn to_draft(&self) -> Result<EmployeeDraft, String> {
        let date_hired = NaiveDate::parse_from_str(self.date_hired.trim(), DATE_INPUT_FORMAT)
            .map_err(|err| format!("Date hired must be YYYY-MM-DD ({err})"))?;
        Ok(EmployeeDraft {
            name: self.name.clone(),
            extension: self.extension.clone(),
            email: self.email.clone(),
            title: self.title.clone(),
            date_hired,
            currently_employed: self.currently_employed,
        })
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
