use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{display_text, hire_date, EmployeeId};

/// One employee as stored and transmitted by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeRecord {
    #[serde(rename = "_id")]
    pub id: EmployeeId,
    #[serde(default, deserialize_with = "display_text::deserialize")]
    pub name: String,
    #[serde(default, deserialize_with = "display_text::deserialize")]
    pub extension: String,
    #[serde(default, deserialize_with = "display_text::deserialize")]
    pub email: String,
    #[serde(default, deserialize_with = "display_text::deserialize")]
    pub title: String,
    #[serde(default, with = "hire_date::lenient")]
    pub date_hired: Option<NaiveDate>,
    #[serde(default)]
    pub currently_employed: bool,
}

/// A record payload without the backend-assigned id, submitted for creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeDraft {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub extension: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub title: String,
    #[serde(with = "hire_date::required")]
    pub date_hired: NaiveDate,
    #[serde(default)]
    pub currently_employed: bool,
}

impl EmployeeDraft {
    pub fn into_record(self, id: EmployeeId) -> EmployeeRecord {
        EmployeeRecord {
            id,
            name: self.name,
            extension: self.extension,
            email: self.email,
            title: self.title,
            date_hired: Some(self.date_hired),
            currently_employed: self.currently_employed,
        }
    }
}

/// Body of `GET /api/employees`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeListResponse {
    #[serde(default)]
    pub count: u64,
    pub employees: Vec<EmployeeRecord>,
}

impl EmployeeListResponse {
    pub fn new(employees: Vec<EmployeeRecord>) -> Self {
        Self {
            count: employees.len() as u64,
            employees,
        }
    }
}

/// Body of `POST /api/employees` and `GET /api/employees/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeResponse {
    pub employee: EmployeeRecord,
}

pub fn employees_route() -> &'static str {
    "/api/employees"
}

pub fn employee_route() -> &'static str {
    "/api/employees/:employee_id"
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn record_reads_backend_field_names() {
        let record: EmployeeRecord = serde_json::from_value(json!({
            "_id": "65a1",
            "name": "Ada",
            "extension": 1234,
            "email": "ada@example.com",
            "title": "Engineer",
            "dateHired": "2024-01-01T00:00:00.000Z",
            "currentlyEmployed": true,
            "__v": 0
        }))
        .expect("record");

        assert_eq!(record.id, EmployeeId::from("65a1"));
        assert_eq!(record.extension, "1234");
        assert_eq!(record.date_hired, NaiveDate::from_ymd_opt(2024, 1, 1));
        assert!(record.currently_employed);
    }

    #[test]
    fn record_with_unparseable_hire_date_still_decodes() {
        let record: EmployeeRecord = serde_json::from_value(json!({
            "_id": 7,
            "name": "Grace",
            "dateHired": "not a date",
            "currentlyEmployed": false
        }))
        .expect("record");

        assert_eq!(record.id.as_str(), "7");
        assert_eq!(record.date_hired, None);
        assert_eq!(record.email, "");
    }

    #[test]
    fn draft_serializes_with_plain_hire_date() {
        let draft = EmployeeDraft {
            name: "A".into(),
            extension: "100".into(),
            email: "a@example.com".into(),
            title: "Clerk".into(),
            date_hired: NaiveDate::from_ymd_opt(2024, 1, 1).expect("date"),
            currently_employed: true,
        };
        let value = serde_json::to_value(&draft).expect("json");
        assert_eq!(value["dateHired"], "2024-01-01");
        assert_eq!(value["currentlyEmployed"], true);
        assert!(value.get("_id").is_none());
    }

    #[test]
    fn list_response_counts_its_records() {
        let response = EmployeeListResponse::new(Vec::new());
        assert_eq!(response.count, 0);
        let decoded: EmployeeListResponse =
            serde_json::from_value(json!({ "employees": [] })).expect("list");
        assert_eq!(decoded.count, 0);
    }
}
