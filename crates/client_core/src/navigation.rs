//! Navigation state shared by the filter and table: the `employed` query
//! parameter and the `/edit/{id}` route.

use serde::{Deserialize, Serialize};
use shared::domain::EmployeeId;
use url::form_urlencoded;

pub const EMPLOYED_PARAM: &str = "employed";
const EDIT_PREFIX: &str = "/edit/";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListQuery {
    pub employed: Option<String>,
}

impl ListQuery {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn employed(value: bool) -> Self {
        Self {
            employed: Some(value.to_string()),
        }
    }

    /// Parses `employed=...` from a query string; a leading `?` is optional and
    /// the first occurrence wins.
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let employed = form_urlencoded::parse(query.as_bytes())
            .find(|(key, _)| key == EMPLOYED_PARAM)
            .map(|(_, value)| value.into_owned());
        Self { employed }
    }

    /// The raw filter value. Empty counts as no filter.
    pub fn employed_filter(&self) -> Option<&str> {
        self.employed.as_deref().filter(|value| !value.is_empty())
    }

    pub fn to_query_string(&self) -> String {
        match &self.employed {
            Some(value) => {
                let encoded = form_urlencoded::Serializer::new(String::new())
                    .append_pair(EMPLOYED_PARAM, value)
                    .finish();
                format!("?{encoded}")
            }
            None => String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    List(ListQuery),
    Edit(EmployeeId),
}

impl Default for Route {
    fn default() -> Self {
        Route::List(ListQuery::default())
    }
}

impl Route {
    pub fn parse(location: &str) -> Option<Self> {
        let (path, query) = match location.split_once('?') {
            Some((path, query)) => (path, query),
            None => (location, ""),
        };
        if path.is_empty() || path == "/" {
            return Some(Route::List(ListQuery::parse(query)));
        }
        let id = path.strip_prefix(EDIT_PREFIX)?.trim_end_matches('/');
        if id.is_empty() || id.contains('/') {
            return None;
        }
        Some(Route::Edit(EmployeeId::from(id)))
    }

    pub fn to_path(&self) -> String {
        match self {
            Route::List(query) => format!("/{}", query.to_query_string()),
            Route::Edit(id) => format!("{EDIT_PREFIX}{id}"),
        }
    }
}

#[cfg(test)]
#[path = "tests/navigation_tests.rs"]
mod tests;
