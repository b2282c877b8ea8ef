use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Backend-assigned employee identifier. Opaque to clients; held as text even
/// when a backend hands out numeric ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct EmployeeId(pub String);

impl EmployeeId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EmployeeId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for EmployeeId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl<'de> Deserialize<'de> for EmployeeId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Signed(i64),
            Unsigned(u64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(text) => Self(text),
            RawId::Signed(n) => Self(n.to_string()),
            RawId::Unsigned(n) => Self(n.to_string()),
        })
    }
}

/// Hire dates travel as strings and are held as calendar dates.
pub mod hire_date {
    use chrono::{DateTime, NaiveDate, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    const WIRE_FORMAT: &str = "%Y-%m-%d";
    const DISPLAY_FORMAT: &str = "%a %b %d %Y";
    pub const INVALID_DATE: &str = "Invalid Date";

    /// Accepts `YYYY-MM-DD` or an RFC 3339 timestamp (UTC calendar date).
    pub fn parse(raw: &str) -> Option<NaiveDate> {
        let raw = raw.trim();
        if let Ok(date) = NaiveDate::parse_from_str(raw, WIRE_FORMAT) {
            return Some(date);
        }
        DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|ts| ts.with_timezone(&Utc).date_naive())
    }

    pub fn to_wire(date: NaiveDate) -> String {
        date.format(WIRE_FORMAT).to_string()
    }

    /// Renders like `Date.prototype.toDateString`, e.g. `Mon Jan 01 2024`.
    pub fn display(date: Option<NaiveDate>) -> String {
        match date {
            Some(date) => date.format(DISPLAY_FORMAT).to_string(),
            None => INVALID_DATE.to_string(),
        }
    }

    /// Missing, null, or unparseable values become `None` instead of failing the
    /// whole payload.
    pub mod lenient {
        use super::*;

        pub fn serialize<S>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            match date {
                Some(date) => serializer.serialize_str(&to_wire(*date)),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
        where
            D: Deserializer<'de>,
        {
            #[derive(Deserialize)]
            #[serde(untagged)]
            enum RawDate {
                Text(String),
                Other(de::IgnoredAny),
            }

            Ok(match Option::<RawDate>::deserialize(deserializer)? {
                Some(RawDate::Text(raw)) => parse(&raw),
                Some(RawDate::Other(_)) | None => None,
            })
        }
    }

    pub mod required {
        use super::*;

        pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            serializer.serialize_str(&to_wire(*date))
        }

        pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
        where
            D: Deserializer<'de>,
        {
            let raw = String::deserialize(deserializer)?;
            parse(&raw).ok_or_else(|| de::Error::custom(format!("invalid hire date '{raw}'")))
        }
    }
}

/// Display-string fields: numbers and booleans are kept as their text form,
/// null becomes empty.
pub(crate) mod display_text {
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawText {
            Text(String),
            Integer(i64),
            Float(f64),
            Flag(bool),
        }

        Ok(match Option::<RawText>::deserialize(deserializer)? {
            Some(RawText::Text(text)) => text,
            Some(RawText::Integer(n)) => n.to_string(),
            Some(RawText::Float(n)) => n.to_string(),
            Some(RawText::Flag(b)) => b.to_string(),
            None => String::new(),
        })
    }
}
