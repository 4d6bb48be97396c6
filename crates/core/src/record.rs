//! Records as returned by the clinic API.

use crate::{ClientError, ClientResult};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Server-assigned primary key of a record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(u64);

impl RecordId {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RecordId {
    type Err = ClientError;

    fn from_str(s: &str) -> ClientResult<Self> {
        s.trim().parse::<u64>().map(Self).map_err(|_| {
            ClientError::InvalidInput(format!("record id must be a positive integer, got: '{}'", s))
        })
    }
}

/// One entity instance: the identifier plus every other field the server sent.
///
/// Field values are kept as raw JSON so unknown or server-computed fields survive a round trip
/// through the view-model untouched.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    #[serde(flatten)]
    fields: Map<String, Value>,
}

impl Record {
    pub fn new(id: RecordId, fields: Map<String, Value>) -> Self {
        Self { id, fields }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Plain-text form of a field, as a form control would hold it.
    ///
    /// Missing and null fields read as empty.
    pub fn text(&self, name: &str) -> String {
        self.fields.get(name).map(value_text).unwrap_or_default()
    }
}

pub(crate) fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(value_text)
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}

/// Human-readable rendering of a date or timestamp; anything unparseable is returned as is.
pub fn display_datetime(raw: &str) -> String {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return ts.format("%Y-%m-%d %H:%M").to_string();
    }
    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(ts) = NaiveDateTime::parse_from_str(raw, pattern) {
            return ts.format("%Y-%m-%d %H:%M").to_string();
        }
    }
    if let Ok(day) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return day.format("%Y-%m-%d").to_string();
    }
    raw.to_string()
}

/// Entry of the procedures catalogue, sent by the server as a `[code, label]` pair.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(String, String)", into = "(String, String)")]
pub struct Procedure {
    pub code: String,
    pub label: String,
}

impl From<(String, String)> for Procedure {
    fn from((code, label): (String, String)) -> Self {
        Self { code, label }
    }
}

impl From<Procedure> for (String, String) {
    fn from(p: Procedure) -> Self {
        (p.code, p.label)
    }
}
