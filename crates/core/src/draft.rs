//! Form drafts.
//!
//! A [`Draft`] is the uncommitted copy of a record's editable fields, bound to the form controls.
//! It is only committed to a list by the view-model once the server accepted it.

use crate::record::Record;
use crate::resource::{ResourceKind, ResourceSpec};
use crate::{ClientError, ClientResult};
use serde_json::{Map, Value};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Draft {
    spec: &'static ResourceSpec,
    values: Vec<(&'static str, String)>,
}

impl Draft {
    /// Empty template for a creation form.
    pub fn empty(spec: &'static ResourceSpec) -> Self {
        Self {
            spec,
            values: spec.fields.iter().map(|f| (f.name, String::new())).collect(),
        }
    }

    /// Edit form pre-populated from an existing record.
    pub fn from_record(spec: &'static ResourceSpec, record: &Record) -> Self {
        Self {
            spec,
            values: spec
                .fields
                .iter()
                .map(|f| (f.name, record.text(f.name)))
                .collect(),
        }
    }

    pub fn kind(&self) -> ResourceKind {
        self.spec.kind
    }

    pub fn spec(&self) -> &'static ResourceSpec {
        self.spec
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn set(&mut self, name: &str, value: impl Into<String>) -> ClientResult<()> {
        let kind = self.spec.kind;
        let slot = self
            .values
            .iter_mut()
            .find(|(n, _)| *n == name)
            .ok_or_else(|| ClientError::UnknownField {
                kind,
                field: name.to_string(),
            })?;
        slot.1 = value.into();
        Ok(())
    }

    pub fn fields(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.values.iter().map(|(n, v)| (*n, v.as_str()))
    }

    /// Presence check only: the first blank field is reported.
    pub fn validate(&self) -> ClientResult<()> {
        match self.values.iter().find(|(_, v)| v.trim().is_empty()) {
            Some((name, _)) => Err(ClientError::MissingField(*name)),
            None => Ok(()),
        }
    }

    /// Complete request body: every editable field, as typed.
    pub fn to_body(&self) -> Value {
        let map: Map<String, Value> = self
            .values
            .iter()
            .map(|(n, v)| (n.to_string(), Value::String(v.clone())))
            .collect();
        Value::Object(map)
    }
}
