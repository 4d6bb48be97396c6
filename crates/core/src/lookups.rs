//! Read-only lookup lists feeding reference and procedure fields.
//!
//! A form whose schema references other resources (appointments reference patients, doctors and
//! clinics; appointments and doctors pick from the procedures catalogue) fetches those lists in
//! parallel when its view-model is activated. Lookups are never mutated from the form.

use crate::record::RecordId;
use crate::remote::RemoteResources;
use crate::resource::{FieldSpec, LookupSource};
use crate::session::Session;
use crate::ClientResult;
use futures::future::try_join_all;
use std::collections::BTreeMap;

/// One selectable option: the value sent to the server and the label shown to the user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LookupOption {
    pub value: String,
    pub label: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Lookups {
    options: BTreeMap<LookupSource, Vec<LookupOption>>,
}

impl Lookups {
    /// Fetches every source concurrently. Any failure fails the whole set.
    pub async fn fetch<R>(remote: &R, session: &Session, sources: &[LookupSource]) -> ClientResult<Self>
    where
        R: RemoteResources + ?Sized,
    {
        let fetched = try_join_all(sources.iter().map(|source| async move {
            let options: Vec<LookupOption> = match *source {
                LookupSource::Records(kind) => remote
                    .list(session, kind)
                    .await?
                    .into_iter()
                    .map(|record| {
                        let name = record.text("name");
                        LookupOption {
                            value: record.id.to_string(),
                            label: if name.is_empty() {
                                record.id.to_string()
                            } else {
                                name
                            },
                        }
                    })
                    .collect(),
                LookupSource::Procedures => remote
                    .procedures(session)
                    .await?
                    .into_iter()
                    .map(|p| LookupOption {
                        value: p.code,
                        label: p.label,
                    })
                    .collect(),
            };
            ClientResult::Ok((*source, options))
        }))
        .await?;

        Ok(Self {
            options: fetched.into_iter().collect(),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn options(&self, source: LookupSource) -> &[LookupOption] {
        self.options.get(&source).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Options offered by a field's control; empty for free-text fields.
    pub fn options_for(&self, field: &FieldSpec) -> &[LookupOption] {
        field
            .kind
            .lookup_source()
            .map(|source| self.options(source))
            .unwrap_or(&[])
    }

    /// Display label for a stored value, when the value is a known option.
    pub fn label_for(&self, field: &FieldSpec, value: &str) -> Option<&str> {
        self.options_for(field)
            .iter()
            .find(|o| o.value == value)
            .map(|o| o.label.as_str())
    }

    /// Label of a record in a referenced resource.
    pub fn record_label(&self, source: LookupSource, id: RecordId) -> Option<&str> {
        let wanted = id.to_string();
        self.options(source)
            .iter()
            .find(|o| o.value == wanted)
            .map(|o| o.label.as_str())
    }
}
