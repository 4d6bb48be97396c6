//! Generic resource-list view-model.
//!
//! [`ResourceList`] owns the in-memory collection of one resource kind, its load state, the
//! lookup lists its form needs and the current [`ViewState`]. It is parametrised by a
//! [`ResourceSpec`] and a [`RemoteResources`] implementation; there is no per-resource code.
//!
//! ## Reconciliation
//!
//! The collection is fetched once by [`ResourceList::load`]. Afterwards it only changes by
//! applying the server's response to a successful mutation:
//!
//! - create appends the returned record (carrying the server-assigned id)
//! - update replaces the entry with the same id, leaving every other `Arc` untouched
//! - delete removes the entry, preserving the order of the rest
//!
//! Nothing is applied before the server confirms, so a failed mutation leaves the collection
//! exactly as it was and nothing needs rolling back. Failures are logged; load failures
//! additionally replace the whole view with a generic message.
//!
//! Mutations take `&mut self`, so calls against one list are serialised by their owner and the
//! last one to complete determines the state.

use crate::constants::LOOKUP_FAILED_MESSAGE;
use crate::draft::Draft;
use crate::lookups::Lookups;
use crate::record::{display_datetime, Record, RecordId};
use crate::remote::RemoteResources;
use crate::resource::{FieldKind, FieldSpec, ResourceKind, ResourceSpec};
use crate::session::Session;
use crate::view_state::ViewState;
use crate::{ClientError, ClientResult};
use std::sync::Arc;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Ready,
    Failed(String),
}

/// What the list renders: a loading marker, the error alone, or the table.
#[derive(Debug, PartialEq)]
pub enum ListView<'a> {
    Loading,
    Error(&'a str),
    Table(&'a [Arc<Record>]),
}

pub struct ResourceList<R: ?Sized> {
    spec: &'static ResourceSpec,
    remote: Arc<R>,
    session: Arc<Session>,
    collection: Vec<Arc<Record>>,
    load_state: LoadState,
    view: ViewState,
    lookups: Lookups,
    lookup_error: Option<String>,
}

impl<R: RemoteResources + ?Sized> ResourceList<R> {
    pub fn new(remote: Arc<R>, session: Arc<Session>, kind: ResourceKind) -> Self {
        Self {
            spec: kind.spec(),
            remote,
            session,
            collection: Vec::new(),
            load_state: LoadState::Loading,
            view: ViewState::Closed,
            lookups: Lookups::default(),
            lookup_error: None,
        }
    }

    pub fn spec(&self) -> &'static ResourceSpec {
        self.spec
    }

    pub fn kind(&self) -> ResourceKind {
        self.spec.kind
    }

    pub fn records(&self) -> &[Arc<Record>] {
        &self.collection
    }

    pub fn record(&self, id: RecordId) -> Option<&Arc<Record>> {
        self.collection.iter().find(|r| r.id == id)
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    pub fn view_state(&self) -> &ViewState {
        &self.view
    }

    pub fn lookups(&self) -> &Lookups {
        &self.lookups
    }

    /// Message shown with the form when its lookup lists could not be fetched.
    pub fn lookup_error(&self) -> Option<&str> {
        self.lookup_error.as_deref()
    }

    pub fn view(&self) -> ListView<'_> {
        match &self.load_state {
            LoadState::Loading => ListView::Loading,
            LoadState::Failed(message) => ListView::Error(message),
            LoadState::Ready => ListView::Table(&self.collection),
        }
    }

    /// Fetches the collection and, concurrently, the lookup lists the form needs.
    pub async fn load(&mut self) {
        self.load_state = LoadState::Loading;
        let kind = self.spec.kind;
        let sources = self.spec.lookup_sources();

        let (records, lookups) = futures::join!(
            self.remote.list(&self.session, kind),
            Lookups::fetch(&*self.remote, &self.session, &sources)
        );

        match records {
            Ok(records) => {
                tracing::debug!("loaded {} {}", records.len(), kind);
                self.collection = records.into_iter().map(Arc::new).collect();
                self.load_state = LoadState::Ready;
            }
            Err(e) => {
                tracing::error!("failed to load {}: {}", kind, e);
                self.collection.clear();
                self.load_state = LoadState::Failed(self.spec.load_error.to_string());
            }
        }

        self.apply_lookups(lookups);
    }

    /// Fetches only the lookup lists, leaving the collection untouched.
    pub async fn load_lookups(&mut self) {
        let sources = self.spec.lookup_sources();
        let lookups = Lookups::fetch(&*self.remote, &self.session, &sources).await;
        self.apply_lookups(lookups);
    }

    fn apply_lookups(&mut self, lookups: ClientResult<Lookups>) {
        match lookups {
            Ok(lookups) => {
                self.lookups = lookups;
                self.lookup_error = None;
            }
            Err(e) => {
                tracing::warn!("failed to load lookups for {}: {}", self.spec.kind, e);
                self.lookups = Lookups::default();
                self.lookup_error = Some(LOOKUP_FAILED_MESSAGE.to_string());
            }
        }
    }

    /// Fetches one record straight from the server without touching the collection.
    pub async fn fetch_one(&self, id: RecordId) -> ClientResult<Record> {
        self.remote.get(&self.session, self.spec.kind, id).await
    }

    fn check_draft(&self, draft: &Draft) -> ClientResult<()> {
        if draft.kind() != self.spec.kind {
            return Err(ClientError::DraftKindMismatch {
                draft: draft.kind(),
                list: self.spec.kind,
            });
        }
        draft.validate()
    }

    fn require(&self, id: RecordId) -> ClientResult<&Arc<Record>> {
        self.record(id).ok_or(ClientError::UnknownRecord {
            kind: self.spec.kind,
            id,
        })
    }

    /// Creates a record; on success it is appended and the creation form closes.
    pub async fn create(&mut self, draft: &Draft) -> ClientResult<RecordId> {
        self.check_draft(draft)?;

        match self.remote.create(&self.session, draft).await {
            Ok(record) => {
                let id = record.id;
                apply_created(&mut self.collection, record);
                if matches!(self.view, ViewState::Creating(_)) {
                    self.view = ViewState::Closed;
                }
                tracing::info!("created {} {}", self.spec.singular, id);
                Ok(id)
            }
            Err(e) => {
                tracing::warn!("failed to add {}: {}", self.spec.singular, e);
                Err(e)
            }
        }
    }

    /// Replaces a record with the full draft; on success the edit form closes.
    pub async fn update(&mut self, id: RecordId, draft: &Draft) -> ClientResult<()> {
        self.require(id)?;
        self.check_draft(draft)?;

        let result = self
            .remote
            .update(&self.session, id, draft)
            .await
            .and_then(|record| {
                if record.id == id {
                    Ok(record)
                } else {
                    Err(ClientError::IdMismatch {
                        kind: self.spec.kind,
                        expected: id,
                        returned: record.id,
                    })
                }
            });

        match result {
            Ok(record) => {
                apply_updated(&mut self.collection, id, record);
                if matches!(self.view, ViewState::Editing { id: editing, .. } if editing == id) {
                    self.view = ViewState::Closed;
                }
                tracing::info!("updated {} {}", self.spec.singular, id);
                Ok(())
            }
            Err(e) => {
                tracing::warn!("failed to update {} {}: {}", self.spec.singular, id, e);
                Err(e)
            }
        }
    }

    pub async fn delete(&mut self, id: RecordId) -> ClientResult<()> {
        match self.remote.delete(&self.session, self.spec.kind, id).await {
            Ok(()) => {
                apply_deleted(&mut self.collection, id);
                if self.view.selection() == Some(id) {
                    self.view = ViewState::Closed;
                }
                tracing::info!("deleted {} {}", self.spec.singular, id);
                Ok(())
            }
            Err(e) => {
                tracing::warn!("failed to delete {} {}: {}", self.spec.singular, id, e);
                Err(e)
            }
        }
    }

    /// Opens the read-only panel for a record.
    pub fn select(&mut self, id: RecordId) -> ClientResult<()> {
        self.require(id)?;
        self.view = ViewState::Viewing(id);
        Ok(())
    }

    /// Clears the selection.
    pub fn deselect(&mut self) {
        self.close();
    }

    /// Closes whatever panel or form is open, discarding any draft.
    pub fn close(&mut self) {
        self.view = ViewState::Closed;
    }

    pub fn selected(&self) -> Option<&Arc<Record>> {
        self.view.selection().and_then(|id| self.record(id))
    }

    pub fn begin_create(&mut self) {
        self.view = ViewState::Creating(Draft::empty(self.spec));
    }

    pub fn begin_edit(&mut self, id: RecordId) -> ClientResult<()> {
        let draft = Draft::from_record(self.spec, self.require(id)?);
        self.view = ViewState::Editing { id, draft };
        Ok(())
    }

    pub fn set_field(&mut self, name: &str, value: impl Into<String>) -> ClientResult<()> {
        self.view
            .draft_mut()
            .ok_or(ClientError::NoOpenForm)?
            .set(name, value)
    }

    /// Sends the open form to create or update. The form stays open if the call fails.
    pub async fn submit(&mut self) -> ClientResult<RecordId> {
        match self.view.clone() {
            ViewState::Creating(draft) => self.create(&draft).await,
            ViewState::Editing { id, draft } => self.update(id, &draft).await.map(|()| id),
            ViewState::Closed | ViewState::Viewing(_) => Err(ClientError::NoOpenForm),
        }
    }

    /// Display text of one cell: references and procedures resolve to their labels when the
    /// lookups know them, timestamps are shortened.
    pub fn display_value(&self, record: &Record, field: &FieldSpec) -> String {
        let raw = record.text(field.name);
        match field.kind {
            FieldKind::Reference(_) | FieldKind::Procedure => self
                .lookups
                .label_for(field, &raw)
                .map(str::to_string)
                .unwrap_or(raw),
            FieldKind::Choice(choices) => choices
                .iter()
                .find(|c| c.value == raw)
                .map(|c| c.label.to_string())
                .unwrap_or(raw),
            FieldKind::DateTime => display_datetime(&raw),
            FieldKind::Text | FieldKind::Date | FieldKind::Email | FieldKind::Phone => raw,
        }
    }

    /// Table row for a record, in [`ResourceSpec::table_columns`] order.
    pub fn display_row(&self, record: &Record) -> Vec<String> {
        self.spec
            .table_columns()
            .map(|field| self.display_value(record, field))
            .collect()
    }
}

/// Appends a newly created record, replacing any stale entry with the same id.
pub fn apply_created(collection: &mut Vec<Arc<Record>>, record: Record) {
    match collection.iter_mut().find(|r| r.id == record.id) {
        Some(slot) => *slot = Arc::new(record),
        None => collection.push(Arc::new(record)),
    }
}

/// Replaces the entry with `id` by the server's record. Returns whether an entry matched.
///
/// A record carrying a different id is not applied, so ids stay unique.
pub fn apply_updated(collection: &mut [Arc<Record>], id: RecordId, record: Record) -> bool {
    if record.id != id {
        return false;
    }
    match collection.iter_mut().find(|r| r.id == id) {
        Some(slot) => {
            *slot = Arc::new(record);
            true
        }
        None => false,
    }
}

/// Removes the entry with `id`. Returns whether an entry was removed.
pub fn apply_deleted(collection: &mut Vec<Arc<Record>>, id: RecordId) -> bool {
    let before = collection.len();
    collection.retain(|r| r.id != id);
    collection.len() != before
}
