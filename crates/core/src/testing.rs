//! In-memory stand-in for the clinic API used by the unit tests of this crate.

use crate::draft::Draft;
use crate::record::{Procedure, Record, RecordId};
use crate::remote::RemoteResources;
use crate::resource::ResourceKind;
use crate::session::Session;
use crate::{ClientError, ClientResult};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::{BTreeMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

#[derive(Default)]
pub struct FakeRemote {
    collections: Mutex<BTreeMap<ResourceKind, Vec<Record>>>,
    procedures: Vec<Procedure>,
    failing: Mutex<HashSet<ResourceKind>>,
    fail_procedures: Mutex<bool>,
    update_reply_id: Mutex<Option<RecordId>>,
    next_id: AtomicUsize,
    calls: AtomicUsize,
}

pub fn record(value: Value) -> Record {
    serde_json::from_value(value).expect("test record")
}

fn server_error(kind: ResourceKind) -> ClientError {
    ClientError::UnexpectedStatus {
        status: 500,
        url: format!("fake://api/{}/", kind),
    }
}

impl FakeRemote {
    pub fn seeded() -> Self {
        let remote = Self {
            procedures: vec![
                Procedure {
                    code: "cleaning".into(),
                    label: "Cleaning".into(),
                },
                Procedure {
                    code: "filling".into(),
                    label: "Filling".into(),
                },
            ],
            next_id: AtomicUsize::new(100),
            ..Self::default()
        };
        remote.seed(
            ResourceKind::Patient,
            vec![
                json!({"id": 1, "name": "Ada Lovelace", "date_of_birth": "1990-04-01", "address": "1 Main St", "phone_number": "555-0100", "ssn_no": "111", "gender": "female"}),
                json!({"id": 2, "name": "Grace Hopper", "date_of_birth": "1985-12-09", "address": "2 Side St", "phone_number": "555-0101", "ssn_no": "222", "gender": "female"}),
            ],
        );
        remote.seed(
            ResourceKind::Doctor,
            vec![
                json!({"id": 1, "name": "Dr Molar", "specialties": "cleaning", "email": "molar@example.org", "phone_number": "555-0200", "npi": "9"}),
            ],
        );
        remote.seed(
            ResourceKind::Clinic,
            vec![
                json!({"id": 1, "name": "Downtown", "city": "Springfield", "state": "IL", "phone_number": "555-0300", "email": "dt@example.org", "address": "3 Centre Rd"}),
            ],
        );
        remote.seed(ResourceKind::Affiliation, vec![]);
        remote.seed(
            ResourceKind::Appointment,
            vec![
                json!({"id": 1, "patient": 1, "doctor": 1, "clinic": 1, "procedure": "cleaning", "date": "2024-05-01T09:30:00Z", "date_booked": "2024-04-01T10:00:00Z"}),
                json!({"id": 2, "patient": 2, "doctor": 1, "clinic": 1, "procedure": "filling", "date": "2024-05-02T11:00:00Z", "date_booked": "2024-04-02T10:00:00Z"}),
            ],
        );
        remote
    }

    pub fn seed(&self, kind: ResourceKind, values: Vec<Value>) {
        let records = values.into_iter().map(record).collect();
        self.collections.lock().unwrap().insert(kind, records);
    }

    pub fn fail_kind(&self, kind: ResourceKind) {
        self.failing.lock().unwrap().insert(kind);
    }

    pub fn fail_procedures(&self) {
        *self.fail_procedures.lock().unwrap() = true;
    }

    /// Makes every later update answer with a record carrying `id`.
    pub fn answer_updates_as(&self, id: RecordId) {
        *self.update_reply_id.lock().unwrap() = Some(id);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn stored(&self, kind: ResourceKind) -> Vec<Record> {
        self.collections
            .lock()
            .unwrap()
            .get(&kind)
            .cloned()
            .unwrap_or_default()
    }

    fn check(&self, session: &Session, kind: ResourceKind) -> ClientResult<()> {
        session.authorize()?;
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.lock().unwrap().contains(&kind) {
            return Err(server_error(kind));
        }
        Ok(())
    }

    fn from_body(id: RecordId, draft: &Draft) -> Record {
        let Value::Object(fields) = draft.to_body() else {
            unreachable!("draft bodies are objects")
        };
        Record::new(id, fields)
    }
}

#[async_trait]
impl RemoteResources for FakeRemote {
    async fn list(&self, session: &Session, kind: ResourceKind) -> ClientResult<Vec<Record>> {
        self.check(session, kind)?;
        Ok(self.stored(kind))
    }

    async fn get(
        &self,
        session: &Session,
        kind: ResourceKind,
        id: RecordId,
    ) -> ClientResult<Record> {
        self.check(session, kind)?;
        self.stored(kind)
            .into_iter()
            .find(|r| r.id == id)
            .ok_or(ClientError::UnexpectedStatus {
                status: 404,
                url: format!("fake://api/{}/{}/", kind, id),
            })
    }

    async fn create(&self, session: &Session, draft: &Draft) -> ClientResult<Record> {
        let kind = draft.kind();
        self.check(session, kind)?;
        let id = RecordId::new(self.next_id.fetch_add(1, Ordering::SeqCst) as u64);
        let created = Self::from_body(id, draft);
        self.collections
            .lock()
            .unwrap()
            .entry(kind)
            .or_default()
            .push(created.clone());
        Ok(created)
    }

    async fn update(&self, session: &Session, id: RecordId, draft: &Draft) -> ClientResult<Record> {
        let kind = draft.kind();
        self.check(session, kind)?;
        let reply_id = self.update_reply_id.lock().unwrap().unwrap_or(id);
        let updated = Self::from_body(reply_id, draft);
        let mut collections = self.collections.lock().unwrap();
        let slot = collections
            .entry(kind)
            .or_default()
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(ClientError::UnexpectedStatus {
                status: 404,
                url: format!("fake://api/{}/{}/", kind, id),
            })?;
        *slot = updated.clone();
        Ok(updated)
    }

    async fn delete(&self, session: &Session, kind: ResourceKind, id: RecordId) -> ClientResult<()> {
        self.check(session, kind)?;
        self.collections
            .lock()
            .unwrap()
            .entry(kind)
            .or_default()
            .retain(|r| r.id != id);
        Ok(())
    }

    async fn procedures(&self, session: &Session) -> ClientResult<Vec<Procedure>> {
        session.authorize()?;
        self.calls.fetch_add(1, Ordering::SeqCst);
        if *self.fail_procedures.lock().unwrap() {
            return Err(ClientError::UnexpectedStatus {
                status: 500,
                url: "fake://api/procedures/".into(),
            });
        }
        Ok(self.procedures.clone())
    }
}
