//! In-process stand-in for the clinic's REST API.
//!
//! Serves `/api/{resource}/` and `/api/{resource}/{id}/` on an ephemeral port with the same
//! bearer-token check, trailing-slash paths and status codes as the Django backend.

#![allow(dead_code)]

use axum::extract::{Path as AxumPath, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Map, Value};
use smile_core::{CoreConfig, Session};
use std::collections::{BTreeMap, HashSet};
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const TOKEN: &str = "test-token";

/// How long a stalled endpoint waits before answering.
pub const STALL: Duration = Duration::from_secs(3);

type HandlerResult = Result<(StatusCode, Json<Value>), (StatusCode, &'static str)>;

#[derive(Default)]
pub struct MockState {
    collections: Mutex<BTreeMap<String, Vec<Map<String, Value>>>>,
    failing: Mutex<HashSet<String>>,
    stalled: Mutex<HashSet<String>>,
    next_id: AtomicU64,
    requests: AtomicUsize,
}

impl MockState {
    fn authorise(&self, headers: &HeaderMap) -> Result<(), (StatusCode, &'static str)> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        let expected = format!("Bearer {}", TOKEN);
        match headers.get(header::AUTHORIZATION).and_then(|v| v.to_str().ok()) {
            Some(value) if value == expected => Ok(()),
            _ => Err((StatusCode::UNAUTHORIZED, "Invalid token")),
        }
    }

    fn check(&self, headers: &HeaderMap, resource: &str) -> Result<(), (StatusCode, &'static str)> {
        self.authorise(headers)?;
        if self.failing.lock().unwrap().contains(resource) {
            return Err((StatusCode::INTERNAL_SERVER_ERROR, "Internal error"));
        }
        Ok(())
    }
}

pub struct MockApi {
    pub base: String,
    state: Arc<MockState>,
}

impl MockApi {
    pub async fn start() -> Self {
        let state = Arc::new(MockState {
            next_id: AtomicU64::new(100),
            ..MockState::default()
        });

        let app = Router::new()
            .route("/api/:resource/", get(list).post(create))
            .route(
                "/api/:resource/:id/",
                get(read_one).put(update).delete(remove),
            )
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base: format!("http://{}", addr),
            state,
        }
    }

    /// Server seeded with one small clinic.
    pub async fn seeded() -> Self {
        let api = Self::start().await;
        api.seed(
            "patients",
            vec![
                json!({"id": 1, "name": "Ada Lovelace", "date_of_birth": "1990-04-01", "address": "1 Main St", "phone_number": "555-0100", "ssn_no": "111", "gender": "female"}),
                json!({"id": 2, "name": "Grace Hopper", "date_of_birth": "1985-12-09", "address": "2 Side St", "phone_number": "555-0101", "ssn_no": "222", "gender": "female"}),
                json!({"id": 3, "name": "Alan Turing", "date_of_birth": "1970-06-23", "address": "3 Hill Rd", "phone_number": "555-0102", "ssn_no": "333", "gender": "male"}),
            ],
        );
        api.seed(
            "doctors",
            vec![json!({"id": 1, "name": "Dr Molar", "specialties": "cleaning", "email": "molar@example.org", "phone_number": "555-0200", "npi": "9"})],
        );
        api.seed(
            "clinics",
            vec![json!({"id": 1, "name": "Downtown", "city": "Springfield", "state": "IL", "phone_number": "555-0300", "email": "dt@example.org", "address": "3 Centre Rd"})],
        );
        api.seed("affiliations", vec![]);
        api.seed(
            "appointments",
            vec![json!({"id": 1, "patient": 1, "doctor": 1, "clinic": 1, "procedure": "cleaning", "date": "2024-05-01T09:30:00Z", "date_booked": "2024-04-01T10:00:00Z"})],
        );
        api
    }

    pub fn seed(&self, resource: &str, records: Vec<Value>) {
        let records = records
            .into_iter()
            .filter_map(|r| match r {
                Value::Object(map) => Some(map),
                _ => None,
            })
            .collect();
        self.state
            .collections
            .lock()
            .unwrap()
            .insert(resource.to_string(), records);
    }

    pub fn fail(&self, resource: &str) {
        self.state
            .failing
            .lock()
            .unwrap()
            .insert(resource.to_string());
    }

    /// Makes list requests for `resource` answer only after [`STALL`].
    pub fn stall(&self, resource: &str) {
        self.state
            .stalled
            .lock()
            .unwrap()
            .insert(resource.to_string());
    }

    pub fn requests(&self) -> usize {
        self.state.requests.load(Ordering::SeqCst)
    }

    pub fn stored(&self, resource: &str) -> Vec<Value> {
        self.state
            .collections
            .lock()
            .unwrap()
            .get(resource)
            .map(|records| records.iter().cloned().map(Value::Object).collect())
            .unwrap_or_default()
    }

    pub fn config(&self) -> CoreConfig {
        self.config_with_timeout(Duration::from_secs(5))
    }

    pub fn config_with_timeout(&self, timeout: Duration) -> CoreConfig {
        CoreConfig::new(&self.base, PathBuf::from("unused"), timeout).unwrap()
    }
}

pub fn session() -> Session {
    Session::with_expiry(TOKEN, None)
}

fn id_of(record: &Map<String, Value>) -> Option<u64> {
    record.get("id").and_then(Value::as_u64)
}

async fn list(
    State(state): State<Arc<MockState>>,
    AxumPath(resource): AxumPath<String>,
    headers: HeaderMap,
) -> HandlerResult {
    state.check(&headers, &resource)?;
    let stalled = state.stalled.lock().unwrap().contains(&resource);
    if stalled {
        tokio::time::sleep(STALL).await;
    }
    if resource == "procedures" {
        return Ok((
            StatusCode::OK,
            Json(json!([["cleaning", "Cleaning"], ["filling", "Filling"], ["extraction", "Extraction"]])),
        ));
    }

    let collections = state.collections.lock().unwrap();
    let records = collections
        .get(&resource)
        .ok_or((StatusCode::NOT_FOUND, "Not found"))?;
    let body = records.iter().cloned().map(Value::Object).collect();
    Ok((StatusCode::OK, Json(Value::Array(body))))
}

async fn create(
    State(state): State<Arc<MockState>>,
    AxumPath(resource): AxumPath<String>,
    headers: HeaderMap,
    Json(body): Json<Map<String, Value>>,
) -> HandlerResult {
    state.check(&headers, &resource)?;
    let mut record = body;
    let id = state.next_id.fetch_add(1, Ordering::SeqCst);
    record.insert("id".into(), json!(id));

    let mut collections = state.collections.lock().unwrap();
    let records = collections
        .get_mut(&resource)
        .ok_or((StatusCode::NOT_FOUND, "Not found"))?;
    records.push(record.clone());
    Ok((StatusCode::CREATED, Json(Value::Object(record))))
}

async fn read_one(
    State(state): State<Arc<MockState>>,
    AxumPath((resource, id)): AxumPath<(String, u64)>,
    headers: HeaderMap,
) -> HandlerResult {
    state.check(&headers, &resource)?;
    let collections = state.collections.lock().unwrap();
    let record = collections
        .get(&resource)
        .and_then(|records| records.iter().find(|r| id_of(r) == Some(id)))
        .ok_or((StatusCode::NOT_FOUND, "Not found"))?;
    Ok((StatusCode::OK, Json(Value::Object(record.clone()))))
}

async fn update(
    State(state): State<Arc<MockState>>,
    AxumPath((resource, id)): AxumPath<(String, u64)>,
    headers: HeaderMap,
    Json(body): Json<Map<String, Value>>,
) -> HandlerResult {
    state.check(&headers, &resource)?;
    let mut collections = state.collections.lock().unwrap();
    let slot = collections
        .get_mut(&resource)
        .and_then(|records| records.iter_mut().find(|r| id_of(r) == Some(id)))
        .ok_or((StatusCode::NOT_FOUND, "Not found"))?;

    let mut record = body;
    record.insert("id".into(), json!(id));
    *slot = record.clone();
    Ok((StatusCode::OK, Json(Value::Object(record))))
}

async fn remove(
    State(state): State<Arc<MockState>>,
    AxumPath((resource, id)): AxumPath<(String, u64)>,
    headers: HeaderMap,
) -> Result<StatusCode, (StatusCode, &'static str)> {
    state.check(&headers, &resource)?;
    let mut collections = state.collections.lock().unwrap();
    let records = collections
        .get_mut(&resource)
        .ok_or((StatusCode::NOT_FOUND, "Not found"))?;
    let before = records.len();
    records.retain(|r| id_of(r) != Some(id));
    if records.len() == before {
        return Err((StatusCode::NOT_FOUND, "Not found"));
    }
    Ok(StatusCode::NO_CONTENT)
}
