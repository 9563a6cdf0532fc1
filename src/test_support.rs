//! In-process stand-in for the Solr select handler.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

use crate::solr::SolrClient;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Mode {
    Normal,
    HttpError,
    Malformed,
    FailedHeader,
    /// Answers only after `SLOW_RESPONSE`
    Slow,
}

pub const SLOW_RESPONSE: Duration = Duration::from_secs(3);

struct FakeState {
    docs: Vec<Value>,
    mode: Mode,
    requests: Mutex<Vec<HashMap<String, String>>>,
}

pub struct FakeSolr {
    pub base_url: String,
    state: Arc<FakeState>,
}

impl FakeSolr {
    pub async fn spawn(docs: Vec<Value>) -> Self {
        Self::start(docs, Mode::Normal).await
    }

    pub async fn with_mode(mode: Mode) -> Self {
        Self::start(vec![], mode).await
    }

    async fn start(docs: Vec<Value>, mode: Mode) -> Self {
        let state = Arc::new(FakeState {
            docs,
            mode,
            requests: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route("/solr/:core/select", get(select))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}/solr", addr),
            state,
        }
    }

    pub fn client(&self) -> SolrClient {
        SolrClient::with_timeout(&self.base_url, "core", Duration::from_secs(5)).unwrap()
    }

    pub fn last_params(&self) -> HashMap<String, String> {
        self.state.requests.lock().unwrap().last().cloned().unwrap_or_default()
    }

    pub fn request_count(&self) -> usize {
        self.state.requests.lock().unwrap().len()
    }
}

/// URL of a port nothing listens on
pub async fn unreachable_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/solr", addr)
}

async fn select(
    State(state): State<Arc<FakeState>>,
    Path(_core): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    state.requests.lock().unwrap().push(params.clone());

    match state.mode {
        Mode::HttpError => return (StatusCode::INTERNAL_SERVER_ERROR, "solr exploded").into_response(),
        Mode::Malformed => return (StatusCode::OK, "<html>not json</html>").into_response(),
        Mode::FailedHeader => {
            return Json(json!({"responseHeader": {"status": 400, "QTime": 0}})).into_response()
        }
        Mode::Slow => tokio::time::sleep(SLOW_RESPONSE).await,
        Mode::Normal => {}
    }

    let q = params.get("q").map(String::as_str).unwrap_or("*:*");
    let hits: Vec<Value> = state
        .docs
        .iter()
        .filter(|doc| q == "*:*" || clauses(q).iter().any(|(f, v)| field_matches(doc, f, v)))
        .cloned()
        .collect();
    let num_found = hits.len();
    let docs = if params.get("rows").map(String::as_str) == Some("0") {
        vec![]
    } else {
        hits
    };

    Json(json!({
        "responseHeader": {"status": 0, "QTime": 1},
        "response": {"numFound": num_found, "start": 0, "docs": docs}
    }))
    .into_response()
}

fn clauses(q: &str) -> Vec<(String, String)> {
    q.split(" OR ")
        .filter_map(|clause| clause.split_once(':'))
        .map(|(field, value)| (field.to_string(), value.trim_matches('"').to_string()))
        .collect()
}

fn field_matches(doc: &Value, field: &str, value: &str) -> bool {
    match doc.get(field) {
        Some(Value::String(s)) => s == value,
        Some(Value::Array(items)) => items.iter().any(|i| i.as_str() == Some(value)),
        _ => false,
    }
}
