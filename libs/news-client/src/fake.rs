//! In-process stand-in for the remote news API, bound to an ephemeral
//! local port. Records every request it sees and can be told to fail.

use std::{net::SocketAddr, sync::Arc};

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use entity::prelude::*;
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::Mutex, task::JoinHandle};

const EDITABLE_KEYS: [&str; 5] = [
    "title",
    "description",
    "category",
    "editorFirstName",
    "editorLastName",
];

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub content_type: Option<String>,
    pub body: Option<Value>,
}

#[derive(Default)]
struct FakeState {
    items: Mutex<Vec<NewsItem>>,
    requests: Mutex<Vec<RecordedRequest>>,
    fail_with: Mutex<Option<StatusCode>>,
    raw_list: Mutex<Option<String>>,
}

pub struct FakeNewsApi {
    pub base_url: String,
    state: Arc<FakeState>,
    handle: JoinHandle<()>,
}

impl FakeNewsApi {
    pub async fn start(items: Vec<NewsItem>) -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let address: SocketAddr = listener.local_addr()?;

        let state = Arc::new(FakeState {
            items: Mutex::new(items),
            ..Default::default()
        });
        let router = router(state.clone());

        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });

        Ok(Self {
            base_url: format!("http://{}", address),
            state,
            handle,
        })
    }

    pub async fn items(&self) -> Vec<NewsItem> {
        self.state.items.lock().await.clone()
    }

    pub async fn set_items(&self, items: Vec<NewsItem>) {
        *self.state.items.lock().await = items;
    }

    pub async fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().await.clone()
    }

    /// Every route answers with `status` until reset with `None`.
    pub async fn fail_with(&self, status: Option<StatusCode>) {
        *self.state.fail_with.lock().await = status;
    }

    /// Serve `body` verbatim from `GET /news`.
    pub async fn respond_to_list_with(&self, body: Option<String>) {
        *self.state.raw_list.lock().await = body;
    }
}

impl Drop for FakeNewsApi {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn router(state: Arc<FakeState>) -> Router {
    Router::new()
        .route("/news", get(list).post(create))
        .route("/news/:id", get(get_one).put(update).delete(delete))
        .with_state(state)
}

async fn record(
    state: &FakeState,
    method: Method,
    uri: &Uri,
    headers: &HeaderMap,
    body: &Bytes,
) -> Option<Response> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);

    state.requests.lock().await.push(RecordedRequest {
        method: method.to_string(),
        path: uri.path().to_string(),
        content_type,
        body: serde_json::from_slice(body).ok(),
    });

    let failure = *state.fail_with.lock().await;
    failure.map(|status| (status, "injected failure").into_response())
}

async fn list(
    State(state): State<Arc<FakeState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    if let Some(failure) = record(&state, method, &uri, &headers, &body).await
    {
        return failure;
    }

    if let Some(raw) = state.raw_list.lock().await.clone() {
        return (StatusCode::OK, raw).into_response();
    }

    Json(state.items.lock().await.clone()).into_response()
}

async fn get_one(
    State(state): State<Arc<FakeState>>,
    Path(id): Path<String>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    if let Some(failure) = record(&state, method, &uri, &headers, &body).await
    {
        return failure;
    }

    let id = NewsId::from(id);
    let items = state.items.lock().await;
    match items.iter().find(|item| item.id == id) {
        Some(item) => Json(item.clone()).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn create(
    State(state): State<Arc<FakeState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    if let Some(failure) = record(&state, method, &uri, &headers, &body).await
    {
        return failure;
    }

    let mut value = match serde_json::from_slice::<Value>(&body) {
        Ok(value) if value.is_object() => value,
        _ => return StatusCode::BAD_REQUEST.into_response(),
    };

    let mut items = state.items.lock().await;
    let next_id = items
        .iter()
        .filter_map(|item| item.id.as_str().parse::<i64>().ok())
        .max()
        .unwrap_or(0)
        + 1;
    value["id"] = json!(next_id);
    value["likes"] = json!(0);

    let Ok(item) = serde_json::from_value::<NewsItem>(value) else {
        return StatusCode::BAD_REQUEST.into_response();
    };
    items.push(item.clone());

    (StatusCode::CREATED, Json(item)).into_response()
}

async fn update(
    State(state): State<Arc<FakeState>>,
    Path(id): Path<String>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    if let Some(failure) = record(&state, method, &uri, &headers, &body).await
    {
        return failure;
    }

    let patch = match serde_json::from_slice::<Value>(&body) {
        Ok(patch) if patch.is_object() => patch,
        _ => return StatusCode::BAD_REQUEST.into_response(),
    };

    let id = NewsId::from(id);
    let mut items = state.items.lock().await;
    let Some(position) = items.iter().position(|item| item.id == id) else {
        return StatusCode::NOT_FOUND.into_response();
    };

    let Ok(mut value) = serde_json::to_value(&items[position]) else {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    };
    for key in EDITABLE_KEYS {
        if let Some(field) = patch.get(key) {
            value[key] = field.clone();
        }
    }
    value["dateUpdated"] =
        patch.get("updatedAt").cloned().unwrap_or(Value::Null);

    let Ok(item) = serde_json::from_value::<NewsItem>(value) else {
        return StatusCode::BAD_REQUEST.into_response();
    };
    items[position] = item.clone();

    Json(item).into_response()
}

async fn delete(
    State(state): State<Arc<FakeState>>,
    Path(id): Path<String>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    if let Some(failure) = record(&state, method, &uri, &headers, &body).await
    {
        return failure;
    }

    let id = NewsId::from(id);
    let mut items = state.items.lock().await;
    match items.iter().position(|item| item.id == id) {
        Some(position) => {
            items.remove(position);
            StatusCode::OK.into_response()
        }
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
