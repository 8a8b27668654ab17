//! Exercises the client against a loopback HTTP server: wire formats,
//! authentication, and the expired-cursor recovery path over real requests.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::{Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use parley_core::{ChatClient, ClientError, Credentials, EventQueue, QueueItem, Recipient};

#[derive(Clone, Default)]
struct ServerState {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Default)]
struct Inner {
    registrations: u32,
    events_delivered: bool,
    sent_bodies: Vec<String>,
    auth_headers: Vec<String>,
    history_queries: Vec<HashMap<String, String>>,
    fail_subscriptions: bool,
}

impl ServerState {
    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap()
    }
}

fn record_auth(inner: &mut Inner, headers: &HeaderMap) {
    if let Some(auth) = headers.get(header::AUTHORIZATION) {
        inner
            .auth_headers
            .push(auth.to_str().unwrap_or_default().to_string());
    }
}

async fn register(State(state): State<ServerState>, headers: HeaderMap) -> Json<Value> {
    let mut inner = state.lock();
    record_auth(&mut inner, &headers);
    inner.registrations += 1;
    Json(json!({
        "result": "success",
        "queue_id": format!("queue-{}", inner.registrations),
        "last_event_id": -1,
    }))
}

async fn events(
    State(state): State<ServerState>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    let mut inner = state.lock();
    // The first queue id always reads as expired, forcing a recovery.
    if params.get("queue_id").map(String::as_str) == Some("queue-1") {
        return Json(json!({"result": "error", "msg": "Bad event queue id: queue-1"}));
    }
    if inner.events_delivered {
        return Json(json!({"result": "success", "events": []}));
    }
    inner.events_delivered = true;
    Json(json!({
        "result": "success",
        "events": [
            {
                "id": 5,
                "message": {
                    "sender_full_name": "Ada Lovelace",
                    "display_recipient": "general",
                    "subject": "standup",
                    "content": "<p>hi</p>",
                }
            },
            {
                "id": 8,
                "message": {
                    "sender_full_name": "Grace Hopper",
                    "display_recipient": ["Ada Lovelace", "Grace Hopper"],
                    "subject": "",
                    "content": "ping",
                }
            }
        ],
    }))
}

async fn history(
    State(state): State<ServerState>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    state.lock().history_queries.push(params);
    Json(json!({
        "messages": [
            {
                "id": 3,
                "sender_full_name": "Ada Lovelace",
                "display_recipient": "general",
                "subject": "archives",
                "content": "<p>old &amp; new</p>",
            }
        ]
    }))
}

async fn send_message(
    State(state): State<ServerState>,
    headers: HeaderMap,
    body: String,
) -> Json<Value> {
    let mut inner = state.lock();
    record_auth(&mut inner, &headers);
    inner.sent_bodies.push(body);
    Json(json!({"result": "success", "id": 42}))
}

async fn list_subscriptions(State(state): State<ServerState>) -> axum::response::Response {
    if state.lock().fail_subscriptions {
        return (StatusCode::BAD_GATEWAY, "upstream exploded").into_response();
    }
    Json(json!({
        "subscriptions": [
            {"name": "general", "color": "#fff"},
            {"name": "engines", "color": "#000"},
        ]
    }))
    .into_response()
}

async fn add_subscriptions(State(state): State<ServerState>, body: String) -> Json<Value> {
    state.lock().sent_bodies.push(body);
    Json(json!({"result": "success"}))
}

async fn spawn_server(state: ServerState) -> SocketAddr {
    let app = Router::new()
        .route("/api/v1/register", post(register))
        .route("/api/v1/events", get(events))
        .route("/api/v1/messages", get(history).post(send_message))
        .route("/api/v1/users/me/subscriptions", get(list_subscriptions))
        .route("/api/v1/subscriptions", post(add_subscriptions))
        .with_state(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn client_for(addr: SocketAddr) -> ChatClient {
    ChatClient::new(Credentials {
        server: format!("http://{addr}"),
        email: "tester@example.com".to_string(),
        api_key: "sekrit".to_string(),
    })
    .unwrap()
}

#[tokio::test]
async fn stream_message_body_matches_the_wire_format() {
    let state = ServerState::default();
    let addr = spawn_server(state.clone()).await;
    let client = client_for(addr);

    client
        .send_stream_message("general", "standup", "done")
        .await
        .unwrap();

    let inner = state.lock();
    assert_eq!(
        inner.sent_bodies,
        vec!["type=stream&to=general&subject=standup&content=done".to_string()]
    );
    // Basic auth over email:api_key.
    assert_eq!(
        inner.auth_headers,
        vec!["Basic dGVzdGVyQGV4YW1wbGUuY29tOnNla3JpdA==".to_string()]
    );
}

#[tokio::test]
async fn private_message_body_is_form_encoded() {
    let state = ServerState::default();
    let addr = spawn_server(state.clone()).await;
    let client = client_for(addr);

    client
        .send_private_message("Grace Hopper", "hello there")
        .await
        .unwrap();

    assert_eq!(
        state.lock().sent_bodies,
        vec!["type=private&to=Grace+Hopper&content=hello+there".to_string()]
    );
}

#[tokio::test]
async fn queue_recovers_from_an_expired_cursor_without_losing_events() {
    let state = ServerState::default();
    let addr = spawn_server(state.clone()).await;
    let client = client_for(addr);

    let mut queue = EventQueue::open(client).await.unwrap();
    assert_eq!(queue.cursor().queue_id, "queue-1");

    // queue-1 reads as expired; recovery registers queue-2 and the same
    // poll then delivers both events exactly once.
    let first = match queue.next().await.unwrap() {
        QueueItem::Message(message) => message,
        QueueItem::Idle => panic!("expected a message"),
    };
    assert_eq!(first.event_id, 5);
    assert_eq!(first.sender, "Ada Lovelace");
    assert_eq!(first.recipient, Recipient::Channel("general".to_string()));
    assert_eq!(first.content, "hi");

    let second = match queue.next().await.unwrap() {
        QueueItem::Message(message) => message,
        QueueItem::Idle => panic!("expected a message"),
    };
    assert_eq!(second.event_id, 8);
    assert!(second.is_private());

    assert_eq!(queue.next().await.unwrap(), QueueItem::Idle);

    assert_eq!(state.lock().registrations, 2);
    assert_eq!(queue.cursor().queue_id, "queue-2");
    assert_eq!(queue.cursor().last_event_id, 8);
}

#[tokio::test]
async fn unread_backlog_passes_the_anchor_parameters_and_normalizes() {
    let state = ServerState::default();
    let addr = spawn_server(state.clone()).await;
    let client = client_for(addr);

    let messages = client.unread_messages(10, 10).await.unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].event_id, 3);
    assert_eq!(messages[0].content, "old & new");

    let inner = state.lock();
    let query = &inner.history_queries[0];
    assert_eq!(query.get("anchor").map(String::as_str), Some("0"));
    assert_eq!(query.get("num_before").map(String::as_str), Some("10"));
    assert_eq!(query.get("num_after").map(String::as_str), Some("10"));
    assert_eq!(
        query.get("use_first_unread_anchor").map(String::as_str),
        Some("true")
    );
    assert_eq!(query.get("narrow").map(String::as_str), Some("[]"));
}

#[tokio::test]
async fn subscription_list_and_join_round_trip() {
    let state = ServerState::default();
    let addr = spawn_server(state.clone()).await;
    let client = client_for(addr);

    let channels = client.subscriptions().await.unwrap();
    assert_eq!(channels, vec!["general".to_string(), "engines".to_string()]);

    client.subscribe(&["rust".to_string()]).await.unwrap();
    assert_eq!(
        state.lock().sent_bodies,
        vec!["subscriptions=%5B%7B%22name%22%3A%22rust%22%7D%5D".to_string()]
    );
}

#[tokio::test]
async fn non_success_status_surfaces_the_server_text() {
    let state = ServerState::default();
    state.lock().fail_subscriptions = true;
    let addr = spawn_server(state.clone()).await;
    let client = client_for(addr);

    let err = client.subscriptions().await.unwrap_err();
    match err {
        ClientError::Status { status, body } => {
            assert_eq!(status, StatusCode::BAD_GATEWAY);
            assert_eq!(body, "upstream exploded");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}
