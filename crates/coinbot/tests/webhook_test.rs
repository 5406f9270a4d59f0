//! Webhook server driven in-process with a recording sink

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use coinbot::server::{router, AppState, ROOT_TEXT};
use coinbot::telegram::ReplySink;
use coinbot::BotResult;
use coincore::{AdminGate, Engine, FixedDraws, Menu, RandomSource, Reply, UserStore};
use pretty_assertions::assert_eq;
use secrecy::SecretString;
use serde_json::json;
use teloxide::types::{CallbackQuery, ChatId};
use tokio::sync::Mutex;
use tower::ServiceExt;

const TOKEN: &str = "123:test-token";
const ADMIN: i64 = 1;

#[derive(Default)]
struct RecordingSink {
    sent: Mutex<Vec<(ChatId, Reply)>>,
    acked: Mutex<Vec<u64>>,
}

#[async_trait]
impl ReplySink for RecordingSink {
    async fn send(&self, chat_id: ChatId, reply: &Reply) -> BotResult<()> {
        self.sent.lock().await.push((chat_id, reply.clone()));
        Ok(())
    }

    async fn ack_callback(&self, query: &CallbackQuery) -> BotResult<()> {
        self.acked.lock().await.push(query.from.id.0);
        Ok(())
    }
}

struct Harness {
    sink: Arc<RecordingSink>,
    engine: Arc<Engine>,
    app: axum::Router,
}

/// Random source whose every draw panics.
struct PanickingDice;

impl RandomSource for PanickingDice {
    fn draw(&self, _low: u32, _high: u32) -> u32 {
        panic!("dice exploded")
    }
}

fn harness(draws: &[u32]) -> Harness {
    harness_with_dice(Arc::new(FixedDraws::new(draws.to_vec())))
}

fn harness_with_dice(dice: Arc<dyn RandomSource>) -> Harness {
    let engine = Arc::new(Engine::with_parts(Arc::new(UserStore::new()), AdminGate::single(ADMIN), dice));
    let sink = Arc::new(RecordingSink::default());
    let state = AppState::new(
        Arc::clone(&engine),
        Arc::clone(&sink) as Arc<dyn ReplySink>,
        SecretString::from(TOKEN.to_string()),
    );
    Harness {
        sink,
        engine,
        app: router(state),
    }
}

fn text_update(user: i64, text: &str) -> serde_json::Value {
    json!({
        "update_id": 1,
        "message": {
            "message_id": 10,
            "date": 1700000000,
            "chat": {"id": user, "type": "private", "first_name": "Ann"},
            "from": {"id": user, "is_bot": false, "first_name": "Ann"},
            "text": text
        }
    })
}

fn callback_update(user: i64, data: &str) -> serde_json::Value {
    json!({
        "update_id": 2,
        "callback_query": {
            "id": "cbq1",
            "from": {"id": user, "is_bot": false, "first_name": "Ann"},
            "chat_instance": "ci",
            "data": data,
            "message": {
                "message_id": 11,
                "date": 1700000000,
                "chat": {"id": user, "type": "private", "first_name": "Ann"},
                "text": "menu"
            }
        }
    })
}

fn post(path: &str, body: String) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap()
}

fn webhook_path() -> String {
    format!("/{}", TOKEN)
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn test_root_is_alive() {
    let h = harness(&[]);
    let response = h
        .app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, ROOT_TEXT);
}

#[tokio::test]
async fn test_start_sends_welcome_with_main_menu() {
    let h = harness(&[]);
    let response = h
        .app
        .oneshot(post(&webhook_path(), text_update(42, "/start").to_string()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "OK");

    let sent = h.sink.sent.lock().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].0, ChatId(42));
    assert_eq!(sent[0].1.menu, Some(Menu::Main));
    assert_eq!(h.engine.store().get(42).unwrap().coins, 100);
}

#[tokio::test]
async fn test_callback_is_acked_and_played() {
    let h = harness(&[1]);
    let response = h
        .app
        .oneshot(post(&webhook_path(), callback_update(42, "play").to_string()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    assert_eq!(*h.sink.acked.lock().await, vec![42]);
    assert_eq!(h.sink.sent.lock().await.len(), 1);
    assert_eq!(h.engine.store().get(42).unwrap().coins, 110);
}

#[tokio::test]
async fn test_wrong_token_is_not_found() {
    let h = harness(&[]);
    let response = h
        .app
        .oneshot(post("/not-the-token", text_update(42, "/start").to_string()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(h.sink.sent.lock().await.is_empty());
    assert!(h.engine.store().is_empty());
}

#[tokio::test]
async fn test_token_of_same_length_is_not_found() {
    let h = harness(&[]);
    let forged = format!("/{}", TOKEN.replace('t', "x"));
    assert_eq!(forged.len(), webhook_path().len());
    let response = h
        .app
        .oneshot(post(&forged, text_update(42, "/start").to_string()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(h.sink.sent.lock().await.is_empty());
}

#[tokio::test]
async fn test_handler_panic_gets_generic_reply_and_server_keeps_serving() {
    let h = harness_with_dice(Arc::new(PanickingDice));

    let response = h
        .app
        .clone()
        .oneshot(post(&webhook_path(), text_update(42, "/play").to_string()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "OK");

    let response = h
        .app
        .clone()
        .oneshot(post(&webhook_path(), text_update(42, "/balance").to_string()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    {
        let sent = h.sink.sent.lock().await;
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].1, Reply::internal_error());
        assert!(sent[1].1.text.contains("100"), "{}", sent[1].1.text);
    }

    let response = h
        .app
        .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let metrics = body_text(response).await;
    assert!(metrics.contains("coinbot_handler_failures_total{kind=\"panic\"}"), "{}", metrics);
}

#[tokio::test]
async fn test_invalid_json_is_bad_request() {
    let h = harness(&[]);
    let response = h
        .app
        .oneshot(post(&webhook_path(), "{not json".to_string()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(h.sink.sent.lock().await.is_empty());
}

#[tokio::test]
async fn test_non_text_update_is_acknowledged_silently() {
    let h = harness(&[]);
    let update = json!({
        "update_id": 5,
        "message": {
            "message_id": 12,
            "date": 1700000000,
            "chat": {"id": 42, "type": "private", "first_name": "Ann"},
            "from": {"id": 42, "is_bot": false, "first_name": "Ann"},
            "location": {"latitude": 1.0, "longitude": 2.0}
        }
    });
    let response = h.app.oneshot(post(&webhook_path(), update.to_string())).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(h.sink.sent.lock().await.is_empty());
}

#[tokio::test]
async fn test_admin_give_through_webhook() {
    let h = harness(&[]);
    let response = h
        .app
        .clone()
        .oneshot(post(&webhook_path(), text_update(ADMIN, "/give 500 25").to_string()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(h.engine.store().get(500).unwrap().coins, 125);

    h.app
        .oneshot(post(&webhook_path(), text_update(7, "/give 500 25").to_string()))
        .await
        .unwrap();
    assert_eq!(h.engine.store().get(500).unwrap().coins, 125);

    let sent = h.sink.sent.lock().await;
    assert!(sent[1].1.text.contains("Access denied"));
}

#[tokio::test]
async fn test_health_reports_accounts() {
    let h = harness(&[]);
    h.engine.store().ensure(1);
    h.engine.store().ensure(2);
    let response = h
        .app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["accounts"], 2);
}

#[tokio::test]
async fn test_metrics_exposes_update_counter() {
    let h = harness(&[]);
    h.app
        .clone()
        .oneshot(post(&webhook_path(), text_update(42, "/help").to_string()))
        .await
        .unwrap();
    let response = h
        .app
        .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("coinbot_updates_total"));
}
