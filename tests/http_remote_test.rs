//! HttpRemote against an in-process fake endpoint

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio_test::{assert_err, assert_ok};

use vocab_deck::config::RemoteConfig;
use vocab_deck::models::{PendingOperation, WordEntry};
use vocab_deck::remote::{HttpRemote, SheetRemote};
use vocab_deck::VocabError;

type Received = Arc<Mutex<Vec<Value>>>;

async fn list_words() -> Json<Value> {
    Json(json!({
        "result": "success",
        "words": [
            {"word": "Apple", "meaning": "fruit", "synonyms": "pome, malus", "pos": null},
            {"word": "", "meaning": "blank row"},
            42,
            {"word": "Banana", "hindiMeaning": "केला", "synonyms": ["plantain"]}
        ]
    }))
}

async fn record_write(State(received): State<Received>, Json(body): Json<Value>) -> Json<Value> {
    received.lock().unwrap().push(body);
    Json(json!({"result": "success"}))
}

async fn slow() -> Json<Value> {
    tokio::time::sleep(Duration::from_secs(3)).await;
    Json(json!({"result": "success", "words": []}))
}

async fn broken() -> (StatusCode, &'static str) {
    (StatusCode::INTERNAL_SERVER_ERROR, "script error")
}

async fn html() -> &'static str {
    "<html><body>Service unavailable</body></html>"
}

async fn reject() -> Json<Value> {
    Json(json!({"result": "error", "message": "sheet locked"}))
}

/// Serve the fake endpoint on an ephemeral port
async fn spawn_endpoint() -> (String, Received) {
    let received: Received = Arc::default();
    let router = Router::new()
        .route("/exec", get(list_words).post(record_write))
        .route("/slow", get(slow).post(slow))
        .route("/broken", get(broken).post(broken))
        .route("/html", get(html).post(html))
        .route("/reject", get(reject).post(reject))
        .with_state(received.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind fake endpoint");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve");
    });
    (format!("http://{}", addr), received)
}

fn client(base: &str, path: &str) -> HttpRemote {
    let config = RemoteConfig {
        endpoint: format!("{}{}", base, path),
        read_timeout_secs: 1,
        ..RemoteConfig::default()
    };
    HttpRemote::new(&config).expect("client")
}

/// Rows are normalized and invalid ones dropped
#[tokio::test]
async fn test_fetch_words_normalizes_rows() {
    let (base, _) = spawn_endpoint().await;
    let words = client(&base, "/exec").fetch_words().await.expect("fetch");

    assert_eq!(words.len(), 2);
    assert_eq!(words[0].word, "Apple");
    assert_eq!(words[0].synonyms, vec!["pome", "malus"]);
    assert_eq!(words[0].pos, "");
    assert_eq!(words[1].hindi_meaning, "केला");
    assert_eq!(words[1].answer_text(), "केला");
}

/// Operations are posted as flat JSON with the action tag
#[tokio::test]
async fn test_send_posts_flat_operation() {
    let (base, received) = spawn_endpoint().await;
    let remote = client(&base, "/exec");

    let op = PendingOperation::Update {
        old_word: "colour".into(),
        entry: WordEntry::new("Color").with_meaning("hue"),
    };
    assert_ok!(remote.send(&op, Duration::from_secs(5)).await);
    assert_ok!(
        remote
            .send(&PendingOperation::Delete { word: "gone".into() }, Duration::from_secs(4))
            .await
    );

    let bodies = received.lock().unwrap().clone();
    assert_eq!(bodies.len(), 2);
    assert_eq!(bodies[0]["action"], "update");
    assert_eq!(bodies[0]["oldWord"], "colour");
    assert_eq!(bodies[0]["word"], "Color");
    assert_eq!(bodies[0]["meaning"], "hue");
    assert_eq!(bodies[1], json!({"action": "delete", "word": "gone"}));
}

/// A slow endpoint is cut off by the read timeout
#[tokio::test]
async fn test_fetch_times_out() {
    let (base, _) = spawn_endpoint().await;
    let err = client(&base, "/slow").fetch_words().await.unwrap_err();
    assert!(matches!(err, VocabError::Timeout(1)), "got {err:?}");
    assert!(err.is_remote());
}

/// Writes use the timeout they are given
#[tokio::test]
async fn test_send_times_out() {
    let (base, _) = spawn_endpoint().await;
    let op = PendingOperation::Create(WordEntry::new("late"));
    let err = client(&base, "/slow")
        .send(&op, Duration::from_millis(200))
        .await
        .unwrap_err();
    assert!(matches!(err, VocabError::Timeout(_)), "got {err:?}");
}

/// Non-2xx, HTML and rejected results are distinct failures
#[tokio::test]
async fn test_failure_variants() {
    let (base, _) = spawn_endpoint().await;
    let op = PendingOperation::Create(WordEntry::new("x"));

    let err = client(&base, "/broken").fetch_words().await.unwrap_err();
    assert!(matches!(err, VocabError::RemoteStatus { status: 500, .. }), "got {err:?}");

    let err = client(&base, "/html").fetch_words().await.unwrap_err();
    assert!(matches!(err, VocabError::MalformedResponse(_)), "got {err:?}");

    let err = client(&base, "/html").send(&op, Duration::from_secs(5)).await.unwrap_err();
    assert!(matches!(err, VocabError::MalformedResponse(_)), "got {err:?}");

    let err = client(&base, "/reject").send(&op, Duration::from_secs(5)).await.unwrap_err();
    assert!(matches!(err, VocabError::Rejected(ref r) if r == "error"), "got {err:?}");
    assert!(err.is_remote());
}

/// Nothing listening is a transport failure
#[tokio::test]
async fn test_unreachable_endpoint() {
    let remote = client("http://127.0.0.1:9", "/exec");
    let err = assert_err!(remote.fetch_words().await);
    assert!(err.is_remote(), "got {err:?}");
}
