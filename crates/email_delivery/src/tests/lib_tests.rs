use super::*;
use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use tokio::{
    net::TcpListener,
    sync::{oneshot, Mutex},
};

#[derive(Clone)]
struct ProviderState {
    tx: Arc<Mutex<Option<oneshot::Sender<EmailSendRequest>>>>,
    reply: (StatusCode, &'static str),
}

async fn handle_send(
    State(state): State<ProviderState>,
    Json(payload): Json<EmailSendRequest>,
) -> (StatusCode, &'static str) {
    if let Some(tx) = state.tx.lock().await.take() {
        let _ = tx.send(payload);
    }
    state.reply
}

async fn spawn_provider(
    reply: (StatusCode, &'static str),
) -> (String, oneshot::Receiver<EmailSendRequest>) {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let (tx, rx) = oneshot::channel();
    let state = ProviderState {
        tx: Arc::new(Mutex::new(Some(tx))),
        reply,
    };
    let app = Router::new()
        .route("/api/v1.0/email/send", post(handle_send))
        .with_state(state);
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    (format!("http://{addr}/api/v1.0/email/send"), rx)
}

fn config_for(endpoint: String) -> EmailJsConfig {
    EmailJsConfig {
        endpoint,
        service_id: "service_test".into(),
        template_id: "template_test".into(),
        public_key: "public_test".into(),
        timeout_ms: DEFAULT_TIMEOUT_MS,
    }
}

fn sample_message() -> ContactMessage {
    ContactMessage {
        name: "A".into(),
        email: "a@b.com".into(),
        message: "hi".into(),
    }
}

#[tokio::test]
async fn send_posts_fields_and_identifier_triple() {
    let (endpoint, payload_rx) = spawn_provider((StatusCode::OK, "OK")).await;
    let client = EmailJsClient::new(config_for(endpoint)).expect("client");

    client.send(&sample_message()).await.expect("send");

    let payload = payload_rx.await.expect("payload");
    assert_eq!(payload.service_id, "service_test");
    assert_eq!(payload.template_id, "template_test");
    assert_eq!(payload.user_id, "public_test");
    assert_eq!(payload.template_params.from_name, "A");
    assert_eq!(payload.template_params.from_email, "a@b.com");
    assert_eq!(payload.template_params.message, "hi");
}

#[tokio::test]
async fn provider_rejection_keeps_status_and_body_for_diagnostics() {
    let (endpoint, _payload_rx) =
        spawn_provider((StatusCode::BAD_REQUEST, "The template ID is invalid")).await;
    let client = EmailJsClient::new(config_for(endpoint)).expect("client");

    let err = client.send(&sample_message()).await.expect_err("must fail");
    assert_eq!(
        err,
        DeliveryError::Rejected {
            status: 400,
            body: "The template ID is invalid".into(),
        }
    );
    assert_eq!(err.user_message(), "Failed to send message. Try again later.");
}

#[tokio::test]
async fn unreachable_provider_is_a_transport_error() {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let client = EmailJsClient::new(config_for(format!("http://{addr}/send"))).expect("client");
    let err = client.send(&sample_message()).await.expect_err("must fail");
    assert!(matches!(err, DeliveryError::Transport(_)), "unexpected error: {err}");
}

#[tokio::test]
async fn stalled_provider_fails_once_the_configured_timeout_elapses() {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((stream, _)) = listener.accept().await {
            held.push(stream);
        }
    });

    let config = EmailJsConfig {
        timeout_ms: 200,
        ..config_for(format!("http://{addr}/send"))
    };
    let client = EmailJsClient::new(config).expect("client");
    let err = tokio::time::timeout(
        std::time::Duration::from_secs(5),
        client.send(&sample_message()),
    )
    .await
    .expect("client timeout fires first")
    .expect_err("must fail");
    assert!(matches!(err, DeliveryError::Transport(_)), "unexpected error: {err}");
}

#[tokio::test]
async fn missing_delivery_always_fails() {
    let err = MissingEmailDelivery
        .send(&sample_message())
        .await
        .expect_err("must fail");
    assert!(matches!(err, DeliveryError::Unavailable(_)));
}

#[test]
fn rejects_malformed_configuration() {
    let err = EmailJsClient::new(config_for("not a url".into()))
        .err()
        .expect("bad endpoint");
    assert!(matches!(err, DeliveryError::Configuration(_)));

    let mut config = EmailJsConfig::default();
    config.public_key = "  ".into();
    let err = EmailJsClient::new(config).err().expect("empty key");
    assert_eq!(
        err,
        DeliveryError::Configuration("public_key is empty".into())
    );
}

#[test]
fn default_config_targets_emailjs() {
    let client = EmailJsClient::new(EmailJsConfig::default()).expect("client");
    assert_eq!(client.endpoint().host_str(), Some("api.emailjs.com"));
}
