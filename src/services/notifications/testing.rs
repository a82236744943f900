//! Local stand-ins for the platform APIs used by tests.
//!
//! Each mock is a plain axum router served on an ephemeral loopback port;
//! adapters are pointed at it through their `api_base_url`.

use crate::config::settings::{PlatformsConfig, SlackConfig, TelegramConfig, WhatsAppConfig};
use axum::{
    Json, Router,
    extract::Request,
    http::StatusCode,
    middleware,
    routing::{get, post},
};
use serde_json::json;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::net::TcpListener;

/// Serves `router` on 127.0.0.1 and returns its base URL.
pub(crate) async fn spawn_mock_api(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock api listener");
    let address = listener.local_addr().expect("mock api address");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve mock api");
    });
    format!("http://{}", address)
}

/// A mock that accepts every call of all three platforms.
pub(crate) fn healthy_platform_api() -> Router {
    Router::new()
        .route(
            "/chat.postMessage",
            post(|| async { Json(json!({"ok": true, "ts": "1700000000.000100"})) }),
        )
        .route(
            "/auth.test",
            post(|| async { Json(json!({"ok": true, "team": "LAN", "user": "notifier"})) }),
        )
        .route(
            "/{bot}/sendMessage",
            post(|| async { Json(json!({"ok": true, "result": {"message_id": 7}})) }),
        )
        .route(
            "/{bot}/getMe",
            get(|| async { Json(json!({"ok": true, "result": {"username": "lan_bot"}})) }),
        )
        .route(
            "/2010-04-01/Accounts/{sid}/Messages.json",
            post(|| async {
                (
                    StatusCode::CREATED,
                    Json(json!({"sid": "SM123", "status": "queued"})),
                )
            }),
        )
        .route(
            "/2010-04-01/Accounts/{sid}",
            get(|| async { Json(json!({"friendly_name": "LAN", "status": "active"})) }),
        )
}

/// [`healthy_platform_api`] plus a counter of every request it receives.
pub(crate) fn counting_platform_api() -> (Router, Arc<AtomicUsize>) {
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();
    let router = healthy_platform_api().layer(middleware::map_request(move |request: Request| {
        let counter = counter.clone();
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
            request
        }
    }));
    (router, hits)
}

/// A mock where Slack succeeds and Telegram rejects every message.
pub(crate) fn mixed_platform_api() -> Router {
    Router::new()
        .route(
            "/chat.postMessage",
            post(|| async { Json(json!({"ok": true, "ts": "1700000000.000100"})) }),
        )
        .route(
            "/{bot}/sendMessage",
            post(|| async {
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({
                        "ok": false,
                        "error_code": 400,
                        "description": "Bad Request: chat not found"
                    })),
                )
            }),
        )
}

/// Credentials for all three platforms pointing at `base_url`.
pub(crate) fn all_platforms(base_url: &str) -> PlatformsConfig {
    PlatformsConfig {
        slack: SlackConfig {
            token: "xoxb-test".to_string(),
            api_base_url: base_url.to_string(),
            ..Default::default()
        },
        telegram: TelegramConfig {
            token: "123456:test-token".to_string(),
            chat_id: "42".to_string(),
            api_base_url: base_url.to_string(),
        },
        whatsapp: WhatsAppConfig {
            account_sid: "AC0123456789".to_string(),
            auth_token: "auth-token".to_string(),
            from_number: "+14155238886".to_string(),
            to_number: "+15005550006".to_string(),
            api_base_url: base_url.to_string(),
        },
    }
}
