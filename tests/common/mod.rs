use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{StatusCode as ServerStatus, Uri};
use axum::{Json, Router};
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

use formrelay::config::Config;
use formrelay::notify::target::{BotTarget, SecondaryTarget, Targets};

pub const SECRET: &str = "test-secret-key";
pub const SECONDARY_APP: &str = "Orbit";
pub const ALLOWED_ORIGIN: &str = "https://app.example.com";
pub const PRIMARY_TOKEN: &str = "111:primary";
pub const SECONDARY_TOKEN: &str = "222:secondary";
/// A token the fake chat endpoint answers with 502.
pub const BROKEN_TOKEN: &str = "999:broken";

pub const CHROME_WINDOWS: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
pub const GOOGLEBOT: &str =
    "Mozilla/5.0 (compatible; Googlebot/2.1; +http://www.google.com/bot.html)";

/// One `sendMessage` call received by the fake chat endpoint.
#[derive(Debug, Clone)]
pub struct Delivered {
    pub path: String,
    pub chat_id: String,
    pub text: String,
}

type Outbox = Arc<Mutex<Vec<Delivered>>>;

/// A running relay plus the fake chat endpoint it forwards to.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    outbox: Outbox,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Everything forwarded so far.
    pub fn delivered(&self) -> Vec<Delivered> {
        self.outbox.lock().unwrap().clone()
    }

    /// POST JSON with the correct api key, return (body, status).
    pub async fn post(&self, path: &str, body: &Value) -> (Value, StatusCode) {
        self.post_with_key(path, Some(SECRET), body).await
    }

    pub async fn post_with_key(
        &self,
        path: &str,
        key: Option<&str>,
        body: &Value,
    ) -> (Value, StatusCode) {
        let mut req = self.client.post(self.url(path)).json(body);
        if let Some(key) = key {
            req = req.header("x-api-key", key);
        }
        let resp = req.send().await.expect("post request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }
}

pub fn primary_path() -> String {
    format!("/bot{PRIMARY_TOKEN}/sendMessage")
}

pub fn secondary_path() -> String {
    format!("/bot{SECONDARY_TOKEN}/sendMessage")
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with(PRIMARY_TOKEN).await
}

/// Spawn a relay whose primary target uses `primary_token`.
pub async fn spawn_app_with(primary_token: &str) -> TestApp {
    let outbox: Outbox = Arc::new(Mutex::new(Vec::new()));
    let chat_addr = spawn_chat_endpoint(outbox.clone()).await;
    let api_base = format!("http://{chat_addr}");

    let config = Config {
        secret_key: SECRET.to_string(),
        host: "127.0.0.1".parse().unwrap(),
        port: 0, // unused, we bind to random port
        targets: Targets {
            primary: BotTarget::telegram(&api_base, primary_token, "-1001"),
            secondary: Some(SecondaryTarget {
                app_name: SECONDARY_APP.to_string(),
                target: BotTarget::telegram(&api_base, SECONDARY_TOKEN, "-1002"),
            }),
        },
        allowed_origins: vec![ALLOWED_ORIGIN.to_string()],
        notify_timeout_secs: 5,
        max_body_size: 102_400,
        log_level: "warn".to_string(),
    };

    let app = formrelay::build_app(config).expect("Failed to build app");

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    TestApp {
        addr,
        client: Client::new(),
        outbox,
    }
}

/// Stand-in for the Bot API: records every call, fails for [`BROKEN_TOKEN`].
async fn spawn_chat_endpoint(outbox: Outbox) -> SocketAddr {
    let router = Router::new()
        .fallback(record_message)
        .with_state(outbox);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind chat endpoint");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("Chat endpoint failed");
    });

    addr
}

async fn record_message(
    State(outbox): State<Outbox>,
    uri: Uri,
    Json(body): Json<Value>,
) -> (ServerStatus, Json<Value>) {
    if uri.path().contains(BROKEN_TOKEN) {
        return (
            ServerStatus::BAD_GATEWAY,
            Json(json!({ "ok": false, "description": "upstream down" })),
        );
    }

    outbox.lock().unwrap().push(Delivered {
        path: uri.path().to_string(),
        chat_id: body["chat_id"].as_str().unwrap_or_default().to_string(),
        text: body["text"].as_str().unwrap_or_default().to_string(),
    });

    (ServerStatus::OK, Json(json!({ "ok": true, "result": {} })))
}

/// A complete, valid visitor event from an ordinary browser.
pub fn visitor_event() -> Value {
    json!({
        "info": "landing",
        "appName": "Beacon",
        "url": "https://app.example.com/welcome",
        "referer": "https://search.example.com/?q=beacon",
        "location": {
            "country": "Norway",
            "countryEmoji": "🇳🇴",
            "city": "Oslo",
            "ipAddress": "203.0.113.7"
        },
        "agent": CHROME_WINDOWS,
        "vpnDetected": false,
        "date": "2024-01-15T12:00:00Z"
    })
}
