use reqwest::header::CONTENT_TYPE;
use reqwest::{StatusCode, Url};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

/// Shown when a 2xx JSON body carries neither `response` nor `message`.
pub const GENERIC_ERROR_REPLY: &str = "Sorry, I encountered an error. Please try again.";

pub const TIMEOUT_NOTICE: &str = "Request timed out. The backend might be starting up (this can take 30-60 seconds on free hosting). Please try again.";
pub const NETWORK_NOTICE: &str = "Network error. Please check your connection and try again.";
pub const BACKEND_NOTICE: &str = "I'm having trouble connecting to my backend. Let me use my offline knowledge instead.";

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    message: &'a str,
}

#[derive(Debug, Default, Deserialize)]
struct ChatReply {
    #[serde(default)]
    response: Option<serde_json::Value>,
    #[serde(default)]
    message: Option<serde_json::Value>,
}

impl ChatReply {
    /// `response`, then `message`; blank or non-string values don't count.
    fn into_text(self) -> String {
        [self.response, self.message]
            .into_iter()
            .flatten()
            .find_map(|value| match value {
                serde_json::Value::String(s) if !s.trim().is_empty() => Some(s),
                _ => None,
            })
            .unwrap_or_else(|| GENERIC_ERROR_REPLY.to_string())
    }
}

#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("request timed out after {0:?}")]
    TimedOut(Duration),
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),
    #[error("HTTP error! status: {status}, body: {body}")]
    Status { status: StatusCode, body: String },
    #[error("unexpected response body: {0}")]
    Body(#[source] serde_json::Error),
    #[error("request failed: {0}")]
    Other(#[source] reqwest::Error),
}

impl RemoteError {
    /// Text surfaced to the user for this failure. Diagnostics stay in the log.
    pub fn notice(&self) -> &'static str {
        match self {
            RemoteError::TimedOut(_) => TIMEOUT_NOTICE,
            RemoteError::Network(_) => NETWORK_NOTICE,
            RemoteError::Status { .. } | RemoteError::Body(_) | RemoteError::Other(_) => {
                BACKEND_NOTICE
            }
        }
    }

    fn from_transport(err: reqwest::Error) -> Self {
        if err.is_connect() || (err.is_request() && !err.is_body() && !err.is_decode()) {
            RemoteError::Network(err)
        } else {
            RemoteError::Other(err)
        }
    }
}

/// Client for the hosted chat endpoint.
pub struct RemoteClient {
    http: reqwest::Client,
    endpoint: Url,
    timeout: Duration,
}

impl RemoteClient {
    pub fn new(endpoint: Url, timeout: Duration) -> Self {
        log::info!("🤖 Remote chat backend: {}", endpoint);
        Self {
            http: http_client(&endpoint),
            endpoint,
            timeout,
        }
    }

    /// Sends one message and returns the bot's reply text.
    ///
    /// A timer trips the cancellation token once `timeout` elapses; the
    /// in-flight exchange is dropped at that point.
    pub async fn ask(&self, message: &str) -> Result<String, RemoteError> {
        let cancel = CancellationToken::new();
        let timer = {
            let cancel = cancel.clone();
            let timeout = self.timeout;
            tokio::spawn(async move {
                tokio::time::sleep(timeout).await;
                log::warn!("⏰ Request timeout triggered after {:?}", timeout);
                cancel.cancel();
            })
        };

        let outcome = tokio::select! {
            _ = cancel.cancelled() => Err(RemoteError::TimedOut(self.timeout)),
            result = self.exchange(message) => result,
        };
        timer.abort();
        outcome
    }

    async fn exchange(&self, message: &str) -> Result<String, RemoteError> {
        log::debug!("🚀 POST {} payload={:?}", self.endpoint, message);

        let response = self
            .http
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, "application/json")
            .json(&ChatRequest { message })
            .send()
            .await
            .map_err(RemoteError::from_transport)?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        log::debug!("📥 Response status={} content-type={:?}", status, content_type);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log::warn!("❌ Backend error ({}): {}", status, body);
            return Err(RemoteError::Status { status, body });
        }

        let body = response.text().await.map_err(RemoteError::Other)?;
        let is_json = content_type
            .as_deref()
            .is_some_and(|ct| ct.contains("application/json"));

        if is_json {
            let value: serde_json::Value =
                serde_json::from_str(&body).map_err(RemoteError::Body)?;
            log::debug!("✅ JSON reply: {}", value);
            // Arrays would otherwise deserialize positionally into the struct.
            let reply = match value {
                serde_json::Value::Object(_) => {
                    serde_json::from_value::<ChatReply>(value).unwrap_or_default()
                }
                _ => ChatReply::default(),
            };
            Ok(reply.into_text())
        } else if body.trim().is_empty() {
            Ok(GENERIC_ERROR_REPLY.to_string())
        } else {
            Ok(body)
        }
    }
}

/// Local backends are reached directly, bypassing any system proxy.
fn http_client(endpoint: &Url) -> reqwest::Client {
    let mut builder = reqwest::Client::builder();
    if matches!(endpoint.host_str(), Some("localhost" | "127.0.0.1" | "[::1]")) {
        builder = builder.no_proxy();
    }
    builder.build().unwrap_or_else(|e| {
        log::warn!("⚠️ HTTP client setup failed ({}), using defaults", e);
        reqwest::Client::new()
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use axum::http::header;
    use axum::response::IntoResponse;
    use axum::routing::post;
    use axum::{Json, Router};
    use std::net::SocketAddr;

    /// Serves `router` on an ephemeral port and returns its `/chat` URL.
    pub(crate) async fn serve(router: Router) -> Url {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr: SocketAddr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        Url::parse(&format!("http://{addr}/chat")).unwrap()
    }

    /// A URL nothing listens on.
    pub(crate) async fn dead_endpoint() -> Url {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        Url::parse(&format!("http://{addr}/chat")).unwrap()
    }

    fn client(url: Url) -> RemoteClient {
        RemoteClient::new(url, Duration::from_secs(5))
    }

    #[tokio::test]
    async fn json_response_field_is_used() {
        let url = serve(Router::new().route(
            "/chat",
            post(|| async { Json(serde_json::json!({"response": "hi"})) }),
        ))
        .await;
        assert_eq!(client(url).ask("hello").await.unwrap(), "hi");
    }

    #[tokio::test]
    async fn json_message_field_is_second_choice() {
        let url = serve(Router::new().route(
            "/chat",
            post(|| async { Json(serde_json::json!({"response": "", "message": "from message"})) }),
        ))
        .await;
        assert_eq!(client(url).ask("hello").await.unwrap(), "from message");
    }

    #[tokio::test]
    async fn empty_json_object_yields_generic_reply() {
        let url = serve(Router::new().route(
            "/chat",
            post(|| async { Json(serde_json::json!({})) }),
        ))
        .await;
        assert_eq!(client(url).ask("hello").await.unwrap(), GENERIC_ERROR_REPLY);
    }

    #[tokio::test]
    async fn request_body_carries_the_message() {
        let url = serve(Router::new().route(
            "/chat",
            post(|Json(body): Json<serde_json::Value>| async move {
                Json(serde_json::json!({ "response": format!("echo: {}", body["message"].as_str().unwrap_or("")) }))
            }),
        ))
        .await;
        assert_eq!(client(url).ask("ping").await.unwrap(), "echo: ping");
    }

    #[tokio::test]
    async fn plain_text_body_is_used_verbatim() {
        let url = serve(Router::new().route(
            "/chat",
            post(|| async { ([(header::CONTENT_TYPE, "text/plain")], "just text").into_response() }),
        ))
        .await;
        assert_eq!(client(url).ask("hello").await.unwrap(), "just text");
    }

    #[tokio::test]
    async fn plain_text_whitespace_is_preserved() {
        let url = serve(Router::new().route(
            "/chat",
            post(|| async {
                ([(header::CONTENT_TYPE, "text/plain")], "  line one\n  indented\n").into_response()
            }),
        ))
        .await;
        assert_eq!(client(url).ask("hello").await.unwrap(), "  line one\n  indented\n");
    }

    #[tokio::test]
    async fn error_status_is_reported_with_body() {
        let url = serve(Router::new().route(
            "/chat",
            post(|| async { (axum::http::StatusCode::SERVICE_UNAVAILABLE, "warming up") }),
        ))
        .await;
        let err = client(url).ask("hello").await.unwrap_err();
        match &err {
            RemoteError::Status { status, body } => {
                assert_eq!(status.as_u16(), 503);
                assert_eq!(body, "warming up");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(err.notice(), BACKEND_NOTICE);
    }

    #[tokio::test]
    async fn malformed_json_is_a_backend_failure() {
        let url = serve(Router::new().route(
            "/chat",
            post(|| async { ([(header::CONTENT_TYPE, "application/json")], "{not json").into_response() }),
        ))
        .await;
        let err = client(url).ask("hello").await.unwrap_err();
        assert!(matches!(err, RemoteError::Body(_)));
        assert_eq!(err.notice(), BACKEND_NOTICE);
    }

    #[tokio::test]
    async fn slow_backend_times_out() {
        let url = serve(Router::new().route(
            "/chat",
            post(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Json(serde_json::json!({"response": "too late"}))
            }),
        ))
        .await;
        let client = RemoteClient::new(url, Duration::from_millis(200));
        let err = client.ask("hello").await.unwrap_err();
        assert!(matches!(err, RemoteError::TimedOut(_)));
        assert_eq!(err.notice(), TIMEOUT_NOTICE);
    }

    #[tokio::test]
    async fn refused_connection_is_a_network_error() {
        let err = client(dead_endpoint().await).ask("hello").await.unwrap_err();
        assert!(matches!(err, RemoteError::Network(_)), "got {err:?}");
        assert_eq!(err.notice(), NETWORK_NOTICE);
    }
}
