use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Method, StatusCode};

use super::{ControlPlane, TfeError};

pub const DEFAULT_HOST: &str = "app.terraform.io";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const API_PATH: &str = "/api/v2";
const JSON_API_MEDIA_TYPE: &str = "application/vnd.api+json";

/// Turns `TFE_URL` into the API base URL.
///
/// A bare host is served over https; a value with a scheme is used as given.
pub fn api_base_url(host: &str) -> String {
    let host = host.trim().trim_end_matches('/');
    let root = if host.starts_with("http://") || host.starts_with("https://") {
        host.to_string()
    } else {
        format!("https://{}", host)
    };

    if root.ends_with(API_PATH) {
        root
    } else {
        format!("{}{}", root, API_PATH)
    }
}

#[derive(Clone)]
pub struct TfeClient {
    client: reqwest::Client,
    token: Option<String>,
    base_url: String,
}

impl TfeClient {
    pub fn new(token: Option<String>, host: &str, timeout: Duration) -> Result<Self, TfeError> {
        Self::with_base_url(token, api_base_url(host), timeout)
    }

    /// NOTE: Primarily used for testing with mock servers.
    pub fn with_base_url(
        token: Option<String>,
        base_url: String,
        timeout: Duration,
    ) -> Result<Self, TfeError> {
        Self::create_client(token, base_url, timeout)
    }

    fn create_client(
        token: Option<String>,
        base_url: String,
        timeout: Duration,
    ) -> Result<Self, TfeError> {
        let token = token.filter(|t| !t.trim().is_empty());

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_API_MEDIA_TYPE));
        headers.insert(ACCEPT, HeaderValue::from_static(JSON_API_MEDIA_TYPE));

        if let Some(token) = &token {
            let auth_value = format!("Bearer {}", token);
            let mut header_value =
                HeaderValue::from_str(&auth_value).map_err(|_| TfeError::Auth {
                    message: "Invalid token format".to_string(),
                })?;
            header_value.set_sensitive(true);
            headers.insert(AUTHORIZATION, header_value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(TfeError::Transport)?;

        Ok(Self {
            client,
            token,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn api_base(&self) -> &str {
        &self.base_url
    }

    pub fn has_credential(&self) -> bool {
        self.token.is_some()
    }

    async fn send(
        &self,
        endpoint: &str,
        method: Method,
        body: Option<&str>,
    ) -> Result<(StatusCode, String), TfeError> {
        if !self.has_credential() {
            return Err(TfeError::missing_credential());
        }

        let url = format!("{}{}", self.base_url, endpoint);
        tracing::debug!(%method, endpoint, "control plane request");

        let mut request = self.client.request(method, &url);
        if let Some(body) = body {
            request = request.body(body.to_string());
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(TfeError::Auth {
                message: format!(
                    "credential rejected by control plane (HTTP {}): {}",
                    status.as_u16(),
                    first_error_title(&text).as_deref().unwrap_or("no detail")
                ),
            });
        }

        Ok((status, text))
    }
}

fn first_error_title(body: &str) -> Option<String> {
    let body: serde_json::Value = serde_json::from_str(body).ok()?;
    body.get("errors")
        .and_then(|e| e.as_array())
        .and_then(|arr| arr.first())
        .and_then(|e| e.get("title"))
        .and_then(|t| t.as_str())
        .map(|t| t.to_string())
}

#[async_trait]
impl ControlPlane for TfeClient {
    async fn request(
        &self,
        endpoint: &str,
        method: Method,
        body: Option<&str>,
    ) -> Result<serde_json::Value, TfeError> {
        let (status, text) = self.send(endpoint, method, body).await?;

        let parsed = serde_json::from_str::<serde_json::Value>(&text).ok();

        match parsed {
            Some(document) if status.is_success() && document.get("data").is_some() => {
                Ok(document)
            }
            _ => Err(TfeError::Protocol {
                status: status.as_u16(),
                body: text,
            }),
        }
    }

    async fn fetch_document(&self, endpoint: &str) -> Result<serde_json::Value, TfeError> {
        let (status, text) = self.send(endpoint, Method::GET, None).await?;

        let parsed = serde_json::from_str::<serde_json::Value>(&text).ok();

        match parsed {
            Some(document) if status.is_success() && document.is_object() => Ok(document),
            _ => Err(TfeError::Protocol {
                status: status.as_u16(),
                body: text,
            }),
        }
    }
}

impl std::fmt::Debug for TfeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TfeClient")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}
