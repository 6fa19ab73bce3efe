//! HTTP client for the Autotask REST API.
//!
//! This module provides [`VendorRequest`], the [`RequestExecutor`] seam and
//! its production implementation [`AutotaskClient`].
//!
//! Every call is a single attempt. The outcome, whether success, HTTP
//! error or transport failure, is classified into a [`VendorResult`] instead
//! of being returned as an `Err`; retry policy is left to the caller.
//!
//! # Security
//!
//! Credentials travel only in request headers. They are never logged, and
//! vendor error text is scrubbed of the secret before it is kept.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, StatusCode};
use serde_json::Value;
use url::Url;

use crate::config::Credentials;
use crate::error::AutotaskError;
use crate::models::{FailureKind, QueryFilter, VendorResult};

/// Request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Maximum length of vendor error text kept in a failure.
const MAX_ERROR_BODY_LEN: usize = 500;

/// HTTP methods used against the Autotask API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VendorMethod {
    /// Reads and queries.
    Get,
    /// Creates.
    Post,
    /// Partial updates.
    Patch,
}

impl VendorMethod {
    fn as_reqwest(self) -> Method {
        match self {
            VendorMethod::Get => Method::GET,
            VendorMethod::Post => Method::POST,
            VendorMethod::Patch => Method::PATCH,
        }
    }

    /// Upper-case method name.
    pub fn as_str(self) -> &'static str {
        match self {
            VendorMethod::Get => "GET",
            VendorMethod::Post => "POST",
            VendorMethod::Patch => "PATCH",
        }
    }
}

/// One fully-described call against the vendor API.
///
/// Built by the entity operations; the path is relative to the credential
/// base URL (e.g. `Tickets/42`).
#[derive(Debug, Clone, PartialEq)]
pub struct VendorRequest {
    /// HTTP method.
    pub method: VendorMethod,
    /// Path relative to the API base URL, without a leading slash.
    pub path: String,
    /// Query parameters, URL-encoded when the request is sent.
    pub query: Vec<(String, String)>,
    /// JSON body for writes.
    pub body: Option<Value>,
}

impl VendorRequest {
    /// A GET without parameters.
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: VendorMethod::Get,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    /// A GET against `<entity>/query` carrying the filter as `search`.
    pub fn query(entity: &str, filter: &QueryFilter) -> Self {
        Self {
            method: VendorMethod::Get,
            path: format!("{}/query", entity),
            query: vec![("search".to_string(), filter.to_search().to_string())],
            body: None,
        }
    }

    /// A POST with a JSON body.
    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: VendorMethod::Post,
            path: path.into(),
            query: Vec::new(),
            body: Some(body),
        }
    }

    /// A PATCH with a JSON body.
    pub fn patch(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: VendorMethod::Patch,
            path: path.into(),
            query: Vec::new(),
            body: Some(body),
        }
    }

    /// Composes the absolute URL under `base`, query string included.
    pub fn url(&self, base: &Url) -> Result<Url, AutotaskError> {
        let mut url = base
            .join(self.path.trim_start_matches('/'))
            .map_err(|e| AutotaskError::validation(format!("invalid request path: {}", e)))?;

        if !self.query.is_empty() {
            let query = self
                .query
                .iter()
                .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
                .collect::<Vec<_>>()
                .join("&");
            url.set_query(Some(&query));
        }

        Ok(url)
    }
}

/// Executes vendor requests.
///
/// The production implementation is [`AutotaskClient`]; tests substitute
/// stubs to count or script calls.
#[async_trait]
pub trait RequestExecutor: Send + Sync {
    /// Performs one request and classifies its outcome.
    async fn execute(&self, request: &VendorRequest) -> VendorResult;
}

/// HTTP client for the Autotask REST API.
///
/// Cloning is cheap; the underlying reqwest client is reference counted.
///
/// # Example
///
/// ```ignore
/// let credentials = Credentials::from_env()?;
/// let client = AutotaskClient::new(&credentials)?;
///
/// let result = client.execute(&VendorRequest::get("Tickets/42")).await;
/// ```
#[derive(Clone)]
pub struct AutotaskClient {
    /// The underlying HTTP client.
    http: Client,

    /// Connection parameters. SECURITY: never log the secret!
    credentials: Credentials,

    timeout: Duration,
}

impl AutotaskClient {
    /// Creates a client with the default 30 second timeout.
    ///
    /// # Errors
    ///
    /// Returns `AutotaskError::HttpClient` if the HTTP client fails to initialize.
    pub fn new(credentials: &Credentials) -> Result<Self, AutotaskError> {
        Self::with_timeout(credentials, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Creates a client with a custom request timeout.
    pub fn with_timeout(credentials: &Credentials, timeout: Duration) -> Result<Self, AutotaskError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(AutotaskError::HttpClient)?;

        Ok(Self {
            http,
            credentials: credentials.clone(),
            timeout,
        })
    }

    /// Tests connectivity and authentication with a one-record company query.
    ///
    /// # Errors
    ///
    /// Returns `AutotaskError::Config` describing why the check failed.
    pub async fn test_connection(&self) -> Result<(), AutotaskError> {
        tracing::debug!("Testing connection to Autotask");

        let filter = QueryFilter::new().with_max_records(1);
        match self.execute(&VendorRequest::query("Companies", &filter)).await {
            VendorResult::Success { .. } => {
                tracing::info!("Connection test successful");
                Ok(())
            }
            VendorResult::Failure(f) if f.kind == FailureKind::AuthError => {
                Err(AutotaskError::invalid_config(
                    "authentication failed - verify AUTOTASK_USERNAME, AUTOTASK_SECRET and AUTOTASK_INTEGRATION_CODE",
                ))
            }
            VendorResult::Failure(f) if f.kind == FailureKind::NetworkError => {
                Err(AutotaskError::invalid_config(format!(
                    "{} - verify AUTOTASK_API_URL points at your Autotask zone",
                    f.message
                )))
            }
            VendorResult::Failure(f) => Err(AutotaskError::invalid_config(f.message)),
        }
    }

    fn sanitize(&self, message: &str) -> String {
        AutotaskError::sanitize_message(message, self.credentials.secret_for_sanitization())
    }

    /// Classifies a transport-level reqwest error.
    fn classify_transport_error(&self, error: &reqwest::Error) -> VendorResult {
        let message = if error.is_timeout() {
            format!(
                "request timed out after {:?} - Autotask may be slow or unreachable",
                self.timeout
            )
        } else if error.is_connect() {
            "could not connect to Autotask".to_string()
        } else {
            format!("HTTP request failed: {}", self.sanitize(&error.to_string()))
        };
        VendorResult::failure(FailureKind::NetworkError, message, None)
    }

    /// Maps a status code and raw body to a result.
    fn classify_response(&self, status: StatusCode, body: &str) -> VendorResult {
        let code = status.as_u16();

        match code {
            200 | 201 => match serde_json::from_str::<Value>(body) {
                Ok(payload) => VendorResult::Success {
                    status_code: code,
                    payload,
                },
                Err(_) => VendorResult::failure(
                    FailureKind::ServerError,
                    "malformed vendor response",
                    Some(code),
                ),
            },
            401 | 403 => VendorResult::failure(
                FailureKind::AuthError,
                "authentication failed - the API user was rejected",
                Some(code),
            ),
            404 => VendorResult::failure(
                FailureKind::NotFound,
                "the requested record does not exist",
                Some(code),
            ),
            400 | 422 => {
                let detail = vendor_error_detail(body)
                    .map(|d| truncate(&self.sanitize(&d), MAX_ERROR_BODY_LEN))
                    .unwrap_or_else(|| "the request was rejected by Autotask".to_string());
                VendorResult::failure(FailureKind::ValidationError, detail, Some(code))
            }
            429 => {
                tracing::warn!("Rate limited by Autotask");
                VendorResult::failure(
                    FailureKind::RateLimited,
                    "Autotask rate limit exceeded",
                    Some(code),
                )
            }
            500..=599 => VendorResult::failure(
                FailureKind::ServerError,
                format!("Autotask server error (HTTP {})", code),
                Some(code),
            ),
            _ => VendorResult::failure(
                FailureKind::ServerError,
                format!("unexpected response status {}", code),
                Some(code),
            ),
        }
    }
}

#[async_trait]
impl RequestExecutor for AutotaskClient {
    async fn execute(&self, request: &VendorRequest) -> VendorResult {
        let url = match request.url(self.credentials.base_url()) {
            Ok(url) => url,
            Err(e) => {
                return VendorResult::failure(FailureKind::ValidationError, e.to_string(), None)
            }
        };

        tracing::debug!(
            method = request.method.as_str(),
            path = %request.path,
            "Making Autotask API request"
        );

        let mut req = self
            .http
            .request(request.method.as_reqwest(), url)
            .header("Accept", "application/json");

        for (name, value) in self.credentials.auth_headers() {
            req = req.header(name, value);
        }

        if let Some(body) = &request.body {
            req = req
                .header("Content-Type", "application/json")
                .body(body.to_string());
        }

        let response = match req.send().await {
            Ok(response) => response,
            Err(e) => {
                let result = self.classify_transport_error(&e);
                tracing::warn!(path = %request.path, "Autotask request failed before a response");
                return result;
            }
        };

        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => return self.classify_transport_error(&e),
        };

        tracing::trace!(status = status.as_u16(), "Autotask API response received");

        let result = self.classify_response(status, &body);
        if let VendorResult::Failure(f) = &result {
            tracing::warn!(
                path = %request.path,
                kind = %f.kind,
                status = ?f.status_code,
                "Autotask request failed"
            );
        }
        result
    }
}

/// Extracts the first error message from an Autotask error body.
///
/// Autotask answers `{"errors": ["..."]}`; some gateways use
/// `{"errors": [{"message": "..."}]}` or a top-level `message`.
fn vendor_error_detail(body: &str) -> Option<String> {
    let json: Value = serde_json::from_str(body).ok()?;

    let first = json.get("errors").and_then(|e| e.as_array()).and_then(|e| e.first());
    let detail = match first {
        Some(Value::String(s)) => Some(s.clone()),
        Some(obj) => obj.get("message").and_then(Value::as_str).map(str::to_string),
        None => json.get("message").and_then(Value::as_str).map(str::to_string),
    };

    detail.filter(|d| !d.trim().is_empty())
}

fn truncate(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max_len).collect();
        format!("{}...[truncated]", cut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FilterCondition;

    fn test_client() -> AutotaskClient {
        let credentials = Credentials::new(
            "api@example.com",
            "Zq81secretvalue",
            "INTCODE1",
            "https://webservices5.autotask.net/ATServicesRest/v1.0",
        )
        .unwrap();
        AutotaskClient::new(&credentials).unwrap()
    }

    #[test]
    fn test_url_joins_under_base_path() {
        let client = test_client();
        let url = VendorRequest::get("Tickets/42")
            .url(client.credentials.base_url())
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://webservices5.autotask.net/ATServicesRest/v1.0/Tickets/42"
        );
    }

    #[test]
    fn test_query_request_encodes_search() {
        let client = test_client();
        let filter = QueryFilter::new().add(FilterCondition::contains("companyName", "A&B Co"));
        let request = VendorRequest::query("Companies", &filter);
        assert_eq!(request.path, "Companies/query");

        let url = request.url(client.credentials.base_url()).unwrap();
        let query = url.query().unwrap();
        assert!(query.starts_with("search="));
        assert!(!query.contains('&'), "ampersand must be encoded: {}", query);

        let decoded: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        let search: Value = serde_json::from_str(&decoded[0].1).unwrap();
        assert_eq!(search["filter"][0]["value"], "A&B Co");
    }

    #[test]
    fn test_classify_status_table() {
        let client = test_client();
        let cases = [
            (200, FailureKind::ServerError, "not json"),
            (400, FailureKind::ValidationError, "{}"),
            (401, FailureKind::AuthError, ""),
            (403, FailureKind::AuthError, ""),
            (404, FailureKind::NotFound, ""),
            (422, FailureKind::ValidationError, ""),
            (429, FailureKind::RateLimited, ""),
            (500, FailureKind::ServerError, ""),
            (503, FailureKind::ServerError, ""),
            (302, FailureKind::ServerError, ""),
        ];
        for (code, kind, body) in cases {
            let status = StatusCode::from_u16(code).unwrap();
            let result = client.classify_response(status, body);
            assert_eq!(result.failure_kind(), Some(kind), "status {}", code);
        }
    }

    #[test]
    fn test_classify_success_parses_payload() {
        let client = test_client();
        let result = client.classify_response(StatusCode::CREATED, r#"{"itemId": 5}"#);
        assert_eq!(
            result,
            VendorResult::Success {
                status_code: 201,
                payload: serde_json::json!({"itemId": 5}),
            }
        );
    }

    #[test]
    fn test_malformed_success_body() {
        let client = test_client();
        match client.classify_response(StatusCode::OK, "<html>") {
            VendorResult::Failure(f) => assert_eq!(f.message, "malformed vendor response"),
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[test]
    fn test_validation_detail_extracted_and_sanitized() {
        let client = test_client();
        let body = r#"{"errors": ["companyID is required (key Zq81secretvalue)"]}"#;
        match client.classify_response(StatusCode::BAD_REQUEST, body) {
            VendorResult::Failure(f) => {
                assert!(f.message.contains("companyID is required"));
                assert!(!f.message.contains("Zq81secretvalue"));
                assert_eq!(f.status_code, Some(400));
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[test]
    fn test_vendor_error_detail_shapes() {
        assert_eq!(
            vendor_error_detail(r#"{"errors": [{"message": "bad field"}]}"#).as_deref(),
            Some("bad field")
        );
        assert_eq!(
            vendor_error_detail(r#"{"message": "top level"}"#).as_deref(),
            Some("top level")
        );
        assert_eq!(vendor_error_detail(r#"{"errors": []}"#), None);
        assert_eq!(vendor_error_detail("plain text"), None);
    }

    #[test]
    fn test_truncate_long_detail() {
        let long = "e".repeat(600);
        let result = truncate(&long, MAX_ERROR_BODY_LEN);
        assert!(result.ends_with("...[truncated]"));
        assert_eq!(result.chars().count(), MAX_ERROR_BODY_LEN + "...[truncated]".len());
    }
}
