//! Outcome of a single Autotask API call.

use std::fmt;

use serde::Serialize;

/// Classification of a failed vendor call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FailureKind {
    /// HTTP 401/403: the credentials were rejected.
    AuthError,
    /// HTTP 404.
    NotFound,
    /// HTTP 400/422, or arguments rejected before the call.
    ValidationError,
    /// HTTP 429.
    RateLimited,
    /// HTTP 5xx, unexpected statuses and malformed bodies.
    ServerError,
    /// Timeouts and transport failures.
    NetworkError,
}

impl FailureKind {
    /// Stable name used in json renders.
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::AuthError => "AuthError",
            FailureKind::NotFound => "NotFound",
            FailureKind::ValidationError => "ValidationError",
            FailureKind::RateLimited => "RateLimited",
            FailureKind::ServerError => "ServerError",
            FailureKind::NetworkError => "NetworkError",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Details of a failed vendor call.
#[derive(Debug, Clone, PartialEq)]
pub struct Failure {
    /// What kind of failure this was.
    pub kind: FailureKind,
    /// Human-readable detail, already scrubbed of credentials.
    pub message: String,
    /// HTTP status, absent for transport failures.
    pub status_code: Option<u16>,
}

/// Result of executing one [`VendorRequest`](crate::autotask_client::VendorRequest).
#[derive(Debug, Clone, PartialEq)]
pub enum VendorResult {
    /// The vendor answered 200/201 with a JSON body.
    Success {
        /// HTTP status returned by the vendor.
        status_code: u16,
        /// Parsed response body.
        payload: serde_json::Value,
    },
    /// Anything else.
    Failure(Failure),
}

impl VendorResult {
    /// Creates a failure result.
    pub fn failure(kind: FailureKind, message: impl Into<String>, status_code: Option<u16>) -> Self {
        VendorResult::Failure(Failure {
            kind,
            message: message.into(),
            status_code,
        })
    }

    /// Returns true for `Success`.
    pub fn is_success(&self) -> bool {
        matches!(self, VendorResult::Success { .. })
    }

    /// Failure kind, if this is a failure.
    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            VendorResult::Success { .. } => None,
            VendorResult::Failure(f) => Some(f.kind),
        }
    }
}
