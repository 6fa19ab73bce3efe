//! Error types for the Autotask MCP server.
//!
//! `AutotaskError` covers everything that can go wrong *before* a vendor
//! call is made (configuration, unknown tools, argument validation) plus
//! client construction. Outcomes of the vendor call itself are not errors in
//! this sense; they are classified into [`VendorResult`](crate::models::VendorResult).
//!
//! # Security
//!
//! Messages built from external input must go through `sanitize_message()`
//! so the API secret never ends up in logs or tool responses.

use thiserror::Error;

/// Unified error type for pre-flight and startup failures.
#[derive(Error, Debug)]
pub enum AutotaskError {
    /// Configuration error - missing or invalid connection parameters.
    #[error("configuration error: {0}")]
    Config(String),

    /// The host asked for a tool that is not in the registry.
    #[error("unknown tool: {0}")]
    Dispatch(String),

    /// Tool arguments failed validation.
    #[error("validation error: {0}")]
    Validation(String),

    /// HTTP client initialization failed.
    #[error("HTTP client error: {0}")]
    HttpClient(#[source] reqwest::Error),

    /// JSON serialization or deserialization failed.
    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AutotaskError {
    /// Creates a configuration error for a missing environment variable.
    pub fn missing_env(var_name: &str) -> Self {
        AutotaskError::Config(format!(
            "missing required environment variable: {}",
            var_name
        ))
    }

    /// Creates a configuration error for an invalid value.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        AutotaskError::Config(message.into())
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        AutotaskError::Validation(message.into())
    }

    /// Creates a dispatch error for an unrecognised tool name.
    pub fn unknown_tool(name: &str) -> Self {
        AutotaskError::Dispatch(name.chars().take(100).collect())
    }

    /// Replaces every occurrence of `secret` in `message` with `[REDACTED]`.
    #[must_use]
    pub fn sanitize_message(message: &str, secret: &str) -> String {
        if secret.is_empty() {
            return message.to_string();
        }
        message.replace(secret, "[REDACTED]")
    }
}
