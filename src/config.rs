//! Connection credentials for the Autotask REST API.
//!
//! Autotask uses session-less header authentication: every request carries
//! the API user name, its secret and the tracking integration code. The
//! values are loaded once at startup and never change afterwards.

use std::collections::BTreeMap;
use std::env;
use std::fmt;

use url::Url;

use crate::error::AutotaskError;

/// Header carrying the API user name.
pub const USERNAME_HEADER: &str = "UserName";

/// Header carrying the API user secret.
pub const SECRET_HEADER: &str = "Secret";

/// Header carrying the tracking identifier of the integration.
pub const INTEGRATION_CODE_HEADER: &str = "ApiIntegrationcode";

const ENV_USERNAME: &str = "AUTOTASK_USERNAME";
const ENV_SECRET: &str = "AUTOTASK_SECRET";
const ENV_INTEGRATION_CODE: &str = "AUTOTASK_INTEGRATION_CODE";
const ENV_API_URL: &str = "AUTOTASK_API_URL";

/// Credential context for the Autotask API.
///
/// Construct with [`Credentials::new`] or [`Credentials::from_env`]; both
/// validate every field. `Debug` redacts everything but the base URL.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    secret: String,
    integration_code: String,
    base_url: Url,
}

impl Credentials {
    /// Builds and validates a credential context.
    ///
    /// # Errors
    ///
    /// Returns `AutotaskError::Config` if any field is empty, if the secret
    /// looks like a placeholder, or if `base_url` is not an absolute
    /// http(s) URL with a host and an API path.
    pub fn new(
        username: impl Into<String>,
        secret: impl Into<String>,
        integration_code: impl Into<String>,
        base_url: &str,
    ) -> Result<Self, AutotaskError> {
        let username = Self::require("username", username.into())?;
        let secret = Self::require("secret", secret.into())?;
        let integration_code = Self::require("integration code", integration_code.into())?;
        let base_url = Self::validate_base_url(base_url)?;

        Self::validate_secret(&secret)?;

        Ok(Self {
            username,
            secret,
            integration_code,
            base_url,
        })
    }

    /// Loads credentials from environment variables.
    ///
    /// # Required Environment Variables
    ///
    /// - `AUTOTASK_USERNAME`: API user name (usually an email address)
    /// - `AUTOTASK_SECRET`: API user secret
    /// - `AUTOTASK_INTEGRATION_CODE`: API tracking identifier
    /// - `AUTOTASK_API_URL`: zone URL, e.g.
    ///   `https://webservices5.autotask.net/ATServicesRest/v1.0`
    ///
    /// # Errors
    ///
    /// Returns `AutotaskError::Config` naming the first missing variable, or
    /// any error from [`Credentials::new`].
    pub fn from_env() -> Result<Self, AutotaskError> {
        let username = Self::get_required_env(ENV_USERNAME)?;
        let secret = Self::get_required_env(ENV_SECRET)?;
        let integration_code = Self::get_required_env(ENV_INTEGRATION_CODE)?;
        let base_url = Self::get_required_env(ENV_API_URL)?;

        Self::new(username, secret, integration_code, &base_url)
    }

    /// Returns the three authentication headers sent with every request.
    pub fn auth_headers(&self) -> BTreeMap<&'static str, String> {
        BTreeMap::from([
            (USERNAME_HEADER, self.username.clone()),
            (SECRET_HEADER, self.secret.clone()),
            (INTEGRATION_CODE_HEADER, self.integration_code.clone()),
        ])
    }

    /// Base API URL, always ending in `/` so relative paths join under it.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The secret, exposed only so error text can be scrubbed of it.
    pub(crate) fn secret_for_sanitization(&self) -> &str {
        &self.secret
    }

    fn get_required_env(name: &str) -> Result<String, AutotaskError> {
        env::var(name)
            .map_err(|_| AutotaskError::missing_env(name))
            .and_then(|value| {
                if value.trim().is_empty() {
                    Err(AutotaskError::missing_env(name))
                } else {
                    Ok(value)
                }
            })
    }

    /// Rejects blank values; the value itself is stored exactly as given.
    fn require(field: &str, value: String) -> Result<String, AutotaskError> {
        if value.trim().is_empty() {
            return Err(AutotaskError::invalid_config(format!(
                "{} must not be empty",
                field
            )));
        }
        Ok(value)
    }

    /// Parses the base URL and normalises it to end with a slash.
    fn validate_base_url(raw: &str) -> Result<Url, AutotaskError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(AutotaskError::invalid_config("API URL must not be empty"));
        }

        let mut url = Url::parse(raw)
            .map_err(|e| AutotaskError::invalid_config(format!("API URL is not valid: {}", e)))?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(AutotaskError::invalid_config(
                "API URL must start with http:// or https://",
            ));
        }
        if url.host_str().map_or(true, str::is_empty) {
            return Err(AutotaskError::invalid_config("API URL must include a host"));
        }

        let path = url.path().trim_end_matches('/').to_string();
        if path.is_empty() {
            return Err(AutotaskError::invalid_config(
                "API URL must include the API path, e.g. /ATServicesRest/v1.0",
            ));
        }
        url.set_path(&format!("{}/", path));
        url.set_query(None);
        url.set_fragment(None);

        Ok(url)
    }

    /// Rejects whole-value placeholders only.
    fn validate_secret(secret: &str) -> Result<(), AutotaskError> {
        let lower = secret.trim().to_lowercase();
        let placeholders = [
            "your_secret",
            "your-secret",
            "your_secret_here",
            "your-secret-here",
            "your_api_secret",
            "placeholder",
            "changeme",
            "secret",
            "<secret>",
        ];

        let all_x = lower.len() >= 3 && lower.chars().all(|c| c == 'x');
        if all_x || placeholders.contains(&lower.as_str()) {
            return Err(AutotaskError::invalid_config(
                "AUTOTASK_SECRET appears to be a placeholder value",
            ));
        }
        Ok(())
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &"[REDACTED]")
            .field("secret", &"[REDACTED]")
            .field("integration_code", &"[REDACTED]")
            .field("base_url", &self.base_url.as_str())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "https://webservices5.autotask.net/ATServicesRest/v1.0";

    fn creds() -> Credentials {
        Credentials::new("api@example.com", "k7Qm2Lp9", "INTCODE1", URL).unwrap()
    }

    #[test]
    fn test_new_accepts_valid_values() {
        let c = creds();
        assert_eq!(c.auth_headers()[USERNAME_HEADER], "api@example.com");
        assert_eq!(
            c.base_url().as_str(),
            "https://webservices5.autotask.net/ATServicesRest/v1.0/"
        );
    }

    #[test]
    fn test_empty_secret_is_config_error() {
        let err = Credentials::new("api@example.com", "", "INTCODE1", URL).unwrap_err();
        assert!(matches!(err, AutotaskError::Config(_)));
        assert!(err.to_string().contains("secret"));
    }

    #[test]
    fn test_whitespace_fields_rejected() {
        assert!(Credentials::new("  ", "k7Qm2Lp9", "INTCODE1", URL).is_err());
        assert!(Credentials::new("api@example.com", "k7Qm2Lp9", "\t", URL).is_err());
    }

    #[test]
    fn test_base_url_requires_scheme() {
        let err = Credentials::new("u", "k7Qm2Lp9", "c", "webservices5.autotask.net/v1.0");
        assert!(err.is_err());

        let err = Credentials::new("u", "k7Qm2Lp9", "c", "ftp://example.com/v1.0");
        assert!(err.is_err());
    }

    #[test]
    fn test_base_url_requires_path() {
        let err = Credentials::new("u", "k7Qm2Lp9", "c", "https://example.com/").unwrap_err();
        assert!(err.to_string().contains("path"));
    }

    #[test]
    fn test_base_url_trailing_slash_normalised() {
        let c = Credentials::new("u", "k7Qm2Lp9", "c", "https://example.com/api/v1.0/").unwrap();
        assert_eq!(c.base_url().as_str(), "https://example.com/api/v1.0/");
    }

    #[test]
    fn test_placeholder_secret_rejected() {
        let err = Credentials::new("u", "your_secret_here", "c", URL).unwrap_err();
        assert!(err.to_string().contains("placeholder"));
        assert!(Credentials::new("u", "XXXXXXXX", "c", URL).is_err());
        assert!(Credentials::new("u", "changeme", "c", URL).is_err());
    }

    #[test]
    fn test_random_secret_with_placeholder_substring_accepted() {
        for secret in ["a9$XxxQ2*mP7", "Qp7changemeZ", "kPlaceholder9!"] {
            assert!(Credentials::new("u", secret, "c", URL).is_ok(), "{}", secret);
        }
    }

    #[test]
    fn test_values_stored_as_given() {
        let c = Credentials::new(" api@example.com", "k7Qm2Lp9 ", "INTCODE1", URL).unwrap();
        let headers = c.auth_headers();
        assert_eq!(headers[SECRET_HEADER], "k7Qm2Lp9 ");
        assert_eq!(headers[USERNAME_HEADER], " api@example.com");
    }

    #[test]
    fn test_auth_headers() {
        let headers = creds().auth_headers();
        assert_eq!(headers.len(), 3);
        assert_eq!(headers[USERNAME_HEADER], "api@example.com");
        assert_eq!(headers[SECRET_HEADER], "k7Qm2Lp9");
        assert_eq!(headers[INTEGRATION_CODE_HEADER], "INTCODE1");
    }

    #[test]
    fn test_debug_redacts_secret() {
        let debug = format!("{:?}", creds());
        assert!(!debug.contains("k7Qm2Lp9"));
        assert!(!debug.contains("INTCODE1"));
        assert!(!debug.contains("api@example.com"));
        assert!(debug.contains("[REDACTED]"));
    }
}
