//! Response rendering.
//!
//! Every tool call ends here: a [`VendorResult`] or a pre-flight
//! [`AutotaskError`] becomes a [`RenderedResponse`] in the format the caller
//! asked for. Rendering is total; malformed payloads fall back to a raw
//! JSON block rather than failing.

use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::error::AutotaskError;
use crate::models::{text_field, EntityKind, Failure, FailureKind, VendorResult};
use crate::tools::ResponseFormat;

/// Maximum length for description fields before truncation.
const MAX_DESCRIPTION_LENGTH: usize = 2000;

/// How a successful response for a call is shaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseShape {
    /// `{"item": {...}}`
    Single,
    /// `{"items": [...], "pageDetails": {...}}`
    List,
    /// `{"itemId": n}` after a create.
    Created,
    /// `{"itemId": n}` after an update.
    Updated,
}

/// The text handed back to the assistant host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedResponse {
    /// Format of `body`.
    pub format: ResponseFormat,
    /// Rendered text.
    pub body: String,
    /// False when the body describes a failure.
    pub success: bool,
}

/// Renders the outcome of a vendor call.
pub fn render(
    entity: EntityKind,
    shape: ResponseShape,
    result: &VendorResult,
    format: ResponseFormat,
) -> RenderedResponse {
    match result {
        VendorResult::Success { payload, .. } => {
            let body = match format {
                ResponseFormat::Json => pretty(&success_json(payload)),
                ResponseFormat::Markdown => success_markdown(entity, shape, payload),
            };
            RenderedResponse {
                format,
                body,
                success: true,
            }
        }
        VendorResult::Failure(failure) => render_failure(failure, format),
    }
}

/// Renders a failed vendor call.
pub fn render_failure(failure: &Failure, format: ResponseFormat) -> RenderedResponse {
    failure_response(
        format,
        failure.kind.as_str(),
        failure_hint(failure.kind),
        &failure.message,
        failure.status_code,
    )
}

/// Renders an error raised before any vendor call was made.
pub fn render_error(error: &AutotaskError, format: ResponseFormat) -> RenderedResponse {
    let message = error.to_string();
    match error {
        AutotaskError::Dispatch(_) => failure_response(
            format,
            "DispatchError",
            "unknown tool. Use one of the autotask_* tools listed by this server.",
            &message,
            None,
        ),
        AutotaskError::Validation(_) | AutotaskError::Serialization(_) => failure_response(
            format,
            FailureKind::ValidationError.as_str(),
            failure_hint(FailureKind::ValidationError),
            &message,
            None,
        ),
        AutotaskError::Config(_) => failure_response(
            format,
            "ConfigError",
            "the server is not configured correctly.",
            &message,
            None,
        ),
        AutotaskError::HttpClient(_) => failure_response(
            format,
            FailureKind::NetworkError.as_str(),
            failure_hint(FailureKind::NetworkError),
            &message,
            None,
        ),
    }
}

fn failure_hint(kind: FailureKind) -> &'static str {
    match kind {
        FailureKind::AuthError => {
            "authentication failed. Check your Autotask credentials (username, secret and integration code)."
        }
        FailureKind::NotFound => "record not found. Check the ID and try again.",
        FailureKind::ValidationError => "the request was invalid. Check the input values.",
        FailureKind::RateLimited => {
            "Autotask rate limit reached. Wait a moment before retrying."
        }
        FailureKind::ServerError => "Autotask returned a server error. Try again later.",
        FailureKind::NetworkError => {
            "could not reach Autotask. Check connectivity and retry."
        }
    }
}

fn failure_response(
    format: ResponseFormat,
    kind: &str,
    hint: &str,
    message: &str,
    status_code: Option<u16>,
) -> RenderedResponse {
    let body = match format {
        ResponseFormat::Json => {
            let mut map = Map::new();
            map.insert("success".into(), json!(false));
            map.insert("kind".into(), json!(kind));
            map.insert("message".into(), json!(message));
            if let Some(code) = status_code {
                map.insert("status_code".into(), json!(code));
            }
            pretty(&Value::Object(map))
        }
        ResponseFormat::Markdown => {
            let mut output = format!("Error: {}\n\n{}", hint, message);
            if let Some(code) = status_code {
                output.push_str(&format!(" (HTTP {})", code));
            }
            output.push('\n');
            output
        }
    };

    RenderedResponse {
        format,
        body,
        success: false,
    }
}

fn pretty(value: &Value) -> String {
    format!("{:#}", value)
}

/// Merges the vendor payload with `"success": true`.
fn success_json(payload: &Value) -> Value {
    let mut map = match payload {
        Value::Object(map) => map.clone(),
        other => {
            let mut map = Map::new();
            map.insert("data".into(), other.clone());
            map
        }
    };

    if let Some(item_id) = map.get("itemId").cloned() {
        map.entry("id").or_insert(item_id);
    }
    map.insert("success".into(), json!(true));

    Value::Object(map)
}

fn success_markdown(entity: EntityKind, shape: ResponseShape, payload: &Value) -> String {
    match shape {
        ResponseShape::Single => match payload.get("item") {
            Some(item) if item.is_object() => format_entity_details(entity, item),
            Some(_) => format!("No {} found with that ID.\n", entity.label().to_lowercase()),
            None => raw_block(payload),
        },
        ResponseShape::List => match payload.get("items").and_then(Value::as_array) {
            Some(items) => format_entity_list(entity, items),
            None => raw_block(payload),
        },
        ResponseShape::Created | ResponseShape::Updated => match written_id(payload) {
            Some(id) => {
                let verb = if shape == ResponseShape::Created {
                    "created"
                } else {
                    "updated"
                };
                format!(
                    "Successfully {} {} with ID {}.\n",
                    verb,
                    entity.label().to_lowercase(),
                    id
                )
            }
            None => raw_block(payload),
        },
    }
}

fn written_id(payload: &Value) -> Option<String> {
    text_field(payload, "itemId").or_else(|| text_field(payload, "id"))
}

/// Formats a single record: heading, summary bullets, then description.
fn format_entity_details(entity: EntityKind, item: &Value) -> String {
    let mut output = format!("## {}: {}\n\n", entity.label(), entity.display_name(item));

    for (label, field) in entity.summary_fields() {
        if let Some(value) = text_field(item, field) {
            output.push_str(&format!("- **{}**: {}\n", label, value));
        }
    }

    if let Some(description) = text_field(item, "description") {
        output.push_str("\n### Description\n\n");
        output.push_str(&truncate_text(&description, MAX_DESCRIPTION_LENGTH));
        output.push('\n');
    }

    output
}

/// Formats a list of records as one bullet each.
fn format_entity_list(entity: EntityKind, items: &[Value]) -> String {
    if items.is_empty() {
        return format!("No {} found matching the search criteria.\n", entity.plural());
    }

    let mut output = format!("# Found {} {}\n\n", items.len(), entity.plural());

    for item in items {
        let id = text_field(item, "id").unwrap_or_else(|| "?".to_string());
        output.push_str(&format!("- **{}** (ID: {})", entity.display_name(item), id));

        if entity == EntityKind::Ticket {
            if let Some(number) = text_field(item, "ticketNumber") {
                output.push_str(&format!(" | {}", number));
            }
        }
        if entity == EntityKind::Resource && text_field(item, "isActive").as_deref() == Some("No") {
            output.push_str(" [INACTIVE]");
        }

        output.push('\n');
    }

    output
}

fn raw_block(payload: &Value) -> String {
    format!("```json\n{}\n```\n", pretty(payload))
}

/// Truncates a string if it exceeds the maximum length.
///
/// If truncated, appends "... [truncated]" to indicate the content was cut.
fn truncate_text(text: &str, max_length: usize) -> String {
    if text.chars().count() <= max_length {
        return text.to_string();
    }

    // Leave room for "... [truncated]"
    let cut: String = text.chars().take(max_length.saturating_sub(15)).collect();
    let end = cut.rfind(char::is_whitespace).unwrap_or(cut.len());
    format!("{}... [truncated]", &cut[..end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ok(payload: Value) -> VendorResult {
        VendorResult::Success {
            status_code: 200,
            payload,
        }
    }

    #[test]
    fn test_truncate_text_short_text() {
        assert_eq!(truncate_text("hello", 100), "hello");
    }

    #[test]
    fn test_truncate_text_breaks_at_word() {
        let text = "word ".repeat(20);
        let result = truncate_text(&text, 40);
        assert!(result.ends_with("... [truncated]"));
        assert!(result.starts_with("word word"));
        assert!(!result.contains("wor..."));
    }

    #[test]
    fn test_truncate_text_multibyte() {
        let text = "é".repeat(3000);
        let result = truncate_text(&text, MAX_DESCRIPTION_LENGTH);
        assert!(result.ends_with("... [truncated]"));
    }

    #[test]
    fn test_json_success_merges_payload() {
        let result = ok(json!({"item": {"id": 42, "title": "Printer jam"}}));
        let rendered = render(
            EntityKind::Ticket,
            ResponseShape::Single,
            &result,
            ResponseFormat::Json,
        );
        assert!(rendered.success);
        let parsed: Value = serde_json::from_str(&rendered.body).unwrap();
        assert_eq!(
            parsed,
            json!({"success": true, "item": {"id": 42, "title": "Printer jam"}})
        );
    }

    #[test]
    fn test_json_write_exposes_id() {
        let result = ok(json!({"itemId": 999}));
        let rendered = render(
            EntityKind::Ticket,
            ResponseShape::Created,
            &result,
            ResponseFormat::Json,
        );
        let parsed: Value = serde_json::from_str(&rendered.body).unwrap();
        assert_eq!(parsed["id"], 999);
        assert_eq!(parsed["itemId"], 999);
        assert_eq!(parsed["success"], true);
    }

    #[test]
    fn test_json_non_object_payload() {
        let parsed = success_json(&json!([1, 2]));
        assert_eq!(parsed, json!({"success": true, "data": [1, 2]}));
    }

    #[test]
    fn test_markdown_single_ticket() {
        let result = ok(json!({"item": {
            "id": 42,
            "ticketNumber": "T20261018.0001",
            "title": "Printer jam",
            "status": 1,
            "priority": 3,
            "description": "Paper stuck in tray 2"
        }}));
        let body = render(
            EntityKind::Ticket,
            ResponseShape::Single,
            &result,
            ResponseFormat::Markdown,
        )
        .body;
        assert!(body.starts_with("## Ticket: Printer jam\n"));
        assert!(body.contains("- **ID**: 42\n"));
        assert!(body.contains("- **Ticket Number**: T20261018.0001\n"));
        assert!(body.contains("Paper stuck in tray 2"));
        assert!(!body.contains("Assigned To"));
    }

    #[test]
    fn test_markdown_missing_item() {
        let body = render(
            EntityKind::Company,
            ResponseShape::Single,
            &ok(json!({"item": null})),
            ResponseFormat::Markdown,
        )
        .body;
        assert_eq!(body, "No company found with that ID.\n");
    }

    #[test]
    fn test_markdown_list() {
        let result = ok(json!({"items": [
            {"id": 1, "companyName": "Tech Corp"},
            {"id": 2, "companyName": "TechStart"}
        ], "pageDetails": {"count": 2}}));
        let body = render(
            EntityKind::Company,
            ResponseShape::List,
            &result,
            ResponseFormat::Markdown,
        )
        .body;
        assert_eq!(
            body,
            "# Found 2 companies\n\n- **Tech Corp** (ID: 1)\n- **TechStart** (ID: 2)\n"
        );
    }

    #[test]
    fn test_markdown_empty_list() {
        let body = render(
            EntityKind::Contact,
            ResponseShape::List,
            &ok(json!({"items": []})),
            ResponseFormat::Markdown,
        )
        .body;
        assert_eq!(body, "No contacts found matching the search criteria.\n");
    }

    #[test]
    fn test_markdown_write_confirmation() {
        let body = render(
            EntityKind::TicketNote,
            ResponseShape::Created,
            &ok(json!({"itemId": 31})),
            ResponseFormat::Markdown,
        )
        .body;
        assert_eq!(body, "Successfully created ticket note with ID 31.\n");

        let body = render(
            EntityKind::Ticket,
            ResponseShape::Updated,
            &ok(json!({"itemId": 77})),
            ResponseFormat::Markdown,
        )
        .body;
        assert_eq!(body, "Successfully updated ticket with ID 77.\n");
    }

    #[test]
    fn test_markdown_unexpected_shape_falls_back() {
        let body = render(
            EntityKind::Ticket,
            ResponseShape::List,
            &ok(json!({"weird": true})),
            ResponseFormat::Markdown,
        )
        .body;
        assert!(body.starts_with("```json\n"));
    }

    #[test]
    fn test_failure_renders() {
        let result = VendorResult::failure(FailureKind::RateLimited, "slow down", Some(429));

        let md = render(
            EntityKind::Ticket,
            ResponseShape::List,
            &result,
            ResponseFormat::Markdown,
        );
        assert!(!md.success);
        assert!(md.body.starts_with("Error: "));
        assert!(md.body.contains("rate limit"));

        let js = render(
            EntityKind::Ticket,
            ResponseShape::List,
            &result,
            ResponseFormat::Json,
        );
        let parsed: Value = serde_json::from_str(&js.body).unwrap();
        assert_eq!(
            parsed,
            json!({"success": false, "kind": "RateLimited", "message": "slow down", "status_code": 429})
        );
    }

    #[test]
    fn test_auth_failure_mentions_credentials() {
        let result = VendorResult::failure(FailureKind::AuthError, "rejected", Some(401));
        let md = render(
            EntityKind::Company,
            ResponseShape::Single,
            &result,
            ResponseFormat::Markdown,
        );
        assert!(md.body.contains("Autotask credentials"));
    }

    #[test]
    fn test_render_dispatch_error() {
        let error = AutotaskError::unknown_tool("autotask_delete_everything");
        let js = render_error(&error, ResponseFormat::Json);
        let parsed: Value = serde_json::from_str(&js.body).unwrap();
        assert_eq!(parsed["kind"], "DispatchError");
        assert!(parsed["message"].as_str().unwrap().contains("unknown tool"));
        assert!(parsed.get("status_code").is_none());

        let md = render_error(&error, ResponseFormat::Markdown);
        assert!(md.body.contains("unknown tool"));
        assert!(!md.success);
    }

    #[test]
    fn test_render_validation_error() {
        let error = AutotaskError::validation("limit must be between 1 and 500, got 0");
        let js = render_error(&error, ResponseFormat::Json);
        let parsed: Value = serde_json::from_str(&js.body).unwrap();
        assert_eq!(parsed["kind"], "ValidationError");
    }
}
