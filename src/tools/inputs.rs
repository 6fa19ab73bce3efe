//! Tool input parameter structs for MCP tools.
//!
//! This module defines the input types for each MCP tool, with
//! JSON Schema derivation for MCP tool discovery. Unknown keys are
//! rejected so a misspelt filter never silently widens a search.
//!
//! # Input Sanitization
//!
//! All input structs implement `sanitize()` which trims whitespace
//! from string fields. This should be called before processing input.

use rmcp::schemars::{self, JsonSchema};
use serde::{Deserialize, Serialize};

/// Helper function to trim an optional string.
fn trim_option(s: &Option<String>) -> Option<String> {
    s.as_ref().map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

/// Output format for tool responses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ResponseFormat {
    /// Human-readable narrative.
    #[default]
    Markdown,
    /// Machine-readable JSON.
    Json,
}

/// Input parameters for the autotask_search_tickets tool.
///
/// All filters are optional and combined with AND.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct SearchTicketsInput {
    /// Filter by status ID (e.g. 1 = New, 5 = Complete).
    #[serde(default)]
    pub status: Option<u32>,

    /// Filter by priority: 1 = Low, 2 = Medium, 3 = High, 4 = Critical.
    #[serde(default)]
    pub priority: Option<u32>,

    /// Filter by company ID.
    #[serde(default)]
    pub company_id: Option<i64>,

    /// Filter by assigned resource (technician) ID.
    #[serde(default)]
    pub assigned_resource_id: Option<i64>,

    /// Filter by queue ID.
    #[serde(default)]
    pub queue_id: Option<i64>,

    /// Only tickets whose title contains this text.
    #[serde(default)]
    pub keyword: Option<String>,

    /// Maximum number of tickets to return (default: 20, max: 500).
    #[serde(default)]
    pub limit: Option<u32>,

    /// Output format: 'markdown' (default) or 'json'.
    #[serde(default)]
    pub response_format: ResponseFormat,
}

impl SearchTicketsInput {
    /// Sanitizes input by trimming whitespace from all string fields.
    #[must_use]
    pub fn sanitize(self) -> Self {
        Self {
            keyword: trim_option(&self.keyword),
            ..self
        }
    }
}

/// Input parameters for the autotask_get_ticket tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct GetTicketInput {
    /// The Autotask ticket ID.
    pub ticket_id: i64,

    /// Output format: 'markdown' (default) or 'json'.
    #[serde(default)]
    pub response_format: ResponseFormat,
}

/// Input parameters for the autotask_create_ticket tool.
///
/// Company, title and description are required.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct CreateTicketInput {
    /// ID of the company the ticket belongs to.
    pub company_id: i64,

    /// Ticket title (max 255 characters).
    pub title: String,

    /// Description of the issue.
    pub description: String,

    /// Priority: 1 = Low, 2 = Medium (default), 3 = High, 4 = Critical.
    #[serde(default)]
    pub priority: Option<u32>,

    /// Status ID (default: 1 = New).
    #[serde(default)]
    pub status: Option<u32>,

    /// ID of the resource to assign.
    #[serde(default)]
    pub assigned_resource_id: Option<i64>,

    /// Queue ID.
    #[serde(default)]
    pub queue_id: Option<i64>,

    /// Contact ID at the customer company.
    #[serde(default)]
    pub contact_id: Option<i64>,

    /// Due date/time in ISO 8601 format (YYYY-MM-DDTHH:MM:SS).
    #[serde(default)]
    pub due_date_time: Option<String>,

    /// Issue type ID.
    #[serde(default)]
    pub issue_type: Option<i64>,

    /// Sub-issue type ID.
    #[serde(default)]
    pub sub_issue_type: Option<i64>,

    /// Output format: 'markdown' (default) or 'json'.
    #[serde(default)]
    pub response_format: ResponseFormat,
}

impl CreateTicketInput {
    /// Sanitizes input by trimming whitespace from all string fields.
    #[must_use]
    pub fn sanitize(self) -> Self {
        Self {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            due_date_time: trim_option(&self.due_date_time),
            ..self
        }
    }
}

/// Input parameters for the autotask_update_ticket tool.
///
/// Ticket ID is required. At least one other field must be provided.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct UpdateTicketInput {
    /// The ticket ID to update.
    pub ticket_id: i64,

    /// New title (max 255 characters).
    #[serde(default)]
    pub title: Option<String>,

    /// New description.
    #[serde(default)]
    pub description: Option<String>,

    /// New status ID.
    #[serde(default)]
    pub status: Option<u32>,

    /// New priority (1-4).
    #[serde(default)]
    pub priority: Option<u32>,

    /// New assigned resource ID.
    #[serde(default)]
    pub assigned_resource_id: Option<i64>,

    /// New queue ID.
    #[serde(default)]
    pub queue_id: Option<i64>,

    /// Output format: 'markdown' (default) or 'json'.
    #[serde(default)]
    pub response_format: ResponseFormat,
}

impl UpdateTicketInput {
    /// Returns true if at least one field besides ticket_id is set.
    pub fn has_updates(&self) -> bool {
        self.title.is_some()
            || self.description.is_some()
            || self.status.is_some()
            || self.priority.is_some()
            || self.assigned_resource_id.is_some()
            || self.queue_id.is_some()
    }

    /// Sanitizes input by trimming whitespace from all string fields.
    #[must_use]
    pub fn sanitize(self) -> Self {
        Self {
            title: trim_option(&self.title),
            description: trim_option(&self.description),
            ..self
        }
    }
}

/// Input parameters for the autotask_add_ticket_note tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct AddTicketNoteInput {
    /// The ticket to add the note to.
    pub ticket_id: i64,

    /// The note text.
    pub note: String,

    /// Note title (default: "Note").
    #[serde(default)]
    pub title: Option<String>,

    /// Note type: 1 = General (default).
    #[serde(default)]
    pub note_type: Option<u32>,

    /// Publish level: 1 = All Autotask users (default), 2 = Internal only,
    /// 3 = Internal and co-managed.
    #[serde(default)]
    pub publish: Option<u32>,

    /// Output format: 'markdown' (default) or 'json'.
    #[serde(default)]
    pub response_format: ResponseFormat,
}

impl AddTicketNoteInput {
    /// Sanitizes input by trimming whitespace from all string fields.
    #[must_use]
    pub fn sanitize(self) -> Self {
        Self {
            note: self.note.trim().to_string(),
            title: trim_option(&self.title),
            ..self
        }
    }
}

/// Input parameters for the autotask_search_companies tool.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct SearchCompaniesInput {
    /// Part of the company name to search for.
    #[serde(default)]
    pub name: Option<String>,

    /// Maximum number of companies to return (default: 20, max: 500).
    #[serde(default)]
    pub limit: Option<u32>,

    /// Output format: 'markdown' (default) or 'json'.
    #[serde(default)]
    pub response_format: ResponseFormat,
}

impl SearchCompaniesInput {
    /// Sanitizes input by trimming whitespace from all string fields.
    #[must_use]
    pub fn sanitize(self) -> Self {
        Self {
            name: trim_option(&self.name),
            ..self
        }
    }
}

/// Input parameters for the autotask_get_company tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct GetCompanyInput {
    /// The Autotask company ID.
    pub company_id: i64,

    /// Output format: 'markdown' (default) or 'json'.
    #[serde(default)]
    pub response_format: ResponseFormat,
}

/// Input parameters for the autotask_search_contacts tool.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct SearchContactsInput {
    /// Filter by company ID.
    #[serde(default)]
    pub company_id: Option<i64>,

    /// Part of the email address.
    #[serde(default)]
    pub email: Option<String>,

    /// Part of the first name.
    #[serde(default)]
    pub first_name: Option<String>,

    /// Part of the last name.
    #[serde(default)]
    pub last_name: Option<String>,

    /// Maximum number of contacts to return (default: 20, max: 500).
    #[serde(default)]
    pub limit: Option<u32>,

    /// Output format: 'markdown' (default) or 'json'.
    #[serde(default)]
    pub response_format: ResponseFormat,
}

impl SearchContactsInput {
    /// Sanitizes input by trimming whitespace from all string fields.
    #[must_use]
    pub fn sanitize(self) -> Self {
        Self {
            email: trim_option(&self.email),
            first_name: trim_option(&self.first_name),
            last_name: trim_option(&self.last_name),
            ..self
        }
    }
}

/// Input parameters for the autotask_get_contact tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct GetContactInput {
    /// The Autotask contact ID.
    pub contact_id: i64,

    /// Output format: 'markdown' (default) or 'json'.
    #[serde(default)]
    pub response_format: ResponseFormat,
}

/// Input parameters for the autotask_search_resources tool.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct SearchResourcesInput {
    /// Exact email address.
    #[serde(default)]
    pub email: Option<String>,

    /// Part of the first name.
    #[serde(default)]
    pub first_name: Option<String>,

    /// Part of the last name.
    #[serde(default)]
    pub last_name: Option<String>,

    /// Part of the user name.
    #[serde(default)]
    pub user_name: Option<String>,

    /// Only active resources (default: true).
    #[serde(default)]
    pub active_only: Option<bool>,

    /// Maximum number of resources to return (default: 20, max: 500).
    #[serde(default)]
    pub limit: Option<u32>,

    /// Output format: 'markdown' (default) or 'json'.
    #[serde(default)]
    pub response_format: ResponseFormat,
}

impl SearchResourcesInput {
    /// Sanitizes input by trimming whitespace from all string fields.
    #[must_use]
    pub fn sanitize(self) -> Self {
        Self {
            email: trim_option(&self.email),
            first_name: trim_option(&self.first_name),
            last_name: trim_option(&self.last_name),
            user_name: trim_option(&self.user_name),
            ..self
        }
    }
}

/// Input parameters for the autotask_create_time_entry tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct CreateTimeEntryInput {
    /// Ticket to log time against.
    pub ticket_id: i64,

    /// Resource (user) who did the work.
    pub resource_id: i64,

    /// Hours worked, e.g. 1.5 for 1 hour 30 minutes.
    pub hours_worked: f64,

    /// Date worked, YYYY-MM-DD (default: today).
    #[serde(default)]
    pub date_worked: Option<String>,

    /// Summary of the work performed.
    #[serde(default)]
    pub summary_notes: Option<String>,

    /// Internal notes, not visible to the customer.
    #[serde(default)]
    pub internal_notes: Option<String>,

    /// Billable hours (default: hours_worked).
    #[serde(default)]
    pub hours_to_bill: Option<f64>,

    /// Time entry type: 1 = Regular (default), 2 = Travel, 3 = Wait.
    #[serde(default)]
    pub time_entry_type: Option<u32>,

    /// Timezone offset in hours (default: 0.0).
    #[serde(default)]
    pub offset_hours: Option<f64>,

    /// Output format: 'markdown' (default) or 'json'.
    #[serde(default)]
    pub response_format: ResponseFormat,
}

impl CreateTimeEntryInput {
    /// Sanitizes input by trimming whitespace from all string fields.
    #[must_use]
    pub fn sanitize(self) -> Self {
        Self {
            date_worked: trim_option(&self.date_worked),
            summary_notes: trim_option(&self.summary_notes),
            internal_notes: trim_option(&self.internal_notes),
            ..self
        }
    }
}
