//! Tool registry and dispatcher.
//!
//! [`ToolName`] is the static catalog: one identifier per tool with its
//! description and argument schema. [`Dispatcher`] turns a tool name plus raw
//! JSON arguments into exactly one vendor call and a rendered response.

use std::sync::Arc;

use rmcp::schemars::{schema_for, JsonSchema};
use serde::Serialize;
use serde_json::Value;

use super::inputs::{
    AddTicketNoteInput, CreateTicketInput, CreateTimeEntryInput, GetCompanyInput,
    GetContactInput, GetTicketInput, ResponseFormat, SearchCompaniesInput, SearchContactsInput,
    SearchResourcesInput, SearchTicketsInput, UpdateTicketInput,
};
use super::operations::ToolCall;
use crate::autotask_client::RequestExecutor;
use crate::error::AutotaskError;
use crate::format::{render, render_error, RenderedResponse};

/// Identifiers of every tool the server exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolName {
    /// `autotask_search_tickets`
    SearchTickets,
    /// `autotask_get_ticket`
    GetTicket,
    /// `autotask_create_ticket`
    CreateTicket,
    /// `autotask_update_ticket`
    UpdateTicket,
    /// `autotask_add_ticket_note`
    AddTicketNote,
    /// `autotask_search_companies`
    SearchCompanies,
    /// `autotask_get_company`
    GetCompany,
    /// `autotask_search_contacts`
    SearchContacts,
    /// `autotask_get_contact`
    GetContact,
    /// `autotask_search_resources`
    SearchResources,
    /// `autotask_create_time_entry`
    CreateTimeEntry,
}

impl ToolName {
    /// Every tool, in catalog order.
    pub const ALL: [ToolName; 11] = [
        ToolName::SearchTickets,
        ToolName::GetTicket,
        ToolName::CreateTicket,
        ToolName::UpdateTicket,
        ToolName::AddTicketNote,
        ToolName::SearchCompanies,
        ToolName::GetCompany,
        ToolName::SearchContacts,
        ToolName::GetContact,
        ToolName::SearchResources,
        ToolName::CreateTimeEntry,
    ];

    /// The wire name of the tool.
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolName::SearchTickets => "autotask_search_tickets",
            ToolName::GetTicket => "autotask_get_ticket",
            ToolName::CreateTicket => "autotask_create_ticket",
            ToolName::UpdateTicket => "autotask_update_ticket",
            ToolName::AddTicketNote => "autotask_add_ticket_note",
            ToolName::SearchCompanies => "autotask_search_companies",
            ToolName::GetCompany => "autotask_get_company",
            ToolName::SearchContacts => "autotask_search_contacts",
            ToolName::GetContact => "autotask_get_contact",
            ToolName::SearchResources => "autotask_search_resources",
            ToolName::CreateTimeEntry => "autotask_create_time_entry",
        }
    }

    /// Looks up a tool by wire name. Matching is exact.
    pub fn parse(name: &str) -> Option<ToolName> {
        Self::ALL.into_iter().find(|tool| tool.as_str() == name)
    }

    /// Short human-readable title.
    pub fn title(&self) -> &'static str {
        match self {
            ToolName::SearchTickets => "Search Autotask Tickets",
            ToolName::GetTicket => "Get Autotask Ticket",
            ToolName::CreateTicket => "Create Autotask Ticket",
            ToolName::UpdateTicket => "Update Autotask Ticket",
            ToolName::AddTicketNote => "Add Note to Autotask Ticket",
            ToolName::SearchCompanies => "Search Autotask Companies",
            ToolName::GetCompany => "Get Autotask Company",
            ToolName::SearchContacts => "Search Autotask Contacts",
            ToolName::GetContact => "Get Autotask Contact",
            ToolName::SearchResources => "Search Autotask Resources (Users)",
            ToolName::CreateTimeEntry => "Create Autotask Time Entry",
        }
    }

    /// Description shown to the assistant.
    pub fn description(&self) -> &'static str {
        match self {
            ToolName::SearchTickets => {
                "Search Autotask tickets by status, priority, company, assigned resource, queue or title keyword. Returns up to `limit` tickets (default 20, max 500)."
            }
            ToolName::GetTicket => "Get full details of a single Autotask ticket by ID.",
            ToolName::CreateTicket => {
                "Create a new Autotask ticket. Requires company_id, title and description; priority defaults to Medium and status to New."
            }
            ToolName::UpdateTicket => {
                "Update an existing Autotask ticket. Only the fields provided are changed; at least one is required."
            }
            ToolName::AddTicketNote => "Add a note to an Autotask ticket.",
            ToolName::SearchCompanies => "Search Autotask companies by part of their name.",
            ToolName::GetCompany => "Get details of a single Autotask company by ID.",
            ToolName::SearchContacts => {
                "Search Autotask contacts by company, email, first name or last name."
            }
            ToolName::GetContact => "Get details of a single Autotask contact by ID.",
            ToolName::SearchResources => {
                "Search Autotask resources (internal users and technicians) by email, name or user name. Active resources only unless active_only is false."
            }
            ToolName::CreateTimeEntry => {
                "Log time worked against an Autotask ticket for a resource."
            }
        }
    }

    /// JSON schema of the tool's arguments.
    pub fn input_schema(&self) -> Value {
        match self {
            ToolName::SearchTickets => schema_of::<SearchTicketsInput>(),
            ToolName::GetTicket => schema_of::<GetTicketInput>(),
            ToolName::CreateTicket => schema_of::<CreateTicketInput>(),
            ToolName::UpdateTicket => schema_of::<UpdateTicketInput>(),
            ToolName::AddTicketNote => schema_of::<AddTicketNoteInput>(),
            ToolName::SearchCompanies => schema_of::<SearchCompaniesInput>(),
            ToolName::GetCompany => schema_of::<GetCompanyInput>(),
            ToolName::SearchContacts => schema_of::<SearchContactsInput>(),
            ToolName::GetContact => schema_of::<GetContactInput>(),
            ToolName::SearchResources => schema_of::<SearchResourcesInput>(),
            ToolName::CreateTimeEntry => schema_of::<CreateTimeEntryInput>(),
        }
    }

    /// True for tools that never modify Autotask data.
    pub fn is_read_only(&self) -> bool {
        !matches!(
            self,
            ToolName::CreateTicket
                | ToolName::UpdateTicket
                | ToolName::AddTicketNote
                | ToolName::CreateTimeEntry
        )
    }

    /// True when repeating the call with the same arguments has no further effect.
    pub fn is_idempotent(&self) -> bool {
        self.is_read_only() || *self == ToolName::UpdateTicket
    }

    /// False for single-record lookups, whose result set is fixed by the ID.
    pub fn is_open_world(&self) -> bool {
        !matches!(
            self,
            ToolName::GetTicket | ToolName::GetCompany | ToolName::GetContact
        )
    }

    /// Deserializes raw arguments into this tool's call.
    ///
    /// # Errors
    ///
    /// Returns `AutotaskError::Serialization` for missing required fields,
    /// wrong types or unknown keys.
    pub fn parse_arguments(&self, arguments: Value) -> Result<ToolCall, AutotaskError> {
        let arguments = match arguments {
            Value::Null => Value::Object(Default::default()),
            other => other,
        };

        let call = match self {
            ToolName::SearchTickets => ToolCall::SearchTickets(serde_json::from_value(arguments)?),
            ToolName::GetTicket => ToolCall::GetTicket(serde_json::from_value(arguments)?),
            ToolName::CreateTicket => ToolCall::CreateTicket(serde_json::from_value(arguments)?),
            ToolName::UpdateTicket => ToolCall::UpdateTicket(serde_json::from_value(arguments)?),
            ToolName::AddTicketNote => ToolCall::AddTicketNote(serde_json::from_value(arguments)?),
            ToolName::SearchCompanies => {
                ToolCall::SearchCompanies(serde_json::from_value(arguments)?)
            }
            ToolName::GetCompany => ToolCall::GetCompany(serde_json::from_value(arguments)?),
            ToolName::SearchContacts => {
                ToolCall::SearchContacts(serde_json::from_value(arguments)?)
            }
            ToolName::GetContact => ToolCall::GetContact(serde_json::from_value(arguments)?),
            ToolName::SearchResources => {
                ToolCall::SearchResources(serde_json::from_value(arguments)?)
            }
            ToolName::CreateTimeEntry => {
                ToolCall::CreateTimeEntry(serde_json::from_value(arguments)?)
            }
        };
        Ok(call)
    }
}

fn schema_of<T: JsonSchema>() -> Value {
    serde_json::to_value(schema_for!(T)).unwrap_or_default()
}

/// One catalog entry.
#[derive(Debug, Clone, Serialize)]
pub struct ToolDescriptor {
    /// Wire name.
    pub name: &'static str,
    /// Short title.
    pub title: &'static str,
    /// Description shown to the assistant.
    pub description: &'static str,
    /// Argument schema.
    pub input_schema: Value,
    /// Whether the tool only reads.
    pub read_only: bool,
    /// Whether repeating the call is harmless.
    pub idempotent: bool,
    /// Whether the result depends on data beyond the given IDs.
    pub open_world: bool,
}

/// A tool call together with the requested output format.
#[derive(Debug, Clone)]
pub struct ToolInvocation {
    /// The typed call.
    pub call: ToolCall,
    /// Output format of the rendered response.
    pub response_format: ResponseFormat,
}

impl From<ToolCall> for ToolInvocation {
    fn from(call: ToolCall) -> Self {
        let response_format = call.response_format();
        Self {
            call,
            response_format,
        }
    }
}

/// Routes tool calls to the vendor and renders the outcome.
///
/// Holds no per-call state; clones share the executor.
#[derive(Clone)]
pub struct Dispatcher {
    executor: Arc<dyn RequestExecutor>,
}

impl Dispatcher {
    /// Creates a dispatcher over the given executor.
    pub fn new(executor: Arc<dyn RequestExecutor>) -> Self {
        Self { executor }
    }

    /// Dispatches a call by tool name with raw JSON arguments.
    ///
    /// Unknown names and malformed arguments are rendered as errors without
    /// touching the network.
    pub async fn dispatch(&self, name: &str, arguments: Value) -> RenderedResponse {
        let format = requested_format(&arguments);

        let Some(tool) = ToolName::parse(name) else {
            let error = AutotaskError::unknown_tool(name);
            tracing::warn!(error = %error, "Unknown tool requested");
            return render_error(&error, format);
        };

        match tool.parse_arguments(arguments) {
            Ok(call) => self.invoke(call.into()).await,
            Err(e) => {
                tracing::debug!(tool = tool.as_str(), error = %e, "Rejected tool arguments");
                render_error(&e, format)
            }
        }
    }

    /// Validates the call, performs one vendor request and renders it.
    pub async fn invoke(&self, invocation: ToolInvocation) -> RenderedResponse {
        let ToolInvocation {
            call,
            response_format,
        } = invocation;
        let call = call.sanitize();
        tracing::debug!(?call, "tool called");

        let request = match call.to_request() {
            Ok(request) => request,
            Err(e) => {
                tracing::debug!(error = %e, "Tool arguments failed validation");
                return render_error(&e, response_format);
            }
        };

        let result = self.executor.execute(&request).await;
        render(call.entity(), call.shape(), &result, response_format)
    }

    /// Lists every tool with its description and schema.
    pub fn catalog() -> Vec<ToolDescriptor> {
        ToolName::ALL
            .iter()
            .map(|tool| ToolDescriptor {
                name: tool.as_str(),
                title: tool.title(),
                description: tool.description(),
                input_schema: tool.input_schema(),
                read_only: tool.is_read_only(),
                idempotent: tool.is_idempotent(),
                open_world: tool.is_open_world(),
            })
            .collect()
    }
}

/// The format asked for in raw arguments, markdown if absent or invalid.
fn requested_format(arguments: &Value) -> ResponseFormat {
    arguments
        .get("response_format")
        .and_then(|f| serde_json::from_value(f.clone()).ok())
        .unwrap_or_default()
}
