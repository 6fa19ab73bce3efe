//! MCP server implementation for Autotask.
//!
//! This module defines the `AutotaskServer` struct that implements the MCP
//! `ServerHandler` trait, exposing Autotask operations as tools. Each tool
//! takes its arguments as a raw object and hands them to
//! [`Dispatcher::dispatch`], so malformed arguments come back as rendered
//! errors rather than protocol errors. Descriptions, schemas and hints in
//! the tool list are taken from [`Dispatcher::catalog`].

use std::sync::Arc;

use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{JsonObject, ServerCapabilities, ServerInfo, ToolAnnotations},
    tool, tool_handler, tool_router, ServerHandler,
};
use serde_json::Value;

use crate::autotask_client::RequestExecutor;
use crate::tools::{Dispatcher, ToolName};

/// The Autotask MCP server.
#[derive(Clone)]
pub struct AutotaskServer {
    /// Routes calls to the vendor and renders results.
    dispatcher: Dispatcher,
    /// Tool router for MCP tool dispatch.
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl AutotaskServer {
    /// Creates a new server over the given request executor.
    pub fn new(executor: Arc<dyn RequestExecutor>) -> Self {
        Self {
            dispatcher: Dispatcher::new(executor),
            tool_router: Self::catalog_router(),
        }
    }

    /// Builds the router and overwrites each tool's listing with its catalog entry.
    fn catalog_router() -> ToolRouter<Self> {
        let mut router = Self::tool_router();
        for entry in Dispatcher::catalog() {
            let Some(route) = router.map.get_mut(entry.name) else {
                tracing::warn!(tool = entry.name, "Catalog entry has no route");
                continue;
            };
            route.attr.description = Some(entry.description.into());
            if let Value::Object(schema) = entry.input_schema {
                route.attr.input_schema = Arc::new(schema);
            }
            route.attr.annotations = Some(
                ToolAnnotations::with_title(entry.title)
                    .read_only(entry.read_only)
                    .destructive(false)
                    .idempotent(entry.idempotent)
                    .open_world(entry.open_world),
            );
        }
        router
    }

    /// A simple ping tool to verify the server is running.
    #[tool(description = "Test connectivity to the Autotask MCP server. Returns 'pong' if the server is running correctly.")]
    fn ping(&self) -> String {
        tracing::debug!("ping tool called");
        "pong".to_string()
    }

    #[tool]
    async fn autotask_search_tickets(
        &self,
        Parameters(arguments): Parameters<JsonObject>,
    ) -> Result<String, String> {
        self.run(ToolName::SearchTickets, arguments).await
    }

    #[tool]
    async fn autotask_get_ticket(
        &self,
        Parameters(arguments): Parameters<JsonObject>,
    ) -> Result<String, String> {
        self.run(ToolName::GetTicket, arguments).await
    }

    #[tool]
    async fn autotask_create_ticket(
        &self,
        Parameters(arguments): Parameters<JsonObject>,
    ) -> Result<String, String> {
        self.run(ToolName::CreateTicket, arguments).await
    }

    #[tool]
    async fn autotask_update_ticket(
        &self,
        Parameters(arguments): Parameters<JsonObject>,
    ) -> Result<String, String> {
        self.run(ToolName::UpdateTicket, arguments).await
    }

    #[tool]
    async fn autotask_add_ticket_note(
        &self,
        Parameters(arguments): Parameters<JsonObject>,
    ) -> Result<String, String> {
        self.run(ToolName::AddTicketNote, arguments).await
    }

    #[tool]
    async fn autotask_search_companies(
        &self,
        Parameters(arguments): Parameters<JsonObject>,
    ) -> Result<String, String> {
        self.run(ToolName::SearchCompanies, arguments).await
    }

    #[tool]
    async fn autotask_get_company(
        &self,
        Parameters(arguments): Parameters<JsonObject>,
    ) -> Result<String, String> {
        self.run(ToolName::GetCompany, arguments).await
    }

    #[tool]
    async fn autotask_search_contacts(
        &self,
        Parameters(arguments): Parameters<JsonObject>,
    ) -> Result<String, String> {
        self.run(ToolName::SearchContacts, arguments).await
    }

    #[tool]
    async fn autotask_get_contact(
        &self,
        Parameters(arguments): Parameters<JsonObject>,
    ) -> Result<String, String> {
        self.run(ToolName::GetContact, arguments).await
    }

    #[tool]
    async fn autotask_search_resources(
        &self,
        Parameters(arguments): Parameters<JsonObject>,
    ) -> Result<String, String> {
        self.run(ToolName::SearchResources, arguments).await
    }

    #[tool]
    async fn autotask_create_time_entry(
        &self,
        Parameters(arguments): Parameters<JsonObject>,
    ) -> Result<String, String> {
        self.run(ToolName::CreateTimeEntry, arguments).await
    }

    /// Dispatches raw arguments and maps the rendered response onto the tool result.
    async fn run(&self, tool: ToolName, arguments: JsonObject) -> Result<String, String> {
        let rendered = self
            .dispatcher
            .dispatch(tool.as_str(), Value::Object(arguments))
            .await;
        if rendered.success {
            Ok(rendered.body)
        } else {
            Err(rendered.body)
        }
    }
}

#[tool_handler]
impl ServerHandler for AutotaskServer {
    /// Returns server information for the MCP initialize handshake.
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Autotask MCP provides access to Autotask PSA. \
                 Use autotask_search_tickets to find tickets and autotask_get_ticket for details. \
                 Create tickets with autotask_create_ticket, modify them with autotask_update_ticket \
                 and add notes with autotask_add_ticket_note. Look up IDs with \
                 autotask_search_companies, autotask_search_contacts and autotask_search_resources, \
                 and log time with autotask_create_time_entry. Every tool accepts \
                 response_format 'markdown' (default) or 'json'. Start with 'ping' to verify connectivity."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}
