//! # Autotask MCP
//!
//! An MCP (Model Context Protocol) server for the Autotask PSA REST API.
//!
//! It exposes a fixed catalog of Autotask operations as MCP tools, enabling AI
//! assistants to search and manage tickets, look up companies, contacts and
//! resources, and log time through natural language.
//!
//! ## Features
//!
//! - **Read operations**: search tickets, companies, contacts and resources; view single records
//! - **Write operations**: create and update tickets, add ticket notes, log time entries
//! - **Dual output**: every tool renders as markdown (default) or json
//! - **Error classification**: vendor failures are mapped to a closed set of kinds
//! - **Security**: the API secret is never logged or exposed in responses
//!
//! ## Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`config`] - Credential loading and validation
//! - [`error`] - Error types with security-conscious message sanitization
//! - [`autotask_client`] - Request executor for the Autotask REST API
//! - [`models`] - Query filters, call outcomes and entity projections
//! - [`tools`] - Tool inputs, entity operations and the dispatcher
//! - [`format`] - Markdown and json response rendering
//! - [`server`] - MCP server implementation with tool routing
//!
//! A tool call flows through the [`Dispatcher`](tools::Dispatcher): the
//! arguments are validated into a [`ToolCall`](tools::ToolCall), turned into
//! exactly one [`VendorRequest`](autotask_client::VendorRequest), executed, and
//! rendered.
//!
//! ## Configuration
//!
//! Four environment variables are required (a `.env` file is also read):
//!
//! - `AUTOTASK_USERNAME`: API user name
//! - `AUTOTASK_SECRET`: API user secret
//! - `AUTOTASK_INTEGRATION_CODE`: API tracking identifier
//! - `AUTOTASK_API_URL`: zone REST URL, e.g. `https://webservices5.autotask.net/ATServicesRest/v1.0`
//!
//! Optional:
//! - `RUST_LOG`: Log level (e.g., `autotask_mcp=debug`)
//!
//! ## Example
//!
//! Dispatching a call directly:
//!
//! ```ignore
//! use std::sync::Arc;
//! use autotask_mcp::autotask_client::AutotaskClient;
//! use autotask_mcp::config::Credentials;
//! use autotask_mcp::tools::Dispatcher;
//!
//! async fn example() -> Result<(), autotask_mcp::error::AutotaskError> {
//!     let credentials = Credentials::from_env()?;
//!     let dispatcher = Dispatcher::new(Arc::new(AutotaskClient::new(&credentials)?));
//!
//!     let rendered = dispatcher
//!         .dispatch("autotask_search_companies", serde_json::json!({"name": "Tech"}))
//!         .await;
//!     println!("{}", rendered.body);
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod autotask_client;
pub mod config;
pub mod error;
pub mod format;
pub mod models;
pub mod server;
pub mod tools;
