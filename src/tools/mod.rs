//! MCP tools for Autotask.
//!
//! This module contains the tool input types, the closed set of entity
//! operations they map to, and the registry that dispatches them.

mod inputs;
mod operations;
mod registry;

pub use inputs::*;
pub use operations::ToolCall;
pub use registry::{Dispatcher, ToolDescriptor, ToolInvocation, ToolName};
