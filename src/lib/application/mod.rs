//! # Application Module
//!
//! ## Submodules
//!
//! - [`tooling`] - MCP session boundary and retrying tool invocation
//! - [`actions`] - Handlers, dispatcher and sequence executor for Spotify tools
//! - [`interpreter`] - Language-model stage that produces the action list
//! - [`relay`] - One command end to end

pub mod actions;
pub mod interpreter;
pub mod relay;
pub mod tooling;
