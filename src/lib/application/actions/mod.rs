//! Execution of parsed Spotify action sequences against an MCP session.

pub mod context;
pub mod dispatcher;
pub mod errors;
pub mod executor;
pub mod formatter;
pub mod handlers;
pub mod invoker;
pub mod models;
pub mod outcome;
pub mod params;

#[cfg(test)]
mod test_support;

pub use context::{ExecutionContext, ItemKind, SearchResult, Track};
pub use dispatcher::dispatch;
pub use errors::ExecutionError;
pub use executor::SequenceExecutor;
pub use formatter::format_final_response;
pub use invoker::{RemoteFailure, ToolInvoker};
pub use models::{Action, ToolKind};
pub use outcome::{
    ActionFailure, ActionReport, FinalResponse, PartialDetails, ReportResult, StepOutcome,
};
