use super::context::ExecutionContext;
use super::dispatcher::dispatch;
use super::errors::ExecutionError;
use super::formatter::format_final_response;
use super::invoker::ToolInvoker;
use super::models::Action;
use super::outcome::{ActionFailure, FinalResponse, NO_ACTIONS, StepOutcome};
use crate::application::tooling::{RetryPolicy, ToolSession};
use futures::FutureExt;
use serde_json::Value;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use tracing::{error, info};

enum SequenceState {
    Running(usize),
    StoppedEarly(ActionFailure),
    Completed,
}

/// Runs an ordered action list against one session.
///
/// Steps run strictly in order with a fresh [`ExecutionContext`] per call. A
/// failed critical step ends the sequence with its error; any other failure
/// is recorded and the sequence continues.
#[derive(Debug, Clone, Copy, Default)]
pub struct SequenceExecutor {
    policy: RetryPolicy,
}

impl SequenceExecutor {
    pub fn new(policy: RetryPolicy) -> Self {
        Self { policy }
    }

    /// Never fails: faults and panics come back as an error response
    pub async fn execute(&self, session: &dyn ToolSession, actions: &[Action]) -> FinalResponse {
        match AssertUnwindSafe(self.run(session, actions)).catch_unwind().await {
            Ok(Ok(response)) => response,
            Ok(Err(err)) => {
                error!(%err, "Error executing Spotify actions");
                FinalResponse::error(err.to_string())
            }
            Err(panic) => {
                let err = ExecutionError::Panicked(panic_message(panic.as_ref()));
                error!(%err, "Error executing Spotify actions");
                FinalResponse::error(err.to_string())
            }
        }
    }

    async fn run(
        &self,
        session: &dyn ToolSession,
        actions: &[Action],
    ) -> Result<FinalResponse, ExecutionError> {
        if actions.is_empty() {
            return Ok(FinalResponse::error(NO_ACTIONS));
        }

        let invoker = ToolInvoker::new(session, self.policy);
        let mut context = ExecutionContext::new();
        let mut results: Vec<StepOutcome> = Vec::with_capacity(actions.len());
        let mut state = SequenceState::Running(0);

        loop {
            state = match state {
                SequenceState::Running(step) => match actions.get(step) {
                    None => SequenceState::Completed,
                    Some(action) => {
                        let params = Value::Object(action.parameters.clone());
                        info!(
                            step = step + 1,
                            total = actions.len(),
                            tool = %action.kind,
                            params = %params,
                            "Executing action"
                        );

                        let outcome =
                            dispatch(&invoker, &action.kind, &action.parameters, &context).await?;
                        let next = match (&outcome, action.tool_kind()) {
                            (StepOutcome::Success(report), Some(kind)) => {
                                context.record(kind, report);
                                SequenceState::Running(step + 1)
                            }
                            (StepOutcome::Failure(failure), Some(kind)) if kind.is_critical() => {
                                error!(
                                    tool = %kind,
                                    error = %failure.error,
                                    "Critical action failed, stopping"
                                );
                                SequenceState::StoppedEarly(failure.clone())
                            }
                            (StepOutcome::Failure(failure), _) => {
                                error!(
                                    tool = %action.kind,
                                    error = %failure.error,
                                    "Action failed"
                                );
                                SequenceState::Running(step + 1)
                            }
                            (StepOutcome::Success(_), None) => SequenceState::Running(step + 1),
                        };
                        results.push(outcome);
                        next
                    }
                },
                SequenceState::StoppedEarly(failure) => return Ok(FinalResponse::Failure(failure)),
                SequenceState::Completed => return Ok(format_final_response(&results)),
            };
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
