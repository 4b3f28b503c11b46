use super::error::ToolInvokeError;
use super::interface::ToolSession;
use super::remote::RemoteResult;
use serde_json::Value;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, error, warn};

/// Bounded retry with exponential backoff for transient tool failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    base_delay: Duration,
}

impl RetryPolicy {
    /// A zero attempt budget is raised to one so the tool is always called
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Delay after the `attempt`-th failure (1-indexed): `base * 2^(attempt-1)`
    pub fn delay_for(&self, attempt: u32) -> Duration {
        if attempt == 0 {
            return Duration::ZERO;
        }
        let factor = 2u32.saturating_pow(attempt - 1);
        self.base_delay.saturating_mul(factor)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_secs(1))
    }
}

/// Call `tool` until it answers or the attempt budget runs out.
///
/// A reply flagged `isError` by the server is an answer, not a failure, and is
/// returned as-is. Only invocation errors are retried; the last one is
/// propagated once the budget is spent.
pub async fn call_tool_with_retry(
    session: &dyn ToolSession,
    tool: &str,
    arguments: &Value,
    policy: &RetryPolicy,
) -> Result<RemoteResult, ToolInvokeError> {
    let mut attempts = 0;
    loop {
        debug!(tool, attempt = attempts + 1, "Calling MCP tool");
        match session.call_tool(tool, arguments.clone()).await {
            Ok(result) => {
                debug!(tool, is_error = result.is_error, "MCP tool answered");
                return Ok(result);
            }
            Err(err) => {
                attempts += 1;
                if attempts >= policy.max_attempts() {
                    error!(tool, attempts, %err, "Tool call failed after all attempts");
                    return Err(err);
                }
                let delay = policy.delay_for(attempts);
                warn!(
                    tool,
                    attempt = attempts,
                    max_attempts = policy.max_attempts(),
                    retry_in_ms = delay.as_millis() as u64,
                    %err,
                    "Retrying tool call after error"
                );
                sleep(delay).await;
            }
        }
    }
}
