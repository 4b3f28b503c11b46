use crate::application::tooling::RetryPolicy;
use crate::constants::{DEFAULT_MAX_ATTEMPTS, DEFAULT_RETRY_DELAY_MS};
use serde::Deserialize;
use std::time::Duration;

/// Bounds for retrying transient MCP tool failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetrySettings {
    pub max_attempts: u32,
    pub base_delay_ms: u64,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_delay_ms: DEFAULT_RETRY_DELAY_MS,
        }
    }
}

impl RetrySettings {
    pub fn policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_attempts, Duration::from_millis(self.base_delay_ms))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct RawRetry {
    max_attempts: Option<u32>,
    base_delay_ms: Option<u64>,
}

impl From<RawRetry> for RetrySettings {
    fn from(raw: RawRetry) -> Self {
        let defaults = RetrySettings::default();
        Self {
            max_attempts: raw.max_attempts.unwrap_or(defaults.max_attempts),
            base_delay_ms: raw.base_delay_ms.unwrap_or(defaults.base_delay_ms),
        }
    }
}
