//! One handler per tool kind.
//!
//! Handlers read the execution context but never write it; the executor folds
//! successful reports back in. Every handler returns a [`StepOutcome`] for
//! remote or semantic failures and reserves `Err` for faults that abort the
//! sequence.

pub mod info;
pub mod playback;
pub mod playlist;
pub mod queue;
pub mod search;

use crate::application::tooling::RemoteResult;
use serde_json::Value;

/// Decode the JSON text payload of a tool answer
fn decode_payload(result: &RemoteResult) -> Result<Value, serde_json::Error> {
    serde_json::from_str(result.payload())
}
