use super::outcome::{
    ActionFailure, ActionReport, DEFAULT_PARTIAL_MESSAGE, DEFAULT_SUCCESS_MESSAGE, FinalResponse,
    NO_ACTIONS, PARTIAL_SUFFIX, PartialDetails, StepOutcome,
};

/// Collapse the ordered step outcomes into one response.
///
/// All failed: the last error. Mixed: the last success plus every error.
/// All succeeded: the last report.
pub fn format_final_response(results: &[StepOutcome]) -> FinalResponse {
    let errors: Vec<ActionFailure> = results
        .iter()
        .filter_map(StepOutcome::failure_detail)
        .cloned()
        .collect();
    let last_success: Option<&ActionReport> = results.iter().rev().find_map(StepOutcome::report);

    match last_success {
        None => errors
            .last()
            .cloned()
            .map(FinalResponse::Failure)
            .unwrap_or_else(|| FinalResponse::error(NO_ACTIONS)),
        Some(report) if errors.is_empty() => FinalResponse::Success {
            message: report
                .message
                .clone()
                .unwrap_or_else(|| DEFAULT_SUCCESS_MESSAGE.to_string()),
            details: report.clone(),
        },
        Some(report) => FinalResponse::Partial {
            message: format!(
                "{}\n{PARTIAL_SUFFIX}",
                report.message.as_deref().unwrap_or(DEFAULT_PARTIAL_MESSAGE)
            ),
            details: PartialDetails {
                success: report.clone(),
                errors,
            },
        },
    }
}
