use super::errors::InterpretError;
use crate::application::actions::Action;
use serde_json::Value;

/// Decode the model's reply into an ordered action list.
///
/// Accepts a JSON array of `{tool_name, params}` objects or one such object
/// on its own. A lone `{"error": "..."}` object is the model declining the
/// command. The text must be JSON as-is; nothing is extracted from prose.
pub fn parse_instructions(content: &str) -> Result<Vec<Action>, InterpretError> {
    let content = content.trim();
    if content.is_empty() {
        return Err(InterpretError::EmptyResponse);
    }

    let parsed: Value = serde_json::from_str(content).map_err(InterpretError::NotJson)?;
    let items = match parsed {
        Value::Array(items) => items,
        Value::Object(object) => {
            if object.len() == 1 {
                if let Some(error) = object.get("error") {
                    let message = match error {
                        Value::String(message) => message.clone(),
                        other => other.to_string(),
                    };
                    return Err(InterpretError::Declined(message));
                }
            }
            vec![Value::Object(object)]
        }
        other => vec![other],
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| to_action(index, item))
        .collect()
}

fn to_action(index: usize, item: Value) -> Result<Action, InterpretError> {
    let Value::Object(object) = &item else {
        return Err(InterpretError::invalid_action(index, "each action must be an object"));
    };
    if !object.get("tool_name").is_some_and(Value::is_string) {
        return Err(InterpretError::invalid_action(index, "action missing tool_name"));
    }
    if !object.get("params").is_some_and(Value::is_object) {
        return Err(InterpretError::invalid_action(index, "action missing params"));
    }
    serde_json::from_value(item)
        .map_err(|err| InterpretError::invalid_action(index, err.to_string()))
}
