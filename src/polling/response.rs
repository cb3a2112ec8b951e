//! Shape checks for the homework status response.

use serde_json::Value;

use crate::base::types::{ApiResponse, PollError};

/// Check a parsed response body and extract its homework list.
///
/// The body must be an object with a `homeworks` array and an integer
/// `current_date`. The array is returned unchanged, most recent entry first.
pub fn check_response(body: &Value) -> Result<ApiResponse, PollError> {
    let object = body
        .as_object()
        .ok_or_else(|| PollError::MalformedResponse(format!("expected an object, got {}", kind_of(body))))?;

    let homeworks = object
        .get("homeworks")
        .ok_or_else(|| PollError::MalformedResponse("missing the `homeworks` key".into()))?;

    let homeworks = homeworks
        .as_array()
        .ok_or_else(|| PollError::MalformedResponse(format!("`homeworks` is {}, not an array", kind_of(homeworks))))?;

    let current_date = object
        .get("current_date")
        .ok_or_else(|| PollError::MalformedResponse("missing the `current_date` key".into()))?;

    let current_date = current_date
        .as_i64()
        .ok_or_else(|| PollError::MalformedResponse(format!("`current_date` is {}, not an integer", kind_of(current_date))))?;

    Ok(ApiResponse {
        homeworks: homeworks.clone(),
        current_date,
    })
}

/// Name a JSON value's type for error messages.
fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// Tests.
