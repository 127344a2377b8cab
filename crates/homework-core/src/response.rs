//! Shape checks for the homework API response.
//!
//! The API answers with:
//! ```json
//! {"current_date": 1700000000, "homeworks": [{"homework_name": "...", "status": "approved"}]}
//! ```
//! `homeworks` is ordered newest first.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{HomeworkError, Result};

/// A single homework as reported by the API.
///
/// Both keys are optional at this stage; their absence is only an error once
/// the record has to be turned into a message.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HomeworkRecord {
    #[serde(default)]
    pub homework_name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl HomeworkRecord {
    pub fn new(name: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            homework_name: Some(name.into()),
            status: Some(status.into()),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.homework_name.as_deref()
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }
}

/// A validated API response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    /// Server time in seconds since the epoch; the next poll starts here.
    pub current_date: i64,
    /// Homeworks changed since the requested date, newest first.
    pub homeworks: Vec<HomeworkRecord>,
}

impl ApiResponse {
    /// The most recent homework, if any.
    pub fn latest(&self) -> Option<&HomeworkRecord> {
        self.homeworks.first()
    }
}

/// Check the raw JSON against the documented response shape.
///
/// # Errors
/// Returns `SchemaError` when the value is not an object, when either key is
/// missing, when `current_date` is not an integer, or when `homeworks` is not
/// an array of objects.
pub fn validate(raw: &Value) -> Result<ApiResponse> {
    let object = raw
        .as_object()
        .ok_or_else(|| schema(format!("expected a JSON object, got {}", kind_of(raw))))?;

    let current_date = object
        .get("current_date")
        .ok_or_else(|| schema("missing \"current_date\" key"))?;
    let homeworks = object
        .get("homeworks")
        .ok_or_else(|| schema("missing \"homeworks\" key"))?;

    let current_date = match current_date.as_i64() {
        Some(date) => date,
        None if current_date.is_u64() => {
            return Err(schema(format!(
                "\"current_date\" is out of range: {}",
                current_date
            )))
        }
        None => {
            return Err(schema(format!(
                "\"current_date\" must be an integer, got {}",
                kind_of(current_date)
            )))
        }
    };

    let items = homeworks.as_array().ok_or_else(|| {
        schema(format!(
            "\"homeworks\" must be a list, got {}",
            kind_of(homeworks)
        ))
    })?;

    let homeworks = items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            if !item.is_object() {
                return Err(schema(format!(
                    "homework #{} must be an object, got {}",
                    index,
                    kind_of(item)
                )));
            }
            serde_json::from_value(item.clone())
                .map_err(|e| schema(format!("homework #{}: {}", index, e)))
        })
        .collect::<Result<Vec<HomeworkRecord>>>()?;

    Ok(ApiResponse {
        current_date,
        homeworks,
    })
}

fn schema(reason: impl Into<String>) -> HomeworkError {
    HomeworkError::SchemaError(reason.into())
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(n) if n.is_i64() || n.is_u64() => "an integer",
        Value::Number(_) => "a float",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
