use serde::Deserialize;

use crate::error::RetentionError;

/// A `CloudTrail`-recorded `CreateLogGroup` call delivered through `EventBridge`.
///
/// Only `detail.requestParameters.logGroupName` is read; every other field
/// of the event is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct TriggerEvent {
    detail: ApiCallDetail,
}

#[derive(Debug, Clone, Deserialize)]
struct ApiCallDetail {
    #[serde(rename = "requestParameters")]
    request_parameters: RequestParameters,
}

#[derive(Debug, Clone, Deserialize)]
struct RequestParameters {
    #[serde(rename = "logGroupName")]
    log_group_name: String,
}

impl TriggerEvent {
    /// Build an event targeting `log_group_name` directly.
    pub fn new(log_group_name: impl Into<String>) -> Self {
        Self {
            detail: ApiCallDetail {
                request_parameters: RequestParameters {
                    log_group_name: log_group_name.into(),
                },
            },
        }
    }

    /// Parse the raw event payload handed over by the runtime.
    pub fn from_value(value: serde_json::Value) -> Result<Self, RetentionError> {
        let event: Self = serde_json::from_value(value).map_err(|e| {
            RetentionError::MalformedEvent(format!(
                "expected detail.requestParameters.logGroupName: {e}"
            ))
        })?;

        if event.log_group_name().is_empty() {
            return Err(RetentionError::MalformedEvent(
                "detail.requestParameters.logGroupName is empty".to_owned(),
            ));
        }
        Ok(event)
    }

    /// Fully-qualified name of the log group the API call created.
    pub fn log_group_name(&self) -> &str {
        &self.detail.request_parameters.log_group_name
    }
}
