//! Lambda entry points for the log retention enforcer.
//!
//! The function is subscribed to `CreateLogGroup` calls recorded by
//! `CloudTrail`. Each invocation reads its configuration from the
//! environment, enforces retention on the named log group and answers
//! [`DONE`]. Every failure is returned to the runtime unchanged.

pub mod telemetry;

use lambda_runtime::{Error, LambdaEvent};
use serde_json::Value;
use tracing::debug;

use logkeeper_core::{
    LogGroupService, Outcome, RetentionConfig, RetentionEnforcer, RetentionError, TriggerEvent,
};

/// Completion marker returned by every successful invocation.
pub const DONE: &str = "Done";

/// Runtime handler: loads [`RetentionConfig`] from the environment before
/// touching the log service, then delegates to [`handle`].
pub async fn function_handler<S: LogGroupService>(
    enforcer: &RetentionEnforcer<S>,
    event: LambdaEvent<Value>,
) -> Result<String, Error> {
    let (payload, context) = event.into_parts();
    debug!(request_id = %context.request_id, "received event");

    let config = RetentionConfig::from_env()?;
    let marker = handle(enforcer, payload, &config).await?;
    Ok(marker.to_owned())
}

/// Enforce retention for the log group named in `payload`.
pub async fn handle<S: LogGroupService>(
    enforcer: &RetentionEnforcer<S>,
    payload: Value,
    config: &RetentionConfig,
) -> Result<&'static str, RetentionError> {
    let event = TriggerEvent::from_value(payload)?;

    match enforcer.enforce(&event, config).await? {
        Outcome::Updated { .. } => {}
        Outcome::AlreadySet {
            log_group_name,
            retention_in_days,
        } => debug!(%log_group_name, retention_in_days, "retention unchanged"),
        Outcome::NotFound { log_group_name } => {
            debug!(%log_group_name, "log group not eligible");
        }
    }

    Ok(DONE)
}
