use thiserror::Error;

/// Errors that terminate a retention enforcement invocation.
#[derive(Debug, Error)]
pub enum RetentionError {
    /// A required setting is absent or malformed.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// The triggering event does not carry a log group name.
    #[error("malformed event: {0}")]
    MalformedEvent(String),

    /// The log service could not complete a call.
    #[error(transparent)]
    Service(#[from] LogServiceError),
}

/// Errors returned by a [`LogGroupService`](crate::service::LogGroupService).
#[derive(Debug, Error)]
pub enum LogServiceError {
    /// The service rejected the request (missing group, access denied, bad input).
    #[error("log service error: {0}")]
    Rejected(String),

    /// The request was throttled by the service.
    #[error("log service request throttled")]
    Throttled,

    /// A network or transport-level error occurred.
    #[error("connection error: {0}")]
    Connection(String),

    /// The request timed out.
    #[error("log service request timed out")]
    Timeout,

    /// Credentials could not be resolved or were refused.
    #[error("credential error: {0}")]
    Credentials(String),
}

impl LogServiceError {
    /// Returns `true` if the error is transient and the call may succeed on
    /// a later invocation.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Throttled | Self::Connection(_) | Self::Timeout)
    }
}
