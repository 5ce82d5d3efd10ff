use logkeeper_core::LogServiceError;
use thiserror::Error;

/// Errors specific to `CloudWatch` Logs operations.
#[derive(Debug, Error)]
pub enum AwsLogsError {
    /// The AWS SDK returned an error from the service.
    #[error("AWS service error: {0}")]
    ServiceError(String),

    /// The request was throttled by the AWS service.
    #[error("AWS request throttled")]
    Throttled,

    /// A network or connection error occurred communicating with AWS.
    #[error("AWS connection error: {0}")]
    Connection(String),

    /// The request timed out.
    #[error("AWS request timed out")]
    Timeout,

    /// AWS credential resolution failed.
    #[error("credential error: {0}")]
    CredentialError(String),

    /// Configuration is invalid.
    #[error("invalid configuration: {0}")]
    Configuration(String),
}

impl From<AwsLogsError> for LogServiceError {
    fn from(err: AwsLogsError) -> Self {
        match err {
            AwsLogsError::ServiceError(msg) | AwsLogsError::Configuration(msg) => {
                LogServiceError::Rejected(msg)
            }
            AwsLogsError::Throttled => LogServiceError::Throttled,
            AwsLogsError::Connection(msg) => LogServiceError::Connection(msg),
            AwsLogsError::Timeout => LogServiceError::Timeout,
            AwsLogsError::CredentialError(msg) => LogServiceError::Credentials(msg),
        }
    }
}

/// Classify an AWS SDK error string into the appropriate [`AwsLogsError`].
///
/// Expects the full error chain (see
/// [`DisplayErrorContext`](aws_sdk_cloudwatchlogs::error::DisplayErrorContext)),
/// since the top-level SDK message is only "service error" or "dispatch failure".
pub fn classify_sdk_error(error_str: &str) -> AwsLogsError {
    let lower = error_str.to_lowercase();
    if lower.contains("throttl") || lower.contains("rate exceed") || lower.contains("too many") {
        AwsLogsError::Throttled
    } else if lower.contains("timeout") || lower.contains("timed out") {
        AwsLogsError::Timeout
    } else if lower.contains("credential")
        || lower.contains("expiredtoken")
        || lower.contains("unrecognizedclient")
        || lower.contains("security token")
    {
        AwsLogsError::CredentialError(error_str.to_owned())
    } else if lower.contains("connection")
        || lower.contains("connect")
        || lower.contains("dns")
        || lower.contains("network")
        || lower.contains("dispatch failure")
    {
        AwsLogsError::Connection(error_str.to_owned())
    } else {
        AwsLogsError::ServiceError(error_str.to_owned())
    }
}
