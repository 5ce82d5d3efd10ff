use crate::error::LogServiceError;

/// A log group as reported by the log service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogGroup {
    /// Fully-qualified log group name.
    pub name: String,

    /// Current retention in days. `None` means records never expire.
    pub retention_in_days: Option<i32>,
}

impl LogGroup {
    /// A log group with no retention policy.
    pub fn never_expires(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            retention_in_days: None,
        }
    }

    /// A log group that already carries a retention policy.
    pub fn with_retention(name: impl Into<String>, retention_in_days: i32) -> Self {
        Self {
            name: name.into(),
            retention_in_days: Some(retention_in_days),
        }
    }
}

/// Administrative operations the enforcer needs from the log service.
///
/// Uses native `async fn` methods, so the trait is not object-safe; the
/// enforcer is generic over it instead.
pub trait LogGroupService: Send + Sync {
    /// List every log group whose name starts with `name_prefix`, in the
    /// order the service returns them.
    fn describe_log_groups(
        &self,
        name_prefix: &str,
    ) -> impl std::future::Future<Output = Result<Vec<LogGroup>, LogServiceError>> + Send;

    /// Set the retention policy of exactly `log_group_name`.
    fn put_retention_policy(
        &self,
        log_group_name: &str,
        retention_in_days: i32,
    ) -> impl std::future::Future<Output = Result<(), LogServiceError>> + Send;
}
