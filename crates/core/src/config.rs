use figment::Figment;
use figment::providers::Env;
use serde::Deserialize;

use crate::error::RetentionError;

/// Environment variable holding the number of days to apply.
pub const RETENTION_IN_DAYS_VAR: &str = "retention_in_days";

/// Environment variable holding the optional log group name prefix filter.
pub const LOG_GROUP_PREFIX_VAR: &str = "log_group_prefix";

/// Per-invocation settings for the retention enforcer.
///
/// Read from the process environment at the start of every invocation and
/// left untouched until the invocation finishes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RetentionConfig {
    /// Number of days applied to log groups that never expire.
    pub retention_in_days: i32,

    /// Only log groups whose name starts with this prefix are considered.
    /// Empty matches every name. Taken verbatim from the environment (only
    /// trimmed), never parsed as a typed value.
    #[serde(skip)]
    pub log_group_prefix: String,
}

impl RetentionConfig {
    /// Create a new `RetentionConfig` with an empty prefix filter.
    pub fn new(retention_in_days: i32) -> Self {
        Self {
            retention_in_days,
            log_group_prefix: String::new(),
        }
    }

    /// Restrict enforcement to log groups starting with `prefix`.
    #[must_use]
    pub fn with_log_group_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.log_group_prefix = prefix.into();
        self
    }

    /// Load the configuration from `retention_in_days` and `log_group_prefix`.
    pub fn from_env() -> Result<Self, RetentionError> {
        let figment = Figment::new().merge(Env::raw().only(&[RETENTION_IN_DAYS_VAR]));
        let prefix = Env::var(LOG_GROUP_PREFIX_VAR).unwrap_or_default();
        Self::from_figment(&figment, &prefix)
    }

    fn from_figment(figment: &Figment, prefix: &str) -> Result<Self, RetentionError> {
        let mut config: Self = figment
            .extract()
            .map_err(|e| RetentionError::Configuration(e.to_string()))?;

        config.log_group_prefix = prefix.trim().to_owned();
        config.validate()?;
        Ok(config)
    }

    /// Reject values the log service could never accept.
    pub fn validate(&self) -> Result<(), RetentionError> {
        if self.retention_in_days <= 0 {
            return Err(RetentionError::Configuration(format!(
                "{RETENTION_IN_DAYS_VAR} must be a positive integer, got {}",
                self.retention_in_days
            )));
        }
        Ok(())
    }

    /// Whether `log_group_name` passes the prefix filter.
    pub fn matches_prefix(&self, log_group_name: &str) -> bool {
        log_group_name.starts_with(&self.log_group_prefix)
    }
}
