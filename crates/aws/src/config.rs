use figment::Figment;
use figment::providers::Env;
use serde::{Deserialize, Serialize};

use crate::error::AwsLogsError;

/// Prefix of the environment variables read by [`AwsBaseConfig::from_env`].
pub const ENV_PREFIX: &str = "LOGKEEPER_AWS_";

/// SDK settings for the `CloudWatch` Logs client.
///
/// Every field is optional. Inside Lambda the SDK default chain already
/// resolves region and credentials; these overrides exist for cross-account
/// access and local development (e.g. `LocalStack`).
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct AwsBaseConfig {
    /// AWS region (e.g. `"us-east-1"`). Falls back to `AWS_REGION`.
    #[serde(default)]
    pub region: Option<String>,

    /// Optional IAM role ARN to assume via STS for cross-account access.
    #[serde(default)]
    pub role_arn: Option<String>,

    /// Optional endpoint URL override for local development.
    #[serde(default)]
    pub endpoint_url: Option<String>,

    /// Optional STS session name (defaults to `"logkeeper"`).
    #[serde(default)]
    pub session_name: Option<String>,

    /// Optional external ID for cross-account trust policies.
    #[serde(default)]
    pub external_id: Option<String>,
}

impl std::fmt::Debug for AwsBaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AwsBaseConfig")
            .field("region", &self.region)
            .field("role_arn", &self.role_arn.as_ref().map(|_| "[REDACTED]"))
            .field("endpoint_url", &self.endpoint_url)
            .field("session_name", &self.session_name)
            .field("external_id", &self.external_id)
            .finish()
    }
}

impl AwsBaseConfig {
    /// Create a new `AwsBaseConfig` pinned to the given region.
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            region: Some(region.into()),
            ..Self::default()
        }
    }

    /// Read `LOGKEEPER_AWS_REGION`, `LOGKEEPER_AWS_ROLE_ARN`,
    /// `LOGKEEPER_AWS_ENDPOINT_URL`, `LOGKEEPER_AWS_SESSION_NAME` and
    /// `LOGKEEPER_AWS_EXTERNAL_ID`.
    pub fn from_env() -> Result<Self, AwsLogsError> {
        Figment::new()
            .merge(Env::prefixed(ENV_PREFIX))
            .extract()
            .map_err(|e| AwsLogsError::Configuration(e.to_string()))
    }

    /// Set an IAM role ARN to assume via STS.
    #[must_use]
    pub fn with_role_arn(mut self, role_arn: impl Into<String>) -> Self {
        self.role_arn = Some(role_arn.into());
        self
    }

    /// Set an endpoint URL override for local development.
    #[must_use]
    pub fn with_endpoint_url(mut self, endpoint_url: impl Into<String>) -> Self {
        self.endpoint_url = Some(endpoint_url.into());
        self
    }

    /// Set the STS session name for assume-role.
    #[must_use]
    pub fn with_session_name(mut self, session_name: impl Into<String>) -> Self {
        self.session_name = Some(session_name.into());
        self
    }

    /// Set the external ID for cross-account trust policies.
    #[must_use]
    pub fn with_external_id(mut self, external_id: impl Into<String>) -> Self {
        self.external_id = Some(external_id.into());
        self
    }
}
