use aws_sdk_cloudwatchlogs::error::DisplayErrorContext;
use logkeeper_core::{LogGroup, LogGroupService, LogServiceError};
use tracing::{debug, error, instrument};

use crate::auth::build_sdk_config;
use crate::config::AwsBaseConfig;
use crate::error::classify_sdk_error;

/// `CloudWatch` Logs client implementing [`LogGroupService`].
pub struct CloudWatchLogsService {
    client: aws_sdk_cloudwatchlogs::Client,
}

impl std::fmt::Debug for CloudWatchLogsService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudWatchLogsService")
            .field("client", &"<CloudWatchLogsClient>")
            .finish()
    }
}

impl CloudWatchLogsService {
    /// Create a new `CloudWatchLogsService` by building an AWS SDK client.
    pub async fn new(config: &AwsBaseConfig) -> Self {
        let sdk_config = build_sdk_config(config).await;
        let client = aws_sdk_cloudwatchlogs::Client::new(&sdk_config);
        Self { client }
    }

    /// Create a `CloudWatchLogsService` with a pre-built client (for testing).
    pub fn with_client(client: aws_sdk_cloudwatchlogs::Client) -> Self {
        Self { client }
    }
}

impl LogGroupService for CloudWatchLogsService {
    #[instrument(skip(self), fields(service = "cloudwatch-logs"))]
    async fn describe_log_groups(
        &self,
        name_prefix: &str,
    ) -> Result<Vec<LogGroup>, LogServiceError> {
        let mut pages = self
            .client
            .describe_log_groups()
            .log_group_name_prefix(name_prefix)
            .into_paginator()
            .send();

        let mut groups = Vec::new();
        while let Some(page) = pages.next().await {
            let page = page.map_err(|e| {
                let err_str = DisplayErrorContext(&e).to_string();
                error!(error = %err_str, "DescribeLogGroups failed");
                LogServiceError::from(classify_sdk_error(&err_str))
            })?;
            groups.extend(page.log_groups().iter().filter_map(to_log_group));
        }

        debug!(count = groups.len(), "described log groups");
        Ok(groups)
    }

    #[instrument(skip(self), fields(service = "cloudwatch-logs"))]
    async fn put_retention_policy(
        &self,
        log_group_name: &str,
        retention_in_days: i32,
    ) -> Result<(), LogServiceError> {
        self.client
            .put_retention_policy()
            .log_group_name(log_group_name)
            .retention_in_days(retention_in_days)
            .send()
            .await
            .map_err(|e| {
                let err_str = DisplayErrorContext(&e).to_string();
                error!(error = %err_str, "PutRetentionPolicy failed");
                LogServiceError::from(classify_sdk_error(&err_str))
            })?;
        Ok(())
    }
}

/// Convert an SDK log group, dropping entries the service returned without a name.
fn to_log_group(group: &aws_sdk_cloudwatchlogs::types::LogGroup) -> Option<LogGroup> {
    let name = group.log_group_name()?;
    Some(LogGroup {
        name: name.to_owned(),
        retention_in_days: group.retention_in_days(),
    })
}

#[cfg(test)]
mod tests {
    use aws_sdk_cloudwatchlogs::types::LogGroup as SdkLogGroup;

    use super::*;

    #[test]
    fn converts_group_without_retention() {
        let sdk_group = SdkLogGroup::builder()
            .log_group_name("/app/service-a")
            .stored_bytes(0)
            .build();
        assert_eq!(
            to_log_group(&sdk_group),
            Some(LogGroup::never_expires("/app/service-a"))
        );
    }

    #[test]
    fn converts_group_with_retention() {
        let sdk_group = SdkLogGroup::builder()
            .log_group_name("/app/service-a")
            .retention_in_days(14)
            .build();
        assert_eq!(
            to_log_group(&sdk_group),
            Some(LogGroup::with_retention("/app/service-a", 14))
        );
    }

    #[test]
    fn skips_group_without_name() {
        let sdk_group = SdkLogGroup::builder().retention_in_days(30).build();
        assert_eq!(to_log_group(&sdk_group), None);
    }
}
