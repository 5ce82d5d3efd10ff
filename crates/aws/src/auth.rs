use tracing::{debug, info};

use crate::config::AwsBaseConfig;

const DEFAULT_SESSION_NAME: &str = "logkeeper";

/// Build an AWS SDK configuration from the given [`AwsBaseConfig`].
///
/// Uses the standard AWS SDK environment chain and optionally:
/// - Pins the region instead of reading `AWS_REGION`
/// - Overrides the endpoint URL for local development (e.g. `LocalStack`)
/// - Assumes an IAM role via STS if `role_arn` is configured, with automatic
///   credential refresh before expiry
///
/// # Examples
///
/// ```no_run
/// use logkeeper_aws::auth::build_sdk_config;
/// use logkeeper_aws::config::AwsBaseConfig;
///
/// # async fn example() {
/// let config = AwsBaseConfig::new("us-east-1")
///     .with_endpoint_url("http://localhost:4566");
/// let sdk_config = build_sdk_config(&config).await;
/// # }
/// ```
pub async fn build_sdk_config(config: &AwsBaseConfig) -> aws_config::SdkConfig {
    let loader = base_loader(config);

    if let Some(role_arn) = &config.role_arn {
        let session_name = config
            .session_name
            .as_deref()
            .unwrap_or(DEFAULT_SESSION_NAME);

        info!(role_arn = %role_arn, session_name = %session_name, "assuming IAM role via STS (auto-refresh)");

        // STS calls go through the base config so they inherit the endpoint
        // override and the function's own credentials.
        let base_config = loader.load().await;

        let mut provider_builder =
            aws_config::sts::AssumeRoleProvider::builder(role_arn).session_name(session_name);

        if let Some(region) = &config.region {
            provider_builder = provider_builder.region(aws_config::Region::new(region.clone()));
        }
        if let Some(ref external_id) = config.external_id {
            provider_builder = provider_builder.external_id(external_id);
        }

        let assume_role_provider = provider_builder.configure(&base_config).build().await;

        return base_loader(config)
            .credentials_provider(assume_role_provider)
            .load()
            .await;
    }

    loader.load().await
}

fn base_loader(config: &AwsBaseConfig) -> aws_config::ConfigLoader {
    let mut loader = aws_config::from_env();

    if let Some(region) = &config.region {
        loader = loader.region(aws_config::Region::new(region.clone()));
    }

    if let Some(endpoint) = &config.endpoint_url {
        debug!(endpoint = %endpoint, "using custom AWS endpoint");
        loader = loader.endpoint_url(endpoint);
    }

    loader
}
