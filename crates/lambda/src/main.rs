use lambda_runtime::{Error, run, service_fn};
use tracing::info;

use logkeeper_aws::{AwsBaseConfig, CloudWatchLogsService};
use logkeeper_core::RetentionEnforcer;
use logkeeper_lambda::{function_handler, telemetry};

#[tokio::main]
async fn main() -> Result<(), Error> {
    telemetry::init();

    // The client lives for the whole execution environment and is shared by
    // every invocation it serves.
    let aws_config = AwsBaseConfig::from_env()?;
    info!(config = ?aws_config, "building CloudWatch Logs client");
    let enforcer = RetentionEnforcer::new(CloudWatchLogsService::new(&aws_config).await);

    run(service_fn(|event| function_handler(&enforcer, event))).await
}
