//! `CloudWatch` Logs backend for logkeeper.
//!
//! [`CloudWatchLogsService`] implements
//! [`LogGroupService`](logkeeper_core::LogGroupService) on top of
//! `aws-sdk-cloudwatchlogs`. SDK configuration comes from
//! [`AwsBaseConfig`](config::AwsBaseConfig): region, endpoint override and
//! optional STS assume-role credentials.

pub mod auth;
pub mod config;
pub mod error;
pub mod logs;

// Re-exports for convenience.
pub use config::AwsBaseConfig;
pub use error::AwsLogsError;
pub use logs::CloudWatchLogsService;
