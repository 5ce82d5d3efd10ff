//! Core types for enforcing a retention policy on newly created log groups.
//!
//! The [`RetentionEnforcer`] is generic over a [`LogGroupService`], so the
//! decision logic runs the same against `CloudWatch` Logs and against the
//! in-memory fakes used in tests.

pub mod config;
pub mod enforcer;
pub mod error;
pub mod event;
pub mod service;

pub use config::RetentionConfig;
pub use enforcer::{Outcome, RetentionEnforcer};
pub use error::{LogServiceError, RetentionError};
pub use event::TriggerEvent;
pub use service::{LogGroup, LogGroupService};
