use tracing::{debug, info, instrument};

use crate::config::RetentionConfig;
use crate::error::RetentionError;
use crate::event::TriggerEvent;
use crate::service::LogGroupService;

/// What an invocation did to the target log group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The log group had no retention policy and one was applied.
    Updated {
        log_group_name: String,
        retention_in_days: i32,
    },
    /// The log group already had a retention policy; nothing was changed.
    AlreadySet {
        log_group_name: String,
        retention_in_days: i32,
    },
    /// No listed log group passed the prefix filter and the exact-name match.
    NotFound { log_group_name: String },
}

/// Applies the configured retention to newly created log groups that
/// never expire.
///
/// Holds the log service client for the lifetime of the process so that
/// connections are reused across invocations.
pub struct RetentionEnforcer<S> {
    service: S,
}

impl<S: std::fmt::Debug> std::fmt::Debug for RetentionEnforcer<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RetentionEnforcer")
            .field("service", &self.service)
            .finish()
    }
}

impl<S: LogGroupService> RetentionEnforcer<S> {
    pub fn new(service: S) -> Self {
        Self { service }
    }

    /// The underlying log service.
    pub fn service(&self) -> &S {
        &self.service
    }

    /// Look up the event's log group and apply `config.retention_in_days`
    /// if it currently never expires.
    ///
    /// The lookup is prefix-based, so every candidate is checked against
    /// the configured prefix filter and then for an exact name match. The
    /// first candidate passing both decides the outcome. At most one
    /// mutating call is made.
    #[instrument(skip_all, fields(log_group = %event.log_group_name()))]
    pub async fn enforce(
        &self,
        event: &TriggerEvent,
        config: &RetentionConfig,
    ) -> Result<Outcome, RetentionError> {
        let target = event.log_group_name();

        let candidates = self.service.describe_log_groups(target).await?;
        debug!(candidates = candidates.len(), "listed log groups by prefix");

        let Some(group) = candidates
            .iter()
            .filter(|group| config.matches_prefix(&group.name))
            .find(|group| group.name == target)
        else {
            debug!(prefix = %config.log_group_prefix, "no matching log group");
            return Ok(Outcome::NotFound {
                log_group_name: target.to_owned(),
            });
        };

        if let Some(current) = group.retention_in_days {
            debug!(retention_in_days = current, "retention already set");
            return Ok(Outcome::AlreadySet {
                log_group_name: target.to_owned(),
                retention_in_days: current,
            });
        }

        self.service
            .put_retention_policy(target, config.retention_in_days)
            .await?;

        info!(
            "Updated retention policy to {} days for log group {}.",
            config.retention_in_days, target
        );

        Ok(Outcome::Updated {
            log_group_name: target.to_owned(),
            retention_in_days: config.retention_in_days,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use tracing::field::{Field, Visit};
    use tracing::{Event, Level, Subscriber};
    use tracing_subscriber::Layer;
    use tracing_subscriber::layer::{Context, SubscriberExt};

    use super::*;
    use crate::error::LogServiceError;
    use crate::service::LogGroup;

    /// Captures the message of every `info` event.
    #[derive(Clone, Default)]
    struct InfoMessages(Arc<Mutex<Vec<String>>>);

    struct MessageVisitor(String);

    impl Visit for MessageVisitor {
        fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
            if field.name() == "message" {
                self.0 = format!("{value:?}");
            }
        }
    }

    impl<S: Subscriber> Layer<S> for InfoMessages {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            if *event.metadata().level() != Level::INFO {
                return;
            }
            let mut visitor = MessageVisitor(String::new());
            event.record(&mut visitor);
            self.0.lock().unwrap().push(visitor.0);
        }
    }

    /// In-memory log service that records every call.
    #[derive(Default)]
    struct FakeLogService {
        groups: Mutex<Vec<LogGroup>>,
        describe_calls: Mutex<Vec<String>>,
        put_calls: Mutex<Vec<(String, i32)>>,
        fail_describe: Option<fn() -> LogServiceError>,
        fail_put: Option<fn() -> LogServiceError>,
    }

    impl FakeLogService {
        fn with_groups(groups: Vec<LogGroup>) -> Self {
            Self {
                groups: Mutex::new(groups),
                ..Self::default()
            }
        }

        fn failing_describe(fail_with: fn() -> LogServiceError) -> Self {
            Self {
                fail_describe: Some(fail_with),
                ..Self::default()
            }
        }

        fn failing_put(groups: Vec<LogGroup>, fail_with: fn() -> LogServiceError) -> Self {
            Self {
                groups: Mutex::new(groups),
                fail_put: Some(fail_with),
                ..Self::default()
            }
        }

        fn put_calls(&self) -> Vec<(String, i32)> {
            self.put_calls.lock().unwrap().clone()
        }
    }

    impl LogGroupService for FakeLogService {
        async fn describe_log_groups(
            &self,
            name_prefix: &str,
        ) -> Result<Vec<LogGroup>, LogServiceError> {
            self.describe_calls
                .lock()
                .unwrap()
                .push(name_prefix.to_owned());
            if let Some(fail_with) = self.fail_describe {
                return Err(fail_with());
            }
            Ok(self
                .groups
                .lock()
                .unwrap()
                .iter()
                .filter(|group| group.name.starts_with(name_prefix))
                .cloned()
                .collect())
        }

        async fn put_retention_policy(
            &self,
            log_group_name: &str,
            retention_in_days: i32,
        ) -> Result<(), LogServiceError> {
            self.put_calls
                .lock()
                .unwrap()
                .push((log_group_name.to_owned(), retention_in_days));
            if let Some(fail_with) = self.fail_put {
                return Err(fail_with());
            }
            for group in self.groups.lock().unwrap().iter_mut() {
                if group.name == log_group_name {
                    group.retention_in_days = Some(retention_in_days);
                }
            }
            Ok(())
        }
    }

    #[tokio::test]
    async fn applies_retention_to_group_that_never_expires() {
        let enforcer = RetentionEnforcer::new(FakeLogService::with_groups(vec![
            LogGroup::never_expires("/app/service-a"),
        ]));

        let outcome = enforcer
            .enforce(&TriggerEvent::new("/app/service-a"), &RetentionConfig::new(30))
            .await
            .unwrap();

        assert_eq!(
            outcome,
            Outcome::Updated {
                log_group_name: "/app/service-a".into(),
                retention_in_days: 30,
            }
        );
        assert_eq!(
            enforcer.service().put_calls(),
            vec![("/app/service-a".to_owned(), 30)]
        );
        assert_eq!(
            *enforcer.service().describe_calls.lock().unwrap(),
            vec!["/app/service-a".to_owned()]
        );
    }

    #[tokio::test]
    async fn leaves_existing_retention_alone() {
        let enforcer = RetentionEnforcer::new(FakeLogService::with_groups(vec![
            LogGroup::with_retention("/app/service-a", 14),
        ]));

        let outcome = enforcer
            .enforce(&TriggerEvent::new("/app/service-a"), &RetentionConfig::new(30))
            .await
            .unwrap();

        assert_eq!(
            outcome,
            Outcome::AlreadySet {
                log_group_name: "/app/service-a".into(),
                retention_in_days: 14,
            }
        );
        assert!(enforcer.service().put_calls().is_empty());
    }

    #[tokio::test]
    async fn only_exact_name_is_updated() {
        let enforcer = RetentionEnforcer::new(FakeLogService::with_groups(vec![
            LogGroup::never_expires("/app/service-a"),
            LogGroup::never_expires("/app/service-ab"),
        ]));

        enforcer
            .enforce(&TriggerEvent::new("/app/service-a"), &RetentionConfig::new(30))
            .await
            .unwrap();

        assert_eq!(
            enforcer.service().put_calls(),
            vec![("/app/service-a".to_owned(), 30)]
        );
        let groups = enforcer.service().groups.lock().unwrap().clone();
        assert_eq!(groups[1], LogGroup::never_expires("/app/service-ab"));
    }

    #[tokio::test]
    async fn exact_match_found_after_longer_names() {
        let enforcer = RetentionEnforcer::new(FakeLogService::with_groups(vec![
            LogGroup::never_expires("/app/service-a-canary"),
            LogGroup::never_expires("/app/service-a"),
        ]));

        let outcome = enforcer
            .enforce(&TriggerEvent::new("/app/service-a"), &RetentionConfig::new(7))
            .await
            .unwrap();

        assert!(matches!(outcome, Outcome::Updated { .. }));
        assert_eq!(
            enforcer.service().put_calls(),
            vec![("/app/service-a".to_owned(), 7)]
        );
    }

    #[tokio::test]
    async fn prefix_filter_excludes_exact_match() {
        let enforcer = RetentionEnforcer::new(FakeLogService::with_groups(vec![
            LogGroup::never_expires("/other/thing"),
        ]));
        let config = RetentionConfig::new(30).with_log_group_prefix("/app/");

        let outcome = enforcer
            .enforce(&TriggerEvent::new("/other/thing"), &config)
            .await
            .unwrap();

        assert_eq!(
            outcome,
            Outcome::NotFound {
                log_group_name: "/other/thing".into()
            }
        );
        assert!(enforcer.service().put_calls().is_empty());
    }

    #[tokio::test]
    async fn no_fuzzy_matching() {
        let enforcer = RetentionEnforcer::new(FakeLogService::with_groups(vec![
            LogGroup::never_expires("/app/service-b"),
            LogGroup::never_expires("/app/Service-a"),
        ]));

        let outcome = enforcer
            .enforce(&TriggerEvent::new("/app/service-a"), &RetentionConfig::new(30))
            .await
            .unwrap();

        assert!(matches!(outcome, Outcome::NotFound { .. }));
        assert!(enforcer.service().put_calls().is_empty());
    }

    #[tokio::test]
    async fn empty_listing_is_not_found() {
        let enforcer = RetentionEnforcer::new(FakeLogService::default());

        let outcome = enforcer
            .enforce(&TriggerEvent::new("/app/gone"), &RetentionConfig::new(30))
            .await
            .unwrap();

        assert!(matches!(outcome, Outcome::NotFound { .. }));
    }

    #[tokio::test]
    async fn second_invocation_is_a_no_op() {
        let enforcer = RetentionEnforcer::new(FakeLogService::with_groups(vec![
            LogGroup::never_expires("/app/service-a"),
        ]));
        let event = TriggerEvent::new("/app/service-a");
        let config = RetentionConfig::new(30);

        let first = enforcer.enforce(&event, &config).await.unwrap();
        let second = enforcer.enforce(&event, &config).await.unwrap();

        assert!(matches!(first, Outcome::Updated { .. }));
        assert_eq!(
            second,
            Outcome::AlreadySet {
                log_group_name: "/app/service-a".into(),
                retention_in_days: 30,
            }
        );
        assert_eq!(enforcer.service().put_calls().len(), 1);
    }

    #[tokio::test]
    async fn first_matching_duplicate_decides() {
        let enforcer = RetentionEnforcer::new(FakeLogService::with_groups(vec![
            LogGroup::with_retention("/app/dup", 5),
            LogGroup::never_expires("/app/dup"),
        ]));

        let outcome = enforcer
            .enforce(&TriggerEvent::new("/app/dup"), &RetentionConfig::new(30))
            .await
            .unwrap();

        assert!(matches!(
            outcome,
            Outcome::AlreadySet {
                retention_in_days: 5,
                ..
            }
        ));
        assert!(enforcer.service().put_calls().is_empty());
    }

    #[tokio::test]
    async fn service_errors_propagate_without_update() {
        let enforcer = RetentionEnforcer::new(FakeLogService::failing_describe(|| {
            LogServiceError::Rejected("AccessDeniedException".into())
        }));

        let err = enforcer
            .enforce(&TriggerEvent::new("/app/service-a"), &RetentionConfig::new(30))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            RetentionError::Service(LogServiceError::Rejected(_))
        ));
        assert!(enforcer.service().put_calls().is_empty());
    }

    #[tokio::test]
    async fn failed_update_propagates_without_confirmation() {
        let messages = InfoMessages::default();
        let _guard =
            tracing::subscriber::set_default(tracing_subscriber::registry().with(messages.clone()));
        let enforcer = RetentionEnforcer::new(FakeLogService::failing_put(
            vec![LogGroup::never_expires("/app/service-a")],
            || LogServiceError::Throttled,
        ));

        let err = enforcer
            .enforce(&TriggerEvent::new("/app/service-a"), &RetentionConfig::new(30))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            RetentionError::Service(LogServiceError::Throttled)
        ));
        assert_eq!(
            enforcer.service().put_calls(),
            vec![("/app/service-a".to_owned(), 30)]
        );
        assert!(messages.0.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn confirmation_logged_once_per_update() {
        let messages = InfoMessages::default();
        let _guard =
            tracing::subscriber::set_default(tracing_subscriber::registry().with(messages.clone()));
        let enforcer = RetentionEnforcer::new(FakeLogService::with_groups(vec![
            LogGroup::never_expires("/app/service-a"),
        ]));
        let event = TriggerEvent::new("/app/service-a");
        let config = RetentionConfig::new(30);

        enforcer.enforce(&event, &config).await.unwrap();
        enforcer.enforce(&event, &config).await.unwrap();

        assert_eq!(
            *messages.0.lock().unwrap(),
            vec!["Updated retention policy to 30 days for log group /app/service-a.".to_owned()]
        );
    }
}
