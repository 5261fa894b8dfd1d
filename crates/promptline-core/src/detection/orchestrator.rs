//! Strategy selection for directory detection

use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};

use super::{DetectionOutcome, DetectionRequest, DetectionStrategy};

/// Ordered registry of detection strategies.
///
/// Strategies are tried in registration order. Unavailable ones are skipped;
/// the first outcome that carries a result wins. If none does, the last
/// non-result outcome is returned, or [`DetectionOutcome::Unavailable`] when
/// nothing could run.
#[derive(Default)]
pub struct DetectionOrchestrator {
    strategies: Vec<Arc<dyn DetectionStrategy>>,
}

impl DetectionOrchestrator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a strategy at the lowest priority
    pub fn register(&mut self, strategy: Arc<dyn DetectionStrategy>) {
        self.strategies.push(strategy);
    }

    /// Builder form of [`register`](Self::register)
    pub fn with_strategy(mut self, strategy: Arc<dyn DetectionStrategy>) -> Self {
        self.register(strategy);
        self
    }

    /// Names of registered strategies, in priority order
    pub fn strategy_names(&self) -> Vec<String> {
        self.strategies.iter().map(|s| s.name().to_string()).collect()
    }

    /// Whether at least one strategy can run here
    pub fn has_available_strategy(&self) -> bool {
        self.strategies.iter().any(|s| s.is_available())
    }

    /// Run detection. Never fails; all failure is in the outcome.
    pub async fn detect(&self, request: &DetectionRequest) -> DetectionOutcome {
        let mut last = DetectionOutcome::Unavailable;

        for strategy in &self.strategies {
            if !strategy.is_available() {
                debug!("Detection strategy '{}' unavailable", strategy.name());
                continue;
            }

            let started = Instant::now();
            let outcome = strategy.detect(request).await;
            debug!(
                "Detection strategy '{}' finished: {} in {:?}",
                strategy.name(),
                outcome.label(),
                started.elapsed()
            );

            if outcome.directory_info().is_some() {
                return outcome;
            }
            if let DetectionOutcome::Failed(message) = &outcome {
                warn!("Detection strategy '{}' failed: {}", strategy.name(), message);
            }
            last = outcome;
        }

        last
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::DirectoryInfo;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    struct FixedStrategy {
        name: &'static str,
        available: bool,
        outcome: DetectionOutcome,
        calls: AtomicUsize,
    }

    impl FixedStrategy {
        fn new(name: &'static str, available: bool, outcome: DetectionOutcome) -> Arc<Self> {
            Arc::new(Self {
                name,
                available,
                outcome,
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl DetectionStrategy for FixedStrategy {
        fn name(&self) -> &str {
            self.name
        }

        fn is_available(&self) -> bool {
            self.available
        }

        async fn detect(&self, _request: &DetectionRequest) -> DetectionOutcome {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.outcome.clone()
        }
    }

    fn request() -> DetectionRequest {
        DetectionRequest::new(Duration::from_millis(500))
    }

    fn detected(directory: &str) -> DetectionOutcome {
        DetectionOutcome::Detected(DirectoryInfo::detected(directory, None, None))
    }

    #[tokio::test]
    async fn test_empty_registry_is_unavailable() {
        let orchestrator = DetectionOrchestrator::new();
        assert_eq!(orchestrator.detect(&request()).await, DetectionOutcome::Unavailable);
        assert!(!orchestrator.has_available_strategy());
    }

    #[tokio::test]
    async fn test_unavailable_strategy_is_skipped() {
        let skipped = FixedStrategy::new("skipped", false, detected("/a"));
        let used = FixedStrategy::new("used", true, detected("/b"));
        let orchestrator = DetectionOrchestrator::new()
            .with_strategy(skipped.clone())
            .with_strategy(used.clone());

        let info = orchestrator
            .detect(&request())
            .await
            .into_directory_info()
            .unwrap();
        assert_eq!(info.directory.as_deref(), Some("/b"));
        assert_eq!(skipped.calls(), 0);
        assert_eq!(used.calls(), 1);
        assert_eq!(orchestrator.strategy_names(), vec!["skipped", "used"]);
    }

    #[tokio::test]
    async fn test_first_result_wins() {
        let first = FixedStrategy::new("first", true, detected("/a"));
        let second = FixedStrategy::new("second", true, detected("/b"));
        let orchestrator = DetectionOrchestrator::new()
            .with_strategy(first)
            .with_strategy(second.clone());

        let info = orchestrator
            .detect(&request())
            .await
            .into_directory_info()
            .unwrap();
        assert_eq!(info.directory.as_deref(), Some("/a"));
        assert_eq!(second.calls(), 0);
    }

    #[tokio::test]
    async fn test_falls_through_to_next_on_failure() {
        let failing = FixedStrategy::new("failing", true, DetectionOutcome::Failed("boom".into()));
        let backup = FixedStrategy::new("backup", true, detected("/b"));
        let orchestrator = DetectionOrchestrator::new()
            .with_strategy(failing)
            .with_strategy(backup);

        assert!(orchestrator.detect(&request()).await.directory_info().is_some());
    }

    #[tokio::test]
    async fn test_last_failure_is_returned() {
        let orchestrator = DetectionOrchestrator::new()
            .with_strategy(FixedStrategy::new("a", true, DetectionOutcome::NoDirectory))
            .with_strategy(FixedStrategy::new("b", true, DetectionOutcome::TimedOut));

        assert_eq!(orchestrator.detect(&request()).await, DetectionOutcome::TimedOut);
    }
}
