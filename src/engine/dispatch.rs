use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::{Mutex, broadcast};
use tokio::task::JoinError;
use tracing::{debug, info, warn};

use super::{Engine, Outcome, SortReport, SortResult};
use crate::consts::{DEFAULT_EVENT_CAPACITY, DEFAULT_QUICK_DEPTH_LIMIT};
use crate::events::{Event, EventBus};
use crate::sorters::{Sorter, SorterRegistry};

pub struct EngineConfig {
    pub quick_depth_limit: usize,
    pub event_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            quick_depth_limit: DEFAULT_QUICK_DEPTH_LIMIT,
            event_capacity: DEFAULT_EVENT_CAPACITY,
        }
    }
}

/// Fans a sequence out to every registered sorter and collects the results.
///
/// The engine keeps a copy of the last explicit input so callers can re-run
/// against it by passing `None`.
pub struct SortEngine {
    sorters: Arc<SorterRegistry>,
    events: EventBus,
    last_input: Mutex<Option<Vec<i64>>>,
}

impl SortEngine {
    /// Engine with the six built-in algorithms registered.
    pub async fn new(config: EngineConfig) -> Self {
        let sorters = Arc::new(SorterRegistry::with_builtin(config.quick_depth_limit).await);
        Self::with_registry(sorters, config)
    }

    pub fn with_registry(sorters: Arc<SorterRegistry>, config: EngineConfig) -> Self {
        Self {
            sorters,
            events: EventBus::new(config.event_capacity),
            last_input: Mutex::new(None),
        }
    }

    pub fn sorters(&self) -> &Arc<SorterRegistry> {
        &self.sorters
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.events.subscribe()
    }

    /// The cached copy of the last explicit input, if any.
    pub async fn last_input(&self) -> Option<Vec<i64>> {
        self.last_input.lock().await.clone()
    }

    /// Find a sorter by name or alias.
    pub async fn resolve(&self, algorithm: &str) -> Result<Arc<dyn Sorter>> {
        self.sorters
            .get(algorithm)
            .await
            .ok_or_else(|| anyhow!("unknown algorithm: {}", algorithm))
    }

    /// An explicit input replaces the cache; `None` falls back to it.
    async fn resolve_input(&self, input: Option<&[i64]>) -> Result<Vec<i64>> {
        let mut cached = self.last_input.lock().await;
        match input {
            Some(items) => {
                *cached = Some(items.to_vec());
                Ok(items.to_vec())
            }
            None => cached
                .clone()
                .ok_or_else(|| anyhow!("no input: pass a sequence or sort one first")),
        }
    }
}

#[async_trait]
impl Engine for SortEngine {
    async fn sort_sequential(&self, algorithm: &str, input: Option<&[i64]>) -> Result<Vec<i64>> {
        let sorter = self.resolve(algorithm).await?;
        let items = self.resolve_input(input).await?;
        let name = sorter.name().to_string();
        let len = items.len();

        let started = Instant::now();
        let sorted = tokio::task::spawn_blocking(move || sorter.sort(&items))
            .await
            .map_err(|e| anyhow!("{} sort failed: {}", name, failure_reason(e)))?;
        debug!(
            algorithm = %name,
            len,
            elapsed_us = started.elapsed().as_micros() as u64,
            "sequential sort finished"
        );
        Ok(sorted)
    }

    async fn sort_all_concurrently(&self, input: Option<&[i64]>) -> Result<SortReport> {
        let items = self.resolve_input(input).await?;
        let sorters = self.sorters.all().await;
        if sorters.is_empty() {
            anyhow::bail!("no sorters registered");
        }

        info!(tasks = sorters.len(), len = items.len(), "dispatching concurrent sort");

        // Every task owns its own copy; in-place sorters never share storage
        let (names, handles): (Vec<String>, Vec<_>) = sorters
            .into_iter()
            .map(|sorter| {
                let name = sorter.name().to_string();
                let copy = items.clone();
                let events = self.events.clone();
                let handle = tokio::task::spawn_blocking(move || run_task(sorter, copy, events));
                (name, handle)
            })
            .unzip();

        let joined = futures::future::join_all(handles).await;

        let results = names
            .into_iter()
            .zip(joined)
            .map(|(algorithm, joined)| match joined {
                Ok((sorted, elapsed_us)) => SortResult {
                    algorithm,
                    outcome: Outcome::Sorted(sorted),
                    elapsed_us,
                },
                Err(e) => {
                    let reason = failure_reason(e);
                    warn!(algorithm = %algorithm, %reason, "sort task failed");
                    SortResult {
                        algorithm,
                        outcome: Outcome::Failed(reason),
                        elapsed_us: 0,
                    }
                }
            })
            .collect();

        Ok(SortReport {
            input_len: items.len(),
            results,
        })
    }
}

/// Emits the task's terminal event on every exit path. If the sorter
/// unwinds before [`CompletionGuard::finish`], drop reports a failure.
struct CompletionGuard {
    algorithm: String,
    events: EventBus,
    finished: bool,
}

impl CompletionGuard {
    fn finish(mut self, sorted: Vec<i64>, elapsed_us: u64) {
        self.finished = true;
        self.events.emit(Event::Finished {
            algorithm: std::mem::take(&mut self.algorithm),
            sorted,
            elapsed_us,
        });
    }
}

impl Drop for CompletionGuard {
    fn drop(&mut self) {
        if !self.finished {
            self.events.emit(Event::Failed {
                algorithm: std::mem::take(&mut self.algorithm),
                reason: "task exited without a result".to_string(),
            });
        }
    }
}

fn run_task(sorter: Arc<dyn Sorter>, items: Vec<i64>, events: EventBus) -> (Vec<i64>, u64) {
    let algorithm = sorter.name().to_string();
    events.emit(Event::Started {
        algorithm: algorithm.clone(),
        len: items.len(),
    });
    let guard = CompletionGuard {
        algorithm: algorithm.clone(),
        events,
        finished: false,
    };

    let started = Instant::now();
    let sorted = sorter.sort(&items);
    let elapsed_us = started.elapsed().as_micros() as u64;
    debug!(algorithm = %algorithm, elapsed_us, "sort task finished");

    guard.finish(sorted.clone(), elapsed_us);
    (sorted, elapsed_us)
}

fn failure_reason(err: JoinError) -> String {
    if !err.is_panic() {
        return err.to_string();
    }
    let payload = err.into_panic();
    let message = payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string());
    format!("panicked: {}", message)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Panicky;

    impl Sorter for Panicky {
        fn name(&self) -> &str {
            "panicky"
        }

        fn description(&self) -> &str {
            "always panics"
        }

        fn sort(&self, _items: &[i64]) -> Vec<i64> {
            panic!("boom")
        }
    }

    #[tokio::test]
    async fn resolve_input_caches_explicit_input() {
        let engine = SortEngine::new(EngineConfig::default()).await;
        assert!(engine.last_input().await.is_none());

        engine.resolve_input(Some(&[3, 1])).await.unwrap();
        assert_eq!(engine.last_input().await, Some(vec![3, 1]));
        assert_eq!(engine.resolve_input(None).await.unwrap(), vec![3, 1]);
    }

    #[tokio::test]
    async fn resolve_input_without_cache_fails() {
        let engine = SortEngine::new(EngineConfig::default()).await;
        let err = engine.resolve_input(None).await.unwrap_err();
        assert!(err.to_string().contains("no input"));
    }

    #[tokio::test]
    async fn guard_reports_failure_when_dropped_unfinished() {
        let bus = EventBus::default();
        let mut rx = bus.subscribe();
        drop(CompletionGuard {
            algorithm: "quick".to_string(),
            events: bus.clone(),
            finished: false,
        });
        let event = rx.recv().await.unwrap();
        assert!(matches!(event, Event::Failed { ref algorithm, .. } if algorithm == "quick"));
    }

    #[tokio::test]
    async fn panic_is_recorded_not_propagated() {
        let registry = Arc::new(SorterRegistry::new());
        registry.register(Arc::new(Panicky)).await;
        let engine = SortEngine::with_registry(registry, EngineConfig::default());

        let report = engine.sort_all_concurrently(Some(&[2, 1])).await.unwrap();
        assert_eq!(report.results.len(), 1);
        assert!(matches!(
            &report.results[0].outcome,
            Outcome::Failed(reason) if reason == "panicked: boom"
        ));
    }

    #[tokio::test]
    async fn resolve_accepts_aliases_and_rejects_unknown() {
        let engine = SortEngine::new(EngineConfig::default()).await;
        assert_eq!(engine.resolve("select").await.unwrap().name(), "selection");
        let err = engine.resolve("bogo").await.err().unwrap();
        assert!(err.to_string().contains("unknown algorithm: bogo"));
    }

    #[tokio::test]
    async fn sequential_panic_becomes_an_error() {
        let registry = Arc::new(SorterRegistry::new());
        registry.register(Arc::new(Panicky)).await;
        let engine = SortEngine::with_registry(registry, EngineConfig::default());

        let err = engine.sort_sequential("panicky", Some(&[2, 1])).await.unwrap_err();
        assert_eq!(err.to_string(), "panicky sort failed: panicked: boom");
    }

    #[tokio::test]
    async fn empty_registry_is_an_error() {
        let engine =
            SortEngine::with_registry(Arc::new(SorterRegistry::new()), EngineConfig::default());
        let err = engine.sort_all_concurrently(Some(&[1])).await.unwrap_err();
        assert!(err.to_string().contains("no sorters registered"));
    }
}
