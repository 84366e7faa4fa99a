pub mod dispatch;

use anyhow::{Result, bail};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The outermost boundary. main.rs only knows this trait.
#[async_trait]
pub trait Engine: Send + Sync {
    /// Run one algorithm by name. `None` re-sorts the last explicit input.
    async fn sort_sequential(&self, algorithm: &str, input: Option<&[i64]>) -> Result<Vec<i64>>;

    /// Run every registered algorithm in parallel and wait for all of them.
    async fn sort_all_concurrently(&self, input: Option<&[i64]>) -> Result<SortReport>;
}

/// Outcome of a single sort task. A failure is recorded, never propagated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Sorted(Vec<i64>),
    Failed(String),
}

/// Result slot for one task of a concurrent run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SortResult {
    pub algorithm: String,
    pub outcome: Outcome,
    pub elapsed_us: u64,
}

/// Everything a concurrent run produced, one slot per task in dispatch order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SortReport {
    pub input_len: usize,
    pub results: Vec<SortResult>,
}

impl SortReport {
    /// Sorted output of `algorithm`, if it ran and succeeded.
    pub fn sorted(&self, algorithm: &str) -> Option<&[i64]> {
        self.results
            .iter()
            .find(|r| r.algorithm == algorithm)
            .and_then(|r| match &r.outcome {
                Outcome::Sorted(items) => Some(items.as_slice()),
                Outcome::Failed(_) => None,
            })
    }

    pub fn failures(&self) -> Vec<&SortResult> {
        self.results
            .iter()
            .filter(|r| matches!(r.outcome, Outcome::Failed(_)))
            .collect()
    }

    /// True when every task produced output.
    pub fn is_complete(&self) -> bool {
        self.failures().is_empty()
    }

    /// Algorithm name → sorted output. Fails if any task failed.
    pub fn into_sorted_map(self) -> Result<BTreeMap<String, Vec<i64>>> {
        let mut map = BTreeMap::new();
        for result in self.results {
            match result.outcome {
                Outcome::Sorted(items) => {
                    map.insert(result.algorithm, items);
                }
                Outcome::Failed(reason) => {
                    bail!("{} sort failed: {}", result.algorithm, reason)
                }
            }
        }
        Ok(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> SortReport {
        SortReport {
            input_len: 3,
            results: vec![
                SortResult {
                    algorithm: "merge".to_string(),
                    outcome: Outcome::Sorted(vec![1, 2, 3]),
                    elapsed_us: 4,
                },
                SortResult {
                    algorithm: "quick".to_string(),
                    outcome: Outcome::Failed("panicked: boom".to_string()),
                    elapsed_us: 0,
                },
            ],
        }
    }

    #[test]
    fn sorted_finds_successful_slot() {
        let report = report();
        assert_eq!(report.sorted("merge"), Some(&[1, 2, 3][..]));
        assert_eq!(report.sorted("quick"), None);
        assert_eq!(report.sorted("bubble"), None);
    }

    #[test]
    fn failures_and_completeness() {
        let report = report();
        assert_eq!(report.failures().len(), 1);
        assert!(!report.is_complete());
    }

    #[test]
    fn into_sorted_map_rejects_failures() {
        let err = report().into_sorted_map().unwrap_err();
        assert!(err.to_string().contains("quick sort failed"));
    }

    #[test]
    fn into_sorted_map_collects_all() {
        let mut report = report();
        report.results.pop();
        let map = report.into_sorted_map().unwrap();
        assert_eq!(map.get("merge"), Some(&vec![1, 2, 3]));
    }

    #[test]
    fn report_serializes() {
        let json = serde_json::to_value(report()).unwrap();
        assert_eq!(json["results"][0]["outcome"]["sorted"][2], 3);
        assert_eq!(json["results"][1]["outcome"]["failed"], "panicked: boom");
    }
}
