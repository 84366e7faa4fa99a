pub mod bubble;
pub mod insertion;
pub mod merge;
pub mod quick;
pub mod selection;
pub mod simple;

use anyhow::{Result, bail};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Something that turns a sequence into a sorted copy of it.
///
/// Implementations never touch the caller's slice. Algorithms that work in
/// place clone first, so callers don't need to know which ones mutate.
pub trait Sorter: Send + Sync {
    fn name(&self) -> &str;
    fn description(&self) -> &str;
    fn sort(&self, items: &[i64]) -> Vec<i64>;
}

/// Describes a sorter for listings.
#[derive(Debug, Clone, PartialEq)]
pub struct SorterDescription {
    pub name: String,
    pub description: String,
}

/// The built-in algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Algorithm {
    Quick,
    Bubble,
    Selection,
    Insertion,
    Simple,
    Merge,
}

impl Algorithm {
    pub const ALL: [Algorithm; 6] = [
        Algorithm::Quick,
        Algorithm::Bubble,
        Algorithm::Selection,
        Algorithm::Insertion,
        Algorithm::Simple,
        Algorithm::Merge,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Quick => "quick",
            Algorithm::Bubble => "bubble",
            Algorithm::Selection => "selection",
            Algorithm::Insertion => "insertion",
            Algorithm::Simple => "simple",
            Algorithm::Merge => "merge",
        }
    }

    /// Build the sorter for this algorithm. Only quicksort uses the depth limit.
    pub fn sorter(self, quick_depth_limit: usize) -> Arc<dyn Sorter> {
        match self {
            Algorithm::Quick => Arc::new(quick::QuickSorter::new(quick_depth_limit)),
            Algorithm::Bubble => Arc::new(bubble::BubbleSorter),
            Algorithm::Selection => Arc::new(selection::SelectionSorter),
            Algorithm::Insertion => Arc::new(insertion::InsertionSorter),
            Algorithm::Simple => Arc::new(simple::SimpleSorter),
            Algorithm::Merge => Arc::new(merge::MergeSorter),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "quick" => Ok(Algorithm::Quick),
            "bubble" => Ok(Algorithm::Bubble),
            "selection" | "select" => Ok(Algorithm::Selection),
            "insertion" | "insert" => Ok(Algorithm::Insertion),
            "simple" => Ok(Algorithm::Simple),
            "merge" => Ok(Algorithm::Merge),
            other => bail!("unknown algorithm: {}", other),
        }
    }
}

/// Holds all registered sorters. RwLock allows runtime registration + parallel reads.
pub struct SorterRegistry {
    sorters: RwLock<HashMap<String, Arc<dyn Sorter>>>,
}

impl Default for SorterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SorterRegistry {
    pub fn new() -> Self {
        Self {
            sorters: RwLock::new(HashMap::new()),
        }
    }

    /// A registry holding the six built-in algorithms.
    pub async fn with_builtin(quick_depth_limit: usize) -> Self {
        let registry = Self::new();
        for algorithm in Algorithm::ALL {
            registry.register(algorithm.sorter(quick_depth_limit)).await;
        }
        registry
    }

    pub async fn register(&self, sorter: Arc<dyn Sorter>) {
        let name = sorter.name().to_string();
        self.sorters.write().await.insert(name, sorter);
    }

    pub async fn unregister(&self, name: &str) {
        self.sorters.write().await.remove(name);
    }

    /// Look a sorter up by its registered name, falling back to the
    /// built-in aliases (`select`, `insert`, any casing).
    pub async fn get(&self, name: &str) -> Option<Arc<dyn Sorter>> {
        let sorters = self.sorters.read().await;
        if let Some(sorter) = sorters.get(name) {
            return Some(Arc::clone(sorter));
        }
        let canonical = name.parse::<Algorithm>().ok()?;
        sorters.get(canonical.name()).cloned()
    }

    /// Registered names, sorted.
    pub async fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.sorters.read().await.keys().cloned().collect();
        names.sort();
        names
    }

    /// Snapshot of every registered sorter, sorted by name.
    pub async fn all(&self) -> Vec<Arc<dyn Sorter>> {
        let mut sorters: Vec<Arc<dyn Sorter>> =
            self.sorters.read().await.values().cloned().collect();
        sorters.sort_by(|a, b| a.name().cmp(b.name()));
        sorters
    }

    pub async fn descriptions(&self) -> Vec<SorterDescription> {
        self.all()
            .await
            .iter()
            .map(|s| SorterDescription {
                name: s.name().to_string(),
                description: s.description().to_string(),
            })
            .collect()
    }

    pub async fn len(&self) -> usize {
        self.sorters.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sorters.read().await.is_empty()
    }
}
