//! Project-wide constants.

pub const AUTHOR: &str = env!("CARGO_PKG_AUTHORS");
pub const HOMEPAGE: &str = env!("CARGO_PKG_HOMEPAGE");
pub const REPO: &str = env!("CARGO_PKG_REPOSITORY");

/// Input used when the CLI is given no values.
pub const DEMO_INPUT: &[i64] = &[0, 43, 3, 2, 3, 4];

/// Quicksort recursion depth before switching to the explicit stack.
pub const DEFAULT_QUICK_DEPTH_LIMIT: usize = 64;

/// Upper bound on the quicksort depth limit. Larger values are clamped so
/// adversarial input cannot recurse deep enough to overflow a blocking
/// thread's stack.
pub const MAX_QUICK_DEPTH_LIMIT: usize = 1024;

/// Capacity of the completion event channel.
pub const DEFAULT_EVENT_CAPACITY: usize = 64;

/// Environment variable holding a `tracing` filter directive.
pub const LOG_ENV: &str = "SORTKIT_LOG";

/// Format a number with comma separators (e.g. 1,234,567).
pub fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    for (i, c) in s.chars().enumerate() {
        if i > 0 && (s.len() - i).is_multiple_of(3) {
            result.push(',');
        }
        result.push(c);
    }
    result
}
