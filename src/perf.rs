//! Dispatch timing instrumentation.
//!
//! Every input goes through a synchronous O(1) transition, so anything slow
//! on the dispatch path is worth knowing about. This module provides:
//!
//! - **Scoped timers**: RAII timing for code blocks, warning via `tracing`
//!   when a scope exceeds its threshold
//! - **Dispatch statistics**: per-input-kind timing aggregates (count,
//!   average, p95, max) recorded by the runtime worker
//! - **Conditional compilation**: `profile_scope!` is zero-cost unless the
//!   `profiling` feature is enabled
//!
//! ```ignore
//! use gesture_tree::profile_scope;
//!
//! fn dispatch() {
//!     profile_scope!("dispatch");
//!     // ... transition ...
//! }
//! ```

use std::collections::{HashMap, VecDeque};
use std::time::Instant;
use tracing::{debug, warn};

// ============================================================================
// Constants
// ============================================================================

/// Dispatch budget: one display frame at 60 FPS
pub const DISPATCH_BUDGET_MS: f64 = 16.67;

/// Number of samples to keep per input kind
const STATS_SAMPLE_COUNT: usize = 100;

// ============================================================================
// Profiling Macros (zero-cost when disabled)
// ============================================================================

/// Profile a scope with the given name. Zero-cost when profiling is disabled.
#[macro_export]
macro_rules! profile_scope {
    ($name:expr) => {
        #[cfg(feature = "profiling")]
        let _timer = $crate::perf::ScopedTimer::for_profiling($name);
        #[cfg(not(feature = "profiling"))]
        let _ = $name;
    };
    ($name:expr, $threshold_ms:expr) => {
        #[cfg(feature = "profiling")]
        let _timer = $crate::perf::ScopedTimer::new($name, $threshold_ms);
        #[cfg(not(feature = "profiling"))]
        let _ = ($name, $threshold_ms);
    };
}

pub use profile_scope;

// ============================================================================
// Scoped Timer
// ============================================================================

/// A scoped timer that warns on drop if it ran longer than its threshold.
pub struct ScopedTimer {
    name: &'static str,
    start: Instant,
    threshold_ms: f64,
}

impl ScopedTimer {
    pub fn new(name: &'static str, threshold_ms: f64) -> Self {
        Self {
            name,
            start: Instant::now(),
            threshold_ms,
        }
    }

    /// Timer with a 1ms threshold, used by `profile_scope!`.
    pub fn for_profiling(name: &'static str) -> Self {
        Self::new(name, 1.0)
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        let elapsed_ms = self.elapsed_ms();
        if elapsed_ms > self.threshold_ms {
            warn!(
                operation = self.name,
                elapsed_ms = format!("{:.2}", elapsed_ms),
                threshold_ms = format!("{:.2}", self.threshold_ms),
                "Slow operation"
            );
        }
    }
}

/// Measure execution time of a closure and return both the result and elapsed ms.
#[inline]
pub fn measure<T, F: FnOnce() -> T>(f: F) -> (T, f64) {
    let start = Instant::now();
    let result = f();
    (result, start.elapsed().as_secs_f64() * 1000.0)
}

// ============================================================================
// Dispatch Statistics
// ============================================================================

/// Timing statistics for one input kind.
#[derive(Debug, Clone)]
pub struct OperationStats {
    samples: VecDeque<f64>,
    count: u64,
    max_ms: f64,
    sum_ms: f64,
}

impl Default for OperationStats {
    fn default() -> Self {
        Self {
            samples: VecDeque::with_capacity(STATS_SAMPLE_COUNT),
            count: 0,
            max_ms: 0.0,
            sum_ms: 0.0,
        }
    }
}

impl OperationStats {
    pub fn record(&mut self, ms: f64) {
        if self.samples.len() >= STATS_SAMPLE_COUNT {
            if let Some(old) = self.samples.pop_front() {
                self.sum_ms -= old;
            }
        }
        self.samples.push_back(ms);
        self.sum_ms += ms;
        self.count += 1;
        self.max_ms = self.max_ms.max(ms);
    }

    /// Total number of recorded dispatches (not limited to the sample window).
    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn max(&self) -> f64 {
        self.max_ms
    }

    /// Average over the recent sample window.
    pub fn average(&self) -> f64 {
        if self.samples.is_empty() {
            0.0
        } else {
            self.sum_ms / self.samples.len() as f64
        }
    }

    pub fn p95(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        let mut sorted: Vec<f64> = self.samples.iter().copied().collect();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        let idx = ((sorted.len() as f64) * 0.95).floor() as usize;
        sorted.get(idx.min(sorted.len() - 1)).copied().unwrap_or(0.0)
    }
}

/// Per-input-kind dispatch timings.
#[derive(Debug, Default)]
pub struct DispatchStats {
    by_kind: HashMap<&'static str, OperationStats>,
}

impl DispatchStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, kind: &'static str, elapsed_ms: f64) {
        self.by_kind.entry(kind).or_default().record(elapsed_ms);
        if elapsed_ms > DISPATCH_BUDGET_MS {
            warn!(
                kind,
                elapsed_ms = format!("{:.2}", elapsed_ms),
                "Input dispatch exceeded frame budget"
            );
        }
    }

    pub fn get(&self, kind: &str) -> Option<&OperationStats> {
        self.by_kind.get(kind)
    }

    pub fn total_dispatched(&self) -> u64 {
        self.by_kind.values().map(OperationStats::count).sum()
    }

    /// Log per-kind statistics at debug level.
    pub fn log_summary(&self) {
        let mut kinds: Vec<_> = self.by_kind.iter().collect();
        kinds.sort_by_key(|(name, _)| *name);
        for (name, stats) in kinds {
            debug!(
                "{}: count={}, avg={:.3}ms, p95={:.3}ms, max={:.3}ms",
                name,
                stats.count(),
                stats.average(),
                stats.p95(),
                stats.max()
            );
        }
    }

    pub fn reset(&mut self) {
        self.by_kind.clear();
    }
}
