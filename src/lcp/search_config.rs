use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use serde::{Deserialize, Serialize};

/// Bounds of the equilibrium search. Zero means unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Maximum number of equilibria to report.
    pub stop_after: usize,
    /// Maximum depth of the pivot paths explored from the starting solution.
    pub max_depth: usize,
}

impl SearchConfig {
    pub fn new(stop_after: usize, max_depth: usize) -> Self {
        Self {
            stop_after,
            max_depth,
        }
    }

    pub fn count_reached(&self, found: usize) -> bool {
        self.stop_after != 0 && found >= self.stop_after
    }

    pub fn depth_exceeded(&self, depth: usize) -> bool {
        self.max_depth != 0 && depth > self.max_depth
    }
}

/// Shared flag that stops a running search at its next step.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}
