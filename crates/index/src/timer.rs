use std::collections::VecDeque;
use std::time::{Duration, Instant};

use sectorspace_common::Spatial;

use crate::error::IndexError;
use crate::tree::SectorTree;

/// One maintenance pass: how long it took and how many entities it moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdatePass {
    pub elapsed: Duration,
    pub relocated: usize,
}

/// Sliding window over recent [`SectorTree::update`] passes.
///
/// Callers that run maintenance on a fixed cadence drive it through
/// [`run`](Self::run) to see both the cost of each pass and the churn that
/// caused it. Lifetime totals survive the window.
#[derive(Debug, Clone)]
pub struct UpdateTimer {
    window: VecDeque<UpdatePass>,
    limit: usize,
    total_passes: u64,
    total_relocated: u64,
}

impl UpdateTimer {
    /// Keep the last `limit` passes (at least one).
    pub fn new(limit: usize) -> Self {
        let limit = limit.max(1);
        Self {
            window: VecDeque::with_capacity(limit),
            limit,
            total_passes: 0,
            total_relocated: 0,
        }
    }

    /// Run one `update()` on `tree` and record it. A failed pass is not
    /// recorded.
    pub fn run<T: Spatial>(&mut self, tree: &mut SectorTree<T>) -> Result<usize, IndexError> {
        let start = Instant::now();
        let relocated = tree.update()?;
        self.record(UpdatePass {
            elapsed: start.elapsed(),
            relocated,
        });
        Ok(relocated)
    }

    pub fn record(&mut self, pass: UpdatePass) {
        if self.window.len() == self.limit {
            self.window.pop_front();
        }
        self.window.push_back(pass);
        self.total_passes += 1;
        self.total_relocated += pass.relocated as u64;
    }

    /// Passes in the window, oldest first.
    pub fn passes(&self) -> impl Iterator<Item = &UpdatePass> + '_ {
        self.window.iter()
    }

    /// Number of passes in the window.
    pub fn count(&self) -> usize {
        self.window.len()
    }

    pub fn total_passes(&self) -> u64 {
        self.total_passes
    }

    pub fn total_relocated(&self) -> u64 {
        self.total_relocated
    }

    /// Mean pass duration over the window; zero when empty.
    pub fn average(&self) -> Duration {
        match self.window.len() {
            0 => Duration::ZERO,
            n => self.window.iter().map(|p| p.elapsed).sum::<Duration>() / n as u32,
        }
    }

    pub fn min(&self) -> Duration {
        self.window.iter().map(|p| p.elapsed).min().unwrap_or(Duration::ZERO)
    }

    pub fn max(&self) -> Duration {
        self.window.iter().map(|p| p.elapsed).max().unwrap_or(Duration::ZERO)
    }

    /// Mean relocations per pass over the window.
    pub fn relocation_rate(&self) -> f64 {
        match self.window.len() {
            0 => 0.0,
            n => self.window.iter().map(|p| p.relocated).sum::<usize>() as f64 / n as f64,
        }
    }

    /// The slowest pass in the window.
    pub fn slowest(&self) -> Option<UpdatePass> {
        self.window.iter().copied().max_by_key(|p| p.elapsed)
    }
}

impl std::fmt::Display for UpdateTimer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Updates: passes={} relocated={} avg={:?} min={:?} max={:?} rate={:.1}/pass",
            self.total_passes,
            self.total_relocated,
            self.average(),
            self.min(),
            self.max(),
            self.relocation_rate()
        )
    }
}
