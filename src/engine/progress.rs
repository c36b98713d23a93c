//! Progress bar utilities for displaying encoding status

use kdam::{Animation, Bar, BarExt};

/// Configuration for creating a progress bar
pub struct ProgressBarConfig {
    pub total: usize,
    pub desc: &'static str,
    pub unit: &'static str,
    pub animation: Animation,
}

impl ProgressBarConfig {
    /// Create a new progress bar configuration
    pub fn new(total: usize, desc: &'static str, unit: &'static str, animation: Animation) -> Self {
        Self {
            total,
            desc,
            unit,
            animation,
        }
    }
}

/// Create a progress bar with the given configuration
pub fn create_progress_bar(config: ProgressBarConfig) -> Bar {
    kdam::tqdm!(
        total = config.total,
        desc = config.desc,
        animation = config.animation,
        unit = config.unit
    )
}

/// Optional bar: present only in verbose runs so quiet runs and tests print nothing.
pub struct Progress {
    bar: Option<Bar>,
}

impl Progress {
    pub fn new(verbose: bool, total: usize, desc: &'static str, unit: &'static str) -> Self {
        let bar = (verbose && total > 0).then(|| {
            create_progress_bar(ProgressBarConfig::new(total, desc, unit, Animation::Classic))
        });
        Self { bar }
    }

    /// Advance by `n` items.
    pub fn update(&mut self, n: usize) {
        if let Some(bar) = self.bar.as_mut() {
            let _ = bar.update(n);
        }
    }

    /// Push the bar to completion and end the line.
    pub fn finish(&mut self) {
        if let Some(bar) = self.bar.as_mut() {
            let _ = bar.refresh();
            eprintln!();
        }
    }
}
