//! Terminal progress display and the `log` bridge that writes around it

use std::io::Write;
use std::sync::LazyLock;

use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use log::{LevelFilter, Log, Metadata, Record};

static PROGRESS_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("{prefix:>8} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Progress bars for the stages of one generation run
///
/// Bars share one [`MultiProgress`], and the logger installed through
/// [`Self::install_logger`] suspends it while writing, so log lines never
/// tear a bar.
pub struct ProgressDisplay {
    multi_progress: MultiProgress,
    bar: Option<ProgressBar>,
}

impl Default for ProgressDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressDisplay {
    /// Display drawing to stderr
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            bar: None,
        }
    }

    /// Display that draws nothing
    pub fn hidden() -> Self {
        Self {
            multi_progress: MultiProgress::with_draw_target(ProgressDrawTarget::hidden()),
            bar: None,
        }
    }

    /// Replace the current bar with a new stage
    pub fn start_stage(&mut self, stage: &str, total: u64) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
        let bar = ProgressBar::new(total);
        bar.set_style(PROGRESS_STYLE.clone());
        bar.set_prefix(stage.to_string());
        self.bar = Some(self.multi_progress.add(bar));
    }

    /// Move the current bar to `position`
    pub fn set_position(&self, position: u64) {
        if let Some(bar) = &self.bar {
            bar.set_position(position);
        }
    }

    /// Show a short status next to the current bar
    pub fn set_message(&self, message: impl Into<String>) {
        if let Some(bar) = &self.bar {
            bar.set_message(message.into());
        }
    }

    /// Position of the current bar, zero without one
    pub fn position(&self) -> u64 {
        self.bar.as_ref().map_or(0, ProgressBar::position)
    }

    /// Finish the current stage, leaving its final state on screen
    pub fn finish_stage(&mut self, message: impl Into<String>) {
        if let Some(bar) = self.bar.take() {
            bar.finish_with_message(message.into());
        }
    }

    /// Clear every bar
    pub fn finish(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
        let _ = self.multi_progress.clear();
    }

    /// Route `log` records through this display
    ///
    /// Returns false if a global logger was already installed.
    pub fn install_logger(&self, level: LevelFilter) -> bool {
        let logger = ProgressLogger {
            multi_progress: self.multi_progress.clone(),
            level,
        };
        if log::set_boxed_logger(Box::new(logger)).is_err() {
            return false;
        }
        log::set_max_level(level);
        true
    }
}

/// `log` implementation that writes to stderr between progress redraws
struct ProgressLogger {
    multi_progress: MultiProgress,
    level: LevelFilter,
}

impl Log for ProgressLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level && metadata.target().starts_with(env!("CARGO_CRATE_NAME"))
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        self.multi_progress.suspend(|| {
            let mut stderr = std::io::stderr().lock();
            let _ = writeln!(stderr, "[{:>5}] {}", record.level(), record.args());
        });
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}
