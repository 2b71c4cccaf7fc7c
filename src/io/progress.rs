//! Terminal progress display for animation frame export

use crate::animation::clock::Phase;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;

static FRAME_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] {prefix:>8} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Tracks exported frames and the phase they were rendered in
pub struct FrameProgress {
    bar: ProgressBar,
}

impl FrameProgress {
    /// Create a progress bar for `total_frames`
    pub fn new(total_frames: u64) -> Self {
        let bar = ProgressBar::new(total_frames);
        bar.set_style(FRAME_STYLE.clone());
        Self { bar }
    }

    /// Create a bar that draws nothing, for quiet runs
    pub fn hidden(total_frames: u64) -> Self {
        let bar = ProgressBar::hidden();
        bar.set_length(total_frames);
        Self { bar }
    }

    /// Record one exported frame
    pub fn frame_written(&self, phase: Phase, progress: f64) {
        self.bar.set_prefix(phase.to_string());
        self.bar.set_message(format!("{:>5.1}%", progress * 100.0));
        self.bar.inc(1);
    }

    /// Frames recorded so far
    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    /// Finish and clear the display
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}
