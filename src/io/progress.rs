//! Asset load progress display

use crate::assets::catalog::{LoadObserver, LoadState};
use crate::io::configuration::PROGRESS_BAR_WIDTH;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;

static PROGRESS_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "Loading modules… [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} {{msg}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Progress bar shown while the variant catalog loads
///
/// Stands in for the loading screen: painting is impossible until the bar
/// finishes with a ready message.
pub struct LoadProgress {
    bar: ProgressBar,
}

impl Default for LoadProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl LoadProgress {
    /// Create a visible progress bar
    pub fn new() -> Self {
        let bar = ProgressBar::new(0);
        bar.set_style(PROGRESS_STYLE.clone());
        Self { bar }
    }

    /// Create a progress tracker that draws nothing
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
        }
    }

    /// Assets completed so far
    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    /// Assets requested
    pub fn length(&self) -> Option<u64> {
        self.bar.length()
    }

    /// Check whether the load reached a final state
    pub fn is_finished(&self) -> bool {
        self.bar.is_finished()
    }
}

impl LoadObserver for LoadProgress {
    fn update(&self, state: &LoadState) {
        match state {
            LoadState::Loading { loaded, total } => {
                self.bar.set_length(*total as u64);
                self.bar.set_position(*loaded as u64);
            }
            LoadState::Ready => {
                self.bar.finish_with_message("modules ready");
            }
            LoadState::Failed { failures } => {
                self.bar
                    .abandon_with_message(format!("{} modules failed to load", failures.len()));
            }
        }
    }
}
