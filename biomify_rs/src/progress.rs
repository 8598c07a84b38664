//! Progress UI utilities (spinners, status messages)
//!
//! Status lines go to stderr so stdout stays clean for `--json` output.

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Spinner for long-running operations
pub struct Spinner {
    bar: ProgressBar,
}

impl Spinner {
    /// Create a new spinner with a message
    pub fn new(message: &str) -> Self {
        let bar = ProgressBar::new_spinner();
        if let Ok(spinner_style) = ProgressStyle::default_spinner()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
            .template("{spinner:.cyan} {msg}")
        {
            bar.set_style(spinner_style);
        }
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(80));
        Self { bar }
    }

    /// A spinner that draws nothing
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
        }
    }

    /// Just clear the spinner without message
    pub fn finish_clear(&self) {
        self.bar.finish_and_clear();
    }
}

/// Status printer that can be silenced as a whole (e.g. for `--json`).
#[derive(Clone, Copy, Debug)]
pub struct Progress {
    enabled: bool,
}

impl Progress {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn spinner(&self, message: &str) -> Spinner {
        if self.enabled {
            Spinner::new(message)
        } else {
            Spinner::hidden()
        }
    }

    /// Print a step header (cyan arrow)
    pub fn step(&self, message: &str) {
        if self.enabled {
            eprintln!("{} {}", style("→").cyan().bold(), message);
        }
    }

    /// Print a success message (green checkmark)
    pub fn success(&self, message: &str) {
        if self.enabled {
            eprintln!("{} {}", style("✓").green().bold(), message);
        }
    }

    /// Print an info message (blue)
    pub fn info(&self, message: &str) {
        if self.enabled {
            eprintln!("{} {}", style("ℹ").blue().bold(), message);
        }
    }

    /// Print a warning message (yellow)
    pub fn warning(&self, message: &str) {
        if self.enabled {
            eprintln!("{} {}", style("⚠").yellow().bold(), message);
        }
    }
}

/// Format a count with proper singular/plural
pub fn format_count(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}", count, plural)
    }
}
