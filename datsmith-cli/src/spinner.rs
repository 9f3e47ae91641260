//! Spinner shown while catalogs are being read.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

pub(crate) struct LoadSpinner {
    bar: ProgressBar,
}

impl LoadSpinner {
    /// When `quiet` is true the spinner is hidden.
    pub(crate) fn new(quiet: bool) -> Self {
        let bar = ProgressBar::new_spinner();
        if quiet {
            bar.set_draw_target(ProgressDrawTarget::hidden());
        }
        bar.set_style(
            ProgressStyle::with_template("  {spinner:.cyan} {msg}")
                .expect("static pattern")
                .tick_chars("/-\\|"),
        );
        bar.enable_steady_tick(Duration::from_millis(100));
        Self { bar }
    }

    pub(crate) fn set_message(&self, msg: String) {
        self.bar.set_message(msg);
    }

    pub(crate) fn finish(self) {
        self.bar.disable_steady_tick();
        self.bar.finish_and_clear();
    }
}
