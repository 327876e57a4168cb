//! Progress reporting: a byte-based bar used while reading the input file.

use indicatif::{ProgressBar, ProgressStyle};

pub fn make_progress_bar_labeled(total_bytes: u64, label: Option<&str>) -> ProgressBar {
    let pb = ProgressBar::new(total_bytes);
    // The template is a literal; fall back to the default style if it is ever rejected.
    if let Ok(style) = ProgressStyle::with_template(
        "{spinner:.green} {msg} {bytes:>10}/{total_bytes:<10} [{bar:.cyan/blue}] {percent:>3}%  \
         {bytes_per_sec}  elapsed: {elapsed_precise}  eta: {eta_precise}",
    ) {
        pb.set_style(style.progress_chars("█▉▊▋▌▍▎▏  "));
    }
    if let Some(msg) = label {
        pb.set_message(msg.to_string());
    }
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

/// A small wrapper around an `indicatif` bar that can be switched off entirely.
/// - `inc_bytes(delta)` increments progress
/// - `finish(msg)` finalizes the bar with a message
pub struct ProgressScope {
    pb: ProgressBar,
}

impl ProgressScope {
    pub fn bytes<T: Into<String>>(label: T, total_bytes: u64) -> Self {
        let pb = make_progress_bar_labeled(total_bytes, Some(&label.into()));
        Self { pb }
    }
    pub fn hidden() -> Self {
        Self { pb: ProgressBar::hidden() }
    }
    #[inline]
    pub fn inc_bytes(&self, delta: u64) {
        self.pb.inc(delta);
    }
    pub fn finish<T: Into<String>>(&self, msg: T) {
        self.pb.finish_with_message(msg.into());
    }
}
