use std::path::{Path, PathBuf};
use time::macros::date;
use time::Date;

/// What the loader does with a line that is not valid JSON.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum BadLinePolicy {
    /// Fail the run, naming the line.
    #[default]
    Abort,
    /// Log the line number and keep going.
    Skip,
}

/// What type coercion does with a value that cannot be parsed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum CoercionPolicy {
    /// Remove the whole row and log it.
    #[default]
    DropRow,
    /// Replace the offending cell with the missing sentinel.
    NullCell,
    /// Fail with a type coercion error.
    Reject,
}

/// User-facing options with sensible defaults and builder chaining.
#[derive(Clone, Debug)]
pub struct PrepOptions {
    pub input: PathBuf,
    pub output: PathBuf,
    pub save: bool, // write the cleaned table to `output`
    pub cutoff: Date, // inclusive lower bound on created_at (UTC)
    pub language: String, // keep rows whose lang equals this code
    pub coercion_policy: CoercionPolicy,
    pub bad_line_policy: BadLinePolicy,
    pub progress: bool, // show progress bar while loading

    // IO tuning
    pub read_buffer_bytes: usize, // BufReader capacity
    pub write_buffer_bytes: usize, // BufWriter capacity
}

impl Default for PrepOptions {
    fn default() -> Self {
        Self {
            input: PathBuf::from("covid19.json"),
            output: PathBuf::from("processed_tweet_data.csv"),
            save: false,
            cutoff: date!(2020 - 12 - 31),
            language: "en".to_string(),
            coercion_policy: CoercionPolicy::default(),
            bad_line_policy: BadLinePolicy::default(),
            progress: false,
            read_buffer_bytes: 256 * 1024,
            write_buffer_bytes: 256 * 1024,
        }
    }
}

impl PrepOptions {
    pub fn with_input(mut self, path: impl AsRef<Path>) -> Self {
        self.input = path.as_ref().to_path_buf();
        self
    }
    pub fn with_output(mut self, path: impl AsRef<Path>) -> Self {
        self.output = path.as_ref().to_path_buf();
        self
    }
    pub fn with_save(mut self, yes: bool) -> Self {
        self.save = yes;
        self
    }
    pub fn with_cutoff(mut self, cutoff: Date) -> Self {
        self.cutoff = cutoff;
        self
    }
    pub fn with_language(mut self, code: impl AsRef<str>) -> Self {
        self.language = code.as_ref().trim().to_string();
        self
    }
    pub fn with_coercion_policy(mut self, policy: CoercionPolicy) -> Self {
        self.coercion_policy = policy;
        self
    }
    pub fn with_bad_line_policy(mut self, policy: BadLinePolicy) -> Self {
        self.bad_line_policy = policy;
        self
    }
    pub fn with_progress(mut self, yes: bool) -> Self {
        self.progress = yes;
        self
    }

    // IO buffers tuning
    pub fn with_io_read_buffer(mut self, bytes: usize) -> Self {
        self.read_buffer_bytes = bytes.max(8 * 1024);
        self
    }
    pub fn with_io_write_buffer(mut self, bytes: usize) -> Self {
        self.write_buffer_bytes = bytes.max(8 * 1024);
        self
    }
}
