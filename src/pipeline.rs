use crate::cleaner::{CleanReport, Cleaner};
use crate::config::{BadLinePolicy, CoercionPolicy, PrepOptions};
use crate::export::write_csv;
use crate::extractor::TweetExtractor;
use crate::loader::read_json_with;
use crate::sentiment::{LexiconScorer, SentimentScorer};
use crate::table::Table;
use crate::util::init_tracing_once;
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use time::Date;

/// Outcome of a completed run.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PrepReport {
    pub records_loaded: usize,
    pub rows_assembled: usize,
    pub clean: CleanReport,
    pub rows_final: usize,
    pub output: Option<PathBuf>,
}

/// Load → extract → assemble → clean → (optionally) export, in one call chain.
#[derive(Clone)]
pub struct TweetPrep {
    pub(crate) opts: PrepOptions,
}

impl Default for TweetPrep {
    fn default() -> Self {
        Self::new()
    }
}

impl TweetPrep {
    pub fn new() -> Self {
        Self { opts: PrepOptions::default() }
    }

    pub fn from_options(opts: PrepOptions) -> Self {
        Self { opts }
    }

    pub fn options(&self) -> &PrepOptions {
        &self.opts
    }

    // -------- Builder methods --------
    pub fn input(mut self, path: impl AsRef<Path>) -> Self { self.opts = self.opts.with_input(path); self }
    pub fn output(mut self, path: impl AsRef<Path>) -> Self { self.opts = self.opts.with_output(path); self }
    pub fn save(mut self, yes: bool) -> Self { self.opts = self.opts.with_save(yes); self }
    pub fn cutoff(mut self, d: Date) -> Self { self.opts = self.opts.with_cutoff(d); self }
    pub fn language(mut self, code: impl AsRef<str>) -> Self { self.opts = self.opts.with_language(code); self }
    pub fn coercion_policy(mut self, p: CoercionPolicy) -> Self { self.opts = self.opts.with_coercion_policy(p); self }
    pub fn bad_line_policy(mut self, p: BadLinePolicy) -> Self { self.opts = self.opts.with_bad_line_policy(p); self }
    pub fn progress(mut self, yes: bool) -> Self { self.opts = self.opts.with_progress(yes); self }
    pub fn io_read_buffer(mut self, bytes: usize) -> Self { self.opts = self.opts.with_io_read_buffer(bytes); self }
    pub fn io_write_buffer(mut self, bytes: usize) -> Self { self.opts = self.opts.with_io_write_buffer(bytes); self }

    /// Run with the built-in lexicon scorer.
    pub fn run(&self) -> Result<PrepReport> {
        self.run_with_scorer(LexiconScorer::new())
    }

    pub fn run_with_scorer<S: SentimentScorer>(&self, scorer: S) -> Result<PrepReport> {
        self.run_to_table(scorer).map(|(report, _)| report)
    }

    /// Same as [`run_with_scorer`](Self::run_with_scorer) but hands back the cleaned table.
    pub fn run_to_table<S: SentimentScorer>(&self, scorer: S) -> Result<(PrepReport, Table)> {
        init_tracing_once();
        let o = &self.opts;

        let (records_loaded, records) = read_json_with(&o.input, o.bad_line_policy, o.read_buffer_bytes, o.progress)
            .with_context(|| format!("load stage: {}", o.input.display()))?;

        let columns = TweetExtractor::with_scorer(&records, scorer)
            .extract_columns()
            .context("extract stage")?;
        let mut table = Table::from_columns(records_loaded, columns).context("assemble stage")?;
        let rows_assembled = table.len();

        let clean = Cleaner::from_options(o).clean(&mut table).context("clean stage")?;

        let output = if o.save {
            write_csv(&table, &o.output, o.write_buffer_bytes)
                .with_context(|| format!("export stage: {}", o.output.display()))?;
            Some(o.output.clone())
        } else {
            None
        };

        tracing::info!("Pipeline finished: {} of {} rows kept", table.len(), rows_assembled);
        let report = PrepReport {
            records_loaded,
            rows_assembled,
            clean,
            rows_final: table.len(),
            output,
        };
        Ok((report, table))
    }
}
