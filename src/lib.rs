mod config;
mod date;
mod error;
mod progress;
mod util;

mod ndjson;
mod loader;
mod json_utils;
mod sentiment;
mod extractor;
mod table;
mod cleaner;
mod export;
mod pipeline;

pub use crate::config::{BadLinePolicy, CoercionPolicy, PrepOptions};
pub use crate::error::{PrepError, PrepResult};
pub use crate::pipeline::{PrepReport, TweetPrep};

// Record Loader
pub use crate::loader::{read_json, read_json_with};

// Field Extractor and its sentiment seam
pub use crate::extractor::{TweetExtractor, COLUMNS};
pub use crate::sentiment::{LexiconScorer, Sentiment, SentimentScorer};

// Table Assembler
pub use crate::table::{Cell, Table};

// Cleaner
pub use crate::cleaner::{CleanReport, Cleaner, JUNK_CHECK_COLUMNS, NUMERIC_COLUMNS};

// Exporter
pub use crate::export::{read_csv, write_csv};

// helpers usable from binaries and tests
pub use crate::date::{parse_date, parse_timestamp, render_timestamp};
pub use crate::json_utils::{first_of, lookup, require, str_at};
pub use crate::util::init_tracing_once;
