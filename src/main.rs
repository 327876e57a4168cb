//! tweetprep: flatten a line-delimited tweet export into a cleaned table.
//!
//! Usage:
//!   # Report row counts only
//!   tweetprep covid19.json
//!
//!   # Write the cleaned table
//!   tweetprep covid19.json --save -o processed_tweet_data.csv
//!
//!   # Compressed input, keep French tweets from 2021 on, tolerate bad lines
//!   tweetprep tweets.jsonl.zst --lang fr --cutoff 2021-01-01 --skip-bad-lines

use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tweetprep::{parse_date, BadLinePolicy, CoercionPolicy, TweetPrep};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OnBadValue {
    Drop,
    Null,
    Reject,
}

impl From<OnBadValue> for CoercionPolicy {
    fn from(v: OnBadValue) -> Self {
        match v {
            OnBadValue::Drop => CoercionPolicy::DropRow,
            OnBadValue::Null => CoercionPolicy::NullCell,
            OnBadValue::Reject => CoercionPolicy::Reject,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "tweetprep")]
#[command(about = "Flatten, score and clean line-delimited tweet exports", long_about = None)]
struct Args {
    /// Line-delimited JSON input (`.zst` is decompressed)
    #[arg(value_name = "FILE", default_value = "covid19.json")]
    input: PathBuf,

    /// Output CSV path, used with --save
    #[arg(long, short = 'o', default_value = "processed_tweet_data.csv")]
    output: PathBuf,

    /// Write the cleaned table to --output
    #[arg(long)]
    save: bool,

    /// Keep tweets created on or after this date (YYYY-MM-DD, UTC)
    #[arg(long, default_value = "2020-12-31", value_parser = parse_date)]
    cutoff: time::Date,

    /// Keep tweets whose `lang` equals this code
    #[arg(long, default_value = "en")]
    lang: String,

    /// What to do with a value that cannot be coerced to its column type
    #[arg(long, value_enum, default_value_t = OnBadValue::Drop)]
    on_bad_value: OnBadValue,

    /// Skip malformed input lines instead of aborting
    #[arg(long)]
    skip_bad_lines: bool,

    /// Show a progress bar while loading
    #[arg(long)]
    progress: bool,

    /// Print the run report as JSON instead of text
    #[arg(long)]
    json_report: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    tweetprep::init_tracing_once();

    let report = TweetPrep::new()
        .input(&args.input)
        .output(&args.output)
        .save(args.save)
        .cutoff(args.cutoff)
        .language(&args.lang)
        .coercion_policy(args.on_bad_value.into())
        .bad_line_policy(if args.skip_bad_lines { BadLinePolicy::Skip } else { BadLinePolicy::Abort })
        .progress(args.progress)
        .run()?;

    if args.json_report {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let c = &report.clean;
    println!("Loaded {} records", report.records_loaded);
    println!(
        "Removed: {} junk, {} duplicate, {} unparseable, {} before cutoff, {} other language",
        c.junk_removed, c.duplicates_removed, c.coercion_dropped, c.date_removed, c.language_removed
    );
    if c.coercion_nulled > 0 {
        println!("Nulled {} unparseable cells", c.coercion_nulled);
    }
    println!("Final rows: {}", report.rows_final);
    if let Some(path) = &report.output {
        println!("Saved to {}", path.display());
    }
    Ok(())
}
