#![allow(dead_code)]

use serde_json::{json, Value};
use std::fs::{self, File};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

/// A fresh temp directory that lives for the rest of the test process.
pub fn temp_dir() -> PathBuf {
    tempfile::tempdir().unwrap().into_path()
}

/// Write one JSON value per line.
pub fn write_jsonl(path: &Path, values: &[Value]) {
    let lines: Vec<String> = values.iter().map(|v| v.to_string()).collect();
    write_lines(path, &lines);
}

/// Write raw lines (useful for malformed input).
pub fn write_lines(path: &Path, lines: &[String]) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    let mut f = File::create(path).unwrap();
    for l in lines {
        writeln!(&mut f, "{}", l).unwrap();
    }
}

/// Write a compressed `.zst` file containing the provided JSONL lines.
pub fn write_zst_lines(path: &Path, lines: &[String]) {
    let f = File::create(path).unwrap();
    let mut enc = zstd::stream::write::Encoder::new(f, 3).unwrap();
    for l in lines {
        writeln!(&mut enc, "{}", l).unwrap();
    }
    enc.finish().unwrap();
}

/// Read a text file line-by-line (skips empty lines).
pub fn read_lines(path: &Path) -> Vec<String> {
    let f = File::open(path).unwrap();
    let r = BufReader::new(f);
    r.lines().map(|l| l.unwrap()).filter(|s| !s.is_empty()).collect()
}

/// A complete tweet record, shaped like the Twitter v1.1 extended payload.
pub fn tweet(id: u64, created_at: &str, lang: &str, text: &str) -> Value {
    json!({
        "id": id,
        "created_at": created_at,
        "source": "<a href=\"http://twitter.com/download/android\">Twitter for Android</a>",
        "full_text": text,
        "lang": lang,
        "retweet_count": 3,
        "possibly_sensitive": false,
        "entities": {
            "hashtags": [{"text": "COVID19", "indices": [0, 8]}],
            "user_mentions": [{"screen_name": "who", "indices": [9, 13]}]
        },
        "place": {"full_name": "Nairobi, Kenya"},
        "user": {
            "screen_name": format!("user{}", id),
            "followers_count": 120,
            "friends_count": 80,
            "favourites_count": 42,
            "location": "Kenya"
        }
    })
}

/// Same as [`tweet`] but with the nested `user` object removed.
pub fn tweet_without_user(id: u64, created_at: &str, lang: &str, text: &str) -> Value {
    let mut t = tweet(id, created_at, lang, text);
    t.as_object_mut().unwrap().remove("user");
    t
}

pub const JUNE_2021: &str = "Wed Jun 30 12:34:56 +0000 2021";
pub const JAN_2021: &str = "Fri Jan 15 08:00:00 +0000 2021";
pub const MAY_2019: &str = "Wed May 01 10:00:00 +0000 2019";
