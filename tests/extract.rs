#[path = "common/mod.rs"]
mod common;

use common::*;
use serde_json::{json, Value};
use std::cell::RefCell;
use tweetprep::{
    require, Cell, LexiconScorer, PrepError, Sentiment, SentimentScorer, Table, TweetExtractor,
    COLUMNS,
};

/// Every column produced by the extractor has one value per record, including
/// for records that are missing most of their keys.
#[test]
fn all_columns_have_record_count_length() {
    let records = vec![
        tweet(1, JUNE_2021, "en", "good news"),
        tweet_without_user(2, JUNE_2021, "en", "bad news"),
        json!({}),
        json!({"full_text": null, "user": {}}),
    ];

    let cols = TweetExtractor::new(&records).extract_columns().unwrap();
    assert_eq!(cols.len(), COLUMNS.len());
    for ((name, values), expected) in cols.iter().zip(COLUMNS) {
        assert_eq!(name, expected, "columns come out in header order");
        assert_eq!(values.len(), records.len(), "column {} has wrong length", name);
    }
}

/// A record without a nested `user` object yields sentinels for every user-derived column.
#[test]
fn missing_user_yields_sentinels() {
    let records = vec![tweet_without_user(7, JUNE_2021, "en", "hello")];
    let table = TweetExtractor::new(&records).get_tweet_table().unwrap();

    for col in ["original_author", "followers_count", "friends_count", "favorite_count"] {
        assert_eq!(table.cell(0, col), Some(&Cell::Missing), "{} should be missing", col);
    }
    // Top-level fields are unaffected.
    assert_eq!(table.cell(0, "lang"), Some(&Cell::Text("en".into())));
    assert_eq!(table.cell(0, "retweet_count"), Some(&Cell::Number(3.0)));
    // Place still resolves from the tweet itself.
    assert_eq!(table.cell(0, "place"), Some(&Cell::Text("Nairobi, Kenya".into())));
}

#[test]
fn nested_user_fields_are_extracted() {
    let records = vec![tweet(5, JUNE_2021, "en", "hello")];
    let ex = TweetExtractor::new(&records);

    assert_eq!(ex.find_screen_name(), vec![Cell::Text("user5".into())]);
    assert_eq!(ex.find_followers_count(), vec![Cell::Number(120.0)]);
    assert_eq!(ex.find_friends_count(), vec![Cell::Number(80.0)]);
    assert_eq!(ex.find_favourite_count(), vec![Cell::Number(42.0)]);
    assert_eq!(ex.is_sensitive(), vec![Cell::Bool(false)]);
}

/// Lists are passed through unmodified; absent lists become empty lists.
#[test]
fn list_fields_pass_through_or_default_empty() {
    let legacy = json!({"user": {"hashtags": ["a", "b"], "mentions": ["c"]}});
    let records = vec![tweet(1, JUNE_2021, "en", "x"), legacy, json!({"entities": {"hashtags": "oops"}})];
    let ex = TweetExtractor::new(&records);

    let tags = ex.find_hashtags();
    assert_eq!(tags[0], Cell::Json(json!([{"text": "COVID19", "indices": [0, 8]}])));
    assert_eq!(tags[1], Cell::Json(json!(["a", "b"])));
    assert_eq!(tags[2], Cell::Json(Value::Array(vec![])), "non-list value falls back to empty list");

    let mentions = ex.find_mentions();
    assert_eq!(mentions[1], Cell::Json(json!(["c"])));
    assert_eq!(mentions[2], Cell::Json(Value::Array(vec![])));
}

#[test]
fn text_and_place_fallbacks() {
    let records = vec![
        json!({"text": "short form", "place": "Lagos"}),
        json!({"full_text": "long form", "text": "ignored", "user": {"location": "Accra"}}),
        json!({}),
    ];
    let ex = TweetExtractor::new(&records);

    assert_eq!(
        ex.find_full_text(),
        vec![Cell::Text("short form".into()), Cell::Text("long form".into()), Cell::Missing]
    );
    assert_eq!(
        ex.find_location(),
        vec![Cell::Text("Lagos".into()), Cell::Text("Accra".into()), Cell::Missing]
    );
}

/// The scorer is called once per record with text; empty or absent text
/// scores neutral without reaching the scorer.
#[test]
fn scorer_called_once_per_text_and_neutral_on_empty() {
    let seen = RefCell::new(Vec::<String>::new());
    let scorer = |t: &str| {
        seen.borrow_mut().push(t.to_string());
        Sentiment { polarity: 0.5, subjectivity: 0.25 }
    };

    let records = vec![
        tweet(1, JUNE_2021, "en", "first"),
        tweet(2, JUNE_2021, "en", ""),
        json!({"lang": "en"}),
        tweet(3, JUNE_2021, "en", "second"),
    ];
    let table = TweetExtractor::with_scorer(&records, scorer).get_tweet_table().unwrap();

    assert_eq!(*seen.borrow(), vec!["first".to_string(), "second".to_string()]);
    let polarity: Vec<Cell> = table.column("polarity").unwrap().into_iter().cloned().collect();
    assert_eq!(
        polarity,
        vec![Cell::Number(0.5), Cell::Number(0.0), Cell::Number(0.0), Cell::Number(0.5)]
    );
    assert_eq!(table.cell(0, "subjectivity"), Some(&Cell::Number(0.25)));
}

#[test]
fn lexicon_scorer_basics() {
    let s = LexiconScorer::new();

    assert_eq!(s.score(""), Sentiment::NEUTRAL);
    assert_eq!(s.score("   "), Sentiment::NEUTRAL);
    assert_eq!(s.score("https://t.co/abc @someone"), Sentiment::NEUTRAL);
    assert_eq!(s.score("the vaccine arrived on tuesday"), Sentiment::NEUTRAL);

    let good = s.score("What a good day");
    assert!(good.polarity > 0.0);
    assert!(good.subjectivity > 0.0 && good.subjectivity <= 1.0);

    let very_good = s.score("What a very good day");
    assert!(very_good.polarity > good.polarity, "intensifier strengthens polarity");

    let not_good = s.score("This is not good");
    assert!(not_good.polarity < 0.0, "negation flips polarity");

    let bad = s.score("Terrible and awful news");
    assert!(bad.polarity <= -0.9);
    assert!(bad.polarity >= -1.0);
}

#[test]
fn assembler_rejects_ragged_columns() {
    let cols = vec![
        ("a".to_string(), vec![Cell::Number(1.0), Cell::Number(2.0)]),
        ("b".to_string(), vec![Cell::Number(1.0)]),
    ];
    let err = Table::from_columns(2, cols).unwrap_err();
    match err {
        PrepError::Shape { column, expected, actual } => {
            assert_eq!(column, "b");
            assert_eq!(expected, 2);
            assert_eq!(actual, 1);
        }
        other => panic!("expected shape error, got {other:?}"),
    }
}

#[test]
fn assembler_keeps_record_order_and_column_order() {
    let cols = vec![
        ("x".to_string(), vec![Cell::Text("r0".into()), Cell::Text("r1".into())]),
        ("y".to_string(), vec![Cell::Number(0.0), Cell::Number(1.0)]),
    ];
    let t = Table::from_columns(2, cols).unwrap();
    assert_eq!(t.columns().to_vec(), vec!["x".to_string(), "y".to_string()]);
    assert_eq!(t.rows()[1], vec![Cell::Text("r1".into()), Cell::Number(1.0)]);
}

/// The strict lookup reports the missing path; null counts as missing.
#[test]
fn require_names_the_missing_path() {
    let err = require(&json!({}), "/user/screen_name").unwrap_err();
    match err {
        PrepError::KeyLookup { path } => assert_eq!(path, "/user/screen_name"),
        other => panic!("expected key lookup error, got {other:?}"),
    }
    assert!(require(&json!({ "user": null }), "/user").is_err());

    let rec = tweet(1, JUNE_2021, "en", "x");
    assert_eq!(require(&rec, "/user/screen_name").unwrap(), "user1");
}
