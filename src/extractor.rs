//! Field Extractor: flattens tweet records into one positionally aligned
//! column per output field. Every lookup is total: an absent key (top-level
//! or nested under `user`) yields `Cell::Missing`, never an error.

use crate::error::{PrepError, PrepResult};
use crate::json_utils::{first_of, lookup, str_at};
use crate::sentiment::{LexiconScorer, Sentiment, SentimentScorer};
use crate::table::{Cell, Table};
use serde_json::Value;

/// Output header, in export order.
pub const COLUMNS: [&str; 15] = [
    "created_at",
    "source",
    "original_text",
    "polarity",
    "subjectivity",
    "lang",
    "favorite_count",
    "retweet_count",
    "original_author",
    "followers_count",
    "friends_count",
    "possibly_sensitive",
    "hashtags",
    "user_mentions",
    "place",
];

pub struct TweetExtractor<'a, S: SentimentScorer = LexiconScorer> {
    tweets: &'a [Value],
    scorer: S,
}

impl<'a> TweetExtractor<'a, LexiconScorer> {
    pub fn new(tweets: &'a [Value]) -> Self {
        Self { tweets, scorer: LexiconScorer::new() }
    }
}

impl<'a, S: SentimentScorer> TweetExtractor<'a, S> {
    pub fn with_scorer(tweets: &'a [Value], scorer: S) -> Self {
        Self { tweets, scorer }
    }

    fn column(&self, f: impl Fn(&Value) -> Cell) -> Vec<Cell> {
        self.tweets.iter().map(f).collect()
    }

    fn pointer_column(&self, ptr: &str) -> Vec<Cell> {
        self.column(|t| Cell::from_json(lookup(t, ptr)))
    }

    pub fn find_created_time(&self) -> Vec<Cell> {
        self.pointer_column("/created_at")
    }

    /// Client the tweet was posted from (web, mobile, ...).
    pub fn find_source(&self) -> Vec<Cell> {
        self.pointer_column("/source")
    }

    /// Text body: `full_text` for extended tweets, else `text`.
    pub fn find_full_text(&self) -> Vec<Cell> {
        self.column(|t| Cell::from_json(first_of(t, &["/full_text", "/text"])))
    }

    /// One scorer call per record. Missing or non-string text scores neutral.
    pub fn find_sentiments(&self, text: &[Cell]) -> (Vec<Cell>, Vec<Cell>) {
        let mut polarity = Vec::with_capacity(text.len());
        let mut subjectivity = Vec::with_capacity(text.len());
        for cell in text {
            let s = match cell.as_text() {
                Some(t) if !t.trim().is_empty() => self.scorer.score(t),
                _ => Sentiment::NEUTRAL,
            };
            polarity.push(Cell::Number(s.polarity));
            subjectivity.push(Cell::Number(s.subjectivity));
        }
        (polarity, subjectivity)
    }

    pub fn find_lang(&self) -> Vec<Cell> {
        self.pointer_column("/lang")
    }

    pub fn find_favourite_count(&self) -> Vec<Cell> {
        self.pointer_column("/user/favourites_count")
    }

    pub fn find_retweet_count(&self) -> Vec<Cell> {
        self.pointer_column("/retweet_count")
    }

    pub fn find_screen_name(&self) -> Vec<Cell> {
        self.pointer_column("/user/screen_name")
    }

    pub fn find_followers_count(&self) -> Vec<Cell> {
        self.pointer_column("/user/followers_count")
    }

    pub fn find_friends_count(&self) -> Vec<Cell> {
        self.pointer_column("/user/friends_count")
    }

    pub fn is_sensitive(&self) -> Vec<Cell> {
        self.pointer_column("/possibly_sensitive")
    }

    pub fn find_hashtags(&self) -> Vec<Cell> {
        self.list_column(&["/entities/hashtags", "/user/hashtags"])
    }

    pub fn find_mentions(&self) -> Vec<Cell> {
        self.list_column(&["/entities/user_mentions", "/user/mentions"])
    }

    /// `place.full_name`, a plain string `place`, then the author's profile location.
    pub fn find_location(&self) -> Vec<Cell> {
        self.column(|t| {
            if let Some(name) = str_at(t, "/place/full_name") {
                return Cell::Text(name.to_string());
            }
            if let Some(place) = str_at(t, "/place") {
                return Cell::Text(place.to_string());
            }
            Cell::from_json(lookup(t, "/user/location"))
        })
    }

    /// List-shaped field: the value unmodified when it is a list, else an empty list.
    fn list_column(&self, ptrs: &[&str]) -> Vec<Cell> {
        self.column(|t| match first_of(t, ptrs) {
            Some(v @ Value::Array(_)) => Cell::Json(v.clone()),
            _ => Cell::Json(Value::Array(Vec::new())),
        })
    }

    /// All output columns, in [`COLUMNS`] order. Fails fast if any helper
    /// produced a column whose length differs from the record count.
    pub fn extract_columns(&self) -> PrepResult<Vec<(String, Vec<Cell>)>> {
        let text = self.find_full_text();
        let (polarity, subjectivity) = self.find_sentiments(&text);

        let values = [
            self.find_created_time(),
            self.find_source(),
            text,
            polarity,
            subjectivity,
            self.find_lang(),
            self.find_favourite_count(),
            self.find_retweet_count(),
            self.find_screen_name(),
            self.find_followers_count(),
            self.find_friends_count(),
            self.is_sensitive(),
            self.find_hashtags(),
            self.find_mentions(),
            self.find_location(),
        ];

        let expected = self.tweets.len();
        let mut cols = Vec::with_capacity(COLUMNS.len());
        for (name, col) in COLUMNS.iter().zip(values) {
            if col.len() != expected {
                return Err(PrepError::Shape {
                    column: name.to_string(),
                    expected,
                    actual: col.len(),
                });
            }
            tracing::debug!(column = name, missing = col.iter().filter(|c| c.is_missing()).count(), "extracted");
            cols.push((name.to_string(), col));
        }
        Ok(cols)
    }

    /// Extract and assemble in one step.
    pub fn get_tweet_table(&self) -> PrepResult<Table> {
        let cols = self.extract_columns()?;
        Table::from_columns(self.tweets.len(), cols)
    }
}
