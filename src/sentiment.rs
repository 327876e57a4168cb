//! Sentiment scoring. The extractor only depends on [`SentimentScorer`]; the
//! built-in [`LexiconScorer`] averages word-level (polarity, subjectivity) scores
//! with intensifier and negation handling.

use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Sentiment {
    pub polarity: f64,     // -1.0..=1.0
    pub subjectivity: f64, // 0.0..=1.0
}

impl Sentiment {
    pub const NEUTRAL: Sentiment = Sentiment { polarity: 0.0, subjectivity: 0.0 };
}

/// Pure function of text. Must return [`Sentiment::NEUTRAL`] (or another defined
/// value) for empty input rather than failing.
pub trait SentimentScorer {
    fn score(&self, text: &str) -> Sentiment;
}

impl<F> SentimentScorer for F
where
    F: Fn(&str) -> Sentiment,
{
    fn score(&self, text: &str) -> Sentiment {
        self(text)
    }
}

// (word, polarity, subjectivity)
const LEXICON: &[(&str, f64, f64)] = &[
    ("good", 0.7, 0.6),
    ("great", 0.8, 0.75),
    ("excellent", 1.0, 1.0),
    ("amazing", 0.6, 0.9),
    ("awesome", 1.0, 1.0),
    ("best", 1.0, 0.3),
    ("better", 0.5, 0.5),
    ("happy", 0.8, 1.0),
    ("love", 0.5, 0.6),
    ("nice", 0.6, 1.0),
    ("safe", 0.5, 0.5),
    ("hope", 0.4, 0.6),
    ("glad", 0.5, 1.0),
    ("thank", 0.3, 0.4),
    ("thanks", 0.3, 0.4),
    ("effective", 0.6, 0.8),
    ("protected", 0.4, 0.3),
    ("recovered", 0.4, 0.3),
    ("positive", 0.2, 0.5),
    ("strong", 0.4, 0.7),
    ("wonderful", 1.0, 1.0),
    ("fantastic", 0.4, 0.9),
    ("beautiful", 0.85, 1.0),
    ("free", 0.4, 0.8),
    ("important", 0.4, 1.0),
    ("bad", -0.7, 0.67),
    ("worse", -0.4, 0.6),
    ("worst", -1.0, 1.0),
    ("terrible", -1.0, 1.0),
    ("awful", -1.0, 1.0),
    ("horrible", -1.0, 1.0),
    ("sad", -0.5, 1.0),
    ("hate", -0.8, 0.9),
    ("angry", -0.5, 1.0),
    ("afraid", -0.6, 0.9),
    ("scared", -0.5, 1.0),
    ("fear", -0.6, 0.9),
    ("dangerous", -0.6, 0.9),
    ("deadly", -0.2, 0.4),
    ("dead", -0.2, 0.4),
    ("sick", -0.7, 0.9),
    ("ill", -0.5, 0.8),
    ("crisis", -0.4, 0.6),
    ("wrong", -0.5, 0.9),
    ("fake", -0.5, 1.0),
    ("stupid", -0.8, 1.0),
    ("poor", -0.4, 0.6),
    ("negative", -0.3, 0.4),
    ("difficult", -0.5, 1.0),
    ("serious", -0.33, 0.67),
    ("severe", -0.6, 0.8),
    ("tragic", -0.75, 1.0),
    ("worried", -0.4, 0.8),
    ("lost", -0.1, 0.3),
];

// (word, polarity multiplier)
const INTENSIFIERS: &[(&str, f64)] = &[
    ("very", 1.3),
    ("really", 1.3),
    ("extremely", 1.5),
    ("so", 1.2),
    ("too", 1.2),
    ("most", 1.3),
    ("absolutely", 1.5),
    ("super", 1.4),
    ("quite", 1.1),
    ("slightly", 0.5),
    ("somewhat", 0.7),
];

const NEGATIONS: &[&str] = &["not", "no", "never", "nor", "cannot", "without"];

const NEGATION_FACTOR: f64 = -0.5;

fn token_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // URLs and @handles are consumed by the first alternatives and dropped.
    RE.get_or_init(|| {
        Regex::new(r"https?://\S+|@\w+|[A-Za-z]+(?:'[A-Za-z]+)?").unwrap()
    })
}

/// Word-table scorer in the manner of pattern/TextBlob.
pub struct LexiconScorer {
    words: HashMap<&'static str, (f64, f64)>,
    intensifiers: HashMap<&'static str, f64>,
}

impl Default for LexiconScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl LexiconScorer {
    pub fn new() -> Self {
        Self {
            words: LEXICON.iter().map(|&(w, p, s)| (w, (p, s))).collect(),
            intensifiers: INTENSIFIERS.iter().copied().collect(),
        }
    }

    fn tokens(text: &str) -> Vec<String> {
        token_re()
            .find_iter(text)
            .map(|m| m.as_str())
            .filter(|t| !t.contains("://") && !t.starts_with('@'))
            .map(|t| t.to_lowercase())
            .collect()
    }
}

impl SentimentScorer for LexiconScorer {
    fn score(&self, text: &str) -> Sentiment {
        let tokens = Self::tokens(text);
        if tokens.is_empty() {
            return Sentiment::NEUTRAL;
        }

        let mut pol_sum = 0.0;
        let mut subj_sum = 0.0;
        let mut matched = 0usize;
        let mut multiplier = 1.0;
        let mut negated = false;

        for tok in &tokens {
            let tok = tok.as_str();
            if NEGATIONS.contains(&tok) || tok.ends_with("n't") {
                negated = true;
                continue;
            }
            if let Some(&m) = self.intensifiers.get(tok) {
                multiplier *= m;
                continue;
            }
            if let Some(&(p, s)) = self.words.get(tok) {
                let mut p = p * multiplier;
                let s = (s * multiplier).min(1.0);
                if negated {
                    p *= NEGATION_FACTOR;
                }
                pol_sum += p;
                subj_sum += s;
                matched += 1;
            }
            multiplier = 1.0;
            negated = false;
        }

        if matched == 0 {
            return Sentiment::NEUTRAL;
        }
        Sentiment {
            polarity: (pol_sum / matched as f64).clamp(-1.0, 1.0),
            subjectivity: (subj_sum / matched as f64).clamp(0.0, 1.0),
        }
    }
}
