//! Credit/debit classification of cleaned descriptions.
//!
//! No ground truth is available, so this is a keyword heuristic behind a
//! trait: a host can swap in different rules without touching the pipeline.

use crate::config::ParserConfig;
use crate::record::Direction;

/// Assigns a direction to a cleaned description.
pub trait Classifier: Send + Sync {
    fn classify(&self, description: &str) -> Direction;
}

/// Substring rules over the configured keyword sets.
/// Priority: credit keyword > debit keyword > debit by default.
#[derive(Debug, Clone)]
pub struct KeywordClassifier {
    credit: Vec<String>,
    debit: Vec<String>,
}

impl KeywordClassifier {
    pub fn new(config: &ParserConfig) -> Self {
        Self {
            credit: lowered(&config.credit_keywords),
            debit: lowered(&config.debit_keywords),
        }
    }

    /// The credit keyword that fired, if any.
    pub fn credit_match(&self, description: &str) -> Option<&str> {
        first_match(&self.credit, &description.to_lowercase())
    }

    /// The debit keyword that fired, if any. Only used for diagnostics.
    pub fn debit_match(&self, description: &str) -> Option<&str> {
        first_match(&self.debit, &description.to_lowercase())
    }
}

impl Classifier for KeywordClassifier {
    fn classify(&self, description: &str) -> Direction {
        if let Some(kw) = self.credit_match(description) {
            log::trace!("credit keyword '{kw}' in '{description}'");
            return Direction::Credit;
        }
        if self.debit_match(description).is_none() {
            log::trace!("no keyword in '{description}', defaulting to debit");
        }
        Direction::Debit
    }
}

fn lowered(list: &[String]) -> Vec<String> {
    list.iter().map(|k| k.to_lowercase()).collect()
}

fn first_match<'a>(keywords: &'a [String], lower: &str) -> Option<&'a str> {
    keywords
        .iter()
        .find(|k| lower.contains(k.as_str()))
        .map(|k| k.as_str())
}
