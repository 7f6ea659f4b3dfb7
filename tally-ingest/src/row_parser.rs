//! Row parser: splits a candidate's remainder into description text and
//! ordered monetary tokens.

use tally_core::{ParserConfig, RowRejection};

use crate::tokens::{remove_spans, scan_amounts};
use crate::types::{Candidate, NumericToken};

/// Description used when nothing readable is left after removing amounts.
pub const PLACEHOLDER_DESCRIPTION: &str = "Transaction";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRow {
    pub date: String,
    pub description: String,
    /// In-range monetary tokens, left to right.
    pub tokens: Vec<NumericToken>,
}

/// Strip punctuation except hyphens and collapse whitespace. Words made of
/// hyphens only (column separators) are dropped.
pub fn clean_description(text: &str) -> String {
    let kept: String = text
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '_' || c == '-' || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();
    kept.split_whitespace()
        .filter(|w| !w.chars().all(|c| c == '-'))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn parse_candidate(candidate: &Candidate, config: &ParserConfig) -> Result<ParsedRow, RowRejection> {
    if let Some(phrase) = config.matching_skip_phrase(&candidate.remainder) {
        return Err(RowRejection::SkipPhraseMatched(phrase.to_string()));
    }

    let scan = scan_amounts(&candidate.remainder);
    if scan.tokens.is_empty() {
        return Err(RowRejection::NoNumericToken);
    }

    let mut parts = vec![clean_description(&remove_spans(&candidate.remainder, &scan.spans))];
    parts.extend(candidate.continuation.iter().map(|c| clean_description(c)));
    let mut description = parts
        .into_iter()
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    if description.chars().count() < 2 {
        description = PLACEHOLDER_DESCRIPTION.to_string();
    }

    Ok(ParsedRow {
        date: candidate.date.clone(),
        description,
        tokens: scan.tokens,
    })
}
