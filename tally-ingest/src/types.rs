use serde::{Deserialize, Serialize};
use std::ops::Range;

use tally_core::Money;

/// One page of already-extracted statement content, in one of the shapes a
/// PDF/OCR host can produce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "content", rename_all = "snake_case")]
pub enum PageInput {
    /// Newline-delimited page text.
    Text(String),
    /// Table rows as cell strings.
    Table(Vec<Vec<String>>),
    /// Text whose line breaks were lost; rows are recovered at date tokens.
    Continuous(String),
}

/// A line or flattened table row with its origin, kept for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLine {
    pub page: usize,
    pub row: usize,
    pub text: String,
}

impl RawLine {
    pub fn new(page: usize, row: usize, text: impl Into<String>) -> Self {
        Self {
            page,
            row,
            text: text.into(),
        }
    }
}

/// A monetary substring of a line, parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumericToken {
    pub literal: String,
    /// Parsed value with thousands separators dropped.
    pub value: Money,
    /// Left-to-right index among the kept tokens of the line.
    pub position: usize,
    pub span: Range<usize>,
}

/// A date-anchored line, normalized to `(date, remainder)` regardless of the
/// input shape it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub origin: RawLine,
    /// Zero-padded `DD/MM/YYYY`.
    pub date: String,
    /// The line with the anchoring date removed.
    pub remainder: String,
    /// Following dateless lines to append to the description.
    pub continuation: Vec<String>,
}
