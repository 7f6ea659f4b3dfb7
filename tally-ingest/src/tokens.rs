//! Date and monetary token recognition.

use regex::Regex;
use std::ops::Range;
use std::sync::OnceLock;

use tally_core::Money;

use crate::types::NumericToken;

/// Smallest and largest plausible statement amounts. Anything outside is
/// an account number, a reference or OCR noise.
const MIN_CENTS: i64 = 1;
const MAX_CENTS: i64 = 999_999_999 * 100;

fn date_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b(\d{1,2})/(\d{1,2})/(\d{4})\b").expect("date regex"))
}

/// `1,234.56` or `1234.56`: two decimals required.
fn strict_amount_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\b(?:\d{1,3}(?:,\d{3})+|\d+)\.\d{2}\b").expect("strict amount regex")
    })
}

/// Same shape with the decimals optional or partial (`1,004`, `45.5`).
fn loose_amount_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\b(?:\d{1,3}(?:,\d{3})+|\d+)(?:\.\d{1,2})?\b").expect("loose amount regex")
    })
}

/// A date found in a line, already zero-padded to `DD/MM/YYYY`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateMatch {
    pub normalized: String,
    pub span: Range<usize>,
}

/// Zero-pad the day and month of a `D/M/YYYY` date.
pub fn normalize_date(day: &str, month: &str, year: &str) -> String {
    format!("{:0>2}/{:0>2}/{}", day, month, year)
}

/// First `D{1,2}/D{1,2}/D{4}` date in `text`.
pub fn find_date(text: &str) -> Option<DateMatch> {
    find_dates(text).into_iter().next()
}

/// Every date in `text`, left to right.
pub fn find_dates(text: &str) -> Vec<DateMatch> {
    date_re()
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            Some(DateMatch {
                normalized: normalize_date(&caps[1], &caps[2], &caps[3]),
                span: whole.range(),
            })
        })
        .collect()
}

pub fn has_date(text: &str) -> bool {
    date_re().is_match(text)
}

/// Result of scanning text for monetary tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenScan {
    /// In-range tokens, left to right.
    pub tokens: Vec<NumericToken>,
    /// Every matched span, including out-of-range ones, for removal from
    /// the description.
    pub spans: Vec<Range<usize>>,
}

/// Two-phase scan: strict two-decimal amounts first; only when there are
/// none, the loose pattern.
pub fn scan_amounts(text: &str) -> TokenScan {
    let mut spans: Vec<Range<usize>> = strict_amount_re()
        .find_iter(text)
        .map(|m| m.range())
        .collect();
    if spans.is_empty() {
        spans = loose_amount_re()
            .find_iter(text)
            .map(|m| m.range())
            .collect();
    }

    let tokens = spans
        .iter()
        .filter_map(|span| {
            let literal = &text[span.clone()];
            let value = Money::parse(literal)?;
            if !(MIN_CENTS..=MAX_CENTS).contains(&value.cents()) {
                log::trace!("discarding out-of-range token '{literal}'");
                return None;
            }
            Some((literal.to_string(), value, span.clone()))
        })
        .enumerate()
        .map(|(position, (literal, value, span))| NumericToken {
            literal,
            value,
            position,
            span,
        })
        .collect();

    TokenScan { tokens, spans }
}

/// True when `text` carries at least one strict two-decimal amount.
pub fn has_strict_amount(text: &str) -> bool {
    strict_amount_re().is_match(text)
}

/// Byte offset just past the last in-range amount in `text`, using the
/// same two-phase scan as [`scan_amounts`]. `masked` spans (dates) are
/// blanked first so their digits never count as amounts.
pub fn last_amount_end(text: &str, masked: &[Range<usize>]) -> Option<usize> {
    let mut blanked = text.to_string();
    for span in masked {
        blanked.replace_range(span.clone(), &" ".repeat(span.len()));
    }
    scan_amounts(&blanked).tokens.last().map(|t| t.span.end)
}

fn page_marker_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)^\s*page\s+\d+(?:\s*(?:of|/)\s*\d+)?\s*$").expect("page marker regex")
    })
}

/// `Page 2`, `Page 2 of 3`, `page 2/3`.
pub fn is_page_marker(line: &str) -> bool {
    page_marker_re().is_match(line)
}

/// Remove `spans` (sorted, non-overlapping) from `text`, leaving a space in
/// each gap so neighbouring words do not fuse.
pub fn remove_spans(text: &str, spans: &[Range<usize>]) -> String {
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    for span in spans {
        if span.start < cursor {
            continue;
        }
        out.push_str(&text[cursor..span.start]);
        out.push(' ');
        cursor = span.end;
    }
    out.push_str(&text[cursor..]);
    out
}
