//! Candidate scanner: finds date-anchored lines in any input shape and
//! normalizes each to a `(date, remainder)` candidate.
//!
//! Lines mentioning "opening balance" never become candidates; they are
//! left to the opening-balance search, which sees every page line.

use std::ops::Range;

use tally_core::{ParserConfig, RowRejection};

use crate::report::ExtractionReport;
use crate::tokens::{
    find_date, find_dates, has_date, has_strict_amount, is_page_marker, last_amount_end,
    remove_spans,
};
use crate::types::{Candidate, PageInput, RawLine};

/// Words of text preceding a date in continuous input that still count as
/// part of its row when looking for skip phrases.
const LEAD_WORDS: usize = 6;

/// Candidates of one page plus the page lines for context searches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageScan {
    pub candidates: Vec<Candidate>,
    pub lines: Vec<String>,
}

pub fn is_opening_line(text: &str) -> bool {
    text.to_lowercase().contains("opening balance")
}

/// Anchor a single line on its first date.
pub fn anchor_line(origin: RawLine) -> Result<Candidate, RowRejection> {
    let date = find_date(&origin.text).ok_or(RowRejection::NoDateFound)?;
    let remainder = remove_spans(&origin.text, &[date.span.clone()]).trim().to_string();
    Ok(Candidate {
        origin,
        date: date.normalized,
        remainder,
        continuation: Vec::new(),
    })
}

pub struct CandidateScanner<'a> {
    config: &'a ParserConfig,
}

impl<'a> CandidateScanner<'a> {
    pub fn new(config: &'a ParserConfig) -> Self {
        Self { config }
    }

    pub fn scan(&self, page: usize, input: &PageInput, report: &mut ExtractionReport) -> PageScan {
        match input {
            PageInput::Text(text) => self.scan_lines(page, text, report),
            PageInput::Table(rows) => self.scan_table(page, rows, report),
            PageInput::Continuous(text) => self.scan_continuous(page, text, report),
        }
    }

    fn scan_lines(&self, page: usize, text: &str, report: &mut ExtractionReport) -> PageScan {
        let mut out = PageScan::default();
        // candidate currently accepting continuation lines
        let mut open: Option<usize> = None;

        for (row, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }
            out.lines.push(line.to_string());
            let origin = RawLine::new(page, row, line);

            if is_opening_line(line) {
                report.opening_lines += 1;
                open = None;
                continue;
            }

            if !has_date(line) {
                match open {
                    Some(idx) if self.accepts_continuation(line) => {
                        log::debug!("page {page} row {row}: continuation '{line}'");
                        out.candidates[idx].continuation.push(line.to_string());
                        report.continuations += 1;
                    }
                    _ => {
                        open = None;
                        reject(&origin, RowRejection::NoDateFound, report);
                    }
                }
                continue;
            }

            open = None;
            if let Some(phrase) = self.config.matching_skip_phrase(line) {
                reject(&origin, RowRejection::SkipPhraseMatched(phrase.to_string()), report);
                continue;
            }
            match anchor_line(origin) {
                Ok(c) => {
                    out.candidates.push(c);
                    report.candidates += 1;
                    open = Some(out.candidates.len() - 1);
                }
                Err(why) => report.reject(&why),
            }
        }
        out
    }

    /// Dateless lines join the open description unless they carry an
    /// amount, a skip phrase, a page number or only column-header words.
    fn accepts_continuation(&self, line: &str) -> bool {
        self.config.join_continuations
            && !has_strict_amount(line)
            && self.config.matching_skip_phrase(line).is_none()
            && !is_page_marker(line)
            && !self.config.is_header_line(line)
    }

    fn scan_table(&self, page: usize, rows: &[Vec<String>], report: &mut ExtractionReport) -> PageScan {
        let mut out = PageScan::default();

        for (row, cells) in rows.iter().enumerate() {
            let cells: Vec<&str> = cells.iter().map(|c| c.trim()).collect();
            let joined = join_non_empty(cells.iter().map(|c| c.to_string()));
            if joined.is_empty() {
                continue;
            }
            out.lines.push(joined.clone());
            let origin = RawLine::new(page, row, joined.as_str());

            if is_opening_line(&joined) {
                report.opening_lines += 1;
                continue;
            }

            let Some((date_cell, date)) = cells
                .iter()
                .enumerate()
                .find_map(|(i, c)| find_date(c).map(|d| (i, d)))
            else {
                reject(&origin, RowRejection::NoDateFound, report);
                continue;
            };

            if let Some(phrase) = self.config.matching_skip_phrase(&joined) {
                reject(&origin, RowRejection::SkipPhraseMatched(phrase.to_string()), report);
                continue;
            }

            let remainder = join_non_empty(cells.iter().enumerate().map(|(i, c)| {
                if i == date_cell {
                    remove_spans(c, &[date.span.clone()])
                } else {
                    c.to_string()
                }
            }));
            out.candidates.push(Candidate {
                origin,
                date: date.normalized,
                remainder,
                continuation: Vec::new(),
            });
            report.candidates += 1;
        }
        out
    }

    /// Rows are cut at each date. A row's routing (transaction, opening
    /// balance, boilerplate) comes from its own lead-in and text only:
    /// the lead-in is what follows the previous row's last amount.
    ///
    /// A date followed only by whitespace and another date (a posting-date
    /// column) keeps both in one transaction row. A boilerplate or opening
    /// row absorbs one more date only across a range word (`01/01/2023 to
    /// 31/01/2023`). Each row ends at its last amount.
    fn scan_continuous(&self, page: usize, text: &str, report: &mut ExtractionReport) -> PageScan {
        let mut out = PageScan::default();
        let dates = find_dates(text);
        let Some(first) = dates.first() else {
            return out;
        };

        let mut lead = last_words(&text[..first.span.start], LEAD_WORDS);
        let mut row = 0;
        let mut i = 0;
        while i < dates.len() {
            let anchor = &dates[i];
            let first_end = dates.get(i + 1).map_or(text.len(), |next| next.span.start);
            let provisional = self.route(&join_non_empty([
                lead.clone(),
                text[anchor.span.start..first_end].to_string(),
            ]));

            let mut j = i + 1;
            while let Some(next) = dates.get(j) {
                let gap = &text[dates[j - 1].span.end..next.span.start];
                let joins = match provisional {
                    Route::Row => gap.trim().is_empty(),
                    _ => j == i + 1 && is_range_gap(gap),
                };
                if !joins {
                    break;
                }
                j += 1;
            }

            let end = dates.get(j).map_or(text.len(), |next| next.span.start);
            let body = &text[anchor.span.start..end];
            let spans: Vec<Range<usize>> = dates[i..j]
                .iter()
                .map(|d| d.span.start - anchor.span.start..d.span.end - anchor.span.start)
                .collect();
            // without an amount the row keeps its whole body, and only the
            // text after its last date leads into the next row
            let (core, tail) = match last_amount_end(body, &spans) {
                Some(cut) => (&body[..cut], &body[cut..]),
                None => (body, &body[spans.last().map_or(0, |s| s.end)..]),
            };

            let in_core: Vec<Range<usize>> =
                spans.iter().filter(|s| s.end <= core.len()).cloned().collect();
            let segment = join_non_empty(core.split_whitespace().map(str::to_string));
            let context = join_non_empty([lead, segment.clone()]);
            out.lines.push(context.clone());
            let origin = RawLine::new(page, row, segment.as_str());

            match self.route(&context) {
                Route::Opening => report.opening_lines += 1,
                Route::Skip(phrase) => reject(&origin, RowRejection::SkipPhraseMatched(phrase), report),
                Route::Row => {
                    out.candidates.push(Candidate {
                        origin,
                        date: anchor.normalized.clone(),
                        remainder: join_non_empty(
                            remove_spans(core, &in_core).split_whitespace().map(str::to_string),
                        ),
                        continuation: Vec::new(),
                    });
                    report.candidates += 1;
                }
            }

            lead = last_words(tail, LEAD_WORDS);
            row += 1;
            i = j;
        }
        out
    }

    fn route(&self, context: &str) -> Route {
        if is_opening_line(context) {
            Route::Opening
        } else if let Some(phrase) = self.config.matching_skip_phrase(context) {
            Route::Skip(phrase.to_string())
        } else {
            Route::Row
        }
    }
}

/// Where a continuous-text row goes.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Route {
    Row,
    Opening,
    Skip(String),
}

/// Words joining the two ends of a date range.
const RANGE_WORDS: &[&str] = &["to", "-", "until", "till", "through"];

fn is_range_gap(gap: &str) -> bool {
    let words: Vec<&str> = gap.split_whitespace().collect();
    matches!(words.as_slice(), [w] if RANGE_WORDS.contains(&w.to_lowercase().as_str()))
}

fn reject(origin: &RawLine, why: RowRejection, report: &mut ExtractionReport) {
    log::debug!("page {} row {}: {} ('{}')", origin.page, origin.row, why, origin.text);
    report.reject(&why);
}

fn join_non_empty(parts: impl IntoIterator<Item = String>) -> String {
    parts
        .into_iter()
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn last_words(text: &str, n: usize) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    words[words.len().saturating_sub(n)..].join(" ")
}
