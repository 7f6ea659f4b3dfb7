use serde::{Deserialize, Serialize};

use tally_core::RowRejection;

/// Where the opening-balance record of the final list came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpeningSource {
    #[default]
    None,
    Explicit,
    Inferred,
}

/// Counters describing one extraction run. Page reports merge into the
/// run report, in any order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExtractionReport {
    pub pages: usize,
    pub candidates: usize,
    pub records: usize,
    pub no_date: usize,
    pub skip_phrase: usize,
    pub no_numeric_token: usize,
    pub ambiguous_amounts: usize,
    pub continuations: usize,
    pub opening_lines: usize,
    pub duplicates_dropped: usize,
    pub incomplete_dropped: usize,
    pub extra_openings_dropped: usize,
    pub sort_fallback: bool,
    pub opening_source: OpeningSource,
}

impl ExtractionReport {
    pub fn reject(&mut self, why: &RowRejection) {
        match why {
            RowRejection::NoDateFound => self.no_date += 1,
            RowRejection::SkipPhraseMatched(_) => self.skip_phrase += 1,
            RowRejection::NoNumericToken => self.no_numeric_token += 1,
        }
    }

    pub fn rejected(&self) -> usize {
        self.no_date + self.skip_phrase + self.no_numeric_token
    }

    pub fn merge(&mut self, other: &ExtractionReport) {
        self.pages += other.pages;
        self.candidates += other.candidates;
        self.records += other.records;
        self.no_date += other.no_date;
        self.skip_phrase += other.skip_phrase;
        self.no_numeric_token += other.no_numeric_token;
        self.ambiguous_amounts += other.ambiguous_amounts;
        self.continuations += other.continuations;
        self.opening_lines += other.opening_lines;
        self.duplicates_dropped += other.duplicates_dropped;
        self.incomplete_dropped += other.incomplete_dropped;
        self.extra_openings_dropped += other.extra_openings_dropped;
        self.sort_fallback |= other.sort_fallback;
        if self.opening_source == OpeningSource::None {
            self.opening_source = other.opening_source;
        }
    }
}
