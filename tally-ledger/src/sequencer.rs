//! Deduplication and chronological sequencing of the combined record set.
//!
//! Runs once over every page's records: both steps need global visibility.

use std::collections::HashSet;

use tally_core::{ParserConfig, TransactionRecord};

/// Outcome of one sequencing pass.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Sequenced {
    pub records: Vec<TransactionRecord>,
    pub duplicates_dropped: usize,
    pub incomplete_dropped: usize,
    pub extra_openings_dropped: usize,
    /// A date did not parse, so input order was kept.
    pub sort_fallback: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct Sequencer {
    prefix_len: usize,
}

impl Sequencer {
    pub fn new(config: &ParserConfig) -> Self {
        Self {
            prefix_len: config.dedup_prefix_len,
        }
    }

    /// `date_description-prefix_balance`, with the description lowercased
    /// and whitespace collapsed before truncation.
    pub fn dedup_key(&self, record: &TransactionRecord) -> String {
        let normalized = record
            .description
            .to_lowercase()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");
        let prefix: String = normalized.chars().take(self.prefix_len).collect();
        let balance = record.balance.map(|b| b.to_string()).unwrap_or_default();
        format!("{}_{}_{}", record.date.trim(), prefix, balance)
    }

    /// Drop repeated keys (first occurrence wins) and records missing a date
    /// or description. Returns `(kept, duplicates, incomplete)`.
    pub fn dedupe(&self, records: Vec<TransactionRecord>) -> (Vec<TransactionRecord>, usize, usize) {
        let mut seen = HashSet::new();
        let mut kept = Vec::with_capacity(records.len());
        let (mut duplicates, mut incomplete) = (0, 0);

        for record in records {
            if record.date.trim().is_empty() || record.description.trim().is_empty() {
                incomplete += 1;
                continue;
            }
            if !seen.insert(self.dedup_key(&record)) {
                log::debug!("duplicate {} '{}'", record.date, record.description);
                duplicates += 1;
                continue;
            }
            kept.push(record);
        }
        (kept, duplicates, incomplete)
    }

    /// Stable sort by calendar date. If any date fails to parse the input
    /// order is kept and `false` is returned.
    pub fn sort_chronologically(records: &mut [TransactionRecord]) -> bool {
        if let Some(bad) = records.iter().find(|r| r.calendar_date().is_none()) {
            log::warn!("unparseable date '{}', keeping insertion order", bad.date);
            return false;
        }
        records.sort_by_key(|r| r.calendar_date());
        true
    }

    /// Move the first opening-balance record to the front and drop any
    /// others. Returns the reordered list and how many were dropped.
    pub fn promote_opening_balance(records: Vec<TransactionRecord>) -> (Vec<TransactionRecord>, usize) {
        let mut opening = None;
        let mut others = Vec::with_capacity(records.len());
        let mut dropped = 0;

        for record in records {
            if record.is_opening_balance() {
                if opening.is_none() {
                    opening = Some(record);
                } else {
                    dropped += 1;
                }
            } else {
                others.push(record);
            }
        }

        let mut out = Vec::with_capacity(others.len() + 1);
        out.extend(opening);
        out.extend(others);
        (out, dropped)
    }

    /// Dedupe, sort and promote the opening balance.
    pub fn sequence(&self, records: Vec<TransactionRecord>) -> Sequenced {
        let (mut records, duplicates_dropped, incomplete_dropped) = self.dedupe(records);
        let sorted = Self::sort_chronologically(&mut records);
        let (records, extra_openings_dropped) = Self::promote_opening_balance(records);
        Sequenced {
            records,
            duplicates_dropped,
            incomplete_dropped,
            extra_openings_dropped,
            sort_fallback: !sorted,
        }
    }
}
