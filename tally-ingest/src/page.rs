//! Per-page extraction: scanner, row parser, resolver and classifier.
//!
//! Pages share nothing but the configuration and the classifier, so a host
//! may run them in any order or concurrently.

use tally_core::{Classifier, ParserConfig, TransactionRecord};

use crate::opening::find_opening_balance;
use crate::report::ExtractionReport;
use crate::resolver::resolve;
use crate::row_parser::parse_candidate;
use crate::scanner::CandidateScanner;
use crate::types::PageInput;

/// Records of one page in text order, plus any explicit opening balance.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageExtraction {
    pub page: usize,
    pub records: Vec<TransactionRecord>,
    pub opening: Option<TransactionRecord>,
    pub report: ExtractionReport,
}

pub fn extract_page(
    page: usize,
    input: &PageInput,
    config: &ParserConfig,
    classifier: &dyn Classifier,
) -> PageExtraction {
    let mut report = ExtractionReport {
        pages: 1,
        ..Default::default()
    };
    let scan = CandidateScanner::new(config).scan(page, input, &mut report);
    let opening = find_opening_balance(&scan.lines, config);

    let mut records = Vec::with_capacity(scan.candidates.len());
    for candidate in &scan.candidates {
        let row = match parse_candidate(candidate, config) {
            Ok(row) => row,
            Err(why) => {
                log::debug!(
                    "page {} row {}: {} ('{}')",
                    candidate.origin.page,
                    candidate.origin.row,
                    why,
                    candidate.origin.text
                );
                report.reject(&why);
                continue;
            }
        };

        // tokens are non-empty once parsed
        let Some(resolution) = resolve(&row.tokens, config.materiality_threshold) else {
            continue;
        };
        if resolution.ambiguous {
            log::debug!(
                "page {} row {}: no token clears {}, amount left empty",
                candidate.origin.page,
                candidate.origin.row,
                config.materiality_threshold
            );
            report.ambiguous_amounts += 1;
        }

        let amount = resolution
            .magnitude
            .map(|m| classifier.classify(&row.description).sign(m));
        records.push(TransactionRecord {
            date: row.date,
            description: row.description,
            amount,
            balance: Some(resolution.balance),
        });
    }

    report.records = records.len();
    log::info!(
        "page {page}: {} records from {} candidates ({} rejected)",
        records.len(),
        report.candidates,
        report.rejected()
    );

    PageExtraction {
        page,
        records,
        opening,
        report,
    }
}
