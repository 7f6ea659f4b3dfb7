//! The extraction pipeline: pages in, one ordered record list out.

use std::sync::Arc;

use tally_core::{
    BalanceSummary, Classifier, ConfigError, KeywordClassifier, ParserConfig, StatementRow,
    TransactionRecord,
};
use tally_ingest::{ExtractionReport, OpeningSource, PageExtraction, PageInput, extract_page};

use crate::balance::infer_opening_balance;
use crate::sequencer::Sequencer;

/// Final record list of a run with its diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Extraction {
    pub records: Vec<TransactionRecord>,
    pub report: ExtractionReport,
}

impl Extraction {
    /// No records at all; the host decides how to tell the user.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn rows(&self) -> Vec<StatementRow> {
        self.records.iter().map(StatementRow::from).collect()
    }

    pub fn summary(&self) -> BalanceSummary {
        BalanceSummary::of(&self.records)
    }
}

/// Immutable pipeline over a fixed configuration and classifier. Cheap to
/// share across threads.
#[derive(Clone)]
pub struct Extractor {
    config: ParserConfig,
    classifier: Arc<dyn Classifier>,
}

impl std::fmt::Debug for Extractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Extractor").field("config", &self.config).finish_non_exhaustive()
    }
}

impl Extractor {
    /// Pipeline with the keyword classifier built from `config`.
    pub fn new(config: ParserConfig) -> Result<Self, ConfigError> {
        let classifier = Arc::new(KeywordClassifier::new(&config));
        Self::with_classifier(config, classifier)
    }

    pub fn with_classifier(
        config: ParserConfig,
        classifier: Arc<dyn Classifier>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config, classifier })
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse one page. Independent of every other page.
    pub fn extract_page(&self, page: usize, input: &PageInput) -> PageExtraction {
        extract_page(page, input, &self.config, self.classifier.as_ref())
    }

    /// Join point: combine every page, dedupe, order, and settle the
    /// opening balance. Pages may arrive in any order; document order is
    /// restored from their page numbers.
    pub fn finalize(&self, mut pages: Vec<PageExtraction>) -> Extraction {
        pages.sort_by_key(|p| p.page);

        let mut report = ExtractionReport::default();
        let mut records = Vec::new();
        for page in pages {
            report.merge(&page.report);
            records.extend(page.opening);
            records.extend(page.records);
        }

        let sequencer = Sequencer::new(&self.config);
        let (mut records, duplicates, incomplete) = sequencer.dedupe(records);
        report.duplicates_dropped += duplicates;
        report.incomplete_dropped += incomplete;
        report.sort_fallback = !Sequencer::sort_chronologically(&mut records);

        if records.iter().any(|r| r.is_opening_balance()) {
            report.opening_source = OpeningSource::Explicit;
        } else if let Some(opening) = records.first().and_then(infer_opening_balance) {
            log::info!("no opening balance stated, inferred {}", opening.date);
            records.insert(0, opening);
            report.opening_source = OpeningSource::Inferred;
        }

        let (records, extra) = Sequencer::promote_opening_balance(records);
        report.extra_openings_dropped += extra;
        report.records = records.len();

        log::info!(
            "{} records from {} pages ({} duplicates, opening balance {:?})",
            report.records,
            report.pages,
            report.duplicates_dropped,
            report.opening_source
        );
        Extraction { records, report }
    }

    /// Extract pages numbered from 1 in document order.
    pub fn extract(&self, pages: &[PageInput]) -> Extraction {
        let parsed = pages
            .iter()
            .enumerate()
            .map(|(i, input)| self.extract_page(i + 1, input))
            .collect();
        self.finalize(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tally_core::{Direction, Money};

    fn extractor() -> Extractor {
        Extractor::new(ParserConfig::default()).unwrap()
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let cfg = ParserConfig {
            dedup_prefix_len: 0,
            ..ParserConfig::default()
        };
        assert!(Extractor::new(cfg).is_err());
    }

    #[test]
    fn test_explicit_opening_wins_over_inference() {
        let page = PageInput::Text(
            "01/01/2023 Opening balance 2,549.98\n21/01/2023 Herd2 - 1213779758 2,000.00 4,549.98".into(),
        );
        let out = extractor().extract(&[page]);
        assert_eq!(out.report.opening_source, OpeningSource::Explicit);
        assert_eq!(out.records.len(), 2);
        assert_eq!(out.records[0].balance, Some(Money::from_cents(254_998)));
        assert_eq!(out.summary().closing, Some(Money::from_cents(454_998)));
    }

    #[test]
    fn test_empty_input_is_empty_result() {
        let out = extractor().extract(&[PageInput::Text("Nothing to see".into())]);
        assert!(out.is_empty());
        assert_eq!(out.report.opening_source, OpeningSource::None);
        assert_eq!(out.report.no_date, 1);
    }

    #[test]
    fn test_pages_finalize_in_page_order() {
        let ex = extractor();
        let p1 = ex.extract_page(1, &PageInput::Text("10/01/2023 Fee 5.00 995.00".into()));
        let p2 = ex.extract_page(2, &PageInput::Text("10/01/2023 ATM 50.00 945.00".into()));
        let out = ex.finalize(vec![p2, p1]);
        let order: Vec<_> = out.records.iter().map(|r| r.description.as_str()).collect();
        assert_eq!(order, vec!["Opening balance", "Fee", "ATM"]);
        assert_eq!(out.records[0].balance, Some(Money::from_cents(100_000)));
        assert_eq!(out.report.pages, 2);
    }

    #[test]
    fn test_custom_classifier() {
        struct Credits;
        impl Classifier for Credits {
            fn classify(&self, _: &str) -> Direction {
                Direction::Credit
            }
        }
        let ex = Extractor::with_classifier(ParserConfig::default(), Arc::new(Credits)).unwrap();
        let out = ex.extract(&[PageInput::Text("05/03/2023 PnP Norwood 45.50 1,004.48".into())]);
        assert_eq!(out.records[1].amount, Some(Money::from_cents(4_550)));
    }
}
