//! Immutable parser configuration: keyword sets, skip phrases and the
//! numeric thresholds used by the heuristics.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::money::Money;

const CREDIT_KEYWORDS: &[&str] = &[
    "batch dep",
    "deposit",
    "business",
    "herd2",
    "netsurit",
    "top vending rebate",
    "merch discount",
    "reversal",
    "transfer in",
    "credit",
    "salary",
    "refund",
];

const DEBIT_KEYWORDS: &[&str] = &[
    "fee",
    "service",
    "maintenance",
    "charge",
    "interest",
    "pnp",
    "vodacom",
    "mtn",
    "savoy liquors",
    "soccer",
    "flm norwood",
    "current ac",
    "yoco",
    "centracom",
    "ankerdata",
    "jpc",
    "instant payment",
    "disputed debit",
    "builders exp",
    "checkers",
    "vets pantry",
    "montrose plumbing",
    "discovery life",
    "absa bond",
    "sandringham vet",
    "woolworths",
    "dis-chem",
    "multichoice",
    "atm",
    "withdrawal",
    "debit order",
];

const SKIP_PHRASES: &[&str] = &[
    "statement period",
    "total pages",
    "balance brought forward",
    "balance carried forward",
    "closing balance",
];

/// Words that make up repeated column headers ("Tran list Date Description
/// Amount Balance"). A dateless line made only of these is page furniture.
const HEADER_WORDS: &[&str] = &[
    "tran",
    "list",
    "date",
    "description",
    "details",
    "amount",
    "balance",
    "debits",
    "credits",
];

fn owned(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Case-insensitive substrings marking a credit.
    pub credit_keywords: Vec<String>,
    /// Case-insensitive substrings marking a debit. Informational: anything
    /// that is not a credit is a debit.
    pub debit_keywords: Vec<String>,
    /// Case-insensitive substrings marking boilerplate lines.
    pub skip_phrases: Vec<String>,
    /// Column-header words; a dateless line made only of these is never
    /// joined onto a description.
    pub header_words: Vec<String>,
    /// Smallest magnitude accepted as the transaction amount.
    pub materiality_threshold: Money,
    /// Description prefix length used in the duplicate key.
    pub dedup_prefix_len: usize,
    /// An explicit opening balance must exceed this value.
    pub opening_balance_floor: Money,
    /// Lines searched on each side of an "opening balance" line.
    pub opening_balance_window: usize,
    /// Append dateless text lines to the previous record's description.
    pub join_continuations: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            credit_keywords: owned(CREDIT_KEYWORDS),
            debit_keywords: owned(DEBIT_KEYWORDS),
            skip_phrases: owned(SKIP_PHRASES),
            header_words: owned(HEADER_WORDS),
            materiality_threshold: Money::from_cents(100),
            dedup_prefix_len: 30,
            opening_balance_floor: Money::from_cents(10_000),
            opening_balance_window: 3,
            join_continuations: true,
        }
    }
}

impl ParserConfig {
    /// Parse a (possibly partial) TOML document; missing keys keep defaults.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let cfg: ParserConfig = toml::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, list) in [
            ("credit_keywords", &self.credit_keywords),
            ("debit_keywords", &self.debit_keywords),
            ("skip_phrases", &self.skip_phrases),
            ("header_words", &self.header_words),
        ] {
            if list.iter().any(|k| k.trim().is_empty()) {
                return Err(ConfigError::EmptyKeyword(field));
            }
        }
        if self.materiality_threshold.is_negative() {
            return Err(ConfigError::NegativeAmount("materiality_threshold"));
        }
        if self.opening_balance_floor.is_negative() {
            return Err(ConfigError::NegativeAmount("opening_balance_floor"));
        }
        if self.dedup_prefix_len == 0 {
            return Err(ConfigError::ZeroPrefixLength);
        }
        Ok(())
    }

    /// The first configured skip phrase found in `text`, case-insensitively.
    pub fn matching_skip_phrase(&self, text: &str) -> Option<&str> {
        let lower = text.to_lowercase();
        self.skip_phrases
            .iter()
            .find(|p| lower.contains(&p.to_lowercase()))
            .map(|p| p.as_str())
    }

    /// True when every word of `line` is a configured column-header word.
    pub fn is_header_line(&self, line: &str) -> bool {
        let mut words = line
            .split_whitespace()
            .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()).to_lowercase())
            .filter(|w| !w.is_empty())
            .peekable();
        words.peek().is_some()
            && words.all(|w| self.header_words.iter().any(|h| h.eq_ignore_ascii_case(&w)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let cfg = ParserConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.materiality_threshold, Money::from_cents(100));
        assert_eq!(cfg.dedup_prefix_len, 30);
        assert!(cfg.credit_keywords.iter().any(|k| k == "salary"));
    }

    #[test]
    fn test_partial_toml_overrides_only_named_keys() {
        let cfg = ParserConfig::from_toml_str(
            r#"
materiality_threshold = "20.00"
credit_keywords = ["payroll"]
"#,
        )
        .unwrap();
        assert_eq!(cfg.materiality_threshold, Money::from_cents(2_000));
        assert_eq!(cfg.credit_keywords, vec!["payroll".to_string()]);
        assert_eq!(cfg.skip_phrases, ParserConfig::default().skip_phrases);
    }

    #[test]
    fn test_toml_round_trip_of_defaults() {
        let cfg = ParserConfig::default();
        let text = cfg.to_toml_string().unwrap();
        assert_eq!(ParserConfig::from_toml_str(&text).unwrap(), cfg);
    }

    #[test]
    fn test_header_lines() {
        let cfg = ParserConfig::default();
        assert!(cfg.is_header_line("Date Description Amount Balance"));
        assert!(cfg.is_header_line("TRAN LIST | DATE | DETAILS"));
        assert!(!cfg.is_header_line("REF SMITH RENT"));
        assert!(!cfg.is_header_line("Date of purchase"));
        assert!(!cfg.is_header_line(" -- "));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut cfg = ParserConfig::default();
        cfg.skip_phrases.push("  ".to_string());
        assert!(matches!(cfg.validate(), Err(ConfigError::EmptyKeyword("skip_phrases"))));

        let mut cfg = ParserConfig::default();
        cfg.materiality_threshold = Money::from_cents(-1);
        assert!(matches!(cfg.validate(), Err(ConfigError::NegativeAmount(_))));

        let mut cfg = ParserConfig::default();
        cfg.dedup_prefix_len = 0;
        assert!(matches!(cfg.validate(), Err(ConfigError::ZeroPrefixLength)));

        assert!(matches!(
            ParserConfig::from_toml_str("dedup_prefix_len = \"x\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_matching_skip_phrase() {
        let cfg = ParserConfig::default();
        assert_eq!(
            cfg.matching_skip_phrase("Statement Period 01/01/2023 to 31/01/2023"),
            Some("statement period")
        );
        assert_eq!(cfg.matching_skip_phrase("PnP Norwood 45.50"), None);
    }
}
