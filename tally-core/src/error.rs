use thiserror::Error;

/// Why a candidate line or row produced no record.
///
/// None of these are fatal; the pipeline counts them and moves on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RowRejection {
    #[error("no date found")]
    NoDateFound,

    #[error("matched skip phrase '{0}'")]
    SkipPhraseMatched(String),

    #[error("no monetary token in remainder")]
    NoNumericToken,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0} contains an empty entry")]
    EmptyKeyword(&'static str),

    #[error("{0} must not be negative")]
    NegativeAmount(&'static str),

    #[error("dedup_prefix_len must be at least 1")]
    ZeroPrefixLength,

    #[error("parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}
