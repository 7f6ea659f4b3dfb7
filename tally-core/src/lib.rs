//! tally-core: record types, money, configuration and classification shared
//! by the statement extraction crates.

pub mod classify;
pub mod config;
pub mod error;
pub mod money;
pub mod record;

pub use classify::{Classifier, KeywordClassifier};
pub use config::ParserConfig;
pub use error::{ConfigError, RowRejection};
pub use money::Money;
pub use record::{
    BalanceSummary, DATE_FORMAT, Direction, OPENING_BALANCE, StatementRow, TransactionRecord,
};
