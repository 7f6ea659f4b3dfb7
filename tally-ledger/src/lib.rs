//! tally-ledger: combines per-page records into the final statement:
//! deduplication, chronological order and the opening balance.

pub mod balance;
pub mod extractor;
pub mod sequencer;

pub use balance::infer_opening_balance;
pub use extractor::{Extraction, Extractor};
pub use sequencer::{Sequenced, Sequencer};
