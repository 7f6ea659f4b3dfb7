//! tally-ingest: per-page statement parsing. Finds date-anchored lines in
//! text, tables or run-together text, splits them into description and
//! amounts, and resolves amount, balance and direction.

pub mod opening;
pub mod page;
pub mod report;
pub mod resolver;
pub mod row_parser;
pub mod scanner;
pub mod tokens;
pub mod types;

pub use opening::find_opening_balance;
pub use page::{PageExtraction, extract_page};
pub use report::{ExtractionReport, OpeningSource};
pub use resolver::{Resolution, resolve};
pub use row_parser::{ParsedRow, clean_description, parse_candidate};
pub use scanner::{CandidateScanner, PageScan};
pub use types::{Candidate, NumericToken, PageInput, RawLine};
