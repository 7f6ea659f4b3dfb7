//! Explicit opening-balance search.
//!
//! Statements print the opening balance in many layouts: on the date line,
//! under a heading, or split across lines. Around each line mentioning
//! "opening balance", nearby lines are searched nearest first for a date
//! and for an amount large enough not to be a page number or code.

use tally_core::{Money, ParserConfig, TransactionRecord};

use crate::scanner::is_opening_line;
use crate::tokens::{find_dates, remove_spans, scan_amounts};

/// Line indices within `window` of `center`, nearest first, earlier lines
/// before later ones at equal distance.
fn window_order(center: usize, window: usize, len: usize) -> Vec<usize> {
    let mut order = vec![center];
    for d in 1..=window {
        if let Some(before) = center.checked_sub(d) {
            order.push(before);
        }
        if center + d < len {
            order.push(center + d);
        }
    }
    order
}

fn first_amount_above(line: &str, floor: Money) -> Option<Money> {
    let spans: Vec<_> = find_dates(line).into_iter().map(|d| d.span).collect();
    let text = remove_spans(line, &spans);
    scan_amounts(&text)
        .tokens
        .into_iter()
        .map(|t| t.value)
        .find(|v| *v > floor)
}

/// The first opening balance found in `lines`, if any.
pub fn find_opening_balance(lines: &[String], config: &ParserConfig) -> Option<TransactionRecord> {
    for (i, line) in lines.iter().enumerate() {
        if !is_opening_line(line) {
            continue;
        }

        let order = window_order(i, config.opening_balance_window, lines.len());
        let date = order
            .iter()
            .find_map(|&j| find_dates(&lines[j]).into_iter().next())
            .map(|d| d.normalized);
        let balance = order
            .iter()
            .find_map(|&j| first_amount_above(&lines[j], config.opening_balance_floor));

        match (date, balance) {
            (Some(date), Some(balance)) => {
                log::debug!("explicit opening balance {balance} on {date} near line {i}");
                return Some(TransactionRecord::opening_balance(date, balance));
            }
            _ => log::debug!("opening balance mention at line {i} without date and amount"),
        }
    }
    None
}
