//! Amount/balance resolution over the ordered tokens of a row.

use tally_core::Money;

use crate::types::NumericToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    /// Always the last token.
    pub balance: Money,
    /// Unsigned transaction amount, if one was selected.
    pub magnitude: Option<Money>,
    /// Tokens preceded the balance but none cleared the threshold.
    pub ambiguous: bool,
}

/// The last token is the balance. Walking outward from the balance, the
/// first token at or above `threshold` is the amount. When tokens exist but
/// none qualifies, the amount is left absent.
pub fn resolve(tokens: &[NumericToken], threshold: Money) -> Option<Resolution> {
    let (balance, rest) = tokens.split_last()?;
    let magnitude = rest
        .iter()
        .rev()
        .map(|t| t.value.abs())
        .find(|v| *v >= threshold);

    Some(Resolution {
        balance: balance.value,
        magnitude,
        ambiguous: !rest.is_empty() && magnitude.is_none(),
    })
}
