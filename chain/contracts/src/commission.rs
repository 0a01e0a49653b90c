//! Commission rate and swap conversion arithmetic
//!
//! The converted amount of a swap is
//!
//! ```text
//! gross     = floor(amount * destination_rate / 10_000)
//! fee       = ceil(gross * commission / 10_000)
//! converted = gross - fee
//! ```
//!
//! Rounding the gross down and the fee up keeps the contract from paying out
//! more than it priced, and any non-zero commission takes at least one unit
//! from a non-zero gross.

use serde::{Deserialize, Serialize};
use types::numeric::{Amount, BasisPoints};

use crate::errors::ChangerError;

/// Breakdown of one conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversion {
    /// Amount paid in by the caller (source token units)
    pub amount_in: Amount,
    /// Destination units before commission
    pub gross: Amount,
    /// Commission withheld (destination token units)
    pub fee: Amount,
    /// Destination units paid out to the caller
    pub amount_out: Amount,
}

/// Current commission rate applied to every swap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CommissionConfig {
    rate: BasisPoints,
}

impl CommissionConfig {
    pub fn new(rate: BasisPoints) -> Self {
        Self { rate }
    }

    pub fn rate(&self) -> BasisPoints {
        self.rate
    }

    /// Overwrite the rate, returning the previous one.
    pub fn set_rate(&mut self, rate: BasisPoints) -> BasisPoints {
        std::mem::replace(&mut self.rate, rate)
    }

    /// Convert `amount` at `destination_rate` net of commission.
    pub fn convert(
        &self,
        amount: Amount,
        destination_rate: BasisPoints,
    ) -> Result<Conversion, ChangerError> {
        let gross = destination_rate
            .apply_floor(amount)
            .ok_or(ChangerError::MathOverflow)?;
        let fee = self.rate.apply_ceil(gross).ok_or(ChangerError::MathOverflow)?;
        let amount_out = gross.checked_sub(fee).ok_or(ChangerError::MathOverflow)?;
        Ok(Conversion {
            amount_in: amount,
            gross,
            fee,
            amount_out,
        })
    }
}
