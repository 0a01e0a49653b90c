//! Token amounts and basis-point rates
//!
//! Balances are raw integer units (`u128`), so an 18-decimal token holds
//! amounts far beyond any realistic supply. Conversion between raw units and
//! human-readable decimals goes through `rust_decimal`, never through floats.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Raw token amount in the token's smallest unit.
pub type Amount = u128;

/// Denominator of the basis-point scale (100% = 10 000 bps).
pub const BPS_DENOMINATOR: u16 = 10_000;

/// Highest scale `rust_decimal` can represent.
const MAX_DECIMALS: u32 = 28;

/// A rate expressed in basis points.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct BasisPoints(u16);

impl BasisPoints {
    pub const ZERO: Self = Self(0);

    /// 100%
    pub const FULL: Self = Self(BPS_DENOMINATOR);

    pub const fn new(value: u16) -> Self {
        Self(value)
    }

    pub const fn get(self) -> u16 {
        self.0
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// `floor(amount * self / 10_000)`, `None` on overflow.
    pub fn apply_floor(self, amount: Amount) -> Option<Amount> {
        amount
            .checked_mul(Amount::from(self.0))
            .map(|scaled| scaled / Amount::from(BPS_DENOMINATOR))
    }

    /// `ceil(amount * self / 10_000)`, `None` on overflow.
    pub fn apply_ceil(self, amount: Amount) -> Option<Amount> {
        let denominator = Amount::from(BPS_DENOMINATOR);
        let scaled = amount.checked_mul(Amount::from(self.0))?;
        let quotient = scaled / denominator;
        if scaled % denominator == 0 {
            Some(quotient)
        } else {
            quotient.checked_add(1)
        }
    }
}

impl From<u16> for BasisPoints {
    fn from(value: u16) -> Self {
        Self(value)
    }
}

impl fmt::Display for BasisPoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} bps", self.0)
    }
}

/// Errors converting between decimal strings and raw units.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UnitsError {
    #[error("Invalid decimal number: {0}")]
    InvalidNumber(String),

    #[error("Negative amounts are not representable")]
    Negative,

    #[error("Value has {scale} fractional digits, token supports {decimals}")]
    TooPrecise { scale: u32, decimals: u32 },

    #[error("Unsupported decimals: {0} (max 28)")]
    UnsupportedDecimals(u32),

    #[error("Amount does not fit the target representation")]
    Overflow,
}

/// Parse a human-readable amount (`"1.5"`) into raw units for a token with
/// `decimals` fractional digits.
pub fn parse_units(value: &str, decimals: u32) -> Result<Amount, UnitsError> {
    if decimals > MAX_DECIMALS {
        return Err(UnitsError::UnsupportedDecimals(decimals));
    }
    let parsed = Decimal::from_str_exact(value.trim())
        .map_err(|_| UnitsError::InvalidNumber(value.to_string()))?
        .normalize();
    if parsed.is_sign_negative() && !parsed.is_zero() {
        return Err(UnitsError::Negative);
    }
    let scale = parsed.scale();
    if scale > decimals {
        return Err(UnitsError::TooPrecise { scale, decimals });
    }

    let mantissa: Amount = parsed.mantissa().unsigned_abs();
    let factor = 10u128
        .checked_pow(decimals - scale)
        .ok_or(UnitsError::Overflow)?;
    mantissa.checked_mul(factor).ok_or(UnitsError::Overflow)
}

/// Render raw units as a normalized decimal string (`1500000000000000000`
/// with 18 decimals is `"1.5"`).
pub fn format_units(amount: Amount, decimals: u32) -> Result<String, UnitsError> {
    if decimals > MAX_DECIMALS {
        return Err(UnitsError::UnsupportedDecimals(decimals));
    }
    let signed = i128::try_from(amount).map_err(|_| UnitsError::Overflow)?;
    let value = Decimal::try_from_i128_with_scale(signed, decimals)
        .map_err(|_| UnitsError::Overflow)?;
    Ok(value.normalize().to_string())
}
