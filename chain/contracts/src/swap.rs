//! Swap routing: direction decoding, registry resolution and shortfall errors
//!
//! A swap always names its pair as `(stable_token, synthetic_token)`; the
//! direction only decides which of the two the caller pays in.

use serde::{Deserialize, Serialize};
use std::fmt;
use types::ids::TokenId;
use types::numeric::{Amount, BasisPoints};

use crate::errors::ChangerError;
use crate::registry::TokenRegistry;

/// Which way value flows through the pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Wire value `0`: caller pays synthetic, receives stable
    SyntheticToStable,
    /// Wire value `1`: caller pays stable, receives synthetic
    StableToSynthetic,
}

impl Direction {
    pub fn wire_value(self) -> u8 {
        match self {
            Direction::SyntheticToStable => 0,
            Direction::StableToSynthetic => 1,
        }
    }
}

impl TryFrom<u8> for Direction {
    type Error = ChangerError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Direction::SyntheticToStable),
            1 => Ok(Direction::StableToSynthetic),
            other => Err(ChangerError::InvalidDirection(other)),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::SyntheticToStable => f.write_str("synthetic->stable"),
            Direction::StableToSynthetic => f.write_str("stable->synthetic"),
        }
    }
}

/// A pair resolved against the registry for one direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapRoute {
    pub source: TokenId,
    pub destination: TokenId,
    pub source_is_stable: bool,
    /// Registered rate of the destination token
    pub destination_rate: BasisPoints,
}

impl SwapRoute {
    /// Resolve `(stable_token, synthetic_token)` for `direction`.
    ///
    /// The stable side is checked first, then the synthetic side.
    pub fn resolve(
        registry: &TokenRegistry,
        stable_token: &TokenId,
        synthetic_token: &TokenId,
        direction: Direction,
    ) -> Result<Self, ChangerError> {
        let stable = registry
            .get(stable_token)
            .filter(|record| record.is_available_as(true))
            .ok_or(ChangerError::StableTokenNotAvailable {
                token: *stable_token,
            })?;
        let synthetic = registry
            .get(synthetic_token)
            .filter(|record| record.is_available_as(false))
            .ok_or(ChangerError::SyntheticTokenNotAvailable {
                token: *synthetic_token,
            })?;

        Ok(match direction {
            Direction::StableToSynthetic => Self {
                source: *stable_token,
                destination: *synthetic_token,
                source_is_stable: true,
                destination_rate: synthetic.rate,
            },
            Direction::SyntheticToStable => Self {
                source: *synthetic_token,
                destination: *stable_token,
                source_is_stable: false,
                destination_rate: stable.rate,
            },
        })
    }

    /// Error for a caller holding less than `required` of the source token.
    pub fn source_shortfall(&self, required: Amount, available: Amount) -> ChangerError {
        shortfall(self.source_is_stable, self.source, required, available)
    }

    /// Error for contract holdings below `required` of the destination token.
    pub fn destination_shortfall(&self, required: Amount, available: Amount) -> ChangerError {
        shortfall(!self.source_is_stable, self.destination, required, available)
    }
}

fn shortfall(is_stable: bool, token: TokenId, required: Amount, available: Amount) -> ChangerError {
    if is_stable {
        ChangerError::BalanceOfStableIsNotEnough {
            token,
            required,
            available,
        }
    } else {
        ChangerError::BalanceOfSyntheticIsNotEnough {
            token,
            required,
            available,
        }
    }
}
