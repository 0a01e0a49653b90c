//! Token registry: which tokens may be swapped, and on which side at what rate
//!
//! Role checks happen in the contract before these methods are reached; the
//! registry itself only enforces record-level invariants.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use types::ids::TokenId;
use types::numeric::BasisPoints;

use crate::errors::ChangerError;

/// Registration record of a swappable token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRecord {
    pub is_stable: bool,
    pub rate: BasisPoints,
    pub registered: bool,
}

impl TokenRecord {
    pub fn new(is_stable: bool, rate: BasisPoints) -> Self {
        Self {
            is_stable,
            rate,
            registered: true,
        }
    }

    /// Registered on the requested side of a pair.
    pub fn is_available_as(&self, is_stable: bool) -> bool {
        self.registered && self.is_stable == is_stable
    }
}

#[derive(Debug, Clone, Default)]
pub struct TokenRegistry {
    records: BTreeMap<TokenId, TokenRecord>,
}

impl TokenRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create or overwrite the record for `token`.
    pub fn add(&mut self, token: TokenId, is_stable: bool, rate: BasisPoints) -> TokenRecord {
        let record = TokenRecord::new(is_stable, rate);
        self.records.insert(token, record);
        record
    }

    /// Deregister `token`; the stored side must match `is_stable`.
    ///
    /// The record stays in the map flagged unregistered, so it reads as
    /// absent until `add` registers the token again.
    pub fn remove(&mut self, token: &TokenId, is_stable: bool) -> Result<TokenRecord, ChangerError> {
        match self.records.get_mut(token) {
            Some(record) if record.is_available_as(is_stable) => {
                record.registered = false;
                Ok(*record)
            }
            _ => Err(ChangerError::TokenNotFound {
                token: *token,
                is_stable,
            }),
        }
    }

    /// Update the rate of a registered token.
    pub fn change_rate(
        &mut self,
        token: &TokenId,
        rate: BasisPoints,
    ) -> Result<TokenRecord, ChangerError> {
        match self.records.get_mut(token) {
            Some(record) if record.registered => {
                record.rate = rate;
                Ok(*record)
            }
            Some(record) => Err(ChangerError::TokenNotFound {
                token: *token,
                is_stable: record.is_stable,
            }),
            None => Err(ChangerError::TokenNotFound {
                token: *token,
                is_stable: false,
            }),
        }
    }

    /// Registered record for `token`; unregistered entries read as absent.
    pub fn get(&self, token: &TokenId) -> Option<&TokenRecord> {
        self.records.get(token).filter(|record| record.registered)
    }

    pub fn is_available(&self, token: &TokenId, is_stable: bool) -> bool {
        self.get(token)
            .map_or(false, |record| record.is_available_as(is_stable))
    }

    /// Registered tokens of one side, in id order.
    pub fn tokens(&self, is_stable: bool) -> impl Iterator<Item = (&TokenId, &TokenRecord)> {
        self.records
            .iter()
            .filter(move |(_, record)| record.is_available_as(is_stable))
    }

    pub fn len(&self) -> usize {
        self.records.values().filter(|r| r.registered).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
