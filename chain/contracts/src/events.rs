//! Contract events
//!
//! One event per committed state change, carrying every changed field so
//! indexers can rebuild contract state from the log alone.

use serde::{Deserialize, Serialize};
use types::ids::{Address, TokenId};
use types::numeric::{Amount, BasisPoints};

use crate::access::Role;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleGranted {
    pub role: Role,
    pub role_id: [u8; 32],
    pub account: Address,
    pub sender: Address,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleRevoked {
    pub role: Role,
    pub role_id: [u8; 32],
    pub account: Address,
    pub sender: Address,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenAdded {
    pub token: TokenId,
    pub is_stable: bool,
    pub rate: BasisPoints,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRemoved {
    pub token: TokenId,
    pub is_stable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRateChanged {
    pub token: TokenId,
    pub rate: BasisPoints,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommissionChanged {
    pub rate: BasisPoints,
}

/// Tokens swapped between a caller and the contract's holdings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokensExchanged {
    pub caller: Address,
    pub source_token: TokenId,
    pub destination_token: TokenId,
    pub amount_in: Amount,
    pub amount_out: Amount,
    pub commission: Amount,
}

/// Enum wrapper for all contract events, enabling uniform handling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContractEvent {
    RoleGranted(RoleGranted),
    RoleRevoked(RoleRevoked),
    TokenAdded(TokenAdded),
    TokenRemoved(TokenRemoved),
    TokenRateChanged(TokenRateChanged),
    CommissionChanged(CommissionChanged),
    Paused { account: Address },
    Unpaused { account: Address },
    TokensExchanged(TokensExchanged),
}

impl ContractEvent {
    pub fn name(&self) -> &'static str {
        match self {
            ContractEvent::RoleGranted(_) => "RoleGranted",
            ContractEvent::RoleRevoked(_) => "RoleRevoked",
            ContractEvent::TokenAdded(_) => "TokenAdded",
            ContractEvent::TokenRemoved(_) => "TokenRemoved",
            ContractEvent::TokenRateChanged(_) => "TokenRateChanged",
            ContractEvent::CommissionChanged(_) => "CommissionChanged",
            ContractEvent::Paused { .. } => "Paused",
            ContractEvent::Unpaused { .. } => "Unpaused",
            ContractEvent::TokensExchanged(_) => "TokensExchanged",
        }
    }
}
