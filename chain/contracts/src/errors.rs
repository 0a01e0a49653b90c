//! Contract-specific error types
//!
//! Every error is a clean rejection of the current call: the host discards all
//! state changes of a failed operation, so no variant implies partial effects.

use thiserror::Error;
use types::ids::{Address, TokenId};
use types::numeric::{Amount, BasisPoints};

use crate::access::Role;

/// Errors raised by the in-memory token ledger.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Unknown token: {token}")]
    UnknownToken { token: TokenId },

    #[error("Insufficient balance of {token} for {holder}: required {required}, available {available}")]
    InsufficientBalance {
        token: TokenId,
        holder: Address,
        required: Amount,
        available: Amount,
    },

    #[error("Insufficient allowance of {token} from {owner} to {spender}: required {required}, approved {approved}")]
    InsufficientAllowance {
        token: TokenId,
        owner: Address,
        spender: Address,
        required: Amount,
        approved: Amount,
    },

    #[error("Unauthorized: {caller} cannot mint {token}")]
    MintUnauthorized { token: TokenId, caller: Address },

    #[error("Arithmetic overflow in balance calculation")]
    Overflow,
}

/// Errors raised by the changer contract.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChangerError {
    #[error("Unauthorized: {caller} lacks role {role}")]
    Unauthorized { role: Role, caller: Address },

    #[error("Cannot remove the last holder of role {role}")]
    LastAdmin { role: Role },

    #[error("Token not found: {token} (stable: {is_stable})")]
    TokenNotFound { token: TokenId, is_stable: bool },

    #[error("Stable token is not available: {token}")]
    StableTokenNotAvailable { token: TokenId },

    #[error("Synthetic token is not available: {token}")]
    SyntheticTokenNotAvailable { token: TokenId },

    #[error("Balance of stable token {token} is not enough: required {required}, available {available}")]
    BalanceOfStableIsNotEnough {
        token: TokenId,
        required: Amount,
        available: Amount,
    },

    #[error("Balance of synthetic token {token} is not enough: required {required}, available {available}")]
    BalanceOfSyntheticIsNotEnough {
        token: TokenId,
        required: Amount,
        available: Amount,
    },

    #[error("Contract is paused")]
    ContractPaused,

    #[error("Contract is not paused")]
    ContractNotPaused,

    #[error("Invalid token rate {rate}: maximum is {max}")]
    InvalidRate { rate: BasisPoints, max: BasisPoints },

    #[error("Invalid commission {rate}: maximum is {max}")]
    InvalidCommission { rate: BasisPoints, max: BasisPoints },

    #[error("Swap amount must be positive")]
    InvalidAmount,

    #[error("Invalid swap direction: {0} (expected 0 or 1)")]
    InvalidDirection(u8),

    #[error("Converted amount for input {amount} rounds to zero")]
    ConvertedAmountIsZero { amount: Amount },

    #[error("Arithmetic overflow in conversion")]
    MathOverflow,

    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),
}

/// Errors loading or validating a [`crate::config::ChangerConfig`].
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Malformed config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_changer_error_display() {
        let token = TokenId::new();
        let err = ChangerError::StableTokenNotAvailable { token };
        assert_eq!(
            err.to_string(),
            format!("Stable token is not available: {}", token)
        );
    }

    #[test]
    fn test_balance_error_mentions_amounts() {
        let err = ChangerError::BalanceOfSyntheticIsNotEnough {
            token: TokenId::new(),
            required: 500,
            available: 42,
        };
        assert!(err.to_string().contains("500"));
        assert!(err.to_string().contains("42"));
    }

    #[test]
    fn test_unauthorized_names_role() {
        let err = ChangerError::Unauthorized {
            role: Role::Stuff,
            caller: Address::new(),
        };
        assert!(err.to_string().contains("STUFF"));
    }

    #[test]
    fn test_changer_error_from_ledger() {
        let ledger_err = LedgerError::Overflow;
        let changer_err: ChangerError = ledger_err.into();
        assert!(matches!(changer_err, ChangerError::Ledger(LedgerError::Overflow)));
    }
}
