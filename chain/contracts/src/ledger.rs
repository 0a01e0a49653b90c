//! Token ledgers the contract moves balances on
//!
//! [`TokenLedger`] is the seam to the host's fungible-token state. The
//! contract never writes balances directly; it asks the ledger to transfer.
//! [`InMemoryLedger`] is a multi-token ERC-20-style implementation:
//! owner-minted supply, per-holder balances and spender allowances.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use types::ids::{Address, TokenId};
use types::numeric::Amount;

use crate::errors::LedgerError;

/// Balance-transfer interface the contract calls into.
pub trait TokenLedger {
    fn balance_of(&self, token: &TokenId, holder: &Address) -> Result<Amount, LedgerError>;

    fn allowance(
        &self,
        token: &TokenId,
        owner: &Address,
        spender: &Address,
    ) -> Result<Amount, LedgerError>;

    /// Move `amount` from `from` to `to` on `from`'s own authority.
    fn transfer(
        &mut self,
        token: &TokenId,
        from: &Address,
        to: &Address,
        amount: Amount,
    ) -> Result<(), LedgerError>;

    /// Move `amount` from `owner` to `to`, spending the allowance `owner`
    /// granted to `spender`.
    fn transfer_from(
        &mut self,
        token: &TokenId,
        spender: &Address,
        owner: &Address,
        to: &Address,
        amount: Amount,
    ) -> Result<(), LedgerError>;
}

/// Descriptive data of a token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenMetadata {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    /// Only this address may mint new supply
    pub minter: Address,
}

#[derive(Debug, Clone)]
struct TokenState {
    metadata: TokenMetadata,
    total_supply: Amount,
    balances: HashMap<Address, Amount>,
    /// (owner, spender) -> remaining allowance
    allowances: HashMap<(Address, Address), Amount>,
}

impl TokenState {
    fn balance(&self, holder: &Address) -> Amount {
        self.balances.get(holder).copied().unwrap_or(0)
    }

    fn allowance(&self, owner: &Address, spender: &Address) -> Amount {
        self.allowances
            .get(&(*owner, *spender))
            .copied()
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryLedger {
    tokens: HashMap<TokenId, TokenState>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deploy a new token with zero supply.
    pub fn create_token(&mut self, metadata: TokenMetadata) -> TokenId {
        let token = TokenId::new();
        tracing::debug!(%token, symbol = %metadata.symbol, "Token created");
        self.tokens.insert(
            token,
            TokenState {
                metadata,
                total_supply: 0,
                balances: HashMap::new(),
                allowances: HashMap::new(),
            },
        );
        token
    }

    pub fn metadata(&self, token: &TokenId) -> Option<&TokenMetadata> {
        self.tokens.get(token).map(|state| &state.metadata)
    }

    pub fn total_supply(&self, token: &TokenId) -> Result<Amount, LedgerError> {
        Ok(self.state(token)?.total_supply)
    }

    /// Mint `amount` to `to`. Only the token's minter may call this.
    pub fn mint(
        &mut self,
        caller: &Address,
        token: &TokenId,
        to: &Address,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        let state = self.state_mut(token)?;
        if state.metadata.minter != *caller {
            return Err(LedgerError::MintUnauthorized {
                token: *token,
                caller: *caller,
            });
        }
        let supply = state
            .total_supply
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        let balance = state
            .balance(to)
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        state.total_supply = supply;
        state.balances.insert(*to, balance);
        Ok(())
    }

    /// Set the allowance `owner` grants `spender`. `Amount::MAX` never
    /// decreases when spent.
    pub fn approve(
        &mut self,
        token: &TokenId,
        owner: &Address,
        spender: &Address,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        let state = self.state_mut(token)?;
        state.allowances.insert((*owner, *spender), amount);
        Ok(())
    }

    fn state(&self, token: &TokenId) -> Result<&TokenState, LedgerError> {
        self.tokens
            .get(token)
            .ok_or(LedgerError::UnknownToken { token: *token })
    }

    fn state_mut(&mut self, token: &TokenId) -> Result<&mut TokenState, LedgerError> {
        self.tokens
            .get_mut(token)
            .ok_or(LedgerError::UnknownToken { token: *token })
    }

    /// Debit `from` and credit `to`, validating both sides before writing.
    fn move_balance(
        state: &mut TokenState,
        token: &TokenId,
        from: &Address,
        to: &Address,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        let available = state.balance(from);
        if available < amount {
            return Err(LedgerError::InsufficientBalance {
                token: *token,
                holder: *from,
                required: amount,
                available,
            });
        }
        if from == to {
            return Ok(());
        }
        let credited = state
            .balance(to)
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        state.balances.insert(*from, available - amount);
        state.balances.insert(*to, credited);
        Ok(())
    }
}

impl TokenLedger for InMemoryLedger {
    fn balance_of(&self, token: &TokenId, holder: &Address) -> Result<Amount, LedgerError> {
        Ok(self.state(token)?.balance(holder))
    }

    fn allowance(
        &self,
        token: &TokenId,
        owner: &Address,
        spender: &Address,
    ) -> Result<Amount, LedgerError> {
        Ok(self.state(token)?.allowance(owner, spender))
    }

    fn transfer(
        &mut self,
        token: &TokenId,
        from: &Address,
        to: &Address,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        let state = self.state_mut(token)?;
        Self::move_balance(state, token, from, to, amount)?;
        tracing::debug!(%token, %from, %to, amount = %amount, "Transfer");
        Ok(())
    }

    fn transfer_from(
        &mut self,
        token: &TokenId,
        spender: &Address,
        owner: &Address,
        to: &Address,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        let state = self.state_mut(token)?;
        let approved = state.allowance(owner, spender);
        if approved < amount {
            return Err(LedgerError::InsufficientAllowance {
                token: *token,
                owner: *owner,
                spender: *spender,
                required: amount,
                approved,
            });
        }
        Self::move_balance(state, token, owner, to, amount)?;
        if approved != Amount::MAX {
            state
                .allowances
                .insert((*owner, *spender), approved - amount);
        }
        tracing::debug!(%token, %spender, %owner, %to, amount = %amount, "Transfer from");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (InMemoryLedger, TokenId, Address) {
        let mut ledger = InMemoryLedger::new();
        let owner = Address::new();
        let token = ledger.create_token(TokenMetadata {
            name: "TEST USDT".to_string(),
            symbol: "USDT".to_string(),
            decimals: 18,
            minter: owner,
        });
        (ledger, token, owner)
    }

    #[test]
    fn test_mint_and_balance() {
        let (mut ledger, token, owner) = setup();
        let acc = Address::new();
        ledger.mint(&owner, &token, &acc, 500).unwrap();
        assert_eq!(ledger.balance_of(&token, &acc).unwrap(), 500);
        assert_eq!(ledger.total_supply(&token).unwrap(), 500);
        assert_eq!(ledger.metadata(&token).unwrap().symbol, "USDT");
    }

    #[test]
    fn test_mint_unauthorized() {
        let (mut ledger, token, _) = setup();
        let intruder = Address::new();
        let result = ledger.mint(&intruder, &token, &intruder, 1);
        assert!(matches!(result, Err(LedgerError::MintUnauthorized { .. })));
        assert_eq!(ledger.total_supply(&token).unwrap(), 0);
    }

    #[test]
    fn test_transfer() {
        let (mut ledger, token, owner) = setup();
        let a = Address::new();
        let b = Address::new();
        ledger.mint(&owner, &token, &a, 10).unwrap();
        ledger.transfer(&token, &a, &b, 4).unwrap();
        assert_eq!(ledger.balance_of(&token, &a).unwrap(), 6);
        assert_eq!(ledger.balance_of(&token, &b).unwrap(), 4);
    }

    #[test]
    fn test_transfer_insufficient_balance_leaves_state() {
        let (mut ledger, token, owner) = setup();
        let a = Address::new();
        let b = Address::new();
        ledger.mint(&owner, &token, &a, 3).unwrap();
        let result = ledger.transfer(&token, &a, &b, 4);
        assert!(matches!(
            result,
            Err(LedgerError::InsufficientBalance {
                required: 4,
                available: 3,
                ..
            })
        ));
        assert_eq!(ledger.balance_of(&token, &a).unwrap(), 3);
        assert_eq!(ledger.balance_of(&token, &b).unwrap(), 0);
    }

    #[test]
    fn test_self_transfer_is_noop() {
        let (mut ledger, token, owner) = setup();
        let a = Address::new();
        ledger.mint(&owner, &token, &a, 3).unwrap();
        ledger.transfer(&token, &a, &a, 3).unwrap();
        assert_eq!(ledger.balance_of(&token, &a).unwrap(), 3);
    }

    #[test]
    fn test_transfer_from_spends_allowance() {
        let (mut ledger, token, owner) = setup();
        let holder = Address::new();
        let spender = Address::new();
        ledger.mint(&owner, &token, &holder, 10).unwrap();
        ledger.approve(&token, &holder, &spender, 6).unwrap();

        ledger
            .transfer_from(&token, &spender, &holder, &spender, 4)
            .unwrap();
        assert_eq!(ledger.allowance(&token, &holder, &spender).unwrap(), 2);
        assert_eq!(ledger.balance_of(&token, &spender).unwrap(), 4);

        let result = ledger.transfer_from(&token, &spender, &holder, &spender, 3);
        assert!(matches!(
            result,
            Err(LedgerError::InsufficientAllowance {
                required: 3,
                approved: 2,
                ..
            })
        ));
        assert_eq!(ledger.balance_of(&token, &holder).unwrap(), 6);
    }

    #[test]
    fn test_unlimited_allowance_not_decremented() {
        let (mut ledger, token, owner) = setup();
        let holder = Address::new();
        let spender = Address::new();
        ledger.mint(&owner, &token, &holder, 10).unwrap();
        ledger
            .approve(&token, &holder, &spender, Amount::MAX)
            .unwrap();
        ledger
            .transfer_from(&token, &spender, &holder, &spender, 10)
            .unwrap();
        assert_eq!(
            ledger.allowance(&token, &holder, &spender).unwrap(),
            Amount::MAX
        );
    }

    #[test]
    fn test_unknown_token() {
        let ledger = InMemoryLedger::new();
        let token = TokenId::new();
        assert_eq!(
            ledger.balance_of(&token, &Address::new()),
            Err(LedgerError::UnknownToken { token })
        );
    }

    #[test]
    fn test_mint_overflow() {
        let (mut ledger, token, owner) = setup();
        let a = Address::new();
        ledger.mint(&owner, &token, &a, Amount::MAX).unwrap();
        assert_eq!(
            ledger.mint(&owner, &token, &a, 1),
            Err(LedgerError::Overflow)
        );
        assert_eq!(ledger.balance_of(&token, &a).unwrap(), Amount::MAX);
    }
}
