//! Transaction host
//!
//! Pairs a [`Changer`] with the ledger it settles on and runs each call as a
//! transaction: the call works on a copy of both, and the copy replaces the
//! live state only if the call returns `Ok`. A failed call leaves no trace,
//! including no partially applied transfer and no emitted event.

use tracing::warn;
use types::ids::{Address, TokenId};
use types::numeric::Amount;

use crate::changer::Changer;
use crate::errors::ChangerError;
use crate::events::ContractEvent;
use crate::ledger::TokenLedger;
use crate::swap::Direction;

#[derive(Debug, Clone)]
pub struct Host<L> {
    changer: Changer,
    ledger: L,
}

impl<L: TokenLedger + Clone> Host<L> {
    pub fn new(changer: Changer, ledger: L) -> Self {
        Self { changer, ledger }
    }

    /// Run `f` against copies of the contract and ledger, committing both
    /// on success and discarding both on error.
    pub fn transact<T>(
        &mut self,
        f: impl FnOnce(&mut Changer, &mut L) -> Result<T, ChangerError>,
    ) -> Result<T, ChangerError> {
        let mut changer = self.changer.clone();
        let mut ledger = self.ledger.clone();
        match f(&mut changer, &mut ledger) {
            Ok(value) => {
                self.changer = changer;
                self.ledger = ledger;
                Ok(value)
            }
            Err(err) => {
                warn!(error = %err, "Transaction reverted");
                Err(err)
            }
        }
    }

    /// Transactional [`Changer::swap`].
    pub fn swap(
        &mut self,
        caller: &Address,
        stable_token: &TokenId,
        synthetic_token: &TokenId,
        amount: Amount,
        direction: Direction,
    ) -> Result<ContractEvent, ChangerError> {
        self.transact(|changer, ledger| {
            changer.swap(ledger, caller, stable_token, synthetic_token, amount, direction)
        })
    }

    pub fn changer(&self) -> &Changer {
        &self.changer
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    /// Direct ledger access for calls that bypass the contract (mint, approve).
    pub fn ledger_mut(&mut self) -> &mut L {
        &mut self.ledger
    }

    pub fn into_parts(self) -> (Changer, L) {
        (self.changer, self.ledger)
    }
}
