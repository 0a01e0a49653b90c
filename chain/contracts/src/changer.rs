//! Changer: role-gated exchange between stable and synthetic tokens
//!
//! The contract owns its role registry, token registry, commission and pause
//! switch, and holds token inventory under its own [`Address`] on a
//! [`TokenLedger`]. Callers swap against that inventory.
//!
//! Every privileged operation runs [`AccessControl::authorize`] before it
//! touches state; swaps validate pause state, registry, arithmetic and both
//! balances before the first transfer.

use tracing::{debug, info};
use types::ids::{Address, TokenId};
use types::numeric::{Amount, BasisPoints};

use crate::access::{AccessControl, Action, Role};
use crate::commission::{CommissionConfig, Conversion};
use crate::config::ChangerConfig;
use crate::errors::{ChangerError, ConfigError};
use crate::events::{
    CommissionChanged, ContractEvent, RoleGranted, RoleRevoked, TokenAdded, TokenRateChanged,
    TokenRemoved, TokensExchanged,
};
use crate::ledger::TokenLedger;
use crate::pause::{PauseState, PauseSwitch};
use crate::registry::{TokenRecord, TokenRegistry};
use crate::swap::{Direction, SwapRoute};

#[derive(Debug, Clone)]
pub struct Changer {
    /// Holder of the contract's own token inventory
    address: Address,
    config: ChangerConfig,
    access: AccessControl,
    registry: TokenRegistry,
    commission: CommissionConfig,
    pause: PauseSwitch,
    /// Emitted events log (append-only)
    events: Vec<ContractEvent>,
}

impl Changer {
    /// Deploy at `address` with default configuration; `owner` receives
    /// [`Role::Admin`]. The host assigns `address`.
    pub fn new(address: Address, owner: Address) -> Self {
        Self::build(address, owner, ChangerConfig::default())
    }

    /// Deploy with a validated configuration.
    pub fn with_config(
        address: Address,
        owner: Address,
        config: ChangerConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(address, owner, config))
    }

    fn build(address: Address, owner: Address, config: ChangerConfig) -> Self {
        info!(%address, %owner, commission = %config.initial_commission_bps, "Changer deployed");
        Self {
            address,
            commission: CommissionConfig::new(config.initial_commission_bps),
            config,
            access: AccessControl::new(owner),
            registry: TokenRegistry::new(),
            pause: PauseSwitch::new(),
            events: Vec::new(),
        }
    }

    // ───────────────────────── Roles ─────────────────────────

    pub fn has_role(&self, role: Role, account: &Address) -> bool {
        self.access.has_role(role, account)
    }

    /// Grant `role` to `account`. Admin-only. Returns `true` if the
    /// membership changed (and an event was emitted).
    pub fn grant_role(
        &mut self,
        caller: &Address,
        role: Role,
        account: Address,
    ) -> Result<bool, ChangerError> {
        let changed = self.access.grant_role(caller, role, account)?;
        if changed {
            info!(%role, %account, sender = %caller, "Role granted");
            self.events.push(ContractEvent::RoleGranted(RoleGranted {
                role,
                role_id: role.id(),
                account,
                sender: *caller,
            }));
        }
        Ok(changed)
    }

    /// Revoke `role` from `account`. Admin-only.
    pub fn revoke_role(
        &mut self,
        caller: &Address,
        role: Role,
        account: &Address,
    ) -> Result<bool, ChangerError> {
        let changed = self.access.revoke_role(caller, role, account)?;
        if changed {
            info!(%role, %account, sender = %caller, "Role revoked");
            self.push_revoked(role, *account, *caller);
        }
        Ok(changed)
    }

    /// Drop one of the caller's own roles.
    pub fn renounce_role(&mut self, caller: &Address, role: Role) -> Result<bool, ChangerError> {
        let changed = self.access.renounce_role(caller, role)?;
        if changed {
            info!(%role, account = %caller, "Role renounced");
            self.push_revoked(role, *caller, *caller);
        }
        Ok(changed)
    }

    fn push_revoked(&mut self, role: Role, account: Address, sender: Address) {
        self.events.push(ContractEvent::RoleRevoked(RoleRevoked {
            role,
            role_id: role.id(),
            account,
            sender,
        }));
    }

    // ───────────────────────── Token Registry ─────────────────────────

    /// Register (or re-register) a token. Registry-manager only.
    pub fn add_token(
        &mut self,
        caller: &Address,
        token: TokenId,
        is_stable: bool,
        rate: BasisPoints,
    ) -> Result<ContractEvent, ChangerError> {
        self.access.authorize(Action::AddToken, caller)?;
        self.check_rate(rate)?;

        self.registry.add(token, is_stable, rate);
        info!(%token, is_stable, %rate, "Token added");
        Ok(self.emit(ContractEvent::TokenAdded(TokenAdded {
            token,
            is_stable,
            rate,
        })))
    }

    /// Deregister a token; `is_stable` must match its registered side.
    pub fn remove_token(
        &mut self,
        caller: &Address,
        token: &TokenId,
        is_stable: bool,
    ) -> Result<ContractEvent, ChangerError> {
        self.access.authorize(Action::RemoveToken, caller)?;

        self.registry.remove(token, is_stable)?;
        info!(%token, is_stable, "Token removed");
        Ok(self.emit(ContractEvent::TokenRemoved(TokenRemoved {
            token: *token,
            is_stable,
        })))
    }

    /// Change a registered token's rate. Rate-changer only.
    pub fn change_token_rate(
        &mut self,
        caller: &Address,
        token: &TokenId,
        rate: BasisPoints,
    ) -> Result<ContractEvent, ChangerError> {
        self.access.authorize(Action::ChangeTokenRate, caller)?;
        self.check_rate(rate)?;

        self.registry.change_rate(token, rate)?;
        info!(%token, %rate, "Token rate changed");
        Ok(self.emit(ContractEvent::TokenRateChanged(TokenRateChanged {
            token: *token,
            rate,
        })))
    }

    pub fn token(&self, token: &TokenId) -> Option<&TokenRecord> {
        self.registry.get(token)
    }

    pub fn registry(&self) -> &TokenRegistry {
        &self.registry
    }

    fn check_rate(&self, rate: BasisPoints) -> Result<(), ChangerError> {
        if rate > self.config.max_rate_bps {
            return Err(ChangerError::InvalidRate {
                rate,
                max: self.config.max_rate_bps,
            });
        }
        Ok(())
    }

    // ───────────────────────── Commission ─────────────────────────

    /// Overwrite the commission. Registry-manager only.
    pub fn change_commission(
        &mut self,
        caller: &Address,
        rate: BasisPoints,
    ) -> Result<ContractEvent, ChangerError> {
        self.access.authorize(Action::ChangeCommission, caller)?;
        if rate > self.config.max_commission_bps {
            return Err(ChangerError::InvalidCommission {
                rate,
                max: self.config.max_commission_bps,
            });
        }

        let previous = self.commission.set_rate(rate);
        info!(%previous, %rate, "Commission changed");
        Ok(self.emit(ContractEvent::CommissionChanged(CommissionChanged { rate })))
    }

    pub fn commission(&self) -> BasisPoints {
        self.commission.rate()
    }

    // ───────────────────────── Pause ─────────────────────────

    /// Halt swaps. Admin-only.
    pub fn pause(&mut self, caller: &Address) -> Result<ContractEvent, ChangerError> {
        self.access.authorize(Action::Pause, caller)?;
        self.pause.pause()?;
        info!(account = %caller, "Contract paused");
        Ok(self.emit(ContractEvent::Paused { account: *caller }))
    }

    /// Resume swaps. Admin-only.
    pub fn unpause(&mut self, caller: &Address) -> Result<ContractEvent, ChangerError> {
        self.access.authorize(Action::Unpause, caller)?;
        self.pause.unpause()?;
        info!(account = %caller, "Contract unpaused");
        Ok(self.emit(ContractEvent::Unpaused { account: *caller }))
    }

    pub fn is_paused(&self) -> bool {
        self.pause.is_paused()
    }

    pub fn pause_state(&self) -> PauseState {
        self.pause.state()
    }

    // ───────────────────────── Swap ─────────────────────────

    /// Price a swap without moving any balance.
    pub fn quote(
        &self,
        stable_token: &TokenId,
        synthetic_token: &TokenId,
        amount: Amount,
        direction: Direction,
    ) -> Result<Conversion, ChangerError> {
        self.price(stable_token, synthetic_token, amount, direction)
            .map(|(_, conversion)| conversion)
    }

    /// Swap `amount` of the source side of the pair for the commission-net
    /// converted amount of the other side.
    ///
    /// The caller must have approved the contract's address for `amount` of
    /// the source token beforehand. Both transfers run on a copy of the
    /// ledger that replaces `ledger` only once both succeed, so a rejected
    /// transfer leaves every balance and allowance untouched.
    pub fn swap<L: TokenLedger + Clone>(
        &mut self,
        ledger: &mut L,
        caller: &Address,
        stable_token: &TokenId,
        synthetic_token: &TokenId,
        amount: Amount,
        direction: Direction,
    ) -> Result<ContractEvent, ChangerError> {
        let (route, conversion) = self.price(stable_token, synthetic_token, amount, direction)?;

        let caller_balance = ledger.balance_of(&route.source, caller)?;
        if caller_balance < amount {
            return Err(route.source_shortfall(amount, caller_balance));
        }
        let holdings = ledger.balance_of(&route.destination, &self.address)?;
        if holdings < conversion.amount_out {
            return Err(route.destination_shortfall(conversion.amount_out, holdings));
        }

        let mut staged = ledger.clone();
        staged.transfer_from(&route.source, &self.address, caller, &self.address, amount)?;
        staged.transfer(&route.destination, &self.address, caller, conversion.amount_out)?;
        *ledger = staged;

        info!(
            %caller,
            %direction,
            source = %route.source,
            destination = %route.destination,
            amount_in = %conversion.amount_in,
            amount_out = %conversion.amount_out,
            fee = %conversion.fee,
            "Tokens exchanged"
        );
        Ok(self.emit(ContractEvent::TokensExchanged(TokensExchanged {
            caller: *caller,
            source_token: route.source,
            destination_token: route.destination,
            amount_in: conversion.amount_in,
            amount_out: conversion.amount_out,
            commission: conversion.fee,
        })))
    }

    /// Pause gate, amount check, registry resolution and conversion.
    fn price(
        &self,
        stable_token: &TokenId,
        synthetic_token: &TokenId,
        amount: Amount,
        direction: Direction,
    ) -> Result<(SwapRoute, Conversion), ChangerError> {
        self.pause.ensure_active()?;
        if amount == 0 {
            return Err(ChangerError::InvalidAmount);
        }

        let route = SwapRoute::resolve(&self.registry, stable_token, synthetic_token, direction)?;
        let conversion = self.commission.convert(amount, route.destination_rate)?;
        if conversion.amount_out == 0 {
            return Err(ChangerError::ConvertedAmountIsZero { amount });
        }
        debug!(%direction, amount = %amount, amount_out = %conversion.amount_out, "Swap priced");
        Ok((route, conversion))
    }

    // ───────────────────────── Contract state ─────────────────────────

    /// Address holding the contract's token inventory.
    pub fn address(&self) -> Address {
        self.address
    }

    pub fn config(&self) -> &ChangerConfig {
        &self.config
    }

    /// Get all emitted events.
    pub fn events(&self) -> &[ContractEvent] {
        &self.events
    }

    /// Drain all events (consume and clear).
    pub fn drain_events(&mut self) -> Vec<ContractEvent> {
        std::mem::take(&mut self.events)
    }

    fn emit(&mut self, event: ContractEvent) -> ContractEvent {
        self.events.push(event.clone());
        event
    }
}
