//! Role-based access control
//!
//! Roles map to sets of principals (many-to-many). Every privileged contract
//! operation is an [`Action`]; [`AccessControl::authorize`] is the single
//! place that decides whether a caller may perform it.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use types::ids::Address;

use crate::errors::ChangerError;

/// Contract roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Top-level owner role: manages roles and the pause switch
    #[serde(rename = "DEFAULT_ADMIN")]
    Admin,
    /// May change registered token rates
    #[serde(rename = "RATE_CHANGERS")]
    RateChanger,
    /// Registry manager: adds/removes tokens and sets the commission
    #[serde(rename = "STUFF")]
    Stuff,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::RateChanger, Role::Stuff];

    /// Wire name of the role.
    pub fn name(self) -> &'static str {
        match self {
            Role::Admin => "DEFAULT_ADMIN",
            Role::RateChanger => "RATE_CHANGERS",
            Role::Stuff => "STUFF",
        }
    }

    /// Stable 32-byte identifier: SHA-256 of the wire name.
    ///
    /// Local to this crate. These ids do not equal the keccak-256 role
    /// hashes an EVM deployment would use for the same names.
    pub fn id(self) -> [u8; 32] {
        Sha256::digest(self.name().as_bytes()).into()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Privileged operations and the role each one requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    GrantRole,
    RevokeRole,
    AddToken,
    RemoveToken,
    ChangeCommission,
    ChangeTokenRate,
    Pause,
    Unpause,
}

impl Action {
    pub fn required_role(self) -> Role {
        match self {
            Action::GrantRole | Action::RevokeRole | Action::Pause | Action::Unpause => Role::Admin,
            Action::AddToken | Action::RemoveToken | Action::ChangeCommission => Role::Stuff,
            Action::ChangeTokenRate => Role::RateChanger,
        }
    }
}

/// Role membership registry.
#[derive(Debug, Clone, Default)]
pub struct AccessControl {
    members: HashMap<Role, BTreeSet<Address>>,
}

impl AccessControl {
    /// Create access control with `owner` holding [`Role::Admin`].
    pub fn new(owner: Address) -> Self {
        let mut members = HashMap::new();
        members.insert(Role::Admin, BTreeSet::from([owner]));
        Self { members }
    }

    pub fn has_role(&self, role: Role, account: &Address) -> bool {
        self.members
            .get(&role)
            .map_or(false, |holders| holders.contains(account))
    }

    /// Fail with `Unauthorized` unless `caller` may perform `action`.
    pub fn authorize(&self, action: Action, caller: &Address) -> Result<(), ChangerError> {
        let role = action.required_role();
        if !self.has_role(role, caller) {
            tracing::warn!(?action, %role, %caller, "Rejected unauthorized call");
            return Err(ChangerError::Unauthorized {
                role,
                caller: *caller,
            });
        }
        Ok(())
    }

    /// Grant `role` to `account`. Returns `true` if membership changed.
    pub fn grant_role(
        &mut self,
        caller: &Address,
        role: Role,
        account: Address,
    ) -> Result<bool, ChangerError> {
        self.authorize(Action::GrantRole, caller)?;
        Ok(self.members.entry(role).or_default().insert(account))
    }

    /// Revoke `role` from `account`. Returns `true` if membership changed.
    pub fn revoke_role(
        &mut self,
        caller: &Address,
        role: Role,
        account: &Address,
    ) -> Result<bool, ChangerError> {
        self.authorize(Action::RevokeRole, caller)?;
        self.remove_member(role, account)
    }

    /// Drop one of the caller's own roles. No privilege required.
    pub fn renounce_role(&mut self, caller: &Address, role: Role) -> Result<bool, ChangerError> {
        self.remove_member(role, caller)
    }

    /// Holders of `role` in address order.
    pub fn members(&self, role: Role) -> impl Iterator<Item = &Address> {
        self.members.get(&role).into_iter().flatten()
    }

    pub fn member_count(&self, role: Role) -> usize {
        self.members.get(&role).map_or(0, BTreeSet::len)
    }

    fn remove_member(&mut self, role: Role, account: &Address) -> Result<bool, ChangerError> {
        // The contract must always keep someone able to grant roles and unpause.
        if role == Role::Admin
            && self.has_role(Role::Admin, account)
            && self.member_count(Role::Admin) == 1
        {
            return Err(ChangerError::LastAdmin { role });
        }
        Ok(self
            .members
            .get_mut(&role)
            .map_or(false, |holders| holders.remove(account)))
    }
}
