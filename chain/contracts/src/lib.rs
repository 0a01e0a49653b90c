//! Stable/synthetic token changer contract
//!
//! A role-gated exchange that swaps registered stable tokens for registered
//! synthetic tokens (and back) at administrator-set rates, charging a
//! commission in basis points and settling on a fungible-token ledger.
//!
//! # Modules
//! - `access`: Roles and the role registry guarding privileged operations
//! - `registry`: Token registry (side and rate per token)
//! - `commission`: Commission rate and the swap conversion arithmetic
//! - `pause`: Global pause switch
//! - `swap`: Direction decoding and pair resolution
//! - `changer`: The contract itself
//! - `ledger`: Token ledger trait and an in-memory ERC-20-style ledger
//! - `host`: All-or-nothing execution over contract and ledger
//! - `config`: Deployment configuration
//! - `events`: Contract events
//! - `errors`: Contract-specific error types

pub mod access;
pub mod changer;
pub mod commission;
pub mod config;
pub mod errors;
pub mod events;
pub mod host;
pub mod ledger;
pub mod pause;
pub mod registry;
pub mod swap;

pub use access::Role;
pub use changer::Changer;
pub use errors::{ChangerError, ConfigError, LedgerError};
pub use host::Host;
pub use swap::Direction;

/// Contract ABI version, frozen after release
pub const CONTRACT_ABI_VERSION: &str = "1.0.0";
