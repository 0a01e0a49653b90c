//! Types library for the token changer
//!
//! Identifier and numeric types shared by the contract layer and its callers.
//!
//! # Modules
//! - `ids`: Unique identifiers (Address, TokenId)
//! - `numeric`: Raw token amounts, basis points and decimal unit conversion

pub mod ids;
pub mod numeric;

// Library version constant
pub const LIB_VERSION: &str = "1.0.0";

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::ids::*;
    pub use crate::numeric::*;
}
