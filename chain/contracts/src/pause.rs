//! Pause switch gating swaps
//!
//! Two states, `Active` (initial) and `Paused`. Each transition is only valid
//! from the other state.

use serde::{Deserialize, Serialize};

use crate::errors::ChangerError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PauseState {
    #[default]
    Active,
    Paused,
}

#[derive(Debug, Clone, Default)]
pub struct PauseSwitch {
    state: PauseState,
}

impl PauseSwitch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Active → Paused.
    pub fn pause(&mut self) -> Result<(), ChangerError> {
        self.ensure_active()?;
        self.state = PauseState::Paused;
        Ok(())
    }

    /// Paused → Active.
    pub fn unpause(&mut self) -> Result<(), ChangerError> {
        if self.state != PauseState::Paused {
            return Err(ChangerError::ContractNotPaused);
        }
        self.state = PauseState::Active;
        Ok(())
    }

    /// Gate for operations that only run while Active.
    pub fn ensure_active(&self) -> Result<(), ChangerError> {
        if self.state == PauseState::Paused {
            return Err(ChangerError::ContractPaused);
        }
        Ok(())
    }

    pub fn state(&self) -> PauseState {
        self.state
    }

    pub fn is_paused(&self) -> bool {
        self.state == PauseState::Paused
    }
}
