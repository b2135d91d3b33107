//! Settlement reentrancy guard.
//!
//! Set when a buy starts, cleared when it finishes (whatever the result).
//! While set, the listing entry points (`list`, `cancel`, `buy`) refuse to
//! run, so a payment hook cannot re-purchase or re-price the listing that
//! is mid-settlement.

use tradepost_types::{Result, TradepostError};

/// In-progress flag for the settlement engine.
#[derive(Debug, Default)]
pub struct ReentrancyGuard {
    entered: bool,
}

impl ReentrancyGuard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a settlement as started.
    ///
    /// # Errors
    /// Returns [`TradepostError::ReentrantCall`] if one is already running.
    pub fn enter(&mut self) -> Result<()> {
        self.check()?;
        self.entered = true;
        Ok(())
    }

    /// Mark the running settlement as finished.
    pub fn exit(&mut self) {
        self.entered = false;
    }

    #[must_use]
    pub fn is_entered(&self) -> bool {
        self.entered
    }

    /// Fail if a settlement is in progress, without entering.
    ///
    /// # Errors
    /// Returns [`TradepostError::ReentrantCall`] while entered.
    pub fn check(&self) -> Result<()> {
        if self.entered {
            tracing::warn!("Reentrant call blocked: settlement in progress");
            Err(TradepostError::ReentrantCall)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_open() {
        let guard = ReentrancyGuard::new();
        assert!(!guard.is_entered());
        assert!(guard.check().is_ok());
    }

    #[test]
    fn second_enter_blocked() {
        let mut guard = ReentrancyGuard::new();
        guard.enter().unwrap();
        assert!(guard.is_entered());
        assert_eq!(guard.enter().unwrap_err(), TradepostError::ReentrantCall);
        assert!(guard.check().is_err());
    }

    #[test]
    fn exit_reopens() {
        let mut guard = ReentrancyGuard::new();
        guard.enter().unwrap();
        guard.exit();
        assert!(guard.check().is_ok());
        guard.enter().unwrap();
    }
}
