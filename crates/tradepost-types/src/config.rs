//! Configuration for a Tradepost market.

use serde::{Deserialize, Serialize};

use crate::{AccountId, Result, TradepostError, constants};

/// Display metadata for the fungible currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyConfig {
    /// Human-readable name (e.g., "Tradepost Credit").
    pub name: String,
    /// Ticker symbol (e.g., "TPC").
    pub symbol: String,
    /// Decimal places used when displaying amounts.
    pub decimals: u8,
}

impl Default for CurrencyConfig {
    fn default() -> Self {
        Self {
            name: constants::DEFAULT_CURRENCY_NAME.to_string(),
            symbol: constants::DEFAULT_CURRENCY_SYMBOL.to_string(),
            decimals: constants::DEFAULT_DECIMALS,
        }
    }
}

/// Genesis configuration for a market.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketConfig {
    pub currency: CurrencyConfig,
    /// Holds both `Admin` and `Moderator` at genesis.
    pub genesis_admin: AccountId,
    /// Identity the settlement engine spends with. Buyers approve this
    /// account before calling `buy_item`.
    pub engine_account: AccountId,
}

impl MarketConfig {
    /// Config with the default currency.
    #[must_use]
    pub fn new(genesis_admin: AccountId, engine_account: AccountId) -> Self {
        Self {
            currency: CurrencyConfig::default(),
            genesis_admin,
            engine_account,
        }
    }

    /// Check the config for values the market cannot start with.
    ///
    /// # Errors
    /// Returns [`TradepostError::Configuration`] naming the first bad field.
    pub fn validate(&self) -> Result<()> {
        let symbol = &self.currency.symbol;
        if symbol.is_empty() || symbol.len() > constants::MAX_SYMBOL_LEN {
            return Err(TradepostError::Configuration(format!(
                "currency symbol must be 1..={} characters, got {:?}",
                constants::MAX_SYMBOL_LEN,
                symbol
            )));
        }
        if !symbol.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(TradepostError::Configuration(format!(
                "currency symbol must be ASCII alphanumeric, got {symbol:?}"
            )));
        }
        if self.currency.decimals > constants::MAX_DECIMALS {
            return Err(TradepostError::Configuration(format!(
                "currency decimals {} exceeds maximum {}",
                self.currency.decimals,
                constants::MAX_DECIMALS
            )));
        }
        if self.engine_account == self.genesis_admin {
            return Err(TradepostError::Configuration(
                "engine account must differ from the genesis admin".to_string(),
            ));
        }
        Ok(())
    }
}

/// Fixture config for tests. **Never use in production.**
#[cfg(any(test, feature = "test-helpers"))]
impl MarketConfig {
    /// Admin is `AccountId::named("admin")`, engine is
    /// `AccountId::named("engine")`.
    #[must_use]
    pub fn dummy() -> Self {
        Self::new(AccountId::named("admin"), AccountId::named("engine"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dummy_config_is_valid() {
        let cfg = MarketConfig::dummy();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.currency.symbol, "TPC");
    }

    #[test]
    fn empty_symbol_rejected() {
        let mut cfg = MarketConfig::dummy();
        cfg.currency.symbol = String::new();
        let err = cfg.validate().unwrap_err();
        assert!(matches!(err, TradepostError::Configuration(_)));
    }

    #[test]
    fn long_or_odd_symbol_rejected() {
        let mut cfg = MarketConfig::dummy();
        cfg.currency.symbol = "ABCDEFGHIJKL".to_string();
        assert!(cfg.validate().is_err());
        cfg.currency.symbol = "TP-C".to_string();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn too_many_decimals_rejected() {
        let mut cfg = MarketConfig::dummy();
        cfg.currency.decimals = 19;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn engine_cannot_be_admin() {
        let admin = AccountId::named("admin");
        let cfg = MarketConfig::new(admin, admin);
        let msg = cfg.validate().unwrap_err().to_string();
        assert!(msg.contains("TP_ERR_900"));
    }

    #[test]
    fn market_config_serde_roundtrip() {
        let cfg = MarketConfig::dummy();
        let json = serde_json::to_string(&cfg).unwrap();
        let back: MarketConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(cfg, back);
    }
}
