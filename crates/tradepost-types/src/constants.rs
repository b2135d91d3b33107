//! System-wide constants for the Tradepost exchange core.

/// Maximum length of a currency ticker symbol.
pub const MAX_SYMBOL_LEN: usize = 11;

/// Maximum number of display decimals for the currency.
pub const MAX_DECIMALS: u8 = 18;

/// Default currency display decimals.
pub const DEFAULT_DECIMALS: u8 = 18;

/// Default currency name.
pub const DEFAULT_CURRENCY_NAME: &str = "Tradepost Credit";

/// Default currency symbol.
pub const DEFAULT_CURRENCY_SYMBOL: &str = "TPC";

/// Version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine name.
pub const ENGINE_NAME: &str = "Tradepost";
