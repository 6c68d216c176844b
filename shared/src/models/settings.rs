//! Application settings

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Default USD to ETB rate used until the operator saves one
pub const DEFAULT_EXCHANGE_RATE_USD_ETB: i64 = 115;

/// Single settings record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    /// Seed for the `exchange_rate` of new orders. Never applied to existing ones.
    #[serde(rename = "exchangeRateUSD_ETB")]
    pub exchange_rate_usd_etb: Decimal,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            exchange_rate_usd_etb: Decimal::from(DEFAULT_EXCHANGE_RATE_USD_ETB),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_wire_name() {
        let value = serde_json::to_value(Settings::default()).unwrap();
        assert!(value.get("exchangeRateUSD_ETB").is_some());
    }
}
