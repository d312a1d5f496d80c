use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::errors::CoreError;

/// Built-in price table: (symbol, unit price in the display currency).
pub const DEFAULT_PRICES: [(&str, f64); 5] = [
    ("AAPL", 180.0),
    ("TSLA", 250.0),
    ("GOOGL", 2700.0),
    ("MSFT", 310.0),
    ("AMZN", 3300.0),
];

/// Fixed symbol → unit price table.
///
/// Built once at startup and read-only afterwards. Every symbol held in a
/// [`Portfolio`](super::portfolio::Portfolio) must have an entry here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceCatalog {
    prices: HashMap<String, f64>,
}

impl PriceCatalog {
    /// Build a catalog from arbitrary `(symbol, price)` pairs.
    ///
    /// Symbols are uppercased. Prices must be finite and positive.
    pub fn from_prices<S, I>(prices: I) -> Result<Self, CoreError>
    where
        S: Into<String>,
        I: IntoIterator<Item = (S, f64)>,
    {
        let mut map = HashMap::new();
        for (symbol, price) in prices {
            let symbol: String = symbol.into();
            let symbol = symbol.trim().to_uppercase();
            if symbol.is_empty() {
                return Err(CoreError::ValidationError(
                    "Catalog symbol must not be empty".into(),
                ));
            }
            if !price.is_finite() || price <= 0.0 {
                return Err(CoreError::ValidationError(format!(
                    "Price for {symbol} must be a positive number, got {price}"
                )));
            }
            map.insert(symbol, price);
        }
        Ok(Self { prices: map })
    }

    /// Unit price for `symbol`, or `None` if the symbol is not listed.
    /// Lookup is exact: callers normalise case before asking.
    #[must_use]
    pub fn price_of(&self, symbol: &str) -> Option<f64> {
        self.prices.get(symbol).copied()
    }

    #[must_use]
    pub fn contains(&self, symbol: &str) -> bool {
        self.prices.contains_key(symbol)
    }

    /// All listed symbols, sorted alphabetically.
    #[must_use]
    pub fn symbols(&self) -> Vec<&str> {
        let mut symbols: Vec<&str> = self.prices.keys().map(String::as_str).collect();
        symbols.sort_unstable();
        symbols
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

impl Default for PriceCatalog {
    fn default() -> Self {
        Self {
            prices: DEFAULT_PRICES
                .iter()
                .map(|(symbol, price)| ((*symbol).to_string(), *price))
                .collect(),
        }
    }
}
