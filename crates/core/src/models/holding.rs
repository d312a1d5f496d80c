use serde::{Deserialize, Serialize};

/// A (symbol, quantity) pair owned by the portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    /// Ticker symbol, uppercased (e.g., "AAPL")
    pub symbol: String,

    /// Accumulated quantity held
    pub quantity: f64,
}

impl Holding {
    pub fn new(symbol: impl Into<String>, quantity: f64) -> Self {
        Self {
            symbol: symbol.into(),
            quantity,
        }
    }
}

/// One row of the valuation table. Derived on demand from a [`Holding`] and
/// the catalog price; never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoldingLine {
    pub symbol: String,
    pub quantity: f64,
    pub unit_price: f64,
    /// quantity × unit_price
    pub line_value: f64,
}

impl HoldingLine {
    pub fn new(symbol: impl Into<String>, quantity: f64, unit_price: f64) -> Self {
        Self {
            symbol: symbol.into(),
            quantity,
            unit_price,
            line_value: quantity * unit_price,
        }
    }

    /// Sum of `line_value` over `lines`. Folds from `+0.0`, so an empty slice
    /// totals `0.0`, not `-0.0`.
    #[must_use]
    pub fn total(lines: &[HoldingLine]) -> f64 {
        lines.iter().fold(0.0, |acc, l| acc + l.line_value)
    }
}
