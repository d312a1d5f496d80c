use serde::{Deserialize, Serialize};

use super::catalog::PriceCatalog;
use super::holding::HoldingLine;
use super::portfolio::Portfolio;

/// Snapshot of the portfolio's valuation: one line per holding plus the total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    /// Valuation rows in holding order
    pub lines: Vec<HoldingLine>,

    /// Sum of every line value
    pub total_value: f64,
}

impl PortfolioSummary {
    #[must_use]
    pub fn from_portfolio(portfolio: &Portfolio, catalog: &PriceCatalog) -> Self {
        let lines = portfolio.lines(catalog);
        let total_value = HoldingLine::total(&lines);
        Self { lines, total_value }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
