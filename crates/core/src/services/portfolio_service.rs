use std::path::Path;

use tracing::{debug, info};

use crate::errors::CoreError;
use crate::models::catalog::PriceCatalog;
use crate::models::holding::Holding;
use crate::models::portfolio::Portfolio;
use crate::models::summary::PortfolioSummary;
use crate::storage::manager::StorageManager;

/// Validated portfolio mutation and persistence.
///
/// Takes raw user text for new holdings and turns every failure into a
/// [`CoreError`] with a message fit to show the user. No operation leaves the
/// portfolio half-changed: a failed add, load or import keeps the previous
/// holdings.
pub struct PortfolioService {
    catalog: PriceCatalog,
}

impl PortfolioService {
    pub fn new(catalog: PriceCatalog) -> Self {
        Self { catalog }
    }

    /// The price table every holding is checked and valued against.
    #[must_use]
    pub fn catalog(&self) -> &PriceCatalog {
        &self.catalog
    }

    /// Add a holding from user input.
    ///
    /// The symbol is trimmed and uppercased; the quantity must parse as a
    /// finite number greater than zero. The symbol is checked first, so bad
    /// input in both fields reports `InvalidSymbol`.
    pub fn add_holding(
        &self,
        portfolio: &mut Portfolio,
        symbol_text: &str,
        quantity_text: &str,
    ) -> Result<Holding, CoreError> {
        let symbol = symbol_text.trim().to_uppercase();
        if !self.catalog.contains(&symbol) {
            return Err(CoreError::InvalidSymbol(symbol));
        }
        let quantity = Self::parse_quantity(quantity_text)?;
        portfolio.add_holding(&self.catalog, &symbol, quantity)
    }

    /// Valuation lines and total for display.
    #[must_use]
    pub fn summary(&self, portfolio: &Portfolio) -> PortfolioSummary {
        PortfolioSummary::from_portfolio(portfolio, &self.catalog)
    }

    /// Total value of every holding at catalog prices.
    #[must_use]
    pub fn total_value(&self, portfolio: &Portfolio) -> f64 {
        portfolio.total_value(&self.catalog)
    }

    /// Write the portfolio to `destination` as CSV.
    ///
    /// An empty portfolio is refused before anything touches the filesystem.
    pub fn save(&self, portfolio: &Portfolio, destination: impl AsRef<Path>) -> Result<(), CoreError> {
        let destination = destination.as_ref();
        if portfolio.is_empty() {
            return Err(CoreError::EmptyPortfolio);
        }
        StorageManager::save_to_file(portfolio, &self.catalog, destination)?;
        info!(path = %destination.display(), holdings = portfolio.len(), "portfolio saved");
        Ok(())
    }

    /// Replace the portfolio with the holdings read from `source`.
    /// Returns the number of holdings loaded.
    pub fn load(&self, portfolio: &mut Portfolio, source: impl AsRef<Path>) -> Result<usize, CoreError> {
        let source = source.as_ref();
        let entries = StorageManager::load_from_file(source, &self.catalog)?;
        portfolio.replace_all(&self.catalog, entries)?;
        info!(path = %source.display(), holdings = portfolio.len(), "portfolio loaded");
        Ok(portfolio.len())
    }

    /// Encode the portfolio to CSV bytes. Same rules as [`Self::save`].
    pub fn export(&self, portfolio: &Portfolio) -> Result<Vec<u8>, CoreError> {
        if portfolio.is_empty() {
            return Err(CoreError::EmptyPortfolio);
        }
        Ok(StorageManager::save_to_bytes(portfolio, &self.catalog))
    }

    /// Replace the portfolio with holdings decoded from CSV bytes.
    /// Same rules as [`Self::load`].
    pub fn import(&self, portfolio: &mut Portfolio, data: &[u8]) -> Result<usize, CoreError> {
        let entries = StorageManager::load_from_bytes(data, &self.catalog)?;
        portfolio.replace_all(&self.catalog, entries)?;
        debug!(holdings = portfolio.len(), "portfolio imported");
        Ok(portfolio.len())
    }

    /// Remove every holding. Asking the user to confirm is the caller's job.
    pub fn clear(&self, portfolio: &mut Portfolio) {
        portfolio.clear();
        debug!("portfolio cleared");
    }

    /// Parse a user-entered quantity: finite and strictly positive.
    fn parse_quantity(text: &str) -> Result<f64, CoreError> {
        let trimmed = text.trim();
        match trimmed.parse::<f64>() {
            Ok(q) if q.is_finite() && q > 0.0 => Ok(q),
            _ => Err(CoreError::InvalidQuantity(trimmed.to_string())),
        }
    }
}

impl Default for PortfolioService {
    fn default() -> Self {
        Self::new(PriceCatalog::default())
    }
}
