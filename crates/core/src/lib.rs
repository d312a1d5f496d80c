pub mod errors;
pub mod models;
pub mod services;
pub mod storage;

use models::{
    catalog::PriceCatalog,
    holding::{Holding, HoldingLine},
    portfolio::Portfolio,
    settings::Settings,
    summary::PortfolioSummary,
};
use services::{portfolio_service::PortfolioService, report_service::ReportService};
use std::path::{Path, PathBuf};

use errors::CoreError;

/// Main entry point for the Stock Portfolio Tracker core library.
/// Owns the portfolio and the services needed to operate on it.
#[must_use]
pub struct StockTracker {
    portfolio: Portfolio,
    portfolio_service: PortfolioService,
    report_service: ReportService,
    settings: Settings,
    /// Tracks whether any mutation has occurred since the last save/load.
    dirty: bool,
}

impl std::fmt::Debug for StockTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StockTracker")
            .field("holdings", &self.portfolio.len())
            .field("catalog_symbols", &self.portfolio_service.catalog().len())
            .field("settings", &self.settings)
            .field("dirty", &self.dirty)
            .finish()
    }
}

impl StockTracker {
    /// Create an empty portfolio priced against the built-in catalog.
    pub fn create_new() -> Self {
        Self::with_catalog(PriceCatalog::default())
    }

    /// Create an empty portfolio priced against `catalog`.
    pub fn with_catalog(catalog: PriceCatalog) -> Self {
        Self {
            portfolio: Portfolio::new(),
            portfolio_service: PortfolioService::new(catalog),
            report_service: ReportService::new(),
            settings: Settings::default(),
            dirty: false,
        }
    }

    // ── Holdings ────────────────────────────────────────────────────

    /// Add a holding from raw user input (symbol and quantity text).
    /// Returns the holding's accumulated state.
    pub fn add_holding(&mut self, symbol: &str, quantity: &str) -> Result<Holding, CoreError> {
        let holding = self
            .portfolio_service
            .add_holding(&mut self.portfolio, symbol, quantity)?;
        self.dirty = true;
        Ok(holding)
    }

    /// Remove every holding. The caller is expected to have confirmed.
    pub fn clear(&mut self) {
        if !self.portfolio.is_empty() {
            self.dirty = true;
        }
        self.portfolio_service.clear(&mut self.portfolio);
    }

    /// Quantity held for `symbol` (case-insensitive), if any.
    #[must_use]
    pub fn quantity_of(&self, symbol: &str) -> Option<f64> {
        self.portfolio.quantity_of(&symbol.trim().to_uppercase())
    }

    #[must_use]
    pub fn holdings(&self) -> &[Holding] {
        self.portfolio.holdings()
    }

    #[must_use]
    pub fn holding_count(&self) -> usize {
        self.portfolio.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.portfolio.is_empty()
    }

    #[must_use]
    pub fn catalog(&self) -> &PriceCatalog {
        self.portfolio_service.catalog()
    }

    // ── Valuation & Display ─────────────────────────────────────────

    #[must_use]
    pub fn lines(&self) -> Vec<HoldingLine> {
        self.portfolio.lines(self.catalog())
    }

    /// Total value at catalog prices, unrounded.
    #[must_use]
    pub fn total_value(&self) -> f64 {
        self.portfolio_service.total_value(&self.portfolio)
    }

    #[must_use]
    pub fn summary(&self) -> PortfolioSummary {
        self.portfolio_service.summary(&self.portfolio)
    }

    /// Fixed-width holdings table plus the total line.
    #[must_use]
    pub fn render(&self) -> String {
        self.report_service.render(&self.summary(), &self.settings)
    }

    /// Just the total line, e.g. `Total Investment: $900.00`.
    #[must_use]
    pub fn render_total(&self) -> String {
        self.report_service
            .render_total(&self.summary(), &self.settings)
    }

    /// Export the current valuation as JSON (lines and total).
    pub fn to_json(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(&self.summary())
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize summary: {e}")))
    }

    // ── Persistence ─────────────────────────────────────────────────

    /// Save to a CSV file. Clears the unsaved-changes flag on success.
    pub fn save_to_file(&mut self, path: impl AsRef<Path>) -> Result<(), CoreError> {
        self.portfolio_service.save(&self.portfolio, path)?;
        self.dirty = false;
        Ok(())
    }

    /// Replace the holdings with those in a CSV file.
    /// On failure the current holdings are kept. Returns the number loaded.
    pub fn load_from_file(&mut self, path: impl AsRef<Path>) -> Result<usize, CoreError> {
        let count = self.portfolio_service.load(&mut self.portfolio, path)?;
        self.dirty = false;
        Ok(count)
    }

    /// Encode to CSV bytes, for callers that do their own file handling.
    /// Clears the unsaved-changes flag on success.
    pub fn save_to_bytes(&mut self) -> Result<Vec<u8>, CoreError> {
        let bytes = self.portfolio_service.export(&self.portfolio)?;
        self.dirty = false;
        Ok(bytes)
    }

    /// Replace the holdings with those decoded from CSV bytes.
    pub fn load_from_bytes(&mut self, data: &[u8]) -> Result<usize, CoreError> {
        let count = self.portfolio_service.import(&mut self.portfolio, data)?;
        self.dirty = false;
        Ok(count)
    }

    /// Check if there are unsaved changes since the last save or load.
    #[must_use]
    pub fn has_unsaved_changes(&self) -> bool {
        self.dirty
    }

    // ── Settings ────────────────────────────────────────────────────

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: Settings) {
        self.settings = settings;
    }

    /// Destination path for a save, with the configured extension added
    /// when `path` has none.
    #[must_use]
    pub fn save_path_for(&self, path: &Path) -> PathBuf {
        self.settings.with_default_extension(path)
    }
}

impl Default for StockTracker {
    fn default() -> Self {
        Self::create_new()
    }
}
