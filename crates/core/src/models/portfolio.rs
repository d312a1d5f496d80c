use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::CoreError;

use super::catalog::PriceCatalog;
use super::holding::{Holding, HoldingLine};

/// The in-memory list of holdings.
///
/// Holdings keep the order in which their symbol was first added. Adding more
/// of an already-held symbol accumulates in place without moving the entry.
///
/// Every held symbol is guaranteed to be listed in the catalog it was admitted
/// against, and every quantity admitted through [`Portfolio::add_holding`] is
/// finite and strictly positive.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Portfolio {
    holdings: Vec<Holding>,
}

impl Portfolio {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `quantity` of `symbol`, creating the entry if it is not held yet.
    ///
    /// `symbol` must already be normalised (uppercase). An addition that would
    /// push the held quantity past the largest finite `f64` is refused with
    /// `InvalidQuantity`. On error the portfolio is left unchanged. Returns the
    /// holding's accumulated state.
    pub fn add_holding(
        &mut self,
        catalog: &PriceCatalog,
        symbol: &str,
        quantity: f64,
    ) -> Result<Holding, CoreError> {
        if !catalog.contains(symbol) {
            return Err(CoreError::InvalidSymbol(symbol.to_string()));
        }
        if !quantity.is_finite() || quantity <= 0.0 {
            return Err(CoreError::InvalidQuantity(quantity.to_string()));
        }

        let holding = match self.holdings.iter_mut().find(|h| h.symbol == symbol) {
            Some(existing) => {
                let accumulated = existing.quantity + quantity;
                if !accumulated.is_finite() {
                    return Err(CoreError::InvalidQuantity(accumulated.to_string()));
                }
                existing.quantity = accumulated;
                existing.clone()
            }
            None => {
                let holding = Holding::new(symbol, quantity);
                self.holdings.push(holding.clone());
                holding
            }
        };
        debug!(symbol, added = quantity, total = holding.quantity, "holding updated");
        Ok(holding)
    }

    /// Sum of quantity × price over every holding. Exactly 0 when empty.
    #[must_use]
    pub fn total_value(&self, catalog: &PriceCatalog) -> f64 {
        HoldingLine::total(&self.lines(catalog))
    }

    /// Valuation rows in holding order, computed fresh on every call.
    ///
    /// A holding whose symbol is missing from `catalog` (only possible when a
    /// different catalog is passed than the one it was admitted against) has
    /// no price and is left out.
    #[must_use]
    pub fn lines(&self, catalog: &PriceCatalog) -> Vec<HoldingLine> {
        self.holdings
            .iter()
            .filter_map(|h| {
                catalog
                    .price_of(&h.symbol)
                    .map(|price| HoldingLine::new(h.symbol.clone(), h.quantity, price))
            })
            .collect()
    }

    /// Remove every holding.
    pub fn clear(&mut self) {
        self.holdings.clear();
    }

    /// Replace every holding with `entries`, in the given order.
    ///
    /// All symbols are checked against `catalog` before anything changes; one
    /// unknown symbol fails the whole call with `InvalidSymbol` and the current
    /// holdings survive. A symbol repeated in `entries` keeps its first
    /// position and takes the last quantity. Quantities are installed as given.
    pub fn replace_all(
        &mut self,
        catalog: &PriceCatalog,
        entries: Vec<(String, f64)>,
    ) -> Result<(), CoreError> {
        if let Some((symbol, _)) = entries.iter().find(|(s, _)| !catalog.contains(s)) {
            return Err(CoreError::InvalidSymbol(symbol.clone()));
        }

        let mut holdings: Vec<Holding> = Vec::with_capacity(entries.len());
        for (symbol, quantity) in entries {
            match holdings.iter_mut().find(|h| h.symbol == symbol) {
                Some(existing) => existing.quantity = quantity,
                None => holdings.push(Holding::new(symbol, quantity)),
            }
        }

        self.holdings = holdings;
        Ok(())
    }

    /// Quantity held for `symbol`, if any.
    #[must_use]
    pub fn quantity_of(&self, symbol: &str) -> Option<f64> {
        self.holdings
            .iter()
            .find(|h| h.symbol == symbol)
            .map(|h| h.quantity)
    }

    /// Holdings in insertion order.
    #[must_use]
    pub fn holdings(&self) -> &[Holding] {
        &self.holdings
    }

    #[must_use]
    pub fn symbols(&self) -> Vec<&str> {
        self.holdings.iter().map(|h| h.symbol.as_str()).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.holdings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.holdings.is_empty()
    }
}
