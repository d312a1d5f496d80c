use std::path::Path;

use crate::errors::CoreError;
use crate::models::catalog::PriceCatalog;
use crate::models::portfolio::Portfolio;

use super::csv_format;

/// High-level storage operations: save/load a portfolio to/from CSV bytes or files.
pub struct StorageManager;

impl StorageManager {
    /// Encode a portfolio to UTF-8 CSV bytes.
    ///
    /// Flow: Portfolio + PriceCatalog → csv_format::encode → bytes
    #[must_use]
    pub fn save_to_bytes(portfolio: &Portfolio, catalog: &PriceCatalog) -> Vec<u8> {
        csv_format::encode(portfolio, catalog).into_bytes()
    }

    /// Decode `(symbol, quantity)` entries from CSV bytes.
    ///
    /// Flow: bytes → UTF-8 check → csv_format::decode → entries
    pub fn load_from_bytes(
        data: &[u8],
        catalog: &PriceCatalog,
    ) -> Result<Vec<(String, f64)>, CoreError> {
        let text = std::str::from_utf8(data).map_err(|e| {
            CoreError::MalformedDocument(format!("document is not valid UTF-8: {e}"))
        })?;
        csv_format::decode(text, catalog)
    }

    /// Write a portfolio to a CSV file, replacing any existing file.
    pub fn save_to_file(
        portfolio: &Portfolio,
        catalog: &PriceCatalog,
        path: impl AsRef<Path>,
    ) -> Result<(), CoreError> {
        let path = path.as_ref();
        let bytes = Self::save_to_bytes(portfolio, catalog);
        std::fs::write(path, bytes)
            .map_err(|e| CoreError::FileIO(format!("{}: {e}", path.display())))
    }

    /// Read `(symbol, quantity)` entries from a CSV file.
    pub fn load_from_file(
        path: impl AsRef<Path>,
        catalog: &PriceCatalog,
    ) -> Result<Vec<(String, f64)>, CoreError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .map_err(|e| CoreError::FileIO(format!("{}: {e}", path.display())))?;
        Self::load_from_bytes(&bytes, catalog)
    }
}
