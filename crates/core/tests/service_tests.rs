// ═══════════════════════════════════════════════════════════════════
// Service & Facade Tests — PortfolioService, ReportService,
// StockTracker facade
// ═══════════════════════════════════════════════════════════════════

use stock_portfolio_core::errors::{CoreError, ErrorKind};
use stock_portfolio_core::models::catalog::PriceCatalog;
use stock_portfolio_core::models::holding::HoldingLine;
use stock_portfolio_core::models::portfolio::Portfolio;
use stock_portfolio_core::models::settings::Settings;
use stock_portfolio_core::models::summary::PortfolioSummary;
use stock_portfolio_core::services::portfolio_service::PortfolioService;
use stock_portfolio_core::services::report_service::ReportService;
use stock_portfolio_core::StockTracker;

fn service() -> PortfolioService {
    PortfolioService::new(
        PriceCatalog::from_prices([("AAPL", 180.0), ("TSLA", 250.0)]).unwrap(),
    )
}

// ═══════════════════════════════════════════════════════════════════
// PortfolioService — add_holding
// ═══════════════════════════════════════════════════════════════════

mod add_holding {
    use super::*;

    #[test]
    fn uppercases_symbol() {
        let svc = service();
        let mut p = Portfolio::new();
        let h = svc.add_holding(&mut p, "aapl", "3").unwrap();
        assert_eq!(h.symbol, "AAPL");
        assert_eq!(p.quantity_of("AAPL"), Some(3.0));
    }

    #[test]
    fn trims_input() {
        let svc = service();
        let mut p = Portfolio::new();
        svc.add_holding(&mut p, "  tsla ", " 1.5\n").unwrap();
        assert_eq!(p.quantity_of("TSLA"), Some(1.5));
    }

    #[test]
    fn accumulates() {
        let svc = service();
        let mut p = Portfolio::new();
        svc.add_holding(&mut p, "aapl", "3").unwrap();
        let h = svc.add_holding(&mut p, "AAPL", "2").unwrap();
        assert_eq!(h.quantity, 5.0);
        assert_eq!(p.len(), 1);
    }

    #[test]
    fn accepts_fractional_and_exponent() {
        let svc = service();
        let mut p = Portfolio::new();
        svc.add_holding(&mut p, "AAPL", "0.5").unwrap();
        svc.add_holding(&mut p, "AAPL", "1e1").unwrap();
        assert_eq!(p.quantity_of("AAPL"), Some(10.5));
    }

    #[test]
    fn accumulated_overflow_is_invalid_quantity() {
        let svc = service();
        let mut p = Portfolio::new();
        svc.add_holding(&mut p, "AAPL", "1e308").unwrap();
        let err = svc.add_holding(&mut p, "AAPL", "1e308").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidQuantity);
        assert_eq!(p.quantity_of("AAPL"), Some(1e308));
    }

    #[test]
    fn unknown_symbol() {
        let svc = service();
        let mut p = Portfolio::new();
        let err = svc.add_holding(&mut p, "xom", "1").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidSymbol);
        assert_eq!(err.to_string(), "Stock 'XOM' not in price list.");
        assert!(p.is_empty());
    }

    #[test]
    fn empty_symbol() {
        let svc = service();
        let mut p = Portfolio::new();
        let err = svc.add_holding(&mut p, "", "1").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidSymbol);
    }

    #[test]
    fn symbol_checked_before_quantity() {
        let svc = service();
        let mut p = Portfolio::new();
        let err = svc.add_holding(&mut p, "XOM", "-1").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidSymbol);
    }

    #[test]
    fn bad_quantities() {
        let svc = service();
        let mut p = Portfolio::new();
        svc.add_holding(&mut p, "AAPL", "1").unwrap();
        let before = p.clone();

        for q in ["0", "-2", "-0", "abc", "", "  ", "NaN", "inf", "-inf", "1,5", "3 shares"] {
            let err = svc.add_holding(&mut p, "AAPL", q).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidQuantity, "{q:?}");
            assert_eq!(err.to_string(), "Quantity must be a positive number.");
        }
        assert_eq!(p, before);
    }
}

// ═══════════════════════════════════════════════════════════════════
// PortfolioService — persistence & clear
// ═══════════════════════════════════════════════════════════════════

mod persistence {
    use super::*;

    #[test]
    fn save_empty_fails_without_writing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.csv");

        let svc = service();
        let err = svc.save(&Portfolio::new(), &path).unwrap_err();
        assert!(matches!(err, CoreError::EmptyPortfolio));
        assert!(!path.exists());
    }

    #[test]
    fn save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("p.csv");

        let svc = service();
        let mut p = Portfolio::new();
        svc.add_holding(&mut p, "TSLA", "2").unwrap();
        svc.add_holding(&mut p, "AAPL", "1.25").unwrap();
        svc.save(&p, &path).unwrap();

        let mut loaded = Portfolio::new();
        let count = svc.load(&mut loaded, &path).unwrap();
        assert_eq!(count, 2);
        assert_eq!(loaded, p);
    }

    #[test]
    fn save_failure_keeps_portfolio() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("p.csv");

        let svc = service();
        let mut p = Portfolio::new();
        svc.add_holding(&mut p, "AAPL", "1").unwrap();
        let err = svc.save(&p, &path).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
        assert_eq!(p.quantity_of("AAPL"), Some(1.0));
    }

    #[test]
    fn load_replaces_existing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("p.csv");
        std::fs::write(&path, "Stock,Quantity,Price,Value\nTSLA,3.00,250.00,750.00\n").unwrap();

        let svc = service();
        let mut p = Portfolio::new();
        svc.add_holding(&mut p, "AAPL", "9").unwrap();
        svc.load(&mut p, &path).unwrap();
        assert_eq!(p.symbols(), vec!["TSLA"]);
        assert_eq!(p.quantity_of("TSLA"), Some(3.0));
    }

    #[test]
    fn load_missing_file_keeps_portfolio() {
        let dir = tempfile::tempdir().unwrap();
        let svc = service();
        let mut p = Portfolio::new();
        svc.add_holding(&mut p, "AAPL", "9").unwrap();
        let before = p.clone();

        let err = svc.load(&mut p, dir.path().join("nope.csv")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
        assert_eq!(p, before);
    }

    #[test]
    fn load_malformed_keeps_portfolio() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.csv");
        std::fs::write(&path, "Stock,Quantity,Price,Value\nTSLA,1\nAAPL\n").unwrap();

        let svc = service();
        let mut p = Portfolio::new();
        svc.add_holding(&mut p, "AAPL", "9").unwrap();
        let before = p.clone();

        let err = svc.load(&mut p, &path).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedDocument);
        assert_eq!(p, before);
    }

    #[test]
    fn export_and_import_bytes() {
        let svc = service();
        let mut p = Portfolio::new();
        svc.add_holding(&mut p, "AAPL", "2").unwrap();
        let bytes = svc.export(&p).unwrap();

        let mut other = Portfolio::new();
        assert_eq!(svc.import(&mut other, &bytes).unwrap(), 1);
        assert_eq!(other, p);
    }

    #[test]
    fn export_empty_fails() {
        let svc = service();
        assert!(matches!(
            svc.export(&Portfolio::new()),
            Err(CoreError::EmptyPortfolio)
        ));
    }

    #[test]
    fn clear_always_empties() {
        let svc = service();
        let mut p = Portfolio::new();
        svc.clear(&mut p);
        assert!(p.is_empty());

        svc.add_holding(&mut p, "AAPL", "1").unwrap();
        svc.add_holding(&mut p, "TSLA", "1").unwrap();
        svc.clear(&mut p);
        assert!(p.is_empty());
    }

    #[test]
    fn default_service_uses_builtin_catalog() {
        let svc = PortfolioService::default();
        assert_eq!(svc.catalog(), &PriceCatalog::default());
        let mut p = Portfolio::new();
        svc.add_holding(&mut p, "amzn", "1").unwrap();
        assert_eq!(svc.total_value(&p), 3300.0);
    }
}

// ═══════════════════════════════════════════════════════════════════
// ReportService
// ═══════════════════════════════════════════════════════════════════

mod report {
    use super::*;

    fn summary(lines: Vec<HoldingLine>) -> PortfolioSummary {
        let total_value = lines.iter().map(|l| l.line_value).sum();
        PortfolioSummary { lines, total_value }
    }

    #[test]
    fn table_layout() {
        let r = ReportService::new();
        let text = r.render_table(&summary(vec![HoldingLine::new("AAPL", 5.0, 180.0)]));
        let rows: Vec<&str> = text.lines().collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].trim_end(), "Stock      Qty        Price      Value");
        assert_eq!(rows[1], "-".repeat(45));
        assert_eq!(rows[2].trim_end(), "AAPL       5.00       180.00     900.00");
    }

    #[test]
    fn empty_table_has_heading_only() {
        let r = ReportService::new();
        let text = r.render_table(&PortfolioSummary {
            lines: Vec::new(),
            total_value: 0.0,
        });
        assert_eq!(text.lines().count(), 2);
    }

    #[test]
    fn total_uses_currency_symbol() {
        let r = ReportService::new();
        let s = summary(vec![HoldingLine::new("TSLA", 1.0, 250.0)]);
        assert_eq!(
            r.render_total(&s, &Settings::default()),
            "Total Investment: $250.00"
        );

        let euro = Settings {
            currency_symbol: "€".into(),
            ..Settings::default()
        };
        assert_eq!(r.render_total(&s, &euro), "Total Investment: €250.00");
    }

    #[test]
    fn render_joins_table_and_total() {
        let r = ReportService::default();
        let s = summary(vec![HoldingLine::new("TSLA", 2.0, 250.0)]);
        let text = r.render(&s, &Settings::default());
        assert!(text.starts_with("Stock"));
        assert!(text.ends_with("\n\nTotal Investment: $500.00"));
    }
}

// ═══════════════════════════════════════════════════════════════════
// StockTracker facade
// ═══════════════════════════════════════════════════════════════════

mod tracker {
    use super::*;

    #[test]
    fn create_new_is_empty_and_clean() {
        let t = StockTracker::create_new();
        assert!(t.is_empty());
        assert_eq!(t.total_value(), 0.0);
        assert!(!t.has_unsaved_changes());
        assert_eq!(t.catalog().len(), 5);
    }

    #[test]
    fn add_marks_dirty() {
        let mut t = StockTracker::create_new();
        t.add_holding("msft", "2").unwrap();
        assert!(t.has_unsaved_changes());
        assert_eq!(t.quantity_of("msft"), Some(2.0));
        assert_eq!(t.holding_count(), 1);
    }

    #[test]
    fn failed_add_does_not_mark_dirty() {
        let mut t = StockTracker::create_new();
        assert!(t.add_holding("XOM", "2").is_err());
        assert!(!t.has_unsaved_changes());
    }

    #[test]
    fn clear_marks_dirty_only_when_something_removed() {
        let mut t = StockTracker::create_new();
        t.clear();
        assert!(!t.has_unsaved_changes());

        t.add_holding("AAPL", "1").unwrap();
        let _ = t.save_to_bytes().unwrap();
        assert!(!t.has_unsaved_changes());
        t.clear();
        assert!(t.is_empty());
        assert!(t.has_unsaved_changes());
    }

    #[test]
    fn save_and_load_file_reset_dirty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.csv");

        let mut t = StockTracker::create_new();
        t.add_holding("GOOGL", "0.5").unwrap();
        t.save_to_file(&path).unwrap();
        assert!(!t.has_unsaved_changes());

        let mut other = StockTracker::create_new();
        other.add_holding("AAPL", "1").unwrap();
        assert_eq!(other.load_from_file(&path).unwrap(), 1);
        assert!(!other.has_unsaved_changes());
        assert_eq!(other.lines(), t.lines());
    }

    #[test]
    fn failed_save_keeps_dirty() {
        let mut t = StockTracker::create_new();
        t.add_holding("AAPL", "1").unwrap();
        let dir = tempfile::tempdir().unwrap();
        assert!(t.save_to_file(dir.path().join("x").join("y.csv")).is_err());
        assert!(t.has_unsaved_changes());
    }

    #[test]
    fn load_from_bytes() {
        let mut t = StockTracker::create_new();
        let n = t
            .load_from_bytes(b"Stock,Quantity,Price,Value\r\nAMZN,2.00,3300.00,6600.00\r\n")
            .unwrap();
        assert_eq!(n, 1);
        assert_eq!(t.total_value(), 6600.0);
    }

    #[test]
    fn render_shows_table_and_total() {
        let mut t = StockTracker::create_new();
        t.add_holding("aapl", "3").unwrap();
        t.add_holding("AAPL", "2").unwrap();
        let text = t.render();
        assert!(text.contains("AAPL       5.00       180.00     900.00"));
        assert!(text.ends_with("Total Investment: $900.00"));
        assert_eq!(t.render_total(), "Total Investment: $900.00");
    }

    #[test]
    fn summary_and_json() {
        let mut t = StockTracker::create_new();
        t.add_holding("TSLA", "4").unwrap();
        let s = t.summary();
        assert_eq!(s.total_value, 1000.0);

        let json = t.to_json().unwrap();
        let back: PortfolioSummary = serde_json::from_str(&json).unwrap();
        assert_eq!(back, s);
    }

    #[test]
    fn settings_drive_rendering_and_paths() {
        let mut t = StockTracker::create_new();
        t.set_settings(Settings {
            currency_symbol: "USD ".into(),
            file_extension: "txt".into(),
        });
        t.add_holding("AAPL", "1").unwrap();
        assert_eq!(t.render_total(), "Total Investment: USD 180.00");
        assert_eq!(
            t.save_path_for(std::path::Path::new("holdings")),
            std::path::PathBuf::from("holdings.txt")
        );
        assert_eq!(t.settings().file_extension, "txt");
    }

    #[test]
    fn custom_catalog() {
        let catalog = PriceCatalog::from_prices([("NVDA", 100.0)]).unwrap();
        let mut t = StockTracker::with_catalog(catalog);
        assert!(t.add_holding("AAPL", "1").is_err());
        t.add_holding("nvda", "3").unwrap();
        assert_eq!(t.total_value(), 300.0);
        assert_eq!(t.holdings()[0].symbol, "NVDA");
    }

    #[test]
    fn debug_format() {
        let t = StockTracker::default();
        let debug = format!("{t:?}");
        assert!(debug.contains("StockTracker"));
        assert!(debug.contains("holdings"));
    }
}
