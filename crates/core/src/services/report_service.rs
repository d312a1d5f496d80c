use crate::models::settings::Settings;
use crate::models::summary::PortfolioSummary;

/// Width of each column in the rendered table.
const COLUMN_WIDTH: usize = 10;

/// Length of the rule under the table heading.
const RULE_WIDTH: usize = 45;

/// Renders a [`PortfolioSummary`] as fixed-width text for display.
pub struct ReportService;

impl ReportService {
    pub fn new() -> Self {
        Self
    }

    /// Table of holdings: heading, rule, then one row per line.
    /// Numbers are shown with two decimals.
    #[must_use]
    pub fn render_table(&self, summary: &PortfolioSummary) -> String {
        let w = COLUMN_WIDTH;
        let mut rows = vec![
            format!("{:<w$} {:<w$} {:<w$} {:<w$}", "Stock", "Qty", "Price", "Value"),
            "-".repeat(RULE_WIDTH),
        ];
        for line in &summary.lines {
            rows.push(format!(
                "{:<w$} {:<w$.2} {:<w$.2} {:<w$.2}",
                line.symbol, line.quantity, line.unit_price, line.line_value
            ));
        }
        rows.join("\n")
    }

    /// The total line, e.g. `Total Investment: $900.00`.
    #[must_use]
    pub fn render_total(&self, summary: &PortfolioSummary, settings: &Settings) -> String {
        format!(
            "Total Investment: {}{:.2}",
            settings.currency_symbol, summary.total_value
        )
    }

    /// Table followed by a blank line and the total.
    #[must_use]
    pub fn render(&self, summary: &PortfolioSummary, settings: &Settings) -> String {
        format!(
            "{}\n\n{}",
            self.render_table(summary),
            self.render_total(summary, settings)
        )
    }
}

impl Default for ReportService {
    fn default() -> Self {
        Self::new()
    }
}
