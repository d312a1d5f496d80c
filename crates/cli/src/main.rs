mod app;
mod commands;

use stock_portfolio_core::StockTracker;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use app::App;

fn main() -> std::io::Result<()> {
    // Logs go to stderr so they never interleave with prompts.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let stdin = std::io::stdin();
    let mut app = App::new(StockTracker::create_new(), stdin.lock(), std::io::stdout());
    app.run()
}
