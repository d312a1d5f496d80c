use std::io::{self, BufRead, Write};
use std::path::Path;

use stock_portfolio_core::errors::CoreError;
use stock_portfolio_core::StockTracker;
use tracing::debug;

use crate::commands::{self, Command};

/// Line-oriented front end: reads commands from `input`, writes results and
/// prompts to `output`, and forwards every action to a [`StockTracker`].
pub struct App<R, W> {
    tracker: StockTracker,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> App<R, W> {
    pub fn new(tracker: StockTracker, input: R, output: W) -> Self {
        Self {
            tracker,
            input,
            output,
        }
    }

    /// Run until `quit` or end of input.
    pub fn run(&mut self) -> io::Result<()> {
        writeln!(self.output, "Stock Portfolio Tracker. Type 'help' for commands.")?;
        loop {
            let Some(line) = self.prompt("> ")? else {
                break;
            };
            let command = commands::parse(&line);
            debug!(?command, "command");
            if command == Command::Quit {
                if self.confirm_quit()? {
                    break;
                }
                continue;
            }
            self.handle(command)?;
        }
        Ok(())
    }

    fn handle(&mut self, command: Command) -> io::Result<()> {
        match command {
            Command::Add { symbol, quantity } => self.add(symbol, quantity),
            Command::Show => self.show(),
            Command::Save(path) => self.save(path),
            Command::Load(path) => self.load(path),
            Command::Clear => self.clear(),
            Command::Prices => self.prices(),
            Command::Help => writeln!(self.output, "{}", commands::HELP),
            Command::Empty | Command::Quit => Ok(()),
            Command::Unknown(word) => writeln!(
                self.output,
                "Unknown command '{word}'. Type 'help' for a list of commands."
            ),
        }
    }

    fn add(&mut self, symbol: Option<String>, quantity: Option<String>) -> io::Result<()> {
        let Some(symbol) = self.arg_or_prompt(symbol, "Stock symbol: ")? else {
            return Ok(());
        };
        let Some(quantity) = self.arg_or_prompt(quantity, "Quantity: ")? else {
            return Ok(());
        };
        match self.tracker.add_holding(&symbol, &quantity) {
            Ok(_) => self.show(),
            Err(e) => self.notify_error(&e),
        }
    }

    fn show(&mut self) -> io::Result<()> {
        writeln!(self.output, "{}", self.tracker.render())
    }

    fn save(&mut self, path: Option<String>) -> io::Result<()> {
        if self.tracker.is_empty() {
            return self.notify_error(&CoreError::EmptyPortfolio);
        }
        let Some(path) = self.arg_or_prompt(path, "Save to: ")? else {
            return Ok(());
        };
        if path.is_empty() {
            return writeln!(self.output, "Save cancelled.");
        }
        let path = self.tracker.save_path_for(Path::new(&path));
        match self.tracker.save_to_file(&path) {
            Ok(()) => writeln!(self.output, "Saved: Portfolio saved to {}", path.display()),
            Err(e) => self.notify_error(&e),
        }
    }

    fn load(&mut self, path: Option<String>) -> io::Result<()> {
        let Some(path) = self.arg_or_prompt(path, "Load from: ")? else {
            return Ok(());
        };
        if path.is_empty() {
            return writeln!(self.output, "Load cancelled.");
        }
        match self.tracker.load_from_file(&path) {
            Ok(_) => {
                writeln!(self.output, "Loaded: Portfolio loaded from {path}")?;
                self.show()
            }
            Err(e) => self.notify_error(&e),
        }
    }

    fn clear(&mut self) -> io::Result<()> {
        let answer = self.prompt("Are you sure you want to clear the portfolio? [y/N] ")?;
        if answer.as_deref().is_some_and(commands::is_yes) {
            self.tracker.clear();
            writeln!(self.output, "Portfolio cleared.")?;
            self.show()
        } else {
            writeln!(self.output, "Clear cancelled.")
        }
    }

    fn prices(&mut self) -> io::Result<()> {
        let catalog = self.tracker.catalog();
        let mut listing = Vec::with_capacity(catalog.len());
        for symbol in catalog.symbols() {
            if let Some(price) = catalog.price_of(symbol) {
                listing.push(format!("{symbol:<10} {price:.2}"));
            }
        }
        writeln!(self.output, "{}", listing.join("\n"))
    }

    fn confirm_quit(&mut self) -> io::Result<bool> {
        if !self.tracker.has_unsaved_changes() {
            return Ok(true);
        }
        let answer = self.prompt("You have unsaved changes. Quit anyway? [y/N] ")?;
        // End of input while asking counts as quitting.
        Ok(answer.as_deref().map_or(true, commands::is_yes))
    }

    fn notify_error(&mut self, error: &CoreError) -> io::Result<()> {
        writeln!(self.output, "{}: {error}", error.title())
    }

    fn arg_or_prompt(&mut self, arg: Option<String>, label: &str) -> io::Result<Option<String>> {
        match arg {
            Some(value) => Ok(Some(value)),
            None => self.prompt(label),
        }
    }

    /// Print `label`, then read one line. `None` at end of input.
    fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}
