/// A single line of user input, parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `add [SYMBOL] [QTY]`; missing parts are prompted for
    Add {
        symbol: Option<String>,
        quantity: Option<String>,
    },
    /// `show`: print the holdings table and total
    Show,
    /// `save [PATH]`
    Save(Option<String>),
    /// `load [PATH]`
    Load(Option<String>),
    /// `clear`: asks for confirmation first
    Clear,
    /// `prices`: list the price table
    Prices,
    Help,
    Quit,
    /// Blank input
    Empty,
    Unknown(String),
}

pub const HELP: &str = "\
Commands:
  add [SYMBOL] [QTY]   add shares of a listed stock
  show                 show holdings and total value
  save [PATH]          save holdings to a CSV file
  load [PATH]          load holdings from a CSV file
  clear                remove all holdings
  prices               list available stocks and prices
  help                 show this help
  quit                 exit";

/// Parse one input line. Command words are case-insensitive; a path keeps
/// everything after the command word, spaces included.
#[must_use]
pub fn parse(line: &str) -> Command {
    let line = line.trim();
    if line.is_empty() {
        return Command::Empty;
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };
    let rest = (!rest.is_empty()).then(|| rest.to_string());

    match word.to_lowercase().as_str() {
        "add" | "a" => {
            let mut args = rest.as_deref().unwrap_or("").split_whitespace();
            Command::Add {
                symbol: args.next().map(str::to_string),
                quantity: args.next().map(str::to_string),
            }
        }
        "show" | "list" | "ls" => Command::Show,
        "save" => Command::Save(rest),
        "load" | "open" => Command::Load(rest),
        "clear" => Command::Clear,
        "prices" => Command::Prices,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => Command::Unknown(other.to_string()),
    }
}

/// Whether a confirmation answer means yes.
#[must_use]
pub fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
