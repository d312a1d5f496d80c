use std::iter::Peekable;
use std::str::Chars;

use tracing::warn;

use crate::errors::CoreError;
use crate::models::catalog::PriceCatalog;
use crate::models::holding::HoldingLine;
use crate::models::portfolio::Portfolio;

/// Column headings of the first row.
pub const HEADER: [&str; 4] = ["Stock", "Quantity", "Price", "Value"];

/// Label in the first column of the trailing summary row.
pub const TOTAL_LABEL: &str = "Total Investment";

/// Row terminator written after every row, including the last.
pub const ROW_TERMINATOR: &str = "\r\n";

const UTF8_BOM: char = '\u{feff}';

/// Encode a portfolio as CSV text.
///
/// Layout:
/// ```text
/// Stock,Quantity,Price,Value
/// AAPL,5.00,180.00,900.00
///
/// Total Investment,,,900.00
/// ```
/// One data row per holding in holding order, numbers with two decimals,
/// then a blank row and the total row.
#[must_use]
pub fn encode(portfolio: &Portfolio, catalog: &PriceCatalog) -> String {
    let mut out = String::new();
    write_row(&mut out, &HEADER);

    let lines = portfolio.lines(catalog);
    for line in &lines {
        write_row(
            &mut out,
            &[
                line.symbol.as_str(),
                &format!("{:.2}", line.quantity),
                &format!("{:.2}", line.unit_price),
                &format!("{:.2}", line.line_value),
            ],
        );
    }

    out.push_str(ROW_TERMINATOR);
    let total = HoldingLine::total(&lines);
    write_row(&mut out, &[TOTAL_LABEL, "", "", &format!("{total:.2}")]);
    out
}

/// Decode CSV text into an ordered list of `(symbol, quantity)` entries.
///
/// The first row is the header and is skipped without inspection. Reading
/// stops at the first empty row or the first row whose first column is
/// [`TOTAL_LABEL`]; nothing after it is tokenized or looked at. Rows whose
/// symbol is not in `catalog` are skipped. A symbol seen twice keeps its first position and
/// takes the later quantity.
///
/// Quantities are taken as written, sign included.
pub fn decode(text: &str, catalog: &PriceCatalog) -> Result<Vec<(String, f64)>, CoreError> {
    let text = text.strip_prefix(UTF8_BOM).unwrap_or(text);
    let mut rows = read_rows(text).enumerate();

    let Some((_, header)) = rows.next() else {
        return Err(CoreError::MalformedDocument(
            "document is empty, expected a header row".into(),
        ));
    };
    header?;

    let mut entries: Vec<(String, f64)> = Vec::new();
    for (idx, row) in rows {
        let row = row?;
        let row_number = idx + 1;
        if row.is_empty() || row[0] == TOTAL_LABEL {
            break;
        }
        if row.len() < 2 {
            return Err(CoreError::MalformedDocument(format!(
                "row {row_number} has {} column, expected at least 2",
                row.len()
            )));
        }

        let symbol = &row[0];
        if !catalog.contains(symbol) {
            warn!(row = row_number, symbol = %symbol, "skipping row with unlisted symbol");
            continue;
        }

        let quantity: f64 = row[1].trim().parse().map_err(|_| {
            CoreError::MalformedDocument(format!(
                "row {row_number}: quantity '{}' is not a number",
                row[1]
            ))
        })?;

        match entries.iter_mut().find(|(s, _)| *s == *symbol) {
            Some(existing) => existing.1 = quantity,
            None => entries.push((symbol.clone(), quantity)),
        }
    }

    Ok(entries)
}

/// Append one row, quoting fields that contain a delimiter, quote, or line break.
fn write_row(out: &mut String, fields: &[&str]) {
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        if field.contains([',', '"', '\r', '\n']) {
            out.push('"');
            out.push_str(&field.replace('"', "\"\""));
            out.push('"');
        } else {
            out.push_str(field);
        }
    }
    out.push_str(ROW_TERMINATOR);
}

/// Lazily split CSV text into rows of unquoted fields.
///
/// `\r\n`, `\n` and a lone `\r` all end a row. A blank line yields an empty
/// row. A trailing terminator at end of input does not produce an extra row.
/// A `"` opens a quoted section only as the first character of a field;
/// anywhere else it is kept literally. Rows are tokenized one at a time, so a
/// broken row is only reported once it is pulled.
fn read_rows(text: &str) -> Rows<'_> {
    Rows {
        chars: text.chars().peekable(),
        finished: false,
    }
}

struct Rows<'a> {
    chars: Peekable<Chars<'a>>,
    finished: bool,
}

impl Iterator for Rows<'_> {
    type Item = Result<Vec<String>, CoreError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let mut row: Vec<String> = Vec::new();
        let mut field = String::new();
        let mut in_quotes = false;
        // Whether the current field has consumed any character yet.
        let mut field_started = false;
        // Whether the current row has any field at all (a blank line has none).
        let mut row_started = false;

        loop {
            let Some(c) = self.chars.next() else {
                self.finished = true;
                if in_quotes {
                    return Some(Err(CoreError::MalformedDocument(
                        "unterminated quoted field".into(),
                    )));
                }
                if row_started {
                    row.push(field);
                    return Some(Ok(row));
                }
                return None;
            };

            if in_quotes {
                if c == '"' {
                    if self.chars.peek() == Some(&'"') {
                        self.chars.next();
                        field.push('"');
                    } else {
                        in_quotes = false;
                    }
                } else {
                    field.push(c);
                }
                continue;
            }

            match c {
                '"' if !field_started => {
                    in_quotes = true;
                    field_started = true;
                    row_started = true;
                }
                ',' => {
                    row.push(std::mem::take(&mut field));
                    field_started = false;
                    row_started = true;
                }
                '\r' | '\n' => {
                    if c == '\r' && self.chars.peek() == Some(&'\n') {
                        self.chars.next();
                    }
                    if row_started {
                        row.push(field);
                    }
                    return Some(Ok(row));
                }
                _ => {
                    field.push(c);
                    field_started = true;
                    row_started = true;
                }
            }
        }
    }
}
