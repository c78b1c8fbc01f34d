//! Pool-amount feed
//!
//! Polls the published spreadsheet CSV export and extracts the pool total
//! from a fixed column of the first non-blank row. Spreadsheet cells often
//! carry locale formatting (`1,234.56 XRP`), sometimes unquoted, so the
//! extractor rejoins thousands groups severed by the comma split before
//! stripping the value down to its numeric characters.

use std::sync::Arc;
use tracing::debug;

use xrpool_core::{FeedError, FeedKind, FeedResult};

use crate::fetch::{cache_busted, Fetch};
use crate::poller::FeedSource;

/// Pool-amount source backed by the spreadsheet CSV export
pub struct PoolAmountSource {
    url: String,
    column: usize,
    fetcher: Arc<dyn Fetch>,
}

impl PoolAmountSource {
    pub fn new(url: String, column: usize, fetcher: Arc<dyn Fetch>) -> Self {
        Self {
            url,
            column,
            fetcher,
        }
    }
}

#[async_trait::async_trait]
impl FeedSource for PoolAmountSource {
    fn kind(&self) -> FeedKind {
        FeedKind::PoolAmount
    }

    async fn fetch_value(&self) -> FeedResult<f64> {
        let body = self.fetcher.get_text(&cache_busted(&self.url)).await?;
        debug!(feed = %self.kind(), bytes = body.len(), "fetched sheet export");
        parse_pool_amount(&body, self.column)
    }
}

/// Extract the pool total from a CSV document body.
pub fn parse_pool_amount(body: &str, column: usize) -> FeedResult<f64> {
    let line = body
        .lines()
        .find(|line| !line.trim().is_empty())
        .ok_or_else(|| FeedError::parse("document has no non-blank rows"))?;

    let cells = split_cells(line);
    let raw = extract_cell(&cells, column)
        .ok_or_else(|| FeedError::Parse(format!("row has no column {}", column)))?;

    let numeric = sanitize_numeric(&raw);
    let value: f64 = numeric
        .parse()
        .map_err(|_| FeedError::Parse(format!("not a number: {:?}", raw.trim())))?;

    if !value.is_finite() {
        return Err(FeedError::Parse(format!("not finite: {:?}", raw.trim())));
    }

    Ok(value)
}

/// Split one CSV row into cells, honoring double-quoted cells.
fn split_cells(line: &str) -> Vec<String> {
    let mut cells = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                chars.next();
                current.push('"');
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                cells.push(std::mem::take(&mut current));
            }
            _ => current.push(ch),
        }
    }
    cells.push(current);
    cells
}

/// Take the cell at `column`, rejoining an unquoted thousands-grouped number
/// that the comma split severed (`1,234.56` arrives as `1` + `234.56`).
///
/// A following cell is treated as a continuation while the accumulated text
/// is still an unbroken digit run and the next cell leads with exactly three
/// digits.
fn extract_cell(cells: &[String], column: usize) -> Option<String> {
    let mut acc = cells.get(column)?.trim().to_string();

    for next in cells.iter().skip(column + 1) {
        if !is_digit_run(&acc) {
            break;
        }
        let next = next.trim();
        if leading_digits(next) != 3 {
            break;
        }
        acc.push_str(next);
    }

    Some(acc)
}

fn is_digit_run(text: &str) -> bool {
    let digits = text.strip_prefix('-').unwrap_or(text);
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}

fn leading_digits(text: &str) -> usize {
    text.chars().take_while(|c| c.is_ascii_digit()).count()
}

/// Strip everything except digits, decimal points, and a single leading
/// minus sign.
fn sanitize_numeric(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '0'..='9' | '.' => out.push(ch),
            '-' if out.is_empty() => out.push(ch),
            _ => {}
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_plain_row() {
        assert_eq!(parse_pool_amount("1234.56,ignored\n", 0).unwrap(), 1234.56);
    }

    #[test]
    fn test_thousands_grouped_row() {
        assert_eq!(
            parse_pool_amount("1,234.56 XRP,ignored\n", 0).unwrap(),
            1234.56
        );
        assert_eq!(
            parse_pool_amount("1,234,567 XRP,rest", 0).unwrap(),
            1_234_567.0
        );
    }

    #[test]
    fn test_quoted_cell() {
        assert_eq!(
            parse_pool_amount("\"1,234.56 XRP\",ignored\n", 0).unwrap(),
            1234.56
        );
    }

    #[test]
    fn test_skips_blank_rows() {
        assert_eq!(parse_pool_amount("\n   \n42,second", 0).unwrap(), 42.0);
    }

    #[test]
    fn test_bare_minus_fails() {
        assert!(matches!(
            parse_pool_amount("-,ignored", 0),
            Err(FeedError::Parse(_))
        ));
    }

    #[test]
    fn test_empty_document_fails() {
        assert!(parse_pool_amount("", 0).is_err());
        assert!(parse_pool_amount("\n\n", 0).is_err());
    }

    #[test]
    fn test_missing_column_fails() {
        assert!(parse_pool_amount("only", 3).is_err());
    }

    #[test]
    fn test_negative_amount() {
        assert_eq!(parse_pool_amount("-1,250.75,x", 0).unwrap(), -1250.75);
    }

    #[test]
    fn test_surrounding_junk() {
        assert_eq!(parse_pool_amount("  987654 XRP total ,x", 0).unwrap(), 987654.0);
    }

    proptest! {
        #[test]
        fn prop_grouped_numbers_round_trip(value in -999_999_999.0f64..999_999_999.0) {
            let value = (value * 100.0).round() / 100.0;
            let row = format!("{} XRP,ignored", xrpool_core::format_amount(value, 2));
            let parsed = parse_pool_amount(&row, 0).unwrap();
            prop_assert!((parsed - value).abs() < 0.005, "row {:?} parsed to {}", row, parsed);
        }

        #[test]
        fn prop_plain_numbers_survive_junk(value in -1_000_000.0f64..1_000_000.0) {
            let value = (value * 100.0).round() / 100.0;
            let row = format!("{:.2} units,trailing junk", value);
            let parsed = parse_pool_amount(&row, 0).unwrap();
            prop_assert!((parsed - value).abs() < 0.005);
        }
    }
}
