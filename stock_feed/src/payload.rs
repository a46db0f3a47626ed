//! Provider payload parsers.
//!
//! Two wire formats are understood:
//! - JSON: an object (optionally wrapped in a one-element array and prefixed with `//`)
//!   with keys `t` (symbol), `l` (last trade), `pcls_fix` (previous close) and
//!   `c` (change). Prices may be JSON numbers or strings such as `"+1,234.50"`.
//! - CSV: a single line `symbol,last,date,time,change,...`; the previous close is
//!   derived as `last - change`.
//!
//! Parse failures are reported as `MarketError::Format`; the source that fetched the
//! payload turns them into `MarketError::Connection`.
use serde::Deserialize;
use stock_common::{MarketError, PayloadFormat, QuoteRecord, Result};

const CSV_SYMBOL: usize = 0;
const CSV_LAST_TRADE: usize = 1;
const CSV_CHANGE: usize = 4;

/// Parses `text` in the given `format` into a quote for `symbol`.
pub fn parse_quote(format: PayloadFormat, symbol: &str, text: &str) -> Result<QuoteRecord> {
    match format {
        PayloadFormat::Json => parse_json_quote(symbol, text),
        PayloadFormat::Csv => parse_csv_quote(symbol, text),
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Number {
    Float(f64),
    Text(String),
}

impl Number {
    fn value(&self, field: &str) -> Result<f64> {
        match self {
            Number::Float(value) => Ok(*value),
            Number::Text(text) => parse_price(text, field),
        }
    }
}

#[derive(Debug, Deserialize)]
struct JsonQuote {
    #[serde(rename = "t", default)]
    symbol: Option<String>,
    #[serde(rename = "l")]
    last_trade: Number,
    #[serde(rename = "pcls_fix")]
    previous_close: Number,
    #[serde(rename = "c")]
    change: Number,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum JsonPayload {
    Many(Vec<JsonQuote>),
    One(JsonQuote),
}

/// Parses a JSON key/value quote payload.
pub fn parse_json_quote(symbol: &str, text: &str) -> Result<QuoteRecord> {
    let body = text.trim_start();
    let body = body.strip_prefix("//").unwrap_or(body);

    let quote = match serde_json::from_str::<JsonPayload>(body)? {
        JsonPayload::One(quote) => quote,
        JsonPayload::Many(quotes) => quotes
            .into_iter()
            .next()
            .ok_or_else(|| MarketError::Format(String::from("empty quote list")))?,
    };

    let quote_symbol = quote
        .symbol
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(symbol);

    QuoteRecord::new(
        quote_symbol,
        quote.previous_close.value("pcls_fix")?,
        quote.last_trade.value("l")?,
        quote.change.value("c")?,
    )
}

/// Parses a positional CSV quote line.
pub fn parse_csv_quote(symbol: &str, text: &str) -> Result<QuoteRecord> {
    let line = text
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .ok_or_else(|| MarketError::Format(String::from("empty CSV payload")))?;

    let fields: Vec<&str> = line.split(',').map(|f| f.trim().trim_matches('"')).collect();
    if fields.len() <= CSV_CHANGE {
        return Err(MarketError::Format(format!(
            "expected at least {} CSV fields, got {}",
            CSV_CHANGE + 1,
            fields.len()
        )));
    }

    let last_trade = parse_price(fields[CSV_LAST_TRADE], "last trade")?;
    let change = parse_price(fields[CSV_CHANGE], "change")?;
    let quote_symbol = if fields[CSV_SYMBOL].is_empty() {
        symbol
    } else {
        fields[CSV_SYMBOL]
    };

    QuoteRecord::new(quote_symbol, last_trade - change, last_trade, change)
}

fn parse_price(raw: &str, field: &str) -> Result<f64> {
    let cleaned: String = raw.trim().chars().filter(|c| *c != ',').collect();
    let cleaned = cleaned.strip_prefix('+').unwrap_or(&cleaned);
    let value = cleaned
        .parse::<f64>()
        .map_err(|e| MarketError::Format(format!("invalid {field} value `{raw}`: {e}")))?;
    if !value.is_finite() {
        return Err(MarketError::Format(format!("{field} value `{raw}` is not finite")));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELTA: f64 = 1e-9;

    #[test]
    fn json_accepts_provider_wrapping_and_string_numbers() {
        let text = r#"// [ { "id": "694653", "t" : "GOOG", "e" : "NASDAQ", "l" : "1,234.50", "pcls_fix" : "1230.00", "c" : "+4.50" } ]"#;
        let quote = parse_json_quote("GOOG", text).unwrap();
        assert_eq!(quote.symbol(), "GOOG");
        assert!((quote.last_trade() - 1234.5).abs() < DELTA);
        assert!((quote.previous_close() - 1230.0).abs() < DELTA);
        assert!((quote.change() - 4.5).abs() < DELTA);
    }

    #[test]
    fn json_accepts_plain_object_with_numbers() {
        let quote = parse_json_quote("CBD", r#"{"l": 40.0, "pcls_fix": 35.5, "c": -1.25}"#).unwrap();
        assert_eq!(quote.symbol(), "CBD");
        assert!((quote.change() + 1.25).abs() < DELTA);
    }

    #[test]
    fn json_rejects_missing_fields_and_bad_numbers() {
        assert!(parse_json_quote("X", r#"{"l": "1.0", "c": "0.1"}"#).is_err());
        assert!(matches!(
            parse_json_quote("X", r#"{"l": "abc", "pcls_fix": "1", "c": "0"}"#),
            Err(MarketError::Format(_))
        ));
        assert!(matches!(
            parse_json_quote("X", "[]"),
            Err(MarketError::Format(_))
        ));
        assert!(matches!(
            parse_json_quote("X", "<html>"),
            Err(MarketError::Json(_))
        ));
    }

    #[test]
    fn csv_derives_previous_close_from_change() {
        let text = "\"HOG\",57.21,\"10/20/2008\",\"4:00pm\",+0.89,56.80,57.90,56.10,1234567\n";
        let quote = parse_csv_quote("HOG", text).unwrap();
        assert_eq!(quote.symbol(), "HOG");
        assert!((quote.last_trade() - 57.21).abs() < DELTA);
        assert!((quote.change() - 0.89).abs() < DELTA);
        assert!((quote.previous_close() - 56.32).abs() < 1e-6);
    }

    #[test]
    fn csv_rejects_short_lines_and_unavailable_values() {
        assert!(matches!(
            parse_csv_quote("HOG", "\"HOG\",57.21"),
            Err(MarketError::Format(_))
        ));
        assert!(parse_csv_quote("HOG", "\"HOG\",57.21,\"d\",\"t\",N/A").is_err());
        assert!(parse_csv_quote("HOG", "\n\n").is_err());
    }

    #[test]
    fn dispatches_on_format() {
        let csv = parse_quote(PayloadFormat::Csv, "T", ",10,d,t,1").unwrap();
        assert_eq!(csv.symbol(), "T");
        assert!((csv.previous_close() - 9.0).abs() < DELTA);
    }
}
