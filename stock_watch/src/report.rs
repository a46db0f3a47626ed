//! Fixed-width console report written once per polling cycle.
use std::fmt;
use std::io::{self, Write};

use chrono::{DateTime, Local};

/// Width of the `#` banner framing each cycle.
pub const BANNER_WIDTH: usize = 158;

/// Writes the timestamp line, the opening banner and the column titles.
pub fn write_header<W: Write + ?Sized>(out: &mut W, now: DateTime<Local>) -> io::Result<()> {
    writeln!(out, "{}", now.format("%a %b %e %H:%M:%S %Z %Y"))?;
    write_banner(out)?;
    writeln!(
        out,
        "{:>48}\t{:>10}\t{:>10}\t{:>10}\t{:>10}\t{}",
        "Stock Name and Symbol ",
        "Prev. Close ",
        "Cur. Price ",
        "Change ",
        "% Change ",
        "Change since Previous "
    )
}

/// Writes the closing banner.
pub fn write_footer<W: Write + ?Sized>(out: &mut W) -> io::Result<()> {
    write_banner(out)
}

fn write_banner<W: Write + ?Sized>(out: &mut W) -> io::Result<()> {
    writeln!(out, "{}", "#".repeat(BANNER_WIDTH))
}

/// One symbol's line in the report.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    /// Ticker symbol.
    pub symbol: String,
    /// Company name from the directory.
    pub company: String,
    /// Previous close.
    pub previous_close: f64,
    /// Current price.
    pub current_price: f64,
    /// Change since close.
    pub change: f64,
    /// Percent change since close.
    pub percent_change: f64,
    /// Change since the previous cycle; absent on the first cycle.
    pub since_last_check: Option<f64>,
}

impl fmt::Display for ReportRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:>40} ({:>5}) \t  ${:>7.2}\t  ${:>7.2}\t  ${:>7.2}\t  {:>7.2}%",
            self.company,
            self.symbol,
            self.previous_close,
            self.current_price,
            self.change,
            self.percent_change
        )?;
        if let Some(delta) = self.since_last_check {
            write!(f, "\t  ${:>7.2}", delta)?;
        }
        Ok(())
    }
}
