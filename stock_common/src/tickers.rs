//! Ticker symbols and the directory service used to validate and name them.
//!
//! The built-in `Ticker` enum doubles as the default directory: every variant is a
//! valid symbol and carries its company name as the strum message. A `FileListing`
//! can replace it with symbols loaded from a text listing.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use strum::EnumMessage as _;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumMessage, EnumString};

use crate::error::MarketError;
use crate::result::Result;

/// Lookup of ticker symbols and the companies behind them.
pub trait TickerDirectory: Send + Sync {
    /// Whether `symbol` is a recognised ticker.
    fn is_valid_symbol(&self, symbol: &str) -> bool;

    /// Company name for `symbol`, if known.
    fn company_name(&self, symbol: &str) -> Option<String>;
}

/// Trims and upper-cases a user supplied symbol before lookup.
pub fn normalize_symbol(symbol: &str) -> String {
    symbol.trim().to_ascii_uppercase()
}

/// Set of built-in ticker symbols.
#[allow(missing_docs)]
#[derive(
    Debug,
    Clone,
    Copy,
    Display,
    EnumString,
    EnumIter,
    EnumMessage,
    Hash,
    Eq,
    PartialEq,
)]
#[strum(ascii_case_insensitive)]
pub enum Ticker {
    #[strum(message = "Apple Inc.")]
    AAPL,
    #[strum(message = "Microsoft Corporation")]
    MSFT,
    #[strum(message = "Alphabet Inc.")]
    GOOGL,
    #[strum(message = "Amazon.com, Inc.")]
    AMZN,
    #[strum(message = "NVIDIA Corporation")]
    NVDA,
    #[strum(message = "Meta Platforms, Inc.")]
    META,
    #[strum(message = "Tesla, Inc.")]
    TSLA,
    #[strum(message = "JPMorgan Chase & Co.")]
    JPM,
    #[strum(message = "Johnson & Johnson")]
    JNJ,
    #[strum(message = "Visa Inc.")]
    V,
    #[strum(message = "The Procter & Gamble Company")]
    PG,
    #[strum(message = "UnitedHealth Group Incorporated")]
    UNH,
    #[strum(message = "The Home Depot, Inc.")]
    HD,
    #[strum(message = "The Walt Disney Company")]
    DIS,
    #[strum(message = "PayPal Holdings, Inc.")]
    PYPL,
    #[strum(message = "Netflix, Inc.")]
    NFLX,
    #[strum(message = "Adobe Inc.")]
    ADBE,
    #[strum(message = "Salesforce, Inc.")]
    CRM,
    #[strum(message = "Intel Corporation")]
    INTC,
    #[strum(message = "Cisco Systems, Inc.")]
    CSCO,
    #[strum(message = "Pfizer Inc.")]
    PFE,
    #[strum(message = "Abbott Laboratories")]
    ABT,
    #[strum(message = "Thermo Fisher Scientific Inc.")]
    TMO,
    #[strum(message = "AbbVie Inc.")]
    ABBV,
    #[strum(message = "Eli Lilly and Company")]
    LLY,
    #[strum(message = "PepsiCo, Inc.")]
    PEP,
    #[strum(message = "Costco Wholesale Corporation")]
    COST,
    #[strum(message = "Texas Instruments Incorporated")]
    TXN,
    #[strum(message = "Broadcom Inc.")]
    AVGO,
    #[strum(message = "Accenture plc")]
    ACN,
    #[strum(message = "QUALCOMM Incorporated")]
    QCOM,
    #[strum(message = "Danaher Corporation")]
    DHR,
    #[strum(message = "Medtronic plc")]
    MDT,
    #[strum(message = "NIKE, Inc.")]
    NKE,
    #[strum(message = "United Parcel Service, Inc.")]
    UPS,
    #[strum(message = "RTX Corporation")]
    RTX,
    #[strum(message = "Honeywell International Inc.")]
    HON,
    #[strum(message = "Oracle Corporation")]
    ORCL,
    #[strum(message = "Linde plc")]
    LIN,
    #[strum(message = "Amgen Inc.")]
    AMGN,
    #[strum(message = "Lowe's Companies, Inc.")]
    LOW,
    #[strum(message = "Starbucks Corporation")]
    SBUX,
    #[strum(message = "S&P Global Inc.")]
    SPGI,
    #[strum(message = "Intuit Inc.")]
    INTU,
    #[strum(message = "Intuitive Surgical, Inc.")]
    ISRG,
    #[strum(message = "AT&T Inc.")]
    T,
    #[strum(message = "Bristol-Myers Squibb Company")]
    BMY,
    #[strum(message = "Deere & Company")]
    DE,
    #[strum(message = "Prologis, Inc.")]
    PLD,
    #[strum(message = "The Cigna Group")]
    CI,
    #[strum(message = "Caterpillar Inc.")]
    CAT,
    #[strum(message = "The Goldman Sachs Group, Inc.")]
    GS,
    #[strum(message = "Union Pacific Corporation")]
    UNP,
    #[strum(message = "American Tower Corporation")]
    AMT,
    #[strum(message = "American Express Company")]
    AXP,
    #[strum(message = "Morgan Stanley")]
    MS,
    #[strum(message = "BlackRock, Inc.")]
    BLK,
    #[strum(message = "General Electric Company")]
    GE,
    #[strum(message = "Stryker Corporation")]
    SYK,
    #[strum(message = "Gilead Sciences, Inc.")]
    GILD,
    #[strum(message = "3M Company")]
    MMM,
    #[strum(message = "Altria Group, Inc.")]
    MO,
    #[strum(message = "Lockheed Martin Corporation")]
    LMT,
    #[strum(message = "Fiserv, Inc.")]
    FISV,
    #[strum(message = "Analog Devices, Inc.")]
    ADI,
    #[strum(message = "Booking Holdings Inc.")]
    BKNG,
    #[strum(message = "Citigroup Inc.")]
    C,
    #[strum(message = "The Southern Company")]
    SO,
    #[strum(message = "NextEra Energy, Inc.")]
    NEE,
    #[strum(message = "Zoetis Inc.")]
    ZTS,
    #[strum(message = "Target Corporation")]
    TGT,
    #[strum(message = "Duke Energy Corporation")]
    DUK,
    #[strum(message = "Intercontinental Exchange, Inc.")]
    ICE,
    #[strum(message = "Becton, Dickinson and Company")]
    BDX,
    #[strum(message = "The PNC Financial Services Group, Inc.")]
    PNC,
    #[strum(message = "Comcast Corporation")]
    CMCSA,
    #[strum(message = "The Charles Schwab Corporation")]
    SCHW,
    #[strum(message = "Mondelez International, Inc.")]
    MDLZ,
    #[strum(message = "The TJX Companies, Inc.")]
    TJX,
    #[strum(message = "U.S. Bancorp")]
    USB,
    #[strum(message = "Colgate-Palmolive Company")]
    CL,
    #[strum(message = "Emerson Electric Co.")]
    EMR,
    #[strum(message = "Air Products and Chemicals, Inc.")]
    APD,
    #[strum(message = "Capital One Financial Corporation")]
    COF,
    #[strum(message = "FedEx Corporation")]
    FDX,
    #[strum(message = "Aon plc")]
    AON,
    #[strum(message = "Waste Management, Inc.")]
    WM,
    #[strum(message = "Ecolab Inc.")]
    ECL,
    #[strum(message = "Illinois Tool Works Inc.")]
    ITW,
    #[strum(message = "Vertex Pharmaceuticals Incorporated")]
    VRTX,
    #[strum(message = "Dominion Energy, Inc.")]
    D,
    #[strum(message = "Norfolk Southern Corporation")]
    NSC,
    #[strum(message = "The Progressive Corporation")]
    PGR,
    #[strum(message = "Eaton Corporation plc")]
    ETN,
    #[strum(message = "Fidelity National Information Services, Inc.")]
    FIS,
    #[strum(message = "Public Storage")]
    PSA,
    #[strum(message = "KLA Corporation")]
    KLAC,
    #[strum(message = "McDonald's Corporation")]
    MCD,
    #[strum(message = "Automatic Data Processing, Inc.")]
    ADP,
    #[strum(message = "Aptiv PLC")]
    APTV,
    #[strum(message = "American Electric Power Company, Inc.")]
    AEP,
    #[strum(message = "Moody's Corporation")]
    MCO,
    #[strum(message = "The Sherwin-Williams Company")]
    SHW,
    #[strum(message = "DuPont de Nemours, Inc.")]
    DD,
    #[strum(message = "Roper Technologies, Inc.")]
    ROP,
    #[strum(message = "Schlumberger Limited")]
    SLB,
    #[strum(message = "Humana Inc.")]
    HUM,
    #[strum(message = "Boston Scientific Corporation")]
    BSX,
    #[strum(message = "Northrop Grumman Corporation")]
    NOC,
    #[strum(message = "Edwards Lifesciences Corporation")]
    EW,
    #[strum(message = "Harley-Davidson, Inc.")]
    HOG,
    #[strum(message = "Companhia Brasileira de Distribuicao")]
    CBD,
}

impl Ticker {
    /// Company name attached to the ticker.
    pub fn company_name(&self) -> &'static str {
        self.get_message().unwrap_or("")
    }
}

/// Directory backed by the built-in `Ticker` set.
#[derive(Debug, Default, Clone, Copy)]
pub struct BuiltinListing;

impl TickerDirectory for BuiltinListing {
    fn is_valid_symbol(&self, symbol: &str) -> bool {
        normalize_symbol(symbol).parse::<Ticker>().is_ok()
    }

    fn company_name(&self, symbol: &str) -> Option<String> {
        normalize_symbol(symbol)
            .parse::<Ticker>()
            .ok()
            .map(|ticker| ticker.company_name().to_string())
    }
}

impl BuiltinListing {
    /// All built-in tickers in declaration order.
    pub fn tickers() -> Vec<Ticker> {
        Ticker::iter().collect()
    }
}

/// Directory loaded from a text listing of `SYMBOL,Company Name` lines.
#[derive(Debug, Default, Clone)]
pub struct FileListing {
    companies: HashMap<String, String>,
}

impl FileListing {
    /// Opens and parses the listing at `path`.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(BufReader::new(file))
    }

    /// Parses a listing from a buffered reader.
    ///
    /// Each non-empty line that does not start with `#` holds a symbol and a company
    /// name separated by `,` or `|`. Returns an error on the first malformed line.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut companies = HashMap::new();

        for (index, line_result) in reader.lines().enumerate() {
            let line = line_result.map_err(MarketError::Io)?;
            let trimmed_line = line.trim();
            if trimmed_line.is_empty() || trimmed_line.starts_with('#') {
                continue;
            }

            let (symbol, name) = trimmed_line
                .split_once([',', '|'])
                .ok_or_else(|| {
                    MarketError::ParseTickersFile(format!(
                        "line {}: expected `SYMBOL,Company Name`, got `{}`",
                        index + 1,
                        trimmed_line
                    ))
                })?;
            let symbol = normalize_symbol(symbol);
            let name = name.trim().trim_matches('"').trim();
            if symbol.is_empty() || name.is_empty() {
                return Err(MarketError::ParseTickersFile(format!(
                    "line {}: symbol and company name must not be empty",
                    index + 1
                )));
            }
            companies.insert(symbol, name.to_string());
        }
        Ok(Self { companies })
    }

    /// Number of symbols in the listing.
    pub fn len(&self) -> usize {
        self.companies.len()
    }

    /// Whether the listing is empty.
    pub fn is_empty(&self) -> bool {
        self.companies.is_empty()
    }
}

impl TickerDirectory for FileListing {
    fn is_valid_symbol(&self, symbol: &str) -> bool {
        self.companies.contains_key(&normalize_symbol(symbol))
    }

    fn company_name(&self, symbol: &str) -> Option<String> {
        self.companies.get(&normalize_symbol(symbol)).cloned()
    }
}
