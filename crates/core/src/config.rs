//! Configuration types

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Published CSV export of the pool spreadsheet.
pub const DEFAULT_SHEET_URL: &str =
    "https://docs.google.com/spreadsheets/d/e/2PACX-1vTq3DXF6cJbMPmqwSGHJgPt5tQpMdBqTbbYUIorcg2a/pub?gid=0&single=true&output=csv";

/// Market-data endpoint for the XRP spot price in USD.
pub const DEFAULT_PRICE_URL: &str =
    "https://api.coingecko.com/api/v3/simple/price?ids=ripple&vs_currencies=usd";

/// Feed polling configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    pub url: String,
    pub poll_interval: Duration,
}

/// Complete dashboard configuration
///
/// All knobs are compiled-in defaults; the binary applies environment
/// overrides before handing the config to each component.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Pool-amount source (spreadsheet CSV export)
    pub sheet: FeedConfig,
    /// Zero-based column of the pool total in the first non-blank CSV row
    pub sheet_column: usize,
    /// Unit-price source (market-data JSON endpoint)
    pub price: FeedConfig,
    /// Path to the nested USD price field in the price document
    pub price_json_path: Vec<String>,
    /// Fixed annual yield rate
    pub annual_rate: f64,
    /// Counter animation duration
    pub animation_duration: Duration,
    /// Display refresh tick for animations and rendering
    pub refresh_tick: Duration,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            sheet: FeedConfig {
                url: DEFAULT_SHEET_URL.to_string(),
                poll_interval: Duration::from_secs(60),
            },
            sheet_column: 0,
            price: FeedConfig {
                url: DEFAULT_PRICE_URL.to_string(),
                poll_interval: Duration::from_secs(60),
            },
            price_json_path: vec!["ripple".to_string(), "usd".to_string()],
            annual_rate: 0.04,
            animation_duration: Duration::from_millis(800),
            refresh_tick: Duration::from_millis(16),
        }
    }
}
