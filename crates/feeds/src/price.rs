//! Unit-price feed
//!
//! Polls the market-data endpoint and extracts the nested USD price
//! (`{"ripple":{"usd":0.52}}` for the default endpoint). A missing, null,
//! or non-positive price is treated as a failed cycle.

use std::sync::Arc;
use tracing::debug;

use xrpool_core::{FeedError, FeedKind, FeedResult};

use crate::fetch::{cache_busted, Fetch};
use crate::poller::FeedSource;

/// Unit-price source backed by the market-data endpoint
pub struct UnitPriceSource {
    url: String,
    path: Vec<String>,
    fetcher: Arc<dyn Fetch>,
}

impl UnitPriceSource {
    pub fn new(url: String, path: Vec<String>, fetcher: Arc<dyn Fetch>) -> Self {
        Self { url, path, fetcher }
    }
}

#[async_trait::async_trait]
impl FeedSource for UnitPriceSource {
    fn kind(&self) -> FeedKind {
        FeedKind::UnitPrice
    }

    async fn fetch_value(&self) -> FeedResult<f64> {
        let body = self.fetcher.get_text(&cache_busted(&self.url)).await?;
        debug!(feed = %self.kind(), bytes = body.len(), "fetched price document");
        parse_unit_price(&body, &self.path)
    }
}

/// Extract the USD price at `path` from a JSON document body.
pub fn parse_unit_price(body: &str, path: &[String]) -> FeedResult<f64> {
    let document: serde_json::Value = serde_json::from_str(body).map_err(FeedError::parse)?;

    let mut node = &document;
    for segment in path {
        node = node
            .get(segment)
            .ok_or_else(|| FeedError::Parse(format!("missing field {:?}", segment)))?;
    }

    let price = node
        .as_f64()
        .ok_or_else(|| FeedError::Parse(format!("usd price is not a number: {}", node)))?;

    if !(price > 0.0) || !price.is_finite() {
        return Err(FeedError::Parse(format!("usd price is not positive: {}", price)));
    }

    Ok(price)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path() -> Vec<String> {
        vec!["ripple".to_string(), "usd".to_string()]
    }

    #[test]
    fn test_nested_price() {
        let body = r#"{"ripple":{"usd":0.5234}}"#;
        assert_eq!(parse_unit_price(body, &path()).unwrap(), 0.5234);
    }

    #[test]
    fn test_missing_field_fails() {
        let body = r#"{"bitcoin":{"usd":60000.0}}"#;
        assert!(matches!(
            parse_unit_price(body, &path()),
            Err(FeedError::Parse(_))
        ));
    }

    #[test]
    fn test_null_and_zero_fail() {
        assert!(parse_unit_price(r#"{"ripple":{"usd":null}}"#, &path()).is_err());
        assert!(parse_unit_price(r#"{"ripple":{"usd":0}}"#, &path()).is_err());
        assert!(parse_unit_price(r#"{"ripple":{"usd":-1.2}}"#, &path()).is_err());
    }

    #[test]
    fn test_invalid_json_fails() {
        assert!(parse_unit_price("not json", &path()).is_err());
    }

    #[test]
    fn test_string_price_fails() {
        // The endpoint publishes numbers; a quoted value means schema drift
        assert!(parse_unit_price(r#"{"ripple":{"usd":"0.52"}}"#, &path()).is_err());
    }
}
