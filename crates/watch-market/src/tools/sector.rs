//! Static sector discovery table
//!
//! A lookup table of major tickers grouped by industry sector, used to scout
//! candidates across the market.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use watch_core::{Result as CoreResult, Tool};

/// Market sector buckets for candidate scouting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sector {
    Technology,
    Financials,
    Healthcare,
    Consumer,
    Industrial,
    Energy,
    HighVolatility,
}

impl Sector {
    /// Get sector name
    pub fn name(&self) -> &'static str {
        match self {
            Sector::Technology => "Technology",
            Sector::Financials => "Financials",
            Sector::Healthcare => "Healthcare",
            Sector::Consumer => "Consumer",
            Sector::Industrial => "Industrial",
            Sector::Energy => "Energy",
            Sector::HighVolatility => "High Volatility",
        }
    }

    /// Get the major tickers tracked for this sector
    pub fn tickers(&self) -> &'static [&'static str] {
        match self {
            Sector::Technology => &["NVDA", "AMD", "AAPL", "MSFT", "GOOGL", "PLTR", "AVGO", "ORCL"],
            Sector::Financials => &["JPM", "BAC", "V", "MA", "GS", "MS"],
            Sector::Healthcare => &["LLY", "JNJ", "UNH", "PFE", "ABBV"],
            Sector::Consumer => &["AMZN", "TSLA", "WMT", "COST", "KO", "PEP"],
            Sector::Industrial => &["CAT", "DE", "GE", "HON"],
            Sector::Energy => &["XOM", "CVX", "COP"],
            Sector::HighVolatility => &["COIN", "MSTR", "SMCI", "ARM"],
        }
    }

    /// Get all sectors
    pub fn all() -> Vec<Sector> {
        vec![
            Sector::Technology,
            Sector::Financials,
            Sector::Healthcare,
            Sector::Consumer,
            Sector::Industrial,
            Sector::Energy,
            Sector::HighVolatility,
        ]
    }

    /// Reverse lookup: which sector tracks a ticker
    pub fn for_ticker(ticker: &str) -> Option<Sector> {
        let upper = ticker.to_uppercase();
        Sector::all()
            .into_iter()
            .find(|sector| sector.tickers().contains(&upper.as_str()))
    }
}

/// Tool returning the sector discovery table
pub struct SectorDiscoveryTool;

impl SectorDiscoveryTool {
    /// Create a new sector discovery tool
    pub fn new() -> Self {
        Self
    }
}

impl Default for SectorDiscoveryTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for SectorDiscoveryTool {
    async fn execute(&self, _params: Value) -> CoreResult<Value> {
        let sectors: Vec<Value> = Sector::all()
            .into_iter()
            .map(|sector| {
                json!({
                    "sector": sector.name(),
                    "tickers": sector.tickers(),
                })
            })
            .collect();

        Ok(json!({ "sectors": sectors }))
    }

    fn name(&self) -> &str {
        "sector_discovery"
    }

    fn description(&self) -> &str {
        "Return a list of major stock tickers categorized by sector. \
         Useful for scouting potential investment candidates across the market."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {}
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sector_tickers() {
        assert!(Sector::Technology.tickers().contains(&"NVDA"));
        assert!(Sector::HighVolatility.tickers().contains(&"COIN"));
        assert_eq!(Sector::Energy.tickers(), &["XOM", "CVX", "COP"]);
    }

    #[test]
    fn test_for_ticker() {
        assert_eq!(Sector::for_ticker("NVDA"), Some(Sector::Technology));
        assert_eq!(Sector::for_ticker("nvda"), Some(Sector::Technology));
        assert_eq!(Sector::for_ticker("JPM"), Some(Sector::Financials));
        assert_eq!(Sector::for_ticker("ZZZZ"), None);
    }

    #[tokio::test]
    async fn test_execute_returns_all_sectors() {
        let tool = SectorDiscoveryTool::new();
        let result = tool.execute(json!({})).await.unwrap();

        let sectors = result["sectors"].as_array().unwrap();
        assert_eq!(sectors.len(), 7);
        assert_eq!(sectors[0]["sector"], "Technology");
    }

    #[test]
    fn test_tool_metadata() {
        let tool = SectorDiscoveryTool::new();
        assert_eq!(tool.name(), "sector_discovery");
        assert!(tool.description().contains("sector"));
    }
}
