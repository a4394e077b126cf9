//! Tool for company fundamentals snapshots

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use watch_core::{Result as CoreResult, Tool, WatchConfig};

use crate::api::{Quote, YahooFinanceClient};
use crate::error::{MarketError, Result};
use crate::tools::sector::Sector;

/// Tool assembling a fundamentals snapshot from quote history
///
/// The data source exposes no company-metadata endpoint, so the snapshot is
/// computed from a year of price history; anything it cannot provide is
/// reported as `N/A`.
pub struct FundamentalDataTool {
    yahoo_client: YahooFinanceClient,
    _config: Arc<WatchConfig>,
}

#[derive(Debug, Deserialize)]
struct FundamentalParams {
    ticker: String,
}

/// Figures derived from a year of daily quotes
#[derive(Debug, Clone, PartialEq)]
struct FundamentalSnapshot {
    price: f64,
    fifty_two_week_high: f64,
    fifty_two_week_low: f64,
    one_year_return_pct: f64,
    average_volume: u64,
}

impl FundamentalDataTool {
    /// Create a new fundamental data tool
    pub fn new(config: Arc<WatchConfig>) -> Self {
        Self {
            yahoo_client: YahooFinanceClient::new(),
            _config: config,
        }
    }

    async fn fetch_fundamentals(&self, params: FundamentalParams) -> Result<Value> {
        let ticker = params.ticker.to_uppercase();

        let quotes = self.yahoo_client.get_historical_range(&ticker, "1y").await?;
        let snapshot = snapshot_from_history(&ticker, &quotes)?;

        let sector = Sector::for_ticker(&ticker).map(|s| s.name());
        let summary = format_summary(&ticker, sector, &snapshot);

        Ok(json!({
            "ticker": ticker,
            "sector": sector.unwrap_or("N/A"),
            "price": snapshot.price,
            "fifty_two_week_high": snapshot.fifty_two_week_high,
            "fifty_two_week_low": snapshot.fifty_two_week_low,
            "one_year_return_pct": snapshot.one_year_return_pct,
            "average_volume": snapshot.average_volume,
            "summary": summary,
        }))
    }
}

/// Derive the snapshot figures from a year of daily quotes
fn snapshot_from_history(ticker: &str, quotes: &[Quote]) -> Result<FundamentalSnapshot> {
    let (Some(first), Some(last)) = (quotes.first(), quotes.last()) else {
        return Err(MarketError::DataUnavailable {
            symbol: ticker.to_string(),
            reason: "no price history returned".to_string(),
        });
    };

    let high = quotes.iter().map(|q| q.high).fold(f64::NEG_INFINITY, f64::max);
    let low = quotes.iter().map(|q| q.low).fold(f64::INFINITY, f64::min);
    let one_year_return_pct = if first.close > 0.0 {
        (last.close - first.close) / first.close * 100.0
    } else {
        0.0
    };
    let average_volume = quotes.iter().map(|q| q.volume).sum::<u64>() / quotes.len() as u64;

    Ok(FundamentalSnapshot {
        price: last.close,
        fifty_two_week_high: high,
        fifty_two_week_low: low,
        one_year_return_pct,
        average_volume,
    })
}

fn format_summary(ticker: &str, sector: Option<&str>, snapshot: &FundamentalSnapshot) -> String {
    format!(
        "Fundamentals for {ticker}:\n\
         - Sector: {}\n\
         - Price: ${:.2}\n\
         - 52 Week High: ${:.2}\n\
         - 52 Week Low: ${:.2}\n\
         - 1 Year Return: {:.1}%\n\
         - Average Daily Volume: {}",
        sector.unwrap_or("N/A"),
        snapshot.price,
        snapshot.fifty_two_week_high,
        snapshot.fifty_two_week_low,
        snapshot.one_year_return_pct,
        snapshot.average_volume,
    )
}

#[async_trait]
impl Tool for FundamentalDataTool {
    async fn execute(&self, params: Value) -> CoreResult<Value> {
        let params: FundamentalParams = serde_json::from_value(params).map_err(|e| {
            watch_core::Error::ToolFailed(format!("Invalid parameters: {e}"))
        })?;

        self.fetch_fundamentals(params)
            .await
            .map_err(|e| watch_core::Error::ToolFailed(e.to_string()))
    }

    fn name(&self) -> &str {
        "fundamental_data"
    }

    fn description(&self) -> &str {
        "Fetch key figures for a stock: latest price, 52-week high/low, \
         one-year return, average daily volume, and sector."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "ticker": {
                    "type": "string",
                    "description": "The stock ticker symbol"
                }
            },
            "required": ["ticker"]
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn synthetic_quotes(closes: &[f64]) -> Vec<Quote> {
        let start = Utc::now() - Duration::days(closes.len() as i64);
        closes
            .iter()
            .enumerate()
            .map(|(i, &close)| Quote {
                symbol: "TEST".to_string(),
                timestamp: start + Duration::days(i as i64),
                open: close,
                high: close + 2.0,
                low: close - 2.0,
                close,
                volume: 1000,
                adjclose: close,
            })
            .collect()
    }

    #[test]
    fn test_snapshot_from_history() {
        let quotes = synthetic_quotes(&[100.0, 120.0, 110.0]);
        let snapshot = snapshot_from_history("TEST", &quotes).unwrap();

        assert!((snapshot.price - 110.0).abs() < 1e-9);
        assert!((snapshot.fifty_two_week_high - 122.0).abs() < 1e-9);
        assert!((snapshot.fifty_two_week_low - 98.0).abs() < 1e-9);
        assert!((snapshot.one_year_return_pct - 10.0).abs() < 1e-9);
        assert_eq!(snapshot.average_volume, 1000);
    }

    #[test]
    fn test_snapshot_empty_history() {
        let err = snapshot_from_history("TEST", &[]).unwrap_err();
        assert!(matches!(err, MarketError::DataUnavailable { .. }));
    }

    #[test]
    fn test_format_summary_known_sector() {
        let snapshot = FundamentalSnapshot {
            price: 110.0,
            fifty_two_week_high: 122.0,
            fifty_two_week_low: 98.0,
            one_year_return_pct: 10.0,
            average_volume: 1000,
        };

        let summary = format_summary("NVDA", Some("Technology"), &snapshot);
        assert!(summary.contains("Fundamentals for NVDA"));
        assert!(summary.contains("Sector: Technology"));
        assert!(summary.contains("52 Week High: $122.00"));
    }

    #[test]
    fn test_format_summary_unknown_sector() {
        let snapshot = FundamentalSnapshot {
            price: 1.0,
            fifty_two_week_high: 1.0,
            fifty_two_week_low: 1.0,
            one_year_return_pct: 0.0,
            average_volume: 0,
        };

        let summary = format_summary("ZZZZ", None, &snapshot);
        assert!(summary.contains("Sector: N/A"));
    }

    #[test]
    fn test_tool_metadata() {
        let tool = FundamentalDataTool::new(Arc::new(WatchConfig::default()));
        assert_eq!(tool.name(), "fundamental_data");
        assert!(tool.description().contains("52-week"));
    }

    #[tokio::test]
    #[ignore] // Requires network access
    async fn test_execute_fundamentals() {
        let tool = FundamentalDataTool::new(Arc::new(WatchConfig::default()));

        let result = tool.execute(json!({ "ticker": "AAPL" })).await.unwrap();
        assert_eq!(result["ticker"], "AAPL");
        assert!(result["price"].as_f64().unwrap() > 0.0);
    }
}
