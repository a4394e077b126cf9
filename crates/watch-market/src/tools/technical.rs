//! Tool for technical indicator analysis

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use ta::{
    Next,
    indicators::{ExponentialMovingAverage, RelativeStrengthIndex, SimpleMovingAverage},
};
use watch_core::{Result as CoreResult, Tool, WatchConfig};

use crate::api::YahooFinanceClient;
use crate::error::{MarketError, Result};

/// Tool computing RSI, MACD, and moving averages over a year of history
pub struct TechnicalAnalysisTool {
    yahoo_client: YahooFinanceClient,
    _config: Arc<WatchConfig>,
}

#[derive(Debug, Deserialize)]
struct TechnicalParams {
    ticker: String,
}

/// Latest indicator values over a close-price series
#[derive(Debug, Clone, PartialEq)]
struct IndicatorSnapshot {
    price: f64,
    rsi: f64,
    macd: f64,
    macd_signal: f64,
    sma_50: f64,
    sma_200: f64,
}

impl TechnicalAnalysisTool {
    /// Create a new technical analysis tool
    pub fn new(config: Arc<WatchConfig>) -> Self {
        Self {
            yahoo_client: YahooFinanceClient::new(),
            _config: config,
        }
    }

    async fn analyze(&self, params: TechnicalParams) -> Result<Value> {
        let ticker = params.ticker.to_uppercase();

        // A year of daily closes keeps the 200-day average meaningful
        let quotes = self.yahoo_client.get_historical_range(&ticker, "1y").await?;
        if quotes.is_empty() {
            return Err(MarketError::DataUnavailable {
                symbol: ticker,
                reason: "no price history returned".to_string(),
            });
        }

        let closes: Vec<f64> = quotes.iter().map(|q| q.close).collect();
        let snapshot = compute_indicators(&closes)?;
        let summary = format_summary(&ticker, &snapshot);

        Ok(json!({
            "ticker": ticker,
            "price": snapshot.price,
            "rsi_14": snapshot.rsi,
            "macd": snapshot.macd,
            "macd_signal": snapshot.macd_signal,
            "sma_50": snapshot.sma_50,
            "sma_200": snapshot.sma_200,
            "data_points": closes.len(),
            "summary": summary,
        }))
    }
}

/// Run the indicator set over a close-price series and keep the latest values
///
/// MACD is computed as the difference of 12- and 26-period EMAs with a
/// 9-period EMA signal line.
fn compute_indicators(closes: &[f64]) -> Result<IndicatorSnapshot> {
    if closes.is_empty() {
        return Err(MarketError::Indicator("empty price series".to_string()));
    }

    let mut rsi = RelativeStrengthIndex::new(14)
        .map_err(|e| MarketError::Indicator(e.to_string()))?;
    let mut sma_50 = SimpleMovingAverage::new(50)
        .map_err(|e| MarketError::Indicator(e.to_string()))?;
    let mut sma_200 = SimpleMovingAverage::new(200)
        .map_err(|e| MarketError::Indicator(e.to_string()))?;
    let mut ema_12 = ExponentialMovingAverage::new(12)
        .map_err(|e| MarketError::Indicator(e.to_string()))?;
    let mut ema_26 = ExponentialMovingAverage::new(26)
        .map_err(|e| MarketError::Indicator(e.to_string()))?;
    let mut signal = ExponentialMovingAverage::new(9)
        .map_err(|e| MarketError::Indicator(e.to_string()))?;

    let mut snapshot = IndicatorSnapshot {
        price: 0.0,
        rsi: 0.0,
        macd: 0.0,
        macd_signal: 0.0,
        sma_50: 0.0,
        sma_200: 0.0,
    };

    for &close in closes {
        snapshot.price = close;
        snapshot.rsi = rsi.next(close);
        snapshot.sma_50 = sma_50.next(close);
        snapshot.sma_200 = sma_200.next(close);
        snapshot.macd = ema_12.next(close) - ema_26.next(close);
        snapshot.macd_signal = signal.next(snapshot.macd);
    }

    Ok(snapshot)
}

/// Interpret an RSI reading against the 70/30 bands
fn interpret_rsi(rsi: f64) -> &'static str {
    if rsi > 70.0 {
        "Overbought"
    } else if rsi < 30.0 {
        "Oversold"
    } else {
        "Neutral"
    }
}

/// Format the analyst-facing summary text
fn format_summary(ticker: &str, snapshot: &IndicatorSnapshot) -> String {
    let crossover = if snapshot.macd > snapshot.macd_signal {
        "Bullish"
    } else {
        "Bearish"
    };
    let trend = if snapshot.price > snapshot.sma_200 {
        "Bullish"
    } else {
        "Bearish"
    };

    format!(
        "Technical Analysis for {ticker} (Price: ${:.2}):\n\
         - RSI (14): {:.2} ({})\n\
         - MACD: {:.4} (Signal: {:.4}) -> {crossover} Crossover\n\
         - SMA 50: ${:.2} | SMA 200: ${:.2}\n\
         - Trend: {trend} (vs 200 SMA)",
        snapshot.price,
        snapshot.rsi,
        interpret_rsi(snapshot.rsi),
        snapshot.macd,
        snapshot.macd_signal,
        snapshot.sma_50,
        snapshot.sma_200,
    )
}

#[async_trait]
impl Tool for TechnicalAnalysisTool {
    async fn execute(&self, params: Value) -> CoreResult<Value> {
        let params: TechnicalParams = serde_json::from_value(params).map_err(|e| {
            watch_core::Error::ToolFailed(format!("Invalid parameters: {e}"))
        })?;

        self.analyze(params)
            .await
            .map_err(|e| watch_core::Error::ToolFailed(e.to_string()))
    }

    fn name(&self) -> &str {
        "technical_analysis"
    }

    fn description(&self) -> &str {
        "Perform technical analysis on a stock including RSI, MACD, and moving \
         averages. Returns the indicator values and a summary."
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

    #[test]
    fn test_interpret_rsi_bands() {
        assert_eq!(interpret_rsi(75.0), "Overbought");
        assert_eq!(interpret_rsi(25.0), "Oversold");
        assert_eq!(interpret_rsi(50.0), "Neutral");
    }

    #[test]
    fn test_compute_indicators_rising_series() {
        let closes: Vec<f64> = (1..=250).map(|i| 100.0 + f64::from(i) * 0.5).collect();
        let snapshot = compute_indicators(&closes).unwrap();

        assert!((snapshot.price - 225.0).abs() < 1e-9);
        // A monotonically rising series is overbought and above both averages
        assert!(snapshot.rsi > 70.0);
        assert!(snapshot.price > snapshot.sma_50);
        assert!(snapshot.price > snapshot.sma_200);
        assert!(snapshot.macd > 0.0);
    }

    #[test]
    fn test_compute_indicators_empty_series() {
        let err = compute_indicators(&[]).unwrap_err();
        assert!(matches!(err, MarketError::Indicator(_)));
    }

    #[test]
    fn test_format_summary() {
        let snapshot = IndicatorSnapshot {
            price: 225.0,
            rsi: 82.5,
            macd: 1.2345,
            macd_signal: 0.9876,
            sma_50: 210.0,
            sma_200: 180.0,
        };

        let summary = format_summary("NVDA", &snapshot);
        assert!(summary.contains("Technical Analysis for NVDA (Price: $225.00)"));
        assert!(summary.contains("RSI (14): 82.50 (Overbought)"));
        assert!(summary.contains("Bullish Crossover"));
        assert!(summary.contains("Trend: Bullish (vs 200 SMA)"));
    }

    #[test]
    fn test_tool_metadata() {
        let tool = TechnicalAnalysisTool::new(Arc::new(WatchConfig::default()));

        assert_eq!(tool.name(), "technical_analysis");
        let schema = tool.input_schema();
        assert_eq!(schema["type"], "object");
    }

    #[tokio::test]
    #[ignore] // Requires network access
    async fn test_execute_analysis() {
        let tool = TechnicalAnalysisTool::new(Arc::new(WatchConfig::default()));

        let result = tool.execute(json!({ "ticker": "AAPL" })).await.unwrap();
        assert_eq!(result["ticker"], "AAPL");
        assert!(result["summary"].as_str().unwrap().contains("RSI"));
    }
}
