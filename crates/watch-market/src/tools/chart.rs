//! Tool for rendering price history charts

use async_trait::async_trait;
use chrono::NaiveDate;
use plotters::prelude::*;
use serde::Deserialize;
use serde_json::{Value, json};
use std::path::Path;
use std::sync::Arc;
use tracing::info;
use watch_core::{Result as CoreResult, Tool, WatchConfig};

use crate::api::{Quote, YahooFinanceClient};
use crate::error::{MarketError, Result};

const CHART_WIDTH: u32 = 1000;
const CHART_HEIGHT: u32 = 600;

/// Tool rendering a one-year logarithmic close-price chart as a PNG
pub struct PriceChartTool {
    yahoo_client: YahooFinanceClient,
    config: Arc<WatchConfig>,
}

#[derive(Debug, Deserialize)]
struct ChartParams {
    ticker: String,
}

impl PriceChartTool {
    /// Create a new price chart tool
    pub fn new(config: Arc<WatchConfig>) -> Self {
        Self {
            yahoo_client: YahooFinanceClient::new(),
            config,
        }
    }

    /// Fetch a year of history and render the chart
    async fn generate_chart(&self, params: ChartParams) -> Result<Value> {
        let ticker = params.ticker.to_uppercase();

        let quotes = self.yahoo_client.get_historical_range(&ticker, "1y").await?;
        if quotes.len() < 2 {
            return Err(MarketError::DataUnavailable {
                symbol: ticker,
                reason: "no price history returned".to_string(),
            });
        }

        std::fs::create_dir_all(&self.config.output_dir)?;
        let chart_path = self.config.output_dir.join(format!("{ticker}_chart.png"));

        render_price_chart(&ticker, &quotes, &chart_path)?;
        info!(ticker = %ticker, path = %chart_path.display(), "chart rendered");

        Ok(json!({
            "ticker": ticker,
            "chart_path": chart_path.to_string_lossy(),
            "data_points": quotes.len(),
        }))
    }
}

/// Render a logarithmic close-price line chart to `path`
///
/// Pure over the quote series so it can be exercised without network access.
fn render_price_chart(ticker: &str, quotes: &[Quote], path: &Path) -> Result<()> {
    let closes: Vec<f64> = quotes.iter().map(|q| q.close).collect();
    let min_close = closes.iter().copied().fold(f64::INFINITY, f64::min);
    let max_close = closes.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    // Log axis needs a strictly positive range
    let y_min = (min_close * 0.95).max(0.01);
    let y_max = (max_close * 1.05).max(y_min * 1.01);

    let start: NaiveDate = quotes[0].timestamp.date_naive();
    let end: NaiveDate = quotes[quotes.len() - 1].timestamp.date_naive();
    if start >= end {
        return Err(MarketError::Chart(format!(
            "degenerate date range for {ticker}: {start}..{end}"
        )));
    }

    let root = BitMapBackend::new(path, (CHART_WIDTH, CHART_HEIGHT)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| MarketError::Chart(e.to_string()))?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("{ticker} Price History (1 Year Logarithmic)"),
            ("sans-serif", 24),
        )
        .margin(12)
        .x_label_area_size(36)
        .y_label_area_size(60)
        .build_cartesian_2d(start..end, (y_min..y_max).log_scale())
        .map_err(|e| MarketError::Chart(e.to_string()))?;

    chart
        .configure_mesh()
        .x_desc("Date")
        .y_desc("Price (Log Scale)")
        .light_line_style(&WHITE.mix(0.8))
        .draw()
        .map_err(|e| MarketError::Chart(e.to_string()))?;

    chart
        .draw_series(LineSeries::new(
            quotes.iter().map(|q| (q.timestamp.date_naive(), q.close)),
            &BLUE,
        ))
        .map_err(|e| MarketError::Chart(e.to_string()))?
        .label(format!("{ticker} Close"))
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 16, y)], BLUE));

    chart
        .configure_series_labels()
        .border_style(&BLACK)
        .background_style(&WHITE.mix(0.8))
        .draw()
        .map_err(|e| MarketError::Chart(e.to_string()))?;

    root.present()
        .map_err(|e| MarketError::Chart(e.to_string()))?;

    Ok(())
}

#[async_trait]
impl Tool for PriceChartTool {
    async fn execute(&self, params: Value) -> CoreResult<Value> {
        let params: ChartParams = serde_json::from_value(params).map_err(|e| {
            watch_core::Error::ToolFailed(format!("Invalid parameters: {e}"))
        })?;

        self.generate_chart(params)
            .await
            .map_err(|e| watch_core::Error::ToolFailed(e.to_string()))
    }

    fn name(&self) -> &str {
        "price_chart"
    }

    fn description(&self) -> &str {
        "Generate a 1-year logarithmic price chart for a given stock ticker. \
         Saves the chart as a PNG file in the output directory and returns the file path."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "ticker": {
                    "type": "string",
                    "description": "The stock ticker symbol (e.g., 'NVDA', 'AAPL')"
                }
            },
            "required": ["ticker"]
        })
    }
}
