//! Market data and analysis tools
//!
//! Tools for the market-research workflow: price history retrieval (Yahoo
//! Finance), chart rendering, technical indicators, fundamentals snapshots,
//! and the static sector discovery table. Every tool is a stateless
//! request/response unit; nothing is cached across invocations.

pub mod api;
pub mod error;
pub mod tools;

pub use api::{Quote, YahooFinanceClient};
pub use error::{MarketError, Result};
pub use tools::{
    FundamentalDataTool, PriceChartTool, Sector, SectorDiscoveryTool, TechnicalAnalysisTool,
};
