//! Market analysis tools for LLM agents

pub mod chart;
pub mod fundamental;
pub mod sector;
pub mod technical;

pub use chart::PriceChartTool;
pub use fundamental::FundamentalDataTool;
pub use sector::{Sector, SectorDiscoveryTool};
pub use technical::TechnicalAnalysisTool;
