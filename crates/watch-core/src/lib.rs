//! Core abstractions for market-watch
//!
//! This crate defines the tool abstraction shared by every tool family in the
//! workspace: the [`Tool`] trait, the [`ToolRegistry`] dispatch table, the
//! shared error type, and the configuration object threaded into tools at
//! construction time.

pub mod config;
pub mod error;
pub mod logging;
pub mod registry;
pub mod tool;

pub use config::{GitHubSettings, WatchConfig};
pub use error::{Error, Result};
pub use logging::init_tracing;
pub use registry::ToolRegistry;
pub use tool::Tool;
