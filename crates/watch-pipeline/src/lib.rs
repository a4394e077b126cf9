//! Declarative pipeline definition for market-watch
//!
//! The daily research workflow is described as plain data: a set of agent
//! roles with tool bindings, and a fixed sequence of tasks executed by an
//! external agent runtime. This crate owns the definition, its YAML surface,
//! and validation of tool and role references; it does not execute anything.

pub mod error;
pub mod spec;

pub use error::{PipelineError, Result};
pub use spec::{PipelineSpec, Process, RoleSpec, TaskSpec};
