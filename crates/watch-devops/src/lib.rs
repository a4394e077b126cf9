//! DevOps tools for market-watch
//!
//! Subprocess-backed helpers used by the reporting workflow to publish its
//! artifacts: git subcommands (status, branch, commit, push), a pytest
//! runner, unit-test scaffold generation, and TODO/FIXME scanning. Every
//! subprocess tool captures stdout, stderr, and the exit code verbatim.

pub mod error;
pub mod process;
pub mod scaffold;
pub mod scanner;
pub mod tools;

pub use error::{DevOpsError, Result};
pub use process::{CommandOutput, run_command};
pub use tools::{
    CodeScannerTool, GitBranchTool, GitCommitTool, GitPushTool, GitStatusTool, RunTestsTool,
    TestScaffoldTool,
};
