//! DevOps tools for LLM agents

pub mod git;
pub mod scaffold;
pub mod scanner;
pub mod test_runner;

pub use git::{GitBranchTool, GitCommitTool, GitPushTool, GitStatusTool};
pub use scaffold::TestScaffoldTool;
pub use scanner::CodeScannerTool;
pub use test_runner::RunTestsTool;
