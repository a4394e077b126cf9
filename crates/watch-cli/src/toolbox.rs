//! Registry assembly for the full tool set

use std::sync::Arc;
use watch_core::{ToolRegistry, WatchConfig};
use watch_devops::{
    CodeScannerTool, GitBranchTool, GitCommitTool, GitPushTool, GitStatusTool, RunTestsTool,
    TestScaffoldTool,
};
use watch_github::{CreateIssueTool, CreatePullRequestTool};
use watch_market::{
    FundamentalDataTool, PriceChartTool, SectorDiscoveryTool, TechnicalAnalysisTool,
};
use watch_report::MarketReportTool;

/// Build the registry with every tool, threading the shared configuration
pub fn build_registry(config: &Arc<WatchConfig>) -> Arc<ToolRegistry> {
    let registry = ToolRegistry::new();

    // Market data and analysis
    registry.register(Arc::new(SectorDiscoveryTool::new()));
    registry.register(Arc::new(PriceChartTool::new(config.clone())));
    registry.register(Arc::new(TechnicalAnalysisTool::new(config.clone())));
    registry.register(Arc::new(FundamentalDataTool::new(config.clone())));

    // Reporting
    registry.register(Arc::new(MarketReportTool::new(config.clone())));

    // GitHub actions
    registry.register(Arc::new(CreateIssueTool::new(config.clone())));
    registry.register(Arc::new(CreatePullRequestTool::new(config.clone())));

    // DevOps helpers
    registry.register(Arc::new(GitStatusTool::new()));
    registry.register(Arc::new(GitBranchTool::new()));
    registry.register(Arc::new(GitCommitTool::new()));
    registry.register(Arc::new(GitPushTool::new()));
    registry.register(Arc::new(TestScaffoldTool::new()));
    registry.register(Arc::new(RunTestsTool::new()));
    registry.register(Arc::new(CodeScannerTool::new()));

    Arc::new(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use watch_pipeline::PipelineSpec;

    #[test]
    fn test_registry_contains_expected_tools() {
        let config = Arc::new(WatchConfig::default());
        let registry = build_registry(&config);

        assert_eq!(registry.len(), 14);
        for name in [
            "sector_discovery",
            "price_chart",
            "technical_analysis",
            "fundamental_data",
            "market_report",
            "create_issue",
            "create_pull_request",
            "git_status",
            "git_branch",
            "git_commit",
            "git_push",
            "generate_test_scaffold",
            "run_tests",
            "scan_code",
        ] {
            assert!(registry.get(name).is_some(), "missing tool {name}");
        }
    }

    #[test]
    fn test_builtin_pipeline_binds_to_registry() {
        let config = Arc::new(WatchConfig::default());
        let registry = build_registry(&config);

        PipelineSpec::market_watch().validate(&registry).unwrap();
    }
}
