//! Pipeline specification types and the built-in daily pipeline

use crate::error::{PipelineError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use watch_core::ToolRegistry;

/// How the external runtime schedules the tasks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Process {
    /// Tasks run one after another, each seeing its predecessor's output
    Sequential,
}

/// An agent role with its tool bindings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleSpec {
    pub name: String,
    pub goal: String,
    pub backstory: String,
    /// Names of registry tools this role may call
    #[serde(default)]
    pub tools: Vec<String>,
}

/// One unit of work assigned to a role
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSpec {
    pub name: String,
    pub description: String,
    pub expected_output: String,
    pub role: String,
}

/// The complete pipeline definition consumed by the external runtime
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineSpec {
    pub process: Process,
    /// Throttle hint for the runtime's LLM calls
    #[serde(default)]
    pub max_requests_per_minute: Option<u32>,
    pub roles: Vec<RoleSpec>,
    pub tasks: Vec<TaskSpec>,
}

impl PipelineSpec {
    /// The built-in daily market research pipeline
    pub fn market_watch() -> Self {
        Self {
            process: Process::Sequential,
            max_requests_per_minute: Some(1),
            roles: vec![
                RoleSpec {
                    name: "market_scout".to_string(),
                    goal: "Identify the most promising tickers to analyze today"
                        .to_string(),
                    backstory: "A market generalist who watches every sector and keeps a \
                                shortlist of names with unusual momentum or news flow."
                        .to_string(),
                    tools: vec!["sector_discovery".to_string()],
                },
                RoleSpec {
                    name: "technical_analyst".to_string(),
                    goal: "Assess price action and momentum for each candidate".to_string(),
                    backstory: "A chartist who trusts indicators over narratives and always \
                                checks the trend against the 200-day average."
                        .to_string(),
                    tools: vec![
                        "price_chart".to_string(),
                        "technical_analysis".to_string(),
                    ],
                },
                RoleSpec {
                    name: "fundamental_analyst".to_string(),
                    goal: "Judge whether each candidate's valuation supports a position"
                        .to_string(),
                    backstory: "A value-minded analyst who wants the 52-week context and \
                                liquidity picture before endorsing any trade."
                        .to_string(),
                    tools: vec!["fundamental_data".to_string()],
                },
                RoleSpec {
                    name: "risk_manager".to_string(),
                    goal: "Flag concentration, liquidity, and macro risks in the candidate \
                           list"
                        .to_string(),
                    backstory: "A former prop-desk risk officer who assumes every thesis is \
                                wrong until the downside is quantified."
                        .to_string(),
                    tools: vec![],
                },
                RoleSpec {
                    name: "chief_investment_officer".to_string(),
                    goal: "Select the final top five short-term and long-term picks"
                        .to_string(),
                    backstory: "Synthesizes the desk's analysis into a decision and owns the \
                                call."
                        .to_string(),
                    tools: vec![],
                },
                RoleSpec {
                    name: "reporter".to_string(),
                    goal: "Publish the daily report and dashboard data".to_string(),
                    backstory: "Turns the desk's conclusions into a polished document the \
                                rest of the firm actually reads."
                        .to_string(),
                    tools: vec!["market_report".to_string()],
                },
            ],
            tasks: vec![
                TaskSpec {
                    name: "scout_task".to_string(),
                    description: "Survey the sector table and select 10-15 candidate \
                                  tickers worth analyzing today, covering at least four \
                                  sectors."
                        .to_string(),
                    expected_output: "A list of candidate tickers with a one-line rationale \
                                      for each."
                        .to_string(),
                    role: "market_scout".to_string(),
                },
                TaskSpec {
                    name: "technical_analysis_task".to_string(),
                    description: "For each candidate, generate a price chart and compute \
                                  RSI, MACD, and moving averages; classify the trend."
                        .to_string(),
                    expected_output: "Per-ticker technical summaries and the chart file \
                                      paths."
                        .to_string(),
                    role: "technical_analyst".to_string(),
                },
                TaskSpec {
                    name: "fundamental_analysis_task".to_string(),
                    description: "For each candidate, pull the fundamentals snapshot and \
                                  note valuation or liquidity concerns."
                        .to_string(),
                    expected_output: "Per-ticker fundamental summaries.".to_string(),
                    role: "fundamental_analyst".to_string(),
                },
                TaskSpec {
                    name: "risk_assessment_task".to_string(),
                    description: "Review the combined analysis and flag position, sector, \
                                  and macro risks that should exclude or cap any candidate."
                        .to_string(),
                    expected_output: "A risk memo covering the candidate list.".to_string(),
                    role: "risk_manager".to_string(),
                },
                TaskSpec {
                    name: "investment_decision_task".to_string(),
                    description: "Weigh the technical, fundamental, and risk input and \
                                  choose the final picks."
                        .to_string(),
                    expected_output: "A markdown report with 'Top 5 Short-Term Picks' and \
                                      'Top 5 Long-Term Picks' sections, each pick as \
                                      '- **TICKER**: reason'."
                        .to_string(),
                    role: "chief_investment_officer".to_string(),
                },
                TaskSpec {
                    name: "reporting_task".to_string(),
                    description: "Render the decision report as the daily Word document and \
                                  dashboard data file, embedding the generated charts."
                        .to_string(),
                    expected_output: "Paths of the written report artifacts.".to_string(),
                    role: "reporter".to_string(),
                },
            ],
        }
    }

    /// Parse a pipeline definition from YAML
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Serialize the pipeline definition to YAML
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Load a pipeline definition from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        Self::from_yaml(&std::fs::read_to_string(path)?)
    }

    /// Look up a role by name
    pub fn role(&self, name: &str) -> Option<&RoleSpec> {
        self.roles.iter().find(|role| role.name == name)
    }

    /// Every tool name referenced by any role
    pub fn tool_names(&self) -> Vec<&str> {
        self.roles
            .iter()
            .flat_map(|role| role.tools.iter().map(String::as_str))
            .collect()
    }

    /// Validate the definition against a tool registry
    ///
    /// Checks that the pipeline is non-empty, role names are unique, every
    /// task references a declared role, and every tool binding resolves.
    pub fn validate(&self, registry: &ToolRegistry) -> Result<()> {
        if self.roles.is_empty() || self.tasks.is_empty() {
            return Err(PipelineError::Empty);
        }

        let mut seen = HashSet::new();
        for role in &self.roles {
            if !seen.insert(role.name.as_str()) {
                return Err(PipelineError::DuplicateRole(role.name.clone()));
            }

            for tool in &role.tools {
                if registry.get(tool).is_none() {
                    return Err(PipelineError::UnknownTool {
                        role: role.name.clone(),
                        tool: tool.clone(),
                    });
                }
            }
        }

        for task in &self.tasks {
            if self.role(&task.role).is_none() {
                return Err(PipelineError::UnknownRole {
                    task: task.name.clone(),
                    role: task.role.clone(),
                });
            }
        }

        Ok(())
    }
}
