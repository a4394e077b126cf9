//! Command-line interface for market-watch

mod toolbox;

use clap::{Parser, Subcommand};
use comfy_table::Table;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use watch_core::WatchConfig;
use watch_pipeline::PipelineSpec;

#[derive(Parser, Debug)]
#[command(name = "market-watch")]
#[command(about = "Tools for the daily market research workflow", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the registered tools
    Tools,
    /// Run a single tool with JSON parameters
    Run {
        /// Tool name, as shown by `tools`
        #[arg(long)]
        tool: String,
        /// Tool parameters as a JSON object
        #[arg(long, default_value = "{}")]
        params: String,
    },
    /// Show or validate the pipeline definition
    Pipeline {
        /// Load the definition from a YAML file instead of the built-in one
        #[arg(long)]
        file: Option<PathBuf>,
        /// Validate tool and role bindings against the registry
        #[arg(long)]
        validate: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    watch_core::init_tracing();

    let cli = Cli::parse();
    let config = Arc::new(WatchConfig::from_env()?);
    let registry = toolbox::build_registry(&config);

    match cli.command {
        Commands::Tools => {
            let mut table = Table::new();
            table.set_header(vec!["Tool", "Description"]);
            for tool in registry.list_tools() {
                table.add_row(vec![tool.name(), tool.description()]);
            }
            println!("{table}");
        }

        Commands::Run { tool, params } => {
            let params: serde_json::Value = serde_json::from_str(&params)?;
            info!(tool = %tool, "dispatching tool");
            println!("{}", registry.dispatch(&tool, params).await);
        }

        Commands::Pipeline { file, validate } => {
            let spec = match file {
                Some(path) => PipelineSpec::load(&path)?,
                None => PipelineSpec::market_watch(),
            };

            if validate {
                spec.validate(&registry)?;
                println!("pipeline ok: {} roles, {} tasks", spec.roles.len(), spec.tasks.len());
            } else {
                print!("{}", spec.to_yaml()?);
            }
        }
    }

    Ok(())
}
