mod common;
mod data_loader;
mod demo;
mod errors;
mod export;
mod generate_commands;
mod graph;
mod plan;
mod plan_execution;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[clap(author, version, about)]
struct Cli {
    #[clap(short, long, global = true)]
    log_level: Option<String>,
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build graph_data.json from people and relationship tables
    Run {
        #[clap(short, long)]
        plan: Option<String>,
        #[clap(short, long)]
        watch: bool,
    },
    /// Write a default plan file
    Init {
        #[clap(short, long)]
        plan: String,
    },
    /// Write the built-in company demo graph
    Demo {
        #[clap(short, long, default_value = "graph_data.json")]
        output: String,
    },
    Generate {
        #[clap(subcommand)]
        command: GenerateCommands,
    },
}

#[derive(Subcommand, Debug)]
enum GenerateCommands {
    Sample { sample: String, dir: String },
}

fn main() -> Result<()> {
    let args = Cli::parse();
    setup_logging(&args.log_level);

    match args.command {
        Commands::Run { plan, watch } => {
            plan_execution::execute_plan(plan, watch)?;
        }
        Commands::Init { plan } => {
            info!("Initializing plan: {}", plan);
            let plan_file_path = plan;
            let plan = plan::Plan::default();
            let serialized_plan = serde_yaml::to_string(&plan)?;
            common::write_string_to_file(&plan_file_path, &serialized_plan)?;
        }
        Commands::Demo { output } => {
            info!("Writing demo graph");
            let graph = demo::company_graph();
            let rendered = export::to_json::render(&graph)
                .map_err(|e| anyhow::anyhow!("Failed to render demo graph: {}", e))?;
            common::write_string_to_file(&output, &rendered)?;
            info!("{} created", output);
        }
        Commands::Generate { command } => match command {
            GenerateCommands::Sample { sample, dir } => {
                info!("Generating sample: {} in {}", sample, dir);
                generate_commands::generate_sample(sample, dir);
            }
        },
    }

    Ok(())
}

fn setup_logging(log_level: &Option<String>) {
    let log_level = match log_level
        .as_ref()
        .unwrap_or(&"info".to_string())
        .to_lowercase()
        .as_str()
    {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(log_level.to_string()))
        .without_time()
        .init();
}
