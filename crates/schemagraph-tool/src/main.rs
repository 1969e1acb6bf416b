//! CLI entry point for schemagraph.
//!
//! Reads a JSON graph request from stdin, writes a diagram or JSON result to
//! stdout. Logs go to stderr.

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use schemagraph_core::{TemplateType, ToolConfig};
use schemagraph_graph::{GraphData, NodeFactory};
use schemagraph_store::{GraphPersistence, SnapshotStore};
use schemagraph_tool::{render, GraphRequest, GraphTool};

#[derive(Parser)]
#[command(name = "schemagraph")]
#[command(about = "Build, narrow, and render ERD, class, and lineage graphs")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Config file prefix (default: schemagraph).
    #[arg(short, long, default_value = "schemagraph", global = true)]
    config: String,
}

#[derive(Subcommand)]
enum Command {
    /// Build a graph from a request (reads JSON from stdin).
    Build {
        /// Render with this template instead of printing JSON.
        #[arg(long)]
        template: Option<String>,
        /// Also save the graph to the snapshot store.
        #[arg(long)]
        save: bool,
    },
    /// Render the saved graph.
    Render {
        /// Template name (default: from config).
        #[arg(long)]
        template: Option<String>,
    },
    /// Shortest path between two nodes of the saved graph.
    Path {
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
    },
}

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    let config = ToolConfig::load(&cli.config)?;

    match cli.command {
        Command::Build { ref template, save } => {
            let input = std::io::read_to_string(std::io::stdin())?;
            let request: GraphRequest = serde_json::from_str(&input)?;

            let tool = GraphTool::new(config.clone());
            let graph = tool.create_graph(&request);

            if save {
                let mut store = SnapshotStore::open(&config.snapshot_path)?;
                store.save_graph(&graph)?;
            }

            match template {
                Some(name) => print!("{}", render(&graph, name.parse()?)),
                None => println!("{}", GraphTool::to_json(&graph)?),
            }
        }
        Command::Render { ref template } => {
            let template = resolve_template(template.as_deref(), &config)?;
            let graph = load_saved_graph(&config)?;
            print!("{}", render(&graph, template));
        }
        Command::Path { ref from, ref to } => {
            let graph = load_saved_graph(&config)?;
            let path = graph
                .shortest_path(from, to)?
                .map(|ids| graph.path_names(&ids).into_iter().map(String::from).collect::<Vec<_>>());
            println!("{}", serde_json::to_string(&path)?);
        }
    }

    Ok(())
}

fn resolve_template(name: Option<&str>, config: &ToolConfig) -> anyhow::Result<TemplateType> {
    match name {
        Some(name) => Ok(name.parse()?),
        None => Ok(config.template),
    }
}

fn load_saved_graph(config: &ToolConfig) -> anyhow::Result<GraphData> {
    let store = SnapshotStore::open(&config.snapshot_path)?;
    Ok(store.load_graph(NodeFactory::default())?)
}
