mod cli;

use anyhow::Result;
use clap::{Parser, Subcommand};
use cli::{GenerateArgs, NodeArgs};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    // Used when no subcommand is given
    #[command(flatten)]
    generate: GenerateArgs,
}

impl Cli {
    fn into_command(self) -> Commands {
        self.command.unwrap_or(Commands::Generate(self.generate))
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate per instance type resource tables (default)
    Generate(GenerateArgs),
    /// EC2 node and EKS cluster info
    Node(NodeArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("ekstrap=info,ekstrap_rs=info"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    use Commands::*;
    match cli.into_command() {
        Generate(args) => args.main().await,
        Node(args) => args.main().await,
    }
}
