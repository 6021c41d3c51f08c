use crate::demo::{run_demo, run_directory_query, DemoArgs, DirectoryQueryArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use patch_tracker::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "PatchTracker",
    about = "Run and explore the PatchTracker legacy-system directory from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Work with the system directory
    Directory {
        #[command(subcommand)]
        command: DirectoryCommand,
    },
    /// Run an end-to-end demo covering directory search and both intake flows
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum DirectoryCommand {
    /// Filter the seeded directory and print the matching systems
    Query(DirectoryQueryArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Directory {
            command: DirectoryCommand::Query(args),
        } => run_directory_query(args),
        Command::Demo(args) => run_demo(args),
    }
}
