use crate::report::{run_ask, run_report, AskArgs, ReportArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use personnel_insight::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Personnel Insight",
    about = "Readiness analytics and team selection over a personnel roster",
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
    /// Print one of the standing reports to stdout
    Report(ReportArgs),
    /// Ask a free-text what-if question against the roster
    Ask(AskArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Override the configured roster CSV path
    #[arg(long)]
    pub(crate) roster_csv: Option<std::path::PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Report(args) => run_report(args),
        Command::Ask(args) => run_ask(args),
    }
}
