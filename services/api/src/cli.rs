use crate::console::{run_explain, run_leaderboard, run_solutions};
use crate::server;
use clap::{Args, Parser, Subcommand};
use impact_rank::error::AppError;
use impact_rank::rankings::FilterParams;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Impact Rank",
    about = "Serve and browse nonprofit impact rankings",
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
    /// Print the filtered leaderboard
    Leaderboard(LeaderboardArgs),
    /// Print matching entries from the solution finder
    Solutions(SolutionArgs),
    /// Print the explanation behind a metric
    Explain(ExplainArgs),
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

/// Where the console commands read rankings from. Falls back to the
/// configured snapshot, then the built-in sample outside production.
#[derive(Args, Debug, Default)]
pub(crate) struct DataArgs {
    /// Ranking snapshot JSON file
    #[arg(long)]
    pub(crate) snapshot: Option<PathBuf>,
    /// Leaderboard CSV export that replaces the snapshot leaderboard
    #[arg(long)]
    pub(crate) leaderboard_csv: Option<PathBuf>,
    /// Display language for labels (en, es)
    #[arg(long, default_value = "en")]
    pub(crate) lang: String,
    /// Print JSON instead of a text table
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct FilterArgs {
    /// Case-insensitive search text
    #[arg(long, short = 'q')]
    pub(crate) query: Option<String>,
    /// Sector, e.g. "education" or "Food Security"
    #[arg(long)]
    pub(crate) sector: Option<String>,
    /// Region, e.g. "north_america"
    #[arg(long)]
    pub(crate) region: Option<String>,
}

impl FilterArgs {
    pub(crate) fn params(&self) -> FilterParams {
        FilterParams {
            query: self.query.clone(),
            sector: self.sector.clone(),
            region: self.region.clone(),
            ..FilterParams::default()
        }
    }
}

#[derive(Args, Debug, Default)]
pub(crate) struct LeaderboardArgs {
    #[command(flatten)]
    pub(crate) filters: FilterArgs,
    /// Organization size (small, medium, large)
    #[arg(long)]
    pub(crate) size: Option<String>,
    /// rank, score, change, or roi
    #[arg(long)]
    pub(crate) sort: Option<String>,
    #[command(flatten)]
    pub(crate) data: DataArgs,
}

#[derive(Args, Debug, Default)]
pub(crate) struct SolutionArgs {
    #[command(flatten)]
    pub(crate) filters: FilterArgs,
    /// Business type, e.g. "cooperative" or "B Corp"
    #[arg(long)]
    pub(crate) business_type: Option<String>,
    /// Group served, matched against solution tags, e.g. "rural"
    #[arg(long)]
    pub(crate) demographic: Option<String>,
    /// effectiveness, reach, roi, or name
    #[arg(long)]
    pub(crate) sort: Option<String>,
    #[command(flatten)]
    pub(crate) data: DataArgs,
}

#[derive(Args, Debug)]
pub(crate) struct ExplainArgs {
    /// Metric id, e.g. impactScore or social_roi
    pub(crate) metric: String,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Leaderboard(args) => run_leaderboard(args),
        Command::Solutions(args) => run_solutions(args),
        Command::Explain(args) => run_explain(args),
    }
}
