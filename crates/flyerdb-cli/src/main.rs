mod aggregate;
mod report;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "flyerdb-cli")]
#[command(about = "Best advertised prices from captured grocery flyers")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Reduce captured flyer pages to one best price per product
    Aggregate {
        /// JSON array of captured flyer pages
        #[arg(long)]
        input: PathBuf,
        /// Year assumed for flyer dates (defaults to the current year)
        #[arg(long)]
        year: Option<i32>,
        /// Which same-kind price wins across stores
        #[arg(long, value_enum, default_value_t = SelectArg::Highest)]
        select: SelectArg,
        /// Print records without writing to the database
        #[arg(long)]
        dry_run: bool,
    },
    /// Print stored best prices for one flyer date
    Report {
        /// Flyer date, YYYY-MM-DD
        #[arg(long)]
        date: String,
    },
    Db {
        #[command(subcommand)]
        command: DbCommands,
    },
}

#[derive(Debug, Subcommand)]
enum DbCommands {
    /// Apply pending migrations
    Migrate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SelectArg {
    Highest,
    Lowest,
}

impl From<SelectArg> for flyerdb_engine::Selection {
    fn from(arg: SelectArg) -> Self {
        match arg {
            SelectArg::Highest => flyerdb_engine::Selection::Highest,
            SelectArg::Lowest => flyerdb_engine::Selection::Lowest,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = flyerdb_core::load_app_config()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Aggregate {
            input,
            year,
            select,
            dry_run,
        } => {
            let options = aggregate::AggregateOptions {
                input,
                reference_year: year.unwrap_or_else(aggregate::current_year),
                selection: select.into(),
                dry_run,
            };
            aggregate::run_aggregate(&config, &options).await?;
        }
        Commands::Report { date } => report::run_report(&config, &date).await?,
        Commands::Db {
            command: DbCommands::Migrate,
        } => {
            let pool = flyerdb_db::connect_from_app_config(&config).await?;
            let applied = flyerdb_db::run_migrations(&pool).await?;
            println!("applied {applied} migration(s)");
        }
    }

    Ok(())
}
