use std::path::PathBuf;

use clap::{Parser, Subcommand};
use importer::{
    FilterConfig, LogNotifier, RunConfig, RunOutcome, WcaClient,
    filter::filter_dump_file,
};
use storage::services::record_diff;
use storage::snapshot::StoredState;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "nr-check")]
#[command(about = "WCA national record tracker", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a full check against an already-extracted export directory
    Check {
        #[arg(long, default_value = "./exports")]
        export_dir: PathBuf,

        #[arg(long, default_value = "./records/records.json")]
        snapshot: PathBuf,

        #[arg(long, default_value = "./work")]
        work_dir: PathBuf,

        #[arg(long, env = "WCA_COUNTRY")]
        country: String,
    },
    /// Filter a raw dump without running the rest of the pipeline
    Filter {
        input: PathBuf,

        output: PathBuf,

        #[arg(long, env = "WCA_COUNTRY")]
        country: String,
    },
    /// Query the latest export information, optionally downloading the archive
    Fetch {
        #[arg(long)]
        download_to: Option<PathBuf>,
    },
    /// Compare two persisted snapshots and print the new records
    Diff {
        old: PathBuf,

        new: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("nr_check={log_level},importer={log_level},storage={log_level}").into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Commands::Check {
            export_dir,
            snapshot,
            work_dir,
            country,
        } => {
            let config = RunConfig::new(export_dir, &work_dir, snapshot, country);
            match importer::run(&config, &LogNotifier).await? {
                RunOutcome::UpToDate => {
                    println!("Snapshot already covers the latest export.");
                }
                RunOutcome::Completed { new_records } => {
                    println!("Processed new export: {} new record(s).", new_records.len());
                    for record in &new_records {
                        println!("  {record}");
                    }
                }
            }
        }
        Commands::Filter {
            input,
            output,
            country,
        } => {
            let config = FilterConfig::national_records(&country);
            let report = filter_dump_file(&input, &output, &config)?;
            report.ensure_complete()?;
            println!("Filtered dump written to {}.", output.display());
        }
        Commands::Fetch { download_to } => {
            let client = WcaClient::new();
            let info = client.fetch_export_info().await?;
            println!("Latest export: {}", info.export_date);
            println!("SQL archive:   {}", info.sql_url);
            if let Some(dest) = download_to {
                client.download_sql_export(&info, &dest).await?;
                println!("Downloaded to {}.", dest.display());
            }
        }
        Commands::Diff { old, new } => {
            let old_state = StoredState::load(&old)?;
            let new_state = StoredState::load(&new)?;
            let new_records = record_diff::new_records(&old_state.records, &new_state.records);
            if new_records.is_empty() {
                println!("No new records.");
            }
            for record in &new_records {
                println!("{record}");
            }
        }
    }

    Ok(())
}
