//! pms-access - operational commands for the access-control engine
//!
//! Runs migrations, reconciles group drift and prints access reports.

#![allow(missing_docs)]

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pms_access::storage::Database;
use pms_access::utils::logging::init_tracing;
use pms_access::{AccessReport, Config, GroupReconciler, GroupSynchronizer, ProfileService};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::info;

const LONG_VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_HASH"), ")");

#[derive(Parser, Debug)]
#[command(name = "pms-access")]
#[command(version, long_version = LONG_VERSION)]
#[command(about = "Access-control maintenance for the patient monitoring system")]
struct Cli {
    /// YAML configuration file. Without it, configuration comes from PMS_* environment variables.
    #[arg(long, short, env = "PMS_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Apply pending database migrations
    Migrate,
    /// Put every account back in exactly its role group
    SyncGroups {
        /// Show what would be fixed without making changes
        #[arg(long)]
        dry_run: bool,
    },
    /// Print every profile with its role, groups and expected access
    Report {
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    match run(Cli::parse()).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    // A missing .env file is fine
    dotenvy::dotenv().ok();

    let config = match &cli.config {
        Some(path) => Config::from_file(path)
            .await
            .with_context(|| format!("Failed to load {}", path.display()))?,
        None => Config::from_env().context("Failed to load configuration from environment")?,
    };
    init_tracing(config.logging())?;

    let database = Database::new(config.database())
        .await
        .context("Failed to connect to database")?;
    info!(backend = ?database.backend_type(), "Connected to database");

    match cli.command {
        Command::Migrate => {
            database.migrate().await?;
            database.close().await?;
            println!("Migrations applied");
            Ok(ExitCode::SUCCESS)
        }
        Command::SyncGroups { dry_run } => {
            database.migrate().await?;
            let service = ProfileService::new(
                Arc::new(database),
                GroupSynchronizer::new(config.group_sync().clone()),
            );
            let reconciler = GroupReconciler::new(service);
            let report = reconciler.run(dry_run).await?;

            for entry in report.drifted() {
                println!(
                    "{} (role: {}) has groups {:?}, should be in [{}]: {:?}",
                    entry.account_id,
                    entry.role,
                    entry.current_groups,
                    entry.expected_group,
                    entry.status
                );
            }
            if dry_run {
                println!(
                    "DRY RUN: would fix group assignments for {} accounts",
                    report.drifted().count()
                );
            } else {
                println!("Fixed group assignments for {} accounts", report.fixed_count());
            }

            info!(checked = report.entries.len(), "sync-groups finished");
            Ok(if report.failed_count() > 0 {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            })
        }
        Command::Report { json } => {
            database.migrate().await?;
            let report = AccessReport::build(&database).await?;
            if json {
                println!("{}", report.to_json()?);
            } else {
                println!("{}", report);
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}
