//! Command-line front end for the checklist tracker.
//!
//! # Responsibility
//! - Collect form fields, filter value and sort toggle from arguments.
//! - Run one request/response cycle per invocation, re-reading the store
//!   after every mutation before rendering.

mod api;
mod config;
mod render;

use api::{ActionResponse, ItemForm};
use checklist_core::db::open_db;
use checklist_core::{
    core_version, init_logging, ChecklistService, ItemStore, ItemViewQuery, SqliteItemStore,
    SubjectFilter,
};
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use config::{CliConfig, ConfigOverrides};
use log::{error, info};
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "checklist")]
#[command(about = "Track checklist items with subjects and deadline countdowns")]
#[command(version)]
struct Cli {
    /// SQLite database file [env: CHECKLIST_DB_PATH]
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Absolute directory for rolling log files [env: CHECKLIST_LOG_DIR]
    #[arg(long, global = true)]
    log_dir: Option<String>,

    /// trace|debug|info|warn|error [env: CHECKLIST_LOG_LEVEL]
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Add a new item (always starts as Not Done)
    Add {
        #[arg(long)]
        title: String,

        #[arg(long, default_value = "")]
        description: String,

        #[arg(long, default_value = "")]
        subject: String,

        /// `YYYY-MM-DD HH:MM[:SS]` (UTC) or RFC 3339 with offset
        #[arg(long)]
        deadline: String,
    },

    /// List items with countdowns
    List(ListArgs),

    /// Mark an item as done
    Done {
        id: String,
    },

    /// Delete an item permanently
    Delete {
        id: String,
    },

    /// Show subject filter choices
    Subjects,
}

#[derive(Args, Default)]
struct ListArgs {
    /// Exact subject to show, or `All`
    #[arg(long)]
    subject: Option<String>,

    #[arg(long)]
    sort_by_deadline: bool,

    /// Print cards as JSON
    #[arg(long)]
    json: bool,
}

impl ListArgs {
    fn query(&self) -> ItemViewQuery {
        ItemViewQuery {
            subject: SubjectFilter::from_input(self.subject.as_deref()),
            sort_by_deadline: self.sort_by_deadline,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            error!("event=cli_run module=cli status=error error={err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

/// Returns `Ok(false)` when the command ran but reported a failure.
fn run(cli: Cli) -> Result<bool, Box<dyn Error>> {
    let config = CliConfig::resolve(ConfigOverrides {
        db_path: cli.db,
        log_dir: cli.log_dir,
        log_level: cli.log_level,
    });
    if let Some(log_dir) = config.log_dir.as_deref() {
        init_logging(&config.log_level, log_dir)?;
    }
    info!(
        "event=cli_start module=cli status=ok core_version={}",
        core_version()
    );

    let conn = open_db(&config.db_path)?;
    let service = ChecklistService::new(SqliteItemStore::try_new(&conn)?);

    match cli.command {
        Command::Add {
            title,
            description,
            subject,
            deadline,
        } => {
            let form = ItemForm {
                title,
                description,
                subject,
                deadline,
            };
            respond_and_refresh(&service, api::add_item(&service, &form))
        }
        Command::Done { id } => respond_and_refresh(&service, api::mark_done(&service, &id)),
        Command::Delete { id } => respond_and_refresh(&service, api::delete_item(&service, &id)),
        Command::List(args) => {
            print_list(&service, &args)?;
            Ok(true)
        }
        Command::Subjects => {
            let view = service.refresh(&ItemViewQuery::default(), Utc::now())?;
            print!("{}", render::render_subjects(&view.subjects));
            Ok(true)
        }
    }
}

fn respond_and_refresh<S: ItemStore>(
    service: &ChecklistService<S>,
    response: ActionResponse,
) -> Result<bool, Box<dyn Error>> {
    if response.ok {
        println!("{}", response.message);
    } else {
        eprintln!("{}", response.message);
    }
    println!();
    print_list(service, &ListArgs::default())?;
    Ok(response.ok)
}

fn print_list<S: ItemStore>(
    service: &ChecklistService<S>,
    args: &ListArgs,
) -> Result<(), Box<dyn Error>> {
    let view = service.refresh(&args.query(), Utc::now())?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        print!("{}", render::render_view(&view));
    }
    Ok(())
}
