//! Casebook console launcher.
//!
//! Command-line console over the record-management backend: list views with
//! debounced search, filters, sorting and pagination; role-gated mutations;
//! and an interactive browser with place-name enrichment.

use anyhow::Result;
use casebook_ids::{CaseId, EvidenceId, OfficerId, ReportId, StatementId};
use casebook_logging::{init_logging, LogConfig};
use casebook_protocol::{
    CaseStatus, ReportStatus, SortKey, SortOrder, StatementKind, StatementStatus,
    DEFAULT_PAGE_SIZE,
};
use clap::{Parser, Subcommand};
use std::process::ExitCode;

mod cli;

use cli::context::require_login;

const DEFAULT_API_URL: &str = "http://localhost:5000/api";

#[derive(Parser, Debug)]
#[command(name = "casebook", about = "Console for the case-management backend")]
struct Cli {
    /// Enable verbose logging (info/debug to stderr)
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    /// Backend API base URL (overrides the one saved at login)
    #[arg(long, global = true, env = "CASEBOOK_API_URL")]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Authenticate against the backend and save a profile
    Login {
        /// Account email
        #[arg(long)]
        email: String,
        /// Password; prompted on stdin when omitted
        #[arg(long)]
        password: Option<String>,
    },
    /// Remove the saved profile
    Logout,
    /// Show the logged-in identity
    Whoami,
    /// Case records
    Cases {
        #[command(subcommand)]
        command: CaseCommands,
    },
    /// Witness/suspect/victim statements
    Statements {
        #[command(subcommand)]
        command: StatementCommands,
    },
    /// Evidence items
    Evidence {
        #[command(subcommand)]
        command: EvidenceCommands,
    },
    /// Investigation reports
    Reports {
        #[command(subcommand)]
        command: ReportCommands,
    },
    /// Interactive case browser
    Browse,
}

#[derive(Subcommand, Debug)]
enum CaseCommands {
    /// List cases
    List {
        /// Search in title, type and complainant
        #[arg(short, long)]
        search: Option<String>,
        /// Filter by status (open, pending, closed)
        #[arg(long)]
        status: Option<CaseStatus>,
        /// Sort field (date, id, officer)
        #[arg(long, default_value = "date")]
        sort_by: SortKey,
        /// Sort direction (asc, desc)
        #[arg(long, default_value = "desc")]
        sort_order: SortOrder,
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
        limit: u32,
        /// Skip reverse geocoding of case locations
        #[arg(long)]
        no_places: bool,
    },
    /// Open a new case
    Create {
        #[arg(long)]
        title: String,
        /// Crime type (free text, e.g. Theft, Assault)
        #[arg(long = "type")]
        case_type: String,
        #[arg(long)]
        description: Option<String>,
        /// Complainant name
        #[arg(long)]
        reported_by: Option<String>,
        /// Free-text address, forward-geocoded to coordinates
        #[arg(long, conflicts_with_all = ["lat", "lng"])]
        address: Option<String>,
        #[arg(long, requires = "lng")]
        lat: Option<f64>,
        #[arg(long, requires = "lat")]
        lng: Option<f64>,
        /// Officer to assign immediately
        #[arg(long)]
        assign: Option<OfficerId>,
    },
    /// Change a case's status
    Status { id: CaseId, status: CaseStatus },
    /// Assign a case to an officer
    Assign { id: CaseId, officer: OfficerId },
    /// Delete a case
    Delete { id: CaseId },
    /// Show a case's event timeline
    Timeline { id: CaseId },
    /// List assignable officers
    Officers,
}

#[derive(Subcommand, Debug)]
enum StatementCommands {
    /// List statements
    List {
        #[arg(short, long)]
        search: Option<String>,
        /// Restrict to one case
        #[arg(long)]
        case: Option<CaseId>,
        /// Filter by status (pending, reviewed, verified)
        #[arg(long)]
        status: Option<StatementStatus>,
        #[arg(long, default_value = "desc")]
        sort_order: SortOrder,
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
        limit: u32,
    },
    /// Record a statement against a case
    Add {
        #[arg(long)]
        case: CaseId,
        /// Person the statement was taken from
        #[arg(long)]
        person: String,
        /// witness, suspect or victim
        #[arg(long = "type")]
        kind: StatementKind,
        /// Recording officer's name
        #[arg(long)]
        officer: Option<String>,
        #[arg(long)]
        narrative: String,
    },
    /// Rewrite a statement's narrative
    Edit {
        id: StatementId,
        #[arg(long)]
        narrative: String,
    },
    /// Change a statement's review status
    Status {
        id: StatementId,
        status: StatementStatus,
    },
    /// Delete a statement
    Delete { id: StatementId },
}

#[derive(Subcommand, Debug)]
enum EvidenceCommands {
    /// List evidence items
    List {
        #[arg(short, long)]
        search: Option<String>,
        /// Restrict to one case
        #[arg(long)]
        case: Option<CaseId>,
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
        limit: u32,
    },
    /// Attach evidence to a case or statement
    Add {
        #[arg(long)]
        case: Option<CaseId>,
        #[arg(long)]
        statement: Option<StatementId>,
        #[arg(long)]
        file_name: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete an evidence item
    Delete { id: EvidenceId },
}

#[derive(Subcommand, Debug)]
enum ReportCommands {
    /// List reports
    List {
        #[arg(short, long)]
        search: Option<String>,
        /// Restrict to one case
        #[arg(long)]
        case: Option<CaseId>,
        /// Filter by status (draft, final)
        #[arg(long)]
        status: Option<ReportStatus>,
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
        limit: u32,
    },
    /// Write a report against a case
    Add {
        #[arg(long)]
        case: CaseId,
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// Edit a report's title and/or description
    Edit {
        id: ReportId,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Change a report's status
    Status { id: ReportId, status: ReportStatus },
    /// Delete a report
    Delete { id: ReportId },
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Cli::parse();

    let interactive = matches!(args.command, Commands::Browse);
    if let Err(err) = init_logging(LogConfig {
        app_name: "casebook",
        verbose: args.verbose,
        interactive,
    }) {
        eprintln!("Failed to initialize logging: {err:#}");
        return ExitCode::FAILURE;
    }

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err:#}");
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Cli) -> Result<()> {
    let api_url = args.api_url.as_deref();
    match args.command {
        Commands::Login { email, password } => {
            cli::auth::login(cli::auth::LoginArgs {
                api_url: api_url.unwrap_or(DEFAULT_API_URL).to_string(),
                email,
                password,
            })
            .await
        }
        Commands::Logout => cli::auth::logout(),
        Commands::Whoami => {
            let ctx = require_login(api_url)?;
            println!("{} ({})", ctx.session.name, ctx.session.role);
            Ok(())
        }
        Commands::Browse => cli::browse::run(require_login(api_url)?).await,
        Commands::Cases { command } => match command {
            CaseCommands::List {
                search,
                status,
                sort_by,
                sort_order,
                page,
                limit,
                no_places,
            } => {
                cli::cases::list(
                    require_login(api_url)?,
                    cli::cases::ListArgs {
                        search,
                        status,
                        sort_by,
                        sort_order,
                        page,
                        limit,
                        no_places,
                    },
                )
                .await
            }
            CaseCommands::Create {
                title,
                case_type,
                description,
                reported_by,
                address,
                lat,
                lng,
                assign,
            } => {
                cli::cases::create(
                    require_login(api_url)?,
                    cli::cases::CreateArgs {
                        title,
                        case_type,
                        description,
                        reported_by,
                        address,
                        lat,
                        lng,
                        assign,
                    },
                )
                .await
            }
            CaseCommands::Status { id, status } => {
                cli::cases::set_status(require_login(api_url)?, id, status).await
            }
            CaseCommands::Assign { id, officer } => {
                cli::cases::assign(require_login(api_url)?, id, officer).await
            }
            CaseCommands::Delete { id } => cli::cases::delete(require_login(api_url)?, id).await,
            CaseCommands::Timeline { id } => {
                cli::cases::timeline(require_login(api_url)?, id).await
            }
            CaseCommands::Officers => cli::cases::officers(require_login(api_url)?).await,
        },
        Commands::Statements { command } => match command {
            StatementCommands::List {
                search,
                case,
                status,
                sort_order,
                page,
                limit,
            } => {
                cli::statements::list(
                    require_login(api_url)?,
                    cli::statements::ListArgs {
                        search,
                        case,
                        status,
                        sort_order,
                        page,
                        limit,
                    },
                )
                .await
            }
            StatementCommands::Add {
                case,
                person,
                kind,
                officer,
                narrative,
            } => {
                cli::statements::add(
                    require_login(api_url)?,
                    cli::statements::AddArgs {
                        case,
                        person,
                        kind,
                        officer,
                        narrative,
                    },
                )
                .await
            }
            StatementCommands::Edit { id, narrative } => {
                cli::statements::edit(require_login(api_url)?, id, narrative).await
            }
            StatementCommands::Status { id, status } => {
                cli::statements::set_status(require_login(api_url)?, id, status).await
            }
            StatementCommands::Delete { id } => {
                cli::statements::delete(require_login(api_url)?, id).await
            }
        },
        Commands::Evidence { command } => match command {
            EvidenceCommands::List {
                search,
                case,
                page,
                limit,
            } => {
                cli::evidence::list(
                    require_login(api_url)?,
                    cli::evidence::ListArgs {
                        search,
                        case,
                        page,
                        limit,
                    },
                )
                .await
            }
            EvidenceCommands::Add {
                case,
                statement,
                file_name,
                description,
            } => {
                cli::evidence::add(
                    require_login(api_url)?,
                    cli::evidence::AddArgs {
                        case,
                        statement,
                        file_name,
                        description,
                    },
                )
                .await
            }
            EvidenceCommands::Delete { id } => {
                cli::evidence::delete(require_login(api_url)?, id).await
            }
        },
        Commands::Reports { command } => match command {
            ReportCommands::List {
                search,
                case,
                status,
                page,
                limit,
            } => {
                cli::reports::list(
                    require_login(api_url)?,
                    cli::reports::ListArgs {
                        search,
                        case,
                        status,
                        page,
                        limit,
                    },
                )
                .await
            }
            ReportCommands::Add {
                case,
                title,
                description,
            } => {
                cli::reports::add(
                    require_login(api_url)?,
                    cli::reports::AddArgs {
                        case,
                        title,
                        description,
                    },
                )
                .await
            }
            ReportCommands::Edit {
                id,
                title,
                description,
            } => {
                cli::reports::edit(
                    require_login(api_url)?,
                    id,
                    cli::reports::EditArgs { title, description },
                )
                .await
            }
            ReportCommands::Status { id, status } => {
                cli::reports::set_status(require_login(api_url)?, id, status).await
            }
            ReportCommands::Delete { id } => {
                cli::reports::delete(require_login(api_url)?, id).await
            }
        },
    }
}
