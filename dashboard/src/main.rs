use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use dashboard::DashboardPresenter;
use dashboard::surface::TerminalSurface;
use result_client::HttpResultClient;
use tracing_appender::rolling;
use util::config::AppConfig;
use util::models::{LabScope, SelectionContext};

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ScopeArg {
    Individual,
    Group,
}

impl From<ScopeArg> for LabScope {
    fn from(scope: ScopeArg) -> Self {
        match scope {
            ScopeArg::Individual => LabScope::Individual,
            ScopeArg::Group => LabScope::Group,
        }
    }
}

#[derive(Parser, Debug)]
#[command(version, about = "Lab build and plagiarism results from the command line")]
struct Args {
    /// Course (organisation) name. Defaults to COURSE.
    #[arg(long, global = true)]
    course: Option<String>,
    /// Results server base URL. Defaults to SERVER_URL.
    #[arg(long, global = true)]
    server: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the latest build result of a lab
    BuildResult { user: String, lab: String },
    /// Show detector output for one lab
    LabPlagiarism { user: String, lab: String },
    /// Highlight flagged labs for one or more users
    UserPlagiarism {
        #[arg(required = true)]
        users: Vec<String>,
    },
    /// Show the score of every built lab of a user
    Summary { user: String },
    /// Start a plagiarism scan of the whole course
    Scan {
        #[arg(long, value_enum, default_value_t = ScopeArg::Individual)]
        scope: ScopeArg,
    },
    /// Rebuild a lab and show the new result
    Rebuild { user: String, lab: String },
    /// Approve a lab for a user
    Approve {
        user: String,
        lab: String,
        lab_number: u32,
        /// Do not ask for confirmation
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(server) = &args.server {
        AppConfig::set_server_url(server.as_str());
    }
    if let Some(course) = &args.course {
        AppConfig::set_course(course.as_str());
    }
    let config = AppConfig::snapshot();

    let _log_guard = init_logging(&config);
    tracing::debug!(server = %config.server_url, course = %config.course, "starting {}", config.project_name);

    let client = HttpResultClient::from_config(&config).context("creating results client")?;
    let assume_yes = matches!(args.command, Command::Approve { yes: true, .. });
    let surface = TerminalSurface::new(assume_yes);
    let course = config.course.clone();

    match args.command {
        Command::BuildResult { user, lab } => {
            let presenter = build_presenter(client, surface, &course, &user);
            presenter.show_build_result(&user, &lab).await;
        }
        Command::LabPlagiarism { user, lab } => {
            let presenter = build_presenter(client, surface, &course, &user);
            presenter.show_lab_plagiarism(&user, &lab).await;
        }
        Command::UserPlagiarism { users } => {
            let presenter = build_presenter(client, surface, &course, "");
            presenter.show_plagiarism_overview(&users).await;
        }
        Command::Summary { user } => {
            let presenter = build_presenter(client, surface, &course, &user);
            presenter.show_build_summary(&user).await;
        }
        Command::Scan { scope } => {
            let presenter = build_presenter(client, surface, &course, "");
            presenter
                .trigger_manual_plagiarism_scan(&course, scope.into())
                .await;
        }
        Command::Rebuild { user, lab } => {
            let presenter = build_presenter(client, surface, &course, &user);
            presenter.trigger_rebuild(&course, &user, &lab).await;
        }
        Command::Approve {
            user,
            lab,
            lab_number,
            ..
        } => {
            let presenter = build_presenter(client, surface, &course, &user);
            presenter
                .approve_lab(&course, &user, &lab, lab_number)
                .await;
        }
    }

    Ok(())
}

fn build_presenter(
    client: HttpResultClient,
    surface: TerminalSurface,
    course: &str,
    user: &str,
) -> DashboardPresenter<HttpResultClient, TerminalSurface> {
    DashboardPresenter::new(client, surface, SelectionContext::new(course, user))
}

fn init_logging(config: &AppConfig) -> tracing_appender::non_blocking::WorkerGuard {
    use std::fs;
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    fs::create_dir_all("logs").ok();

    let file_appender = rolling::daily("logs", &config.log_file);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .with_target(true);

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_target(true);

    let env_filter = EnvFilter::try_new(&config.log_level)
        .unwrap_or_else(|_| EnvFilter::new("dashboard=info"));

    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer);

    if config.log_to_stderr {
        registry.with(stderr_layer).init();
    } else {
        registry.init();
    }

    guard
}
