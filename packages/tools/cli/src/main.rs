//! Raul Awards CLI (`raul`)
//!
//! 주간 수상자 조회와 관리자 작업을 수행하는 클라이언트입니다.
//! 로그인 세션은 `~/.raul/session.json`에 유지됩니다.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod context;

use config::CliConfig;
use context::App;

#[derive(Parser)]
#[command(name = "raul")]
#[command(author, version, about = "Raul Awards CLI - weekly winners client", long_about = None)]
struct Cli {
    /// API base URL (overrides config and RAUL_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Session file (overrides config and RAUL_SESSION_FILE)
    #[arg(long, global = true)]
    session_file: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    // ─────────────────────────────────────────────────────────────────────────
    // Auth
    // ─────────────────────────────────────────────────────────────────────────
    /// Login to the awards API
    Login {
        #[arg(long, env = "RAUL_USERNAME")]
        username: Option<String>,
        #[arg(long, env = "RAUL_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Logout (clears the local session)
    Logout,

    /// Show current session
    Whoami,

    // ─────────────────────────────────────────────────────────────────────────
    // Pages
    // ─────────────────────────────────────────────────────────────────────────
    /// Open a page (/, /winners, /archive, /admin, /login)
    Open {
        #[arg(default_value = "/")]
        path: String,
    },

    /// Browse winners
    Winners {
        #[command(subcommand)]
        action: WinnersAction,
    },

    /// Fetch winner images
    Image {
        #[command(subcommand)]
        action: ImageAction,
    },

    // ─────────────────────────────────────────────────────────────────────────
    // Admin
    // ─────────────────────────────────────────────────────────────────────────
    /// Manage winners (admin role required)
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },

    // ─────────────────────────────────────────────────────────────────────────
    // Config
    // ─────────────────────────────────────────────────────────────────────────
    /// Manage CLI config
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

// ─────────────────────────────────────────────────────────────────────────────
// Subcommand enums
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Subcommand)]
enum WinnersAction {
    /// This week's winners
    Current,
    /// Latest two winners
    Latest,
    /// All winners, newest first
    All,
    /// Archived winners
    Archive,
    /// Winners of a given Sunday (defaults to this week's Sunday)
    ByDate {
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Winners of one category
    ByType { kind: String },
}

#[derive(Subcommand)]
enum ImageAction {
    /// Print the inline image URL
    Url { id: i64 },
    /// Fetch an image (optionally saving it)
    Show {
        id: i64,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Download an image with its server-provided file name
    Download {
        id: i64,
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },
}

#[derive(Subcommand)]
enum AdminAction {
    /// Create a winner entry
    Create {
        #[arg(long)]
        date: NaiveDate,
        #[arg(long = "type")]
        kind: String,
        #[arg(long)]
        image: PathBuf,
        #[arg(long)]
        title: Option<String>,
    },
    /// Replace a winner's image (creates the entry if missing)
    Update {
        #[arg(long)]
        date: NaiveDate,
        #[arg(long = "type")]
        kind: String,
        #[arg(long)]
        image: PathBuf,
        #[arg(long)]
        title: Option<String>,
    },
    /// Change a winner's title
    UpdateTitle {
        #[arg(long)]
        date: NaiveDate,
        #[arg(long = "type")]
        kind: String,
        #[arg(long)]
        title: String,
    },
    /// Delete a winner entry
    Delete {
        #[arg(long)]
        date: NaiveDate,
        #[arg(long = "type")]
        kind: String,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Set config values
    Set {
        #[arg(long)]
        api_url: Option<String>,
        #[arg(long)]
        session_file: Option<PathBuf>,
    },
    /// Show config
    Show,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // 로깅 초기화 (stdout은 명령 출력용)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "raul=warn,raul_core=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    // 설정 명령은 API 없이 처리
    let command = match cli.command {
        Commands::Config { action } => {
            return match action {
                ConfigAction::Set { api_url, session_file } => {
                    commands::config::set(api_url, session_file)
                }
                ConfigAction::Show => commands::config::show(),
            };
        }
        command => command,
    };

    // 설정 로드 (CLI 옵션 > 환경변수 > 설정 파일)
    let config = CliConfig::load()?.resolve(cli.api_url.as_deref(), cli.session_file.as_deref())?;
    tracing::debug!("Using config: {:?}", config);

    let app = App::new(config, cli.format)?;

    // 명령 실행
    match command {
        Commands::Login { username, password } => commands::auth::login(&app, username, password).await,
        Commands::Logout => commands::auth::logout(&app).await,
        Commands::Whoami => commands::auth::whoami(&app).await,

        Commands::Open { path } => commands::navigate::open(&app, &path).await,

        Commands::Winners { action } => match action {
            WinnersAction::Current => commands::winners::current(&app).await,
            WinnersAction::Latest => commands::winners::latest(&app).await,
            WinnersAction::All => commands::winners::all(&app).await,
            WinnersAction::Archive => commands::winners::archive(&app).await,
            WinnersAction::ByDate { date } => commands::winners::by_date(&app, date).await,
            WinnersAction::ByType { kind } => commands::winners::by_type(&app, &kind).await,
        },

        Commands::Image { action } => match action {
            ImageAction::Url { id } => commands::images::url(&app, id),
            ImageAction::Show { id, out } => {
                commands::images::show(&app, id, out.as_deref()).await
            }
            ImageAction::Download { id, dir } => {
                commands::images::download(&app, id, &dir).await
            }
        },

        Commands::Admin { action } => match action {
            AdminAction::Create { date, kind, image, title } => {
                commands::admin::create(&app, date, &kind, &image, title).await
            }
            AdminAction::Update { date, kind, image, title } => {
                commands::admin::update(&app, date, &kind, &image, title).await
            }
            AdminAction::UpdateTitle { date, kind, title } => {
                commands::admin::update_title(&app, date, &kind, &title).await
            }
            AdminAction::Delete { date, kind } => {
                commands::admin::delete(&app, date, &kind).await
            }
        },

        Commands::Config { .. } => Ok(()),
    }
}
