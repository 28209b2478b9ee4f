use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gestao360::alerts::{self, AlertFilter, Snapshot};
use gestao360::client::{ClientError, HrClient};
use gestao360::config::{self, AppConfig};
use gestao360::models::{AlertCategory, Priority};
use gestao360::render;
use gestao360::session::{Session, SessionStore, Theme};

#[derive(Parser)]
#[command(name = "g360")]
#[command(about = "Gestão 360 HR dashboard in the terminal")]
struct Cli {
    /// Backend base URL (overrides config and G360_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and store the session token
    Login {
        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: String,
    },
    /// Sign out and forget the token
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Derive dashboard alerts
    Alerts {
        /// Only this priority (high, medium, low)
        #[arg(long, value_parser = parse_priority)]
        priority: Option<Priority>,

        /// Only this category (hierarchy, onboarding, pdi, one-to-one, ...)
        #[arg(long, value_parser = parse_category)]
        category: Option<AlertCategory>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,

        /// Read a saved snapshot instead of fetching from the backend
        #[arg(long)]
        snapshot: Option<PathBuf>,
    },
    /// List employees
    Employees,
    /// Backend alert inbox
    Inbox {
        /// Only unread alerts
        #[arg(long)]
        unread: bool,

        #[command(subcommand)]
        action: Option<InboxAction>,
    },
    /// Show or change the theme preference
    Theme {
        /// light, dark or toggle
        mode: Option<String>,
    },
    /// Show or change the saved configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Persist backend settings to the config file
    Set {
        /// Backend base URL
        #[arg(long)]
        url: Option<String>,

        /// Request timeout in seconds
        #[arg(long)]
        timeout: Option<u64>,
    },
}

#[derive(Subcommand)]
enum InboxAction {
    /// Mark one alert as read
    Read { id: i64 },
    /// Mark every alert as read
    ReadAll,
}

fn parse_priority(s: &str) -> Result<Priority, String> {
    Priority::from_str(s).ok_or_else(|| format!("unknown priority '{}'", s))
}

fn parse_category(s: &str) -> Result<AlertCategory, String> {
    AlertCategory::from_str(s).ok_or_else(|| format!("unknown category '{}'", s))
}

/// Logs go to stderr so stdout stays clean for `--json`.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "gestao360=info".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Turn a 401 into a hint instead of a bare error.
fn explain(err: ClientError) -> anyhow::Error {
    match err {
        ClientError::Unauthorized => {
            anyhow::anyhow!("Session expired or missing; run `g360 login`")
        }
        other => other.into(),
    }
}

fn require_session(session: &Session) -> anyhow::Result<()> {
    if !session.is_authenticated() {
        bail!("Not signed in; run `g360 login`");
    }
    Ok(())
}

fn load_snapshot(path: &Path) -> anyhow::Result<Snapshot> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Invalid snapshot {}", path.display()))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let mut config = AppConfig::load();
    if let Some(url) = cli.api_url {
        config.api_url = url.trim_end_matches('/').to_string();
    }

    let store = SessionStore::open_default().context("Failed to open session store")?;
    let mut session = store.load().context("Failed to load session")?;
    let client = HrClient::from_session(&config, &session)?;

    match cli.command {
        Commands::Login { email, password } => {
            let login = client.login(&email, &password).await.map_err(explain)?;
            tracing::info!("Signed in as {}", login.user.email);
            println!("Signed in as {}", render::render_user(&login.user).trim_end());
            session.sign_in(login);
            store.save(&session).context("Failed to save session")?;
        }
        Commands::Logout => {
            if session.is_authenticated() {
                if let Err(e) = client.logout().await {
                    tracing::warn!("Backend logout failed: {}", e);
                }
            }
            store.clear().context("Failed to clear session")?;
            println!("Signed out");
        }
        Commands::Whoami => {
            require_session(&session)?;
            let user = client.me().await.map_err(explain)?;
            print!("{}", render::render_user(&user));
        }
        Commands::Alerts {
            priority,
            category,
            json,
            snapshot,
        } => {
            let snapshot = match snapshot {
                Some(path) => load_snapshot(&path)?,
                None => {
                    require_session(&session)?;
                    client.fetch_snapshot().await.map_err(explain)?
                }
            };
            let derived = alerts::derive_alerts_now(&snapshot);
            let filter = AlertFilter { priority, category };
            let shown = filter.apply(&derived);

            if json {
                println!("{}", serde_json::to_string_pretty(&shown)?);
            } else {
                print!("{}", render::render_alerts(shown));
                let present = alerts::categories(&derived);
                if filter.category.is_none() && present.len() > 1 {
                    let names: Vec<&str> = present.iter().map(|c| c.as_str()).collect();
                    println!("\nFilter with --category: {}", names.join(", ").to_lowercase());
                }
            }
        }
        Commands::Employees => {
            require_session(&session)?;
            let employees = client.list_employees().await.map_err(explain)?;
            print!("{}", render::render_employees(&employees));
        }
        Commands::Inbox { unread, action } => {
            require_session(&session)?;
            match action {
                Some(InboxAction::Read { id }) => {
                    client.mark_alert_read(id).await.map_err(explain)?;
                    println!("Marked #{} as read", id);
                }
                Some(InboxAction::ReadAll) => {
                    client.mark_all_alerts_read().await.map_err(explain)?;
                    println!("Marked all alerts as read");
                }
                None => {
                    let (stored, summary) =
                        tokio::try_join!(client.list_alerts(unread), client.alert_summary())
                            .map_err(explain)?;
                    println!("{} alert(s), {} unread", summary.total, summary.unread);
                    print!("{}", render::render_inbox(&stored));
                }
            }
        }
        Commands::Theme { mode } => {
            let theme = match mode.as_deref() {
                None => session.theme,
                Some("toggle") => session.theme.toggle(),
                Some(other) => match Theme::from_str(other) {
                    Some(theme) => theme,
                    None => bail!("Unknown theme '{}': use light, dark or toggle", other),
                },
            };
            if theme != session.theme {
                session.theme = theme;
                store.save(&session).context("Failed to save session")?;
            }
            println!("Theme: {}", theme.as_str());
        }
        Commands::Config { action } => match action {
            None => {
                println!("api_url: {}", config.api_url);
                println!("timeout_secs: {}", config.timeout_secs);
            }
            Some(ConfigAction::Set { url, timeout }) => {
                let path = config::config_path()?;
                // Start from the file alone so env and flag overrides are not persisted.
                let mut saved = AppConfig::load_from(&path)?;
                if let Some(url) = url {
                    saved.api_url = url.trim_end_matches('/').to_string();
                }
                if let Some(secs) = timeout {
                    saved.timeout_secs = secs;
                }
                saved.save()?;
                tracing::info!("Saved config to {}", path.display());
                println!("Saved {}", path.display());
            }
        },
    }

    Ok(())
}
