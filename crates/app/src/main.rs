use std::path::Path;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use quiz_core::samples::seed_questions;
use services::{
    AdminCredentials, AppServices, AppServicesError, AuthService, Clock, QuestionBankError,
    QuestionBankService, QuizLoopService, ScoreService,
};
use thiserror::Error;
use ui::{App, UiApp, build_app_context};

const DEFAULT_DB_PATH: &str = "quiz.sqlite3";
const DEFAULT_ADMIN: &str = "admin";

#[derive(Debug, Error, PartialEq, Eq)]
enum ConfigError {
    #[error("{flag} requires a value")]
    MissingValue { flag: &'static str },
    #[error("{flag} must not be empty")]
    EmptyValue { flag: &'static str },
    #[error("{flag} is not accepted by `{command}`")]
    NotForCommand { flag: String, command: &'static str },
    #[error("unknown argument: {0}")]
    UnknownArg(String),
    #[error("unknown subcommand: {0}")]
    UnknownCommand(String),
}

#[derive(Debug, Error)]
enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("could not prepare the database directory: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Services(#[from] AppServicesError),
    #[error("seeding failed: {0}")]
    Seed(#[from] QuestionBankError),
}

struct DesktopApp {
    services: AppServices,
}

impl UiApp for DesktopApp {
    fn auth(&self) -> Arc<AuthService> {
        self.services.auth()
    }

    fn question_bank(&self) -> Arc<QuestionBankService> {
        self.services.question_bank()
    }

    fn scores(&self) -> Arc<ScoreService> {
        self.services.scores()
    }

    fn quiz_loop(&self) -> Arc<QuizLoopService> {
        self.services.quiz_loop()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Ui,
    Seed,
    Help,
}

impl Command {
    fn name(self) -> &'static str {
        match self {
            Command::Ui => "ui",
            Command::Seed => "seed",
            Command::Help => "help",
        }
    }
}

/// Separate the subcommand from its flags. No subcommand means `ui`.
fn split_command(argv: Vec<String>) -> Result<(Command, Vec<String>), ConfigError> {
    if argv.iter().any(|arg| arg == "--help" || arg == "-h") {
        return Ok((Command::Help, Vec::new()));
    }
    let mut argv = argv.into_iter();
    match argv.next() {
        None => Ok((Command::Ui, Vec::new())),
        Some(first) if first.starts_with("--") => {
            Ok((Command::Ui, std::iter::once(first).chain(argv).collect()))
        }
        Some(first) => {
            let cmd = match first.as_str() {
                "ui" => Command::Ui,
                "seed" => Command::Seed,
                "help" => Command::Help,
                _ => return Err(ConfigError::UnknownCommand(first)),
            };
            Ok((cmd, argv.collect()))
        }
    }
}

/// Settings resolved from the environment, then command-line flags.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Config {
    db_url: String,
    admin_user: String,
    admin_password: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_url: sqlite_url(DEFAULT_DB_PATH),
            admin_user: DEFAULT_ADMIN.to_string(),
            admin_password: DEFAULT_ADMIN.to_string(),
        }
    }
}

fn env_value(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .filter(|value| !value.trim().is_empty())
}

fn flag_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ConfigError> {
    let value = args.next().ok_or(ConfigError::MissingValue { flag })?;
    let value = value.trim();
    if value.is_empty() {
        return Err(ConfigError::EmptyValue { flag });
    }
    Ok(value.to_string())
}

impl Config {
    fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            db_url: env_value("QUIZ_DB_URL").map_or(defaults.db_url, |raw| sqlite_url(&raw)),
            admin_user: env_value("QUIZ_ADMIN_USER").unwrap_or(defaults.admin_user),
            admin_password: env_value("QUIZ_ADMIN_PASSWORD").unwrap_or(defaults.admin_password),
        }
    }

    /// Override settings with flags. Admin flags only apply to `ui`.
    fn apply_flags(
        mut self,
        cmd: Command,
        flags: impl IntoIterator<Item = String>,
    ) -> Result<Self, ConfigError> {
        let mut args = flags.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => self.db_url = sqlite_url(&flag_value(&mut args, "--db")?),
                "--admin-user" | "--admin-password" if cmd != Command::Ui => {
                    return Err(ConfigError::NotForCommand {
                        flag: arg,
                        command: cmd.name(),
                    });
                }
                "--admin-user" => self.admin_user = flag_value(&mut args, "--admin-user")?,
                "--admin-password" => {
                    self.admin_password = flag_value(&mut args, "--admin-password")?;
                }
                _ => return Err(ConfigError::UnknownArg(arg)),
            }
        }
        Ok(self)
    }

    fn admin(&self) -> AdminCredentials {
        AdminCredentials::new(self.admin_user.trim(), self.admin_password.trim())
    }
}

/// Turn a bare path into an absolute `sqlite://` URL; full URLs pass through.
fn sqlite_url(raw: &str) -> String {
    let raw = raw.trim();
    if raw.starts_with("sqlite://") || raw.starts_with("sqlite::memory:") || raw.starts_with("sqlite:file:") {
        return raw.to_string();
    }

    let path = Path::new(raw.strip_prefix("sqlite:").unwrap_or(raw));
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir().map_or_else(|_| path.to_path_buf(), |cwd| cwd.join(path))
    };
    format!("sqlite://{}", absolute.display())
}

/// sqlx creates the database file but not the directories above it.
fn ensure_parent_dir(db_url: &str) -> std::io::Result<()> {
    let Some(rest) = db_url.strip_prefix("sqlite://") else {
        return Ok(());
    };
    let path = Path::new(rest.split('?').next().unwrap_or(rest));
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent),
        _ => Ok(()),
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  app [ui]  [--db <sqlite_url|path>] [--admin-user <name>] [--admin-password <pw>]");
    eprintln!("  app seed  [--db <sqlite_url|path>]");
    eprintln!();
    eprintln!("Defaults: --db ./{DEFAULT_DB_PATH}, admin login {DEFAULT_ADMIN}/{DEFAULT_ADMIN}");
    eprintln!("Environment (a .env file is read when present):");
    eprintln!("  QUIZ_DB_URL, QUIZ_ADMIN_USER, QUIZ_ADMIN_PASSWORD, RUST_LOG");
}

fn launch_ui(services: AppServices) {
    let app: Arc<dyn UiApp> = Arc::new(DesktopApp { services });
    let context = build_app_context(&app);

    let window = WindowBuilder::new()
        .with_title("Quiz")
        .with_resizable(true);

    LaunchBuilder::desktop()
        .with_cfg(DesktopConfig::new().with_window(window))
        .with_context(context)
        .launch(App);
}

async fn seed(services: &AppServices, db_url: &str) -> Result<(), AppError> {
    let inserted = services
        .question_bank()
        .seed_if_empty(seed_questions())
        .await?;
    if inserted == 0 {
        println!("seed: {db_url} already has questions, nothing to do");
    } else {
        println!("seed: inserted {inserted} questions into {db_url}");
    }
    Ok(())
}

async fn run() -> Result<(), AppError> {
    let (cmd, flags) = split_command(std::env::args().skip(1).collect())?;
    if cmd == Command::Help {
        print_usage();
        return Ok(());
    }

    let config = Config::from_env().apply_flags(cmd, flags)?;
    ensure_parent_dir(&config.db_url)?;
    log::info!("opening {}", config.db_url);
    let services =
        AppServices::new_sqlite(&config.db_url, Clock::default_clock(), config.admin()).await?;

    match cmd {
        Command::Ui => launch_ui(services),
        Command::Seed => seed(&services, &config.db_url).await?,
        Command::Help => {}
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(err) = run().await {
        match err {
            AppError::Config(err) => {
                eprintln!("{err}");
                print_usage();
            }
            other => log::error!("{other}"),
        }
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| (*s).to_string()).collect()
    }

    fn configure(cmd: Command, raw: &[&str]) -> Result<Config, ConfigError> {
        Config::default().apply_flags(cmd, args(raw))
    }

    #[test]
    fn ui_flags_override_defaults() {
        let config = configure(
            Command::Ui,
            &["--db", "sqlite:///tmp/q.db", "--admin-user", " root ", "--admin-password", "pw"],
        )
        .unwrap();
        assert_eq!(config.db_url, "sqlite:///tmp/q.db");
        assert_eq!(config.admin(), AdminCredentials::new("root", "pw"));
    }

    #[test]
    fn seed_rejects_admin_flags() {
        let err = configure(Command::Seed, &["--admin-user", "root"]).unwrap_err();
        assert_eq!(
            err,
            ConfigError::NotForCommand {
                flag: "--admin-user".into(),
                command: "seed",
            }
        );
        assert_eq!(
            configure(Command::Seed, &["--verbose"]).unwrap_err(),
            ConfigError::UnknownArg("--verbose".into())
        );
    }

    #[test]
    fn missing_and_empty_values_are_errors() {
        assert_eq!(
            configure(Command::Ui, &["--db"]).unwrap_err(),
            ConfigError::MissingValue { flag: "--db" }
        );
        assert_eq!(
            configure(Command::Ui, &["--db", " "]).unwrap_err(),
            ConfigError::EmptyValue { flag: "--db" }
        );
        assert_eq!(
            configure(Command::Ui, &["--admin-password", ""]).unwrap_err(),
            ConfigError::EmptyValue {
                flag: "--admin-password"
            }
        );
    }

    #[test]
    fn default_database_resolves_to_an_absolute_url() {
        let url = Config::default().db_url;
        let path = url.strip_prefix("sqlite://").unwrap();
        assert!(std::path::Path::new(path).is_absolute(), "{url}");
        assert!(url.ends_with(DEFAULT_DB_PATH), "{url}");
    }

    #[test]
    fn bare_paths_become_absolute_urls() {
        let url = sqlite_url("data/quiz.sqlite3");
        assert!(url.starts_with("sqlite:///"), "{url}");
        assert!(url.ends_with("data/quiz.sqlite3"), "{url}");
        assert_eq!(sqlite_url("sqlite::memory:"), "sqlite::memory:");
        assert_eq!(
            sqlite_url("sqlite:file:memdb?mode=memory"),
            "sqlite:file:memdb?mode=memory"
        );
    }

    #[test]
    fn subcommand_is_split_from_flags() {
        assert_eq!(split_command(Vec::new()).unwrap(), (Command::Ui, Vec::new()));
        assert_eq!(
            split_command(args(&["--db", "x"])).unwrap(),
            (Command::Ui, args(&["--db", "x"]))
        );
        assert_eq!(
            split_command(args(&["seed", "--db", "x"])).unwrap(),
            (Command::Seed, args(&["--db", "x"]))
        );
        assert_eq!(split_command(args(&["seed", "-h"])).unwrap().0, Command::Help);
        assert_eq!(
            split_command(args(&["serve"])).unwrap_err(),
            ConfigError::UnknownCommand("serve".into())
        );
    }

    #[test]
    fn parent_directory_is_created() {
        let root = std::env::temp_dir().join(format!("quiz-app-{}", std::process::id()));
        let url = format!("sqlite://{}/nested/quiz.sqlite3?mode=rwc", root.display());
        ensure_parent_dir(&url).unwrap();
        assert!(root.join("nested").is_dir());
        std::fs::remove_dir_all(&root).unwrap();

        ensure_parent_dir("sqlite::memory:").unwrap();
    }
}
