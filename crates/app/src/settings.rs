//! Application settings, read from an optional TOML file and `PANTAGON_*`
//! environment variables (`PANTAGON_SERVER__PORT=8080`).
//!
//! See `settings.example.toml` for the layout.
use clap::Parser;
use config::{Config, ConfigError, Environment, File};
use engine::Currency;
use serde::Deserialize;

const DEFAULT_CONFIG_PATH: &str = "settings.toml";

#[derive(Debug, Parser)]
#[command(name = "pantagon", version)]
struct Args {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct App {
    pub level: String,
    pub currency: Currency,
}

impl Default for App {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            currency: Currency::default(),
        }
    }
}

#[derive(Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Database {
    Memory,
    Sqlite(String),
}

#[derive(Debug, Deserialize)]
pub struct Server {
    pub database: Database,
    pub bind: Option<String>,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl Server {
    /// Basic auth is enabled only when both halves are set.
    pub fn credentials(&self) -> Option<server::Credentials> {
        match (&self.username, &self.password) {
            (Some(username), Some(password)) => Some(server::Credentials {
                username: username.clone(),
                password: password.clone(),
            }),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub app: App,
    pub server: Option<Server>,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let args = Args::parse();
        let path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
        Self::load(path, environment())
    }

    /// The file is optional; `env` overrides whatever it sets.
    fn load(path: &str, env: Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(env)
            .build()?
            .try_deserialize()
    }
}

fn environment() -> Environment {
    Environment::with_prefix("PANTAGON")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}
