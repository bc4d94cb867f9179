use clap::Parser;
use serde::Deserialize;
use std::path::PathBuf;

/// Environment variable consulted when no signing secret is configured in the
/// config file.
pub const JWT_SECRET_ENV: &str = "LIDO_JWT_SECRET";

#[derive(Parser, Debug)]
#[command(name = "lido", about = "Seaside restaurant backend")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Host to bind to
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind to
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Path to data directory
    #[arg(long)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct DatabaseConfig {
    pub path: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct AuthConfig {
    /// HMAC secret used to sign bearer tokens. Empty means unconfigured;
    /// startup refuses to serve authenticated routes without one.
    pub secret: String,
    pub token_hours: i64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3001,
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            secret: String::new(),
            token_hours: 1,
        }
    }
}

impl Config {
    pub fn load(cli: &Cli) -> anyhow::Result<Self> {
        let data_dir = Self::data_dir(cli);
        let config_path = cli
            .config
            .clone()
            .unwrap_or_else(|| data_dir.join("config.toml"));

        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str(&content)?
        } else {
            Config::default()
        };

        // CLI overrides
        if let Some(ref host) = cli.host {
            config.server.host = host.clone();
        }
        if let Some(port) = cli.port {
            config.server.port = port;
        }

        // Resolve paths relative to data dir
        if config.database.path.is_none() {
            config.database.path = Some(data_dir.join("lido.db"));
        }

        // The signing secret may come from the config file or the environment.
        // Without one, issued tokens could never be verified, so refuse to start.
        if config.auth.secret.is_empty() {
            if let Ok(secret) = std::env::var(JWT_SECRET_ENV) {
                config.auth.secret = secret;
            }
        }
        if config.auth.secret.is_empty() {
            anyhow::bail!(
                "no token signing secret configured; set [auth] secret in {} or export {}",
                config_path.display(),
                JWT_SECRET_ENV
            );
        }

        Ok(config)
    }

    pub fn data_dir(cli: &Cli) -> PathBuf {
        cli.data_dir.clone().unwrap_or_else(|| {
            dirs::home_dir()
                .expect("Could not determine home directory")
                .join(".lido")
        })
    }

    pub fn db_path(&self) -> &PathBuf {
        self.database
            .path
            .as_ref()
            .expect("database path is resolved during load")
    }
}
