// settings
use std::collections::HashMap;
use std::env;
use std::time::Duration;

use anyhow::{Context, anyhow};
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Dev,
    Prod,
}

/// Runtime settings, read once at startup and passed to whoever needs them.
#[derive(Debug, Clone)]
pub struct Settings {
    pub port: u16,
    pub database_url: String,
    pub request_timeout: Duration,
}

impl Settings {
    /// Loads `.env` (if any) and reads the process environment.
    pub fn from_env() -> anyhow::Result<Self> {
        match dotenv::dotenv() {
            Ok(path) => info!("Loaded environment from {}", path.display()),
            Err(e) => info!("No .env file loaded: {}", e),
        }
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mode = match lookup("MODE") {
            Some(mode) if mode.to_lowercase() == "prod" => Mode::Prod,
            _ => Mode::Dev,
        };

        let mut values: HashMap<&str, String> = HashMap::new();
        for key in [
            "PORT",
            "DATABASE_URL",
            "HOST",
            "DBNAME",
            "DBUSER",
            "DBPASS",
            "REQUEST_TIMEOUT_SECS",
        ] {
            if let Some(value) = lookup(key).filter(|v| !v.is_empty()) {
                values.insert(key, value);
            }
        }

        // Log which settings are configured (NOT their values!)
        let mut configured: Vec<&str> = values.keys().copied().collect();
        configured.sort_unstable();
        info!("Settings configured ({:?} mode): {:?}", mode, configured);

        if mode == Mode::Dev {
            for (key, default) in [
                ("PORT", "8000"),
                ("HOST", "localhost"),
                ("DBNAME", "muslib"),
                ("DBUSER", "postgres"),
                ("REQUEST_TIMEOUT_SECS", "5"),
            ] {
                values.entry(key).or_insert_with(|| default.to_string());
            }
        }

        let port = values
            .get("PORT")
            .ok_or_else(|| anyhow!("PORT must be set in production mode"))?
            .parse::<u16>()
            .context("PORT is not a valid port number")?;

        let request_timeout = match values.get("REQUEST_TIMEOUT_SECS") {
            Some(secs) => {
                let secs: u64 = secs
                    .parse()
                    .context("REQUEST_TIMEOUT_SECS is not a whole number of seconds")?;
                // a zero timeout would fail every request with 408
                if secs == 0 {
                    return Err(anyhow!("REQUEST_TIMEOUT_SECS must be at least 1"));
                }
                Duration::from_secs(secs)
            }
            None => Duration::from_secs(5),
        };

        let database_url = match values.get("DATABASE_URL") {
            Some(url) => url.clone(),
            None => {
                let require = |key: &str| {
                    values
                        .get(key)
                        .cloned()
                        .ok_or_else(|| anyhow!("{key} must be set in production mode"))
                };
                postgres_url(
                    &require("HOST")?,
                    &require("DBNAME")?,
                    &require("DBUSER")?,
                    values.get("DBPASS").map(String::as_str).unwrap_or_default(),
                )
            }
        };

        Ok(Settings {
            port,
            database_url,
            request_timeout,
        })
    }
}

fn postgres_url(host: &str, dbname: &str, user: &str, password: &str) -> String {
    let user = urlencoding::encode(user);
    if password.is_empty() {
        format!("postgres://{user}@{host}/{dbname}")
    } else {
        let password = urlencoding::encode(password);
        format!("postgres://{user}:{password}@{host}/{dbname}")
    }
}
