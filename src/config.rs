use std::{env, path::PathBuf};

use serde::Serialize;

use crate::error::ConfigError;

/// AppConfig
///
/// Holds the gate's runtime configuration. Immutable once loaded and shared with every
/// request through `AppState`. What is gated (prefixes, cookie name, sign-in path) is
/// compiled in and deliberately absent here: changing it means redeploying.
#[derive(Clone, Debug)]
pub struct AppConfig {
    // Runtime environment marker. Selects the log format and how strict startup is.
    pub env: Env,
    // Interface to bind.
    pub host: String,
    pub port: u16,
    // Directory holding the built front-end bundle (must contain index.html).
    pub assets_dir: PathBuf,
}

/// Env
///
/// Local development versus deployed production.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Env {
    Local,
    Production,
}

impl Default for AppConfig {
    /// default
    ///
    /// Safe values for tests and local scaffolding; no environment variables read.
    fn default() -> Self {
        Self {
            env: Env::Local,
            host: "127.0.0.1".to_string(),
            port: 3000,
            assets_dir: PathBuf::from("dist"),
        }
    }
}

impl AppConfig {
    /// load
    ///
    /// Reads the configuration from the environment (`.env` is expected to be loaded by
    /// the caller).
    ///
    /// - `APP_ENV`: `production` or anything else for local (default `local`)
    /// - `HOST`: default `0.0.0.0`
    /// - `PORT`: default `3000`
    /// - `ASSETS_DIR`: default `dist`
    ///
    /// # Errors
    /// Fails on an unparseable `PORT`, and in production when the bundle is missing.
    /// Locally a missing bundle is tolerated so the gate can run while the front-end
    /// is still being built; see [`AppConfig::assets_present`].
    pub fn load() -> Result<Self, ConfigError> {
        let env = match env::var("APP_ENV").as_deref() {
            Ok("production") => Env::Production,
            _ => Env::Local,
        };

        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        let port_str = env::var("PORT").unwrap_or_else(|_| "3000".to_string());
        let port = port_str
            .parse::<u16>()
            .map_err(|source| ConfigError::InvalidPort {
                value: port_str.clone(),
                source,
            })?;

        let assets_dir =
            PathBuf::from(env::var("ASSETS_DIR").unwrap_or_else(|_| "dist".to_string()));

        let config = Self {
            env,
            host,
            port,
            assets_dir,
        };

        if config.env == Env::Production && !config.assets_present() {
            return Err(ConfigError::MissingAssets(config.assets_dir));
        }

        Ok(config)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// The single-page-app entry point, served for any client-side route.
    pub fn index_file(&self) -> PathBuf {
        self.assets_dir.join("index.html")
    }

    pub fn assets_present(&self) -> bool {
        self.index_file().is_file()
    }
}
