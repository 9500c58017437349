use std::path::PathBuf;

use anyhow::anyhow;
use anyhow::Result;
use common::types::RecordFormat;
use serde::Deserialize;

pub const DEFAULT_DATA_FILE: &str = "strength.json";

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
    #[serde(default)]
    pub debug: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: default_port(), worker_threads: Some(4), debug: false }
    }
}

fn default_host() -> String { "0.0.0.0".into() }
fn default_port() -> u16 { 5000 }

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AuthConfig {
    /// Shared secret compared against the `auth_key` query parameter on writes.
    #[serde(default)]
    pub secret: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct StorageConfig {
    /// Backing file; when unset it lives next to the executable.
    #[serde(default)]
    pub path: Option<PathBuf>,
    #[serde(default)]
    pub format: RecordFormat,
}

/// Values given on the command line. Each one, when present, wins over the
/// config file and the environment.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub auth_key: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub debug: bool,
    pub format: Option<RecordFormat>,
    pub data_file: Option<PathBuf>,
}

pub fn config_path() -> String {
    std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string())
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    from_toml(&content)
}

pub fn from_toml(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Build the effective configuration: optional TOML file, then environment,
    /// then command-line overrides, then validation.
    pub fn load_with(file: Option<&str>, overrides: Overrides) -> Result<Self> {
        let path = file.map(str::to_string).unwrap_or_else(config_path);
        // an explicit --config must exist; the default path is optional
        let mut cfg = if std::path::Path::new(&path).exists() {
            load_from_file(&path).map_err(|e| anyhow!("failed to read {path}: {e}"))?
        } else if file.is_some() {
            return Err(anyhow!("config file {path} does not exist"));
        } else {
            AppConfig::default()
        };
        cfg.apply_env_with(|key| std::env::var(key).ok())?;
        cfg.apply_overrides(overrides);
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn apply_env_with<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(secret) = lookup("DAILY_STRENGTH_AUTH_KEY") {
            self.auth.secret = Some(secret);
        }
        if let Some(host) = lookup("SERVER_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("SERVER_PORT") {
            self.server.port = port
                .parse()
                .map_err(|e| anyhow!("SERVER_PORT `{port}` is not a port number: {e}"))?;
        }
        if let Some(format) = lookup("DAILY_STRENGTH_FORMAT") {
            self.storage.format = format.parse().map_err(|e: String| anyhow!(e))?;
        }
        if let Some(path) = lookup("DAILY_STRENGTH_DATA") {
            self.storage.path = Some(PathBuf::from(path));
        }
        Ok(())
    }

    pub fn apply_overrides(&mut self, o: Overrides) {
        if let Some(secret) = o.auth_key { self.auth.secret = Some(secret); }
        if let Some(host) = o.host { self.server.host = host; }
        if let Some(port) = o.port { self.server.port = port; }
        if o.debug { self.server.debug = true; }
        if let Some(format) = o.format { self.storage.format = format; }
        if let Some(path) = o.data_file { self.storage.path = Some(path); }
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.auth.validate()?;
        Ok(())
    }

    /// Resolved backing file location.
    pub fn data_file(&self) -> PathBuf {
        match &self.storage.path {
            Some(p) => p.clone(),
            None => common::env::beside_executable(DEFAULT_DATA_FILE),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = default_host();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        // 0 threads would panic the runtime builder
        match self.worker_threads {
            Some(0) | None => self.worker_threads = Some(4),
            Some(_) => {}
        }
        Ok(())
    }
}

impl AuthConfig {
    pub fn validate(&self) -> Result<()> {
        match self.secret.as_deref() {
            Some(s) if !s.trim().is_empty() => Ok(()),
            _ => Err(anyhow!(
                "auth secret is not configured; pass --auth-key, set DAILY_STRENGTH_AUTH_KEY or auth.secret in the config file"
            )),
        }
    }
}
