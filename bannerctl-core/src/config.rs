use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::db::pool::{DEFAULT_ACQUIRE_TIMEOUT, DEFAULT_MAX_CONNECTIONS};

/// `.env` files read at startup.
///
/// Loading runs before tracing is initialized, so the caller logs this
/// once a subscriber is installed.
#[derive(Debug, Default)]
pub struct DotenvReport {
    pub loaded: Vec<PathBuf>,
    pub failed: Vec<(PathBuf, String)>,
}

impl DotenvReport {
    pub fn log(&self) {
        for (path, err) in &self.failed {
            warn!("Failed to load {}: {}", path.display(), err);
        }
        if self.loaded.is_empty() {
            debug!("No .env files found (current dir or ~/.bannerctl)");
        } else {
            let paths: Vec<String> = self.loaded.iter().map(|p| p.display().to_string()).collect();
            info!("Loaded environment from: {}", paths.join(", "));
        }
    }
}

/// Load environment variables from .env files
///
/// Priority order (highest to lowest):
/// 1. Environment variables already set
/// 2. Current directory .env
/// 3. ~/.bannerctl/.env
pub fn load_dotenv() -> DotenvReport {
    let mut report = DotenvReport::default();

    if let Ok(path) = dotenvy::dotenv() {
        report.loaded.push(path);
    }

    if let Some(dir) = config_dir() {
        load_env_file(&dir.join(".env"), &mut report);
    }
    report
}

/// Load one `.env` file if present; dotenvy doesn't overwrite existing vars.
fn load_env_file(path: &Path, report: &mut DotenvReport) {
    if !path.exists() {
        return;
    }
    match dotenvy::from_path(path) {
        Ok(()) => report.loaded.push(path.to_path_buf()),
        Err(e) => report.failed.push((path.to_path_buf(), e.to_string())),
    }
}

/// Get the bannerctl config directory path (~/.bannerctl)
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".bannerctl"))
}

/// bannerctl configuration (~/.bannerctl/config.toml)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BannerConfig {
    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub engine: EngineConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// PostgreSQL connection string; `${VAR}` references are expanded
    #[serde(default)]
    pub url: Option<String>,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    #[serde(default = "default_acquire_timeout_secs")]
    pub acquire_timeout_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: default_max_connections(),
            acquire_timeout_secs: default_acquire_timeout_secs(),
        }
    }
}

fn default_max_connections() -> u32 {
    DEFAULT_MAX_CONNECTIONS
}

fn default_acquire_timeout_secs() -> u64 {
    DEFAULT_ACQUIRE_TIMEOUT.as_secs()
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct EngineConfig {
    /// Deadline applied to every operation, in milliseconds
    #[serde(default)]
    pub timeout_ms: Option<u64>,
}

impl BannerConfig {
    /// Load config from ~/.bannerctl/config.toml, falling back to defaults
    /// when the file doesn't exist. Environment overrides are applied.
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            debug!("No config at {:?}, using defaults", path);
            let mut config = Self::default();
            config.apply_env()?;
            Ok(config)
        }
    }

    /// Load config from an explicit path. The file must exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .context(format!("Failed to read config file: {:?}", path))?;

        let mut config: Self =
            toml::from_str(&content).context("Failed to parse config file (invalid TOML)")?;

        config.expand_variables();
        config.apply_env()?;
        Ok(config)
    }

    /// Get config file path: ~/.bannerctl/config.toml
    pub fn config_path() -> PathBuf {
        config_dir()
            .unwrap_or_else(|| PathBuf::from(".bannerctl"))
            .join("config.toml")
    }

    /// `DATABASE_URL` and `BANNERCTL_TIMEOUT_MS` win over the file.
    fn apply_env(&mut self) -> Result<()> {
        self.apply_overrides(|name| env::var(name).ok())
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(url) = var("DATABASE_URL").filter(|url| !url.is_empty()) {
            self.database.url = Some(url);
        }
        if let Some(ms) = var("BANNERCTL_TIMEOUT_MS") {
            let ms = ms.trim().parse::<u64>().with_context(|| {
                format!("BANNERCTL_TIMEOUT_MS must be a number of milliseconds, got {:?}", ms)
            })?;
            self.engine.timeout_ms = Some(ms);
        }
        Ok(())
    }

    fn expand_variables(&mut self) {
        if let Some(url) = &self.database.url {
            self.database.url = Some(expand_string(url));
        }
    }

    /// Database URL, or an actionable error when none is configured.
    pub fn database_url(&self) -> Result<&str> {
        self.database
            .url
            .as_deref()
            .filter(|url| !url.is_empty())
            .context("DATABASE_URL not set. Set via --database-url, DATABASE_URL env, or ~/.bannerctl/config.toml")
    }

    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.database.acquire_timeout_secs)
    }

    /// Per-operation deadline, if configured
    pub fn deadline(&self) -> Option<Duration> {
        self.engine.timeout_ms.map(Duration::from_millis)
    }
}

/// Replace `${VAR}` with the variable's value; unknown variables stay verbatim.
fn expand_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find('}') {
            Some(end) => {
                let name = &after[..end];
                match env::var(name) {
                    Ok(value) => out.push_str(&value),
                    Err(_) => out.push_str(&rest[start..start + 2 + end + 1]),
                }
                rest = &after[end + 1..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn parses_full_config() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[database]
url = "postgres://localhost/banners"
max_connections = 12
acquire_timeout_secs = 3

[engine]
timeout_ms = 1500
"#
        )
        .unwrap();

        let config = BannerConfig::load_from(file.path()).unwrap();
        assert_eq!(config.database.max_connections, 12);
        assert_eq!(config.acquire_timeout(), Duration::from_secs(3));
        if env::var("BANNERCTL_TIMEOUT_MS").is_err() {
            assert_eq!(config.deadline(), Some(Duration::from_millis(1500)));
        }
    }

    #[test]
    fn empty_file_uses_defaults() {
        let file = NamedTempFile::new().unwrap();
        let config = BannerConfig::load_from(file.path()).unwrap();
        assert_eq!(config.database.max_connections, DEFAULT_MAX_CONNECTIONS);
        assert_eq!(config.acquire_timeout(), DEFAULT_ACQUIRE_TIMEOUT);
    }

    #[test]
    fn invalid_toml_is_reported() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[database").unwrap();
        let err = BannerConfig::load_from(file.path()).unwrap_err();
        assert!(err.to_string().contains("invalid TOML"));
    }

    #[test]
    fn missing_url_is_actionable() {
        let config = BannerConfig::default();
        let err = config.database_url().unwrap_err();
        assert!(err.to_string().contains("DATABASE_URL not set"));
    }

    #[test]
    fn timeout_override_is_parsed() {
        let mut config = BannerConfig::default();
        config
            .apply_overrides(|name| match name {
                "BANNERCTL_TIMEOUT_MS" => Some("750".into()),
                "DATABASE_URL" => Some("postgres://env/banners".into()),
                _ => None,
            })
            .unwrap();
        assert_eq!(config.deadline(), Some(Duration::from_millis(750)));
        assert_eq!(config.database_url().unwrap(), "postgres://env/banners");
    }

    #[test]
    fn invalid_timeout_override_is_an_error() {
        let mut config = BannerConfig::default();
        let err = config
            .apply_overrides(|name| (name == "BANNERCTL_TIMEOUT_MS").then(|| "soon".into()))
            .unwrap_err();
        assert!(err.to_string().contains("BANNERCTL_TIMEOUT_MS"));
        assert_eq!(config.deadline(), None);
    }

    #[test]
    fn empty_database_url_override_is_ignored() {
        let mut config = BannerConfig::default();
        config.database.url = Some("postgres://file/banners".into());
        config
            .apply_overrides(|name| (name == "DATABASE_URL").then(String::new))
            .unwrap();
        assert_eq!(config.database_url().unwrap(), "postgres://file/banners");
    }

    #[test]
    fn env_file_is_loaded_and_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        fs::write(&path, "BANNERCTL_DOTENV_TEST_VAR=from-file\n").unwrap();

        let mut report = DotenvReport::default();
        load_env_file(&path, &mut report);
        load_env_file(&dir.path().join("missing.env"), &mut report);

        assert_eq!(report.loaded, vec![path]);
        assert!(report.failed.is_empty());
        assert_eq!(env::var("BANNERCTL_DOTENV_TEST_VAR").unwrap(), "from-file");
    }

    #[test]
    fn expands_known_variables_only() {
        if let Ok(home) = env::var("HOME") {
            assert_eq!(expand_string("a${HOME}b"), format!("a{home}b"));
        }
        assert_eq!(
            expand_string("x${BANNERCTL_SURELY_UNSET_VAR}y"),
            "x${BANNERCTL_SURELY_UNSET_VAR}y"
        );
        assert_eq!(expand_string("open ${brace"), "open ${brace");
    }
}
