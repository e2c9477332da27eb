//! Runtime configuration
//!
//! Precedence, lowest first: built-in defaults, an optional TOML file,
//! environment variables, then whatever the CLI passes explicitly.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{JobfinderError, Result};

/// Config file picked up from the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "jobfinder.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobfinderConfig {
    /// SQLite database file; its directory is created on first open
    pub database_path: PathBuf,
    pub server: ServerSection,
    pub scraper: ScraperSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    pub host: String,
    pub port: u16,
    /// Directory holding the browser client; unset disables the fallback
    pub static_dir: Option<PathBuf>,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScraperSection {
    pub user_agent: String,
    /// Pause between sources
    pub request_delay_ms: u64,
    pub robots_timeout_secs: u64,
}

impl Default for JobfinderConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("data").join("jobs.db"),
            server: ServerSection::default(),
            scraper: ScraperSection::default(),
        }
    }
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            static_dir: None,
            request_timeout_secs: 30,
        }
    }
}

impl Default for ScraperSection {
    fn default() -> Self {
        Self {
            user_agent: "CS-Internship-Finder-Bot/1.0 (Educational Project)".to_string(),
            request_delay_ms: 2000,
            robots_timeout_secs: 5,
        }
    }
}

impl JobfinderConfig {
    /// Load defaults, then `path` (or `./jobfinder.toml` if present), then
    /// environment overrides.
    ///
    /// An explicitly named file must exist; the implicit one is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let implicit = Path::new(DEFAULT_CONFIG_FILE);
                if implicit.exists() {
                    Self::from_file(implicit)?
                } else {
                    Self::default()
                }
            }
        };

        config.apply_overrides(|key| env::var(key).ok())?;
        Ok(config)
    }

    /// Parse a TOML config file. Missing keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| JobfinderError::config_parse(path, e))
    }

    /// Apply environment-style overrides from `lookup`.
    ///
    /// Recognised keys: `DATABASE_PATH`, `HOST`, `PORT`, `STATIC_DIR`,
    /// `JOBFINDER_USER_AGENT`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(path) = lookup("DATABASE_PATH") {
            self.database_path = PathBuf::from(path);
        }
        if let Some(host) = lookup("HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("PORT") {
            self.server.port = port
                .trim()
                .parse()
                .map_err(|_| JobfinderError::config(format!("PORT must be a port number, got '{port}'")))?;
        }
        if let Some(dir) = lookup("STATIC_DIR") {
            self.server.static_dir = Some(PathBuf::from(dir));
        }
        if let Some(agent) = lookup("JOBFINDER_USER_AGENT") {
            self.scraper.user_agent = agent;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let config = JobfinderConfig::default();
        assert_eq!(config.database_path, PathBuf::from("data/jobs.db"));
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.scraper.request_delay_ms, 2000);
    }

    #[test]
    fn env_overrides_win() {
        let mut config = JobfinderConfig::default();
        config
            .apply_overrides(lookup_from(&[
                ("DATABASE_PATH", "/tmp/postings.db"),
                ("PORT", "8080"),
                ("STATIC_DIR", "public"),
                ("HOST", ""),
            ]))
            .unwrap();

        assert_eq!(config.database_path, PathBuf::from("/tmp/postings.db"));
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.static_dir, Some(PathBuf::from("public")));
        assert_eq!(config.server.host, "127.0.0.1");
    }

    #[test]
    fn bad_port_is_a_config_error() {
        let mut config = JobfinderConfig::default();
        let err = config
            .apply_overrides(lookup_from(&[("PORT", "eighty")]))
            .unwrap_err();
        assert!(matches!(err, JobfinderError::Config { .. }));
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "database_path = \"var/db.sqlite\"\n\n[server]\nport = 4000\n"
        )
        .unwrap();

        let config = JobfinderConfig::from_file(file.path()).unwrap();
        assert_eq!(config.database_path, PathBuf::from("var/db.sqlite"));
        assert_eq!(config.server.port, 4000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.scraper, ScraperSection::default());
    }

    #[test]
    fn invalid_toml_reports_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "server = [").unwrap();

        let err = JobfinderConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, JobfinderError::ConfigParse { .. }));
    }
}
