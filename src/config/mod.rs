mod api;
mod defaults;
mod logging;
mod session;
mod validation;

use crate::cli::{Args, LogFormat};
use crate::error::{PachcaError, Result};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub use api::ApiConfig;
pub use defaults::DEFAULT_BASE_URL;
pub use logging::LoggingConfig;
pub use session::SessionConfig;
pub use validation::{expand_with, validate_base_url, validate_timeout};

#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub request_timeout: Duration,
    pub session_path: PathBuf,
    pub log_level: String,
    pub log_format: LogFormat,
}

/// On-disk configuration, YAML or JSON.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FileConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    pub fn from_env_and_args(args: &Args) -> Result<Self> {
        let file_config = match &args.config {
            Some(path) => FileConfig::load_from(path)?,
            None => FileConfig::load()?,
        };
        Self::from_sources(args, &file_config, |key| env::var(key).ok())
    }

    /// Resolve every setting: CLI args > environment > config file > defaults.
    pub fn from_sources(
        args: &Args,
        file: &FileConfig,
        env_lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let base_url = args
            .base_url
            .clone()
            .or_else(|| env_lookup("PACHCA_BASE_URL"))
            .or_else(|| file.api.base_url.clone())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let base_url = validate_base_url(&base_url)?;

        let timeout_secs = match args.timeout_secs {
            Some(secs) => secs,
            None => match env_lookup("PACHCA_TIMEOUT_SECS") {
                Some(raw) => raw.trim().parse::<u64>().map_err(|_| {
                    PachcaError::ConfigError(format!("PACHCA_TIMEOUT_SECS is not a number: {}", raw))
                })?,
                None => file
                    .api
                    .timeout_secs
                    .unwrap_or_else(defaults::default_timeout_secs),
            },
        };
        let timeout_secs = validate_timeout(timeout_secs)?;

        let session_path = args
            .session
            .clone()
            .or_else(|| env_lookup("PACHCA_SESSION_PATH").map(PathBuf::from))
            .or_else(|| {
                file.session
                    .path
                    .as_deref()
                    .map(|p| PathBuf::from(expand_with(p, &env_lookup)))
            })
            .unwrap_or_else(crate::session::default_session_path);

        let log_level = if args.verbose {
            "debug".to_string()
        } else {
            env_lookup("PACHCA_LOG")
                .or_else(|| env_lookup("RUST_LOG"))
                .or_else(|| file.logging.level.clone())
                .unwrap_or_else(defaults::default_log_level)
        };

        let log_format = match args.log_format {
            Some(format) => format,
            None => env_lookup("PACHCA_LOG_FORMAT")
                .or_else(|| file.logging.format.clone())
                .map(|raw| {
                    LogFormat::parse(&raw).ok_or_else(|| {
                        PachcaError::ConfigError(format!("unknown log format: {}", raw))
                    })
                })
                .transpose()?
                .unwrap_or_default(),
        };

        Ok(Config {
            base_url,
            request_timeout: Duration::from_secs(timeout_secs),
            session_path,
            log_level,
            log_format,
        })
    }
}

impl FileConfig {
    pub fn load() -> Result<Self> {
        for path in Self::get_config_paths() {
            if path.exists() {
                return Self::load_from(&path);
            }
        }

        Ok(FileConfig::default())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let is_yaml = matches!(
            path.extension().and_then(|s| s.to_str()),
            Some("yaml") | Some("yml")
        );
        let config = if is_yaml {
            serde_yaml::from_str(&contents).with_context(|| {
                format!("Failed to parse YAML config file: {}", path.display())
            })?
        } else {
            serde_json::from_str(&contents).with_context(|| {
                format!("Failed to parse JSON config file: {}", path.display())
            })?
        };

        Ok(config)
    }

    pub fn get_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![
            PathBuf::from(".mcp-pachca.yaml"),
            PathBuf::from(".mcp-pachca.yml"),
            PathBuf::from(".mcp-pachca.json"),
        ];

        if let Some(home_dir) = dirs::home_dir() {
            let config_dir = home_dir.join(".config").join("mcp-pachca");
            paths.push(config_dir.join("config.yaml"));
            paths.push(config_dir.join("config.yml"));
            paths.push(config_dir.join("config.json"));
        }

        paths
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_without_sources() {
        let config = Config::from_sources(&Args::default(), &FileConfig::default(), env_of(&[]))
            .unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.log_level, "info");
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert!(config.session_path.ends_with("mcp-pachca/session.json"));
    }

    #[test]
    fn cli_beats_env_beats_file() {
        let file: FileConfig = serde_yaml::from_str(
            "api:\n  base_url: https://file.example/api\n  timeout_secs: 10\n",
        )
        .unwrap();
        let env = env_of(&[
            ("PACHCA_BASE_URL", "https://env.example/api"),
            ("PACHCA_TIMEOUT_SECS", "20"),
        ]);

        let from_env = Config::from_sources(&Args::default(), &file, &env).unwrap();
        assert_eq!(from_env.base_url, "https://env.example/api");
        assert_eq!(from_env.request_timeout, Duration::from_secs(20));

        let args = Args {
            base_url: Some("https://cli.example/api/".to_string()),
            timeout_secs: Some(5),
            ..Args::default()
        };
        let from_cli = Config::from_sources(&args, &file, &env).unwrap();
        assert_eq!(from_cli.base_url, "https://cli.example/api");
        assert_eq!(from_cli.request_timeout, Duration::from_secs(5));

        let from_file = Config::from_sources(&Args::default(), &file, env_of(&[])).unwrap();
        assert_eq!(from_file.base_url, "https://file.example/api");
        assert_eq!(from_file.request_timeout, Duration::from_secs(10));
    }

    #[test]
    fn session_path_from_file_expands_variables() {
        let file: FileConfig =
            serde_json::from_str(r#"{"session": {"path": "${PACHCA_HOME}/session.json"}}"#)
                .unwrap();
        let config = Config::from_sources(
            &Args::default(),
            &file,
            env_of(&[("PACHCA_HOME", "/srv/pachca")]),
        )
        .unwrap();
        assert_eq!(config.session_path, PathBuf::from("/srv/pachca/session.json"));
    }

    #[test]
    fn verbose_flag_forces_debug() {
        let args = Args {
            verbose: true,
            ..Args::default()
        };
        let config =
            Config::from_sources(&args, &FileConfig::default(), env_of(&[("PACHCA_LOG", "warn")]))
                .unwrap();
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn bad_env_values_are_config_errors() {
        let err = Config::from_sources(
            &Args::default(),
            &FileConfig::default(),
            env_of(&[("PACHCA_TIMEOUT_SECS", "soon")]),
        )
        .unwrap_err();
        assert!(matches!(err, PachcaError::ConfigError(_)));

        let err = Config::from_sources(
            &Args::default(),
            &FileConfig::default(),
            env_of(&[("PACHCA_LOG_FORMAT", "xml")]),
        )
        .unwrap_err();
        assert!(matches!(err, PachcaError::ConfigError(_)));
    }

    #[test]
    fn load_from_reads_yaml_and_json() {
        let dir = tempfile::TempDir::new().unwrap();
        let yaml = dir.path().join("config.yaml");
        fs::write(&yaml, "logging:\n  format: json\n").unwrap();
        let json = dir.path().join("config.json");
        fs::write(&json, r#"{"api": {"timeout_secs": 12}}"#).unwrap();

        assert_eq!(
            FileConfig::load_from(&yaml).unwrap().logging.format.as_deref(),
            Some("json")
        );
        assert_eq!(FileConfig::load_from(&json).unwrap().api.timeout_secs, Some(12));
    }

    #[test]
    fn load_from_reports_parse_failures() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{not json").unwrap();
        let err = FileConfig::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse JSON config file"));
    }
}
