use parsecase::ParserOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name looked up in the working directory by [`Config::load`].
pub const CONFIG_FILE_NAME: &str = "parsecase.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Failed to expand fixture pattern '{pattern}': {source}")]
    PatternExpandError {
        pattern: String,
        source: shellexpand::LookupError<std::env::VarError>,
    },

    #[error("Invalid fixture pattern '{pattern}': {source}")]
    PatternError {
        pattern: String,
        source: glob::PatternError,
    },

    #[error("Failed to read fixture path: {0}")]
    GlobError(#[from] glob::GlobError),

    #[error("Option '{key}' cannot be passed to a parser: {reason}")]
    OptionValueError { key: String, reason: String },
}

/// Contents of `parsecase.toml`.
///
/// ```toml
/// fixtures = ["tests/fixtures/**/*.txt"]
///
/// [options]
/// dialect = "legacy"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Glob patterns locating fixture files. Shell variables and `~` are
    /// expanded; relative patterns resolve against the config file's
    /// directory.
    #[serde(default)]
    pub fixtures: Vec<String>,

    /// Base parser options, applied before each case's own header options.
    ///
    /// Every case sets `strict` to `false` unless its header says
    /// otherwise, so a base `strict` never reaches a parse run by a case.
    #[serde(default, skip_serializing_if = "toml::Table::is_empty")]
    pub options: toml::Table,

    #[serde(skip)]
    base_dir: Option<PathBuf>,
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            log::debug!("no config file at {}", config_path.display());
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;
        config.base_dir = config_path.parent().map(Path::to_path_buf);

        log::debug!(
            "loaded {} with {} fixture pattern(s)",
            config_path.display(),
            config.fixtures.len()
        );
        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        PathBuf::from(CONFIG_FILE_NAME)
    }

    /// Directory relative fixture patterns resolve against, if any.
    pub fn base_dir(&self) -> Option<&Path> {
        self.base_dir.as_deref()
    }

    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(base_dir.into());
        self
    }

    /// Every file matched by the fixture patterns, sorted and deduplicated.
    pub fn fixture_files(&self) -> Result<Vec<PathBuf>, ConfigError> {
        let mut files = Vec::new();
        for pattern in &self.fixtures {
            let full_pattern = self.expand_pattern(pattern)?;
            let paths = glob::glob(&full_pattern).map_err(|source| ConfigError::PatternError {
                pattern: pattern.clone(),
                source,
            })?;
            for path in paths {
                files.push(path?);
            }
        }
        files.sort();
        files.dedup();
        Ok(files)
    }

    /// Base options converted to the JSON values parsers receive.
    pub fn parser_options(&self) -> Result<ParserOptions, ConfigError> {
        let mut map = serde_json::Map::new();
        for (key, value) in &self.options {
            let value = to_json(value).map_err(|reason| ConfigError::OptionValueError {
                key: key.clone(),
                reason,
            })?;
            map.insert(key.clone(), value);
        }
        Ok(ParserOptions::from(map))
    }

    fn expand_pattern(&self, pattern: &str) -> Result<String, ConfigError> {
        let expanded =
            shellexpand::full(pattern).map_err(|source| ConfigError::PatternExpandError {
                pattern: pattern.to_string(),
                source,
            })?;

        match &self.base_dir {
            Some(base) if Path::new(expanded.as_ref()).is_relative() => {
                let base = glob::Pattern::escape(&base.to_string_lossy());
                if base.is_empty() {
                    Ok(expanded.into_owned())
                } else {
                    Ok(format!("{base}/{expanded}"))
                }
            }
            _ => Ok(expanded.into_owned()),
        }
    }
}

fn to_json(value: &toml::Value) -> Result<serde_json::Value, String> {
    use serde_json::Value as Json;

    Ok(match value {
        toml::Value::String(s) => Json::String(s.clone()),
        toml::Value::Integer(i) => Json::from(*i),
        toml::Value::Float(f) => serde_json::Number::from_f64(*f)
            .map(Json::Number)
            .ok_or_else(|| format!("{f} has no JSON representation"))?,
        toml::Value::Boolean(b) => Json::Bool(*b),
        toml::Value::Datetime(d) => return Err(format!("datetime {d} is not supported")),
        toml::Value::Array(items) => Json::Array(items.iter().map(to_json).collect::<Result<_, _>>()?),
        toml::Value::Table(table) => Json::Object(
            table
                .iter()
                .map(|(k, v)| to_json(v).map(|v| (k.clone(), v)))
                .collect::<Result<_, _>>()?,
        ),
    })
}
