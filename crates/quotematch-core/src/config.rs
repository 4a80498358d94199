//! Lightweight configuration loader and path helpers.
//!
//! Uses Figment to merge `quotematch.toml` + `quotematch.<env>.toml` + `APP_*`
//! env vars. Provides helpers to expand `~` and `${VAR}` and to resolve
//! relative paths against a known base directory.
use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::error::Error;

pub const CONFIG_BASENAME: &str = "quotematch";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub data: DataSettings,
    pub search: SearchSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSettings {
    pub quotes_file: String,
    /// Optional lexicon override; the built-in lexicon is used when unset.
    pub lexicon_file: Option<String>,
}

impl Default for DataSettings {
    fn default() -> Self { Self { quotes_file: "quotes.json".to_string(), lexicon_file: None } }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    pub top_n: usize,
}

impl Default for SearchSettings {
    fn default() -> Self { Self { top_n: 3 } }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self { Self { level: "info".to_string() } }
}

impl Settings {
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.search.top_n == 0 {
            return Err(Error::InvalidConfig("search.top_n must be at least 1".to_string()));
        }
        if self.data.quotes_file.trim().is_empty() {
            return Err(Error::InvalidConfig("data.quotes_file must not be empty".to_string()));
        }
        Ok(())
    }
}

pub struct Config {
    figment: Figment,
    base_dir: PathBuf,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());
        Self::load_in(Path::new("."), &env_name)
    }

    /// Load configuration files from `base_dir` for the given environment name.
    pub fn load_in(base_dir: &Path, env_name: &str) -> anyhow::Result<Self> {
        let mut figment = Figment::new().merge(Toml::file(base_dir.join(format!("{CONFIG_BASENAME}.toml"))));
        match env_name {
            "dev" | "development" => figment = figment.merge(Toml::file(base_dir.join(format!("{CONFIG_BASENAME}.dev.toml")))),
            "prod" | "production" => figment = figment.merge(Toml::file(base_dir.join(format!("{CONFIG_BASENAME}.prod.toml")))),
            "test" | "testing" => figment = figment.merge(Toml::file(base_dir.join(format!("{CONFIG_BASENAME}.test.toml")))),
            _ => {}
        }
        figment = figment.merge(Env::prefixed("APP_").split("__"));

        let config = Self { figment, base_dir: base_dir.to_path_buf() };
        config.settings()?.validate()?;
        Ok(config)
    }

    pub fn get<T>(&self, key: &str) -> anyhow::Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.figment
            .extract_inner(key)
            .map_err(|e| anyhow::anyhow!("Failed to get '{}': {}", key, e))
    }

    pub fn settings(&self) -> anyhow::Result<Settings> {
        self.figment
            .extract()
            .map_err(|e| anyhow::anyhow!("Failed to read settings: {}", e))
    }

    /// `data.quotes_file`, expanded and resolved against the config directory.
    pub fn quotes_path(&self) -> anyhow::Result<PathBuf> {
        Ok(resolve_with_base(&self.base_dir, self.settings()?.data.quotes_file))
    }

    pub fn lexicon_path(&self) -> anyhow::Result<Option<PathBuf>> {
        Ok(self.settings()?.data.lexicon_file.map(|p| resolve_with_base(&self.base_dir, p)))
    }
}

/// `$VAR` and `~` expansion for configured file paths. Unset variables are left as written.
pub fn expand_path<S: AsRef<str>>(raw: S) -> PathBuf {
    let raw = raw.as_ref();
    let with_vars = shellexpand::env(raw).unwrap_or(std::borrow::Cow::Borrowed(raw));
    PathBuf::from(shellexpand::tilde(&with_vars).as_ref())
}

/// Expanded configured path, anchored at the config directory unless absolute.
pub fn resolve_with_base<S: AsRef<str>>(config_dir: &Path, raw: S) -> PathBuf {
    let path = expand_path(raw);
    if path.is_absolute() {
        path
    } else {
        config_dir.join(path)
    }
}
