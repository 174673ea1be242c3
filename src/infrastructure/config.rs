use std::path::{Path, PathBuf};

use config::ConfigError;
use ratatui::style::Color;
use serde::Deserialize;

use crate::utils;

const CONFIG: &str = include_str!("../../.config/config.json5");

#[derive(Clone, Debug, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub _data_dir: PathBuf,
    #[serde(default)]
    pub _config_dir: PathBuf,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default, flatten)]
    pub config: AppConfig,
    #[serde(default)]
    pub api_base_url: String,
    /// Bearer token handed out by the web login; a stored credential takes precedence
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub styles: Styles,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub struct Styles {
    #[serde(default = "Styles::default_pending")]
    pub pending: Color,
    #[serde(default = "Styles::default_delivered")]
    pub delivered: Color,
    #[serde(default = "Styles::default_selected")]
    pub selected: Color,
    #[serde(default = "Styles::default_error")]
    pub error: Color,
    #[serde(default = "Styles::default_muted")]
    pub muted: Color,
}

impl Styles {
    fn default_pending() -> Color {
        Color::Yellow
    }
    fn default_delivered() -> Color {
        Color::Green
    }
    fn default_selected() -> Color {
        Color::Cyan
    }
    fn default_error() -> Color {
        Color::Red
    }
    fn default_muted() -> Color {
        Color::DarkGray
    }
}

impl Default for Styles {
    fn default() -> Self {
        Self {
            pending: Self::default_pending(),
            delivered: Self::default_delivered(),
            selected: Self::default_selected(),
            error: Self::default_error(),
            muted: Self::default_muted(),
        }
    }
}

impl Config {
    pub fn new() -> Result<Self, ConfigError> {
        Self::from_dirs(&utils::get_config_dir(), &utils::get_data_dir())
    }

    /// Load the embedded defaults, then any `config.*` file in `config_dir`,
    /// then `FUTURELETTERS_*` environment variables.
    pub fn from_dirs(config_dir: &Path, data_dir: &Path) -> Result<Self, ConfigError> {
        let default_config: Config = json5::from_str(CONFIG)
            .map_err(|e| ConfigError::Message(format!("Failed to load default config: {e}")))?;
        let mut builder = config::Config::builder()
            .set_default("_data_dir", data_dir.to_string_lossy().to_string())?
            .set_default("_config_dir", config_dir.to_string_lossy().to_string())?;

        let config_files = [
            ("config.json5", config::FileFormat::Json5),
            ("config.json", config::FileFormat::Json),
            ("config.yaml", config::FileFormat::Yaml),
            ("config.toml", config::FileFormat::Toml),
            ("config.ini", config::FileFormat::Ini),
        ];
        let mut found_config = false;
        for (file, format) in &config_files {
            builder = builder.add_source(
                config::File::from(config_dir.join(file))
                    .format(*format)
                    .required(false),
            );
            if config_dir.join(file).exists() {
                found_config = true
            }
        }
        if !found_config {
            log::info!(
                "No configuration file in {}, using defaults",
                config_dir.display()
            );
        }
        builder = builder.add_source(
            config::Environment::with_prefix(&utils::paths::PROJECT_NAME).try_parsing(false),
        );

        let mut cfg: Self = builder.build()?.try_deserialize()?;

        if cfg.api_base_url.trim().is_empty() {
            cfg.api_base_url.clone_from(&default_config.api_base_url);
        }
        if !(cfg.api_base_url.starts_with("http://") || cfg.api_base_url.starts_with("https://"))
        {
            return Err(ConfigError::Message(format!(
                "api_base_url must start with http:// or https://, got {:?}",
                cfg.api_base_url
            )));
        }
        cfg.api_base_url = cfg.api_base_url.trim_end_matches('/').to_string();
        if cfg.token.as_deref().is_some_and(|t| t.trim().is_empty()) {
            cfg.token = None;
        }

        Ok(cfg)
    }
}
