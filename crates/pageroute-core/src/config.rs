use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::placeholder::LANGUAGE_PLACEHOLDER;

/// Site routing configuration loaded from `~/.config/pageroute/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouterConfig {
    /// Supported language codes, used for `.html.<lang>` suffixes and the
    /// `language` placeholder when `[placeholders]` does not define one.
    pub languages: Vec<String>,
    /// Language assumed when neither suffix nor query string names one.
    pub default_language: String,
    /// Known URL suffixes stripped before lookup (longest match wins).
    pub suffixes: Vec<String>,
    /// Resolve `file.ext` under wildcard pages with the stem as parameter.
    pub extension_matching: bool,
    /// Variants with more segments than this only get trailing cuts.
    pub max_combination_segments: usize,
    /// Try the bare `*` catch-all as the last candidate.
    pub catch_all: bool,
    /// Query-string key naming the request language (e.g. `?lang=de`).
    pub language_query_key: String,
    /// Also match pages whose `live` flag is off (preview mode).
    #[serde(default)]
    pub include_unpublished: bool,
    /// Optional site database path; the XDG state dir is used when missing.
    #[serde(default)]
    pub database: Option<PathBuf>,
    /// Placeholder name -> admissible literal values.
    #[serde(default)]
    pub placeholders: BTreeMap<String, Vec<String>>,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            languages: vec!["en".to_string(), "de".to_string()],
            default_language: "en".to_string(),
            suffixes: vec![".html".to_string(), ".php".to_string()],
            extension_matching: true,
            max_combination_segments: 6,
            catch_all: true,
            language_query_key: "lang".to_string(),
            include_unpublished: false,
            database: None,
            placeholders: BTreeMap::new(),
        }
    }
}

impl RouterConfig {
    /// Placeholder table with `language` filled in from `languages` if absent.
    pub fn effective_placeholders(&self) -> BTreeMap<String, Vec<String>> {
        let mut out = self.placeholders.clone();
        if !self.languages.is_empty() {
            out.entry(LANGUAGE_PLACEHOLDER.to_string())
                .or_insert_with(|| self.languages.clone());
        }
        out
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("pageroute")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<RouterConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = RouterConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    load_from(&path)
}

/// Load configuration from an explicit path.
pub fn load_from(path: &Path) -> Result<RouterConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("read config {}", path.display()))?;
    let cfg: RouterConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    if !cfg.default_language.is_empty() && !cfg.languages.contains(&cfg.default_language) {
        tracing::warn!(
            "default_language {:?} is not listed in languages",
            cfg.default_language
        );
    }
    Ok(cfg)
}
