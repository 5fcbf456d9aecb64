use std::{fs, io, path::Path};

use anyhow::Context;
use serde::Deserialize;
use shared::{domain::AnalysisType, protocol::ANALYZE_PATH};

pub const DEFAULT_CONFIG_PATH: &str = "analyzer.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server_url: String,
    pub endpoint: String,
    pub analysis_type: AnalysisType,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:5000".into(),
            endpoint: ANALYZE_PATH.into(),
            analysis_type: AnalysisType::default(),
        }
    }
}

/// Defaults, then the optional TOML file, then the process environment.
///
/// Environment order, later wins: `ANALYZER_SERVER_URL`, then
/// `APP__SERVER_URL`; `ANALYZER_ENDPOINT`; `ANALYZER_ANALYSIS_TYPE`.
pub fn load_settings(path: &Path) -> anyhow::Result<Settings> {
    load_settings_with_env(path, |key| std::env::var(key).ok())
}

pub fn load_settings_with_env(
    path: &Path,
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Settings> {
    let mut settings = match fs::read_to_string(path) {
        Ok(raw) => toml::from_str::<Settings>(&raw)
            .with_context(|| format!("failed to parse config file '{}'", path.display()))?,
        Err(err) if err.kind() == io::ErrorKind::NotFound => Settings::default(),
        Err(err) => {
            return Err(err)
                .with_context(|| format!("failed to read config file '{}'", path.display()))
        }
    };

    if let Some(v) = env("ANALYZER_SERVER_URL") {
        settings.server_url = v;
    }
    if let Some(v) = env("APP__SERVER_URL") {
        settings.server_url = v;
    }

    if let Some(v) = env("ANALYZER_ENDPOINT") {
        settings.endpoint = v;
    }

    if let Some(v) = env("ANALYZER_ANALYSIS_TYPE") {
        settings.analysis_type = v.parse().context("invalid ANALYZER_ANALYSIS_TYPE")?;
    }

    Ok(settings)
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
