use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub seed: SeedConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

/// Where the initial entity snapshot comes from
#[derive(Debug, Deserialize, Clone, Default)]
pub struct SeedConfig {
    /// JSON snapshot file; built-in sample data is used when absent
    pub path: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ExportConfig {
    /// Directory receiving CSV exports
    #[serde(default = "default_export_dir")]
    pub dir: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            dir: default_export_dir(),
        }
    }
}

fn default_export_dir() -> String {
    "target/exports".to_string()
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[seed]

[export]
dir = "target/exports"
"#;

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    Ok(toml::from_str(contents)?)
}

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Next to the executable
/// 2. Falls back to embedded default config
pub fn load_config() -> anyhow::Result<Config> {
    if let Some(exe_dir) = exe_dir() {
        let config_path = exe_dir.join("config.toml");
        if config_path.exists() {
            tracing::info!("Loading config from: {}", config_path.display());
            let contents = std::fs::read_to_string(&config_path)?;
            return parse_config(&contents);
        }
        tracing::warn!("config.toml not found at: {}", config_path.display());
    }

    tracing::info!("Using default embedded configuration");
    parse_config(DEFAULT_CONFIG)
}

/// Resolve a configured path. Relative paths are taken relative to the
/// executable directory, falling back to the current directory.
pub fn resolve_path(path: &str) -> PathBuf {
    let candidate = Path::new(path);
    if candidate.is_absolute() {
        return candidate.to_path_buf();
    }
    match exe_dir() {
        Some(dir) => dir.join(candidate),
        None => PathBuf::from(path),
    }
}

fn exe_dir() -> Option<PathBuf> {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
}
