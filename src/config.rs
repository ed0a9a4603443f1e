use serde::Deserialize;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::cli::Cli;
use crate::error::{DexError, Result};

pub const DEFAULT_API_BASE: &str = "https://pokeapi.co/api/v2";
pub const DEFAULT_SPRITE_BASE: &str =
    "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon/other/official-artwork";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub sprite_base: String,
    pub limit: u32,
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE.to_string(),
            sprite_base: DEFAULT_SPRITE_BASE.to_string(),
            limit: 151,
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub page_size: usize,
    pub carousel_ids: Vec<u32>,
    pub carousel_interval_secs: u64,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            page_size: 12,
            carousel_ids: vec![25, 6, 143, 150, 249],
            carousel_interval_secs: 5,
        }
    }
}

impl ViewConfig {
    pub fn carousel_interval(&self) -> Duration {
        Duration::from_secs(self.carousel_interval_secs)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub view: ViewConfig,
}

fn config_path() -> Option<PathBuf> {
    let config_dir = dirs::config_dir()?;
    Some(config_dir.join("dex").join("config.toml"))
}

/// Where logs go when `--log-file` isn't given: `<cache dir>/dex/dex.log`.
pub fn default_log_path() -> Option<PathBuf> {
    let cache_dir = dirs::cache_dir()?;
    Some(cache_dir.join("dex").join("dex.log"))
}

impl Config {
    /// Load the default config file, falling back to defaults when it is
    /// missing or broken.
    pub fn load() -> Self {
        match config_path() {
            Some(path) => Config::load_or_default(&path),
            None => Config::default(),
        }
    }

    fn load_or_default(path: &Path) -> Self {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Config::default(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "cannot read config");
                return Config::default();
            }
        };

        match toml::from_str::<Config>(&content) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring invalid config");
                Config::default()
            }
        }
    }

    /// Load an explicitly requested config file. Unlike `load`, errors are fatal.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| DexError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Resolve the effective config: file (explicit or default), then CLI overrides.
    pub fn resolve(cli: &Cli) -> Result<Self> {
        let mut config = match &cli.config {
            Some(path) => Config::load_from(path)?,
            None => Config::load(),
        };
        config.apply_cli(cli);
        config.validate()?;
        Ok(config)
    }

    fn apply_cli(&mut self, cli: &Cli) {
        if let Some(base) = &cli.api_base {
            self.api.base_url = base.clone();
        }
        if let Some(base) = &cli.sprite_base {
            self.api.sprite_base = base.clone();
        }
        if let Some(limit) = cli.limit {
            self.api.limit = limit;
        }
        if let Some(page_size) = cli.page_size {
            self.view.page_size = page_size;
        }
        if let Some(secs) = cli.carousel_interval {
            self.view.carousel_interval_secs = secs;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.api.limit == 0 {
            return Err(DexError::Config("limit must be at least 1".into()));
        }
        if self.view.page_size == 0 {
            return Err(DexError::Config("page_size must be at least 1".into()));
        }
        if self.view.carousel_interval_secs == 0 {
            return Err(DexError::Config(
                "carousel_interval_secs must be at least 1".into(),
            ));
        }
        if self.api.base_url.trim().is_empty() {
            return Err(DexError::Config("api base_url is empty".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::sync::{Arc, Mutex};

    #[test]
    fn parse_full_config() {
        let toml_str = r#"
[api]
base_url = "http://localhost:9000/api/v2"
sprite_base = "http://localhost:9000/art"
limit = 20
timeout_secs = 3

[view]
page_size = 6
carousel_ids = [1, 4, 7]
carousel_interval_secs = 2
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.api.base_url, "http://localhost:9000/api/v2");
        assert_eq!(config.api.limit, 20);
        assert_eq!(config.api.timeout_secs, 3);
        assert_eq!(config.view.page_size, 6);
        assert_eq!(config.view.carousel_ids, vec![1, 4, 7]);
        assert_eq!(config.view.carousel_interval(), Duration::from_secs(2));
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let config: Config = toml::from_str("[view]\npage_size = 24\n").unwrap();
        assert_eq!(config.view.page_size, 24);
        assert_eq!(config.view.carousel_ids, vec![25, 6, 143, 150, 249]);
        assert_eq!(config.api, ApiConfig::default());
    }

    #[test]
    fn empty_config_is_default() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.api.limit, 151);
        assert_eq!(config.view.page_size, 12);
    }

    #[test]
    fn cli_overrides_file_values() {
        let cli = Cli::parse_from([
            "dex",
            "--api-base",
            "http://mirror.local/api/v2",
            "--limit",
            "30",
            "--page-size",
            "5",
            "--carousel-interval",
            "9",
        ]);
        let mut config = Config::default();
        config.apply_cli(&cli);
        assert_eq!(config.api.base_url, "http://mirror.local/api/v2");
        assert_eq!(config.api.limit, 30);
        assert_eq!(config.view.page_size, 5);
        assert_eq!(config.view.carousel_interval_secs, 9);
        assert_eq!(config.api.sprite_base, DEFAULT_SPRITE_BASE);
    }

    #[test]
    fn validate_rejects_zero_page_size() {
        let mut config = Config::default();
        config.view.page_size = 0;
        assert!(matches!(config.validate(), Err(DexError::Config(_))));
    }

    #[test]
    fn validate_rejects_zero_limit_and_interval() {
        let mut config = Config::default();
        config.api.limit = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.view.carousel_interval_secs = 0;
        assert!(config.validate().is_err());

        assert!(Config::default().validate().is_ok());
    }

    /// Collects everything a fmt subscriber writes.
    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl LogBuffer {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl std::io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn load_capturing_logs(path: &Path) -> (Config, String) {
        let logs = LogBuffer::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_max_level(tracing::Level::TRACE)
            .with_writer(move || writer.clone())
            .finish();
        let config = tracing::subscriber::with_default(subscriber, || Config::load_or_default(path));
        (config, logs.contents())
    }

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("dex-config-{}-{}", name, std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn missing_default_file_is_silent() {
        let path = scratch_dir("missing").join("config.toml");
        let (config, logs) = load_capturing_logs(&path);
        assert_eq!(config, Config::default());
        assert!(logs.is_empty(), "unexpected log output: {}", logs);
    }

    #[test]
    fn unreadable_default_file_warns_and_uses_defaults() {
        let path = scratch_dir("binary").join("config.toml");
        std::fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();
        let (config, logs) = load_capturing_logs(&path);
        assert_eq!(config, Config::default());
        assert!(logs.contains("WARN"), "expected a warning, got: {}", logs);
        assert!(logs.contains("cannot read config"));
    }

    #[test]
    fn directory_in_place_of_file_warns() {
        let path = scratch_dir("dir").join("config.toml");
        std::fs::create_dir_all(&path).unwrap();
        let (config, logs) = load_capturing_logs(&path);
        assert_eq!(config, Config::default());
        assert!(logs.contains("cannot read config"), "got: {}", logs);
    }

    #[test]
    fn invalid_default_file_warns() {
        let path = scratch_dir("invalid").join("config.toml");
        std::fs::write(&path, "[view]\npage_size = \"twelve\"\n").unwrap();
        let (config, logs) = load_capturing_logs(&path);
        assert_eq!(config, Config::default());
        assert!(logs.contains("ignoring invalid config"), "got: {}", logs);
    }

    #[test]
    fn default_log_path_is_under_cache_dir() {
        if let (Some(path), Some(cache)) = (default_log_path(), dirs::cache_dir()) {
            assert!(path.starts_with(cache));
            assert!(path.ends_with("dex/dex.log"));
        }
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let err = Config::load_from(Path::new("/nonexistent/dex/config.toml")).unwrap_err();
        assert!(matches!(err, DexError::Io(_)));
    }
}
