use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{check_unit_interval, LexMapError, Result};

/// Name of the configuration file stored inside the `.lexmap` directory.
pub const CONFIG_FILENAME: &str = "config.json";

/// Name of the hidden directory used to store LexMap state.
pub const LEXMAP_DIR: &str = ".lexmap";

/// Default name of the mapping cache file.
pub const CACHE_FILENAME: &str = "mappings.json";

/// Configuration for a LexMap data directory.
///
/// Missing fields fall back to their defaults, so a partial file is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LexMapConfig {
    /// Schema version of the configuration.
    pub version: u32,
    /// Root under which the `.lexmap` directory lives.
    pub data_dir: String,
    /// File name of the mapping cache inside the `.lexmap` directory.
    pub cache_file: String,
    /// Capacity of the symbol parser's memo cache.
    pub parser_cache_size: usize,
    /// Capacity of each of the fuzzy matcher's memo caches.
    pub fuzzy_cache_size: usize,
    /// Records between two extraction progress callbacks.
    pub progress_interval: usize,
    /// Fuzzy threshold used when the caller does not pick one.
    pub default_threshold: f64,
    /// Hop cap used for transitive queries.
    pub max_hops: u32,
}

impl Default for LexMapConfig {
    fn default() -> Self {
        Self {
            version: 1,
            data_dir: String::new(),
            cache_file: CACHE_FILENAME.to_string(),
            parser_cache_size: 4096,
            fuzzy_cache_size: 8192,
            progress_interval: 1000,
            default_threshold: 0.8,
            max_hops: 2,
        }
    }
}

impl LexMapConfig {
    /// Defaults rooted at `root`.
    pub fn for_root(root: &Path) -> Self {
        Self {
            data_dir: root.to_string_lossy().to_string(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !check_unit_interval(self.default_threshold) {
            return Err(LexMapError::InvalidThreshold {
                value: self.default_threshold,
            });
        }
        if self.parser_cache_size == 0 || self.fuzzy_cache_size == 0 {
            return Err(LexMapError::Config {
                message: "cache sizes must be greater than zero".to_string(),
            });
        }
        if self.progress_interval == 0 {
            return Err(LexMapError::Config {
                message: "progress_interval must be greater than zero".to_string(),
            });
        }
        if self.cache_file.is_empty() {
            return Err(LexMapError::Config {
                message: "cache_file must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Root that holds the `.lexmap` directory.
    ///
    /// An empty `data_dir` means the per-user root from [`default_data_root`].
    pub fn data_root(&self) -> PathBuf {
        if self.data_dir.is_empty() {
            default_data_root()
        } else {
            PathBuf::from(&self.data_dir)
        }
    }

    /// Full path of the cache file for this configuration.
    pub fn cache_path(&self) -> PathBuf {
        get_data_dir(&self.data_root()).join(&self.cache_file)
    }
}

/// Returns the path to the `.lexmap` directory within `root`.
pub fn get_data_dir(root: &Path) -> PathBuf {
    root.join(LEXMAP_DIR)
}

/// Returns the path to `config.json` within the `.lexmap` directory.
pub fn get_config_path(root: &Path) -> PathBuf {
    get_data_dir(root).join(CONFIG_FILENAME)
}

/// Returns the path of the default cache file within the `.lexmap` directory.
pub fn get_cache_path(root: &Path) -> PathBuf {
    get_data_dir(root).join(CACHE_FILENAME)
}

/// Per-user root for LexMap state, e.g. `~/.cache/lexmap` on Linux.
///
/// Falls back to the system temp directory when the platform reports no
/// cache directory.
pub fn default_data_root() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("lexmap")
}

fn config_error(action: &str, path: &Path, err: impl std::fmt::Display) -> LexMapError {
    LexMapError::Config {
        message: format!("cannot {action} {}: {err}", path.display()),
    }
}

/// Loads the configuration from disk.
///
/// If the configuration file does not exist, returns defaults with
/// `data_dir` set to `root`.
pub fn load_config(root: &Path) -> Result<LexMapConfig> {
    let config_path = get_config_path(root);

    if !config_path.exists() {
        return Ok(LexMapConfig::for_root(root));
    }

    let contents = fs::read_to_string(&config_path)
        .map_err(|e| config_error("read lexmap config", &config_path, e))?;
    let mut config: LexMapConfig = serde_json::from_str(&contents)
        .map_err(|e| config_error("decode lexmap config", &config_path, e))?;
    if config.data_dir.is_empty() {
        config.data_dir = root.to_string_lossy().to_string();
    }

    config.validate()?;
    Ok(config)
}

/// Validates `config` and writes it under `root`.
///
/// The JSON goes to a sibling `.tmp` file first and is renamed over the old
/// config, so a reader never sees a half-written file.
pub fn save_config(root: &Path, config: &LexMapConfig) -> Result<()> {
    config.validate()?;

    let data_dir = get_data_dir(root);
    fs::create_dir_all(&data_dir)
        .map_err(|e| config_error("create lexmap directory", &data_dir, e))?;

    let json = serde_json::to_vec_pretty(config)?;
    let config_path = get_config_path(root);
    let staged = config_path.with_extension("tmp");
    fs::write(&staged, json).map_err(|e| config_error("stage lexmap config", &staged, e))?;
    fs::rename(&staged, &config_path)
        .map_err(|e| config_error("replace lexmap config", &config_path, e))
}
