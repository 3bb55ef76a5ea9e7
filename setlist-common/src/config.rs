//! Configuration loading and root folder resolution
//!
//! Missing configuration never stops a service from starting: every value
//! has a compiled default, and an absent or unreadable TOML file only logs a
//! message.

use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Environment variable overriding the root folder
pub const ROOT_FOLDER_ENV: &str = "SETLIST_ROOT_FOLDER";

/// Database file name inside the root folder
pub const DATABASE_FILE: &str = "archive.db";

/// Directory name used under the platform config/data directories
const APP_DIR: &str = "setlist-archive";

/// Default HTTP port of the browsing service
pub const DEFAULT_PORT: u16 = 5780;

/// Default bind address of the browsing service
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1";

/// Logging section of the TOML file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Server section of the TOML file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    pub bind_address: Option<String>,
    pub port: Option<u16>,
}

/// Contents of `<config dir>/setlist-archive/<module>.toml`
///
/// ```toml
/// root_folder = "/srv/archive"
///
/// [logging]
/// level = "debug"
///
/// [server]
/// bind_address = "0.0.0.0"
/// port = 8080
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TomlConfig {
    pub root_folder: Option<PathBuf>,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

impl TomlConfig {
    /// Read and parse a TOML config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| crate::Error::Config(format!("{}: {}", path.display(), e)))
    }
}

/// Values used when nothing else is configured
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledDefaults {
    pub root_folder: PathBuf,
    pub bind_address: String,
    pub port: u16,
}

impl CompiledDefaults {
    pub fn for_current_platform() -> Self {
        let root_folder = dirs::data_local_dir()
            .map(|d| d.join(APP_DIR))
            .unwrap_or_else(|| PathBuf::from(format!("./{}", APP_DIR)));

        Self {
            root_folder,
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

/// Root folder resolution, highest priority first:
/// 1. Command-line argument
/// 2. `SETLIST_ROOT_FOLDER` environment variable
/// 3. `root_folder` in the module's TOML file
/// 4. Compiled default
#[derive(Debug, Clone)]
pub struct RootFolderResolver {
    module_name: String,
    cli_arg: Option<PathBuf>,
}

impl RootFolderResolver {
    pub fn new(module_name: &str) -> Self {
        Self {
            module_name: module_name.to_string(),
            cli_arg: None,
        }
    }

    pub fn with_cli_arg(mut self, cli_arg: Option<PathBuf>) -> Self {
        self.cli_arg = cli_arg;
        self
    }

    /// Location of this module's TOML file, if the platform has a config dir
    pub fn config_file_path(&self) -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_DIR).join(format!("{}.toml", self.module_name)))
    }

    /// Load the module's TOML file; absent or invalid files yield `None`
    pub fn load_toml(&self) -> Option<TomlConfig> {
        let path = self.config_file_path()?;
        if !path.exists() {
            debug!("No config file at {}, using defaults", path.display());
            return None;
        }

        match TomlConfig::load(&path) {
            Ok(config) => Some(config),
            Err(e) => {
                warn!("Ignoring unreadable config file: {}", e);
                None
            }
        }
    }

    pub fn resolve(&self) -> PathBuf {
        if let Some(path) = &self.cli_arg {
            return path.clone();
        }

        if let Ok(path) = std::env::var(ROOT_FOLDER_ENV) {
            if !path.trim().is_empty() {
                return PathBuf::from(path);
            }
        }

        if let Some(root) = self.load_toml().and_then(|c| c.root_folder) {
            return root;
        }

        CompiledDefaults::for_current_platform().root_folder
    }
}

/// Prepares the resolved root folder for use
#[derive(Debug, Clone)]
pub struct RootFolderInitializer {
    root_folder: PathBuf,
}

impl RootFolderInitializer {
    pub fn new(root_folder: PathBuf) -> Self {
        Self { root_folder }
    }

    /// Create the root folder (and parents) if missing; idempotent
    pub fn ensure_directory_exists(&self) -> Result<()> {
        std::fs::create_dir_all(&self.root_folder)?;
        Ok(())
    }

    pub fn database_path(&self) -> PathBuf {
        self.root_folder.join(DATABASE_FILE)
    }

    pub fn database_exists(&self) -> bool {
        self.database_path().exists()
    }
}
