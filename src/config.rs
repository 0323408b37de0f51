/// Resolver configuration.
///
/// The defaults describe Qt itself.  A TOML file can override them, e.g.
/// for a code base that wraps its private implementation in a differently
/// named accessor or declares additional sentinel parameter types:
///
/// ```toml
/// [resolver]
/// private_impl_accessor = "d_func"
/// sentinel_parameter_types = ["QPrivateSignal", "MyPrivateTag"]
/// ```
///
/// # Lookup order
///
///   1. An explicit path (the CLI's `--config`).  A missing file is an error.
///   2. `<user config dir>/slotref/config.toml`, when it exists.
///   3. Built-in defaults.
use std::path::{Path, PathBuf};

use etcetera::BaseStrategy;
use serde::Deserialize;

use crate::error::LoadError;

/// Name of the application directory under the user config dir.
const APP_DIR: &str = "slotref";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub resolver: ResolverConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResolverConfig {
    /// Only calls on classes whose name starts with this prefix are
    /// inspected by the dispatcher.
    pub class_prefix: String,
    /// Zero-argument accessor returning a pointer to the private
    /// implementation class.
    pub private_impl_accessor: String,
    /// Free function whose single string argument carries the signature
    /// when the code is built with `QT_NO_DEBUG` turned off.
    pub flag_location_function: String,
    /// Printed types of trailing parameters a signature may leave out.
    pub sentinel_parameter_types: Vec<String>,
    /// Upper bound on the number of classes visited while looking up
    /// candidates, to stop on cyclic hierarchies.
    pub max_base_depth: u32,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            class_prefix: "Q".to_string(),
            private_impl_accessor: "d_func".to_string(),
            flag_location_function: "qFlagLocation".to_string(),
            sentinel_parameter_types: vec!["QPrivateSignal".to_string()],
            max_base_depth: 32,
        }
    }
}

impl ResolverConfig {
    pub(crate) fn is_sentinel_type(&self, printed: &str) -> bool {
        self.sentinel_parameter_types.iter().any(|t| t == printed)
    }
}

impl Config {
    /// Parse a configuration from TOML text.
    pub fn from_toml(content: &str, origin: &Path) -> Result<Self, LoadError> {
        toml::from_str(content).map_err(|source| LoadError::Config {
            path: origin.to_path_buf(),
            source,
        })
    }

    /// Read and parse the configuration file at `path`.
    pub fn from_file(path: &Path) -> Result<Self, LoadError> {
        let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content, path)
    }

    /// Load the configuration following the lookup order described in the
    /// module documentation.
    pub fn load(explicit: Option<&Path>) -> Result<Self, LoadError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        match Self::user_config_path() {
            Some(path) if path.is_file() => {
                tracing::debug!("loading configuration from {}", path.display());
                Self::from_file(&path)
            }
            _ => Ok(Self::default()),
        }
    }

    /// `<user config dir>/slotref/config.toml`, if a home directory is known.
    pub fn user_config_path() -> Option<PathBuf> {
        let strategy = etcetera::choose_base_strategy().ok()?;
        Some(strategy.config_dir().join(APP_DIR).join(CONFIG_FILE))
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
