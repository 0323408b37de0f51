/// Errors raised while loading configuration and unit files.
///
/// Resolution itself never fails loudly: an unresolvable call site simply
/// produces no use.  Only the input plumbing around it reports errors.
use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid configuration in {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid unit file {path}: {source}")]
    Unit {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("class `{name}` is declared more than once")]
    DuplicateClass { name: String },
}
