use std::{num::ParseIntError, path::PathBuf};

use thiserror::Error;

/// ConfigError
///
/// Startup failures. The gate refuses to start rather than serve with a broken setup;
/// request handling itself has no error path.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid PORT value {value:?}: {source}")]
    InvalidPort {
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("front-end bundle not found: {} has no index.html", .0.display())]
    MissingAssets(PathBuf),
}
