/// Crate-level error types for speclint.
use std::path::PathBuf;

/// Fatal errors only. Content findings (broken links, undefined references,
/// terminology drift) are data, not errors; per-document read failures are
/// recovered by skipping the document.
#[allow(clippy::error_impl_error, reason = "crate-internal error type in binary")]
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Underlying I/O error from the filesystem.
    #[error("io: {0}")]
    Io(
        /// The wrapped I/O error.
        #[from]
        std::io::Error,
    ),

    /// JSON serialization of a report failed.
    #[error("json serialize: {0}")]
    JsonSer(
        /// The wrapped JSON serialization error.
        #[from]
        serde_json::Error,
    ),

    /// Scan root does not exist or is not a directory. Reported before any
    /// scanning begins.
    #[error("not a directory: {}", path.display())]
    NotADirectory {
        /// The offending scan root path.
        path: PathBuf,
    },

    /// Config file exists but cannot be parsed.
    #[error("toml deserialize: {0}")]
    TomlDe(
        /// The wrapped TOML deserialization error.
        #[from]
        toml::de::Error,
    ),
}
