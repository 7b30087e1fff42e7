use std::path::{Path, PathBuf};

use crate::error::Error;

/// Project configuration loaded from `.speclint.toml`.
/// Include/exclude patterns are path prefixes applied to markdown files
/// relative to the docs root.
pub struct Config {
    docs_root: Option<PathBuf>,
    exclude: Vec<String>,
    include: Vec<String>,
    terminology: Option<PathBuf>,
}

/// Raw TOML structure for `.speclint.toml`.
#[derive(serde::Deserialize)]
struct SpeclintTomlConfig {
    #[serde(default)]
    docs_root: Option<PathBuf>,
    #[serde(default)]
    exclude: Vec<String>,
    #[serde(default)]
    include: Vec<String>,
    #[serde(default)]
    terminology: Option<PathBuf>,
}

impl Config {
    /// Load config from `.speclint.toml` in the given root directory.
    /// Returns a default that scans `docs/` if the file doesn't exist.
    /// Returns an error if the file exists but is malformed — never silently
    /// falls back to defaults when the user wrote a config file.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if reading fails (other than not-found),
    /// or `Error::TomlDe` if the TOML is malformed.
    pub fn load(root: &Path) -> Result<Self, Error> {
        let path = root.join(".speclint.toml");
        let content = match std::fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::scan_docs_by_default());
            },
            Err(e) => return Err(Error::Io(e)),
        };

        let raw: SpeclintTomlConfig = toml::from_str(&content)?;
        Ok(Self {
            docs_root: raw.docs_root,
            exclude: raw.exclude,
            include: raw.include,
            terminology: raw.terminology,
        })
    }

    /// The effective docs root: CLI flag first, then config, then `docs/`.
    pub fn docs_root(&self, flag: Option<&Path>) -> PathBuf {
        flag.map(Path::to_path_buf)
            .or_else(|| self.docs_root.clone())
            .unwrap_or_else(|| PathBuf::from("docs"))
    }

    /// Default config that scans `docs/` with no filters.
    fn scan_docs_by_default() -> Self {
        Self {
            docs_root: None,
            exclude: Vec::new(),
            include: Vec::new(),
            terminology: None,
        }
    }

    /// Check whether a markdown file path should be scanned.
    ///
    /// A path is included if no include patterns are set (scan everything),
    /// or if the path starts with at least one include pattern.
    /// An included path is then excluded if it starts with any exclude pattern.
    pub fn should_scan(&self, relative_path: &str) -> bool {
        let included = self.include.is_empty()
            || self.include.iter().any(|p| relative_path.starts_with(p.as_str()));

        if !included {
            return false;
        }

        !self.exclude.iter().any(|p| relative_path.starts_with(p.as_str()))
    }

    /// The effective terminology dictionary: CLI flag first, then config,
    /// then `<docs_root>/terminology.json` when it exists.
    pub fn terminology(&self, flag: Option<&Path>, docs_root: &Path) -> Option<PathBuf> {
        if let Some(path) = flag {
            return Some(path.to_path_buf());
        }
        if let Some(path) = &self.terminology {
            return Some(path.clone());
        }
        let fallback = docs_root.join("terminology.json");
        fallback.exists().then_some(fallback)
    }
}
