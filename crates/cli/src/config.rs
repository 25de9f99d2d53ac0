//! Optional `tally.toml` configuration.
//!
//! # Example
//!
//! ```toml
//! # Where challenge data is kept. Relative paths are resolved against the
//! # directory containing this file.
//! data_dir = "/home/robin/.local/share/tally"
//!
//! # Storage key, for keeping several challenges side by side.
//! key = "plunge-2025"
//! ```
//!
//! The data directory is chosen by the first of: `--data-dir`,
//! `TALLY_DATA_DIR`, `data_dir` in the config file, `.tally`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG_FILE: &str = "tally.toml";
pub const DEFAULT_DATA_DIR: &str = ".tally";
pub const DATA_DIR_ENV: &str = "TALLY_DATA_DIR";

// ── Types ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TallyConfig {
    pub data_dir: Option<PathBuf>,
    pub key: Option<String>,
}

// ── Functions ─────────────────────────────────────────────────────────────────

/// Read and parse a config file from `path`.
///
/// A relative `data_dir` is made relative to the file's directory. Returns a
/// human-readable error string on failure.
pub fn read_tally_config(path: &Path) -> Result<TallyConfig, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("could not read '{}': {}", path.display(), e))?;

    let mut config: TallyConfig = toml::from_str(&content)
        .map_err(|e| format!("could not parse '{}': {}", path.display(), e))?;

    if let Some(dir) = &config.data_dir {
        if dir.is_relative() {
            let base = path.parent().unwrap_or_else(|| Path::new(""));
            config.data_dir = Some(base.join(dir));
        }
    }
    Ok(config)
}

/// Load the config named on the command line, or `./tally.toml` when it
/// exists. An explicitly named file must exist.
pub fn load_config(explicit: Option<&Path>) -> Result<TallyConfig, String> {
    match explicit {
        Some(path) => read_tally_config(path),
        None => {
            let default = Path::new(DEFAULT_CONFIG_FILE);
            if default.is_file() {
                read_tally_config(default)
            } else {
                Ok(TallyConfig::default())
            }
        }
    }
}

pub fn resolve_data_dir(
    flag: Option<PathBuf>,
    env: Option<PathBuf>,
    config: &TallyConfig,
) -> PathBuf {
    flag.or(env)
        .or_else(|| config.data_dir.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_dir(dir: &str) -> TallyConfig {
        TallyConfig {
            data_dir: Some(PathBuf::from(dir)),
            key: None,
        }
    }

    #[test]
    fn flag_beats_env_beats_config() {
        let config = config_with_dir("/from/config");
        assert_eq!(
            resolve_data_dir(
                Some("/from/flag".into()),
                Some("/from/env".into()),
                &config
            ),
            PathBuf::from("/from/flag")
        );
        assert_eq!(
            resolve_data_dir(None, Some("/from/env".into()), &config),
            PathBuf::from("/from/env")
        );
        assert_eq!(
            resolve_data_dir(None, None, &config),
            PathBuf::from("/from/config")
        );
        assert_eq!(
            resolve_data_dir(None, None, &TallyConfig::default()),
            PathBuf::from(DEFAULT_DATA_DIR)
        );
    }

    #[test]
    fn relative_data_dir_is_anchored_at_the_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tally.toml");
        std::fs::write(&path, "data_dir = \"state\"\nkey = \"winter\"\n").unwrap();

        let config = read_tally_config(&path).unwrap();
        assert_eq!(config.data_dir, Some(dir.path().join("state")));
        assert_eq!(config.key.as_deref(), Some("winter"));
    }

    #[test]
    fn absolute_data_dir_is_kept() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tally.toml");
        std::fs::write(&path, "data_dir = \"/var/lib/tally\"\n").unwrap();
        assert_eq!(
            read_tally_config(&path).unwrap().data_dir,
            Some(PathBuf::from("/var/lib/tally"))
        );
    }

    #[test]
    fn empty_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tally.toml");
        std::fs::write(&path, "").unwrap();
        assert_eq!(read_tally_config(&path).unwrap(), TallyConfig::default());
    }

    #[test]
    fn errors_name_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        let err = load_config(Some(&missing)).unwrap_err();
        assert!(err.contains("could not read"), "{err}");
        assert!(err.contains("nope.toml"), "{err}");

        let bad = dir.path().join("bad.toml");
        std::fs::write(&bad, "data_dir = [").unwrap();
        let err = read_tally_config(&bad).unwrap_err();
        assert!(err.contains("could not parse"), "{err}");
    }
}
