use crate::store::{FileStore, KeyValueStore, MemoryStore};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Program configuration read from a configuration file
#[derive(Clone, Deserialize, Debug, Default, Eq, PartialEq)]
pub(crate) struct Config {
    /// Settings about data & log files
    #[serde(default)]
    pub(crate) files: FileConfig,
}

impl Config {
    /// Return the default configuration file path
    pub(crate) fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::config_local_dir()
            .map(|p| p.join("gridsnake").join("config.toml"))
            .ok_or(ConfigError::NoPath)
    }

    /// Read configuration from a file on disk.  If the file does not exist and
    /// `allow_missing` is true, a default `Config` value is returned.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the file could not be read or if the file's contents
    /// could not be deserialized.
    pub(crate) fn load(path: &Path, allow_missing: bool) -> Result<Config, ConfigError> {
        let content = match fs_err::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && allow_missing => {
                return Ok(Config::default())
            }
            Err(e) => return Err(ConfigError::Read(e)),
        };
        toml::from_str(&content).map_err(Into::into)
    }

    /// Return the store the leaderboard should be kept in.
    ///
    /// If `self.files.save_leaderboard` is `false`, the leaderboard only
    /// lasts as long as the program.
    pub(crate) fn open_store(&self) -> Result<Box<dyn KeyValueStore>, ConfigError> {
        if !self.files.save_leaderboard {
            return Ok(Box::new(MemoryStore::new()));
        }
        let dir = self
            .files
            .leaderboard_dir
            .clone()
            .or_else(FileStore::default_dir)
            .ok_or(ConfigError::NoDataPath)?;
        let store = FileStore::new(dir);
        log::debug!("Leaderboard directory: {}", store.dir().display());
        Ok(Box::new(store))
    }
}

#[derive(Clone, Deserialize, Debug, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct FileConfig {
    /// Directory in which the leaderboard file is stored
    pub(crate) leaderboard_dir: Option<PathBuf>,

    /// Whether to load & save the leaderboard on disk
    pub(crate) save_leaderboard: bool,

    /// File to which log messages are appended
    pub(crate) log_file: Option<PathBuf>,
}

impl Default for FileConfig {
    fn default() -> FileConfig {
        FileConfig {
            leaderboard_dir: None,
            save_leaderboard: true,
            log_file: None,
        }
    }
}

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to determine path to local configuration directory")]
    NoPath,
    #[error("failed to determine path to local data directory")]
    NoDataPath,
    #[error("failed to read configuration file")]
    Read(#[from] std::io::Error),
    #[error("failed to parse configuration file")]
    Parse(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parse_empty() {
        let cfg = toml::from_str::<Config>("").unwrap();
        assert_eq!(cfg, Config::default());
        assert!(cfg.files.save_leaderboard);
    }

    #[test]
    fn parse_files() {
        let cfg = toml::from_str::<Config>(concat!(
            "[files]\n",
            "leaderboard-dir = \"/var/games/gridsnake\"\n",
            "save-leaderboard = false\n",
            "log-file = \"/tmp/gridsnake.log\"\n",
        ))
        .unwrap();
        assert_eq!(
            cfg,
            Config {
                files: FileConfig {
                    leaderboard_dir: Some(PathBuf::from("/var/games/gridsnake")),
                    save_leaderboard: false,
                    log_file: Some(PathBuf::from("/tmp/gridsnake.log")),
                }
            }
        );
    }

    #[test]
    fn parse_partial_files() {
        let cfg = toml::from_str::<Config>("[files]\nlog-file = \"snake.log\"\n").unwrap();
        assert_eq!(cfg.files.leaderboard_dir, None);
        assert!(cfg.files.save_leaderboard);
        assert_eq!(cfg.files.log_file, Some(PathBuf::from("snake.log")));
    }

    #[test]
    fn parse_bad_type() {
        let r = toml::from_str::<Config>("[files]\nsave-leaderboard = \"yes\"\n");
        assert!(r.is_err());
    }

    #[test]
    fn load_missing() {
        let tmpdir = tempfile::tempdir().unwrap();
        let path = tmpdir.path().join("config.toml");
        assert_eq!(Config::load(&path, true).unwrap(), Config::default());
        assert!(matches!(
            Config::load(&path, false),
            Err(ConfigError::Read(_))
        ));
    }

    #[test]
    fn load_invalid() {
        let tmpdir = tempfile::tempdir().unwrap();
        let path = tmpdir.path().join("config.toml");
        fs_err::write(&path, "[files\n").unwrap();
        assert!(matches!(
            Config::load(&path, true),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn open_configured_store() {
        let tmpdir = tempfile::tempdir().unwrap();
        let cfg = Config {
            files: FileConfig {
                leaderboard_dir: Some(tmpdir.path().join("data")),
                ..FileConfig::default()
            },
        };
        let mut store = cfg.open_store().unwrap();
        store.set("scores", "[]\n").unwrap();
        assert_eq!(
            fs_err::read_to_string(tmpdir.path().join("data").join("scores.json")).unwrap(),
            "[]\n"
        );
    }

    #[test]
    fn open_unsaved_store() {
        let tmpdir = tempfile::tempdir().unwrap();
        let cfg = Config {
            files: FileConfig {
                leaderboard_dir: Some(tmpdir.path().join("data")),
                save_leaderboard: false,
                log_file: None,
            },
        };
        let mut store = cfg.open_store().unwrap();
        store.set("scores", "[]\n").unwrap();
        assert_eq!(store.get("scores").unwrap().as_deref(), Some("[]\n"));
        assert!(!tmpdir.path().join("data").exists());
    }
}
