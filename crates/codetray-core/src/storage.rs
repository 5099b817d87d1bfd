use crate::config::{get_config_dir, Config, CONFIG_FILENAME, SNIPPETS_FILENAME};
use crate::error::{LoadError, StorageError};
use crate::models::Snippet;
use serde_json::{Map, Value};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

/// On-disk home of the custom snippets and the tray config.
#[derive(Debug, Clone)]
pub struct Storage {
    dir: PathBuf,
}

impl Storage {
    pub fn open(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Storage rooted at `~/.codetray`.
    pub fn default_location() -> Self {
        Self::open(get_config_dir())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn snippets_path(&self) -> PathBuf {
        self.dir.join(SNIPPETS_FILENAME)
    }

    pub fn config_path(&self) -> PathBuf {
        self.dir.join(CONFIG_FILENAME)
    }

    /// Parse the custom snippets file.
    pub fn read_custom_snippets(&self) -> Result<Vec<Snippet>, LoadError> {
        let content = read_existing(&self.snippets_path())?;

        // Handle empty database file
        if content.trim().is_empty() {
            return Ok(vec![]);
        }

        Ok(serde_json::from_str(&content)?)
    }

    /// Load custom snippets, treating a missing or corrupt file as empty.
    pub fn load_custom_snippets(&self) -> Vec<Snippet> {
        match self.read_custom_snippets() {
            Ok(snippets) => {
                debug!(count = snippets.len(), "Loaded custom snippets");
                snippets
            }
            Err(err) => {
                log_load_failure(&self.snippets_path(), &err);
                vec![]
            }
        }
    }

    /// Replace the snippets file with the full list.
    pub fn save_custom_snippets(&self, snippets: &[Snippet]) -> Result<(), StorageError> {
        let serialized = serde_json::to_string_pretty(snippets)?;
        self.write_atomically(&self.snippets_path(), &serialized)?;
        debug!(count = snippets.len(), "Saved custom snippets");
        Ok(())
    }

    fn read_config_record(&self) -> Result<Map<String, Value>, LoadError> {
        let content = read_existing(&self.config_path())?;
        if content.trim().is_empty() {
            return Ok(Map::new());
        }
        Ok(serde_json::from_str(&content)?)
    }

    /// Parse the config file.
    pub fn read_config(&self) -> Result<Config, LoadError> {
        self.read_config_record().map(Config::from_record)
    }

    /// Load the config, treating a missing or corrupt file as the default.
    pub fn load_config(&self) -> Config {
        match self.read_config() {
            Ok(config) => config,
            Err(err) => {
                log_load_failure(&self.config_path(), &err);
                Config::default()
            }
        }
    }

    /// Write `side` into the config file, keeping every other key already
    /// on disk.
    pub fn save_config(&self, config: &Config) -> Result<(), StorageError> {
        let record = match self.read_config_record() {
            Ok(on_disk) => Config {
                side: config.side,
                extra: on_disk,
            }
            .to_record(),
            Err(_) => config.to_record(),
        };

        let serialized = serde_json::to_string_pretty(&Value::Object(record))?;
        self.write_atomically(&self.config_path(), &serialized)?;
        debug!(side = %config.side, "Saved config");
        Ok(())
    }

    /// Write the default config when none exists yet.
    pub fn ensure_config(&self, config: &Config) -> Result<(), StorageError> {
        if self.config_path().exists() {
            return Ok(());
        }
        info!(path = %self.config_path().display(), "Creating config file");
        self.save_config(config)
    }

    /// Write via a sibling temp file and rename, so a crash leaves either the
    /// old or the new content.
    fn write_atomically(&self, path: &Path, contents: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir)?;
        let mut file = NamedTempFile::new_in(&self.dir)?;
        file.write_all(contents.as_bytes())?;
        file.as_file().sync_all()?;
        file.persist(path)?;
        Ok(())
    }
}

fn read_existing(path: &Path) -> Result<String, LoadError> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(content),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            Err(LoadError::NotFound(path.display().to_string()))
        }
        Err(err) => Err(err.into()),
    }
}

fn log_load_failure(path: &Path, err: &LoadError) {
    match err {
        LoadError::NotFound(_) => debug!(path = %path.display(), "Nothing stored yet"),
        _ => warn!(path = %path.display(), error = %err, "Ignoring unreadable file"),
    }
}
