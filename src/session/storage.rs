use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use log::{debug, warn};

use crate::{
    Error,
    error::Result,
};

/// String key/value entries that survive between runs of the client,
/// the terminal counterpart of the browser's local storage.
pub trait Storage: Send {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
    fn clear(&mut self) -> Result<()>;
}

#[derive(Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.entries.clear();
        Ok(())
    }
}

/// Keeps all entries in a single JSON object on disk and rewrites the
/// whole file on every change.
pub struct FileStorage {
    path: PathBuf,
    entries: HashMap<String, String>,
}

impl FileStorage {
    pub const FILE_NAME: &'static str = "session.json";

    /// Opens (or prepares) `<dir>/session.json`. A corrupt file is
    /// treated as empty so a broken session never blocks login.
    pub fn open(dir: &str) -> Result<Self> {
        let dir = Path::new(dir);
        if !dir.exists() {
            fs::create_dir_all(dir).map_err(|e|
                Error::Io(format!("Creating directory path {} error: {e}", dir.display()))
            )?;
        }

        let path = dir.join(Self::FILE_NAME);
        let entries = match fs::read_to_string(&path) {
            Ok(data) => serde_json::from_str::<HashMap<String, String>>(&data)
                .unwrap_or_else(|e| {
                    warn!("Session file {} is corrupt, ignored: {e}", path.display());
                    HashMap::new()
                }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(Error::Io(
                format!("Reading session file {} error: {e}", path.display())
            )),
        };

        debug!("Session storage opened at {} with {} entries", path.display(), entries.len());
        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> Result<()> {
        let data = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.path, data).map_err(|e|
            Error::Io(format!("Writing session file {} error: {e}", self.path.display()))
        )
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        self.persist()
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        if self.entries.remove(key).is_some() {
            self.persist()?;
        }
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.entries.clear();
        self.persist()
    }
}
