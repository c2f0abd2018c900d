use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::CoreError;
use crate::seed::HexSeed;

/// File-backed persistence for the single decrypted seed.
///
/// There is exactly one stored value per deployment; every write replaces
/// the previous seed wholesale. A write followed by a read in the same
/// process always observes the written value.
#[derive(Debug, Clone)]
pub struct SeedStore {
    path: PathBuf,
}

impl SeedStore {
    /// Creates a store backed by the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the stored seed.
    ///
    /// A missing file means "not yet initialized" and yields `Ok(None)`,
    /// distinct from an I/O failure.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Storage`] on I/O failure, or
    /// [`CoreError::InvalidSeedFormat`] if the file content does not parse
    /// as a seed.
    pub fn read(&self) -> Result<Option<HexSeed>, CoreError> {
        match fs::read_to_string(&self.path) {
            Ok(content) => HexSeed::parse(content.trim()).map(Some),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(CoreError::Storage(format!(
                "cannot read {}: {e}",
                self.path.display()
            ))),
        }
    }

    /// Writes the seed, overwriting any previous value. Creates the parent
    /// directory on first write.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Storage`] on I/O failure.
    pub fn write(&self, seed: &HexSeed) -> Result<(), CoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    CoreError::Storage(format!("cannot create {}: {e}", parent.display()))
                })?;
            }
        }
        fs::write(&self.path, seed.as_str())
            .map_err(|e| CoreError::Storage(format!("cannot write {}: {e}", self.path.display())))
    }
}
