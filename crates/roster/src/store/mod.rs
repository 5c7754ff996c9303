//! Storage layer for roster.
//!
//! The whole roster lives in one pretty-printed JSON array. It is read once at
//! startup and rewritten in full after every successful mutation.

mod roster;

use std::ffi::OsString;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

pub use roster::{DuplicateId, Roster};

use crate::config::StoreConfig;
use crate::error::{Error, Result};
use crate::student::Student;

/// Suffix appended to the backing file name for the temporary write target.
const TEMP_SUFFIX: &str = ".tmp";

/// Suffix appended to the backing file name when a corrupt file is set aside.
const CORRUPT_SUFFIX: &str = ".corrupt";

/// Flat-file store for the student roster.
#[derive(Debug, Clone)]
pub struct Store {
    /// Path to the backing file.
    path: PathBuf,
    /// Copy an unparseable file aside before it is treated as empty.
    backup_corrupt: bool,
}

impl Store {
    /// Create a store for the given backing file.
    ///
    /// Nothing touches the filesystem until [`Store::ensure_ready`],
    /// [`Store::load`] or [`Store::save`] is called.
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            backup_corrupt: true,
        }
    }

    /// Create a store from configuration.
    #[must_use]
    pub fn from_config(config: &StoreConfig) -> Self {
        Self::new(&config.data_file).with_corrupt_backup(config.backup_corrupt)
    }

    /// Enable or disable the `.corrupt` copy made when loading an unparseable
    /// file.
    #[must_use]
    pub fn with_corrupt_backup(mut self, enabled: bool) -> Self {
        self.backup_corrupt = enabled;
        self
    }

    /// Get the path to the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path the first corrupt file is copied to. Later, different corrupt
    /// contents go to `.corrupt.1`, `.corrupt.2` and so on.
    #[must_use]
    pub fn corrupt_backup_path(&self) -> PathBuf {
        with_suffix(&self.path, CORRUPT_SUFFIX)
    }

    /// Make sure the backing file exists.
    ///
    /// Creates the parent directory if needed and writes an empty roster if
    /// the file is absent. Does nothing if the file already exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be created.
    pub fn ensure_ready(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        if !self.path.exists() {
            self.save(&Roster::new())?;
            info!("Created empty student file at {}", self.path.display());
        }
        Ok(())
    }

    /// Load the full roster.
    ///
    /// Malformed content never fails the load. If the file is not a JSON
    /// array at all, a warning is logged and an empty roster is returned.
    /// Inside an array, each record that cannot be read as a student is
    /// skipped with a warning and the rest are kept. In both cases the file
    /// is optionally copied aside first. Records that do parse are not
    /// re-validated.
    ///
    /// # Errors
    ///
    /// Returns an error only for filesystem failures (the file cannot be
    /// created or read).
    pub fn load(&self) -> Result<Roster> {
        self.ensure_ready()?;

        let contents = fs::read(&self.path).map_err(|source| Error::StoreRead {
            path: self.path.clone(),
            source,
        })?;

        let records = match serde_json::from_slice::<Vec<serde_json::Value>>(&contents) {
            Ok(records) => records,
            Err(err) => {
                warn!(
                    "Student file {} is not a valid roster ({}); starting with no students",
                    self.path.display(),
                    err
                );
                if self.backup_corrupt {
                    self.backup_corrupt_file(&contents);
                }
                return Ok(Roster::new());
            }
        };

        let total = records.len();
        let mut students = Vec::with_capacity(total);
        for (index, record) in records.into_iter().enumerate() {
            match serde_json::from_value::<Student>(record) {
                Ok(student) => students.push(student),
                Err(err) => warn!(
                    "Skipping record {} in {}: {}",
                    index,
                    self.path.display(),
                    err
                ),
            }
        }

        if students.len() < total && self.backup_corrupt {
            self.backup_corrupt_file(&contents);
        }

        debug!(
            "Loaded {} of {} students from {}",
            students.len(),
            total,
            self.path.display()
        );
        Ok(Roster::from(students))
    }

    /// Overwrite the backing file with the full roster.
    ///
    /// The JSON is written to a sibling temporary file which is then renamed
    /// over the backing file.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or any filesystem step fails.
    pub fn save(&self, roster: &Roster) -> Result<()> {
        let json = serde_json::to_string_pretty(roster)?;
        let temp_path = with_suffix(&self.path, TEMP_SUFFIX);

        fs::write(&temp_path, json).map_err(|source| Error::StoreWrite {
            path: temp_path.clone(),
            source,
        })?;
        fs::rename(&temp_path, &self.path).map_err(|source| Error::StoreWrite {
            path: self.path.clone(),
            source,
        })?;

        debug!("Saved {} students to {}", roster.len(), self.path.display());
        Ok(())
    }

    /// Copy unreadable `contents` to the first free `.corrupt` path.
    ///
    /// Existing backups are never overwritten. If one already holds the same
    /// bytes, nothing is written.
    fn backup_corrupt_file(&self, contents: &[u8]) {
        let base = self.corrupt_backup_path();
        let mut backup = base.clone();
        let mut attempt = 0_u32;
        loop {
            match fs::read(&backup) {
                Ok(existing) if existing == contents => {
                    debug!(
                        "Unreadable student file already saved at {}",
                        backup.display()
                    );
                    return;
                }
                Ok(_) => {
                    attempt += 1;
                    backup = with_suffix(&base, &format!(".{attempt}"));
                }
                Err(err) if err.kind() == ErrorKind::NotFound => break,
                Err(err) => {
                    warn!("Could not check backup {}: {}", backup.display(), err);
                    return;
                }
            }
        }

        let written = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&backup)
            .and_then(|mut file| file.write_all(contents));
        match written {
            Ok(()) => warn!("Unreadable student file copied to {}", backup.display()),
            Err(err) => warn!(
                "Could not copy unreadable student file to {}: {}",
                backup.display(),
                err
            ),
        }
    }
}

/// `students.json` + `.tmp` -> `students.json.tmp`.
fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}
