//! A flat file-backed implementation of the [`ZoneStore`][super::ZoneStore] trait.
//!
//! The file is read in full on every [`load`][super::ZoneStore::load] so updates made by the
//! external writer are visible to the very next query.
use crate::error::Error;
use crate::zone::{ZoneMap, ZoneStore};
use std::path::{Path, PathBuf};
use tokio::fs;

/// A file-backed zone store. Holds only the path; there is no cached state between loads.
#[derive(Debug, Clone)]
#[allow(clippy::module_name_repetitions)]
pub struct FileZoneStore {
    path: PathBuf,
}

impl FileZoneStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait::async_trait]
impl ZoneStore for FileZoneStore {
    /// Read and parse the zone file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FileUnavailable`] if the file can't be opened or read, including when
    /// its content isn't valid UTF-8.
    async fn load(&self) -> Result<ZoneMap, Error> {
        let contents = fs::read_to_string(&self.path)
            .await
            .map_err(|source| Error::FileUnavailable {
                path: self.path.clone(),
                source,
            })?;
        let zone = ZoneMap::parse(&contents);
        tracing::trace!(path = ?self.path, names = zone.len(), "loaded zone: {zone:?}");
        Ok(zone)
    }
}
