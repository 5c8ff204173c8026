use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Names the slot a type is stored under.
pub(crate) trait StorageKey {
    const KEY: &'static str;
}

#[derive(Error, Debug)]
pub(crate) enum StoreError {
    #[error("could not access {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed data in {path}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// JSON files in a single directory, one per [`StorageKey`].
#[derive(Clone, Debug)]
pub(crate) struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub(crate) fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub(crate) fn default_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("mislabeled")
    }

    pub(crate) fn dir(&self) -> &Path {
        &self.dir
    }

    pub(crate) fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key.replace(':', "-")))
    }

    /// Reads the stored value, `Ok(None)` when nothing was saved yet.
    pub(crate) fn get<T: StorageKey + DeserializeOwned>(&self) -> Result<Option<T>, StoreError> {
        let path = self.path_for(T::KEY);
        let data = match fs::read_to_string(&path) {
            Ok(data) => data,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(StoreError::Io { path, source }),
        };
        serde_json::from_str(&data)
            .map(Some)
            .map_err(|source| StoreError::Json { path, source })
    }

    /// Writes through a temporary file so a crash never leaves half a record behind.
    pub(crate) fn set<T: StorageKey + Serialize>(&self, value: &T) -> Result<(), StoreError> {
        let path = self.path_for(T::KEY);
        let io_err = |path: &Path| {
            let path = path.to_path_buf();
            move |source| StoreError::Io { path, source }
        };

        fs::create_dir_all(&self.dir).map_err(io_err(&self.dir))?;
        let data = serde_json::to_string_pretty(value).map_err(|source| StoreError::Json {
            path: path.clone(),
            source,
        })?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, data).map_err(io_err(&tmp))?;
        fs::rename(&tmp, &path).map_err(io_err(&path))?;

        log::trace!("saved {} to {}", T::KEY, path.display());
        Ok(())
    }

    pub(crate) fn remove<T: StorageKey>(&self) -> Result<(), StoreError> {
        let path = self.path_for(T::KEY);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }

    /// Loads a value, falling back when it is missing or cannot be read.
    pub(crate) fn load_or_else<T, F>(&self, fallback: F) -> T
    where
        T: StorageKey + DeserializeOwned,
        F: FnOnce() -> T,
    {
        match self.get::<T>() {
            Ok(Some(value)) => value,
            Ok(None) => {
                log::debug!("nothing stored under {}, starting fresh", T::KEY);
                fallback()
            }
            Err(err) => {
                log::warn!("discarding stored {}: {:#}", T::KEY, anyhow::Error::new(err));
                fallback()
            }
        }
    }

    pub(crate) fn load_or_default<T>(&self) -> T
    where
        T: StorageKey + DeserializeOwned + Default,
    {
        self.load_or_else(T::default)
    }
}
