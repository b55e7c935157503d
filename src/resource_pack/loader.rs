//! Asset sources: directories, ZIP archives, in-memory maps and HTTP.

use super::{AssetSource, FetchFuture};
use crate::error::{Result, ViewerError};
use std::collections::HashMap;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Assets held in memory, keyed by relative path.
#[derive(Debug, Default, Clone)]
pub struct MemorySource {
    files: HashMap<String, Vec<u8>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file.
    pub fn insert(&mut self, path: impl Into<String>, data: impl Into<Vec<u8>>) {
        self.files.insert(path.into(), data.into());
    }

    /// Add a JSON document.
    pub fn insert_json(&mut self, path: impl Into<String>, value: &serde_json::Value) {
        self.insert(path, value.to_string().into_bytes());
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, path: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        self.insert(path, data);
        self
    }

    /// Number of files held.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    fn get(&self, path: &str) -> Result<Vec<u8>> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| ViewerError::ResourceNotFound(path.to_string()))
    }
}

impl AssetSource for MemorySource {
    fn fetch<'a>(&'a self, path: &'a str) -> FetchFuture<'a> {
        Box::pin(async move { self.get(path) })
    }
}

/// Assets read lazily from a directory on disk.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl AssetSource for DirectorySource {
    fn fetch<'a>(&'a self, path: &'a str) -> FetchFuture<'a> {
        Box::pin(async move {
            let full = self.root.join(path);
            match tokio::fs::read(&full).await {
                Ok(data) => Ok(data),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    Err(ViewerError::ResourceNotFound(path.to_string()))
                }
                Err(e) => Err(e.into()),
            }
        })
    }
}

/// Assets unpacked from a ZIP archive into memory.
#[derive(Debug, Clone)]
pub struct ArchiveSource {
    files: MemorySource,
}

impl ArchiveSource {
    /// Read a ZIP archive from disk.
    pub fn open<P: AsRef<Path>>(path: P, root: &str) -> Result<Self> {
        let data = std::fs::read(path)?;
        Self::from_bytes(&data, root)
    }

    /// Read a ZIP archive from bytes. Only entries below `root` are kept,
    /// with `root` stripped from their paths (pass "" to keep everything).
    pub fn from_bytes(data: &[u8], root: &str) -> Result<Self> {
        let cursor = std::io::Cursor::new(data);
        let mut archive = zip::ZipArchive::new(cursor)?;
        let mut files = MemorySource::new();

        for i in 0..archive.len() {
            let mut file = archive.by_index(i)?;
            if file.is_dir() {
                continue;
            }

            let Some(relative) = file.name().strip_prefix(root).map(str::to_string) else {
                continue;
            };

            let mut contents = Vec::new();
            file.read_to_end(&mut contents)?;
            files.insert(relative, contents);
        }

        log::debug!("Loaded {} entries from archive", files.len());
        Ok(Self { files })
    }

    /// Number of files unpacked.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl AssetSource for ArchiveSource {
    fn fetch<'a>(&'a self, path: &'a str) -> FetchFuture<'a> {
        self.files.fetch(path)
    }
}

/// Assets fetched over HTTP relative to a base URL.
#[cfg(feature = "http")]
#[derive(Debug, Clone)]
pub struct HttpSource {
    base_url: String,
    client: reqwest::Client,
}

#[cfg(feature = "http")]
impl HttpSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }
}

#[cfg(feature = "http")]
impl AssetSource for HttpSource {
    fn fetch<'a>(&'a self, path: &'a str) -> FetchFuture<'a> {
        Box::pin(async move {
            let url = format!("{}{}", self.base_url, path);
            let response = self.client.get(&url).send().await?;
            if response.status() == reqwest::StatusCode::NOT_FOUND {
                return Err(ViewerError::ResourceNotFound(url));
            }
            let bytes = response.error_for_status()?.bytes().await?;
            Ok(bytes.to_vec())
        })
    }
}
