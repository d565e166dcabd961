/// Blob storage backing the media resource gateway
use crate::domain::{DomainError, DomainResult, Resource};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Named blob store. Names are `/`-separated paths.
pub trait StorageService {
    fn store(&mut self, name: &str, resource: &Resource) -> DomainResult<()>;

    fn get(&self, name: &str) -> DomainResult<Option<Resource>>;

    /// Names of every stored object starting with `prefix`, sorted
    fn list(&self, prefix: &str) -> DomainResult<Vec<String>>;

    fn delete_all(&mut self, names: &[String]) -> DomainResult<()>;
}

impl<S: StorageService + ?Sized> StorageService for Box<S> {
    fn store(&mut self, name: &str, resource: &Resource) -> DomainResult<()> {
        (**self).store(name, resource)
    }

    fn get(&self, name: &str) -> DomainResult<Option<Resource>> {
        (**self).get(name)
    }

    fn list(&self, prefix: &str) -> DomainResult<Vec<String>> {
        (**self).list(prefix)
    }

    fn delete_all(&mut self, names: &[String]) -> DomainResult<()> {
        (**self).delete_all(names)
    }
}

fn storage_error(error: impl std::fmt::Display) -> DomainError {
    DomainError::Storage(error.to_string())
}

/// Process-local storage (useful for testing and ephemeral runs)
#[derive(Debug, Default, Clone)]
pub struct InMemoryStorage {
    objects: BTreeMap<String, Resource>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageService for InMemoryStorage {
    fn store(&mut self, name: &str, resource: &Resource) -> DomainResult<()> {
        self.objects.insert(name.to_string(), resource.clone());
        Ok(())
    }

    fn get(&self, name: &str) -> DomainResult<Option<Resource>> {
        Ok(self.objects.get(name).cloned())
    }

    fn list(&self, prefix: &str) -> DomainResult<Vec<String>> {
        Ok(self
            .objects
            .keys()
            .filter(|name| name.starts_with(prefix))
            .cloned()
            .collect())
    }

    fn delete_all(&mut self, names: &[String]) -> DomainResult<()> {
        for name in names {
            self.objects.remove(name);
        }
        Ok(())
    }
}

/// Metadata written next to each stored file
#[derive(Debug, Serialize, Deserialize)]
struct ResourceMetadata {
    checksum: String,
    content_type: String,
    name: String,
}

const METADATA_SUFFIX: &str = ".meta.json";

/// Storage on the local filesystem under a root directory.
///
/// Each object is a file at `<root>/<name>` with a JSON sidecar at
/// `<root>/<name>.meta.json` holding checksum, content type and original name.
#[derive(Debug, Clone)]
pub struct LocalFileStorage {
    root: PathBuf,
}

impl LocalFileStorage {
    pub fn new(root: impl Into<PathBuf>) -> DomainResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(storage_error)?;
        Ok(LocalFileStorage { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_of(&self, name: &str) -> DomainResult<PathBuf> {
        let relative = Path::new(name);
        let safe = !name.is_empty()
            && relative
                .components()
                .all(|c| matches!(c, std::path::Component::Normal(_)));
        if !safe {
            return Err(DomainError::Storage(format!(
                "invalid object name: {}",
                name
            )));
        }
        Ok(self.root.join(relative))
    }

    fn metadata_path(path: &Path) -> PathBuf {
        let mut file_name = path.as_os_str().to_owned();
        file_name.push(METADATA_SUFFIX);
        PathBuf::from(file_name)
    }

    /// Object names under `dir`, relative to the root
    fn collect_names(&self, dir: &Path, names: &mut Vec<String>) -> io::Result<()> {
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_dir() {
                self.collect_names(&path, names)?;
                continue;
            }

            let Ok(relative) = path.strip_prefix(&self.root) else {
                continue;
            };
            let name = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            if !name.ends_with(METADATA_SUFFIX) {
                names.push(name);
            }
        }
        Ok(())
    }
}

impl StorageService for LocalFileStorage {
    fn store(&mut self, name: &str, resource: &Resource) -> DomainResult<()> {
        let path = self.path_of(name)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(storage_error)?;
        }

        let metadata = ResourceMetadata {
            checksum: resource.checksum().to_string(),
            content_type: resource.content_type().to_string(),
            name: resource.name().to_string(),
        };
        let metadata = serde_json::to_vec_pretty(&metadata).map_err(storage_error)?;

        fs::write(&path, resource.content()).map_err(storage_error)?;
        fs::write(Self::metadata_path(&path), metadata).map_err(storage_error)?;

        tracing::debug!(name, path = %path.display(), "Stored resource");
        Ok(())
    }

    fn get(&self, name: &str) -> DomainResult<Option<Resource>> {
        let path = self.path_of(name)?;
        if !path.is_file() {
            return Ok(None);
        }

        let content = fs::read(&path).map_err(storage_error)?;
        let metadata = fs::read(Self::metadata_path(&path)).map_err(storage_error)?;
        let metadata: ResourceMetadata =
            serde_json::from_slice(&metadata).map_err(storage_error)?;

        Ok(Some(Resource::with(
            metadata.checksum,
            content,
            metadata.content_type,
            metadata.name,
        )))
    }

    fn list(&self, prefix: &str) -> DomainResult<Vec<String>> {
        let mut names = Vec::new();
        self.collect_names(&self.root, &mut names)
            .map_err(storage_error)?;
        names.retain(|name| name.starts_with(prefix));
        names.sort();
        Ok(names)
    }

    fn delete_all(&mut self, names: &[String]) -> DomainResult<()> {
        for name in names {
            let path = self.path_of(name)?;
            for file in [Self::metadata_path(&path), path] {
                match fs::remove_file(&file) {
                    Ok(()) => {}
                    Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                    Err(e) => return Err(storage_error(e)),
                }
            }
        }
        Ok(())
    }
}
