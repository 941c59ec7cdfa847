//! Resource Store
//!
//! File read/write service for syntax resources.
//!
//! Resource paths look like `Packages/SQL/SQL.sublime-syntax` and are
//! relative to the editor data directory, the parent of `Packages/`.
//! Absolute paths are used as they are.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

/// Extension of syntax-definition files
pub const SYNTAX_EXTENSION: &str = "sublime-syntax";

/// Read/write access to syntax resources
pub trait ResourceStore {
    /// Read a resource as UTF-8 text
    fn load(&self, path: &str) -> io::Result<String>;

    /// Overwrite an existing resource; never creates one
    fn store(&self, path: &str, contents: &str) -> io::Result<()>;

    fn exists(&self, path: &str) -> bool;

    /// Resource paths of every syntax definition, sorted
    fn list_syntaxes(&self) -> io::Result<Vec<String>>;
}

/// Resources unpacked on the local file system
#[derive(Debug, Clone)]
pub struct PackageStore {
    data_dir: PathBuf,
}

impl PackageStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn packages_dir(&self) -> PathBuf {
        self.data_dir.join("Packages")
    }

    /// File system location of a resource path
    pub fn resolve(&self, path: &str) -> PathBuf {
        let path = Path::new(path);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.data_dir.join(path)
        }
    }

    /// Resource path of a file below the data directory
    pub fn resource_path(&self, file: &Path) -> Option<String> {
        let relative = file.strip_prefix(&self.data_dir).ok()?;
        let parts: Vec<&str> = relative
            .components()
            .map(|c| c.as_os_str().to_str())
            .collect::<Option<_>>()?;
        Some(parts.join("/"))
    }
}

impl ResourceStore for PackageStore {
    fn load(&self, path: &str) -> io::Result<String> {
        fs::read_to_string(self.resolve(path))
    }

    /// Replaces the file through a temporary sibling, so a failed write
    /// leaves the old content in place
    fn store(&self, path: &str, contents: &str) -> io::Result<()> {
        let target = self.resolve(path);
        let permissions = fs::metadata(&target)?.permissions();
        if permissions.readonly() {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("{} is read-only", target.display()),
            ));
        }

        let parent = target.parent().unwrap_or_else(|| Path::new("."));
        let mut temp_file = NamedTempFile::new_in(parent)?;
        temp_file.write_all(contents.as_bytes())?;
        temp_file.as_file().set_permissions(permissions)?;
        temp_file.persist(&target).map_err(|e| e.error)?;
        Ok(())
    }

    fn exists(&self, path: &str) -> bool {
        self.resolve(path).is_file()
    }

    fn list_syntaxes(&self) -> io::Result<Vec<String>> {
        let mut files = Vec::new();
        collect_syntax_files(&self.packages_dir(), &mut files)?;

        let mut paths: Vec<String> = files
            .iter()
            .filter_map(|file| self.resource_path(file))
            .collect();
        paths.sort();
        Ok(paths)
    }
}

fn collect_syntax_files(dir: &Path, files: &mut Vec<PathBuf>) -> io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            if let Err(e) = collect_syntax_files(&path, files) {
                log::warn!("Skipping unreadable directory {:?}: {}", path, e);
            }
        } else if path.extension().is_some_and(|ext| ext == SYNTAX_EXTENSION) {
            files.push(path);
        }
    }
    Ok(())
}
