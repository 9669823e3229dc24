use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::domain::AppError;
use crate::ports::ModelStore;

/// In-memory model store for testing.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    // Arc<Mutex> so clones share the same files
    files: Arc<Mutex<HashMap<PathBuf, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file.
    pub fn with_file(self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        self.files.lock().unwrap().insert(path.into(), content.into());
        self
    }

    /// Current content of a file, if present.
    pub fn content(&self, path: impl AsRef<Path>) -> Option<String> {
        self.files.lock().unwrap().get(path.as_ref()).cloned()
    }
}

impl ModelStore for MemoryStore {
    fn read_file(&self, path: &Path) -> Result<String, AppError> {
        let files = self.files.lock().unwrap();
        files.get(path).cloned().ok_or_else(|| {
            AppError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("File not found: {}", path.display()),
            ))
        })
    }

    fn write_file(&self, path: &Path, content: &str) -> Result<(), AppError> {
        let mut files = self.files.lock().unwrap();
        files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn file_exists(&self, path: &Path) -> bool {
        self.files.lock().unwrap().contains_key(path)
    }
}
