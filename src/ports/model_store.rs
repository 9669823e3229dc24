use std::path::Path;

use crate::domain::AppError;

/// Port for reading model files and writing rendered GLEE documents.
pub trait ModelStore {
    /// Read a UTF-8 file.
    fn read_file(&self, path: &Path) -> Result<String, AppError>;

    /// Write `content`, creating parent directories as needed.
    fn write_file(&self, path: &Path, content: &str) -> Result<(), AppError>;

    /// Whether a file exists at `path`.
    fn file_exists(&self, path: &Path) -> bool;
}
