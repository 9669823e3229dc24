pub mod check;
pub mod init;
pub mod render;
pub mod templates;

use std::path::Path;

use crate::domain::AppError;
use crate::ports::ModelStore;

/// Write `content` to `path`, refusing to replace an existing file unless `force` is set.
pub(crate) fn write_output(
    store: &impl ModelStore,
    path: &Path,
    content: &str,
    force: bool,
) -> Result<(), AppError> {
    if store.file_exists(path) && !force {
        return Err(AppError::OutputExists(path.display().to_string()));
    }
    store.write_file(path, content)
}
