use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::app::AppContext;
use crate::app::commands::write_output;
use crate::domain::configuration::load_model;
use crate::domain::{AppError, Render};
use crate::ports::{ModelStore, TemplateStore};

#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub model: PathBuf,
    pub output: Option<PathBuf>,
    pub force: bool,
}

/// Result of rendering a model file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutcome {
    /// Document returned to the caller.
    Printed(String),
    /// Document written to the given path.
    Written { path: PathBuf, sources: usize, light_profiles: usize },
}

/// Execute the render command.
pub fn execute<S, T>(
    ctx: &AppContext<S, T>,
    options: &RenderOptions,
) -> Result<RenderOutcome, AppError>
where
    S: ModelStore,
    T: TemplateStore,
{
    let config = load_model(ctx.store(), &options.model)?;
    debug!(
        model = %options.model.display(),
        sources = config.sources().len(),
        "model loaded"
    );
    let document = config.render();

    let Some(output) = &options.output else {
        return Ok(RenderOutcome::Printed(document));
    };
    write_document(ctx.store(), output, &document, options.force)?;
    Ok(RenderOutcome::Written {
        path: output.clone(),
        sources: config.sources().len(),
        light_profiles: config.light_profile_count(),
    })
}

pub(crate) fn write_document(
    store: &impl ModelStore,
    path: &Path,
    document: &str,
    force: bool,
) -> Result<(), AppError> {
    write_output(store, path, document, force)?;
    info!(path = %path.display(), bytes = document.len(), "document written");
    Ok(())
}
