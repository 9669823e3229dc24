use std::path::PathBuf;

use tracing::info;

use crate::app::AppContext;
use crate::app::commands::write_output;
use crate::domain::AppError;
use crate::domain::configuration::parse_model;
use crate::ports::{ModelStore, TemplateStore};

pub const DEFAULT_TEMPLATE: &str = "single-source";
pub const DEFAULT_OUTPUT: &str = "glee-model.toml";

#[derive(Debug, Clone)]
pub struct InitOptions {
    pub template: String,
    pub output: PathBuf,
    pub force: bool,
}

impl Default for InitOptions {
    fn default() -> Self {
        Self { template: DEFAULT_TEMPLATE.to_string(), output: DEFAULT_OUTPUT.into(), force: false }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitOutcome {
    pub template: String,
    pub path: PathBuf,
}

/// Execute the init command.
///
/// Writes an embedded starter model to the output path.
pub fn execute<S, T>(ctx: &AppContext<S, T>, options: &InitOptions) -> Result<InitOutcome, AppError>
where
    S: ModelStore,
    T: TemplateStore,
{
    let template = ctx.templates().template(&options.template)?;
    // A broken embedded template is a build defect, not a user error.
    parse_model(&template.content).map_err(|err| AppError::Internal {
        message: format!("starter template '{}' is invalid: {err}", template.name),
    })?;

    write_output(ctx.store(), &options.output, &template.content, options.force)?;
    info!(template = %template.name, path = %options.output.display(), "template written");
    Ok(InitOutcome { template: template.name, path: options.output.clone() })
}
