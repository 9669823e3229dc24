//! API Facade for the application.
//!
//! Glues context creation to command execution against the current directory.

use std::path::PathBuf;

use crate::adapters::{EmbeddedTemplateStore, FilesystemStore};
use crate::app::{
    AppContext,
    commands::{check, init, render, templates},
};
use crate::domain::AppError;
use crate::ports::StarterTemplate;

pub use crate::app::commands::check::{CheckReport, SourceSummary};
pub use crate::app::commands::init::{InitOptions, InitOutcome};
pub use crate::app::commands::render::{RenderOptions, RenderOutcome};

/// Create an `AppContext` rooted at the current directory.
fn create_context() -> Result<AppContext<FilesystemStore, EmbeddedTemplateStore>, AppError> {
    Ok(AppContext::new(FilesystemStore::current()?, EmbeddedTemplateStore::new()))
}

/// Validate a model file and render it to a GLEE document.
pub fn render(options: &RenderOptions) -> Result<RenderOutcome, AppError> {
    render::execute(&create_context()?, options)
}

/// Validate a model file without rendering it.
pub fn check(model: PathBuf) -> Result<CheckReport, AppError> {
    check::execute(&create_context()?, model)
}

/// Write a starter model file.
pub fn init(options: &InitOptions) -> Result<InitOutcome, AppError> {
    init::execute(&create_context()?, options)
}

/// Embedded starter templates.
pub fn templates() -> Result<Vec<StarterTemplate>, AppError> {
    Ok(templates::execute(&create_context()?))
}
