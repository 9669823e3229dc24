use crate::domain::AppError;

/// A starter model file shipped with the binary.
#[derive(Debug, Clone)]
pub struct StarterTemplate {
    /// Template name, the file stem of the embedded asset.
    pub name: String,
    /// First comment line of the template, without the leading `#`.
    pub summary: String,
    /// TOML model content.
    pub content: String,
}

/// Port for accessing starter model templates.
pub trait TemplateStore {
    /// All templates, sorted by name.
    fn templates(&self) -> Vec<StarterTemplate>;

    /// Look up a template by name.
    fn template(&self, name: &str) -> Result<StarterTemplate, AppError>;
}
