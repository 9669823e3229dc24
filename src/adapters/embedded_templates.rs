use include_dir::{Dir, include_dir};

use crate::domain::AppError;
use crate::ports::{StarterTemplate, TemplateStore};

static TEMPLATES_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/assets/templates");

/// Starter model templates compiled into the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedTemplateStore;

impl EmbeddedTemplateStore {
    pub fn new() -> Self {
        Self
    }
}

impl TemplateStore for EmbeddedTemplateStore {
    fn templates(&self) -> Vec<StarterTemplate> {
        let mut templates: Vec<StarterTemplate> = TEMPLATES_DIR
            .files()
            .filter(|file| file.path().extension().is_some_and(|ext| ext == "toml"))
            .filter_map(|file| {
                let name = file.path().file_stem()?.to_str()?.to_string();
                let content = file.contents_utf8()?.to_string();
                Some(StarterTemplate { summary: summary_line(&content), name, content })
            })
            .collect();
        templates.sort_by(|a, b| a.name.cmp(&b.name));
        templates
    }

    fn template(&self, name: &str) -> Result<StarterTemplate, AppError> {
        let templates = self.templates();
        if templates.is_empty() {
            return Err(AppError::Internal { message: "No starter templates embedded".into() });
        }
        let available = templates.iter().map(|t| t.name.as_str()).collect::<Vec<_>>().join(", ");
        templates
            .iter()
            .find(|t| t.name == name)
            .cloned()
            .ok_or_else(|| AppError::TemplateNotFound { name: name.to_string(), available })
    }
}

fn summary_line(content: &str) -> String {
    content
        .lines()
        .next()
        .and_then(|line| line.strip_prefix('#'))
        .map(|line| line.trim().to_string())
        .unwrap_or_default()
}
