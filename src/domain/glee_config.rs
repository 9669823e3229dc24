//! The top-level GLEE document.

use serde::Serialize;

use super::esource::ExtendedSource;
use super::header::Header;
use super::optimiser::Optimiser;
use super::render::Render;

/// A complete GLEE run: header, optional optimiser settings and the ordered
/// extended sources.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GleeConfig {
    header: Header,
    #[serde(skip_serializing_if = "Option::is_none")]
    optimiser: Option<Optimiser>,
    sources: Vec<ExtendedSource>,
}

impl GleeConfig {
    pub fn new(header: Header, optimiser: Option<Optimiser>, sources: Vec<ExtendedSource>) -> Self {
        Self { header, optimiser, sources }
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn optimiser(&self) -> Option<&Optimiser> {
        self.optimiser.as_ref()
    }

    pub fn sources(&self) -> &[ExtendedSource] {
        &self.sources
    }

    /// Total light profiles across all sources.
    pub fn light_profile_count(&self) -> usize {
        self.sources.iter().map(|s| s.light_profiles().len()).sum()
    }
}

impl Render for GleeConfig {
    fn render(&self) -> String {
        let mut values = vec![self.header.render(), String::new()];
        if let Some(optimiser) = &self.optimiser {
            values.push(optimiser.render());
            values.push(String::new());
        }
        values.push(format!("esources {}", self.sources.len()));
        values.push(String::new());
        for source in &self.sources {
            values.push(source.render());
            values.push("esource_end".to_string());
            values.push(String::new());
        }
        values.join("\n")
    }
}
