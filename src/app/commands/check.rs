use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Serialize;
use tracing::debug;

use crate::app::AppContext;
use crate::domain::configuration::load_model;
use crate::domain::{AppError, GleeConfig, Prior};
use crate::ports::{ModelStore, TemplateStore};

/// Validation summary of a model file.
#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    pub model: PathBuf,
    pub sources: Vec<SourceSummary>,
    pub optimiser: bool,
    pub warnings: Vec<String>,
    pub config: GleeConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceSummary {
    /// `z` or `dds_ds`.
    pub distance: &'static str,
    pub light_profiles: Vec<&'static str>,
}

impl CheckReport {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Execute the check command.
pub fn execute<S, T>(ctx: &AppContext<S, T>, model: PathBuf) -> Result<CheckReport, AppError>
where
    S: ModelStore,
    T: TemplateStore,
{
    let config = load_model(ctx.store(), &model)?;
    let warnings = lint(&config);
    debug!(model = %model.display(), warnings = warnings.len(), "model checked");

    let sources = config
        .sources()
        .iter()
        .map(|source| SourceSummary {
            distance: source.line_of_sight().key(),
            light_profiles: source.light_profiles().iter().map(|p| p.keyword()).collect(),
        })
        .collect();
    Ok(CheckReport { model, sources, optimiser: config.optimiser().is_some(), warnings, config })
}

/// Findings that GLEE accepts but that are likely mistakes.
fn lint(config: &GleeConfig) -> Vec<String> {
    let mut warnings = Vec::new();
    if config.sources().is_empty() {
        warnings.push("model has no extended sources".to_string());
    }

    let mut priors: Vec<(String, &Prior)> = Vec::new();
    for (i, source) in config.sources().iter().enumerate() {
        let los = source.line_of_sight();
        priors.push((format!("sources[{i}].{}", los.key()), los.prior()));
        for (j, profile) in source.light_profiles().iter().enumerate() {
            for (name, prior) in profile.parameters() {
                priors.push((format!("sources[{i}].light_profiles[{j}].{name}"), prior));
            }
        }
    }

    let mut labels: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for (path, prior) in &priors {
        if let Some(label) = prior.label() {
            labels.entry(label).or_default().push(path);
        }
    }
    for (label, paths) in &labels {
        if paths.len() > 1 {
            warnings.push(format!("label '{label}' is used by {}", paths.join(", ")));
        }
    }
    for (path, prior) in &priors {
        if let Some(link) = prior.link() {
            if !labels.contains_key(link) {
                warnings.push(format!("{path} links to unknown label '{link}'"));
            }
        }
    }
    warnings
}
