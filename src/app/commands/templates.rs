use crate::app::AppContext;
use crate::ports::{ModelStore, StarterTemplate, TemplateStore};

/// List embedded starter templates, sorted by name.
pub fn execute<S, T>(ctx: &AppContext<S, T>) -> Vec<StarterTemplate>
where
    S: ModelStore,
    T: TemplateStore,
{
    ctx.templates().templates()
}
