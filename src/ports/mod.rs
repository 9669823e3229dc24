mod model_store;
mod template_store;

pub use model_store::ModelStore;
pub use template_store::{StarterTemplate, TemplateStore};
