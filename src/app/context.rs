use crate::ports::{ModelStore, TemplateStore};

/// Application context holding dependencies for command execution.
pub struct AppContext<S: ModelStore, T: TemplateStore> {
    store: S,
    templates: T,
}

impl<S: ModelStore, T: TemplateStore> AppContext<S, T> {
    /// Create a new application context.
    pub fn new(store: S, templates: T) -> Self {
        Self { store, templates }
    }

    /// Get a reference to the model store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Get a reference to the starter template store.
    pub fn templates(&self) -> &T {
        &self.templates
    }
}
