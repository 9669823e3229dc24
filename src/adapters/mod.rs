//! Concrete implementations of the ports.

mod embedded_templates;
mod filesystem;
mod memory_store;

pub use embedded_templates::EmbeddedTemplateStore;
pub use filesystem::FilesystemStore;
pub use memory_store::MemoryStore;
