pub mod loader;
pub mod model_file;

pub use loader::{load_model, parse_model};
pub use model_file::{
    CovarianceEntry, HeaderEntry, McmcEntry, ModelFile, OptimiserEntry, PriorEntry, ProfileEntry,
    ProfileKind, SimanEntry, SourceEntry,
};
