pub mod configuration;
pub mod error;
pub mod esource;
pub mod glee_config;
pub mod header;
pub mod light_profile;
pub mod optimiser;
pub mod paths;
pub mod prior;
pub mod render;

pub use error::{AppError, InvalidArgument};
pub use esource::{
    ExtendedSource, ExtendedSourceParams, LineOfSight, ModLight, RegType, Regularisation,
    SubsampledPsf,
};
pub use glee_config::GleeConfig;
pub use header::{CHI2_FLAGS, Header, Minimiser};
pub use light_profile::{LightProfile, Shape};
pub use optimiser::{CovarianceMatrix, McmcParams, Optimiser, SamplingFunction, SimanParams};
pub use paths::{CovPath, FitsPath};
pub use prior::{Prior, PriorKind, PriorType};
pub use render::Render;
