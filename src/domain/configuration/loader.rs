//! Model file loading.

use std::io;
use std::path::Path;

use crate::domain::{AppError, GleeConfig};
use crate::ports::ModelStore;

use super::model_file::ModelFile;

/// Load and validate the model file at `path`.
pub fn load_model(store: &impl ModelStore, path: &Path) -> Result<GleeConfig, AppError> {
    let content = store.read_file(path).map_err(|err| {
        if err.kind() == io::ErrorKind::NotFound {
            AppError::ModelNotFound(path.display().to_string())
        } else {
            err
        }
    })?;
    parse_model(&content)
}

/// Parse model file content into a validated configuration.
pub fn parse_model(content: &str) -> Result<GleeConfig, AppError> {
    let model: ModelFile = toml::from_str(content)?;
    Ok(model.into_config()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MemoryStore;
    use crate::domain::{Minimiser, Render};

    const MINIMAL: &str = r#"
[header]
chi2type = 128
minimiser = "mcmc"
seed = 42

[[sources]]
dds_ds = { type = "exact", mean = 0.5 }
ngy = 100
ngx = 120
dx = 0.05
data = "data/sci.fits"
err = "data/err.fits"
arcmask = "masks/arc.fits"
lensmask = "masks/lens.fits"
psf = "psf/psf.fits"
sub_agn_psf = "psf/agn.fits"
sub_agn_psf_factor = 3
sub_esr_psf = "psf/esr.fits"
sub_esr_psf_factor = 3
regopt = "SpecRegPrecSigFigOnce"
reglampre = 1
reglamnup = 10
regtype = "curv"
reglam = 1000
reglamlo = 0.1
reglamhi = 100000
"#;

    #[test]
    fn parses_minimal_model() {
        let config = parse_model(MINIMAL).unwrap();
        assert_eq!(config.header().minimiser(), Minimiser::Mcmc);
        assert!(config.optimiser().is_none());
        assert_eq!(config.sources().len(), 1);
        assert!(config.render().contains("esource_light 0"));
    }

    #[test]
    fn missing_model_is_reported_by_path() {
        let store = MemoryStore::new();
        let err = load_model(&store, Path::new("absent.toml")).unwrap_err();
        assert!(matches!(err, AppError::ModelNotFound(ref path) if path == "absent.toml"));
    }

    #[test]
    fn loads_from_store() {
        let store = MemoryStore::new().with_file("model.toml", MINIMAL);
        let config = load_model(&store, Path::new("model.toml")).unwrap();
        assert_eq!(config.header().seed(), 42);
    }

    #[test]
    fn unknown_top_level_key_is_a_parse_error() {
        let content = format!("{MINIMAL}\n[extras]\nfoo = 1\n");
        assert!(matches!(parse_model(&content), Err(AppError::TomlParse(_))));
    }

    #[test]
    fn domain_errors_carry_field_path() {
        let content = MINIMAL.replace("sub_esr_psf_factor = 3", "sub_esr_psf_factor = 4");
        match parse_model(&content) {
            Err(AppError::InvalidArgument(err)) => {
                assert!(err.is_wrong_value());
                assert_eq!(err.field(), "sources[0].sub_esr_psf_factor");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn path_type_error_reported_before_value_errors() {
        let content = MINIMAL
            .replace("data = \"data/sci.fits\"", "data = \"data/sci.png\"")
            .replace("regtype = \"curv\"", "regtype = \"laplace\"");
        match parse_model(&content) {
            Err(AppError::InvalidArgument(err)) => {
                assert!(err.is_wrong_type());
                assert_eq!(err.field(), "sources[0].data");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn both_distances_are_rejected() {
        let content = MINIMAL.replace(
            "dds_ds = { type = \"exact\", mean = 0.5 }",
            "dds_ds = { type = \"exact\", mean = 0.5 }\nz = { type = \"exact\", mean = 2.0 }",
        );
        match parse_model(&content) {
            Err(AppError::InvalidArgument(err)) => assert!(err.field().starts_with("sources[0]")),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn bad_chi2type_is_reported_under_header() {
        let content = MINIMAL.replace("chi2type = 128", "chi2type = 130");
        match parse_model(&content) {
            Err(AppError::InvalidArgument(err)) => assert_eq!(err.field(), "header.chi2type"),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
