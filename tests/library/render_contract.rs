use glee_config::{
    AppError, ExtendedSource, ExtendedSourceParams, GleeConfig, Header, LightProfile, Minimiser,
    Prior, RegType, Regularisation, Render, parse_model, render_model, starter_template,
    starter_templates, write_config,
};
use tempfile::TempDir;

fn source(light_profiles: Vec<LightProfile>) -> ExtendedSource {
    ExtendedSource::new(ExtendedSourceParams {
        z: None,
        dds_ds: Some(Prior::exact(0.5)),
        ngy: 100,
        ngx: 100,
        dx: 0.05,
        data: "sci.fits".into(),
        err: "err.fits".into(),
        arcmask: "arc.fits".into(),
        lensmask: "lens.fits".into(),
        mod_light: None,
        psf: "psf.fits".into(),
        sub_agn_psf: "agn.fits".into(),
        sub_agn_psf_factor: 1,
        sub_esr_psf: "esr.fits".into(),
        sub_esr_psf_factor: 5,
        regularisation: Regularisation {
            regopt: "SpecRegPrecSigFigOnce".into(),
            reglampre: 1,
            reglamnup: 10,
            regtype: RegType::Zeroth,
            reglam: 1000,
            reglamlo: 0.1,
            reglamhi: 100000,
        },
        light_profiles,
    })
    .expect("valid source")
}

#[test]
fn header_renders_exactly() {
    let header = Header::new(128, Minimiser::Mcmc, 42).unwrap();
    assert_eq!(header.render(), "chi2type 128\nminimiser mcmc\nseed 42");
    assert!(Header::new(130, Minimiser::Mcmc, 42).is_err());
}

#[test]
fn single_source_document_contract() {
    let header = Header::new(128, Minimiser::Mcmc, 42).unwrap();
    let config = GleeConfig::new(header, None, vec![source(Vec::new())]);
    let document = config.render();
    let lines: Vec<&str> = document.lines().collect();

    assert_eq!(&lines[..5], ["chi2type 128", "minimiser mcmc", "seed 42", "", "esources 1"]);
    assert_eq!(lines[5], "");
    assert_eq!(lines[6], "dds_ds       exact:");
    assert!(lines.contains(&"esource_light 0"));
    assert_eq!(lines.last(), Some(&"esource_end"));
    assert!(document.ends_with("esource_end\n"));
}

#[test]
fn profile_blocks_follow_light_count() {
    let psf = LightProfile::psf(Prior::exact(1.0), Prior::exact(2.0), Prior::no_prior(3.0))
        .unwrap();
    let header = Header::new(16, Minimiser::Siman, 1).unwrap();
    let config = GleeConfig::new(header, None, vec![source(vec![psf])]);
    let document = config.render();

    assert!(document.contains("esource_light 1\npsf\n1  #x-coord   exact:\n"));
    assert!(document.contains("3  #amp   noprior:\nesource_end\n"));
}

#[test]
fn negative_amplitude_is_rejected_through_public_api() {
    let err = LightProfile::psf(Prior::exact(1.0), Prior::exact(2.0), Prior::exact(-0.1))
        .unwrap_err();
    assert!(err.is_wrong_value());
}

#[test]
fn every_starter_template_parses_and_renders() {
    let templates = starter_templates();
    assert_eq!(templates.len(), 3);
    for template in templates {
        let document = render_model(&template.content)
            .unwrap_or_else(|err| panic!("{} failed: {err}", template.name));
        assert!(document.starts_with("chi2type "), "{}", template.name);
    }
}

#[test]
fn unknown_template_is_not_found() {
    assert!(matches!(starter_template("nope"), Err(AppError::TemplateNotFound { .. })));
}

#[test]
fn write_config_respects_overwrite_flag() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("out/glee.config");
    let config = parse_model(&starter_template("lens-only").unwrap().content).unwrap();

    write_config(&path, &config, false).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), config.render());

    let err = write_config(&path, &config, false).unwrap_err();
    assert!(matches!(err, AppError::OutputExists(_)));
    write_config(&path, &config, true).unwrap();
}
