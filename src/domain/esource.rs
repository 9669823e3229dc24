//! Extended (pixelated) sources.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::error::InvalidArgument;
use super::light_profile::LightProfile;
use super::paths::FitsPath;
use super::prior::Prior;
use super::render::{Render, push_field};

/// Light modelling mode; the only recognised value disables source reconstruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ModLight {
    LensOnly,
}

impl ModLight {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModLight::LensOnly => "LensOnly",
        }
    }
}

impl FromStr for ModLight {
    type Err = InvalidArgument;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LensOnly" => Ok(ModLight::LensOnly),
            other => Err(InvalidArgument::wrong_type(
                "mod_light",
                format!(
                    "mod_light must be unset for source reconstruction or 'LensOnly' (got '{other}')"
                ),
            )),
        }
    }
}

impl fmt::Display for ModLight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Regularisation order for the pixelated reconstruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RegType {
    Zeroth,
    Grad,
    Curv,
}

impl RegType {
    pub const ALL: [RegType; 3] = [RegType::Zeroth, RegType::Grad, RegType::Curv];

    pub fn as_str(&self) -> &'static str {
        match self {
            RegType::Zeroth => "zeroth",
            RegType::Grad => "grad",
            RegType::Curv => "curv",
        }
    }
}

impl FromStr for RegType {
    type Err = InvalidArgument;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RegType::ALL.into_iter().find(|t| t.as_str() == s).ok_or_else(|| {
            InvalidArgument::wrong_value(
                "regtype",
                format!("regtype must be one of 'zeroth', 'grad', 'curv' (got '{s}')"),
            )
        })
    }
}

impl fmt::Display for RegType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Regularisation settings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Regularisation {
    /// Options string, usually `SpecRegPrecSigFigOnce`.
    pub regopt: String,
    /// Significant digits kept in lambda.
    pub reglampre: i64,
    /// Update lambda every N points.
    pub reglamnup: i64,
    pub regtype: RegType,
    /// Regularisation strength.
    pub reglam: i64,
    pub reglamlo: f64,
    pub reglamhi: i64,
}

/// Subsampled PSF and its subsampling factor.
///
/// Guarantees:
/// - `path` ends in `.fits`
/// - `factor` is odd
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubsampledPsf {
    path: FitsPath,
    factor: i64,
}

impl SubsampledPsf {
    /// `field` is the GLEE key of the path (`sub_agn_psf`, `sub_esr_psf`);
    /// the factor is reported as `<field>_factor`.
    pub fn new(field: &str, path: impl Into<String>, factor: i64) -> Result<Self, InvalidArgument> {
        let path = FitsPath::new(field, path)?;
        Self::with_path(field, path, factor)
    }

    fn with_path(field: &str, path: FitsPath, factor: i64) -> Result<Self, InvalidArgument> {
        if factor % 2 == 0 {
            return Err(InvalidArgument::wrong_value(
                format!("{field}_factor"),
                format!("subsampling factor must be an odd int (got {factor})"),
            ));
        }
        Ok(Self { path, factor })
    }

    pub fn path(&self) -> &FitsPath {
        &self.path
    }

    pub fn factor(&self) -> i64 {
        self.factor
    }
}

/// Line-of-sight distance information: a redshift or a Dds/Ds ratio.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum LineOfSight {
    #[serde(rename = "z")]
    Redshift(Prior),
    #[serde(rename = "dds_ds")]
    DdsDs(Prior),
}

impl LineOfSight {
    /// Build from the two optional inputs; exactly one must be set.
    pub fn from_options(z: Option<Prior>, dds_ds: Option<Prior>) -> Result<Self, InvalidArgument> {
        match (z, dds_ds) {
            (Some(z), None) => Ok(LineOfSight::Redshift(z)),
            (None, Some(ratio)) => Ok(LineOfSight::DdsDs(ratio)),
            (None, None) => {
                Err(InvalidArgument::wrong_value("z", "either z or dds_ds must be provided"))
            }
            (Some(_), Some(_)) => {
                Err(InvalidArgument::wrong_value("z", "only one of z and dds_ds may be provided"))
            }
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            LineOfSight::Redshift(_) => "z",
            LineOfSight::DdsDs(_) => "dds_ds",
        }
    }

    pub fn prior(&self) -> &Prior {
        match self {
            LineOfSight::Redshift(prior) | LineOfSight::DdsDs(prior) => prior,
        }
    }
}

/// Raw inputs for [`ExtendedSource::new`].
#[derive(Debug, Clone)]
pub struct ExtendedSourceParams {
    pub z: Option<Prior>,
    pub dds_ds: Option<Prior>,
    pub ngy: i64,
    pub ngx: i64,
    pub dx: f64,
    pub data: String,
    pub err: String,
    pub arcmask: String,
    pub lensmask: String,
    pub mod_light: Option<ModLight>,
    pub psf: String,
    pub sub_agn_psf: String,
    pub sub_agn_psf_factor: i64,
    pub sub_esr_psf: String,
    pub sub_esr_psf_factor: i64,
    pub regularisation: Regularisation,
    pub light_profiles: Vec<LightProfile>,
}

/// A validated lensed source.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtendedSource {
    line_of_sight: LineOfSight,
    ngy: i64,
    ngx: i64,
    dx: f64,
    data: FitsPath,
    err: FitsPath,
    arcmask: FitsPath,
    lensmask: FitsPath,
    #[serde(skip_serializing_if = "Option::is_none")]
    mod_light: Option<ModLight>,
    psf: FitsPath,
    sub_agn_psf: SubsampledPsf,
    sub_esr_psf: SubsampledPsf,
    regularisation: Regularisation,
    light_profiles: Vec<LightProfile>,
}

impl ExtendedSource {
    /// Validate `params`: file paths first, then subsampling factors, then the
    /// z/dds_ds alternative.
    pub fn new(params: ExtendedSourceParams) -> Result<Self, InvalidArgument> {
        let data = FitsPath::new("data", params.data)?;
        let err = FitsPath::new("err", params.err)?;
        let arcmask = FitsPath::new("arcmask", params.arcmask)?;
        let lensmask = FitsPath::new("lensmask", params.lensmask)?;
        let psf = FitsPath::new("psf", params.psf)?;
        let agn_path = FitsPath::new("sub_agn_psf", params.sub_agn_psf)?;
        let esr_path = FitsPath::new("sub_esr_psf", params.sub_esr_psf)?;

        let sub_agn_psf =
            SubsampledPsf::with_path("sub_agn_psf", agn_path, params.sub_agn_psf_factor)?;
        let sub_esr_psf =
            SubsampledPsf::with_path("sub_esr_psf", esr_path, params.sub_esr_psf_factor)?;
        let line_of_sight = LineOfSight::from_options(params.z, params.dds_ds)?;

        Ok(Self {
            line_of_sight,
            ngy: params.ngy,
            ngx: params.ngx,
            dx: params.dx,
            data,
            err,
            arcmask,
            lensmask,
            mod_light: params.mod_light,
            psf,
            sub_agn_psf,
            sub_esr_psf,
            regularisation: params.regularisation,
            light_profiles: params.light_profiles,
        })
    }

    pub fn line_of_sight(&self) -> &LineOfSight {
        &self.line_of_sight
    }

    pub fn grid(&self) -> (i64, i64) {
        (self.ngy, self.ngx)
    }

    pub fn dx(&self) -> f64 {
        self.dx
    }

    pub fn data(&self) -> &FitsPath {
        &self.data
    }

    pub fn mod_light(&self) -> Option<ModLight> {
        self.mod_light
    }

    pub fn regularisation(&self) -> &Regularisation {
        &self.regularisation
    }

    pub fn light_profiles(&self) -> &[LightProfile] {
        &self.light_profiles
    }
}

impl Render for ExtendedSource {
    fn render(&self) -> String {
        let mut lines = Vec::new();
        let distance = match &self.line_of_sight {
            LineOfSight::Redshift(prior) => prior.value_and_fragment(),
            LineOfSight::DdsDs(prior) => prior.fragment(),
        };
        push_field(&mut lines, self.line_of_sight.key(), distance);
        push_field(&mut lines, "ngy", self.ngy);
        push_field(&mut lines, "ngx", self.ngx);
        push_field(&mut lines, "dx", self.dx);
        push_field(&mut lines, "data", &self.data);
        push_field(&mut lines, "err", &self.err);
        push_field(&mut lines, "arcmask", &self.arcmask);
        push_field(&mut lines, "lensmask", &self.lensmask);
        if let Some(mod_light) = self.mod_light {
            push_field(&mut lines, "mod_light", mod_light);
        }
        push_field(&mut lines, "psf", &self.psf);
        push_field(&mut lines, "sub_agn_psf", self.sub_agn_psf.path());
        push_field(&mut lines, "sub_agn_psf_factor", self.sub_agn_psf.factor());
        push_field(&mut lines, "sub_esr_psf", self.sub_esr_psf.path());
        push_field(&mut lines, "sub_esr_psf_factor", self.sub_esr_psf.factor());

        let reg = &self.regularisation;
        push_field(&mut lines, "regopt", &reg.regopt);
        push_field(&mut lines, "reglampre", reg.reglampre);
        push_field(&mut lines, "reglamnup", reg.reglamnup);
        push_field(&mut lines, "regtype", reg.regtype);
        push_field(&mut lines, "reglam", reg.reglam);
        push_field(&mut lines, "reglamlo", reg.reglamlo);
        push_field(&mut lines, "reglamhi", reg.reglamhi);

        lines.push(format!("esource_light {}", self.light_profiles.len()));
        lines.extend(self.light_profiles.iter().map(Render::render));
        lines.join("\n")
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use proptest::prelude::*;

    use super::*;

    pub(crate) fn params() -> ExtendedSourceParams {
        ExtendedSourceParams {
            z: None,
            dds_ds: Some(Prior::exact(0.5)),
            ngy: 100,
            ngx: 120,
            dx: 0.05,
            data: "data/sci.fits".into(),
            err: "data/err.fits".into(),
            arcmask: "masks/arc.fits".into(),
            lensmask: "masks/lens.fits".into(),
            mod_light: None,
            psf: "psf/psf.fits".into(),
            sub_agn_psf: "psf/agn_sub3.fits".into(),
            sub_agn_psf_factor: 3,
            sub_esr_psf: "psf/esr_sub3.fits".into(),
            sub_esr_psf_factor: 3,
            regularisation: Regularisation {
                regopt: "SpecRegPrecSigFigOnce".into(),
                reglampre: 1,
                reglamnup: 10,
                regtype: RegType::Curv,
                reglam: 1000,
                reglamlo: 0.1,
                reglamhi: 100000,
            },
            light_profiles: Vec::new(),
        }
    }

    #[test]
    fn renders_fields_in_glee_order() {
        let source = ExtendedSource::new(params()).unwrap();
        let expected = [
            "dds_ds       exact:",
            "ngy          100",
            "ngx          120",
            "dx           0.05",
            "data         data/sci.fits",
            "err          data/err.fits",
            "arcmask      masks/arc.fits",
            "lensmask     masks/lens.fits",
            "psf          psf/psf.fits",
            "sub_agn_psf  psf/agn_sub3.fits",
            "sub_agn_psf_factor 3",
            "sub_esr_psf  psf/esr_sub3.fits",
            "sub_esr_psf_factor 3",
            "regopt       SpecRegPrecSigFigOnce",
            "reglampre    1",
            "reglamnup    10",
            "regtype      curv",
            "reglam       1000",
            "reglamlo     0.1",
            "reglamhi     100000",
            "esource_light 0",
        ]
        .join("\n");
        assert_eq!(source.render(), expected);
    }

    #[test]
    fn redshift_line_replaces_dds_ds() {
        let source = ExtendedSource::new(ExtendedSourceParams {
            z: Some(Prior::flat(1.8, 1.5, 2.0).unwrap().with_label("zs")),
            dds_ds: None,
            ..params()
        })
        .unwrap();
        let rendered = source.render();
        assert!(rendered.starts_with("z            1.8  flat:1.5,2 label:zs\nngy"));
        assert!(!rendered.contains("dds_ds"));
    }

    #[test]
    fn dds_ds_line_has_no_mean() {
        let source = ExtendedSource::new(ExtendedSourceParams {
            dds_ds: Some(Prior::flat(0.6, 0.4, 0.8).unwrap().with_step(0.01)),
            ..params()
        })
        .unwrap();
        let first = source.render().lines().next().map(str::to_string);
        assert_eq!(first.as_deref(), Some("dds_ds       flat:0.4,0.8 step:0.01"));
    }

    #[test]
    fn mod_light_line_only_when_set() {
        let without = ExtendedSource::new(params()).unwrap().render();
        assert!(!without.contains("mod_light"));

        let with = ExtendedSource::new(ExtendedSourceParams {
            mod_light: Some(ModLight::LensOnly),
            ..params()
        })
        .unwrap()
        .render();
        assert!(with.contains("lensmask     masks/lens.fits\nmod_light    LensOnly\npsf"));
    }

    #[test]
    fn profiles_follow_light_count_in_order() {
        let at = |v: f64| Prior::exact(v);
        let profiles = vec![
            LightProfile::psf(at(1.0), at(2.0), at(3.0)).unwrap(),
            LightProfile::piemd(at(1.0), at(2.0), at(3.0), at(0.7), at(45.0), at(0.01)).unwrap(),
        ];
        let source =
            ExtendedSource::new(ExtendedSourceParams { light_profiles: profiles, ..params() })
                .unwrap();
        let rendered = source.render();
        let tail = rendered.split_once("esource_light 2\n").unwrap().1;
        assert!(tail.starts_with("psf\n1  #x-coord   exact:"));
        assert!(tail.contains("3  #amp   exact:\npiemd\n"));
        assert!(tail.ends_with("0.01  #w   exact:"));
    }

    #[test]
    fn both_distances_are_rejected() {
        let err = ExtendedSource::new(ExtendedSourceParams {
            z: Some(Prior::exact(1.0)),
            ..params()
        })
        .unwrap_err();
        assert!(err.is_wrong_value());
    }

    #[test]
    fn missing_distance_is_rejected() {
        let err =
            ExtendedSource::new(ExtendedSourceParams { dds_ds: None, ..params() }).unwrap_err();
        assert!(err.is_wrong_value());
        assert_eq!(err.field(), "z");
    }

    #[test]
    fn non_fits_paths_are_wrong_type() {
        let err = ExtendedSource::new(ExtendedSourceParams {
            lensmask: "masks/lens.png".into(),
            ..params()
        })
        .unwrap_err();
        assert!(err.is_wrong_type());
        assert_eq!(err.field(), "lensmask");

        let err = ExtendedSource::new(ExtendedSourceParams {
            sub_esr_psf: "psf/esr".into(),
            ..params()
        })
        .unwrap_err();
        assert_eq!(err.field(), "sub_esr_psf");
    }

    #[test]
    fn even_factor_names_the_factor_field() {
        let err = ExtendedSource::new(ExtendedSourceParams { sub_agn_psf_factor: 4, ..params() })
            .unwrap_err();
        assert!(err.is_wrong_value());
        assert_eq!(err.field(), "sub_agn_psf_factor");
    }

    #[test]
    fn mod_light_only_accepts_lens_only() {
        assert_eq!("LensOnly".parse::<ModLight>().unwrap(), ModLight::LensOnly);
        assert!("lensonly".parse::<ModLight>().unwrap_err().is_wrong_type());
    }

    #[test]
    fn regtype_rejects_unknown_order() {
        assert_eq!("grad".parse::<RegType>().unwrap(), RegType::Grad);
        assert!("laplace".parse::<RegType>().unwrap_err().is_wrong_value());
    }

    proptest! {
        #[test]
        fn factor_parity_decides_construction(factor in -1001i64..1001) {
            let result = SubsampledPsf::new("sub_esr_psf", "psf.fits", factor);
            prop_assert_eq!(result.is_ok(), factor % 2 != 0);
        }

        #[test]
        fn exactly_one_distance_is_accepted(has_z: bool, has_ratio: bool) {
            let result = ExtendedSource::new(ExtendedSourceParams {
                z: has_z.then(|| Prior::exact(2.0)),
                dds_ds: has_ratio.then(|| Prior::exact(0.5)),
                ..params()
            });
            prop_assert_eq!(result.is_ok(), has_z != has_ratio);
        }
    }
}
