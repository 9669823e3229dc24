//! Model file schema.
//!
//! A model file is the TOML description of a run. Entries mirror the GLEE
//! keys and are converted into validated domain values by `into_*` methods;
//! conversion errors carry the TOML path of the offending field.

use std::str::FromStr;

use serde::Deserialize;

use crate::domain::{
    CovarianceMatrix, ExtendedSource, ExtendedSourceParams, FitsPath, GleeConfig, Header,
    InvalidArgument, LightProfile, McmcParams, Minimiser, ModLight, Optimiser, Prior, PriorType,
    RegType, Regularisation, SamplingFunction, SimanParams,
};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelFile {
    pub header: HeaderEntry,
    #[serde(default)]
    pub optimiser: Option<OptimiserEntry>,
    #[serde(default)]
    pub sources: Vec<SourceEntry>,
}

impl ModelFile {
    pub fn into_config(self) -> Result<GleeConfig, InvalidArgument> {
        let header = self.header.into_header().map_err(|e| e.within("header"))?;
        let optimiser = self
            .optimiser
            .map(OptimiserEntry::into_optimiser)
            .transpose()
            .map_err(|e| e.within("optimiser"))?;
        let sources = self
            .sources
            .into_iter()
            .enumerate()
            .map(|(i, source)| source.into_source().map_err(|e| e.within(&format!("sources[{i}]"))))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(GleeConfig::new(header, optimiser, sources))
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HeaderEntry {
    pub chi2type: i64,
    pub minimiser: String,
    pub seed: i64,
}

impl HeaderEntry {
    pub fn into_header(self) -> Result<Header, InvalidArgument> {
        let minimiser = Minimiser::from_str(&self.minimiser)?;
        Header::new(self.chi2type, minimiser, self.seed)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OptimiserEntry {
    pub siman: SimanEntry,
    pub mcmc: McmcEntry,
    #[serde(default)]
    pub covariance: Option<CovarianceEntry>,
}

impl OptimiserEntry {
    pub fn into_optimiser(self) -> Result<Optimiser, InvalidArgument> {
        let covariance = self
            .covariance
            .map(|cov| {
                let sampling_f = SamplingFunction::from_str(&cov.sampling_f)?;
                CovarianceMatrix::new(sampling_f, cov.sampling_cov)
            })
            .transpose()
            .map_err(|e| e.within("covariance"))?;
        Ok(Optimiser::new(self.siman.into(), self.mcmc.into(), covariance))
    }
}

/// Simulated annealing keys, spelled as GLEE spells them after `siman_`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SimanEntry {
    pub iter: i64,
    #[serde(rename = "nT")]
    pub n_t: i64,
    #[serde(rename = "dS")]
    pub d_s: f64,
    #[serde(rename = "Sf")]
    pub s_f: f64,
    pub k: i64,
    #[serde(rename = "Ti")]
    pub t_i: f64,
    #[serde(rename = "Tf")]
    pub t_f: f64,
    #[serde(rename = "Tmin")]
    pub t_min: i64,
}

impl From<SimanEntry> for SimanParams {
    fn from(entry: SimanEntry) -> Self {
        SimanParams {
            iter: entry.iter,
            n_t: entry.n_t,
            d_s: entry.d_s,
            s_f: entry.s_f,
            k: entry.k,
            t_i: entry.t_i,
            t_f: entry.t_f,
            t_min: entry.t_min,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct McmcEntry {
    pub n: i64,
    #[serde(rename = "dS")]
    pub d_s: f64,
    #[serde(rename = "dSini")]
    pub d_s_ini: i64,
    pub k: i64,
}

impl From<McmcEntry> for McmcParams {
    fn from(entry: McmcEntry) -> Self {
        McmcParams { n: entry.n, d_s: entry.d_s, d_s_ini: entry.d_s_ini, k: entry.k }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CovarianceEntry {
    pub sampling_f: String,
    pub sampling_cov: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceEntry {
    #[serde(default)]
    pub z: Option<PriorEntry>,
    #[serde(default)]
    pub dds_ds: Option<PriorEntry>,
    pub ngy: i64,
    pub ngx: i64,
    pub dx: f64,
    pub data: String,
    pub err: String,
    pub arcmask: String,
    pub lensmask: String,
    #[serde(default)]
    pub mod_light: Option<String>,
    pub psf: String,
    pub sub_agn_psf: String,
    pub sub_agn_psf_factor: i64,
    pub sub_esr_psf: String,
    pub sub_esr_psf_factor: i64,
    pub regopt: String,
    pub reglampre: i64,
    pub reglamnup: i64,
    pub regtype: String,
    pub reglam: i64,
    pub reglamlo: f64,
    pub reglamhi: i64,
    #[serde(default)]
    pub light_profiles: Vec<ProfileEntry>,
}

impl SourceEntry {
    pub fn into_source(self) -> Result<ExtendedSource, InvalidArgument> {
        // Path checks are type errors and report before any value error.
        for (field, path) in [
            ("data", &self.data),
            ("err", &self.err),
            ("arcmask", &self.arcmask),
            ("lensmask", &self.lensmask),
            ("psf", &self.psf),
            ("sub_agn_psf", &self.sub_agn_psf),
            ("sub_esr_psf", &self.sub_esr_psf),
        ] {
            FitsPath::new(field, path.as_str())?;
        }
        let mod_light = self.mod_light.as_deref().map(ModLight::from_str).transpose()?;
        let z = self.z.map(|entry| entry.into_prior().map_err(|e| e.within("z"))).transpose()?;
        let dds_ds = self
            .dds_ds
            .map(|entry| entry.into_prior().map_err(|e| e.within("dds_ds")))
            .transpose()?;
        let regtype = RegType::from_str(&self.regtype)?;
        let light_profiles = self
            .light_profiles
            .into_iter()
            .enumerate()
            .map(|(i, profile)| {
                profile.into_profile().map_err(|e| e.within(&format!("light_profiles[{i}]")))
            })
            .collect::<Result<Vec<_>, _>>()?;

        ExtendedSource::new(ExtendedSourceParams {
            z,
            dds_ds,
            ngy: self.ngy,
            ngx: self.ngx,
            dx: self.dx,
            data: self.data,
            err: self.err,
            arcmask: self.arcmask,
            lensmask: self.lensmask,
            mod_light,
            psf: self.psf,
            sub_agn_psf: self.sub_agn_psf,
            sub_agn_psf_factor: self.sub_agn_psf_factor,
            sub_esr_psf: self.sub_esr_psf,
            sub_esr_psf_factor: self.sub_esr_psf_factor,
            regularisation: Regularisation {
                regopt: self.regopt,
                reglampre: self.reglampre,
                reglamnup: self.reglamnup,
                regtype,
                reglam: self.reglam,
                reglamlo: self.reglamlo,
                reglamhi: self.reglamhi,
            },
            light_profiles,
        })
    }
}

/// One prior, e.g. `{ type = "flat", mean = 1.0, lower = 0.5, upper = 1.5 }`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PriorEntry {
    #[serde(rename = "type")]
    pub kind: String,
    pub mean: f64,
    #[serde(default)]
    pub lower: Option<f64>,
    #[serde(default)]
    pub upper: Option<f64>,
    #[serde(default)]
    pub sigma: Option<f64>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub step: Option<f64>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub a: Option<Vec<f64>>,
}

impl PriorEntry {
    pub fn into_prior(self) -> Result<Prior, InvalidArgument> {
        let kind = PriorType::from_str(&self.kind)?;
        let takes = |name: &str| match kind {
            PriorType::Flat => name == "lower" || name == "upper",
            PriorType::Gaussian => name == "sigma",
            PriorType::Exact | PriorType::NoPrior => false,
        };
        for (name, value) in [("lower", self.lower), ("upper", self.upper), ("sigma", self.sigma)] {
            if value.is_some() && !takes(name) {
                return Err(InvalidArgument::wrong_type(
                    name,
                    format!("'{name}' does not apply to {} priors", kind.as_str()),
                ));
            }
        }
        let required = |name: &str, value: Option<f64>| {
            value.ok_or_else(|| {
                InvalidArgument::wrong_type(
                    name,
                    format!("{} prior requires '{name}'", kind.as_str()),
                )
            })
        };

        let mut prior = match kind {
            PriorType::Exact => Prior::exact(self.mean),
            PriorType::NoPrior => Prior::no_prior(self.mean),
            PriorType::Flat => {
                let lower = required("lower", self.lower)?;
                let upper = required("upper", self.upper)?;
                Prior::flat(self.mean, lower, upper)?
            }
            PriorType::Gaussian => Prior::gaussian(self.mean, required("sigma", self.sigma)?),
        };

        if let Some(label) = self.label {
            prior = prior.with_label(label);
        }
        if let Some(min) = self.min {
            prior = prior.with_min(min);
        }
        if let Some(step) = self.step {
            prior = prior.with_step(step);
        }
        if let Some(link) = self.link {
            prior = prior.with_link(link);
        }
        if let Some(a) = self.a {
            let transform: [f64; 3] = a.try_into().map_err(|a: Vec<f64>| {
                InvalidArgument::wrong_type(
                    "a",
                    format!("link transform must be a list of three numbers (got {})", a.len()),
                )
            })?;
            prior = prior.with_link_transform(transform);
        }
        Ok(prior)
    }
}

/// Light profile family named by the `profile` key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileKind {
    Psf,
    Sersic,
    Gaussian,
    Moffat,
    Piemd,
}

impl ProfileKind {
    pub const ALL: [ProfileKind; 5] = [
        ProfileKind::Psf,
        ProfileKind::Sersic,
        ProfileKind::Gaussian,
        ProfileKind::Moffat,
        ProfileKind::Piemd,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileKind::Psf => "psf",
            ProfileKind::Sersic => "sersic",
            ProfileKind::Gaussian => "gaussian",
            ProfileKind::Moffat => "moffat",
            ProfileKind::Piemd => "piemd",
        }
    }

    /// Parameters beyond `x`, `y` and `amp`.
    pub fn shape_parameters(&self) -> &'static [&'static str] {
        match self {
            ProfileKind::Psf => &[],
            ProfileKind::Sersic => &["q", "pa", "r_eff", "n_sersic"],
            ProfileKind::Gaussian => &["q", "pa", "sigma"],
            ProfileKind::Moffat => &["q", "pa", "alpha", "beta"],
            ProfileKind::Piemd => &["q", "pa", "w"],
        }
    }
}

impl FromStr for ProfileKind {
    type Err = InvalidArgument;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProfileKind::ALL.into_iter().find(|k| k.as_str() == s).ok_or_else(|| {
            InvalidArgument::wrong_value(
                "profile",
                format!(
                    "unknown light profile '{s}': must be one of psf, sersic, gaussian, moffat, piemd"
                ),
            )
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProfileEntry {
    pub profile: String,
    pub x: PriorEntry,
    pub y: PriorEntry,
    pub amp: PriorEntry,
    #[serde(default)]
    pub q: Option<PriorEntry>,
    #[serde(default)]
    pub pa: Option<PriorEntry>,
    #[serde(default)]
    pub r_eff: Option<PriorEntry>,
    #[serde(default)]
    pub n_sersic: Option<PriorEntry>,
    #[serde(default)]
    pub sigma: Option<PriorEntry>,
    #[serde(default)]
    pub alpha: Option<PriorEntry>,
    #[serde(default)]
    pub beta: Option<PriorEntry>,
    #[serde(default)]
    pub w: Option<PriorEntry>,
}

impl ProfileEntry {
    pub fn into_profile(self) -> Result<LightProfile, InvalidArgument> {
        let kind = ProfileKind::from_str(&self.profile)?;
        let present = [
            ("q", self.q.is_some()),
            ("pa", self.pa.is_some()),
            ("r_eff", self.r_eff.is_some()),
            ("n_sersic", self.n_sersic.is_some()),
            ("sigma", self.sigma.is_some()),
            ("alpha", self.alpha.is_some()),
            ("beta", self.beta.is_some()),
            ("w", self.w.is_some()),
        ];
        for (name, is_set) in present {
            if is_set && !kind.shape_parameters().contains(&name) {
                return Err(InvalidArgument::wrong_type(
                    name,
                    format!("'{name}' is not a parameter of {} profiles", kind.as_str()),
                ));
            }
        }

        let convert =
            |name: &str, entry: PriorEntry| entry.into_prior().map_err(|e| e.within(name));
        let required = |name: &str, entry: Option<PriorEntry>| {
            let entry = entry.ok_or_else(|| {
                InvalidArgument::wrong_type(
                    name,
                    format!("{} profile requires '{name}'", kind.as_str()),
                )
            })?;
            convert(name, entry)
        };

        let x = convert("x", self.x)?;
        let y = convert("y", self.y)?;
        let amp = convert("amp", self.amp)?;
        match kind {
            ProfileKind::Psf => LightProfile::psf(x, y, amp),
            ProfileKind::Sersic => LightProfile::sersic(
                x,
                y,
                amp,
                required("q", self.q)?,
                required("pa", self.pa)?,
                required("r_eff", self.r_eff)?,
                required("n_sersic", self.n_sersic)?,
            ),
            ProfileKind::Gaussian => LightProfile::gaussian(
                x,
                y,
                amp,
                required("q", self.q)?,
                required("pa", self.pa)?,
                required("sigma", self.sigma)?,
            ),
            ProfileKind::Moffat => LightProfile::moffat(
                x,
                y,
                amp,
                required("q", self.q)?,
                required("pa", self.pa)?,
                required("alpha", self.alpha)?,
                required("beta", self.beta)?,
            ),
            ProfileKind::Piemd => LightProfile::piemd(
                x,
                y,
                amp,
                required("q", self.q)?,
                required("pa", self.pa)?,
                required("w", self.w)?,
            ),
        }
    }
}
