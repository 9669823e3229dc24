//! Optimiser settings: simulated annealing, MCMC and an optional sampling covariance.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::error::InvalidArgument;
use super::paths::CovPath;
use super::render::Render;

/// Simulated-annealing parameters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimanParams {
    /// Number of annealing runs; runs after the first restart at `t_i`.
    pub iter: i64,
    /// Steps searched at each temperature.
    pub n_t: i64,
    /// Initial global step-size scaling.
    pub d_s: f64,
    /// Step-size shrink factor: `dS(j) = dS / Sf^j`.
    pub s_f: f64,
    /// Boltzmann-like factor in `exp(-E/kT)`.
    pub k: i64,
    /// Initial temperature.
    pub t_i: f64,
    /// Temperature factor: `T(j) = Ti / Tf^j`.
    pub t_f: f64,
    /// Final temperature.
    pub t_min: i64,
}

impl Render for SimanParams {
    fn render(&self) -> String {
        [
            format!("siman_iter {}", self.iter),
            format!("siman_nT {}", self.n_t),
            format!("siman_dS {}", self.d_s),
            format!("siman_Sf {}", self.s_f),
            format!("siman_k {}", self.k),
            format!("siman_Ti {}", self.t_i),
            format!("siman_Tf {}", self.t_f),
            format!("siman_Tmin {}", self.t_min),
        ]
        .join("\n")
    }
}

/// Markov-chain Monte-Carlo parameters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct McmcParams {
    /// Steps per chain.
    pub n: i64,
    /// Global step-size scaling; aim for roughly 25% acceptance.
    pub d_s: f64,
    /// 0 starts from the initial parameters, 1 from a random step size.
    pub d_s_ini: i64,
    pub k: i64,
}

impl Render for McmcParams {
    fn render(&self) -> String {
        [
            format!("mcmc_n {}", self.n),
            format!("mcmc_dS {}", self.d_s),
            format!("mcmc_dSini {}", self.d_s_ini),
            format!("mcmc_k {}", self.k),
        ]
        .join("\n")
    }
}

/// Proposal distribution drawn from the covariance matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SamplingFunction {
    Gaussian,
    Flat,
}

impl SamplingFunction {
    pub fn as_str(&self) -> &'static str {
        match self {
            SamplingFunction::Gaussian => "gaussian",
            SamplingFunction::Flat => "flat",
        }
    }
}

impl FromStr for SamplingFunction {
    type Err = InvalidArgument;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gaussian" => Ok(SamplingFunction::Gaussian),
            "flat" => Ok(SamplingFunction::Flat),
            other => Err(InvalidArgument::wrong_value(
                "sampling_f",
                format!("sampling_f must be 'gaussian' or 'flat' (got '{other}')"),
            )),
        }
    }
}

impl fmt::Display for SamplingFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CovarianceMatrix {
    sampling_f: SamplingFunction,
    sampling_cov: CovPath,
}

impl CovarianceMatrix {
    pub fn new(
        sampling_f: SamplingFunction,
        sampling_cov: impl Into<String>,
    ) -> Result<Self, InvalidArgument> {
        let sampling_cov = CovPath::new("sampling_cov", sampling_cov)?;
        Ok(Self { sampling_f, sampling_cov })
    }

    pub fn sampling_f(&self) -> SamplingFunction {
        self.sampling_f
    }

    pub fn sampling_cov(&self) -> &CovPath {
        &self.sampling_cov
    }
}

impl Render for CovarianceMatrix {
    fn render(&self) -> String {
        format!("sampling_f {}\nsampling_cov {}", self.sampling_f, self.sampling_cov)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Optimiser {
    siman: SimanParams,
    mcmc: McmcParams,
    #[serde(skip_serializing_if = "Option::is_none")]
    covariance: Option<CovarianceMatrix>,
}

impl Optimiser {
    pub fn new(siman: SimanParams, mcmc: McmcParams, covariance: Option<CovarianceMatrix>) -> Self {
        Self { siman, mcmc, covariance }
    }

    pub fn siman(&self) -> &SimanParams {
        &self.siman
    }

    pub fn mcmc(&self) -> &McmcParams {
        &self.mcmc
    }

    pub fn covariance(&self) -> Option<&CovarianceMatrix> {
        self.covariance.as_ref()
    }
}

impl Render for Optimiser {
    fn render(&self) -> String {
        let mut blocks = vec![self.siman.render(), self.mcmc.render()];
        if let Some(cov) = &self.covariance {
            blocks.push(cov.render());
        }
        blocks.join("\n\n")
    }
}
