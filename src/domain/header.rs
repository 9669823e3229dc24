//! Run-level header.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::error::InvalidArgument;
use super::render::Render;

/// Chi² components GLEE can evaluate.
///
/// | flag | component |
/// |------|-----------|
/// | 1    | point source position |
/// | 2    | point image position |
/// | 4    | fluxes |
/// | 16   | extended images (pixelated image chi²) |
/// | 128  | time delays |
///
/// GLEE documents combining components by adding flags (130 = 2 + 128), but
/// only a single flag is accepted here.
pub const CHI2_FLAGS: [i64; 8] = [1, 2, 4, 8, 16, 32, 64, 128];

/// Minimiser driving the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Minimiser {
    Siman,
    Mcmc,
}

impl Minimiser {
    pub fn as_str(&self) -> &'static str {
        match self {
            Minimiser::Siman => "siman",
            Minimiser::Mcmc => "mcmc",
        }
    }
}

impl FromStr for Minimiser {
    type Err = InvalidArgument;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "siman" => Ok(Minimiser::Siman),
            "mcmc" => Ok(Minimiser::Mcmc),
            other => Err(InvalidArgument::wrong_value(
                "minimiser",
                format!("minimiser must be 'siman' or 'mcmc' (got '{other}')"),
            )),
        }
    }
}

impl fmt::Display for Minimiser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Header {
    chi2type: i64,
    minimiser: Minimiser,
    seed: i64,
}

impl Header {
    pub fn new(chi2type: i64, minimiser: Minimiser, seed: i64) -> Result<Self, InvalidArgument> {
        if !CHI2_FLAGS.contains(&chi2type) {
            return Err(InvalidArgument::wrong_value(
                "chi2type",
                format!("chi2type must be one of {CHI2_FLAGS:?} (got {chi2type})"),
            ));
        }
        Ok(Self { chi2type, minimiser, seed })
    }

    pub fn chi2type(&self) -> i64 {
        self.chi2type
    }

    pub fn minimiser(&self) -> Minimiser {
        self.minimiser
    }

    pub fn seed(&self) -> i64 {
        self.seed
    }
}

impl Render for Header {
    fn render(&self) -> String {
        format!("chi2type {}\nminimiser {}\nseed {}", self.chi2type, self.minimiser, self.seed)
    }
}
