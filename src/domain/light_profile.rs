//! Light profiles attached to an extended source.

use serde::Serialize;

use super::error::InvalidArgument;
use super::prior::Prior;
use super::render::Render;

/// Variant-specific parameters of a light profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "profile", rename_all = "lowercase")]
pub enum Shape {
    /// Point-spread-function component; position and amplitude only.
    Psf,
    Sersic { q: Prior, pa: Prior, r_eff: Prior, n_sersic: Prior },
    Gaussian { q: Prior, pa: Prior, sigma: Prior },
    Moffat { q: Prior, pa: Prior, alpha: Prior, beta: Prior },
    Piemd { q: Prior, pa: Prior, w: Prior },
}

impl Shape {
    /// Keyword opening the profile block in GLEE.
    pub fn keyword(&self) -> &'static str {
        match self {
            Shape::Psf => "psf",
            Shape::Sersic { .. } => "sersic",
            Shape::Gaussian { .. } => "gaussian",
            Shape::Moffat { .. } => "moffat",
            Shape::Piemd { .. } => "piemd",
        }
    }
}

/// A validated 2D brightness component.
///
/// Every variant shares a position (`x`, `y`) and a non-negative amplitude.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LightProfile {
    x: Prior,
    y: Prior,
    amp: Prior,
    #[serde(flatten)]
    shape: Shape,
}

impl LightProfile {
    fn new(x: Prior, y: Prior, amp: Prior, shape: Shape) -> Result<Self, InvalidArgument> {
        if amp.mean().is_nan() || amp.mean() < 0.0 {
            return Err(InvalidArgument::wrong_value(
                "amp",
                format!("amp must be positive (got {})", amp.mean()),
            ));
        }
        Ok(Self { x, y, amp, shape })
    }

    pub fn psf(x: Prior, y: Prior, amp: Prior) -> Result<Self, InvalidArgument> {
        Self::new(x, y, amp, Shape::Psf)
    }

    pub fn sersic(
        x: Prior,
        y: Prior,
        amp: Prior,
        q: Prior,
        pa: Prior,
        r_eff: Prior,
        n_sersic: Prior,
    ) -> Result<Self, InvalidArgument> {
        Self::new(x, y, amp, Shape::Sersic { q, pa, r_eff, n_sersic })
    }

    pub fn gaussian(
        x: Prior,
        y: Prior,
        amp: Prior,
        q: Prior,
        pa: Prior,
        sigma: Prior,
    ) -> Result<Self, InvalidArgument> {
        Self::new(x, y, amp, Shape::Gaussian { q, pa, sigma })
    }

    pub fn moffat(
        x: Prior,
        y: Prior,
        amp: Prior,
        q: Prior,
        pa: Prior,
        alpha: Prior,
        beta: Prior,
    ) -> Result<Self, InvalidArgument> {
        Self::new(x, y, amp, Shape::Moffat { q, pa, alpha, beta })
    }

    pub fn piemd(
        x: Prior,
        y: Prior,
        amp: Prior,
        q: Prior,
        pa: Prior,
        w: Prior,
    ) -> Result<Self, InvalidArgument> {
        Self::new(x, y, amp, Shape::Piemd { q, pa, w })
    }

    pub fn x(&self) -> &Prior {
        &self.x
    }

    pub fn y(&self) -> &Prior {
        &self.y
    }

    pub fn amp(&self) -> &Prior {
        &self.amp
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn keyword(&self) -> &'static str {
        self.shape.keyword()
    }

    /// Parameters in GLEE line order, each with its comment tag.
    pub fn parameters(&self) -> Vec<(&'static str, &Prior)> {
        let mut params = vec![("x-coord", &self.x), ("y-coord", &self.y)];
        match &self.shape {
            Shape::Psf => params.push(("amp", &self.amp)),
            Shape::Sersic { q, pa, r_eff, n_sersic } => {
                params.extend([("q", q), ("PA", pa), ("amp", &self.amp)]);
                params.extend([("r_eff", r_eff), ("n_sersic", n_sersic)]);
            }
            Shape::Gaussian { q, pa, sigma } => {
                params.extend([("q", q), ("PA", pa), ("amp", &self.amp), ("sigma", sigma)]);
            }
            Shape::Moffat { q, pa, alpha, beta } => {
                params.extend([("q", q), ("PA", pa), ("amp", &self.amp)]);
                params.extend([("alpha", alpha), ("beta", beta)]);
            }
            Shape::Piemd { q, pa, w } => {
                params.extend([("q", q), ("PA", pa), ("amp", &self.amp), ("w", w)]);
            }
        }
        params
    }
}

impl Render for LightProfile {
    fn render(&self) -> String {
        let mut lines = vec![self.keyword().to_string()];
        for (tag, prior) in self.parameters() {
            lines.push(format!("{}  #{tag}   {}", prior.mean(), prior.fragment()));
        }
        lines.join("\n")
    }
}
