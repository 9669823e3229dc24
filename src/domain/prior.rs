//! Parameter priors.
//!
//! Every physical parameter in a GLEE model carries a starting value (`mean`)
//! and a prior telling the optimiser how it may move. The prior renders as an
//! inline fragment that follows the value on the parameter's line.

use std::cmp::Ordering;
use std::str::FromStr;

use serde::Serialize;

use super::error::InvalidArgument;
use super::render::Render;

/// Prior distribution family.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PriorKind {
    /// Fixed at `mean`, never sampled.
    Exact,
    /// Uniform on `[lower, upper]`.
    Flat { lower: f64, upper: f64 },
    /// Unconstrained.
    NoPrior,
    /// Normal around `mean`.
    Gaussian { sigma: f64 },
}

impl PriorKind {
    /// GLEE type tag.
    pub fn tag(&self) -> &'static str {
        match self {
            PriorKind::Exact => "exact",
            PriorKind::Flat { .. } => "flat",
            PriorKind::NoPrior => "noprior",
            PriorKind::Gaussian { .. } => "gaussian",
        }
    }
}

/// Prior type name as written in model files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriorType {
    Exact,
    Flat,
    NoPrior,
    Gaussian,
}

impl PriorType {
    pub const ALL: [PriorType; 4] =
        [PriorType::Exact, PriorType::Flat, PriorType::NoPrior, PriorType::Gaussian];

    pub fn as_str(&self) -> &'static str {
        match self {
            PriorType::Exact => "exact",
            PriorType::Flat => "flat",
            PriorType::NoPrior => "noprior",
            PriorType::Gaussian => "gaussian",
        }
    }
}

impl FromStr for PriorType {
    type Err = InvalidArgument;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PriorType::ALL.into_iter().find(|t| t.as_str() == s).ok_or_else(|| {
            InvalidArgument::wrong_value(
                "type",
                format!("unknown prior type '{s}': must be one of exact, flat, noprior, gaussian"),
            )
        })
    }
}

/// A validated prior for one scalar parameter.
///
/// Built through [`Prior::exact`], [`Prior::flat`], [`Prior::no_prior`] or
/// [`Prior::gaussian`]; optional metadata is attached with the `with_*`
/// methods, which consume and return the prior.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prior {
    mean: f64,
    #[serde(flatten)]
    kind: PriorKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    step: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    link: Option<String>,
    #[serde(rename = "a", skip_serializing_if = "Option::is_none")]
    link_a: Option<[f64; 3]>,
}

impl Prior {
    fn with_kind(mean: f64, kind: PriorKind) -> Self {
        Self { mean, kind, label: None, min: None, step: None, link: None, link_a: None }
    }

    pub fn exact(mean: f64) -> Self {
        Self::with_kind(mean, PriorKind::Exact)
    }

    pub fn no_prior(mean: f64) -> Self {
        Self::with_kind(mean, PriorKind::NoPrior)
    }

    /// Flat prior on `[lower, upper]`; requires `lower < upper`.
    pub fn flat(mean: f64, lower: f64, upper: f64) -> Result<Self, InvalidArgument> {
        if lower.partial_cmp(&upper) != Some(Ordering::Less) {
            return Err(InvalidArgument::wrong_value(
                "lower",
                format!("lower bound must be less than upper bound (got {lower} >= {upper})"),
            ));
        }
        Ok(Self::with_kind(mean, PriorKind::Flat { lower, upper }))
    }

    pub fn gaussian(mean: f64, sigma: f64) -> Self {
        Self::with_kind(mean, PriorKind::Gaussian { sigma })
    }

    /// Label used by GLEE to name the parameter. Empty labels are dropped.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        let label = label.into();
        self.label = (!label.is_empty()).then_some(label);
        self
    }

    /// Hard lower bound override.
    pub fn with_min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    pub fn with_step(mut self, step: f64) -> Self {
        self.step = Some(step);
        self
    }

    /// Tie this parameter to the parameter labelled `link`. Empty links are dropped.
    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        let link = link.into();
        self.link = (!link.is_empty()).then_some(link);
        self
    }

    /// Link transform `[a, b, c]` giving `y = a + b·x^c` for a linked value `x`.
    pub fn with_link_transform(mut self, link_a: [f64; 3]) -> Self {
        self.link_a = Some(link_a);
        self
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn kind(&self) -> &PriorKind {
        &self.kind
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn min(&self) -> Option<f64> {
        self.min
    }

    pub fn step(&self) -> Option<f64> {
        self.step
    }

    pub fn link(&self) -> Option<&str> {
        self.link.as_deref()
    }

    pub fn link_transform(&self) -> Option<[f64; 3]> {
        self.link_a
    }

    /// Inline GLEE fragment, e.g. `flat:0.5,1.5 label:q1 step:0.01`.
    pub fn fragment(&self) -> String {
        let params = match self.kind {
            PriorKind::Flat { lower, upper } => format!("{lower},{upper}"),
            PriorKind::Gaussian { sigma } => format!("{},{sigma}", self.mean),
            PriorKind::Exact | PriorKind::NoPrior => String::new(),
        };
        let mut tags = vec![format!("{}:{params}", self.kind.tag())];
        if let Some(label) = &self.label {
            tags.push(format!("label:{label}"));
        }
        if let Some(min) = self.min {
            tags.push(format!("min:{min}"));
        }
        if let Some(step) = self.step {
            tags.push(format!("step:{step}"));
        }
        if let Some(link) = &self.link {
            tags.push(format!("link:{link}"));
        }
        if let Some([a, b, c]) = self.link_a {
            tags.push(format!("a:{a},{b},{c}"));
        }
        tags.join(" ")
    }

    /// `<mean>  <fragment>`, the value column used by source-level parameters.
    pub(crate) fn value_and_fragment(&self) -> String {
        format!("{}  {}", self.mean, self.fragment())
    }
}

impl Render for Prior {
    fn render(&self) -> String {
        self.fragment()
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn exact_renders_bare_tag() {
        assert_eq!(Prior::exact(0.5).fragment(), "exact:");
    }

    #[test]
    fn no_prior_renders_bare_tag() {
        assert_eq!(Prior::no_prior(12.0).fragment(), "noprior:");
    }

    #[test]
    fn flat_renders_bounds() {
        let prior = Prior::flat(1.0, 0.5, 1.5).unwrap();
        assert_eq!(prior.fragment(), "flat:0.5,1.5");
    }

    #[test]
    fn gaussian_renders_mean_and_sigma() {
        let prior = Prior::gaussian(0.8, 0.05);
        assert_eq!(prior.fragment(), "gaussian:0.8,0.05");
    }

    #[test]
    fn gaussian_accepts_non_positive_sigma() {
        assert_eq!(Prior::gaussian(1.0, -2.0).fragment(), "gaussian:1,-2");
    }

    #[test]
    fn flat_rejects_equal_bounds() {
        let err = Prior::flat(1.0, 2.0, 2.0).unwrap_err();
        assert!(err.is_wrong_value());
        assert_eq!(err.field(), "lower");
    }

    #[test]
    fn flat_rejects_nan_bounds() {
        assert!(Prior::flat(1.0, f64::NAN, 2.0).is_err());
    }

    #[test]
    fn metadata_renders_in_fixed_order() {
        let prior = Prior::flat(50.0, 40.0, 60.0)
            .unwrap()
            .with_link_transform([0.0, 1.0, 1.0])
            .with_link("lx")
            .with_step(0.5)
            .with_min(3.0)
            .with_label("sx");
        assert_eq!(prior.fragment(), "flat:40,60 label:sx min:3 step:0.5 link:lx a:0,1,1");
    }

    #[test]
    fn min_tag_present_exactly_once() {
        let fragment = Prior::exact(1.0).with_min(3.0).fragment();
        assert_eq!(fragment.matches("min:3").count(), 1);
    }

    #[test]
    fn empty_label_and_link_are_dropped() {
        let prior = Prior::exact(1.0).with_label("").with_link("");
        assert_eq!(prior.label(), None);
        assert_eq!(prior.link(), None);
        assert_eq!(prior.fragment(), "exact:");
    }

    #[test]
    fn fragment_never_ends_with_whitespace() {
        let fragment = Prior::no_prior(0.0).with_step(0.1).fragment();
        assert_eq!(fragment, "noprior: step:0.1");
        assert!(!fragment.ends_with(' '));
    }

    #[test]
    fn value_and_fragment_puts_mean_first() {
        assert_eq!(Prior::exact(0.5).value_and_fragment(), "0.5  exact:");
    }

    #[test]
    fn prior_type_parses_known_names() {
        assert_eq!("noprior".parse::<PriorType>().unwrap(), PriorType::NoPrior);
        let err = "uniform".parse::<PriorType>().unwrap_err();
        assert!(err.is_wrong_value());
    }

    proptest! {
        #[test]
        fn flat_accepts_exactly_ordered_bounds(lower in -1e6f64..1e6, upper in -1e6f64..1e6) {
            let result = Prior::flat(0.0, lower, upper);
            if lower < upper {
                prop_assert!(result.is_ok());
            } else {
                prop_assert!(result.unwrap_err().is_wrong_value());
            }
        }

        #[test]
        fn optional_tags_appear_iff_set(
            min in proptest::option::of(-100i32..100),
            step in proptest::option::of(1i32..10),
            label in proptest::option::of("[a-z]{1,6}"),
        ) {
            let mut prior = Prior::no_prior(1.0);
            if let Some(min) = min {
                prior = prior.with_min(f64::from(min));
            }
            if let Some(step) = step {
                prior = prior.with_step(f64::from(step));
            }
            if let Some(label) = &label {
                prior = prior.with_label(label.clone());
            }
            let fragment = prior.fragment();
            prop_assert_eq!(fragment.contains("min:"), min.is_some());
            prop_assert_eq!(fragment.contains("step:"), step.is_some());
            prop_assert_eq!(fragment.contains("label:"), label.is_some());
            prop_assert!(!fragment.contains("link:"));
            prop_assert!(!fragment.contains(" a:"));
        }
    }
}
