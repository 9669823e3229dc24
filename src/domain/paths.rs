use std::fmt;

use serde::Serialize;

use super::error::InvalidArgument;

/// A path to a FITS image, stored verbatim and never opened.
///
/// Guarantees:
/// - Ends in `.fits`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct FitsPath(String);

impl FitsPath {
    /// Validate `path` as the FITS file for `field`.
    pub fn new(field: &str, path: impl Into<String>) -> Result<Self, InvalidArgument> {
        let path = path.into();
        if !path.ends_with(".fits") {
            return Err(InvalidArgument::wrong_type(
                field,
                format!("must be a .fits file path (got '{path}')"),
            ));
        }
        Ok(Self(path))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for FitsPath {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for FitsPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A path to a sampling covariance matrix file.
///
/// Guarantees:
/// - Ends in `.cov`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct CovPath(String);

impl CovPath {
    pub fn new(field: &str, path: impl Into<String>) -> Result<Self, InvalidArgument> {
        let path = path.into();
        if !path.ends_with(".cov") {
            return Err(InvalidArgument::wrong_value(
                field,
                format!("must be a path to a .cov file (got '{path}')"),
            ));
        }
        Ok(Self(path))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CovPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
