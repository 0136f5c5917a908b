use std::fs;
use std::path::Path;

use ntk_ball::{effective_prec, MAX_PREC};
use ntk_core::errors::{ErrorInfo, NtkError};
use serde::{Deserialize, Serialize};

use crate::char::MAX_CHAR_DIM;
use crate::serde_io::from_yaml_slice;

/// Options controlling the characteristic distance computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThetaOpts {
    /// Bits kept in the returned enclosures; the work itself runs at full double precision.
    pub prec: u32,
    /// Largest accepted dimension; the work grows like `2^g`.
    pub max_dim: usize,
    /// Largest number of lattice points examined per distance.
    pub max_points: usize,
    /// Worker threads for the characteristic loop; 1 runs inline.
    pub concurrency: usize,
}

impl Default for ThetaOpts {
    fn default() -> Self {
        Self {
            prec: MAX_PREC,
            max_dim: 12,
            max_points: 1 << 16,
            concurrency: 1,
        }
    }
}

impl ThetaOpts {
    /// Default options at the given precision.
    pub fn with_prec(prec: u32) -> Self {
        Self {
            prec,
            ..Self::default()
        }
    }

    /// Returns a copy with every field forced into its valid range.
    pub fn sanitised(&self) -> Self {
        Self {
            prec: effective_prec(self.prec),
            max_dim: self.max_dim.min(MAX_CHAR_DIM),
            max_points: self.max_points.max(1),
            concurrency: self.concurrency.max(1),
        }
    }
}

/// Parses options from YAML; absent fields take their defaults.
pub fn opts_from_yaml(data: &[u8]) -> Result<ThetaOpts, NtkError> {
    let opts: ThetaOpts = from_yaml_slice(data)?;
    Ok(opts.sanitised())
}

/// Loads options from a YAML file.
pub fn load_opts(path: &Path) -> Result<ThetaOpts, NtkError> {
    let data = fs::read(path).map_err(|err| {
        NtkError::Serde(
            ErrorInfo::new("opts-read", err.to_string()).with_context("path", path.display()),
        )
    })?;
    opts_from_yaml(&data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitised_clamps_every_field() {
        let opts = ThetaOpts {
            prec: 500,
            max_dim: 100,
            max_points: 0,
            concurrency: 0,
        }
        .sanitised();
        assert_eq!(opts.prec, 53);
        assert_eq!(opts.max_dim, MAX_CHAR_DIM);
        assert_eq!(opts.max_points, 1);
        assert_eq!(opts.concurrency, 1);
    }

    #[test]
    fn yaml_fills_missing_fields() {
        let opts = opts_from_yaml(b"prec: 24\nconcurrency: 4\n").unwrap();
        assert_eq!(opts.prec, 24);
        assert_eq!(opts.concurrency, 4);
        assert_eq!(opts.max_dim, ThetaOpts::default().max_dim);
    }

    #[test]
    fn malformed_yaml_is_a_serde_error() {
        let err = opts_from_yaml(b"prec: [1, 2").unwrap_err();
        assert_eq!(err.code(), "yaml-deserialize");
    }
}
