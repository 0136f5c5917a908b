use ntk_ball::{Acb, AcbMat, Arb};
use ntk_core::errors::NtkError;
use ntk_core::SchemaVersion;
use serde::{Deserialize, Serialize};

use crate::dist::dist_a0_with;
use crate::hash::stable_hash_string;
use crate::params::ThetaOpts;

/// Serializable record of one characteristic distance evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistReport {
    /// Schema of this payload.
    pub schema_version: SchemaVersion,
    /// Dimension of the period matrix.
    pub g: usize,
    /// Working precision actually used.
    pub prec: u32,
    /// Distances indexed by characteristic.
    pub distances: Vec<Arb>,
    /// SHA256 of the canonical JSON of every other field.
    pub hash: String,
}

#[derive(Serialize)]
struct HashPayload<'a> {
    schema_version: &'a SchemaVersion,
    g: usize,
    prec: u32,
    distances: &'a [Arb],
}

impl DistReport {
    /// Recomputes the hash from the payload fields.
    pub fn compute_hash(&self) -> Result<String, NtkError> {
        stable_hash_string(&HashPayload {
            schema_version: &self.schema_version,
            g: self.g,
            prec: self.prec,
            distances: &self.distances,
        })
    }

    /// True when the stored hash matches the payload.
    pub fn verify_hash(&self) -> Result<bool, NtkError> {
        Ok(self.compute_hash()? == self.hash)
    }
}

/// Evaluates [`dist_a0_with`] and wraps the result in a hashed report.
pub fn dist_a0_report(z: &[Acb], tau: &AcbMat, opts: &ThetaOpts) -> Result<DistReport, NtkError> {
    let opts = opts.sanitised();
    let distances = dist_a0_with(z, tau, &opts)?;
    let mut report = DistReport {
        schema_version: SchemaVersion::default(),
        g: tau.nrows(),
        prec: opts.prec,
        distances,
        hash: String::new(),
    };
    report.hash = report.compute_hash()?;
    Ok(report)
}
