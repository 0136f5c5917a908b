#![deny(missing_docs)]
#![doc = "Certified lower bounds on the lattice distances that govern theta function summation, one per theta characteristic."]

/// Theta characteristics.
pub mod char;
/// Lattice distances and the characteristic loop.
pub mod dist;
/// Cholesky factor and ellipsoid enumeration.
pub mod eld;
/// Canonical hashing helpers.
pub mod hash;
/// Evaluation options.
pub mod params;
/// Hashed distance reports.
pub mod report;
/// Serde helpers for JSON and YAML artefacts.
#[path = "serde.rs"]
pub mod serde_io;

pub use crate::char::{char_bits, char_count, char_from_bits, char_get_arb, char_toggle, half_offsets};
pub use dist::{dist_a0, dist_a0_with, dist_lat, dist_lat_capped, dist_pt, dist_ubound};
pub use eld::{eld_cho, lattice_points};
pub use params::{load_opts, opts_from_yaml, ThetaOpts};
pub use report::{dist_a0_report, DistReport};
