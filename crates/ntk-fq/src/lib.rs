#![deny(missing_docs)]
#![doc = "Finite fields F_q with q at most 2^20, elements stored as discrete logarithms and addition driven by a Zech logarithm table."]

/// Field construction and conversions.
pub mod ctx;
/// Element arithmetic.
pub mod elem;

pub use ctx::{FqZechCtx, MAX_ORDER};
pub use elem::FqZech;
