#![deny(missing_docs)]
#![doc = "Arithmetic modulo word-size integers and dense polynomials over Z/nZ with schoolbook and Karatsuba products, Euclidean division, modular powering and composition."]

/// Word-size modular arithmetic.
pub mod ctx;
/// Dense polynomials.
pub mod poly;
/// Text form of polynomials.
pub mod text;

pub use ctx::NmodCtx;
pub use poly::{NmodPoly, KARATSUBA_CUTOFF};
