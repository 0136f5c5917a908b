#![deny(missing_docs)]
#![doc = "Certified midpoint-radius arithmetic: real and complex balls, vectors and dense matrices with certified inverse and Cholesky factorisation."]

/// Complex balls.
pub mod acb;
/// Complex ball matrices.
pub mod acb_mat;
/// Real balls.
pub mod arb;
/// Directed rounding primitives.
pub mod mag;
/// Real ball matrices.
pub mod mat;
/// Slice helpers.
pub mod vec;

pub use acb::Acb;
pub use acb_mat::AcbMat;
pub use arb::Arb;
pub use mag::{effective_prec, MAX_PREC, MIN_PREC};
pub use mat::ArbMat;
pub use vec::{
    acb_vec_imag, acb_vec_real, vec_add, vec_contains, vec_dot, vec_is_finite,
    vec_scalar_mul_2exp, vec_sub,
};
