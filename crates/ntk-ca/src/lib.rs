#![deny(missing_docs)]
#![doc = "Exact numbers tagged with their field, and tri-state equality that never claims more than the available information proves."]

/// Numbers and the equality predicate.
pub mod ca;
/// Three-valued truth.
pub mod truth;

pub use ca::{check_equal, Ca};
pub use truth::Truth;
