#![deny(missing_docs)]
#![doc = "p-adic numbers at fixed absolute precision over arbitrary-size primes, with the p-adic logarithm summed by two interchangeable strategies."]

/// Prime and precision contexts.
pub mod ctx;
/// The logarithm series.
pub mod log;
/// p-adic values.
pub mod padic;

pub use ctx::{is_probable_prime, PadicCtx, MAX_PRECISION};
pub use log::{
    log_bound, log_series_paired, log_series_straight, uses_straight_summation, LOG_BOUND_LIMIT,
};
pub use padic::Padic;
