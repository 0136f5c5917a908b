#![deny(missing_docs)]
#![doc = "Shared error taxonomy, deterministic seeding and schema descriptors for the ntk kernels."]

pub mod errors;
pub mod provenance;
pub mod rng;

pub use errors::{ErrorInfo, NtkError};
pub use provenance::SchemaVersion;
pub use rng::{derive_substream_seed, RngHandle};
