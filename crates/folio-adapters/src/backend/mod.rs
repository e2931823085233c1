//! Render backend adapters.

mod substitution;

pub use substitution::{SubstitutionBackend, SubstitutionError};
