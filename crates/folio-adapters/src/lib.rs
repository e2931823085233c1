//! Infrastructure adapters for Folio.
//!
//! This crate implements the ports defined in `folio-core` (both the
//! application-layer ports and the domain-defined capability traits). It
//! contains all external dependencies and I/O operations.

pub mod backend;
pub mod convention;
pub mod extensions;
pub mod instrument;
pub mod template_files;

// Re-export commonly used adapters
pub use backend::SubstitutionBackend;
pub use convention::{NaivePluralConvention, StaticScope};
pub use extensions::StaticExtensions;
pub use instrument::TracingInstrumentation;
pub use template_files::{LocalTemplateFiles, MemoryTemplateFiles};
