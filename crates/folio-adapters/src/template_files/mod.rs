//! Template file access adapters.

mod local;
mod memory;

pub use local::LocalTemplateFiles;
pub use memory::MemoryTemplateFiles;
