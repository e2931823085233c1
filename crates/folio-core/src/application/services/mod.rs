//! Application services - the engine's use cases.

pub mod binder;
pub mod resolver;

pub use binder::{derive_path_pieces, PartialBinder, RenderOptions};
pub use resolver::{TemplateEntry, TemplateResolver};
