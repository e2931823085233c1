//! Domain layer: pure template-identity and binding logic.
//!
//! Everything in this layer is deterministic and free of I/O. Parsing a
//! path, deriving variable names, building a descriptor's memoized views —
//! given the same inputs these always produce the same outputs, which is
//! what makes the layer trivially testable without fixtures or mocks.
//!
//! The traits defined here ([`ExtensionRegistry`], [`AmbientScope`],
//! [`CompiledTemplate`]) are driven ports: the domain dictates their shape
//! because domain logic needs the capability, but implementations live
//! with the adapters.
//!
//! ## Module map
//!
//! | Module | Holds |
//! |--------|-------|
//! | [`descriptor`] | Path grammar, [`TemplateDescriptor`], its builder |
//! | [`reference`] | [`PartialRef`] dispatch enum, [`Member`] |
//! | [`locals`] | Per-render variable bindings |
//! | [`view`] | Ambient render environment |
//! | [`naming`] | snake_case and binding-name conventions |
//! | [`error`] | [`DomainError`] taxonomy |

pub mod descriptor;
pub mod error;
pub mod locals;
pub mod naming;
pub mod reference;
pub mod view;

pub use descriptor::{
    BackendError, CompiledTemplate, DescriptorBuilder, ExtensionRegistry, PathParts,
    TemplateDescriptor,
};
pub use error::{DomainError, ErrorCategory};
pub use locals::{Locals, OBJECT_KEY};
pub use naming::PARTIAL_MARKER;
pub use reference::{Member, PartialRef};
pub use view::{AmbientScope, ViewContext};
