//! Per-render variable bindings.
//!
//! A [`Locals`] mapping is the execution context handed to the render
//! backend: symbolic variable name → structured value. It is a **Value
//! Object** scoped to exactly one render invocation.
//!
//! ## Ownership discipline
//!
//! A `Locals` instance is owned by the render call that created it and is
//! never shared across concurrent renders. Collection rendering does *not*
//! mutate-and-restore one shared mapping between iterations; it clones a
//! fresh mapping per element instead. The clone is a few map entries — cheap
//! next to a backend execution — and it makes cross-iteration key leakage
//! structurally impossible rather than a cleanup obligation.
//!
//! ## Reserved keys
//!
//! | Key | Meaning |
//! |-----|---------|
//! | `object` | The primary bound value when rendering a partial |
//! | `<name>_counter` | Zero-based element index during collection rendering |

use std::collections::HashMap;

use serde_json::Value;

/// The reserved key under which the primary bound object is always
/// available inside a partial.
pub const OBJECT_KEY: &str = "object";

/// Variable bindings for one render invocation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Locals {
    /// Using `HashMap` (not `BTreeMap`) because:
    /// - Order doesn't matter for lookup-driven substitution
    /// - O(1) lookup for variable resolution
    values: HashMap<String, Value>,
}

impl Locals {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a binding, replacing any previous value under the same name.
    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        self.values.insert(name.into(), value);
    }

    /// Fluent variant of `insert` for builder chains.
    ///
    /// ```rust
    /// use folio_core::domain::Locals;
    /// use serde_json::json;
    ///
    /// let locals = Locals::new()
    ///     .with("title", json!("Hello"))
    ///     .with("count", json!(3));
    /// assert_eq!(locals.len(), 2);
    /// ```
    pub fn with(mut self, name: impl Into<String>, value: Value) -> Self {
        self.insert(name, value);
        self
    }

    /// Look up a binding.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// True if a binding exists under `name` (even when bound to null).
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over all bindings in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterate over bound names in unspecified order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(|s| s.as_str())
    }
}

impl FromIterator<(String, Value)> for Locals {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}
