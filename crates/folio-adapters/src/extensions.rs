//! Fixed extension registry.

use std::collections::HashSet;

use folio_core::domain::ExtensionRegistry;

/// Extension registry over a fixed token set.
///
/// The set is sealed at construction; the parse grammar treats registry
/// membership as a stable fact, so there is deliberately no way to add
/// tokens to a live registry.
#[derive(Debug, Clone)]
pub struct StaticExtensions {
    tokens: HashSet<String>,
}

impl StaticExtensions {
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tokens: tokens.into_iter().map(Into::into).collect(),
        }
    }

    /// The stock handler set: `erb`.
    pub fn with_defaults() -> Self {
        Self::new(["erb"])
    }
}

impl ExtensionRegistry for StaticExtensions {
    fn is_registered(&self, token: &str) -> bool {
        self.tokens.contains(token)
    }
}
