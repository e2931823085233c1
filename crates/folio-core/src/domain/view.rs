//! View context: the ambient environment a template renders inside.
//!
//! The original design this engine descends from let templates reach into
//! their controller by reflection to pull out instance-scoped values and the
//! current controller path. Here that is an explicit capability instead:
//! the host framework hands the engine an [`AmbientScope`] implementation
//! and the engine only ever calls through the trait.

use std::sync::Arc;

use serde_json::Value;

/// Capability interface for the surrounding framework's naming scope.
///
/// This is a **driven port** defined in the domain (the domain dictates the
/// shape; the host implements it). Both methods are optional behaviors —
/// a bare view context without a scope simply answers `None` to everything.
pub trait AmbientScope: Send + Sync {
    /// The current scope name, used as the default directory when a bare
    /// reference (`"account"`) needs a home (`"admin/_account"`).
    fn scope_name(&self) -> Option<String>;

    /// Look up an instance-scoped value by conventional name.
    ///
    /// Called when a partial is rendered without an explicit object: a
    /// partial bound as `account` asks the scope for a value named
    /// `account` before falling back to null.
    fn lookup_value(&self, name: &str) -> Option<Value>;
}

/// The ambient environment for one render call.
///
/// Cheap to clone (one `Arc`); independent view contexts are expected per
/// concurrent render call.
#[derive(Clone, Default)]
pub struct ViewContext {
    scope: Option<Arc<dyn AmbientScope>>,
}

impl ViewContext {
    /// A view context with no ambient scope: bare references resolve at the
    /// search-path root and ambient lookups always miss.
    pub fn new() -> Self {
        Self::default()
    }

    /// A view context backed by a host-provided scope.
    pub fn with_scope(scope: Arc<dyn AmbientScope>) -> Self {
        Self { scope: Some(scope) }
    }

    /// Current scope name, if a scope is attached and it has one.
    pub fn scope_name(&self) -> Option<String> {
        self.scope.as_ref().and_then(|s| s.scope_name())
    }

    /// Ambient value lookup, if a scope is attached.
    pub fn lookup_value(&self, name: &str) -> Option<Value> {
        self.scope.as_ref().and_then(|s| s.lookup_value(name))
    }
}

impl std::fmt::Debug for ViewContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewContext")
            .field("scope", &self.scope.as_ref().map(|s| s.scope_name()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct FixedScope;

    impl AmbientScope for FixedScope {
        fn scope_name(&self) -> Option<String> {
            Some("admin".into())
        }

        fn lookup_value(&self, name: &str) -> Option<Value> {
            (name == "account").then(|| json!({"id": 7}))
        }
    }

    #[test]
    fn bare_context_answers_none() {
        let view = ViewContext::new();
        assert_eq!(view.scope_name(), None);
        assert_eq!(view.lookup_value("anything"), None);
    }

    #[test]
    fn scoped_context_delegates() {
        let view = ViewContext::with_scope(Arc::new(FixedScope));
        assert_eq!(view.scope_name(), Some("admin".into()));
        assert_eq!(view.lookup_value("account"), Some(json!({"id": 7})));
        assert_eq!(view.lookup_value("other"), None);
    }
}
