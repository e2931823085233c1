//! Default naming conventions and a static ambient scope.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use folio_core::{
    application::ports::PathConvention,
    domain::{AmbientScope, Member, ViewContext},
};

/// Rails-flavored object-to-path convention with naive pluralization.
///
/// `NewsArticle` → `news_articles/news_article`: the directory is the
/// snake_cased type name with a trailing `s` (no irregular-plural
/// dictionary; `address` becomes `addresss`, which hosts with such models
/// fix by supplying their own convention).
#[derive(Debug, Clone, Copy, Default)]
pub struct NaivePluralConvention;

impl NaivePluralConvention {
    pub fn new() -> Self {
        Self
    }
}

impl PathConvention for NaivePluralConvention {
    fn partial_reference(&self, member: &Member, _view: &ViewContext) -> String {
        let variable = member.variable_name();
        format!("{variable}s/{variable}")
    }
}

/// An [`AmbientScope`] over a fixed name and value table.
///
/// Suits CLIs and tests, where the "surrounding framework" is a flag or a
/// fixture rather than a live controller.
#[derive(Debug, Clone, Default)]
pub struct StaticScope {
    name: Option<String>,
    values: HashMap<String, Value>,
}

impl StaticScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            values: HashMap::new(),
        }
    }

    /// Bind an ambient value.
    pub fn with_value(mut self, name: impl Into<String>, value: Value) -> Self {
        self.values.insert(name.into(), value);
        self
    }

    /// Finish into a view context.
    pub fn into_view(self) -> ViewContext {
        ViewContext::with_scope(Arc::new(self))
    }
}

impl AmbientScope for StaticScope {
    fn scope_name(&self) -> Option<String> {
        self.name.clone()
    }

    fn lookup_value(&self, name: &str) -> Option<Value> {
        self.values.get(name).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn naive_plural_shapes_the_reference() {
        let convention = NaivePluralConvention::new();
        let member = Member::new("NewsArticle", json!({}));
        assert_eq!(
            convention.partial_reference(&member, &ViewContext::new()),
            "news_articles/news_article"
        );
    }

    #[test]
    fn static_scope_exposes_name_and_values() {
        let view = StaticScope::named("admin")
            .with_value("account", json!("a1"))
            .into_view();

        assert_eq!(view.scope_name(), Some("admin".into()));
        assert_eq!(view.lookup_value("account"), Some(json!("a1")));
        assert_eq!(view.lookup_value("other"), None);
    }
}
