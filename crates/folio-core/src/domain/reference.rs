//! Partial references: the closed set of things a caller may ask to render.
//!
//! The original engine accepted "anything" as a partial reference and probed
//! it at runtime (is it a string? does it respond to an enumeration method?
//! does it look like a form builder?). That duck-typed dispatch is replaced
//! by an explicit enum: callers say what they mean, the binder matches on
//! it, and an unsupported shape is unrepresentable instead of a runtime
//! surprise.

use serde_json::Value;

use super::naming;

/// A domain value paired with the type name its rendering conventions
/// derive from.
///
/// Values cross the engine boundary as structured JSON; the type name is
/// what a host framework would call the value's class (`NewsArticle`), and
/// it drives both partial-path derivation and local-variable naming.
#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    model_name: String,
    value: Value,
}

impl Member {
    pub fn new(model_name: impl Into<String>, value: Value) -> Self {
        Self {
            model_name: model_name.into(),
            value,
        }
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn into_value(self) -> Value {
        self.value
    }

    /// The conventional local-variable name for this member's type:
    /// `NewsArticle` binds as `news_article`.
    pub fn variable_name(&self) -> String {
        naming::variable_for_type(&self.model_name)
    }
}

/// What a caller may hand to the binder as "the partial to render".
///
/// | Variant | Example | Dispatch |
/// |---------|---------|----------|
/// | `Path` | `"shared/header"` | render that partial directly |
/// | `Default` | — | derive the reference from the ambient scope name |
/// | `Object` | a `Member` | derive the path from its model name |
/// | `Collection` | `Vec<Member>` | render the member partial per element |
/// | `Builder` | a form-builder type name | strip `Builder`, render that partial |
#[derive(Debug, Clone, PartialEq)]
pub enum PartialRef {
    /// A literal template reference, relative to the search paths.
    Path(String),
    /// No reference at all: the ambient naming scope's current name is the
    /// reference. Fails when the view context carries no scope.
    Default,
    /// A single domain object; the path comes from the path convention.
    Object(Member),
    /// A homogeneous-by-convention sequence of domain objects.
    Collection(Vec<Member>),
    /// A form-builder-like value: `FormBuilder` renders the `form` partial
    /// with the builder's payload bound as `form`.
    Builder(Member),
}

impl PartialRef {
    pub fn path(reference: impl Into<String>) -> Self {
        Self::Path(reference.into())
    }

    pub fn object(model_name: impl Into<String>, value: Value) -> Self {
        Self::Object(Member::new(model_name, value))
    }

    pub fn builder(type_name: impl Into<String>, value: Value) -> Self {
        Self::Builder(Member::new(type_name, value))
    }
}

impl From<&str> for PartialRef {
    fn from(reference: &str) -> Self {
        Self::Path(reference.to_string())
    }
}

impl From<String> for PartialRef {
    fn from(reference: String) -> Self {
        Self::Path(reference)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn member_variable_name_is_snake_cased_type() {
        let member = Member::new("NewsArticle", json!({"id": 1}));
        assert_eq!(member.variable_name(), "news_article");
    }

    #[test]
    fn path_ref_from_str() {
        let r: PartialRef = "shared/header".into();
        assert_eq!(r, PartialRef::Path("shared/header".into()));
    }
}
