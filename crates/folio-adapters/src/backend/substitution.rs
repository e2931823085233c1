//! Simple variable substitution backend.
//!
//! Templates are plain text with `{{ name }}` tokens looked up in the
//! render locals. The source is split into literal/variable segments once
//! at compile time; execution is a single pass over the segments, which is
//! what the descriptor cache expects from a compiled form.

use serde_json::Value;
use thiserror::Error;
use tracing::instrument;

use folio_core::{
    application::ports::{RenderBackend, TemplateMeta},
    domain::{BackendError, CompiledTemplate, Locals, ViewContext},
};

/// Compile-time errors for the substitution language.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubstitutionError {
    #[error("unclosed variable token starting at byte {offset}")]
    UnclosedToken { offset: usize },

    #[error("empty variable token at byte {offset}")]
    EmptyToken { offset: usize },
}

/// Render backend using basic variable substitution.
#[derive(Debug, Clone, Copy)]
pub struct SubstitutionBackend;

impl SubstitutionBackend {
    /// Create a new substitution backend.
    pub fn new() -> Self {
        Self
    }
}

impl Default for SubstitutionBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderBackend for SubstitutionBackend {
    #[instrument(skip(self, source, meta), fields(template = %meta.identifier))]
    fn compile(
        &self,
        source: &str,
        meta: &TemplateMeta,
    ) -> Result<Box<dyn CompiledTemplate>, BackendError> {
        let segments = parse_segments(source)?;
        Ok(Box::new(Compiled { segments }))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Variable(String),
}

struct Compiled {
    segments: Vec<Segment>,
}

impl CompiledTemplate for Compiled {
    fn execute(&self, locals: &Locals, _view: &ViewContext) -> Result<String, BackendError> {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Variable(name) => match locals.get(name) {
                    Some(value) => out.push_str(&render_value(value)),
                    // Unbound names stay as literal tokens so a typo is
                    // visible in the output rather than silently blank.
                    None => out.push_str(&format!("{{{{{name}}}}}")),
                },
            }
        }
        Ok(out)
    }
}

fn render_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        // Structured values render as compact JSON
        other => other.to_string(),
    }
}

fn parse_segments(source: &str) -> Result<Vec<Segment>, SubstitutionError> {
    let mut segments = Vec::new();
    let mut rest = source;
    let mut offset = 0;

    while let Some(open) = rest.find("{{") {
        if open > 0 {
            segments.push(Segment::Literal(rest[..open].to_string()));
        }
        let after_open = &rest[open + 2..];
        let close = after_open
            .find("}}")
            .ok_or(SubstitutionError::UnclosedToken {
                offset: offset + open,
            })?;

        let name = after_open[..close].trim();
        if name.is_empty() {
            return Err(SubstitutionError::EmptyToken {
                offset: offset + open,
            });
        }
        segments.push(Segment::Variable(name.to_string()));

        offset += open + 2 + close + 2;
        rest = &after_open[close + 2..];
    }

    if !rest.is_empty() {
        segments.push(Segment::Literal(rest.to_string()));
    }

    Ok(segments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn meta() -> TemplateMeta {
        TemplateMeta {
            identifier: "_t.html.erb".into(),
            format: Some("html".into()),
            extension: Some("erb".into()),
        }
    }

    fn render(source: &str, locals: &Locals) -> String {
        let compiled = SubstitutionBackend::new().compile(source, &meta()).unwrap();
        compiled.execute(locals, &ViewContext::new()).unwrap()
    }

    #[test]
    fn substitutes_bound_variables() {
        let locals = Locals::new()
            .with("name", json!("world"))
            .with("n", json!(3));
        assert_eq!(render("hello {{name}} x{{ n }}", &locals), "hello world x3");
    }

    #[test]
    fn null_renders_empty_but_unbound_stays_visible() {
        let locals = Locals::new().with("bound", Value::Null);
        assert_eq!(
            render("[{{bound}}][{{unbound}}]", &locals),
            "[][{{unbound}}]"
        );
    }

    #[test]
    fn structured_values_render_as_json() {
        let locals = Locals::new().with("obj", json!({"id": 7}));
        assert_eq!(render("{{obj}}", &locals), r#"{"id":7}"#);
    }

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(render("no tokens here", &Locals::new()), "no tokens here");
    }

    #[test]
    fn unclosed_token_fails_compile() {
        let err = SubstitutionBackend::new()
            .compile("abc {{name", &meta())
            .map(|_| ())
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "unclosed variable token starting at byte 4"
        );
    }

    #[test]
    fn empty_token_fails_compile() {
        let err = SubstitutionBackend::new()
            .compile("{{  }}", &meta())
            .map(|_| ())
            .unwrap_err();
        assert!(err.to_string().contains("empty variable token"));
    }
}
