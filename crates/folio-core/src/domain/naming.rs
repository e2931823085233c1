//! Naming-convention helpers for variable binding.
//!
//! Partial rendering binds objects into locals under names derived from
//! identifiers of wildly different shapes: template base names (`_account`),
//! type names (`NewsArticle`, `XMLHttpRequest`), builder type names
//! (`FormBuilder`). Everything funnels through snake_case because that is
//! what a template author writes in a locals lookup.

/// The leading marker that distinguishes a partial template from a
/// directly-renderable one (`_account` vs `index`).
pub const PARTIAL_MARKER: char = '_';

/// Convert an identifier to snake_case.
///
/// ## Rules
///
/// 1. Split on word boundaries (see `split_words`)
/// 2. Join with `_`
/// 3. Lowercase everything
///
/// ## Examples
///
/// | Input | Output |
/// |-------|--------|
/// | "NewsArticle" | "news_article" |
/// | "news-article" | "news_article" |
/// | "HTTPRequest" | "http_request" |
/// | "XMLHttpRequest" | "xml_http_request" |
pub fn to_snake_case(s: &str) -> String {
    split_words(s).join("_")
}

/// Derive the conventional local-variable name for a domain object's type.
///
/// Currently an alias for [`to_snake_case`]; kept as its own entry point so
/// the binding convention has one name at call sites.
pub fn variable_for_type(type_name: &str) -> String {
    to_snake_case(type_name)
}

/// Derive the conventional reference name for a form-builder-like type.
///
/// The trailing `Builder` suffix is stripped after snake_casing, so
/// `FormBuilder` renders the `form` partial with the builder bound as
/// `form`. A type named exactly `Builder` keeps its name rather than
/// collapsing to the empty string.
pub fn builder_reference(type_name: &str) -> String {
    let snake = to_snake_case(type_name);
    match snake.strip_suffix("_builder") {
        Some(stripped) if !stripped.is_empty() => stripped.to_string(),
        _ => snake,
    }
}

/// Derive the local-variable name bound by a path-shaped reference.
///
/// Takes the final path segment, drops any dot-suffix (format/extension
/// residue), and strips a leading partial marker: `shared/_header.html`
/// binds `header`.
pub fn variable_for_reference(reference: &str) -> String {
    let segment = reference.rsplit('/').next().unwrap_or(reference);
    let bare = segment.split('.').next().unwrap_or(segment);
    bare.trim_start_matches(PARTIAL_MARKER).to_string()
}

/// The per-item index key used during collection rendering:
/// `<variable>_counter`.
pub fn counter_key(variable_name: &str) -> String {
    format!("{variable_name}_counter")
}

/// Split a string into words based on casing and separators.
///
/// ## Word Boundary Detection
///
/// 1. **Explicit separators:** `_`, `-`, whitespace → always split
/// 2. **Case transition (camelCase):** `aB` → split between `a` and `B`
/// 3. **Acronym boundary:** `HTTPRequest` → split between `P` and `R`
///    (detected by `Upper Upper Lower` pattern)
fn split_words(input: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();

    // Peekable allows looking ahead for boundary detection without consuming
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        // Rule 1: Explicit separators always end the current word
        if c == '_' || c == '-' || c.is_whitespace() {
            if !current.is_empty() {
                words.push(current.to_lowercase());
                current.clear();
            }
            continue;
        }

        if let Some(next) = chars.peek() {
            // Rule 2: camelCase transition (lowercase -> uppercase)
            if c.is_lowercase() && next.is_uppercase() {
                current.push(c);
                words.push(current.to_lowercase());
                current.clear();
                continue;
            }

            // Rule 3: Acronym boundary detection
            // "HTTPServer" → "HTTP" + "Server"
            if c.is_uppercase()
                && next.is_uppercase()
                && chars.clone().nth(1).is_some_and(|n| n.is_lowercase())
            {
                current.push(c);
                words.push(current.to_lowercase());
                current.clear();
                continue;
            }
        }

        current.push(c);
    }

    // Don't forget the last word
    if !current.is_empty() {
        words.push(current.to_lowercase());
    }

    words
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snake_case_handles_common_shapes() {
        assert_eq!(to_snake_case("NewsArticle"), "news_article");
        assert_eq!(to_snake_case("news-article"), "news_article");
        assert_eq!(to_snake_case("HTTPRequest"), "http_request");
        assert_eq!(to_snake_case("XMLHttpRequest"), "xml_http_request");
        assert_eq!(to_snake_case("account"), "account");
    }

    #[test]
    fn builder_reference_strips_suffix() {
        assert_eq!(builder_reference("FormBuilder"), "form");
        assert_eq!(builder_reference("SearchFormBuilder"), "search_form");
        // No suffix: passes through
        assert_eq!(builder_reference("Form"), "form");
        // Degenerate: a bare "Builder" keeps its name
        assert_eq!(builder_reference("Builder"), "builder");
    }

    #[test]
    fn variable_for_reference_uses_final_segment() {
        assert_eq!(variable_for_reference("account"), "account");
        assert_eq!(variable_for_reference("shared/header"), "header");
        assert_eq!(variable_for_reference("shared/_header"), "header");
        assert_eq!(variable_for_reference("shared/header.html"), "header");
        assert_eq!(variable_for_reference("a/b/item.html.erb"), "item");
    }

    #[test]
    fn counter_key_suffix() {
        assert_eq!(counter_key("ad"), "ad_counter");
        assert_eq!(counter_key("news_article"), "news_article_counter");
    }
}
