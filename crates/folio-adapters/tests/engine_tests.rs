//! Full-stack engine tests: real files, real substitution backend.

use std::fs;
use std::sync::Arc;

use serde_json::json;
use tempfile::TempDir;

use folio_adapters::{
    LocalTemplateFiles, NaivePluralConvention, StaticExtensions, StaticScope,
    SubstitutionBackend, TracingInstrumentation,
};
use folio_core::{
    application::{PartialBinder, RenderOptions, TemplateResolver},
    domain::{Locals, Member, PartialRef, ViewContext},
};

fn fixture(files: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().unwrap();
    for (path, content) in files {
        let full = dir.path().join(path);
        fs::create_dir_all(full.parent().unwrap()).unwrap();
        fs::write(full, content).unwrap();
    }
    dir
}

fn engine(dir: &TempDir) -> (Arc<TemplateResolver>, PartialBinder) {
    let resolver = Arc::new(TemplateResolver::new(
        Box::new(LocalTemplateFiles::new()),
        Box::new(SubstitutionBackend::new()),
        Arc::new(StaticExtensions::with_defaults()),
        vec![dir.path().to_path_buf()],
    ));
    let binder = PartialBinder::new(
        Arc::clone(&resolver),
        Box::new(NaivePluralConvention::new()),
        Box::new(TracingInstrumentation::new()),
    );
    (resolver, binder)
}

#[test]
fn renders_a_partial_from_disk_with_bound_locals() {
    let dir = fixture(&[("shared/_header.html.erb", "<h1>{{header}}</h1>")]);
    let (_, binder) = engine(&dir);

    let out = binder
        .render_reference(
            &ViewContext::new(),
            &PartialRef::path("shared/header.html.erb"),
            &RenderOptions::new().object(json!("Welcome")),
        )
        .unwrap();
    assert_eq!(out, "<h1>Welcome</h1>");
}

#[test]
fn renders_an_object_through_the_plural_convention() {
    let dir = fixture(&[(
        "news_articles/_news_article",
        "<li>{{news_article}} ({{object}})</li>",
    )]);
    let (_, binder) = engine(&dir);

    let out = binder
        .render_reference(
            &ViewContext::new(),
            &PartialRef::object("NewsArticle", json!("headline")),
            &RenderOptions::new(),
        )
        .unwrap();
    assert_eq!(out, "<li>headline (headline)</li>");
}

#[test]
fn renders_a_collection_with_spacer_and_counters() {
    let dir = fixture(&[
        ("ads/_ad", "{{ad_counter}}:{{ad}}"),
        ("shared/_rule", "<hr/>"),
    ]);
    let (_, binder) = engine(&dir);

    let members: Vec<Member> = ["a", "b", "c"]
        .iter()
        .map(|t| Member::new("Ad", json!(*t)))
        .collect();

    let out = binder
        .render_collection(
            &ViewContext::new(),
            None,
            &members,
            &RenderOptions::new().spacer("shared/rule"),
        )
        .unwrap();
    assert_eq!(out, "0:a<hr/>1:b<hr/>2:c");
}

#[test]
fn descriptor_exposes_parsed_pieces_and_source() {
    let dir = fixture(&[("dir/show.html.iphone.erb", "mobile body")]);
    let (resolver, _) = engine(&dir);

    let d = resolver.resolve("dir/show.html.iphone.erb").unwrap();
    assert_eq!(d.base_name(), "show");
    assert_eq!(d.format(), Some("html.iphone"));
    assert_eq!(d.extension(), Some("erb"));
    assert_eq!(d.full_path(), "dir/show.html.iphone.erb");
    assert_eq!(d.raw_source(), "mobile body");
    assert!(!d.is_partial());
}

#[test]
fn ambient_scope_homes_bare_references_and_fills_values() {
    let dir = fixture(&[("admin/_account", "acct={{account}}")]);
    let (_, binder) = engine(&dir);

    let view = StaticScope::named("admin")
        .with_value("account", json!("from-scope"))
        .into_view();

    let out = binder
        .render_reference(&view, &PartialRef::path("account"), &RenderOptions::new())
        .unwrap();
    assert_eq!(out, "acct=from-scope");
}

#[test]
fn compile_failure_names_the_file() {
    let dir = fixture(&[("broken.html.erb", "oops {{unclosed")]);
    let (resolver, _) = engine(&dir);

    let err = resolver.resolve("broken.html.erb").unwrap_err();
    let message = err.to_string();
    assert!(message.contains("broken.html.erb"), "got: {message}");
    assert!(message.contains("unclosed variable token"), "got: {message}");
}

#[test]
fn caller_locals_flow_through_collection_elements() {
    let dir = fixture(&[("ads/_ad", "{{brand}}/{{ad}}")]);
    let (_, binder) = engine(&dir);

    let members = vec![Member::new("Ad", json!("x")), Member::new("Ad", json!("y"))];
    let out = binder
        .render_collection(
            &ViewContext::new(),
            None,
            &members,
            &RenderOptions::new().locals(Locals::new().with("brand", json!("B"))),
        )
        .unwrap();
    assert_eq!(out, "B/xB/y");
}
