//! `folio inspect` — parse a template identifier and show its pieces.

use serde_json::json;
use tracing::instrument;

use folio_core::{
    application::ApplicationError,
    domain::{PathParts, TemplateDescriptor},
    error::FolioError,
};

use crate::{
    cli::{GlobalArgs, InspectArgs},
    error::CliResult,
};

#[instrument(skip_all, fields(path = %args.path))]
pub fn execute(args: InspectArgs, _global: GlobalArgs) -> CliResult<()> {
    let registry = super::build_registry(&args.engine);
    let parts = PathParts::parse(&args.path, registry.as_ref()).map_err(FolioError::from)?;

    // A genuine miss is informational — the grammar is inspectable without
    // any search directory. Anything else (unreadable source, a template
    // the backend rejects) is a real failure and surfaces as one.
    let resolver = super::build_resolver(&args.engine);
    let descriptor = match resolver.resolve(&args.path) {
        Ok(descriptor) => Some(descriptor),
        Err(FolioError::Application(ApplicationError::TemplateNotFound { .. })) => None,
        Err(e) => return Err(e.into()),
    };

    if args.json {
        print_json(&args.path, &parts, descriptor.as_deref());
    } else {
        print_human(&args.path, &parts, descriptor.as_deref());
    }
    Ok(())
}

fn print_human(raw: &str, parts: &PathParts, descriptor: Option<&TemplateDescriptor>) {
    let none = "(none)";
    println!("Path:       {raw}");
    println!("Directory:  {}", parts.directory.as_deref().unwrap_or(none));
    println!("Base name:  {}", parts.base_name);
    println!("Format:     {}", parts.format.as_deref().unwrap_or(none));
    println!("Extension:  {}", parts.extension.as_deref().unwrap_or(none));
    println!("Partial:    {}", if parts.is_partial() { "yes" } else { "no" });

    match descriptor {
        Some(d) => {
            println!("Resolved:   {}", d.resolved_file().display());
            match d.search_root() {
                Some(root) => println!("Root:       {}", root.display()),
                None => println!("Root:       (direct path)"),
            }
            println!("Cache key:  {}", d.cache_key());
        }
        None => println!("Resolved:   (not found)"),
    }
}

fn print_json(raw: &str, parts: &PathParts, descriptor: Option<&TemplateDescriptor>) {
    let resolved = descriptor.map(|d| {
        json!({
            "file": d.resolved_file(),
            "search_root": d.search_root(),
            "cache_key": d.cache_key(),
            "full_path": d.full_path(),
        })
    });
    let payload = json!({
        "path": raw,
        "parts": parts,
        "is_partial": parts.is_partial(),
        "resolved": resolved,
    });
    println!("{payload:#}");
}
