//! `folio list` — enumerate templates under the search directories.

use serde_json::json;
use tracing::instrument;

use crate::{
    cli::{GlobalArgs, ListArgs},
    error::CliResult,
};

#[instrument(skip_all)]
pub fn execute(args: ListArgs, _global: GlobalArgs) -> CliResult<()> {
    let resolver = super::build_resolver(&args.engine);

    let mut entries = resolver.list()?;
    if args.partials_only {
        entries.retain(|e| e.is_partial);
    }

    if args.json {
        let payload: Vec<_> = entries
            .iter()
            .map(|e| {
                json!({
                    "path": e.logical_path,
                    "is_partial": e.is_partial,
                    "search_root": e.search_root,
                })
            })
            .collect();
        println!("{:#}", json!(payload));
        return Ok(());
    }

    if entries.is_empty() {
        println!("No templates found under the search path.");
        return Ok(());
    }

    for entry in &entries {
        let kind = if entry.is_partial { "partial " } else { "template" };
        println!(
            "{kind}  {:<48} {}",
            entry.logical_path,
            entry.search_root.display()
        );
    }
    println!("\n{} template(s)", entries.len());
    Ok(())
}
