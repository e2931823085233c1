//! `folio render` — resolve a template and render it with locals.

use serde_json::Value;
use tracing::{info, instrument};

use folio_core::{
    application::RenderOptions,
    domain::{Locals, PartialRef},
};

use crate::{
    cli::{GlobalArgs, RenderArgs},
    error::{CliError, CliResult},
};

#[instrument(skip_all, fields(path = %args.path, partial = args.partial))]
pub fn execute(args: RenderArgs, _global: GlobalArgs) -> CliResult<()> {
    let locals = parse_locals(&args.set)?;

    let resolver = super::build_resolver(&args.engine);
    let binder = super::build_binder(resolver.clone());
    let view = super::build_view(&args.engine);

    let output = if args.partial {
        let mut options = RenderOptions::new().locals(locals);
        if let Some(payload) = &args.object {
            let object: Value =
                serde_json::from_str(payload).map_err(|e| CliError::InvalidObject {
                    reason: e.to_string(),
                })?;
            options = options.object(object);
        }
        if let Some(name) = &args.as_name {
            options = options.as_name(name.clone());
        }
        binder.render_reference(&view, &PartialRef::path(args.path.clone()), &options)?
    } else {
        let descriptor = resolver.resolve(&args.path)?;
        binder.render_descriptor(&view, &descriptor, &locals)?
    };

    info!(bytes = output.len(), "Render completed");

    // Emit the render verbatim; only add a newline when the template
    // itself didn't end with one.
    print!("{output}");
    if !output.ends_with('\n') {
        println!();
    }
    Ok(())
}

/// Parse `--set name=value` pairs. Values that parse as JSON become
/// structured; everything else is a plain string.
fn parse_locals(pairs: &[String]) -> CliResult<Locals> {
    pairs
        .iter()
        .map(|pair| {
            let (name, raw) = pair.split_once('=').ok_or_else(|| CliError::InvalidLocal {
                pair: pair.clone(),
                reason: "missing '='".into(),
            })?;
            if name.is_empty() {
                return Err(CliError::InvalidLocal {
                    pair: pair.clone(),
                    reason: "empty name".into(),
                });
            }
            let value = serde_json::from_str(raw)
                .unwrap_or_else(|_| Value::String(raw.to_string()));
            Ok((name.to_string(), value))
        })
        .collect()
}
