//! Tracing-based render instrumentation.

use std::time::Instant;

use tracing::{debug, debug_span, warn};

use folio_core::{
    application::ports::{Instrumentation, RenderFn},
    error::FolioResult,
};

/// Instrumentation adapter that times each render under a tracing span.
///
/// Passes the wrapped result through untouched; observation only.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingInstrumentation;

impl TracingInstrumentation {
    pub fn new() -> Self {
        Self
    }
}

impl Instrumentation for TracingInstrumentation {
    fn wrap(&self, identifier: &str, f: RenderFn<'_>) -> FolioResult<String> {
        let span = debug_span!("render", template = identifier);
        let _guard = span.enter();

        let started = Instant::now();
        let result = f();
        let elapsed = started.elapsed();

        match &result {
            Ok(output) => debug!(
                elapsed_us = elapsed.as_micros() as u64,
                bytes = output.len(),
                "Render completed"
            ),
            Err(e) => warn!(
                elapsed_us = elapsed.as_micros() as u64,
                error = %e,
                "Render failed"
            ),
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::error::FolioError;

    #[test]
    fn passes_values_and_errors_through_unchanged() {
        let instrumentation = TracingInstrumentation::new();

        let ok = instrumentation.wrap("t", &mut || Ok("out".into()));
        assert_eq!(ok.unwrap(), "out");

        let err = instrumentation.wrap("t", &mut || {
            Err(FolioError::Internal {
                message: "boom".into(),
            })
        });
        assert_eq!(
            err.unwrap_err(),
            FolioError::Internal {
                message: "boom".into()
            }
        );
    }
}
