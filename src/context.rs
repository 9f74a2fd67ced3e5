use crate::error::Error;

/// Diagnostic context handed to every translation step.
///
/// It only carries the name of the field being translated. `trace` is the
/// debug log of each step; `fail` logs an error once where it is raised and
/// hands it back so the caller can propagate it with `?`.
#[derive(Debug, Clone, Copy)]
pub struct Context<'a> {
    field: &'a str,
}

impl<'a> Context<'a> {
    pub fn new(field: &'a str) -> Self {
        Self { field }
    }

    pub fn trace(&self, step: &str) {
        tracing::debug!(field = self.field, "{step}");
    }

    pub fn fail(&self, error: Error) -> Error {
        tracing::error!(field = self.field, "{error}");
        error
    }
}

impl Default for Context<'_> {
    fn default() -> Self {
        Self::new("")
    }
}
