//! Error type for the translation core.
//!
//! Nothing inside the library recovers from these: every failure reflects a
//! defect in the schema definition being translated, so it is propagated with
//! `?` up to the caller, which is expected to abort the run.

use crate::rules::ScalarKind;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A non-scalar kind reached the scalar dispatcher.
    #[error("unexpected scalar type \"{kind}\"")]
    UnexpectedScalar { kind: ScalarKind },

    /// A `pattern` rule is not valid in the source regex dialect.
    #[error("failed to parse regular expression `{pattern}`")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: Box<regex_syntax::ast::Error>,
    },

    /// The pattern parsed but could not be compiled to probe the empty string.
    #[error("failed to check if pattern `{pattern}` matches empty string")]
    EmptyMatchProbe {
        pattern: String,
        #[source]
        source: Box<regex::Error>,
    },

    /// A field table could not be decoded.
    #[error("at JSON path {path} → {message}")]
    Decode { path: String, message: String },
}
