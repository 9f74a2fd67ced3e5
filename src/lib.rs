//! Translate protobuf field validation rules into JSON Schema fragments.
//!
//! The entry point is [`scalar::schema_for_scalar`] (or a
//! [`ScalarTranslator`] carrying a custom numeric translator): given a scalar
//! kind and the field's constraints it returns the document schema for the
//! field and whether the constraints rule out the empty value.
//!
//! Regex `pattern` rules are rewritten from the Perl-style dialect they are
//! written in to the ECMAScript dialect JSON Schema validators expect; see
//! [`pattern`].
//!
//! Every failure is fatal for the run and is returned as [`Error`].
pub mod context;
pub mod error;
pub mod fields;
pub mod jsonschema;
pub mod path_de;
pub mod pattern;
pub mod rules;
pub mod scalar;

pub use context::Context;
pub use error::{Error, Result};
pub use jsonschema::Schema;
pub use rules::{FieldConstraints, ScalarKind};
pub use scalar::{ScalarTranslator, schema_for_scalar};
