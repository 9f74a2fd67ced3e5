//! Scalar field constraints → document-schema fragments.
//!
//! Each translator returns the schema for the field together with a
//! "required" flag: whether the rule set rules out the empty/default value.
//! `ignore_empty` on the field constraints suppresses that flag.
pub mod boolean;
pub mod bytes;
pub mod format;
pub mod numeric;
pub mod string;

use crate::context::Context;
use crate::error::{Error, Result};
use crate::jsonschema::Schema;
use crate::rules::{FieldConstraints, ScalarKind};

pub use numeric::{NumericTranslator, TypedNumeric};

/// Routes a scalar kind to its translator. Numeric kinds go to `N`.
#[derive(Debug, Clone, Default)]
pub struct ScalarTranslator<N = TypedNumeric> {
    numeric: N,
}

impl ScalarTranslator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<N: NumericTranslator> ScalarTranslator<N> {
    pub fn with_numeric(numeric: N) -> Self {
        Self { numeric }
    }

    pub fn schema_for_scalar(
        &self,
        ctx: &Context,
        kind: ScalarKind,
        constraints: Option<&FieldConstraints>,
    ) -> Result<(Schema, bool)> {
        ctx.trace("schema_for_scalar");
        if kind.is_numeric() {
            return self.numeric.schema_for_numeric(ctx, kind, constraints);
        }

        let ignore_empty = constraints.is_some_and(|c| c.ignore_empty);

        match kind {
            ScalarKind::Bool => Ok(boolean::schema_for_bool(
                ctx,
                constraints.and_then(FieldConstraints::bool_rules),
            )),
            ScalarKind::Bytes => Ok(bytes::schema_for_bytes(
                ctx,
                constraints.and_then(FieldConstraints::bytes_rules),
                ignore_empty,
            )),
            ScalarKind::String => string::schema_for_string(
                ctx,
                constraints.and_then(FieldConstraints::string_rules),
                ignore_empty,
            ),
            other => Err(ctx.fail(Error::UnexpectedScalar { kind: other })),
        }
    }
}

/// Translate with the bundled numeric translator.
pub fn schema_for_scalar(
    ctx: &Context,
    kind: ScalarKind,
    constraints: Option<&FieldConstraints>,
) -> Result<(Schema, bool)> {
    ScalarTranslator::new().schema_for_scalar(ctx, kind, constraints)
}
