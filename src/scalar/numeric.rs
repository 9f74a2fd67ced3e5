use crate::context::Context;
use crate::error::Result;
use crate::jsonschema::Schema;
use crate::rules::{FieldConstraints, ScalarKind};

/// Translator for numeric scalar kinds, plugged into
/// [`ScalarTranslator`](super::ScalarTranslator).
pub trait NumericTranslator {
    fn schema_for_numeric(
        &self,
        ctx: &Context,
        kind: ScalarKind,
        constraints: Option<&FieldConstraints>,
    ) -> Result<(Schema, bool)>;
}

/// Emits the bare `integer` or `number` type; numeric rules are not read.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypedNumeric;

impl NumericTranslator for TypedNumeric {
    fn schema_for_numeric(
        &self,
        ctx: &Context,
        kind: ScalarKind,
        _constraints: Option<&FieldConstraints>,
    ) -> Result<(Schema, bool)> {
        ctx.trace("schema_for_numeric");
        let schema = if kind.is_integer() { Schema::integer() } else { Schema::number() };
        Ok((schema, false))
    }
}
