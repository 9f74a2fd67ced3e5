use serde_json::Value;

use crate::context::Context;
use crate::jsonschema::Schema;
use crate::rules::BoolRules;

pub fn schema_for_bool(ctx: &Context, rules: Option<&BoolRules>) -> (Schema, bool) {
    ctx.trace("schema_for_bool");
    let mut schema = Schema::boolean();
    let mut required = false;

    if let Some(value) = rules.and_then(|rules| rules.r#const) {
        schema.r#const = Some(Value::Bool(value));
        required = true;
    }

    (schema, required)
}
