use serde_json::Value;

use crate::context::Context;
use crate::error::Result;
use crate::jsonschema::Schema;
use crate::pattern::{escape_literal, matches_empty_string, to_ecmascript};
use crate::rules::StringRules;
use crate::scalar::format::{FormatConstraint, schema_for_string_formats};

/// Translate string rules.
///
/// Rules are applied independently onto a base `string` schema. Rules that
/// cannot live on the base schema (`not_contains`, `not_in`, multi-format
/// well-known rules) become extra fragments. Pattern-like rules (`contains`,
/// `pattern`, `prefix`, `suffix`) are collected first: a single one sets the
/// base `pattern`, several become one fragment each, so every pattern has to
/// hold on its own instead of being spliced into one expression. The result
/// is the conjunction of the base and all fragments.
///
/// Fails only when `pattern` is not a valid source-dialect regex.
pub fn schema_for_string(
    ctx: &Context,
    rules: Option<&StringRules>,
    ignore_empty: bool,
) -> Result<(Schema, bool)> {
    ctx.trace("schema_for_string");
    let mut required = false;
    let mut schema = Schema::string();
    let mut schemas = Vec::new();
    let mut patterns = Vec::new();

    if let Some(rules) = rules {
        if let Some(value) = &rules.r#const {
            schema.r#const = Some(Value::from(value.as_str()));
            required = !ignore_empty;
        }

        if let Some(contains) = &rules.contains {
            patterns.push(escape_literal(contains));
            required = !ignore_empty;
        }

        if !rules.r#in.is_empty() {
            schema.r#enum = string_values(&rules.r#in);
            required = !ignore_empty;
        }

        if let Some(len) = rules.len {
            schema.min_length = Some(len);
            schema.max_length = Some(len);
            required = !ignore_empty;
        }

        // Byte lengths have no JSON Schema keyword; they still rule out "".
        if rules.len_bytes.is_some() || rules.min_bytes.is_some() {
            required = !ignore_empty;
        }

        if let Some(max_len) = rules.max_len {
            schema.max_length = Some(max_len);
        }

        if let Some(min_len) = rules.min_len {
            schema.min_length = Some(min_len);
            required = !ignore_empty;
        }

        if let Some(not_contains) = &rules.not_contains {
            let contains = Schema::string().with_pattern(escape_literal(not_contains));
            schemas.push(Schema::not(contains));
        }

        if !rules.not_in.is_empty() {
            let mut not_in = Schema::string();
            not_in.r#enum = string_values(&rules.not_in);
            schemas.push(Schema::not(not_in));
        }

        if let Some(pattern) = &rules.pattern {
            patterns.push(to_ecmascript(ctx, pattern)?);
            if !matches_empty_string(ctx, pattern)? {
                required = !ignore_empty;
            }
        }

        if let Some(prefix) = &rules.prefix {
            patterns.push(format!("^{}", escape_literal(prefix)));
            required = !ignore_empty;
        }

        if let Some(suffix) = &rules.suffix {
            patterns.push(format!("{}$", escape_literal(suffix)));
            required = !ignore_empty;
        }

        if let Some(well_known) = rules.well_known {
            match FormatConstraint::resolve(well_known) {
                FormatConstraint::Format(format) => schema.format = Some(format),
                FormatConstraint::AnyOf(formats) => {
                    schemas.push(schema_for_string_formats(ctx, &formats));
                }
            }
            required = !ignore_empty;
        }
    }

    if patterns.len() == 1 {
        schema.pattern = patterns.pop();
    } else {
        schemas.extend(patterns.into_iter().map(|pattern| Schema::string().with_pattern(pattern)));
    }

    schemas.insert(0, schema);
    Ok((Schema::all_of(schemas), required))
}

fn string_values(values: &[String]) -> Vec<Value> {
    values.iter().map(|value| Value::from(value.as_str())).collect()
}
