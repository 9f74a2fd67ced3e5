//! Field-table driver: translates a table of named scalar fields.
//!
//! Input shape:
//!
//! ```json
//! {"fields": {"name": {"kind": "string", "constraints": {"string": {"min_len": 1}}}}}
//! ```
//!
//! Fields are independent of each other, so they are translated in parallel;
//! the output keeps declaration order.

use indexmap::IndexMap;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::context::Context;
use crate::error::Result;
use crate::jsonschema::Schema;
use crate::rules::{FieldConstraints, ScalarKind};
use crate::scalar::{NumericTranslator, ScalarTranslator};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldTable {
    pub fields: IndexMap<String, FieldSpec>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldSpec {
    pub kind: ScalarKind,
    #[serde(default)]
    pub constraints: Option<FieldConstraints>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldSchema {
    pub required: bool,
    pub schema: Schema,
}

impl FieldTable {
    pub fn from_json(src: &str) -> Result<Self> {
        crate::path_de::from_str_with_path(src)
    }

    pub fn from_json_slice(bytes: &[u8]) -> Result<Self> {
        crate::path_de::from_slice_with_path(bytes)
    }
}

/// Translate every field of `table`. If any field fails, the table fails with
/// the error of the first failing field in declaration order.
pub fn translate_fields<N>(
    translator: &ScalarTranslator<N>,
    table: &FieldTable,
) -> Result<IndexMap<String, FieldSchema>>
where
    N: NumericTranslator + Sync,
{
    let entries: Vec<(&String, &FieldSpec)> = table.fields.iter().collect();
    // Every field is translated before any error is looked at, so the error
    // reported is always that of the earliest failing field.
    let translated: Vec<Result<(String, FieldSchema)>> = entries
        .into_par_iter()
        .map(|(name, field)| {
            let ctx = Context::new(name);
            let (schema, required) =
                translator.schema_for_scalar(&ctx, field.kind, field.constraints.as_ref())?;
            Ok((name.clone(), FieldSchema { required, schema }))
        })
        .collect();
    translated.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use serde_json::json;

    #[test]
    fn translates_in_declaration_order() {
        let table = FieldTable::from_json(
            r#"{"fields": {
                "zeta": {"kind": "bool", "constraints": {"bool": {"const": true}}},
                "alpha": {"kind": "string"},
                "count": {"kind": "int32"}
            }}"#,
        )
        .unwrap();
        let fields = translate_fields(&ScalarTranslator::new(), &table).unwrap();
        assert_eq!(fields.keys().collect::<Vec<_>>(), ["zeta", "alpha", "count"]);
        assert_eq!(
            serde_json::to_value(&fields).unwrap(),
            json!({
                "zeta": {"required": true, "schema": {"type": "boolean", "const": true}},
                "alpha": {"required": false, "schema": {"type": "string"}},
                "count": {"required": false, "schema": {"type": "integer"}},
            })
        );
    }

    #[test]
    fn failing_field_fails_the_table() {
        let table = FieldTable::from_json(
            r#"{"fields": {
                "ok": {"kind": "string"},
                "bad": {"kind": "string", "constraints": {"string": {"pattern": "(x"}}}
            }}"#,
        )
        .unwrap();
        let err = translate_fields(&ScalarTranslator::new(), &table).unwrap_err();
        assert!(matches!(err, Error::InvalidPattern { .. }));
    }

    #[test]
    fn earliest_failing_field_is_reported() {
        let mut src = String::from(r#"{"fields": {"#);
        for i in 0..64 {
            src.push_str(&format!(r#""ok{i}": {{"kind": "string"}}, "#));
        }
        src.push_str(r#""first": {"kind": "message"}, "second": {"kind": "group"}}}"#);
        let table = FieldTable::from_json(&src).unwrap();
        for _ in 0..8 {
            let err = translate_fields(&ScalarTranslator::new(), &table).unwrap_err();
            assert!(matches!(err, Error::UnexpectedScalar { kind: ScalarKind::Message }));
        }
    }

    #[test]
    fn unknown_kind_is_a_decode_error() {
        let err = FieldTable::from_json(r#"{"fields": {"f": {"kind": "varchar"}}}"#).unwrap_err();
        assert!(matches!(err, Error::Decode { ref path, .. } if path == "fields.f.kind"));
    }
}
