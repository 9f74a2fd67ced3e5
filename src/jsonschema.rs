//! Document-schema object model (JSON Schema subset).
//!
//! Nodes own their children outright; composition operators take the child
//! list by value. Empty attributes are skipped on serialization so a node
//! prints only what was set on it.

use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    Boolean,
    Integer,
    Number,
    String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StringFormat {
    #[serde(rename = "email")]
    Email,
    #[serde(rename = "hostname")]
    Hostname,
    #[serde(rename = "ipv4")]
    Ipv4,
    #[serde(rename = "ipv6")]
    Ipv6,
    #[serde(rename = "uri")]
    Uri,
    #[serde(rename = "uri-reference")]
    UriReference,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub r#type: Option<SchemaType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub r#const: Option<Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub r#enum: Vec<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<StringFormat>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub all_of: Vec<Schema>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub any_of: Vec<Schema>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub one_of: Vec<Schema>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub not: Option<Box<Schema>>,
}

impl Schema {
    pub fn typed(ty: SchemaType) -> Self {
        Self { r#type: Some(ty), ..Self::default() }
    }

    pub fn boolean() -> Self {
        Self::typed(SchemaType::Boolean)
    }

    pub fn string() -> Self {
        Self::typed(SchemaType::String)
    }

    pub fn integer() -> Self {
        Self::typed(SchemaType::Integer)
    }

    pub fn number() -> Self {
        Self::typed(SchemaType::Number)
    }

    /// Every schema must hold. A single schema is returned as is.
    pub fn all_of(mut schemas: Vec<Schema>) -> Self {
        if schemas.len() == 1 {
            return schemas.remove(0);
        }
        Self { all_of: schemas, ..Self::default() }
    }

    /// At least one schema must hold. A single schema is returned as is.
    pub fn any_of(mut schemas: Vec<Schema>) -> Self {
        if schemas.len() == 1 {
            return schemas.remove(0);
        }
        Self { any_of: schemas, ..Self::default() }
    }

    /// Exactly one schema must hold. A single schema is returned as is.
    pub fn one_of(mut schemas: Vec<Schema>) -> Self {
        if schemas.len() == 1 {
            return schemas.remove(0);
        }
        Self { one_of: schemas, ..Self::default() }
    }

    pub fn not(schema: Schema) -> Self {
        Self { not: Some(Box::new(schema)), ..Self::default() }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    pub fn with_format(mut self, format: StringFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn to_value(&self) -> Value {
        // Serializing a tree of plain structs and `Value`s cannot fail.
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn typed_schema_prints_only_what_is_set() {
        let mut schema = Schema::string();
        schema.min_length = Some(2);
        schema.r#enum = vec![json!("a"), json!("bb")];
        assert_eq!(
            schema.to_value(),
            json!({"type": "string", "enum": ["a", "bb"], "minLength": 2})
        );
    }

    #[test]
    fn composition_keeps_children_in_order() {
        let schema = Schema::all_of(vec![
            Schema::string(),
            Schema::not(Schema::string().with_pattern("x")),
        ]);
        assert_eq!(
            schema.to_value(),
            json!({"allOf": [{"type": "string"}, {"not": {"type": "string", "pattern": "x"}}]})
        );
    }

    #[test]
    fn single_child_composition_collapses() {
        let schema = Schema::any_of(vec![Schema::string().with_format(StringFormat::UriReference)]);
        assert_eq!(schema.to_value(), json!({"type": "string", "format": "uri-reference"}));
        assert_eq!(Schema::one_of(vec![Schema::boolean()]), Schema::boolean());
    }
}
