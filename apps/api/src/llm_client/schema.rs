//! Response schemas for schema-constrained generation.
//!
//! Mirrors the OpenAPI subset the Gemini API accepts in `responseSchema`.

use std::collections::BTreeMap;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SchemaType {
    String,
    Number,
    Array,
    Object,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Schema {
    #[serde(rename = "type")]
    pub schema_type: SchemaType,
    #[serde(rename = "enum", skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Schema>>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, Schema>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
}

impl Schema {
    fn of(schema_type: SchemaType) -> Self {
        Self {
            schema_type,
            enum_values: Vec::new(),
            items: None,
            properties: BTreeMap::new(),
            required: Vec::new(),
        }
    }

    pub fn string() -> Self {
        Self::of(SchemaType::String)
    }

    pub fn number() -> Self {
        Self::of(SchemaType::Number)
    }

    /// A string restricted to the given values.
    pub fn string_enum<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            enum_values: values.into_iter().map(Into::into).collect(),
            ..Self::of(SchemaType::String)
        }
    }

    pub fn array(items: Schema) -> Self {
        Self {
            items: Some(Box::new(items)),
            ..Self::of(SchemaType::Array)
        }
    }

    /// An object with the given properties, none required yet.
    pub fn object<I, K>(properties: I) -> Self
    where
        I: IntoIterator<Item = (K, Schema)>,
        K: Into<String>,
    {
        Self {
            properties: properties
                .into_iter()
                .map(|(name, schema)| (name.into(), schema))
                .collect(),
            ..Self::of(SchemaType::Object)
        }
    }

    /// Marks properties as required. Names must already be declared.
    pub fn require(mut self, names: &[&str]) -> Self {
        debug_assert!(
            names.iter().all(|n| self.properties.contains_key(*n)),
            "required property not declared in schema"
        );
        self.required.extend(names.iter().map(|n| n.to_string()));
        self
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_scalar_types_serialize_uppercase() {
        assert_eq!(serde_json::to_value(Schema::string()).unwrap(), json!({"type": "STRING"}));
        assert_eq!(serde_json::to_value(Schema::number()).unwrap(), json!({"type": "NUMBER"}));
    }

    #[test]
    fn test_string_enum_serializes_values() {
        let schema = Schema::string_enum(["Test", "Syllabus", "Drill"]);
        assert_eq!(
            serde_json::to_value(schema).unwrap(),
            json!({"type": "STRING", "enum": ["Test", "Syllabus", "Drill"]})
        );
    }

    #[test]
    fn test_array_of_object_with_required() {
        let schema = Schema::array(
            Schema::object([("title", Schema::string()), ("score", Schema::number())])
                .require(&["title"]),
        );

        assert_eq!(
            serde_json::to_value(schema).unwrap(),
            json!({
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "score": {"type": "NUMBER"},
                        "title": {"type": "STRING"}
                    },
                    "required": ["title"]
                }
            })
        );
    }
}
