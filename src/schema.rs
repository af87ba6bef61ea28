//! Swagger 2.0 schema objects
//!
//! Serde models for the `definitions` section: the definition schema, the
//! per-property schema and the type fragments produced by the type mapping.
//! Optional fields are skipped when absent so the emitted JSON matches the
//! Swagger 2.0 schema-object shape exactly.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// `externalDocs` block of a definition, carrying the resource IRI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalDocs {
	pub url: String,
}

/// Type fragment of a property schema.
///
/// Exactly one shape is populated: a primitive `type` (with optional
/// `format`), an array `type` with `items`, or a `$ref`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TypeFragment {
	#[serde(rename = "type", skip_serializing_if = "Option::is_none")]
	pub schema_type: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub format: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub items: Option<Box<TypeFragment>>,
	#[serde(rename = "$ref", skip_serializing_if = "Option::is_none")]
	pub reference: Option<String>,
}

impl TypeFragment {
	pub fn string() -> Self {
		Self::primitive("string")
	}

	pub fn integer() -> Self {
		Self::primitive("integer")
	}

	pub fn number() -> Self {
		Self::primitive("number")
	}

	pub fn boolean() -> Self {
		Self::primitive("boolean")
	}

	pub fn date_time() -> Self {
		Self {
			format: Some("date-time".to_string()),
			..Self::primitive("string")
		}
	}

	pub fn array(items: TypeFragment) -> Self {
		Self {
			items: Some(Box::new(items)),
			..Self::primitive("array")
		}
	}

	/// A `$ref` fragment. `reference` must be the full pointer, e.g.
	/// `#/definitions/Book`.
	pub fn reference(reference: impl Into<String>) -> Self {
		Self {
			reference: Some(reference.into()),
			..Self::default()
		}
	}

	fn primitive(schema_type: &str) -> Self {
		Self {
			schema_type: Some(schema_type.to_string()),
			..Self::default()
		}
	}
}

/// Schema of a single property.
///
/// This is a free-form ordered map rather than a fixed struct: it starts
/// from the property's swagger-context overrides, and the merge rule is
/// key-union with existing keys winning. Overrides therefore beat the
/// generated `readOnly`/`description`/type keys, matching the documented
/// precedence.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertySchema(pub IndexMap<String, Value>);

impl PropertySchema {
	pub fn new() -> Self {
		Self::default()
	}

	/// Seeds the schema with free-form overrides, preserving their order.
	pub fn from_context(context: &Map<String, Value>) -> Self {
		Self(
			context
				.iter()
				.map(|(key, value)| (key.clone(), value.clone()))
				.collect(),
		)
	}

	/// Sets a key unconditionally, replacing any seeded value.
	pub fn set(&mut self, key: &str, value: Value) {
		self.0.insert(key.to_string(), value);
	}

	/// Unions a type fragment into the schema; keys already present win.
	pub fn merge_fragment(&mut self, fragment: TypeFragment) {
		if let Some(schema_type) = fragment.schema_type {
			self.entry_or_insert("type", Value::String(schema_type));
		}
		if let Some(format) = fragment.format {
			self.entry_or_insert("format", Value::String(format));
		}
		if let Some(items) = fragment.items {
			// Serializing the fragment never fails: it is string/value maps
			// all the way down.
			let items = serde_json::to_value(*items).unwrap_or(Value::Null);
			self.entry_or_insert("items", items);
		}
		if let Some(reference) = fragment.reference {
			self.entry_or_insert("$ref", Value::String(reference));
		}
	}

	fn entry_or_insert(&mut self, key: &str, value: Value) {
		self.0.entry(key.to_string()).or_insert(value);
	}
}

/// A definition Schema Object.
///
/// See <https://github.com/OAI/OpenAPI-Specification/blob/master/versions/2.0.md#schemaObject>
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Definition {
	#[serde(rename = "type")]
	pub schema_type: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	#[serde(
		rename = "externalDocs",
		default,
		skip_serializing_if = "Option::is_none"
	)]
	pub external_docs: Option<ExternalDocs>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub required: Option<Vec<String>>,
	#[serde(default, skip_serializing_if = "IndexMap::is_empty")]
	pub properties: IndexMap<String, PropertySchema>,
}

impl Definition {
	pub fn object() -> Self {
		Self::default()
	}

	/// Marks a property as required, keeping enumeration order.
	pub fn require(&mut self, property_name: &str) {
		self.required
			.get_or_insert_with(Vec::new)
			.push(property_name.to_string());
	}
}

impl Default for Definition {
	fn default() -> Self {
		Self {
			schema_type: "object".to_string(),
			description: None,
			external_docs: None,
			required: None,
			properties: IndexMap::new(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn fragment_serialization_shapes() {
		assert_eq!(
			serde_json::to_value(TypeFragment::string()).unwrap(),
			json!({"type": "string"})
		);
		assert_eq!(
			serde_json::to_value(TypeFragment::date_time()).unwrap(),
			json!({"type": "string", "format": "date-time"})
		);
		assert_eq!(
			serde_json::to_value(TypeFragment::array(TypeFragment::integer())).unwrap(),
			json!({"type": "array", "items": {"type": "integer"}})
		);
		assert_eq!(
			serde_json::to_value(TypeFragment::reference("#/definitions/Book")).unwrap(),
			json!({"$ref": "#/definitions/Book"})
		);
	}

	#[test]
	fn property_schema_overrides_win_over_fragment() {
		let mut context = Map::new();
		context.insert("type".to_string(), json!("integer"));
		context.insert("example".to_string(), json!(42));

		let mut schema = PropertySchema::from_context(&context);
		schema.merge_fragment(TypeFragment::string());

		assert_eq!(
			serde_json::to_value(&schema).unwrap(),
			json!({"type": "integer", "example": 42})
		);
	}

	#[test]
	fn property_schema_set_replaces_seeded_keys() {
		let mut context = Map::new();
		context.insert("description".to_string(), json!("seeded"));

		let mut schema = PropertySchema::from_context(&context);
		schema.set("description", json!("metadata"));

		assert_eq!(
			serde_json::to_value(&schema).unwrap(),
			json!({"description": "metadata"})
		);
	}

	#[test]
	fn empty_definition_is_a_bare_object() {
		assert_eq!(
			serde_json::to_value(Definition::object()).unwrap(),
			json!({"type": "object"})
		);
	}

	#[test]
	fn required_preserves_insertion_order() {
		let mut definition = Definition::object();
		definition.require("name");
		definition.require("author");

		assert_eq!(
			definition.required,
			Some(vec!["name".to_string(), "author".to_string()])
		);
	}
}
