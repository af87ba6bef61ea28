//! Path operation boilerplate
//!
//! Serde models for Swagger 2.0 operation objects plus the per-verb fillers.
//! A filler only writes fields the seeded swagger context left unset, so
//! explicit operation metadata always wins over generated boilerplate.

use crate::schema::TypeFragment;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A Swagger 2.0 parameter object.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Parameter {
	pub name: String,
	#[serde(rename = "in")]
	pub location: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub required: Option<bool>,
	#[serde(rename = "type", skip_serializing_if = "Option::is_none")]
	pub param_type: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub schema: Option<TypeFragment>,
	#[serde(flatten, skip_serializing_if = "Map::is_empty")]
	pub extra: Map<String, Value>,
}

impl Parameter {
	/// The conventional `id` path parameter of item operations.
	pub fn path_id() -> Self {
		Self {
			name: "id".to_string(),
			location: "path".to_string(),
			required: Some(true),
			param_type: Some("string".to_string()),
			..Self::default()
		}
	}

	/// A body parameter referencing a definition.
	pub fn body(name: impl Into<String>, description: String, reference: String) -> Self {
		Self {
			name: name.into(),
			location: "body".to_string(),
			description: Some(description),
			schema: Some(TypeFragment::reference(reference)),
			..Self::default()
		}
	}

	/// Applies free-form overrides; override keys win over generated ones.
	pub fn apply_overrides(&mut self, overrides: &Map<String, Value>) {
		for (key, value) in overrides {
			match key.as_str() {
				"name" => {
					if let Some(name) = value.as_str() {
						self.name = name.to_string();
					}
				}
				"in" => {
					if let Some(location) = value.as_str() {
						self.location = location.to_string();
					}
				}
				"required" => self.required = value.as_bool(),
				"type" => self.param_type = value.as_str().map(str::to_string),
				"description" => self.description = value.as_str().map(str::to_string),
				_ => {
					self.extra.insert(key.clone(), value.clone());
				}
			}
		}
	}
}

/// A Swagger 2.0 response object.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResponseObject {
	pub description: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub schema: Option<TypeFragment>,
}

impl ResponseObject {
	pub fn plain(description: String) -> Self {
		Self {
			description,
			schema: None,
		}
	}

	pub fn with_schema(description: String, schema: TypeFragment) -> Self {
		Self {
			description,
			schema: Some(schema),
		}
	}
}

/// A Swagger 2.0 operation object.
///
/// See <https://github.com/OAI/OpenAPI-Specification/blob/master/versions/2.0.md#operation-object>
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PathOperation {
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub tags: Vec<String>,
	#[serde(rename = "operationId", skip_serializing_if = "Option::is_none")]
	pub operation_id: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub consumes: Option<Vec<String>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub produces: Option<Vec<String>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub summary: Option<String>,
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub parameters: Vec<Parameter>,
	#[serde(skip_serializing_if = "IndexMap::is_empty")]
	pub responses: IndexMap<String, ResponseObject>,
	#[serde(flatten, skip_serializing_if = "Map::is_empty")]
	pub extra: Map<String, Value>,
}

impl PathOperation {
	/// Seeds an operation from its swagger context; recognized keys become
	/// typed fields, everything else is carried through `extra` verbatim.
	pub fn from_context(context: &Map<String, Value>) -> serde_json::Result<Self> {
		serde_json::from_value(Value::Object(context.clone()))
	}
}

/// `GET` on a collection: array response, filters, pagination.
pub fn fill_get_collection(
	operation: &mut PathOperation,
	short_name: &str,
	mime_types: &[String],
	response_key: &str,
	filter_parameters: Vec<Parameter>,
) {
	if operation.produces.is_none() {
		operation.produces = Some(mime_types.to_vec());
	}
	if operation.summary.is_none() {
		operation.summary = Some(format!(
			"Retrieves the collection of {short_name} resources."
		));
	}
	if operation.responses.is_empty() {
		operation.responses.insert(
			"200".to_string(),
			ResponseObject::with_schema(
				format!("{short_name} collection response"),
				TypeFragment::array(TypeFragment::reference(format!(
					"#/definitions/{response_key}"
				))),
			),
		);
	}
	if operation.parameters.is_empty() {
		operation.parameters = filter_parameters;
	}
}

/// `GET` on an item: `id` path parameter, 200/404.
pub fn fill_get_item(
	operation: &mut PathOperation,
	short_name: &str,
	mime_types: &[String],
	response_key: &str,
) {
	if operation.produces.is_none() {
		operation.produces = Some(mime_types.to_vec());
	}
	if operation.summary.is_none() {
		operation.summary = Some(format!("Retrieves a {short_name} resource."));
	}
	if operation.parameters.is_empty() {
		operation.parameters = vec![Parameter::path_id()];
	}
	if operation.responses.is_empty() {
		operation.responses.insert(
			"200".to_string(),
			ResponseObject::with_schema(
				format!("{short_name} resource response"),
				TypeFragment::reference(format!("#/definitions/{response_key}")),
			),
		);
		operation.responses.insert(
			"404".to_string(),
			ResponseObject::plain("Resource not found".to_string()),
		);
	}
}

/// `POST` on a collection: body parameter, 201/400/404.
pub fn fill_post(
	operation: &mut PathOperation,
	short_name: &str,
	mime_types: &[String],
	request_key: &str,
	response_key: &str,
) {
	if operation.consumes.is_none() {
		operation.consumes = Some(mime_types.to_vec());
	}
	if operation.produces.is_none() {
		operation.produces = Some(mime_types.to_vec());
	}
	if operation.summary.is_none() {
		operation.summary = Some(format!("Creates a {short_name} resource."));
	}
	if operation.parameters.is_empty() {
		operation.parameters = vec![Parameter::body(
			lcfirst(short_name),
			format!("The new {short_name} resource"),
			format!("#/definitions/{request_key}"),
		)];
	}
	if operation.responses.is_empty() {
		operation.responses.insert(
			"201".to_string(),
			ResponseObject::with_schema(
				format!("{short_name} resource created"),
				TypeFragment::reference(format!("#/definitions/{response_key}")),
			),
		);
		operation.responses.insert(
			"400".to_string(),
			ResponseObject::plain("Invalid input".to_string()),
		);
		operation.responses.insert(
			"404".to_string(),
			ResponseObject::plain("Resource not found".to_string()),
		);
	}
}

/// `PUT` on an item: `id` plus body parameter, 200/400/404.
///
/// `PATCH` shares this shape; the caller sets its distinct summary first.
pub fn fill_put(
	operation: &mut PathOperation,
	short_name: &str,
	mime_types: &[String],
	request_key: &str,
	response_key: &str,
) {
	if operation.consumes.is_none() {
		operation.consumes = Some(mime_types.to_vec());
	}
	if operation.produces.is_none() {
		operation.produces = Some(mime_types.to_vec());
	}
	if operation.summary.is_none() {
		operation.summary = Some(format!("Replaces the {short_name} resource."));
	}
	if operation.parameters.is_empty() {
		operation.parameters = vec![
			Parameter::path_id(),
			Parameter::body(
				lcfirst(short_name),
				format!("The updated {short_name} resource"),
				format!("#/definitions/{request_key}"),
			),
		];
	}
	if operation.responses.is_empty() {
		operation.responses.insert(
			"200".to_string(),
			ResponseObject::with_schema(
				format!("{short_name} resource updated"),
				TypeFragment::reference(format!("#/definitions/{response_key}")),
			),
		);
		operation.responses.insert(
			"400".to_string(),
			ResponseObject::plain("Invalid input".to_string()),
		);
		operation.responses.insert(
			"404".to_string(),
			ResponseObject::plain("Resource not found".to_string()),
		);
	}
}

/// `DELETE` on an item: 204/404, `id` path parameter.
pub fn fill_delete(operation: &mut PathOperation, short_name: &str) {
	if operation.summary.is_none() {
		operation.summary = Some(format!("Removes the {short_name} resource."));
	}
	if operation.responses.is_empty() {
		operation.responses.insert(
			"204".to_string(),
			ResponseObject::plain(format!("{short_name} resource deleted")),
		);
		operation.responses.insert(
			"404".to_string(),
			ResponseObject::plain("Resource not found".to_string()),
		);
	}
	if operation.parameters.is_empty() {
		operation.parameters = vec![Parameter::path_id()];
	}
}

/// The page-number query parameter for paginated collection operations.
pub fn pagination_parameter(name: &str) -> Parameter {
	Parameter {
		name: name.to_string(),
		location: "query".to_string(),
		required: Some(false),
		param_type: Some("integer".to_string()),
		description: Some("The collection page number".to_string()),
		..Parameter::default()
	}
}

/// The client-controlled page-size query parameter.
pub fn items_per_page_parameter(name: &str) -> Parameter {
	Parameter {
		name: name.to_string(),
		location: "query".to_string(),
		required: Some(false),
		param_type: Some("integer".to_string()),
		description: Some("The number of items per page".to_string()),
		..Parameter::default()
	}
}

pub(crate) fn lcfirst(value: &str) -> String {
	let mut chars = value.chars();
	match chars.next() {
		Some(first) => first.to_lowercase().chain(chars).collect(),
		None => String::new(),
	}
}

pub(crate) fn ucfirst(value: &str) -> String {
	let mut chars = value.chars();
	match chars.next() {
		Some(first) => first.to_uppercase().chain(chars).collect(),
		None => String::new(),
	}
}
