//! Resource and property metadata consumed by the generator
//!
//! The generator never inspects host types directly; everything it knows
//! about a resource arrives through the value types and collaborator traits
//! defined here. A host framework implements [`PropertyEnumerator`] and
//! [`ResourceLookup`] over its own metadata store and hands them to the
//! generator.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Primitive kind of a property type, as reported by the host's type system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuiltinType {
	Bool,
	Int,
	Float,
	String,
	Object,
}

/// Declared type of a resource property.
///
/// Collections carry their value type in `collection_value_type`; a missing
/// value type degrades to `string` during schema generation. `class_name` is
/// only meaningful for [`BuiltinType::Object`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyType {
	pub builtin: BuiltinType,
	#[serde(default)]
	pub collection: bool,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub collection_value_type: Option<Box<PropertyType>>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub class_name: Option<String>,
}

impl PropertyType {
	pub fn string() -> Self {
		Self::builtin(BuiltinType::String)
	}

	pub fn integer() -> Self {
		Self::builtin(BuiltinType::Int)
	}

	pub fn float() -> Self {
		Self::builtin(BuiltinType::Float)
	}

	pub fn boolean() -> Self {
		Self::builtin(BuiltinType::Bool)
	}

	/// An object type referring to the given host class.
	pub fn object(class_name: impl Into<String>) -> Self {
		Self {
			builtin: BuiltinType::Object,
			collection: false,
			collection_value_type: None,
			class_name: Some(class_name.into()),
		}
	}

	/// An object type whose class is unknown to the host.
	pub fn anonymous_object() -> Self {
		Self::builtin(BuiltinType::Object)
	}

	/// A collection of the given value type.
	pub fn collection(value_type: PropertyType) -> Self {
		Self {
			builtin: value_type.builtin,
			collection: true,
			collection_value_type: Some(Box::new(value_type)),
			class_name: None,
		}
	}

	fn builtin(builtin: BuiltinType) -> Self {
		Self {
			builtin,
			collection: false,
			collection_value_type: None,
			class_name: None,
		}
	}
}

/// Metadata for a single resource property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyMetadata {
	pub name: String,
	#[serde(default)]
	pub required: bool,
	/// Non-writable properties are documented as `readOnly`.
	#[serde(default = "default_true")]
	pub writable: bool,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub property_type: Option<PropertyType>,
	/// Whether a related resource should be embedded by full schema
	/// reference. Non-readable links degrade to an opaque string.
	#[serde(default)]
	pub readable_link: bool,
	/// Free-form overrides copied verbatim into the property schema.
	/// Keys set here win over everything the generator computes.
	#[serde(default, skip_serializing_if = "Map::is_empty")]
	pub swagger_context: Map<String, Value>,
}

impl PropertyMetadata {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			required: false,
			writable: true,
			description: None,
			property_type: None,
			readable_link: false,
			swagger_context: Map::new(),
		}
	}

	pub fn required(mut self, required: bool) -> Self {
		self.required = required;
		self
	}

	pub fn writable(mut self, writable: bool) -> Self {
		self.writable = writable;
		self
	}

	pub fn description(mut self, description: impl Into<String>) -> Self {
		self.description = Some(description.into());
		self
	}

	pub fn property_type(mut self, property_type: PropertyType) -> Self {
		self.property_type = Some(property_type);
		self
	}

	pub fn readable_link(mut self, readable_link: bool) -> Self {
		self.readable_link = readable_link;
		self
	}

	pub fn swagger_context(mut self, context: Map<String, Value>) -> Self {
		self.swagger_context = context;
		self
	}
}

/// HTTP method of a declared operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
	Get,
	Post,
	Put,
	Patch,
	Delete,
}

impl HttpMethod {
	/// Lowercased method name, used as the path-item key.
	pub fn as_path_key(self) -> &'static str {
		match self {
			Self::Get => "get",
			Self::Post => "post",
			Self::Put => "put",
			Self::Patch => "patch",
			Self::Delete => "delete",
		}
	}
}

/// Whether an operation addresses a single resource or the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationType {
	Item,
	Collection,
}

impl OperationType {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Item => "item",
			Self::Collection => "collection",
		}
	}
}

/// A single declared CRUD/collection operation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OperationMetadata {
	pub name: String,
	pub method: Option<HttpMethod>,
	/// Route override. A trailing `.{_format}` suffix is stripped.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub path: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub normalization_groups: Option<Vec<String>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub denormalization_groups: Option<Vec<String>>,
	/// Filter ids resolved against the [`FilterLocator`] for collection
	/// operations.
	///
	/// [`FilterLocator`]: crate::filters::FilterLocator
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub filters: Vec<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub pagination_enabled: Option<bool>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub pagination_client_items_per_page: Option<bool>,
	/// Seed for the generated operation object; seeded keys are never
	/// overwritten by generated boilerplate.
	#[serde(skip_serializing_if = "Map::is_empty")]
	pub swagger_context: Map<String, Value>,
}

impl OperationMetadata {
	pub fn new(name: impl Into<String>, method: HttpMethod) -> Self {
		Self {
			name: name.into(),
			method: Some(method),
			..Self::default()
		}
	}

	pub fn path(mut self, path: impl Into<String>) -> Self {
		self.path = Some(path.into());
		self
	}

	pub fn normalization_groups(mut self, groups: Vec<String>) -> Self {
		self.normalization_groups = Some(groups);
		self
	}

	pub fn denormalization_groups(mut self, groups: Vec<String>) -> Self {
		self.denormalization_groups = Some(groups);
		self
	}

	pub fn filters(mut self, filters: Vec<String>) -> Self {
		self.filters = filters;
		self
	}

	pub fn pagination_enabled(mut self, enabled: bool) -> Self {
		self.pagination_enabled = Some(enabled);
		self
	}

	pub fn pagination_client_items_per_page(mut self, enabled: bool) -> Self {
		self.pagination_client_items_per_page = Some(enabled);
		self
	}

	pub fn swagger_context(mut self, context: Map<String, Value>) -> Self {
		self.swagger_context = context;
		self
	}
}

/// Metadata describing one exposed resource.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceMetadata {
	pub short_name: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	/// Resource IRI, documented as `externalDocs.url`.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub iri: Option<String>,
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub item_operations: Vec<OperationMetadata>,
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub collection_operations: Vec<OperationMetadata>,
	/// Resource-level serializer-group defaults, used when an operation
	/// declares none of its own.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub normalization_groups: Option<Vec<String>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub denormalization_groups: Option<Vec<String>>,
}

impl ResourceMetadata {
	pub fn new(short_name: impl Into<String>) -> Self {
		Self {
			short_name: short_name.into(),
			..Self::default()
		}
	}

	pub fn description(mut self, description: impl Into<String>) -> Self {
		self.description = Some(description.into());
		self
	}

	pub fn iri(mut self, iri: impl Into<String>) -> Self {
		self.iri = Some(iri.into());
		self
	}

	pub fn item_operation(mut self, operation: OperationMetadata) -> Self {
		self.item_operations.push(operation);
		self
	}

	pub fn collection_operation(mut self, operation: OperationMetadata) -> Self {
		self.collection_operations.push(operation);
		self
	}

	pub fn normalization_groups(mut self, groups: Vec<String>) -> Self {
		self.normalization_groups = Some(groups);
		self
	}

	pub fn denormalization_groups(mut self, groups: Vec<String>) -> Self {
		self.denormalization_groups = Some(groups);
		self
	}

	/// Serializer context for an operation, falling back to the
	/// resource-level group defaults.
	///
	/// Responses use the normalization context, request bodies the
	/// denormalization context.
	pub fn serializer_context(
		&self,
		operation: &OperationMetadata,
		denormalization: bool,
	) -> Option<SerializerContext> {
		let groups = if denormalization {
			operation
				.denormalization_groups
				.as_ref()
				.or(self.denormalization_groups.as_ref())
		} else {
			operation
				.normalization_groups
				.as_ref()
				.or(self.normalization_groups.as_ref())
		};

		groups.map(|groups| SerializerContext {
			groups: groups.clone(),
		})
	}
}

/// Serializer context active while a schema is built.
///
/// Group order is significant: it is carried into the definition key exactly
/// as supplied.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SerializerContext {
	pub groups: Vec<String>,
}

impl SerializerContext {
	pub fn with_groups(groups: Vec<String>) -> Self {
		Self { groups }
	}
}

/// Enumerates the properties of a resource class, in a stable order.
pub trait PropertyEnumerator {
	/// Property descriptors for `resource_class`, optionally restricted to
	/// the given serialization groups.
	fn properties(
		&self,
		resource_class: &str,
		groups: Option<&[String]>,
	) -> Vec<PropertyMetadata>;
}

/// Resolves class identifiers against the host's resource model.
pub trait ResourceLookup {
	/// Whether `class_name` is an exposed resource.
	fn is_resource(&self, class_name: &str) -> bool;

	/// Metadata for a resource class. `None` makes referencing properties
	/// degrade to an opaque string rather than failing the generation.
	fn resource_metadata(&self, class_name: &str) -> Option<ResourceMetadata>;

	/// Whether `class_name` is a date/time implementation, documented as
	/// `{type: string, format: date-time}`.
	fn is_date_time(&self, _class_name: &str) -> bool {
		false
	}
}

/// Maps internal property names to their wire names.
pub trait NameNormalizer {
	fn normalize(&self, property_name: &str) -> String;
}

fn default_true() -> bool {
	true
}
