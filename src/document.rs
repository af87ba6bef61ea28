//! Swagger 2.0 document assembly
//!
//! [`DocumentGenerator`] walks every resource, emits the path items for its
//! declared operations and assembles the top-level document: `swagger`,
//! `basePath`, `info`, `paths`, the security blocks and the `definitions`
//! map. `paths` and `definitions` are sorted by key before emission so the
//! output is byte-identical across runs regardless of traversal order.

use crate::config::{ApiKeyLocation, SwaggerConfig};
use crate::definitions::DefinitionBuilder;
use crate::filters::{FilterLocator, filter_parameters};
use crate::metadata::{
	HttpMethod, NameNormalizer, OperationMetadata, OperationType, PropertyEnumerator,
	ResourceLookup, ResourceMetadata,
};
use crate::operations::{
	PathOperation, fill_delete, fill_get_collection, fill_get_item, fill_post, fill_put,
	items_per_page_parameter, lcfirst, pagination_parameter, ucfirst,
};
use crate::registry::DefinitionRegistry;
use crate::schema::Definition;
use crate::{SchemaError, SchemaResult};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

const SWAGGER_VERSION: &str = "2.0";

/// `info` block of the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Info {
	pub title: String,
	pub version: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
}

/// A `securityDefinitions` entry, either OAuth or apiKey shaped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecurityScheme {
	#[serde(rename = "type")]
	pub scheme_type: String,
	pub description: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub flow: Option<String>,
	#[serde(rename = "tokenUrl", default, skip_serializing_if = "Option::is_none")]
	pub token_url: Option<String>,
	#[serde(
		rename = "authorizationUrl",
		default,
		skip_serializing_if = "Option::is_none"
	)]
	pub authorization_url: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub scopes: Option<IndexMap<String, String>>,
	#[serde(rename = "in", default, skip_serializing_if = "Option::is_none")]
	pub location: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
}

/// The assembled Swagger 2.0 document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwaggerDocument {
	pub swagger: String,
	#[serde(rename = "basePath")]
	pub base_path: String,
	pub info: Info,
	pub paths: IndexMap<String, IndexMap<String, PathOperation>>,
	#[serde(
		rename = "securityDefinitions",
		default,
		skip_serializing_if = "IndexMap::is_empty"
	)]
	pub security_definitions: IndexMap<String, SecurityScheme>,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub security: Vec<IndexMap<String, Vec<String>>>,
	/// Omitted entirely when no schemas were produced.
	#[serde(default, skip_serializing_if = "IndexMap::is_empty")]
	pub definitions: IndexMap<String, Definition>,
}

impl SwaggerDocument {
	pub fn to_json(&self) -> SchemaResult<String> {
		Ok(serde_json::to_string(self)?)
	}

	pub fn to_json_pretty(&self) -> SchemaResult<String> {
		Ok(serde_json::to_string_pretty(self)?)
	}
}

/// Generates a Swagger 2.0 document from resource metadata.
///
/// A fresh [`DefinitionRegistry`] is created per [`generate`] call; the
/// generator itself holds only configuration and collaborator references and
/// can be reused across calls.
///
/// [`generate`]: Self::generate
pub struct DocumentGenerator<'a> {
	config: SwaggerConfig,
	properties: &'a dyn PropertyEnumerator,
	resources: &'a dyn ResourceLookup,
	names: Option<&'a dyn NameNormalizer>,
	filters: Option<&'a dyn FilterLocator>,
}

impl<'a> DocumentGenerator<'a> {
	pub fn new(
		config: SwaggerConfig,
		properties: &'a dyn PropertyEnumerator,
		resources: &'a dyn ResourceLookup,
	) -> Self {
		Self {
			config,
			properties,
			resources,
			names: None,
			filters: None,
		}
	}

	pub fn with_name_normalizer(mut self, names: &'a dyn NameNormalizer) -> Self {
		self.names = Some(names);
		self
	}

	pub fn with_filter_locator(mut self, filters: &'a dyn FilterLocator) -> Self {
		self.filters = Some(filters);
		self
	}

	/// Generates the document for the given resource classes.
	///
	/// Fails fast on unknown classes, empty short names and unresolvable
	/// operation methods; undocumentable property types degrade to strings
	/// instead (see [`DefinitionBuilder::property_type`]).
	pub fn generate(&self, resource_classes: &[&str]) -> SchemaResult<SwaggerDocument> {
		let mut registry = DefinitionRegistry::new();
		let mut paths: IndexMap<String, IndexMap<String, PathOperation>> = IndexMap::new();

		let mut builder = DefinitionBuilder::new(self.properties, self.resources);
		if let Some(names) = self.names {
			builder = builder.with_name_normalizer(names);
		}

		for resource_class in resource_classes {
			let metadata = self
				.resources
				.resource_metadata(resource_class)
				.ok_or_else(|| SchemaError::UnknownResource(resource_class.to_string()))?;
			debug!(resource_class, short_name = %metadata.short_name, "documenting resource");

			self.add_paths(
				&builder,
				&mut registry,
				&mut paths,
				resource_class,
				&metadata,
				OperationType::Collection,
			)?;
			self.add_paths(
				&builder,
				&mut registry,
				&mut paths,
				resource_class,
				&metadata,
				OperationType::Item,
			)?;
		}

		paths.sort_keys();
		let definitions = registry.into_sorted();

		Ok(self.compute_doc(paths, definitions))
	}

	fn add_paths(
		&self,
		builder: &DefinitionBuilder<'_>,
		registry: &mut DefinitionRegistry,
		paths: &mut IndexMap<String, IndexMap<String, PathOperation>>,
		resource_class: &str,
		metadata: &ResourceMetadata,
		operation_type: OperationType,
	) -> SchemaResult<()> {
		let operations = match operation_type {
			OperationType::Collection => &metadata.collection_operations,
			OperationType::Item => &metadata.item_operations,
		};

		for operation in operations {
			let method = resolve_method(operation)?;
			let path = operation_path(&metadata.short_name, operation, operation_type);
			let path_operation = self.path_operation(
				builder,
				registry,
				resource_class,
				metadata,
				operation,
				method,
				operation_type,
			)?;

			paths
				.entry(path)
				.or_default()
				.insert(method.as_path_key().to_string(), path_operation);
		}

		Ok(())
	}

	fn path_operation(
		&self,
		builder: &DefinitionBuilder<'_>,
		registry: &mut DefinitionRegistry,
		resource_class: &str,
		metadata: &ResourceMetadata,
		operation: &OperationMetadata,
		method: HttpMethod,
		operation_type: OperationType,
	) -> SchemaResult<PathOperation> {
		let short_name = &metadata.short_name;
		let mime_types = &self.config.mime_types;

		let mut path_operation = PathOperation::from_context(&operation.swagger_context)?;
		if path_operation.tags.is_empty() {
			path_operation.tags = vec![short_name.clone()];
		}
		if path_operation.operation_id.is_none() {
			path_operation.operation_id = Some(format!(
				"{}{}{}",
				lcfirst(&operation.name),
				ucfirst(short_name),
				ucfirst(operation_type.as_str())
			));
		}

		match method {
			HttpMethod::Get if operation_type == OperationType::Collection => {
				let context = metadata.serializer_context(operation, false);
				let response_key =
					builder.resolve(registry, resource_class, metadata, context.as_ref())?;

				let filter_params = match self.filters {
					Some(locator) => filter_parameters(
						locator,
						builder,
						registry,
						resource_class,
						&operation.filters,
						context.as_ref(),
					)?,
					None => Vec::new(),
				};

				fill_get_collection(
					&mut path_operation,
					short_name,
					mime_types,
					&response_key,
					filter_params,
				);
				self.add_pagination_parameters(&mut path_operation, operation);
			}
			HttpMethod::Get => {
				let context = metadata.serializer_context(operation, false);
				let response_key =
					builder.resolve(registry, resource_class, metadata, context.as_ref())?;
				fill_get_item(&mut path_operation, short_name, mime_types, &response_key);
			}
			HttpMethod::Post => {
				let request_context = metadata.serializer_context(operation, true);
				let request_key =
					builder.resolve(registry, resource_class, metadata, request_context.as_ref())?;
				let response_context = metadata.serializer_context(operation, false);
				let response_key = builder.resolve(
					registry,
					resource_class,
					metadata,
					response_context.as_ref(),
				)?;
				fill_post(
					&mut path_operation,
					short_name,
					mime_types,
					&request_key,
					&response_key,
				);
			}
			HttpMethod::Put | HttpMethod::Patch => {
				if method == HttpMethod::Patch && path_operation.summary.is_none() {
					path_operation.summary =
						Some(format!("Updates the {short_name} resource."));
				}
				let request_context = metadata.serializer_context(operation, true);
				let request_key =
					builder.resolve(registry, resource_class, metadata, request_context.as_ref())?;
				let response_context = metadata.serializer_context(operation, false);
				let response_key = builder.resolve(
					registry,
					resource_class,
					metadata,
					response_context.as_ref(),
				)?;
				fill_put(
					&mut path_operation,
					short_name,
					mime_types,
					&request_key,
					&response_key,
				);
			}
			HttpMethod::Delete => {
				fill_delete(&mut path_operation, short_name);
			}
		}

		Ok(path_operation)
	}

	fn add_pagination_parameters(
		&self,
		path_operation: &mut PathOperation,
		operation: &OperationMetadata,
	) {
		let pagination = &self.config.pagination;
		if !pagination.enabled || !operation.pagination_enabled.unwrap_or(true) {
			return;
		}

		push_unless_present(
			path_operation,
			pagination_parameter(&pagination.page_parameter_name),
		);

		if operation
			.pagination_client_items_per_page
			.unwrap_or(pagination.client_items_per_page)
		{
			push_unless_present(
				path_operation,
				items_per_page_parameter(&pagination.items_per_page_parameter_name),
			);
		}
	}

	fn compute_doc(
		&self,
		paths: IndexMap<String, IndexMap<String, PathOperation>>,
		definitions: IndexMap<String, Definition>,
	) -> SwaggerDocument {
		let mut security_definitions = IndexMap::new();
		let mut security = Vec::new();

		if let Some(oauth) = &self.config.oauth {
			security_definitions.insert(
				"oauth".to_string(),
				SecurityScheme {
					scheme_type: oauth.auth_type.clone(),
					description: "OAuth client_credentials Grant".to_string(),
					flow: Some(oauth.flow.clone()),
					token_url: Some(oauth.token_url.clone()),
					authorization_url: Some(oauth.authorization_url.clone()),
					scopes: Some(oauth.scopes.clone()),
					location: None,
					name: None,
				},
			);
			security.push(IndexMap::from([("oauth".to_string(), Vec::new())]));
		}

		for (key, api_key) in &self.config.api_keys {
			let transport = match api_key.location {
				ApiKeyLocation::Query => "query parameter",
				ApiKeyLocation::Header => "header",
			};
			security_definitions.insert(
				key.clone(),
				SecurityScheme {
					scheme_type: "apiKey".to_string(),
					description: format!("Value for the {} {}", api_key.name, transport),
					flow: None,
					token_url: None,
					authorization_url: None,
					scopes: None,
					location: Some(api_key.location.as_str().to_string()),
					name: Some(api_key.name.clone()),
				},
			);
			security.push(IndexMap::from([(key.clone(), Vec::new())]));
		}

		SwaggerDocument {
			swagger: SWAGGER_VERSION.to_string(),
			base_path: self.config.base_path.clone(),
			info: Info {
				title: self.config.title.clone(),
				version: self.config.version.clone(),
				description: self.config.description.clone(),
			},
			paths,
			security_definitions,
			security,
			definitions,
		}
	}
}

fn push_unless_present(path_operation: &mut PathOperation, parameter: crate::operations::Parameter) {
	if path_operation
		.parameters
		.iter()
		.all(|existing| existing.name != parameter.name)
	{
		path_operation.parameters.push(parameter);
	}
}

/// Resolves the HTTP method of an operation, falling back to its name for
/// the conventional `get`/`post`/`put`/`patch`/`delete` operations.
fn resolve_method(operation: &OperationMetadata) -> SchemaResult<HttpMethod> {
	if let Some(method) = operation.method {
		return Ok(method);
	}

	match operation.name.to_ascii_lowercase().as_str() {
		"get" => Ok(HttpMethod::Get),
		"post" => Ok(HttpMethod::Post),
		"put" => Ok(HttpMethod::Put),
		"patch" => Ok(HttpMethod::Patch),
		"delete" => Ok(HttpMethod::Delete),
		_ => Err(SchemaError::UnresolvableMethod(operation.name.clone())),
	}
}

/// Derives the route for an operation.
///
/// An explicit path override is honored (minus a trailing `.{_format}`
/// suffix, since optional path parameters are not expressible); otherwise
/// the route is the snake-cased, pluralized short name, plus `/{id}` for
/// item operations.
fn operation_path(
	short_name: &str,
	operation: &OperationMetadata,
	operation_type: OperationType,
) -> String {
	if let Some(path) = &operation.path {
		return path
			.strip_suffix(".{_format}")
			.unwrap_or(path)
			.to_string();
	}

	let segment = route_segment(short_name);
	match operation_type {
		OperationType::Collection => format!("/{segment}"),
		OperationType::Item => format!("/{segment}/{{id}}"),
	}
}

fn route_segment(short_name: &str) -> String {
	pluralize(&snake_case(short_name))
}

fn snake_case(value: &str) -> String {
	let mut out = String::with_capacity(value.len());
	for (index, ch) in value.char_indices() {
		if ch.is_uppercase() {
			if index > 0 {
				out.push('_');
			}
			out.extend(ch.to_lowercase());
		} else {
			out.push(ch);
		}
	}
	out
}

fn pluralize(value: &str) -> String {
	if let Some(stem) = value.strip_suffix('y') {
		let preceded_by_vowel = stem
			.chars()
			.last()
			.is_some_and(|ch| matches!(ch, 'a' | 'e' | 'i' | 'o' | 'u'));
		if !preceded_by_vowel {
			return format!("{stem}ies");
		}
	}

	if value.ends_with('s')
		|| value.ends_with('x')
		|| value.ends_with('z')
		|| value.ends_with("ch")
		|| value.ends_with("sh")
	{
		return format!("{value}es");
	}

	format!("{value}s")
}
