//! Definition schema construction
//!
//! [`DefinitionBuilder`] turns resource metadata into definition schemas,
//! resolving nested resource references through the registry. `resolve` is
//! the only entry point that mutates the registry; the property-type mapping
//! recurses back into it for readable links, which is what makes the
//! placeholder protocol in [`crate::registry`] load-bearing.

use crate::metadata::{
	BuiltinType, NameNormalizer, PropertyEnumerator, PropertyMetadata, ResourceLookup,
	ResourceMetadata, SerializerContext,
};
use crate::registry::{DefinitionRegistry, definition_key};
use crate::schema::{Definition, ExternalDocs, PropertySchema, TypeFragment};
use crate::{SchemaError, SchemaResult};
use serde_json::Value;
use tracing::debug;

/// Builds definition schemas over the host's metadata collaborators.
///
/// The builder itself is stateless; all registry state is passed explicitly
/// by mutable reference so the recursion guard stays local and testable.
pub struct DefinitionBuilder<'a> {
	properties: &'a dyn PropertyEnumerator,
	resources: &'a dyn ResourceLookup,
	names: Option<&'a dyn NameNormalizer>,
}

impl<'a> DefinitionBuilder<'a> {
	pub fn new(
		properties: &'a dyn PropertyEnumerator,
		resources: &'a dyn ResourceLookup,
	) -> Self {
		Self {
			properties,
			resources,
			names: None,
		}
	}

	pub fn with_name_normalizer(mut self, names: &'a dyn NameNormalizer) -> Self {
		self.names = Some(names);
		self
	}

	/// Resolves the definition key for a resource under a serializer
	/// context, building and registering the schema on first use.
	///
	/// The key is returned immediately when already present, including while
	/// its schema is still being built further up the stack; that existence
	/// check is what breaks self-referencing and mutually-recursive resource
	/// graphs. Otherwise a placeholder is inserted first, the schema is
	/// built (possibly re-entering `resolve` for nested resources), and the
	/// placeholder is overwritten with the result.
	pub fn resolve(
		&self,
		registry: &mut DefinitionRegistry,
		resource_class: &str,
		metadata: &ResourceMetadata,
		context: Option<&SerializerContext>,
	) -> SchemaResult<String> {
		if metadata.short_name.is_empty() {
			return Err(SchemaError::EmptyShortName(resource_class.to_string()));
		}

		let groups = context.map(|context| context.groups.as_slice()).unwrap_or(&[]);
		let key = definition_key(&metadata.short_name, groups);

		if registry.contains(&key) {
			return Ok(key);
		}

		debug!(key, resource_class, "building definition schema");
		registry.insert_placeholder(&key);
		let definition = self.definition_schema(registry, resource_class, metadata, context)?;
		registry.fill(&key, definition);

		Ok(key)
	}

	/// Maps a type descriptor to a schema type fragment.
	///
	/// Total over its inputs: anything that cannot be documented precisely
	/// degrades to `{type: string}`. A resource-typed readable link is the
	/// single place this recurses into [`Self::resolve`].
	pub fn property_type(
		&self,
		registry: &mut DefinitionRegistry,
		builtin: BuiltinType,
		is_collection: bool,
		class_name: Option<&str>,
		readable_link: bool,
		context: Option<&SerializerContext>,
	) -> SchemaResult<TypeFragment> {
		if is_collection {
			let items = self.property_type(
				registry,
				builtin,
				false,
				class_name,
				readable_link,
				context,
			)?;
			return Ok(TypeFragment::array(items));
		}

		let fragment = match builtin {
			BuiltinType::String => TypeFragment::string(),
			BuiltinType::Int => TypeFragment::integer(),
			BuiltinType::Float => TypeFragment::number(),
			BuiltinType::Bool => TypeFragment::boolean(),
			BuiltinType::Object => {
				let Some(class_name) = class_name else {
					return Ok(TypeFragment::string());
				};

				if self.resources.is_date_time(class_name) {
					return Ok(TypeFragment::date_time());
				}

				if !self.resources.is_resource(class_name) {
					return Ok(TypeFragment::string());
				}

				if readable_link {
					// A resource without resolvable metadata is documented
					// as an opaque string; partial documentation beats
					// aborting the whole generation.
					if let Some(metadata) = self.resources.resource_metadata(class_name) {
						let key = self.resolve(registry, class_name, &metadata, context)?;
						return Ok(TypeFragment::reference(format!("#/definitions/{key}")));
					}
				}

				TypeFragment::string()
			}
		};

		Ok(fragment)
	}

	fn definition_schema(
		&self,
		registry: &mut DefinitionRegistry,
		resource_class: &str,
		metadata: &ResourceMetadata,
		context: Option<&SerializerContext>,
	) -> SchemaResult<Definition> {
		let mut definition = Definition::object();
		definition.description = metadata.description.clone();
		definition.external_docs = metadata
			.iri
			.clone()
			.map(|url| ExternalDocs { url });

		let groups = context.map(|context| context.groups.as_slice());
		for property in self.properties.properties(resource_class, groups) {
			let name = match self.names {
				Some(names) => names.normalize(&property.name),
				None => property.name.clone(),
			};

			if property.required {
				definition.require(&name);
			}

			let schema = self.property_schema(registry, &property, context)?;
			definition.properties.insert(name, schema);
		}

		Ok(definition)
	}

	fn property_schema(
		&self,
		registry: &mut DefinitionRegistry,
		property: &PropertyMetadata,
		context: Option<&SerializerContext>,
	) -> SchemaResult<PropertySchema> {
		let mut schema = PropertySchema::from_context(&property.swagger_context);

		if !property.writable {
			schema.set("readOnly", Value::Bool(true));
		}

		if let Some(description) = &property.description {
			schema.set("description", Value::String(description.clone()));
		}

		let Some(property_type) = &property.property_type else {
			return Ok(schema);
		};

		let is_collection = property_type.collection;
		let (builtin, class_name) = if is_collection {
			match &property_type.collection_value_type {
				Some(value_type) => (value_type.builtin, value_type.class_name.as_deref()),
				// Untyped collection values are undocumentable; fall back
				// to an array of strings.
				None => (BuiltinType::String, None),
			}
		} else {
			(property_type.builtin, property_type.class_name.as_deref())
		};

		let fragment = self.property_type(
			registry,
			builtin,
			is_collection,
			class_name,
			property.readable_link,
			context,
		)?;
		schema.merge_fragment(fragment);

		Ok(schema)
	}
}
