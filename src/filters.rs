//! Filter parameter documentation
//!
//! Collection operations may declare filter ids; a [`FilterLocator`] maps
//! them to descriptions, each of which becomes a query parameter. Unknown
//! filter ids are skipped silently so a stale id never breaks generation.

use crate::definitions::DefinitionBuilder;
use crate::metadata::{BuiltinType, SerializerContext};
use crate::operations::Parameter;
use crate::registry::DefinitionRegistry;
use crate::SchemaResult;
use serde_json::{Map, Value};

/// Description of one query parameter exposed by a filter.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterDescription {
	pub name: String,
	pub required: bool,
	pub builtin: BuiltinType,
	/// Free-form overrides; keys set here win over the generated parameter.
	pub swagger: Map<String, Value>,
}

impl FilterDescription {
	pub fn new(name: impl Into<String>, builtin: BuiltinType) -> Self {
		Self {
			name: name.into(),
			required: false,
			builtin,
			swagger: Map::new(),
		}
	}

	pub fn required(mut self, required: bool) -> Self {
		self.required = required;
		self
	}

	pub fn swagger(mut self, swagger: Map<String, Value>) -> Self {
		self.swagger = swagger;
		self
	}
}

/// A registered filter, able to describe its parameters for a resource.
pub trait Filter {
	fn description(&self, resource_class: &str) -> Vec<FilterDescription>;
}

/// Resolves filter ids declared on operations.
pub trait FilterLocator {
	fn filter(&self, filter_id: &str) -> Option<&dyn Filter>;
}

/// Builds the query parameters for the filters of a collection operation.
pub fn filter_parameters(
	locator: &dyn FilterLocator,
	builder: &DefinitionBuilder<'_>,
	registry: &mut DefinitionRegistry,
	resource_class: &str,
	filter_ids: &[String],
	context: Option<&SerializerContext>,
) -> SchemaResult<Vec<Parameter>> {
	let mut parameters = Vec::new();

	for filter_id in filter_ids {
		let Some(filter) = locator.filter(filter_id) else {
			continue;
		};

		for description in filter.description(resource_class) {
			let fragment = builder.property_type(
				registry,
				description.builtin,
				false,
				None,
				false,
				context,
			)?;

			let mut parameter = Parameter {
				name: description.name.clone(),
				location: "query".to_string(),
				required: Some(description.required),
				param_type: fragment.schema_type,
				..Parameter::default()
			};
			parameter.apply_overrides(&description.swagger);

			parameters.push(parameter);
		}
	}

	Ok(parameters)
}
