//! Shared in-memory metadata fixture for the integration tests.
#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use swagger_gen::filters::{Filter, FilterDescription, FilterLocator};
use swagger_gen::metadata::{
	NameNormalizer, PropertyEnumerator, PropertyMetadata, ResourceLookup, ResourceMetadata,
};

/// In-memory resource model implementing the generator's collaborators.
#[derive(Default)]
pub struct TestMetadata {
	resources: HashMap<String, ResourceMetadata>,
	properties: HashMap<String, Vec<PropertyMetadata>>,
	/// Classes known as resources even when no metadata is registered,
	/// to exercise the opaque-string fallback.
	resource_classes: HashSet<String>,
	date_time_classes: HashSet<String>,
}

impl TestMetadata {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn resource(
		mut self,
		class_name: &str,
		metadata: ResourceMetadata,
		properties: Vec<PropertyMetadata>,
	) -> Self {
		self.resource_classes.insert(class_name.to_string());
		self.resources.insert(class_name.to_string(), metadata);
		self.properties.insert(class_name.to_string(), properties);
		self
	}

	/// Registers a resource class without metadata.
	pub fn bare_resource_class(mut self, class_name: &str) -> Self {
		self.resource_classes.insert(class_name.to_string());
		self
	}

	pub fn date_time_class(mut self, class_name: &str) -> Self {
		self.date_time_classes.insert(class_name.to_string());
		self
	}
}

impl PropertyEnumerator for TestMetadata {
	fn properties(
		&self,
		resource_class: &str,
		_groups: Option<&[String]>,
	) -> Vec<PropertyMetadata> {
		self.properties
			.get(resource_class)
			.cloned()
			.unwrap_or_default()
	}
}

impl ResourceLookup for TestMetadata {
	fn is_resource(&self, class_name: &str) -> bool {
		self.resource_classes.contains(class_name)
	}

	fn resource_metadata(&self, class_name: &str) -> Option<ResourceMetadata> {
		self.resources.get(class_name).cloned()
	}

	fn is_date_time(&self, class_name: &str) -> bool {
		self.date_time_classes.contains(class_name)
	}
}

/// Normalizer turning snake_case property names into camelCase.
pub struct CamelCaseNormalizer;

impl NameNormalizer for CamelCaseNormalizer {
	fn normalize(&self, property_name: &str) -> String {
		let mut out = String::with_capacity(property_name.len());
		let mut uppercase_next = false;
		for ch in property_name.chars() {
			if ch == '_' {
				uppercase_next = true;
			} else if uppercase_next {
				out.extend(ch.to_uppercase());
				uppercase_next = false;
			} else {
				out.push(ch);
			}
		}
		out
	}
}

/// Filter locator backed by a static description list per filter id.
#[derive(Default)]
pub struct TestFilterLocator {
	filters: HashMap<String, TestFilter>,
}

pub struct TestFilter {
	descriptions: Vec<FilterDescription>,
}

impl TestFilterLocator {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_filter(mut self, filter_id: &str, descriptions: Vec<FilterDescription>) -> Self {
		self.filters
			.insert(filter_id.to_string(), TestFilter { descriptions });
		self
	}
}

impl Filter for TestFilter {
	fn description(&self, _resource_class: &str) -> Vec<FilterDescription> {
		self.descriptions.clone()
	}
}

impl FilterLocator for TestFilterLocator {
	fn filter(&self, filter_id: &str) -> Option<&dyn Filter> {
		self.filters.get(filter_id).map(|filter| filter as &dyn Filter)
	}
}
