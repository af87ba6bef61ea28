//! Definition resolution tests: memoization, cycle safety, key formats and
//! the property-type fallbacks.

mod common;

use common::{CamelCaseNormalizer, TestMetadata};
use serde_json::json;
use swagger_gen::metadata::{
	PropertyMetadata, PropertyType, ResourceLookup, ResourceMetadata, SerializerContext,
};
use swagger_gen::{DefinitionBuilder, DefinitionRegistry};

fn book_with_author() -> TestMetadata {
	TestMetadata::new()
		.resource(
			"App\\Entity\\Book",
			ResourceMetadata::new("Book"),
			vec![
				PropertyMetadata::new("name")
					.required(true)
					.property_type(PropertyType::string()),
				PropertyMetadata::new("author")
					.property_type(PropertyType::object("App\\Entity\\Person"))
					.readable_link(true),
			],
		)
		.resource(
			"App\\Entity\\Person",
			ResourceMetadata::new("Person"),
			vec![PropertyMetadata::new("name").property_type(PropertyType::string())],
		)
}

#[test]
fn key_is_short_name_without_groups() {
	let metadata = book_with_author();
	let builder = DefinitionBuilder::new(&metadata, &metadata);
	let mut registry = DefinitionRegistry::new();

	let key = builder
		.resolve(
			&mut registry,
			"App\\Entity\\Book",
			&ResourceMetadata::new("Book"),
			None,
		)
		.unwrap();
	assert_eq!(key, "Book");
}

#[test]
fn key_joins_groups_in_supplied_order() {
	let metadata = book_with_author();
	let builder = DefinitionBuilder::new(&metadata, &metadata);
	let mut registry = DefinitionRegistry::new();

	let context = SerializerContext::with_groups(vec!["read".into(), "admin".into()]);
	let key = builder
		.resolve(
			&mut registry,
			"App\\Entity\\Book",
			&ResourceMetadata::new("Book"),
			Some(&context),
		)
		.unwrap();
	assert_eq!(key, "Book-read_admin");

	// Group order is part of the identity: the reversed set is a distinct
	// entry, exactly as the original generator behaves. The context also
	// propagates into the nested Person resolve, one entry per ordering.
	let reversed = SerializerContext::with_groups(vec!["admin".into(), "read".into()]);
	let key = builder
		.resolve(
			&mut registry,
			"App\\Entity\\Book",
			&ResourceMetadata::new("Book"),
			Some(&reversed),
		)
		.unwrap();
	assert_eq!(key, "Book-admin_read");
	assert_eq!(registry.len(), 4);
	for key in [
		"Book-read_admin",
		"Person-read_admin",
		"Book-admin_read",
		"Person-admin_read",
	] {
		assert!(registry.contains(key), "missing entry for {key}");
	}
}

#[test]
fn resolve_is_idempotent() {
	let metadata = book_with_author();
	let builder = DefinitionBuilder::new(&metadata, &metadata);
	let mut registry = DefinitionRegistry::new();
	let resource = ResourceMetadata::new("Book");

	let first = builder
		.resolve(&mut registry, "App\\Entity\\Book", &resource, None)
		.unwrap();
	let entries = registry.len();
	let second = builder
		.resolve(&mut registry, "App\\Entity\\Book", &resource, None)
		.unwrap();

	assert_eq!(first, second);
	assert_eq!(registry.len(), entries);
}

#[test]
fn self_referencing_resource_terminates() {
	let metadata = TestMetadata::new().resource(
		"App\\Entity\\TreeNode",
		ResourceMetadata::new("TreeNode"),
		vec![
			PropertyMetadata::new("value").property_type(PropertyType::integer()),
			PropertyMetadata::new("parent")
				.property_type(PropertyType::object("App\\Entity\\TreeNode"))
				.readable_link(true),
			PropertyMetadata::new("children")
				.property_type(PropertyType::collection(PropertyType::object(
					"App\\Entity\\TreeNode",
				)))
				.readable_link(true),
		],
	);
	let builder = DefinitionBuilder::new(&metadata, &metadata);
	let mut registry = DefinitionRegistry::new();

	let key = builder
		.resolve(
			&mut registry,
			"App\\Entity\\TreeNode",
			&metadata.resource_metadata("App\\Entity\\TreeNode").unwrap(),
			None,
		)
		.unwrap();
	assert_eq!(key, "TreeNode");
	assert_eq!(registry.len(), 1);

	let definition = serde_json::to_value(registry.get("TreeNode").unwrap()).unwrap();
	assert_eq!(
		definition["properties"]["parent"],
		json!({"$ref": "#/definitions/TreeNode"})
	);
	assert_eq!(
		definition["properties"]["children"],
		json!({"type": "array", "items": {"$ref": "#/definitions/TreeNode"}})
	);
}

#[test]
fn mutually_recursive_resources_terminate() {
	let metadata = TestMetadata::new()
		.resource(
			"App\\Entity\\Book",
			ResourceMetadata::new("Book"),
			vec![
				PropertyMetadata::new("author")
					.property_type(PropertyType::object("App\\Entity\\Person"))
					.readable_link(true),
			],
		)
		.resource(
			"App\\Entity\\Person",
			ResourceMetadata::new("Person"),
			vec![
				PropertyMetadata::new("books")
					.property_type(PropertyType::collection(PropertyType::object(
						"App\\Entity\\Book",
					)))
					.readable_link(true),
			],
		);
	let builder = DefinitionBuilder::new(&metadata, &metadata);
	let mut registry = DefinitionRegistry::new();

	builder
		.resolve(
			&mut registry,
			"App\\Entity\\Book",
			&metadata.resource_metadata("App\\Entity\\Book").unwrap(),
			None,
		)
		.unwrap();

	assert_eq!(registry.len(), 2);
	let book = serde_json::to_value(registry.get("Book").unwrap()).unwrap();
	assert_eq!(
		book["properties"]["author"],
		json!({"$ref": "#/definitions/Person"})
	);
	let person = serde_json::to_value(registry.get("Person").unwrap()).unwrap();
	assert_eq!(
		person["properties"]["books"],
		json!({"type": "array", "items": {"$ref": "#/definitions/Book"}})
	);
}

#[test]
fn readable_link_embeds_the_related_resource() {
	let metadata = book_with_author();
	let builder = DefinitionBuilder::new(&metadata, &metadata);
	let mut registry = DefinitionRegistry::new();

	builder
		.resolve(
			&mut registry,
			"App\\Entity\\Book",
			&metadata.resource_metadata("App\\Entity\\Book").unwrap(),
			None,
		)
		.unwrap();

	let book = serde_json::to_value(registry.get("Book").unwrap()).unwrap();
	assert_eq!(
		book["properties"]["author"],
		json!({"$ref": "#/definitions/Person"})
	);
	assert!(registry.contains("Person"));
}

#[test]
fn non_readable_link_degrades_to_string() {
	let metadata = TestMetadata::new()
		.resource(
			"App\\Entity\\Book",
			ResourceMetadata::new("Book"),
			vec![
				PropertyMetadata::new("author")
					.property_type(PropertyType::object("App\\Entity\\Person"))
					.readable_link(false),
			],
		)
		.resource(
			"App\\Entity\\Person",
			ResourceMetadata::new("Person"),
			vec![],
		);
	let builder = DefinitionBuilder::new(&metadata, &metadata);
	let mut registry = DefinitionRegistry::new();

	builder
		.resolve(
			&mut registry,
			"App\\Entity\\Book",
			&metadata.resource_metadata("App\\Entity\\Book").unwrap(),
			None,
		)
		.unwrap();

	let book = serde_json::to_value(registry.get("Book").unwrap()).unwrap();
	assert_eq!(book["properties"]["author"], json!({"type": "string"}));
	assert!(!registry.contains("Person"));
}

#[test]
fn resource_class_without_metadata_degrades_to_string() {
	let metadata = TestMetadata::new()
		.resource(
			"App\\Entity\\Book",
			ResourceMetadata::new("Book"),
			vec![
				PropertyMetadata::new("publisher")
					.property_type(PropertyType::object("App\\Entity\\Publisher"))
					.readable_link(true),
			],
		)
		.bare_resource_class("App\\Entity\\Publisher");
	let builder = DefinitionBuilder::new(&metadata, &metadata);
	let mut registry = DefinitionRegistry::new();

	builder
		.resolve(
			&mut registry,
			"App\\Entity\\Book",
			&metadata.resource_metadata("App\\Entity\\Book").unwrap(),
			None,
		)
		.unwrap();

	let book = serde_json::to_value(registry.get("Book").unwrap()).unwrap();
	assert_eq!(book["properties"]["publisher"], json!({"type": "string"}));
}

#[test]
fn date_time_property_gets_the_format() {
	let metadata = TestMetadata::new()
		.resource(
			"App\\Entity\\Book",
			ResourceMetadata::new("Book"),
			vec![
				PropertyMetadata::new("published_at")
					.property_type(PropertyType::object("DateTimeImmutable")),
			],
		)
		.date_time_class("DateTimeImmutable");
	let builder = DefinitionBuilder::new(&metadata, &metadata);
	let mut registry = DefinitionRegistry::new();

	builder
		.resolve(
			&mut registry,
			"App\\Entity\\Book",
			&metadata.resource_metadata("App\\Entity\\Book").unwrap(),
			None,
		)
		.unwrap();

	let book = serde_json::to_value(registry.get("Book").unwrap()).unwrap();
	assert_eq!(
		book["properties"]["published_at"],
		json!({"type": "string", "format": "date-time"})
	);
}

#[test]
fn definition_carries_description_required_and_external_docs() {
	let metadata = TestMetadata::new().resource(
		"App\\Entity\\Book",
		ResourceMetadata::new("Book")
			.description("A printed or digital book.")
			.iri("https://schema.org/Book"),
		vec![
			PropertyMetadata::new("isbn")
				.required(true)
				.description("The ISBN of the book")
				.property_type(PropertyType::string()),
			PropertyMetadata::new("reviews")
				.writable(false)
				.property_type(PropertyType::collection(PropertyType::string())),
		],
	);
	let builder = DefinitionBuilder::new(&metadata, &metadata);
	let mut registry = DefinitionRegistry::new();

	builder
		.resolve(
			&mut registry,
			"App\\Entity\\Book",
			&metadata.resource_metadata("App\\Entity\\Book").unwrap(),
			None,
		)
		.unwrap();

	let book = serde_json::to_value(registry.get("Book").unwrap()).unwrap();
	assert_eq!(
		book,
		json!({
			"type": "object",
			"description": "A printed or digital book.",
			"externalDocs": {"url": "https://schema.org/Book"},
			"required": ["isbn"],
			"properties": {
				"isbn": {
					"description": "The ISBN of the book",
					"type": "string"
				},
				"reviews": {
					"readOnly": true,
					"type": "array",
					"items": {"type": "string"}
				}
			}
		})
	);
}

#[test]
fn name_normalizer_rewrites_property_and_required_names() {
	let metadata = TestMetadata::new().resource(
		"App\\Entity\\Book",
		ResourceMetadata::new("Book"),
		vec![
			PropertyMetadata::new("published_at")
				.required(true)
				.property_type(PropertyType::string()),
		],
	);
	let normalizer = CamelCaseNormalizer;
	let builder = DefinitionBuilder::new(&metadata, &metadata).with_name_normalizer(&normalizer);
	let mut registry = DefinitionRegistry::new();

	builder
		.resolve(
			&mut registry,
			"App\\Entity\\Book",
			&metadata.resource_metadata("App\\Entity\\Book").unwrap(),
			None,
		)
		.unwrap();

	let book = serde_json::to_value(registry.get("Book").unwrap()).unwrap();
	assert_eq!(book["required"], json!(["publishedAt"]));
	assert!(book["properties"]["publishedAt"].is_object());
}

#[test]
fn swagger_context_overrides_generated_keys() {
	let mut context = serde_json::Map::new();
	context.insert("type".to_string(), json!("string"));
	context.insert("format".to_string(), json!("uuid"));

	let metadata = TestMetadata::new().resource(
		"App\\Entity\\Book",
		ResourceMetadata::new("Book"),
		vec![
			PropertyMetadata::new("id")
				.property_type(PropertyType::integer())
				.swagger_context(context),
		],
	);
	let builder = DefinitionBuilder::new(&metadata, &metadata);
	let mut registry = DefinitionRegistry::new();

	builder
		.resolve(
			&mut registry,
			"App\\Entity\\Book",
			&metadata.resource_metadata("App\\Entity\\Book").unwrap(),
			None,
		)
		.unwrap();

	let book = serde_json::to_value(registry.get("Book").unwrap()).unwrap();
	assert_eq!(
		book["properties"]["id"],
		json!({"type": "string", "format": "uuid"})
	);
}

#[test]
fn untyped_property_keeps_only_its_annotations() {
	let metadata = TestMetadata::new().resource(
		"App\\Entity\\Book",
		ResourceMetadata::new("Book"),
		vec![PropertyMetadata::new("opaque").description("No declared type")],
	);
	let builder = DefinitionBuilder::new(&metadata, &metadata);
	let mut registry = DefinitionRegistry::new();

	builder
		.resolve(
			&mut registry,
			"App\\Entity\\Book",
			&metadata.resource_metadata("App\\Entity\\Book").unwrap(),
			None,
		)
		.unwrap();

	let book = serde_json::to_value(registry.get("Book").unwrap()).unwrap();
	assert_eq!(
		book["properties"]["opaque"],
		json!({"description": "No declared type"})
	);
}

#[test]
fn sorted_output_is_deterministic_across_traversal_orders() {
	let metadata = book_with_author();
	let builder = DefinitionBuilder::new(&metadata, &metadata);

	let mut forward = DefinitionRegistry::new();
	builder
		.resolve(
			&mut forward,
			"App\\Entity\\Book",
			&metadata.resource_metadata("App\\Entity\\Book").unwrap(),
			None,
		)
		.unwrap();
	builder
		.resolve(
			&mut forward,
			"App\\Entity\\Person",
			&metadata.resource_metadata("App\\Entity\\Person").unwrap(),
			None,
		)
		.unwrap();

	let mut reverse = DefinitionRegistry::new();
	builder
		.resolve(
			&mut reverse,
			"App\\Entity\\Person",
			&metadata.resource_metadata("App\\Entity\\Person").unwrap(),
			None,
		)
		.unwrap();
	builder
		.resolve(
			&mut reverse,
			"App\\Entity\\Book",
			&metadata.resource_metadata("App\\Entity\\Book").unwrap(),
			None,
		)
		.unwrap();

	let forward = serde_json::to_string(&forward.into_sorted()).unwrap();
	let reverse = serde_json::to_string(&reverse.into_sorted()).unwrap();
	assert_eq!(forward, reverse);
}
