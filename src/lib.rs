//! # swagger-gen
//!
//! Swagger/OpenAPI 2.0 documentation generation over a pluggable
//! resource-metadata model. The host framework describes its resources
//! through the collaborator traits in [`metadata`]; the generator walks
//! them and emits the `paths`, `definitions` and security sections of a
//! Swagger 2.0 JSON document.
//!
//! The heart of the crate is the [`registry::DefinitionRegistry`]: schemas
//! are deduplicated by `(short name, serialization groups)` key and built
//! under a placeholder-then-fill protocol, so self-referencing and mutually
//! recursive resource graphs resolve to `$ref` cycles instead of infinite
//! recursion.
//!
//! ## Example
//!
//! ```rust,ignore
//! use swagger_gen::{DocumentGenerator, SwaggerConfig};
//!
//! let generator = DocumentGenerator::new(config, &properties, &resources);
//! let document = generator.generate(&["App\\Entity\\Book"])?;
//! println!("{}", document.to_json_pretty()?);
//! ```

pub mod config;
pub mod definitions;
pub mod document;
pub mod filters;
pub mod metadata;
pub mod operations;
pub mod registry;
pub mod schema;

use thiserror::Error;

pub use config::{ApiKeyConfig, ApiKeyLocation, OauthConfig, PaginationConfig, SwaggerConfig};
pub use definitions::DefinitionBuilder;
pub use document::{DocumentGenerator, Info, SecurityScheme, SwaggerDocument};
pub use filters::{Filter, FilterDescription, FilterLocator};
pub use metadata::{
	BuiltinType, HttpMethod, NameNormalizer, OperationMetadata, OperationType,
	PropertyEnumerator, PropertyMetadata, PropertyType, ResourceLookup, ResourceMetadata,
	SerializerContext,
};
pub use operations::{Parameter, PathOperation, ResponseObject};
pub use registry::{DefinitionRegistry, definition_key};
pub use schema::{Definition, ExternalDocs, PropertySchema, TypeFragment};

#[derive(Debug, Error)]
pub enum SchemaError {
	#[error("resource short name is empty for class `{0}`")]
	EmptyShortName(String),

	#[error("unknown resource class `{0}`")]
	UnknownResource(String),

	#[error("cannot resolve an HTTP method for operation `{0}`")]
	UnresolvableMethod(String),

	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),
}

pub type SchemaResult<T> = std::result::Result<T, SchemaError>;
