//! Generator configuration
//!
//! Mirrors the knobs the host framework wires into the generator: document
//! metadata, security schemes and pagination parameter names. All sections
//! deserialize from the host's configuration format and default sensibly.

use indexmap::IndexMap;
use serde::Deserialize;

/// Top-level configuration for a generation run.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SwaggerConfig {
	pub title: String,
	pub version: String,
	pub description: Option<String>,
	pub base_path: String,
	/// Mime types advertised in `produces`/`consumes`.
	pub mime_types: Vec<String>,
	pub oauth: Option<OauthConfig>,
	/// Keyed by security-definition name; order is preserved in the output.
	pub api_keys: IndexMap<String, ApiKeyConfig>,
	pub pagination: PaginationConfig,
}

impl Default for SwaggerConfig {
	fn default() -> Self {
		Self {
			title: String::new(),
			version: "0.0.0".to_string(),
			description: None,
			base_path: "/".to_string(),
			mime_types: vec!["application/json".to_string()],
			oauth: None,
			api_keys: IndexMap::new(),
			pagination: PaginationConfig::default(),
		}
	}
}

/// OAuth security-definition settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OauthConfig {
	#[serde(rename = "type")]
	pub auth_type: String,
	pub flow: String,
	pub token_url: String,
	pub authorization_url: String,
	pub scopes: IndexMap<String, String>,
}

impl Default for OauthConfig {
	fn default() -> Self {
		Self {
			auth_type: "oauth2".to_string(),
			flow: String::new(),
			token_url: String::new(),
			authorization_url: String::new(),
			scopes: IndexMap::new(),
		}
	}
}

/// Where an API key is transmitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiKeyLocation {
	Query,
	Header,
}

impl ApiKeyLocation {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Query => "query",
			Self::Header => "header",
		}
	}
}

/// One apiKey security definition.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiKeyConfig {
	/// Parameter or header name carrying the key.
	pub name: String,
	#[serde(rename = "in")]
	pub location: ApiKeyLocation,
}

/// Pagination parameter settings for collection `GET` operations.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
	pub enabled: bool,
	/// Whether clients may control the page size by default; operations can
	/// override this per-operation.
	pub client_items_per_page: bool,
	pub page_parameter_name: String,
	pub items_per_page_parameter_name: String,
}

impl Default for PaginationConfig {
	fn default() -> Self {
		Self {
			enabled: true,
			client_items_per_page: false,
			page_parameter_name: "page".to_string(),
			items_per_page_parameter_name: "itemsPerPage".to_string(),
		}
	}
}
