//! Definition registry with recursion-safe memoization
//!
//! The registry is the deduplication point for definition schemas: one entry
//! per `(short name, serialization groups)` identity. It is created fresh for
//! every generation call and threaded through the traversal by mutable
//! reference; there is no shared or global state.
//!
//! The placeholder-then-fill protocol implemented here is the sole guard
//! against unbounded recursion in cyclic resource graphs: a key is inserted
//! *before* its schema is built, so recursive resolutions of the same key
//! observe the entry and return immediately instead of re-entering
//! construction.

use crate::schema::Definition;
use indexmap::IndexMap;
use tracing::trace;

/// Computes the deduplication key for a definition.
///
/// The short name alone when no groups are active, otherwise the short name
/// and the groups joined by `_`, in their originally supplied order. Group
/// order is deliberately not normalized: the emitted keys stay compatible
/// with callers that pass the same set in different orders and expect
/// distinct entries.
///
/// # Example
///
/// ```
/// use swagger_gen::registry::definition_key;
///
/// assert_eq!(definition_key("Book", &[]), "Book");
/// assert_eq!(
///     definition_key("Book", &["read".to_string(), "admin".to_string()]),
///     "Book-read_admin"
/// );
/// ```
pub fn definition_key(short_name: &str, groups: &[String]) -> String {
	if groups.is_empty() {
		short_name.to_string()
	} else {
		format!("{}-{}", short_name, groups.join("_"))
	}
}

/// Ordered map from definition key to schema, with placeholder support.
#[derive(Debug, Clone, Default)]
pub struct DefinitionRegistry {
	definitions: IndexMap<String, Definition>,
}

impl DefinitionRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Whether a definition (or its placeholder) exists for `key`.
	///
	/// This is the memoization check and the cycle breaker: a positive
	/// answer means the key is safe to reference and must not be rebuilt.
	pub fn contains(&self, key: &str) -> bool {
		self.definitions.contains_key(key)
	}

	/// Reserves `key` with an empty schema before construction starts.
	///
	/// Must be called before building the schema for `key`, never after:
	/// recursive resolutions in between rely on the entry being present.
	pub fn insert_placeholder(&mut self, key: &str) {
		trace!(key, "reserving definition placeholder");
		self.definitions
			.insert(key.to_string(), Definition::object());
	}

	/// Replaces the placeholder under `key` with the completed schema.
	pub fn fill(&mut self, key: &str, definition: Definition) {
		trace!(key, "filling definition");
		self.definitions.insert(key.to_string(), definition);
	}

	pub fn get(&self, key: &str) -> Option<&Definition> {
		self.definitions.get(key)
	}

	pub fn len(&self) -> usize {
		self.definitions.len()
	}

	pub fn is_empty(&self) -> bool {
		self.definitions.is_empty()
	}

	/// Consumes the registry, returning the definitions sorted by key.
	///
	/// Insertion order depends on the resource-visitation order; sorting
	/// here makes the emitted `definitions` map deterministic regardless.
	pub fn into_sorted(self) -> IndexMap<String, Definition> {
		let mut definitions = self.definitions;
		definitions.sort_keys();
		definitions
	}
}
