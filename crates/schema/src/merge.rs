// Copyright (c) reifydb.com 2025
// This file is licensed under the MIT, see license.md file

use serde_json::{Map, Value as Json};
use strata_type::{diagnostic::schema::conflicting_column, error};
use tracing::{debug, instrument};

use crate::{column::ColumnIdent, resolve::mapping_root, table::TableSchema};

/// The artifact a merge produces: the unified mapping plus the alias set,
/// addressed at a named template of the storage substrate.
#[derive(Clone, Debug, PartialEq)]
pub struct TemplateUpdate {
	pub template: String,
	pub mapping: Json,
	pub aliases: Vec<String>,
	/// False: merging always updates a template that already exists.
	pub create: bool,
}

/// Applies a [`TemplateUpdate`] to an external destination, typically the
/// storage substrate's template registry.
pub trait SchemaPublisher {
	fn publish(&self, update: TemplateUpdate) -> crate::Result<()>;
}

/// Computes the union of two table schemas as a template update.
///
/// Columns existing in only one side pass through unchanged; columns
/// present in both must agree on every declared attribute. Nothing the
/// existing schema declares is ever dropped, and its `_meta` block is
/// carried over verbatim.
#[instrument(name = "schema::merge", level = "debug", skip_all, fields(table = %existing.ident()))]
pub fn merge(existing: &TableSchema, incoming: &TableSchema) -> crate::Result<TemplateUpdate> {
	let mut mapping = mapping_root(existing.mapping())?.clone();
	let incoming_root = mapping_root(incoming.mapping())?;

	let mut properties = match mapping.get("properties").and_then(Json::as_object) {
		Some(properties) => properties.clone(),
		None => Map::new(),
	};
	if let Some(incoming_properties) = incoming_root.get("properties").and_then(Json::as_object) {
		merge_properties(&mut properties, incoming_properties, None)?;
	}
	mapping.insert("properties".to_string(), Json::Object(properties));

	let mut aliases = existing.aliases().to_vec();
	for alias in incoming.aliases() {
		if !aliases.contains(alias) {
			aliases.push(alias.clone());
		}
	}

	debug!(aliases = aliases.len(), "merged table schemas");

	Ok(TemplateUpdate {
		template: existing.ident().name.clone(),
		mapping: Json::Object(mapping),
		aliases,
		create: false,
	})
}

/// Merges and hands the resulting update to the publisher.
pub fn merge_and_publish(
	existing: &TableSchema,
	incoming: &TableSchema,
	publisher: &dyn SchemaPublisher,
) -> crate::Result<TemplateUpdate> {
	let update = merge(existing, incoming)?;
	publisher.publish(update.clone())?;
	Ok(update)
}

fn merge_properties(
	existing: &mut Map<String, Json>,
	incoming: &Map<String, Json>,
	parent: Option<&ColumnIdent>,
) -> crate::Result<()> {
	for (name, incoming_attrs) in incoming {
		let ident = match parent {
			Some(parent) => parent.child(name),
			None => ColumnIdent::new(name),
		};
		if !existing.contains_key(name) {
			existing.insert(name.clone(), incoming_attrs.clone());
			continue;
		}
		let Some(existing_attrs) = existing.get_mut(name) else {
			continue;
		};
		merge_column(existing_attrs, incoming_attrs, &ident)?;
	}
	Ok(())
}

fn merge_column(existing: &mut Json, incoming: &Json, ident: &ColumnIdent) -> crate::Result<()> {
	let (Some(existing_attrs), Some(incoming_attrs)) = (existing.as_object_mut(), incoming.as_object())
	else {
		if existing == incoming {
			return Ok(());
		}
		return Err(error!(conflicting_column(
			&ident.fqn(),
			&existing.to_string(),
			&incoming.to_string()
		)));
	};

	// an object node and a scalar leaf can never describe the same
	// column; attribute-wise merging would fuse them into a mapping the
	// resolver reads as a leaf, dropping the object's children
	if is_object_node(existing_attrs) != is_object_node(incoming_attrs) {
		return Err(error!(conflicting_column(
			&ident.fqn(),
			&column_shape(existing_attrs),
			&column_shape(incoming_attrs)
		)));
	}

	// every attribute both sides declare must agree; children merge
	// recursively instead
	for (key, value) in incoming_attrs {
		if key == "properties" {
			continue;
		}
		match existing_attrs.get(key) {
			Some(current) if current == value => {}
			Some(current) => {
				return Err(error!(conflicting_column(
					&ident.fqn(),
					&format!("{}={}", key, current),
					&format!("{}={}", key, value)
				)));
			}
			None => {
				existing_attrs.insert(key.clone(), value.clone());
			}
		}
	}

	if let Some(incoming_children) = incoming_attrs.get("properties").and_then(Json::as_object) {
		if !existing_attrs.contains_key("properties") {
			existing_attrs.insert("properties".to_string(), Json::Object(Map::new()));
		}
		let Some(existing_children) =
			existing_attrs.get_mut("properties").and_then(Json::as_object_mut)
		else {
			return Err(error!(conflicting_column(
				&ident.fqn(),
				"scalar properties",
				"object properties"
			)));
		};
		merge_properties(existing_children, incoming_children, Some(ident))?;
	}
	Ok(())
}

/// Untyped nodes count as objects, matching how the resolver reads them.
fn is_object_node(attrs: &Map<String, Json>) -> bool {
	attrs.contains_key("properties")
		|| matches!(attrs.get("type").and_then(Json::as_str), None | Some("object") | Some("nested"))
}

fn column_shape(attrs: &Map<String, Json>) -> String {
	if is_object_node(attrs) {
		return "object".to_string();
	}
	match attrs.get("type").and_then(Json::as_str) {
		Some(name) => format!("scalar '{}'", name),
		None => "scalar".to_string(),
	}
}

#[cfg(test)]
mod tests {
	use std::cell::RefCell;

	use serde_json::json;
	use strata_type::diagnostic::schema::malformed_meta;

	use super::*;
	use crate::{
		column::TableIdent,
		resolve::{MappingSnapshot, resolve},
	};

	struct RecordingPublisher {
		updates: RefCell<Vec<TemplateUpdate>>,
	}

	impl RecordingPublisher {
		fn new() -> Self {
			Self {
				updates: RefCell::new(Vec::new()),
			}
		}
	}

	impl SchemaPublisher for RecordingPublisher {
		fn publish(&self, update: TemplateUpdate) -> crate::Result<()> {
			self.updates.borrow_mut().push(update);
			Ok(())
		}
	}

	struct FailingPublisher;

	impl SchemaPublisher for FailingPublisher {
		fn publish(&self, _update: TemplateUpdate) -> crate::Result<()> {
			Err(error!(malformed_meta("registry unavailable")))
		}
	}

	fn schema(name: &str, mapping: Json, aliases: &[&str]) -> TableSchema {
		let snapshot = MappingSnapshot::new(mapping).with_aliases(aliases.iter().copied());
		resolve(TableIdent::new(None, name), &snapshot).unwrap()
	}

	fn existing() -> TableSchema {
		schema(
			"events",
			json!({
				"_meta": {
					"primary_keys": "id"
				},
				"properties": {
					"id": {"type": "integer", "index": "not_analyzed"},
					"name": {"type": "string", "index": "not_analyzed"}
				}
			}),
			&[],
		)
	}

	#[test]
	fn test_merge_unions_disjoint_columns() {
		let incoming = schema(
			"events",
			json!({
				"properties": {
					"created_at": {"type": "date", "index": "not_analyzed"}
				}
			}),
			&[],
		);

		let update = merge(&existing(), &incoming).unwrap();
		assert_eq!(update.template, "events");
		let properties = update.mapping["properties"].as_object().unwrap();
		assert!(properties.contains_key("id"));
		assert!(properties.contains_key("name"));
		assert!(properties.contains_key("created_at"));
	}

	#[test]
	fn test_merge_keeps_existing_meta_verbatim() {
		let incoming = schema(
			"events",
			json!({
				"_meta": {
					"primary_keys": "created_at"
				},
				"properties": {
					"created_at": {"type": "date", "index": "not_analyzed"}
				}
			}),
			&[],
		);

		let update = merge(&existing(), &incoming).unwrap();
		assert_eq!(update.mapping["_meta"], json!({"primary_keys": "id"}));
	}

	#[test]
	fn test_merge_preserves_aliases_of_both_sides() {
		let first = schema(
			"events",
			json!({
				"properties": {
					"id": {"type": "integer", "index": "not_analyzed"}
				}
			}),
			&["tables"],
		);
		let second = schema(
			"events",
			json!({
				"properties": {
					"id": {"type": "integer", "index": "not_analyzed"}
				}
			}),
			&["archive"],
		);

		let update = merge(&first, &second).unwrap();
		assert_eq!(update.aliases, ["tables", "archive"]);
	}

	#[test]
	fn test_merge_rejects_conflicting_attributes() {
		let incoming = schema(
			"events",
			json!({
				"properties": {
					"name": {"type": "long", "index": "not_analyzed"}
				}
			}),
			&[],
		);

		let err = merge(&existing(), &incoming).unwrap_err();
		assert_eq!(err.code(), "SCHEMA_004");
	}

	#[test]
	fn test_merge_rejects_object_versus_scalar_redefinition() {
		let objects = schema(
			"events",
			json!({
				"properties": {
					"x": {
						"properties": {
							"child": {"type": "string", "index": "not_analyzed"}
						}
					}
				}
			}),
			&[],
		);
		let scalars = schema(
			"events",
			json!({
				"properties": {
					"x": {"type": "long", "index": "not_analyzed"}
				}
			}),
			&[],
		);

		// either direction would silently lose the object's children
		assert_eq!(merge(&objects, &scalars).unwrap_err().code(), "SCHEMA_004");
		assert_eq!(merge(&scalars, &objects).unwrap_err().code(), "SCHEMA_004");
	}

	#[test]
	fn test_merge_recurses_into_object_columns() {
		let first = schema(
			"events",
			json!({
				"properties": {
					"payload": {
						"type": "object",
						"properties": {
							"source": {"type": "string", "index": "not_analyzed"}
						}
					}
				}
			}),
			&[],
		);
		let second = schema(
			"events",
			json!({
				"properties": {
					"payload": {
						"type": "object",
						"properties": {
							"kind": {"type": "string", "index": "not_analyzed"}
						}
					}
				}
			}),
			&[],
		);

		let update = merge(&first, &second).unwrap();
		let payload = update.mapping["properties"]["payload"]["properties"].as_object().unwrap();
		assert!(payload.contains_key("source"));
		assert!(payload.contains_key("kind"));
	}

	#[test]
	fn test_merge_and_publish_hands_the_update_over() {
		let incoming = schema(
			"events",
			json!({
				"properties": {
					"created_at": {"type": "date", "index": "not_analyzed"}
				}
			}),
			&[],
		);

		let publisher = RecordingPublisher::new();
		let update = merge_and_publish(&existing(), &incoming, &publisher).unwrap();
		assert_eq!(publisher.updates.borrow().as_slice(), &[update]);
	}

	#[test]
	fn test_merge_and_publish_propagates_publisher_failure() {
		let incoming = schema(
			"events",
			json!({
				"properties": {
					"created_at": {"type": "date", "index": "not_analyzed"}
				}
			}),
			&[],
		);

		assert!(merge_and_publish(&existing(), &incoming, &FailingPublisher).is_err());
	}
}
