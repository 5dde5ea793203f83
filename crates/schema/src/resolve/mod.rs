// Copyright (c) reifydb.com 2025
// This file is licensed under the MIT, see license.md file

use std::collections::BTreeMap;

use serde_json::Value as Json;
use strata_type::{
	Type,
	diagnostic::schema::{column_not_found, malformed_meta, unknown_storage_type},
	error,
};
use tracing::{debug, instrument};

use crate::{
	column::{ColumnIdent, ReferenceIdent, TableIdent},
	reference::{IndexMethod, IndexReferenceInfo, ObjectPolicy, ReferenceInfo},
	table::{DEFAULT_MAPPING_TYPE, TableSchema, is_system_column, system_columns},
};

mod meta;

use meta::MetaBlock;

/// One immutable observation of a table's storage state: the mapping
/// document plus the alias and shard placement facts that accompany it.
#[derive(Clone, Debug, PartialEq)]
pub struct MappingSnapshot {
	pub mapping: Json,
	pub aliases: Vec<String>,
	pub shard_routing: BTreeMap<u32, String>,
}

impl MappingSnapshot {
	pub fn new(mapping: Json) -> Self {
		Self {
			mapping,
			aliases: Vec::new(),
			shard_routing: BTreeMap::new(),
		}
	}

	pub fn with_aliases(mut self, aliases: impl IntoIterator<Item = impl Into<String>>) -> Self {
		self.aliases = aliases.into_iter().map(Into::into).collect();
		self
	}

	pub fn with_shard_routing(mut self, shard_routing: BTreeMap<u32, String>) -> Self {
		self.shard_routing = shard_routing;
		self
	}
}

/// Resolves a mapping snapshot into the complete relational description
/// of one table.
///
/// Resolution never mutates; a mapping change means resolving a fresh
/// schema from a fresh snapshot.
#[instrument(name = "schema::resolve", level = "debug", skip(snapshot), fields(table = %table))]
pub fn resolve(table: TableIdent, snapshot: &MappingSnapshot) -> crate::Result<TableSchema> {
	let root = mapping_root(&snapshot.mapping)?;
	let meta = MetaBlock::parse(root)?;

	let mut references = BTreeMap::new();
	if let Some(properties) = root.get("properties") {
		let properties = properties
			.as_object()
			.ok_or_else(|| error!(malformed_meta("properties must be an object")))?;
		collect(&table, None, properties, &mut references)?;
	}

	// named composite indices resolve against document columns only
	let mut indices = BTreeMap::new();
	for (name, decl) in &meta.indices {
		let mut columns = Vec::with_capacity(decl.columns.len());
		for column in &decl.columns {
			let reference = references
				.get(column)
				.ok_or_else(|| error!(column_not_found(&name.fqn(), &column.fqn())))?;
			columns.push(reference.clone());
		}
		indices.insert(
			name.clone(),
			IndexReferenceInfo::new(
				ReferenceIdent::new(table.clone(), name.clone()),
				&decl.analyzer,
				columns,
			),
		);
	}

	// partitioned columns live in the partition ident, not the document
	let mut partitioned_by = Vec::with_capacity(meta.partitioned_by.len());
	for (column, type_name) in &meta.partitioned_by {
		let value_type = Type::from_storage(type_name)
			.ok_or_else(|| error!(unknown_storage_type(&column.fqn(), type_name)))?;
		let reference = ReferenceInfo::new(
			ReferenceIdent::new(table.clone(), column.clone()),
			value_type,
			IndexMethod::NotAnalyzed,
		)
		.partitioned();
		references.insert(column.clone(), reference.clone());
		partitioned_by.push(reference);
	}

	let (primary_key, has_auto_generated_primary_key) = if meta.primary_keys.is_empty() {
		(vec![ColumnIdent::new("_id")], true)
	} else {
		(meta.primary_keys, false)
	};

	for (name, value_type, index) in system_columns() {
		let column = ColumnIdent::new(name);
		references.insert(
			column.clone(),
			ReferenceInfo::new(ReferenceIdent::new(table.clone(), column), value_type, index),
		);
	}

	let routing_column = match meta.routing {
		Some(column) => column,
		None if primary_key.len() == 1 => primary_key[0].clone(),
		None => ColumnIdent::new("_id"),
	};
	if !references.contains_key(&routing_column) {
		return Err(error!(column_not_found("_routing", &routing_column.fqn())));
	}

	let columns = references
		.values()
		.filter(|reference| {
			!reference.partitioned_by
				&& !reference.value_type.is_object()
				&& !is_system_column(reference.column())
		})
		.cloned()
		.collect();

	debug!(references = references.len(), "resolved table schema");

	Ok(TableSchema {
		ident: table,
		columns,
		references,
		primary_key,
		has_auto_generated_primary_key,
		partitioned_by,
		routing_column,
		indices,
		shard_routing: snapshot.shard_routing.clone(),
		aliases: snapshot.aliases.clone(),
		mapping: snapshot.mapping.clone(),
	})
}

/// Unwraps the storage substrate's single mapping type envelope when
/// present; bare mappings pass through unchanged.
pub(crate) fn mapping_root(mapping: &Json) -> crate::Result<&serde_json::Map<String, Json>> {
	let root = mapping
		.as_object()
		.ok_or_else(|| error!(malformed_meta("mapping must be an object")))?;
	if root.len() == 1 {
		if let Some(inner) = root.get(DEFAULT_MAPPING_TYPE).and_then(Json::as_object) {
			return Ok(inner);
		}
	}
	Ok(root)
}

fn collect(
	table: &TableIdent,
	parent: Option<&ColumnIdent>,
	properties: &serde_json::Map<String, Json>,
	references: &mut BTreeMap<ColumnIdent, ReferenceInfo>,
) -> crate::Result<()> {
	for (name, attrs) in properties {
		let ident = match parent {
			Some(parent) => parent.child(name),
			None => ColumnIdent::new(name),
		};
		let attrs = attrs.as_object().ok_or_else(|| {
			error!(malformed_meta(format!("attributes of column '{}' must be an object", ident.fqn())))
		})?;
		column(table, ident, attrs, references)?;
	}
	Ok(())
}

fn column(
	table: &TableIdent,
	ident: ColumnIdent,
	attrs: &serde_json::Map<String, Json>,
	references: &mut BTreeMap<ColumnIdent, ReferenceInfo>,
) -> crate::Result<()> {
	let type_name = attrs.get("type").and_then(Json::as_str);

	// multi-representation fields collapse to the variant that carries
	// the column's own name
	if type_name == Some("multi_field") {
		let primary = attrs
			.get("fields")
			.and_then(Json::as_object)
			.and_then(|fields| fields.get(ident.last_segment()))
			.and_then(Json::as_object)
			.ok_or_else(|| {
				error!(malformed_meta(format!(
					"multi_field column '{}' lacks a variant named after itself",
					ident.fqn()
				)))
			})?;
		return column(table, ident, primary, references);
	}

	// untyped nodes and explicit object/nested types are object columns
	if matches!(type_name, None | Some("object") | Some("nested")) {
		references.insert(
			ident.clone(),
			ReferenceInfo::new(
				ReferenceIdent::new(table.clone(), ident.clone()),
				Type::Object,
				IndexMethod::NotAnalyzed,
			)
			.with_object_policy(object_policy(attrs.get("dynamic"))),
		);
		if let Some(properties) = attrs.get("properties") {
			let properties = properties.as_object().ok_or_else(|| {
				error!(malformed_meta(format!("properties of column '{}' must be an object", ident.fqn())))
			})?;
			collect(table, Some(&ident), properties, references)?;
		}
		return Ok(());
	}

	let mut value_type = match type_name {
		Some(type_name) => Type::from_storage(type_name)
			.ok_or_else(|| error!(unknown_storage_type(&ident.fqn(), type_name)))?,
		None => Type::Object,
	};
	match attrs.get("collection_type").and_then(Json::as_str) {
		Some("array") => value_type = Type::Array(Box::new(value_type)),
		Some("set") => value_type = Type::Set(Box::new(value_type)),
		Some(other) => {
			return Err(error!(malformed_meta(format!(
				"unknown collection type '{}' of column '{}'",
				other,
				ident.fqn()
			))));
		}
		None => {}
	}

	let index = index_method(attrs, &ident)?;
	references.insert(
		ident.clone(),
		ReferenceInfo::new(ReferenceIdent::new(table.clone(), ident), value_type, index),
	);
	Ok(())
}

fn index_method(attrs: &serde_json::Map<String, Json>, ident: &ColumnIdent) -> crate::Result<IndexMethod> {
	match attrs.get("index").and_then(Json::as_str) {
		Some("analyzed") => Ok(IndexMethod::Analyzed),
		Some("not_analyzed") => Ok(IndexMethod::NotAnalyzed),
		Some("no") => Ok(IndexMethod::No),
		Some(other) => Err(error!(malformed_meta(format!(
			"unknown index treatment '{}' of column '{}'",
			other,
			ident.fqn()
		)))),
		// a declared analyzer implies analyzed indexing
		None if attrs.contains_key("analyzer") => Ok(IndexMethod::Analyzed),
		None => Ok(IndexMethod::NotAnalyzed),
	}
}

fn object_policy(dynamic: Option<&Json>) -> ObjectPolicy {
	match dynamic {
		Some(Json::Bool(false)) => ObjectPolicy::Ignored,
		Some(Json::String(policy)) if policy == "false" => ObjectPolicy::Ignored,
		Some(Json::String(policy)) if policy == "strict" => ObjectPolicy::Strict,
		_ => ObjectPolicy::Dynamic,
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	fn table() -> TableIdent {
		TableIdent::new(None, "test")
	}

	fn resolved(mapping: Json) -> TableSchema {
		resolve(table(), &MappingSnapshot::new(mapping)).unwrap()
	}

	fn documents_mapping() -> Json {
		json!({
			"default": {
				"_meta": {
					"primary_keys": "id"
				},
				"properties": {
					"id": {"type": "integer", "index": "not_analyzed"},
					"title": {"type": "string", "index": "no"},
					"datum": {"type": "date", "index": "not_analyzed"},
					"content": {"type": "string", "index": "analyzed", "analyzer": "standard"},
					"person": {
						"type": "object",
						"properties": {
							"first_name": {"type": "string", "index": "not_analyzed"},
							"birthday": {"type": "date", "index": "not_analyzed"}
						}
					},
					"nested": {
						"type": "nested",
						"properties": {
							"inner_nested": {"type": "date", "index": "not_analyzed"}
						}
					}
				}
			}
		})
	}

	#[test]
	fn test_nested_column_ident() {
		let schema = resolved(json!({
			"properties": {
				"person": {
					"type": "object",
					"properties": {
						"addresses": {
							"type": "object",
							"properties": {
								"city": {"type": "string", "index": "not_analyzed"}
							}
						}
					}
				}
			}
		}));

		let city = ColumnIdent::with_path("person", ["addresses", "city"]);
		let reference = schema.reference(&city).unwrap();
		assert_eq!(reference.column(), &city);
		assert_eq!(reference.value_type, Type::Utf8);
		assert_eq!(
			schema.reference(&ColumnIdent::from_path("person.addresses")).unwrap().value_type,
			Type::Object
		);
	}

	#[test]
	fn test_extract_column_definitions() {
		let schema = resolved(documents_mapping());

		// 9 mapped plus 6 system columns
		assert_eq!(schema.references().len(), 15);
		let fqns: Vec<String> = schema.references().keys().map(ColumnIdent::fqn).collect();
		assert_eq!(
			fqns,
			[
				"_doc",
				"_id",
				"_raw",
				"_score",
				"_uid",
				"_version",
				"content",
				"datum",
				"id",
				"nested",
				"nested.inner_nested",
				"person",
				"person.birthday",
				"person.first_name",
				"title"
			]
		);

		let columns: Vec<String> =
			schema.columns().iter().map(|reference| reference.column().fqn()).collect();
		assert_eq!(
			columns,
			[
				"content",
				"datum",
				"id",
				"nested.inner_nested",
				"person.birthday",
				"person.first_name",
				"title"
			]
		);

		let content = schema.reference(&ColumnIdent::new("content")).unwrap();
		assert_eq!(content.value_type, Type::Utf8);
		assert_eq!(content.index, IndexMethod::Analyzed);
		let datum = schema.reference(&ColumnIdent::new("datum")).unwrap();
		assert_eq!(datum.value_type, Type::DateTime);
	}

	#[test]
	fn test_object_column_policies() {
		let schema = resolved(json!({
			"properties": {
				"implicit_dynamic": {
					"properties": {
						"name": {"type": "string", "index": "not_analyzed"}
					}
				},
				"explicit_dynamic": {
					"dynamic": "true",
					"properties": {
						"name": {"type": "string", "index": "not_analyzed"},
						"age": {"type": "short", "index": "not_analyzed"}
					}
				},
				"ignored": {
					"dynamic": false,
					"properties": {
						"name": {"type": "string", "index": "not_analyzed"},
						"age": {"type": "short", "index": "not_analyzed"}
					}
				},
				"strict": {
					"dynamic": "strict",
					"properties": {
						"age": {"type": "integer", "index": "not_analyzed"}
					}
				}
			}
		}));

		assert_eq!(schema.references().len(), 16);
		let policy = |name: &str| schema.reference(&ColumnIdent::new(name)).unwrap().object_policy;
		assert_eq!(policy("implicit_dynamic"), ObjectPolicy::Dynamic);
		assert_eq!(policy("explicit_dynamic"), ObjectPolicy::Dynamic);
		assert_eq!(policy("ignored"), ObjectPolicy::Ignored);
		assert_eq!(policy("strict"), ObjectPolicy::Strict);
	}

	#[test]
	fn test_untyped_leaf_is_a_dynamic_object() {
		let schema = resolved(json!({
			"properties": {
				"id": {"index": "not_analyzed"}
			}
		}));

		let id = schema.reference(&ColumnIdent::new("id")).unwrap();
		assert_eq!(id.value_type, Type::Object);
		assert_eq!(id.object_policy, ObjectPolicy::Dynamic);
		assert!(schema.has_auto_generated_primary_key());
	}

	#[test]
	fn test_array_and_set_collection_types() {
		let schema = resolved(json!({
			"properties": {
				"tags": {"type": "string", "index": "not_analyzed", "collection_type": "array"},
				"codes": {"type": "integer", "index": "not_analyzed", "collection_type": "set"}
			}
		}));

		assert_eq!(
			schema.reference(&ColumnIdent::new("tags")).unwrap().value_type,
			Type::Array(Box::new(Type::Utf8))
		);
		assert_eq!(
			schema.reference(&ColumnIdent::new("codes")).unwrap().value_type,
			Type::Set(Box::new(Type::Int4))
		);
	}

	#[test]
	fn test_multi_field_collapses_to_primary_variant() {
		let schema = resolved(json!({
			"_meta": {
				"primary_keys": "id"
			},
			"properties": {
				"id": {"type": "integer", "index": "not_analyzed"},
				"title": {
					"type": "multi_field",
					"path": "just_name",
					"fields": {
						"title": {"type": "string", "index": "not_analyzed"},
						"ft": {"type": "string", "index": "analyzed", "analyzer": "english"}
					}
				}
			}
		}));

		let title = schema.reference(&ColumnIdent::new("title")).unwrap();
		assert_eq!(title.value_type, Type::Utf8);
		assert_eq!(title.index, IndexMethod::NotAnalyzed);
		assert_eq!(schema.routing_column(), &ColumnIdent::new("id"));
	}

	#[test]
	fn test_partitioned_by_columns_are_references_not_columns() {
		let schema = resolved(json!({
			"default": {
				"_meta": {
					"primary_keys": "id",
					"partitioned_by": [["datum", "date"]]
				},
				"properties": {
					"id": {"type": "integer", "index": "not_analyzed"},
					"title": {"type": "string", "index": "no"}
				}
			}
		}));

		assert_eq!(schema.partitioned_by().len(), 1);
		let datum = &schema.partitioned_by()[0];
		assert_eq!(datum.column(), &ColumnIdent::new("datum"));
		assert_eq!(datum.value_type, Type::DateTime);
		assert!(datum.partitioned_by);

		assert!(schema.reference(&ColumnIdent::new("datum")).is_some());
		assert!(
			!schema.columns().iter().any(|reference| reference.column() == &ColumnIdent::new("datum"))
		);
	}

	#[test]
	fn test_partitioned_by_rejects_unknown_storage_type() {
		let err = resolve(
			table(),
			&MappingSnapshot::new(json!({
				"_meta": {
					"partitioned_by": [["datum", "datetime2"]]
				},
				"properties": {}
			})),
		)
		.unwrap_err();
		assert_eq!(err.code(), "SCHEMA_001");
	}

	#[test]
	fn test_empty_mapping_still_has_system_columns() {
		let schema = resolved(json!({"default": {}}));

		assert!(schema.columns().is_empty());
		assert_eq!(schema.references().len(), 6);
		assert_eq!(schema.primary_key(), [ColumnIdent::new("_id")]);
		assert!(schema.has_auto_generated_primary_key());
		assert_eq!(schema.routing_column(), &ColumnIdent::new("_id"));
	}

	#[test]
	fn test_declared_primary_key_disables_autogeneration() {
		let schema = resolved(documents_mapping());

		assert_eq!(schema.primary_key(), [ColumnIdent::new("id")]);
		assert!(!schema.has_auto_generated_primary_key());
	}

	#[test]
	fn test_composite_primary_key_routes_by_id() {
		let schema = resolved(json!({
			"_meta": {
				"primary_keys": ["id", "num"]
			},
			"properties": {
				"id": {"type": "integer", "index": "not_analyzed"},
				"num": {"type": "long", "index": "not_analyzed"}
			}
		}));

		assert_eq!(schema.primary_key(), [ColumnIdent::new("id"), ColumnIdent::new("num")]);
		assert_eq!(schema.routing_column(), &ColumnIdent::new("_id"));
	}

	#[test]
	fn test_explicit_routing_path_wins_over_primary_key() {
		let schema = resolved(json!({
			"_routing": {
				"path": "num"
			},
			"_meta": {
				"primary_keys": "id"
			},
			"properties": {
				"id": {"type": "integer", "index": "not_analyzed"},
				"num": {"type": "long", "index": "not_analyzed"}
			}
		}));

		assert_eq!(schema.routing_column(), &ColumnIdent::new("num"));
	}

	#[test]
	fn test_sole_primary_key_becomes_routing_column() {
		let schema = resolved(documents_mapping());
		assert_eq!(schema.routing_column(), &ColumnIdent::new("id"));
	}

	#[test]
	fn test_routing_column_must_resolve() {
		let err = resolve(
			table(),
			&MappingSnapshot::new(json!({
				"_routing": {
					"path": "ghost"
				},
				"properties": {
					"id": {"type": "integer", "index": "not_analyzed"}
				}
			})),
		)
		.unwrap_err();
		assert_eq!(err.code(), "SCHEMA_002");
	}

	#[test]
	fn test_composite_index_resolution() {
		let schema = resolved(json!({
			"_meta": {
				"primary_keys": "id",
				"indices": {
					"fun_name_ft": {
						"columns": ["name", "fun"]
					}
				}
			},
			"properties": {
				"id": {"type": "integer", "index": "not_analyzed"},
				"name": {"type": "string", "index": "not_analyzed"},
				"fun": {"type": "string", "index": "not_analyzed"}
			}
		}));

		assert_eq!(schema.indices().len(), 1);
		let index = schema.index(&ColumnIdent::new("fun_name_ft")).unwrap();
		assert_eq!(index.analyzer, "standard");
		assert_eq!(index.index(), IndexMethod::Analyzed);
		assert_eq!(index.reference.value_type, Type::Utf8);
		assert_eq!(index.columns.len(), 2);
		assert_eq!(index.columns[0].column(), &ColumnIdent::new("name"));
		assert_eq!(index.columns[1].column(), &ColumnIdent::new("fun"));
	}

	#[test]
	fn test_composite_index_rejects_unknown_column() {
		let err = resolve(
			table(),
			&MappingSnapshot::new(json!({
				"_meta": {
					"indices": {
						"name_ft": {
							"columns": ["first_name"]
						}
					}
				},
				"properties": {
					"id": {"type": "integer", "index": "not_analyzed"}
				}
			})),
		)
		.unwrap_err();
		assert_eq!(err.code(), "SCHEMA_002");
	}

	#[test]
	fn test_unknown_storage_type_is_rejected() {
		let err = resolve(
			table(),
			&MappingSnapshot::new(json!({
				"properties": {
					"id": {"type": "varchar2", "index": "not_analyzed"}
				}
			})),
		)
		.unwrap_err();
		assert_eq!(err.code(), "SCHEMA_001");
	}

	#[test]
	fn test_malformed_primary_keys_are_rejected() {
		let err = resolve(
			table(),
			&MappingSnapshot::new(json!({
				"_meta": {
					"primary_keys": {"name": "id"}
				},
				"properties": {}
			})),
		)
		.unwrap_err();
		assert_eq!(err.code(), "SCHEMA_003");
	}

	#[test]
	fn test_system_columns_are_always_resolvable() {
		let schema = resolved(documents_mapping());

		let id = schema.reference(&ColumnIdent::new("_id")).unwrap();
		assert_eq!(id.value_type, Type::Utf8);
		assert_eq!(id.index, IndexMethod::NotAnalyzed);
		let version = schema.reference(&ColumnIdent::new("_version")).unwrap();
		assert_eq!(version.value_type, Type::Int8);
		let score = schema.reference(&ColumnIdent::new("_score")).unwrap();
		assert_eq!(score.value_type, Type::Float8);
		let doc = schema.reference(&ColumnIdent::new("_doc")).unwrap();
		assert_eq!(doc.value_type, Type::Object);
	}

	#[test]
	fn test_resolution_is_deterministic() {
		let snapshot = MappingSnapshot::new(documents_mapping())
			.with_aliases(["documents"])
			.with_shard_routing(BTreeMap::from([(0, "node-a".to_string()), (1, "node-b".to_string())]));

		let first = resolve(table(), &snapshot).unwrap();
		let second = resolve(table(), &snapshot).unwrap();
		assert_eq!(first, second);
		assert_eq!(first.aliases(), ["documents"]);
		assert_eq!(first.shard_routing().len(), 2);
	}
}
