// Copyright (c) reifydb.com 2025
// This file is licensed under the MIT, see license.md file

use std::collections::BTreeMap;

use strata_type::Type;

use crate::{
	column::{ColumnIdent, TableIdent},
	reference::{IndexMethod, IndexReferenceInfo, ReferenceInfo},
};

/// The mapping type name the storage substrate wraps a table mapping in.
pub const DEFAULT_MAPPING_TYPE: &str = "default";

/// The fixed system columns every table exposes, independent of mapping
/// content: (name, type, index treatment).
pub fn system_columns() -> impl Iterator<Item = (&'static str, Type, IndexMethod)> {
	[
		("_id", Type::Utf8, IndexMethod::NotAnalyzed),
		("_version", Type::Int8, IndexMethod::No),
		("_score", Type::Float8, IndexMethod::No),
		("_raw", Type::Utf8, IndexMethod::No),
		("_doc", Type::Object, IndexMethod::No),
		("_uid", Type::Utf8, IndexMethod::NotAnalyzed),
	]
	.into_iter()
}

pub fn is_system_column(ident: &ColumnIdent) -> bool {
	ident.is_top_level() && system_columns().any(|(name, _, _)| name == ident.name())
}

/// The complete resolved relational description of one table. Built once
/// from an immutable mapping snapshot; a new schema is resolved, never
/// mutated, whenever the mapping changes.
#[derive(Clone, Debug, PartialEq)]
pub struct TableSchema {
	pub(crate) ident: TableIdent,
	pub(crate) columns: Vec<ReferenceInfo>,
	pub(crate) references: BTreeMap<ColumnIdent, ReferenceInfo>,
	pub(crate) primary_key: Vec<ColumnIdent>,
	pub(crate) has_auto_generated_primary_key: bool,
	pub(crate) partitioned_by: Vec<ReferenceInfo>,
	pub(crate) routing_column: ColumnIdent,
	pub(crate) indices: BTreeMap<ColumnIdent, IndexReferenceInfo>,
	pub(crate) shard_routing: BTreeMap<u32, String>,
	pub(crate) aliases: Vec<String>,
	pub(crate) mapping: serde_json::Value,
}

impl TableSchema {
	pub fn ident(&self) -> &TableIdent {
		&self.ident
	}

	/// Every non-system, non-partitioned leaf reference, sorted by fqn.
	pub fn columns(&self) -> &[ReferenceInfo] {
		&self.columns
	}

	/// Every resolvable ident: leaves, object nodes and system columns.
	pub fn references(&self) -> &BTreeMap<ColumnIdent, ReferenceInfo> {
		&self.references
	}

	pub fn reference(&self, ident: &ColumnIdent) -> Option<&ReferenceInfo> {
		self.references.get(ident)
	}

	/// Never empty; falls back to the synthetic `_id` column.
	pub fn primary_key(&self) -> &[ColumnIdent] {
		&self.primary_key
	}

	pub fn has_auto_generated_primary_key(&self) -> bool {
		self.has_auto_generated_primary_key
	}

	/// Columns whose value is encoded in the partition identifier rather
	/// than stored per document. Present in `references()`, absent from
	/// `columns()`.
	pub fn partitioned_by(&self) -> &[ReferenceInfo] {
		&self.partitioned_by
	}

	/// The column whose value decides shard placement.
	pub fn routing_column(&self) -> &ColumnIdent {
		&self.routing_column
	}

	pub fn indices(&self) -> &BTreeMap<ColumnIdent, IndexReferenceInfo> {
		&self.indices
	}

	pub fn index(&self, ident: &ColumnIdent) -> Option<&IndexReferenceInfo> {
		self.indices.get(ident)
	}

	/// Shard id to node, taken verbatim from the snapshot.
	pub fn shard_routing(&self) -> &BTreeMap<u32, String> {
		&self.shard_routing
	}

	pub fn aliases(&self) -> &[String] {
		&self.aliases
	}

	/// The retained source mapping the schema was resolved from; merge
	/// operates on this artifact.
	pub fn mapping(&self) -> &serde_json::Value {
		&self.mapping
	}
}
