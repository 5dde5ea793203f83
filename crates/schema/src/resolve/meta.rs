// Copyright (c) reifydb.com 2025
// This file is licensed under the MIT, see license.md file

use serde_json::Value as Json;
use strata_type::{diagnostic::schema::malformed_meta, error};

use crate::column::ColumnIdent;

/// A named composite index declaration: analyzer plus the ordered column
/// references it spans.
pub(crate) struct IndexDecl {
	pub analyzer: String,
	pub columns: Vec<ColumnIdent>,
}

/// The `_meta`/`_routing` metadata block of a mapping, parsed up front so
/// the traversal only deals with columns.
#[derive(Default)]
pub(crate) struct MetaBlock {
	pub primary_keys: Vec<ColumnIdent>,
	pub partitioned_by: Vec<(ColumnIdent, String)>,
	pub routing: Option<ColumnIdent>,
	pub indices: Vec<(ColumnIdent, IndexDecl)>,
}

impl Default for IndexDecl {
	fn default() -> Self {
		Self {
			analyzer: "standard".to_string(),
			columns: Vec::new(),
		}
	}
}

impl MetaBlock {
	pub fn parse(root: &serde_json::Map<String, Json>) -> crate::Result<MetaBlock> {
		let mut block = MetaBlock::default();

		if let Some(routing) = root.get("_routing") {
			let path = routing
				.as_object()
				.and_then(|routing| routing.get("path"))
				.and_then(Json::as_str)
				.ok_or_else(|| error!(malformed_meta("_routing must declare a path string")))?;
			block.routing = Some(ColumnIdent::from_path(path));
		}

		let Some(meta) = root.get("_meta") else {
			return Ok(block);
		};
		let meta = meta
			.as_object()
			.ok_or_else(|| error!(malformed_meta("_meta must be an object")))?;

		block.primary_keys = primary_keys(meta)?;
		block.partitioned_by = partitioned_by(meta)?;
		block.indices = indices(meta)?;
		Ok(block)
	}
}

fn primary_keys(meta: &serde_json::Map<String, Json>) -> crate::Result<Vec<ColumnIdent>> {
	match meta.get("primary_keys") {
		None => Ok(Vec::new()),
		Some(Json::String(name)) => Ok(vec![ColumnIdent::from_path(name)]),
		Some(Json::Array(names)) => names
			.iter()
			.map(|name| {
				name.as_str().map(ColumnIdent::from_path).ok_or_else(|| {
					error!(malformed_meta("primary_keys entries must be column names"))
				})
			})
			.collect(),
		Some(_) => Err(error!(malformed_meta(
			"primary_keys must be a column name or a list of column names"
		))),
	}
}

fn partitioned_by(meta: &serde_json::Map<String, Json>) -> crate::Result<Vec<(ColumnIdent, String)>> {
	let Some(declared) = meta.get("partitioned_by") else {
		return Ok(Vec::new());
	};
	let entries = declared
		.as_array()
		.ok_or_else(|| error!(malformed_meta("partitioned_by must be a list of [name, type] pairs")))?;

	let mut columns = Vec::with_capacity(entries.len());
	for entry in entries {
		let pair = entry.as_array().filter(|pair| pair.len() == 2);
		let (name, type_name) = match pair {
			Some(pair) => (pair[0].as_str(), pair[1].as_str()),
			None => (None, None),
		};
		match (name, type_name) {
			(Some(name), Some(type_name)) => {
				columns.push((ColumnIdent::from_path(name), type_name.to_string()));
			}
			_ => {
				return Err(error!(malformed_meta(
					"partitioned_by must be a list of [name, type] pairs"
				)));
			}
		}
	}
	Ok(columns)
}

fn indices(meta: &serde_json::Map<String, Json>) -> crate::Result<Vec<(ColumnIdent, IndexDecl)>> {
	let Some(declared) = meta.get("indices") else {
		return Ok(Vec::new());
	};
	let declared = declared
		.as_object()
		.ok_or_else(|| error!(malformed_meta("indices must be an object of index declarations")))?;

	let mut indices = Vec::with_capacity(declared.len());
	for (name, decl) in declared {
		let decl = decl
			.as_object()
			.ok_or_else(|| error!(malformed_meta(format!("index '{}' must be an object", name))))?;

		let mut index = IndexDecl::default();
		if let Some(analyzer) = decl.get("analyzer") {
			index.analyzer = analyzer
				.as_str()
				.ok_or_else(|| {
					error!(malformed_meta(format!("analyzer of index '{}' must be a string", name)))
				})?
				.to_string();
		}
		let columns = decl
			.get("columns")
			.and_then(Json::as_array)
			.ok_or_else(|| {
				error!(malformed_meta(format!("index '{}' must declare a column list", name)))
			})?;
		for column in columns {
			let column = column.as_str().ok_or_else(|| {
				error!(malformed_meta(format!("columns of index '{}' must be column names", name)))
			})?;
			index.columns.push(ColumnIdent::from_path(column));
		}
		indices.push((ColumnIdent::from_path(name), index));
	}
	Ok(indices)
}
