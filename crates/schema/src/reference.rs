// Copyright (c) reifydb.com 2025
// This file is licensed under the MIT, see license.md file

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use strata_type::Type;

use crate::column::{ColumnIdent, ReferenceIdent};

/// How the storage substrate indexes a column's values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IndexMethod {
	Analyzed,
	NotAnalyzed,
	No,
}

impl Display for IndexMethod {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			IndexMethod::Analyzed => f.write_str("analyzed"),
			IndexMethod::NotAnalyzed => f.write_str("not_analyzed"),
			IndexMethod::No => f.write_str("no"),
		}
	}
}

/// How an object column treats dynamically appearing children. Only
/// meaningful when the column type is [`Type::Object`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectPolicy {
	Dynamic,
	Strict,
	Ignored,
}

impl Display for ObjectPolicy {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			ObjectPolicy::Dynamic => f.write_str("dynamic"),
			ObjectPolicy::Strict => f.write_str("strict"),
			ObjectPolicy::Ignored => f.write_str("ignored"),
		}
	}
}

/// Full type and index metadata for one resolvable column path.
/// Immutable once built.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReferenceInfo {
	pub ident: ReferenceIdent,
	pub value_type: Type,
	pub index: IndexMethod,
	pub object_policy: ObjectPolicy,
	pub partitioned_by: bool,
}

impl ReferenceInfo {
	pub fn new(ident: ReferenceIdent, value_type: Type, index: IndexMethod) -> Self {
		Self {
			ident,
			value_type,
			index,
			object_policy: ObjectPolicy::Dynamic,
			partitioned_by: false,
		}
	}

	pub fn with_object_policy(mut self, policy: ObjectPolicy) -> Self {
		self.object_policy = policy;
		self
	}

	pub fn partitioned(mut self) -> Self {
		self.partitioned_by = true;
		self
	}

	pub fn column(&self) -> &ColumnIdent {
		&self.ident.column
	}
}

/// A synthetic reference describing a named composite fulltext index
/// spanning one or more underlying columns.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IndexReferenceInfo {
	pub reference: ReferenceInfo,
	pub analyzer: String,
	pub columns: Vec<ReferenceInfo>,
}

impl IndexReferenceInfo {
	pub fn new(ident: ReferenceIdent, analyzer: impl Into<String>, columns: Vec<ReferenceInfo>) -> Self {
		Self {
			reference: ReferenceInfo::new(ident, Type::Utf8, IndexMethod::Analyzed),
			analyzer: analyzer.into(),
			columns,
		}
	}

	pub fn index(&self) -> IndexMethod {
		self.reference.index
	}

	pub fn column(&self) -> &ColumnIdent {
		self.reference.column()
	}
}
