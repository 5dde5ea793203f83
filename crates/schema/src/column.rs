// Copyright (c) reifydb.com 2025
// This file is licensed under the MIT, see license.md file

use std::{
	cmp::Ordering,
	fmt::{Display, Formatter},
};

use serde::{Deserialize, Serialize};

/// Path-based identifier for a possibly nested column: a non-empty,
/// ordered sequence of name segments. Created during resolution, never
/// mutated.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColumnIdent {
	segments: Vec<String>,
}

impl ColumnIdent {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			segments: vec![name.into()],
		}
	}

	pub fn with_path(name: impl Into<String>, path: impl IntoIterator<Item = impl Into<String>>) -> Self {
		let mut segments = vec![name.into()];
		segments.extend(path.into_iter().map(Into::into));
		Self {
			segments,
		}
	}

	/// Parses the canonical dotted form; `from_path("a.b")` equals
	/// `with_path("a", ["b"])`.
	pub fn from_path(path: &str) -> Self {
		Self {
			segments: path.split('.').map(str::to_string).collect(),
		}
	}

	/// The root segment.
	pub fn name(&self) -> &str {
		&self.segments[0]
	}

	/// The nested segments below the root.
	pub fn path(&self) -> &[String] {
		&self.segments[1..]
	}

	pub fn segments(&self) -> &[String] {
		&self.segments
	}

	/// Fully-qualified name, segments joined with `.`.
	pub fn fqn(&self) -> String {
		self.segments.join(".")
	}

	/// The deepest segment; equals `name()` for top level idents.
	pub fn last_segment(&self) -> &str {
		&self.segments[self.segments.len() - 1]
	}

	pub fn is_top_level(&self) -> bool {
		self.segments.len() == 1
	}

	/// Appends one segment, producing the ident of a nested child.
	pub fn child(&self, segment: impl Into<String>) -> ColumnIdent {
		let mut segments = self.segments.clone();
		segments.push(segment.into());
		Self {
			segments,
		}
	}

	/// True iff `other`'s segments are a strict prefix of this ident's.
	pub fn is_child_of(&self, other: &ColumnIdent) -> bool {
		self.segments.len() > other.segments.len() && self.segments.starts_with(&other.segments)
	}

	fn fqn_bytes(&self) -> impl Iterator<Item = u8> + '_ {
		self.segments.iter().enumerate().flat_map(|(idx, segment)| {
			(idx > 0).then_some(b'.').into_iter().chain(segment.bytes())
		})
	}
}

impl Ord for ColumnIdent {
	/// Lexicographic by fqn, which drives every deterministic column
	/// enumeration the catalog emits. Segment boundaries break the rare
	/// fqn tie between idents whose names contain a literal dot.
	fn cmp(&self, other: &Self) -> Ordering {
		self.fqn_bytes()
			.cmp(other.fqn_bytes())
			.then_with(|| self.segments.cmp(&other.segments))
	}
}

impl PartialOrd for ColumnIdent {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

impl Display for ColumnIdent {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		for (idx, segment) in self.segments.iter().enumerate() {
			if idx > 0 {
				f.write_str(".")?;
			}
			f.write_str(segment)?;
		}
		Ok(())
	}
}

/// Identity of one table, optionally qualified by a schema name.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TableIdent {
	pub schema: Option<String>,
	pub name: String,
}

impl TableIdent {
	pub fn new(schema: Option<String>, name: impl Into<String>) -> Self {
		Self {
			schema,
			name: name.into(),
		}
	}
}

impl Display for TableIdent {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		if let Some(schema) = &self.schema {
			write!(f, "{}.", schema)?;
		}
		f.write_str(&self.name)
	}
}

/// Identity of one resolvable reference: table plus column path.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ReferenceIdent {
	pub table: TableIdent,
	pub column: ColumnIdent,
}

impl ReferenceIdent {
	pub fn new(table: TableIdent, column: ColumnIdent) -> Self {
		Self {
			table,
			column,
		}
	}
}

impl Display for ReferenceIdent {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}.{}", self.table, self.column)
	}
}
