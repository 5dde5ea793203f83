// Copyright (c) reifydb.com 2025
// This file is licensed under the MIT, see license.md file

use crate::diagnostic::Diagnostic;

pub fn unknown_storage_type(column: &str, type_name: &str) -> Diagnostic {
	Diagnostic {
		code: "SCHEMA_001".to_string(),
		message: format!("unknown storage type '{}'", type_name),
		label: Some(format!("column '{}' declares storage type '{}'", column, type_name)),
		help: Some("declare one of the storage type names the engine maps to a data type".to_string()),
		notes: vec![],
		column: None,
		cause: None,
	}
}

pub fn column_not_found(index: &str, column: &str) -> Diagnostic {
	Diagnostic {
		code: "SCHEMA_002".to_string(),
		message: format!("column '{}' not found", column),
		label: Some(format!("index '{}' references the unknown column '{}'", index, column)),
		help: Some("composite indices may only reference columns present in the mapping".to_string()),
		notes: vec![],
		column: None,
		cause: None,
	}
}

pub fn malformed_meta(detail: impl Into<String>) -> Diagnostic {
	Diagnostic {
		code: "SCHEMA_003".to_string(),
		message: "malformed mapping metadata".to_string(),
		label: Some(detail.into()),
		help: None,
		notes: vec![],
		column: None,
		cause: None,
	}
}

pub fn conflicting_column(column: &str, existing: &str, incoming: &str) -> Diagnostic {
	Diagnostic {
		code: "SCHEMA_004".to_string(),
		message: format!("conflicting definitions for column '{}'", column),
		label: Some(format!("existing: {} incoming: {}", existing, incoming)),
		help: Some("alter the table instead of re-declaring the column with a different definition".to_string()),
		notes: vec![],
		column: None,
		cause: None,
	}
}
