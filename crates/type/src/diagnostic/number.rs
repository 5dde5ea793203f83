// Copyright (c) reifydb.com 2025
// This file is licensed under the MIT, see license.md file

use std::fmt::Display;

use crate::{Type, diagnostic::Diagnostic};

pub fn invalid_number_format(value: impl Display, target: &Type) -> Diagnostic {
	let label = Some(format!("'{}' is not a valid {} number", value, target));

	let (help, notes) = match target {
		Type::Float4 | Type::Float8 => (
			"use decimal format (e.g., 123.45, -67.89, 1.23e-4)".to_string(),
			vec![
				"valid: 123.45".to_string(),
				"valid: -67.89".to_string(),
				"valid: 1.23e-4".to_string(),
			],
		),
		Type::Int1 | Type::Int2 | Type::Int4 | Type::Int8 => (
			"use integer format (e.g., 123, -456) or decimal that can be truncated".to_string(),
			vec![
				"valid: 123".to_string(),
				"valid: -456".to_string(),
				"truncated: 123.7 → 123".to_string(),
			],
		),
		_ => (
			"ensure the value is a valid number".to_string(),
			vec!["use a proper number format".to_string()],
		),
	};

	Diagnostic {
		code: "NUMBER_001".to_string(),
		message: "invalid number format".to_string(),
		label,
		help: Some(help),
		notes,
		column: None,
		cause: None,
	}
}

pub fn number_out_of_range(value: impl Display, target: &Type) -> Diagnostic {
	let range = value_range(target);
	let label = Some(format!("value '{}' exceeds the valid range for type {} ({})", value, target, range));

	Diagnostic {
		code: "NUMBER_002".to_string(),
		message: "number out of range".to_string(),
		label,
		help: Some(format!("use a value within the valid range for {} or use a wider type", target)),
		notes: vec![format!("valid range: {}", range)],
		column: None,
		cause: None,
	}
}

fn value_range(target: &Type) -> String {
	match target {
		Type::Int1 => format!("{} to {}", i8::MIN, i8::MAX),
		Type::Int2 => format!("{} to {}", i16::MIN, i16::MAX),
		Type::Int4 => format!("{} to {}", i32::MIN, i32::MAX),
		Type::Int8 => format!("{} to {}", i64::MIN, i64::MAX),
		Type::Float4 => format!("{:e} to {:e}", f32::MIN, f32::MAX),
		Type::Float8 => format!("{:e} to {:e}", f64::MIN, f64::MAX),
		_ => "unbounded".to_string(),
	}
}
