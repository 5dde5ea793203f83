// Copyright (c) reifydb.com 2025
// This file is licensed under the MIT, see license.md file

use std::fmt::Display;

use crate::{Type, diagnostic::Diagnostic};

pub fn unsupported_cast(value: impl Display, target: &Type) -> Diagnostic {
	let label = Some(format!("cannot cast {} to {}", value, target));
	Diagnostic {
		code: "CAST_001".to_string(),
		message: format!("unsupported cast to {}", target),
		label,
		help: Some("ensure the source and target types are compatible for casting".to_string()),
		notes: vec![
			"supported casts include: numeric to numeric, numeric to string, string to timestamp"
				.to_string(),
		],
		column: None,
		cause: None,
	}
}
