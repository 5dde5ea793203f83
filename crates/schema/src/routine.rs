// Copyright (c) reifydb.com 2025
// This file is licensed under the MIT, see license.md file

use std::{
	collections::HashSet,
	fmt::{Display, Formatter},
};

use serde::{Deserialize, Serialize};

/// The kind of a named text processing or callable routine the cluster
/// exposes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoutineType {
	Analyzer,
	CharFilter,
	TokenFilter,
	Tokenizer,
	Function,
}

impl Display for RoutineType {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			RoutineType::Analyzer => f.write_str("ANALYZER"),
			RoutineType::CharFilter => f.write_str("CHAR_FILTER"),
			RoutineType::TokenFilter => f.write_str("TOKEN_FILTER"),
			RoutineType::Tokenizer => f.write_str("TOKENIZER"),
			RoutineType::Function => f.write_str("FUNCTION"),
		}
	}
}

/// One catalog row describing a routine: builtin ones carry no
/// definition, user created ones retain their source definition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutineInfo {
	pub name: String,
	pub routine_type: RoutineType,
	pub definition: Option<String>,
	pub builtin: bool,
}

impl RoutineInfo {
	pub fn builtin(name: impl Into<String>, routine_type: RoutineType) -> Self {
		Self {
			name: name.into(),
			routine_type,
			definition: None,
			builtin: true,
		}
	}

	pub fn custom(name: impl Into<String>, routine_type: RoutineType, definition: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			routine_type,
			definition: Some(definition.into()),
			builtin: false,
		}
	}
}

/// Source of routine rows, one provider per registry the cluster keeps.
pub trait RoutineProvider {
	fn routines(&self) -> crate::Result<Vec<RoutineInfo>>;
}

/// Collects the routine rows of all providers, deduplicated on name and
/// type with the earlier provider winning.
pub fn routines(providers: &[&dyn RoutineProvider]) -> crate::Result<Vec<RoutineInfo>> {
	let mut seen = HashSet::new();
	let mut collected = Vec::new();
	for provider in providers {
		for routine in provider.routines()? {
			if seen.insert((routine.name.clone(), routine.routine_type)) {
				collected.push(routine);
			}
		}
	}
	Ok(collected)
}
