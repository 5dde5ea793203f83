// Copyright (c) reifydb.com 2025
// This file is licensed under the MIT, see license.md file

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// The relational comparison operators the planner binds predicates to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperatorType {
	Equal,
	NotEqual,
	LessThan,
	LessThanEqual,
	GreaterThan,
	GreaterThanEqual,
	IsDistinctFrom,
}

impl OperatorType {
	pub const ALL: [OperatorType; 7] = [
		OperatorType::Equal,
		OperatorType::NotEqual,
		OperatorType::LessThan,
		OperatorType::LessThanEqual,
		OperatorType::GreaterThan,
		OperatorType::GreaterThanEqual,
		OperatorType::IsDistinctFrom,
	];

	/// The logically inverse operator, used when the planner negates a
	/// predicate. `IS DISTINCT FROM` has none; callers must treat `None`
	/// as "cannot invert" instead of substituting a guess.
	pub fn inverse(&self) -> Option<OperatorType> {
		match self {
			OperatorType::Equal => Some(OperatorType::NotEqual),
			OperatorType::NotEqual => Some(OperatorType::Equal),
			OperatorType::LessThan => Some(OperatorType::GreaterThanEqual),
			OperatorType::LessThanEqual => Some(OperatorType::GreaterThan),
			OperatorType::GreaterThan => Some(OperatorType::LessThanEqual),
			OperatorType::GreaterThanEqual => Some(OperatorType::LessThan),
			OperatorType::IsDistinctFrom => None,
		}
	}
}

impl Display for OperatorType {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			OperatorType::Equal => f.write_str("="),
			OperatorType::NotEqual => f.write_str("<>"),
			OperatorType::LessThan => f.write_str("<"),
			OperatorType::LessThanEqual => f.write_str("<="),
			OperatorType::GreaterThan => f.write_str(">"),
			OperatorType::GreaterThanEqual => f.write_str(">="),
			OperatorType::IsDistinctFrom => f.write_str("IS DISTINCT FROM"),
		}
	}
}
