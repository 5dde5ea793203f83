// Copyright (c) reifydb.com 2025
// This file is licensed under the MIT, see license.md file

use std::{
	cmp::Ordering,
	collections::HashMap,
	sync::LazyLock,
};

use strata_type::{Type, Value};

use crate::operator::OperatorType;

/// One comparison operator bound to a concrete operand type. All
/// operators share the same evaluation contract: a three-way sign from
/// comparing both sides, mapped to a boolean by a per-operator predicate.
#[derive(Clone, Debug, PartialEq)]
pub struct CmpOperator {
	op: OperatorType,
	operand_type: Type,
}

impl CmpOperator {
	pub fn new(op: OperatorType, operand_type: Type) -> Self {
		Self {
			op,
			operand_type,
		}
	}

	pub fn op(&self) -> OperatorType {
		self.op
	}

	pub fn operand_type(&self) -> &Type {
		&self.operand_type
	}

	/// Evaluates the predicate over two typed values.
	///
	/// The ordered operators return `None` when either side is unknown
	/// or the values do not order. `IS DISTINCT FROM` is total: two
	/// unknowns are not distinct, an unknown is distinct from any known
	/// value.
	pub fn evaluate(&self, left: &Value, right: &Value) -> Option<bool> {
		if self.op == OperatorType::IsDistinctFrom {
			return Some(match (left, right) {
				(Value::Undefined, Value::Undefined) => false,
				(Value::Undefined, _) | (_, Value::Undefined) => true,
				(left, right) => left != right,
			});
		}

		let sign = left.partial_cmp(right)?;
		Some(match self.op {
			OperatorType::Equal => sign == Ordering::Equal,
			OperatorType::NotEqual => sign != Ordering::Equal,
			OperatorType::LessThan => sign == Ordering::Less,
			OperatorType::LessThanEqual => sign != Ordering::Greater,
			OperatorType::GreaterThan => sign == Ordering::Greater,
			OperatorType::GreaterThanEqual => sign != Ordering::Less,
			OperatorType::IsDistinctFrom => return None,
		})
	}
}

static OPERATORS: LazyLock<HashMap<(OperatorType, Type), CmpOperator>> = LazyLock::new(|| {
	let mut operators = HashMap::new();
	for operand_type in Type::primitives() {
		for op in OperatorType::ALL {
			operators.insert((op, operand_type.clone()), CmpOperator::new(op, operand_type.clone()));
		}
	}
	operators
});

/// Looks up the registered operator instance for an operator kind and a
/// scalar operand type. Container and object types carry no comparison
/// operators.
pub fn operator(op: OperatorType, operand_type: &Type) -> Option<&'static CmpOperator> {
	OPERATORS.get(&(op, operand_type.clone()))
}
