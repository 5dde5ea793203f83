// Copyright (c) reifydb.com 2025
// This file is licensed under the MIT, see license.md file

use std::{
	collections::{HashMap, HashSet},
	sync::LazyLock,
};

use crate::Type;

/// Directed convertibility graph over scalar kinds, keyed by type id.
/// Narrowing edges are present on purpose; `Type::value` validates the
/// actual magnitude at conversion time.
static ALLOWED_CONVERSIONS: LazyLock<HashMap<u8, HashSet<Type>>> = LazyLock::new(|| {
	let numerics = || {
		[Type::Int1, Type::Int2, Type::Int4, Type::Int8, Type::Float4, Type::Float8]
	};

	let number_targets = |extra: &[Type]| {
		let mut set: HashSet<Type> = numerics().into_iter().collect();
		set.insert(Type::Utf8);
		set.extend(extra.iter().cloned());
		set
	};

	let mut graph = HashMap::new();
	graph.insert(Type::Int1.to_id(), number_targets(&[]));
	graph.insert(Type::Int2.to_id(), number_targets(&[]));
	graph.insert(Type::Int4.to_id(), number_targets(&[]));
	graph.insert(Type::Int8.to_id(), number_targets(&[Type::DateTime]));
	graph.insert(Type::Float4.to_id(), number_targets(&[]));
	graph.insert(Type::Float8.to_id(), number_targets(&[]));
	graph.insert(Type::Boolean.to_id(), HashSet::from([Type::Boolean, Type::Utf8]));
	graph.insert(Type::Utf8.to_id(), number_targets(&[Type::Boolean, Type::DateTime]));
	graph.insert(Type::DateTime.to_id(), HashSet::from([Type::DateTime, Type::Int8, Type::Utf8]));
	graph
});

/// Reachable scalar targets for `ty`, `None` when the kind has no
/// outgoing edges beyond reflexivity.
pub fn allowed_conversions(ty: &Type) -> Option<&'static HashSet<Type>> {
	ALLOWED_CONVERSIONS.get(&ty.to_id())
}

impl Type {
	/// The "can be represented as" relation used by analysis and
	/// execution. Reflexive for every type. `Undefined` converts to and
	/// from everything; `NotSupported` converts to nothing else.
	pub fn is_convertable_to(&self, other: &Type) -> bool {
		if self == other {
			return true;
		}
		if matches!(self, Type::Undefined) || matches!(other, Type::Undefined) {
			return true;
		}
		match (self, other) {
			(Type::NotSupported, _) | (_, Type::NotSupported) => false,
			// container conversion requires an identical element
			// type, which the equality fast path already covered
			(Type::Array(_), _) | (_, Type::Array(_)) => false,
			(Type::Set(_), _) | (_, Type::Set(_)) => false,
			_ => allowed_conversions(self).is_some_and(|targets| targets.contains(other)),
		}
	}
}
