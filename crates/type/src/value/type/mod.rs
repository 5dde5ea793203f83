// Copyright (c) reifydb.com 2025
// This file is licensed under the MIT, see license.md file

use std::{
	fmt::{Display, Formatter},
	str::FromStr,
};

use serde::{Deserialize, Serialize};

mod convert;
mod parse;

pub use convert::allowed_conversions;

/// All data types a resolved column can carry. Scalar kinds are a closed
/// set; `Array` and `Set` wrap an inner element type.
#[derive(Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Type {
	/// Value is not defined (think null in common programming languages)
	Undefined,
	/// Sentinel for storage fields the engine cannot represent
	NotSupported,
	/// A boolean: true or false.
	Boolean,
	/// A 1-byte signed integer
	Int1,
	/// A 2-byte signed integer
	Int2,
	/// A 4-byte signed integer
	Int4,
	/// An 8-byte signed integer
	Int8,
	/// A 4-byte floating point
	Float4,
	/// An 8-byte floating point
	Float8,
	/// A UTF-8 encoded text
	Utf8,
	/// A point in time with millisecond precision in UTC
	DateTime,
	/// A nested document with its own columns
	Object,
	/// A geographic point (longitude, latitude)
	GeoPoint,
	/// An ordered collection of one element type
	Array(Box<Type>),
	/// An unordered collection of distinct values of one element type
	Set(Box<Type>),
}

impl Type {
	pub fn is_number(&self) -> bool {
		matches!(
			self,
			Type::Int1 | Type::Int2 | Type::Int4 | Type::Int8 | Type::Float4 | Type::Float8
		)
	}

	pub fn is_signed_integer(&self) -> bool {
		matches!(self, Type::Int1 | Type::Int2 | Type::Int4 | Type::Int8)
	}

	pub fn is_floating_point(&self) -> bool {
		matches!(self, Type::Float4 | Type::Float8)
	}

	pub fn is_container(&self) -> bool {
		matches!(self, Type::Array(_) | Type::Set(_))
	}

	pub fn is_object(&self) -> bool {
		matches!(self, Type::Object)
	}

	/// The element type of a container, `None` for scalar kinds.
	pub fn element_type(&self) -> Option<&Type> {
		match self {
			Type::Array(inner) | Type::Set(inner) => Some(inner),
			_ => None,
		}
	}
}

impl Type {
	/// Stable numeric id, indexes the conversion table. Container ids do
	/// not encode the element type.
	pub fn to_id(&self) -> u8 {
		match self {
			Type::Undefined => 0x00,
			Type::NotSupported => 0x01,
			Type::Int1 => 0x02,
			Type::Boolean => 0x03,
			Type::Utf8 => 0x04,
			Type::Float8 => 0x06,
			Type::Float4 => 0x07,
			Type::Int2 => 0x08,
			Type::Int4 => 0x09,
			Type::Int8 => 0x0A,
			Type::DateTime => 0x0B,
			Type::Object => 0x0C,
			Type::GeoPoint => 0x0D,
			Type::Array(_) => 0x64,
			Type::Set(_) => 0x65,
		}
	}

	/// Maps a storage-substrate type name onto a data type. Unknown names
	/// yield `None` and are a validation error at resolution time.
	pub fn from_storage(name: &str) -> Option<Type> {
		match name {
			"byte" => Some(Type::Int1),
			"short" => Some(Type::Int2),
			"integer" => Some(Type::Int4),
			"long" => Some(Type::Int8),
			"float" => Some(Type::Float4),
			"double" => Some(Type::Float8),
			"boolean" => Some(Type::Boolean),
			"string" => Some(Type::Utf8),
			"date" => Some(Type::DateTime),
			"object" | "nested" => Some(Type::Object),
			"geo_point" => Some(Type::GeoPoint),
			_ => None,
		}
	}

	/// Every scalar kind except the `Undefined`/`NotSupported` bookends.
	pub fn primitives() -> impl Iterator<Item = Type> {
		[
			Type::Boolean,
			Type::Int1,
			Type::Int2,
			Type::Int4,
			Type::Int8,
			Type::Float4,
			Type::Float8,
			Type::Utf8,
			Type::DateTime,
		]
		.into_iter()
	}
}

impl Display for Type {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Type::Undefined => f.write_str("Undefined"),
			Type::NotSupported => f.write_str("NotSupported"),
			Type::Boolean => f.write_str("Boolean"),
			Type::Int1 => f.write_str("Int1"),
			Type::Int2 => f.write_str("Int2"),
			Type::Int4 => f.write_str("Int4"),
			Type::Int8 => f.write_str("Int8"),
			Type::Float4 => f.write_str("Float4"),
			Type::Float8 => f.write_str("Float8"),
			Type::Utf8 => f.write_str("Utf8"),
			Type::DateTime => f.write_str("DateTime"),
			Type::Object => f.write_str("Object"),
			Type::GeoPoint => f.write_str("GeoPoint"),
			Type::Array(inner) => write!(f, "Array<{}>", inner),
			Type::Set(inner) => write!(f, "Set<{}>", inner),
		}
	}
}

impl FromStr for Type {
	type Err = ();

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_uppercase().as_str() {
			"UNDEFINED" => Ok(Type::Undefined),
			"BOOLEAN" | "BOOL" => Ok(Type::Boolean),
			"INT1" => Ok(Type::Int1),
			"INT2" => Ok(Type::Int2),
			"INT4" => Ok(Type::Int4),
			"INT8" => Ok(Type::Int8),
			"FLOAT4" => Ok(Type::Float4),
			"FLOAT8" => Ok(Type::Float8),
			"UTF8" | "TEXT" => Ok(Type::Utf8),
			"DATETIME" | "TIMESTAMP" => Ok(Type::DateTime),
			"OBJECT" => Ok(Type::Object),
			"GEO_POINT" => Ok(Type::GeoPoint),
			_ => Err(()),
		}
	}
}
