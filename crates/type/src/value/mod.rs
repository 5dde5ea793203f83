// Copyright (c) reifydb.com 2025
// This file is licensed under the MIT, see license.md file

use std::{
	cmp::Ordering,
	fmt::{Display, Formatter},
};

use serde::{Deserialize, Serialize};

mod r#type;

pub use r#type::{Type, allowed_conversions};

/// A typed value, represented as a native Rust type.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Value {
	/// Value is not defined (think null in common programming languages)
	Undefined,
	/// A boolean: true or false.
	Boolean(bool),
	/// A 1-byte signed integer
	Int1(i8),
	/// A 2-byte signed integer
	Int2(i16),
	/// A 4-byte signed integer
	Int4(i32),
	/// An 8-byte signed integer
	Int8(i64),
	/// A 4-byte floating point
	Float4(f32),
	/// An 8-byte floating point
	Float8(f64),
	/// A UTF-8 encoded text
	Utf8(String),
	/// A point in time, milliseconds since the unix epoch in UTC
	DateTime(i64),
	/// A nested document
	Object(serde_json::Map<String, serde_json::Value>),
	/// A geographic point (longitude, latitude)
	GeoPoint([f64; 2]),
	/// An ordered collection of values of one element type
	Array(Vec<Value>),
	/// An unordered collection of values of one element type.
	/// Distinctness is the producer's contract, not enforced here; the
	/// representation stays a plain vector so float elements need no
	/// hashing or total order.
	Set(Vec<Value>),
}

impl Value {
	pub fn undefined() -> Self {
		Value::Undefined
	}

	pub fn boolean(v: impl Into<bool>) -> Self {
		Value::Boolean(v.into())
	}

	pub fn int1(v: impl Into<i8>) -> Self {
		Value::Int1(v.into())
	}

	pub fn int2(v: impl Into<i16>) -> Self {
		Value::Int2(v.into())
	}

	pub fn int4(v: impl Into<i32>) -> Self {
		Value::Int4(v.into())
	}

	pub fn int8(v: impl Into<i64>) -> Self {
		Value::Int8(v.into())
	}

	pub fn float4(v: impl Into<f32>) -> Self {
		Value::Float4(v.into())
	}

	pub fn float8(v: impl Into<f64>) -> Self {
		Value::Float8(v.into())
	}

	pub fn utf8(v: impl Into<String>) -> Self {
		Value::Utf8(v.into())
	}

	pub fn datetime(v: impl Into<i64>) -> Self {
		Value::DateTime(v.into())
	}
}

impl Value {
	pub fn get_type(&self) -> Type {
		match self {
			Value::Undefined => Type::Undefined,
			Value::Boolean(_) => Type::Boolean,
			Value::Int1(_) => Type::Int1,
			Value::Int2(_) => Type::Int2,
			Value::Int4(_) => Type::Int4,
			Value::Int8(_) => Type::Int8,
			Value::Float4(_) => Type::Float4,
			Value::Float8(_) => Type::Float8,
			Value::Utf8(_) => Type::Utf8,
			Value::DateTime(_) => Type::DateTime,
			Value::Object(_) => Type::Object,
			Value::GeoPoint(_) => Type::GeoPoint,
			Value::Array(values) => Type::Array(Box::new(
				values.first().map(Value::get_type).unwrap_or(Type::Undefined),
			)),
			Value::Set(values) => Type::Set(Box::new(
				values.first().map(Value::get_type).unwrap_or(Type::Undefined),
			)),
		}
	}
}

impl PartialOrd for Value {
	/// Only values of the same variant order; everything else, including
	/// `Undefined`, compares as unknown.
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		match (self, other) {
			(Value::Boolean(l), Value::Boolean(r)) => l.partial_cmp(r),
			(Value::Int1(l), Value::Int1(r)) => l.partial_cmp(r),
			(Value::Int2(l), Value::Int2(r)) => l.partial_cmp(r),
			(Value::Int4(l), Value::Int4(r)) => l.partial_cmp(r),
			(Value::Int8(l), Value::Int8(r)) => l.partial_cmp(r),
			(Value::Float4(l), Value::Float4(r)) => l.partial_cmp(r),
			(Value::Float8(l), Value::Float8(r)) => l.partial_cmp(r),
			(Value::Utf8(l), Value::Utf8(r)) => l.partial_cmp(r),
			(Value::DateTime(l), Value::DateTime(r)) => l.partial_cmp(r),
			(Value::GeoPoint(l), Value::GeoPoint(r)) => l.partial_cmp(r),
			(Value::Array(l), Value::Array(r)) => l.partial_cmp(r),
			(Value::Set(l), Value::Set(r)) => l.partial_cmp(r),
			_ => None,
		}
	}
}

impl Display for Value {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Value::Undefined => f.write_str("undefined"),
			Value::Boolean(true) => f.write_str("true"),
			Value::Boolean(false) => f.write_str("false"),
			Value::Int1(value) => Display::fmt(value, f),
			Value::Int2(value) => Display::fmt(value, f),
			Value::Int4(value) => Display::fmt(value, f),
			Value::Int8(value) => Display::fmt(value, f),
			Value::Float4(value) => Display::fmt(value, f),
			Value::Float8(value) => Display::fmt(value, f),
			Value::Utf8(value) => Display::fmt(value, f),
			Value::DateTime(value) => Display::fmt(value, f),
			Value::Object(value) => {
				write!(f, "{}", serde_json::Value::Object(value.clone()))
			}
			Value::GeoPoint([lon, lat]) => write!(f, "({}, {})", lon, lat),
			Value::Array(values) | Value::Set(values) => {
				f.write_str("[")?;
				for (idx, value) in values.iter().enumerate() {
					if idx > 0 {
						f.write_str(", ")?;
					}
					Display::fmt(value, f)?;
				}
				f.write_str("]")
			}
		}
	}
}
