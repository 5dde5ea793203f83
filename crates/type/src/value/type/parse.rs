// Copyright (c) reifydb.com 2025
// This file is licensed under the MIT, see license.md file

use serde_json::Value as Json;

use crate::{
	Type, Value,
	diagnostic::{
		cast::unsupported_cast,
		number::{invalid_number_format, number_out_of_range},
	},
	error,
};

impl Type {
	/// Converts a raw document value into a typed [`Value`], failing when
	/// the magnitude exceeds the representable range (`NUMBER_002`) or the
	/// raw value cannot be parsed at all (`NUMBER_001`). Never clamps or
	/// truncates magnitude; only the fractional part of a float may be
	/// dropped when targeting an integer kind.
	pub fn value(&self, raw: &Json) -> crate::Result<Value> {
		if raw.is_null() {
			return Ok(Value::Undefined);
		}
		match self {
			Type::Undefined => Ok(Value::Undefined),
			Type::NotSupported => Err(error!(unsupported_cast(raw, self))),
			Type::Boolean => self.boolean(raw),
			Type::Int1 => Ok(Value::Int1(self.integer(raw, i8::MIN as i64, i8::MAX as i64)? as i8)),
			Type::Int2 => Ok(Value::Int2(self.integer(raw, i16::MIN as i64, i16::MAX as i64)? as i16)),
			Type::Int4 => Ok(Value::Int4(self.integer(raw, i32::MIN as i64, i32::MAX as i64)? as i32)),
			Type::Int8 => Ok(Value::Int8(self.integer(raw, i64::MIN, i64::MAX)?)),
			Type::Float4 => {
				let value = self.float(raw)?;
				if value.abs() > f32::MAX as f64 {
					return Err(error!(number_out_of_range(raw, self)));
				}
				Ok(Value::Float4(value as f32))
			}
			Type::Float8 => Ok(Value::Float8(self.float(raw)?)),
			Type::Utf8 => match raw {
				Json::String(text) => Ok(Value::Utf8(text.clone())),
				Json::Bool(_) | Json::Number(_) => Ok(Value::Utf8(raw.to_string())),
				_ => Err(error!(unsupported_cast(raw, self))),
			},
			Type::DateTime => Ok(Value::DateTime(self.integer(raw, i64::MIN, i64::MAX)?)),
			Type::Object => match raw {
				Json::Object(map) => Ok(Value::Object(map.clone())),
				_ => Err(error!(unsupported_cast(raw, self))),
			},
			Type::GeoPoint => match raw.as_array() {
				Some(point) if point.len() == 2 => {
					let lon = point[0].as_f64();
					let lat = point[1].as_f64();
					match (lon, lat) {
						(Some(lon), Some(lat)) => Ok(Value::GeoPoint([lon, lat])),
						_ => Err(error!(unsupported_cast(raw, self))),
					}
				}
				_ => Err(error!(unsupported_cast(raw, self))),
			},
			Type::Array(inner) => Ok(Value::Array(self.elements(inner, raw)?)),
			Type::Set(inner) => Ok(Value::Set(self.elements(inner, raw)?)),
		}
	}

	fn boolean(&self, raw: &Json) -> crate::Result<Value> {
		match raw {
			Json::Bool(value) => Ok(Value::Boolean(*value)),
			Json::Number(_) => Ok(Value::Boolean(raw.as_f64().is_some_and(|v| v != 0.0))),
			Json::String(text) => match text.as_str() {
				"true" | "t" => Ok(Value::Boolean(true)),
				"false" | "f" => Ok(Value::Boolean(false)),
				_ => Err(error!(unsupported_cast(raw, self))),
			},
			_ => Err(error!(unsupported_cast(raw, self))),
		}
	}

	fn integer(&self, raw: &Json, min: i64, max: i64) -> crate::Result<i64> {
		let value = match raw {
			Json::Number(number) => {
				if let Some(value) = number.as_i64() {
					value
				} else if number.as_u64().is_some() {
					// only u64 values beyond i64::MAX end up here
					return Err(error!(number_out_of_range(raw, self)));
				} else {
					return self.truncated(raw, number.as_f64().unwrap_or(f64::NAN), min, max);
				}
			}
			Json::String(text) => {
				if let Ok(value) = text.parse::<i64>() {
					value
				} else if let Ok(value) = text.parse::<f64>() {
					return self.truncated(raw, value, min, max);
				} else {
					return Err(error!(invalid_number_format(raw, self)));
				}
			}
			Json::Bool(value) => *value as i64,
			_ => return Err(error!(unsupported_cast(raw, self))),
		};
		if value < min || value > max {
			return Err(error!(number_out_of_range(raw, self)));
		}
		Ok(value)
	}

	// drops the fraction, never the magnitude
	fn truncated(&self, raw: &Json, value: f64, min: i64, max: i64) -> crate::Result<i64> {
		if value.is_nan() {
			return Err(error!(invalid_number_format(raw, self)));
		}
		let truncated = value.trunc();
		// i64::MAX as f64 rounds up to 2^63, where the cast would
		// silently clamp; the upper bound must be strict
		let bound = (i64::MAX as u64 + 1) as f64;
		if truncated < -bound || truncated >= bound {
			return Err(error!(number_out_of_range(raw, self)));
		}
		let truncated = truncated as i64;
		if truncated < min || truncated > max {
			return Err(error!(number_out_of_range(raw, self)));
		}
		Ok(truncated)
	}

	fn float(&self, raw: &Json) -> crate::Result<f64> {
		match raw {
			Json::Number(number) => number
				.as_f64()
				.ok_or_else(|| error!(number_out_of_range(raw, self))),
			Json::String(text) => text
				.parse::<f64>()
				.map_err(|_| error!(invalid_number_format(raw, self))),
			Json::Bool(value) => Ok(*value as u8 as f64),
			_ => Err(error!(unsupported_cast(raw, self))),
		}
	}

	fn elements(&self, inner: &Type, raw: &Json) -> crate::Result<Vec<Value>> {
		match raw {
			Json::Array(values) => values.iter().map(|value| inner.value(value)).collect(),
			_ => Err(error!(unsupported_cast(raw, self))),
		}
	}
}
