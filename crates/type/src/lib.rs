// Copyright (c) reifydb.com 2025
// This file is licensed under the MIT, see license.md file

#![cfg_attr(not(debug_assertions), deny(warnings))]

pub use error::{Error, Result};
pub use value::{Type, Value, allowed_conversions};

pub mod diagnostic;
mod error;
mod value;
