// Copyright (c) reifydb.com 2025
// This file is licensed under the MIT, see license.md file

#![cfg_attr(not(debug_assertions), deny(warnings))]

pub use strata_type::{Error, Result};

pub use catalog::{CmpOperator, operator};
pub use operator::OperatorType;

mod catalog;
mod operator;
