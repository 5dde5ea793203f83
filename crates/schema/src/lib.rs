// Copyright (c) reifydb.com 2025
// This file is licensed under the MIT, see license.md file

#![cfg_attr(not(debug_assertions), deny(warnings))]

pub use strata_type::{Error, Result};

pub use column::{ColumnIdent, ReferenceIdent, TableIdent};
pub use merge::{SchemaPublisher, TemplateUpdate, merge, merge_and_publish};
pub use reference::{IndexMethod, IndexReferenceInfo, ObjectPolicy, ReferenceInfo};
pub use resolve::{MappingSnapshot, resolve};
pub use routine::{RoutineInfo, RoutineProvider, RoutineType, routines};
pub use table::{DEFAULT_MAPPING_TYPE, TableSchema, system_columns};

mod column;
mod merge;
mod reference;
mod resolve;
mod routine;
mod table;
