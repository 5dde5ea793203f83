// Copyright (c) reifydb.com 2025
// This file is licensed under the MIT, see license.md file

use std::fmt::{Display, Formatter};

use crate::diagnostic::Diagnostic;

#[derive(Debug, Clone, PartialEq)]
pub struct Error(pub Diagnostic);

impl Display for Error {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}: {}", self.0.code, self.0.message)?;
		if let Some(label) = &self.0.label {
			write!(f, " ({})", label)?;
		}
		Ok(())
	}
}

impl std::error::Error for Error {}

impl Error {
	pub fn code(&self) -> &str {
		&self.0.code
	}

	pub fn diagnostic(self) -> Diagnostic {
		self.0
	}
}

pub type Result<T> = std::result::Result<T, Error>;

/// Wraps a [`Diagnostic`] into an [`Error`].
#[macro_export]
macro_rules! error {
	($diagnostic:expr) => {
		$crate::Error($diagnostic)
	};
}
