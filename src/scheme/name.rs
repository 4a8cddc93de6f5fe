//! Strongly typed scheme names.

// std
use std::{borrow::Borrow, ops::Deref};
// self
use crate::_prelude::*;

const SCHEME_NAME_MAX_LEN: usize = 128;

/// Error returned when a scheme name fails validation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ThisError)]
pub enum SchemeNameError {
	/// The name was empty.
	#[error("Scheme name cannot be empty.")]
	Empty,
	/// The name contains whitespace characters.
	#[error("Scheme name `{name}` contains whitespace.")]
	ContainsWhitespace {
		/// Offending name.
		name: String,
	},
	/// The name exceeded the allowed character count.
	#[error("Scheme name exceeds {max} characters.")]
	TooLong {
		/// Maximum permitted character count.
		max: usize,
	},
}

/// Registered name of an authentication scheme (`Cookies`, `OpenIdConnect`, ...).
///
/// Names compare case-sensitively and borrow as `str`, so registries keyed by
/// [`SchemeName`] can be queried with plain string slices.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SchemeName(String);
impl SchemeName {
	/// Creates a new scheme name after validation.
	pub fn new(value: impl AsRef<str>) -> Result<Self, SchemeNameError> {
		let view = value.as_ref();

		validate_view(view)?;

		Ok(Self(view.to_owned()))
	}

	/// Returns the name as a string slice.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}
impl Deref for SchemeName {
	type Target = str;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
impl AsRef<str> for SchemeName {
	fn as_ref(&self) -> &str {
		&self.0
	}
}
impl Borrow<str> for SchemeName {
	fn borrow(&self) -> &str {
		&self.0
	}
}
impl From<SchemeName> for String {
	fn from(value: SchemeName) -> Self {
		value.0
	}
}
impl TryFrom<String> for SchemeName {
	type Error = SchemeNameError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		validate_view(&value)?;

		Ok(Self(value))
	}
}
impl TryFrom<&str> for SchemeName {
	type Error = SchemeNameError;

	fn try_from(value: &str) -> Result<Self, Self::Error> {
		Self::new(value)
	}
}
impl FromStr for SchemeName {
	type Err = SchemeNameError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::new(s)
	}
}
impl Debug for SchemeName {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "Scheme({})", self.0)
	}
}
impl Display for SchemeName {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.0)
	}
}

fn validate_view(view: &str) -> Result<(), SchemeNameError> {
	if view.is_empty() {
		return Err(SchemeNameError::Empty);
	}
	if view.chars().any(char::is_whitespace) {
		return Err(SchemeNameError::ContainsWhitespace { name: view.to_owned() });
	}
	if view.chars().count() > SCHEME_NAME_MAX_LEN {
		return Err(SchemeNameError::TooLong { max: SCHEME_NAME_MAX_LEN });
	}

	Ok(())
}
