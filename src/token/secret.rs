//! Token secret wrapper that keeps credential material out of logs.

// self
use crate::_prelude::*;

/// Redacted token secret wrapper.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSecret(String);
impl TokenSecret {
	/// Wraps a new secret string.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Extracts a secret from a JSON response field.
	///
	/// Only non-empty strings qualify; any other value reads as absent.
	pub fn from_value(value: Value) -> Option<Self> {
		match value {
			Value::String(secret) if !secret.is_empty() => Some(Self(secret)),
			_ => None,
		}
	}

	/// Returns the inner token value. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}
}
impl AsRef<str> for TokenSecret {
	fn as_ref(&self) -> &str {
		self.expose()
	}
}
impl Debug for TokenSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("TokenSecret").field(&"<redacted>").finish()
	}
}
impl Display for TokenSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}
