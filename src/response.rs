//! Wire-format helpers for DigitalOcean response payloads.
//!
//! The provider layer funnels every raw body through [`parse_object`] and
//! [`check_response`] before an adapter is constructed, so provider-signaled
//! failures surface as [`IdentityProviderError`] and shape mismatches as
//! [`MalformedResponseError`].

// self
use crate::{
	_prelude::*,
	error::{IdentityProviderError, MalformedResponseError},
};

/// Deserializes a JSON object, reporting the failing path on malformed input.
pub fn parse_object(
	endpoint: &'static str,
	body: &[u8],
) -> Result<Map<String, Value>, MalformedResponseError> {
	let mut deserializer = serde_json::Deserializer::from_slice(body);
	let value: Value = serde_path_to_error::deserialize(&mut deserializer)
		.map_err(|source| MalformedResponseError::Json { endpoint, source })?;

	match value {
		Value::Object(fields) => Ok(fields),
		_ => Err(MalformedResponseError::NotAnObject { endpoint }),
	}
}

/// Validates a raw account-endpoint response and returns the parsed mapping.
///
/// A non-2xx status or an error field in the body yields
/// [`IdentityProviderError`]; the token endpoint's equivalent check is handled
/// by the `oauth2` client before responses ever reach this crate.
pub fn check_response(status: u16, body: &[u8]) -> Result<Map<String, Value>> {
	let parsed = parse_object("account", body);

	if !(200..300).contains(&status) {
		let message = parsed
			.ok()
			.as_ref()
			.and_then(error_message)
			.unwrap_or_else(|| format!("HTTP status {status}"));

		return Err(IdentityProviderError { message, status: Some(status) }.into());
	}

	let fields = parsed?;

	if let Some(message) = error_message(&fields) {
		return Err(IdentityProviderError { message, status: Some(status) }.into());
	}

	Ok(fields)
}

/// Extracts a provider-supplied error message from a response body.
///
/// DigitalOcean uses a bare `error` field on the OAuth endpoints and an
/// `{id, message}` pair on the API endpoints.
pub fn error_message(fields: &Map<String, Value>) -> Option<String> {
	if let Some(value) = fields.get("error") {
		return Some(describe(value));
	}
	if fields.contains_key("id") {
		if let Some(message) = fields.get("message").and_then(Value::as_str) {
			return Some(message.to_owned());
		}
	}

	None
}

/// Loose empty-value rule used by the resource-owner accessors: `null`,
/// `false`, numeric zero, empty strings, and empty containers all count as
/// absent.
pub(crate) fn is_truthy(value: &Value) -> bool {
	match value {
		Value::Null => false,
		Value::Bool(flag) => *flag,
		Value::Number(number) => number.as_f64().map(|n| n != 0.0).unwrap_or(true),
		Value::String(text) => !text.is_empty(),
		Value::Array(items) => !items.is_empty(),
		Value::Object(fields) => !fields.is_empty(),
	}
}

fn describe(value: &Value) -> String {
	match value {
		Value::String(text) => text.clone(),
		other => other.to_string(),
	}
}
