//! Resource-owner value object over DigitalOcean's `/v2/account` response.

// self
use crate::{_prelude::*, error::MalformedResponseError, response};

/// Typed read-only view over the raw `account` mapping.
///
/// Accessors follow the upstream plug-in's loose empty-value rule: a missing
/// key, `null`, `false`, numeric zero, an empty string, or an empty container
/// all read as `None`. In particular a `droplet_limit` of exactly zero is
/// reported as `None`; see the getter docs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResourceOwner {
	account: Map<String, Value>,
}
impl ResourceOwner {
	/// Adapts a deserialized account-endpoint response.
	///
	/// Fails eagerly when the top-level `account` object is absent, so malformed
	/// payloads surface at construction instead of on first accessor call.
	pub fn from_response(mut fields: Map<String, Value>) -> Result<Self, MalformedResponseError> {
		match fields.remove("account") {
			Some(Value::Object(account)) => Ok(Self { account }),
			_ => Err(MalformedResponseError::MissingAccount),
		}
	}

	/// Returns the account UUID.
	pub fn id(&self) -> Option<&str> {
		self.field_str("uuid")
	}

	/// Returns the account email address.
	pub fn email(&self) -> Option<&str> {
		self.field_str("email")
	}

	/// Returns the droplet limit.
	///
	/// A limit of exactly zero reads as `None`, matching the upstream plug-in's
	/// empty-value handling.
	pub fn droplet_limit(&self) -> Option<u64> {
		self.field("droplet_limit").and_then(Value::as_u64)
	}

	/// Returns the floating-IP limit. Zero reads as `None`, like
	/// [`droplet_limit`](Self::droplet_limit).
	pub fn floating_ip_limit(&self) -> Option<u64> {
		self.field("floating_ip_limit").and_then(Value::as_u64)
	}

	/// Returns whether the account email is verified.
	///
	/// Only ever `Some(true)` or `None`; a `false` value reads as `None` under
	/// the empty-value rule.
	pub fn email_verified(&self) -> Option<bool> {
		self.field("email_verified").and_then(Value::as_bool)
	}

	/// Returns the account status (`active`, `warning`, or `locked`).
	pub fn status(&self) -> Option<&str> {
		self.field_str("status")
	}

	/// Returns the human-readable status message.
	pub fn status_message(&self) -> Option<&str> {
		self.field_str("status_message")
	}

	/// Returns the raw `account` mapping unchanged.
	pub fn to_map(&self) -> &Map<String, Value> {
		&self.account
	}

	fn field(&self, name: &str) -> Option<&Value> {
		self.account.get(name).filter(|value| response::is_truthy(value))
	}

	fn field_str(&self, name: &str) -> Option<&str> {
		self.field(name).and_then(Value::as_str)
	}
}
