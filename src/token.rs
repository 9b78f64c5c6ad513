//! Access-token value object extending the generic token fields with
//! DigitalOcean's `scope` string and inline `info` account mapping.

/// Redacted secret wrapper for token material.
pub mod secret;

pub use secret::*;

// crates.io
use serde::{Deserializer, Serializer, de::Error as DeError};
// self
use crate::{_prelude::*, error::MalformedResponseError};

/// Immutable access token issued by DigitalOcean.
///
/// Composition over the generic token fields (token, type, expiry, refresh
/// token, resource-owner id) plus the provider-specific `scope` and `info`
/// extras. Response fields the adapter does not recognize are kept in a
/// passthrough mapping and reappear unchanged in [`to_map`](Self::to_map).
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken {
	access_token: TokenSecret,
	token_type: Option<String>,
	expires_at: Option<OffsetDateTime>,
	refresh_token: Option<TokenSecret>,
	resource_owner_id: Option<String>,
	scope: Option<String>,
	info: Option<Map<String, Value>>,
	values: Map<String, Value>,
}
impl AccessToken {
	/// Adapts a deserialized token-endpoint response.
	///
	/// `scope` is kept only when it is a non-empty string and `info` only when it
	/// is a non-empty object; both stay unset otherwise. The resource-owner id is
	/// read from `resource_owner_id` when present, falling back to `info.uuid`,
	/// which DigitalOcean returns inline with the token.
	pub fn from_response(mut fields: Map<String, Value>) -> Result<Self, MalformedResponseError> {
		let access_token = fields
			.remove("access_token")
			.and_then(TokenSecret::from_value)
			.ok_or(MalformedResponseError::MissingAccessToken)?;
		let token_type = match fields.remove("token_type") {
			Some(Value::String(kind)) if !kind.is_empty() => Some(kind),
			_ => None,
		};
		let expires_at = take_expiry(&mut fields)?;
		let refresh_token = fields.remove("refresh_token").and_then(TokenSecret::from_value);
		let scope = match fields.remove("scope") {
			Some(Value::String(scope)) if !scope.is_empty() => Some(scope),
			_ => None,
		};
		let info = match fields.remove("info") {
			Some(Value::Object(info)) if !info.is_empty() => Some(info),
			_ => None,
		};
		let resource_owner_id = take_resource_owner_id(&mut fields, info.as_ref());

		Ok(Self {
			access_token,
			token_type,
			expires_at,
			refresh_token,
			resource_owner_id,
			scope,
			info,
			values: fields,
		})
	}

	/// Returns the access token secret.
	pub fn token(&self) -> &TokenSecret {
		&self.access_token
	}

	/// Returns the token type reported by the provider (`bearer` for DigitalOcean).
	pub fn token_type(&self) -> Option<&str> {
		self.token_type.as_deref()
	}

	/// Returns the absolute expiry instant, when the response carried one.
	pub fn expires_at(&self) -> Option<OffsetDateTime> {
		self.expires_at
	}

	/// Returns `true` when the token is expired at the provided instant.
	///
	/// Tokens without a known expiry are treated as not expired.
	pub fn has_expired_at(&self, instant: OffsetDateTime) -> bool {
		self.expires_at.map(|at| instant >= at).unwrap_or(false)
	}

	/// Convenience helper that checks expiry against the current UTC instant.
	pub fn has_expired(&self) -> bool {
		self.has_expired_at(OffsetDateTime::now_utc())
	}

	/// Returns the refresh token secret, if the provider issued one.
	pub fn refresh_token(&self) -> Option<&TokenSecret> {
		self.refresh_token.as_ref()
	}

	/// Returns the resource-owner identifier tied to the token.
	pub fn resource_owner_id(&self) -> Option<&str> {
		self.resource_owner_id.as_deref()
	}

	/// Returns the granted scope names in the order DigitalOcean reported them.
	///
	/// The stored scope string is split on single spaces and empty tokens are
	/// discarded; duplicates are preserved. Empty when `scope` was never set.
	pub fn scopes(&self) -> Vec<&str> {
		self.scope
			.as_deref()
			.map(|scope| scope.split(' ').filter(|candidate| !candidate.is_empty()).collect())
			.unwrap_or_default()
	}

	/// Case-insensitive, whitespace-trimmed scope membership test.
	pub fn has_scope(&self, candidate: &str) -> bool {
		let needle = candidate.trim().to_lowercase();

		self.scopes().iter().any(|scope| scope.trim().to_lowercase() == needle)
	}

	/// Returns the extra account fields returned inline with the token.
	pub fn info(&self) -> Option<&Map<String, Value>> {
		self.info.as_ref()
	}

	/// Returns the unrecognized response fields passed through at construction.
	pub fn values(&self) -> &Map<String, Value> {
		&self.values
	}

	/// Serializes the token back to a response-shaped mapping.
	///
	/// Passthrough values come first, then the base fields (with the expiry as
	/// an absolute `expires` unix timestamp), then `scope` and `info` when set.
	pub fn to_map(&self) -> Map<String, Value> {
		let mut fields = self.values.clone();

		fields.insert("access_token".into(), Value::String(self.access_token.expose().to_owned()));

		if let Some(kind) = self.token_type.as_deref() {
			fields.insert("token_type".into(), Value::String(kind.to_owned()));
		}
		if let Some(expires_at) = self.expires_at {
			fields.insert("expires".into(), Value::from(expires_at.unix_timestamp()));
		}
		if let Some(secret) = self.refresh_token.as_ref() {
			fields.insert("refresh_token".into(), Value::String(secret.expose().to_owned()));
		}
		if let Some(owner_id) = self.resource_owner_id.as_deref() {
			fields.insert("resource_owner_id".into(), Value::String(owner_id.to_owned()));
		}
		if let Some(scope) = self.scope.as_deref() {
			fields.insert("scope".into(), Value::String(scope.to_owned()));
		}
		if let Some(info) = self.info.as_ref() {
			fields.insert("info".into(), Value::Object(info.clone()));
		}

		fields
	}
}
impl Debug for AccessToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AccessToken")
			.field("access_token", &"<redacted>")
			.field("token_type", &self.token_type)
			.field("expires_at", &self.expires_at)
			.field("refresh_token", &self.refresh_token.as_ref().map(|_| "<redacted>"))
			.field("resource_owner_id", &self.resource_owner_id)
			.field("scope", &self.scope)
			.field("info", &self.info)
			.finish()
	}
}
impl TryFrom<Map<String, Value>> for AccessToken {
	type Error = MalformedResponseError;

	fn try_from(fields: Map<String, Value>) -> Result<Self, Self::Error> {
		Self::from_response(fields)
	}
}
impl Serialize for AccessToken {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		self.to_map().serialize(serializer)
	}
}
impl<'de> Deserialize<'de> for AccessToken {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		let fields = <Map<String, Value>>::deserialize(deserializer)?;

		Self::from_response(fields).map_err(DeError::custom)
	}
}

fn take_expiry(
	fields: &mut Map<String, Value>,
) -> Result<Option<OffsetDateTime>, MalformedResponseError> {
	if let Some(value) = fields.remove("expires_in") {
		let seconds = value.as_i64().ok_or(MalformedResponseError::ExpiresInOutOfRange)?;

		return Ok(Some(OffsetDateTime::now_utc() + Duration::seconds(seconds)));
	}
	if let Some(value) = fields.remove("expires") {
		let timestamp = value.as_i64().ok_or(MalformedResponseError::ExpiresInOutOfRange)?;
		let instant = OffsetDateTime::from_unix_timestamp(timestamp)
			.map_err(|_| MalformedResponseError::ExpiresInOutOfRange)?;

		return Ok(Some(instant));
	}

	Ok(None)
}

fn take_resource_owner_id(
	fields: &mut Map<String, Value>,
	info: Option<&Map<String, Value>>,
) -> Option<String> {
	match fields.remove("resource_owner_id") {
		Some(Value::String(id)) if !id.is_empty() => return Some(id),
		Some(Value::Number(id)) => return Some(id.to_string()),
		_ => (),
	}

	info.and_then(|info| info.get("uuid"))
		.and_then(Value::as_str)
		.filter(|uuid| !uuid.is_empty())
		.map(ToOwned::to_owned)
}
