//! Extension points wired into the `oauth2` client framework.
//!
//! DigitalOcean returns an `info` mapping inline with the token, so the token
//! response type extends the standard one with that field; everything else
//! (grant plumbing, token-endpoint error detection) stays in `oauth2`.

pub use oauth2;

// crates.io
use oauth2::{
	AuthUrl, Client, ClientId, EndpointNotSet, EndpointSet, ExtraTokenFields, HttpClientError,
	RequestTokenError, StandardRevocableToken, StandardTokenResponse, TokenResponse, TokenUrl,
	basic::{
		BasicErrorResponse, BasicRevocationErrorResponse, BasicTokenIntrospectionResponse,
		BasicTokenType,
	},
};
// self
use crate::{
	_prelude::*,
	descriptor::ProviderDescriptor,
	error::{ConfigError, IdentityProviderError, MalformedResponseError, TransportError},
	http::ResponseMetadata,
	token::AccessToken,
};

/// Extra fields DigitalOcean returns with token responses.
///
/// The standard response already captures `scope`; only the inline account
/// `info` mapping needs declaring here.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DigitalOceanTokenFields {
	/// Extra account fields returned inline with the token (name, email, uuid).
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub info: Option<Map<String, Value>>,
}
impl ExtraTokenFields for DigitalOceanTokenFields {}

/// Token response produced by DigitalOcean's token endpoint.
pub type DigitalOceanTokenResponse = StandardTokenResponse<DigitalOceanTokenFields, BasicTokenType>;

/// `oauth2` client configured for DigitalOcean's endpoints and response types.
pub type DigitalOceanClient = Client<
	BasicErrorResponse,
	DigitalOceanTokenResponse,
	BasicTokenIntrospectionResponse,
	StandardRevocableToken,
	BasicRevocationErrorResponse,
	EndpointSet,
	EndpointNotSet,
	EndpointNotSet,
	EndpointNotSet,
	EndpointSet,
>;

pub(crate) type DigitalOceanRequestTokenError<E> =
	RequestTokenError<HttpClientError<E>, BasicErrorResponse>;

/// Builds a configured [`DigitalOceanClient`] from a descriptor.
pub fn client_from_descriptor(
	descriptor: &ProviderDescriptor,
	client_id: &str,
) -> Result<DigitalOceanClient> {
	let auth_url = AuthUrl::new(descriptor.endpoints.authorization.to_string())
		.map_err(|source| ConfigError::InvalidEndpoint { endpoint: "authorization", source })?;
	let token_url = TokenUrl::new(descriptor.endpoints.token.to_string())
		.map_err(|source| ConfigError::InvalidEndpoint { endpoint: "token", source })?;
	let client = Client::new(ClientId::new(client_id.to_owned()))
		.set_auth_uri(auth_url)
		.set_token_uri(token_url);

	Ok(client)
}

impl AccessToken {
	/// Bridges a framework token response into the adapter.
	pub fn from_token_response(
		response: &DigitalOceanTokenResponse,
	) -> Result<Self, MalformedResponseError> {
		let mut fields = Map::new();

		fields.insert(
			"access_token".into(),
			Value::String(response.access_token().secret().clone()),
		);

		if let Ok(token_type) = serde_json::to_value(response.token_type()) {
			fields.insert("token_type".into(), token_type);
		}
		if let Some(expires_in) = response.expires_in() {
			fields.insert("expires_in".into(), Value::from(expires_in.as_secs()));
		}
		if let Some(refresh) = response.refresh_token() {
			fields.insert("refresh_token".into(), Value::String(refresh.secret().clone()));
		}
		if let Some(scopes) = response.scopes() {
			let scope = scopes.iter().map(|scope| scope.as_str()).collect::<Vec<_>>().join(" ");

			fields.insert("scope".into(), Value::String(scope));
		}
		if let Some(info) = response.extra_fields().info.as_ref() {
			fields.insert("info".into(), Value::Object(info.clone()));
		}

		Self::from_response(fields)
	}
}

/// Maps a failed token request into the crate taxonomy.
///
/// Provider-signaled failures (an OAuth error body) become
/// [`IdentityProviderError`]; malformed bodies and transport failures keep
/// their own variants so callers can tell them apart.
pub(crate) fn map_request_error<E>(
	err: DigitalOceanRequestTokenError<E>,
	meta: Option<ResponseMetadata>,
) -> Error
where
	E: 'static + Send + Sync + StdError,
{
	let status = meta.as_ref().and_then(|meta| meta.status);

	match err {
		RequestTokenError::ServerResponse(response) => {
			let message = response
				.error_description()
				.cloned()
				.unwrap_or_else(|| response.error().as_ref().to_owned());

			IdentityProviderError { message, status }.into()
		},
		RequestTokenError::Request(inner) => map_transport_error(inner),
		RequestTokenError::Parse(source, _body) =>
			MalformedResponseError::Json { endpoint: "token", source }.into(),
		RequestTokenError::Other(message) => IdentityProviderError { message, status }.into(),
	}
}

/// Maps a raw HTTP client failure into the crate taxonomy.
pub(crate) fn map_transport_error<E>(err: HttpClientError<E>) -> Error
where
	E: 'static + Send + Sync + StdError,
{
	match err {
		HttpClientError::Reqwest(inner) => TransportError::Network { source: inner }.into(),
		HttpClientError::Http(inner) => ConfigError::HttpRequest(inner).into(),
		HttpClientError::Io(inner) => TransportError::Io(inner).into(),
		HttpClientError::Other(message) => TransportError::Other { message }.into(),
		_ => TransportError::Other { message: "Unhandled HTTP client error variant.".into() }.into(),
	}
}
