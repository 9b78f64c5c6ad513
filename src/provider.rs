//! DigitalOcean provider wiring the descriptor, the `oauth2` client, and a
//! transport into the token and resource-owner adapters.

// crates.io
use oauth2::{
	AsyncHttpClient, AuthorizationCode, ClientSecret, HttpRequest, RedirectUrl, RefreshToken,
	http::{
		Method, Request,
		header::{ACCEPT, AUTHORIZATION},
	},
};
// self
use crate::{
	_prelude::*,
	descriptor::{AuthorizationParams, ProviderDescriptor},
	error::ConfigError,
	http::{ResponseMetadataSlot, TokenHttpClient},
	oauth::{self, DigitalOceanClient, client_from_descriptor},
	obs::{RequestKind, RequestSpan},
	owner::ResourceOwner,
	response,
	token::AccessToken,
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

/// DigitalOcean OAuth 2.0 provider.
///
/// Holds the descriptor, the configured `oauth2` client, and the transport.
/// All methods are read-only; the provider can be shared freely once built.
pub struct DigitalOcean<C>
where
	C: TokenHttpClient,
{
	descriptor: ProviderDescriptor,
	client_id: String,
	oauth_client: DigitalOceanClient,
	http_client: Arc<C>,
}
impl<C> DigitalOcean<C>
where
	C: TokenHttpClient,
{
	/// Builds a provider over the given descriptor and transport.
	pub fn from_descriptor(
		descriptor: ProviderDescriptor,
		client_id: &str,
		http_client: impl Into<Arc<C>>,
	) -> Result<Self> {
		let oauth_client = client_from_descriptor(&descriptor, client_id)?;

		Ok(Self {
			descriptor,
			client_id: client_id.to_owned(),
			oauth_client,
			http_client: http_client.into(),
		})
	}

	/// Attaches the client secret used for token-endpoint authentication.
	pub fn with_client_secret(mut self, secret: &str) -> Self {
		self.oauth_client = self.oauth_client.set_client_secret(ClientSecret::new(secret.to_owned()));

		self
	}

	/// Attaches the redirect URI registered with DigitalOcean.
	pub fn with_redirect_uri(mut self, redirect_uri: &Url) -> Result<Self> {
		let redirect = RedirectUrl::new(redirect_uri.to_string())
			.map_err(|source| ConfigError::InvalidRedirect { source })?;

		self.oauth_client = self.oauth_client.set_redirect_uri(redirect);

		Ok(self)
	}

	/// Returns the provider descriptor.
	pub fn descriptor(&self) -> &ProviderDescriptor {
		&self.descriptor
	}

	/// Returns the OAuth client identifier.
	pub fn client_id(&self) -> &str {
		&self.client_id
	}

	/// Renders the authorization redirect URL for the provided parameters.
	pub fn authorization_url(&self, params: &AuthorizationParams) -> Url {
		self.descriptor.authorization_url(&self.client_id, params)
	}

	/// Exchanges an authorization code for an access token.
	pub async fn exchange_code(&self, code: &str) -> Result<AccessToken> {
		let span = RequestSpan::new(RequestKind::ExchangeCode);
		let slot = ResponseMetadataSlot::default();
		let handle = self.http_client.with_metadata(slot.clone());
		let request = self.oauth_client.exchange_code(AuthorizationCode::new(code.to_owned()));
		let response = span
			.instrument(request.request_async(&handle))
			.await
			.map_err(|err| oauth::map_request_error(err, slot.take()))?;

		span.note_rate_limit(slot.take().and_then(|meta| meta.ratelimit_remaining));

		Ok(AccessToken::from_token_response(&response)?)
	}

	/// Refreshes an access token using its stored refresh token.
	pub async fn refresh(&self, token: &AccessToken) -> Result<AccessToken> {
		let refresh_secret = token.refresh_token().ok_or(ConfigError::MissingRefreshToken)?;
		let refresh_token = RefreshToken::new(refresh_secret.expose().to_owned());
		let span = RequestSpan::new(RequestKind::RefreshToken);
		let slot = ResponseMetadataSlot::default();
		let handle = self.http_client.with_metadata(slot.clone());
		let request = self.oauth_client.exchange_refresh_token(&refresh_token);
		let response = span
			.instrument(request.request_async(&handle))
			.await
			.map_err(|err| oauth::map_request_error(err, slot.take()))?;

		span.note_rate_limit(slot.take().and_then(|meta| meta.ratelimit_remaining));

		Ok(AccessToken::from_token_response(&response)?)
	}

	/// Loads the resource owner behind an access token from the account endpoint.
	pub async fn resource_owner(&self, token: &AccessToken) -> Result<ResourceOwner> {
		let span = RequestSpan::new(RequestKind::ResourceOwner);
		let slot = ResponseMetadataSlot::default();
		let handle = self.http_client.with_metadata(slot.clone());
		let request = self.account_request(token)?;
		let response =
			span.instrument(handle.call(request)).await.map_err(oauth::map_transport_error)?;

		span.note_rate_limit(slot.take().and_then(|meta| meta.ratelimit_remaining));

		let status = response.status().as_u16();
		let fields = response::check_response(status, response.body())?;

		Ok(ResourceOwner::from_response(fields)?)
	}

	fn account_request(&self, token: &AccessToken) -> Result<HttpRequest> {
		let request = Request::builder()
			.method(Method::GET)
			.uri(self.descriptor.endpoints.account.as_str())
			.header(AUTHORIZATION, format!("Bearer {}", token.token().expose()))
			.header(ACCEPT, "application/json")
			.body(Vec::new())
			.map_err(ConfigError::HttpRequest)?;

		Ok(request)
	}
}
#[cfg(feature = "reqwest")]
impl DigitalOcean<ReqwestHttpClient> {
	/// Builds a provider over the canonical descriptor and a default reqwest
	/// transport.
	pub fn new(client_id: &str) -> Result<Self> {
		Self::from_descriptor(
			ProviderDescriptor::digitalocean()?,
			client_id,
			ReqwestHttpClient::default(),
		)
	}
}
