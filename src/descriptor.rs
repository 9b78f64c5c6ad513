//! Provider descriptor for DigitalOcean's OAuth 2.0 surface.
//!
//! The descriptor carries the endpoint set, the default scopes, and the
//! authorization parameters DigitalOcean understands, so the provider layer and
//! tests can describe the API in a transport-agnostic way.

// self
use crate::{_prelude::*, error::ConfigError};

/// Authorization endpoint used for the redirect step.
pub const AUTHORIZATION_ENDPOINT: &str = "https://cloud.digitalocean.com/v1/oauth/authorize";
/// Token endpoint used for exchanges and refreshes.
pub const TOKEN_ENDPOINT: &str = "https://cloud.digitalocean.com/v1/oauth/token";
/// Account endpoint used to load the resource owner.
pub const ACCOUNT_ENDPOINT: &str = "https://api.digitalocean.com/v2/account";
/// Scopes requested when the caller does not override them.
pub const DEFAULT_SCOPES: &[&str] = &["read"];

const SCOPE_DELIMITER: char = ' ';

/// `approval_prompt` values accepted by DigitalOcean's authorization endpoint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalPrompt {
	/// Skip the consent screen when the user already approved the application.
	#[default]
	Auto,
	/// Always show the consent screen.
	Force,
}
impl ApprovalPrompt {
	/// Returns the query-parameter value for the prompt mode.
	pub fn as_str(self) -> &'static str {
		match self {
			ApprovalPrompt::Auto => "auto",
			ApprovalPrompt::Force => "force",
		}
	}
}
impl Display for ApprovalPrompt {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Endpoint set declared by the descriptor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderEndpoints {
	/// Authorization endpoint used for the redirect step.
	pub authorization: Url,
	/// Token endpoint used for exchanges and refreshes.
	pub token: Url,
	/// Account endpoint used to load the resource owner.
	pub account: Url,
}

/// Immutable descriptor consumed by the provider layer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderDescriptor {
	/// Endpoint definitions exposed by the provider.
	pub endpoints: ProviderEndpoints,
	/// Scopes requested when the caller does not override them.
	pub default_scopes: Vec<String>,
	/// Character used to join scopes in the `scope` parameter.
	pub scope_delimiter: char,
	/// Consent-screen behavior requested during authorization.
	pub approval_prompt: ApprovalPrompt,
}
impl ProviderDescriptor {
	/// Builds the canonical DigitalOcean descriptor.
	pub fn digitalocean() -> Result<Self, ConfigError> {
		Self::with_endpoints(AUTHORIZATION_ENDPOINT, TOKEN_ENDPOINT, ACCOUNT_ENDPOINT)
	}

	/// Builds a descriptor over custom endpoints, keeping DigitalOcean's defaults
	/// for scopes and authorization parameters. Intended for tests against mock
	/// servers.
	pub fn with_endpoints(
		authorization: &str,
		token: &str,
		account: &str,
	) -> Result<Self, ConfigError> {
		let endpoints = ProviderEndpoints {
			authorization: parse_endpoint("authorization", authorization)?,
			token: parse_endpoint("token", token)?,
			account: parse_endpoint("account", account)?,
		};

		Ok(Self {
			endpoints,
			default_scopes: DEFAULT_SCOPES.iter().map(|scope| (*scope).to_owned()).collect(),
			scope_delimiter: SCOPE_DELIMITER,
			approval_prompt: ApprovalPrompt::default(),
		})
	}

	/// Overrides the consent-screen behavior.
	pub fn approval_prompt(mut self, prompt: ApprovalPrompt) -> Self {
		self.approval_prompt = prompt;

		self
	}

	/// Renders the authorization redirect URL for the provided client and
	/// parameters.
	///
	/// State generation and validation stay with the caller; the descriptor only
	/// serializes what it is given.
	pub fn authorization_url(&self, client_id: &str, params: &AuthorizationParams) -> Url {
		let mut url = self.endpoints.authorization.clone();
		let scope = self.format_scope(&params.scopes);

		{
			let mut pairs = url.query_pairs_mut();

			pairs.append_pair("response_type", "code");
			pairs.append_pair("approval_prompt", self.approval_prompt.as_str());
			pairs.append_pair("client_id", client_id);
			pairs.append_pair("redirect_uri", params.redirect_uri.as_str());

			if let Some(state) = params.state.as_deref() {
				pairs.append_pair("state", state);
			}

			pairs.append_pair("scope", &scope);
		}

		url
	}

	/// Joins the requested scopes (or the defaults) with the descriptor delimiter.
	pub fn format_scope(&self, scopes: &[String]) -> String {
		let selected: &[String] = if scopes.is_empty() { &self.default_scopes } else { scopes };
		let mut buf = String::new();

		for (idx, scope) in selected.iter().enumerate() {
			if idx > 0 {
				buf.push(self.scope_delimiter);
			}

			buf.push_str(scope);
		}

		buf
	}
}

/// Caller-supplied parameters for the authorization redirect URL.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthorizationParams {
	/// Redirect URI registered with DigitalOcean.
	pub redirect_uri: Url,
	/// Opaque state value round-tripped through the redirect.
	pub state: Option<String>,
	/// Requested scopes; the descriptor defaults apply when empty.
	pub scopes: Vec<String>,
}
impl AuthorizationParams {
	/// Creates parameters for the provided redirect URI.
	pub fn new(redirect_uri: Url) -> Self {
		Self { redirect_uri, state: None, scopes: Vec::new() }
	}

	/// Sets the opaque state value.
	pub fn with_state(mut self, state: impl Into<String>) -> Self {
		self.state = Some(state.into());

		self
	}

	/// Overrides the requested scopes.
	pub fn with_scopes<I, S>(mut self, scopes: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.scopes = scopes.into_iter().map(Into::into).collect();

		self
	}
}

fn parse_endpoint(name: &'static str, value: &str) -> Result<Url, ConfigError> {
	Url::parse(value).map_err(|source| ConfigError::InvalidEndpoint { endpoint: name, source })
}

#[cfg(test)]
mod tests {
	// std
	use std::collections::HashMap;
	// self
	use super::*;

	#[test]
	fn canonical_descriptor_points_at_digitalocean() {
		let descriptor =
			ProviderDescriptor::digitalocean().expect("Canonical descriptor should build.");

		assert_eq!(descriptor.endpoints.authorization.path(), "/v1/oauth/authorize");
		assert_eq!(descriptor.endpoints.token.path(), "/v1/oauth/token");
		assert_eq!(descriptor.endpoints.account.path(), "/v2/account");
		assert_eq!(descriptor.default_scopes, vec!["read".to_owned()]);
		assert_eq!(descriptor.scope_delimiter, ' ');
		assert_eq!(descriptor.approval_prompt, ApprovalPrompt::Auto);
	}

	#[test]
	fn invalid_endpoint_is_rejected() {
		let err = ProviderDescriptor::with_endpoints("not a url", TOKEN_ENDPOINT, ACCOUNT_ENDPOINT)
			.expect_err("Unparseable endpoints must be rejected.");

		assert!(matches!(err, ConfigError::InvalidEndpoint { endpoint: "authorization", .. }));
	}

	#[test]
	fn authorization_url_carries_expected_parameters() {
		let descriptor =
			ProviderDescriptor::digitalocean().expect("Canonical descriptor should build.");
		let redirect = Url::parse("https://app.example.com/callback")
			.expect("Redirect URI should parse successfully.");
		let params = AuthorizationParams::new(redirect.clone()).with_state("opaque-state");
		let url = descriptor.authorization_url("mock_client_id", &params);

		assert_eq!(url.path(), "/v1/oauth/authorize");

		let pairs: HashMap<_, _> = url.query_pairs().into_owned().collect();

		assert_eq!(pairs.get("response_type"), Some(&"code".into()));
		assert_eq!(pairs.get("approval_prompt"), Some(&"auto".into()));
		assert_eq!(pairs.get("client_id"), Some(&"mock_client_id".into()));
		assert_eq!(pairs.get("redirect_uri"), Some(&redirect.as_str().into()));
		assert_eq!(pairs.get("state"), Some(&"opaque-state".into()));
		assert_eq!(pairs.get("scope"), Some(&"read".into()));
	}

	#[test]
	fn requested_scopes_override_defaults() {
		let descriptor = ProviderDescriptor::digitalocean()
			.expect("Canonical descriptor should build.")
			.approval_prompt(ApprovalPrompt::Force);
		let redirect = Url::parse("https://app.example.com/callback")
			.expect("Redirect URI should parse successfully.");
		let params = AuthorizationParams::new(redirect).with_scopes(["read", "write"]);
		let url = descriptor.authorization_url("mock_client_id", &params);
		let pairs: HashMap<_, _> = url.query_pairs().into_owned().collect();

		assert_eq!(pairs.get("scope"), Some(&"read write".into()));
		assert_eq!(pairs.get("approval_prompt"), Some(&"force".into()));
		assert!(!pairs.contains_key("state"));
	}
}
