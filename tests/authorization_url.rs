// std
use std::collections::HashMap;
// self
use oauth2_digitalocean::{
	descriptor::{ApprovalPrompt, AuthorizationParams, ProviderDescriptor},
	url::Url,
};

const CLIENT_ID: &str = "mock_client_id";

fn redirect_uri() -> Url {
	Url::parse("https://app.example.com/callback").expect("Redirect URI should parse successfully.")
}

#[test]
fn authorization_url_carries_the_full_parameter_set() {
	let descriptor = ProviderDescriptor::digitalocean().expect("Canonical descriptor should build.");
	let params = AuthorizationParams::new(redirect_uri()).with_state("opaque-state");
	let url = descriptor.authorization_url(CLIENT_ID, &params);

	assert_eq!(url.host_str(), Some("cloud.digitalocean.com"));
	assert_eq!(url.path(), "/v1/oauth/authorize");

	let pairs: HashMap<_, _> = url.query_pairs().into_owned().collect();

	for key in ["client_id", "redirect_uri", "state", "scope", "response_type", "approval_prompt"] {
		assert!(pairs.contains_key(key), "Authorization URL must carry `{key}`.");
	}

	assert_eq!(pairs.get("response_type"), Some(&"code".into()));
	assert_eq!(pairs.get("approval_prompt"), Some(&"auto".into()));
	assert_eq!(pairs.get("client_id"), Some(&CLIENT_ID.into()));
	assert_eq!(pairs.get("redirect_uri"), Some(&redirect_uri().as_str().into()));
	assert_eq!(pairs.get("state"), Some(&"opaque-state".into()));
	assert_eq!(pairs.get("scope"), Some(&"read".into()));
}

#[test]
fn default_scope_applies_when_none_are_requested() {
	let descriptor = ProviderDescriptor::digitalocean().expect("Canonical descriptor should build.");
	let url = descriptor.authorization_url(CLIENT_ID, &AuthorizationParams::new(redirect_uri()));
	let pairs: HashMap<_, _> = url.query_pairs().into_owned().collect();

	assert_eq!(pairs.get("scope"), Some(&"read".into()));
}

#[test]
fn requested_scopes_are_joined_with_the_descriptor_delimiter() {
	let descriptor = ProviderDescriptor::digitalocean().expect("Canonical descriptor should build.");
	let params = AuthorizationParams::new(redirect_uri()).with_scopes(["read", "write"]);
	let url = descriptor.authorization_url(CLIENT_ID, &params);
	let pairs: HashMap<_, _> = url.query_pairs().into_owned().collect();

	assert_eq!(pairs.get("scope"), Some(&"read write".into()));
}

#[test]
fn forced_approval_prompt_is_rendered() {
	let descriptor = ProviderDescriptor::digitalocean()
		.expect("Canonical descriptor should build.")
		.approval_prompt(ApprovalPrompt::Force);
	let url = descriptor.authorization_url(CLIENT_ID, &AuthorizationParams::new(redirect_uri()));
	let pairs: HashMap<_, _> = url.query_pairs().into_owned().collect();

	assert_eq!(pairs.get("approval_prompt"), Some(&"force".into()));
	assert!(!pairs.contains_key("state"));
}
