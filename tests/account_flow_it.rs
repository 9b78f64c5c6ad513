#![cfg(feature = "reqwest")]

// crates.io
use httpmock::prelude::*;
use serde_json::{Value, json};
// self
use oauth2_digitalocean::{
	descriptor::ProviderDescriptor,
	error::Error,
	http::ReqwestHttpClient,
	provider::DigitalOcean,
	reqwest::{Client, redirect::Policy},
	token::AccessToken,
};

const CLIENT_ID: &str = "mock_client_id";
const CLIENT_SECRET: &str = "mock_secret";
const SAMMY_TOKEN: &str = r#"{
	"access_token": "547cac21118ae7",
	"token_type": "bearer",
	"expires_in": 2592000,
	"refresh_token": "00a3aae641658d",
	"scope": "read write",
	"info": {
		"name": "Sammy the Shark",
		"email": "sammy@digitalocean.com",
		"uuid": "e028b1b918853eca7fba208a9d7e9d29a6e93c57"
	}
}"#;
const SAMMY_ACCOUNT: &str = r#"{
	"account": {
		"droplet_limit": 25,
		"floating_ip_limit": 5,
		"email": "sammy@digitalocean.com",
		"uuid": "b6fr89dbf6d9156cace5f3c78dc9851d957381ef",
		"email_verified": true,
		"status": "active",
		"status_message": ""
	}
}"#;

fn build_provider(server: &MockServer) -> DigitalOcean<ReqwestHttpClient> {
	let descriptor = ProviderDescriptor::with_endpoints(
		&server.url("/v1/oauth/authorize"),
		&server.url("/v1/oauth/token"),
		&server.url("/v2/account"),
	)
	.expect("Mock descriptor should build successfully.");
	let client = Client::builder()
		.redirect(Policy::none())
		.build()
		.expect("Reqwest client should build successfully.");

	DigitalOcean::from_descriptor(descriptor, CLIENT_ID, ReqwestHttpClient::with_client(client))
		.expect("Provider should build over the mock descriptor.")
		.with_client_secret(CLIENT_SECRET)
}

fn sammy_token() -> AccessToken {
	let fields = serde_json::from_str::<Value>(SAMMY_TOKEN)
		.expect("Token fixture should parse successfully.")
		.as_object()
		.expect("Token fixture should be a JSON object.")
		.clone();

	AccessToken::from_response(fields).expect("Token fixture should adapt successfully.")
}

#[tokio::test]
async fn exchange_code_adapts_the_token_response() {
	let server = MockServer::start_async().await;
	let provider = build_provider(&server);
	let mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/v1/oauth/token")
				.header("content-type", "application/x-www-form-urlencoded");
			then.status(200)
				.header("content-type", "application/json")
				.header("ratelimit-remaining", "4999")
				.body(SAMMY_TOKEN);
		})
		.await;
	let token =
		provider.exchange_code("mock_authorization_code").await.expect("Exchange should succeed.");

	mock.assert_async().await;

	assert_eq!(token.token().expose(), "547cac21118ae7");
	assert_eq!(token.token_type(), Some("bearer"));
	assert_eq!(token.refresh_token().map(|secret| secret.expose()), Some("00a3aae641658d"));
	assert!(!token.has_expired());
	assert_eq!(token.scopes(), vec!["read", "write"]);
	assert!(token.has_scope("read"));
	assert!(token.has_scope(" WRITE "));
	assert!(!token.has_scope("badscope"));
	assert_eq!(token.resource_owner_id(), Some("e028b1b918853eca7fba208a9d7e9d29a6e93c57"));
	assert_eq!(
		token.info().and_then(|info| info.get("name")).and_then(Value::as_str),
		Some("Sammy the Shark"),
	);
}

#[tokio::test]
async fn refresh_rotates_the_access_token() {
	let server = MockServer::start_async().await;
	let provider = build_provider(&server);
	let mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/v1/oauth/token")
				.header("content-type", "application/x-www-form-urlencoded");
			then.status(200).header("content-type", "application/json").body(
				"{\"access_token\":\"rotated-token\",\"token_type\":\"bearer\",\"expires_in\":2592000,\"refresh_token\":\"rotated-refresh\",\"scope\":\"read write\"}",
			);
		})
		.await;
	let refreshed = provider.refresh(&sammy_token()).await.expect("Refresh should succeed.");

	mock.assert_async().await;

	assert_eq!(refreshed.token().expose(), "rotated-token");
	assert_eq!(refreshed.refresh_token().map(|secret| secret.expose()), Some("rotated-refresh"));
	assert!(refreshed.has_scope("write"));
}

#[tokio::test]
async fn resource_owner_loads_the_account() {
	let server = MockServer::start_async().await;
	let provider = build_provider(&server);
	let mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/v2/account")
				.header("authorization", "Bearer 547cac21118ae7")
				.header("accept", "application/json");
			then.status(200)
				.header("content-type", "application/json")
				.header("ratelimit-remaining", "1200")
				.body(SAMMY_ACCOUNT);
		})
		.await;
	let owner =
		provider.resource_owner(&sammy_token()).await.expect("Account fetch should succeed.");

	mock.assert_async().await;

	assert_eq!(owner.id(), Some("b6fr89dbf6d9156cace5f3c78dc9851d957381ef"));
	assert_eq!(owner.email(), Some("sammy@digitalocean.com"));
	assert_eq!(owner.droplet_limit(), Some(25));
	assert_eq!(owner.floating_ip_limit(), Some(5));
	assert_eq!(owner.email_verified(), Some(true));
	assert_eq!(owner.status(), Some("active"));
	assert_eq!(owner.status_message(), None);
	assert_eq!(owner.to_map().get("droplet_limit"), Some(&json!(25)));
}

#[tokio::test]
async fn exchange_code_surfaces_provider_errors() {
	let server = MockServer::start_async().await;
	let provider = build_provider(&server);
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/v1/oauth/token");
			then.status(401).header("content-type", "application/json").body(
				"{\"error\":\"invalid_client\",\"error_description\":\"Client authentication failed\"}",
			);
		})
		.await;
	let err = provider
		.exchange_code("stale-code")
		.await
		.expect_err("Provider-signaled failures must surface.");

	mock.assert_async().await;

	match err {
		Error::IdentityProvider(inner) => {
			assert_eq!(inner.message, "Client authentication failed");
			assert_eq!(inner.status, Some(401));
		},
		other => panic!("Unexpected error variant: {other:?}."),
	}
}

#[tokio::test]
async fn resource_owner_surfaces_provider_errors() {
	let server = MockServer::start_async().await;
	let provider = build_provider(&server);
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/v2/account");
			then.status(401)
				.header("content-type", "application/json")
				.body("{\"id\":\"unauthorized\",\"message\":\"Unable to authenticate you.\"}");
		})
		.await;
	let err = provider
		.resource_owner(&sammy_token())
		.await
		.expect_err("Provider-signaled failures must surface.");

	mock.assert_async().await;

	match err {
		Error::IdentityProvider(inner) => {
			assert_eq!(inner.message, "Unable to authenticate you.");
			assert_eq!(inner.status, Some(401));
		},
		other => panic!("Unexpected error variant: {other:?}."),
	}
}

#[tokio::test]
async fn resource_owner_rejects_malformed_payloads() {
	let server = MockServer::start_async().await;
	let provider = build_provider(&server);
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/v2/account");
			then.status(200).header("content-type", "application/json").body("[1,2,3]");
		})
		.await;
	let err = provider
		.resource_owner(&sammy_token())
		.await
		.expect_err("Non-object payloads must be rejected.");

	mock.assert_async().await;

	assert!(matches!(err, Error::MalformedResponse(_)));
}
