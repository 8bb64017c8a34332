// std
use std::sync::Arc;
// crates.io
use httpmock::prelude::*;
use url::Url;
// self
use crm_oauth_connector::{
	auth::ProviderId,
	config::ClientConfig,
	error::{Error, TokenEndpointError},
	flows::Connector,
	item::ItemKind,
	provider::{ProviderDescriptor, ResourceSpec},
	store::MemoryStore,
};

const CLIENT_ID: &str = "client-it";
const CLIENT_SECRET: &str = "secret-it";

fn build_connector(server: &MockServer) -> Connector {
	let id = ProviderId::new("hubspot").expect("Provider identifier should be valid.");
	let descriptor = ProviderDescriptor::builder(id)
		.authorization_endpoint(
			Url::parse("https://app.hubspot.com/oauth/authorize")
				.expect("Authorization endpoint should parse successfully."),
		)
		.token_endpoint(
			Url::parse(&server.url("/oauth/v1/token"))
				.expect("Mock token endpoint should parse successfully."),
		)
		.api_base(Url::parse(&server.base_url()).expect("Mock API base should parse successfully."))
		.scopes(["contacts"])
		.resource(ResourceSpec::new(
			ItemKind::Contact,
			"crm/v3/objects/contacts",
			Url::parse("https://app.hubspot.com/contacts")
				.expect("Record URL base should parse successfully."),
		))
		.build()
		.expect("Provider descriptor should build successfully.");
	let config = ClientConfig::new(
		CLIENT_ID,
		CLIENT_SECRET,
		Url::parse("https://app.example.com/oauth/callback")
			.expect("Redirect URI should parse successfully."),
	);

	Connector::new(Arc::new(MemoryStore::default()), descriptor, config)
		.expect("Connector should build successfully.")
}

#[tokio::test]
async fn refresh_returns_the_raw_token_response() {
	let server = MockServer::start_async().await;
	let connector = build_connector(&server);
	let mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/oauth/v1/token")
				.header("content-type", "application/x-www-form-urlencoded");
			then.status(200)
				.header("content-type", "application/json")
				.body(
					"{\"access_token\":\"access-renewed\",\"token_type\":\"bearer\",\"expires_in\":1800}",
				);
		})
		.await;
	let response = connector
		.refresh_access_token("refresh-old")
		.await
		.expect("Refresh should succeed.");

	mock.assert_async().await;

	assert_eq!(response.access_token.expose(), "access-renewed");
	assert!(response.refresh_token.is_none());
	assert_eq!(response.expires_in, 1_800);
	assert_eq!(response.token_type, "bearer");
}

#[tokio::test]
async fn rejected_refresh_surfaces_the_upstream_status() {
	let server = MockServer::start_async().await;
	let connector = build_connector(&server);
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth/v1/token");
			then.status(401)
				.header("content-type", "application/json")
				.body("{\"error\":\"invalid_grant\"}");
		})
		.await;
	let err = connector
		.refresh_access_token("refresh-revoked")
		.await
		.expect_err("Rejected refresh should fail.");

	mock.assert_async().await;

	assert!(matches!(err, Error::Token(TokenEndpointError::Refresh { status: 401 })));
}
