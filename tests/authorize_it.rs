// std
use std::{collections::HashMap, sync::Arc};
// crates.io
use url::Url;
// self
use crm_oauth_connector::{
	auth::{OrgId, StateToken, UserId},
	config::ClientConfig,
	error::{ConfigError, Error},
	flows::Connector,
	provider::ProviderDescriptor,
	store::{self, ConnectorStore, MemoryStore},
};

const CLIENT_ID: &str = "client-it";
const CLIENT_SECRET: &str = "secret-it";

fn build_config() -> ClientConfig {
	ClientConfig::new(
		CLIENT_ID,
		CLIENT_SECRET,
		Url::parse("https://app.example.com/oauth/callback")
			.expect("Redirect URI should parse successfully."),
	)
}

fn build_connector(memory: Arc<MemoryStore>, config: ClientConfig) -> Connector {
	Connector::new(memory, ProviderDescriptor::hubspot(), config)
		.expect("Connector should build successfully.")
}

#[tokio::test]
async fn begin_authorization_builds_the_consent_url_and_records_a_marker() {
	let memory = Arc::new(MemoryStore::default());
	let connector = build_connector(memory.clone(), build_config());
	let user = UserId::new("user-1").expect("User identifier should be valid.");
	let org = OrgId::new("org-9").expect("Organization identifier should be valid.");
	let start = connector
		.begin_authorization(user, org)
		.await
		.expect("Authorization should start successfully.");

	assert_eq!(start.state.to_string(), "user-1:org-9");
	assert!(start.auth_url.as_str().starts_with("https://app.hubspot.com/oauth/authorize?"));

	let pairs: HashMap<_, _> = start.auth_url.query_pairs().into_owned().collect();

	assert_eq!(pairs.get("client_id"), Some(&CLIENT_ID.into()));
	assert_eq!(pairs.get("redirect_uri"), Some(&"https://app.example.com/oauth/callback".into()));
	assert_eq!(
		pairs.get("scope"),
		Some(&"contacts crm.objects.contacts.read crm.objects.companies.read".into())
	);
	assert_eq!(pairs.get("state"), Some(&"user-1:org-9".into()));

	let marker_key = store::state_key(&connector.descriptor.id, &start.state);
	let marker = memory.get(&marker_key).await.expect("Marker lookup should succeed.");

	assert_eq!(marker.as_deref(), Some("1"));
}

#[tokio::test]
async fn begin_authorization_rejects_an_unconfigured_client() {
	let memory = Arc::new(MemoryStore::default());
	let config = ClientConfig::new(
		"",
		CLIENT_SECRET,
		Url::parse("https://app.example.com/oauth/callback")
			.expect("Redirect URI should parse successfully."),
	);
	let connector = build_connector(memory.clone(), config);
	let user = UserId::new("user-1").expect("User identifier should be valid.");
	let org = OrgId::new("org-9").expect("Organization identifier should be valid.");
	let err = connector
		.begin_authorization(user.clone(), org.clone())
		.await
		.expect_err("Missing client identifier should be rejected.");

	assert!(matches!(err, Error::Config(ConfigError::MissingClientId)));

	let marker_key = store::state_key(&connector.descriptor.id, &StateToken::new(user, org));

	assert!(
		memory.get(&marker_key).await.expect("Marker lookup should succeed.").is_none(),
		"Store must not retain markers when validation fails."
	);
}
