//! Authenticated record fetching and normalization into integration items.

// crates.io
use reqwest::StatusCode;
use serde_json::{Map, Value};
// self
use crate::{
	_prelude::*,
	auth::CredentialBundle,
	error::{ConfigError, TransportError},
	flows::Connector,
	item::{self, IntegrationItem},
	obs::{FlowKind, FlowSpan},
	provider::ResourceSpec,
};

/// Raw CRM record as returned by the provider's object collections.
#[derive(Clone, Debug, Deserialize)]
pub struct RawRecord {
	/// Provider-assigned record identifier.
	pub id: String,
	/// Record properties; values vary by collection and portal configuration.
	#[serde(default)]
	pub properties: Map<String, Value>,
	/// Creation timestamp as emitted by the provider.
	#[serde(rename = "createdAt")]
	pub created_at: String,
	/// Last-modification timestamp as emitted by the provider.
	#[serde(rename = "updatedAt")]
	pub updated_at: String,
}

/// First page of one CRM collection; only this page is consumed (no pagination).
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RecordPage {
	/// Records in upstream order.
	#[serde(default)]
	pub results: Vec<RawRecord>,
}

impl Connector {
	/// Fetches each configured collection sequentially and maps records into integration items.
	///
	/// Output preserves the descriptor's table order between collections and the upstream result
	/// order within each collection; for the HubSpot preset that means all contacts precede all
	/// companies.
	pub async fn fetch_items(&self, credentials_json: &str) -> Result<Vec<IntegrationItem>> {
		let span = FlowSpan::new(FlowKind::Fetch, "fetch_items");

		span.instrument(async move {
			let bundle = CredentialBundle::from_json(credentials_json)?;
			let client = AuthenticatedGet::new(self, &bundle);
			let mut items = Vec::new();

			for resource in &self.descriptor.resources {
				let url = resource
					.collection_url(&self.descriptor.endpoints.api_base)
					.map_err(|source| ConfigError::InvalidCollectionPath { source })?;
				let body = client.get(&url).await?;
				let page: RecordPage = serde_path_to_error::deserialize(body)
					.map_err(|source| Error::DataDecode { source })?;
				let count = page.results.len();

				for record in &page.results {
					items.push(map_record(resource, record)?);
				}

				tracing::debug!(resource = resource.kind.as_str(), count, "Fetched collection.");
			}

			tracing::debug!(total = items.len(), "Normalized integration items.");

			Ok(items)
		})
		.await
	}
}

/// Performs bearer-authenticated GETs against the data API, refreshing at most once on 401.
///
/// Modeled as its own strategy object so the refresh-on-401 behavior is testable independently
/// of the collection call sites. A refreshed access token is used for the single retried GET
/// only and is never written back to the store; the next fetch repeats the refresh. Staleness is
/// therefore discovered reactively (one wasted round trip per fetch) rather than via the stored
/// `expires_in`, which is intentional.
pub(crate) struct AuthenticatedGet<'a> {
	connector: &'a Connector,
	access_token: String,
	refresh_token: Option<String>,
}
impl<'a> AuthenticatedGet<'a> {
	pub(crate) fn new(connector: &'a Connector, bundle: &CredentialBundle) -> Self {
		Self {
			connector,
			access_token: bundle.access_token.expose().to_owned(),
			refresh_token: bundle
				.refresh_token
				.as_ref()
				.map(|secret| secret.expose().to_owned()),
		}
	}

	/// GETs `url` with the bundle's bearer token and returns the decoded JSON body.
	///
	/// On 401 with a refresh token available, performs exactly one refresh and one retried GET
	/// and returns the retried body without re-checking its status. Any other non-success status
	/// fails with the upstream status attached.
	pub(crate) async fn get(&self, url: &Url) -> Result<Value> {
		let response =
			self.connector.http_client.get_with_bearer(url, &self.access_token).await?;
		let status = response.status();

		if status == StatusCode::UNAUTHORIZED {
			if let Some(refresh_token) = self.refresh_token.as_deref() {
				tracing::debug!(%url, "Access token rejected; refreshing once.");

				let refreshed = self.connector.refresh_access_token(refresh_token).await?;
				let retry = self
					.connector
					.http_client
					.get_with_bearer(url, refreshed.access_token.expose())
					.await?;

				return decode_body(retry).await;
			}
		}
		if !status.is_success() {
			return Err(Error::Data { status: status.as_u16() });
		}

		decode_body(response).await
	}
}

async fn decode_body(response: reqwest::Response) -> Result<Value> {
	let body = response.bytes().await.map_err(TransportError::from)?;
	let mut deserializer = serde_json::Deserializer::from_slice(&body);

	serde_path_to_error::deserialize(&mut deserializer)
		.map_err(|source| Error::DataDecode { source })
}

fn map_record(resource: &ResourceSpec, record: &RawRecord) -> Result<IntegrationItem> {
	Ok(IntegrationItem {
		id: record.id.clone(),
		kind: resource.kind,
		name: resource.display_name(&record.properties),
		creation_time: item::parse_timestamp(&record.created_at)?,
		last_modified_time: item::parse_timestamp(&record.updated_at)?,
		url: resource.record_url(&record.id),
	})
}
