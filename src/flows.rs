//! High-level connector operations composed as a linear pipeline:
//! authorize → callback → store → fetch.

pub mod authorize;
pub mod callback;
pub mod credentials;
pub mod fetch;

pub use authorize::*;
pub use callback::*;
pub use fetch::*;

// self
use crate::{
	_prelude::*,
	config::ClientConfig,
	http::HttpClient,
	provider::ProviderDescriptor,
	store::ConnectorStore,
};

/// Coordinates the OAuth consent, callback, credential, and fetch operations for one provider.
///
/// The connector owns the HTTP client, key-value store handle, provider descriptor, and client
/// configuration so the individual operations can focus on their stage of the pipeline. All
/// operations are request-driven; the connector spawns no background tasks and keeps no mutable
/// in-process state beyond the external store.
#[derive(Clone)]
pub struct Connector {
	/// HTTP client wrapper used for every outbound provider request.
	pub http_client: HttpClient,
	/// Key-value store persisting markers and credential bundles.
	pub store: Arc<dyn ConnectorStore>,
	/// Provider descriptor defining endpoints, scopes, and the resource table.
	pub descriptor: ProviderDescriptor,
	/// OAuth client configuration for this provider registration.
	pub config: ClientConfig,
}
impl Connector {
	/// Creates a connector that provisions its own default HTTP transport.
	pub fn new(
		store: Arc<dyn ConnectorStore>,
		descriptor: ProviderDescriptor,
		config: ClientConfig,
	) -> Result<Self> {
		Ok(Self::with_http_client(store, descriptor, config, HttpClient::new()?))
	}

	/// Creates a connector that reuses the caller-provided transport.
	pub fn with_http_client(
		store: Arc<dyn ConnectorStore>,
		descriptor: ProviderDescriptor,
		config: ClientConfig,
		http_client: HttpClient,
	) -> Self {
		Self { http_client, store, descriptor, config }
	}
}
impl Debug for Connector {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Connector")
			.field("descriptor", &self.descriptor.id)
			.field("config", &self.config)
			.finish()
	}
}
