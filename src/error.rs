//! Connector-level error types shared across flows, providers, and stores.
//!
//! The taxonomy mirrors how callers are expected to surface failures: [`ConfigError`] is a
//! server-side misconfiguration, [`CallbackError`] is a client-facing bad request, and the
//! token/data variants carry the upstream status so the web layer can relay it.

// self
use crate::_prelude::*;

/// Connector-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical connector error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Storage-layer failure.
	#[error("{0}")]
	Storage(
		#[from]
		#[source]
		crate::store::StoreError,
	),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Invalid inbound callback request.
	#[error(transparent)]
	Callback(#[from] CallbackError),
	/// Token endpoint rejected an exchange or refresh.
	#[error(transparent)]
	Token(#[from] TokenEndpointError),
	/// Transport failure (DNS, TCP, TLS, timeout).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Identifier failed validation.
	#[error(transparent)]
	Identifier(#[from] crate::auth::IdentifierError),
	/// Provider timestamp could not be parsed.
	#[error(transparent)]
	Timestamp(#[from] crate::item::TimestampError),

	/// Data API returned a non-success, non-retryable status.
	#[error("CRM data endpoint returned status {status}.")]
	Data {
		/// Upstream HTTP status code.
		status: u16,
	},
	/// Data API returned a body that could not be decoded as JSON.
	#[error("CRM data endpoint returned malformed JSON.")]
	DataDecode {
		/// Structured parsing failure pointing at the offending path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
	/// Stored credential bundle could not be decoded.
	#[error("Stored credential bundle is malformed.")]
	CredentialDecode {
		/// Structured parsing failure pointing at the offending path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
}

/// Configuration and validation failures raised by the connector.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// Provider client identifier is not configured.
	#[error("Provider client id is not configured.")]
	MissingClientId,
	/// Provider client secret is not configured.
	#[error("Provider client secret is not configured.")]
	MissingClientSecret,
	/// Required environment variable is absent.
	#[error("Environment variable `{name}` is not set.")]
	MissingEnvVar {
		/// Name of the missing variable.
		name: String,
	},
	/// Redirect URI cannot be parsed.
	#[error("Redirect URI is invalid.")]
	InvalidRedirect {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Resource collection path does not resolve against the API base URL.
	#[error("Collection path does not resolve against the API base URL.")]
	InvalidCollectionPath {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Provider descriptor failed validation.
	#[error(transparent)]
	Descriptor(#[from] crate::provider::ProviderDescriptorError),
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Client-facing failures raised while handling the provider redirect.
#[derive(Debug, ThisError)]
pub enum CallbackError {
	/// Provider reported that the end user denied the authorization request.
	#[error("Provider denied the authorization request: {reason}.")]
	Denied {
		/// Error text relayed by the provider.
		reason: String,
	},
	/// Redirect arrived without the mandatory `code` or `state` parameter.
	#[error("Callback is missing the code or state parameter.")]
	MissingParameters,
	/// No live pending-authorization marker exists for the returned state.
	#[error("Callback state is unknown or has expired.")]
	InvalidState,
	/// Returned state is not a `user:org` composite.
	#[error("Callback state is malformed.")]
	MalformedState {
		/// Underlying state parsing failure.
		#[source]
		source: crate::auth::StateTokenError,
	},
}

/// Failures reported by the provider's token endpoint.
#[derive(Debug, ThisError)]
pub enum TokenEndpointError {
	/// Authorization code exchange returned a non-success status.
	#[error("Token endpoint rejected the authorization code exchange with status {status}.")]
	Exchange {
		/// Upstream HTTP status code.
		status: u16,
	},
	/// Refresh token grant returned a non-success status.
	#[error("Token endpoint rejected the refresh request with status {status}.")]
	Refresh {
		/// Upstream HTTP status code.
		status: u16,
	},
	/// Token endpoint responded with malformed JSON.
	#[error("Token endpoint returned malformed JSON.")]
	Parse {
		/// Structured parsing failure pointing at the offending path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the provider.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the provider.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}
