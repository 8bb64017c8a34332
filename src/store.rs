//! Key-value storage contract backing pending-authorization markers and credential bundles.
//!
//! The store is treated as an external capability with exactly three operations on string keys:
//! get, set, and set-with-expiry. Every write touches a single key, so the store's own per-key
//! atomicity is all the coordination the connector needs; concurrent callbacks for the same state
//! resolve as last-write-wins.

pub mod memory;

pub use memory::MemoryStore;

// self
use crate::{
	_prelude::*,
	auth::{OrgId, ProviderId, StateToken, UserId},
};

/// Boxed future returned by [`ConnectorStore`] operations.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + 'a + Send>>;

/// Storage backend contract implemented by connector stores.
///
/// Implementations wrap whatever the deployment uses (Redis, a test map, …); the connector never
/// relies on compare-and-swap or transactions.
pub trait ConnectorStore
where
	Self: Send + Sync,
{
	/// Fetches the value stored under `key`, if present and not expired.
	fn get<'a>(&'a self, key: &'a str) -> StoreFuture<'a, Option<String>>;

	/// Stores `value` under `key` without a TTL, replacing any prior value.
	fn set<'a>(&'a self, key: &'a str, value: String) -> StoreFuture<'a, ()>;

	/// Stores `value` under `key` with a relative TTL, replacing any prior value.
	fn set_with_expiry<'a>(&'a self, key: &'a str, value: String, ttl: Duration)
	-> StoreFuture<'a, ()>;
}

/// Error type produced by [`ConnectorStore`] implementations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum StoreError {
	/// Serialization failures surfaced by the backend or its callers.
	#[error("Serialization error: {message}.")]
	Serialization {
		/// Human-readable error payload.
		message: String,
	},
	/// Backend-level failure for the storage engine.
	#[error("Backend failure: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
}

/// Key under which the pending-authorization marker for `state` lives.
pub fn state_key(provider: &ProviderId, state: &StateToken) -> String {
	format!("{provider}_state:{state}")
}

/// Key under which the credential bundle for a (user, organization) pair lives.
pub fn credential_key(provider: &ProviderId, user: &UserId, org: &OrgId) -> String {
	format!("{provider}_credentials:{user}:{org}")
}
