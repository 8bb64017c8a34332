//! Thread-safe in-memory [`ConnectorStore`] implementation for local development and tests.

// self
use crate::{
	_prelude::*,
	store::{ConnectorStore, StoreFuture},
};

type Entry = (String, Option<OffsetDateTime>);
type StoreMap = Arc<RwLock<HashMap<String, Entry>>>;

/// Thread-safe storage backend that keeps entries in-process for tests and demos.
///
/// Expired entries are filtered on read rather than evicted.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore(StoreMap);
impl MemoryStore {
	fn get_now(map: StoreMap, key: String, now: OffsetDateTime) -> Option<String> {
		let guard = map.read();

		match guard.get(&key) {
			Some((value, expires_at)) if expires_at.is_none_or(|at| now < at) =>
				Some(value.clone()),
			_ => None,
		}
	}

	fn set_now(map: StoreMap, key: String, value: String, expires_at: Option<OffsetDateTime>) {
		map.write().insert(key, (value, expires_at));
	}
}
impl ConnectorStore for MemoryStore {
	fn get<'a>(&'a self, key: &'a str) -> StoreFuture<'a, Option<String>> {
		let map = self.0.clone();
		let key = key.to_owned();

		Box::pin(async move { Ok(Self::get_now(map, key, OffsetDateTime::now_utc())) })
	}

	fn set<'a>(&'a self, key: &'a str, value: String) -> StoreFuture<'a, ()> {
		let map = self.0.clone();
		let key = key.to_owned();

		Box::pin(async move {
			Self::set_now(map, key, value, None);

			Ok(())
		})
	}

	fn set_with_expiry<'a>(
		&'a self,
		key: &'a str,
		value: String,
		ttl: Duration,
	) -> StoreFuture<'a, ()> {
		let map = self.0.clone();
		let key = key.to_owned();

		Box::pin(async move {
			Self::set_now(map, key, value, Some(OffsetDateTime::now_utc() + ttl));

			Ok(())
		})
	}
}
