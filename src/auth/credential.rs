//! Credential bundles persisted per (user, organization) pair and the token endpoint wire form.

// self
use crate::{_prelude::*, auth::TokenSecret, store::StoreError};

/// Raw token endpoint response for `authorization_code` and `refresh_token` grants.
///
/// Returned as-is by [`Connector::refresh_access_token`](crate::flows::Connector::refresh_access_token);
/// that operation deliberately does not persist the response, callers needing persistence must
/// store the derived [`CredentialBundle`] themselves.
#[derive(Clone, Debug, Deserialize)]
pub struct TokenResponse {
	/// Bearer token to present against the data API.
	pub access_token: TokenSecret,
	/// Refresh token, when the provider issued one.
	#[serde(default)]
	pub refresh_token: Option<TokenSecret>,
	/// Relative expiry in seconds, as reported by the provider.
	pub expires_in: u64,
	/// Token type label, normally `bearer`.
	pub token_type: String,
}
impl TokenResponse {
	/// Decodes a token endpoint JSON body, preserving the failing path on error.
	pub fn from_slice(
		body: &[u8],
	) -> Result<Self, serde_path_to_error::Error<serde_json::Error>> {
		let mut deserializer = serde_json::Deserializer::from_slice(body);

		serde_path_to_error::deserialize(&mut deserializer)
	}
}

/// Credential bundle persisted in the key-value store for one (user, organization) pair.
///
/// The record carries no TTL of its own and persists until overwritten. `expires_in` is stored
/// but never checked proactively; staleness is discovered reactively when a data call returns
/// 401 (see [`Connector::fetch_items`](crate::flows::Connector::fetch_items)).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialBundle {
	/// Bearer token to present against the data API.
	pub access_token: TokenSecret,
	/// Refresh token, when the provider issued one. Serialized as `null` when absent.
	#[serde(default)]
	pub refresh_token: Option<TokenSecret>,
	/// Relative expiry in seconds, as reported at issue time.
	pub expires_in: u64,
	/// Token type label, normally `bearer`.
	pub token_type: String,
}
impl CredentialBundle {
	/// Decodes the string-encoded bundle read back from the key-value store.
	pub fn from_json(raw: &str) -> Result<Self> {
		let mut deserializer = serde_json::Deserializer::from_str(raw);

		serde_path_to_error::deserialize(&mut deserializer)
			.map_err(|source| Error::CredentialDecode { source })
	}

	/// Encodes the bundle for the key-value store.
	pub fn to_json(&self) -> Result<String> {
		serde_json::to_string(self)
			.map_err(|e| StoreError::Serialization { message: e.to_string() }.into())
	}
}
impl From<TokenResponse> for CredentialBundle {
	fn from(response: TokenResponse) -> Self {
		Self {
			access_token: response.access_token,
			refresh_token: response.refresh_token,
			expires_in: response.expires_in,
			token_type: response.token_type,
		}
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn bundle() -> CredentialBundle {
		CredentialBundle {
			access_token: TokenSecret::new("access-1"),
			refresh_token: Some(TokenSecret::new("refresh-1")),
			expires_in: 1_800,
			token_type: "bearer".into(),
		}
	}

	#[test]
	fn bundle_round_trips_through_json() {
		let encoded = bundle().to_json().expect("Bundle should encode.");
		let decoded = CredentialBundle::from_json(&encoded).expect("Bundle should decode.");

		assert_eq!(decoded, bundle());
	}

	#[test]
	fn absent_and_null_refresh_tokens_both_decode() {
		let with_null = r#"{"access_token":"a","refresh_token":null,"expires_in":60,"token_type":"bearer"}"#;
		let without_key = r#"{"access_token":"a","expires_in":60,"token_type":"bearer"}"#;

		for raw in [with_null, without_key] {
			let decoded = CredentialBundle::from_json(raw).expect("Bundle should decode.");

			assert!(decoded.refresh_token.is_none());
		}
	}

	#[test]
	fn malformed_bundle_reports_the_failing_path() {
		let err = CredentialBundle::from_json(r#"{"access_token":"a","expires_in":"soon","token_type":"bearer"}"#)
			.expect_err("Non-numeric expires_in should fail.");

		assert!(matches!(err, Error::CredentialDecode { .. }));
		assert!(format!("{err:?}").contains("expires_in"));
	}

	#[test]
	fn token_response_converts_into_bundle() {
		let response = TokenResponse::from_slice(
			br#"{"access_token":"access-2","refresh_token":"refresh-2","expires_in":3600,"token_type":"bearer"}"#,
		)
		.expect("Token response should decode.");
		let bundle = CredentialBundle::from(response);

		assert_eq!(bundle.access_token.expose(), "access-2");
		assert_eq!(bundle.refresh_token.as_ref().map(TokenSecret::expose), Some("refresh-2"));
		assert_eq!(bundle.expires_in, 3_600);
	}
}
