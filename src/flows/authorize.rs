//! Consent-screen URL construction and pending-authorization markers.

// self
use crate::{
	_prelude::*,
	auth::{OrgId, StateToken, UserId},
	config::ClientConfig,
	flows::Connector,
	obs::{FlowKind, FlowSpan},
	provider::ProviderDescriptor,
	store,
};

/// Lifetime of the pending-authorization marker; callbacks arriving later are rejected.
const MARKER_TTL: Duration = Duration::seconds(3_600);
/// Sentinel value stored under the marker key.
const MARKER_VALUE: &str = "1";

/// Consent handshake metadata returned by [`Connector::begin_authorization`].
#[derive(Clone, Debug)]
pub struct AuthorizationStart {
	/// Fully-formed consent URL that callers should send the end user to.
	pub auth_url: Url,
	/// State token that will round-trip via the provider redirect.
	pub state: StateToken,
}

impl Connector {
	/// Starts the OAuth 2.0 flow for a (user, organization) pair.
	///
	/// Writes the pending-authorization marker with a one-hour expiry and returns the provider's
	/// consent URL. Performs no network call; the result is deterministic given the inputs apart
	/// from the marker's wall-clock expiry.
	pub async fn begin_authorization(
		&self,
		user: UserId,
		org: OrgId,
	) -> Result<AuthorizationStart> {
		let span = FlowSpan::new(FlowKind::Authorize, "begin_authorization");

		span.instrument(async move {
			self.config.ensure_client()?;

			let state = StateToken::new(user, org);
			let key = store::state_key(&self.descriptor.id, &state);

			self.store.set_with_expiry(&key, MARKER_VALUE.into(), MARKER_TTL).await?;

			let auth_url = build_consent_url(&self.descriptor, &self.config, &state);

			tracing::debug!(state = %state, "Recorded pending authorization.");

			Ok(AuthorizationStart { auth_url, state })
		})
		.await
	}
}

fn build_consent_url(
	descriptor: &ProviderDescriptor,
	config: &ClientConfig,
	state: &StateToken,
) -> Url {
	let mut url = descriptor.endpoints.authorization.clone();

	{
		let mut pairs = url.query_pairs_mut();

		pairs.append_pair("client_id", &config.client_id);
		pairs.append_pair("redirect_uri", config.redirect_uri.as_str());
		pairs.append_pair("scope", &descriptor.scope_value());
		pairs.append_pair("state", &state.to_string());
	}

	url
}
