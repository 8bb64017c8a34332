//! Credential bundle lookup, persistence, and the refresh token grant.

// self
use crate::{
	_prelude::*,
	auth::{CredentialBundle, OrgId, TokenResponse, UserId},
	error::{TokenEndpointError, TransportError},
	flows::Connector,
	obs::{FlowKind, FlowSpan},
	store,
};

impl Connector {
	/// Retrieves the stored credential bundle for a (user, organization) pair.
	///
	/// Pure lookup: no side effects and no network calls. Returns `None` when nothing has been
	/// persisted for the pair.
	pub async fn get_credentials(
		&self,
		user: &UserId,
		org: &OrgId,
	) -> Result<Option<CredentialBundle>> {
		let key = store::credential_key(&self.descriptor.id, user, org);

		match self.store.get(&key).await? {
			Some(raw) => Ok(Some(CredentialBundle::from_json(&raw)?)),
			None => Ok(None),
		}
	}

	/// Renews an access token via the `refresh_token` grant.
	///
	/// Returns the provider's raw token response without persisting it; callers that need the
	/// renewed token to outlive the current request must store the derived bundle themselves.
	pub async fn refresh_access_token(&self, refresh_token: &str) -> Result<TokenResponse> {
		let span = FlowSpan::new(FlowKind::Refresh, "refresh_access_token");

		span.instrument(async move {
			let form = [
				("grant_type", "refresh_token"),
				("client_id", self.config.client_id.as_str()),
				("client_secret", self.config.client_secret.as_str()),
				("refresh_token", refresh_token),
			];
			let response =
				self.http_client.post_form(&self.descriptor.endpoints.token, &form).await?;
			let status = response.status();

			if !status.is_success() {
				return Err(TokenEndpointError::Refresh { status: status.as_u16() }.into());
			}

			let body = response.bytes().await.map_err(TransportError::from)?;

			TokenResponse::from_slice(&body)
				.map_err(|source| TokenEndpointError::Parse { source }.into())
		})
		.await
	}

	/// Writes the credential bundle under the pair's credential key, replacing any prior bundle.
	pub(crate) async fn persist_credentials(
		&self,
		user: &UserId,
		org: &OrgId,
		bundle: &CredentialBundle,
	) -> Result<()> {
		let key = store::credential_key(&self.descriptor.id, user, org);

		self.store.set(&key, bundle.to_json()?).await?;

		Ok(())
	}
}
