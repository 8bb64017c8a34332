//! OAuth2 redirect handling: state validation, code exchange, credential persistence.

// self
use crate::{
	_prelude::*,
	auth::{CredentialBundle, StateToken, TokenResponse},
	error::{CallbackError, TokenEndpointError, TransportError},
	flows::Connector,
	obs::{FlowKind, FlowSpan},
	store,
};

/// Query parameters surfaced by the provider redirect.
///
/// The web layer deserializes its request query into this struct; every field is optional
/// because providers omit `code`/`state` on denial and `error` on success.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct CallbackParams {
	/// Authorization code to exchange, present on success.
	#[serde(default)]
	pub code: Option<String>,
	/// Returned state token, present on success.
	#[serde(default)]
	pub state: Option<String>,
	/// Provider error text, present on denial.
	#[serde(default)]
	pub error: Option<String>,
}
impl CallbackParams {
	/// Parameters of a successful provider redirect.
	pub fn authorized(code: impl Into<String>, state: impl Into<String>) -> Self {
		Self { code: Some(code.into()), state: Some(state.into()), error: None }
	}

	/// Parameters of a denied provider redirect.
	pub fn denied(reason: impl Into<String>) -> Self {
		Self { code: None, state: None, error: Some(reason.into()) }
	}
}

/// Confirmation returned once the callback persisted a credential bundle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CallbackReceipt {
	/// Human-readable confirmation message for the end user.
	pub message: String,
}

impl Connector {
	/// Handles the OAuth2 callback from the provider.
	///
	/// Validates the returned `code`/`state` pair against the pending-authorization marker,
	/// exchanges the code at the token endpoint, and persists the resulting credential bundle
	/// under the (user, organization) pair recovered from the state.
	///
	/// The marker is deliberately left in place after a successful exchange: the store contract
	/// has no delete primitive and one callback per authorization attempt is expected, so a
	/// replay within the marker's TTL window overwrites the same credential key.
	pub async fn handle_callback(&self, params: CallbackParams) -> Result<CallbackReceipt> {
		let span = FlowSpan::new(FlowKind::Callback, "handle_callback");

		span.instrument(async move {
			if let Some(reason) = params.error {
				return Err(CallbackError::Denied { reason }.into());
			}

			let (Some(code), Some(raw_state)) = (params.code, params.state) else {
				return Err(CallbackError::MissingParameters.into());
			};
			let state = StateToken::parse(&raw_state)
				.map_err(|source| CallbackError::MalformedState { source })?;
			let marker_key = store::state_key(&self.descriptor.id, &state);

			if self.store.get(&marker_key).await?.is_none() {
				return Err(CallbackError::InvalidState.into());
			}

			let response = self.exchange_code(&code).await?;

			self.persist_credentials(state.user(), state.org(), &CredentialBundle::from(response))
				.await?;
			tracing::debug!(state = %state, "Persisted credential bundle.");

			Ok(CallbackReceipt {
				message: format!("Successfully authenticated with {}.", self.descriptor.id),
			})
		})
		.await
	}

	async fn exchange_code(&self, code: &str) -> Result<TokenResponse> {
		let form = [
			("grant_type", "authorization_code"),
			("client_id", self.config.client_id.as_str()),
			("client_secret", self.config.client_secret.as_str()),
			("redirect_uri", self.config.redirect_uri.as_str()),
			("code", code),
		];
		let response = self.http_client.post_form(&self.descriptor.endpoints.token, &form).await?;
		let status = response.status();

		if !status.is_success() {
			return Err(TokenEndpointError::Exchange { status: status.as_u16() }.into());
		}

		let body = response.bytes().await.map_err(TransportError::from)?;

		TokenResponse::from_slice(&body)
			.map_err(|source| TokenEndpointError::Parse { source }.into())
	}
}
