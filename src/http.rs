//! Thin HTTP transport wrapper shared by all connector flows.
//!
//! Token requests do not follow redirects, matching OAuth 2.0 guidance that token endpoints
//! return results directly instead of delegating to another URI. Every request carries a bounded
//! timeout so one slow upstream call cannot hold a handler indefinitely; timeouts surface as
//! [`TransportError`] through the invoking operation.

// std
use std::{ops::Deref, time::Duration as StdDuration};
// crates.io
use reqwest::Response;
// self
use crate::{_prelude::*, error::ConfigError, error::TransportError};

const DEFAULT_TIMEOUT: StdDuration = StdDuration::from_secs(30);

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
#[derive(Clone)]
pub struct HttpClient(ReqwestClient);
impl HttpClient {
	/// Builds a client with the connector defaults (bounded timeout, no redirects).
	pub fn new() -> Result<Self, ConfigError> {
		let client = ReqwestClient::builder()
			.timeout(DEFAULT_TIMEOUT)
			.redirect(reqwest::redirect::Policy::none())
			.build()?;

		Ok(Self(client))
	}

	/// Wraps an existing [`ReqwestClient`]. Configure the custom client to disable redirect
	/// following and to bound its request timeout.
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}

	/// Sends a form-encoded POST to `url`.
	pub async fn post_form(
		&self,
		url: &Url,
		form: &[(&str, &str)],
	) -> Result<Response, TransportError> {
		self.0.post(url.clone()).form(form).send().await.map_err(TransportError::from)
	}

	/// Sends a bearer-authenticated GET to `url`.
	pub async fn get_with_bearer(
		&self,
		url: &Url,
		token: &str,
	) -> Result<Response, TransportError> {
		self.0.get(url.clone()).bearer_auth(token).send().await.map_err(TransportError::from)
	}
}
impl AsRef<ReqwestClient> for HttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
impl Deref for HttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
