//! Client configuration passed to the connector at construction.
//!
//! Configuration is an explicit value rather than process-wide ambient state so multiple
//! provider configurations can coexist in one process and tests can inject fixtures directly.

// std
use std::env;
// self
use crate::{_prelude::*, error::ConfigError};

/// OAuth client configuration for one provider registration.
#[derive(Clone)]
pub struct ClientConfig {
	/// OAuth 2.0 client identifier issued by the provider.
	pub client_id: String,
	/// Confidential client secret issued by the provider.
	pub client_secret: String,
	/// Redirect URI registered for the OAuth application.
	pub redirect_uri: Url,
}
impl ClientConfig {
	/// Assembles a configuration from explicit values.
	pub fn new(
		client_id: impl Into<String>,
		client_secret: impl Into<String>,
		redirect_uri: Url,
	) -> Self {
		Self { client_id: client_id.into(), client_secret: client_secret.into(), redirect_uri }
	}

	/// Loads `{PREFIX}_CLIENT_ID`, `{PREFIX}_CLIENT_SECRET`, and `{PREFIX}_REDIRECT_URI` from the
	/// environment, failing fast on any missing variable.
	pub fn from_env(prefix: &str) -> Result<Self, ConfigError> {
		let client_id = require_env(&format!("{prefix}_CLIENT_ID"))?;
		let client_secret = require_env(&format!("{prefix}_CLIENT_SECRET"))?;
		let redirect_raw = require_env(&format!("{prefix}_REDIRECT_URI"))?;
		let redirect_uri = Url::parse(&redirect_raw)
			.map_err(|source| ConfigError::InvalidRedirect { source })?;

		Ok(Self { client_id, client_secret, redirect_uri })
	}

	/// Fails with a configuration error unless both client credentials are present.
	pub fn ensure_client(&self) -> Result<(), ConfigError> {
		if self.client_id.trim().is_empty() {
			return Err(ConfigError::MissingClientId);
		}
		if self.client_secret.trim().is_empty() {
			return Err(ConfigError::MissingClientSecret);
		}

		Ok(())
	}
}
impl Debug for ClientConfig {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ClientConfig")
			.field("client_id", &self.client_id)
			.field("client_secret_set", &!self.client_secret.is_empty())
			.field("redirect_uri", &self.redirect_uri)
			.finish()
	}
}

fn require_env(name: &str) -> Result<String, ConfigError> {
	env::var(name).map_err(|_| ConfigError::MissingEnvVar { name: name.to_owned() })
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn redirect() -> Url {
		Url::parse("https://app.example.com/integrations/callback")
			.expect("Redirect fixture should parse.")
	}

	#[test]
	fn ensure_client_rejects_blank_credentials() {
		let missing_id = ClientConfig::new("", "secret", redirect());

		assert!(matches!(missing_id.ensure_client(), Err(ConfigError::MissingClientId)));

		let missing_secret = ClientConfig::new("client", "  ", redirect());

		assert!(matches!(missing_secret.ensure_client(), Err(ConfigError::MissingClientSecret)));

		let complete = ClientConfig::new("client", "secret", redirect());

		assert!(complete.ensure_client().is_ok());
	}

	#[test]
	fn debug_never_prints_the_secret() {
		let config = ClientConfig::new("client", "super-secret", redirect());
		let rendered = format!("{config:?}");

		assert!(!rendered.contains("super-secret"));
		assert!(rendered.contains("client_secret_set"));
	}

	#[test]
	fn from_env_reads_the_prefixed_variables() {
		// SAFETY: test-local variables with a prefix no other test touches.
		unsafe {
			env::set_var("CFGTEST_CLIENT_ID", "id-1");
			env::set_var("CFGTEST_CLIENT_SECRET", "secret-1");
			env::set_var("CFGTEST_REDIRECT_URI", "https://app.example.com/cb");
		}

		let config = ClientConfig::from_env("CFGTEST").expect("Environment should be complete.");

		assert_eq!(config.client_id, "id-1");
		assert_eq!(config.redirect_uri.as_str(), "https://app.example.com/cb");

		let err = ClientConfig::from_env("CFGTEST_ABSENT")
			.expect_err("Missing variables should fail fast.");

		assert!(matches!(err, ConfigError::MissingEnvVar { .. }));
	}
}
