//! Provider descriptor data structures and the builder that validates them.
//!
//! A descriptor pins the OAuth endpoints, the requested scope list, and the ordered resource
//! mapping table for one CRM provider, so the flows stay free of provider literals.

// self
use crate::{
	_prelude::*,
	auth::ProviderId,
	item::ItemKind,
	provider::ResourceSpec,
};

/// Errors raised while constructing or validating descriptors.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum ProviderDescriptorError {
	/// Authorization endpoint is required for the consent redirect.
	#[error("Missing authorization endpoint.")]
	MissingAuthorizationEndpoint,
	/// Token endpoint is mandatory for exchanges and refreshes.
	#[error("Missing token endpoint.")]
	MissingTokenEndpoint,
	/// API base URL is mandatory for data fetches.
	#[error("Missing API base URL.")]
	MissingApiBase,
	/// At least one resource mapping entry must be configured.
	#[error("Descriptor must declare at least one resource collection.")]
	NoResources,
}

/// Endpoint set declared by a provider descriptor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderEndpoints {
	/// Authorization endpoint the end user is redirected to for consent.
	pub authorization: Url,
	/// Token endpoint used for code exchanges and refreshes.
	pub token: Url,
	/// Base URL of the provider's data API.
	pub api_base: Url,
}

/// Immutable provider descriptor consumed by flows.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderDescriptor {
	/// Descriptor identifier; also the prefix of every store key.
	pub id: ProviderId,
	/// Endpoint definitions exposed by the provider.
	pub endpoints: ProviderEndpoints,
	/// OAuth scopes requested during authorization.
	pub scopes: Vec<String>,
	/// Ordered resource mapping table; fetches run in table order.
	pub resources: Vec<ResourceSpec>,
}
impl ProviderDescriptor {
	/// Creates a new builder for the provided identifier.
	pub fn builder(id: ProviderId) -> ProviderDescriptorBuilder {
		ProviderDescriptorBuilder::new(id)
	}

	/// Space-joined scope value as it appears in the consent URL.
	pub fn scope_value(&self) -> String {
		self.scopes.join(" ")
	}

	/// Descriptor matching HubSpot's documented OAuth and CRM v3 endpoints.
	pub fn hubspot() -> Self {
		let id = ProviderId::new("hubspot").expect("Hard-coded provider identifier should be valid.");

		Self::builder(id)
			.authorization_endpoint(known_url("https://app.hubspot.com/oauth/authorize"))
			.token_endpoint(known_url("https://api.hubapi.com/oauth/v1/token"))
			.api_base(known_url("https://api.hubapi.com"))
			.scopes(["contacts", "crm.objects.contacts.read", "crm.objects.companies.read"])
			.resource(ResourceSpec::new(
				ItemKind::Contact,
				"crm/v3/objects/contacts",
				known_url("https://app.hubspot.com/contacts"),
			))
			.resource(ResourceSpec::new(
				ItemKind::Company,
				"crm/v3/objects/companies",
				known_url("https://app.hubspot.com/companies"),
			))
			.build()
			.expect("Hard-coded HubSpot descriptor should validate.")
	}
}

/// Builder for [`ProviderDescriptor`] values.
#[derive(Debug)]
pub struct ProviderDescriptorBuilder {
	/// Identifier for the descriptor being constructed.
	pub id: ProviderId,
	/// Optional authorization endpoint.
	pub authorization_endpoint: Option<Url>,
	/// Optional token endpoint.
	pub token_endpoint: Option<Url>,
	/// Optional data API base URL.
	pub api_base: Option<Url>,
	/// Scopes requested during authorization.
	pub scopes: Vec<String>,
	/// Resource mapping entries, in fetch order.
	pub resources: Vec<ResourceSpec>,
}
impl ProviderDescriptorBuilder {
	/// Creates a new builder seeded with the provided identifier.
	pub fn new(id: ProviderId) -> Self {
		Self {
			id,
			authorization_endpoint: None,
			token_endpoint: None,
			api_base: None,
			scopes: Vec::new(),
			resources: Vec::new(),
		}
	}

	/// Sets the authorization endpoint.
	pub fn authorization_endpoint(mut self, url: Url) -> Self {
		self.authorization_endpoint = Some(url);

		self
	}

	/// Sets the token endpoint.
	pub fn token_endpoint(mut self, url: Url) -> Self {
		self.token_endpoint = Some(url);

		self
	}

	/// Sets the data API base URL.
	pub fn api_base(mut self, url: Url) -> Self {
		self.api_base = Some(url);

		self
	}

	/// Replaces the requested scope list.
	pub fn scopes<I, S>(mut self, scopes: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.scopes = scopes.into_iter().map(Into::into).collect();

		self
	}

	/// Appends one resource mapping entry.
	pub fn resource(mut self, resource: ResourceSpec) -> Self {
		self.resources.push(resource);

		self
	}

	/// Consumes the builder and validates the resulting descriptor.
	pub fn build(self) -> Result<ProviderDescriptor, ProviderDescriptorError> {
		let authorization = self
			.authorization_endpoint
			.ok_or(ProviderDescriptorError::MissingAuthorizationEndpoint)?;
		let token = self.token_endpoint.ok_or(ProviderDescriptorError::MissingTokenEndpoint)?;
		let api_base = self.api_base.ok_or(ProviderDescriptorError::MissingApiBase)?;

		if self.resources.is_empty() {
			return Err(ProviderDescriptorError::NoResources);
		}

		Ok(ProviderDescriptor {
			id: self.id,
			endpoints: ProviderEndpoints { authorization, token, api_base },
			scopes: self.scopes,
			resources: self.resources,
		})
	}
}

fn known_url(value: &str) -> Url {
	Url::parse(value).expect("Hard-coded endpoint URL should parse.")
}
