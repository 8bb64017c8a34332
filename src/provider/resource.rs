//! Per-resource mapping entries that keep the normalizer open to new CRM collections.

// crates.io
use serde_json::{Map, Value};
// self
use crate::{_prelude::*, item::ItemKind};

/// Fallback display name for company records missing a `name` property.
const UNNAMED_COMPANY: &str = "Unnamed Company";

/// Mapping entry describing how one CRM collection becomes integration items.
///
/// The fetch flow iterates the descriptor's resource table in order, so adding a collection is a
/// matter of appending an entry; the fetch logic itself stays untouched.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceSpec {
	/// Kind tag stamped onto every item produced from this collection.
	pub kind: ItemKind,
	/// Collection path relative to the provider's API base, e.g. `crm/v3/objects/contacts`.
	pub collection_path: String,
	/// URL base for canonical record links, e.g. `https://app.hubspot.com/contacts`.
	pub record_url_base: Url,
}
impl ResourceSpec {
	/// Creates a mapping entry for one collection.
	pub fn new(kind: ItemKind, collection_path: impl Into<String>, record_url_base: Url) -> Self {
		Self { kind, collection_path: collection_path.into(), record_url_base }
	}

	/// Resolves the collection URL against the provider's API base.
	pub fn collection_url(&self, api_base: &Url) -> Result<Url, url::ParseError> {
		api_base.join(&self.collection_path)
	}

	/// Canonical UI URL for one record of this collection.
	pub fn record_url(&self, id: &str) -> String {
		format!("{}/{id}", self.record_url_base.as_str().trim_end_matches('/'))
	}

	/// Derives the display name for a record of this collection from its properties.
	pub fn display_name(&self, properties: &Map<String, Value>) -> String {
		match self.kind {
			ItemKind::Contact => {
				let first = property_str(properties, "firstname").unwrap_or("");
				let last = property_str(properties, "lastname").unwrap_or("");

				format!("{first} {last}").trim().to_owned()
			},
			ItemKind::Company =>
				property_str(properties, "name").unwrap_or(UNNAMED_COMPANY).to_owned(),
		}
	}
}

fn property_str<'a>(properties: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
	properties.get(key).and_then(Value::as_str)
}

#[cfg(test)]
mod tests {
	// crates.io
	use serde_json::json;
	// self
	use super::*;

	fn properties(value: Value) -> Map<String, Value> {
		value.as_object().expect("Property fixture should be an object.").clone()
	}

	fn contact_spec() -> ResourceSpec {
		ResourceSpec::new(
			ItemKind::Contact,
			"crm/v3/objects/contacts",
			Url::parse("https://app.example.com/contacts").expect("URL fixture should parse."),
		)
	}

	fn company_spec() -> ResourceSpec {
		ResourceSpec::new(
			ItemKind::Company,
			"crm/v3/objects/companies",
			Url::parse("https://app.example.com/companies").expect("URL fixture should parse."),
		)
	}

	#[test]
	fn contact_names_concatenate_and_trim() {
		let spec = contact_spec();

		assert_eq!(
			spec.display_name(&properties(json!({"firstname": "Ada", "lastname": "Lovelace"}))),
			"Ada Lovelace"
		);
		assert_eq!(spec.display_name(&properties(json!({"firstname": "Ada"}))), "Ada");
		assert_eq!(spec.display_name(&properties(json!({"lastname": "Lovelace"}))), "Lovelace");
		assert_eq!(spec.display_name(&properties(json!({}))), "");
	}

	#[test]
	fn company_names_fall_back_when_missing() {
		let spec = company_spec();

		assert_eq!(spec.display_name(&properties(json!({"name": "Acme"}))), "Acme");
		assert_eq!(spec.display_name(&properties(json!({}))), "Unnamed Company");
	}

	#[test]
	fn urls_resolve_against_their_bases() {
		let api_base = Url::parse("https://api.example.com").expect("API base should parse.");
		let collection = contact_spec()
			.collection_url(&api_base)
			.expect("Collection path should resolve.");

		assert_eq!(collection.as_str(), "https://api.example.com/crm/v3/objects/contacts");
		assert_eq!(contact_spec().record_url("1"), "https://app.example.com/contacts/1");
	}
}
