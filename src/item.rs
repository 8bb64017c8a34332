//! Normalized integration items and provider timestamp parsing.

// crates.io
use time::{
	PrimitiveDateTime,
	format_description::well_known::{Iso8601, Rfc3339},
};
// self
use crate::_prelude::*;

/// Resource kind tag attached to every normalized item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
	/// A CRM contact record.
	Contact,
	/// A CRM company record.
	Company,
}
impl ItemKind {
	/// Returns a stable label suitable for span fields and serialized payloads.
	pub const fn as_str(self) -> &'static str {
		match self {
			ItemKind::Contact => "contact",
			ItemKind::Company => "company",
		}
	}
}
impl Display for ItemKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Uniform representation of one upstream CRM record.
///
/// Items are constructed fresh on every fetch and never persisted by the connector; ownership
/// transfers to the caller.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrationItem {
	/// Provider-assigned record identifier.
	pub id: String,
	/// Resource kind tag.
	pub kind: ItemKind,
	/// Display name derived from the record's properties.
	pub name: String,
	/// Record creation instant.
	#[serde(with = "time::serde::rfc3339")]
	pub creation_time: OffsetDateTime,
	/// Record last-modification instant.
	#[serde(with = "time::serde::rfc3339")]
	pub last_modified_time: OffsetDateTime,
	/// Canonical URL of the record in the provider's UI.
	pub url: String,
}

/// Error returned when a provider timestamp fits none of the accepted shapes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ThisError)]
#[error("Unrecognized timestamp format: {raw}.")]
pub struct TimestampError {
	/// The value that failed to parse.
	pub raw: String,
}

/// Parses a provider timestamp permissively.
///
/// Accepts RFC 3339, extended ISO 8601 (optional fractional seconds and offsets), and naive
/// date-times, which are assumed to be UTC. Epoch-only numeric formats are deliberately not
/// supported; providers on the CRM v3 surface emit ISO strings.
pub fn parse_timestamp(raw: &str) -> Result<OffsetDateTime, TimestampError> {
	if let Ok(moment) = OffsetDateTime::parse(raw, &Rfc3339) {
		return Ok(moment);
	}
	if let Ok(moment) = OffsetDateTime::parse(raw, &Iso8601::DEFAULT) {
		return Ok(moment);
	}
	if let Ok(naive) = PrimitiveDateTime::parse(raw, &Iso8601::DEFAULT) {
		return Ok(naive.assume_utc());
	}

	Err(TimestampError { raw: raw.to_owned() })
}

/// Extension hook for future per-item metadata enrichment.
///
/// Currently a documented no-op that always returns `None`. It exists so call sites can be wired
/// up ahead of the enrichment work without changing the fetch pipeline's shape.
pub fn build_item_metadata(_response_json: &serde_json::Value) -> Option<serde_json::Value> {
	None
}

#[cfg(test)]
mod tests {
	// crates.io
	use time::macros;
	// self
	use super::*;

	#[test]
	fn kind_labels_are_stable() {
		assert_eq!(ItemKind::Contact.as_str(), "contact");
		assert_eq!(ItemKind::Company.to_string(), "company");
		assert_eq!(
			serde_json::to_string(&ItemKind::Company).expect("Kind should serialize."),
			"\"company\""
		);
	}

	#[test]
	fn timestamps_parse_across_iso_shapes() {
		let expected = macros::datetime!(2024-01-01 00:00:00 UTC);

		assert_eq!(
			parse_timestamp("2024-01-01T00:00:00Z").expect("Zulu timestamp should parse."),
			expected
		);
		assert_eq!(
			parse_timestamp("2024-01-01T00:00:00.000Z")
				.expect("Fractional-second timestamp should parse."),
			expected
		);
		assert_eq!(
			parse_timestamp("2024-01-01T02:00:00+02:00")
				.expect("Offset timestamp should parse."),
			expected
		);
		assert_eq!(
			parse_timestamp("2024-01-01T00:00:00")
				.expect("Naive timestamp should parse and assume UTC."),
			expected
		);
	}

	#[test]
	fn unparseable_timestamps_report_the_raw_value() {
		let err = parse_timestamp("1704067200000").expect_err("Epoch millis are not accepted.");

		assert!(err.to_string().contains("1704067200000"));
	}

	#[test]
	fn metadata_hook_is_a_no_op() {
		let payload = serde_json::json!({"results": []});

		assert!(build_item_metadata(&payload).is_none());
	}
}
