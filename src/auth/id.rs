//! Strongly typed identifiers enforced across the connector domain.
//!
//! Colons are rejected alongside whitespace because the `state` token and the store keys both
//! embed identifiers in colon-delimited composites; a colon inside a user or organization
//! identifier would make those composites ambiguous.

// std
use std::{borrow::Borrow, ops::Deref};
// self
use crate::_prelude::*;

macro_rules! def_id {
	($name:ident, $doc:literal, $kind:literal) => {
		#[doc = $doc]
		#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
		#[serde(try_from = "String", into = "String")]
		pub struct $name(String);
		impl $name {
			/// Creates a new identifier after validation.
			pub fn new(value: impl AsRef<str>) -> Result<Self, IdentifierError> {
				let view = value.as_ref();

				validate_view($kind, view)?;

				Ok(Self(view.to_owned()))
			}
		}
		impl Deref for $name {
			type Target = str;

			fn deref(&self) -> &Self::Target {
				&self.0
			}
		}
		impl AsRef<str> for $name {
			fn as_ref(&self) -> &str {
				&self.0
			}
		}
		impl From<$name> for String {
			fn from(value: $name) -> Self {
				value.0
			}
		}
		impl TryFrom<String> for $name {
			type Error = IdentifierError;

			fn try_from(value: String) -> Result<Self, Self::Error> {
				validate_view($kind, &value)?;

				Ok(Self(value))
			}
		}
		impl Borrow<str> for $name {
			fn borrow(&self) -> &str {
				&self.0
			}
		}
		impl Debug for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				write!(f, concat!($kind, "({})"), self.0)
			}
		}
		impl Display for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				f.write_str(&self.0)
			}
		}
		impl FromStr for $name {
			type Err = IdentifierError;

			fn from_str(s: &str) -> Result<Self, Self::Err> {
				Self::new(s)
			}
		}
	};
}

const IDENTIFIER_MAX_LEN: usize = 128;

/// Error returned when identifier validation fails.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ThisError)]
pub enum IdentifierError {
	/// The identifier was empty.
	#[error("{kind} identifier cannot be empty.")]
	Empty {
		/// Kind of identifier (user, org, provider).
		kind: &'static str,
	},
	/// The identifier contains whitespace characters.
	#[error("{kind} identifier contains whitespace.")]
	ContainsWhitespace {
		/// Kind of identifier (user, org, provider).
		kind: &'static str,
	},
	/// The identifier contains a colon, which would corrupt composite keys.
	#[error("{kind} identifier contains a colon.")]
	ContainsColon {
		/// Kind of identifier (user, org, provider).
		kind: &'static str,
	},
	/// The identifier exceeded the allowed character count.
	#[error("{kind} identifier exceeds {max} characters.")]
	TooLong {
		/// Kind of identifier (user, org, provider).
		kind: &'static str,
		/// Maximum permitted character count.
		max: usize,
	},
}

def_id! { UserId, "Unique identifier for an application user.", "User" }
def_id! { OrgId, "Unique identifier for a user's organization.", "Org" }
def_id! { ProviderId, "Identifier for a CRM provider descriptor.", "Provider" }

fn validate_view(kind: &'static str, view: &str) -> Result<(), IdentifierError> {
	if view.is_empty() {
		return Err(IdentifierError::Empty { kind });
	}
	if view.chars().any(char::is_whitespace) {
		return Err(IdentifierError::ContainsWhitespace { kind });
	}
	if view.contains(':') {
		return Err(IdentifierError::ContainsColon { kind });
	}
	if view.len() > IDENTIFIER_MAX_LEN {
		return Err(IdentifierError::TooLong { kind, max: IDENTIFIER_MAX_LEN });
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn identifiers_reject_whitespace_and_colons() {
		assert!(UserId::new(" user-1").is_err(), "Leading whitespace must be rejected.");
		assert!(UserId::new("user-1 ").is_err(), "Trailing whitespace must be rejected.");
		assert!(UserId::new("user:1").is_err(), "Colons must be rejected.");
		assert!(OrgId::new("").is_err());
		assert!(ProviderId::new("hub spot").is_err());

		let user = UserId::new("user-1").expect("User fixture should be considered valid.");

		assert_eq!(user.as_ref(), "user-1");
	}

	#[test]
	fn serde_round_trip_enforces_validation() {
		let payload = "\"org-42\"";
		let org: OrgId = serde_json::from_str(payload).expect("Org should deserialize.");

		assert_eq!(org.as_ref(), "org-42");
		assert!(serde_json::from_str::<OrgId>("\"org:42\"").is_err());
		assert!(serde_json::from_str::<OrgId>("\" org-42\"").is_err());
	}

	#[test]
	fn length_limit_is_enforced() {
		let exact = "a".repeat(IDENTIFIER_MAX_LEN);

		UserId::new(&exact).expect("Exact length should succeed.");

		let too_long = "a".repeat(IDENTIFIER_MAX_LEN + 1);

		assert!(UserId::new(&too_long).is_err());
	}

	#[test]
	fn borrow_supports_fast_lookup() {
		let map: HashMap<UserId, u8> = HashMap::from_iter([(
			UserId::new("user-1").expect("User used for lookup should be valid."),
			7_u8,
		)]);

		assert_eq!(map.get("user-1"), Some(&7));
	}
}
