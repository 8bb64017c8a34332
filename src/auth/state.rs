//! State tokens correlating an authorization request with its callback.

// self
use crate::{
	_prelude::*,
	auth::{IdentifierError, OrgId, UserId},
};

/// Error returned when a returned `state` value cannot be decomposed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ThisError)]
pub enum StateTokenError {
	/// The value contains no colon separator.
	#[error("State is missing the `:` separator.")]
	MissingSeparator,
	/// One of the composite parts failed identifier validation.
	#[error(transparent)]
	Identifier(#[from] IdentifierError),
}

/// Opaque `user:org` composite that round-trips through the provider redirect.
///
/// The token is deterministic by design: the callback recovers the owning (user, organization)
/// pair by splitting on the first colon, so no server-side session lookup is needed beyond the
/// pending-authorization marker.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StateToken {
	user: UserId,
	org: OrgId,
}
impl StateToken {
	/// Builds the state token for a (user, organization) pair.
	pub fn new(user: UserId, org: OrgId) -> Self {
		Self { user, org }
	}

	/// Recovers the composite from a returned `state` value, splitting on the first colon.
	pub fn parse(raw: &str) -> Result<Self, StateTokenError> {
		let (user, org) = raw.split_once(':').ok_or(StateTokenError::MissingSeparator)?;

		Ok(Self { user: UserId::new(user)?, org: OrgId::new(org)? })
	}

	/// User component of the composite.
	pub fn user(&self) -> &UserId {
		&self.user
	}

	/// Organization component of the composite.
	pub fn org(&self) -> &OrgId {
		&self.org
	}
}
impl Display for StateToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "{}:{}", self.user, self.org)
	}
}
