//! Identifier, state, and credential primitives shared across connector flows.

pub mod credential;
pub mod id;
pub mod secret;
pub mod state;

pub use credential::*;
pub use id::*;
pub use secret::*;
pub use state::*;
