//! Provider descriptors and the resource mapping table consumed by fetch flows.

pub mod descriptor;
pub mod resource;

pub use descriptor::*;
pub use resource::*;
