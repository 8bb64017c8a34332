//! OAuth 2.0 CRM connector - authorization-code flows, per-tenant credential storage,
//! refresh-on-401 retries, and normalized record fetching in one crate.
//!
//! The connector composes four request-driven stages as a linear pipeline:
//!
//! 1. [`Connector::begin_authorization`](flows::Connector::begin_authorization) builds the
//!    provider's consent URL and records a pending-authorization marker.
//! 2. [`Connector::handle_callback`](flows::Connector::handle_callback) validates the returned
//!    `code`/`state` pair, exchanges the code, and persists the credential bundle.
//! 3. [`Connector::get_credentials`](flows::Connector::get_credentials) and
//!    [`Connector::refresh_access_token`](flows::Connector::refresh_access_token) read and renew
//!    stored credentials.
//! 4. [`Connector::fetch_items`](flows::Connector::fetch_items) pulls the configured CRM
//!    collections and maps each record into an [`IntegrationItem`](item::IntegrationItem).
//!
//! Persistence goes through the [`store::ConnectorStore`] key-value contract; the web routing
//! layer that mounts these operations is out of scope.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod config;
pub mod error;
pub mod flows;
pub mod http;
pub mod item;
pub mod obs;
pub mod provider;
pub mod store;

mod _prelude {
	pub use std::{
		collections::HashMap,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	pub use parking_lot::RwLock;
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use reqwest;
pub use url;
#[cfg(test)] use httpmock as _;
