//! DigitalOcean OAuth 2.0 provider plug-in: endpoint descriptor, typed access-token and
//! account adapters wired into the `oauth2` client stack.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod descriptor;
pub mod error;
pub mod http;
pub mod oauth;
pub mod obs;
pub mod owner;
pub mod provider;
pub mod response;
pub mod token;

mod _prelude {
	pub use std::{
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
	};

	pub use parking_lot::Mutex;
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use serde_json::{Map, Value};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {httpmock as _, tokio as _};
