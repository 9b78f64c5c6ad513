//! Error types shared across the descriptor, adapters, and provider calls.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Response payload did not match the shape DigitalOcean documents.
	#[error(transparent)]
	MalformedResponse(#[from] MalformedResponseError),
	/// DigitalOcean signaled a failure (error body or non-2xx status).
	#[error(transparent)]
	IdentityProvider(#[from] IdentityProviderError),
	/// Transport failure (DNS, TCP, TLS).
	#[error(transparent)]
	Transport(#[from] TransportError),
}

/// Configuration and validation failures.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// Descriptor contains an endpoint that cannot be parsed as a URL.
	#[error("Descriptor contains an invalid {endpoint} endpoint.")]
	InvalidEndpoint {
		/// Which endpoint failed to parse.
		endpoint: &'static str,
		/// Underlying parsing failure.
		#[source]
		source: oauth2::url::ParseError,
	},
	/// Redirect URI cannot be parsed.
	#[error("Redirect URI is invalid.")]
	InvalidRedirect {
		/// Underlying parsing failure.
		#[source]
		source: oauth2::url::ParseError,
	},
	/// HTTP request construction failed.
	#[error(transparent)]
	HttpRequest(#[from] oauth2::http::Error),
	/// Token refresh was requested without a stored refresh token.
	#[error("Access token is missing a refresh token.")]
	MissingRefreshToken,
}

/// Failures raised eagerly while adapting DigitalOcean response payloads.
#[derive(Debug, ThisError)]
pub enum MalformedResponseError {
	/// Response body could not be parsed as JSON.
	#[error("The {endpoint} response contains malformed JSON.")]
	Json {
		/// Endpoint label for diagnostics (`token` or `account`).
		endpoint: &'static str,
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
	/// Response body parsed, but the top level is not a JSON object.
	#[error("The {endpoint} response is not a JSON object.")]
	NotAnObject {
		/// Endpoint label for diagnostics (`token` or `account`).
		endpoint: &'static str,
	},
	/// Account response omitted the `account` object.
	#[error("The account response is missing the `account` object.")]
	MissingAccount,
	/// Token response omitted a usable `access_token` string.
	#[error("The token response is missing a usable `access_token`.")]
	MissingAccessToken,
	/// Token response carried a non-numeric or out-of-range expiry.
	#[error("The token response expiry is not a usable integer.")]
	ExpiresInOutOfRange,
}

/// Failure signaled by DigitalOcean itself: an `error` field in the body or a
/// non-2xx HTTP status. Raised before any adapter is constructed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
#[error("DigitalOcean rejected the request: {message}.")]
pub struct IdentityProviderError {
	/// Provider-supplied error message, or an HTTP status summary.
	pub message: String,
	/// HTTP status code, when available.
	pub status: Option<u16>,
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling DigitalOcean.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling DigitalOcean.")]
	Io(#[from] std::io::Error),
	/// HTTP client failed without a structured error value.
	#[error("HTTP client error occurred while calling DigitalOcean: {message}.")]
	Other {
		/// Transport-supplied failure summary.
		message: String,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}
