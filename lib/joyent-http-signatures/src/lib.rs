//!
//! Joyent HTTP signature scheme
//!
//! Signs and verifies HTTP requests by computing a signature over a canonical, newline-joined
//! list of header values and carrying it in the `Authorization` header:
//!
//! ```text
//! Authorization: Signature keyId="Test",algorithm="rsa-sha256",headers="request-line host date" <base64>
//! ```
//!
//! Supported algorithms are `rsa-sha1`, `rsa-sha256`, `rsa-sha512`, `hmac-sha1`, `hmac-sha256` and `hmac-sha512`.
//!
//! The crate performs no I/O. Requests are accessed through the [`HeaderAccessor`] and [`HeaderMutator`] traits,
//! which are implemented for the [`http`] crate's request types.
//!

pub use self::{
    algorithm::{Algorithm, Family, HashWidth},
    context::{SignatureContext, SignatureContextBuilder},
    error::{Error, KeyKind},
    request::{HeaderAccessor, HeaderMutator},
};

mod algorithm;
mod context;
mod error;

pub mod crypto;
pub mod header;
pub mod padding;
pub mod request;
pub mod signature_string;
pub mod skew;

type BoxError = Box<dyn std::error::Error + Send + Sync>;
type Result<T, E = Error> = std::result::Result<T, E>;

/// Header name the signature is transported in
pub const AUTHORIZATION_HEADER: &str = "authorization";

/// Header the signer fills in and the skew validator reads
pub const DATE_HEADER: &str = "date";

/// Pseudo-header resolving to `<METHOD> <path-and-query> <version>`
pub const REQUEST_LINE: &str = "request-line";

/// Header list token that expands to the request line plus every header of the request
pub const ALL_HEADERS: &str = "all";
