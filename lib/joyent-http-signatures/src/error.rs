use crate::BoxError;
use miette::Diagnostic;
use strum::Display;
use thiserror::Error;

/// Kind of key an operation expected
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq)]
#[strum(serialize_all = "lowercase")]
pub enum KeyKind {
    /// Private key, used for signing
    Private,

    /// Public key, used for verification
    Public,
}

/// Signature error
///
/// A signature that doesn't match is *not* an error, verification reports it as `Ok(false)`.
/// Every variant here means the signature couldn't be evaluated at all.
#[derive(Debug, Diagnostic, Error)]
pub enum Error {
    /// Clock difference between the `Date` header and the local clock couldn't be evaluated
    #[error("Missing or unparsable date header")]
    DateUnparsable(#[source] Option<httpdate::Error>),

    /// Header name was listed more than once
    #[error("Duplicate header \"{0}\" in header list")]
    DuplicateHeader(String),

    /// Key accessor failed to provide the key material
    #[error(transparent)]
    GetKey(BoxError),

    /// Header name rejected by the request mutator
    #[error(transparent)]
    InvalidHeaderName(#[from] http::header::InvalidHeaderName),

    /// Header value rejected by the request mutator
    #[error(transparent)]
    InvalidHeaderValue(#[from] http::header::InvalidHeaderValue),

    /// Key material couldn't be decoded
    #[error(transparent)]
    #[diagnostic(transparent)]
    InvalidKey(#[from] crate::crypto::parse::Error),

    /// HMAC backend rejected the length of the shared secret
    #[error("Invalid HMAC key length")]
    InvalidKeyLength,

    /// Key or extension string contains a character that can't be carried in a quoted parameter
    #[error("Parameter \"{0}\" must not contain a double quote")]
    InvalidParameter(&'static str),

    /// Private key supplied where a public key is required or vice versa
    #[error("Key type mismatch, expected a {expected} key")]
    KeyTypeMismatch {
        /// Kind of key the operation needed
        expected: KeyKind,
    },

    /// `Authorization` header didn't follow the grammar
    #[error(transparent)]
    #[diagnostic(transparent)]
    MalformedHeader(#[from] crate::header::ParseError),

    /// Header listed in the header list is absent or empty on the request
    #[error("Missing header \"{0}\"")]
    MissingHeader(String),

    /// No key material was supplied
    #[error("Missing key")]
    MissingKey,

    /// No key ID was configured
    #[error("Missing key ID")]
    MissingKeyId,

    /// The request line was requested but the accessor doesn't wrap a request
    #[error("Missing request")]
    MissingRequest,

    /// Verification was requested on a context that carries no signature
    #[error("Missing signature")]
    MissingSignature,

    /// RSA backend failed to produce a signature
    #[error(transparent)]
    Signing(#[from] rsa::signature::Error),

    /// Clock difference is at or above the tolerance
    #[error("Clock skew of {diff_seconds}s exceeds the tolerance of {tolerance_seconds}s")]
    SkewExceeded {
        /// Absolute difference between the `Date` header and the local clock
        diff_seconds: u64,

        /// Configured tolerance
        tolerance_seconds: u64,
    },

    /// Builder wasn't fully initialised
    #[error(transparent)]
    UninitializedField(#[from] derive_builder::UninitializedFieldError),

    /// Algorithm isn't one of the six supported tokens
    #[error("Unsupported algorithm \"{0}\"")]
    UnsupportedAlgorithm(String),
}
