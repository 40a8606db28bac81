//!
//! `Authorization` header codec
//!
//! ```text
//! Signature keyId="<keyId>",algorithm="<algorithm>"[,headers="<names>"][,ext="<extensions>"] <base64-signature>
//! ```
//!

mod parse;
mod serialise;

pub use self::parse::{parse, ParseError, ParseErrorKind};
pub use self::serialise::serialise;

/// Authentication scheme literal
pub const SCHEME: &str = "Signature";

/// Borrowed view of the fields of an `Authorization` header
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignatureHeader<'a, I = Vec<&'a str>> {
    pub key_id: &'a str,
    pub algorithm: &'a str,
    pub headers: I,
    pub extensions: Option<&'a str>,
    pub signature: &'a str,
}
