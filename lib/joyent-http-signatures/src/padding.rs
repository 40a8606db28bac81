//!
//! Base64 padding normalisation
//!
//! Some peers emit HMAC signatures without the trailing `=` characters.
//! Both sides of an HMAC comparison get normalised with [`pad`] so these still compare equal.
//!

use std::borrow::Cow;

/// Append `=` until the length of the Base64 string is a multiple of four
#[inline]
#[must_use]
pub fn pad(encoded: &str) -> Cow<'_, str> {
    match encoded.len() % 4 {
        0 => Cow::Borrowed(encoded),
        remainder => {
            let mut padded = String::with_capacity(encoded.len() + 4 - remainder);
            padded.push_str(encoded);
            padded.extend(std::iter::repeat('=').take(4 - remainder));
            Cow::Owned(padded)
        }
    }
}
