//!
//! Utilities for handling signing strings
//!
//! The signing string is the value of every listed header, in list order, joined with `\n`.
//! Header names are not part of the string.
//!

use crate::{request::HeaderAccessor, Error, ALL_HEADERS, AUTHORIZATION_HEADER, REQUEST_LINE};
use itertools::Itertools;

/// Resolve the `all` token against the request
///
/// If the list contains `all` anywhere, the whole list is replaced by `request-line` (when the accessor wraps a full request)
/// followed by every header name of the request in lexicographic order. The `authorization` header is never included.
///
/// The result depends on the current header set of the request, so it has to be recomputed for every operation.
#[must_use]
pub fn expand<R, S>(request: &R, headers: &[S]) -> Vec<String>
where
    R: HeaderAccessor + ?Sized,
    S: AsRef<str>,
{
    if !headers.iter().any(|name| name.as_ref() == ALL_HEADERS) {
        return headers.iter().map(|name| name.as_ref().to_owned()).collect();
    }

    let request_line = request
        .request_line()
        .is_some()
        .then(|| REQUEST_LINE.to_owned());

    let header_names = request
        .header_names()
        .into_iter()
        .map(|name| name.to_ascii_lowercase())
        .filter(|name| name != AUTHORIZATION_HEADER)
        .sorted()
        .dedup();

    request_line.into_iter().chain(header_names).collect()
}

/// Construct a signing string from the header list and the request
///
/// Fails if any of the listed headers is absent or empty, a partial signing string is never returned.
#[inline]
pub fn construct<R, S>(request: &R, headers: &[S]) -> Result<String, Error>
where
    R: HeaderAccessor + ?Sized,
    S: AsRef<str>,
{
    let mut signing_string = String::new();
    for (idx, name) in headers.iter().enumerate() {
        let name = name.as_ref();
        let value = request
            .resolve(name)?
            .filter(|value| !value.is_empty())
            .ok_or_else(|| Error::MissingHeader(name.to_owned()))?;

        if idx > 0 {
            signing_string.push('\n');
        }
        signing_string.push_str(&value);
    }

    Ok(signing_string)
}
