use super::{SignatureHeader, SCHEME};
use crate::DATE_HEADER;
use std::fmt::Write;

/// Whether the header list is exactly the default `["date"]`
fn is_default_list<'a, I>(headers: I) -> bool
where
    I: IntoIterator<Item = &'a str>,
{
    let mut headers = headers.into_iter();
    matches!(
        (headers.next(), headers.next()),
        (Some(name), None) if name.eq_ignore_ascii_case(DATE_HEADER)
    )
}

/// Serialise the header into the single-line `Authorization` value
///
/// The `headers` parameter is left out if the list is the default `["date"]`, `ext` is left out if there are no extensions
///
/// Values are written between quotes as they are, so `key_id` and `extensions` must not contain `"`.
/// [`SignatureContext`](crate::SignatureContext) enforces this when it's built.
#[inline]
#[must_use]
pub fn serialise<'a, I>(header: &SignatureHeader<'_, I>) -> String
where
    I: IntoIterator<Item = &'a str> + Clone,
{
    let mut buffer = String::new();

    let _ = write!(
        buffer,
        "{SCHEME} keyId=\"{}\",algorithm=\"{}\"",
        header.key_id, header.algorithm
    );

    if !is_default_list(header.headers.clone()) {
        buffer.push_str(",headers=\"");
        for item in itertools::intersperse(header.headers.clone(), " ") {
            buffer.push_str(&item.to_ascii_lowercase());
        }
        buffer.push('"');
    }

    if let Some(extensions) = header.extensions.filter(|extensions| !extensions.is_empty()) {
        let _ = write!(buffer, ",ext=\"{extensions}\"");
    }

    buffer.push(' ');
    buffer.push_str(header.signature);

    buffer
}
