//!
//! Capabilities the signature engine needs from a request
//!
//! The engine never owns the request, it only reads and writes header values through these traits.
//!

use crate::{Error, REQUEST_LINE};
use http::{request::Parts, HeaderMap, HeaderName, HeaderValue, Method, Request, Uri, Version};
use std::borrow::Cow;

/// Read access to the headers of a request
pub trait HeaderAccessor {
    /// Value of the header with the provided (lowercase) name
    ///
    /// A header that appears multiple times yields all of its values joined with `", "`.
    /// Headers whose value isn't valid UTF-8 are reported as absent
    fn header(&self, name: &str) -> Option<Cow<'_, str>>;

    /// Names of all headers present on the request, in lowercase
    fn header_names(&self) -> Vec<String>;

    /// `<METHOD> <path-and-query> <version>`, if this accessor wraps a full request
    fn request_line(&self) -> Option<String> {
        None
    }

    /// Resolve a name from a header list, special-casing the `request-line` pseudo-header
    fn resolve(&self, name: &str) -> Result<Option<Cow<'_, str>>, Error> {
        if name == REQUEST_LINE {
            self.request_line()
                .map(|line| Some(Cow::Owned(line)))
                .ok_or(Error::MissingRequest)
        } else {
            Ok(self.header(name))
        }
    }
}

/// Write access to the headers of a request
pub trait HeaderMutator {
    /// Set the header to the value, replacing any previous values
    fn set_header(&mut self, name: &str, value: &str) -> Result<(), Error>;
}

/// All values of the header joined with `", "`, absent if any of them isn't UTF-8
#[inline]
fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<Cow<'a, str>> {
    let mut values = headers
        .get_all(name)
        .iter()
        .map(|value| value.to_str().ok());

    let mut joined = Cow::Borrowed(values.next()??);
    for value in values {
        let buffer = joined.to_mut();
        buffer.push_str(", ");
        buffer.push_str(value?);
    }

    Some(joined)
}

#[inline]
fn header_names(headers: &HeaderMap) -> Vec<String> {
    headers.keys().map(|name| name.as_str().to_owned()).collect()
}

#[inline]
fn insert_header(headers: &mut HeaderMap, name: &str, value: &str) -> Result<(), Error> {
    let name = HeaderName::from_bytes(name.as_bytes())?;
    let value = HeaderValue::from_str(value)?;
    headers.insert(name, value);

    Ok(())
}

#[inline]
fn request_line(method: &Method, uri: &Uri, version: Version) -> String {
    let path_and_query = uri
        .path_and_query()
        .map_or_else(|| uri.path(), |path_and_query| path_and_query.as_str());

    format!("{} {path_and_query} {version:?}", method.as_str())
}

impl HeaderAccessor for HeaderMap {
    fn header(&self, name: &str) -> Option<Cow<'_, str>> {
        header_value(self, name)
    }

    fn header_names(&self) -> Vec<String> {
        header_names(self)
    }
}

impl HeaderMutator for HeaderMap {
    fn set_header(&mut self, name: &str, value: &str) -> Result<(), Error> {
        insert_header(self, name, value)
    }
}

impl HeaderAccessor for Parts {
    fn header(&self, name: &str) -> Option<Cow<'_, str>> {
        header_value(&self.headers, name)
    }

    fn header_names(&self) -> Vec<String> {
        header_names(&self.headers)
    }

    fn request_line(&self) -> Option<String> {
        Some(request_line(&self.method, &self.uri, self.version))
    }
}

impl HeaderMutator for Parts {
    fn set_header(&mut self, name: &str, value: &str) -> Result<(), Error> {
        insert_header(&mut self.headers, name, value)
    }
}

impl<B> HeaderAccessor for Request<B> {
    fn header(&self, name: &str) -> Option<Cow<'_, str>> {
        header_value(self.headers(), name)
    }

    fn header_names(&self) -> Vec<String> {
        header_names(self.headers())
    }

    fn request_line(&self) -> Option<String> {
        Some(request_line(self.method(), self.uri(), self.version()))
    }
}

impl<B> HeaderMutator for Request<B> {
    fn set_header(&mut self, name: &str, value: &str) -> Result<(), Error> {
        insert_header(self.headers_mut(), name, value)
    }
}
