use crate::{
    crypto,
    header::{self, SignatureHeader},
    request::{HeaderAccessor, HeaderMutator},
    signature_string, skew, Algorithm, BoxError, Error, Result, AUTHORIZATION_HEADER, DATE_HEADER,
};
use derive_builder::Builder;
use itertools::Itertools;
use std::time::SystemTime;
use tracing::{debug, instrument};

/// Configuration and state of a single sign or verify operation
///
/// A context is either built through [`SignatureContextBuilder`] (signer side) or parsed from an
/// `Authorization` header (verifier side). It never owns the request, the request is only borrowed for the
/// duration of [`sign`](Self::sign) or [`verify`](Self::verify).
///
/// Operations store the signing string and the signature on the context, so one context shouldn't be shared
/// between concurrent operations.
#[derive(Builder, Clone, Debug, PartialEq, Eq)]
#[builder(build_fn(validate = "Self::validate", error = "Error"))]
pub struct SignatureContext {
    /// Signature algorithm
    ///
    /// Default: `rsa-sha256`
    #[builder(default)]
    algorithm: Algorithm,

    /// Ordered list of lowercase header names covered by the signature
    ///
    /// Default: `["date"]`
    #[builder(default = "vec![DATE_HEADER.to_owned()]", setter(custom))]
    headers: Vec<String>,

    /// Opaque identifier of the key, required for signing
    #[builder(default, setter(into, strip_option))]
    key_id: Option<String>,

    /// Opaque extension string, transmitted as `ext`
    #[builder(default, setter(into, strip_option))]
    extensions: Option<String>,

    /// Accepted clock skew in seconds, `0` disables the comparison
    ///
    /// Default: 300
    #[builder(default = "skew::DEFAULT_TOLERANCE_SECONDS")]
    skew_tolerance: u64,

    #[builder(setter(skip))]
    signature: Option<String>,

    #[builder(setter(skip))]
    signing_string: Option<String>,
}

impl SignatureContextBuilder {
    /// Set the header list
    ///
    /// Names are ASCII-lowercased. An empty list falls back to `["date"]`.
    pub fn headers<I, S>(&mut self, headers: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let headers: Vec<String> = headers
            .into_iter()
            .map(|name| name.as_ref().to_ascii_lowercase())
            .collect();

        self.headers = (!headers.is_empty()).then_some(headers);
        self
    }

    fn validate(&self) -> Result<()> {
        let quoted = [("keyId", &self.key_id), ("ext", &self.extensions)];
        for (name, value) in quoted {
            if value.iter().flatten().any(|value| value.contains('"')) {
                return Err(Error::InvalidParameter(name));
            }
        }

        let duplicate = self
            .headers
            .iter()
            .flatten()
            .sorted()
            .tuple_windows()
            .find(|(previous, current)| previous == current);

        if let Some((name, _)) = duplicate {
            return Err(Error::DuplicateHeader(name.clone()));
        }

        Ok(())
    }
}

impl SignatureContext {
    #[must_use]
    pub fn builder() -> SignatureContextBuilder {
        SignatureContextBuilder::default()
    }

    /// Parse an `Authorization` header value into a context
    ///
    /// The signing string isn't computed here, it's derived from the request during [`verify`](Self::verify)
    pub fn parse(authorization: &str) -> Result<Self> {
        header::parse(authorization)?.try_into()
    }

    /// Read the `Authorization` header off the request, parse it and check the clock skew of its `Date` header
    #[instrument(skip_all)]
    pub fn from_request<R>(request: &R, skew_tolerance: u64) -> Result<Self>
    where
        R: HeaderAccessor + ?Sized,
    {
        Self::from_request_at(request, skew_tolerance, SystemTime::now())
    }

    /// Same as [`from_request`](Self::from_request) but checks the skew against the provided time
    pub fn from_request_at<R>(request: &R, skew_tolerance: u64, now: SystemTime) -> Result<Self>
    where
        R: HeaderAccessor + ?Sized,
    {
        let authorization = request
            .header(AUTHORIZATION_HEADER)
            .ok_or_else(|| Error::MissingHeader(AUTHORIZATION_HEADER.into()))?;

        let mut context = Self::parse(&authorization)?;
        context.skew_tolerance = skew_tolerance;

        skew::validate(now, request.header(DATE_HEADER).as_deref(), skew_tolerance)
            .inspect_err(|error| debug!(%error, "rejecting request"))?;

        Ok(context)
    }

    #[must_use]
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    #[must_use]
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    #[must_use]
    pub fn key_id(&self) -> Option<&str> {
        self.key_id.as_deref()
    }

    #[must_use]
    pub fn extensions(&self) -> Option<&str> {
        self.extensions.as_deref()
    }

    #[must_use]
    pub fn skew_tolerance(&self) -> u64 {
        self.skew_tolerance
    }

    /// Base64 signature, either parsed or produced by the last [`sign`](Self::sign) call
    #[must_use]
    pub fn signature(&self) -> Option<&str> {
        self.signature.as_deref()
    }

    /// Signing string of the last operation
    #[must_use]
    pub fn signing_string(&self) -> Option<&str> {
        self.signing_string.as_deref()
    }

    /// Derive the signing string for the request and store it on the context
    pub fn build_signing_string<R>(&mut self, request: &R) -> Result<&str>
    where
        R: HeaderAccessor + ?Sized,
    {
        let headers = signature_string::expand(request, &self.headers);
        let signing_string = signature_string::construct(request, &headers)?;

        Ok(self.signing_string.insert(signing_string))
    }

    /// Serialise the context into an `Authorization` header value
    pub fn authorization_header(&self) -> Result<String> {
        let key_id = self.key_id.as_deref().ok_or(Error::MissingKeyId)?;
        let signature = self.signature.as_deref().ok_or(Error::MissingSignature)?;
        let algorithm = self.algorithm.to_string();

        Ok(header::serialise(&SignatureHeader {
            key_id,
            algorithm: &algorithm,
            headers: self.headers.iter().map(String::as_str),
            extensions: self.extensions.as_deref(),
            signature,
        }))
    }

    /// Sign the request and set its `Authorization` header
    ///
    /// Fills in the `Date` header with the current time if the request doesn't have one.
    /// If the header list contains `all`, the expanded list is what gets transmitted.
    ///
    /// On failure the `Authorization` header is left untouched.
    #[instrument(skip_all)]
    pub fn sign<R>(&mut self, request: &mut R, key: &[u8]) -> Result<()>
    where
        R: HeaderAccessor + HeaderMutator + ?Sized,
    {
        let key_id = self.key_id.as_deref().ok_or(Error::MissingKeyId)?;
        if key.is_empty() {
            return Err(Error::MissingKey);
        }

        if request.header(DATE_HEADER).is_none() {
            debug!("request has no date header, using the current time");
            request.set_header(DATE_HEADER, &httpdate::fmt_http_date(SystemTime::now()))?;
        }

        let headers = signature_string::expand(&*request, &self.headers);
        let signing_string = signature_string::construct(&*request, &headers)?;
        let signature = crypto::sign(self.algorithm, signing_string.as_bytes(), key)?;

        let algorithm = self.algorithm.to_string();
        let authorization = header::serialise(&SignatureHeader {
            key_id,
            algorithm: &algorithm,
            headers: headers.iter().map(String::as_str),
            extensions: self.extensions.as_deref(),
            signature: &signature,
        });
        request.set_header(AUTHORIZATION_HEADER, &authorization)?;

        self.signing_string = Some(signing_string);
        self.signature = Some(signature);

        Ok(())
    }

    /// Verify the parsed signature against the request
    ///
    /// A signature that doesn't match yields `Ok(false)`, errors are reserved for signatures that can't be evaluated
    #[instrument(skip_all)]
    pub fn verify<R>(&mut self, request: &R, key: &[u8]) -> Result<bool>
    where
        R: HeaderAccessor + ?Sized,
    {
        let signature = self.signature.as_deref().ok_or(Error::MissingSignature)?;

        let headers = signature_string::expand(request, &self.headers);
        let signing_string = signature_string::construct(request, &headers)?;
        let is_valid = crypto::verify(self.algorithm, signing_string.as_bytes(), key, signature)?;

        if !is_valid {
            debug!(key_id = ?self.key_id, "signature mismatch");
        }

        self.signing_string = Some(signing_string);
        Ok(is_valid)
    }

    /// Resolve the key through the key ID and verify the signature against the request
    #[instrument(skip_all)]
    pub fn verify_with<R, F, K, E>(&mut self, request: &R, get_key: F) -> Result<bool>
    where
        R: HeaderAccessor + ?Sized,
        F: FnOnce(&str) -> Result<K, E>,
        K: AsRef<[u8]>,
        E: Into<BoxError>,
    {
        let key_id = self.key_id.as_deref().ok_or(Error::MissingKeyId)?;
        let key = get_key(key_id).map_err(|err| Error::GetKey(err.into()))?;

        self.verify(request, key.as_ref())
    }
}

impl TryFrom<SignatureHeader<'_>> for SignatureContext {
    type Error = Error;

    fn try_from(header: SignatureHeader<'_>) -> Result<Self> {
        let mut builder = Self::builder();
        builder
            .algorithm(header.algorithm.parse()?)
            .headers(header.headers)
            .key_id(header.key_id);

        if let Some(extensions) = header.extensions {
            builder.extensions(extensions);
        }

        let mut context = builder.build()?;
        context.signature = Some(header.signature.to_owned());

        Ok(context)
    }
}
