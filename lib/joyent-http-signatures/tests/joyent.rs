use http::{HeaderMap, HeaderValue, Uri};
use joyent_http_signatures::{
    header::{self, SignatureHeader},
    Algorithm, Error, Family, HeaderAccessor, KeyKind, SignatureContext,
};
use pretty_assertions::assert_eq;
use proptest::{collection::hash_set, option, prop_assert_eq, proptest, sample::select};
use rstest::rstest;


const DEFAULT_SIGNATURE: &str = "MDyO5tSvin5FBVdq3gMBTwtVgE8U/JpzSwFvY7gu7Q2tiZ5TvfHzf/RzmRoYwO8PoV1UGaw6IMwWzxDQkcoYOwvG/w4ljQBBoNusO/mYSvKrbqxUmZi8rNtrMcb82MS33bai5IeLnOGl31W1UbL4qE/wL8U9wCPGRJlCFLsTgD8=";
const ALL_HEADERS_SIGNATURE: &str = "f0ZGlOC6JkEa5jxOSQxJNnjyUjB5URbAFawVuILTvSRlSny6d1gk0z7L+qevuT3oMojM0Nfkzz5CfbZT2G2OEgvriWyGGVxFlaHdkDAdwJ4kcsakWH7ogBqA3tyo2VWk+777WfYrDZjXmOotEQI+/AD7YNWolmJFO/UCMFcjoI4=";
const DATE_ONLY: &[&str] = &["date"];
const REQUEST_LINE_HOST_DATE: &[&str] = &["request-line", "host", "date"];
const ALL_HEADERS: &[&str] = &[
    "request-line",
    "host",
    "date",
    "content-type",
    "content-md5",
    "content-length",
];

fn keys(algorithm: Algorithm) -> (&'static [u8], &'static [u8]) {
    match algorithm.family() {
        Family::Rsa => (
            self::data::PRIVATE_KEY.as_bytes(),
            self::data::PUBLIC_KEY.as_bytes(),
        ),
        Family::Hmac => (self::data::SECRET, self::data::SECRET),
    }
}

fn signer(algorithm: Algorithm, headers: &[&str]) -> SignatureContext {
    SignatureContext::builder()
        .algorithm(algorithm)
        .headers(headers)
        .key_id("Test")
        .build()
        .unwrap()
}

fn authorization(request: &http::Request<()>) -> String {
    request.header("authorization").unwrap().into_owned()
}

#[test]
fn default_signature() {
    let mut request = self::data::get_request();
    let mut context = SignatureContext::builder().key_id("Test").build().unwrap();

    context
        .sign(&mut request, self::data::PRIVATE_KEY.as_bytes())
        .unwrap();

    assert_eq!(context.signing_string(), Some(self::data::DATE));
    assert_eq!(context.signature(), Some(DEFAULT_SIGNATURE));
    assert_eq!(
        authorization(&request),
        format!(r#"Signature keyId="Test",algorithm="rsa-sha256" {DEFAULT_SIGNATURE}"#)
    );
}

#[test]
fn all_headers_signature() {
    let mut request = self::data::get_request();
    let mut context = signer(Algorithm::RSA_SHA256, ALL_HEADERS);

    context
        .sign(&mut request, self::data::PRIVATE_KEY.as_bytes())
        .unwrap();

    assert_eq!(context.signature(), Some(ALL_HEADERS_SIGNATURE));
    assert_eq!(
        authorization(&request),
        format!(
            r#"Signature keyId="Test",algorithm="rsa-sha256",headers="request-line host date content-type content-md5 content-length" {ALL_HEADERS_SIGNATURE}"#
        )
    );
}

#[rstest]
#[case(Algorithm::RSA_SHA1, "rJQWLv3lcuuSP3J8G0kaLwm6hVO59Xt5OwnSCJL2aAzlLyq7/MuUYO8gh8Yp6H6kDAyV4nMotTEQ9iyCnpiFXlerbhDdklJkm7PHr+yTDeng6s++JdQMO5vhB4CMvgDH8NhQr4LyhOpawkhpk0McKbg8HABlYoQ9fXJ9PUuipZU=")]
#[case(Algorithm::RSA_SHA256, DEFAULT_SIGNATURE)]
#[case(Algorithm::RSA_SHA512, "sHZDiBeNyLn9Ew1OtE/fDbzP354j1y16xqlVOn2U+Y/Ea6VrlNeiZ0/eAi7vPktnJ4+MGwIvl8i7F2CfgIPfEFSOfoI5GHOaBjaOhTuxoyEEW6s8Vn7EIoCt42glHStXWRWnlh/J2ZZiCTUoNbmDPaVhtpt7bEu2T9YAW4QuhiU=")]
#[case(Algorithm::HMAC_SHA1, "RANr5YX98RY6VewGPWLATTb5Do8=")]
fn known_answers(#[case] algorithm: Algorithm, #[case] expected: &str) {
    let mut request = self::data::get_request();
    let mut context = signer(algorithm, DATE_ONLY);

    context.sign(&mut request, keys(algorithm).0).unwrap();
    assert_eq!(context.signature(), Some(expected));
}

#[rstest]
fn sign_verify_roundtrip(
    #[values(
        Algorithm::RSA_SHA1,
        Algorithm::RSA_SHA256,
        Algorithm::RSA_SHA512,
        Algorithm::HMAC_SHA1,
        Algorithm::HMAC_SHA256,
        Algorithm::HMAC_SHA512
    )]
    algorithm: Algorithm,
    #[values(DATE_ONLY, REQUEST_LINE_HOST_DATE, ALL_HEADERS)] headers: &[&str],
) {
    let (signing_key, verifying_key) = keys(algorithm);

    let mut request = self::data::get_request();
    signer(algorithm, headers)
        .sign(&mut request, signing_key)
        .unwrap();

    let mut verifier = SignatureContext::from_request(&request, 0).unwrap();
    assert_eq!(verifier.algorithm(), algorithm);
    assert_eq!(verifier.headers(), headers);
    assert!(verifier.verify(&request, verifying_key).unwrap());

    request
        .headers_mut()
        .insert("date", HeaderValue::from_static("Fri, 06 Jan 2012 21:31:40 GMT"));
    assert!(!verifier.verify(&request, verifying_key).unwrap());
}

#[test]
fn tampered_request_line() {
    let mut request = self::data::get_request();
    signer(Algorithm::HMAC_SHA256, &["request-line", "date"])
        .sign(&mut request, self::data::SECRET)
        .unwrap();

    let mut verifier = SignatureContext::parse(&authorization(&request)).unwrap();
    assert!(verifier.verify(&request, self::data::SECRET).unwrap());

    *request.uri_mut() = Uri::from_static("/foo?param=value&pet=cat");
    assert!(!verifier.verify(&request, self::data::SECRET).unwrap());
}

#[test]
fn appended_header_values_are_covered() {
    let mut request = self::data::get_request();
    signer(Algorithm::HMAC_SHA256, &["host", "date", "content-length"])
        .sign(&mut request, self::data::SECRET)
        .unwrap();

    let mut verifier = SignatureContext::parse(&authorization(&request)).unwrap();
    assert!(verifier.verify(&request, self::data::SECRET).unwrap());

    let mut appended = request.clone();
    appended
        .headers_mut()
        .append("content-length", HeaderValue::from_static("9999"));
    assert!(!verifier.verify(&appended, self::data::SECRET).unwrap());
    assert_eq!(
        verifier.signing_string(),
        Some("example.com\nThu, 05 Jan 2012 21:31:40 GMT\n18, 9999")
    );

    let mut appended = request;
    appended
        .headers_mut()
        .append("host", HeaderValue::from_static("evil.example"));
    assert!(!verifier.verify(&appended, self::data::SECRET).unwrap());
}

#[test]
fn unsigned_header_is_not_covered() {
    let mut request = self::data::get_request();
    signer(Algorithm::HMAC_SHA1, &["date"])
        .sign(&mut request, self::data::SECRET)
        .unwrap();

    request
        .headers_mut()
        .insert("host", HeaderValue::from_static("example.org"));

    let mut verifier = SignatureContext::parse(&authorization(&request)).unwrap();
    assert!(verifier.verify(&request, self::data::SECRET).unwrap());
}

#[test]
fn all_is_expanded_before_transmission() {
    let mut request = self::data::get_request();
    signer(Algorithm::RSA_SHA512, &["all"])
        .sign(&mut request, self::data::PRIVATE_KEY.as_bytes())
        .unwrap();

    let authorization = authorization(&request);
    assert!(authorization.contains(
        r#"headers="request-line content-length content-md5 content-type date host""#
    ));

    let mut verifier = SignatureContext::parse(&authorization).unwrap();
    assert!(verifier
        .verify(&request, self::data::PUBLIC_KEY.as_bytes())
        .unwrap());
    assert_eq!(
        verifier.signing_string(),
        Some("POST /foo?param=value&pet=dog HTTP/1.1\n18\nSd/dVLAcvNLSq16eXua5uQ==\napplication/json\nThu, 05 Jan 2012 21:31:40 GMT\nexample.com")
    );
}

#[test]
fn request_line_needs_a_request() {
    let mut headers = HeaderMap::new();
    headers.insert("date", HeaderValue::from_static(self::data::DATE));

    let err = signer(Algorithm::HMAC_SHA256, &["request-line", "date"])
        .sign(&mut headers, self::data::SECRET)
        .unwrap_err();
    assert!(matches!(err, Error::MissingRequest));
    assert!(headers.get("authorization").is_none());
}

#[test]
fn parse_default_headers() {
    let context = SignatureContext::parse(&format!(
        r#"Signature keyId="Test",algorithm="rsa-sha256" {DEFAULT_SIGNATURE}"#
    ))
    .unwrap();

    assert_eq!(context.key_id(), Some("Test"));
    assert_eq!(context.algorithm(), Algorithm::RSA_SHA256);
    assert_eq!(context.headers(), ["date"]);
    assert_eq!(context.extensions(), None);
    assert_eq!(context.signature(), Some(DEFAULT_SIGNATURE));
    assert_eq!(context.signing_string(), None);
}

#[test]
fn parse_duplicate_headers() {
    let err = SignatureContext::parse(
        r#"Signature keyId="Test",algorithm="rsa-sha256",headers="host date Host" AAAA"#,
    )
    .unwrap_err();

    assert!(matches!(err, Error::DuplicateHeader(ref name) if name == "host"));
}

#[test]
fn parse_unsupported_algorithm() {
    let err = SignatureContext::parse(r#"Signature keyId="Test",algorithm="hs2019" AAAA"#)
        .unwrap_err();

    assert!(matches!(err, Error::UnsupportedAlgorithm(ref token) if token == "hs2019"));
}

#[test]
fn parse_malformed() {
    let err = SignatureContext::parse(r#"Bearer keyId="Test",algorithm="rsa-sha256" AAAA"#)
        .unwrap_err();

    assert!(matches!(err, Error::MalformedHeader(..)));
}

#[test]
fn skew() {
    let mut request = self::data::get_request();
    SignatureContext::builder()
        .key_id("Test")
        .build()
        .unwrap()
        .sign(&mut request, self::data::PRIVATE_KEY.as_bytes())
        .unwrap();

    let err = SignatureContext::from_request(&request, 300).unwrap_err();
    assert!(matches!(
        err,
        Error::SkewExceeded {
            tolerance_seconds: 300,
            ..
        }
    ));

    let mut context = SignatureContext::from_request(&request, 0).unwrap();
    assert_eq!(context.skew_tolerance(), 0);
    assert!(context
        .verify(&request, self::data::PUBLIC_KEY.as_bytes())
        .unwrap());

    assert!(SignatureContext::from_request_at(&request, 300, self::data::date()).is_ok());
}

#[test]
fn skew_needs_a_date() {
    let mut request = self::data::get_request();
    signer(Algorithm::HMAC_SHA256, &["host"])
        .sign(&mut request, self::data::SECRET)
        .unwrap();
    request.headers_mut().remove("date");

    let err = SignatureContext::from_request(&request, 0).unwrap_err();
    assert!(matches!(err, Error::DateUnparsable(None)));
}

#[test]
fn key_type_mismatch() {
    let mut request = self::data::get_request();
    let mut context = signer(Algorithm::RSA_SHA256, &["date"]);
    context
        .sign(&mut request, self::data::PRIVATE_KEY.as_bytes())
        .unwrap();

    let err = context
        .verify(&request, self::data::PRIVATE_KEY.as_bytes())
        .unwrap_err();
    assert!(matches!(
        err,
        Error::KeyTypeMismatch {
            expected: KeyKind::Public
        }
    ));
}

#[test]
fn verify_with_key_lookup() {
    let mut request = self::data::get_request();
    signer(Algorithm::RSA_SHA1, ALL_HEADERS)
        .sign(&mut request, self::data::PRIVATE_KEY.as_bytes())
        .unwrap();

    let mut verifier = SignatureContext::from_request(&request, 0).unwrap();
    let is_valid = verifier
        .verify_with(&request, |key_id| match key_id {
            "Test" => Ok(self::data::PUBLIC_KEY),
            other => Err(format!("unknown key {other}")),
        })
        .unwrap();

    assert!(is_valid);
}

proptest! {
    #[test]
    fn header_roundtrip(
        algorithm in select(Algorithm::ALL.to_vec()),
        key_id in "[A-Za-z0-9 ,=/+]{1,16}",
        headers in hash_set("[a-z][a-z0-9-]{0,10}", 1..6),
        extensions in option::of("[a-z0-9=,; ]{1,16}"),
    ) {
        let algorithm = algorithm.to_string();
        let headers: Vec<&str> = headers.iter().map(String::as_str).collect();
        let serialised = header::serialise(&SignatureHeader {
            key_id: &key_id,
            algorithm: &algorithm,
            headers: headers.iter().copied(),
            extensions: extensions.as_deref(),
            signature: "AAAA",
        });

        let context = SignatureContext::parse(&serialised).unwrap();
        prop_assert_eq!(context.key_id(), Some(key_id.as_str()));
        prop_assert_eq!(context.algorithm().to_string(), algorithm);
        prop_assert_eq!(context.headers(), headers.as_slice());
        prop_assert_eq!(context.extensions(), extensions.as_deref());
        prop_assert_eq!(context.authorization_header().unwrap(), serialised);
    }
}
