use criterion::{criterion_group, criterion_main, Criterion};
use joyent_http_signatures::{header, SignatureContext};
use std::hint::black_box;

const DEFAULT_HEADER: &str = r#"Signature keyId="Test",algorithm="rsa-sha256" MDyO5tSvin5FBVdq3gMBTwtVgE8U/JpzSwFvY7gu7Q2tiZ5TvfHzf/RzmRoYwO8PoV1UGaw6IMwWzxDQkcoYOwvG/w4ljQBBoNusO/mYSvKrbqxUmZi8rNtrMcb82MS33bai5IeLnOGl31W1UbL4qE/wL8U9wCPGRJlCFLsTgD8="#;
const ALL_HEADERS_HEADER: &str = r#"Signature keyId="Test",algorithm="rsa-sha256",headers="request-line host date content-type content-md5 content-length",ext="some extension" f0ZGlOC6JkEa5jxOSQxJNnjyUjB5URbAFawVuILTvSRlSny6d1gk0z7L+qevuT3oMojM0Nfkzz5CfbZT2G2OEgvriWyGGVxFlaHdkDAdwJ4kcsakWH7ogBqA3tyo2VWk+777WfYrDZjXmOotEQI+/AD7YNWolmJFO/UCMFcjoI4="#;

fn default_header(c: &mut Criterion) {
    c.bench_function("parse_default_header", |b| {
        b.iter(|| {
            let _ = black_box(header::parse(black_box(DEFAULT_HEADER)));
        });
    });
}

fn all_headers_header(c: &mut Criterion) {
    c.bench_function("parse_all_headers_header", |b| {
        b.iter(|| {
            let _ = black_box(header::parse(black_box(ALL_HEADERS_HEADER)));
        });
    });
}

fn context(c: &mut Criterion) {
    c.bench_function("parse_into_context", |b| {
        b.iter(|| {
            let _ = black_box(SignatureContext::parse(black_box(ALL_HEADERS_HEADER)));
        });
    });
}

criterion_group!(
    parse_authorization_header,
    default_header,
    all_headers_header,
    context
);
criterion_main!(parse_authorization_header);
