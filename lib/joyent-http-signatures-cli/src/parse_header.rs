use crate::util::{error_kaomoji, field, success_kaomoji};
use joyent_http_signatures::{header, SignatureContext};

pub fn do_it(header: String) -> miette::Result<()> {
    let parsed = match header::parse(&header) {
        Ok(parsed) => parsed,
        Err(err) => {
            eprintln!("❌ Header is malformed {}", error_kaomoji());
            return Err(miette::Error::new(err).with_source_code(header.clone()));
        }
    };

    let context = SignatureContext::try_from(parsed).map_err(|err| {
        eprintln!("❌ Header is invalid {}", error_kaomoji());
        miette::Error::new(err)
    })?;

    println!("✅ Header is valid! {}", success_kaomoji());
    println!();
    println!("{} {}", field("key id"), context.key_id().unwrap_or_default());
    println!("{} {}", field("algorithm"), context.algorithm());
    println!("{} {}", field("headers"), context.headers().join(" "));
    if let Some(extensions) = context.extensions() {
        println!("{} {extensions}", field("extensions"));
    }
    println!(
        "{} {}",
        field("signature"),
        context.signature().unwrap_or_default()
    );

    Ok(())
}
