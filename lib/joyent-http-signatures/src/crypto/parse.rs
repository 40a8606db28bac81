//!
//! Parse RSA keys for use in the signature algorithms
//!
//! The PEM label decides which kind of key the material holds:
//!
//! - `RSA PRIVATE KEY` (PKCS#1) and `PRIVATE KEY` (PKCS#8) are private keys
//! - `RSA PUBLIC KEY` (PKCS#1) and `PUBLIC KEY` (SPKI) are public keys
//!

use crate::KeyKind;
use miette::Diagnostic;
use pkcs8::der::pem;
use rsa::{
    pkcs1::{DecodeRsaPrivateKey, DecodeRsaPublicKey},
    pkcs8::{DecodePrivateKey, DecodePublicKey},
    RsaPrivateKey, RsaPublicKey,
};
use thiserror::Error;

/// Key parsing error
#[derive(Debug, Diagnostic, Error)]
pub enum Error {
    /// Key material isn't UTF-8 text
    #[error(transparent)]
    NotUtf8(#[from] std::str::Utf8Error),

    /// Malformed PEM encapsulation
    #[error("Malformed PEM: {0}")]
    Pem(pem::Error),

    /// Malformed PKCS#1 document
    #[error(transparent)]
    Pkcs1(#[from] rsa::pkcs1::Error),

    /// Malformed PKCS#8 document
    #[error(transparent)]
    Pkcs8(#[from] rsa::pkcs8::Error),

    /// Malformed SPKI document
    #[error(transparent)]
    Spki(#[from] rsa::pkcs8::spki::Error),

    /// PEM label isn't one of the supported RSA key labels
    #[error("Unknown key type \"{0}\"")]
    UnknownKeyType(String),
}

enum Encoding {
    Pkcs1,
    Pkcs8,
}

fn classify(pem: &str) -> Result<(KeyKind, Encoding), Error> {
    let label = pem::decode_label(pem.as_bytes()).map_err(Error::Pem)?;

    let classified = match label {
        "RSA PRIVATE KEY" => (KeyKind::Private, Encoding::Pkcs1),
        "PRIVATE KEY" => (KeyKind::Private, Encoding::Pkcs8),
        "RSA PUBLIC KEY" => (KeyKind::Public, Encoding::Pkcs1),
        "PUBLIC KEY" => (KeyKind::Public, Encoding::Pkcs8),
        other => return Err(Error::UnknownKeyType(other.to_owned())),
    };

    Ok(classified)
}

#[inline]
fn pem_text(key: &[u8]) -> Result<&str, Error> {
    Ok(std::str::from_utf8(key)?.trim())
}

/// Parse an RSA private key from its PKCS#1 or PKCS#8 PEM form
#[inline]
pub fn private_key(key: &[u8]) -> Result<RsaPrivateKey, crate::Error> {
    let pem = pem_text(key)?;
    let private_key = match classify(pem)? {
        (KeyKind::Private, Encoding::Pkcs1) => {
            RsaPrivateKey::from_pkcs1_pem(pem).map_err(Error::from)?
        }
        (KeyKind::Private, Encoding::Pkcs8) => {
            RsaPrivateKey::from_pkcs8_pem(pem).map_err(Error::from)?
        }
        (KeyKind::Public, _) => {
            return Err(crate::Error::KeyTypeMismatch {
                expected: KeyKind::Private,
            })
        }
    };

    Ok(private_key)
}

/// Parse an RSA public key from its PKCS#1 or SPKI PEM form
#[inline]
pub fn public_key(key: &[u8]) -> Result<RsaPublicKey, crate::Error> {
    let pem = pem_text(key)?;
    let public_key = match classify(pem)? {
        (KeyKind::Public, Encoding::Pkcs1) => {
            RsaPublicKey::from_pkcs1_pem(pem).map_err(Error::from)?
        }
        (KeyKind::Public, Encoding::Pkcs8) => {
            RsaPublicKey::from_public_key_pem(pem).map_err(Error::from)?
        }
        (KeyKind::Private, _) => {
            return Err(crate::Error::KeyTypeMismatch {
                expected: KeyKind::Public,
            })
        }
    };

    Ok(public_key)
}
