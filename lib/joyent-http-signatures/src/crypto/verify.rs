use crate::{padding, Algorithm, Error, Family, HashWidth};
use const_oid::AssociatedOid;
use rsa::{pkcs1v15, signature::Verifier, RsaPublicKey};
use sha1::Sha1;
use sha2::{Digest, Sha256, Sha512};
use subtle::ConstantTimeEq;
use tracing::debug;

#[inline]
fn rsa_verify<D>(key: RsaPublicKey, msg: &[u8], signature: &[u8]) -> bool
where
    D: Digest + AssociatedOid,
{
    let Ok(signature) = pkcs1v15::Signature::try_from(signature) else {
        return false;
    };

    pkcs1v15::VerifyingKey::<D>::new(key)
        .verify(msg, &signature)
        .is_ok()
}

/// Verify that the message corresponds with the Base64-encoded signature using the provided key
///
/// - RSA algorithms expect a PEM-encoded public key
/// - HMAC algorithms expect the raw shared secret
///
/// Returns `Ok(false)` if the signature doesn't match (including signatures that aren't valid Base64).
/// Errors are reserved for situations in which the signature couldn't be evaluated.
#[inline]
pub fn verify(
    algorithm: Algorithm,
    msg: &[u8],
    key: &[u8],
    encoded_signature: &str,
) -> Result<bool, Error> {
    if key.is_empty() {
        return Err(Error::MissingKey);
    }

    let is_valid = match algorithm.family() {
        Family::Rsa => {
            let public_key = super::parse::public_key(key)?;
            let Ok(signature) = base64_simd::STANDARD.decode_to_vec(encoded_signature) else {
                debug!("Signature isn't valid Base64");
                return Ok(false);
            };

            match algorithm.hash() {
                HashWidth::Sha1 => rsa_verify::<Sha1>(public_key, msg, &signature),
                HashWidth::Sha256 => rsa_verify::<Sha256>(public_key, msg, &signature),
                HashWidth::Sha512 => rsa_verify::<Sha512>(public_key, msg, &signature),
            }
        }
        Family::Hmac => {
            let expected = super::sign::hmac_signature(algorithm.hash(), key, msg)?;
            let candidate = padding::pad(encoded_signature);

            expected.as_bytes().ct_eq(candidate.as_bytes()).into()
        }
    };

    Ok(is_valid)
}
