use crate::{padding, Algorithm, Error, Family, HashWidth};
use const_oid::AssociatedOid;
use hmac::{Hmac, Mac};
use rsa::{
    pkcs1v15,
    signature::{SignatureEncoding, Signer},
    RsaPrivateKey,
};
use sha1::Sha1;
use sha2::{Digest, Sha256, Sha512};

#[inline]
fn rsa_sign<D>(key: RsaPrivateKey, msg: &[u8]) -> Result<Vec<u8>, Error>
where
    D: Digest + AssociatedOid,
{
    let signing_key = pkcs1v15::SigningKey::<D>::new(key);
    let signature = signing_key.try_sign(msg)?;

    Ok(signature.to_vec())
}

#[inline]
fn mac<M>(secret: &[u8], msg: &[u8]) -> Result<Vec<u8>, Error>
where
    M: Mac + hmac::digest::KeyInit,
{
    let mut mac = <M as hmac::digest::KeyInit>::new_from_slice(secret)
        .map_err(|_| Error::InvalidKeyLength)?;
    mac.update(msg);

    Ok(mac.finalize().into_bytes().to_vec())
}

/// Compute the Base64 HMAC of the message, padded to a multiple of four characters
#[inline]
pub(super) fn hmac_signature(
    hash: HashWidth,
    secret: &[u8],
    msg: &[u8],
) -> Result<String, Error> {
    let raw = match hash {
        HashWidth::Sha1 => mac::<Hmac<Sha1>>(secret, msg)?,
        HashWidth::Sha256 => mac::<Hmac<Sha256>>(secret, msg)?,
        HashWidth::Sha512 => mac::<Hmac<Sha512>>(secret, msg)?,
    };

    let encoded = base64_simd::STANDARD.encode_to_string(raw);
    Ok(padding::pad(&encoded).into_owned())
}

/// Sign a message and encode the returned signature in Base64
///
/// - RSA algorithms expect a PEM-encoded private key
/// - HMAC algorithms expect the raw shared secret
#[inline]
pub fn sign(algorithm: Algorithm, msg: &[u8], key: &[u8]) -> Result<String, Error> {
    if key.is_empty() {
        return Err(Error::MissingKey);
    }

    let signature = match algorithm.family() {
        Family::Rsa => {
            let private_key = super::parse::private_key(key)?;
            let raw = match algorithm.hash() {
                HashWidth::Sha1 => rsa_sign::<Sha1>(private_key, msg)?,
                HashWidth::Sha256 => rsa_sign::<Sha256>(private_key, msg)?,
                HashWidth::Sha512 => rsa_sign::<Sha512>(private_key, msg)?,
            };

            base64_simd::STANDARD.encode_to_string(raw)
        }
        Family::Hmac => hmac_signature(algorithm.hash(), key, msg)?,
    };

    Ok(signature)
}
