use crate::Error;
use std::{fmt, str::FromStr};
use strum::{AsRefStr, EnumString};

/// Signature algorithm family, selected by the token's prefix
#[derive(AsRefStr, Clone, Copy, Debug, EnumString, Hash, PartialEq, Eq)]
#[strum(ascii_case_insensitive)]
pub enum Family {
    /// RSASSA-PKCS1-v1_5 with an asymmetric keypair
    #[strum(serialize = "rsa")]
    Rsa,

    /// HMAC with a shared secret
    #[strum(serialize = "hmac")]
    Hmac,
}

/// Hash function, selected by the token's suffix
#[derive(AsRefStr, Clone, Copy, Debug, EnumString, Hash, PartialEq, Eq)]
#[strum(ascii_case_insensitive)]
pub enum HashWidth {
    /// SHA-1
    #[strum(serialize = "sha1")]
    Sha1,

    /// SHA-256
    #[strum(serialize = "sha256")]
    Sha256,

    /// SHA-512
    #[strum(serialize = "sha512")]
    Sha512,
}

/// One of the six supported signature algorithms
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct Algorithm {
    family: Family,
    hash: HashWidth,
}

impl Algorithm {
    /// `rsa-sha1`
    pub const RSA_SHA1: Self = Self::new(Family::Rsa, HashWidth::Sha1);
    /// `rsa-sha256`
    pub const RSA_SHA256: Self = Self::new(Family::Rsa, HashWidth::Sha256);
    /// `rsa-sha512`
    pub const RSA_SHA512: Self = Self::new(Family::Rsa, HashWidth::Sha512);
    /// `hmac-sha1`
    pub const HMAC_SHA1: Self = Self::new(Family::Hmac, HashWidth::Sha1);
    /// `hmac-sha256`
    pub const HMAC_SHA256: Self = Self::new(Family::Hmac, HashWidth::Sha256);
    /// `hmac-sha512`
    pub const HMAC_SHA512: Self = Self::new(Family::Hmac, HashWidth::Sha512);

    /// Every supported algorithm
    pub const ALL: [Self; 6] = [
        Self::RSA_SHA1,
        Self::RSA_SHA256,
        Self::RSA_SHA512,
        Self::HMAC_SHA1,
        Self::HMAC_SHA256,
        Self::HMAC_SHA512,
    ];

    #[must_use]
    pub const fn new(family: Family, hash: HashWidth) -> Self {
        Self { family, hash }
    }

    #[must_use]
    pub const fn family(&self) -> Family {
        self.family
    }

    #[must_use]
    pub const fn hash(&self) -> HashWidth {
        self.hash
    }
}

impl Default for Algorithm {
    fn default() -> Self {
        Self::RSA_SHA256
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unsupported = || Error::UnsupportedAlgorithm(s.to_owned());

        let (family, hash) = s.split_once('-').ok_or_else(unsupported)?;
        let family = family.parse().map_err(|_| unsupported())?;
        let hash = hash.parse().map_err(|_| unsupported())?;

        Ok(Self::new(family, hash))
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.family.as_ref(), self.hash.as_ref())
    }
}
