//!
//! Signature algorithms
//!
//! Dispatch happens on the algorithm's family (`rsa-`/`hmac-`) and then on its hash width (`sha1`/`sha256`/`sha512`)
//!

mod sign;
mod verify;

pub mod parse;

pub use self::sign::sign;
pub use self::verify::verify;
