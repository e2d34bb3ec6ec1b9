#![doc = include_str!("../README.md")]
mod algorithm;
pub mod did;
mod encoding;
pub mod error;
pub mod plugins;

pub use algorithm::Algorithm;
pub use did::{format_did_key, format_multikey, parse_did_key, parse_multikey, ParsedMultikey};
pub use error::{Error, Result};
pub use multibase;

/// Prefix of every `did:key` identifier.
pub const DID_KEY_PREFIX: &str = "did:key:";
/// Multibase prefix for base58btc (Bitcoin alphabet).
pub const BASE58_MULTIBASE_PREFIX: &str = "z";

/// JWT `alg` of NIST P-256 keys.
pub const P256_JWT_ALG: &str = "ES256";
/// JWT `alg` of secp256k1 keys.
pub const SECP256K1_JWT_ALG: &str = "ES256K";
