use crate::error::{Error, Result};
use crate::{did, plugins, P256_JWT_ALG, SECP256K1_JWT_ALG};
use std::fmt;
use std::str::FromStr;

/// Public key algorithms that can be encoded as a multikey.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    P256,
    Secp256k1,
}

impl Algorithm {
    // multicodec `p256-pub` (0x1200) and `secp256k1-pub` (0xe7), varint encoded
    pub(crate) const MULTICODE_PREFIX_P256: [u8; 2] = [0x80, 0x24];
    pub(crate) const MULTICODE_PREFIX_SECP256K1: [u8; 2] = [0xe7, 0x01];

    /// The JWT `alg` name of this algorithm.
    pub const fn jwt_alg(&self) -> &'static str {
        match self {
            Self::P256 => P256_JWT_ALG,
            Self::Secp256k1 => SECP256K1_JWT_ALG,
        }
    }
    /// The multicodec prefix that precedes the key bytes of a multikey.
    pub const fn prefix(&self) -> &'static [u8] {
        match self {
            Self::P256 => &Self::MULTICODE_PREFIX_P256,
            Self::Secp256k1 => &Self::MULTICODE_PREFIX_SECP256K1,
        }
    }
    pub fn from_jwt_alg(jwt_alg: &str) -> Option<Self> {
        plugins::find_by_alg(jwt_alg).map(|plugin| plugin.alg)
    }
    pub fn from_prefix(bytes: &[u8]) -> Option<Self> {
        plugins::find_by_prefix(bytes).map(|plugin| plugin.alg)
    }
    pub fn format_multikey(&self, key: &[u8]) -> Result<String> {
        did::format_multikey(self, key)
    }
    pub fn format_did_key(&self, key: &[u8]) -> Result<String> {
        did::format_did_key(self, key)
    }
    /// Encode a SEC1 public key of this algorithm in compressed form.
    pub fn compress_pubkey(&self, key: &[u8]) -> Result<Vec<u8>> {
        self.plugin()?.compress(key)
    }
    /// Expand a compressed SEC1 public key of this algorithm to its uncompressed form.
    pub fn decompress_pubkey(&self, key: &[u8]) -> Result<Vec<u8>> {
        self.plugin()?.decompress(key)
    }
    fn plugin(&self) -> Result<&'static plugins::DidKeyPlugin> {
        plugins::find_by_alg(self.jwt_alg())
            .ok_or_else(|| Error::UnsupportedKeyType(self.jwt_alg().to_string()))
    }
}

impl AsRef<str> for Algorithm {
    fn as_ref(&self) -> &str {
        self.jwt_alg()
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.jwt_alg())
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_jwt_alg(s).ok_or_else(|| Error::UnsupportedKeyType(s.to_string()))
    }
}
