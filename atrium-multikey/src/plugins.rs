//! Registry of the key types that can be encoded as a multikey.
//!
//! Each [`DidKeyPlugin`] pairs a JWT algorithm name with the multicodec prefix
//! that identifies its keys, and carries the point compression used to store
//! them. The registry is a fixed table; lookups scan it in registration order.
use crate::encoding::{compress_pubkey, decompress_pubkey};
use crate::error::{Error, Result};
use crate::Algorithm;
use k256::Secp256k1;
use p256::NistP256;
use std::fmt;

/// Point compression applied to keys stored in compressed form.
#[derive(Clone, Copy)]
pub struct PointCompression {
    pub compress: fn(&[u8]) -> std::result::Result<Vec<u8>, ecdsa::Error>,
    pub decompress: fn(&[u8]) -> std::result::Result<Vec<u8>, ecdsa::Error>,
}

impl fmt::Debug for PointCompression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PointCompression").finish_non_exhaustive()
    }
}

/// A supported key type.
#[derive(Debug, Clone, Copy)]
pub struct DidKeyPlugin {
    pub alg: Algorithm,
    pub jwt_alg: &'static str,
    pub prefix: &'static [u8],
    /// `None` if key bytes are stored as they are.
    pub compression: Option<PointCompression>,
}

impl DidKeyPlugin {
    /// Convert an encoded public key into the form stored in a multikey.
    pub fn compress(&self, key: &[u8]) -> Result<Vec<u8>> {
        match &self.compression {
            Some(compression) => {
                (compression.compress)(key).map_err(|e| Error::InvalidKeyEncoding(self.alg, e))
            }
            None => Ok(key.to_vec()),
        }
    }
    /// Convert the key stored in a multikey back into its uncompressed form.
    pub fn decompress(&self, key: &[u8]) -> Result<Vec<u8>> {
        match &self.compression {
            Some(compression) => {
                (compression.decompress)(key).map_err(|e| Error::InvalidKeyEncoding(self.alg, e))
            }
            None => Ok(key.to_vec()),
        }
    }
}

const REGISTRY: [DidKeyPlugin; 2] = [
    DidKeyPlugin {
        alg: Algorithm::P256,
        jwt_alg: Algorithm::P256.jwt_alg(),
        prefix: Algorithm::P256.prefix(),
        compression: Some(PointCompression {
            compress: compress_pubkey::<NistP256>,
            decompress: decompress_pubkey::<NistP256>,
        }),
    },
    DidKeyPlugin {
        alg: Algorithm::Secp256k1,
        jwt_alg: Algorithm::Secp256k1.jwt_alg(),
        prefix: Algorithm::Secp256k1.prefix(),
        compression: Some(PointCompression {
            compress: compress_pubkey::<Secp256k1>,
            decompress: decompress_pubkey::<Secp256k1>,
        }),
    },
];

const _: () = assert!(
    is_unambiguous(&REGISTRY),
    "multikey prefixes and JWT algorithms must be unique and prefix-free"
);

/// All supported key types, in registration order.
pub static PLUGINS: [DidKeyPlugin; REGISTRY.len()] = REGISTRY;

pub fn plugins() -> impl Iterator<Item = &'static DidKeyPlugin> {
    PLUGINS.iter()
}

/// Find the first plugin whose multicodec prefix starts `bytes`.
pub fn find_by_prefix(bytes: &[u8]) -> Option<&'static DidKeyPlugin> {
    PLUGINS.iter().find(|plugin| bytes.starts_with(plugin.prefix))
}

/// Find the plugin for a JWT algorithm name.
pub fn find_by_alg(jwt_alg: &str) -> Option<&'static DidKeyPlugin> {
    PLUGINS.iter().find(|plugin| plugin.jwt_alg == jwt_alg)
}

const fn is_unambiguous(plugins: &[DidKeyPlugin]) -> bool {
    let mut i = 0;
    while i < plugins.len() {
        if plugins[i].prefix.is_empty() {
            return false;
        }
        let mut j = i + 1;
        while j < plugins.len() {
            if starts_with(plugins[i].prefix, plugins[j].prefix)
                || starts_with(plugins[j].prefix, plugins[i].prefix)
                || eq(plugins[i].jwt_alg.as_bytes(), plugins[j].jwt_alg.as_bytes())
            {
                return false;
            }
            j += 1;
        }
        i += 1;
    }
    true
}

const fn starts_with(bytes: &[u8], prefix: &[u8]) -> bool {
    if bytes.len() < prefix.len() {
        return false;
    }
    let mut i = 0;
    while i < prefix.len() {
        if bytes[i] != prefix[i] {
            return false;
        }
        i += 1;
    }
    true
}

const fn eq(a: &[u8], b: &[u8]) -> bool {
    a.len() == b.len() && starts_with(a, b)
}
