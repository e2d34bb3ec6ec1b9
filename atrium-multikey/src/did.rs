//! Functions for parsing and formatting multikeys and DID keys.
use crate::error::{Error, Result};
use crate::plugins::{find_by_alg, find_by_prefix};
use crate::{Algorithm, BASE58_MULTIBASE_PREFIX, DID_KEY_PREFIX};
use multibase::Base;
use tracing::{debug, trace};

/// A public key decoded from a multikey.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedMultikey {
    pub alg: Algorithm,
    /// Uncompressed SEC1 encoding of the public key.
    pub key_bytes: Vec<u8>,
}

impl ParsedMultikey {
    pub fn jwt_alg(&self) -> &'static str {
        self.alg.jwt_alg()
    }
}

/// Format a public key as a DID key string.
///
/// The public key will be compressed and encoded with multibase and multicode.
/// The resulting string will start with `did:key:`.
///
/// Details:
/// [https://atproto.com/specs/cryptography#public-key-encoding](https://atproto.com/specs/cryptography#public-key-encoding)
///
/// # Examples
///
/// ```
/// use atrium_multikey::Algorithm;
/// use atrium_multikey::did::format_did_key;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let signing_key = ecdsa::SigningKey::<k256::Secp256k1>::from_slice(
///     &hex::decode("9085d2bef69286a6cbb51623c8fa258629945cd55ca705cc4e66700396894e0c")?
/// )?;
/// let public_key = signing_key.verifying_key().to_encoded_point(false);
/// let did_key = format_did_key(Algorithm::Secp256k1, public_key.as_bytes())?;
/// assert_eq!(did_key, "did:key:zQ3shokFTS3brHcDQrn82RUDfCZESWL1ZdCEJwekUDPQiYBme");
/// # Ok(())
/// # }
/// ```
pub fn format_did_key(jwt_alg: impl AsRef<str>, key: &[u8]) -> Result<String> {
    Ok(prefix_did_key(&format_multikey(jwt_alg, key)?))
}

/// Parse a DID key string.
///
/// Input should be a string starting with `did:key:`.
/// The rest of the string is the multibase and multicode encoded public key,
/// which will be parsed with [`parse_multikey`].
///
/// # Examples
///
/// ```
/// use atrium_multikey::Algorithm;
/// use atrium_multikey::did::parse_did_key;
///
/// # fn main() -> atrium_multikey::Result<()> {
/// let parsed = parse_did_key("did:key:zQ3shokFTS3brHcDQrn82RUDfCZESWL1ZdCEJwekUDPQiYBme")?;
/// assert_eq!(parsed.alg, Algorithm::Secp256k1);
/// assert_eq!(parsed.jwt_alg(), "ES256K");
/// assert_eq!(parsed.key_bytes.len(), 65);
/// # Ok(())
/// # }
/// ```
pub fn parse_did_key(did: &str) -> Result<ParsedMultikey> {
    if let Some(multikey) = did.strip_prefix(DID_KEY_PREFIX) {
        parse_multikey(multikey)
    } else {
        debug!(did, "rejected did:key without method prefix");
        Err(Error::InvalidDidKeyPrefix(did.to_string()))
    }
}

/// Format a public key as a multibase and multicode encoded string.
///
/// `jwt_alg` is either an [`Algorithm`] or its JWT `alg` name.
/// The key may be given as any SEC1 encoding; it is stored compressed.
pub fn format_multikey(jwt_alg: impl AsRef<str>, key: &[u8]) -> Result<String> {
    let jwt_alg = jwt_alg.as_ref();
    let Some(plugin) = find_by_alg(jwt_alg) else {
        debug!(jwt_alg, "no multikey plugin for algorithm");
        return Err(Error::UnsupportedKeyType(jwt_alg.to_string()));
    };
    let compressed = plugin.compress(key)?;
    let mut bytes = Vec::with_capacity(plugin.prefix.len() + compressed.len());
    bytes.extend_from_slice(plugin.prefix);
    bytes.extend(compressed);
    trace!(alg = %plugin.alg, len = bytes.len(), "formatted multikey");
    let encoded = Base::Base58Btc.encode(bytes);
    let mut ret = String::with_capacity(BASE58_MULTIBASE_PREFIX.len() + encoded.len());
    ret.push_str(BASE58_MULTIBASE_PREFIX);
    ret.push_str(&encoded);
    Ok(ret)
}

/// Parse a multibase and multicode encoded public key string.
///
/// Details:
/// [https://atproto.com/specs/cryptography#public-key-encoding](https://atproto.com/specs/cryptography#public-key-encoding)
///
/// Returns the parsed [`Algorithm`] and the uncompressed bytes of the public key.
///
/// # Examples
///
/// ```
/// use atrium_multikey::Algorithm;
/// use atrium_multikey::did::parse_multikey;
///
/// # fn main() -> atrium_multikey::Result<()> {
/// let parsed = parse_multikey("zDnaeTiq1PdzvZXUaMdezchcMJQpBdH2VN4pgrrEhMCCbmwSb")?;
/// assert_eq!(parsed.alg, Algorithm::P256);
/// assert_eq!(parsed.key_bytes.len(), 65);
/// # Ok(())
/// # }
/// ```
pub fn parse_multikey(multikey: &str) -> Result<ParsedMultikey> {
    let Some(encoded) = multikey.strip_prefix(BASE58_MULTIBASE_PREFIX) else {
        debug!(multikey, "rejected multikey without base58btc prefix");
        return Err(Error::InvalidMultibasePrefix(multikey.to_string()));
    };
    let decoded = Base::Base58Btc.decode(encoded)?;
    let Some(plugin) = find_by_prefix(&decoded) else {
        debug!(multikey, "no multikey plugin for prefix");
        return Err(Error::UnsupportedKeyType(leading_bytes(&decoded)));
    };
    trace!(alg = %plugin.alg, "matched multikey prefix");
    Ok(ParsedMultikey {
        alg: plugin.alg,
        key_bytes: plugin.decompress(&decoded[plugin.prefix.len()..])?,
    })
}

fn prefix_did_key(multikey: &str) -> String {
    let mut ret = String::with_capacity(DID_KEY_PREFIX.len() + multikey.len());
    ret.push_str(DID_KEY_PREFIX);
    ret.push_str(multikey);
    ret
}

fn leading_bytes(bytes: &[u8]) -> String {
    if bytes.is_empty() {
        return String::from("empty multikey");
    }
    let head = bytes.iter().take(2).map(|b| format!("{b:02x}")).collect::<String>();
    format!("multicodec prefix 0x{head}")
}
