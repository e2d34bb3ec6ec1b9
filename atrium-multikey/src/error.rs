use crate::Algorithm;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Incorrect prefix for multikey: {0}")]
    InvalidMultibasePrefix(String),
    #[error("Incorrect prefix for did:key: {0}")]
    InvalidDidKeyPrefix(String),
    #[error("Invalid base58btc encoding: {0}")]
    InvalidEncoding(#[from] multibase::Error),
    #[error("Unsupported key type: {0}")]
    UnsupportedKeyType(String),
    #[error("Invalid {0} public key encoding: {1}")]
    InvalidKeyEncoding(Algorithm, #[source] ecdsa::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
