//! SEC1 point compression for the supported curves.
use ecdsa::elliptic_curve::generic_array::typenum::Unsigned;
use ecdsa::elliptic_curve::sec1::{FromEncodedPoint, ModulusSize, ToEncodedPoint};
use ecdsa::elliptic_curve::{AffinePoint, CurveArithmetic, FieldBytesSize, PrimeCurve};
use ecdsa::VerifyingKey;

/// Compress a SEC1 encoded public key.
///
/// Accepts both uncompressed and already compressed points.
pub(crate) fn compress_pubkey<C>(key: &[u8]) -> Result<Vec<u8>, ecdsa::Error>
where
    C: PrimeCurve + CurveArithmetic,
    AffinePoint<C>: FromEncodedPoint<C> + ToEncodedPoint<C>,
    FieldBytesSize<C>: ModulusSize,
{
    pubkey_bytes::<C>(key, true)
}

/// Decompress a compressed SEC1 encoded public key.
///
/// Only the compressed form (tag byte followed by the x-coordinate) is accepted.
pub(crate) fn decompress_pubkey<C>(key: &[u8]) -> Result<Vec<u8>, ecdsa::Error>
where
    C: PrimeCurve + CurveArithmetic,
    AffinePoint<C>: FromEncodedPoint<C> + ToEncodedPoint<C>,
    FieldBytesSize<C>: ModulusSize,
{
    if key.len() != FieldBytesSize::<C>::USIZE + 1 {
        return Err(ecdsa::Error::new());
    }
    pubkey_bytes::<C>(key, false)
}

fn pubkey_bytes<C>(key: &[u8], compress: bool) -> Result<Vec<u8>, ecdsa::Error>
where
    C: PrimeCurve + CurveArithmetic,
    AffinePoint<C>: FromEncodedPoint<C> + ToEncodedPoint<C>,
    FieldBytesSize<C>: ModulusSize,
{
    Ok(VerifyingKey::<C>::from_sec1_bytes(key)?.to_encoded_point(compress).as_bytes().to_vec())
}

#[cfg(test)]
mod tests {
    use super::{compress_pubkey, decompress_pubkey};
    use ecdsa::SigningKey;
    use k256::Secp256k1;
    use p256::NistP256;
    use rand::rngs::ThreadRng;

    #[test]
    fn p256_compress_decompress() {
        let sig_key = SigningKey::<NistP256>::random(&mut ThreadRng::default());
        let key = sig_key.verifying_key().to_encoded_point(false).as_bytes().to_vec();
        assert_eq!(key.len(), 65);
        // compress a key to the correct length
        let compressed =
            compress_pubkey::<NistP256>(&key).expect("compressing public key should succeed");
        assert_eq!(compressed.len(), 33);
        // decompress a key to the original
        let decompressed = decompress_pubkey::<NistP256>(&compressed)
            .expect("decompressing public key should succeed");
        assert_eq!(decompressed.len(), 65);
        assert_eq!(key, decompressed);

        // works consistently
        let keys = (0..100)
            .map(|_| {
                SigningKey::<NistP256>::random(&mut ThreadRng::default())
                    .verifying_key()
                    .to_encoded_point(false)
                    .as_bytes()
                    .to_vec()
            })
            .collect::<Vec<_>>();
        let compressed =
            keys.iter().filter_map(|key| compress_pubkey::<NistP256>(key).ok()).collect::<Vec<_>>();
        let decompressed = compressed
            .iter()
            .filter_map(|key| decompress_pubkey::<NistP256>(key).ok())
            .collect::<Vec<_>>();
        assert_eq!(keys, decompressed);
    }

    #[test]
    fn secp256k1_compress_decompress() {
        let sig_key = SigningKey::<Secp256k1>::random(&mut ThreadRng::default());
        let key = sig_key.verifying_key().to_encoded_point(false).as_bytes().to_vec();
        assert_eq!(key.len(), 65);
        // compress a key to the correct length
        let compressed =
            compress_pubkey::<Secp256k1>(&key).expect("compressing public key should succeed");
        assert_eq!(compressed.len(), 33);
        // decompress a key to the original
        let decompressed = decompress_pubkey::<Secp256k1>(&compressed)
            .expect("decompressing public key should succeed");
        assert_eq!(decompressed.len(), 65);
        assert_eq!(key, decompressed);

        // works consistently
        let keys = (0..100)
            .map(|_| {
                SigningKey::<Secp256k1>::random(&mut ThreadRng::default())
                    .verifying_key()
                    .to_encoded_point(false)
                    .as_bytes()
                    .to_vec()
            })
            .collect::<Vec<_>>();
        let compressed = keys
            .iter()
            .filter_map(|key| compress_pubkey::<Secp256k1>(key).ok())
            .collect::<Vec<_>>();
        let decompressed = compressed
            .iter()
            .filter_map(|key| decompress_pubkey::<Secp256k1>(key).ok())
            .collect::<Vec<_>>();
        assert_eq!(keys, decompressed);
    }

    #[test]
    fn compress_is_idempotent() {
        let sig_key = SigningKey::<Secp256k1>::random(&mut ThreadRng::default());
        let compressed = sig_key.verifying_key().to_encoded_point(true).as_bytes().to_vec();
        assert_eq!(
            compress_pubkey::<Secp256k1>(&compressed).expect("compressing should succeed"),
            compressed
        );
    }

    #[test]
    fn decompress_rejects_uncompressed() {
        let sig_key = SigningKey::<NistP256>::random(&mut ThreadRng::default());
        let uncompressed = sig_key.verifying_key().to_encoded_point(false).as_bytes().to_vec();
        assert!(decompress_pubkey::<NistP256>(&uncompressed).is_err());
    }

    #[test]
    fn invalid_points() {
        assert!(compress_pubkey::<Secp256k1>(&[]).is_err());
        assert!(decompress_pubkey::<Secp256k1>(&[]).is_err());
        assert!(decompress_pubkey::<Secp256k1>(&[0x02; 10]).is_err());
        // unknown SEC1 tag
        let mut key = [0x11; 33];
        key[0] = 0x05;
        assert!(decompress_pubkey::<Secp256k1>(&key).is_err());
        assert!(decompress_pubkey::<NistP256>(&key).is_err());
        // x-coordinate larger than the field modulus
        let mut key = [0xff; 33];
        key[0] = 0x02;
        assert!(decompress_pubkey::<Secp256k1>(&key).is_err());
        assert!(decompress_pubkey::<NistP256>(&key).is_err());
    }
}
