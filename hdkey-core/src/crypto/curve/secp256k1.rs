// hdkey-core/src/crypto/curve/secp256k1.rs
//
// secp256k1 point and signature operations (k256).
// Signatures: RFC 6979 deterministic ECDSA over SHA-256 of the message,
// low-S normalized, serialized as r || s.

use super::weierstrass::{WeierstrassCurve, WeierstrassParams};
use crate::crypto::extended_key::KEY_LEN;
use crate::error::{CryptoError, KeyError, KeyResult};
use k256::ecdsa::signature::{Signer, Verifier};
use k256::ecdsa::{Signature, SigningKey, VerifyingKey};
use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::SecretKey;

/// n = FFFFFFFF FFFFFFFF FFFFFFFF FFFFFFFE BAAEDCE6 AF48A03B BFD25E8C D0364141
pub const ORDER: [u8; KEY_LEN] = [
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFE,
    0xBA, 0xAE, 0xDC, 0xE6, 0xAF, 0x48, 0xA0, 0x3B, 0xBF, 0xD2, 0x5E, 0x8C, 0xD0, 0x36, 0x41, 0x41,
];

pub const PARAMS: WeierstrassParams = WeierstrassParams {
    backend: WeierstrassCurve::Secp256k1,
    name: "secp256k1",
    seed_key: b"Bitcoin seed",
    order: ORDER,
    compressed_point_len: 33,
    uncompressed_point_len: 65,
    signature_len: 64,
    recoverable_signature_len: 65,
};

fn invalid_key() -> KeyError {
    CryptoError::InvalidPrivateKey("scalar must be in [1, n-1]".to_string()).into()
}

fn secret_key(private_key: &[u8; KEY_LEN]) -> KeyResult<SecretKey> {
    SecretKey::from_slice(private_key).map_err(|_| invalid_key())
}

fn signing_key(private_key: &[u8; KEY_LEN]) -> KeyResult<SigningKey> {
    SigningKey::from_slice(private_key).map_err(|_| invalid_key())
}

/// 33-byte SEC1 compressed point (`0x02`/`0x03` || x).
pub fn compressed_public_key(private_key: &[u8; KEY_LEN]) -> KeyResult<[u8; 33]> {
    let point = secret_key(private_key)?.public_key().to_encoded_point(true);
    let mut out = [0u8; 33];
    out.copy_from_slice(point.as_bytes());
    Ok(out)
}

/// 65-byte SEC1 uncompressed point (`0x04` || x || y).
pub fn uncompressed_public_key(private_key: &[u8; KEY_LEN]) -> KeyResult<[u8; 65]> {
    let point = secret_key(private_key)?.public_key().to_encoded_point(false);
    let mut out = [0u8; 65];
    out.copy_from_slice(point.as_bytes());
    Ok(out)
}

pub fn sign(private_key: &[u8; KEY_LEN], message: &[u8]) -> KeyResult<[u8; 64]> {
    let signature: Signature = signing_key(private_key)?
        .try_sign(message)
        .map_err(|e| CryptoError::SigningFailed(e.to_string()))?;

    let mut out = [0u8; 64];
    out.copy_from_slice(&signature.to_bytes());
    Ok(out)
}

pub fn sign_recoverable(private_key: &[u8; KEY_LEN], message: &[u8]) -> KeyResult<[u8; 65]> {
    let (signature, recovery_id) = signing_key(private_key)?
        .sign_recoverable(message)
        .map_err(|e| CryptoError::SigningFailed(e.to_string()))?;

    let mut out = [0u8; 65];
    out[..64].copy_from_slice(&signature.to_bytes());
    out[64] = recovery_id.to_byte();
    Ok(out)
}

/// Accepts compressed or uncompressed public keys. Malformed input verifies as false.
pub fn verify(public_key: &[u8], message: &[u8], signature: &[u8]) -> bool {
    let Ok(verifying_key) = VerifyingKey::from_sec1_bytes(public_key) else {
        return false;
    };
    let Ok(signature) = Signature::from_slice(signature) else {
        return false;
    };
    verifying_key.verify(message, &signature).is_ok()
}
