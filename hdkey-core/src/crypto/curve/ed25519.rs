// hdkey-core/src/crypto/curve/ed25519.rs
//
// Ed25519 key and signature operations (ed25519-dalek, pure EdDSA).

use super::edwards::{EdwardsCurve, EdwardsParams};
use crate::crypto::extended_key::KEY_LEN;
use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};

pub const PARAMS: EdwardsParams = EdwardsParams {
    backend: EdwardsCurve::Ed25519,
    name: "ed25519",
    seed_key: b"ed25519 seed",
    public_key_len: 32,
    signature_len: 64,
};

/// 32-byte compressed Edwards point. SLIP-0010 test vectors show the same
/// bytes with a leading `0x00`.
pub fn public_key(private_key: &[u8; KEY_LEN]) -> [u8; 32] {
    SigningKey::from_bytes(private_key).verifying_key().to_bytes()
}

pub fn sign(private_key: &[u8; KEY_LEN], message: &[u8]) -> [u8; 64] {
    SigningKey::from_bytes(private_key).sign(message).to_bytes()
}

/// Malformed keys or signatures verify as false.
pub fn verify(public_key: &[u8], message: &[u8], signature: &[u8]) -> bool {
    let Ok(public_key) = <[u8; 32]>::try_from(public_key) else {
        return false;
    };
    let Ok(verifying_key) = VerifyingKey::from_bytes(&public_key) else {
        return false;
    };
    let Ok(signature) = <[u8; 64]>::try_from(signature) else {
        return false;
    };
    verifying_key
        .verify(message, &Signature::from_bytes(&signature))
        .is_ok()
}
