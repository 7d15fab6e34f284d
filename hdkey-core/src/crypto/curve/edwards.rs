// hdkey-core/src/crypto/curve/edwards.rs
//
// SLIP-0010 derivation for twisted-Edwards curves.
// Every 32-byte string is a usable private key, so there is no validity
// loop; in exchange only hardened children exist.

use super::{ed25519, hmac_sha512, Curve};
use crate::crypto::extended_key::{ExtendedKey, KEY_LEN};
use crate::crypto::paths::is_hardened;
use crate::error::{CryptoError, KeyResult};
use zeroize::Zeroizing;

/// Edwards curves with a signature backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdwardsCurve {
    Ed25519,
}

/// Constant table for one Edwards curve.
#[derive(Debug)]
pub struct EdwardsParams {
    pub backend: EdwardsCurve,
    pub name: &'static str,
    pub seed_key: &'static [u8],
    pub public_key_len: usize,
    pub signature_len: usize,
}

impl EdwardsParams {
    #[inline]
    pub fn curve(&self) -> Curve {
        match self.backend {
            EdwardsCurve::Ed25519 => Curve::Ed25519,
        }
    }

    pub fn public_key(&self, private_key: &[u8; KEY_LEN]) -> [u8; 32] {
        match self.backend {
            EdwardsCurve::Ed25519 => ed25519::public_key(private_key),
        }
    }

    pub fn sign(&self, private_key: &[u8; KEY_LEN], message: &[u8]) -> [u8; 64] {
        match self.backend {
            EdwardsCurve::Ed25519 => ed25519::sign(private_key, message),
        }
    }

    pub fn verify(&self, public_key: &[u8], message: &[u8], signature: &[u8]) -> bool {
        match self.backend {
            EdwardsCurve::Ed25519 => ed25519::verify(public_key, message, signature),
        }
    }
}

pub(crate) fn master_key(params: &EdwardsParams, seed: &[u8]) -> KeyResult<ExtendedKey> {
    let digest = hmac_sha512(params.seed_key, seed)?;
    Ok(ExtendedKey::from_digest(&digest))
}

/// `I = HMAC-SHA512(c_par, 0x00 || k_par || ser32(i))`, IL and IR copied as-is.
pub(crate) fn child_key(params: &EdwardsParams, node: &mut ExtendedKey, index: u32) -> KeyResult<()> {
    if !is_hardened(index) {
        return Err(CryptoError::NonHardenedIndex {
            curve: params.name,
            index,
        }
        .into());
    }

    let mut data = Zeroizing::new([0u8; 37]);
    data[1..33].copy_from_slice(node.private_key());
    data[33..].copy_from_slice(&index.to_be_bytes());

    let digest = hmac_sha512(node.chain_code(), &data[..])?;
    node.key_mut().copy_from_slice(&digest[..KEY_LEN]);
    node.chain_code_mut().copy_from_slice(&digest[KEY_LEN..]);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::paths::harden;
    use crate::error::ErrorKind;

    #[test]
    fn test_non_hardened_rejected_without_touching_node() {
        let mut node = ExtendedKey::new([3u8; 32], [4u8; 32]);
        let err = child_key(&ed25519::PARAMS, &mut node, 5).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedOperation);
        assert_eq!(node.private_key(), &[3u8; 32]);
        assert_eq!(node.chain_code(), &[4u8; 32]);
    }

    #[test]
    fn test_first_hardened_child_vector() {
        let seed = hex::decode("000102030405060708090a0b0c0d0e0f").unwrap();
        let mut node = master_key(&ed25519::PARAMS, &seed).unwrap();
        child_key(&ed25519::PARAMS, &mut node, harden(0)).unwrap();
        assert_eq!(
            hex::encode(node.private_key()),
            "68e0fe46dfb67e368c75379acec591dad19df3cde26e63b93a8e704f1dade7a3"
        );
        assert_eq!(
            hex::encode(node.chain_code()),
            "8b59aa11380b624e81507a27fedda59fea6d0b779a778918a2fd3590e16e9c69"
        );
    }
}
