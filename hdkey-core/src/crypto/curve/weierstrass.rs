// hdkey-core/src/crypto/curve/weierstrass.rs
//
// BIP-32 private derivation for short-Weierstrass curves.
//
// Master:   I = HMAC-SHA512("Bitcoin seed", seed)
//           IL invalid -> I = HMAC-SHA512("Bitcoin seed", I) and try again
// Child:    hardened     data = 0x00 || k_par || ser32(i)
//           normal       data = serP(point(k_par)) || ser32(i)
//           I = HMAC-SHA512(c_par, data)
//           k_i = (IL + k_par) mod N
//           IL >= N or k_i == 0 -> data = 0x01 || IR || ser32(i), recompute

use super::{hmac_sha512, secp256k1, Curve};
use crate::config::EngineConfig;
use crate::crypto::extended_key::{ExtendedKey, KEY_LEN};
use crate::crypto::paths::is_hardened;
use crate::error::{CryptoError, KeyResult};
use k256::elliptic_curve::bigint::{Encoding, U256};
use std::cmp::Ordering;
use zeroize::Zeroizing;

/// Weierstrass curves with a point/signature backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeierstrassCurve {
    Secp256k1,
}

/// Constant table for one Weierstrass curve.
#[derive(Debug)]
pub struct WeierstrassParams {
    pub backend: WeierstrassCurve,
    pub name: &'static str,
    pub seed_key: &'static [u8],
    /// Group order N, big-endian.
    pub order: [u8; KEY_LEN],
    pub compressed_point_len: usize,
    pub uncompressed_point_len: usize,
    pub signature_len: usize,
    pub recoverable_signature_len: usize,
}

impl WeierstrassParams {
    #[inline]
    pub fn curve(&self) -> Curve {
        match self.backend {
            WeierstrassCurve::Secp256k1 => Curve::Secp256k1,
        }
    }

    pub fn compressed_point(&self, private_key: &[u8; KEY_LEN]) -> KeyResult<[u8; 33]> {
        match self.backend {
            WeierstrassCurve::Secp256k1 => secp256k1::compressed_public_key(private_key),
        }
    }

    pub fn uncompressed_point(&self, private_key: &[u8; KEY_LEN]) -> KeyResult<[u8; 65]> {
        match self.backend {
            WeierstrassCurve::Secp256k1 => secp256k1::uncompressed_public_key(private_key),
        }
    }

    pub fn sign(&self, private_key: &[u8; KEY_LEN], message: &[u8]) -> KeyResult<[u8; 64]> {
        match self.backend {
            WeierstrassCurve::Secp256k1 => secp256k1::sign(private_key, message),
        }
    }

    /// 64-byte signature followed by a 1-byte recovery id.
    pub fn sign_recoverable(
        &self,
        private_key: &[u8; KEY_LEN],
        message: &[u8],
    ) -> KeyResult<[u8; 65]> {
        match self.backend {
            WeierstrassCurve::Secp256k1 => secp256k1::sign_recoverable(private_key, message),
        }
    }

    pub fn verify(&self, public_key: &[u8], message: &[u8], signature: &[u8]) -> bool {
        match self.backend {
            WeierstrassCurve::Secp256k1 => secp256k1::verify(public_key, message, signature),
        }
    }
}

/// `1 <= key < order`, compared byte by byte (big-endian).
///
/// Keys of any length other than the order's are rejected.
pub fn is_valid_scalar(order: &[u8; KEY_LEN], key: &[u8]) -> bool {
    if key.len() != order.len() || key.iter().all(|&b| b == 0) {
        return false;
    }
    for (k, n) in key.iter().zip(order.iter()) {
        match k.cmp(n) {
            Ordering::Less => return true,
            Ordering::Greater => return false,
            Ordering::Equal => {}
        }
    }
    // key == order
    false
}

pub(crate) fn master_key(
    params: &WeierstrassParams,
    seed: &[u8],
    config: &EngineConfig,
) -> KeyResult<ExtendedKey> {
    let mut digest = hmac_sha512(params.seed_key, seed)?;
    let mut attempts = 1;

    while !is_valid_scalar(&params.order, &digest[..KEY_LEN]) {
        if attempts >= config.max_scalar_retries {
            return Err(CryptoError::RetryLimitExceeded { attempts }.into());
        }
        log::trace!("{}: master scalar out of range, reseeding", params.name);
        let previous = digest.clone();
        digest = hmac_sha512(params.seed_key, &previous[..])?;
        attempts += 1;
    }

    Ok(ExtendedKey::from_digest(&digest))
}

pub(crate) fn child_key(
    params: &WeierstrassParams,
    node: &mut ExtendedKey,
    index: u32,
    config: &EngineConfig,
) -> KeyResult<()> {
    if !is_valid_scalar(&params.order, node.private_key()) {
        return Err(CryptoError::InvalidPrivateKey(format!(
            "{}: parent scalar outside [1, N)",
            params.name
        ))
        .into());
    }

    // [33-byte prefix][4-byte index]
    let mut data = Zeroizing::new([0u8; 37]);
    if is_hardened(index) {
        data[1..33].copy_from_slice(node.private_key());
    } else {
        data[..33].copy_from_slice(&params.compressed_point(node.private_key())?);
    }
    data[33..].copy_from_slice(&index.to_be_bytes());

    let order = U256::from_be_slice(&params.order);
    let parent = Zeroizing::new(U256::from_be_slice(node.private_key()));
    let mut attempts = 0;

    loop {
        attempts += 1;
        let digest = hmac_sha512(node.chain_code(), &data[..])?;

        let il = Zeroizing::new(U256::from_be_slice(&digest[..KEY_LEN]));
        if *il < order {
            let child = Zeroizing::new(il.add_mod(&parent, &order));
            if *child != U256::ZERO {
                node.key_mut().copy_from_slice(&child.to_be_bytes());
                node.chain_code_mut().copy_from_slice(&digest[KEY_LEN..]);
                return Ok(());
            }
        }

        if attempts >= config.max_scalar_retries {
            return Err(CryptoError::RetryLimitExceeded { attempts }.into());
        }
        log::trace!(
            "{}: child scalar invalid at index {}, retrying",
            params.name,
            index
        );
        data[0] = 0x01;
        data[1..33].copy_from_slice(&digest[KEY_LEN..]);
    }
}
