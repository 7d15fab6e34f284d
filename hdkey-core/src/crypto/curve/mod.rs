// hdkey-core/src/crypto/curve/mod.rs
//
// Curve profiles - Multi-Curve Support
//
// ┌─────────────────────────────────────────────────┐
// │  Seed (16-64 bytes, usually from BIP-39)        │
// │                    │                            │
// │     ┌──────────────┴──────────────┐             │
// │     ▼                             ▼             │
// │  Weierstrass (BIP-32)       Edwards (SLIP-0010) │
// │  └─ secp256k1               └─ ed25519          │
// │     "Bitcoin seed"             "ed25519 seed"   │
// │     normal + hardened          hardened only    │
// │     mod-N add, retry loop      direct copy      │
// └─────────────────────────────────────────────────┘

pub mod ed25519;
pub mod edwards;
pub mod secp256k1;
pub mod weierstrass;

pub use edwards::{EdwardsCurve, EdwardsParams};
pub use weierstrass::{WeierstrassCurve, WeierstrassParams};

use crate::config::EngineConfig;
use crate::crypto::extended_key::{ExtendedKey, KEY_LEN};
use crate::error::{CryptoError, KeyError, KeyResult};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha512;
use zeroize::Zeroizing;

type HmacSha512 = Hmac<Sha512>;

/// secp256k1 profile table.
pub static SECP256K1: WeierstrassParams = secp256k1::PARAMS;
/// ed25519 profile table.
pub static ED25519: EdwardsParams = ed25519::PARAMS;

// =============================================================================
// CURVE SELECTOR
// =============================================================================
/// Supported curves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Curve {
    /// secp256k1: Bitcoin, Ethereum, Cosmos, Tron, ...
    Secp256k1,
    /// Ed25519: Solana, Aptos, Sui, Near, TON, Cardano (SLIP-0010), ...
    Ed25519,
}

impl Curve {
    #[inline]
    pub fn profile(self) -> CurveProfile {
        match self {
            Curve::Secp256k1 => CurveProfile::Weierstrass(&SECP256K1),
            Curve::Ed25519 => CurveProfile::Edwards(&ED25519),
        }
    }

    #[inline]
    pub fn name(self) -> &'static str {
        self.profile().name()
    }
}

impl std::fmt::Display for Curve {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// CURVE PROFILE
// =============================================================================
/// Curve family + its constant table. Every derivation step is dispatched
/// through this enum.
#[derive(Debug, Clone, Copy)]
pub enum CurveProfile {
    Weierstrass(&'static WeierstrassParams),
    Edwards(&'static EdwardsParams),
}

impl CurveProfile {
    #[inline]
    pub fn curve(&self) -> Curve {
        match self {
            CurveProfile::Weierstrass(p) => p.curve(),
            CurveProfile::Edwards(p) => p.curve(),
        }
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            CurveProfile::Weierstrass(p) => p.name,
            CurveProfile::Edwards(p) => p.name,
        }
    }

    /// HMAC key used for master-key generation.
    #[inline]
    pub fn seed_key(&self) -> &'static [u8] {
        match self {
            CurveProfile::Weierstrass(p) => p.seed_key,
            CurveProfile::Edwards(p) => p.seed_key,
        }
    }

    /// Edwards curves only support hardened children.
    #[inline]
    pub fn requires_hardened(&self) -> bool {
        matches!(self, CurveProfile::Edwards(_))
    }

    /// Length of the public key returned by [`public_key`](Self::public_key).
    #[inline]
    pub fn public_key_len(&self) -> usize {
        match self {
            CurveProfile::Weierstrass(p) => p.compressed_point_len,
            CurveProfile::Edwards(p) => p.public_key_len,
        }
    }

    #[inline]
    pub fn signature_len(&self) -> usize {
        match self {
            CurveProfile::Weierstrass(p) => p.signature_len,
            CurveProfile::Edwards(p) => p.signature_len,
        }
    }

    pub fn is_valid_private_key(&self, key: &[u8]) -> bool {
        match self {
            CurveProfile::Weierstrass(p) => weierstrass::is_valid_scalar(&p.order, key),
            CurveProfile::Edwards(_) => key.len() == KEY_LEN,
        }
    }

    // =========================================================================
    // DERIVATION
    // =========================================================================

    /// `I = HMAC-SHA512(Key = seed_key, Data = seed)`
    pub fn master_key(&self, seed: &[u8], config: &EngineConfig) -> KeyResult<ExtendedKey> {
        match self {
            CurveProfile::Weierstrass(p) => weierstrass::master_key(p, seed, config),
            CurveProfile::Edwards(p) => edwards::master_key(p, seed),
        }
    }

    /// Replace `node` with its child at `index`. On error `node` is untouched.
    pub fn child_key(
        &self,
        node: &mut ExtendedKey,
        index: u32,
        config: &EngineConfig,
    ) -> KeyResult<()> {
        match self {
            CurveProfile::Weierstrass(p) => weierstrass::child_key(p, node, index, config),
            CurveProfile::Edwards(p) => edwards::child_key(p, node, index),
        }
    }

    // =========================================================================
    // CURVE-MATH COLLABORATOR
    // =========================================================================

    /// Public key for `private_key` (compressed SEC1 point on Weierstrass,
    /// raw 32-byte point on Edwards).
    pub fn public_key(&self, private_key: &[u8; KEY_LEN]) -> KeyResult<Vec<u8>> {
        match self {
            CurveProfile::Weierstrass(p) => Ok(p.compressed_point(private_key)?.to_vec()),
            CurveProfile::Edwards(p) => Ok(p.public_key(private_key).to_vec()),
        }
    }

    pub fn sign(&self, private_key: &[u8; KEY_LEN], message: &[u8]) -> KeyResult<Vec<u8>> {
        match self {
            CurveProfile::Weierstrass(p) => Ok(p.sign(private_key, message)?.to_vec()),
            CurveProfile::Edwards(p) => Ok(p.sign(private_key, message).to_vec()),
        }
    }

    pub fn verify(&self, public_key: &[u8], message: &[u8], signature: &[u8]) -> bool {
        match self {
            CurveProfile::Weierstrass(p) => p.verify(public_key, message, signature),
            CurveProfile::Edwards(p) => p.verify(public_key, message, signature),
        }
    }
}

/// HMAC-SHA512 into a buffer that is wiped on drop.
pub(crate) fn hmac_sha512(key: &[u8], data: &[u8]) -> KeyResult<Zeroizing<[u8; 64]>> {
    let mut mac = HmacSha512::new_from_slice(key).map_err(|e| {
        KeyError::Crypto(CryptoError::DerivationFailed(format!(
            "HMAC init failed: {}",
            e
        )))
    })?;
    mac.update(data);
    let result = mac.finalize().into_bytes();

    let mut buf = Zeroizing::new([0u8; 64]);
    buf.copy_from_slice(&result);
    Ok(buf)
}
