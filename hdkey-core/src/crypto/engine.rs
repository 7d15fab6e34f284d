// hdkey-core/src/crypto/engine.rs
//
// Derivation Engine - seed + path -> (private key, chain code)
//
// master = profile.master_key(seed)
// for i in path: profile.child_key(&mut node, i)     (in place, iterative)

use crate::config::EngineConfig;
use crate::crypto::curve::{Curve, CurveProfile};
use crate::crypto::extended_key::{ExtendedKey, KEY_LEN};
use crate::crypto::paths::{harden, is_hardened, DerivationPath, HARDENED_OFFSET};
use crate::error::{CryptoError, KeyError, KeyResult};
use std::ops::Range;

// =============================================================================
// COMMON TYPES
// =============================================================================
/// Derivation result + metadata
#[derive(Debug, Clone)]
pub struct DerivedKey {
    /// Private key + chain code (auto-zeroize on drop)
    pub key: ExtendedKey,
    pub curve: Curve,
    /// Full path from the master key
    pub path: DerivationPath,
}

// =============================================================================
// ENGINE
// =============================================================================
/// Drives a [`CurveProfile`] along a path of indices.
///
/// Holds no mutable state; one engine can serve concurrent callers.
#[derive(Debug, Clone, Default)]
pub struct DerivationEngine {
    config: EngineConfig,
}

impl DerivationEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: EngineConfig) -> KeyResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn master_key(&self, curve: Curve, seed: &[u8]) -> KeyResult<ExtendedKey> {
        validate_seed(seed)?;
        curve.profile().master_key(seed, &self.config)
    }

    /// Derive the node at `path` below the master key of `seed`.
    ///
    /// # Arguments
    /// * `curve` - Curve selecting the family algorithm
    /// * `seed` - Any non-empty seed (BIP-39 seeds are 64 bytes)
    /// * `path` - Child indices; empty returns the master key
    ///
    /// # Errors
    /// A non-hardened index on an Edwards curve fails before any HMAC is computed.
    pub fn derive_path(&self, curve: Curve, seed: &[u8], path: &[u32]) -> KeyResult<ExtendedKey> {
        let profile = curve.profile();
        validate_seed(seed)?;
        check_hardening(&profile, path)?;

        log::debug!("deriving {} key at depth {}", profile.name(), path.len());
        let mut node = profile.master_key(seed, &self.config)?;
        for &index in path {
            profile.child_key(&mut node, index, &self.config)?;
        }
        Ok(node)
    }

    pub fn derive_path_str(&self, curve: Curve, seed: &[u8], path: &str) -> KeyResult<ExtendedKey> {
        let path = DerivationPath::parse(path)?;
        self.derive_path(curve, seed, path.as_slice())
    }

    /// One more step below an already derived node.
    pub fn derive_child(&self, curve: Curve, parent: &ExtendedKey, index: u32) -> KeyResult<ExtendedKey> {
        let mut node = parent.clone();
        curve.profile().child_key(&mut node, index, &self.config)?;
        Ok(node)
    }

    /// Batch derive: derive `base` once, then fan out over `indices`.
    ///
    /// # Arguments
    /// * `base` - Path up to the last level (e.g. `m/44'/60'/0'/0`)
    /// * `indices` - Range of last-level indices, each below 2^31
    /// * `hardened` - Harden every fanned-out index (required on Edwards curves)
    pub fn derive_batch(
        &self,
        curve: Curve,
        seed: &[u8],
        base: &DerivationPath,
        indices: Range<u32>,
        hardened: bool,
    ) -> KeyResult<Vec<DerivedKey>> {
        let profile = curve.profile();
        if indices.end > HARDENED_OFFSET {
            return Err(KeyError::Validation(format!(
                "Batch indices must be below {}, got end {}",
                HARDENED_OFFSET, indices.end
            )));
        }
        if profile.requires_hardened() && !hardened && !indices.is_empty() {
            return Err(CryptoError::NonHardenedIndex {
                curve: profile.name(),
                index: indices.start,
            }
            .into());
        }

        let base_key = self.derive_path(curve, seed, base.as_slice())?;

        let mut keys = Vec::with_capacity(indices.len());
        for i in indices {
            let index = if hardened { harden(i) } else { i };
            keys.push(DerivedKey {
                key: self.derive_child(curve, &base_key, index)?,
                curve,
                path: base.child(index),
            });
        }
        Ok(keys)
    }

    // =========================================================================
    // FIXED-DESTINATION VARIANTS
    // =========================================================================

    /// Write the master key into 32-byte destinations. Returns `false`
    /// without writing anything on any failure.
    pub fn try_master_key_into(
        &self,
        curve: Curve,
        seed: &[u8],
        key_dest: &mut [u8],
        chain_code_dest: &mut [u8],
    ) -> bool {
        if !destinations_ok(key_dest, chain_code_dest) {
            return false;
        }
        match self.master_key(curve, seed) {
            Ok(node) => node.write_into(key_dest, chain_code_dest),
            Err(e) => {
                log::debug!("master key rejected: {}", e);
                false
            }
        }
    }

    /// Write the node at `path` into 32-byte destinations. Returns `false`
    /// without writing anything on any failure.
    pub fn try_derive_path_into(
        &self,
        curve: Curve,
        seed: &[u8],
        path: &[u32],
        key_dest: &mut [u8],
        chain_code_dest: &mut [u8],
    ) -> bool {
        if !destinations_ok(key_dest, chain_code_dest) {
            return false;
        }
        match self.derive_path(curve, seed, path) {
            Ok(node) => node.write_into(key_dest, chain_code_dest),
            Err(e) => {
                log::debug!("path derivation rejected: {}", e);
                false
            }
        }
    }
}

/// [`DerivationEngine::derive_path`] with the default configuration.
pub fn derive_path(curve: Curve, seed: &[u8], path: &[u32]) -> KeyResult<ExtendedKey> {
    DerivationEngine::new().derive_path(curve, seed, path)
}

#[inline]
fn validate_seed(seed: &[u8]) -> KeyResult<()> {
    if seed.is_empty() {
        return Err(KeyError::Validation("Seed must not be empty".to_string()));
    }
    Ok(())
}

fn check_hardening(profile: &CurveProfile, path: &[u32]) -> KeyResult<()> {
    if !profile.requires_hardened() {
        return Ok(());
    }
    match path.iter().enumerate().find(|&(_, &index)| !is_hardened(index)) {
        Some((depth, &index)) => {
            log::debug!(
                "{} path has a non-hardened index at depth {}",
                profile.name(),
                depth
            );
            Err(CryptoError::NonHardenedIndex {
                curve: profile.name(),
                index,
            }
            .into())
        }
        None => Ok(()),
    }
}

fn destinations_ok(key_dest: &[u8], chain_code_dest: &[u8]) -> bool {
    if key_dest.len() != KEY_LEN || chain_code_dest.len() != KEY_LEN {
        log::debug!(
            "destination lengths {}/{} rejected, expected {}",
            key_dest.len(),
            chain_code_dest.len(),
            KEY_LEN
        );
        return false;
    }
    true
}

// =============================================================================
// TESTS
// =============================================================================
