// hdkey-core/src/crypto/extended_key.rs

use zeroize::{Zeroize, ZeroizeOnDrop};

/// Length of a private key and of a chain code.
pub const KEY_LEN: usize = 32;

/// Private key + chain code at one node of the derivation tree.
///
/// Overwritten in place by every derivation step; nothing about parent
/// nodes is retained. Both halves are wiped on drop.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct ExtendedKey {
    key: [u8; KEY_LEN],
    chain_code: [u8; KEY_LEN],
}

// Custom Debug - never print key material
impl std::fmt::Debug for ExtendedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtendedKey")
            .field("key", &"[REDACTED]")
            .field("chain_code", &"[REDACTED]")
            .finish()
    }
}

impl ExtendedKey {
    pub fn new(key: [u8; KEY_LEN], chain_code: [u8; KEY_LEN]) -> Self {
        Self { key, chain_code }
    }

    /// Split a 64-byte HMAC-SHA512 digest into `IL` (key) and `IR` (chain code).
    pub(crate) fn from_digest(digest: &[u8; 64]) -> Self {
        let mut key = [0u8; KEY_LEN];
        let mut chain_code = [0u8; KEY_LEN];
        key.copy_from_slice(&digest[..KEY_LEN]);
        chain_code.copy_from_slice(&digest[KEY_LEN..]);
        Self { key, chain_code }
    }

    /// Private key bytes.
    ///
    /// # Warning
    /// Sensitive; do not log or persist unencrypted.
    #[inline]
    pub fn private_key(&self) -> &[u8; KEY_LEN] {
        &self.key
    }

    #[inline]
    pub fn chain_code(&self) -> &[u8; KEY_LEN] {
        &self.chain_code
    }

    #[inline]
    pub(crate) fn key_mut(&mut self) -> &mut [u8; KEY_LEN] {
        &mut self.key
    }

    #[inline]
    pub(crate) fn chain_code_mut(&mut self) -> &mut [u8; KEY_LEN] {
        &mut self.chain_code
    }

    /// Copy both halves into caller buffers. Nothing is written unless both
    /// destinations are exactly 32 bytes long.
    pub fn write_into(&self, key_dest: &mut [u8], chain_code_dest: &mut [u8]) -> bool {
        if key_dest.len() != KEY_LEN || chain_code_dest.len() != KEY_LEN {
            return false;
        }
        key_dest.copy_from_slice(&self.key);
        chain_code_dest.copy_from_slice(&self.chain_code);
        true
    }
}
