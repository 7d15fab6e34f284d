// hdkey-core/src/crypto/paths.rs
//
// Derivation Paths Module - parse/encode + multi-chain path builders
// BIP-32 (path grammar), BIP-44 (Purpose), SLIP-44 (Coin Types), SLIP-0010 (ed25519)
//
// Grammar:  path    := "m" ("/" segment)*
//           segment := digits ["'" | "h"]        digits in [0, 2^31)

use crate::error::{KeyResult, PathError};
use std::fmt;
use std::str::FromStr;

/// Indices at or above this value are hardened.
pub const HARDENED_OFFSET: u32 = 0x8000_0000;

#[inline]
pub const fn harden(index: u32) -> u32 {
    index | HARDENED_OFFSET
}

#[inline]
pub const fn is_hardened(index: u32) -> bool {
    index >= HARDENED_OFFSET
}

// =============================================================================
// SLIP-44 COIN TYPES
// =============================================================================
/// SLIP-44 Registered Coin Types
/// Ref: https://github.com/satoshilabs/slips/blob/master/slip-0044.md
pub mod coin_type {
    // ---- secp256k1 chains ----
    pub const BITCOIN: u32 = 0;
    pub const LITECOIN: u32 = 2;
    pub const DOGECOIN: u32 = 3;
    pub const ETHEREUM: u32 = 60; // all EVM chains share 60
    pub const COSMOS: u32 = 118;
    pub const BITCOIN_CASH: u32 = 145;
    pub const TRON: u32 = 195;
    pub const SECRET_NETWORK: u32 = 529;

    // ---- ed25519 chains ----
    pub const NEAR: u32 = 397;
    pub const SOLANA: u32 = 501;
    pub const TON: u32 = 607;
    pub const APTOS: u32 = 637;
    pub const SUI: u32 = 784;
    pub const CARDANO: u32 = 1815;
}

// =============================================================================
// DERIVATION PATH
// =============================================================================
/// Ordered list of child indices below the master key. Empty = master key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct DerivationPath(Vec<u32>);

impl DerivationPath {
    /// The root path `m`.
    #[inline]
    pub fn master() -> Self {
        Self(Vec::new())
    }

    #[inline]
    pub fn parse(text: &str) -> KeyResult<Self> {
        Ok(Self(parse_indices(text)?))
    }

    /// Canonical text form; hardened indices always use `'`.
    pub fn encode(&self) -> String {
        self.to_string()
    }

    #[inline]
    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, u32> {
        self.0.iter()
    }

    /// New path with `index` appended.
    pub fn child(&self, index: u32) -> Self {
        let mut indices = Vec::with_capacity(self.0.len() + 1);
        indices.extend_from_slice(&self.0);
        indices.push(index);
        Self(indices)
    }

    /// `true` for the empty path as well.
    pub fn is_fully_hardened(&self) -> bool {
        self.0.iter().all(|&i| is_hardened(i))
    }

    /// Copy the indices into `dest`, which must be exactly [`len`](Self::len) long.
    /// `dest` is untouched when the lengths differ.
    pub fn write_into(&self, dest: &mut [u32]) -> bool {
        if dest.len() != self.0.len() {
            log::debug!(
                "path destination rejected: expected {} slots, got {}",
                self.0.len(),
                dest.len()
            );
            return false;
        }
        dest.copy_from_slice(&self.0);
        true
    }
}

impl FromStr for DerivationPath {
    type Err = crate::error::KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("m")?;
        for &index in &self.0 {
            if is_hardened(index) {
                write!(f, "/{}'", index - HARDENED_OFFSET)?;
            } else {
                write!(f, "/{}", index)?;
            }
        }
        Ok(())
    }
}

impl From<Vec<u32>> for DerivationPath {
    fn from(indices: Vec<u32>) -> Self {
        Self(indices)
    }
}

impl From<&[u32]> for DerivationPath {
    fn from(indices: &[u32]) -> Self {
        Self(indices.to_vec())
    }
}

impl AsRef<[u32]> for DerivationPath {
    fn as_ref(&self) -> &[u32] {
        &self.0
    }
}

impl IntoIterator for DerivationPath {
    type Item = u32;
    type IntoIter = std::vec::IntoIter<u32>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a DerivationPath {
    type Item = &'a u32;
    type IntoIter = std::slice::Iter<'a, u32>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

// =============================================================================
// PARSING
// =============================================================================

fn parse_indices(text: &str) -> Result<Vec<u32>, PathError> {
    if text.is_empty() {
        return Err(PathError::Empty);
    }
    let rest = text.strip_prefix('m').ok_or(PathError::MissingRoot)?;
    if rest.is_empty() {
        return Ok(Vec::new());
    }
    let body = rest.strip_prefix('/').ok_or(PathError::MissingRoot)?;

    body.split('/')
        .enumerate()
        .map(|(segment, part)| parse_segment(segment, part))
        .collect()
}

fn parse_segment(segment: usize, part: &str) -> Result<u32, PathError> {
    if part.is_empty() {
        return Err(PathError::EmptySegment { segment });
    }
    let (digits, hardened) = match part.strip_suffix('\'').or_else(|| part.strip_suffix('h')) {
        Some(digits) => (digits, true),
        None => (part, false),
    };

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(PathError::InvalidSegment {
            segment,
            text: part.to_string(),
        });
    }

    let out_of_range = || PathError::IndexOutOfRange {
        segment,
        text: part.to_string(),
    };
    // digits only, so the only possible failure is overflow
    let value: u32 = digits.parse().map_err(|_| out_of_range())?;
    if is_hardened(value) {
        return Err(out_of_range());
    }

    Ok(if hardened { harden(value) } else { value })
}

/// Parse `text` into `dest`, which must be exactly as long as the parsed path.
/// Returns the number of indices written. `dest` is untouched on error.
pub fn parse_into(text: &str, dest: &mut [u32]) -> KeyResult<usize> {
    let indices = parse_indices(text)?;
    if indices.len() != dest.len() {
        return Err(PathError::DestinationLength {
            expected: indices.len(),
            actual: dest.len(),
        }
        .into());
    }
    dest.copy_from_slice(&indices);
    Ok(indices.len())
}

/// Boolean variant of [`parse_into`].
pub fn try_parse_into(text: &str, dest: &mut [u32]) -> bool {
    match parse_into(text, dest) {
        Ok(_) => true,
        Err(e) => {
            log::debug!("path rejected: {}", e);
            false
        }
    }
}

// =============================================================================
// DERIVATION PATHS
// =============================================================================
/// Pre-built Derivation Paths for common chains
///
/// # Conventions
/// - BIP-44: `m/44'/coin'/account'/change/index` (secp256k1)
/// - SLIP-0010: `m/44'/coin'/account'/...'` (ed25519, all hardened)
pub struct DerivationPaths;

impl DerivationPaths {
    // =========================================================================
    // EVM CHAINS (secp256k1), BIP-44, coin_type = 60
    // =========================================================================
    pub const EVM_0: &'static str = "m/44'/60'/0'/0/0";

    /// `m/44'/60'/0'/0/{account}`
    #[inline]
    pub fn ethereum(account: u32) -> DerivationPath {
        Self::bip44(44, coin_type::ETHEREUM, 0, 0, account)
    }

    // =========================================================================
    // COSMOS SDK (secp256k1), BIP-44, coin_type = 118
    // =========================================================================
    pub const COSMOS_0: &'static str = "m/44'/118'/0'/0/0";

    /// `m/44'/118'/0'/0/{account}`
    #[inline]
    pub fn cosmos(account: u32) -> DerivationPath {
        Self::bip44(44, coin_type::COSMOS, 0, 0, account)
    }

    // =========================================================================
    // BITCOIN (secp256k1), BIP-44 legacy
    // =========================================================================
    pub const BTC_LEGACY_0: &'static str = "m/44'/0'/0'/0/0";

    /// `m/44'/0'/{account}'/0/0`
    #[inline]
    pub fn bitcoin(account: u32) -> DerivationPath {
        Self::bip44(44, coin_type::BITCOIN, account, 0, 0)
    }

    // =========================================================================
    // SOLANA (ed25519), SLIP-0010, all levels hardened
    // =========================================================================
    pub const SOLANA_0: &'static str = "m/44'/501'/0'/0'";

    /// `m/44'/501'/{account}'/0'`
    #[inline]
    pub fn solana(account: u32) -> DerivationPath {
        Self::ed25519_path(coin_type::SOLANA, account, &[0])
    }

    // =========================================================================
    // CUSTOM PATH BUILDERS
    // =========================================================================
    /// `m/{purpose}'/{coin_type}'/{account}'/{change}/{index}`
    ///
    /// # Arguments
    /// * `purpose` - 44 (BIP-44), 49, 84, 86
    /// * `coin_type` - SLIP-44 coin type (see [`coin_type`])
    /// * `account` - Account index (usually 0)
    /// * `change` - 0 = external, 1 = internal (change addresses)
    /// * `index` - Address index
    ///
    /// Values are taken modulo 2^31 for the hardened levels.
    #[inline]
    pub fn bip44(purpose: u32, coin_type: u32, account: u32, change: u32, index: u32) -> DerivationPath {
        DerivationPath(vec![
            harden(purpose),
            harden(coin_type),
            harden(account),
            change,
            index,
        ])
    }

    /// SLIP-0010 path with every level hardened: `m/44'/{coin}'/{account}'/{sub}'...`
    ///
    /// # Verify
    /// - Solana: `ed25519_path(501, 0, &[0])` -> m/44'/501'/0'/0'
    /// - Aptos:  `ed25519_path(637, 0, &[0, 0])` -> m/44'/637'/0'/0'/0'
    /// - Near:   `ed25519_path(397, 0, &[])` -> m/44'/397'/0'
    pub fn ed25519_path(coin_type: u32, account: u32, sub_paths: &[u32]) -> DerivationPath {
        let mut indices = Vec::with_capacity(3 + sub_paths.len());
        indices.extend_from_slice(&[harden(44), harden(coin_type), harden(account)]);
        indices.extend(sub_paths.iter().map(|&i| harden(i)));
        DerivationPath(indices)
    }
}

// =============================================================================
// TESTS
// =============================================================================
