// hdkey-core/src/crypto/mod.rs

//! Core Cryptography Module
//!
//! - **Seed Stretching**: BIP-39 mnemonic + passphrase to 64-byte seed via [`stretch_seed`].
//! - **Curve Profiles**: Weierstrass (secp256k1, BIP-32) and Edwards (ed25519, SLIP-0010) families via [`Curve`].
//! - **Key Derivation**: master key and path walking via [`DerivationEngine`].
//! - **Derivation Paths**: `m/44'/60'/0'/0/0` parsing/encoding and coin path builders via [`DerivationPath`] and [`DerivationPaths`].

pub mod curve;
pub mod engine;
pub mod extended_key;
pub mod mnemonic;
pub mod paths;

// Re-exports for cleaner API access
pub use curve::{Curve, CurveProfile};
pub use engine::{derive_path, DerivationEngine, DerivedKey};
pub use extended_key::ExtendedKey;
pub use mnemonic::{stretch_seed, try_stretch_seed_into};
pub use paths::{coin_type, DerivationPath, DerivationPaths, HARDENED_OFFSET};
