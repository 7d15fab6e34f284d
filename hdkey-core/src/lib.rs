// hdkey-core/src/lib.rs

//! Hierarchical-deterministic key derivation.
//!
//! BIP-39 seed stretching, BIP-32 / SLIP-0010 master and child keys on
//! secp256k1 and ed25519, BIP-44 paths, and a signing key handle.
//!
//! ```no_run
//! use hdkey_core::{Curve, DerivationPaths, KeyMaterial};
//!
//! let key = KeyMaterial::from_mnemonic(
//!     Curve::Secp256k1,
//!     "ripple scissors kick mammal hire column oak again sun offer wealth tomorrow wagon turn fatal",
//!     None,
//!     &DerivationPaths::ethereum(0),
//! )?;
//! let signature = key.sign(b"hello")?;
//! assert!(key.verify(b"hello", &signature));
//! # Ok::<(), hdkey_core::KeyError>(())
//! ```

pub mod config;
pub mod crypto;
pub mod error;
pub mod wallet;

pub use config::EngineConfig;
pub use crypto::{
    derive_path, stretch_seed, Curve, DerivationEngine, DerivationPath, DerivationPaths,
    ExtendedKey,
};
pub use error::{ErrorKind, KeyError, KeyResult};
pub use wallet::KeyMaterial;
