// hdkey-core/src/wallet/mod.rs

//! Wallet-facing key handle: seed or mnemonic in, public key and signatures out.

pub mod key_material;

pub use key_material::KeyMaterial;
