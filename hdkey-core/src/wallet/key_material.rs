// hdkey-core/src/wallet/key_material.rs
//
// KeyMaterial - derived key pair + signing
// mnemonic -> seed -> path -> private key -> public key (computed once)

use crate::crypto::curve::{Curve, CurveProfile};
use crate::crypto::engine::derive_path;
use crate::crypto::extended_key::KEY_LEN;
use crate::crypto::mnemonic::stretch_seed;
use crate::crypto::paths::DerivationPath;
use crate::error::{CryptoError, KeyResult};
use zeroize::Zeroizing;

/// Private key + cached public key for one curve.
///
/// # Security Architecture
/// - **Zeroize on drop**: private key lives in `Zeroizing<[u8; 32]>`
/// - **No Debug Leak**: custom Debug impl never prints the private key
/// - **Immutable**: signing takes `&self`; safe to share across threads
pub struct KeyMaterial {
    curve: Curve,
    private_key: Zeroizing<[u8; KEY_LEN]>,
    public_key: Vec<u8>,
}

// Custom Debug - never print the private key
impl std::fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyMaterial")
            .field("curve", &self.curve)
            .field("public_key", &self.public_key)
            .finish_non_exhaustive()
    }
}

impl KeyMaterial {
    // =========================================================================
    // CONSTRUCTORS
    // =========================================================================

    /// Wrap a raw private key.
    ///
    /// # Arguments
    /// * `curve` - Curve the key belongs to
    /// * `private_key` - 32 bytes; on Weierstrass curves must be in `[1, n-1]`
    pub fn from_private_key(curve: Curve, private_key: &[u8]) -> KeyResult<Self> {
        if private_key.len() != KEY_LEN {
            return Err(CryptoError::InvalidKeyFormat(format!(
                "Private key must be {} bytes, got {}",
                KEY_LEN,
                private_key.len()
            ))
            .into());
        }
        let profile = curve.profile();
        if !profile.is_valid_private_key(private_key) {
            return Err(CryptoError::InvalidPrivateKey(format!(
                "scalar out of range for {}",
                profile.name()
            ))
            .into());
        }

        let mut key = Zeroizing::new([0u8; KEY_LEN]);
        key.copy_from_slice(private_key);
        let public_key = profile.public_key(&key)?;

        Ok(Self {
            curve,
            private_key: key,
            public_key,
        })
    }

    pub fn from_seed(curve: Curve, seed: &[u8], path: &DerivationPath) -> KeyResult<Self> {
        let node = derive_path(curve, seed, path.as_slice())?;
        Self::from_private_key(curve, node.private_key())
    }

    pub fn from_seed_str(curve: Curve, seed: &[u8], path: &str) -> KeyResult<Self> {
        Self::from_seed(curve, seed, &DerivationPath::parse(path)?)
    }

    /// Stretch `mnemonic` (BIP-39) and derive the key at `path`.
    ///
    /// # Arguments
    /// * `mnemonic` - Mnemonic phrase
    /// * `passphrase` - Optional BIP-39 passphrase
    /// * `path` - Derivation path (see [`DerivationPaths`](crate::crypto::DerivationPaths))
    pub fn from_mnemonic(
        curve: Curve,
        mnemonic: &str,
        passphrase: Option<&str>,
        path: &DerivationPath,
    ) -> KeyResult<Self> {
        let seed = stretch_seed(mnemonic, passphrase)?;
        Self::from_seed(curve, &seed[..], path)
    }

    pub fn from_mnemonic_str(
        curve: Curve,
        mnemonic: &str,
        passphrase: Option<&str>,
        path: &str,
    ) -> KeyResult<Self> {
        Self::from_mnemonic(curve, mnemonic, passphrase, &DerivationPath::parse(path)?)
    }

    // =========================================================================
    // GETTERS
    // =========================================================================

    #[inline]
    pub fn curve(&self) -> Curve {
        self.curve
    }

    /// Compressed SEC1 point (33 bytes) on secp256k1, raw point (32 bytes) on ed25519.
    #[inline]
    pub fn public_key(&self) -> &[u8] {
        &self.public_key
    }

    /// Private key bytes
    ///
    /// # Warning
    /// Sensitive; do not log or display this value.
    #[inline]
    pub fn private_key(&self) -> &[u8; KEY_LEN] {
        &self.private_key
    }

    /// 65-byte uncompressed point. Weierstrass curves only.
    pub fn uncompressed_public_key(&self) -> KeyResult<Vec<u8>> {
        match self.curve.profile() {
            CurveProfile::Weierstrass(p) => Ok(p.uncompressed_point(&self.private_key)?.to_vec()),
            CurveProfile::Edwards(p) => Err(CryptoError::Unsupported {
                curve: p.name,
                operation: "uncompressed public key",
            }
            .into()),
        }
    }

    /// Copy the public key into `dest`, which must be exactly `public_key().len()` bytes.
    pub fn try_public_key_into(&self, dest: &mut [u8]) -> bool {
        if dest.len() != self.public_key.len() {
            log::debug!(
                "public key destination is {} bytes, expected {}",
                dest.len(),
                self.public_key.len()
            );
            return false;
        }
        dest.copy_from_slice(&self.public_key);
        true
    }

    // =========================================================================
    // SIGNING
    // =========================================================================

    /// Sign `message`.
    ///
    /// - secp256k1: RFC 6979 ECDSA over SHA-256(message), 64-byte `r || s`
    /// - ed25519: pure Ed25519, 64 bytes
    pub fn sign(&self, message: &[u8]) -> KeyResult<Vec<u8>> {
        self.curve.profile().sign(&self.private_key, message)
    }

    /// Sign into `dest`, which must be exactly the curve's signature length.
    pub fn try_sign_into(&self, message: &[u8], dest: &mut [u8]) -> bool {
        let expected = self.curve.profile().signature_len();
        if dest.len() != expected {
            log::debug!(
                "signature destination is {} bytes, expected {}",
                dest.len(),
                expected
            );
            return false;
        }
        match self.sign(message) {
            Ok(signature) => {
                dest.copy_from_slice(&signature);
                true
            }
            Err(e) => {
                log::debug!("signing rejected: {}", e);
                false
            }
        }
    }

    /// 64-byte signature + 1-byte recovery id. Weierstrass curves only.
    pub fn sign_recoverable(&self, message: &[u8]) -> KeyResult<Vec<u8>> {
        match self.curve.profile() {
            CurveProfile::Weierstrass(p) => {
                Ok(p.sign_recoverable(&self.private_key, message)?.to_vec())
            }
            CurveProfile::Edwards(p) => Err(CryptoError::Unsupported {
                curve: p.name,
                operation: "recoverable signature",
            }
            .into()),
        }
    }

    /// Verify a signature against this key's public key.
    pub fn verify(&self, message: &[u8], signature: &[u8]) -> bool {
        self.curve
            .profile()
            .verify(&self.public_key, message, signature)
    }
}

// =============================================================================
// UNIT TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::curve::secp256k1::ORDER;
    use crate::crypto::paths::DerivationPaths;
    use crate::error::{ErrorKind, KeyError};

    const SECP_MASTER_KEY: &str = "e8f32e723decf4051aefac8e2c93c9c5b214313817cdb01a1494b917c8436b35";
    const ED_MASTER_KEY: &str = "2b4be7f19ee27bbf30c667b642d5f4aa69fd169872f8fc3059c08ebae2eb19e7";

    fn secp_key() -> KeyMaterial {
        KeyMaterial::from_private_key(Curve::Secp256k1, &hex::decode(SECP_MASTER_KEY).unwrap())
            .expect("Create key material")
    }

    fn ed_key() -> KeyMaterial {
        KeyMaterial::from_private_key(Curve::Ed25519, &hex::decode(ED_MASTER_KEY).unwrap())
            .expect("Create key material")
    }

    #[test]
    fn test_public_key_derivation() {
        assert_eq!(
            hex::encode(secp_key().public_key()),
            "0339a36013301597daef41fbe593a02cc513d0b55527ec2df1050e2e8ff49c85c2"
        );
        assert_eq!(
            hex::encode(ed_key().public_key()),
            "a4b2856bfec510abab89753fac1ac0e1112364e7d250545963f135f2a33188ed"
        );
    }

    #[test]
    fn test_invalid_private_key() {
        let err = KeyMaterial::from_private_key(Curve::Secp256k1, &[1u8; 31]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InputValidation);

        let err = KeyMaterial::from_private_key(Curve::Secp256k1, &[0u8; 32]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidKeyMaterial);

        assert!(KeyMaterial::from_private_key(Curve::Secp256k1, &ORDER).is_err());
        assert!(KeyMaterial::from_private_key(Curve::Ed25519, &[0u8; 32]).is_ok());
    }

    #[test]
    fn test_sign_and_verify() {
        for key in [secp_key(), ed_key()] {
            let sig = key.sign(b"Hello, HD wallet!").expect("Sign message");
            assert_eq!(sig.len(), 64);
            assert!(key.verify(b"Hello, HD wallet!", &sig));
            assert!(!key.verify(b"Tampered", &sig));
        }
    }

    #[test]
    fn test_try_sign_into_buffer_contract() {
        let key = secp_key();
        let mut short = [0u8; 63];
        assert!(!key.try_sign_into(b"msg", &mut short));
        assert!(short.iter().all(|&b| b == 0));

        let mut recoverable_sized = [0u8; 65];
        assert!(!key.try_sign_into(b"msg", &mut recoverable_sized));

        let mut dest = [0u8; 64];
        assert!(key.try_sign_into(b"msg", &mut dest));
        assert_eq!(dest.to_vec(), key.sign(b"msg").unwrap());
    }

    #[test]
    fn test_try_public_key_into() {
        let key = ed_key();
        let mut wrong = [0u8; 33];
        assert!(!key.try_public_key_into(&mut wrong));
        assert!(wrong.iter().all(|&b| b == 0));

        let mut dest = [0u8; 32];
        assert!(key.try_public_key_into(&mut dest));
        assert_eq!(&dest[..], key.public_key());
    }

    #[test]
    fn test_recoverable_and_uncompressed_weierstrass_only() {
        let key = secp_key();
        let sig = key.sign_recoverable(b"msg").unwrap();
        assert_eq!(sig.len(), 65);
        assert!(sig[64] <= 3);
        assert!(key.verify(b"msg", &sig[..64]));
        assert_eq!(key.uncompressed_public_key().unwrap().len(), 65);

        let ed = ed_key();
        let err = ed.sign_recoverable(b"msg").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedOperation);
        assert!(matches!(
            ed.uncompressed_public_key(),
            Err(KeyError::Crypto(CryptoError::Unsupported { .. }))
        ));
    }

    #[test]
    fn test_from_mnemonic_ethereum() {
        let key = KeyMaterial::from_mnemonic(
            Curve::Secp256k1,
            "ripple scissors kick mammal hire column oak again sun offer wealth tomorrow wagon turn fatal",
            None,
            &DerivationPaths::ethereum(0),
        )
        .unwrap();
        assert_eq!(
            hex::encode(key.private_key()),
            "ab4accc9310d90a61fc354d8f353bca4a2b3c0590685d3eb82d0216af3badddc"
        );
    }

    #[test]
    fn test_from_seed_str_rejects_soft_ed25519_path() {
        let seed = [0x11u8; 64];
        assert!(KeyMaterial::from_seed_str(Curve::Ed25519, &seed, DerivationPaths::SOLANA_0).is_ok());
        let err = KeyMaterial::from_seed_str(Curve::Ed25519, &seed, DerivationPaths::EVM_0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedOperation);
    }

    #[test]
    fn test_debug_does_not_leak_key() {
        let debug_output = format!("{:?}", secp_key());
        assert!(!debug_output.contains(SECP_MASTER_KEY));
        assert!(!debug_output.contains("232, 243, 46"));
        assert!(debug_output.contains("KeyMaterial"));
        assert!(debug_output.contains("Secp256k1"));
    }
}
