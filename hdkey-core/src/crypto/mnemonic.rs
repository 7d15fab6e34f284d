// hdkey-core/src/crypto/mnemonic.rs
//
// Mnemonic Module - BIP-39 seed stretching
// seed = PBKDF2-HMAC-SHA512(password = NFKD(mnemonic),
//                           salt     = "mnemonic" || NFKD(passphrase),
//                           rounds   = 2048, dkLen = 64)
//
// Phrase generation and wordlist checks are not done here; any non-empty
// phrase is stretched as-is.

use crate::error::{KeyResult, MnemonicError};
use pbkdf2::pbkdf2_hmac;
use sha2::Sha512;
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, Zeroizing};

pub const SEED_LEN: usize = 64;
pub const PBKDF2_ROUNDS: u32 = 2048;
pub const SALT_PREFIX: &str = "mnemonic";

/// Normalized inputs up to this many bytes are kept in a stack buffer.
pub const INLINE_SCRATCH_LIMIT: usize = 1024;

// =============================================================================
// SCRATCH BUFFER
// =============================================================================

/// NFKD-normalized UTF-8 bytes of `prefix || text`. Wiped on drop.
enum Scratch {
    Inline {
        buf: [u8; INLINE_SCRATCH_LIMIT],
        len: usize,
    },
    Heap(Vec<u8>),
}

impl Scratch {
    fn normalized(prefix: &str, text: &str) -> Self {
        let len = prefix.len() + text.nfkd().map(char::len_utf8).sum::<usize>();

        let mut scratch = if len <= INLINE_SCRATCH_LIMIT {
            Scratch::Inline {
                buf: [0u8; INLINE_SCRATCH_LIMIT],
                len: 0,
            }
        } else {
            log::trace!("normalized input is {} bytes, using heap scratch", len);
            // exact capacity: no reallocation leaves stale copies behind
            Scratch::Heap(Vec::with_capacity(len))
        };

        let mut utf8 = [0u8; 4];
        for c in prefix.chars().chain(text.nfkd()) {
            let bytes = c.encode_utf8(&mut utf8).as_bytes();
            match &mut scratch {
                Scratch::Inline { buf, len } => {
                    buf[*len..*len + bytes.len()].copy_from_slice(bytes);
                    *len += bytes.len();
                }
                Scratch::Heap(v) => v.extend_from_slice(bytes),
            }
        }
        utf8.zeroize();
        scratch
    }

    fn as_bytes(&self) -> &[u8] {
        match self {
            Scratch::Inline { buf, len } => &buf[..*len],
            Scratch::Heap(v) => v,
        }
    }
}

impl Drop for Scratch {
    fn drop(&mut self) {
        match self {
            Scratch::Inline { buf, .. } => buf.zeroize(),
            Scratch::Heap(v) => v.zeroize(),
        }
    }
}

// =============================================================================
// SEED STRETCHING
// =============================================================================

/// Stretch a mnemonic phrase into a 64-byte BIP-39 seed.
///
/// # Arguments
/// * `mnemonic` - Phrase, any Unicode form (normalized to NFKD)
/// * `passphrase` - Optional BIP-39 passphrase; `None` is the same as `""`
///
/// # Returns
/// 64-byte seed wrapped in `Zeroizing`
pub fn stretch_seed(mnemonic: &str, passphrase: Option<&str>) -> KeyResult<Zeroizing<[u8; SEED_LEN]>> {
    let mut seed = Zeroizing::new([0u8; SEED_LEN]);
    stretch_seed_into(&mut seed[..], mnemonic, passphrase)?;
    Ok(seed)
}

/// Write the seed into `dest`, which must be exactly [`SEED_LEN`] bytes.
/// Nothing is written on error.
pub fn stretch_seed_into(dest: &mut [u8], mnemonic: &str, passphrase: Option<&str>) -> KeyResult<()> {
    if mnemonic.is_empty() {
        return Err(MnemonicError::Empty.into());
    }
    if dest.len() != SEED_LEN {
        return Err(MnemonicError::DestinationLength {
            expected: SEED_LEN,
            actual: dest.len(),
        }
        .into());
    }

    let password = Scratch::normalized("", mnemonic);
    let salt = Scratch::normalized(SALT_PREFIX, passphrase.unwrap_or(""));
    pbkdf2_hmac::<Sha512>(password.as_bytes(), salt.as_bytes(), PBKDF2_ROUNDS, dest);
    Ok(())
}

/// Boolean variant of [`stretch_seed_into`].
pub fn try_stretch_seed_into(dest: &mut [u8], mnemonic: &str, passphrase: Option<&str>) -> bool {
    match stretch_seed_into(dest, mnemonic, passphrase) {
        Ok(()) => true,
        Err(e) => {
            log::debug!("seed stretching rejected: {}", e);
            false
        }
    }
}

// =============================================================================
// UNIT TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::KeyError;

    const RIPPLE_MNEMONIC: &str =
        "ripple scissors kick mammal hire column oak again sun offer wealth tomorrow wagon turn fatal";
    const RIPPLE_SEED: &str = "354c22aedb9a37407adc61f657a6f00d10ed125efa360215f36c6919abd94d6dbc193a5f9c495e21ee74118661e327e84a5f5f11fa373ec33b80897d4697557d";

    // BIP-39 reference vector (passphrase "TREZOR")
    const ABANDON_MNEMONIC: &str =
        "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";
    const ABANDON_TREZOR_SEED: &str = "c55257c360c07c72029aebc1b53c05ed0362ada38ead3e3e9efa3708e53495531f09a6987599d18264c1e1c92f2cf141630c7a3c4ab7c81b2f001698e7463b04";

    #[test]
    fn test_seed_vector_empty_passphrase() {
        let seed = stretch_seed(RIPPLE_MNEMONIC, None).unwrap();
        assert_eq!(hex::encode(&seed[..]), RIPPLE_SEED);

        let seed = stretch_seed(RIPPLE_MNEMONIC, Some("")).unwrap();
        assert_eq!(hex::encode(&seed[..]), RIPPLE_SEED);
    }

    #[test]
    fn test_seed_vector_with_passphrase() {
        let seed = stretch_seed(ABANDON_MNEMONIC, Some("TREZOR")).unwrap();
        assert_eq!(hex::encode(&seed[..]), ABANDON_TREZOR_SEED);

        let no_pass = stretch_seed(ABANDON_MNEMONIC, None).unwrap();
        assert_ne!(&seed[..], &no_pass[..]);
    }

    #[test]
    fn test_nfkd_normalization() {
        // precomposed U+00E9 vs 'e' + U+0301
        let composed = stretch_seed("caf\u{e9}", Some("pass\u{e9}")).unwrap();
        let decomposed = stretch_seed("cafe\u{301}", Some("passe\u{301}")).unwrap();
        assert_eq!(&composed[..], &decomposed[..]);
    }

    #[test]
    fn test_long_mnemonic_uses_heap_scratch() {
        let long = "abandon ".repeat(200);
        assert!(long.len() > INLINE_SCRATCH_LIMIT);

        let seed = stretch_seed(&long, None).unwrap();
        let mut expected = [0u8; SEED_LEN];
        pbkdf2_hmac::<Sha512>(long.as_bytes(), b"mnemonic", PBKDF2_ROUNDS, &mut expected);
        assert_eq!(&seed[..], &expected[..]);
    }

    #[test]
    fn test_scratch_boundary() {
        let exact = "a".repeat(INLINE_SCRATCH_LIMIT);
        assert!(matches!(
            Scratch::normalized("", &exact),
            Scratch::Inline { len: INLINE_SCRATCH_LIMIT, .. }
        ));
        let over = "a".repeat(INLINE_SCRATCH_LIMIT + 1);
        let scratch = Scratch::normalized("", &over);
        assert!(matches!(scratch, Scratch::Heap(_)));
        assert_eq!(scratch.as_bytes(), over.as_bytes());
    }

    #[test]
    fn test_empty_mnemonic_rejected() {
        assert_eq!(
            stretch_seed("", None).unwrap_err(),
            KeyError::Mnemonic(MnemonicError::Empty)
        );
    }

    #[test]
    fn test_whitespace_mnemonic_is_stretched_verbatim() {
        // only the empty string is rejected; word checks belong to the caller
        let spaces = stretch_seed("   ", None).unwrap();
        let mut expected = [0u8; SEED_LEN];
        pbkdf2_hmac::<Sha512>(b"   ", b"mnemonic", PBKDF2_ROUNDS, &mut expected);
        assert_eq!(&spaces[..], &expected[..]);
        assert_ne!(&spaces[..], &stretch_seed(" ", None).unwrap()[..]);
    }

    #[test]
    fn test_try_into_buffer_contract() {
        let mut short = [7u8; 63];
        assert!(!try_stretch_seed_into(&mut short, RIPPLE_MNEMONIC, None));
        assert!(short.iter().all(|&b| b == 7));

        let mut long = [7u8; 65];
        assert!(!try_stretch_seed_into(&mut long, RIPPLE_MNEMONIC, None));
        assert!(long.iter().all(|&b| b == 7));

        let mut dest = [7u8; SEED_LEN];
        assert!(!try_stretch_seed_into(&mut dest, "", None));
        assert!(dest.iter().all(|&b| b == 7));

        assert!(try_stretch_seed_into(&mut dest, RIPPLE_MNEMONIC, None));
        assert_eq!(hex::encode(dest), RIPPLE_SEED);
    }
}
