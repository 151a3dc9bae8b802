//! API key generation.
//!
//! Keys look like `sk-<kid>-<payload>`:
//! - `kid`: 6 random bytes, hex encoded (12 characters), public lookup handle
//! - `payload`: 32 random bytes, URL-safe base64 without padding (43 characters)
//!
//! Both parts come straight from the operating system's CSPRNG. If that source
//! fails the error is returned as-is; there is no retry and no weaker fallback.

use std::fmt;

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{TryRngCore, rngs::OsRng};
use zeroize::Zeroizing;

/// Leading tag of every issued key.
pub const KEY_PREFIX: &str = "sk";

/// Random bytes in the secret payload (256 bits).
const PAYLOAD_BYTES: usize = 32;

/// Random bytes in the public identifier.
const KID_BYTES: usize = 6;

/// The OS random source could not produce bytes.
#[derive(Debug, thiserror::Error)]
#[error("secure random source unavailable: {0}")]
pub struct RandomSourceError(String);

/// Freshly generated key. The plaintext buffer is wiped when dropped.
pub struct GeneratedKey {
    pub kid: String,
    pub key: Zeroizing<String>,
}

impl fmt::Debug for GeneratedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeneratedKey")
            .field("kid", &self.kid)
            .field("key", &"<redacted>")
            .finish()
    }
}

/// Generate a new key and its public identifier.
pub fn generate_api_key() -> Result<GeneratedKey, RandomSourceError> {
    let mut payload = Zeroizing::new([0u8; PAYLOAD_BYTES]);
    fill_random(&mut payload[..])?;

    let mut kid = [0u8; KID_BYTES];
    fill_random(&mut kid)?;
    let kid = hex::encode(kid);

    // Sized up front so appending never reallocates and strands a copy of the secret.
    let encoded_len = (PAYLOAD_BYTES * 4).div_ceil(3);
    let mut key = Zeroizing::new(String::with_capacity(
        KEY_PREFIX.len() + kid.len() + encoded_len + 2,
    ));
    key.push_str(KEY_PREFIX);
    key.push('-');
    key.push_str(&kid);
    key.push('-');
    URL_SAFE_NO_PAD.encode_string(&payload[..], &mut key);

    Ok(GeneratedKey { kid, key })
}

/// Draw a few bytes to prove the random source works. Called once at startup.
pub fn check_random_source() -> Result<(), RandomSourceError> {
    let mut sample = [0u8; 8];
    fill_random(&mut sample)
}

/// Recover the `kid` embedded in a well-formed key.
///
/// Diagnostic only: validation always goes through the hash.
pub fn kid_from_key(key: &str) -> Option<&str> {
    let rest = key.strip_prefix(KEY_PREFIX)?.strip_prefix('-')?;
    let (kid, payload) = rest.split_once('-')?;

    let well_formed = kid.len() == KID_BYTES * 2
        && kid.bytes().all(|b| b.is_ascii_hexdigit())
        && !payload.is_empty();

    well_formed.then_some(kid)
}

fn fill_random(buf: &mut [u8]) -> Result<(), RandomSourceError> {
    OsRng
        .try_fill_bytes(buf)
        .map_err(|err| RandomSourceError(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn key_has_expected_shape() {
        let generated = generate_api_key().unwrap();

        assert_eq!(generated.kid.len(), 12);
        assert!(generated.kid.bytes().all(|b| b.is_ascii_hexdigit()));

        let expected_prefix = format!("sk-{}-", generated.kid);
        assert!(generated.key.starts_with(&expected_prefix));

        let payload = &generated.key.as_str()[expected_prefix.len()..];
        // 32 bytes base64-encoded without padding = 43 chars
        assert_eq!(payload.len(), 43);
        assert!(
            payload
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
        );
    }

    #[test]
    fn payload_decodes_to_32_bytes() {
        let generated = generate_api_key().unwrap();
        let payload = &generated.key.as_str()[format!("sk-{}-", generated.kid).len()..];

        let decoded = URL_SAFE_NO_PAD.decode(payload).unwrap();
        assert_eq!(decoded.len(), PAYLOAD_BYTES);
    }

    #[test]
    fn keys_and_kids_do_not_repeat() {
        let mut kids = HashSet::new();
        let mut keys = HashSet::new();

        for _ in 0..10_000 {
            let generated = generate_api_key().unwrap();
            assert!(kids.insert(generated.kid));
            assert!(keys.insert(generated.key.to_string()));
        }
    }

    #[test]
    fn kid_is_recoverable_from_key() {
        let generated = generate_api_key().unwrap();
        assert_eq!(kid_from_key(&generated.key), Some(generated.kid.as_str()));
    }

    #[test]
    fn payload_dashes_do_not_confuse_kid_extraction() {
        assert_eq!(
            kid_from_key("sk-0123456789ab-a-b-c_d"),
            Some("0123456789ab")
        );
    }

    #[test]
    fn malformed_keys_have_no_kid() {
        assert_eq!(kid_from_key(""), None);
        assert_eq!(kid_from_key("pk-0123456789ab-payload"), None);
        assert_eq!(kid_from_key("sk0123456789ab-payload"), None);
        assert_eq!(kid_from_key("sk-0123-payload"), None);
        assert_eq!(kid_from_key("sk-zzzzzzzzzzzz-payload"), None);
        assert_eq!(kid_from_key("sk-0123456789ab-"), None);
        assert_eq!(kid_from_key("sk-0123456789ab"), None);
    }

    #[test]
    fn debug_output_hides_plaintext() {
        let generated = generate_api_key().unwrap();
        let rendered = format!("{generated:?}");

        assert!(rendered.contains(&generated.kid));
        assert!(!rendered.contains(generated.key.as_str()));
    }

    #[test]
    fn key_buffer_never_outgrows_its_allocation() {
        let generated = generate_api_key().unwrap();
        // A reallocation would leave an unwiped copy of the key behind.
        assert_eq!(generated.key.len(), generated.key.capacity());
    }

    #[test]
    fn key_buffer_is_wiped_on_zeroize() {
        use zeroize::Zeroize;

        let mut generated = generate_api_key().unwrap();
        generated.key.zeroize();
        assert!(generated.key.is_empty());
    }

    #[test]
    fn random_source_is_available() {
        assert!(check_random_source().is_ok());
    }
}
