//! Keyed hashing of API keys.
//!
//! Keys are stored as `hex(HMAC-SHA256(secret, key))`. The output is
//! deterministic, so validation is a single equality lookup on the hash column.
//! Without the server secret a leaked hash table cannot be brute-forced offline.

use std::fmt;

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// The secret could not be used as an HMAC key.
#[derive(Debug, thiserror::Error)]
#[error("HMAC secret rejected")]
pub struct InvalidSecret;

/// HMAC-SHA256 hasher keyed with the server signing secret.
///
/// Holds a pre-keyed MAC and clones it per call, so hashing never re-derives the key.
#[derive(Clone)]
pub struct KeyHasher {
    mac: HmacSha256,
}

impl KeyHasher {
    pub fn new(secret: &str) -> Result<Self, InvalidSecret> {
        let mac = HmacSha256::new_from_slice(secret.as_bytes()).map_err(|_| InvalidSecret)?;
        Ok(Self { mac })
    }

    /// Hash a plaintext key into 64 lowercase hex characters.
    pub fn hash(&self, key: &str) -> String {
        let mut mac = self.mac.clone();
        mac.update(key.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }
}

impl fmt::Debug for KeyHasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("KeyHasher { .. }")
    }
}
