//! Credential hashing
//!
//! Secrets are reduced to a SHA-256 digest rendered as lowercase hex. The
//! digest is what gets stored and compared; the plaintext never leaves the
//! caller.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Length of a hex-encoded SHA-256 digest.
pub const DIGEST_HEX_LEN: usize = 64;

/// A stored password digest.
///
/// Only constructible by hashing a secret or by adopting a string that is
/// already shaped like a digest.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PasswordDigest(String);

impl PasswordDigest {
    /// Adopt an existing hex digest. Returns `None` for anything that is not
    /// 64 lowercase hex characters.
    pub fn from_hex(value: &str) -> Option<Self> {
        if is_digest_shaped(value) {
            Some(Self(value.to_string()))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PasswordDigest({}..)", &self.0[..8])
    }
}

impl TryFrom<String> for PasswordDigest {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if is_digest_shaped(&value) {
            Ok(Self(value))
        } else {
            Err("expected a 64 character lowercase hex digest".to_string())
        }
    }
}

impl From<PasswordDigest> for String {
    fn from(digest: PasswordDigest) -> Self {
        digest.0
    }
}

/// Hash a secret. Any string is accepted, including the empty one.
pub fn hash(secret: &str) -> PasswordDigest {
    let digest = Sha256::digest(secret.as_bytes());
    PasswordDigest(hex::encode(digest))
}

/// Check a candidate secret against a stored digest.
pub fn verify(candidate: &str, digest: &PasswordDigest) -> bool {
    hash(candidate) == *digest
}

fn is_digest_shaped(value: &str) -> bool {
    value.len() == DIGEST_HEX_LEN
        && value
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}
