//! Core types for the fileguard integrity monitor.

use crate::error::StorageError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Hash: raw 256-bit hash value
pub type Hash = [u8; 32];

/// Length of a digest in its hex text form
pub const DIGEST_HEX_LEN: usize = 64;

/// Content digest of a single file.
///
/// Serialized as 64 lowercase hex characters so baselines stay diffable.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Digest(Hash);

impl Digest {
    pub const fn from_bytes(bytes: Hash) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &Hash {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from hex. Accepts either case; rejects any length but 64.
    pub fn from_hex(text: &str) -> Result<Self, StorageError> {
        if text.len() != DIGEST_HEX_LEN {
            return Err(StorageError::InvalidDigest(format!(
                "expected {} hex characters, got {}",
                DIGEST_HEX_LEN,
                text.len()
            )));
        }
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(text, &mut bytes)
            .map_err(|e| StorageError::InvalidDigest(format!("{}: {}", text, e)))?;
        Ok(Self(bytes))
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({})", self.to_hex())
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Digest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Digest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Digest::from_hex(&text).map_err(serde::de::Error::custom)
    }
}

/// Hash function used for file content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    #[default]
    Sha256,
    Blake3,
}

impl HashAlgorithm {
    pub fn as_str(&self) -> &'static str {
        match self {
            HashAlgorithm::Sha256 => "sha256",
            HashAlgorithm::Blake3 => "blake3",
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HashAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sha256" | "sha-256" => Ok(HashAlgorithm::Sha256),
            "blake3" => Ok(HashAlgorithm::Blake3),
            other => Err(format!(
                "Unknown hash algorithm: {} (must be 'sha256' or 'blake3')",
                other
            )),
        }
    }
}

/// State of one path inside a snapshot.
///
/// `Unreadable` marks a file that was found during enumeration but could not
/// be hashed. It is persisted as JSON `null`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<Digest>", into = "Option<Digest>")]
pub enum EntryState {
    Hashed(Digest),
    Unreadable,
}

impl EntryState {
    pub fn digest(&self) -> Option<&Digest> {
        match self {
            EntryState::Hashed(digest) => Some(digest),
            EntryState::Unreadable => None,
        }
    }

    pub fn is_unreadable(&self) -> bool {
        matches!(self, EntryState::Unreadable)
    }
}

impl From<Option<Digest>> for EntryState {
    fn from(value: Option<Digest>) -> Self {
        match value {
            Some(digest) => EntryState::Hashed(digest),
            None => EntryState::Unreadable,
        }
    }
}

impl From<EntryState> for Option<Digest> {
    fn from(value: EntryState) -> Self {
        match value {
            EntryState::Hashed(digest) => Some(digest),
            EntryState::Unreadable => None,
        }
    }
}
