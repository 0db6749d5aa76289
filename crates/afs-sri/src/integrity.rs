use std::fmt;
use std::io::Read;
use std::str::FromStr;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::algorithm::Algorithm;
use crate::error::{SriError, SriResult};

/// Content-addressed identifier for a payload.
///
/// An `Integrity` pairs an [`Algorithm`] with the raw digest it produced.
/// Two values are equal iff both the algorithm and the digest bytes are
/// equal. The only externally visible encoding is the canonical string
/// `"<algorithm>-<base64(hash)>"` produced by `Display`, using standard
/// (padded, not URL-safe) base64.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Integrity {
    algorithm: Algorithm,
    hash: Vec<u8>,
}

impl Integrity {
    /// Create from a pre-computed digest, checking its length.
    pub fn new(algorithm: Algorithm, hash: Vec<u8>) -> SriResult<Self> {
        if hash.len() != algorithm.byte_len() {
            return Err(SriError::LengthMismatch {
                algorithm,
                expected: algorithm.byte_len(),
                actual: hash.len(),
            });
        }
        Ok(Self { algorithm, hash })
    }

    /// Parse a canonical integrity string.
    ///
    /// The algorithm token is everything before the first `-`; the rest must
    /// be standard base64 decoding to exactly the algorithm's digest length.
    pub fn parse(s: &str) -> SriResult<Self> {
        let (token, encoded) = s
            .split_once('-')
            .ok_or_else(|| SriError::InvalidAlgorithm(s.to_string()))?;
        let algorithm: Algorithm = token.parse()?;
        let hash = STANDARD
            .decode(encoded)
            .map_err(|e| SriError::InvalidEncoding(e.to_string()))?;
        Self::new(algorithm, hash)
    }

    /// Compute the integrity of a payload by streaming it through the digest.
    pub fn from_reader<R: Read + ?Sized>(algorithm: Algorithm, payload: &mut R) -> SriResult<Self> {
        let hash = algorithm.hash(payload)?;
        Ok(Self { algorithm, hash })
    }

    /// Compute the integrity of an in-memory payload.
    pub fn from_bytes(algorithm: Algorithm, payload: &[u8]) -> Self {
        Self {
            algorithm,
            hash: algorithm.hash_bytes(payload),
        }
    }

    /// Recompute the digest over `payload` and compare it with the stored one.
    pub fn validate<R: Read + ?Sized>(&self, payload: &mut R) -> SriResult<()> {
        let computed = self.algorithm.hash(payload)?;
        if computed != self.hash {
            return Err(SriError::Mismatch {
                algorithm: self.algorithm,
                expected: STANDARD.encode(&self.hash),
                computed: STANDARD.encode(&computed),
            });
        }
        Ok(())
    }

    /// The digest algorithm.
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// The raw digest bytes.
    pub fn hash(&self) -> &[u8] {
        &self.hash
    }

    /// Hex-encoded digest (without the algorithm token).
    pub fn to_hex(&self) -> String {
        hex::encode(&self.hash)
    }

    /// Short hex representation (first 8 characters).
    pub fn short_hex(&self) -> String {
        hex::encode(&self.hash[..4])
    }
}

impl fmt::Display for Integrity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.algorithm, STANDARD.encode(&self.hash))
    }
}

impl fmt::Debug for Integrity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Integrity({}:{})", self.algorithm, self.short_hex())
    }
}

impl FromStr for Integrity {
    type Err = SriError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Integrity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Integrity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
