use std::fmt;
use std::io::Read;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256, Sha384, Sha512};

use crate::error::{SriError, SriResult};

/// Digest algorithm of an integrity string.
///
/// The set is closed: any token other than the ones below is rejected when
/// parsing, never silently accepted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    /// SHA-256, 32-byte digest.
    #[default]
    Sha256,
    /// SHA-384, 48-byte digest.
    Sha384,
    /// SHA-512, 64-byte digest.
    Sha512,
}

impl Algorithm {
    /// All supported algorithms, strongest last.
    pub const ALL: [Algorithm; 3] = [Self::Sha256, Self::Sha384, Self::Sha512];

    /// The lowercase token used in the canonical string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sha256 => "sha256",
            Self::Sha384 => "sha384",
            Self::Sha512 => "sha512",
        }
    }

    /// Length of the raw digest in bytes.
    pub fn byte_len(&self) -> usize {
        match self {
            Self::Sha256 => 32,
            Self::Sha384 => 48,
            Self::Sha512 => 64,
        }
    }

    /// Stream `payload` through this algorithm's digest and return the raw
    /// digest bytes.
    pub fn hash<R: Read + ?Sized>(&self, payload: &mut R) -> SriResult<Vec<u8>> {
        match self {
            Self::Sha256 => digest_reader::<Sha256, R>(payload),
            Self::Sha384 => digest_reader::<Sha384, R>(payload),
            Self::Sha512 => digest_reader::<Sha512, R>(payload),
        }
    }

    /// Digest an in-memory payload.
    pub fn hash_bytes(&self, payload: &[u8]) -> Vec<u8> {
        match self {
            Self::Sha256 => Sha256::digest(payload).to_vec(),
            Self::Sha384 => Sha384::digest(payload).to_vec(),
            Self::Sha512 => Sha512::digest(payload).to_vec(),
        }
    }
}

fn digest_reader<D, R>(payload: &mut R) -> SriResult<Vec<u8>>
where
    D: Digest + std::io::Write,
    R: Read + ?Sized,
{
    let mut hasher = D::new();
    std::io::copy(payload, &mut hasher)?;
    Ok(hasher.finalize().to_vec())
}

impl FromStr for Algorithm {
    type Err = SriError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sha256" => Ok(Self::Sha256),
            "sha384" => Ok(Self::Sha384),
            "sha512" => Ok(Self::Sha512),
            other => Err(SriError::InvalidAlgorithm(other.to_string())),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_roundtrip() {
        for algorithm in Algorithm::ALL {
            let parsed: Algorithm = algorithm.as_str().parse().unwrap();
            assert_eq!(parsed, algorithm);
        }
    }

    #[test]
    fn unknown_token_rejected() {
        assert!(matches!(
            "md5".parse::<Algorithm>(),
            Err(SriError::InvalidAlgorithm(_))
        ));
        // Tokens are case-sensitive.
        assert!("SHA256".parse::<Algorithm>().is_err());
    }

    #[test]
    fn digest_lengths_match_byte_len() {
        for algorithm in Algorithm::ALL {
            let digest = algorithm.hash(&mut &b"abc"[..]).unwrap();
            assert_eq!(digest.len(), algorithm.byte_len());
        }
    }

    #[test]
    fn sha256_known_vector() {
        let digest = Algorithm::Sha256.hash(&mut &b"abc"[..]).unwrap();
        assert_eq!(
            hex::encode(digest),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn default_is_sha256() {
        assert_eq!(Algorithm::default(), Algorithm::Sha256);
    }

    #[test]
    fn serde_uses_lowercase_token() {
        let json = serde_json::to_string(&Algorithm::Sha384).unwrap();
        assert_eq!(json, "\"sha384\"");
        let parsed: Algorithm = serde_json::from_str("\"sha512\"").unwrap();
        assert_eq!(parsed, Algorithm::Sha512);
    }
}
