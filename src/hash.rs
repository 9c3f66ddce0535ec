//! Hash primitive dispatch.

use core::fmt;
use core::str::FromStr;

use digest::{Digest, DynDigest};
use sha2::{Sha256, Sha512};
use sha3::{Sha3_256, Sha3_512};

use crate::Error;

/// Hash functions usable for the whole-message digest and the row-group
/// digest tuple.
///
/// The variant names follow the identifiers carried in signature payloads.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum HashAlgorithm {
    /// SHA-256.
    Sha2_256,
    /// SHA-512.
    Sha2_512,
    /// SHA3-256.
    Sha3_256,
    /// SHA3-512.
    Sha3_512,
}

impl HashAlgorithm {
    /// Digest size in bytes.
    pub fn digest_size(self) -> usize {
        match self {
            HashAlgorithm::Sha2_256 | HashAlgorithm::Sha3_256 => 32,
            HashAlgorithm::Sha2_512 | HashAlgorithm::Sha3_512 => 64,
        }
    }

    /// Fresh incremental hasher behind runtime dispatch.
    pub fn digester(self) -> Box<dyn DynDigest> {
        match self {
            HashAlgorithm::Sha2_256 => Box::new(Sha256::new()),
            HashAlgorithm::Sha2_512 => Box::new(Sha512::new()),
            HashAlgorithm::Sha3_256 => Box::new(Sha3_256::new()),
            HashAlgorithm::Sha3_512 => Box::new(Sha3_512::new()),
        }
    }

    /// One-shot digest of `data`.
    pub fn digest(self, data: &[u8]) -> Vec<u8> {
        let mut digester = self.digester();
        digester.update(data);
        digester.finalize().into_vec()
    }

    /// Payload identifier for this algorithm.
    pub fn name(self) -> &'static str {
        match self {
            HashAlgorithm::Sha2_256 => "sha2256",
            HashAlgorithm::Sha2_512 => "sha2512",
            HashAlgorithm::Sha3_256 => "sha3256",
            HashAlgorithm::Sha3_512 => "sha3512",
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HashAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s.to_ascii_lowercase().as_str() {
            "sha2256" => Ok(HashAlgorithm::Sha2_256),
            "sha2512" => Ok(HashAlgorithm::Sha2_512),
            "sha3256" => Ok(HashAlgorithm::Sha3_256),
            "sha3512" => Ok(HashAlgorithm::Sha3_512),
            _ => Err(Error::UnknownIdentifier {
                kind: "hash function",
                value: s.into(),
            }),
        }
    }
}
