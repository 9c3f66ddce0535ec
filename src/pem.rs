//! Public-key PEM import and export.
//!
//! Classical keys round-trip through their crates' own
//! `SubjectPublicKeyInfo` support; the post-quantum schemes get a
//! hand-assembled SPKI wrapping the raw encoded key, with the OIDs from the
//! LAMPS drafts.

use pkcs8::der::asn1::BitString;
use pkcs8::der::{Decode, Encode};
use pkcs8::spki::{AlgorithmIdentifierOwned, ObjectIdentifier, SubjectPublicKeyInfoOwned};
use pkcs8::{Document, LineEnding};

use crate::cdss::{CdssAlgorithm, VerifyingKey};
use crate::Error;

/// id-slh-dsa-sha2-128s
const SLH_DSA_SHA2_128S: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.16.840.1.101.3.4.3.20");
/// id-ml-dsa-65
const ML_DSA_65: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.16.840.1.101.3.4.3.18");
/// Falcon-512 (draft-ietf-lamps round-3 identifier)
const FALCON_512: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.9999.3.6");

impl VerifyingKey {
    /// Encode as a PEM `PUBLIC KEY` document.
    pub fn to_public_key_pem(&self) -> Result<String, Error> {
        match self {
            VerifyingKey::Ecdsa(key) => {
                use p256::pkcs8::EncodePublicKey;
                key.to_public_key_pem(p256::pkcs8::LineEnding::LF)
                    .map_err(|_| Error::Pem)
            }
            VerifyingKey::Rsa(key) => {
                use rsa::pkcs8::EncodePublicKey;
                key.to_public_key_pem(rsa::pkcs8::LineEnding::LF)
                    .map_err(|_| Error::Pem)
            }
            VerifyingKey::SphincsPlus(key) => {
                spki_pem(SLH_DSA_SHA2_128S, key.to_bytes().as_slice())
            }
            VerifyingKey::Falcon(key) => spki_pem(FALCON_512, key),
            VerifyingKey::Dilithium(key) => spki_pem(ML_DSA_65, key),
        }
    }

    /// Decode a PEM `PUBLIC KEY` document for `algorithm`.
    pub fn from_public_key_pem(algorithm: CdssAlgorithm, pem: &str) -> Result<Self, Error> {
        match algorithm {
            CdssAlgorithm::Ecdsa => {
                use p256::pkcs8::DecodePublicKey;
                p256::ecdsa::VerifyingKey::from_public_key_pem(pem)
                    .map(VerifyingKey::Ecdsa)
                    .map_err(|_| Error::Pem)
            }
            CdssAlgorithm::Rsa => {
                use rsa::pkcs8::DecodePublicKey;
                rsa::RsaPublicKey::from_public_key_pem(pem)
                    .map(VerifyingKey::Rsa)
                    .map_err(|_| Error::Pem)
            }
            CdssAlgorithm::SphincsPlus => {
                let raw = spki_from_pem(pem, SLH_DSA_SHA2_128S)?;
                slh_dsa::VerifyingKey::<slh_dsa::Sha2_128s>::try_from(raw.as_slice())
                    .map(VerifyingKey::SphincsPlus)
                    .map_err(|_| Error::Pem)
            }
            CdssAlgorithm::Falcon => {
                let raw = spki_from_pem(pem, FALCON_512)?;
                Ok(VerifyingKey::Falcon(raw))
            }
            CdssAlgorithm::Dilithium => {
                let raw = spki_from_pem(pem, ML_DSA_65)?;
                // reject byte strings that cannot be a verifying key
                ml_dsa::EncodedVerifyingKey::<ml_dsa::MlDsa65>::try_from(raw.as_slice())
                    .map_err(|_| Error::Pem)?;
                Ok(VerifyingKey::Dilithium(raw))
            }
        }
    }
}

/// Wrap `key` in a `SubjectPublicKeyInfo` under `oid` and PEM-encode it.
fn spki_pem(oid: ObjectIdentifier, key: &[u8]) -> Result<String, Error> {
    let spki = SubjectPublicKeyInfoOwned {
        algorithm: AlgorithmIdentifierOwned {
            oid,
            parameters: None,
        },
        subject_public_key: BitString::from_bytes(key).map_err(|_| Error::Pem)?,
    };
    let der = spki.to_der().map_err(|_| Error::Pem)?;
    Document::try_from(der)
        .map_err(|_| Error::Pem)?
        .to_pem("PUBLIC KEY", LineEnding::LF)
        .map_err(|_| Error::Pem)
}

/// Parse a PEM `PUBLIC KEY` document, check its OID, and return the raw
/// key bytes.
fn spki_from_pem(pem: &str, oid: ObjectIdentifier) -> Result<Vec<u8>, Error> {
    let (label, document) = Document::from_pem(pem).map_err(|_| Error::Pem)?;
    if label != "PUBLIC KEY" {
        return Err(Error::Pem);
    }
    let spki = SubjectPublicKeyInfoOwned::from_der(document.as_bytes()).map_err(|_| Error::Pem)?;
    if spki.algorithm.oid != oid {
        return Err(Error::Pem);
    }
    spki.subject_public_key
        .as_bytes()
        .map(<[u8]>::to_vec)
        .ok_or(Error::Pem)
}
