//! Underlying conventional digital signature schemes.
//!
//! The protocol only needs key generation, signing, and verification; each
//! scheme is reached through its own crate's `signature` traits so the
//! adapters stay thin. Signatures and public keys cross the boundary as
//! plain byte strings, which is also how they travel inside payloads.

use core::fmt;
use core::str::FromStr;

use rand_core::{CryptoRng, RngCore};

use crate::Error;

/// The supported underlying schemes, identified by payload name.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CdssAlgorithm {
    /// ECDSA over NIST P-256 with SHA-256 (RFC 6979 deterministic).
    Ecdsa,
    /// RSA-2048 with PSS padding and SHA-256.
    Rsa,
    /// SLH-DSA-SHA2-128s (the SPHINCS+ small parameter set).
    SphincsPlus,
    /// Falcon-512.
    Falcon,
    /// ML-DSA-65 (the Dilithium3 parameter set).
    Dilithium,
}

impl CdssAlgorithm {
    /// Payload identifier for this scheme.
    pub fn name(self) -> &'static str {
        match self {
            CdssAlgorithm::Ecdsa => "ecdsa",
            CdssAlgorithm::Rsa => "rsa",
            CdssAlgorithm::SphincsPlus => "sphincsplus",
            CdssAlgorithm::Falcon => "falcon",
            CdssAlgorithm::Dilithium => "dilithium",
        }
    }
}

impl fmt::Display for CdssAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CdssAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s.to_ascii_lowercase().as_str() {
            "ecdsa" => Ok(CdssAlgorithm::Ecdsa),
            "rsa" => Ok(CdssAlgorithm::Rsa),
            "sphincsplus" => Ok(CdssAlgorithm::SphincsPlus),
            "falcon" => Ok(CdssAlgorithm::Falcon),
            "dilithium" => Ok(CdssAlgorithm::Dilithium),
            _ => Err(Error::UnknownIdentifier {
                kind: "signature scheme",
                value: s.into(),
            }),
        }
    }
}

/// A private signing key for one of the underlying schemes.
pub enum SigningKey {
    /// ECDSA P-256 signing key.
    Ecdsa(p256::ecdsa::SigningKey),
    /// RSA-2048 private key; PSS signing keys are derived per operation.
    Rsa(Box<rsa::RsaPrivateKey>),
    /// SLH-DSA-SHA2-128s signing key.
    SphincsPlus(Box<slh_dsa::SigningKey<slh_dsa::Sha2_128s>>),
    /// Falcon-512 signing key in its encoded form.
    Falcon(Vec<u8>),
    /// ML-DSA-65 key pair (the signing half is used).
    Dilithium(Box<ml_dsa::KeyPair<ml_dsa::MlDsa65>>),
}

/// A public verifying key for one of the underlying schemes.
#[derive(Clone)]
pub enum VerifyingKey {
    /// ECDSA P-256 verifying key.
    Ecdsa(p256::ecdsa::VerifyingKey),
    /// RSA-2048 public key.
    Rsa(rsa::RsaPublicKey),
    /// SLH-DSA-SHA2-128s verifying key.
    SphincsPlus(slh_dsa::VerifyingKey<slh_dsa::Sha2_128s>),
    /// Falcon-512 verifying key in its encoded form.
    Falcon(Vec<u8>),
    /// ML-DSA-65 verifying key in its encoded form.
    Dilithium(Vec<u8>),
}

/// A freshly generated signing/verifying key pair.
pub struct KeyPair {
    signing: SigningKey,
    verifying: VerifyingKey,
}

impl KeyPair {
    /// Generate a key pair for `algorithm`.
    pub fn generate<R>(algorithm: CdssAlgorithm, rng: &mut R) -> Result<Self, Error>
    where
        R: CryptoRng + RngCore,
    {
        match algorithm {
            CdssAlgorithm::Ecdsa => {
                let signing = p256::ecdsa::SigningKey::random(rng);
                let verifying = signing.verifying_key().clone();
                Ok(Self {
                    signing: SigningKey::Ecdsa(signing),
                    verifying: VerifyingKey::Ecdsa(verifying),
                })
            }
            CdssAlgorithm::Rsa => {
                let private =
                    rsa::RsaPrivateKey::new(rng, 2048).map_err(|_| Error::KeyGeneration)?;
                let public = rsa::RsaPublicKey::from(&private);
                Ok(Self {
                    signing: SigningKey::Rsa(Box::new(private)),
                    verifying: VerifyingKey::Rsa(public),
                })
            }
            CdssAlgorithm::SphincsPlus => {
                let signing = slh_dsa::SigningKey::<slh_dsa::Sha2_128s>::new(rng);
                let verifying: slh_dsa::VerifyingKey<slh_dsa::Sha2_128s> =
                    signing.as_ref().clone();
                Ok(Self {
                    signing: SigningKey::SphincsPlus(Box::new(signing)),
                    verifying: VerifyingKey::SphincsPlus(verifying),
                })
            }
            CdssAlgorithm::Falcon => {
                use fn_dsa::KeyPairGenerator as _;
                let mut generator = fn_dsa::KeyPairGeneratorStandard::default();
                let mut signing = vec![0u8; fn_dsa::sign_key_size(fn_dsa::FN_DSA_LOGN_512)];
                let mut verifying = vec![0u8; fn_dsa::vrfy_key_size(fn_dsa::FN_DSA_LOGN_512)];
                generator.keygen(fn_dsa::FN_DSA_LOGN_512, rng, &mut signing, &mut verifying);
                Ok(Self {
                    signing: SigningKey::Falcon(signing),
                    verifying: VerifyingKey::Falcon(verifying),
                })
            }
            CdssAlgorithm::Dilithium => {
                use ml_dsa::KeyGen;
                let mut seed = [0u8; 32];
                rng.fill_bytes(&mut seed);
                let pair = ml_dsa::MlDsa65::key_gen_internal(&seed.into());
                let verifying = pair.verifying_key().encode().as_slice().to_vec();
                Ok(Self {
                    signing: SigningKey::Dilithium(Box::new(pair)),
                    verifying: VerifyingKey::Dilithium(verifying),
                })
            }
        }
    }

    /// The private half.
    pub fn signing_key(&self) -> &SigningKey {
        &self.signing
    }

    /// The public half.
    pub fn verifying_key(&self) -> &VerifyingKey {
        &self.verifying
    }

    /// Split into the two halves.
    pub fn into_keys(self) -> (SigningKey, VerifyingKey) {
        (self.signing, self.verifying)
    }
}

impl SigningKey {
    /// Which scheme this key belongs to.
    pub fn algorithm(&self) -> CdssAlgorithm {
        match self {
            SigningKey::Ecdsa(_) => CdssAlgorithm::Ecdsa,
            SigningKey::Rsa(_) => CdssAlgorithm::Rsa,
            SigningKey::SphincsPlus(_) => CdssAlgorithm::SphincsPlus,
            SigningKey::Falcon(_) => CdssAlgorithm::Falcon,
            SigningKey::Dilithium(_) => CdssAlgorithm::Dilithium,
        }
    }

    /// Sign `message`, returning the scheme's signature bytes.
    pub fn sign<R>(&self, rng: &mut R, message: &[u8]) -> Result<Vec<u8>, Error>
    where
        R: CryptoRng + RngCore,
    {
        match self {
            SigningKey::Ecdsa(key) => {
                use p256::ecdsa::signature::{SignatureEncoding, Signer};
                let signature: p256::ecdsa::Signature =
                    key.try_sign(message).map_err(|_| Error::Signing)?;
                Ok(signature.to_vec())
            }
            SigningKey::Rsa(key) => {
                use rsa::signature::{RandomizedSigner, SignatureEncoding};
                let signer = rsa::pss::SigningKey::<sha2::Sha256>::new((**key).clone());
                let signature = signer
                    .try_sign_with_rng(rng, message)
                    .map_err(|_| Error::Signing)?;
                Ok(signature.to_vec())
            }
            SigningKey::SphincsPlus(key) => {
                use slh_dsa::signature::{SignatureEncoding, Signer};
                let signature = key.try_sign(message).map_err(|_| Error::Signing)?;
                Ok(signature.to_vec())
            }
            SigningKey::Falcon(key) => {
                use fn_dsa::SigningKey as _;
                let mut signer =
                    fn_dsa::SigningKeyStandard::decode(key).ok_or(Error::Signing)?;
                let mut signature = vec![0u8; fn_dsa::signature_size(signer.get_logn())];
                signer.sign(
                    rng,
                    &fn_dsa::DOMAIN_NONE,
                    &fn_dsa::HASH_ID_RAW,
                    message,
                    &mut signature,
                );
                Ok(signature)
            }
            SigningKey::Dilithium(pair) => {
                use ml_dsa::signature::Signer;
                let signature = pair
                    .signing_key()
                    .try_sign(message)
                    .map_err(|_| Error::Signing)?;
                Ok(signature.encode().as_slice().to_vec())
            }
        }
    }
}

impl VerifyingKey {
    /// Which scheme this key belongs to.
    pub fn algorithm(&self) -> CdssAlgorithm {
        match self {
            VerifyingKey::Ecdsa(_) => CdssAlgorithm::Ecdsa,
            VerifyingKey::Rsa(_) => CdssAlgorithm::Rsa,
            VerifyingKey::SphincsPlus(_) => CdssAlgorithm::SphincsPlus,
            VerifyingKey::Falcon(_) => CdssAlgorithm::Falcon,
            VerifyingKey::Dilithium(_) => CdssAlgorithm::Dilithium,
        }
    }

    /// Check `signature` over `message`; malformed signature bytes verify
    /// as false rather than erroring.
    pub fn verify(&self, message: &[u8], signature: &[u8]) -> bool {
        match self {
            VerifyingKey::Ecdsa(key) => {
                use p256::ecdsa::signature::Verifier;
                match p256::ecdsa::Signature::from_slice(signature) {
                    Ok(signature) => key.verify(message, &signature).is_ok(),
                    Err(_) => false,
                }
            }
            VerifyingKey::Rsa(key) => {
                use rsa::signature::Verifier;
                let verifier = rsa::pss::VerifyingKey::<sha2::Sha256>::new(key.clone());
                match rsa::pss::Signature::try_from(signature) {
                    Ok(signature) => verifier.verify(message, &signature).is_ok(),
                    Err(_) => false,
                }
            }
            VerifyingKey::SphincsPlus(key) => {
                use slh_dsa::signature::Verifier;
                match slh_dsa::Signature::<slh_dsa::Sha2_128s>::try_from(signature) {
                    Ok(signature) => key.verify(message, &signature).is_ok(),
                    Err(_) => false,
                }
            }
            VerifyingKey::Falcon(key) => {
                use fn_dsa::VerifyingKey as _;
                match fn_dsa::VerifyingKeyStandard::decode(key) {
                    Some(verifier) => verifier.verify(
                        signature,
                        &fn_dsa::DOMAIN_NONE,
                        &fn_dsa::HASH_ID_RAW,
                        message,
                    ),
                    None => false,
                }
            }
            VerifyingKey::Dilithium(key) => {
                use ml_dsa::signature::Verifier;
                let Ok(encoded_key) =
                    ml_dsa::EncodedVerifyingKey::<ml_dsa::MlDsa65>::try_from(&key[..])
                else {
                    return false;
                };
                let verifier = ml_dsa::VerifyingKey::<ml_dsa::MlDsa65>::decode(&encoded_key);
                let Ok(encoded_signature) =
                    ml_dsa::EncodedSignature::<ml_dsa::MlDsa65>::try_from(signature)
                else {
                    return false;
                };
                match ml_dsa::Signature::<ml_dsa::MlDsa65>::decode(&encoded_signature) {
                    Some(signature) => verifier.verify(message, &signature).is_ok(),
                    None => false,
                }
            }
        }
    }
}
