//! The sign/verify protocol.

use digest::DynDigest;
use rand_core::{CryptoRng, RngCore};

use crate::block::BlockedMessage;
use crate::cdss::{CdssAlgorithm, SigningKey, VerifyingKey};
use crate::cff::CffMethod;
use crate::decode::{decode_specific, DecoderKind};
use crate::hash::HashAlgorithm;
use crate::matrix::{CffMatrix, MatrixKind};
use crate::payload::MtssSignature;
use crate::Error;

/// The parameter bundle that drives a signing run.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Specification {
    /// Underlying signature scheme.
    pub cdss: CdssAlgorithm,
    /// Hash function for the digests.
    pub hash: HashAlgorithm,
    /// Maximum number of modified blocks the signature can locate.
    pub d: usize,
    /// CFF construction.
    pub method: CffMethod,
    /// Matrix representation recorded in the payload.
    pub matrix: MatrixKind,
}

impl MtssSignature {
    /// The specification a verifier rebuilds from this payload.
    pub fn specification(&self) -> Specification {
        Specification {
            cdss: self.cdss,
            hash: self.hash,
            d: self.d,
            method: self.method,
            matrix: self.matrix,
        }
    }
}

/// Terminal outcome of a verification.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Verification {
    /// The underlying signature does not verify; nothing else can be
    /// trusted.
    Invalid,
    /// Authentic and byte-for-byte identical to the signed message.
    Unchanged,
    /// Authentic but modified.
    Modified {
        /// 1-based indices of the blocks identified as modified.
        defectives: Vec<usize>,
        /// Whether the set is exact. False means the modifications exceed
        /// the signature's capacity `d` and `defectives` is only a
        /// candidate superset (possibly empty).
        located: bool,
    },
}

/// Sign a blocked message.
///
/// Builds the `d`-CFF for the message's block count, digests each row's
/// block group and the whole message, and signs the canonical serialisation
/// of everything with the underlying scheme.
pub fn sign<R>(
    rng: &mut R,
    message: &BlockedMessage,
    spec: &Specification,
    signing_key: &SigningKey,
) -> Result<MtssSignature, Error>
where
    R: CryptoRng + RngCore,
{
    let n = message.blocks().len();
    let cff = spec.method.build(spec.d, n)?;
    let matrix = cff.matrix(spec.matrix);

    let hstar = spec.hash.digest(message.message());
    let tuple = digest_tuple(&*matrix, message, spec.hash);

    let mut signature = MtssSignature {
        cdss: spec.cdss,
        hash: spec.hash,
        file_type: message.file_type(),
        method: spec.method,
        matrix: spec.matrix,
        block_size: message.block_size(),
        block_count: n,
        d: spec.d,
        t: cff.t(),
        tuple,
        hstar,
        signature: Vec::new(),
    };
    signature.signature = signing_key.sign(rng, &signature.canonical_message())?;
    Ok(signature)
}

/// Verify a blocked message against a signature.
///
/// The flow escalates: an invalid underlying signature rejects everything;
/// a matching whole-message digest accepts without decoding; otherwise the
/// recomputed digest tuple becomes the group-testing outcome vector and the
/// chosen decoder locates the modified blocks.
pub fn verify(
    message: &BlockedMessage,
    signature: &MtssSignature,
    decoder: DecoderKind,
    verifying_key: &VerifyingKey,
) -> Result<Verification, Error> {
    if !verifying_key.verify(&signature.canonical_message(), &signature.signature) {
        return Ok(Verification::Invalid);
    }

    if signature.hash.digest(message.message()) == signature.hstar {
        return Ok(Verification::Unchanged);
    }

    if message.blocks().len() != signature.block_count {
        // the block structure itself changed; group testing cannot index
        // into the signed decomposition
        return Ok(Verification::Modified {
            defectives: Vec::new(),
            located: false,
        });
    }

    let cff = signature.method.build(signature.d, signature.block_count)?;
    if cff.t() != signature.t || signature.tuple.len() != signature.t {
        return Err(Error::MalformedPayload("row count does not match the construction"));
    }
    let matrix = cff.matrix(signature.matrix);

    let mut y = vec![false; signature.t];
    for (i, outcome) in y.iter_mut().enumerate() {
        let mut digester = signature.hash.digester();
        for column in matrix.row(i) {
            digester.update(message.block(column));
        }
        *outcome = digester.finalize().into_vec() != signature.tuple[i];
    }

    let found = match decoder {
        DecoderKind::General => matrix.find_defectives(&y, signature.d),
        DecoderKind::Specific => decode_specific(&cff, &y)?,
    };
    Ok(Verification::Modified {
        defectives: found.columns,
        located: found.located,
    })
}

/// Digest each matrix row's block group.
fn digest_tuple(matrix: &dyn CffMatrix, message: &BlockedMessage, hash: HashAlgorithm) -> Vec<Vec<u8>> {
    (0..matrix.rows())
        .map(|i| {
            let mut digester = hash.digester();
            for column in matrix.row(i) {
                digester.update(message.block(column));
            }
            digester.finalize().into_vec()
        })
        .collect()
}

/// Generate a key pair for the underlying scheme; the public half can be
/// exported as PEM via [`VerifyingKey::to_public_key_pem`].
pub fn generate_keypair<R>(
    algorithm: CdssAlgorithm,
    rng: &mut R,
) -> Result<crate::cdss::KeyPair, Error>
where
    R: CryptoRng + RngCore,
{
    crate::cdss::KeyPair::generate(algorithm, rng)
}
