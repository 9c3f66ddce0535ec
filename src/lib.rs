//! Modification-tolerant signatures over combinatorial group testing.
//!
//! An MTSS signature augments a conventional digital signature so that a
//! verifier can not only decide whether a message is authentic but, when it
//! is not, locate up to `d` modified blocks. The signer splits the message
//! into blocks, builds a `d`-cover-free family over them, and signs the
//! digests of every row group together with the digest of the whole
//! message; at verification the mismatching row digests form a group
//! testing outcome vector that a decoder turns back into block indices.
//!
//! # Example
//!
//! ```
//! use mtss::{
//!     BlockedMessage, CdssAlgorithm, CffMethod, DecoderKind, HashAlgorithm, KeyPair, MatrixKind,
//!     Specification, SplitStrategy, Verification,
//! };
//!
//! # fn main() -> Result<(), mtss::Error> {
//! let mut rng = rand_core::OsRng;
//! let keypair = KeyPair::generate(CdssAlgorithm::Ecdsa, &mut rng)?;
//!
//! let spec = Specification {
//!     cdss: CdssAlgorithm::Ecdsa,
//!     hash: HashAlgorithm::Sha2_256,
//!     d: 1,
//!     method: CffMethod::Sperner,
//!     matrix: MatrixKind::Compact,
//! };
//!
//! let message = b"alpha\nbravo\ncharlie\ndelta\n";
//! let blocked = BlockedMessage::text(message, SplitStrategy::BlockSize(1))?;
//! let signature = mtss::sign(&mut rng, &blocked, &spec, keypair.signing_key())?;
//!
//! // The untouched message verifies as unchanged.
//! let outcome = mtss::verify(&blocked, &signature, DecoderKind::Specific, keypair.verifying_key())?;
//! assert_eq!(outcome, Verification::Unchanged);
//!
//! // A one-block modification is located exactly.
//! let tampered = BlockedMessage::text(
//!     b"alpha\nbravo\nCHARLIE\ndelta\n",
//!     SplitStrategy::BlockSize(signature.block_size),
//! )?;
//! let outcome = mtss::verify(&tampered, &signature, DecoderKind::Specific, keypair.verifying_key())?;
//! assert_eq!(
//!     outcome,
//!     Verification::Modified { defectives: vec![3], located: true }
//! );
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![warn(rust_2018_idioms)]

mod block;
mod cdss;
mod cff;
mod decode;
mod error;
mod hash;
mod matrix;
mod mtss;
mod payload;
mod pem;

pub use crate::block::{BlockedMessage, FileType, SplitStrategy};
pub use crate::cdss::{CdssAlgorithm, KeyPair, SigningKey, VerifyingKey};
pub use crate::cff::{Cff, CffMethod, Codebook, SetSystem};
pub use crate::decode::{decode_specific, DecoderKind};
pub use crate::error::Error;
pub use crate::hash::HashAlgorithm;
pub use crate::matrix::{CffMatrix, CompactMatrix, Defectives, ListMatrix, MatrixKind};
pub use crate::mtss::{generate_keypair, sign, verify, Specification, Verification};
pub use crate::payload::MtssSignature;
