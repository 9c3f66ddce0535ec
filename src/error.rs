//! Error types.

use core::fmt;

/// Errors raised while constructing cover-free families, splitting messages,
/// or running the sign/verify protocol.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Error {
    /// An identifier carried in a payload or request was not recognised.
    UnknownIdentifier {
        /// What kind of identifier was being parsed.
        kind: &'static str,
        /// The offending value.
        value: String,
    },
    /// A precondition on construction or protocol parameters was violated.
    InvalidParameter(&'static str),
    /// The signature payload text is malformed.
    MalformedPayload(&'static str),
    /// A hexadecimal field could not be decoded.
    Hex,
    /// A PEM/SPKI public-key document could not be encoded or decoded.
    Pem,
    /// An image body could not be parsed.
    MalformedImage(&'static str),
    /// The test outcome vector cannot arise from the construction in use.
    InvalidOutcome(&'static str),
    /// The Reed-Solomon decoder exhausted every candidate polynomial.
    NoPolynomialFound,
    /// The underlying scheme failed to produce a signature.
    Signing,
    /// The underlying scheme failed to generate a key pair.
    KeyGeneration,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnknownIdentifier { kind, value } => {
                write!(f, "unknown {kind}: {value:?}")
            }
            Error::InvalidParameter(msg) => write!(f, "invalid parameter: {msg}"),
            Error::MalformedPayload(msg) => write!(f, "malformed signature payload: {msg}"),
            Error::Hex => f.write_str("invalid hexadecimal field"),
            Error::Pem => f.write_str("invalid public key document"),
            Error::MalformedImage(msg) => write!(f, "malformed image: {msg}"),
            Error::InvalidOutcome(msg) => write!(f, "invalid test outcome vector: {msg}"),
            Error::NoPolynomialFound => f.write_str("no covering polynomials found"),
            Error::Signing => f.write_str("underlying signature operation failed"),
            Error::KeyGeneration => f.write_str("underlying key generation failed"),
        }
    }
}

impl std::error::Error for Error {}
