//! Group-testing decoders.
//!
//! The general decoder works against any cover-free family through its
//! matrix: union the rows that tested negative and report the complement.
//! Each construction also has a specialised decoder that exploits its
//! structure and runs far faster than the general complement pass.

use core::fmt;
use core::str::FromStr;

use crate::cff::Cff;
use crate::matrix::Defectives;
use crate::Error;

pub(crate) mod modmath;
pub(crate) mod rs;
pub(crate) mod sperner;
pub(crate) mod sts;

/// Which decoder verification should run.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DecoderKind {
    /// Complement-of-negative-rows decoding through the matrix.
    General,
    /// The construction-specific decoder.
    Specific,
}

impl fmt::Display for DecoderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DecoderKind::General => "general",
            DecoderKind::Specific => "specific",
        })
    }
}

impl FromStr for DecoderKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s.to_ascii_lowercase().as_str() {
            "general" => Ok(DecoderKind::General),
            "specific" => Ok(DecoderKind::Specific),
            _ => Err(Error::UnknownIdentifier {
                kind: "decoder",
                value: s.into(),
            }),
        }
    }
}

/// Run the construction-specific decoder for `cff` on outcome vector `y`.
///
/// Set systems dispatch on `d`: Sperner families are only built for
/// `d = 1` and triple systems only for `d = 2`.
pub fn decode_specific(cff: &Cff, y: &[bool]) -> Result<Defectives, Error> {
    match cff {
        Cff::Sets(system) if system.d == 1 => sperner::decode(system.points, system.n, y),
        Cff::Sets(system) => sts::decode(system, y),
        Cff::Code(code) => rs::decode(code, y),
    }
}
