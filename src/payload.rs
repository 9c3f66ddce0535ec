//! Signature payload: the canonical signed byte string and its text format.

use core::fmt;
use core::str::FromStr;

use crate::block::FileType;
use crate::cdss::CdssAlgorithm;
use crate::cff::CffMethod;
use crate::hash::HashAlgorithm;
use crate::matrix::MatrixKind;
use crate::Error;

/// A complete MTSS signature: metadata, parameters, the digest tuple, the
/// whole-message digest, and the underlying signature over all of it.
///
/// The text form is eleven newline-separated lines: the five identifiers,
/// the four decimal parameters, the space-joined uppercase-hex digest tuple
/// ending in the whole-message digest, and the hex signature. The first ten
/// lines, joined with single spaces, are exactly the bytes covered by the
/// underlying signature, so the serialisation must be byte-identical
/// between signing and verification.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MtssSignature {
    /// Underlying signature scheme identifier.
    pub cdss: CdssAlgorithm,
    /// Hash function identifier.
    pub hash: HashAlgorithm,
    /// File type the message was split as.
    pub file_type: FileType,
    /// CFF construction identifier.
    pub method: CffMethod,
    /// Matrix representation identifier.
    pub matrix: MatrixKind,
    /// Block size used by the splitter.
    pub block_size: usize,
    /// Number of blocks `n`.
    pub block_count: usize,
    /// Maximum number of locatable modifications.
    pub d: usize,
    /// Number of group tests `t`.
    pub t: usize,
    /// Digest of each row's block group, in row order.
    pub tuple: Vec<Vec<u8>>,
    /// Digest of the whole message.
    pub hstar: Vec<u8>,
    /// Bytes returned by the underlying scheme over the canonical message.
    pub signature: Vec<u8>,
}

impl MtssSignature {
    /// The canonical byte string signed by the underlying scheme.
    pub fn canonical_message(&self) -> Vec<u8> {
        format!(
            "{} {} {} {} {} {} {} {} {} {}",
            self.cdss,
            self.hash,
            self.file_type,
            self.method,
            self.matrix,
            self.block_size,
            self.block_count,
            self.d,
            self.t,
            self.tuple_hex()
        )
        .into_bytes()
    }

    /// The digest tuple and whole-message digest as space-joined uppercase
    /// hex.
    fn tuple_hex(&self) -> String {
        let mut parts: Vec<String> = self.tuple.iter().map(hex::encode_upper).collect();
        parts.push(hex::encode_upper(&self.hstar));
        parts.join(" ")
    }
}

impl fmt::Display for MtssSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.cdss)?;
        writeln!(f, "{}", self.hash)?;
        writeln!(f, "{}", self.file_type)?;
        writeln!(f, "{}", self.method)?;
        writeln!(f, "{}", self.matrix)?;
        writeln!(f, "{}", self.block_size)?;
        writeln!(f, "{}", self.block_count)?;
        writeln!(f, "{}", self.d)?;
        writeln!(f, "{}", self.t)?;
        writeln!(f, "{}", self.tuple_hex())?;
        write!(f, "{}", hex::encode_upper(&self.signature))
    }
}

impl FromStr for MtssSignature {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        let lines: Vec<&str> = s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        if lines.len() != 11 {
            return Err(Error::MalformedPayload("expected exactly 11 lines"));
        }

        let parse_number = |line: &str, what: &'static str| {
            line.parse::<usize>()
                .map_err(|_| Error::MalformedPayload(what))
        };

        let t = parse_number(lines[8], "bad row count")?;
        let mut digests = lines[9]
            .split(' ')
            .map(|h| hex::decode(h).map_err(|_| Error::Hex))
            .collect::<Result<Vec<_>, _>>()?;
        if digests.len() != t + 1 {
            return Err(Error::MalformedPayload("digest tuple length does not match t"));
        }
        let hstar = digests
            .pop()
            .ok_or(Error::MalformedPayload("missing whole-message digest"))?;

        Ok(Self {
            cdss: lines[0].parse()?,
            hash: lines[1].parse()?,
            file_type: lines[2].parse()?,
            method: lines[3].parse()?,
            matrix: lines[4].parse()?,
            block_size: parse_number(lines[5], "bad block size")?,
            block_count: parse_number(lines[6], "bad block count")?,
            d: parse_number(lines[7], "bad defective bound")?,
            t,
            tuple: digests,
            hstar,
            signature: hex::decode(lines[10]).map_err(|_| Error::Hex)?,
        })
    }
}
