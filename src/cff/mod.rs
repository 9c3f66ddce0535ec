//! Cover-free family constructions.
//!
//! A `d`-cover-free family with parameters `(d, n, t)` is a binary `t x n`
//! matrix in which no column is covered by the union of any `d` others. The
//! three constructions here trade generality for decoding speed: Sperner set
//! systems (`d = 1`), Steiner triple systems (`d = 2`), and Reed-Solomon
//! codes (`d >= 2`), each paired with a specialised decoder in
//! [`crate::decode`].

use core::fmt;
use core::str::FromStr;

use crate::matrix::{CffMatrix, CompactMatrix, ListMatrix, MatrixKind};
use crate::Error;

pub(crate) mod rs;
pub(crate) mod sperner;
pub(crate) mod sts;

/// The construction used to build a cover-free family.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CffMethod {
    /// Sperner set system; supports `d = 1` only.
    Sperner,
    /// Steiner triple system; supports `d = 2` and `n >= 7`.
    Sts,
    /// Reed-Solomon code; supports `d >= 2`.
    ReedSolomon,
}

impl CffMethod {
    /// Build a `d`-CFF with `n` columns using this construction.
    pub fn build(self, d: usize, n: usize) -> Result<Cff, Error> {
        if d < 1 {
            return Err(Error::InvalidParameter("d must be at least 1"));
        }
        if n == 0 {
            return Err(Error::InvalidParameter("a CFF needs at least one column"));
        }
        match self {
            CffMethod::Sperner => sperner::build(d, n).map(Cff::Sets),
            CffMethod::Sts => sts::build(d, n).map(Cff::Sets),
            CffMethod::ReedSolomon => rs::build(d, n).map(Cff::Code),
        }
    }

    /// Payload identifier for this construction.
    pub fn name(self) -> &'static str {
        match self {
            CffMethod::Sperner => "sperner",
            CffMethod::Sts => "sts",
            CffMethod::ReedSolomon => "rs",
        }
    }
}

impl fmt::Display for CffMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CffMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s.to_ascii_lowercase().as_str() {
            "sperner" => Ok(CffMethod::Sperner),
            "sts" => Ok(CffMethod::Sts),
            "rs" => Ok(CffMethod::ReedSolomon),
            _ => Err(Error::UnknownIdentifier {
                kind: "cff construction",
                value: s.into(),
            }),
        }
    }
}

/// A cover-free family given as a set system over a ground set of points.
///
/// Column `c` of the binary matrix has a one in row `r` exactly when point
/// `r + 1` belongs to the `c`-th set. For Steiner triple systems every block
/// of the chosen order is kept, even beyond the `n` used as columns, so the
/// decoder's pair-completion tables cover the whole point set.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SetSystem {
    pub(crate) d: usize,
    pub(crate) n: usize,
    /// Ground-set size; equals the matrix row count.
    pub(crate) points: usize,
    /// 1-based point sets, one per column (and possibly beyond).
    pub(crate) sets: Vec<Vec<usize>>,
}

/// A cover-free family given as evaluations of polynomials over a prime
/// field.
///
/// Codeword `c` is the evaluation of the `c`-th polynomial of degree `< k`
/// at `x = 0..length`. Row `(j, a)` of the binary matrix has a one in
/// column `c` exactly when codeword `c` evaluates to `a` at position `j`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Codebook {
    pub(crate) d: usize,
    pub(crate) n: usize,
    /// Polynomial degree bound: degrees are `< k`.
    pub(crate) k: usize,
    /// Codeword length `N`.
    pub(crate) length: usize,
    /// Field size; a prime with `length <= q`.
    pub(crate) q: usize,
    /// The first `n` codewords in enumeration order.
    pub(crate) codewords: Vec<Vec<u32>>,
}

/// A constructed cover-free family, ready to be materialised as a test
/// matrix.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Cff {
    /// Built from a set system (Sperner or Steiner triple system).
    Sets(SetSystem),
    /// Built from a Reed-Solomon code.
    Code(Codebook),
}

impl Cff {
    /// Maximum number of defectives this family can locate.
    pub fn d(&self) -> usize {
        match self {
            Cff::Sets(s) => s.d,
            Cff::Code(c) => c.d,
        }
    }

    /// Number of columns (message blocks).
    pub fn n(&self) -> usize {
        match self {
            Cff::Sets(s) => s.n,
            Cff::Code(c) => c.n,
        }
    }

    /// Number of rows (group tests).
    pub fn t(&self) -> usize {
        match self {
            Cff::Sets(s) => s.points,
            Cff::Code(c) => c.length * c.q,
        }
    }

    /// Materialise the binary matrix in the requested representation.
    pub fn matrix(&self, kind: MatrixKind) -> Box<dyn CffMatrix> {
        let mut matrix: Box<dyn CffMatrix> = match kind {
            MatrixKind::List => Box::new(ListMatrix::new(self.t(), self.n())),
            MatrixKind::Compact => Box::new(CompactMatrix::new(self.t(), self.n())),
        };
        self.populate(matrix.as_mut());
        matrix
    }

    fn populate(&self, matrix: &mut dyn CffMatrix) {
        match self {
            Cff::Sets(s) => {
                for (column, set) in s.sets.iter().take(s.n).enumerate() {
                    for &point in set {
                        matrix.set(point - 1, column);
                    }
                }
            }
            Cff::Code(c) => {
                for (column, codeword) in c.codewords.iter().take(c.n).enumerate() {
                    for (position, &symbol) in codeword.iter().enumerate() {
                        matrix.set(position * c.q + symbol as usize, column);
                    }
                }
            }
        }
    }
}
