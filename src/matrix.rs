//! Binary test-matrix representations and the general decoder.

use core::fmt;
use core::str::FromStr;

use crate::Error;

/// Which matrix representation a signature records.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MatrixKind {
    /// Per-row sorted lists of one-column indices.
    List,
    /// Bit-packed rows, 64 columns per word.
    Compact,
}

impl MatrixKind {
    /// Payload identifier for this representation.
    pub fn name(self) -> &'static str {
        match self {
            MatrixKind::List => "list",
            MatrixKind::Compact => "compact",
        }
    }
}

impl fmt::Display for MatrixKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MatrixKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s.to_ascii_lowercase().as_str() {
            "list" => Ok(MatrixKind::List),
            "compact" => Ok(MatrixKind::Compact),
            _ => Err(Error::UnknownIdentifier {
                kind: "matrix representation",
                value: s.into(),
            }),
        }
    }
}

/// Outcome of a decoding attempt.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Defectives {
    /// 1-based column indices identified as defective.
    pub columns: Vec<usize>,
    /// Whether the set is within the family's capacity (`|I| <= d`) and
    /// unambiguous. When false, `columns` is a candidate superset.
    pub located: bool,
}

/// A binary `t x n` test matrix.
///
/// The two operations the protocol needs are row access (to know which
/// blocks feed each group digest) and the general group-testing decoder.
pub trait CffMatrix {
    /// Number of rows (tests).
    fn rows(&self) -> usize;

    /// Number of columns (blocks).
    fn columns(&self) -> usize;

    /// Set the entry at `row`, `column` to one.
    fn set(&mut self, row: usize, column: usize);

    /// Sorted column indices with a one in `row`.
    fn row(&self, row: usize) -> Vec<usize>;

    /// General decoding: union the rows whose test was negative and report
    /// the complement as defective.
    fn find_defectives(&self, y: &[bool], d: usize) -> Defectives;

    /// Densify into a `rows x columns` 0/1 matrix.
    fn to_dense(&self) -> Vec<Vec<u8>>;
}

/// Sorted-index-list representation.
pub struct ListMatrix {
    t: usize,
    n: usize,
    tests: Vec<Vec<usize>>,
}

impl ListMatrix {
    /// An all-zero `t x n` matrix.
    pub fn new(t: usize, n: usize) -> Self {
        Self {
            t,
            n,
            tests: vec![Vec::new(); t],
        }
    }
}

impl CffMatrix for ListMatrix {
    fn rows(&self) -> usize {
        self.t
    }

    fn columns(&self) -> usize {
        self.n
    }

    fn set(&mut self, row: usize, column: usize) {
        let list = &mut self.tests[row];
        match list.binary_search(&column) {
            Ok(_) => {}
            Err(pos) => list.insert(pos, column),
        }
    }

    fn row(&self, row: usize) -> Vec<usize> {
        self.tests[row].clone()
    }

    fn find_defectives(&self, y: &[bool], d: usize) -> Defectives {
        let mut merged: Vec<usize> = Vec::new();
        let mut first = true;
        for (i, &positive) in y.iter().enumerate() {
            if !positive {
                if first {
                    merged = self.tests[i].clone();
                    first = false;
                } else {
                    merged = merge_sorted(&merged, &self.tests[i]);
                }
            }
        }
        let columns = complement(&merged, self.n);
        let located = columns.len() <= d;
        Defectives { columns, located }
    }

    fn to_dense(&self) -> Vec<Vec<u8>> {
        let mut dense = vec![vec![0u8; self.n]; self.t];
        for (i, list) in self.tests.iter().enumerate() {
            for &j in list {
                dense[i][j] = 1;
            }
        }
        dense
    }
}

/// Bit-packed representation: `ceil(n / 64)` words per row, bit `j % 64` of
/// word `j / 64` holding column `j`.
pub struct CompactMatrix {
    t: usize,
    n: usize,
    words_per_row: usize,
    words: Vec<u64>,
}

impl CompactMatrix {
    /// An all-zero `t x n` matrix.
    pub fn new(t: usize, n: usize) -> Self {
        let words_per_row = n.div_ceil(64);
        Self {
            t,
            n,
            words_per_row,
            words: vec![0; t * words_per_row],
        }
    }
}

impl CffMatrix for CompactMatrix {
    fn rows(&self) -> usize {
        self.t
    }

    fn columns(&self) -> usize {
        self.n
    }

    fn set(&mut self, row: usize, column: usize) {
        self.words[row * self.words_per_row + column / 64] |= 1u64 << (column % 64);
    }

    fn row(&self, row: usize) -> Vec<usize> {
        let mut columns = Vec::new();
        let base = row * self.words_per_row;
        for w in 0..self.words_per_row {
            let mut word = self.words[base + w];
            while word != 0 {
                let bit = word.trailing_zeros() as usize;
                columns.push(w * 64 + bit);
                word &= word - 1;
            }
        }
        columns
    }

    fn find_defectives(&self, y: &[bool], d: usize) -> Defectives {
        let mut union = vec![0u64; self.words_per_row];
        for (i, &positive) in y.iter().enumerate() {
            if !positive {
                let base = i * self.words_per_row;
                for (w, acc) in union.iter_mut().enumerate() {
                    *acc |= self.words[base + w];
                }
            }
        }

        // Columns past n live in the tail of the last word; pad them with
        // ones so the complement never reports them.
        let tail = self.n % 64;
        if tail != 0 {
            if let Some(last) = union.last_mut() {
                *last |= !0u64 << tail;
            }
        }

        let mut columns = Vec::new();
        for (w, &word) in union.iter().enumerate() {
            if word == u64::MAX {
                continue;
            }
            let mut zeroes = !word;
            while zeroes != 0 {
                let bit = zeroes.trailing_zeros() as usize;
                columns.push(w * 64 + bit + 1);
                zeroes &= zeroes - 1;
            }
        }
        let located = columns.len() <= d;
        Defectives { columns, located }
    }

    fn to_dense(&self) -> Vec<Vec<u8>> {
        let mut dense = vec![vec![0u8; self.n]; self.t];
        for (i, row) in dense.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                let word = self.words[i * self.words_per_row + j / 64];
                *cell = ((word >> (j % 64)) & 1) as u8;
            }
        }
        dense
    }
}

/// Merge two sorted index lists, dropping duplicates.
fn merge_sorted(a: &[usize], b: &[usize]) -> Vec<usize> {
    let mut merged = Vec::with_capacity(a.len() + b.len());
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            core::cmp::Ordering::Equal => {
                merged.push(a[i]);
                i += 1;
                j += 1;
            }
            core::cmp::Ordering::Less => {
                merged.push(a[i]);
                i += 1;
            }
            core::cmp::Ordering::Greater => {
                merged.push(b[j]);
                j += 1;
            }
        }
    }
    merged.extend_from_slice(&a[i..]);
    merged.extend_from_slice(&b[j..]);
    merged
}

/// 1-based complement of a sorted 0-based index list in `[0, n)`.
fn complement(sorted: &[usize], n: usize) -> Vec<usize> {
    let mut missing = Vec::new();
    let mut next = 0usize;
    for &present in sorted {
        while next < present {
            missing.push(next + 1);
            next += 1;
        }
        next = present + 1;
    }
    while next < n {
        missing.push(next + 1);
        next += 1;
    }
    missing
}
