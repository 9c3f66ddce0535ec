//! Specific decoder for Reed-Solomon code constructions (`d >= 2`).
//!
//! Positive rows, grouped by codeword position, give per-position symbol
//! sets `S[j]`. The decoder searches for at most `d` polynomials of degree
//! `< k` whose evaluations stay inside the `S[j]` and jointly use every
//! positive symbol. Candidates are seeded on a window of `k` consecutive
//! positions and extended in both directions with the k-th finite
//! difference, which is zero for any polynomial of degree `< k`.

use crate::cff::Codebook;
use crate::decode::modmath;
use crate::matrix::Defectives;
use crate::Error;

/// Decode the outcome vector of a Reed-Solomon-built CFF.
pub(crate) fn decode(code: &Codebook, y: &[bool]) -> Result<Defectives, Error> {
    let (k, length, q, d) = (code.k, code.length, code.q, code.d);

    let mut symbols: Vec<Vec<usize>> = vec![Vec::new(); length];
    for (row, &positive) in y.iter().enumerate() {
        if positive {
            symbols[row / q].push(row % q);
        }
    }

    if symbols.iter().all(Vec::is_empty) {
        return Ok(Defectives {
            columns: Vec::new(),
            located: true,
        });
    }

    // more than d distinct symbols in one position means more than d
    // defective codewords; the search cannot bound them
    if symbols.iter().any(|s| s.len() > d) {
        return Ok(Defectives {
            columns: Vec::new(),
            located: false,
        });
    }

    let codewords = find_codewords(k, q, length, d, &symbols)?;

    let inverse = modmath::vandermonde_inverse(k, q as i64);
    let mut columns = Vec::with_capacity(codewords.len());
    for codeword in &codewords {
        let samples: Vec<i64> = codeword[..k].iter().map(|&v| v as i64).collect();
        let coefficients = modmath::mat_vec_mul(&inverse, &samples, q as i64);
        let mut index = 0usize;
        for &c in &coefficients {
            index = index * q + c as usize;
        }
        columns.push(index + 1);
    }

    let located = columns.len() <= d;
    Ok(Defectives { columns, located })
}

/// Enumerate full codewords until every positive symbol is used by one of
/// them. Each iteration seeds one codeword and marks its symbols used.
fn find_codewords(
    k: usize,
    q: usize,
    length: usize,
    d: usize,
    symbols: &[Vec<usize>],
) -> Result<Vec<Vec<usize>>, Error> {
    let mut unused: Vec<Vec<bool>> = symbols.iter().map(|s| vec![true; s.len()]).collect();
    let mut count: Vec<usize> = symbols.iter().map(Vec::len).collect();
    let mut remaining: usize = count.iter().sum();

    // signed binomials of the k-th finite difference, forward and backward
    let binom_forward: Vec<i64> = (1..=k).map(|j| sign(j - 1) * choose(k, j)).collect();
    let binom_backward: Vec<i64> = (0..k).map(|j| sign(j) * choose(k, j)).collect();

    let mut found: Vec<Vec<usize>> = Vec::new();

    while remaining > 0 {
        let Some(pivot) = count.iter().position(|&c| c > 0) else {
            break;
        };
        let start_pos = if pivot + k <= length { pivot } else { length - k };

        // candidate multiplicities per window slot
        let budget = d as i64 - found.len() as i64;
        let mut radix = vec![0usize; k];
        for (i, slot) in radix.iter_mut().enumerate() {
            let pos = start_pos + i;
            *slot = if pos == pivot {
                1
            } else if count[pos] as i64 == budget {
                count[pos]
            } else {
                symbols[pos].len()
            };
        }
        if radix.iter().any(|&m| m == 0) {
            return Err(Error::NoPolynomialFound);
        }

        let candidates = candidate_order(&unused, &radix, pivot, start_pos);

        let mut odometer = vec![0usize; k];
        let mut codeword = vec![0usize; length];
        let mut done = false;
        let mut more = true;
        while !done && more {
            for i in 0..k {
                codeword[start_pos + i] = symbols[start_pos + i][candidates[i][odometer[i]]];
            }
            done = extend_codeword(
                k,
                q,
                symbols,
                &binom_forward,
                &binom_backward,
                start_pos,
                &mut codeword,
            );
            more = mixed_radix_successor(&mut odometer, &radix);
        }
        if !done {
            return Err(Error::NoPolynomialFound);
        }

        for (pos, s) in symbols.iter().enumerate() {
            if let Some(index) = s.iter().position(|&v| v == codeword[pos]) {
                if unused[pos][index] {
                    unused[pos][index] = false;
                    count[pos] -= 1;
                    remaining -= 1;
                }
            }
        }
        found.push(codeword);
    }

    Ok(found)
}

/// Candidate symbol indices per window slot, unused symbols first. The
/// pivot slot is pinned to its first unused symbol.
fn candidate_order(
    unused: &[Vec<bool>],
    radix: &[usize],
    pivot: usize,
    start_pos: usize,
) -> Vec<Vec<usize>> {
    let mut candidates = Vec::with_capacity(radix.len());
    for (i, &slots) in radix.iter().enumerate() {
        let pos = start_pos + i;
        let mut order = vec![0usize; slots];
        if pos == pivot {
            if let Some(first_unused) = unused[pos].iter().position(|&u| u) {
                order[0] = first_unused;
            }
        } else {
            let mut left = 0usize;
            let mut right = unused[pos].len() as isize - 1;
            for (j, &is_unused) in unused[pos].iter().enumerate() {
                if is_unused {
                    order[left] = j;
                    left += 1;
                } else if right >= slots as isize {
                    right -= 1;
                } else {
                    order[right as usize] = j;
                    right -= 1;
                }
            }
        }
        candidates.push(order);
    }
    candidates
}

/// Complete a window assignment into a full codeword, rejecting it as soon
/// as an extended value falls outside the position's symbol set.
fn extend_codeword(
    k: usize,
    q: usize,
    symbols: &[Vec<usize>],
    binom_forward: &[i64],
    binom_backward: &[i64],
    start_pos: usize,
    codeword: &mut [usize],
) -> bool {
    let modulus = q as i64;

    for i in (start_pos + k)..codeword.len() {
        let mut value = 0i64;
        for j in 1..=k {
            value += binom_forward[j - 1] * codeword[i - j] as i64;
        }
        let value = value.rem_euclid(modulus) as usize;
        if symbols[i].contains(&value) {
            codeword[i] = value;
        } else {
            return false;
        }
    }

    for i in (0..start_pos).rev() {
        let mut value = 0i64;
        for (j, &b) in binom_backward.iter().enumerate() {
            value += b * codeword[i + k - j] as i64;
        }
        let value = (sign(k + 1) * value).rem_euclid(modulus) as usize;
        if symbols[i].contains(&value) {
            codeword[i] = value;
        } else {
            return false;
        }
    }

    true
}

/// Advance a mixed-radix odometer; false once it wraps.
fn mixed_radix_successor(odometer: &mut [usize], radix: &[usize]) -> bool {
    for i in (0..odometer.len()).rev() {
        if odometer[i] + 1 < radix[i] {
            odometer[i] += 1;
            return true;
        }
        odometer[i] = 0;
    }
    false
}

fn sign(parity: usize) -> i64 {
    if parity % 2 == 0 {
        1
    } else {
        -1
    }
}

fn choose(n: usize, k: usize) -> i64 {
    let k = k.min(n - k);
    let mut result = 1i64;
    for i in 0..k {
        result = result * (n - i) as i64 / (i + 1) as i64;
    }
    result
}
