//! Reed-Solomon code construction (`d >= 2`).
//!
//! Codewords are evaluations of the polynomials of degree `< k` over `F_q`
//! at `x = 0..N`. Two distinct polynomials agree on at most `k - 1` points,
//! so with `N = d(k-1) + 1` positions no codeword is covered by `d` others;
//! the binary matrix has one row per (position, symbol) pair.

use crate::cff::Codebook;
use crate::Error;

/// Build a `d`-CFF from the first `n` Reed-Solomon codewords with
/// parameters minimising the row count `N * q`.
pub(crate) fn build(d: usize, n: usize) -> Result<Codebook, Error> {
    if d < 2 {
        return Err(Error::InvalidParameter("the Reed-Solomon construction requires d >= 2"));
    }

    let (k, length, q) = find_parameters(n, d);
    let codewords = enumerate_codewords(k, length, q, n);

    Ok(Codebook {
        d,
        n,
        k,
        length,
        q,
        codewords,
    })
}

/// Search `(k, N, q)` with `q` prime, `N = d(k-1) + 1 <= q`, and
/// `q^k >= n`, minimising the product `N * q` (ties keep the smaller `k`).
pub(crate) fn find_parameters(n: usize, d: usize) -> (usize, usize, usize) {
    let max_k = ((n as f64).log2().ceil() as usize).max(2);

    let mut best = (2usize, 2usize, 2usize);
    let mut best_product = u64::MAX;
    for k in 2..=max_k {
        let length = d * (k - 1) + 1;
        let root = (n as f64).powf(1.0 / k as f64).ceil() as usize;
        let q = next_prime(length.max(root));
        let product = (length as u64) * (q as u64);
        if product < best_product {
            best = (k, length, q);
            best_product = product;
        }
    }
    best
}

/// The first `count` codewords in coefficient-enumeration order.
///
/// Coefficients are the base-`q` digits of the codeword index, most
/// significant (leading) first; evaluation is Horner's rule. When
/// `length = q + 1` the final position carries the leading coefficient
/// instead of the (redundant) evaluation at `x = q`.
fn enumerate_codewords(k: usize, length: usize, q: usize, count: usize) -> Vec<Vec<u32>> {
    let mut codewords = Vec::with_capacity(count);
    let mut coefficients = vec![0u64; k];

    for _ in 0..count {
        let mut codeword = Vec::with_capacity(length);
        for x in 0..length as u64 {
            let mut value = 0u64;
            for &c in &coefficients {
                value = (value * x + c) % q as u64;
            }
            codeword.push(value as u32);
        }
        if length == q + 1 {
            codeword[q] = coefficients[0] as u32;
        }
        codewords.push(codeword);
        if !next_coefficients(q as u64, &mut coefficients) {
            break;
        }
    }
    codewords
}

/// Advance the coefficient vector like a base-`q` counter (least
/// significant digit last); false once all `q^k` vectors are exhausted.
fn next_coefficients(q: u64, coefficients: &mut [u64]) -> bool {
    for i in (0..coefficients.len()).rev() {
        if coefficients[i] < q - 1 {
            coefficients[i] += 1;
            for c in coefficients.iter_mut().skip(i + 1) {
                *c = 0;
            }
            return true;
        }
    }
    false
}

fn is_prime(x: usize) -> bool {
    if x < 2 {
        return false;
    }
    let mut i = 2;
    while i * i <= x {
        if x % i == 0 {
            return false;
        }
        i += 1;
    }
    true
}

fn next_prime(mut x: usize) -> usize {
    while !is_prime(x) {
        x += 1;
    }
    x
}
