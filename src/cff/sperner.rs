//! Sperner set system construction (`d = 1`).
//!
//! The columns are the first `n` subsets of `[1, t]` of size `t / 2` in
//! lexicographic order, for the smallest `t` with `C(t, t/2) >= n`. No such
//! subset contains another, so any single column avoids the union of any
//! other single column.

use crate::cff::SetSystem;
use crate::Error;

/// Build a 1-CFF from the Sperner antichain of half-size subsets.
pub(crate) fn build(d: usize, n: usize) -> Result<SetSystem, Error> {
    if d != 1 {
        return Err(Error::InvalidParameter("the Sperner construction requires d = 1"));
    }

    let mut t = 1usize;
    while binomial(t as u64, (t / 2) as u64) < n as u128 {
        t += 1;
    }

    let mut subset: Vec<usize> = (1..=t / 2).collect();
    let mut sets = Vec::with_capacity(n);
    for _ in 0..n {
        sets.push(subset.clone());
        match subset_lex_successor(&subset, t / 2, t) {
            Some(next) => subset = next,
            None => break,
        }
    }

    Ok(SetSystem {
        d,
        n,
        points: t,
        sets,
    })
}

/// The next `t`-subset of `[1, n]` in lexicographic order, if any.
///
/// Stinson's successor algorithm: scan for the rightmost element that can be
/// incremented and reset the tail to consecutive values.
pub(crate) fn subset_lex_successor(array: &[usize], t: usize, n: usize) -> Option<Vec<usize>> {
    let mut next = array.to_vec();
    let mut i = t;
    while i >= 1 && array[i - 1] == n - t + i {
        i -= 1;
    }
    if i == 0 {
        return None;
    }
    for j in i..=t {
        next[j - 1] = array[i - 1] + 1 + j - i;
    }
    Some(next)
}

/// 1-based lexicographic rank of a `t`-subset of `[1, n]`.
///
/// Stinson's ranking algorithm: count the subsets that precede `array` by
/// summing, for each position, the subsets that branch off below it.
pub(crate) fn rank_subset(array: &[usize], t: usize, n: usize) -> u128 {
    let mut rank: u128 = 1;
    let mut previous = 0usize;
    for (i, &element) in array.iter().enumerate().take(t) {
        for j in (previous + 1)..element {
            rank += binomial((n - j) as u64, (t - i - 1) as u64);
        }
        previous = element;
    }
    rank
}

/// Binomial coefficient `C(n, k)`; zero when `k > n`.
pub(crate) fn binomial(n: u64, k: u64) -> u128 {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    let mut b: u128 = 1;
    let mut m = n as u128;
    for i in 1..=k as u128 {
        b = b * m / i;
        m -= 1;
    }
    b
}
