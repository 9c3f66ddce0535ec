//! Specific decoder for Sperner set systems (`d = 1`).

use crate::cff::sperner::{rank_subset, subset_lex_successor};
use crate::matrix::Defectives;
use crate::Error;

/// Decode the outcome vector of a Sperner-built 1-CFF with `t` rows and `n`
/// columns.
///
/// Every column is a `t/2`-subset of the rows, so a single defective makes
/// exactly `t/2` tests positive and its column index is the lexicographic
/// rank of the positive set. More positives than that means more than one
/// modification: every `t/2`-subset of the positives with rank `<= n` is a
/// candidate and the result is flagged ambiguous.
pub(crate) fn decode(t: usize, n: usize, y: &[bool]) -> Result<Defectives, Error> {
    let positives: Vec<usize> = y
        .iter()
        .enumerate()
        .filter(|&(_, &positive)| positive)
        .map(|(i, _)| i + 1)
        .collect();
    let half = t / 2;

    if positives.is_empty() {
        return Ok(Defectives {
            columns: Vec::new(),
            located: true,
        });
    }

    if positives.len() < half {
        // every column covers exactly t/2 rows, so no modification pattern
        // can produce fewer positives
        return Err(Error::InvalidOutcome(
            "fewer positive tests than a single modified block produces",
        ));
    }

    if positives.len() == half {
        let rank = rank_subset(&positives, half, t) as usize;
        return Ok(Defectives {
            columns: vec![rank],
            located: true,
        });
    }

    // ambiguous: walk the t/2-subsets of the positive rows in lexicographic
    // order; ranks grow along the walk, so stop at the first overflow
    let mut columns = Vec::new();
    let mut index: Vec<usize> = (1..=half).collect();
    loop {
        let subset: Vec<usize> = index.iter().map(|&i| positives[i - 1]).collect();
        let rank = rank_subset(&subset, half, t);
        if rank <= n as u128 {
            columns.push(rank as usize);
        } else {
            break;
        }
        match subset_lex_successor(&index, half, positives.len()) {
            Some(next) => index = next,
            None => break,
        }
    }

    Ok(Defectives {
        columns,
        located: false,
    })
}
