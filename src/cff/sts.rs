//! Steiner triple system construction (`d = 2`).
//!
//! An STS of order `v` partitions every pair of points into a unique triple,
//! which makes the triple system a 2-cover-free family: a triple shares at
//! most one point with any other, so two other columns can never cover all
//! three of its rows. Orders `v ≡ 3 (mod 6)` come from the Bose
//! construction, orders `v ≡ 1 (mod 6)` from the Skolem construction.

use crate::cff::SetSystem;
use crate::Error;

/// Build a 2-CFF whose columns are the triples of the smallest admissible
/// Steiner triple system with at least `n` triples.
pub(crate) fn build(d: usize, n: usize) -> Result<SetSystem, Error> {
    if d != 2 {
        return Err(Error::InvalidParameter("the STS construction requires d = 2"));
    }
    if n < 7 {
        return Err(Error::InvalidParameter("the STS construction requires n >= 7"));
    }

    // Smallest v with v(v-1)/6 >= n, bumped to the next order ≡ 1, 3 (mod 6).
    let mut v = ((1.0 + ((1 + 24 * n) as f64).sqrt()) / 2.0).ceil() as usize;
    match v % 6 {
        0 | 2 => v += 1,
        4 | 5 => v += 7 - v % 6,
        _ => {}
    }

    Ok(SetSystem {
        d,
        n,
        points: v,
        sets: generate(v),
    })
}

/// All triples of the STS of order `v`, 1-based points.
fn generate(v: usize) -> Vec<Vec<usize>> {
    let mut blocks = Vec::with_capacity(v * (v - 1) / 6);

    if v % 6 == 3 {
        // Bose: symmetric idempotent quasigroup of order Q = v / 3 from the
        // Latin square ((Q+1)/2)(x+y) mod Q.
        let big_q = v / 3;
        let latin = |x: usize, y: usize| ((big_q + 1) / 2 * (x + y)) % big_q;

        for x in 0..big_q {
            blocks.push(vec![3 * x + 1, 3 * x + 2, 3 * x + 3]);
        }
        for x in 0..big_q {
            for y in (x + 1)..big_q {
                for i in 0..3 {
                    blocks.push(vec![3 * x + i + 1, 3 * y + i + 1, 3 * latin(x, y) + (i + 1) % 3 + 1]);
                }
            }
        }
    } else {
        // Skolem: v = 6m + 1 with a symmetric half-idempotent quasigroup of
        // order 2m and the point v as infinity.
        debug_assert_eq!(v % 6, 1);
        let m = (v - 1) / 6;
        let big_q = 2 * m;
        let latin = |x: usize, y: usize| {
            let t = (x + y) % big_q;
            if t % 2 == 0 {
                t / 2
            } else {
                (t + big_q - 1) / 2
            }
        };

        for x in 0..m {
            blocks.push(vec![3 * x + 1, 3 * x + 2, 3 * x + 3]);
            for i in 0..3 {
                blocks.push(vec![v, 3 * (x + m) + i + 1, 3 * x + (i + 1) % 3 + 1]);
            }
        }
        for x in 0..big_q {
            for y in (x + 1)..big_q {
                for i in 0..3 {
                    blocks.push(vec![3 * x + i + 1, 3 * y + i + 1, 3 * latin(x, y) + (i + 1) % 3 + 1]);
                }
            }
        }
    }

    blocks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_is_steiner(blocks: &[Vec<usize>], v: usize) {
        assert_eq!(blocks.len(), v * (v - 1) / 6);
        // every pair of points appears in exactly one triple
        let mut pair_count = vec![vec![0usize; v + 1]; v + 1];
        for block in blocks {
            assert_eq!(block.len(), 3);
            for &p in block {
                assert!(p >= 1 && p <= v);
            }
            for a in 0..3 {
                for b in (a + 1)..3 {
                    pair_count[block[a]][block[b]] += 1;
                    pair_count[block[b]][block[a]] += 1;
                }
            }
        }
        for a in 1..=v {
            for b in 1..=v {
                if a != b {
                    assert_eq!(pair_count[a][b], 1, "pair ({a}, {b}) of order {v}");
                }
            }
        }
    }

    #[test]
    fn skolem_orders_are_steiner() {
        assert_is_steiner(&generate(7), 7);
        assert_is_steiner(&generate(13), 13);
        assert_is_steiner(&generate(19), 19);
    }

    #[test]
    fn bose_orders_are_steiner() {
        assert_is_steiner(&generate(9), 9);
        assert_is_steiner(&generate(15), 15);
        assert_is_steiner(&generate(21), 21);
    }

    #[test]
    fn order_selection() {
        assert_eq!(build(2, 7).unwrap().points, 7);
        assert_eq!(build(2, 8).unwrap().points, 9);
        assert_eq!(build(2, 12).unwrap().points, 9);
        assert_eq!(build(2, 13).unwrap().points, 13);
        assert_eq!(build(2, 30).unwrap().points, 15);
    }

    #[test]
    fn rejects_invalid_parameters() {
        assert!(build(1, 10).is_err());
        assert!(build(3, 10).is_err());
        assert!(build(2, 6).is_err());
    }
}
