//! Specific decoder for Steiner triple systems (`d = 2`).

use crate::cff::SetSystem;
use crate::matrix::Defectives;
use crate::Error;

/// Pair-indexed lookup tables over the full triple system: for points
/// `a != b`, `third[a][b]` completes the unique triple through them and
/// `rank[a][b]` is that triple's 1-based index.
pub(crate) struct PairTables {
    third: Vec<Vec<usize>>,
    rank: Vec<Vec<usize>>,
}

impl PairTables {
    pub(crate) fn new(system: &SetSystem) -> Self {
        let v = system.points;
        let mut third = vec![vec![0usize; v + 1]; v + 1];
        let mut rank = vec![vec![0usize; v + 1]; v + 1];
        for (index, block) in system.sets.iter().enumerate() {
            let (a, b, c) = (block[0], block[1], block[2]);
            for (x, y, z) in [(a, b, c), (a, c, b), (b, c, a)] {
                third[x][y] = z;
                third[y][x] = z;
                rank[x][y] = index + 1;
                rank[y][x] = index + 1;
            }
        }
        Self { third, rank }
    }
}

/// Decode the outcome vector of an STS-built 2-CFF.
///
/// Positive rows are points of the triple system; defective columns are
/// triples. Up to two defectives light up 3, 5, or 6 points (two triples
/// share at most one point, so 4 is impossible); more than six means more
/// than two modifications, in which case every completed triple inside the
/// positive set is reported and the result flagged ambiguous.
pub(crate) fn decode(system: &SetSystem, y: &[bool]) -> Result<Defectives, Error> {
    let positives: Vec<usize> = y
        .iter()
        .enumerate()
        .filter(|&(_, &positive)| positive)
        .map(|(i, _)| i + 1)
        .collect();

    match positives.len() {
        0 => {
            return Ok(Defectives {
                columns: Vec::new(),
                located: true,
            })
        }
        1 | 2 | 4 => {
            return Err(Error::InvalidOutcome(
                "positive point count impossible for a triple system",
            ))
        }
        _ => {}
    }

    let tables = PairTables::new(system);
    if positives.len() <= 6 {
        decode_up_to_two(&tables, &positives)
    } else {
        decode_beyond_capacity(&tables, &positives)
    }
}

/// At most two defective triples: complete a pair through the smallest
/// positive point, then check the residue is a whole triple or a pair whose
/// completion was already consumed.
fn decode_up_to_two(tables: &PairTables, positives: &[usize]) -> Result<Defectives, Error> {
    let mut columns = Vec::new();
    let mut used = Vec::new();
    let mut rest = positives.to_vec();

    let first = rest[0];
    let mut i = 1;
    while i < rest.len() {
        let second = rest[i];
        let third = tables.third[first][second];
        if rest.contains(&third) {
            columns.push(tables.rank[first][second]);
            used.extend([first, second, third]);
            rest.retain(|&p| p != first && p != second && p != third);
        }
        i += 1;
    }

    if !rest.is_empty() {
        if rest.len() < 2 {
            return Err(Error::InvalidOutcome("positive points do not form triples"));
        }
        let (a, b) = (rest[0], rest[1]);
        let completion = tables.third[a][b];
        let valid = (rest.len() == 3 && completion == rest[2])
            || (rest.len() == 2 && used.contains(&completion));
        if !valid {
            return Err(Error::InvalidOutcome("positive points do not form triples"));
        }
        columns.push(tables.rank[a][b]);
    }

    Ok(Defectives {
        columns,
        located: true,
    })
}

/// More than two defectives: collect every distinct triple completed inside
/// the positive set. Each positive point must land in some triple or the
/// vector is inconsistent.
fn decode_beyond_capacity(tables: &PairTables, positives: &[usize]) -> Result<Defectives, Error> {
    let mut triples: Vec<[usize; 3]> = Vec::new();
    let mut rest = positives.to_vec();

    for i in 0..positives.len() {
        for j in (i + 1)..positives.len() {
            let (first, second) = (positives[i], positives[j]);
            let third = tables.third[first][second];
            if positives.contains(&third) {
                let mut triple = [first, second, third];
                triple.sort_unstable();
                if !triples.contains(&triple) {
                    triples.push(triple);
                    rest.retain(|&p| p != first && p != second && p != third);
                }
            }
        }
    }

    if !rest.is_empty() {
        return Err(Error::InvalidOutcome("positive points do not form triples"));
    }

    Ok(Defectives {
        columns: triples.iter().map(|t| tables.rank[t[0]][t[1]]).collect(),
        located: false,
    })
}
