//! Modular arithmetic over a prime field, enough to invert the
//! Vandermonde system the Reed-Solomon decoder solves.

/// `base^exponent mod modulus` by square-and-multiply.
pub(crate) fn mod_pow(base: i64, exponent: i64, modulus: i64) -> i64 {
    let mut result = 1i64;
    let mut base = base.rem_euclid(modulus);
    let mut exponent = exponent;
    while exponent > 0 {
        if exponent & 1 == 1 {
            result = result * base % modulus;
        }
        base = base * base % modulus;
        exponent >>= 1;
    }
    result
}

/// Fermat inverse `a^(q-2) mod q`; `q` must be prime.
pub(crate) fn mod_inverse(a: i64, modulus: i64) -> i64 {
    mod_pow(a, modulus - 2, modulus)
}

/// Inverse of the `k x k` Vandermonde matrix `V[i][j] = i^(k-1-j) mod q`
/// by Gauss-Jordan elimination with partial pivoting.
pub(crate) fn vandermonde_inverse(k: usize, q: i64) -> Vec<Vec<i64>> {
    // augmented [V | I]
    let mut aug = vec![vec![0i64; 2 * k]; k];
    for (i, row) in aug.iter_mut().enumerate() {
        for j in 0..k {
            row[j] = mod_pow(i as i64, (k - 1 - j) as i64, q);
        }
        row[k + i] = 1;
    }

    // forward elimination
    for p in 0..k {
        let mut pivot = p;
        for i in (p + 1)..k {
            if aug[i][p] > aug[pivot][p] {
                pivot = i;
            }
        }
        aug.swap(p, pivot);

        for i in (p + 1)..k {
            let alpha = aug[i][p] * mod_inverse(aug[p][p], q) % q;
            for j in p..2 * k {
                aug[i][j] = (aug[i][j] - alpha * aug[p][j] % q + q) % q;
            }
        }
    }

    // back substitution
    for p in (0..k).rev() {
        for i in (0..p).rev() {
            let alpha = aug[i][p] * mod_inverse(aug[p][p], q) % q;
            for j in (p..2 * k).rev() {
                aug[i][j] = (aug[i][j] - alpha * aug[p][j] % q + q) % q;
            }
        }
    }

    // scale rows so the left half is the identity
    for i in 0..k {
        let divisor = mod_inverse(aug[i][i], q);
        for j in k..2 * k {
            aug[i][j] = aug[i][j] * divisor % q;
        }
    }

    aug.into_iter().map(|row| row[k..].to_vec()).collect()
}

/// `matrix * vector mod q`.
pub(crate) fn mat_vec_mul(matrix: &[Vec<i64>], vector: &[i64], q: i64) -> Vec<i64> {
    matrix
        .iter()
        .map(|row| {
            row.iter()
                .zip(vector)
                .fold(0i64, |acc, (&m, &v)| (acc + m * v) % q)
        })
        .collect()
}
