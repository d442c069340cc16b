//! 2-D Discrete Cosine Transform used by the perceptual hash.
//!
//! The forward transform is the un-normalized type-II DCT:
//!
//! `F[u][v] = sum_i sum_j f[i][j] * cos(pi/N * (i+0.5) * u) * cos(pi/M * (j+0.5) * v)`
//!
//! The inverse applies the matching `2/N * 2/M` scale with half-weight on the
//! zero-frequency row and column. It exists for diagnostic round-tripping; the
//! fingerprint itself only needs the forward transform.
//!
//! At 32x32 the O(N^2 * M^2) nested summation is cheap enough that nothing
//! fancier than four loops is warranted.

use std::f64::consts::PI;

/// Forward 2-D type-II DCT over an N x M matrix (rows x columns).
pub fn dct_2d(input: &[Vec<f64>]) -> Vec<Vec<f64>> {
    let n = input.len();
    let m = if n > 0 { input[0].len() } else { 0 };

    let mut output = vec![vec![0.0; m]; n];
    for u in 0..n {
        for v in 0..m {
            let mut sum = 0.0;
            for i in 0..n {
                let row_cos = (PI / n as f64 * (i as f64 + 0.5) * u as f64).cos();
                for j in 0..m {
                    let col_cos = (PI / m as f64 * (j as f64 + 0.5) * v as f64).cos();
                    sum += input[i][j] * row_cos * col_cos;
                }
            }
            output[u][v] = sum;
        }
    }
    output
}

/// Inverse of [`dct_2d`].
///
/// Zero-frequency terms carry half weight, and the whole sum is scaled by
/// `2/N * 2/M` so that `idct_2d(dct_2d(f))` reproduces `f`.
pub fn idct_2d(coefficients: &[Vec<f64>]) -> Vec<Vec<f64>> {
    let n = coefficients.len();
    let m = if n > 0 { coefficients[0].len() } else { 0 };

    let mut output = vec![vec![0.0; m]; n];
    for x in 0..n {
        for y in 0..m {
            let mut sum = 0.0;
            for u in 0..n {
                let wu = if u == 0 { 0.5 } else { 1.0 };
                let row_cos = (PI / n as f64 * (x as f64 + 0.5) * u as f64).cos();
                for v in 0..m {
                    let wv = if v == 0 { 0.5 } else { 1.0 };
                    let col_cos = (PI / m as f64 * (y as f64 + 0.5) * v as f64).cos();
                    sum += wu * wv * coefficients[u][v] * row_cos * col_cos;
                }
            }
            output[x][y] = sum * (2.0 / n as f64) * (2.0 / m as f64);
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dc_coefficient_is_the_plain_sum() {
        let input = vec![vec![3.0; 4]; 4];
        let coefficients = dct_2d(&input);
        // u = v = 0: all cosines are 1, so F[0][0] is the sum of the matrix
        assert!((coefficients[0][0] - 48.0).abs() < 1e-9);
    }

    #[test]
    fn uniform_input_has_no_ac_energy() {
        let input = vec![vec![10.0; 8]; 8];
        let coefficients = dct_2d(&input);
        for u in 0..8 {
            for v in 0..8 {
                if u == 0 && v == 0 {
                    continue;
                }
                assert!(
                    coefficients[u][v].abs() < 1e-6,
                    "AC coefficient [{u}][{v}] = {}",
                    coefficients[u][v]
                );
            }
        }
    }

    #[test]
    fn round_trip_recovers_small_matrix_exactly() {
        let input = vec![
            vec![12.0, -7.5, 3.25, 0.0],
            vec![100.0, 50.0, -127.5, 127.5],
            vec![0.5, -0.5, 64.0, -64.0],
            vec![1.0, 2.0, 3.0, 4.0],
        ];

        let recovered = idct_2d(&dct_2d(&input));
        for (row_in, row_out) in input.iter().zip(recovered.iter()) {
            for (a, b) in row_in.iter().zip(row_out.iter()) {
                assert!((a - b).abs() < 1e-9, "expected {a}, got {b}");
            }
        }
    }

    #[test]
    fn round_trip_of_random_32x32_stays_within_tolerance() {
        use rand::Rng;

        let mut rng = rand::rng();
        let input: Vec<Vec<f64>> = (0..32)
            .map(|_| (0..32).map(|_| rng.random_range(-127.5..127.5)).collect())
            .collect();

        let recovered = idct_2d(&dct_2d(&input));

        let mut absolute_error = 0.0;
        for (row_in, row_out) in input.iter().zip(recovered.iter()) {
            for (a, b) in row_in.iter().zip(row_out.iter()) {
                absolute_error += (a - b).abs();
            }
        }
        let mean_absolute_error = absolute_error / (32.0 * 32.0);
        assert!(
            mean_absolute_error < 1.0,
            "mean absolute error {mean_absolute_error} too large"
        );
    }
}
