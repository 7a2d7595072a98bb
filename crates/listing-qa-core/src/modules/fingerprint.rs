//! Perceptual fingerprint (DCT hash).
//!
//! The intensity image is shrunk to 32x32, transformed with a 2-D DCT-II,
//! and the top-left 8x8 low-frequency block is compared against its median.
//! Each coefficient above the median sets one bit, row-major and MSB first,
//! giving a 64-bit hash rendered as 16 lowercase hex characters.

use std::f64::consts::PI;

use image::imageops::{self, FilterType};
use image::GrayImage;

/// Side of the low-frequency block; the hash has `HASH_SIZE^2` bits.
pub const HASH_SIZE: usize = 8;
/// Side of the downscaled image fed to the DCT.
const SAMPLE_SIZE: usize = HASH_SIZE * 4;
/// Hex characters in a rendered fingerprint.
pub const FINGERPRINT_LEN: usize = HASH_SIZE * HASH_SIZE / 4;

/// Computes the perceptual hash of an intensity image.
///
/// Zero-area images hash to all zeros.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn perceptual_hash(gray: &GrayImage) -> String {
    if gray.width() == 0 || gray.height() == 0 {
        return "0".repeat(FINGERPRINT_LEN);
    }

    let side = SAMPLE_SIZE as u32;
    let small = imageops::resize(gray, side, side, FilterType::Lanczos3);
    let samples: Vec<f64> = small.pixels().map(|p| f64::from(p.0[0])).collect();

    let coeffs = dct_2d(&samples, SAMPLE_SIZE);
    let low: Vec<f64> = (0..HASH_SIZE)
        .flat_map(|row| (0..HASH_SIZE).map(move |col| (row, col)))
        .map(|(row, col)| coeffs[row * SAMPLE_SIZE + col])
        .collect();

    let median = median(&low);
    let bits = low
        .iter()
        .fold(0u64, |acc, &c| (acc << 1) | u64::from(c > median));

    format!("{bits:0width$x}", width = FINGERPRINT_LEN)
}

/// Unnormalized DCT-II over rows, then columns, of an `n x n` matrix.
fn dct_2d(samples: &[f64], n: usize) -> Vec<f64> {
    let table = cosine_table(n);
    let mut rows = vec![0.0; n * n];
    for r in 0..n {
        dct_1d(&samples[r * n..(r + 1) * n], &table, &mut rows[r * n..(r + 1) * n]);
    }

    let mut out = vec![0.0; n * n];
    let mut column = vec![0.0; n];
    let mut transformed = vec![0.0; n];
    for c in 0..n {
        for r in 0..n {
            column[r] = rows[r * n + c];
        }
        dct_1d(&column, &table, &mut transformed);
        for r in 0..n {
            out[r * n + c] = transformed[r];
        }
    }
    out
}

/// `table[k * n + i] = cos(pi * k * (2i + 1) / 2n)`.
#[allow(clippy::cast_precision_loss)]
fn cosine_table(n: usize) -> Vec<f64> {
    let scale = PI / (2 * n) as f64;
    (0..n)
        .flat_map(|k| (0..n).map(move |i| ((k * (2 * i + 1)) as f64 * scale).cos()))
        .collect()
}

fn dct_1d(input: &[f64], table: &[f64], output: &mut [f64]) {
    let n = input.len();
    for (k, out) in output.iter_mut().enumerate() {
        let basis = &table[k * n..(k + 1) * n];
        *out = 2.0 * input.iter().zip(basis).map(|(x, b)| x * b).sum::<f64>();
    }
}

fn median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.is_empty() {
        0.0
    } else if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}
