//! Properties every fingerprint and hash algorithm must hold.

use image::{DynamicImage, ImageBuffer, Rgb};
use imgdup::core::fingerprint::{hamming_distance, Fingerprint};
use imgdup::core::hasher::{build_hasher, AlgorithmKind};
use rand::Rng;

const ALL_ALGORITHMS: [AlgorithmKind; 3] = [
    AlgorithmKind::Average,
    AlgorithmKind::Difference,
    AlgorithmKind::Perceptual,
];

fn noise_image(seed: u64) -> DynamicImage {
    // Deterministic pseudo-noise so failures are reproducible
    let mut state = seed.wrapping_mul(0x9E3779B97F4A7C15).wrapping_add(1);
    let mut next = move || {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        (state & 0xFF) as u8
    };
    let img = ImageBuffer::from_fn(50, 40, |_, _| Rgb([next(), next(), next()]));
    DynamicImage::ImageRgb8(img)
}

#[test]
fn every_algorithm_produces_16_lowercase_hex_chars() {
    for algorithm in ALL_ALGORITHMS {
        let hasher = build_hasher(algorithm);
        for seed in 0..5 {
            let fingerprint = hasher.hash_image(&noise_image(seed)).unwrap();
            let hex = fingerprint.as_str();
            assert_eq!(hex.len(), 16, "{algorithm} seed {seed}");
            assert!(
                hex.chars()
                    .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)),
                "{algorithm} produced {hex}"
            );
        }
    }
}

#[test]
fn hashing_is_deterministic() {
    for algorithm in ALL_ALGORITHMS {
        let hasher = build_hasher(algorithm);
        let image = noise_image(42);
        assert_eq!(
            hasher.hash_image(&image).unwrap(),
            hasher.hash_image(&image).unwrap(),
            "{algorithm}"
        );
    }
}

#[test]
fn distance_is_reflexive_symmetric_and_bounded() {
    let mut rng = rand::rng();
    for _ in 0..50 {
        let a = Fingerprint::from_hex(format!("{:016x}", rng.random::<u64>()));
        let b = Fingerprint::from_hex(format!("{:016x}", rng.random::<u64>()));

        assert_eq!(hamming_distance(&a, &a).unwrap(), 0);

        let ab = hamming_distance(&a, &b).unwrap();
        let ba = hamming_distance(&b, &a).unwrap();
        assert_eq!(ab, ba);
        assert!(ab <= 64);
    }
}

#[test]
fn distances_between_hashes_stay_in_range() {
    for algorithm in ALL_ALGORITHMS {
        let hasher = build_hasher(algorithm);
        let a = hasher.hash_image(&noise_image(1)).unwrap();
        let b = hasher.hash_image(&noise_image(2)).unwrap();
        assert!(hamming_distance(&a, &b).unwrap() <= 64, "{algorithm}");
    }
}

#[test]
fn small_brightness_shift_keeps_gradient_hashes_close() {
    let base = ImageBuffer::from_fn(64, 64, |x, y| {
        let v = (x * 2 + y * 2) as u8;
        Rgb([v, v, v])
    });
    let shifted = ImageBuffer::from_fn(64, 64, |x, y| {
        let v = ((x * 2 + y * 2) as u8).saturating_add(10);
        Rgb([v, v, v])
    });

    // A uniform brightness shift leaves left-to-right deltas untouched
    let hasher = build_hasher(AlgorithmKind::Difference);
    let a = hasher
        .hash_image(&DynamicImage::ImageRgb8(base))
        .unwrap();
    let b = hasher
        .hash_image(&DynamicImage::ImageRgb8(shifted))
        .unwrap();
    assert!(hamming_distance(&a, &b).unwrap() <= 4);
}

#[test]
fn malformed_hex_fails_at_comparison_time() {
    let good = Fingerprint::from_hex("0123456789abcdef");
    for bad in ["0123456789abcdeg", "xxxxxxxxxxxxxxxx", "0123456789ABCDE "] {
        let bad = Fingerprint::from_hex(bad);
        assert!(
            hamming_distance(&good, &bad).is_err(),
            "{bad:?} should be rejected"
        );
    }
}
