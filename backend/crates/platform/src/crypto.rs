//! Random material and comparison helpers.

use rand::distributions::Uniform;
use rand::{Rng, RngCore, rngs::OsRng};

/// `len` bytes straight from the OS RNG.
pub fn random_bytes(len: usize) -> Vec<u8> {
    let mut buf = vec![0u8; len];
    OsRng.fill_bytes(&mut buf);
    buf
}

/// Numeric one-time code of `len` digits, each drawn uniformly.
///
/// Codes only need to resist guessing inside their TTL window, but drawing
/// from the OS RNG costs nothing extra.
pub fn generate_numeric_code(len: usize) -> String {
    OsRng
        .sample_iter(Uniform::new(0u8, 10))
        .take(len)
        .map(|d| char::from(b'0' + d))
        .collect()
}

/// Equality without an early exit on the first differing byte.
///
/// Length is allowed to short-circuit; code lengths are public.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_bytes_fills_the_buffer() {
        let bytes = random_bytes(32);
        assert_eq!(bytes.len(), 32);
        assert!(bytes.iter().any(|&b| b != 0));
    }

    #[test]
    fn codes_are_digits_of_requested_length() {
        for len in [4, 6, 8] {
            let code = generate_numeric_code(len);
            assert_eq!(code.len(), len);
            assert!(code.bytes().all(|b| b.is_ascii_digit()));
        }
    }

    #[test]
    fn every_digit_is_reachable() {
        let mut seen = [false; 10];
        for _ in 0..1000 {
            for b in generate_numeric_code(6).bytes() {
                seen[(b - b'0') as usize] = true;
            }
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn comparison_matches_equality() {
        assert!(constant_time_eq(b"482913", b"482913"));
        assert!(!constant_time_eq(b"482913", b"482914"));
        assert!(!constant_time_eq(b"482913", b"48291"));
        assert!(constant_time_eq(b"", b""));
    }
}
