//! Cryptographic Utilities

use std::ops::RangeInclusive;

use rand::TryRngCore;
use rand::rngs::OsRng;

/// The operating system refused to hand out randomness
#[derive(Debug, Clone, thiserror::Error)]
#[error("OS entropy source failed: {0}")]
pub struct EntropyError(String);

/// Draw a uniformly distributed integer from `range` using the OS CSPRNG.
///
/// Uses rejection sampling: raw 32-bit draws that fall in the incomplete
/// last bucket are discarded, so `value % span` carries no modulo bias.
pub fn uniform_u32(range: RangeInclusive<u32>) -> Result<u32, EntropyError> {
    let (low, high) = range.into_inner();
    debug_assert!(low <= high, "empty range");

    let span = u64::from(high.saturating_sub(low)) + 1;
    let zone = (1u64 << 32) - ((1u64 << 32) % span);

    loop {
        let draw = OsRng
            .try_next_u32()
            .map_err(|e| EntropyError(e.to_string()))?;
        let draw = u64::from(draw);
        if draw < zone {
            // span <= 2^32 and draw % span < span, so this fits in u32
            return Ok(low + (draw % span) as u32);
        }
    }
}

/// Constant-time comparison to prevent timing attacks
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut result = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }
    result == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_u32_stays_in_range() {
        for _ in 0..10_000 {
            let v = uniform_u32(10_000..=99_999).unwrap();
            assert!((10_000..=99_999).contains(&v));
        }
    }

    #[test]
    fn test_uniform_u32_single_value_range() {
        assert_eq!(uniform_u32(7..=7).unwrap(), 7);
    }

    #[test]
    fn test_uniform_u32_full_range() {
        // span of 2^32 must not overflow the zone computation
        let _ = uniform_u32(0..=u32::MAX).unwrap();
    }

    #[test]
    fn test_uniform_u32_covers_small_range() {
        let mut seen = [false; 4];
        for _ in 0..1_000 {
            seen[uniform_u32(0..=3).unwrap() as usize] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq(b"12345", b"12345"));
        assert!(!constant_time_eq(b"12345", b"12346"));
        assert!(!constant_time_eq(b"1234", b"12345"));
        assert!(constant_time_eq(b"", b""));
    }
}
