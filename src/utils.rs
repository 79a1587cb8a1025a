//! Small numeric helpers shared across the pipeline.

use glam::Vec2;

/// Linear map of `val` from `[in_min, in_max]` to `[out_min, out_max]`.
/// A degenerate input range maps everything to `out_min`.
pub fn linlin(val: f64, in_min: f64, in_max: f64, out_min: f64, out_max: f64) -> f64 {
    let in_span = in_max - in_min;
    if in_span.abs() < f64::EPSILON {
        return out_min;
    }
    (val - in_min) / in_span * (out_max - out_min) + out_min
}

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

fn fnv1a(seed: u64, bytes: &[u8]) -> u64 {
    let mut hash = seed;
    for &b in bytes {
        hash ^= b as u64;
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

/// Content hash over the bit patterns of a float slice.
pub fn hash_f32_slice(values: &[f32]) -> u64 {
    let mut hash = FNV_OFFSET;
    for v in values {
        hash = fnv1a(hash, &v.to_bits().to_le_bytes());
    }
    hash
}

/// Content hash over a flattened point set.
pub fn hash_points(points: &[Vec2]) -> u64 {
    let mut hash = FNV_OFFSET;
    for p in points {
        hash = fnv1a(hash, &p.x.to_bits().to_le_bytes());
        hash = fnv1a(hash, &p.y.to_bits().to_le_bytes());
    }
    hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linlin_maps_endpoints() {
        assert_eq!(linlin(0.0, 0.0, 10.0, 0.0, 9.0), 0.0);
        assert_eq!(linlin(10.0, 0.0, 10.0, 0.0, 9.0), 9.0);
        assert_eq!(linlin(5.0, 0.0, 10.0, 0.0, 9.0), 4.5);
    }

    #[test]
    fn linlin_degenerate_range() {
        assert_eq!(linlin(3.0, 7.0, 7.0, 0.0, 9.0), 0.0);
    }

    #[test]
    fn hash_is_content_sensitive() {
        let a = hash_f32_slice(&[1.0, 2.0, 3.0]);
        let b = hash_f32_slice(&[1.0, 2.0, 3.5]);
        assert_ne!(a, b);
        assert_eq!(a, hash_f32_slice(&[1.0, 2.0, 3.0]));
    }
}
