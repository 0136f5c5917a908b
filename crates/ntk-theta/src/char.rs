//! Theta characteristics as half-integer offset vectors.

use ntk_ball::{vec_scalar_mul_2exp, Arb};
use ntk_core::errors::{ErrorInfo, NtkError};

/// Largest dimension whose characteristics fit a `u64` index.
pub const MAX_CHAR_DIM: usize = 63;

/// Number of characteristics in dimension `g`, i.e. `2^g`.
pub fn char_count(g: usize) -> Result<u64, NtkError> {
    if g > MAX_CHAR_DIM {
        return Err(NtkError::Theta(
            ErrorInfo::new("dimension-too-large", "characteristic index does not fit 64 bits")
                .with_context("g", g)
                .with_context("max", MAX_CHAR_DIM),
        ));
    }
    Ok(1u64 << g)
}

/// Bits of characteristic `a`, first coordinate first.
///
/// Coordinate `k` is read from bit `g - 1 - k`, so the first coordinate is
/// the most significant bit of the index.
pub fn char_bits(a: u64, g: usize) -> Vec<bool> {
    (0..g)
        .map(|k| {
            let shift = g - 1 - k;
            shift < 64 && (a >> shift) & 1 == 1
        })
        .collect()
}

/// Index of the characteristic with the given bits; inverse of [`char_bits`].
pub fn char_from_bits(bits: &[bool]) -> u64 {
    bits.iter().fold(0u64, |acc, &bit| (acc << 1) | u64::from(bit))
}

/// Maps `{0,1}^g` to `{0,1/2}^g`.
pub fn half_offsets(bits: &[bool]) -> Vec<Arb> {
    let units: Vec<Arb> = bits.iter().map(|&bit| Arb::from_i64(i64::from(bit))).collect();
    vec_scalar_mul_2exp(&units, -1)
}

/// Offset vector of characteristic `a` in dimension `g`.
pub fn char_get_arb(a: u64, g: usize) -> Vec<Arb> {
    half_offsets(&char_bits(a, g))
}

/// Characteristic obtained by toggling the half-offset of coordinate `coord`.
///
/// `None` when `coord` is not a coordinate of dimension `g`, or when its bit
/// lies outside a `u64` index.
pub fn char_toggle(a: u64, g: usize, coord: usize) -> Option<u64> {
    if coord >= g {
        return None;
    }
    let shift = u32::try_from(g - 1 - coord).ok()?;
    Some(a ^ 1u64.checked_shl(shift)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bits_are_most_significant_first() {
        assert_eq!(char_bits(0b100, 3), vec![true, false, false]);
        assert_eq!(char_bits(0b011, 3), vec![false, true, true]);
        assert_eq!(char_from_bits(&[true, false, true]), 0b101);
    }

    #[test]
    fn offsets_are_halves() {
        let w = char_get_arb(0b10, 2);
        assert_eq!(w, vec![Arb::from_f64(0.5), Arb::zero()]);
        assert!(half_offsets(&[]).is_empty());
    }

    #[test]
    fn toggling_flips_one_coordinate() {
        let a = 0b0110;
        let b = char_toggle(a, 4, 0).unwrap();
        assert_eq!(char_bits(b, 4), vec![true, true, true, false]);
        assert_eq!(char_toggle(b, 4, 0), Some(a));
        assert_eq!(char_toggle(a, 4, 3), Some(0b0111));
    }

    #[test]
    fn toggling_outside_the_dimension_is_rejected() {
        assert_eq!(char_toggle(0, 0, 0), None);
        assert_eq!(char_toggle(0b11, 2, 2), None);
        assert_eq!(char_toggle(0, 65, 0), None);
        assert_eq!(char_toggle(0, 64, 0), Some(1 << 63));
    }

    #[test]
    fn count_is_bounded() {
        assert_eq!(char_count(0).unwrap(), 1);
        assert_eq!(char_count(4).unwrap(), 16);
        assert_eq!(char_count(64).unwrap_err().code(), "dimension-too-large");
    }
}
