/*!
The simulated qubit and its measurement/collapse rule.

No circuit execution is involved: the quantum behavior relevant to BB84
is fully captured by one rule. Measuring in the encoding basis returns
the encoded bit exactly; measuring in the other basis returns a uniform
random bit independent of the encoded value. The same rule applies to
every receiver, whether an interceptor mid-channel or Bob at the end.
*/

use std::fmt;
use std::ops::BitXor;

use crate::core::random::RandomSource;

/// A classical bit value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub enum Bit {
    /// Binary 0
    Zero,
    /// Binary 1
    One,
}

impl Bit {
    /// Convert a bool to a Bit (`true` maps to `One`)
    pub fn from_bool(value: bool) -> Self {
        if value { Bit::One } else { Bit::Zero }
    }

    /// Get the numeric value of this Bit
    pub fn as_u8(self) -> u8 {
        match self {
            Bit::Zero => 0,
            Bit::One => 1,
        }
    }
}

impl BitXor for Bit {
    type Output = Bit;

    fn bitxor(self, rhs: Bit) -> Bit {
        Bit::from_bool(self != rhs)
    }
}

impl fmt::Display for Bit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

/// One of the two conjugate measurement bases.
///
/// The two bases are interchangeable; neither is privileged by the
/// protocol. Measuring relative to the wrong basis yields a uniformly
/// random outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub enum Basis {
    /// Z basis (horizontal/vertical)
    Rectilinear,
    /// X basis (+45/-45 degrees)
    Diagonal,
}

impl fmt::Display for Basis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Basis::Rectilinear => write!(f, "Rectilinear"),
            Basis::Diagonal => write!(f, "Diagonal"),
        }
    }
}

/// A simulated qubit: one bit encoded in one basis.
///
/// Ephemeral by design. A qubit lives for a single transmission step;
/// each measure-and-reprepare hop creates a fresh one reflecting the
/// most recent measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Qubit {
    bit: Bit,
    basis: Basis,
}

impl Qubit {
    /// Encode a bit in a basis.
    pub fn new(bit: Bit, basis: Basis) -> Self {
        Self { bit, basis }
    }

    /// The encoded bit.
    pub fn bit(&self) -> Bit {
        self.bit
    }

    /// The encoding basis.
    pub fn basis(&self) -> Basis {
        self.basis
    }

    /// Measure this qubit in `basis`.
    ///
    /// Matching basis returns the encoded bit deterministically.
    /// Mismatching basis returns a uniform random bit independent of
    /// the encoded value. Total: every bit/basis combination is valid.
    pub fn measure(&self, basis: Basis, rng: &mut RandomSource) -> Bit {
        if basis == self.basis {
            self.bit
        } else {
            rng.next_bit()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matching_basis_is_deterministic() {
        // Exhaustive 2x2 table: every bit in every basis survives a
        // matching-basis measurement exactly.
        let mut rng = RandomSource::seeded(0);

        for bit in [Bit::Zero, Bit::One] {
            for basis in [Basis::Rectilinear, Basis::Diagonal] {
                let qubit = Qubit::new(bit, basis);
                for _ in 0..100 {
                    assert_eq!(qubit.measure(basis, &mut rng), bit);
                }
            }
        }
    }

    #[test]
    fn test_mismatching_basis_is_uniform() {
        let mut rng = RandomSource::seeded(99);
        let trials = 10_000;

        for bit in [Bit::Zero, Bit::One] {
            let qubit = Qubit::new(bit, Basis::Rectilinear);
            let ones = (0..trials)
                .filter(|_| qubit.measure(Basis::Diagonal, &mut rng) == Bit::One)
                .count();

            // Uniform regardless of the encoded value.
            assert!(
                (4_500..=5_500).contains(&ones),
                "encoded {}: ones = {}",
                bit,
                ones
            );
        }
    }

    #[test]
    fn test_bit_xor_is_self_inverse() {
        for a in [Bit::Zero, Bit::One] {
            for b in [Bit::Zero, Bit::One] {
                assert_eq!(a ^ b ^ b, a);
            }
        }
    }

    #[test]
    fn test_bit_conversion() {
        assert_eq!(Bit::from_bool(false), Bit::Zero);
        assert_eq!(Bit::from_bool(true), Bit::One);
        assert_eq!(Bit::Zero.as_u8(), 0);
        assert_eq!(Bit::One.as_u8(), 1);
    }
}
