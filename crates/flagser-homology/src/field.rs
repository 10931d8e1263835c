//! Prime field arithmetic for coefficients.

use flagser_core::errors::{ErrorInfo, FlagserError};
use flagser_core::params::is_prime;

/// Arithmetic in the prime field `F_p`.
///
/// Elements are kept in `0..p`; products are formed in 64 bits so no
/// intermediate value can wrap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrimeField {
    modulus: u32,
}

impl PrimeField {
    /// Creates the field of order `modulus`, which must be prime.
    pub fn new(modulus: u32) -> Result<Self, FlagserError> {
        if !is_prime(modulus) {
            return Err(FlagserError::InvalidParameter(
                ErrorInfo::new("non-prime-coefficient", "coefficient field order must be prime")
                    .with_parameter("coeff", modulus),
            ));
        }
        Ok(Self { modulus })
    }

    /// Order of the field.
    pub fn modulus(&self) -> u32 {
        self.modulus
    }

    /// `a + b`.
    pub fn add(&self, a: u32, b: u32) -> u32 {
        ((u64::from(a) + u64::from(b)) % u64::from(self.modulus)) as u32
    }

    /// `a * b`.
    pub fn mul(&self, a: u32, b: u32) -> u32 {
        ((u64::from(a) * u64::from(b)) % u64::from(self.modulus)) as u32
    }

    /// `-a`.
    pub fn neg(&self, a: u32) -> u32 {
        if a == 0 {
            0
        } else {
            self.modulus - a
        }
    }

    /// Multiplicative inverse of a non-zero element, by Fermat's little theorem.
    pub fn inv(&self, a: u32) -> u32 {
        debug_assert!(a % self.modulus != 0, "zero has no inverse");
        self.pow(a, self.modulus - 2)
    }

    /// `(-1)^exponent` as a field element.
    pub fn sign(&self, exponent: usize) -> u32 {
        if exponent % 2 == 0 {
            1 % self.modulus
        } else {
            self.neg(1)
        }
    }

    fn pow(&self, base: u32, mut exponent: u32) -> u32 {
        let modulus = u64::from(self.modulus);
        let mut base = u64::from(base) % modulus;
        let mut acc = 1u64;
        while exponent > 0 {
            if exponent & 1 == 1 {
                acc = acc * base % modulus;
            }
            base = base * base % modulus;
            exponent >>= 1;
        }
        acc as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inverses_multiply_to_one() {
        for p in [2u32, 3, 5, 7, 13, 65_521, 4_294_967_291] {
            let field = PrimeField::new(p).unwrap();
            for a in [1u32, 2, p / 2, p - 1] {
                if a % p == 0 {
                    continue;
                }
                assert_eq!(field.mul(a, field.inv(a)), 1, "p = {p}, a = {a}");
            }
        }
    }

    #[test]
    fn signs_in_characteristic_two_coincide() {
        let field = PrimeField::new(2).unwrap();
        assert_eq!(field.sign(0), field.sign(1));
        let field = PrimeField::new(3).unwrap();
        assert_eq!(field.sign(1), 2);
        assert_eq!(field.add(field.sign(0), field.sign(1)), 0);
    }

    #[test]
    fn composite_order_is_rejected() {
        let err = PrimeField::new(9).unwrap_err();
        assert!(matches!(err, FlagserError::InvalidParameter(_)));
    }
}
