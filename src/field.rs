use core::ops::{Add, Mul, Sub};

use crate::Q;

/// An integer modulo q = 3329, the prime modulus shared by every ring
/// element in the scheme. Stored as `u16`, widened to `u32`/`u64` for
/// arithmetic so products can be reduced without overflow.
///
/// All three operations are branchless: values derived from secrets flow
/// through here, so reduction never branches on the value being reduced.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Zq(pub(crate) u16);

impl Zq {
    pub(crate) const ZERO: Self = Self(0);
    /// Barrett constant: floor(2^32 / q).
    const M: u64 = (1u64 << 32) / (Q as u64);

    pub(crate) const fn new(v: u16) -> Self {
        debug_assert!(v < Q);
        Self(v)
    }

    pub(crate) const fn get(self) -> u16 {
        self.0
    }

    /// Subtract q unless the (wrapped) value is already below it. The high
    /// bit of the wrapped difference doubles as the borrow flag.
    #[inline(always)]
    const fn reduce_once(x: u16) -> u16 {
        let t = x.wrapping_sub(Q);
        t.wrapping_add((t >> 15).wrapping_mul(Q))
    }
}

impl Add for Zq {
    type Output = Self;

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        // Both inputs are < q, so the sum fits u16 with room to spare.
        Self(Self::reduce_once(self.0 + rhs.0))
    }
}

impl Sub for Zq {
    type Output = Self;

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        // A borrow sets the high bit of the wrapped difference; add q back.
        let d = self.0.wrapping_sub(rhs.0);
        Self(d.wrapping_add((d >> 15).wrapping_mul(Q)))
    }
}

impl Mul for Zq {
    type Output = Self;

    #[inline(always)]
    #[allow(clippy::cast_possible_truncation)]
    fn mul(self, rhs: Self) -> Self {
        let prod = u64::from(self.0) * u64::from(rhs.0);
        let quot = (prod * Self::M) >> 32;
        // Barrett leaves the remainder within one subtraction of q.
        let rem = (prod - quot * u64::from(Q)) as u16;
        Self(Self::reduce_once(rem))
    }
}

#[cfg(test)]
mod tests {
    use rand::{Rng, SeedableRng};

    use super::Zq;
    use crate::Q;

    fn naive_mul(a: u16, b: u16) -> u16 {
        ((u32::from(a) * u32::from(b)) % u32::from(Q)) as u16
    }

    #[test]
    fn add_sub_mul_match_naive() {
        let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(42);
        for _ in 0..10_000 {
            let a = rng.gen_range(0..Q);
            let b = rng.gen_range(0..Q);
            assert_eq!((Zq(a) + Zq(b)).get(), (a + b) % Q);
            assert_eq!((Zq(a) - Zq(b)).get(), (a + Q - b) % Q);
            assert_eq!((Zq(a) * Zq(b)).get(), naive_mul(a, b));
        }
    }

    #[test]
    fn edge_values() {
        let top = Zq(Q - 1);
        assert_eq!((top + top).get(), Q - 2);
        assert_eq!((top * top).get(), naive_mul(Q - 1, Q - 1));
        assert_eq!((Zq::ZERO - top).get(), 1);
        assert_eq!((top - top).get(), 0);
    }
}
