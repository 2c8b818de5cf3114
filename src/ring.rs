use core::marker::PhantomData;
use core::ops::{Add, Index, IndexMut, Mul, Sub};

use crate::field::Zq;
use crate::N;

/// Marker for the standard (coefficient) representation, i.e. elements of
/// `R_q = Z_q[X]/(X^256 + 1)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Standard;

/// Marker for the NTT representation, i.e. elements of `T_q`, the image of
/// `R_q` under the number-theoretic transform.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Ntt;

/// The representation a [`Ring`] element is in. Sealed to the two domains
/// the scheme actually uses; the type parameter makes mixing them a compile
/// error rather than a runtime one.
pub(crate) trait Domain: Clone + Copy {}

impl Domain for Standard {}
impl Domain for Ntt {}

/// A 256-coefficient element of `R_q` or `T_q`, depending on the domain
/// marker. Addition, subtraction and scalar multiplication act
/// componentwise and preserve the representation; ring multiplication is
/// only defined for `Ring<Ntt>` (see `ntt.rs`), and conversions between the
/// two domains go through `ntt`/`ntt_inv` exclusively.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Ring<D: Domain = Standard> {
    coeffs: [Zq; N],
    domain: PhantomData<D>,
}

impl<D: Domain> Ring<D> {
    pub(crate) fn from_coeffs(coeffs: [Zq; N]) -> Self {
        Self { coeffs, domain: PhantomData }
    }

    pub(crate) fn coeffs(&self) -> &[Zq; N] {
        &self.coeffs
    }
}

impl<D: Domain> Default for Ring<D> {
    fn default() -> Self {
        Self::from_coeffs([Zq::ZERO; N])
    }
}

impl<D: Domain> Index<usize> for Ring<D> {
    type Output = Zq;

    fn index(&self, i: usize) -> &Zq {
        &self.coeffs[i]
    }
}

impl<D: Domain> IndexMut<usize> for Ring<D> {
    fn index_mut(&mut self, i: usize) -> &mut Zq {
        &mut self.coeffs[i]
    }
}

impl<D: Domain> Add for Ring<D> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::from_coeffs(core::array::from_fn(|i| self.coeffs[i] + rhs.coeffs[i]))
    }
}

impl<D: Domain> Sub for Ring<D> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::from_coeffs(core::array::from_fn(|i| self.coeffs[i] - rhs.coeffs[i]))
    }
}

/// Scalar multiplication: scales every coefficient, keeping the domain.
impl<D: Domain> Mul<Zq> for Ring<D> {
    type Output = Self;

    fn mul(self, a: Zq) -> Self {
        Self::from_coeffs(core::array::from_fn(|i| self.coeffs[i] * a))
    }
}
