use core::ops::Mul;

use crate::field::Zq;
use crate::ring::{Ntt, Ring, Standard};
use crate::{N, Q, ZETA};

/// `zeta[i] = 17^{BitRev7(i)} mod q` for i in 0..128, as listed in FIPS 203
/// Appendix A. The forward transform walks this table in ascending order
/// starting at index 1, the inverse transform walks it back down.
#[rustfmt::skip]
static ZETAS: [u16; 128] = [
       1, 1729, 2580, 3289, 2642,  630, 1897,  848,
    1062, 1919,  193,  797, 2786, 3260,  569, 1746,
     296, 2447, 1339, 1476, 3046,   56, 2240, 1333,
    1426, 2094,  535, 2882, 2393, 2879, 1974,  821,
     289,  331, 3253, 1756, 1197, 2304, 2277, 2055,
     650, 1977, 2513,  632, 2865,   33, 1320, 1915,
    2319, 1435,  807,  452, 1438, 2868, 1534, 2402,
    2647, 2617, 1481,  648, 2474, 3110, 1227,  910,
      17, 2761,  583, 2649, 1637,  723, 2288, 1100,
    1409, 2662, 3281,  233,  756, 2156, 3015, 3050,
    1703, 1651, 2789, 1789, 1847,  952, 1461, 2687,
     939, 2308, 2437, 2388,  733, 2337,  268,  641,
    1584, 2298, 2037, 3220,  375, 2549, 2090, 1645,
    1063,  319, 2773,  757, 2099,  561, 2466, 2594,
    2804, 1092,  403, 1026, 1143, 2150, 2775,  886,
    1722, 1212, 1874, 1029, 2110, 2935,  885, 2154,
];

const fn bit_rev_7(i: u32) -> u32 {
    ((i as u8).reverse_bits() >> 1) as u32
}

const fn pow_mod(mut base: u32, mut exp: u32) -> u16 {
    let q = Q as u32;
    let mut acc = 1u32;
    base %= q;
    while exp > 0 {
        if exp & 1 == 1 {
            acc = (acc * base) % q;
        }
        base = (base * base) % q;
        exp >>= 1;
    }
    acc as u16
}

const fn gen_gamma_table() -> [u16; 128] {
    let mut table = [0u16; 128];
    let mut i = 0;
    while i < 128 {
        table[i] = pow_mod(ZETA, 2 * bit_rev_7(i as u32) + 1);
        i += 1;
    }
    table
}

/// `gamma[i] = 17^{2*BitRev7(i)+1} mod q`, the modulus `X^2 - gamma[i]` of
/// the i-th degree-one factor of `X^256 + 1` over `Z_q`.
static GAMMAS: [u16; 128] = gen_gamma_table();

/// Algorithm 9 `NTT(f)`: maps `R_q` to `T_q` with a Cooley-Tukey
/// decimation-in-time butterfly over strides 128, 64, .., 2.
pub(crate) fn ntt(f: &Ring<Standard>) -> Ring<Ntt> {
    let mut c = *f.coeffs();
    let mut i = 1;
    for len in [128, 64, 32, 16, 8, 4, 2] {
        for start in (0..N).step_by(2 * len) {
            let zeta = Zq(ZETAS[i]);
            i += 1;
            for j in start..(start + len) {
                let t = zeta * c[j + len];
                c[j + len] = c[j] - t;
                c[j] = c[j] + t;
            }
        }
    }
    Ring::from_coeffs(c)
}

/// Algorithm 10 `NTT^{-1}(f_hat)`: the mirror butterfly, consuming the zeta
/// table from index 127 downward, then scaling by 3303 = 128^{-1} mod q.
pub(crate) fn ntt_inv(f_hat: &Ring<Ntt>) -> Ring<Standard> {
    let mut c = *f_hat.coeffs();
    let mut i = 127;
    for len in [2, 4, 8, 16, 32, 64, 128] {
        for start in (0..N).step_by(2 * len) {
            let zeta = Zq(ZETAS[i]);
            i -= 1;
            for j in start..(start + len) {
                let t = c[j];
                c[j] = t + c[j + len];
                c[j + len] = zeta * (c[j + len] - t);
            }
        }
    }
    let scale = Zq::new(3303);
    for coeff in &mut c {
        *coeff = *coeff * scale;
    }
    Ring::from_coeffs(c)
}

/// Algorithm 11 `MultiplyNTTs(f_hat, g_hat)`: pointwise product in `T_q`,
/// two coefficients at a time.
pub(crate) fn multiply_ntts(f_hat: &Ring<Ntt>, g_hat: &Ring<Ntt>) -> Ring<Ntt> {
    let mut h_hat = Ring::default();
    for i in 0..128 {
        let gamma = Zq(GAMMAS[i]);
        let (c0, c1) = base_case_multiply(
            f_hat[2 * i],
            f_hat[2 * i + 1],
            g_hat[2 * i],
            g_hat[2 * i + 1],
            gamma,
        );
        h_hat[2 * i] = c0;
        h_hat[2 * i + 1] = c1;
    }
    h_hat
}

/// Algorithm 12 `BaseCaseMultiply`: product of `a0 + a1 X` and `b0 + b1 X`
/// modulo `X^2 - gamma`.
fn base_case_multiply(a0: Zq, a1: Zq, b0: Zq, b1: Zq, gamma: Zq) -> (Zq, Zq) {
    let c0 = a0 * b0 + a1 * b1 * gamma;
    let c1 = a0 * b1 + a1 * b0;
    (c0, c1)
}

/// Ring multiplication exists only in the NTT domain; `Ring<Standard>`
/// values have to be transformed first.
impl Mul for Ring<Ntt> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        multiply_ntts(&self, &rhs)
    }
}
