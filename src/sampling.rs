use crate::encode::bytes_to_bits;
use crate::field::Zq;
use crate::hashes::XofStream;
use crate::ring::{Ntt, Ring, Standard};
use crate::{N, Q};

/// Algorithm 7 `SampleNTT(B)`: rejection-samples a uniform element of `T_q`
/// from a SHAKE-128 stream seeded with rho || i || j. Each 3-byte squeeze
/// yields two 12-bit candidates, kept when below q.
///
/// The loop's trip count depends only on the stream, which is derived from
/// the public seed rho, so it does not need to be constant time.
pub(crate) fn sample_ntt(mut stream: XofStream) -> Ring<Ntt> {
    let mut a_hat = Ring::default();
    let mut c = [0u8; 3];
    let mut j = 0;
    while j < N {
        stream.squeeze(&mut c);
        let d1 = u16::from(c[0]) + 256 * (u16::from(c[1]) & 0x0F);
        let d2 = (u16::from(c[1]) >> 4) + 16 * u16::from(c[2]);
        if d1 < Q {
            a_hat[j] = Zq(d1);
            j += 1;
        }
        if d2 < Q && j < N {
            a_hat[j] = Zq(d2);
            j += 1;
        }
    }
    a_hat
}

/// Algorithm 8 `SamplePolyCBD_eta(B)`: derives a polynomial whose
/// coefficients follow the centered binomial distribution with parameter
/// eta. Coefficient i is `sum(b[2*i*eta + j]) - sum(b[2*i*eta + eta + j])`
/// over j < eta, taken mod q.
pub(crate) fn sample_poly_cbd(eta: u32, b: &[u8]) -> Ring<Standard> {
    assert!(eta == 2 || eta == 3, "eta must be 2 or 3");
    let eta = eta as usize;
    assert_eq!(b.len(), 64 * eta, "input must be 64 * eta bytes");
    let bits = bytes_to_bits(b);
    Ring::from_coeffs(core::array::from_fn(|i| {
        let x: u16 = (0..eta).map(|j| u16::from(bits[2 * i * eta + j])).sum();
        let y: u16 = (0..eta).map(|j| u16::from(bits[2 * i * eta + eta + j])).sum();
        Zq(x) - Zq(y)
    }))
}
