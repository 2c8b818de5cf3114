use alloc::vec;
use alloc::vec::Vec;

use crate::errors::ensure;
use crate::field::Zq;
use crate::{N, Q};

/// Algorithm 2 `BitsToBytes(b)`: packs a bit array (length a multiple of 8)
/// into bytes, little-endian within each byte.
pub(crate) fn bits_to_bytes(bits: &[u8]) -> Vec<u8> {
    assert!(bits.len() % 8 == 0, "bit length must be a multiple of 8");
    let mut bytes = vec![0u8; bits.len() / 8];
    for (i, bit) in bits.iter().enumerate() {
        debug_assert!(*bit <= 1);
        bytes[i / 8] |= *bit << (i % 8);
    }
    bytes
}

/// Algorithm 3 `BytesToBits(B)`: bit j of byte i lands at index 8i + j.
pub(crate) fn bytes_to_bits(bytes: &[u8]) -> Vec<u8> {
    let mut bits = Vec::with_capacity(bytes.len() * 8);
    for byte in bytes {
        for j in 0..8 {
            bits.push((byte >> j) & 1);
        }
    }
    bits
}

/// Algorithm 4 `ByteEncode_d(F)`: serializes 256 coefficients as d-bit
/// little-endian integers, 1 <= d <= 12, into 32*d bytes.
pub(crate) fn byte_encode(d: u32, f: &[Zq; N]) -> Vec<u8> {
    assert!((1..=12).contains(&d), "d out of range");
    let d = d as usize;
    let mut bits = vec![0u8; N * d];
    for (i, coeff) in f.iter().enumerate() {
        let mut a = coeff.get();
        for j in 0..d {
            bits[i * d + j] = (a & 1) as u8;
            a >>= 1;
        }
        debug_assert_eq!(a, 0, "coefficient wider than d bits");
    }
    bits_to_bytes(&bits)
}

/// Algorithm 5 `ByteDecode_d(B)`: inverse of `byte_encode`. For d = 12 the
/// limbs live in `Z_q` and a limb >= q is a malformed encoding; for d < 12
/// the d-bit range is exact by construction.
pub(crate) fn byte_decode(d: u32, bytes: &[u8]) -> Result<[Zq; N], &'static str> {
    assert!((1..=12).contains(&d), "d out of range");
    let d = d as usize;
    assert_eq!(bytes.len(), 32 * d, "encoded length must be 32 * d");
    let m = if d < 12 { 1u16 << d } else { Q };
    let bits = bytes_to_bits(bytes);
    let mut f = [Zq::ZERO; N];
    for (i, coeff) in f.iter_mut().enumerate() {
        let mut v = 0u16;
        for j in 0..d {
            v |= u16::from(bits[i * d + j]) << j;
        }
        ensure!(v < m, "coefficient out of range");
        *coeff = Zq(v);
    }
    Ok(f)
}

/// `Compress_d`: x -> round((2^d / q) * x) mod 2^d, ties rounded up,
/// computed exactly in integers. Branch-free on the input value.
pub(crate) fn compress(d: u32, inout: &mut [Zq]) {
    debug_assert!((1..=11).contains(&d), "d out of range");
    for x in inout {
        let num = (u32::from(x.get()) << (d + 1)) + u32::from(Q);
        let quot = num / (2 * u32::from(Q));
        *x = Zq((quot & ((1 << d) - 1)) as u16);
    }
}

/// `Decompress_d`: y -> round((q / 2^d) * y); the right inverse of
/// `compress` on `Z_{2^d}`.
pub(crate) fn decompress(d: u32, inout: &mut [Zq]) {
    debug_assert!((1..=11).contains(&d), "d out of range");
    for y in inout {
        let num = 2 * u32::from(Q) * u32::from(y.get()) + (1 << d);
        *y = Zq((num >> (d + 1)) as u16);
    }
}
