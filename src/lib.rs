#![no_std]
#![deny(missing_docs)]
#![doc = include_str!("../README.md")]

extern crate alloc;

// Functionality map per FIPS 203:
//
// Algorithm 2  BitsToBytes(b)                        --> encode.rs
// Algorithm 3  BytesToBits(B)                        --> encode.rs
// Algorithm 4  ByteEncode_d(F)                       --> encode.rs
// Algorithm 5  ByteDecode_d(B)                       --> encode.rs
// Algorithm 7  SampleNTT(B)                          --> sampling.rs
// Algorithm 8  SamplePolyCBD_eta(B)                  --> sampling.rs
// Algorithm 9  NTT(f)                                --> ntt.rs
// Algorithm 10 NTT^{-1}(f_hat)                       --> ntt.rs
// Algorithm 11 MultiplyNTTs(f_hat, g_hat)            --> ntt.rs
// Algorithm 12 BaseCaseMultiply(a0, a1, b0, b1, g)   --> ntt.rs
// Algorithm 13 K-PKE.KeyGen(d)                       --> k_pke.rs
// Algorithm 14 K-PKE.Encrypt(ek, m, r)               --> k_pke.rs
// Algorithm 15 K-PKE.Decrypt(dk, c)                  --> k_pke.rs
// Algorithm 16 ML-KEM.KeyGen_internal(d, z)          --> ml_kem.rs
// Algorithm 17 ML-KEM.Encaps_internal(ek, m)         --> ml_kem.rs
// Algorithm 18 ML-KEM.Decaps_internal(dk, c)         --> ml_kem.rs
// Algorithms 19-21 (randomized entry points)         --> ml_kem.rs
// PRF, XOF and the hash functions H, J, G            --> hashes.rs
// Compress_d / Decompress_d                          --> encode.rs
//
// The algebraic substrate lives in field.rs (Z_q), ring.rs (R_q / T_q with
// the representation encoded in the type) and matrix.rs (generic row-major
// matrices over ring elements); parameter sets are in params.rs.

use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop};

mod encode;
mod errors;
mod field;
mod hashes;
mod k_pke;
mod matrix;
mod ml_kem;
mod ntt;
mod params;
mod ring;
mod sampling;

pub use errors::KemError;
pub use ml_kem::MlKem;
pub use params::{ParamSet, ML_KEM_1024, ML_KEM_512, ML_KEM_768};

// Relevant to all parameter sets.
pub(crate) const N: usize = 256;
pub(crate) const Q: u16 = 3329;
pub(crate) const ZETA: u32 = 17;

/// Shared secret length in bytes, common to all ML-KEM variants.
pub const SSK_LEN: usize = 32;

/// The 32-byte shared secret established by encapsulation/decapsulation.
/// Cleared on drop; equality comparison runs in constant time.
#[derive(Clone, Debug, Zeroize, ZeroizeOnDrop)]
pub struct SharedSecretKey([u8; SSK_LEN]);

impl SharedSecretKey {
    /// Extracts the raw shared secret, e.g. as input to a KDF. The original
    /// copy is still zeroized when dropped.
    #[must_use]
    pub fn into_bytes(self) -> [u8; SSK_LEN] {
        self.0
    }
}

impl PartialEq for SharedSecretKey {
    fn eq(&self, other: &Self) -> bool {
        self.0.ct_eq(&other.0).into()
    }
}

impl Eq for SharedSecretKey {}
