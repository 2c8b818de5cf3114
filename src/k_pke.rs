use alloc::vec::Vec;

use zeroize::Zeroize;

use crate::encode::{byte_decode, byte_encode, compress, decompress};
use crate::hashes::{g, prf, xof};
use crate::matrix::Matrix;
use crate::ntt::{ntt, ntt_inv};
use crate::params::ParamSet;
use crate::ring::{Domain, Ntt, Ring, Standard};
use crate::sampling::{sample_ntt, sample_poly_cbd};

/// Steps 3-7 of Algorithms 13/14: expand the k x k matrix `A_hat` from the
/// public seed rho. Entry (i, j) is sampled from XOF(rho || j || i); note
/// the column index is absorbed first.
fn generate_a_hat(k: usize, rho: &[u8; 32]) -> Matrix<Ring<Ntt>> {
    let mut entries = Vec::with_capacity(k * k);
    for i in 0..k {
        for j in 0..k {
            entries.push(sample_ntt(xof(rho, j as u8, i as u8)));
        }
    }
    Matrix::from_entries(k, k, entries)
}

/// A column vector of CBD-sampled polynomials, advancing the PRF counter N
/// once per entry.
fn sample_error_vector(
    k: usize, eta: u32, seed: &[u8; 32], n: &mut u8,
) -> Matrix<Ring<Standard>> {
    let mut entries = Vec::with_capacity(k);
    for _ in 0..k {
        entries.push(sample_poly_cbd(eta, &prf(eta, seed, *n)));
        *n += 1;
    }
    Matrix::from_entries(k, 1, entries)
}

fn map_ntt(v: &Matrix<Ring<Standard>>) -> Matrix<Ring<Ntt>> {
    Matrix::from_entries(v.rows(), v.cols(), v.entries().iter().map(ntt).collect())
}

fn map_ntt_inv(v: &Matrix<Ring<Ntt>>) -> Matrix<Ring<Standard>> {
    Matrix::from_entries(v.rows(), v.cols(), v.entries().iter().map(ntt_inv).collect())
}

fn encode_vector<D: Domain>(d: u32, v: &Matrix<Ring<D>>) -> Vec<u8> {
    let mut out = Vec::with_capacity(v.entries().len() * 32 * d as usize);
    for entry in v.entries() {
        out.extend_from_slice(&byte_encode(d, entry.coeffs()));
    }
    out
}

/// Algorithm 13 `K-PKE.KeyGen(d)`: derives the encryption key
/// `ByteEncode_12(t_hat) || rho` and decryption key `ByteEncode_12(s_hat)`
/// from a 32-byte seed.
pub(crate) fn key_gen(params: &ParamSet, d: &[u8; 32]) -> (Vec<u8>, Vec<u8>) {
    let k = params.k;

    // 1: (rho, sigma) <- G(d || k); the appended rank byte is the domain
    //    separator introduced by the final FIPS 203.
    let (rho, mut sigma) = g(&[d, &[k as u8]]);

    let a_hat = generate_a_hat(k, &rho);

    // 8-15: sample s and e from the CBD, PRF counter running across both
    let mut n = 0u8;
    let s = sample_error_vector(k, params.eta1, &sigma, &mut n);
    let e = sample_error_vector(k, params.eta1, &sigma, &mut n);

    // 16-18: t_hat = A_hat o s_hat + e_hat
    let s_hat = map_ntt(&s);
    let e_hat = map_ntt(&e);
    let t_hat = (&a_hat * &s_hat) + e_hat;

    // 19-20
    let mut ek = encode_vector(12, &t_hat);
    ek.extend_from_slice(&rho);
    let dk = encode_vector(12, &s_hat);

    sigma.zeroize();
    (ek, dk)
}

/// Algorithm 14 `K-PKE.Encrypt(ek, m, r)`: encrypts a 32-byte message under
/// the derived randomness r.
pub(crate) fn encrypt(
    params: &ParamSet, ek: &[u8], m: &[u8; 32], r: &[u8; 32],
) -> Result<Vec<u8>, &'static str> {
    let k = params.k;
    debug_assert_eq!(ek.len(), params.ek_len(), "ek length mismatch");

    // 2-3: recover t_hat and the matrix seed
    let mut t_entries = Vec::with_capacity(k);
    for chunk in ek[..384 * k].chunks(384) {
        t_entries.push(Ring::<Ntt>::from_coeffs(byte_decode(12, chunk)?));
    }
    let t_hat = Matrix::from_entries(k, 1, t_entries);
    let rho: &[u8; 32] = ek[384 * k..].try_into().expect("seed slice");

    let a_hat = generate_a_hat(k, rho);

    // 9-17: y from eta1, noise e1/e2 from eta2
    let mut n = 0u8;
    let y = sample_error_vector(k, params.eta1, r, &mut n);
    let e1 = sample_error_vector(k, params.eta2, r, &mut n);
    let e2 = sample_poly_cbd(params.eta2, &prf(params.eta2, r, n));

    // 18-19: u = NTT^{-1}(A_hat^T o y_hat) + e1
    let y_hat = map_ntt(&y);
    let u = map_ntt_inv(&(&a_hat.transpose() * &y_hat)) + e1;

    // 20: mu = Decompress_1(ByteDecode_1(m))
    let mut mu_coeffs = byte_decode(1, m)?;
    decompress(1, &mut mu_coeffs);
    let mu = Ring::<Standard>::from_coeffs(mu_coeffs);

    // 21: v = NTT^{-1}(t_hat^T o y_hat) + e2 + mu
    let v_hat = &t_hat.transpose() * &y_hat;
    let v = ntt_inv(&v_hat[(0, 0)]) + e2 + mu;

    // 22-24: c = ByteEncode_du(Compress_du(u)) || ByteEncode_dv(Compress_dv(v))
    let mut ct = Vec::with_capacity(params.ct_len());
    for entry in u.entries() {
        let mut coeffs = *entry.coeffs();
        compress(params.du, &mut coeffs);
        ct.extend_from_slice(&byte_encode(params.du, &coeffs));
    }
    let mut v_coeffs = *v.coeffs();
    compress(params.dv, &mut v_coeffs);
    ct.extend_from_slice(&byte_encode(params.dv, &v_coeffs));
    Ok(ct)
}

/// Algorithm 15 `K-PKE.Decrypt(dk, c)`: recovers the 32-byte message.
pub(crate) fn decrypt(
    params: &ParamSet, dk_pke: &[u8], c: &[u8],
) -> Result<[u8; 32], &'static str> {
    let k = params.k;
    let du = params.du as usize;
    debug_assert_eq!(dk_pke.len(), 384 * k, "dk length mismatch");
    debug_assert_eq!(c.len(), params.ct_len(), "ciphertext length mismatch");

    // 1-3: u' = Decompress_du(ByteDecode_du(c1))
    let (c1, c2) = c.split_at(32 * du * k);
    let mut u_entries = Vec::with_capacity(k);
    for chunk in c1.chunks(32 * du) {
        let mut coeffs = byte_decode(params.du, chunk)?;
        decompress(params.du, &mut coeffs);
        u_entries.push(Ring::<Standard>::from_coeffs(coeffs));
    }
    let u_prime = Matrix::from_entries(k, 1, u_entries);

    // 4: v' = Decompress_dv(ByteDecode_dv(c2))
    let mut v_coeffs = byte_decode(params.dv, c2)?;
    decompress(params.dv, &mut v_coeffs);
    let v_prime = Ring::<Standard>::from_coeffs(v_coeffs);

    // 5
    let mut s_entries = Vec::with_capacity(k);
    for chunk in dk_pke.chunks(384) {
        s_entries.push(Ring::<Ntt>::from_coeffs(byte_decode(12, chunk)?));
    }
    let s_hat = Matrix::from_entries(k, 1, s_entries);

    // 6: w = v' - NTT^{-1}(s_hat^T o NTT(u'))
    let prod = &s_hat.transpose() * &map_ntt(&u_prime);
    let w = v_prime - ntt_inv(&prod[(0, 0)]);

    // 7: m = ByteEncode_1(Compress_1(w))
    let mut w_coeffs = *w.coeffs();
    compress(1, &mut w_coeffs);
    let m = byte_encode(1, &w_coeffs);
    Ok(m.try_into().expect("32-byte message"))
}
