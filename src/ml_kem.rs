use alloc::vec::Vec;

use rand_core::CryptoRngCore;
use subtle::{ConditionallySelectable, ConstantTimeEq};
use zeroize::Zeroize;

use crate::encode::{byte_decode, byte_encode};
use crate::errors::KemError;
use crate::hashes::{g, h, j};
use crate::k_pke;
use crate::params::ParamSet;
use crate::SharedSecretKey;

/// An ML-KEM instance bound to one parameter set. The instance holds no
/// mutable state; independent instances can be used freely from different
/// threads, and all key and ciphertext buffers are owned by the caller as
/// opaque byte strings with the exact serialized layouts of FIPS 203.
#[derive(Clone, Copy, Debug)]
pub struct MlKem {
    params: ParamSet,
}

impl MlKem {
    /// Creates an instance for the given parameter set.
    #[must_use]
    pub const fn new(params: ParamSet) -> Self {
        Self { params }
    }

    /// The parameter set this instance is bound to.
    #[must_use]
    pub const fn params(&self) -> &ParamSet {
        &self.params
    }

    /// Algorithm 19 `ML-KEM.KeyGen()` using the OS random number generator.
    ///
    /// # Errors
    /// Returns an error if the random number generator fails.
    #[cfg(feature = "default-rng")]
    pub fn try_keygen(&self) -> Result<(Vec<u8>, Vec<u8>), KemError> {
        self.try_keygen_with_rng(&mut rand_core::OsRng)
    }

    /// Algorithm 19 `ML-KEM.KeyGen()`: draws the seeds d and z from the
    /// provided randomness source and returns the serialized
    /// (encapsulation key, decapsulation key) pair.
    ///
    /// # Errors
    /// Returns an error if the random number generator fails.
    pub fn try_keygen_with_rng(
        &self, rng: &mut impl CryptoRngCore,
    ) -> Result<(Vec<u8>, Vec<u8>), KemError> {
        let mut d = [0u8; 32];
        rng.try_fill_bytes(&mut d).map_err(|_| KemError::RandomSource)?;
        let mut z = [0u8; 32];
        rng.try_fill_bytes(&mut z).map_err(|_| KemError::RandomSource)?;
        let keys = self.keygen_from_seed(&d, &z);
        d.zeroize();
        z.zeroize();
        Ok(keys)
    }

    /// Algorithm 16 `ML-KEM.KeyGen_internal(d, z)`: deterministic key
    /// generation from the two 32-byte seeds. The decapsulation key is
    /// `dk_pke || ek || H(ek) || z`.
    #[must_use]
    pub fn keygen_from_seed(&self, d: &[u8; 32], z: &[u8; 32]) -> (Vec<u8>, Vec<u8>) {
        let (ek, dk_pke) = k_pke::key_gen(&self.params, d);
        let mut dk = Vec::with_capacity(self.params.dk_len());
        dk.extend_from_slice(&dk_pke);
        dk.extend_from_slice(&ek);
        dk.extend_from_slice(&h(&ek));
        dk.extend_from_slice(z);
        (ek, dk)
    }

    /// Algorithm 20 `ML-KEM.Encaps(ek)` using the OS random number
    /// generator.
    ///
    /// # Errors
    /// Returns an error on a malformed encapsulation key or if the random
    /// number generator fails.
    #[cfg(feature = "default-rng")]
    pub fn try_encaps(&self, ek: &[u8]) -> Result<(SharedSecretKey, Vec<u8>), KemError> {
        self.try_encaps_with_rng(ek, &mut rand_core::OsRng)
    }

    /// Algorithm 20 `ML-KEM.Encaps(ek)`: validates the encapsulation key,
    /// draws the 32-byte message m from the provided randomness source, and
    /// returns the shared secret together with the ciphertext.
    ///
    /// # Errors
    /// Returns an error on a malformed encapsulation key or if the random
    /// number generator fails.
    pub fn try_encaps_with_rng(
        &self, ek: &[u8], rng: &mut impl CryptoRngCore,
    ) -> Result<(SharedSecretKey, Vec<u8>), KemError> {
        self.check_encaps_key(ek)?;
        let mut m = [0u8; 32];
        rng.try_fill_bytes(&mut m).map_err(|_| KemError::RandomSource)?;
        let result = self.encaps_internal(ek, &m);
        m.zeroize();
        result
    }

    /// Algorithm 17 `ML-KEM.Encaps_internal(ek, m)`: deterministic
    /// encapsulation from a fixed 32-byte message, for seeded operation and
    /// known-answer testing.
    ///
    /// # Errors
    /// Returns an error on a malformed encapsulation key.
    pub fn encaps_from_seed(
        &self, ek: &[u8], m: &[u8; 32],
    ) -> Result<(SharedSecretKey, Vec<u8>), KemError> {
        self.check_encaps_key(ek)?;
        self.encaps_internal(ek, m)
    }

    fn encaps_internal(
        &self, ek: &[u8], m: &[u8; 32],
    ) -> Result<(SharedSecretKey, Vec<u8>), KemError> {
        // 1: (K, r) <- G(m || H(ek))
        let h_ek = h(ek);
        let (key, r) = g(&[m, &h_ek]);

        // 2: c <- K-PKE.Encrypt(ek, m, r); cannot fail on a validated ek
        let ct = k_pke::encrypt(&self.params, ek, m, &r)
            .map_err(|_| KemError::MalformedEncapsulationKey)?;

        Ok((SharedSecretKey(key), ct))
    }

    /// Algorithms 18/21 `ML-KEM.Decaps(dk, c)`: recovers the shared secret.
    /// A ciphertext that fails the re-encryption check is never reported;
    /// the returned key is then `J(z || c)`, selected without branching on
    /// the comparison (implicit rejection).
    ///
    /// # Errors
    /// Returns an error on a malformed decapsulation key or a ciphertext of
    /// the wrong length — never on a tampered one.
    pub fn try_decaps(&self, dk: &[u8], c: &[u8]) -> Result<SharedSecretKey, KemError> {
        self.check_decaps_inputs(dk, c)?;
        let k = self.params.k;

        // 1-4: dk = dk_pke || ek_pke || H(ek) || z
        let dk_pke = &dk[..384 * k];
        let ek_pke = &dk[384 * k..768 * k + 32];
        let hash = &dk[768 * k + 32..768 * k + 64];
        let z: &[u8; 32] = dk[768 * k + 64..].try_into().expect("z slice");

        // 5: m' <- K-PKE.Decrypt(dk_pke, c)
        let m_prime = k_pke::decrypt(&self.params, dk_pke, c)
            .map_err(|_| KemError::MalformedDecapsulationKey)?;

        // 6-7: candidate key and rejection key
        let (mut key, r_prime) = g(&[&m_prime, hash]);
        let k_bar = j(z, c);

        // 8: re-encrypt with the derived randomness
        let c_prime = k_pke::encrypt(&self.params, ek_pke, &m_prime, &r_prime)
            .map_err(|_| KemError::MalformedDecapsulationKey)?;

        // 9-11: K' <- K_bar iff c != c'; both the comparison and the
        // selection are constant time.
        key.conditional_assign(&k_bar, c.ct_ne(c_prime.as_slice()));
        Ok(SharedSecretKey(key))
    }

    /// Encapsulation key checks: exact length, and every 12-bit limb must
    /// survive the ByteDecode/ByteEncode round trip (i.e. be < q).
    fn check_encaps_key(&self, ek: &[u8]) -> Result<(), KemError> {
        if ek.len() != self.params.ek_len() {
            return Err(KemError::MalformedEncapsulationKey);
        }
        for chunk in ek[..384 * self.params.k].chunks(384) {
            let decoded =
                byte_decode(12, chunk).map_err(|_| KemError::MalformedEncapsulationKey)?;
            if byte_encode(12, &decoded) != chunk {
                return Err(KemError::MalformedEncapsulationKey);
            }
        }
        Ok(())
    }

    /// Decapsulation input checks: exact lengths, and the embedded H(ek)
    /// must match the embedded encapsulation key.
    fn check_decaps_inputs(&self, dk: &[u8], c: &[u8]) -> Result<(), KemError> {
        if c.len() != self.params.ct_len() {
            return Err(KemError::MalformedCiphertext);
        }
        if dk.len() != self.params.dk_len() {
            return Err(KemError::MalformedDecapsulationKey);
        }
        let k = self.params.k;
        let ek = &dk[384 * k..768 * k + 32];
        if h(ek)[..] != dk[768 * k + 32..768 * k + 64] {
            return Err(KemError::MalformedDecapsulationKey);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::MlKem;
    use crate::errors::KemError;
    use crate::hashes::j;
    use crate::params::ML_KEM_512;

    #[test]
    fn zero_seed_flow_is_deterministic_and_consistent() {
        let kem = MlKem::new(ML_KEM_512);
        let (d, z, m) = ([0u8; 32], [0u8; 32], [0u8; 32]);

        let (ek, dk) = kem.keygen_from_seed(&d, &z);
        let (ek2, dk2) = kem.keygen_from_seed(&d, &z);
        assert_eq!(ek, ek2);
        assert_eq!(dk, dk2);

        let (ssk_enc, ct) = kem.encaps_from_seed(&ek, &m).unwrap();
        let (ssk_enc2, ct2) = kem.encaps_from_seed(&ek, &m).unwrap();
        assert_eq!(ct, ct2);
        assert_eq!(ssk_enc, ssk_enc2);

        let ssk_dec = kem.try_decaps(&dk, &ct).unwrap();
        assert_eq!(ssk_dec, ssk_enc);
    }

    #[test]
    fn tampered_ciphertext_yields_the_rejection_key() {
        let kem = MlKem::new(ML_KEM_512);
        let (d, z, m) = ([0u8; 32], [0u8; 32], [0u8; 32]);
        let (ek, dk) = kem.keygen_from_seed(&d, &z);
        let (ssk_enc, ct) = kem.encaps_from_seed(&ek, &m).unwrap();

        let mut bad_ct = ct;
        bad_ct[5] ^= 0x04;
        let ssk_dec = kem.try_decaps(&dk, &bad_ct).unwrap();
        assert_ne!(ssk_dec, ssk_enc);
        // Implicit rejection is exactly J(z || c).
        assert_eq!(ssk_dec.into_bytes(), j(&z, &bad_ct));
    }

    #[test]
    fn corrupted_key_hash_is_rejected() {
        let kem = MlKem::new(ML_KEM_512);
        let (ek, mut dk) = kem.keygen_from_seed(&[1u8; 32], &[2u8; 32]);
        let (_, ct) = kem.encaps_from_seed(&ek, &[3u8; 32]).unwrap();
        dk[768 * 2 + 40] ^= 0x01; // inside the H(ek) section
        assert_eq!(kem.try_decaps(&dk, &ct), Err(KemError::MalformedDecapsulationKey));
    }
}
