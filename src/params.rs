/// An ML-KEM parameter set. The three standardized instances share n = 256
/// and q = 3329 and differ only in the values below; see FIPS 203 table 2.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParamSet {
    /// Rank of the module, i.e. dimensions of the matrix A and its vectors.
    pub k: usize,
    /// CBD width for the secret and error vectors sampled during key
    /// generation (and the y vector during encryption).
    pub eta1: u32,
    /// CBD width for the encryption noise e1 and e2.
    pub eta2: u32,
    /// Compression bit width for the ciphertext vector u.
    pub du: u32,
    /// Compression bit width for the ciphertext polynomial v.
    pub dv: u32,
}

impl ParamSet {
    /// Serialized encapsulation key length in bytes: 384k + 32.
    #[must_use]
    pub const fn ek_len(&self) -> usize {
        384 * self.k + 32
    }

    /// Serialized decapsulation key length in bytes: 768k + 96.
    #[must_use]
    pub const fn dk_len(&self) -> usize {
        768 * self.k + 96
    }

    /// Ciphertext length in bytes: 32(du k + dv).
    #[must_use]
    pub const fn ct_len(&self) -> usize {
        32 * (self.du as usize * self.k + self.dv as usize)
    }
}

/// ML-KEM-512, claimed security category 1.
pub const ML_KEM_512: ParamSet = ParamSet { k: 2, eta1: 3, eta2: 2, du: 10, dv: 4 };

/// ML-KEM-768, claimed security category 3.
pub const ML_KEM_768: ParamSet = ParamSet { k: 3, eta1: 2, eta2: 2, du: 10, dv: 4 };

/// ML-KEM-1024, claimed security category 5.
pub const ML_KEM_1024: ParamSet = ParamSet { k: 4, eta1: 2, eta2: 2, du: 11, dv: 5 };

#[cfg(test)]
mod tests {
    use super::{ML_KEM_1024, ML_KEM_512, ML_KEM_768};

    #[test]
    fn serialized_lengths_match_the_standard() {
        assert_eq!(ML_KEM_512.ek_len(), 800);
        assert_eq!(ML_KEM_512.dk_len(), 1632);
        assert_eq!(ML_KEM_512.ct_len(), 768);

        assert_eq!(ML_KEM_768.ek_len(), 1184);
        assert_eq!(ML_KEM_768.dk_len(), 2400);
        assert_eq!(ML_KEM_768.ct_len(), 1088);

        assert_eq!(ML_KEM_1024.ek_len(), 1568);
        assert_eq!(ML_KEM_1024.dk_len(), 3168);
        assert_eq!(ML_KEM_1024.ct_len(), 1568);
    }
}
