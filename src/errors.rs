use core::fmt;

/// Errors surfaced by the public KEM operations. Tampered ciphertexts are
/// deliberately absent: decapsulation of a modified ciphertext succeeds and
/// returns the implicit-rejection key instead of reporting anything.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KemError {
    /// The injected randomness source failed to produce bytes.
    RandomSource,
    /// Encapsulation key of the wrong length, or containing a 12-bit limb
    /// that does not survive the decode/encode round trip (i.e. >= q).
    MalformedEncapsulationKey,
    /// Decapsulation key of the wrong length, or whose embedded H(ek) does
    /// not match the embedded encapsulation key.
    MalformedDecapsulationKey,
    /// Ciphertext of the wrong length.
    MalformedCiphertext,
}

impl fmt::Display for KemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RandomSource => write!(f, "randomness source failed"),
            Self::MalformedEncapsulationKey => write!(f, "malformed encapsulation key"),
            Self::MalformedDecapsulationKey => write!(f, "malformed decapsulation key"),
            Self::MalformedCiphertext => write!(f, "malformed ciphertext"),
        }
    }
}

// no_std crate: no std::error::Error impl.

/// If the condition is not met, return an error message. Borrowed from the
/// `anyhow` crate.
macro_rules! ensure {
    ($cond:expr, $msg:literal $(,)?) => {
        if !$cond {
            return Err($msg);
        }
    };
}

pub(crate) use ensure;
