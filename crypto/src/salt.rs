//! Random salt generation for off-chain commitment construction.

use crate::CryptoError;
use stakepoll_types::Salt;

/// Draw a fresh 32-byte salt from the operating system's CSPRNG.
pub fn generate_salt() -> Result<Salt, CryptoError> {
    let mut bytes = [0u8; 32];
    getrandom::getrandom(&mut bytes).map_err(|e| CryptoError::Randomness(e.to_string()))?;
    Ok(Salt::new(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn salts_differ() {
        let a = generate_salt().unwrap();
        let b = generate_salt().unwrap();
        assert_ne!(a, b);
    }
}
