//! Digest usado por todos los ids: SHA-224 en hex minúscula (56 caracteres).

use sha2::{Digest, Sha224};

/// Hashea un string y devuelve hex.
pub fn hash_str(input: &str) -> String {
    format!("{:x}", Sha224::digest(input.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::hash_str;

    #[test]
    fn sha224_known_vectors() {
        assert_eq!(hash_str(""), "d14a028c2a3a2bc9476102bb288234c415a2b01f828ea62ac5b3e42f");
        assert_eq!(hash_str("abc"), "23097d223405d8228642a477bda255b32aadbce4bda0b3f7e36c9da7");
    }
}
