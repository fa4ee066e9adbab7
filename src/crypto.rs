//! Password verification and keystream decryption.
//!
//! Key material is `password_utf8 ++ hex(salt)` with the salt rendered as
//! lowercase ASCII hex. The verifier is `SHA256(key_material)` and block `i`
//! of the keystream is `SHA256(key_material ++ decimal(i))`.

use crate::core::{DecodeError, Result};
use crate::types::{Header, Protection};
use sha2::{Digest, Sha256};

fn key_material(password: &str, salt: &[u8]) -> Vec<u8> {
    let mut material = password.as_bytes().to_vec();
    material.extend_from_slice(hex::encode(salt).as_bytes());
    material
}

/// Checks a password against the stored verifier hash
pub fn verify_password(password: &str, salt: &[u8], expected: &[u8; 32]) -> Result<()> {
    if password.is_empty() {
        return Err(DecodeError::PasswordRequired);
    }

    let digest = Sha256::digest(key_material(password, salt));
    if digest.as_slice() != expected {
        return Err(DecodeError::WrongPassword);
    }

    Ok(())
}

/// Derives exactly `length` keystream bytes
pub fn key_stream(password: &str, salt: &[u8], length: usize) -> Vec<u8> {
    let material = key_material(password, salt);
    let mut out = Vec::with_capacity(length.next_multiple_of(32));
    let mut counter: u64 = 0;

    while out.len() < length {
        let mut hasher = Sha256::new();
        hasher.update(&material);
        hasher.update(counter.to_string().as_bytes());
        out.extend_from_slice(&hasher.finalize());
        counter += 1;
    }

    out.truncate(length);
    out
}

/// XORs `data` with the keystream in place
pub fn apply_key_stream(data: &mut [u8], password: &str, salt: &[u8]) {
    let stream = key_stream(password, salt, data.len());
    for (byte, key) in data.iter_mut().zip(stream) {
        *byte ^= key;
    }
}

/// Returns the plaintext payload of a parsed header
pub fn decrypt_payload(header: Header, password: &str) -> Result<Vec<u8>> {
    match header.protection {
        Protection::None => Ok(header.payload),
        Protection::Password {
            password_hash,
            salt,
        } => {
            verify_password(password, &salt, &password_hash)?;
            let mut data = header.payload;
            apply_key_stream(&mut data, password, &salt);
            Ok(data)
        }
    }
}
