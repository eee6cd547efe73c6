//! PKCS#8 private-key decoding, with optional password decryption.
//!
//! Keys are tried unencrypted first; when that fails the operator is asked
//! for a password through the injected [`SecretPrompt`]. Every failure is
//! local to one candidate path; the next fallback location is always
//! tried before giving up on a role.

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use ed25519_dalek::SigningKey;
use pkcs8::DecodePrivateKey;
use log::{debug, warn};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::certificate::RawPublicKey;
use crate::error::{KeyError, Result};
use crate::prompt::SecretPrompt;

/// File name of the CA private key, which gets the parent-directory
/// fallback instead of the `node/` one.
pub const CA_KEY_NAME: &str = "ca.key.pem";

/// Raw 32-byte ed25519 private scalar. Scrubbed from memory on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct RawPrivateKey([u8; 32]);

impl RawPrivateKey {
    /// Uppercase hex rendering, as shown when private keys are requested.
    pub fn to_hex(&self) -> String {
        hex::encode_upper(self.0)
    }

    /// Derive the matching public key, for cross-checking against the
    /// certificate chain.
    pub fn public_key(&self) -> RawPublicKey {
        let signing_key = SigningKey::from_bytes(&self.0);
        RawPublicKey::from(signing_key.verifying_key().to_bytes())
    }
}

impl From<&SigningKey> for RawPrivateKey {
    fn from(key: &SigningKey) -> Self {
        Self(key.to_bytes())
    }
}

/// Candidate locations for a private key: the given path, then a
/// `node/`-prefixed variant. The CA key is the exception: it instead falls
/// back to one directory above its configured location.
pub fn candidate_key_paths(path: &Path) -> Vec<PathBuf> {
    let mut candidates = vec![path.to_path_buf()];
    if path.file_name() == Some(OsStr::new(CA_KEY_NAME)) {
        let parent = path.parent().unwrap_or_else(|| Path::new(""));
        candidates.push(parent.join("..").join(CA_KEY_NAME));
    } else {
        candidates.push(Path::new("node").join(path));
    }
    candidates
}

/// Read and decode the first candidate path that yields a usable key.
///
/// Returns `None` when every fallback is exhausted; callers treat absence
/// as "cannot display this key's private form" rather than an error.
pub fn read_private_key(path: &Path, prompt: &dyn SecretPrompt) -> Option<RawPrivateKey> {
    for candidate in candidate_key_paths(path) {
        let pem = match fs::read_to_string(&candidate) {
            Ok(pem) => pem,
            Err(err) => {
                debug!("{}: {err}", candidate.display());
                continue;
            }
        };
        match decode_pem(&candidate, &pem, prompt) {
            Ok(key) => return Some(key),
            Err(err) => {
                warn!("{err}");
                continue;
            }
        }
    }
    warn!("{}: private key not found at any candidate path", path.display());
    None
}

fn decode_pem(path: &Path, pem: &str, prompt: &dyn SecretPrompt) -> Result<RawPrivateKey> {
    let signing_key = match SigningKey::from_pkcs8_pem(pem) {
        Ok(key) => key,
        // Wrong format or password-protected: ask the operator and retry.
        Err(_) => {
            let label = file_label(path);
            let password = prompt.secret(&format!("Enter password for {label}"))?;
            if password.is_empty() {
                return Err(KeyError::PasswordNotProvided(path.to_path_buf()));
            }
            SigningKey::from_pkcs8_encrypted_pem(pem, password.as_bytes())
                .map_err(|_| KeyError::WrongPassword(path.to_path_buf()))?
        }
    };
    Ok(RawPrivateKey::from(&signing_key))
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
