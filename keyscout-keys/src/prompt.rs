//! Operator secret prompt seam.
//!
//! Encrypted private keys need a password from the operator. The library
//! only ever talks to this trait so the console read stays in the binary
//! and tests can inject deterministic doubles.

use std::io;

/// Obtain a secret string from the operator for the given label.
///
/// An empty string means the operator declined; callers abort the current
/// fallback path without retrying it.
pub trait SecretPrompt {
    fn secret(&self, label: &str) -> io::Result<String>;
}

impl<F> SecretPrompt for F
where
    F: Fn(&str) -> io::Result<String>,
{
    fn secret(&self, label: &str) -> io::Result<String> {
        self(label)
    }
}

/// Prompt that always declines. Useful where no operator is present.
pub struct NoSecret;

impl SecretPrompt for NoSecret {
    fn secret(&self, _label: &str) -> io::Result<String> {
        Ok(String::new())
    }
}
