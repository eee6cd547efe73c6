use std::path::PathBuf;
use thiserror::Error;

/// Error types for the keyscout-keys crate.
///
/// Every variant is recoverable at the scope of a single fallback path or
/// key role; callers render them as operator messages and keep going.
#[derive(Error, Debug)]
pub enum KeyError {
    #[error("{}: file not found", .0.display())]
    NotFound(PathBuf),

    #[error("{}: file too short to read {}", .path.display(), .region)]
    Truncated { path: PathBuf, region: &'static str },

    #[error("invalid byte range: end offset {end:#06x} precedes start offset {start:#06x}")]
    InvalidRange { start: u64, end: u64 },

    #[error("decode error: {0}")]
    DecodeFailure(String),

    #[error("{}: password not provided", .0.display())]
    PasswordNotProvided(PathBuf),

    #[error("{}: decryption failed, wrong password or corrupt key", .0.display())]
    WrongPassword(PathBuf),

    #[error("{role} certificate public key does not match its private key")]
    IdentityMismatch { role: &'static str },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for keyscout-keys operations.
pub type Result<T> = std::result::Result<T, KeyError>;
