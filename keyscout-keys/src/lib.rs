//! keyscout-keys – key-material extraction for Symbol node installations.
//!
//! Locates private-key and certificate files on disk, recovers raw ed25519
//! key bytes from their PEM/PKCS#8 containers, derives account addresses,
//! and decodes voting key tree files. Everything is read-only and
//! per-invocation; no state is kept between calls.

pub mod address;
pub mod certificate;
pub mod error;
pub mod locator;
pub mod pem;
pub mod private_key;
pub mod prompt;
pub mod voting;

pub use error::{KeyError, Result};

pub use address::{public_key_to_address, Network};
pub use certificate::{read_public_keys_from_chain, CertificateChain, RawPublicKey};
pub use locator::{AccountIdentity, KeyLocator, KeyRole};
pub use private_key::{read_private_key, RawPrivateKey};
pub use prompt::{NoSecret, SecretPrompt};
pub use voting::{
    find_voting_key_files, read_epoch_range, read_tree_file, DumpOptions, VotingKeySummary,
    VOTING_DIRS,
};
