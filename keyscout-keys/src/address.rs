//! Symbol account address derivation.
//!
//! An address encodes a network prefix byte, the RIPEMD-160 of the
//! SHA3-256 of the public key, and a 3-byte checksum, rendered as 39
//! characters of unpadded RFC 4648 base32.

use ripemd::Ripemd160;
use sha3::{Digest, Sha3_256};

use crate::certificate::RawPublicKey;

const CHECKSUM_LEN: usize = 3;

/// Target network, selecting the address prefix byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Network {
    Mainnet,
    Testnet,
}

impl Network {
    /// Map a configured network name to a network. Anything that is not
    /// `mainnet` is treated as testnet, matching the configuration
    /// fallback.
    pub fn from_name(name: &str) -> Self {
        if name.eq_ignore_ascii_case("mainnet") {
            Network::Mainnet
        } else {
            Network::Testnet
        }
    }

    pub fn prefix(self) -> u8 {
        match self {
            Network::Mainnet => 0x68,
            Network::Testnet => 0x98,
        }
    }
}

/// Derive the displayable account address for a raw ed25519 public key.
pub fn public_key_to_address(public_key: &RawPublicKey, network: Network) -> String {
    let public_key_hash = Sha3_256::digest(public_key.as_bytes());
    let account_hash = Ripemd160::digest(public_key_hash);

    let mut body = Vec::with_capacity(1 + account_hash.len() + CHECKSUM_LEN);
    body.push(network.prefix());
    body.extend_from_slice(&account_hash);

    let checksum = Sha3_256::digest(&body);
    body.extend_from_slice(&checksum[..CHECKSUM_LEN]);

    base32::encode(base32::Alphabet::Rfc4648 { padding: false }, &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(fill: u8) -> RawPublicKey {
        RawPublicKey::from([fill; 32])
    }

    #[test]
    fn addresses_are_39_characters() {
        let address = public_key_to_address(&key(1), Network::Testnet);
        assert_eq!(address.len(), 39);
    }

    #[test]
    fn network_prefix_selects_leading_character() {
        // 0x68 -> 'N', 0x98 -> 'T' under RFC 4648.
        assert!(public_key_to_address(&key(2), Network::Mainnet).starts_with('N'));
        assert!(public_key_to_address(&key(2), Network::Testnet).starts_with('T'));
    }

    #[test]
    fn derivation_is_deterministic_and_key_sensitive() {
        let first = public_key_to_address(&key(3), Network::Testnet);
        assert_eq!(first, public_key_to_address(&key(3), Network::Testnet));
        assert_ne!(first, public_key_to_address(&key(4), Network::Testnet));
        assert_ne!(first, public_key_to_address(&key(3), Network::Mainnet));
    }

    #[test]
    fn unknown_network_names_map_to_testnet() {
        assert_eq!(Network::from_name("mainnet"), Network::Mainnet);
        assert_eq!(Network::from_name("MAINNET"), Network::Mainnet);
        assert_eq!(Network::from_name("testnet"), Network::Testnet);
        assert_eq!(Network::from_name("sainet"), Network::Testnet);
    }
}
