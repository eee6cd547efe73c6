//! Role-based key-material location and identity resolution.
//!
//! Each [`KeyRole`] maps to a canonical private-key path under the keys
//! directory; the main and node roles additionally cross-check against the
//! certificate chain. An address is only ever reported when the private
//! key shown alongside it is provably the same keypair.

use std::path::PathBuf;

use log::warn;

use crate::address::{public_key_to_address, Network};
use crate::certificate::{read_public_keys_from_chain, CertificateChain, RawPublicKey};
use crate::error::{KeyError, Result};
use crate::private_key::{read_private_key, RawPrivateKey};
use crate::prompt::SecretPrompt;

/// Canonical key file locations relative to the keys directory.
pub const NODE_KEY_PEM: &str = "cert/node.key.pem";
pub const REMOTE_KEY_PEM: &str = "remote.pem";
pub const VRF_KEY_PEM: &str = "vrf.pem";
pub const NODE_CERT_CHAIN_PEM: &str = "cert/node.full.crt.pem";

/// Logical key roles of a node installation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyRole {
    Main,
    Node,
    Remote,
    Vrf,
}

impl KeyRole {
    /// Display order used by the key report.
    pub const ALL: [KeyRole; 4] = [KeyRole::Main, KeyRole::Node, KeyRole::Remote, KeyRole::Vrf];

    pub fn label(self) -> &'static str {
        match self {
            KeyRole::Main => "main",
            KeyRole::Node => "node",
            KeyRole::Remote => "remote",
            KeyRole::Vrf => "VRF",
        }
    }

    /// Position of this role's certificate in the chain, for the roles that
    /// participate in certificate cross-checking.
    pub fn certificate_index(self) -> Option<usize> {
        match self {
            KeyRole::Main => Some(1),
            KeyRole::Node => Some(0),
            KeyRole::Remote | KeyRole::Vrf => None,
        }
    }
}

/// Resolved identity of one key role.
pub struct AccountIdentity {
    pub role: KeyRole,
    pub address: String,
    pub public_key: RawPublicKey,
    /// Present only when the private key file was readable and decodable.
    pub private_key: Option<RawPrivateKey>,
}

/// Locates key material for each role under a configured keys directory.
pub struct KeyLocator<'a> {
    keys_dir: PathBuf,
    ca_key_path: PathBuf,
    network: Network,
    prompt: &'a dyn SecretPrompt,
}

impl<'a> KeyLocator<'a> {
    pub fn new(
        keys_dir: impl Into<PathBuf>,
        ca_key_path: impl Into<PathBuf>,
        network: Network,
        prompt: &'a dyn SecretPrompt,
    ) -> Self {
        Self {
            keys_dir: keys_dir.into(),
            ca_key_path: ca_key_path.into(),
            network,
            prompt,
        }
    }

    /// Canonical private-key path for a role.
    pub fn private_key_path(&self, role: KeyRole) -> PathBuf {
        match role {
            KeyRole::Main => self.ca_key_path.clone(),
            KeyRole::Node => self.keys_dir.join(NODE_KEY_PEM),
            KeyRole::Remote => self.keys_dir.join(REMOTE_KEY_PEM),
            KeyRole::Vrf => self.keys_dir.join(VRF_KEY_PEM),
        }
    }

    fn certificate_chain(&self) -> CertificateChain {
        let chain_path = self.keys_dir.join(NODE_CERT_CHAIN_PEM);
        match read_public_keys_from_chain(&chain_path) {
            Ok(chain) => chain,
            Err(err) => {
                warn!("{err}");
                CertificateChain::default()
            }
        }
    }

    /// Resolve the identity for one role.
    ///
    /// Certificate-derived identity takes precedence for the main and node
    /// roles; when both sources are present their public keys must agree or
    /// the role is suppressed with [`KeyError::IdentityMismatch`]. Roles
    /// with no usable source resolve to [`KeyError::NotFound`]; the caller
    /// reports that and continues with the next role.
    pub fn inspect(&self, role: KeyRole) -> Result<AccountIdentity> {
        let private_key = read_private_key(&self.private_key_path(role), self.prompt);
        let private_public = private_key.as_ref().map(RawPrivateKey::public_key);

        let public_key = match role.certificate_index() {
            Some(index) => {
                let cert_public = self.certificate_chain().get(index).copied();
                match (cert_public, private_public) {
                    (Some(from_cert), Some(from_key)) if from_cert != from_key => {
                        return Err(KeyError::IdentityMismatch { role: role.label() });
                    }
                    (Some(from_cert), _) => from_cert,
                    (None, Some(from_key)) => from_key,
                    (None, None) => {
                        return Err(KeyError::NotFound(self.private_key_path(role)));
                    }
                }
            }
            None => match private_public {
                Some(from_key) => from_key,
                None => return Err(KeyError::NotFound(self.private_key_path(role))),
            },
        };

        Ok(AccountIdentity {
            role,
            address: public_key_to_address(&public_key, self.network),
            public_key,
            private_key,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::NoSecret;
    use std::path::Path;

    #[test]
    fn roles_resolve_canonical_paths() {
        let locator = KeyLocator::new("keys", "ca.key.pem", Network::Testnet, &NoSecret);
        assert_eq!(
            locator.private_key_path(KeyRole::Node),
            Path::new("keys/cert/node.key.pem")
        );
        assert_eq!(
            locator.private_key_path(KeyRole::Remote),
            Path::new("keys/remote.pem")
        );
        assert_eq!(
            locator.private_key_path(KeyRole::Vrf),
            Path::new("keys/vrf.pem")
        );
        assert_eq!(
            locator.private_key_path(KeyRole::Main),
            Path::new("ca.key.pem")
        );
    }

    #[test]
    fn only_main_and_node_cross_check_certificates() {
        assert_eq!(KeyRole::Main.certificate_index(), Some(1));
        assert_eq!(KeyRole::Node.certificate_index(), Some(0));
        assert_eq!(KeyRole::Remote.certificate_index(), None);
        assert_eq!(KeyRole::Vrf.certificate_index(), None);
    }
}
