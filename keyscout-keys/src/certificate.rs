//! Certificate public-key extraction.
//!
//! Recovers raw ed25519 public keys from a node's PEM certificate chain
//! without any signature or trust validation; only the SubjectPublicKeyInfo
//! payload of each certificate is of interest.

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use x509_parser::pem::parse_x509_pem;

use crate::error::{KeyError, Result};
use crate::pem::split_chain;

/// Length of a raw ed25519 public key.
pub const RAW_PUBLIC_KEY_LEN: usize = 32;

/// File name of the full certificate chain written by node setup tooling.
pub const NODE_CERT_CHAIN_NAME: &str = "node.full.crt.pem";

/// Raw public-key bytes extracted from a certificate's
/// SubjectPublicKeyInfo. Immutable once constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawPublicKey([u8; RAW_PUBLIC_KEY_LEN]);

impl RawPublicKey {
    pub fn as_bytes(&self) -> &[u8; RAW_PUBLIC_KEY_LEN] {
        &self.0
    }

    /// Uppercase hex rendering, as shown in the key report.
    pub fn to_hex(&self) -> String {
        hex::encode_upper(self.0)
    }
}

impl From<[u8; RAW_PUBLIC_KEY_LEN]> for RawPublicKey {
    fn from(bytes: [u8; RAW_PUBLIC_KEY_LEN]) -> Self {
        Self(bytes)
    }
}

impl TryFrom<&[u8]> for RawPublicKey {
    type Error = KeyError;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        let raw: [u8; RAW_PUBLIC_KEY_LEN] = bytes.try_into().map_err(|_| {
            KeyError::DecodeFailure(format!(
                "expected {RAW_PUBLIC_KEY_LEN}-byte public key, got {} bytes",
                bytes.len()
            ))
        })?;
        Ok(Self(raw))
    }
}

/// Ordered public keys of a certificate chain, one per certificate, in
/// file order. Index 0 is the node's own certificate; index 1 the CA's.
#[derive(Debug, Clone, Default)]
pub struct CertificateChain(Vec<RawPublicKey>);

impl CertificateChain {
    pub fn get(&self, index: usize) -> Option<&RawPublicKey> {
        self.0.get(index)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Candidate locations for a certificate chain file: the given path, plus a
/// `node/`-prefixed variant when the file carries the well-known chain name.
pub fn candidate_cert_paths(path: &Path) -> Vec<PathBuf> {
    let mut candidates = vec![path.to_path_buf()];
    if path.file_name() == Some(OsStr::new(NODE_CERT_CHAIN_NAME)) {
        candidates.push(Path::new("node").join(path));
    }
    candidates
}

/// Read the first readable candidate path and extract one raw public key
/// per certificate found in it.
///
/// Absence at every candidate is reported as [`KeyError::NotFound`];
/// callers treat that as "no certificate-derived identity available"
/// rather than a fatal condition.
pub fn read_public_keys_from_chain(path: &Path) -> Result<CertificateChain> {
    for candidate in candidate_cert_paths(path) {
        let data = match fs::read(&candidate) {
            Ok(data) => data,
            Err(err) => {
                debug!("{}: {err}", candidate.display());
                continue;
            }
        };
        return chain_from_pem(&data);
    }
    Err(KeyError::NotFound(path.to_path_buf()))
}

/// Decode every PEM block in `data` as an X.509 certificate and collect the
/// raw SubjectPublicKeyInfo payloads, in input order.
pub fn chain_from_pem(data: &[u8]) -> Result<CertificateChain> {
    let mut keys = Vec::new();
    for block in split_chain(data) {
        let (_, pem) = parse_x509_pem(&block)
            .map_err(|err| KeyError::DecodeFailure(format!("malformed PEM block: {err}")))?;
        let cert = pem
            .parse_x509()
            .map_err(|err| KeyError::DecodeFailure(format!("malformed certificate: {err}")))?;
        let spki = cert.public_key();
        keys.push(RawPublicKey::try_from(&spki.subject_public_key.data[..])?);
    }
    Ok(CertificateChain(keys))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ed25519_dalek::pkcs8::EncodePrivateKey;
    use ed25519_dalek::SigningKey;

    fn cert_pem_for(key: &SigningKey) -> String {
        let der = key.to_pkcs8_der().unwrap();
        let key_pair = rcgen::KeyPair::from_der(der.as_bytes()).unwrap();
        let mut params = rcgen::CertificateParams::new(vec![]);
        params.alg = &rcgen::PKCS_ED25519;
        params.key_pair = Some(key_pair);
        rcgen::Certificate::from_params(params)
            .unwrap()
            .serialize_pem()
            .unwrap()
    }

    #[test]
    fn extracts_keys_from_two_certificate_chain_in_file_order() {
        let node_key = SigningKey::generate(&mut rand::rngs::OsRng);
        let main_key = SigningKey::generate(&mut rand::rngs::OsRng);
        let chain_pem = format!(
            "{}\n \n{}\n",
            cert_pem_for(&node_key),
            cert_pem_for(&main_key)
        );

        let chain = chain_from_pem(chain_pem.as_bytes()).unwrap();
        assert_eq!(chain.len(), 2);
        assert_eq!(
            chain.get(0).unwrap().as_bytes(),
            &node_key.verifying_key().to_bytes()
        );
        assert_eq!(
            chain.get(1).unwrap().as_bytes(),
            &main_key.verifying_key().to_bytes()
        );
    }

    #[test]
    fn malformed_certificate_is_a_decode_failure() {
        let bogus = b"-----BEGIN CERTIFICATE-----\nAAAA\n-----END CERTIFICATE-----\n";
        assert!(matches!(
            chain_from_pem(bogus),
            Err(KeyError::DecodeFailure(_))
        ));
    }

    #[test]
    fn empty_container_yields_empty_chain() {
        let chain = chain_from_pem(b"\n\n").unwrap();
        assert!(chain.is_empty());
    }

    #[test]
    fn chain_name_gets_node_prefixed_fallback() {
        let candidates = candidate_cert_paths(Path::new("keys/cert/node.full.crt.pem"));
        assert_eq!(candidates.len(), 2);
        assert_eq!(
            candidates[1],
            Path::new("node/keys/cert/node.full.crt.pem")
        );

        let candidates = candidate_cert_paths(Path::new("keys/cert/other.crt.pem"));
        assert_eq!(candidates.len(), 1);
    }
}
