//! Common test utilities and helpers.
//!
//! Shared fixtures for the integration tests: signature documents in each
//! serialization shape and evidence sources standing in for a TSA and a
//! revocation fetcher.

#![allow(dead_code)]

pub mod test_utils;

/// Common test data and constants
pub mod test_data {
    /// Signing certificate (opaque DER stand-in)
    pub const SIGNER_CERT: &[u8] = b"\x30\x82\x03\xe9signer-certificate";
    /// Issuing CA certificate
    pub const CA_CERT: &[u8] = b"\x30\x82\x03\xffca-certificate";
    /// TSA certificate added by a later extension
    pub const TSA_CERT: &[u8] = b"\x30\x82\x04\x01tsa-certificate";
    /// CRL of the issuing CA
    pub const CA_CRL: &[u8] = b"\x30\x82\x01\x10ca-crl";
    /// OCSP response for the signer
    pub const SIGNER_OCSP: &[u8] = b"\x30\x82\x02\x20signer-ocsp";
    /// OCSP response for the TSA certificate
    pub const TSA_OCSP: &[u8] = b"\x30\x82\x02\x21tsa-ocsp";

    /// Compact serialization of a signature
    pub const COMPACT_SIGNATURE: &str = "eyJhbGciOiJFUzI1NiJ9.e30.c2ln";
}

/// Builders for signature documents
pub mod documents {
    use serde_json::{json, Value};

    /// One signature record with the given evidence list.
    pub fn signature(etsi_u: Value) -> Value {
        json!({
            "protected": "eyJhbGciOiJFUzI1NiJ9",
            "header": {"etsiU": etsi_u},
            "signature": "c2lnbmF0dXJl"
        })
    }

    /// General JSON envelope holding `signatures`.
    pub fn general(signatures: Vec<Value>) -> Vec<u8> {
        json!({"payload": "eyJoZWxsbyI6IndvcmxkIn0", "signatures": signatures})
            .to_string()
            .into_bytes()
    }

    /// Flattened JSON envelope with one signature.
    pub fn flattened(etsi_u: Value) -> Vec<u8> {
        let mut root = signature(etsi_u);
        root["payload"] = json!("eyJoZWxsbyI6IndvcmxkIn0");
        root.to_string().into_bytes()
    }

    pub fn parse(bytes: &[u8]) -> Value {
        serde_json::from_slice(bytes).expect("valid JSON output")
    }
}
