//! Gate behaviour on whole documents.

use serde_json::json;
use sigevidence::{
    obtain_extendable_containers, serialization_shape_of, ErrorKind, EvidenceError,
    ExtensionGate, SerializationShape, SignatureExtender,
};

use crate::common::documents;
use crate::common::test_data::*;
use crate::common::test_utils::LtaSource;

#[test]
fn test_shape_detection() {
    let cases = vec![
        (
            documents::general(vec![documents::signature(json!([]))]),
            SerializationShape::JsonEnvelope,
        ),
        (
            documents::flattened(json!([])),
            SerializationShape::JsonEnvelopeSingleSignature,
        ),
        (
            COMPACT_SIGNATURE.as_bytes().to_vec(),
            SerializationShape::Compact,
        ),
    ];

    for (bytes, expected) in cases {
        assert_eq!(serialization_shape_of(&bytes).unwrap(), expected);
    }
}

#[test]
fn test_compact_must_be_converted_first() {
    let source = LtaSource::default();
    let err = SignatureExtender::default()
        .extend(
            COMPACT_SIGNATURE.as_bytes(),
            SerializationShape::Compact,
            &source,
        )
        .unwrap_err();
    assert_eq!(
        err,
        EvidenceError::UnsupportedSerializationShape {
            shape: SerializationShape::Compact
        }
    );
    assert!(err.to_string().contains("convert"));
    // gate runs before any evidence is requested
    assert_eq!(source.calls.get(), 0);
}

#[test]
fn test_no_signatures_with_evidence_elsewhere() {
    let doc = json!({
        "payload": "e30",
        "signatures": [],
        "header": {"etsiU": [{"sigTst": {}}, {"xVals": []}, {"rVals": {}}]}
    })
    .to_string();

    let err = ExtensionGate::check_eligible(doc.as_bytes(), SerializationShape::JsonEnvelope)
        .unwrap_err();
    assert_eq!(err, EvidenceError::NoSignaturesPresent);
    assert_eq!(
        obtain_extendable_containers(doc.as_bytes()).unwrap_err(),
        EvidenceError::NoSignaturesPresent
    );
}

#[test]
fn test_garbage_is_not_a_signature_document() {
    let inputs: [&[u8]; 5] = [b"", b"   ", b"%PDF-1.7", b"{\"a\":1}", b"\xff\xfe{"];
    for input in inputs {
        let err = ExtensionGate::check_eligible(input, SerializationShape::JsonEnvelope)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotASignatureDocument, "{:?}", input);
    }
}

#[test]
fn test_gate_has_no_side_effects() {
    let doc = documents::general(vec![documents::signature(json!([{"sigTst": {}}]))]);
    let before = doc.clone();
    let first = ExtensionGate::check_eligible(&doc, SerializationShape::JsonEnvelope).unwrap();
    let second = ExtensionGate::check_eligible(&doc, SerializationShape::JsonEnvelope).unwrap();
    assert_eq!(doc, before);
    assert_eq!(first, second);
}
