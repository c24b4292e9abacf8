//! Repeated extension rounds over list-style evidence.

use serde_json::{json, Value};
use sigevidence::{
    obtain_extendable_container, ErrorKind, EvidenceKind, ExtensionConfig, Representation,
    SerializationShape, SignatureExtender, TimestampType,
};

use crate::common::documents;
use crate::common::test_utils::*;

const FLAT: SerializationShape = SerializationShape::JsonEnvelopeSingleSignature;

fn etsi_u(bytes: &[u8]) -> Vec<Value> {
    let doc = documents::parse(bytes);
    let header = if doc.get("signatures").is_some() {
        &doc["signatures"][0]["header"]
    } else {
        &doc["header"]
    };
    header["etsiU"].as_array().cloned().unwrap_or_default()
}

#[test]
fn test_t_level_to_lta_structured() {
    let doc = documents::flattened(json!([{"sigTst": {"tstTokens": [{"val": "MIIBsig"}]}}]));
    let extended = SignatureExtender::default()
        .extend(&doc, FLAT, &LtaSource::default())
        .unwrap();

    let list = etsi_u(&extended);
    assert_eq!(list.len(), 4);
    assert!(list[0].get("sigTst").is_some());
    assert!(list[1].get("xVals").is_some());
    assert!(list[2].get("rVals").is_some());
    assert!(list[3].get("arcTst").is_some());

    let container = obtain_extendable_container(&extended, 0).unwrap();
    assert_eq!(
        container.entries()[0].kind(),
        EvidenceKind::Timestamp(TimestampType::SignatureTimestamp)
    );
    assert_eq!(
        container.entries()[3].kind(),
        EvidenceKind::Timestamp(TimestampType::ArchiveTimestamp)
    );
}

#[test]
fn test_repeated_extension_duplicates_entries() {
    let extender = SignatureExtender::default();
    let source = LtaSource::default();
    let doc = documents::flattened(json!([]));

    let once = extender.extend(&doc, FLAT, &source).unwrap();
    let twice = extender.extend(&once, FLAT, &source).unwrap();

    let first = obtain_extendable_container(&once, 0).unwrap();
    let second = obtain_extendable_container(&twice, 0).unwrap();
    assert_eq!(first.len(), 3);
    assert_eq!(second.len(), 6);
    assert_eq!(&second.entries()[..3], first.entries());
    assert_eq!(
        second
            .of_kind(EvidenceKind::Timestamp(TimestampType::ArchiveTimestamp))
            .count(),
        2
    );
    assert_eq!(source.calls.get(), 2);
}

#[test]
fn test_base64url_rounds() {
    let config = ExtensionConfig::default().base64url_components(true);
    let extender = SignatureExtender::new(config);
    let doc = documents::flattened(json!([]));

    let extended = extender.extend(&doc, FLAT, &LtaSource::default()).unwrap();
    let list = etsi_u(&extended);
    assert_eq!(list.len(), 3);
    assert!(list.iter().all(Value::is_string));

    let container = obtain_extendable_container(&extended, 0).unwrap();
    assert!(container.iter().all(|e| e.is_base64url_encoded()));

    // second round with the default (object) encoding is refused
    let err = SignatureExtender::default()
        .extend(&extended, FLAT, &LtaSource::default())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::EncodingMismatch);
    assert_eq!(err.suggested_encoding(), Some(true));
    assert!(err.to_string().contains("base64url_components(true)"));

    // following the suggestion succeeds
    let again = extender.extend(&extended, FLAT, &LtaSource::default()).unwrap();
    assert_eq!(etsi_u(&again).len(), 6);
}

#[test]
fn test_mixed_container_is_rejected_before_fetching() {
    let raw = certificate_values(true);
    let raw_text = match raw.representation() {
        Representation::RawEncoded(b) => String::from_utf8(b.to_vec()).unwrap(),
        _ => unreachable!(),
    };
    let doc = documents::flattened(json!([raw_text, {"sigTst": {}}]));
    let source = LtaSource::default();

    for base64url in [true, false] {
        let config = ExtensionConfig::default().base64url_components(base64url);
        let err = SignatureExtender::new(config)
            .extend(&doc, FLAT, &source)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MixedRepresentation);
    }
    assert_eq!(source.calls.get(), 0);
}

#[test]
fn test_all_signatures_or_nothing() {
    let doc = documents::general(vec![
        documents::signature(json!([{"sigTst": {}}])),
        documents::signature(json!([{"sigTst": {}}, "eyJ4VmFscyI6W119"])),
    ]);
    let err = SignatureExtender::default()
        .extend(&doc, SerializationShape::JsonEnvelope, &LtaSource::default())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MixedRepresentation);
}

#[test]
fn test_every_signature_extended() {
    let doc = documents::general(vec![
        documents::signature(json!([{"sigTst": {}}])),
        documents::signature(json!([])),
    ]);
    let source = LtaSource::default();
    let out = SignatureExtender::default()
        .extend(&doc, SerializationShape::JsonEnvelope, &source)
        .unwrap();

    assert_eq!(obtain_extendable_container(&out, 0).unwrap().len(), 4);
    assert_eq!(obtain_extendable_container(&out, 1).unwrap().len(), 3);
    assert_eq!(source.calls.get(), 2);

    let root = documents::parse(&out);
    assert_eq!(root["payload"], "eyJoZWxsbyI6IndvcmxkIn0");
    assert_eq!(root["signatures"][1]["signature"], "c2lnbmF0dXJl");
}

#[test]
fn test_extend_single_signature_leaves_others() {
    let doc = documents::general(vec![
        documents::signature(json!([])),
        documents::signature(json!([])),
    ]);
    let out = SignatureExtender::default()
        .extend_signature(&doc, SerializationShape::JsonEnvelope, 1, &LtaSource::default())
        .unwrap();
    assert!(obtain_extendable_container(&out, 0).unwrap().is_empty());
    assert_eq!(obtain_extendable_container(&out, 1).unwrap().len(), 3);
}

#[test]
fn test_source_with_wrong_encoding_is_rejected() {
    let source = FixedSource(vec![archive_timestamp(true)]);
    let err = SignatureExtender::default()
        .extend(&documents::flattened(json!([])), FLAT, &source)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::EncodingMismatch);
}

#[test]
fn test_nothing_to_add_leaves_document_as_is() {
    let doc = json!({"payload": "e30", "protected": "e30", "signature": "c2ln"});
    let out = SignatureExtender::default()
        .extend(doc.to_string().as_bytes(), FLAT, &FixedSource(Vec::new()))
        .unwrap();
    assert_eq!(documents::parse(&out), doc);
}

#[test]
fn test_padded_components_extend_in_base64url_mode() {
    // "eyJzaWdUc3QiOnt9fQ==" is {"sigTst":{}} with padding
    let doc = documents::flattened(json!(["eyJzaWdUc3QiOnt9fQ=="]));
    let extender = SignatureExtender::new(ExtensionConfig::default().base64url_components(true));

    let out = extender.extend(&doc, FLAT, &LtaSource::default()).unwrap();
    let list = etsi_u(&out);
    assert_eq!(list.len(), 4);
    assert_eq!(list[0], "eyJzaWdUc3QiOnt9fQ==");
}
