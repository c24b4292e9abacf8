#![no_main]
use libfuzzer_sys::fuzz_target;
use sigevidence::SignatureDocument;

fuzz_target!(|data: &[u8]| {
    if let Ok(doc) = SignatureDocument::parse(data) {
        let _ = doc.all_evidence();
    }
});
