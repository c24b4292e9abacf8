#![no_main]
use libfuzzer_sys::fuzz_target;
use sigevidence::{merge, ContentKind, Revision};

// Each 3-byte record is (revision slot, object id, kind and payload seed).
fuzz_target!(|data: &[u8]| {
    let mut revisions = vec![Revision::new(); 4];
    for chunk in data.chunks_exact(3) {
        let kind = match chunk[2] % 3 {
            0 => ContentKind::Certificate,
            1 => ContentKind::Crl,
            _ => ContentKind::Ocsp,
        };
        let slot = (chunk[0] % 4) as usize;
        let rev = std::mem::take(&mut revisions[slot]);
        revisions[slot] = rev.with(chunk[1] as u64, kind, vec![chunk[2] / 3]);
    }
    let _ = merge(&revisions);
});
