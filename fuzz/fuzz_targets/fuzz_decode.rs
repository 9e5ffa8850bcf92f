#![no_main]
use libfuzzer_sys::fuzz_target;
use zenraster::{BmpPermissiveness, DecodeRequest, Limits};

fuzz_target!(|data: &[u8]| {
    let limits = Limits {
        max_memory_bytes: Some(64 << 20),
        ..Default::default()
    };
    // Every permissiveness level must return rather than panic
    for mode in [
        BmpPermissiveness::Strict,
        BmpPermissiveness::Standard,
        BmpPermissiveness::Permissive,
    ] {
        let _ = DecodeRequest::new(data)
            .with_limits(&limits)
            .with_permissiveness(mode)
            .decode(enough::Unstoppable);
    }
    let _ = zenraster::BmpInfo::from_bytes(data);
});
