#![no_main]

use libfuzzer_sys::fuzz_target;

use snmp_ber::oid::Oid;

fuzz_target!(|data: &[u8]| {
    // Feed the raw bytes through the BER body decoder; anything that
    // decodes must re-encode and print without panicking
    if let Ok(oid) = Oid::from_ber(data) {
        let _ = oid.to_ber();
        let _ = oid.to_string();
    }

    // The same bytes as dotted notation, when they happen to be UTF-8
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = Oid::parse(s);
    }
});
