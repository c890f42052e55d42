#![no_main]

use bytes::Bytes;
use libfuzzer_sys::fuzz_target;

use snmp_ber::ber::Decoder;
use snmp_ber::pdu::Pdu;
use snmp_ber::value::Value;
use snmp_ber::varbind::VarBind;

fuzz_target!(|data: &[u8]| {
    let bytes = Bytes::copy_from_slice(data);

    // Each primitive reader gets a fresh cursor over the same input
    let mut decoder = Decoder::new(bytes.clone());
    let _ = decoder.read_integer();

    let mut decoder = Decoder::new(bytes.clone());
    let _ = decoder.read_octet_string();

    let mut decoder = Decoder::new(bytes.clone());
    let _ = decoder.read_null();

    let mut decoder = Decoder::new(bytes.clone());
    let _ = decoder.read_oid();

    let mut decoder = Decoder::new(bytes.clone());
    let _ = decoder.read_sequence();

    let mut decoder = Decoder::new(bytes.clone());
    let _ = decoder.read_ip_address();

    // The full tag dispatch, including recursive sequences
    let _ = Value::from_ber(data);

    // The composite decoders on top of it
    let mut decoder = Decoder::new(bytes.clone());
    let _ = VarBind::decode(&mut decoder);

    let mut decoder = Decoder::new(bytes);
    let _ = Pdu::decode(&mut decoder);
});
