mod common;

use std::fs;

use meshcap::crypto::{self, KeyWidth, DEFAULT_PSK, KEY_RULES};
use meshcap::proto::{PortNum, Position};
use meshcap::record::{Content, MessageType, Payload};
use meshcap::{decode_line, Decoder, Error, FlatRecord, RecordWriter, Summary};
use prost::Message;
use test_case::test_case;

use common::{capture_line, data, decoded_packet, encrypted_packet, envelope, fixture_path};

fn fixture_records() -> Vec<meshcap::Record> {
    let text = fs::read_to_string(fixture_path("capture.txt")).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    Decoder::default().decode_lines(1, &lines)
}

fn position() -> Position {
    Position {
        latitude_i: Some(557_558_000),
        longitude_i: Some(376_173_000),
        altitude: Some(150),
        time: 1_700_000_000,
        location_source: 2,
        precision_bits: 32,
        ..Default::default()
    }
}

#[test]
fn decoded_text_message() {
    let packet = decoded_packet(0x1234, 0xa1b2_c3d4, data(PortNum::TextMessageApp as i32, b"hi"));
    let line = capture_line("msh/RU/ARKH/2/e/LongFast/!abc", &envelope(packet));

    let flat = decode_line(1, &line).flatten();

    assert_eq!(flat.message_type, "ServiceEnvelope");
    assert_eq!(flat.payload_type, "Decoded");
    assert_eq!(flat.portnum, "1");
    assert_eq!(flat.portnum_name, "TEXT_MESSAGE_APP");
    assert_eq!(flat.payload_size, "2");
    assert_eq!(flat.text_message, "hi");
    assert_eq!(flat.from, "2712847316");
    assert_eq!(flat.gateway_id, "!a1b2c3d4");
    assert_eq!(flat.error, "");
}

#[test]
fn two_field_line() {
    let flat = decode_line(7, "2024-01-01 | msh/RU/ARKH/2/e/LongFast/!abc").flatten();

    let expected = FlatRecord {
        timestamp: "2024-01-01".to_string(),
        topic: "msh/RU/ARKH/2/e/LongFast/!abc".to_string(),
        error: "invalid line format at line 7".to_string(),
        ..Default::default()
    };
    assert_eq!(flat, expected);
}

#[test]
fn invalid_hex_leaves_fields_empty() {
    let record = decode_line(2, "ts | msh/2/e/LongFast/!abc | 0a0zz");

    assert!(record.message.is_none());
    assert!(matches!(record.error, Some(Error::InvalidHex { line: 2, .. })));

    let flat = record.flatten();
    let values = flat.values();
    // everything but timestamp, topic and error
    assert!(values[2..61].iter().all(|v| v.is_empty()), "{flat:?}");
    assert!(flat.error.starts_with("invalid hex payload at line 2: "));
}

#[test_case(0, KeyWidth::Aes128 ; "default 128-bit")]
#[test_case(0, KeyWidth::Aes256 ; "default 256-bit")]
#[test_case(7, KeyWidth::Aes128 ; "simple7 128-bit")]
#[test_case(7, KeyWidth::Aes256 ; "simple7 256-bit")]
fn encrypted_position_is_recovered(rule: usize, width: KeyWidth) {
    let payload = data(PortNum::PositionApp as i32, &position().encode_to_vec());
    let packet = encrypted_packet(0x0102_0304, 0x0a0b_0c0d, &payload, &KEY_RULES[rule].psk(), width);
    let line = capture_line("msh/EU_868/2/e/LongFast/!0a0b0c0d", &envelope(packet));

    let record = decode_line(1, &line);

    assert!(record.error.is_none(), "{:?}", record.error);
    let packet = record.packet().unwrap();
    match &packet.payload {
        Payload::Decrypted { fields, key, width: got } => {
            assert_eq!(*key, KEY_RULES[rule].name);
            assert_eq!(*got, width);
            assert_eq!(fields.content, Some(Content::Position(position())));
        }
        other => panic!("expected decrypted payload, got {other:?}"),
    }

    let flat = record.flatten();
    assert_eq!(flat.payload_type, "Decrypted");
    assert_eq!(flat.encrypted_data, "");
    assert_eq!(flat.latitude, "55.7558000");
    assert_eq!(flat.longitude, "37.6173000");
    assert_eq!(flat.altitude, "150");
    assert_eq!(flat.location_source, "LOC_INTERNAL");
}

#[test]
fn key_outside_set_is_unresolved() {
    let payload = data(
        PortNum::TextMessageApp as i32,
        b"secret channel text, nothing to see here",
    );
    let packet = encrypted_packet(4242, 0x0e0f_1011, &payload, &[0x42; 16], KeyWidth::Aes128);
    let line = capture_line("msh/EU_868/2/e/Private/!0e0f1011", &envelope(packet));

    let record = decode_line(3, &line);

    assert!(matches!(
        record.error,
        Some(Error::EncryptionUnresolved {
            line: 3,
            reason: crypto::Unresolved::NoMatchingKey
        })
    ));
    let flat = record.flatten();
    assert_eq!(flat.payload_type, "Encrypted");
    assert_eq!(flat.payload_size, "44");
    assert_eq!(flat.encrypted_data.len(), 88);
    assert_eq!(flat.portnum, "");
}

// xorshift64, so the sample set is fixed independently of any rng crate version.
fn xorshift(state: &mut u64) -> u64 {
    let mut x = *state;
    x ^= x << 13;
    x ^= x >> 7;
    x ^= x << 17;
    *state = x;
    x
}

#[test]
fn random_ciphertext_rarely_validates() {
    let mut state: u64 = 0x6d65_7368;
    let samples = 200;

    let mut false_positives = 0;
    for _ in 0..samples {
        let len = 96 + (xorshift(&mut state) % 65) as usize;
        let ciphertext: Vec<u8> = (0..len).map(|_| xorshift(&mut state) as u8).collect();
        let packet_id = xorshift(&mut state) as u32;
        let from = xorshift(&mut state) as u32;
        if crypto::decrypt(&ciphertext, packet_id, from, false).is_ok() {
            false_positives += 1;
        }
    }

    // Any byte string that parses as Data is accepted, so roughly 1% of random
    // ciphertexts at these lengths validate under some candidate key. This sample set
    // has 3.
    assert!(
        false_positives <= 3,
        "{false_positives} of {samples} random ciphertexts validated"
    );
}

#[test]
fn default_key_is_the_channel_default() {
    // base64 "1PG7OiApB1nwvP+rz05pAQ==" from the firmware channel settings
    assert_eq!(
        meshcap::hex::encode_bytes(&DEFAULT_PSK),
        "d4f1bb3a20290759f0bcffabcf4e6901"
    );
}

#[test]
fn capture_fixture() {
    let records = fixture_records();

    // 14 lines, one blank
    assert_eq!(records.len(), 13);
    let flat: Vec<FlatRecord> = records.iter().map(|r| r.flatten()).collect();

    let hi = &flat[0];
    assert_eq!(hi.timestamp, "2024-01-01");
    assert_eq!(hi.topic, "msh/RU/ARKH/2/e/LongFast/!abc");
    assert_eq!(hi.message_type, "ServiceEnvelope");
    assert_eq!(hi.payload_type, "Decoded");
    assert_eq!(hi.portnum_name, "TEXT_MESSAGE_APP");
    assert_eq!(hi.text_message, "hi");
    assert_eq!(hi.packet_id, "4660");
    assert_eq!(hi.hop_limit, "3");
    assert_eq!(hi.priority, "DEFAULT");
    assert_eq!(hi.transport, "TRANSPORT_LORA");
    assert_eq!(hi.error, "");

    let pos = &flat[1];
    assert_eq!(pos.portnum_name, "POSITION_APP");
    assert_eq!(pos.latitude, "55.7558000");
    assert_eq!(pos.longitude, "37.6173000");
    assert_eq!(pos.altitude, "150");
    assert_eq!(pos.position_time, "1700000000");
    assert_eq!(pos.location_source, "LOC_INTERNAL");
    assert_eq!(pos.precision_bits, "32");
    assert_eq!(pos.via_mqtt, "true");

    let text = &flat[2];
    assert_eq!(text.payload_type, "Decrypted");
    assert_eq!(text.channel, "8");
    assert_eq!(text.text_message, "hello from the mesh");
    assert_eq!(text.error, "");

    let tm = &flat[3];
    assert_eq!(tm.payload_type, "Decrypted");
    assert_eq!(tm.channel_id, "MediumFast");
    assert_eq!(tm.portnum_name, "TELEMETRY_APP");
    assert_eq!(tm.battery_level, "87");
    assert_eq!(tm.voltage, "4.10");
    assert_eq!(tm.channel_utilization, "12.50");
    assert_eq!(tm.air_util_tx, "1.25");
    match &records[3].packet().unwrap().payload {
        Payload::Decrypted { key, width, .. } => {
            assert_eq!(*key, "simple5");
            assert_eq!(*width, KeyWidth::Aes256);
        }
        other => panic!("expected decrypted payload, got {other:?}"),
    }

    let map = &flat[4];
    assert_eq!(map.message_type, "MapReport");
    assert_eq!(map.map_long_name, "Tower North");
    assert_eq!(map.map_short_name, "TWRN");
    assert_eq!(map.map_role, "ROUTER");
    assert_eq!(map.map_hw_model, "HELTEC_V3");
    assert_eq!(map.map_firmware_version, "2.5.6.abc");
    assert_eq!(map.map_region, "EU_868");
    assert_eq!(map.map_modem_preset, "LONG_FAST");
    assert_eq!(map.map_has_default_channel, "true");
    assert_eq!(map.latitude, "59.8000000");
    assert_eq!(map.longitude, "30.1000000");
    assert_eq!(map.altitude, "42");
    assert_eq!(map.map_position_precision, "14");
    assert_eq!(map.map_online_local_nodes, "7");
    assert_eq!(map.map_opted_report_location, "true");
    assert_eq!(map.payload_type, "");

    // envelope published on a map topic
    let node = &flat[5];
    assert_eq!(records[5].message_type(), Some(MessageType::ServiceEnvelope));
    assert_eq!(node.portnum_name, "NODEINFO_APP");
    assert_eq!(node.user_id, "!a1b2c3d4");
    assert_eq!(node.user_long_name, "Base Station");
    assert_eq!(node.user_macaddr, "a1b2c3d4e5f6");
    assert_eq!(node.user_hw_model, "RAK4631");

    let pki = &flat[6];
    assert_eq!(pki.payload_type, "Encrypted");
    assert_eq!(
        pki.error,
        "encrypted payload unresolved at line 8: PKI encrypted, private key required"
    );

    let private = &flat[7];
    assert_eq!(private.payload_type, "Encrypted");
    assert_eq!(private.channel, "99");
    assert!(!private.encrypted_data.is_empty());
    assert_eq!(
        private.error,
        "encrypted payload unresolved at line 9: no known channel key matched"
    );

    assert!(matches!(records[8].error, Some(Error::InvalidHex { line: 10, .. })));
    assert_eq!(flat[9].error, "invalid line format at line 11");

    let routing = &flat[10];
    assert_eq!(routing.routing_variant, "error_reason");
    assert_eq!(routing.routing_error_reason, "NO_ROUTE");

    let bad = &flat[11];
    assert_eq!(bad.portnum_name, "POSITION_APP");
    assert_eq!(bad.payload_size, "3");
    assert_eq!(bad.latitude, "");
    assert!(
        bad.error.starts_with("malformed Position payload at line 13: "),
        "{}",
        bad.error
    );

    let wp = &flat[12];
    assert_eq!(wp.portnum_name, "WAYPOINT_APP");
    assert_eq!(wp.packet_id, "7000");
    assert_eq!(wp.waypoint_id, "7001");
    assert_eq!(wp.waypoint_name, "Trailhead");
    assert_eq!(wp.waypoint_description, "north gate");
    assert_eq!(wp.latitude, "-33.7000000");
    assert_eq!(wp.longitude, "151.2000000");
    assert_eq!(wp.error, "");
}

#[test]
fn capture_fixture_to_csv() {
    let records = fixture_records();
    let tmpdir = tempfile::tempdir().unwrap();
    let path = tmpdir.path().join("decoded_messages.csv");

    let mut writer = RecordWriter::new(fs::File::create(&path).unwrap()).unwrap();
    let mut summary = Summary::default();
    for record in &records {
        writer.write(record).unwrap();
        summary.add(record);
    }
    drop(writer.into_inner().unwrap());

    let mut rdr = csv::Reader::from_path(&path).unwrap();
    let header: Vec<String> = rdr.headers().unwrap().iter().map(String::from).collect();
    assert_eq!(header, FlatRecord::COLUMNS);
    let rows: Vec<FlatRecord> = rdr.deserialize().map(Result::unwrap).collect();
    assert_eq!(rows.len(), records.len());
    assert_eq!(rows[0].text_message, "hi");

    assert_eq!(summary.records, 13);
    assert_eq!(summary.errors, 5);
    assert_eq!(summary.error_kinds.get("EncryptionUnresolved"), Some(&2));
    assert_eq!(summary.payload_types.get("Decrypted"), Some(&2));
    assert_eq!(summary.message_types.get("MapReport"), Some(&1));
}
