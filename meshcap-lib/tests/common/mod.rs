use std::path::PathBuf;

use meshcap::crypto::{self, KeyWidth};
use meshcap::proto::{mesh_packet::PayloadVariant, Data, MeshPacket, ServiceEnvelope};
use prost::Message;

pub fn fixture_path(name: &str) -> PathBuf {
    let mut path =
        PathBuf::from(std::env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR not set"));
    path.push("tests/fixtures");
    path.push(name);
    path
}

pub fn data(portnum: i32, payload: &[u8]) -> Data {
    Data {
        portnum,
        payload: payload.to_vec(),
        ..Default::default()
    }
}

pub fn envelope(packet: MeshPacket) -> ServiceEnvelope {
    ServiceEnvelope {
        channel_id: "LongFast".to_string(),
        gateway_id: format!("!{:08x}", packet.from),
        packet: Some(packet),
    }
}

pub fn decoded_packet(id: u32, from: u32, data: Data) -> MeshPacket {
    MeshPacket {
        from,
        to: 0xffff_ffff,
        id,
        hop_limit: 3,
        payload_variant: Some(PayloadVariant::Decoded(data)),
        ..Default::default()
    }
}

/// A packet whose `data` is encrypted with `psk` the way a node would.
pub fn encrypted_packet(id: u32, from: u32, data: &Data, psk: &[u8; 16], width: KeyWidth) -> MeshPacket {
    let ciphertext = crypto::encrypt(&data.encode_to_vec(), psk, width, id, from);
    MeshPacket {
        from,
        to: 0xffff_ffff,
        id,
        hop_limit: 3,
        payload_variant: Some(PayloadVariant::Encrypted(ciphertext)),
        ..Default::default()
    }
}

/// Render a capture line for `msg`.
pub fn capture_line<M: Message>(topic: &str, msg: &M) -> String {
    meshcap::capture::format_line("01.02.2025 10:00:00", topic, &msg.encode_to_vec())
}
