use super::{proto_enum, HardwareModel, ModemPreset, RegionCode, Role};

/// Envelope wrapping every [MeshPacket] a gateway publishes to the bus.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ServiceEnvelope {
    #[prost(message, optional, tag = "1")]
    pub packet: Option<MeshPacket>,
    /// Channel name the packet was received on, e.g., `LongFast`.
    #[prost(string, tag = "2")]
    pub channel_id: String,
    /// Node id of the publishing gateway, e.g., `!a1b2c3d4`.
    #[prost(string, tag = "3")]
    pub gateway_id: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MeshPacket {
    #[prost(fixed32, tag = "1")]
    pub from: u32,
    #[prost(fixed32, tag = "2")]
    pub to: u32,
    /// Channel index, or channel hash when the payload is encrypted.
    #[prost(uint32, tag = "3")]
    pub channel: u32,
    #[prost(oneof = "mesh_packet::PayloadVariant", tags = "4, 5")]
    pub payload_variant: Option<mesh_packet::PayloadVariant>,
    #[prost(fixed32, tag = "6")]
    pub id: u32,
    #[prost(uint32, tag = "9")]
    pub hop_limit: u32,
    #[prost(bool, tag = "10")]
    pub want_ack: bool,
    #[prost(enumeration = "Priority", tag = "11")]
    pub priority: i32,
    #[prost(bool, tag = "14")]
    pub via_mqtt: bool,
    /// Payload is encrypted with the recipient's public key rather than a channel key.
    #[prost(bool, tag = "17")]
    pub pki_encrypted: bool,
    #[prost(enumeration = "TransportMechanism", tag = "21")]
    pub transport_mechanism: i32,
}

pub mod mesh_packet {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum PayloadVariant {
        #[prost(message, tag = "4")]
        Decoded(super::Data),
        #[prost(bytes, tag = "5")]
        Encrypted(Vec<u8>),
    }
}

/// Application payload of a packet. `payload` is interpreted according to `portnum`.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Data {
    #[prost(enumeration = "PortNum", tag = "1")]
    pub portnum: i32,
    #[prost(bytes, tag = "2")]
    pub payload: Vec<u8>,
    #[prost(bool, tag = "3")]
    pub want_response: bool,
    #[prost(fixed32, tag = "4")]
    pub dest: u32,
    #[prost(fixed32, tag = "5")]
    pub source: u32,
    #[prost(fixed32, tag = "6")]
    pub request_id: u32,
}

/// Node presence report published on map topics, either at the top level or as a
/// `MAP_REPORT_APP` payload.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MapReport {
    #[prost(string, tag = "1")]
    pub long_name: String,
    #[prost(string, tag = "2")]
    pub short_name: String,
    #[prost(enumeration = "Role", tag = "3")]
    pub role: i32,
    #[prost(enumeration = "HardwareModel", tag = "4")]
    pub hw_model: i32,
    #[prost(string, tag = "5")]
    pub firmware_version: String,
    #[prost(enumeration = "RegionCode", tag = "6")]
    pub region: i32,
    #[prost(enumeration = "ModemPreset", tag = "7")]
    pub modem_preset: i32,
    #[prost(bool, tag = "8")]
    pub has_default_channel: bool,
    #[prost(sfixed32, tag = "9")]
    pub latitude_i: i32,
    #[prost(sfixed32, tag = "10")]
    pub longitude_i: i32,
    #[prost(int32, tag = "11")]
    pub altitude: i32,
    #[prost(uint32, tag = "12")]
    pub position_precision: u32,
    #[prost(uint32, tag = "13")]
    pub num_online_local_nodes: u32,
    #[prost(bool, tag = "14")]
    pub has_opted_report_location: bool,
}

proto_enum! {
    /// Identifies the application, and so the payload type, of a [Data] message.
    PortNum {
        UnknownApp = 0 => "UNKNOWN_APP",
        TextMessageApp = 1 => "TEXT_MESSAGE_APP",
        RemoteHardwareApp = 2 => "REMOTE_HARDWARE_APP",
        PositionApp = 3 => "POSITION_APP",
        NodeinfoApp = 4 => "NODEINFO_APP",
        RoutingApp = 5 => "ROUTING_APP",
        AdminApp = 6 => "ADMIN_APP",
        TextMessageCompressedApp = 7 => "TEXT_MESSAGE_COMPRESSED_APP",
        WaypointApp = 8 => "WAYPOINT_APP",
        AudioApp = 9 => "AUDIO_APP",
        DetectionSensorApp = 10 => "DETECTION_SENSOR_APP",
        AlertApp = 11 => "ALERT_APP",
        KeyVerificationApp = 12 => "KEY_VERIFICATION_APP",
        ReplyApp = 32 => "REPLY_APP",
        IpTunnelApp = 33 => "IP_TUNNEL_APP",
        PaxcounterApp = 34 => "PAXCOUNTER_APP",
        SerialApp = 64 => "SERIAL_APP",
        StoreForwardApp = 65 => "STORE_FORWARD_APP",
        RangeTestApp = 66 => "RANGE_TEST_APP",
        TelemetryApp = 67 => "TELEMETRY_APP",
        ZpsApp = 68 => "ZPS_APP",
        SimulatorApp = 69 => "SIMULATOR_APP",
        TracerouteApp = 70 => "TRACEROUTE_APP",
        NeighborinfoApp = 71 => "NEIGHBORINFO_APP",
        AtakPlugin = 72 => "ATAK_PLUGIN",
        MapReportApp = 73 => "MAP_REPORT_APP",
        PowerstressApp = 74 => "POWERSTRESS_APP",
        ReticulumTunnelApp = 76 => "RETICULUM_TUNNEL_APP",
        CayenneApp = 77 => "CAYENNE_APP",
        PrivateApp = 256 => "PRIVATE_APP",
        AtakForwarder = 257 => "ATAK_FORWARDER",
        Max = 511 => "MAX",
    }
}

proto_enum! {
    Priority {
        Unset = 0 => "UNSET",
        Min = 1 => "MIN",
        Background = 10 => "BACKGROUND",
        Default = 64 => "DEFAULT",
        Reliable = 70 => "RELIABLE",
        Response = 80 => "RESPONSE",
        High = 100 => "HIGH",
        Alert = 110 => "ALERT",
        Ack = 120 => "ACK",
        Max = 127 => "MAX",
    }
}

proto_enum! {
    /// How the reporting node received the packet.
    TransportMechanism {
        TransportInternal = 0 => "TRANSPORT_INTERNAL",
        TransportLora = 1 => "TRANSPORT_LORA",
        TransportLoraAlt1 = 2 => "TRANSPORT_LORA_ALT1",
        TransportLoraAlt2 = 3 => "TRANSPORT_LORA_ALT2",
        TransportLoraAlt3 = 4 => "TRANSPORT_LORA_ALT3",
        TransportMqtt = 5 => "TRANSPORT_MQTT",
        TransportMulticastUdp = 6 => "TRANSPORT_MULTICAST_UDP",
        TransportApi = 7 => "TRANSPORT_API",
    }
}
