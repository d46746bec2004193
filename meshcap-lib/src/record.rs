//! Decoded record types.
//!
//! A [Record] is the typed result of decoding one capture line. It is only flattened
//! into the fixed-column [FlatRecord] at an output boundary (CSV, console).
use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::crypto::KeyWidth;
use crate::proto::{
    enum_name, routing, telemetry, HardwareMessage, HardwareMessageType, HardwareModel,
    LocSource, MapReport, ModemPreset, PortNum, Position, Priority, RegionCode, Role, Routing,
    RoutingError, Telemetry, TransportMechanism, User, Waypoint,
};
use crate::Error;

/// Top-level shape of a captured payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum MessageType {
    ServiceEnvelope,
    MapReport,
}

impl MessageType {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ServiceEnvelope => "ServiceEnvelope",
            Self::MapReport => "MapReport",
        }
    }
}

impl Display for MessageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The result of decoding one capture line.
///
/// `error` may be set alongside partially filled fields, e.g., a packet whose
/// position payload failed to decode still carries its header.
#[derive(Debug)]
pub struct Record {
    /// 1-based input line number.
    pub line: usize,
    pub timestamp: String,
    pub topic: String,
    pub message: Option<Message>,
    pub error: Option<Error>,
}

impl Record {
    pub(crate) fn new(line: usize, timestamp: &str, topic: &str) -> Self {
        Record {
            line,
            timestamp: timestamp.to_string(),
            topic: topic.to_string(),
            message: None,
            error: None,
        }
    }

    #[must_use]
    pub fn message_type(&self) -> Option<MessageType> {
        self.message.as_ref().map(Message::message_type)
    }

    /// The packet, if this record holds an envelope that carried one.
    #[must_use]
    pub fn packet(&self) -> Option<&PacketFields> {
        match &self.message {
            Some(Message::ServiceEnvelope(env)) => env.packet.as_ref(),
            _ => None,
        }
    }

    /// Flatten for output.
    #[must_use]
    pub fn flatten(&self) -> FlatRecord {
        FlatRecord::from(self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    MapReport(MapReport),
    ServiceEnvelope(EnvelopeFields),
}

impl Message {
    #[must_use]
    pub fn message_type(&self) -> MessageType {
        match self {
            Self::MapReport(_) => MessageType::MapReport,
            Self::ServiceEnvelope(_) => MessageType::ServiceEnvelope,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct EnvelopeFields {
    pub channel_id: String,
    pub gateway_id: String,
    pub packet: Option<PacketFields>,
}

/// Packet header fields and the payload in whichever form was recovered.
#[derive(Debug, Clone, PartialEq)]
pub struct PacketFields {
    pub from: u32,
    pub to: u32,
    pub channel: u32,
    pub id: u32,
    pub hop_limit: u32,
    pub want_ack: bool,
    pub priority: i32,
    pub via_mqtt: bool,
    pub transport: i32,
    pub payload: Payload,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// The packet carried neither a decoded nor an encrypted payload.
    Absent,
    /// Sent in the clear.
    Decoded(DataFields),
    /// Encrypted and not recovered; holds the ciphertext.
    Encrypted(Vec<u8>),
    /// Encrypted and recovered with a known channel key.
    Decrypted {
        fields: DataFields,
        key: &'static str,
        width: KeyWidth,
    },
}

impl Payload {
    /// Name used in the `PayloadType` column.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Absent => "Absent",
            Self::Decoded(_) => "Decoded",
            Self::Encrypted(_) => "Encrypted",
            Self::Decrypted { .. } => "Decrypted",
        }
    }

    #[must_use]
    pub fn data(&self) -> Option<&DataFields> {
        match self {
            Self::Decoded(fields) | Self::Decrypted { fields, .. } => Some(fields),
            Self::Absent | Self::Encrypted(_) => None,
        }
    }
}

/// Application payload metadata and its typed content.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DataFields {
    pub portnum: i32,
    pub payload_len: usize,
    /// Set only for recognized ports with a non-empty payload that decoded.
    pub content: Option<Content>,
}

impl DataFields {
    #[must_use]
    pub fn portnum_name(&self) -> String {
        enum_name::<PortNum>(self.portnum)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    Text(String),
    Position(Position),
    User(User),
    Telemetry(Telemetry),
    MapReport(MapReport),
    Waypoint(Waypoint),
    Routing(Routing),
    RemoteHardware(HardwareMessage),
}

/// Output row with a fixed set of text columns.
///
/// Unset fields are empty. Column names and order are given by [FlatRecord::COLUMNS]
/// and match the serialized field names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FlatRecord {
    pub timestamp: String,
    pub topic: String,
    pub message_type: String,
    #[serde(rename = "ChannelID")]
    pub channel_id: String,
    #[serde(rename = "GatewayID")]
    pub gateway_id: String,
    pub from: String,
    pub to: String,
    #[serde(rename = "PacketID")]
    pub packet_id: String,
    pub channel: String,
    pub hop_limit: String,
    pub want_ack: String,
    pub priority: String,
    #[serde(rename = "ViaMQTT")]
    pub via_mqtt: String,
    pub transport: String,
    pub payload_type: String,
    pub portnum: String,
    pub portnum_name: String,
    pub payload_size: String,
    pub encrypted_data: String,

    pub latitude: String,
    pub longitude: String,
    pub altitude: String,
    pub position_time: String,
    pub location_source: String,
    pub precision_bits: String,
    pub ground_track: String,
    pub ground_speed: String,

    pub text_message: String,

    #[serde(rename = "UserID")]
    pub user_id: String,
    pub user_long_name: String,
    pub user_short_name: String,
    pub user_macaddr: String,
    pub user_hw_model: String,
    pub user_is_licensed: String,

    pub battery_level: String,
    pub voltage: String,
    pub channel_utilization: String,
    pub air_util_tx: String,
    pub temperature: String,
    pub relative_humidity: String,
    pub barometric_pressure: String,
    pub gas_resistance: String,

    pub map_long_name: String,
    pub map_short_name: String,
    pub map_role: String,
    pub map_hw_model: String,
    pub map_firmware_version: String,
    pub map_region: String,
    pub map_modem_preset: String,
    pub map_has_default_channel: String,
    pub map_position_precision: String,
    pub map_online_local_nodes: String,
    pub map_opted_report_location: String,

    #[serde(rename = "WaypointID")]
    pub waypoint_id: String,
    pub waypoint_name: String,
    pub waypoint_description: String,

    pub routing_variant: String,
    pub routing_error_reason: String,

    pub hw_type: String,
    pub hw_gpio_mask: String,
    pub hw_gpio_value: String,

    pub error: String,
}

impl FlatRecord {
    /// Column names in output order.
    pub const COLUMNS: [&'static str; 62] = [
        "Timestamp",
        "Topic",
        "MessageType",
        "ChannelID",
        "GatewayID",
        "From",
        "To",
        "PacketID",
        "Channel",
        "HopLimit",
        "WantAck",
        "Priority",
        "ViaMQTT",
        "Transport",
        "PayloadType",
        "Portnum",
        "PortnumName",
        "PayloadSize",
        "EncryptedData",
        "Latitude",
        "Longitude",
        "Altitude",
        "PositionTime",
        "LocationSource",
        "PrecisionBits",
        "GroundTrack",
        "GroundSpeed",
        "TextMessage",
        "UserID",
        "UserLongName",
        "UserShortName",
        "UserMacaddr",
        "UserHwModel",
        "UserIsLicensed",
        "BatteryLevel",
        "Voltage",
        "ChannelUtilization",
        "AirUtilTx",
        "Temperature",
        "RelativeHumidity",
        "BarometricPressure",
        "GasResistance",
        "MapLongName",
        "MapShortName",
        "MapRole",
        "MapHwModel",
        "MapFirmwareVersion",
        "MapRegion",
        "MapModemPreset",
        "MapHasDefaultChannel",
        "MapPositionPrecision",
        "MapOnlineLocalNodes",
        "MapOptedReportLocation",
        "WaypointID",
        "WaypointName",
        "WaypointDescription",
        "RoutingVariant",
        "RoutingErrorReason",
        "HwType",
        "HwGpioMask",
        "HwGpioValue",
        "Error",
    ];

    fn set_packet(&mut self, packet: &PacketFields) {
        self.from = packet.from.to_string();
        self.to = packet.to.to_string();
        self.channel = packet.channel.to_string();
        self.packet_id = packet.id.to_string();
        self.hop_limit = packet.hop_limit.to_string();
        self.want_ack = packet.want_ack.to_string();
        self.priority = enum_name::<Priority>(packet.priority);
        self.via_mqtt = packet.via_mqtt.to_string();
        self.transport = enum_name::<TransportMechanism>(packet.transport);
        self.payload_type = packet.payload.type_name().to_string();

        match &packet.payload {
            Payload::Absent => {}
            Payload::Encrypted(ciphertext) => {
                self.encrypted_data = crate::hex::encode_bytes(ciphertext);
                self.payload_size = ciphertext.len().to_string();
            }
            Payload::Decoded(fields) | Payload::Decrypted { fields, .. } => self.set_data(fields),
        }
    }

    fn set_data(&mut self, fields: &DataFields) {
        self.portnum = fields.portnum.to_string();
        self.portnum_name = fields.portnum_name();
        self.payload_size = fields.payload_len.to_string();

        let Some(content) = &fields.content else {
            return;
        };
        match content {
            Content::Text(text) => self.text_message.clone_from(text),
            Content::Position(pos) => self.set_position(pos),
            Content::User(user) => self.set_user(user),
            Content::Telemetry(tm) => self.set_telemetry(tm),
            Content::MapReport(report) => self.set_map_report(report),
            Content::Waypoint(wp) => self.set_waypoint(wp),
            Content::Routing(routing) => self.set_routing(routing),
            Content::RemoteHardware(hw) => self.set_hardware(hw),
        }
    }

    fn set_coordinates(&mut self, latitude_i: i32, longitude_i: i32) -> bool {
        match coordinates(latitude_i, longitude_i) {
            Some((lat, lon)) => {
                self.latitude = lat;
                self.longitude = lon;
                true
            }
            None => false,
        }
    }

    fn set_position(&mut self, pos: &Position) {
        self.set_coordinates(pos.latitude_i.unwrap_or(0), pos.longitude_i.unwrap_or(0));
        self.altitude = nonzero(pos.altitude.unwrap_or(0));
        self.position_time = pos.time.to_string();
        self.location_source = enum_name::<LocSource>(pos.location_source);
        self.precision_bits = pos.precision_bits.to_string();
        self.ground_track = nonzero(pos.ground_track.unwrap_or(0));
        self.ground_speed = nonzero(pos.ground_speed.unwrap_or(0));
    }

    fn set_user(&mut self, user: &User) {
        self.user_id.clone_from(&user.id);
        self.user_long_name.clone_from(&user.long_name);
        self.user_short_name.clone_from(&user.short_name);
        if !user.macaddr.is_empty() {
            self.user_macaddr = crate::hex::encode_bytes(&user.macaddr);
        }
        self.user_hw_model = enum_name::<HardwareModel>(user.hw_model);
        self.user_is_licensed = user.is_licensed.to_string();
    }

    fn set_telemetry(&mut self, tm: &Telemetry) {
        match &tm.variant {
            Some(telemetry::Variant::DeviceMetrics(dm)) => {
                self.battery_level = dm.battery_level.unwrap_or(0).to_string();
                self.voltage = format!("{:.2}", dm.voltage.unwrap_or(0.0));
                self.channel_utilization = format!("{:.2}", dm.channel_utilization.unwrap_or(0.0));
                self.air_util_tx = format!("{:.2}", dm.air_util_tx.unwrap_or(0.0));
            }
            Some(telemetry::Variant::EnvironmentMetrics(em)) => {
                self.temperature = format!("{:.1}", em.temperature.unwrap_or(0.0));
                self.relative_humidity = format!("{:.1}", em.relative_humidity.unwrap_or(0.0));
                self.barometric_pressure = format!("{:.1}", em.barometric_pressure.unwrap_or(0.0));
                self.gas_resistance = format!("{:.1}", em.gas_resistance.unwrap_or(0.0));
            }
            None => {}
        }
    }

    fn set_map_report(&mut self, report: &MapReport) {
        self.map_long_name.clone_from(&report.long_name);
        self.map_short_name.clone_from(&report.short_name);
        self.map_role = enum_name::<Role>(report.role);
        self.map_hw_model = enum_name::<HardwareModel>(report.hw_model);
        self.map_firmware_version.clone_from(&report.firmware_version);
        self.map_region = enum_name::<RegionCode>(report.region);
        self.map_modem_preset = enum_name::<ModemPreset>(report.modem_preset);
        self.map_has_default_channel = report.has_default_channel.to_string();
        if self.set_coordinates(report.latitude_i, report.longitude_i) {
            self.altitude = report.altitude.to_string();
        }
        self.map_position_precision = report.position_precision.to_string();
        self.map_online_local_nodes = report.num_online_local_nodes.to_string();
        self.map_opted_report_location = report.has_opted_report_location.to_string();
    }

    fn set_waypoint(&mut self, wp: &Waypoint) {
        self.waypoint_id = wp.id.to_string();
        self.waypoint_name.clone_from(&wp.name);
        self.waypoint_description.clone_from(&wp.description);
        self.set_coordinates(wp.latitude_i.unwrap_or(0), wp.longitude_i.unwrap_or(0));
    }

    fn set_routing(&mut self, msg: &Routing) {
        match &msg.variant {
            Some(routing::Variant::RouteRequest(_)) => {
                self.routing_variant = "route_request".to_string();
            }
            Some(routing::Variant::RouteReply(_)) => {
                self.routing_variant = "route_reply".to_string();
            }
            Some(routing::Variant::ErrorReason(reason)) => {
                self.routing_variant = "error_reason".to_string();
                if *reason != RoutingError::None as i32 {
                    self.routing_error_reason = enum_name::<RoutingError>(*reason);
                }
            }
            None => {}
        }
    }

    fn set_hardware(&mut self, hw: &HardwareMessage) {
        self.hw_type = enum_name::<HardwareMessageType>(hw.r#type);
        self.hw_gpio_mask = hw.gpio_mask.to_string();
        self.hw_gpio_value = hw.gpio_value.to_string();
    }

    /// Field values in [FlatRecord::COLUMNS] order.
    #[must_use]
    pub fn values(&self) -> [&str; 62] {
        [
            &self.timestamp,
            &self.topic,
            &self.message_type,
            &self.channel_id,
            &self.gateway_id,
            &self.from,
            &self.to,
            &self.packet_id,
            &self.channel,
            &self.hop_limit,
            &self.want_ack,
            &self.priority,
            &self.via_mqtt,
            &self.transport,
            &self.payload_type,
            &self.portnum,
            &self.portnum_name,
            &self.payload_size,
            &self.encrypted_data,
            &self.latitude,
            &self.longitude,
            &self.altitude,
            &self.position_time,
            &self.location_source,
            &self.precision_bits,
            &self.ground_track,
            &self.ground_speed,
            &self.text_message,
            &self.user_id,
            &self.user_long_name,
            &self.user_short_name,
            &self.user_macaddr,
            &self.user_hw_model,
            &self.user_is_licensed,
            &self.battery_level,
            &self.voltage,
            &self.channel_utilization,
            &self.air_util_tx,
            &self.temperature,
            &self.relative_humidity,
            &self.barometric_pressure,
            &self.gas_resistance,
            &self.map_long_name,
            &self.map_short_name,
            &self.map_role,
            &self.map_hw_model,
            &self.map_firmware_version,
            &self.map_region,
            &self.map_modem_preset,
            &self.map_has_default_channel,
            &self.map_position_precision,
            &self.map_online_local_nodes,
            &self.map_opted_report_location,
            &self.waypoint_id,
            &self.waypoint_name,
            &self.waypoint_description,
            &self.routing_variant,
            &self.routing_error_reason,
            &self.hw_type,
            &self.hw_gpio_mask,
            &self.hw_gpio_value,
            &self.error,
        ]
    }
}

impl From<&Record> for FlatRecord {
    fn from(record: &Record) -> Self {
        let mut flat = FlatRecord {
            timestamp: record.timestamp.clone(),
            topic: record.topic.clone(),
            ..Default::default()
        };

        match &record.message {
            Some(Message::MapReport(report)) => {
                flat.message_type = MessageType::MapReport.to_string();
                flat.set_map_report(report);
            }
            Some(Message::ServiceEnvelope(env)) => {
                flat.message_type = MessageType::ServiceEnvelope.to_string();
                flat.channel_id.clone_from(&env.channel_id);
                flat.gateway_id.clone_from(&env.gateway_id);
                if let Some(packet) = &env.packet {
                    flat.set_packet(packet);
                }
            }
            None => {}
        }

        if let Some(err) = &record.error {
            flat.error = err.to_string();
        }

        flat
    }
}

/// Render a fixed-point coordinate pair (degrees x 1e7) as decimal degrees, unless both
/// are zero.
#[must_use]
pub fn coordinates(latitude_i: i32, longitude_i: i32) -> Option<(String, String)> {
    if latitude_i == 0 && longitude_i == 0 {
        return None;
    }
    Some((
        format!("{:.7}", f64::from(latitude_i) / 1e7),
        format!("{:.7}", f64::from(longitude_i) / 1e7),
    ))
}

fn nonzero<T: Default + PartialEq + ToString>(value: T) -> String {
    if value == T::default() {
        String::new()
    } else {
        value.to_string()
    }
}
