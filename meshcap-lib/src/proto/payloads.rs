//! Messages carried as [super::Data] payloads.
use super::{proto_enum, HardwareModel, Role};

/// `POSITION_APP` payload. Coordinates are degrees x 1e7.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Position {
    #[prost(sfixed32, optional, tag = "1")]
    pub latitude_i: Option<i32>,
    #[prost(sfixed32, optional, tag = "2")]
    pub longitude_i: Option<i32>,
    /// Meters above mean sea level.
    #[prost(int32, optional, tag = "3")]
    pub altitude: Option<i32>,
    /// Seconds since 1970.
    #[prost(fixed32, tag = "4")]
    pub time: u32,
    #[prost(enumeration = "LocSource", tag = "5")]
    pub location_source: i32,
    #[prost(uint32, optional, tag = "15")]
    pub ground_speed: Option<u32>,
    #[prost(uint32, optional, tag = "16")]
    pub ground_track: Option<u32>,
    #[prost(uint32, tag = "23")]
    pub precision_bits: u32,
}

proto_enum! {
    LocSource {
        LocUnset = 0 => "LOC_UNSET",
        LocManual = 1 => "LOC_MANUAL",
        LocInternal = 2 => "LOC_INTERNAL",
        LocExternal = 3 => "LOC_EXTERNAL",
    }
}

/// `NODEINFO_APP` payload.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct User {
    /// Node id string, e.g., `!a1b2c3d4`.
    #[prost(string, tag = "1")]
    pub id: String,
    #[prost(string, tag = "2")]
    pub long_name: String,
    #[prost(string, tag = "3")]
    pub short_name: String,
    #[prost(bytes, tag = "4")]
    pub macaddr: Vec<u8>,
    #[prost(enumeration = "HardwareModel", tag = "5")]
    pub hw_model: i32,
    #[prost(bool, tag = "6")]
    pub is_licensed: bool,
    #[prost(enumeration = "Role", tag = "7")]
    pub role: i32,
    #[prost(bytes, tag = "8")]
    pub public_key: Vec<u8>,
}

/// `TELEMETRY_APP` payload.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Telemetry {
    #[prost(fixed32, tag = "1")]
    pub time: u32,
    #[prost(oneof = "telemetry::Variant", tags = "2, 3")]
    pub variant: Option<telemetry::Variant>,
}

pub mod telemetry {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Variant {
        #[prost(message, tag = "2")]
        DeviceMetrics(super::DeviceMetrics),
        #[prost(message, tag = "3")]
        EnvironmentMetrics(super::EnvironmentMetrics),
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct DeviceMetrics {
    /// 0-100, or 101 when powered externally.
    #[prost(uint32, optional, tag = "1")]
    pub battery_level: Option<u32>,
    #[prost(float, optional, tag = "2")]
    pub voltage: Option<f32>,
    #[prost(float, optional, tag = "3")]
    pub channel_utilization: Option<f32>,
    #[prost(float, optional, tag = "4")]
    pub air_util_tx: Option<f32>,
    #[prost(uint32, optional, tag = "5")]
    pub uptime_seconds: Option<u32>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct EnvironmentMetrics {
    #[prost(float, optional, tag = "1")]
    pub temperature: Option<f32>,
    #[prost(float, optional, tag = "2")]
    pub relative_humidity: Option<f32>,
    #[prost(float, optional, tag = "3")]
    pub barometric_pressure: Option<f32>,
    #[prost(float, optional, tag = "4")]
    pub gas_resistance: Option<f32>,
}

/// `WAYPOINT_APP` payload.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Waypoint {
    #[prost(uint32, tag = "1")]
    pub id: u32,
    #[prost(sfixed32, optional, tag = "2")]
    pub latitude_i: Option<i32>,
    #[prost(sfixed32, optional, tag = "3")]
    pub longitude_i: Option<i32>,
    #[prost(uint32, tag = "4")]
    pub expire: u32,
    #[prost(uint32, tag = "5")]
    pub locked_to: u32,
    #[prost(string, tag = "6")]
    pub name: String,
    #[prost(string, tag = "7")]
    pub description: String,
    #[prost(fixed32, tag = "8")]
    pub icon: u32,
}

/// `ROUTING_APP` payload.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Routing {
    #[prost(oneof = "routing::Variant", tags = "1, 2, 3")]
    pub variant: Option<routing::Variant>,
}

pub mod routing {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Variant {
        #[prost(message, tag = "1")]
        RouteRequest(super::RouteDiscovery),
        #[prost(message, tag = "2")]
        RouteReply(super::RouteDiscovery),
        #[prost(enumeration = "super::RoutingError", tag = "3")]
        ErrorReason(i32),
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RouteDiscovery {
    #[prost(fixed32, repeated, tag = "1")]
    pub route: Vec<u32>,
    #[prost(int32, repeated, tag = "2")]
    pub snr_towards: Vec<i32>,
    #[prost(fixed32, repeated, tag = "3")]
    pub route_back: Vec<u32>,
    #[prost(int32, repeated, tag = "4")]
    pub snr_back: Vec<i32>,
}

proto_enum! {
    RoutingError {
        None = 0 => "NONE",
        NoRoute = 1 => "NO_ROUTE",
        GotNak = 2 => "GOT_NAK",
        Timeout = 3 => "TIMEOUT",
        NoInterface = 4 => "NO_INTERFACE",
        MaxRetransmit = 5 => "MAX_RETRANSMIT",
        NoChannel = 6 => "NO_CHANNEL",
        TooLarge = 7 => "TOO_LARGE",
        NoResponse = 8 => "NO_RESPONSE",
        DutyCycleLimit = 9 => "DUTY_CYCLE_LIMIT",
        BadRequest = 32 => "BAD_REQUEST",
        NotAuthorized = 33 => "NOT_AUTHORIZED",
        PkiFailed = 34 => "PKI_FAILED",
        PkiUnknownPubkey = 35 => "PKI_UNKNOWN_PUBKEY",
        AdminBadSessionKey = 36 => "ADMIN_BAD_SESSION_KEY",
        AdminPublicKeyUnauthorized = 37 => "ADMIN_PUBLIC_KEY_UNAUTHORIZED",
        RateLimitExceeded = 38 => "RATE_LIMIT_EXCEEDED",
    }
}

/// `REMOTE_HARDWARE_APP` payload.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct HardwareMessage {
    #[prost(enumeration = "HardwareMessageType", tag = "1")]
    pub r#type: i32,
    #[prost(uint64, tag = "2")]
    pub gpio_mask: u64,
    #[prost(uint64, tag = "3")]
    pub gpio_value: u64,
}

proto_enum! {
    HardwareMessageType {
        Unset = 0 => "UNSET",
        WriteGpios = 1 => "WRITE_GPIOS",
        WatchGpios = 2 => "WATCH_GPIOS",
        GpiosChanged = 3 => "GPIOS_CHANGED",
        ReadGpios = 4 => "READ_GPIOS",
        ReadGpiosReply = 5 => "READ_GPIOS_REPLY",
    }
}
