//! Protobuf message definitions for the subset of the Meshtastic schema carried on
//! the MQTT bus.
//!
//! Only the fields this crate consumes are declared; protobuf decoding skips any
//! other tag, so newer firmware adding fields still decodes.
//!
//! ```text
//! ServiceEnvelope                      MapReport (map topics)
//!   └── MeshPacket
//!         ├── encrypted (AES-CTR, see crate::crypto)
//!         └── Data (portnum + payload)
//!               ├── Position, User, Telemetry, Waypoint
//!               ├── Routing, HardwareMessage
//!               └── MapReport, text
//! ```
use prost::Message;

/// Declares a protobuf enumeration along with its [ProtoEnum] names.
macro_rules! proto_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($variant:ident = $value:literal => $label:literal,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
        #[repr(i32)]
        pub enum $name {
            $($variant = $value,)+
        }

        impl $crate::proto::ProtoEnum for $name {
            fn as_str_name(&self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)+
                }
            }
        }
    };
}

pub(crate) use proto_enum;

mod enums;
mod mesh;
mod payloads;

pub use enums::*;
pub use mesh::*;
pub use payloads::*;

/// Symbolic names for protobuf enumerations.
pub trait ProtoEnum: TryFrom<i32> {
    /// Name of the variant as it appears in the `.proto` definition.
    fn as_str_name(&self) -> &'static str;
}

/// Render a raw enum value by its symbolic name, or its decimal value when it is not a
/// known variant (e.g., values added by newer firmware).
#[must_use]
pub fn enum_name<E: ProtoEnum>(value: i32) -> String {
    match E::try_from(value) {
        Ok(e) => e.as_str_name().to_string(),
        Err(_) => value.to_string(),
    }
}

/// Decode the generic transport envelope.
///
/// # Errors
/// [prost::DecodeError] if `dat` is not a well-formed encoding.
pub fn decode_envelope(dat: &[u8]) -> Result<ServiceEnvelope, prost::DecodeError> {
    ServiceEnvelope::decode(dat)
}

/// Decode a map presence report.
///
/// Protobuf has no required fields, so an empty or otherwise all-default report is a
/// valid decode.
///
/// # Errors
/// [prost::DecodeError] if `dat` is not a well-formed encoding.
pub fn decode_map_report(dat: &[u8]) -> Result<MapReport, prost::DecodeError> {
    MapReport::decode(dat)
}

#[cfg(test)]
mod tests {
    use super::*;
    use prost::Message;

    #[test]
    fn enum_name_known_and_unknown() {
        assert_eq!(enum_name::<PortNum>(1), "TEXT_MESSAGE_APP");
        assert_eq!(enum_name::<PortNum>(73), "MAP_REPORT_APP");
        assert_eq!(enum_name::<PortNum>(4242), "4242");
        assert_eq!(enum_name::<Priority>(0), "UNSET");
        assert_eq!(enum_name::<Priority>(64), "DEFAULT");
    }

    #[test]
    fn empty_map_report_is_valid() {
        let report = decode_map_report(&[]).unwrap();
        assert_eq!(report, MapReport::default());
    }

    #[test]
    fn truncated_envelope_is_error() {
        // packet field (tag 1, length-delimited) claiming 16 bytes with only 2 present
        let zult = decode_envelope(&[0x0a, 0x10, 0x0d, 0x01]);
        assert!(zult.is_err());
    }

    #[test]
    fn invalid_wire_type_is_error() {
        // field 1 with wire type 7
        let zult = decode_map_report(&[0x0f, 0x00]);
        assert!(zult.is_err());
    }

    #[test]
    fn envelope_roundtrip_keeps_oneof() {
        let env = ServiceEnvelope {
            packet: Some(MeshPacket {
                from: 0xdead_beef,
                id: 7,
                payload_variant: Some(mesh_packet::PayloadVariant::Encrypted(vec![1, 2, 3])),
                ..Default::default()
            }),
            channel_id: "LongFast".to_string(),
            gateway_id: "!abcd0001".to_string(),
        };
        let zult = decode_envelope(&env.encode_to_vec()).unwrap();
        assert_eq!(zult, env);
    }
}
