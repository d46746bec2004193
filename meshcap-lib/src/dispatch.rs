//! Port number based decoding of application payloads.
use prost::Message;
use tracing::trace;

use crate::proto::{
    enum_name, HardwareMessage, MapReport, PortNum, Position, Routing, Telemetry, User,
    Waypoint,
};
use crate::record::{Content, DataFields};

/// A recognized payload that failed to decode.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentError {
    /// Message the payload was decoded as, e.g., `Position`.
    pub kind: &'static str,
    pub source: prost::DecodeError,
}

/// Output of [dispatch]. `fields` always carries the port and payload length, even
/// when `error` is set.
#[derive(Debug, Clone, PartialEq)]
pub struct Dispatched {
    pub fields: DataFields,
    pub error: Option<ContentError>,
}

fn decode_as<M, F>(kind: &'static str, payload: &[u8], wrap: F) -> Result<Content, ContentError>
where
    M: Message + Default,
    F: FnOnce(M) -> Content,
{
    M::decode(payload)
        .map(wrap)
        .map_err(|source| ContentError { kind, source })
}

/// Decode `payload` according to `portnum`.
///
/// Ports without a typed decoder, and empty payloads, produce only the metadata.
#[must_use]
pub fn dispatch(portnum: i32, payload: &[u8]) -> Dispatched {
    let mut fields = DataFields {
        portnum,
        payload_len: payload.len(),
        content: None,
    };
    if payload.is_empty() {
        return Dispatched {
            fields,
            error: None,
        };
    }

    let Ok(port) = PortNum::try_from(portnum) else {
        trace!(portnum, "no decoder for unknown port");
        return Dispatched {
            fields,
            error: None,
        };
    };

    let zult = match port {
        PortNum::TextMessageApp | PortNum::TextMessageCompressedApp => Ok(Content::Text(
            String::from_utf8_lossy(payload).into_owned(),
        )),
        PortNum::PositionApp => decode_as::<Position, _>("Position", payload, Content::Position),
        PortNum::NodeinfoApp => decode_as::<User, _>("User", payload, Content::User),
        PortNum::TelemetryApp => {
            decode_as::<Telemetry, _>("Telemetry", payload, Content::Telemetry)
        }
        PortNum::WaypointApp => decode_as::<Waypoint, _>("Waypoint", payload, Content::Waypoint),
        PortNum::RoutingApp => decode_as::<Routing, _>("Routing", payload, Content::Routing),
        PortNum::RemoteHardwareApp => {
            decode_as::<HardwareMessage, _>("HardwareMessage", payload, Content::RemoteHardware)
        }
        PortNum::MapReportApp => {
            decode_as::<MapReport, _>("MapReport", payload, Content::MapReport)
        }
        _ => {
            trace!(port = %enum_name::<PortNum>(portnum), "no decoder for port");
            return Dispatched {
                fields,
                error: None,
            };
        }
    };

    match zult {
        Ok(content) => {
            fields.content = Some(content);
            Dispatched {
                fields,
                error: None,
            }
        }
        Err(err) => {
            trace!(kind = err.kind, error = %err.source, "payload decode failed");
            Dispatched {
                fields,
                error: Some(err),
            }
        }
    }
}
