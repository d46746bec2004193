//! Capture line to [Record] assembly.
//!
//! The topic selects which top-level shapes are probed, in order:
//!
//! | topic contains | probes |
//! |---|---|
//! | `/map/` | `MapReport`, then `ServiceEnvelope` |
//! | `/e/` or neither | `ServiceEnvelope` |
//!
//! Each probe decodes into its own value and nothing is merged into the record until a
//! winner is chosen. An empty byte string is a valid `MapReport`, so on map topics a
//! `MapReport` that decodes to all defaults loses to a `ServiceEnvelope` carrying a
//! packet (see [Decoder::prefer_envelope_over_empty_map_report]).
use rayon::prelude::*;
use tracing::{debug, trace};
use typed_builder::TypedBuilder;

use crate::capture::CaptureLine;
use crate::crypto::{self, Unresolved};
use crate::dispatch::dispatch;
use crate::proto::{mesh_packet::PayloadVariant, MapReport, MeshPacket, ServiceEnvelope};
use crate::record::{EnvelopeFields, Message, MessageType, PacketFields, Payload, Record};
use crate::Error;

/// Topic marker of map presence reports.
pub const MAP_TOPIC_MARKER: &str = "/map/";
/// Topic marker of encrypted/envelope traffic.
pub const ENVELOPE_TOPIC_MARKER: &str = "/e/";

/// Decoding options. [Decoder::default] enables everything.
#[derive(Debug, Clone, TypedBuilder)]
pub struct Decoder {
    /// Attempt trial decryption of encrypted payloads.
    #[builder(default = true)]
    pub decrypt: bool,
    /// On map topics, prefer a `ServiceEnvelope` with a packet over a `MapReport` that
    /// decoded to all defaults. When disabled any successful `MapReport` decode wins.
    #[builder(default = true)]
    pub prefer_envelope_over_empty_map_report: bool,
}

impl Default for Decoder {
    fn default() -> Self {
        Decoder::builder().build()
    }
}

/// One top-level shape decoded in isolation.
enum Probed {
    MapReport(MapReport),
    Envelope(ServiceEnvelope),
}

/// When a successful probe is taken without looking further.
#[derive(Debug, Clone, Copy)]
enum Accept {
    Any,
    /// A `MapReport` with at least one non-default field.
    NonEmptyReport,
    /// A `ServiceEnvelope` carrying a packet.
    EnvelopeWithPacket,
}

impl Accept {
    fn accepts(self, probed: &Probed) -> bool {
        match (self, probed) {
            (Self::Any, _) => true,
            (Self::NonEmptyReport, Probed::MapReport(report)) => *report != MapReport::default(),
            (Self::EnvelopeWithPacket, Probed::Envelope(env)) => env.packet.is_some(),
            _ => false,
        }
    }
}

type Probe = (MessageType, Accept);

const MAP_PROBES_PREFER_ENVELOPE: &[Probe] = &[
    (MessageType::MapReport, Accept::NonEmptyReport),
    (MessageType::ServiceEnvelope, Accept::EnvelopeWithPacket),
];
const MAP_PROBES: &[Probe] = &[
    (MessageType::MapReport, Accept::Any),
    (MessageType::ServiceEnvelope, Accept::Any),
];
const ENVELOPE_PROBES: &[Probe] = &[(MessageType::ServiceEnvelope, Accept::Any)];

fn probe(shape: MessageType, dat: &[u8]) -> Result<Probed, prost::DecodeError> {
    match shape {
        MessageType::MapReport => crate::proto::decode_map_report(dat).map(Probed::MapReport),
        MessageType::ServiceEnvelope => crate::proto::decode_envelope(dat).map(Probed::Envelope),
    }
}

impl Decoder {
    fn probes(&self, topic: &str) -> &'static [Probe] {
        if topic.contains(MAP_TOPIC_MARKER) {
            if self.prefer_envelope_over_empty_map_report {
                MAP_PROBES_PREFER_ENVELOPE
            } else {
                MAP_PROBES
            }
        } else {
            // ENVELOPE_TOPIC_MARKER and unmarked topics decode the same way
            ENVELOPE_PROBES
        }
    }

    /// Run the probes for `topic` over `dat`.
    ///
    /// The first accepted decode wins. Failing that, the first successful decode, and
    /// failing that, the error of the last probe.
    fn select(&self, topic: &str, dat: &[u8]) -> Result<Probed, (MessageType, prost::DecodeError)> {
        let mut first_ok: Option<Probed> = None;
        let mut last_err: Option<(MessageType, prost::DecodeError)> = None;

        for (shape, accept) in self.probes(topic) {
            match probe(*shape, dat) {
                Ok(probed) if accept.accepts(&probed) => {
                    trace!(%shape, "probe accepted");
                    return Ok(probed);
                }
                Ok(probed) => {
                    trace!(%shape, "probe decoded, not accepted");
                    first_ok.get_or_insert(probed);
                }
                Err(err) => {
                    trace!(%shape, %err, "probe failed");
                    last_err = Some((*shape, err));
                }
            }
        }

        match (first_ok, last_err) {
            (Some(probed), _) => Ok(probed),
            (None, Some(err)) => Err(err),
            (None, None) => unreachable!("probe tables are never empty"),
        }
    }

    /// Decode one capture line. `line_no` is the 1-based line number used in errors.
    ///
    /// Never fails; errors are recorded in [Record::error].
    #[must_use]
    pub fn decode_line(&self, line_no: usize, line: &str) -> Record {
        let capture = match CaptureLine::parse(line) {
            Ok(capture) => capture,
            Err(malformed) => {
                debug!(line = line_no, fields = malformed.fields, "invalid line format");
                let mut record =
                    Record::new(line_no, malformed.timestamp, malformed.topic.unwrap_or(""));
                record.error = Some(Error::InvalidLineFormat { line: line_no });
                return record;
            }
        };

        match crate::hex::decode_payload(capture.payload) {
            Ok(dat) => self.decode_message(line_no, capture.timestamp, capture.topic, &dat),
            Err(source) => {
                debug!(line = line_no, %source, "invalid hex");
                let mut record = Record::new(line_no, capture.timestamp, capture.topic);
                record.error = Some(Error::InvalidHex {
                    line: line_no,
                    source,
                });
                record
            }
        }
    }

    /// Decode a raw payload received on `topic`.
    #[must_use]
    pub fn decode_message(&self, line_no: usize, timestamp: &str, topic: &str, dat: &[u8]) -> Record {
        let mut record = Record::new(line_no, timestamp, topic);

        match self.select(topic, dat) {
            Ok(Probed::MapReport(report)) => {
                record.message = Some(Message::MapReport(report));
            }
            Ok(Probed::Envelope(env)) => {
                let (fields, error) = self.envelope(line_no, env);
                record.message = Some(Message::ServiceEnvelope(fields));
                record.error = error;
            }
            Err((shape, source)) => {
                debug!(line = line_no, %shape, %source, "malformed envelope");
                record.error = Some(Error::MalformedEnvelope {
                    line: line_no,
                    shape,
                    source,
                });
            }
        }

        record
    }

    fn envelope(&self, line_no: usize, env: ServiceEnvelope) -> (EnvelopeFields, Option<Error>) {
        let mut fields = EnvelopeFields {
            channel_id: env.channel_id,
            gateway_id: env.gateway_id,
            packet: None,
        };
        let Some(packet) = env.packet else {
            return (fields, Some(Error::PacketAbsent { line: line_no }));
        };
        let (packet, error) = self.packet(line_no, packet);
        fields.packet = Some(packet);
        (fields, error)
    }

    fn packet(&self, line_no: usize, packet: MeshPacket) -> (PacketFields, Option<Error>) {
        let mut error = None;
        let payload = match packet.payload_variant {
            None => Payload::Absent,
            Some(PayloadVariant::Decoded(data)) => {
                let zult = dispatch(data.portnum, &data.payload);
                error = zult.error.map(|err| content_error(line_no, err));
                Payload::Decoded(zult.fields)
            }
            Some(PayloadVariant::Encrypted(ciphertext)) => {
                let recovered = if self.decrypt {
                    crypto::decrypt(&ciphertext, packet.id, packet.from, packet.pki_encrypted)
                } else {
                    Err(Unresolved::Skipped)
                };
                match recovered {
                    Ok(recovered) => {
                        debug!(
                            line = line_no,
                            key = recovered.key,
                            width = %recovered.width,
                            "payload decrypted"
                        );
                        let zult = dispatch(recovered.data.portnum, &recovered.data.payload);
                        error = zult.error.map(|err| content_error(line_no, err));
                        Payload::Decrypted {
                            fields: zult.fields,
                            key: recovered.key,
                            width: recovered.width,
                        }
                    }
                    Err(reason) => {
                        debug!(line = line_no, %reason, "payload unresolved");
                        error = Some(Error::EncryptionUnresolved {
                            line: line_no,
                            reason,
                        });
                        Payload::Encrypted(ciphertext)
                    }
                }
            }
        };

        let fields = PacketFields {
            from: packet.from,
            to: packet.to,
            channel: packet.channel,
            id: packet.id,
            hop_limit: packet.hop_limit,
            want_ack: packet.want_ack,
            priority: packet.priority,
            via_mqtt: packet.via_mqtt,
            transport: packet.transport_mechanism,
            payload,
        };
        (fields, error)
    }

    /// Decode many lines in parallel, returning records in input order.
    ///
    /// Blank lines are skipped; line numbers count them, matching the input file.
    #[must_use]
    pub fn decode_lines<S: AsRef<str> + Sync>(&self, first_line_no: usize, lines: &[S]) -> Vec<Record> {
        lines
            .par_iter()
            .enumerate()
            .filter(|(_, line)| !crate::capture::is_blank(line.as_ref()))
            .map(|(idx, line)| self.decode_line(first_line_no + idx, line.as_ref()))
            .collect()
    }
}

fn content_error(line_no: usize, err: crate::dispatch::ContentError) -> Error {
    Error::MalformedInnerPayload {
        line: line_no,
        kind: err.kind,
        source: err.source,
    }
}

/// Decode one capture line with [Decoder::default].
#[must_use]
pub fn decode_line(line_no: usize, line: &str) -> Record {
    Decoder::default().decode_line(line_no, line)
}

/// Decode a raw payload received on `topic` with [Decoder::default].
#[must_use]
pub fn decode_message(line_no: usize, timestamp: &str, topic: &str, dat: &[u8]) -> Record {
    Decoder::default().decode_message(line_no, timestamp, topic, dat)
}
