use crate::crypto::Unresolved;
use crate::record::MessageType;

/// Errors produced while decoding capture lines.
///
/// Every decode variant carries the 1-based input line number. They are attached to
/// the [crate::Record] produced for that line rather than aborting a run.
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid line format at line {line}")]
    InvalidLineFormat { line: usize },

    #[error("invalid hex payload at line {line}: {source}")]
    InvalidHex {
        line: usize,
        source: hex::FromHexError,
    },

    #[error("malformed {shape} at line {line}: {source}")]
    MalformedEnvelope {
        line: usize,
        shape: MessageType,
        source: prost::DecodeError,
    },

    /// A recognized port's payload failed to decode; `kind` is the message name,
    /// e.g., `Position`.
    #[error("malformed {kind} payload at line {line}: {source}")]
    MalformedInnerPayload {
        line: usize,
        kind: &'static str,
        source: prost::DecodeError,
    },

    #[error("packet absent at line {line}")]
    PacketAbsent { line: usize },

    #[error("encrypted payload unresolved at line {line}: {reason}")]
    EncryptionUnresolved { line: usize, reason: Unresolved },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}

impl Error {
    /// Short stable name for the variant, suitable for tallying.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidLineFormat { .. } => "InvalidLineFormat",
            Self::InvalidHex { .. } => "InvalidHex",
            Self::MalformedEnvelope { .. } => "MalformedEnvelope",
            Self::MalformedInnerPayload { .. } => "MalformedInnerPayload",
            Self::PacketAbsent { .. } => "PacketAbsent",
            Self::EncryptionUnresolved { .. } => "EncryptionUnresolved",
            Self::Io(_) => "Io",
            Self::Csv(_) => "Csv",
        }
    }

    /// Input line the error applies to, if any.
    #[must_use]
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::InvalidLineFormat { line }
            | Self::InvalidHex { line, .. }
            | Self::MalformedEnvelope { line, .. }
            | Self::MalformedInnerPayload { line, .. }
            | Self::PacketAbsent { line }
            | Self::EncryptionUnresolved { line, .. } => Some(*line),
            Self::Io(_) | Self::Csv(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
