use std::collections::BTreeMap;

use serde::Serialize;

use crate::record::{Payload, Record};

/// Running tally of decoded records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub records: usize,
    pub errors: usize,
    /// By [crate::Error::kind].
    pub error_kinds: BTreeMap<&'static str, usize>,
    /// By `MessageType` column value.
    pub message_types: BTreeMap<&'static str, usize>,
    /// By `PayloadType` column value.
    pub payload_types: BTreeMap<&'static str, usize>,
    /// Decrypted payloads by key name.
    pub keys: BTreeMap<&'static str, usize>,
}

impl Summary {
    pub fn add(&mut self, record: &Record) {
        self.records += 1;

        if let Some(err) = &record.error {
            self.errors += 1;
            *self.error_kinds.entry(err.kind()).or_default() += 1;
        }
        if let Some(mt) = record.message_type() {
            *self.message_types.entry(mt.as_str()).or_default() += 1;
        }
        if let Some(packet) = record.packet() {
            *self
                .payload_types
                .entry(packet.payload.type_name())
                .or_default() += 1;
            if let Payload::Decrypted { key, .. } = &packet.payload {
                *self.keys.entry(*key).or_default() += 1;
            }
        }
    }

    /// Fraction of encrypted packets that were recovered.
    #[must_use]
    pub fn decrypt_rate(&self) -> Option<f64> {
        let decrypted = self.payload_types.get("Decrypted").copied().unwrap_or(0);
        let encrypted = self.payload_types.get("Encrypted").copied().unwrap_or(0);
        let total = decrypted + encrypted;
        if total == 0 {
            None
        } else {
            Some(decrypted as f64 / total as f64)
        }
    }
}
