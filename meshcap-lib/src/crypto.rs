//! Channel-key recovery for encrypted packet payloads.
//!
//! Meshtastic encrypts channel traffic with AES in counter mode. Most public traffic
//! uses the well-known default pre-shared key or one of its `simple1`..`simple10`
//! variants, which differ from the default only in the final byte. This module tries
//! each of those keys, in both cipher widths, and accepts the first plaintext that
//! decodes as a [Data] message.
//!
//! ## Nonce
//!
//! ```text
//! Bytes 0-3:   packet id (little-endian)
//! Bytes 4-7:   zero
//! Bytes 8-11:  from node id (little-endian)
//! Bytes 12-15: zero
//! ```
//!
//! The whole 16-byte block is the initial value of a big-endian 128-bit counter.
//!
//! PKI encrypted payloads (direct messages sealed with a node's public key) are never
//! attempted.
use std::fmt::Display;

use aes::{Aes128, Aes256};
use ctr::cipher::{KeyIvInit, StreamCipher};
use ctr::Ctr128BE;
use prost::Message;
use tracing::trace;

use crate::proto::Data;

/// Default channel pre-shared key (`AQ==` in the apps).
pub const DEFAULT_PSK: [u8; 16] = [
    0xd4, 0xf1, 0xbb, 0x3a, 0x20, 0x29, 0x07, 0x59, 0xf0, 0xbc, 0xff, 0xab, 0xcf, 0x4e, 0x69, 0x01,
];

/// Length of a counter-mode nonce.
pub const NONCE_LEN: usize = 16;

/// Derivation of one candidate key from [DEFAULT_PSK].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyRule {
    pub name: &'static str,
    /// Added (wrapping) to the final byte of the default key.
    pub delta: u8,
}

impl KeyRule {
    /// The 16-byte pre-shared key this rule produces.
    #[must_use]
    pub fn psk(&self) -> [u8; 16] {
        let mut psk = DEFAULT_PSK;
        psk[15] = psk[15].wrapping_add(self.delta);
        psk
    }
}

/// Candidate keys in search order.
pub const KEY_RULES: [KeyRule; 11] = [
    KeyRule { name: "default", delta: 0 },
    KeyRule { name: "simple1", delta: 1 },
    KeyRule { name: "simple2", delta: 2 },
    KeyRule { name: "simple3", delta: 3 },
    KeyRule { name: "simple4", delta: 4 },
    KeyRule { name: "simple5", delta: 5 },
    KeyRule { name: "simple6", delta: 6 },
    KeyRule { name: "simple7", delta: 7 },
    KeyRule { name: "simple8", delta: 8 },
    KeyRule { name: "simple9", delta: 9 },
    KeyRule { name: "simple10", delta: 10 },
];

/// AES key width used to expand a 16-byte pre-shared key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyWidth {
    /// The key as-is.
    Aes128,
    /// The key concatenated with itself.
    Aes256,
}

impl Display for KeyWidth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Aes128 => write!(f, "AES-128"),
            Self::Aes256 => write!(f, "AES-256"),
        }
    }
}

/// Widths tried for every key, in order.
pub const KEY_WIDTHS: [KeyWidth; 2] = [KeyWidth::Aes128, KeyWidth::Aes256];

/// Upper bound on decrypt attempts per payload.
pub const MAX_ATTEMPTS: usize = KEY_RULES.len() * KEY_WIDTHS.len();

/// Why an encrypted payload could not be recovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unresolved {
    /// Nothing to decrypt.
    Empty,
    /// Sealed with a node public key.
    PkiEncrypted,
    /// Decryption was disabled by the caller.
    Skipped,
    /// None of the candidate keys produced a valid payload.
    NoMatchingKey,
}

impl Display for Unresolved {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "empty ciphertext"),
            Self::PkiEncrypted => write!(f, "PKI encrypted, private key required"),
            Self::Skipped => write!(f, "decryption disabled"),
            Self::NoMatchingKey => write!(f, "no known channel key matched"),
        }
    }
}

/// A successfully decrypted payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Recovered {
    pub plaintext: Vec<u8>,
    /// `plaintext` decoded.
    pub data: Data,
    /// Name of the matching [KeyRule].
    pub key: &'static str,
    pub width: KeyWidth,
}

/// Construct the counter-mode nonce for a packet.
#[must_use]
pub fn nonce(packet_id: u32, from: u32) -> [u8; NONCE_LEN] {
    let mut nonce = [0u8; NONCE_LEN];
    nonce[0..4].copy_from_slice(&packet_id.to_le_bytes());
    nonce[8..12].copy_from_slice(&from.to_le_bytes());
    nonce
}

/// XOR `buf` in place with the keystream for `psk` expanded to `width`.
///
/// Counter mode is symmetric, so this both encrypts and decrypts.
pub fn apply_keystream(psk: &[u8; 16], width: KeyWidth, nonce: &[u8; NONCE_LEN], buf: &mut [u8]) {
    match width {
        KeyWidth::Aes128 => {
            let mut cipher = Ctr128BE::<Aes128>::new(&(*psk).into(), &(*nonce).into());
            cipher.apply_keystream(buf);
        }
        KeyWidth::Aes256 => {
            let mut key = [0u8; 32];
            key[..16].copy_from_slice(psk);
            key[16..].copy_from_slice(psk);
            let mut cipher = Ctr128BE::<Aes256>::new(&key.into(), &(*nonce).into());
            cipher.apply_keystream(buf);
        }
    }
}

/// Encrypt `plaintext` the way a node would for the given packet.
#[must_use]
pub fn encrypt(
    plaintext: &[u8],
    psk: &[u8; 16],
    width: KeyWidth,
    packet_id: u32,
    from: u32,
) -> Vec<u8> {
    let mut buf = plaintext.to_vec();
    apply_keystream(psk, width, &nonce(packet_id, from), &mut buf);
    buf
}

/// Search the candidate keys for one that turns `ciphertext` into a valid [Data]
/// message.
///
/// Keys are tried in [KEY_RULES] order, and for each key every [KEY_WIDTHS] entry in
/// order, so the result is deterministic even if more than one key would validate.
///
/// # Errors
/// [Unresolved] if `pki_encrypted` is set, `ciphertext` is empty, or no key matched.
/// This is an expected outcome for private channels, not a failure.
pub fn decrypt(
    ciphertext: &[u8],
    packet_id: u32,
    from: u32,
    pki_encrypted: bool,
) -> Result<Recovered, Unresolved> {
    if pki_encrypted {
        return Err(Unresolved::PkiEncrypted);
    }
    if ciphertext.is_empty() {
        return Err(Unresolved::Empty);
    }

    let nonce = nonce(packet_id, from);
    let mut buf = vec![0u8; ciphertext.len()];
    for rule in &KEY_RULES {
        let psk = rule.psk();
        for width in KEY_WIDTHS {
            buf.copy_from_slice(ciphertext);
            apply_keystream(&psk, width, &nonce, &mut buf);
            match Data::decode(buf.as_slice()) {
                Ok(data) => {
                    trace!(packet_id, from, key = rule.name, %width, "payload decrypted");
                    return Ok(Recovered {
                        plaintext: buf,
                        data,
                        key: rule.name,
                        width,
                    });
                }
                Err(err) => {
                    trace!(packet_id, from, key = rule.name, %width, %err, "key rejected");
                }
            }
        }
    }

    Err(Unresolved::NoMatchingKey)
}
