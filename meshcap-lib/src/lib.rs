#![doc = include_str!("../README.md")]

mod error;

pub mod assemble;
pub mod capture;
pub mod crypto;
pub mod dispatch;
pub mod hex;
pub mod proto;
pub mod record;
pub mod summary;
pub mod writer;

pub use assemble::{decode_line, decode_message, Decoder};
pub use error::{Error, Result};
pub use record::{FlatRecord, Record};
pub use summary::Summary;
pub use writer::RecordWriter;
