//! Codec for [RFC 5424](https://tools.ietf.org/html/rfc5424) Syslog messages carried over byte
//! streams, framed per [RFC 6587](https://tools.ietf.org/html/rfc6587). Not to be confused with
//! the older [RFC 3164](https://tools.ietf.org/html/rfc3164) BSD Syslog protocol, which many
//! systems still emit.
//!
//! Inbound, a per-connection [`FrameDecoder`] recovers message boundaries from the stream —
//! octet-counted and delimiter-terminated framing are auto-detected per message — and
//! [`parse_message`] decodes each frame, including the Structured Data fields. Outbound,
//! [`encode_message`] serializes a [`Message`] and [`encode_frame`] prefixes it with an octet
//! count. The two directions compose explicitly; there is no pipeline machinery in between.
//!
//! # Example
//!
//! A TCP receive loop hands whatever bytes arrived to the decoder and parses each complete
//! frame:
//!
//! ```
//! use bytes::BytesMut;
//! use syslog_codec::{parse_message, FrameDecoder};
//!
//! let mut decoder = FrameDecoder::new();
//! let mut buf = BytesMut::new();
//!
//! // fragments arrive in arbitrary sizes; None just means "feed me more"
//! buf.extend_from_slice(b"<34>1 2003-10-11T22:14:15.003Z mymachine.example.com ");
//! assert!(decoder.decode(&mut buf).unwrap().is_none());
//!
//! buf.extend_from_slice(b"su - ID47 - hello\n");
//! let frame = decoder.decode(&mut buf).unwrap().unwrap();
//!
//! let message = parse_message(frame).unwrap();
//! assert_eq!(message.hostname(), Some("mymachine.example.com"));
//! assert_eq!(message.content(), b"hello");
//! ```

mod cursor;
mod encoder;
mod error;
mod facility;
pub mod frame;
mod message;
pub mod rfc5424;
mod severity;
mod structured_data;

pub use encoder::encode_message;
pub use error::Error;
pub use facility::Facility;
pub use frame::{encode_frame, FrameDecoder, DEFAULT_MAX_FRAME_LENGTH};
pub use message::{
    is_printable_us_ascii, Message, MessageBuilder, MAX_APPNAME_LENGTH, MAX_HOSTNAME_LENGTH,
    MAX_MSGID_LENGTH, MAX_PROCID_LENGTH, MAX_SD_NAME_LENGTH, UTF8_BOM,
};
pub use rfc5424::parse_message;
pub use severity::Severity;
pub use structured_data::StructuredElement;
