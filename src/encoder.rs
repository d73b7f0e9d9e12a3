//! Serialization of a [`Message`] back into RFC 5424 wire form.

use bytes::{BufMut, BytesMut};
use chrono::{DateTime, FixedOffset};

use crate::error::Error;
use crate::message::{
    is_printable_us_ascii, is_valid_sd_name, Message, MAX_APPNAME_LENGTH, MAX_HOSTNAME_LENGTH,
    MAX_MSGID_LENGTH, MAX_PROCID_LENGTH,
};
use crate::structured_data::StructuredElement;

/// Serialize `message` into `dst`.
///
/// Fields are written in wire order with `-` for every absent one and
/// exactly one space after each, except that the space in front of an
/// empty body is omitted. A message can be built without validation and
/// encoded later, so the character-set checks run here in any case:
/// header tokens are truncated to their maximum lengths and must be
/// printable US-ASCII, SD ids and param names must satisfy the SD name
/// character set. Violations fail with [`Error::Encoding`] rather than
/// emitting malformed wire data.
pub fn encode_message(message: &Message, dst: &mut BytesMut) -> Result<(), Error> {
    // PRI and VERSION
    dst.put_u8(b'<');
    dst.extend_from_slice(message.priority().to_string().as_bytes());
    dst.extend_from_slice(b">1 ");

    // TIMESTAMP
    match message.timestamp() {
        Some(ts) => dst.extend_from_slice(format_timestamp(&ts).as_bytes()),
        None => dst.put_u8(b'-'),
    }
    dst.put_u8(b' ');

    write_nilable(dst, "hostname", message.hostname(), MAX_HOSTNAME_LENGTH)?;
    write_nilable(dst, "appname", message.appname(), MAX_APPNAME_LENGTH)?;
    write_nilable(dst, "procid", message.procid(), MAX_PROCID_LENGTH)?;
    write_nilable(dst, "msgid", message.msgid(), MAX_MSGID_LENGTH)?;

    // STRUCTURED-DATA
    if message.structured_data().is_empty() {
        dst.put_u8(b'-');
    } else {
        for element in message.structured_data() {
            write_sd_element(dst, element)?;
        }
    }

    // MSG
    if !message.content().is_empty() {
        dst.put_u8(b' ');
        dst.extend_from_slice(message.content());
    }

    Ok(())
}

// `yyyy-MM-ddTHH:mm:ss.SSSSSSX`: fixed six-digit fraction, `Z` for UTC
fn format_timestamp(ts: &DateTime<FixedOffset>) -> String {
    if ts.offset().local_minus_utc() == 0 {
        format!("{}Z", ts.format("%Y-%m-%dT%H:%M:%S%.6f"))
    } else {
        ts.format("%Y-%m-%dT%H:%M:%S%.6f%:z").to_string()
    }
}

fn write_nilable(
    dst: &mut BytesMut,
    field: &'static str,
    value: Option<&str>,
    max: usize,
) -> Result<(), Error> {
    match value {
        None | Some("") => dst.put_u8(b'-'),
        Some(value) => {
            let bytes = value.as_bytes();
            let bytes = &bytes[..bytes.len().min(max)];
            if let Some(&b) = bytes.iter().find(|&&b| !is_printable_us_ascii(b)) {
                return Err(Error::Encoding {
                    field,
                    reason: format!("byte 0x{b:02x} is not printable US-ASCII"),
                });
            }
            dst.extend_from_slice(bytes);
        }
    }
    dst.put_u8(b' ');
    Ok(())
}

fn write_sd_element(dst: &mut BytesMut, element: &StructuredElement) -> Result<(), Error> {
    dst.put_u8(b'[');
    write_sd_name(dst, "structured data id", element.id())?;
    if element.is_empty() {
        // placeholder for an element with no parameters
        dst.extend_from_slice(b" -");
    } else {
        for (name, values) in element.params() {
            for value in values {
                dst.put_u8(b' ');
                write_sd_name(dst, "structured data param name", name)?;
                dst.extend_from_slice(b"=\"");
                write_sd_value(dst, value);
                dst.put_u8(b'"');
            }
        }
    }
    dst.put_u8(b']');
    Ok(())
}

fn write_sd_name(dst: &mut BytesMut, field: &'static str, name: &str) -> Result<(), Error> {
    if !is_valid_sd_name(name) {
        return Err(Error::Encoding {
            field,
            reason: format!("{name:?} violates the SD name character set"),
        });
    }
    dst.extend_from_slice(name.as_bytes());
    Ok(())
}

// PARAM-VALUE escaping: `"` and `\` get a `\` in front, anything else
// passes through as UTF-8
fn write_sd_value(dst: &mut BytesMut, value: &str) {
    for b in value.bytes() {
        if b == b'"' || b == b'\\' {
            dst.put_u8(b'\\');
        }
        dst.put_u8(b);
    }
}
