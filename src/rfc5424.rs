//! Parser for [RFC 5424](https://tools.ietf.org/html/rfc5424) message payloads.
//!
//! Consumes exactly one frame as produced by [`crate::frame`] and
//! decodes the fields in their fixed wire order. The parse state is the
//! frame's byte slice plus an offset; the helpers in [`crate::cursor`]
//! advance the offset as they consume tokens.

use bytes::Bytes;
use chrono::DateTime;

use crate::cursor::{expect, peek, read_digits, read_to_char};
use crate::error::Error;
use crate::facility::Facility;
use crate::message::{Message, MessageBuilder};
use crate::severity::Severity;

/// Parse one framed payload into a [`Message`].
///
/// The frame is moved in; the MSG body of the returned message is a
/// zero-copy slice of it. Field-level failures (bad priority, bad
/// timestamp) abort this one message only — the frame boundary is
/// already known, so the stream itself is not corrupted.
///
/// The message is built without validation: the wire already had to
/// match the grammar, re-checking it would be redundant.
pub fn parse_message(frame: Bytes) -> Result<Message, Error> {
    let buf: &[u8] = &frame;
    let mut offset = 0;

    // PRI
    //
    // https://datatracker.ietf.org/doc/html/rfc5424#section-6.2.1
    expect(buf, &mut offset, b'<')?;
    let prival = read_digits(buf, &mut offset);
    expect(buf, &mut offset, b'>')?;
    let (facility, severity) = split_priority(prival)?;

    // VERSION
    match peek(buf, offset) {
        Some(b'1') => offset += 1,
        Some(other) => return Err(Error::UnsupportedVersion(other as char)),
        None => return Err(Error::UnexpectedEndOfInput(offset)),
    }
    expect(buf, &mut offset, b' ')?;

    let mut builder = Message::builder().facility(facility).severity(severity);

    // TIMESTAMP: nil is valid; a non-nil value that does not parse is not
    if let Some(token) = read_to_char(buf, &mut offset, b' ', false, true)? {
        builder = builder.timestamp(DateTime::parse_from_rfc3339(&token)?);
    }

    // HOSTNAME APP-NAME PROCID MSGID
    if let Some(hostname) = read_to_char(buf, &mut offset, b' ', false, true)? {
        builder = builder.hostname(hostname);
    }
    if let Some(appname) = read_to_char(buf, &mut offset, b' ', false, true)? {
        builder = builder.appname(appname);
    }
    if let Some(procid) = read_to_char(buf, &mut offset, b' ', false, true)? {
        builder = builder.procid(procid);
    }
    if let Some(msgid) = read_to_char(buf, &mut offset, b' ', false, true)? {
        builder = builder.msgid(msgid);
    }

    // STRUCTURED-DATA
    match peek(buf, offset) {
        Some(b'-') => offset += 1,
        Some(b'[') => loop {
            builder = parse_sd_element(buf, &mut offset, builder)?;
            if peek(buf, offset) != Some(b'[') {
                break;
            }
        },
        Some(_) => return Err(Error::MalformedStructuredData(offset)),
        None => return Err(Error::UnexpectedEndOfInput(offset)),
    }

    // MSG: everything after the separating space. No space at all means
    // an empty body; the trailing space is never written for one.
    let content = if offset < buf.len() {
        expect(buf, &mut offset, b' ')?;
        frame.slice(offset..)
    } else {
        Bytes::new()
    };

    builder.content(content).build(false)
}

fn split_priority(prival: u32) -> Result<(Facility, Severity), Error> {
    if prival > 191 {
        return Err(Error::InvalidPriority(prival));
    }
    let facility =
        Facility::from_int((prival / 8) as u8).ok_or(Error::InvalidPriority(prival))?;
    let severity =
        Severity::from_int((prival % 8) as u8).ok_or(Error::InvalidPriority(prival))?;
    Ok((facility, severity))
}

// One SD-ELEMENT, e.g. `[exampleSDID@32473 iut="3" eventSource="Application"]`
fn parse_sd_element(
    buf: &[u8],
    offset: &mut usize,
    mut builder: MessageBuilder,
) -> Result<MessageBuilder, Error> {
    expect(buf, offset, b'[')?;

    // SD-ID runs to the first space or `]`
    let start = *offset;
    while let Some(b) = peek(buf, *offset) {
        if b == b' ' || b == b']' {
            break;
        }
        *offset += 1;
    }
    if *offset == buf.len() {
        return Err(Error::UnexpectedEndOfInput(*offset));
    }
    let id = String::from_utf8_lossy(&buf[start..*offset]).into_owned();
    builder = builder.add_structured_element(id.clone());

    // `[id]`: nothing after the id
    if peek(buf, *offset) == Some(b']') {
        *offset += 1;
        return Ok(builder);
    }

    expect(buf, offset, b' ')?;

    // `[id -]`: the placeholder for an element with no parameters
    if peek(buf, *offset) == Some(b'-') {
        *offset += 1;
        expect(buf, offset, b']')?;
        return Ok(builder);
    }

    loop {
        let name = read_to_char(buf, offset, b'=', false, false)?.unwrap_or_default();
        expect(buf, offset, b'"')?;
        let value = read_to_char(buf, offset, b'"', true, false)?.unwrap_or_default();
        builder = builder.add_structured_param(id.clone(), name, value);

        match peek(buf, *offset) {
            Some(b']') => {
                *offset += 1;
                return Ok(builder);
            }
            Some(b' ') => *offset += 1,
            Some(_) => return Err(Error::MalformedStructuredData(*offset)),
            None => return Err(Error::UnexpectedEndOfInput(*offset)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Result<Message, Error> {
        parse_message(Bytes::copy_from_slice(input.as_bytes()))
    }

    #[test]
    fn rfc5424_examples() {
        // https://datatracker.ietf.org/doc/html/rfc5424#section-6.5
        for input in [
            r##"<34>1 2003-10-11T22:14:15.003Z mymachine.example.com su - ID47 - BOM'su root' failed for lonvick on /dev/pts/8"##,
            r##"<165>1 2003-08-24T05:14:15.000003-07:00 192.0.2.1 myproc 8710 - - %% It's time to make the do-nuts."##,
            r##"<165>1 2003-10-11T22:14:15.003Z mymachine.example.com evntslog - ID47 [exampleSDID@32473 iut="3" eventSource="Application" eventID="1011"] BOMAn application event log entry..."##,
            r##"<165>1 2003-10-11T22:14:15.003Z mymachine.example.com evntslog - ID47 [exampleSDID@32473 iut="3" eventSource="Application" eventID="1011"][examplePriority@32473 class="high"]"##,
        ] {
            let _msg = parse(input).unwrap();
        }
    }

    #[test]
    fn all_nil_fields() {
        let msg = parse("<1>1 - - - - - -").unwrap();
        assert_eq!(msg.facility(), Facility::KERN);
        assert_eq!(msg.severity(), Severity::ALERT);
        assert!(msg.timestamp().is_none());
        assert!(msg.hostname().is_none());
        assert!(msg.appname().is_none());
        assert!(msg.procid().is_none());
        assert!(msg.msgid().is_none());
        assert!(msg.structured_data().is_empty());
        assert!(msg.content().is_empty());
    }

    #[test]
    fn priority_bounds() {
        let msg = parse("<0>1 - - - - - -").unwrap();
        assert_eq!(msg.facility(), Facility::KERN);
        assert_eq!(msg.severity(), Severity::EMERG);

        assert!(matches!(
            parse("<192>1 - - - - - -").unwrap_err(),
            Error::InvalidPriority(192)
        ));
        assert!(matches!(
            parse("<4096>1 - - - - - -").unwrap_err(),
            Error::InvalidPriority(4096)
        ));
    }

    #[test]
    fn version_must_be_one() {
        assert!(matches!(
            parse("<34>2 - - - - - -").unwrap_err(),
            Error::UnsupportedVersion('2')
        ));
    }

    #[test]
    fn rejects_rfc3164() {
        assert!(parse("<34>Oct 11 22:14:15 mymachine su: 'su root' failed").is_err());
    }

    #[test]
    fn malformed_timestamp_is_fatal() {
        assert!(matches!(
            parse("<34>1 not-a-timestamp host app - - - msg").unwrap_err(),
            Error::MalformedTimestamp(_)
        ));
    }

    #[test]
    fn structured_data_elements() {
        let msg = parse(
            r#"<165>1 - host evntslog - ID47 [exampleSDID@32473 iut="3" eventSource="Application"][examplePriority@32473 class="high"] entry"#,
        )
        .unwrap();

        assert_eq!(msg.structured_data().len(), 2);
        let example = msg.element("exampleSDID@32473").unwrap();
        assert_eq!(example.values("iut").unwrap(), ["3"]);
        assert_eq!(example.values("eventSource").unwrap(), ["Application"]);
        assert_eq!(
            msg.element("examplePriority@32473").unwrap().first_value("class"),
            Some("high")
        );
        assert_eq!(msg.content(), b"entry");
    }

    #[test]
    fn structured_data_escaped_value() {
        let msg = parse(r#"<165>1 - - - - - [examplePriority@32473 class="\"high\""]"#).unwrap();
        assert_eq!(
            msg.element("examplePriority@32473").unwrap().first_value("class"),
            Some(r#""high""#)
        );
    }

    #[test]
    fn structured_data_repeated_param_names() {
        let msg = parse(r#"<165>1 - - - - - [meta seq="1" seq="2"]"#).unwrap();
        assert_eq!(msg.element("meta").unwrap().values("seq").unwrap(), ["1", "2"]);
    }

    #[test]
    fn empty_structured_element() {
        // the `-` placeholder form and the bare form
        for input in [
            r#"<165>1 - - - - - [foo -] body"#,
            r#"<165>1 - - - - - [foo] body"#,
        ] {
            let msg = parse(input).unwrap();
            let element = msg.element("foo").unwrap();
            assert!(element.is_empty());
            assert_eq!(msg.content(), b"body");
        }
    }

    #[test]
    fn structured_data_lead_byte() {
        assert!(matches!(
            parse("<165>1 - - - - - x body").unwrap_err(),
            Error::MalformedStructuredData(_)
        ));
    }

    #[test]
    fn empty_param_value() {
        let msg = parse(r#"<29>1 - leyal_test4 mgd 13894 UI_CHILD_EXITED [junos@2636 pid="14374" core-dump-status="" command="/usr/sbin/mustd"]"#).unwrap();
        let junos = msg.element("junos@2636").unwrap();
        assert_eq!(junos.first_value("core-dump-status"), Some(""));
        assert_eq!(junos.first_value("command"), Some("/usr/sbin/mustd"));
    }

    #[test]
    fn body_is_rest_of_frame() {
        let msg = parse("<78>1 2016-01-15T00:04:01+00:00 host1 CROND 10391 - - some_message").unwrap();
        assert_eq!(msg.hostname(), Some("host1"));
        assert_eq!(msg.appname(), Some("CROND"));
        assert_eq!(msg.procid(), Some("10391"));
        assert_eq!(msg.content(), b"some_message");
    }

    #[test]
    fn empty_body_after_structured_data() {
        let msg = parse(r#"<165>1 - - - - - [meta a="1"]"#).unwrap();
        assert!(msg.content().is_empty());
    }

    #[test]
    fn truncated_frame() {
        assert!(parse("<39>1 2018-05-15T20:56:58+00:00 -").is_err());
    }
}
