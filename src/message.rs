//! In-memory representation of a single Syslog message.

use bytes::Bytes;
use chrono::{DateTime, FixedOffset};

use crate::error::Error;
use crate::facility::Facility;
use crate::severity::Severity;
use crate::structured_data::StructuredElement;

/// Maximum HOSTNAME length in bytes, per RFC 5424 §6.
pub const MAX_HOSTNAME_LENGTH: usize = 255;
/// Maximum APP-NAME length in bytes.
pub const MAX_APPNAME_LENGTH: usize = 48;
/// Maximum PROCID length in bytes.
pub const MAX_PROCID_LENGTH: usize = 128;
/// Maximum MSGID length in bytes.
pub const MAX_MSGID_LENGTH: usize = 32;
/// Maximum SD-ID / PARAM-NAME length in bytes.
pub const MAX_SD_NAME_LENGTH: usize = 32;

/// The UTF-8 byte order mark RFC 5424 requires in front of a UTF-8 MSG.
pub const UTF8_BOM: [u8; 3] = [0xef, 0xbb, 0xbf];

/// RFC 5424 PRINTUSASCII: `%d33-126`.
pub fn is_printable_us_ascii(b: u8) -> bool {
    (0x21..=0x7e).contains(&b)
}

pub(crate) fn is_valid_sd_name(name: &str) -> bool {
    name.len() <= MAX_SD_NAME_LENGTH
        && name
            .bytes()
            .all(|b| is_printable_us_ascii(b) && b != b'=' && b != b']' && b != b'"')
}

/// A parsed or to-be-encoded RFC 5424 syslog message.
///
/// Immutable once built; construct one with [`Message::builder`]. The
/// parser builds without validation (the wire already had to match the
/// grammar), while hand-built messages may opt into validation via
/// `build(true)`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Message {
    facility: Facility,
    severity: Severity,
    timestamp: Option<DateTime<FixedOffset>>,
    hostname: Option<String>,
    appname: Option<String>,
    procid: Option<String>,
    msgid: Option<String>,
    structured_data: Vec<StructuredElement>,
    content: Bytes,
}

impl Message {
    pub fn builder() -> MessageBuilder {
        MessageBuilder::new()
    }

    pub fn facility(&self) -> Facility {
        self.facility
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// The PRI value, `facility * 8 + severity`, always within `0..=191`.
    pub fn priority(&self) -> u8 {
        (self.facility as u8) * 8 + self.severity as u8
    }

    pub fn timestamp(&self) -> Option<DateTime<FixedOffset>> {
        self.timestamp
    }

    pub fn hostname(&self) -> Option<&str> {
        self.hostname.as_deref()
    }

    pub fn appname(&self) -> Option<&str> {
        self.appname.as_deref()
    }

    pub fn procid(&self) -> Option<&str> {
        self.procid.as_deref()
    }

    pub fn msgid(&self) -> Option<&str> {
        self.msgid.as_deref()
    }

    /// SD-ELEMENTs in wire order.
    pub fn structured_data(&self) -> &[StructuredElement] {
        &self.structured_data
    }

    /// Look up one SD-ELEMENT by id.
    pub fn element(&self, id: &str) -> Option<&StructuredElement> {
        self.structured_data.iter().find(|e| e.id() == id)
    }

    /// The raw MSG bytes, including a leading BOM when one was written.
    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// The MSG as UTF-8 with any leading byte order mark stripped.
    pub fn content_utf8(&self) -> Option<&str> {
        let bytes = self.content.strip_prefix(&UTF8_BOM).unwrap_or(&self.content);
        std::str::from_utf8(bytes).ok()
    }
}

/// Accumulates fields for a [`Message`]; pure accumulation, all checks
/// are deferred to [`build`](MessageBuilder::build).
#[derive(Clone, Debug)]
pub struct MessageBuilder {
    facility: Facility,
    severity: Severity,
    timestamp: Option<DateTime<FixedOffset>>,
    hostname: Option<String>,
    appname: Option<String>,
    procid: Option<String>,
    msgid: Option<String>,
    structured_data: Vec<StructuredElement>,
    content: Bytes,
}

impl Default for MessageBuilder {
    fn default() -> Self {
        MessageBuilder {
            facility: Facility::USER,
            severity: Severity::INFO,
            timestamp: None,
            hostname: None,
            appname: None,
            procid: None,
            msgid: None,
            structured_data: Vec::new(),
            content: Bytes::new(),
        }
    }
}

impl MessageBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn facility(mut self, facility: Facility) -> Self {
        self.facility = facility;
        self
    }

    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn timestamp(mut self, timestamp: DateTime<FixedOffset>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn hostname(mut self, hostname: impl Into<String>) -> Self {
        self.hostname = Some(hostname.into());
        self
    }

    pub fn appname(mut self, appname: impl Into<String>) -> Self {
        self.appname = Some(appname.into());
        self
    }

    pub fn procid(mut self, procid: impl Into<String>) -> Self {
        self.procid = Some(procid.into());
        self
    }

    pub fn msgid(mut self, msgid: impl Into<String>) -> Self {
        self.msgid = Some(msgid.into());
        self
    }

    /// Register an SD-ELEMENT, possibly with no parameters. Registering
    /// an id twice is a no-op.
    pub fn add_structured_element(mut self, id: impl Into<String>) -> Self {
        self.element_mut(id.into());
        self
    }

    /// Append one parameter value to the element `id`, creating the
    /// element on first use. Repeated names keep every value.
    pub fn add_structured_param(
        mut self,
        id: impl Into<String>,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.element_mut(id.into()).add_param(name, value);
        self
    }

    /// Set the MSG body from raw bytes, written as-is.
    pub fn content(mut self, content: Bytes) -> Self {
        self.content = content;
        self
    }

    /// Set the MSG body from a string, prefixed with the UTF-8 byte
    /// order mark as RFC 5424 requires for UTF-8 bodies.
    pub fn utf8_content(mut self, content: &str) -> Self {
        let mut buf = Vec::with_capacity(UTF8_BOM.len() + content.len());
        buf.extend_from_slice(&UTF8_BOM);
        buf.extend_from_slice(content.as_bytes());
        self.content = Bytes::from(buf);
        self
    }

    fn element_mut(&mut self, id: String) -> &mut StructuredElement {
        let pos = match self.structured_data.iter().position(|e| e.id() == id) {
            Some(pos) => pos,
            None => {
                self.structured_data.push(StructuredElement::new(id));
                self.structured_data.len() - 1
            }
        };
        &mut self.structured_data[pos]
    }

    /// Build the message. With `validate == false` the fields are taken
    /// as given; with `validate == true` every present header token is
    /// checked for printable US-ASCII and its maximum length, and every
    /// SD-ID and PARAM-NAME for the SD name character set.
    pub fn build(self, validate: bool) -> Result<Message, Error> {
        if validate {
            check_token("hostname", self.hostname.as_deref(), MAX_HOSTNAME_LENGTH)?;
            check_token("appname", self.appname.as_deref(), MAX_APPNAME_LENGTH)?;
            check_token("procid", self.procid.as_deref(), MAX_PROCID_LENGTH)?;
            check_token("msgid", self.msgid.as_deref(), MAX_MSGID_LENGTH)?;
            for element in &self.structured_data {
                check_sd_name("structured data id", element.id())?;
                for (name, _) in element.params() {
                    check_sd_name("structured data param name", name)?;
                }
            }
        }

        Ok(Message {
            facility: self.facility,
            severity: self.severity,
            timestamp: self.timestamp,
            hostname: self.hostname,
            appname: self.appname,
            procid: self.procid,
            msgid: self.msgid,
            structured_data: self.structured_data,
            content: self.content,
        })
    }
}

fn check_token(field: &'static str, value: Option<&str>, max: usize) -> Result<(), Error> {
    let Some(value) = value else {
        return Ok(());
    };
    if value.len() > max {
        return Err(Error::Validation {
            field,
            reason: format!("{} bytes exceeds maximum of {max}", value.len()),
        });
    }
    match value.bytes().find(|&b| !is_printable_us_ascii(b)) {
        Some(b) => Err(Error::Validation {
            field,
            reason: format!("byte 0x{b:02x} is not printable US-ASCII"),
        }),
        None => Ok(()),
    }
}

fn check_sd_name(field: &'static str, name: &str) -> Result<(), Error> {
    if is_valid_sd_name(name) {
        Ok(())
    } else {
        Err(Error::Validation {
            field,
            reason: format!("{name:?} violates the SD name character set"),
        })
    }
}
