use thiserror::Error;

/// Everything that can go wrong while framing, parsing, building or
/// encoding a syslog message.
///
/// "Need more input" is deliberately not in here: the frame decoder
/// reports it as `Ok(None)`, since partial delivery is the normal case
/// on a stream and not a failure.
#[derive(Debug, Error)]
pub enum Error {
    /// A mandatory literal byte was not where the grammar requires it.
    ///
    /// Fatal for the connection's framing state: past this point the
    /// stream cannot be resynchronized.
    #[error("expected '{}' at offset {} but got 0x{:02x}", char::from(*.expected), .offset, .found)]
    ProtocolViolation {
        offset: usize,
        expected: u8,
        found: u8,
    },

    /// The frame ended in the middle of a field.
    #[error("unexpected end of input at offset {0}")]
    UnexpectedEndOfInput(usize),

    /// PRI must be `facility * 8 + severity`, i.e. within `0..=191`.
    #[error("PRI value {0} outside the range 0..=191")]
    InvalidPriority(u32),

    /// Only version `1` (RFC 5424) messages are understood.
    #[error("unsupported syslog version '{0}'")]
    UnsupportedVersion(char),

    /// A non-nil TIMESTAMP field that is not valid RFC 3339.
    #[error("malformed timestamp: {0}")]
    MalformedTimestamp(#[from] chrono::ParseError),

    /// The STRUCTURED-DATA section broke out of the SD-ELEMENT grammar.
    #[error("malformed structured data at offset {0}")]
    MalformedStructuredData(usize),

    /// An octet-counting prefix claimed more bytes than the configured
    /// maximum. The claim is rejected before the payload arrives.
    #[error("frame length {length} exceeds maximum of {max}")]
    FrameTooLong { length: usize, max: usize },

    /// A field failed the character-set or length checks of a
    /// validating `build`.
    #[error("invalid {field}: {reason}")]
    Validation {
        field: &'static str,
        reason: String,
    },

    /// A field cannot be serialized without producing malformed wire
    /// data.
    #[error("cannot encode {field}: {reason}")]
    Encoding {
        field: &'static str,
        reason: String,
    },
}
