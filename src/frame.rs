//! RFC 6587 stream framing.
//!
//! A TCP stream carries syslog messages either octet-counted
//! (`<decimal-length> SP <payload>`) or non-transparently (payload
//! terminated by `NUL`, `LF` or `CRLF`). The two conventions are never
//! negotiated and may alternate on one stream, so the decoder detects
//! the convention per message: a frame that begins with an ASCII digit
//! is octet-counted, anything else is delimiter-terminated.
//!
//! The one subtlety is a delimiter-terminated line that *begins* with a
//! digit. The decoder only sees the line's first byte once earlier
//! bytes of it have already been scanned, so it tracks "currently
//! inside an unterminated line" across calls; while that flag is set
//! the octet-counting branch stays suppressed.

use bytes::{Buf, Bytes, BytesMut};
use tracing::{trace, warn};

use crate::cursor;
use crate::error::Error;

/// Default maximum frame length in bytes.
pub const DEFAULT_MAX_FRAME_LENGTH: usize = 64 * 1024;

/// Stateful per-connection frame decoder.
///
/// `decode` returns `Ok(Some(frame))` when a whole frame is buffered,
/// `Ok(None)` when more input is needed (nothing consumed), and `Err`
/// when the stream can no longer be framed safely. One decoder per
/// connection; the line-mode flag must not be shared across streams.
#[derive(Debug)]
pub struct FrameDecoder {
    max_frame_length: usize,
    in_line_mode: bool,
}

impl Default for FrameDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameDecoder {
    pub fn new() -> Self {
        Self::with_max_frame_length(DEFAULT_MAX_FRAME_LENGTH)
    }

    pub fn with_max_frame_length(max_frame_length: usize) -> Self {
        FrameDecoder {
            max_frame_length,
            in_line_mode: false,
        }
    }

    /// Try to extract the next frame from `buf`.
    ///
    /// Bytes are consumed from `buf` only when a complete frame is
    /// emitted, so on `Ok(None)` the caller simply appends more input
    /// and calls again.
    pub fn decode(&mut self, buf: &mut BytesMut) -> Result<Option<Bytes>, Error> {
        let Some(first) = buf.first().copied() else {
            return Ok(None);
        };

        if !self.in_line_mode && first.is_ascii_digit() {
            self.decode_octet_counted(buf)
        } else {
            self.decode_delimited(buf)
        }
    }

    fn decode_octet_counted(&mut self, buf: &mut BytesMut) -> Result<Option<Bytes>, Error> {
        let mut pos = 0;
        let length = cursor::read_digits(buf, &mut pos) as usize;

        // An over-length claim is rejected as soon as it is read; waiting
        // for the payload would buffer without bound.
        if length > self.max_frame_length {
            warn!(length, max = self.max_frame_length, "frame length claim over maximum");
            return Err(Error::FrameTooLong {
                length,
                max: self.max_frame_length,
            });
        }

        // The digit run may still be growing.
        if pos == buf.len() {
            return Ok(None);
        }

        // A single space separates the count from the payload.
        if buf[pos] != b' ' {
            return Err(Error::ProtocolViolation {
                offset: pos,
                expected: b' ',
                found: buf[pos],
            });
        }

        if buf.len() < pos + 1 + length {
            return Ok(None);
        }

        buf.advance(pos + 1);
        let frame = buf.split_to(length).freeze();
        trace!(len = frame.len(), "octet-counted frame");
        Ok(Some(frame))
    }

    fn decode_delimited(&mut self, buf: &mut BytesMut) -> Result<Option<Bytes>, Error> {
        let Some(pos) = buf.iter().position(|&b| b == b'\n' || b == 0) else {
            // Unterminated line: remember we are mid-line so a digit at
            // the start of the next chunk is not taken for a length.
            self.in_line_mode = true;
            return Ok(None);
        };

        let mut line = buf.split_to(pos + 1);
        let mut end = pos;
        if line[pos] == b'\n' && pos > 0 && line[pos - 1] == b'\r' {
            end -= 1;
        }
        let frame = line.split_to(end).freeze();
        self.in_line_mode = false;
        trace!(len = frame.len(), "delimiter-terminated frame");
        Ok(Some(frame))
    }
}

/// Frame a payload for transmission.
///
/// Output always uses octet counting: the decimal payload length, one
/// space, then the payload itself. Stateless.
pub fn encode_frame(payload: &[u8], dst: &mut BytesMut) {
    dst.extend_from_slice(payload.len().to_string().as_bytes());
    dst.extend_from_slice(b" ");
    dst.extend_from_slice(payload);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn octet_counted() {
        let mut decoder = FrameDecoder::new();
        let mut buf = BytesMut::from(&b"5 hello5 world"[..]);
        assert_eq!(&decoder.decode(&mut buf).unwrap().unwrap()[..], b"hello");
        assert_eq!(&decoder.decode(&mut buf).unwrap().unwrap()[..], b"world");
        assert_eq!(decoder.decode(&mut buf).unwrap(), None);
    }

    #[test]
    fn octet_counted_incomplete_consumes_nothing() {
        let mut decoder = FrameDecoder::new();
        let mut buf = BytesMut::from(&b"11 hello"[..]);
        assert_eq!(decoder.decode(&mut buf).unwrap(), None);
        assert_eq!(&buf[..], b"11 hello");

        buf.extend_from_slice(b" world");
        assert_eq!(
            &decoder.decode(&mut buf).unwrap().unwrap()[..],
            b"hello world"
        );
    }

    #[test]
    fn incomplete_digit_run() {
        let mut decoder = FrameDecoder::new();
        let mut buf = BytesMut::from(&b"6553"[..]);
        assert_eq!(decoder.decode(&mut buf).unwrap(), None);
        buf.extend_from_slice(b"6 ");
        // 65536 == default max, payload not yet buffered
        assert_eq!(decoder.decode(&mut buf).unwrap(), None);
    }

    #[test]
    fn over_length_claim_fails_without_payload() {
        let mut decoder = FrameDecoder::with_max_frame_length(1024);
        let mut buf = BytesMut::from(&b"2048 "[..]);
        assert!(matches!(
            decoder.decode(&mut buf),
            Err(Error::FrameTooLong {
                length: 2048,
                max: 1024,
            })
        ));
    }

    #[test]
    fn digit_run_not_followed_by_space() {
        let mut decoder = FrameDecoder::new();
        let mut buf = BytesMut::from(&b"5x"[..]);
        assert!(matches!(
            decoder.decode(&mut buf),
            Err(Error::ProtocolViolation {
                offset: 1,
                expected: b' ',
                found: b'x',
            })
        ));
    }

    #[test]
    fn delimiters() {
        let mut decoder = FrameDecoder::new();
        let mut buf = BytesMut::from(&b"one\ntwo\r\nthree\0"[..]);
        assert_eq!(&decoder.decode(&mut buf).unwrap().unwrap()[..], b"one");
        assert_eq!(&decoder.decode(&mut buf).unwrap().unwrap()[..], b"two");
        assert_eq!(&decoder.decode(&mut buf).unwrap().unwrap()[..], b"three");
    }

    #[test]
    fn cr_before_nul_is_kept() {
        let mut decoder = FrameDecoder::new();
        let mut buf = BytesMut::from(&b"abc\r\0"[..]);
        assert_eq!(&decoder.decode(&mut buf).unwrap().unwrap()[..], b"abc\r");
    }

    #[test]
    fn empty_line() {
        let mut decoder = FrameDecoder::new();
        let mut buf = BytesMut::from(&b"\n"[..]);
        assert_eq!(&decoder.decode(&mut buf).unwrap().unwrap()[..], b"");
    }

    #[test]
    fn line_mode_suppresses_octet_counting() {
        let mut decoder = FrameDecoder::new();
        // line starts with non-digit, no delimiter yet
        let mut buf = BytesMut::from(&b"abc"[..]);
        assert_eq!(decoder.decode(&mut buf).unwrap(), None);

        // continuation starts with digits; still the same line
        buf.extend_from_slice(b"123\n");
        assert_eq!(&decoder.decode(&mut buf).unwrap().unwrap()[..], b"abc123");

        // line mode cleared: a digit now starts an octet count again
        buf.extend_from_slice(b"2 ok");
        assert_eq!(&decoder.decode(&mut buf).unwrap().unwrap()[..], b"ok");
    }

    #[test]
    fn encode_is_octet_counted() {
        let mut dst = BytesMut::new();
        encode_frame(b"hello world", &mut dst);
        assert_eq!(&dst[..], b"11 hello world");

        let mut dst = BytesMut::new();
        encode_frame(b"", &mut dst);
        assert_eq!(&dst[..], b"0 ");
    }
}
