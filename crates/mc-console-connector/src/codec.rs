//! Length-prefixed packet codec for the remote console protocol.
//!
//! Every packet on the wire is laid out little-endian as
//! `size: i32 | id: i32 | kind: i32 | body | 0x00 | 0x00`, where `size`
//! counts every byte after itself.

use bytes::{Buf, BufMut, BytesMut};
use mc_console_core::TransportError;
use std::borrow::Cow;
use tokio_util::codec::{Decoder, Encoder};

/// Client login request carrying the shared secret.
pub const PACKET_AUTH: i32 = 3;
/// Client command request.
pub const PACKET_EXEC_COMMAND: i32 = 2;
/// Server answer to a login request; same value as [`PACKET_EXEC_COMMAND`].
pub const PACKET_AUTH_RESPONSE: i32 = 2;
/// Server answer to a command. Sent by a client, the server does not
/// recognise it and answers with a single packet of the same id.
pub const PACKET_RESPONSE_VALUE: i32 = 0;

/// Request id the server uses to signal a rejected login.
pub const AUTH_FAILURE_ID: i32 = -1;

/// Largest request body the server reads from a client.
pub const MAX_REQUEST_BODY: usize = 1446;
/// Characters in one response fragment; longer answers are split.
pub const MAX_RESPONSE_CHARS: usize = 4096;
/// Bytes one response fragment can occupy once UTF-8 encoded.
pub const MAX_RESPONSE_BODY: usize = MAX_RESPONSE_CHARS * 4;

/// id + kind + two terminating NULs.
const HEADER_AND_PADDING: usize = 10;
const LENGTH_PREFIX: usize = 4;
const MAX_PACKET_SIZE: usize = MAX_RESPONSE_BODY + HEADER_AND_PADDING;

/// One protocol packet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packet {
    pub id: i32,
    pub kind: i32,
    /// Raw body; fragments of one answer may split a character.
    pub body: Vec<u8>,
}

impl Packet {
    pub fn new(id: i32, kind: i32, body: impl Into<Vec<u8>>) -> Self {
        Self {
            id,
            kind,
            body: body.into(),
        }
    }

    /// Body as text. Servers colour their output with `§` codes and
    /// occasionally emit bytes that are not valid UTF-8.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}

/// Codec for [`Packet`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct RconCodec;

impl RconCodec {
    pub fn new() -> Self {
        Self
    }
}

impl Decoder for RconCodec {
    type Item = Packet;
    type Error = TransportError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Packet>, TransportError> {
        if src.len() < LENGTH_PREFIX {
            return Ok(None);
        }

        let mut prefix = [0u8; LENGTH_PREFIX];
        prefix.copy_from_slice(&src[..LENGTH_PREFIX]);
        let size = i32::from_le_bytes(prefix);

        let size = usize::try_from(size)
            .map_err(|_| TransportError::frame(format!("negative packet size {}", size)))?;
        if size < HEADER_AND_PADDING {
            return Err(TransportError::frame(format!(
                "packet size {} is below the minimum of {}",
                size, HEADER_AND_PADDING
            )));
        }
        if size > MAX_PACKET_SIZE {
            return Err(TransportError::frame(format!(
                "packet size {} exceeds the limit of {}",
                size, MAX_PACKET_SIZE
            )));
        }

        let frame_len = LENGTH_PREFIX + size;
        if src.len() < frame_len {
            src.reserve(frame_len - src.len());
            return Ok(None);
        }

        let mut frame = src.split_to(frame_len);
        frame.advance(LENGTH_PREFIX);
        let id = frame.get_i32_le();
        let kind = frame.get_i32_le();

        if frame[frame.len() - 2..] != [0, 0] {
            return Err(TransportError::frame("packet is not NUL terminated"));
        }
        let body = frame[..frame.len() - 2].to_vec();

        Ok(Some(Packet { id, kind, body }))
    }
}

impl Encoder<Packet> for RconCodec {
    type Error = TransportError;

    fn encode(&mut self, packet: Packet, dst: &mut BytesMut) -> Result<(), TransportError> {
        let body = packet.body.as_slice();
        if body.len() > MAX_REQUEST_BODY {
            return Err(TransportError::frame(format!(
                "request body of {} bytes exceeds the limit of {}",
                body.len(),
                MAX_REQUEST_BODY
            )));
        }
        if body.contains(&0) {
            return Err(TransportError::frame("request body contains a NUL byte"));
        }

        let size = body.len() + HEADER_AND_PADDING;
        dst.reserve(LENGTH_PREFIX + size);
        // bounded by MAX_REQUEST_BODY above
        dst.put_i32_le(size as i32);
        dst.put_i32_le(packet.id);
        dst.put_i32_le(packet.kind);
        dst.put_slice(body);
        dst.put_u8(0);
        dst.put_u8(0);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_packet(id: i32, kind: i32, body: &[u8]) -> BytesMut {
        let mut buf = BytesMut::new();
        buf.put_i32_le((body.len() + HEADER_AND_PADDING) as i32);
        buf.put_i32_le(id);
        buf.put_i32_le(kind);
        buf.put_slice(body);
        buf.put_u8(0);
        buf.put_u8(0);
        buf
    }

    #[test]
    fn test_encode_layout() {
        let mut codec = RconCodec::new();
        let mut buf = BytesMut::new();
        codec
            .encode(Packet::new(7, PACKET_EXEC_COMMAND, "list"), &mut buf)
            .unwrap();

        assert_eq!(
            &buf[..],
            &[14, 0, 0, 0, 7, 0, 0, 0, 2, 0, 0, 0, b'l', b'i', b's', b't', 0, 0][..]
        );
    }

    #[test]
    fn test_decode_waits_for_complete_frame() {
        let mut codec = RconCodec::new();
        let full = raw_packet(3, PACKET_RESPONSE_VALUE, b"There are 0 of a max of 20 players online");

        let mut partial = BytesMut::from(&full[..9]);
        assert_eq!(codec.decode(&mut partial).unwrap(), None);

        partial.extend_from_slice(&full[9..]);
        let packet = codec.decode(&mut partial).unwrap().unwrap();
        assert_eq!(packet.id, 3);
        assert_eq!(packet.kind, PACKET_RESPONSE_VALUE);
        assert_eq!(packet.text(), "There are 0 of a max of 20 players online");
        assert!(partial.is_empty());
    }

    #[test]
    fn test_decode_two_frames_in_one_buffer() {
        let mut codec = RconCodec::new();
        let mut buf = raw_packet(1, PACKET_RESPONSE_VALUE, b"");
        buf.extend_from_slice(&raw_packet(1, PACKET_AUTH_RESPONSE, b""));

        let first = codec.decode(&mut buf).unwrap().unwrap();
        let second = codec.decode(&mut buf).unwrap().unwrap();
        assert_eq!(first.kind, PACKET_RESPONSE_VALUE);
        assert_eq!(second.kind, PACKET_AUTH_RESPONSE);
        assert_eq!(codec.decode(&mut buf).unwrap(), None);
    }

    #[test]
    fn test_decode_rejects_bad_sizes() {
        let mut codec = RconCodec::new();

        let mut negative = BytesMut::new();
        negative.put_i32_le(-4);
        assert!(matches!(codec.decode(&mut negative), Err(TransportError::Frame { .. })));

        let mut tiny = BytesMut::new();
        tiny.put_i32_le(6);
        assert!(matches!(codec.decode(&mut tiny), Err(TransportError::Frame { .. })));

        let mut huge = BytesMut::new();
        huge.put_i32_le((MAX_PACKET_SIZE + 1) as i32);
        assert!(matches!(codec.decode(&mut huge), Err(TransportError::Frame { .. })));
    }

    #[test]
    fn test_decode_keeps_invalid_utf8_readable() {
        let mut codec = RconCodec::new();
        let mut buf = raw_packet(2, PACKET_RESPONSE_VALUE, &[b'o', b'k', 0xff]);
        let packet = codec.decode(&mut buf).unwrap().unwrap();
        assert_eq!(packet.body, [b'o', b'k', 0xff]);
        assert!(packet.text().starts_with("ok"));
    }

    #[test]
    fn test_decode_accepts_full_fragment_of_wide_characters() {
        let mut codec = RconCodec::new();
        let text = "\u{1F7E9}".repeat(MAX_RESPONSE_CHARS);
        let mut buf = raw_packet(4, PACKET_RESPONSE_VALUE, text.as_bytes());

        let packet = codec.decode(&mut buf).unwrap().unwrap();
        assert_eq!(packet.body.len(), MAX_RESPONSE_BODY);
        assert_eq!(packet.text(), text);
    }

    #[test]
    fn test_encode_rejects_oversized_or_nul_bodies() {
        let mut codec = RconCodec::new();
        let mut buf = BytesMut::new();

        let long = "x".repeat(MAX_REQUEST_BODY + 1);
        assert!(codec.encode(Packet::new(1, PACKET_EXEC_COMMAND, long), &mut buf).is_err());
        assert!(codec.encode(Packet::new(1, PACKET_EXEC_COMMAND, "say \0"), &mut buf).is_err());
        assert!(buf.is_empty());
    }
}
