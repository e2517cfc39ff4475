/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! The 12 byte stream header
//!
//! ```text
//! offset 0 : 4 bytes magic `BC5 `
//! offset 4 : 4 bytes width, big endian
//! offset 8 : 4 bytes height, big endian
//! ```
use crate::constants::{BC5_HEADER_SIZE, BC5_MAGIC};
use crate::errors::Bc5Errors;

/// Image dimensions carried by a stream header
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Bc5Header {
    pub width:  u32,
    pub height: u32
}

impl Bc5Header {
    pub const fn new(width: u32, height: u32) -> Bc5Header {
        Bc5Header { width, height }
    }
    /// Serialize the header to its wire representation
    pub fn to_bytes(self) -> [u8; BC5_HEADER_SIZE] {
        encode_header(self.width, self.height)
    }
}

/// Write magic, width and height into a 12 byte array
pub fn encode_header(width: u32, height: u32) -> [u8; BC5_HEADER_SIZE] {
    let mut header = [0; BC5_HEADER_SIZE];

    header[0..4].copy_from_slice(&BC5_MAGIC);
    header[4..8].copy_from_slice(&width.to_be_bytes());
    header[8..12].copy_from_slice(&height.to_be_bytes());

    header
}

/// Parse a stream header
///
/// # Returns
/// - On success: the header and the bytes following it
/// - On error: [`InsufficientData`] if fewer than 12 bytes are present,
///   [`WrongMagicBytes`] if the stream doesn't start with `BC5 `
///
/// [`InsufficientData`]: Bc5Errors::InsufficientData
/// [`WrongMagicBytes`]: Bc5Errors::WrongMagicBytes
pub fn decode_header(data: &[u8]) -> Result<(Bc5Header, &[u8]), Bc5Errors> {
    if data.len() < BC5_HEADER_SIZE {
        // still report a bad magic if we have enough bytes to see it,
        // a 4 byte png signature is not a truncated bc5 file
        if data.len() >= BC5_MAGIC.len() && data[0..4] != BC5_MAGIC {
            return Err(Bc5Errors::WrongMagicBytes([
                data[0], data[1], data[2], data[3]
            ]));
        }
        return Err(Bc5Errors::InsufficientData(BC5_HEADER_SIZE, data.len()));
    }
    let (header, remainder) = data.split_at(BC5_HEADER_SIZE);

    let magic = [header[0], header[1], header[2], header[3]];

    if magic != BC5_MAGIC {
        return Err(Bc5Errors::WrongMagicBytes(magic));
    }
    let width = u32::from_be_bytes([header[4], header[5], header[6], header[7]]);
    let height = u32::from_be_bytes([header[8], header[9], header[10], header[11]]);

    Ok((Bc5Header::new(width, height), remainder))
}

#[cfg(test)]
mod tests {
    use crate::errors::{Bc5ErrorKind, Bc5Errors};
    use crate::header::{decode_header, encode_header, Bc5Header};

    #[test]
    fn test_header_layout() {
        let header = encode_header(4, 0x0102_0304);
        assert_eq!(
            header,
            [0x42, 0x43, 0x35, 0x20, 0, 0, 0, 4, 0x01, 0x02, 0x03, 0x04]
        );
    }

    #[test]
    fn test_header_round_trip_extremes() {
        for (w, h) in [(1, 1), (4, 4), (1, u32::MAX), (u32::MAX, 1), (65537, 3)] {
            let bytes = encode_header(w, h);
            let (header, rest) = decode_header(&bytes).unwrap();
            assert_eq!(header, Bc5Header::new(w, h));
            assert!(rest.is_empty());
        }
    }

    #[test]
    fn test_header_returns_remainder() {
        let mut bytes = encode_header(8, 8).to_vec();
        bytes.extend_from_slice(&[1, 2, 3]);

        let (_, rest) = decode_header(&bytes).unwrap();
        assert_eq!(rest, &[1, 2, 3]);
    }

    #[test]
    fn test_truncated_header() {
        let bytes = encode_header(8, 8);

        for len in 0..12 {
            let err = decode_header(&bytes[..len]).unwrap_err();
            assert!(matches!(err, Bc5Errors::InsufficientData(12, l) if l == len));
            assert_eq!(err.kind(), Bc5ErrorKind::Format);
        }
    }

    #[test]
    fn test_wrong_magic() {
        let mut bytes = encode_header(8, 8);
        bytes[3] = b'!';
        let err = decode_header(&bytes).unwrap_err();
        assert!(matches!(err, Bc5Errors::WrongMagicBytes(m) if &m == b"BC5!"));

        // short buffers with a foreign signature are rejected by magic
        let err = decode_header(&[0x89, b'P', b'N', b'G']).unwrap_err();
        assert!(matches!(err, Bc5Errors::WrongMagicBytes(_)));
    }
}
